/*!
 * Provider implementation for the translation backend.
 *
 * This module contains the client for the OpenAI Responses API, the
 * single remote service the application talks to. The client is
 * constructed once at startup and injected into the translation
 * service for the lifetime of the process.
 */

pub mod openai;
