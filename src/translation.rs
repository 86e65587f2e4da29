/*!
 * Translation service built on the OpenAI provider.
 *
 * Formats one instruction prompt per paragraph, submits it through the
 * injected client, and returns the trimmed response text. One blocking
 * request per call; no batching, no retries, no caching.
 */

use log::{debug, error};
use crate::errors::TranslationError;
use crate::providers::openai::{OpenAI, OpenAIRequest};

/// Translation service turning source paragraphs into translated text
pub struct TranslationService {
    /// Provider client, constructed once at startup and reused for every request
    provider: OpenAI,
}

impl TranslationService {
    /// Create a new translation service around an existing client
    pub fn new(provider: OpenAI) -> Self {
        Self { provider }
    }

    /// Build the instruction prompt for a single paragraph
    pub fn build_prompt(text: &str, source_language: &str, target_language: &str) -> String {
        format!(
            "Translate the following text from {} to {}. \
             Keep the meaning unchanged and phrase the result naturally. \
             Only respond with the translated text, without any explanations or notes.\n\n{}",
            source_language, target_language, text
        )
    }

    /// Translate a single text string
    pub fn translate(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
        model: &str,
    ) -> Result<String, TranslationError> {
        let prompt = Self::build_prompt(text, source_language, target_language);
        let request = OpenAIRequest::new(model, prompt);

        debug!("Requesting translation ({} -> {})", source_language, target_language);
        let response = match self.provider.complete(request) {
            Ok(response) => response,
            Err(e) => {
                error!("Translation request failed: {}", e);
                return Err(e.into());
            },
        };

        let translated = OpenAI::extract_text_from_response(&response);
        let translated = translated.trim();
        if translated.is_empty() {
            return Err(TranslationError::EmptyResult(text.to_string()));
        }

        Ok(translated.to_string())
    }
}
