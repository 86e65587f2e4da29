use std::time::Duration;
use serde::{Serialize, Deserialize};
use reqwest::blocking::Client;
use reqwest::header;
use log::error;
use crate::errors::ProviderError;

/// OpenAI client for interacting with the OpenAI Responses API
pub struct OpenAI {
    /// HTTP client for API requests
    client: Client,
    /// API key for authentication
    api_key: String,
    /// API endpoint URL (optional, defaults to public API)
    endpoint: String,
}

/// OpenAI Responses API request
#[derive(Debug, Serialize)]
pub struct OpenAIRequest {
    /// The model to use
    model: String,

    /// The input prompt for the model
    input: String,
}

impl OpenAIRequest {
    /// Create a new Responses API request
    pub fn new(model: impl Into<String>, input: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            input: input.into(),
        }
    }

    /// The model this request targets
    pub fn model(&self) -> &str {
        &self.model
    }
}

/// OpenAI Responses API response
#[derive(Debug, Deserialize)]
pub struct OpenAIResponse {
    /// Output items produced by the model
    #[serde(default)]
    pub output: Vec<OpenAIOutputItem>,
}

/// A single output item in a Responses API response
#[derive(Debug, Deserialize)]
pub struct OpenAIOutputItem {
    /// The type of the output item
    #[serde(rename = "type")]
    pub item_type: String,

    /// Content blocks for message items
    #[serde(default)]
    pub content: Vec<OpenAIContent>,
}

/// Individual content block in an output message
#[derive(Debug, Deserialize)]
pub struct OpenAIContent {
    /// The type of content
    #[serde(rename = "type")]
    pub content_type: String,

    /// The actual text content
    #[serde(default)]
    pub text: String,
}

impl OpenAI {
    /// Create a new OpenAI client
    pub fn new(api_key: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(120))
                .build()
                .unwrap_or_default(),
            api_key: api_key.into(),
            endpoint: endpoint.into(),
        }
    }

    /// Complete a Responses API request
    pub fn complete(&self, request: OpenAIRequest) -> Result<OpenAIResponse, ProviderError> {
        let api_url = if self.endpoint.is_empty() {
            "https://api.openai.com/v1/responses".to_string()
        } else {
            format!("{}/responses", self.endpoint.trim_end_matches('/'))
        };

        let response = self.client.post(&api_url)
            .header(header::CONTENT_TYPE, "application/json")
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .map_err(|e| {
                if e.is_connect() {
                    ProviderError::ConnectionError(format!("Failed to reach OpenAI API: {}", e))
                } else {
                    ProviderError::RequestFailed(format!("Failed to send request to OpenAI API: {}", e))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text()
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("OpenAI API error ({}): {}", status, error_text);
            return Err(Self::map_api_error(status.as_u16(), error_text));
        }

        let openai_response = response.json::<OpenAIResponse>()
            .map_err(|e| ProviderError::ParseError(format!("Failed to parse OpenAI API response: {}", e)))?;

        Ok(openai_response)
    }

    /// Map a non-success HTTP status to a provider error
    pub fn map_api_error(status_code: u16, message: String) -> ProviderError {
        match status_code {
            401 => ProviderError::AuthenticationError(message),
            429 => ProviderError::RateLimitExceeded(message),
            _ => ProviderError::ApiError { status_code, message },
        }
    }

    /// Extract text from an OpenAI response
    ///
    /// Concatenates the `output_text` content blocks of every message
    /// item, which is what the service reports as the response text.
    pub fn extract_text_from_response(response: &OpenAIResponse) -> String {
        response.output.iter()
            .filter(|item| item.item_type == "message")
            .flat_map(|item| item.content.iter())
            .filter(|c| c.content_type == "output_text")
            .map(|c| c.text.clone())
            .collect()
    }
}
