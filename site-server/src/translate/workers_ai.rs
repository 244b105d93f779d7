//! Cloudflare Workers AI translation backend (REST API)

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{TranslateError, Translator};
use crate::config::AiConfig;

const SOURCE_LANG: &str = "it";
const TARGET_LANG: &str = "en";

pub struct WorkersAiTranslator {
    client: Client,
    endpoint: String,
    api_token: String,
}

impl WorkersAiTranslator {
    pub fn new(client: Client, config: &AiConfig) -> Self {
        let endpoint = format!(
            "{}/accounts/{}/ai/run/{}",
            config.base_url.trim_end_matches('/'),
            config.account_id,
            config.model
        );
        Self {
            client,
            endpoint,
            api_token: config.api_token.clone(),
        }
    }
}

#[derive(Serialize)]
struct RunRequest<'a> {
    text: &'a str,
    source_lang: &'a str,
    target_lang: &'a str,
}

#[derive(Debug, Deserialize)]
struct RunResponse {
    result: Option<RunResult>,
}

#[derive(Debug, Deserialize)]
struct RunResult {
    translated_text: Option<String>,
}

#[async_trait]
impl Translator for WorkersAiTranslator {
    async fn translate(&self, text: &str) -> Result<String, TranslateError> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(String::new());
        }

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_token)
            .json(&RunRequest {
                text,
                source_lang: SOURCE_LANG,
                target_lang: TARGET_LANG,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TranslateError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body: RunResponse = response.json().await?;
        Ok(body
            .result
            .and_then(|r| r.translated_text)
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_config(base_url: String) -> AiConfig {
        AiConfig {
            account_id: "acc".into(),
            api_token: "tok".into(),
            model: "test-model".into(),
            base_url,
        }
    }

    #[tokio::test]
    async fn test_translate_returns_translated_text() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/accounts/acc/ai/run/test-model"))
            .and(header("authorization", "Bearer tok"))
            .and(body_json(serde_json::json!({
                "text": "Benvenuti",
                "source_lang": "it",
                "target_lang": "en"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"result": {"translated_text": "Welcome"}, "success": true}"#,
            ))
            .mount(&mock_server)
            .await;

        let translator = WorkersAiTranslator::new(Client::new(), &test_config(mock_server.uri()));
        let out = translator.translate("  Benvenuti ").await.unwrap();
        assert_eq!(out, "Welcome");
    }

    #[tokio::test]
    async fn test_blank_input_skips_request() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .expect(0)
            .mount(&mock_server)
            .await;

        let translator = WorkersAiTranslator::new(Client::new(), &test_config(mock_server.uri()));
        assert_eq!(translator.translate("   ").await.unwrap(), "");
    }

    #[tokio::test]
    async fn test_missing_translation_is_empty() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"result": {}}"#))
            .mount(&mock_server)
            .await;

        let translator = WorkersAiTranslator::new(Client::new(), &test_config(mock_server.uri()));
        assert_eq!(translator.translate("Ciao").await.unwrap(), "");
    }

    #[tokio::test]
    async fn test_error_status_is_reported() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429).set_body_string("rate limited"))
            .mount(&mock_server)
            .await;

        let translator = WorkersAiTranslator::new(Client::new(), &test_config(mock_server.uri()));
        let err = translator.translate("Ciao").await.unwrap_err();
        assert!(matches!(err, TranslateError::Status { status: 429, .. }));
    }
}
