//! Model Invoker — linear degrade-by-capability fallback over `MODEL_CHAIN`.
//!
//! Each model is tried once, in order. There is no backoff and no retry of the
//! same model; transient and permanent failures are treated alike.

use serde_json::Value;
use thiserror::Error;
use tracing::{info, warn};

use super::{GenerationOptions, GenerativeBackend};

/// One step of the fallback chain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelAttempt {
    pub model: &'static str,
    /// `None` keeps the model's default sampling temperature.
    pub temperature: Option<f32>,
}

/// Hardcoded to prevent drift. Only the first model gets the temperature override.
pub const MODEL_CHAIN: [ModelAttempt; 3] = [
    ModelAttempt {
        model: "gemini-2.5-pro",
        temperature: Some(1.0),
    },
    ModelAttempt {
        model: "gemini-2.5-flash",
        temperature: None,
    },
    ModelAttempt {
        model: "gemini-2.0-flash",
        temperature: None,
    },
];

/// Raw model output plus the model that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
    pub model: &'static str,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttemptFailure {
    pub model: &'static str,
    pub message: String,
}

#[derive(Debug, Error)]
pub enum InvokeError {
    /// Every model in the chain failed. Displays the last failure.
    #[error("Error: 모든 모델 호출에 실패했습니다. ({})", last_failure(.attempts))]
    Exhausted { attempts: Vec<AttemptFailure> },
}

fn last_failure(attempts: &[AttemptFailure]) -> String {
    attempts
        .last()
        .map(|a| format!("{}: {}", a.model, a.message))
        .unwrap_or_else(|| "no models configured".to_string())
}

/// Walks `MODEL_CHAIN` until one model returns text. The text is not modified.
pub async fn invoke_with_fallback(
    backend: &dyn GenerativeBackend,
    prompt: &str,
    response_schema: Option<&Value>,
) -> Result<Invocation, InvokeError> {
    invoke_chain(backend, &MODEL_CHAIN, prompt, response_schema).await
}

pub(crate) async fn invoke_chain(
    backend: &dyn GenerativeBackend,
    chain: &[ModelAttempt],
    prompt: &str,
    response_schema: Option<&Value>,
) -> Result<Invocation, InvokeError> {
    let mut attempts = Vec::with_capacity(chain.len());

    for (idx, step) in chain.iter().enumerate() {
        let options = GenerationOptions {
            temperature: step.temperature,
            response_schema,
        };

        match backend.generate(step.model, prompt, &options).await {
            Ok(text) => {
                info!(
                    "Model {} answered (attempt {}/{}, {} chars)",
                    step.model,
                    idx + 1,
                    chain.len(),
                    text.chars().count()
                );
                return Ok(Invocation {
                    model: step.model,
                    text,
                });
            }
            Err(e) => {
                warn!(
                    "Model {} failed (attempt {}/{}): {e}",
                    step.model,
                    idx + 1,
                    chain.len()
                );
                attempts.push(AttemptFailure {
                    model: step.model,
                    message: e.to_string(),
                });
            }
        }
    }

    Err(InvokeError::Exhausted { attempts })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::LlmError;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Fails the first `failures` calls, then answers with `answer`.
    /// Records every (model, temperature, schema?) it sees.
    struct ScriptedBackend {
        failures: usize,
        answer: String,
        calls: Mutex<Vec<(String, Option<f32>, bool)>>,
    }

    impl ScriptedBackend {
        fn new(failures: usize, answer: &str) -> Self {
            Self {
                failures,
                answer: answer.to_string(),
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl GenerativeBackend for ScriptedBackend {
        async fn generate(
            &self,
            model: &str,
            _prompt: &str,
            options: &GenerationOptions<'_>,
        ) -> Result<String, LlmError> {
            let mut calls = self.calls.lock().unwrap();
            calls.push((
                model.to_string(),
                options.temperature,
                options.response_schema.is_some(),
            ));
            if calls.len() <= self.failures {
                return Err(LlmError::Api {
                    status: 503,
                    message: format!("{model} overloaded"),
                });
            }
            Ok(self.answer.clone())
        }
    }

    #[tokio::test]
    async fn test_first_model_success_uses_temperature() {
        let backend = ScriptedBackend::new(0, "[]");
        let inv = invoke_with_fallback(&backend, "prompt", None).await.unwrap();
        assert_eq!(inv.model, "gemini-2.5-pro");
        assert_eq!(inv.text, "[]");
        let calls = backend.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].1, Some(1.0));
    }

    #[tokio::test]
    async fn test_third_model_answers_after_two_failures() {
        let backend = ScriptedBackend::new(2, "  [ ]  ");
        let inv = invoke_with_fallback(&backend, "prompt", None).await.unwrap();
        assert_eq!(inv.model, "gemini-2.0-flash");
        // returned unmodified
        assert_eq!(inv.text, "  [ ]  ");

        let calls = backend.calls.lock().unwrap();
        let models: Vec<&str> = calls.iter().map(|c| c.0.as_str()).collect();
        assert_eq!(
            models,
            vec!["gemini-2.5-pro", "gemini-2.5-flash", "gemini-2.0-flash"]
        );
        assert_eq!(calls[1].1, None);
        assert_eq!(calls[2].1, None);
    }

    #[tokio::test]
    async fn test_exhausted_chain_reports_last_error() {
        let backend = ScriptedBackend::new(3, "unused");
        let err = invoke_with_fallback(&backend, "prompt", None).await.unwrap_err();
        let InvokeError::Exhausted { attempts } = &err;
        assert_eq!(attempts.len(), 3);

        let message = err.to_string();
        assert!(message.starts_with("Error:"));
        assert!(message.contains("gemini-2.0-flash overloaded"));
    }

    #[tokio::test]
    async fn test_schema_is_forwarded_to_every_attempt() {
        let backend = ScriptedBackend::new(1, "[]");
        let schema = serde_json::json!({"type": "ARRAY"});
        invoke_with_fallback(&backend, "prompt", Some(&schema))
            .await
            .unwrap();
        let calls = backend.calls.lock().unwrap();
        assert!(calls.iter().all(|c| c.2));
    }

    #[tokio::test]
    async fn test_empty_chain_is_exhausted() {
        let backend = ScriptedBackend::new(0, "[]");
        let err = invoke_chain(&backend, &[], "prompt", None).await.unwrap_err();
        assert!(err.to_string().contains("no models configured"));
    }
}
