//! Scripted `GenerativeModel` double for unit tests.
//!
//! Responses are queued in call order; every call is recorded so tests can
//! assert on how many requests a flow issued and what it sent.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;
use tokio::sync::Notify;

use super::{GenerativeModel, LlmError};

#[derive(Debug, Clone, PartialEq)]
pub enum RecordedCall {
    Json { system: String, prompt: String, schema: Value },
    Speech { script: String },
}

enum Scripted<T> {
    Ok(T),
    Fail(String),
}

#[derive(Default)]
pub struct ScriptedModel {
    json: Mutex<VecDeque<Scripted<Value>>>,
    speech: Mutex<VecDeque<Scripted<Option<Vec<u8>>>>>,
    calls: Mutex<Vec<RecordedCall>>,
    gate: Option<Arc<Notify>>,
}

impl ScriptedModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call waits for a permit on `gate` before answering.
    pub fn gated(gate: Arc<Notify>) -> Self {
        Self {
            gate: Some(gate),
            ..Self::default()
        }
    }

    pub fn push_json(self, value: Value) -> Self {
        self.json.lock().push_back(Scripted::Ok(value));
        self
    }

    pub fn push_json_failure(self, message: &str) -> Self {
        self.json.lock().push_back(Scripted::Fail(message.to_string()));
        self
    }

    pub fn push_speech(self, pcm: Option<Vec<u8>>) -> Self {
        self.speech.lock().push_back(Scripted::Ok(pcm));
        self
    }

    pub fn push_speech_failure(self, message: &str) -> Self {
        self.speech.lock().push_back(Scripted::Fail(message.to_string()));
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().clone()
    }

    pub fn json_calls(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                RecordedCall::Json { prompt, .. } => Some(prompt),
                RecordedCall::Speech { .. } => None,
            })
            .collect()
    }

    pub fn speech_calls(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                RecordedCall::Speech { script } => Some(script),
                RecordedCall::Json { .. } => None,
            })
            .collect()
    }

    async fn wait_for_gate(&self) {
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
    }
}

fn unscripted() -> LlmError {
    LlmError::Api {
        status: 500,
        message: "no scripted response left".to_string(),
    }
}

#[async_trait]
impl GenerativeModel for ScriptedModel {
    async fn generate_json(
        &self,
        system: &str,
        prompt: &str,
        schema: &Value,
    ) -> Result<Value, LlmError> {
        self.calls.lock().push(RecordedCall::Json {
            system: system.to_string(),
            prompt: prompt.to_string(),
            schema: schema.clone(),
        });
        self.wait_for_gate().await;

        let next = self.json.lock().pop_front();
        match next {
            Some(Scripted::Ok(value)) => Ok(value),
            Some(Scripted::Fail(message)) => Err(LlmError::Api {
                status: 503,
                message,
            }),
            None => Err(unscripted()),
        }
    }

    async fn synthesize_speech(&self, script: &str) -> Result<Option<Vec<u8>>, LlmError> {
        self.calls.lock().push(RecordedCall::Speech {
            script: script.to_string(),
        });
        self.wait_for_gate().await;

        let next = self.speech.lock().pop_front();
        match next {
            Some(Scripted::Ok(pcm)) => Ok(pcm),
            Some(Scripted::Fail(message)) => Err(LlmError::Api {
                status: 503,
                message,
            }),
            None => Err(unscripted()),
        }
    }
}
