//! Flows: one async operation per capability.
//!
//! Every flow is the same pair: a prompt built by interpolating the caller's
//! fields into a template, and the declared output shape of the result type.
//! The model's answer either deserializes into that shape or the call fails.
//! Flows do not validate their input and never retry.

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::llm_client::prompts::JSON_ONLY_SYSTEM;
use crate::llm_client::{GenerativeModel, LlmError};

pub mod exploration;
pub mod handlers;
pub mod narration;
pub mod prompts;
pub mod recommendation;
pub mod roadmap;
pub mod schema;
pub mod school_plan;
pub mod skill_gap;
pub mod suggestions;

/// A flow result type together with the shape the model is asked to produce.
pub trait OutputShape: DeserializeOwned {
    fn schema() -> Value;
}

/// Sends `prompt` with `T`'s declared shape and parses the answer into `T`.
pub async fn run_flow<T: OutputShape>(
    model: &dyn GenerativeModel,
    flow: &str,
    prompt: &str,
) -> Result<T, LlmError> {
    debug!("Running flow {flow} ({} prompt chars)", prompt.len());
    let value = model
        .generate_json(JSON_ONLY_SYSTEM, prompt, &T::schema())
        .await?;
    serde_json::from_value(value).map_err(LlmError::Parse)
}
