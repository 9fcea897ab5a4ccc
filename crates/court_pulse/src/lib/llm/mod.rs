pub mod gemini;
pub mod prompts;
pub mod session;

use std::{fmt::Debug, future::Future};

use serde::{Deserialize, Serialize};

pub trait ChatModel {
    type Error: Debug;

    fn model_name(&self) -> &str;

    /// Produces the next model turn for a conversation ending in a user turn
    fn generate(
        &self,
        history: &[ChatMessage],
    ) -> impl Future<Output = Result<String, Self::Error>> + Send;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: Role,
    pub text: String,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
        }
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: Role::Model,
            text: text.into(),
        }
    }
}
