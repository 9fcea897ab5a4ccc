use std::sync::{Arc, Mutex};

use court_pulse::{ChatMessage, ChatModel};

/// Answers every question with `"{reply} #{n}"`, where `n` counts calls
#[derive(Clone)]
pub struct MockChatModel {
    pub reply: String,
    pub calls: Arc<Mutex<Vec<Vec<ChatMessage>>>>,
    pub fail_with: Option<String>,
}

impl MockChatModel {
    pub fn new(reply: &str) -> Self {
        Self {
            reply: reply.to_string(),
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_with: None,
        }
    }

    pub fn failing(msg: &str) -> Self {
        Self {
            reply: String::new(),
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_with: Some(msg.to_string()),
        }
    }
}

impl ChatModel for MockChatModel {
    type Error = anyhow::Error;

    fn model_name(&self) -> &str {
        "mock-gemini"
    }

    async fn generate(&self, history: &[ChatMessage]) -> Result<String, Self::Error> {
        let mut calls = self.calls.lock().unwrap();
        calls.push(history.to_vec());
        if let Some(ref msg) = self.fail_with {
            return Err(anyhow::anyhow!("{}", msg));
        }
        Ok(format!("{} #{}", self.reply, calls.len()))
    }
}
