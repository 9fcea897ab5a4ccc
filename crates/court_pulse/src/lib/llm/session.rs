use crate::llm::{ChatMessage, ChatModel, Role};

pub const ACKNOWLEDGEMENT: &str =
    "Okay, I understand. I have the context from the transcript. Ask me anything about it.";

/// Priming turns: the transcript itself and the model's acknowledgement
const PRIMING_TURNS: usize = 2;

/// A conversation primed with a transcript, replayed to the model on every turn
pub struct ChatSession<'m, M: ChatModel> {
    model: &'m M,
    history: Vec<ChatMessage>,
}

impl<'m, M: ChatModel> ChatSession<'m, M> {
    pub fn new(model: &'m M, transcript: &str) -> Self {
        Self {
            model,
            history: vec![
                ChatMessage::user(format!(
                    "This is the transcript of a YouTube video:\n\n{transcript}"
                )),
                ChatMessage::model(ACKNOWLEDGEMENT),
            ],
        }
    }

    pub fn history(&self) -> &[ChatMessage] {
        &self.history
    }

    /// The most recent answer, `None` until the first question has been answered
    pub fn last(&self) -> Option<&str> {
        if self.history.len() <= PRIMING_TURNS {
            return None;
        }
        self.history
            .last()
            .filter(|m| m.role == Role::Model)
            .map(|m| m.text.as_str())
    }

    /// Sends `question` with the whole conversation so far. The exchange is
    /// only recorded once the model answers, so a failed turn can be retried.
    #[tracing::instrument(skip_all, fields(model = self.model.model_name(), turns = self.history.len()))]
    pub async fn ask(&mut self, question: &str) -> anyhow::Result<String> {
        let mut turn = self.history.clone();
        turn.push(ChatMessage::user(question));

        let reply = self
            .model
            .generate(&turn)
            .await
            .map_err(|e| {
                anyhow::anyhow!(
                    "Failed to get a reply from {}: {e:?}",
                    self.model.model_name()
                )
            })?;

        turn.push(ChatMessage::model(reply.clone()));
        self.history = turn;

        Ok(reply)
    }
}
