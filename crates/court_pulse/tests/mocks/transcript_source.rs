use std::sync::{Arc, Mutex};

use court_pulse::{RawTranscript, TranscriptSource};

#[derive(Clone)]
pub struct MockTranscriptSource {
    pub lines: Vec<String>,
    pub calls: Arc<Mutex<Vec<String>>>,
    pub fail_with: Option<String>,
}

impl MockTranscriptSource {
    pub fn new(lines: &[&str]) -> Self {
        Self {
            lines: lines.iter().map(|l| l.to_string()).collect(),
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_with: None,
        }
    }

    pub fn failing(msg: &str) -> Self {
        Self {
            lines: Vec::new(),
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_with: Some(msg.to_string()),
        }
    }
}

impl TranscriptSource for MockTranscriptSource {
    type Error = anyhow::Error;

    async fn fetch(&self, video_id: &str) -> Result<RawTranscript, Self::Error> {
        self.calls.lock().unwrap().push(video_id.to_string());
        if let Some(ref msg) = self.fail_with {
            return Err(anyhow::anyhow!("{}", msg));
        }
        Ok(RawTranscript {
            video_id: video_id.to_string(),
            language_code: "en".to_string(),
            is_generated: true,
            lines: self.lines.clone(),
        })
    }
}
