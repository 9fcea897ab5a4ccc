use std::sync::{Arc, Mutex};

use court_roster::{CachedRoster, RosterStore};

#[derive(Clone, Default)]
pub struct MockRosterStore {
    pub stored: Arc<Mutex<Option<CachedRoster>>>,
    pub saved: Arc<Mutex<Vec<CachedRoster>>>,
    pub fail_save_with: Option<String>,
}

impl MockRosterStore {
    pub fn with_roster(roster: CachedRoster) -> Self {
        Self {
            stored: Arc::new(Mutex::new(Some(roster))),
            ..Default::default()
        }
    }

    pub fn failing_save(msg: &str) -> Self {
        Self {
            fail_save_with: Some(msg.to_string()),
            ..Default::default()
        }
    }
}

impl RosterStore for MockRosterStore {
    async fn load(&self) -> anyhow::Result<Option<CachedRoster>> {
        Ok(self.stored.lock().unwrap().clone())
    }

    async fn save(&self, roster: &CachedRoster) -> anyhow::Result<()> {
        if let Some(ref msg) = self.fail_save_with {
            return Err(anyhow::anyhow!("{}", msg));
        }
        self.saved.lock().unwrap().push(roster.clone());
        *self.stored.lock().unwrap() = Some(roster.clone());
        Ok(())
    }
}
