use std::sync::{Arc, Mutex};

use court_pulse::PlayerDirectory;
use court_roster::{Player, Season};

#[derive(Clone)]
pub struct MockPlayerDirectory {
    pub players: Vec<Player>,
    pub calls: Arc<Mutex<Vec<String>>>,
    pub fail_with: Option<String>,
}

impl MockPlayerDirectory {
    pub fn new(players: Vec<Player>) -> Self {
        Self {
            players,
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_with: None,
        }
    }

    pub fn failing(msg: &str) -> Self {
        Self {
            players: Vec::new(),
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_with: Some(msg.to_string()),
        }
    }
}

impl PlayerDirectory for MockPlayerDirectory {
    type Error = anyhow::Error;

    async fn fetch_players(&self, season: &Season) -> Result<Vec<Player>, Self::Error> {
        self.calls.lock().unwrap().push(season.to_string());
        if let Some(ref msg) = self.fail_with {
            return Err(anyhow::anyhow!("{}", msg));
        }
        Ok(self.players.clone())
    }
}

pub fn player(player_id: i64, full_name: &str, team: &str) -> Player {
    Player {
        player_id,
        full_name: full_name.to_string(),
        team_id: player_id * 10,
        team: team.to_string(),
        is_active: true,
    }
}

pub fn fixture_players() -> Vec<Player> {
    vec![
        player(203076, "Anthony Davis", "Lakers"),
        player(2544, "LeBron James", "Lakers"),
        player(203999, "Nikola Jokic", "Nuggets"),
        player(201939, "Stephen Curry", "Warriors"),
        player(1641705, "Victor Wembanyama", "Spurs"),
    ]
}
