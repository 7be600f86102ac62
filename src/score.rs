use crate::storage::Storage;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

pub const HIGH_SCORE_KEY: &str = "snakeHighScore";

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HighScore {
    pub score: u32,
    #[serde(default)]
    pub achieved_at: Option<DateTime<Local>>,
}

impl HighScore {
    /// Accepts the full record or a bare integer; anything else counts as 0.
    pub fn load(storage: &dyn Storage) -> HighScore {
        let raw = match storage.get(HIGH_SCORE_KEY) {
            Some(raw) => raw,
            None => return HighScore::default(),
        };
        if let Ok(record) = serde_json::from_str::<HighScore>(&raw) {
            return record;
        }
        match raw.trim().parse::<u32>() {
            Ok(score) => HighScore { score, achieved_at: None },
            Err(_) => {
                tracing::debug!(%raw, "malformed high score, starting from 0");
                HighScore::default()
            }
        }
    }

    /// Records `score` only if it beats the stored one. Returns whether it did.
    pub fn record(&mut self, score: u32, storage: &mut dyn Storage) -> bool {
        if score <= self.score {
            return false;
        }
        self.score = score;
        self.achieved_at = Some(Local::now());
        self.save(storage);
        true
    }

    fn save(&self, storage: &mut dyn Storage) {
        let result = serde_json::to_string(self)
            .map_err(crate::error::Error::from)
            .and_then(|json| storage.set(HIGH_SCORE_KEY, &json));
        if let Err(e) = result {
            tracing::warn!(error = %e, "failed to save high score");
        }
    }
}
