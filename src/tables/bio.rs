//! Player biographical names keyed by Retrosheet player id

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::{TableError, read_table};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerName {
    #[serde(rename = "FIRST")]
    pub first: String,
    #[serde(rename = "LAST")]
    pub last: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BioTable {
    players: HashMap<String, PlayerName>,
}

impl BioTable {
    /// Parse `{"aaroh101": {"FIRST": "Hank", "LAST": "Aaron"}, ...}`
    pub fn from_json(json: &str) -> Result<Self, TableError> {
        Ok(Self {
            players: serde_json::from_str(json)?,
        })
    }

    pub fn load(path: &Path) -> Result<Self, TableError> {
        Self::from_json(&read_table(path)?)
    }

    pub fn get(&self, player_id: &str) -> Option<&PlayerName> {
        self.players.get(player_id)
    }

    pub fn first_name(&self, player_id: &str) -> Option<&str> {
        self.get(player_id).map(|p| p.first.as_str())
    }

    pub fn last_name(&self, player_id: &str) -> Option<&str> {
        self.get(player_id).map(|p| p.last.as_str())
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}
