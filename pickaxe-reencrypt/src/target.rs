use pickaxe_fhe::Handle;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::ReencryptError;

/// An encrypted field a player may want to read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncryptedField {
    /// Tool luck, held by the pickaxe registry
    Luck { token_id: u64 },
    /// Unclaimed gold, held by the mining engine
    PlayerEarnings { player: String },
    /// Unclaimed epic drops, held by the mining engine
    PlayerEpicDrops { player: String },
}

#[derive(Deserialize)]
struct HandleResponse {
    handle: Option<Handle>,
}

impl EncryptedField {
    /// Smart-query message that returns this field's handle.
    pub fn query_msg(&self) -> Value {
        match self {
            EncryptedField::Luck { token_id } => json!({ "luck": { "token_id": token_id } }),
            EncryptedField::PlayerEarnings { player } => {
                json!({ "player_earnings": { "player": player } })
            }
            EncryptedField::PlayerEpicDrops { player } => {
                json!({ "player_epic_drops": { "player": player } })
            }
        }
    }

    /// Pull the handle out of the query response.
    ///
    /// A player who never mined has no counters; that is `NoValue`, not zero.
    pub fn parse_handle(&self, response: &[u8]) -> Result<Handle, ReencryptError> {
        let parsed: HandleResponse = serde_json::from_slice(response)
            .map_err(|e| ReencryptError::InvalidResponse(e.to_string()))?;
        parsed.handle.ok_or(ReencryptError::NoValue)
    }
}
