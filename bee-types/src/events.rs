use serde::{Deserialize, Serialize};

use crate::{FoundWord, Rank};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordFound {
    pub found_word: FoundWord,
    /// The finder's cumulative score after this word.
    pub finder_score: i32,
    pub team_score: i32,
    pub current_rank: Rank,
}

/// Message pushed by the service over the live-update channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PushEvent {
    WordFound(WordFound),
    PlayerJoined { player_name: String },
    PlayerLeft { player_name: String },
}

/// Decoding shape for push payloads. Older services send the word-found
/// update bare, without a `type` field.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PushPayload {
    Tagged(PushEvent),
    Untagged(WordFound),
}

impl From<PushPayload> for PushEvent {
    fn from(payload: PushPayload) -> Self {
        match payload {
            PushPayload::Tagged(event) => event,
            PushPayload::Untagged(word_found) => PushEvent::WordFound(word_found),
        }
    }
}
