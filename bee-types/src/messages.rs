use serde::{Deserialize, Serialize};

use crate::{GameId, GameSession, GameType, GameWord};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateGameRequest {
    pub game_type: GameType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player_name: Option<String>,
}

/// Body for both the join and rejoin endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JoinGameRequest {
    pub player_name: String,
    /// The shareable game code, not the numeric session id.
    pub game_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmitWordRequest {
    #[serde(rename = "gameId")]
    pub game_id: GameId,
    pub player_name: String,
    pub word: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EndGameRequest {
    #[serde(rename = "gameId")]
    pub game_id: GameId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaveGameRequest {
    #[serde(rename = "gameId")]
    pub game_id: GameId,
    pub player_name: String,
}

/// Envelope for calls the service can refuse: the transport succeeds but the
/// payload carries a `state` tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ServiceResponse<T> {
    Success { response: T },
    Failed { error_message: String },
}

impl<T> ServiceResponse<T> {
    pub fn into_result(self) -> Result<T, String> {
        match self {
            ServiceResponse::Success { response } => Ok(response),
            ServiceResponse::Failed { error_message } => Err(error_message),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JoinGameResult {
    pub game_state: GameSession,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmitWordResult {
    pub is_pangram: bool,
    pub word_score: i32,
    pub game_state: GameSession,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EndGameResult {
    pub all_words: Vec<GameWord>,
    pub game_state: GameSession,
}

/// End and leave responses wrap their result without a state tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EndGameResponse {
    pub response: EndGameResult,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_omits_missing_player_name() {
        let request = CreateGameRequest {
            game_type: GameType::SinglePlayer,
            player_name: None,
        };
        assert_eq!(serde_json::to_string(&request).unwrap(), r#"{"game_type":0}"#);

        let request = CreateGameRequest {
            game_type: GameType::Cooperative,
            player_name: Some("Alice".to_string()),
        };
        assert_eq!(
            serde_json::to_string(&request).unwrap(),
            r#"{"game_type":2,"player_name":"Alice"}"#
        );
    }

    #[test]
    fn test_submit_request_uses_camel_case_game_id() {
        let request = SubmitWordRequest {
            game_id: 9,
            player_name: "Bob".to_string(),
            word: "BADE".to_string(),
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["gameId"], 9);
        assert_eq!(value["word"], "BADE");
    }

    #[test]
    fn test_failed_envelope() {
        let json = r#"{"state": "failed", "error_message": "Not in word list"}"#;
        let response: ServiceResponse<SubmitWordResult> = serde_json::from_str(json).unwrap();
        assert_eq!(response.into_result().unwrap_err(), "Not in word list");
    }

    #[test]
    fn test_success_envelope() {
        let json = r#"{
            "state": "success",
            "response": {
                "is_pangram": true,
                "word_score": 14,
                "game_state": {"id": 3, "game_type": 0, "outer_letters": "BCDEFG", "middle_letter": "A"}
            }
        }"#;
        let response: ServiceResponse<SubmitWordResult> = serde_json::from_str(json).unwrap();
        let result = response.into_result().unwrap();
        assert!(result.is_pangram);
        assert_eq!(result.word_score, 14);
        assert_eq!(result.game_state.id, 3);
    }
}
