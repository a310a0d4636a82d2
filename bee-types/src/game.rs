use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

pub type GameId = i64;

/// Game mode, carried on the wire as the service's integer tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum GameType {
    SinglePlayer,
    Competitive,
    Cooperative,
}

impl GameType {
    pub fn is_multiplayer(self) -> bool {
        match self {
            GameType::SinglePlayer => false,
            GameType::Competitive | GameType::Cooperative => true,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            GameType::SinglePlayer => "Single Player",
            GameType::Competitive => "Competitive",
            GameType::Cooperative => "Cooperative",
        }
    }
}

impl From<GameType> for u8 {
    fn from(game_type: GameType) -> Self {
        match game_type {
            GameType::SinglePlayer => 0,
            GameType::Competitive => 1,
            GameType::Cooperative => 2,
        }
    }
}

impl TryFrom<u8> for GameType {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(GameType::SinglePlayer),
            1 => Ok(GameType::Competitive),
            2 => Ok(GameType::Cooperative),
            other => Err(format!("unknown game type {}", other)),
        }
    }
}

/// Named tier reached by crossing a score threshold.
///
/// Only the tiers the client reacts to get their own variant. Every other
/// tier the service defines travels through `Other` untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Rank {
    #[default]
    Egg,
    Genius,
    Queen,
    Other(String),
}

impl Rank {
    pub fn name(&self) -> &str {
        match self {
            Rank::Egg => "EGG",
            Rank::Genius => "GENIUS",
            Rank::Queen => "QUEEN",
            Rank::Other(name) => name,
        }
    }

    /// Tiers that earn a celebration when reached.
    pub fn is_milestone(&self) -> bool {
        match self {
            Rank::Genius | Rank::Queen => true,
            Rank::Egg | Rank::Other(_) => false,
        }
    }
}

impl From<String> for Rank {
    fn from(name: String) -> Self {
        match name.to_uppercase().as_str() {
            "EGG" => Rank::Egg,
            "GENIUS" => Rank::Genius,
            "QUEEN" => Rank::Queen,
            _ => Rank::Other(name),
        }
    }
}

impl From<&str> for Rank {
    fn from(name: &str) -> Self {
        Rank::from(name.to_string())
    }
}

impl From<Rank> for String {
    fn from(rank: Rank) -> Self {
        match rank {
            Rank::Other(name) => name,
            named => named.name().to_string(),
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Score needed for each rank, keyed by rank name as the service sends it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RankThresholds(BTreeMap<String, i32>);

impl RankThresholds {
    pub fn threshold(&self, rank: &Rank) -> Option<i32> {
        self.0.get(rank.name()).copied()
    }

    pub fn genius(&self) -> Option<i32> {
        self.threshold(&Rank::Genius)
    }

    pub fn queen(&self) -> Option<i32> {
        self.threshold(&Rank::Queen)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, i32)> for RankThresholds {
    fn from_iter<I: IntoIterator<Item = (K, i32)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(name, score)| (name.into(), score)).collect())
    }
}

/// A word somebody found during the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoundWord {
    pub word: String,
    pub is_pangram: bool,
    #[serde(default)]
    pub player: String,
    #[serde(default)]
    pub score: i32,
}

/// An answer from the end-of-game word list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameWord {
    pub word: String,
    pub is_pangram: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSession {
    pub id: GameId,
    #[serde(default)]
    pub game_code: String,
    pub game_type: GameType,
    pub outer_letters: String,
    #[serde(rename = "middle_letter", alias = "center_letter")]
    pub center_letter: char,
    #[serde(default)]
    pub found_words: Vec<FoundWord>,
    /// Cumulative score per player, in the order players were first seen.
    #[serde(default)]
    pub scores: IndexMap<String, i32>,
    #[serde(default)]
    pub team_score: i32,
    #[serde(default)]
    pub current_rank: Rank,
    #[serde(default)]
    pub ranks: RankThresholds,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_type_wire_tag() {
        assert_eq!(serde_json::to_string(&GameType::Cooperative).unwrap(), "2");
        let parsed: GameType = serde_json::from_str("1").unwrap();
        assert_eq!(parsed, GameType::Competitive);
        assert!(serde_json::from_str::<GameType>("7").is_err());
    }

    #[test]
    fn test_rank_names_round_trip_through_strings() {
        let genius: Rank = serde_json::from_str("\"GENIUS\"").unwrap();
        assert_eq!(genius, Rank::Genius);

        let lower: Rank = serde_json::from_str("\"queen\"").unwrap();
        assert_eq!(lower, Rank::Queen);

        let other: Rank = serde_json::from_str("\"WORKER BEE\"").unwrap();
        assert_eq!(other, Rank::Other("WORKER BEE".to_string()));
        assert_eq!(serde_json::to_string(&other).unwrap(), "\"WORKER BEE\"");
        assert!(!other.is_milestone());
        assert!(Rank::Queen.is_milestone());
    }

    #[test]
    fn test_session_uses_middle_letter_on_the_wire() {
        let json = r#"{
            "id": 12,
            "game_code": "ABCD",
            "game_type": 2,
            "outer_letters": "BCDEFG",
            "middle_letter": "A",
            "found_words": [{"word": "BADE", "is_pangram": false, "player": "Alice", "score": 1}],
            "scores": {"Zed": 3, "Alice": 1},
            "team_score": 4,
            "current_rank": "EGG",
            "ranks": {"GENIUS": 50, "QUEEN": 100}
        }"#;

        let session: GameSession = serde_json::from_str(json).unwrap();
        assert_eq!(session.center_letter, 'A');
        assert_eq!(session.game_type, GameType::Cooperative);
        assert_eq!(session.ranks.genius(), Some(50));
        assert_eq!(session.ranks.queen(), Some(100));
        // Insertion order survives decoding
        let players: Vec<&String> = session.scores.keys().collect();
        assert_eq!(players, vec!["Zed", "Alice"]);

        let encoded = serde_json::to_value(&session).unwrap();
        assert_eq!(encoded["middle_letter"], "A");
    }

    #[test]
    fn test_single_player_session_defaults() {
        let json = r#"{"id": 1, "game_type": 0, "outer_letters": "BCDEFG", "middle_letter": "A"}"#;
        let session: GameSession = serde_json::from_str(json).unwrap();
        assert!(session.found_words.is_empty());
        assert_eq!(session.current_rank, Rank::Egg);
        assert!(session.ranks.is_empty());
        assert!(!session.game_type.is_multiplayer());
    }
}
