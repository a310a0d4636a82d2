#![allow(dead_code)]

use bee_core::SessionState;
use bee_types::{FoundWord, GameSession, GameType, PushEvent, Rank, RankThresholds, WordFound};
use indexmap::IndexMap;

/// Standard thresholds used across tests
pub fn test_thresholds() -> RankThresholds {
    [("EGG", 0), ("GOOD", 10), ("GENIUS", 50), ("QUEEN", 100)]
        .into_iter()
        .collect()
}

/// Creates a session on the BCDEFG / A grid
pub fn create_test_session(game_type: GameType) -> GameSession {
    GameSession {
        id: 7,
        game_code: "BZZZ".to_string(),
        game_type,
        outer_letters: "BCDEFG".to_string(),
        center_letter: 'A',
        found_words: Vec::new(),
        scores: IndexMap::new(),
        team_score: 0,
        current_rank: Rank::Egg,
        ranks: test_thresholds(),
    }
}

/// Creates a session with the given players already scored
pub fn create_session_with_scores(game_type: GameType, scores: &[(&str, i32)]) -> GameSession {
    let mut session = create_test_session(game_type);
    for (name, score) in scores {
        session.scores.insert(name.to_string(), *score);
    }
    session.team_score = scores.iter().map(|(_, score)| score).sum();
    session
}

/// Loads a fresh state for the given player
pub fn create_loaded_state(game_type: GameType, player_name: &str) -> SessionState {
    let mut state = SessionState::new();
    state
        .load(create_test_session(game_type), player_name)
        .expect("test grid is valid");
    state
}

pub fn found_word(word: &str, player: &str, score: i32) -> FoundWord {
    FoundWord {
        word: word.to_string(),
        is_pangram: false,
        player: player.to_string(),
        score,
    }
}

/// Builds a word-found push event
pub fn word_found_event(
    word: &str,
    player: &str,
    word_score: i32,
    finder_score: i32,
    team_score: i32,
    rank: Rank,
) -> PushEvent {
    PushEvent::WordFound(WordFound {
        found_word: found_word(word, player, word_score),
        finder_score,
        team_score,
        current_rank: rank,
    })
}
