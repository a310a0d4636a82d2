use bee_types::{Rank, RankThresholds};
use std::fmt;

/// "s" for every count except exactly one.
pub fn pluralize(count: i32) -> &'static str {
    if count == 1 { "" } else { "s" }
}

/// How far the team is from the next milestone rank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankDistance {
    pub points: i32,
    pub next: Rank,
}

impl fmt::Display for RankDistance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} point{} to {}",
            self.points,
            pluralize(self.points),
            self.next.name().to_lowercase()
        )
    }
}

/// Distance to GENIUS, or to QUEEN once GENIUS is reached.
///
/// Returns `None` when the threshold table lacks the rank being aimed for.
/// The distance never goes below zero.
pub fn distance_to_next_rank(thresholds: &RankThresholds, team_score: i32) -> Option<RankDistance> {
    let genius = thresholds.genius()?;
    let (target, next) = if team_score >= genius {
        (thresholds.queen()?, Rank::Queen)
    } else {
        (genius, Rank::Genius)
    };

    Some(RankDistance {
        points: (target - team_score).max(0),
        next,
    })
}

/// Feedback shown after the service accepts a word.
pub fn word_score_message(word_score: i32, is_pangram: bool) -> String {
    let prefix = if is_pangram { "Pangram! - " } else { "" };
    format!("{}{} Point{}!", prefix, word_score, pluralize(word_score))
}

/// Edge trigger for the celebration shown on reaching a milestone rank.
///
/// Fires once per transition into GENIUS or QUEEN. Staying at the same rank
/// across many updates never fires again.
#[derive(Debug, Clone, Default)]
pub struct CelebrationWatch {
    last_seen: Option<Rank>,
}

impl CelebrationWatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start tracking from `rank` without celebrating it, e.g. when a
    /// session is loaded already at GENIUS.
    pub fn reset(&mut self, rank: &Rank) {
        self.last_seen = Some(rank.clone());
    }

    /// Record the current rank and return it if it was just reached.
    pub fn observe(&mut self, rank: &Rank) -> Option<Rank> {
        let changed = self.last_seen.as_ref() != Some(rank);
        self.last_seen = Some(rank.clone());
        if changed && rank.is_milestone() {
            Some(rank.clone())
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn thresholds() -> RankThresholds {
        [("EGG", 0), ("GENIUS", 50), ("QUEEN", 100)].into_iter().collect()
    }

    #[test]
    fn test_distance_to_genius_below_threshold() {
        let distance = distance_to_next_rank(&thresholds(), 40).unwrap();
        assert_eq!(distance.points, 10);
        assert_eq!(distance.next, Rank::Genius);
        assert_eq!(distance.to_string(), "10 points to genius");
    }

    #[test]
    fn test_distance_to_queen_after_genius() {
        let distance = distance_to_next_rank(&thresholds(), 60).unwrap();
        assert_eq!(distance.points, 40);
        assert_eq!(distance.to_string(), "40 points to queen");

        // Exactly at the GENIUS threshold already aims for QUEEN
        let distance = distance_to_next_rank(&thresholds(), 50).unwrap();
        assert_eq!(distance.to_string(), "50 points to queen");
    }

    #[test]
    fn test_distance_singular_and_clamped() {
        assert_eq!(
            distance_to_next_rank(&thresholds(), 49).unwrap().to_string(),
            "1 point to genius"
        );
        assert_eq!(
            distance_to_next_rank(&thresholds(), 130).unwrap().to_string(),
            "0 points to queen"
        );
    }

    #[test]
    fn test_distance_requires_thresholds() {
        assert!(distance_to_next_rank(&RankThresholds::default(), 10).is_none());
        let genius_only: RankThresholds = [("GENIUS", 50)].into_iter().collect();
        assert!(distance_to_next_rank(&genius_only, 10).is_some());
        assert!(distance_to_next_rank(&genius_only, 60).is_none());
    }

    #[test]
    fn test_pluralize() {
        assert_eq!(pluralize(0), "s");
        assert_eq!(pluralize(1), "");
        assert_eq!(pluralize(2), "s");
        assert_eq!(pluralize(-1), "s");
    }

    #[test]
    fn test_word_score_message() {
        assert_eq!(word_score_message(1, false), "1 Point!");
        assert_eq!(word_score_message(5, false), "5 Points!");
        assert_eq!(word_score_message(14, true), "Pangram! - 14 Points!");
    }

    #[test]
    fn test_celebration_fires_only_on_transition() {
        let mut watch = CelebrationWatch::new();
        watch.reset(&Rank::Egg);

        assert_eq!(watch.observe(&Rank::Other("SOLID".to_string())), None);
        assert_eq!(watch.observe(&Rank::Genius), Some(Rank::Genius));
        assert_eq!(watch.observe(&Rank::Genius), None);
        assert_eq!(watch.observe(&Rank::Genius), None);
        assert_eq!(watch.observe(&Rank::Queen), Some(Rank::Queen));
        assert_eq!(watch.observe(&Rank::Queen), None);
    }

    #[test]
    fn test_celebration_not_fired_for_loaded_rank() {
        let mut watch = CelebrationWatch::new();
        watch.reset(&Rank::Genius);
        assert_eq!(watch.observe(&Rank::Genius), None);
        assert_eq!(watch.observe(&Rank::Queen), Some(Rank::Queen));
    }
}
