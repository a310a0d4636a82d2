use bee_types::{
    EndGameResult, FoundWord, GameId, GameSession, GameType, GameWord, PushEvent, Rank,
    SubmitWordRequest, SubmitWordResult,
};
use rand::Rng;
use std::collections::HashSet;
use tracing::debug;

use crate::{
    CelebrationWatch, LetterError, LetterGrid, PlayerColor, PlayerPalette, PlayerScoreEntry,
    RankDistance, ValidationError, WordEntry, distance_to_next_rank, pluralize,
    word_score_message,
};

/// Shown for failures that are neither local validation nor a message from
/// the service.
pub const GENERIC_FAILURE: &str = "Something went wrong. Please try again.";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SessionPhase {
    #[default]
    NoGame,
    Playing,
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Success,
    Error,
}

/// One-line message shown under the entry until the next edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub text: String,
    pub kind: NoticeKind,
}

impl Notice {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: NoticeKind::Info,
        }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: NoticeKind::Success,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: NoticeKind::Error,
        }
    }
}

/// An answer on the end-of-game list and whether anyone found it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryWord {
    pub word: GameWord,
    pub found: bool,
}

/// Everything the client knows about the current game.
///
/// There is exactly one writer: whoever owns the `SessionState`. Service
/// responses and push events are both folded in through the `apply_*`
/// methods, one at a time.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    phase: SessionPhase,
    player_name: String,
    session: Option<GameSession>,
    grid: Option<LetterGrid>,
    entry: WordEntry,
    notice: Option<Notice>,
    all_words: Vec<GameWord>,
    palette: PlayerPalette,
    celebration: CelebrationWatch,
    pending_celebration: Option<Rank>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the session wholesale, as after create or join.
    ///
    /// A session whose grid is malformed is rejected and the current state
    /// is left untouched.
    pub fn load(&mut self, session: GameSession, player_name: &str) -> Result<(), LetterError> {
        let grid = LetterGrid::new(&session.outer_letters, session.center_letter)?;

        self.palette.clear();
        for name in session.scores.keys() {
            self.palette.observe(name);
        }
        for found in &session.found_words {
            if !found.player.is_empty() {
                self.palette.observe(&found.player);
            }
        }
        self.celebration.reset(&session.current_rank);
        self.pending_celebration = None;

        debug!(
            "Loaded game {} ({}) for player '{}'",
            session.id,
            session.game_type.label(),
            player_name
        );

        self.phase = SessionPhase::Playing;
        self.player_name = player_name.to_string();
        self.grid = Some(grid);
        self.session = Some(session);
        self.entry.clear();
        self.notice = None;
        self.all_words.clear();
        Ok(())
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn session(&self) -> Option<&GameSession> {
        self.session.as_ref()
    }

    pub fn game_id(&self) -> Option<GameId> {
        self.session.as_ref().map(|session| session.id)
    }

    pub fn game_code(&self) -> Option<&str> {
        self.session.as_ref().map(|session| session.game_code.as_str())
    }

    pub fn game_type(&self) -> Option<GameType> {
        self.session.as_ref().map(|session| session.game_type)
    }

    pub fn is_multiplayer(&self) -> bool {
        self.game_type().is_some_and(GameType::is_multiplayer)
    }

    pub fn player_name(&self) -> &str {
        &self.player_name
    }

    pub fn grid(&self) -> Option<&LetterGrid> {
        self.grid.as_ref()
    }

    pub fn entry(&self) -> &WordEntry {
        &self.entry
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn set_notice(&mut self, notice: Notice) {
        self.notice = Some(notice);
    }

    pub fn clear_notice(&mut self) {
        self.notice = None;
    }

    pub fn team_score(&self) -> i32 {
        self.session.as_ref().map_or(0, |session| session.team_score)
    }

    /// This player's score. Single-player sessions may not key the score
    /// table by name, in which case the team score is the player's score.
    pub fn player_score(&self) -> i32 {
        let Some(session) = &self.session else {
            return 0;
        };
        match session.scores.get(&self.player_name) {
            Some(score) => *score,
            None if !session.game_type.is_multiplayer() => session.team_score,
            None => 0,
        }
    }

    pub fn rank(&self) -> Rank {
        self.session
            .as_ref()
            .map(|session| session.current_rank.clone())
            .unwrap_or_default()
    }

    pub fn rank_distance(&self) -> Option<RankDistance> {
        let session = self.session.as_ref()?;
        distance_to_next_rank(&session.ranks, session.team_score)
    }

    /// Highest attainable score, shown on the summary screen.
    pub fn max_score(&self) -> Option<i32> {
        self.session.as_ref()?.ranks.queen()
    }

    pub fn found_word_count(&self) -> usize {
        self.session
            .as_ref()
            .map_or(0, |session| session.found_words.len())
    }

    /// Found words in alphabetical order.
    pub fn found_words_sorted(&self) -> Vec<&FoundWord> {
        let mut words: Vec<&FoundWord> = self
            .session
            .iter()
            .flat_map(|session| session.found_words.iter())
            .collect();
        words.sort_by(|a, b| a.word.cmp(&b.word));
        words
    }

    pub fn player_entries(&self) -> Vec<PlayerScoreEntry> {
        match &self.session {
            Some(session) => self.palette.entries(&session.scores),
            None => Vec::new(),
        }
    }

    pub fn player_color(&self, name: &str) -> Option<PlayerColor> {
        self.palette.color_of(name)
    }

    /// Every answer of a finished game, sorted, flagged with whether it was
    /// found.
    pub fn summary_words(&self) -> Vec<SummaryWord> {
        let found: HashSet<&str> = self
            .session
            .iter()
            .flat_map(|session| session.found_words.iter())
            .map(|found| found.word.as_str())
            .collect();

        let mut words: Vec<SummaryWord> = self
            .all_words
            .iter()
            .map(|word| SummaryWord {
                found: found.contains(word.word.as_str()),
                word: word.clone(),
            })
            .collect();
        words.sort_by(|a, b| a.word.word.cmp(&b.word.word));
        words
    }

    pub fn all_words(&self) -> &[GameWord] {
        &self.all_words
    }

    /// The celebration waiting to be shown, if a milestone was just reached.
    pub fn take_celebration(&mut self) -> Option<Rank> {
        self.pending_celebration.take()
    }

    pub fn tap_letter(&mut self, letter: char) {
        if let Some(grid) = &self.grid {
            self.entry.push(letter, grid.valid_letters());
            self.notice = None;
        }
    }

    /// Tap a tile by its display position.
    pub fn tap_tile(&mut self, index: usize) {
        if let Some(letter) = self.grid.as_ref().and_then(|grid| grid.tile(index)) {
            self.tap_letter(letter);
        }
    }

    pub fn update_entry(&mut self, text: &str) {
        if let Some(grid) = &self.grid {
            self.entry.set(text, grid.valid_letters());
            self.notice = None;
        }
    }

    pub fn delete_letter(&mut self) {
        self.entry.pop();
    }

    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        if let Some(grid) = &mut self.grid {
            grid.shuffle(rng);
        }
    }

    /// Check the entry locally and build the request for it.
    ///
    /// A short word never reaches the service: the notice is set and the
    /// entry is kept so the player can keep typing.
    pub fn prepare_submission(&mut self) -> Result<SubmitWordRequest, ValidationError> {
        let game_id = match (&self.session, self.phase) {
            (Some(session), SessionPhase::Playing) => session.id,
            _ => return Err(ValidationError::NoActiveGame),
        };

        match self.entry.submittable() {
            Ok(word) => Ok(SubmitWordRequest {
                game_id,
                player_name: self.player_name.clone(),
                word: word.to_string(),
            }),
            Err(err) => {
                self.notice = Some(Notice::error(err.to_string()));
                Err(err)
            }
        }
    }

    /// Fold in an accepted word: found words, scores, team score and rank
    /// come from the service's session.
    pub fn apply_word_accepted(&mut self, result: SubmitWordResult) {
        self.entry.clear();
        self.notice = Some(Notice::success(word_score_message(
            result.word_score,
            result.is_pangram,
        )));
        self.merge_progress(result.game_state);
    }

    /// The service refused the word. Only the entry and notice change.
    pub fn apply_word_rejected(&mut self, message: &str) {
        self.entry.clear();
        self.notice = Some(Notice::error(message));
    }

    /// Fold in one live-update event. Returns false when there is no game
    /// to apply it to.
    pub fn apply_push(&mut self, event: PushEvent) -> bool {
        let Some(session) = &mut self.session else {
            return false;
        };

        match event {
            PushEvent::WordFound(update) => {
                let found = update.found_word;
                self.notice = Some(Notice::info(format!(
                    "{} found {} for {} point{}",
                    found.player,
                    found.word,
                    found.score,
                    pluralize(found.score)
                )));

                if !found.player.is_empty() {
                    self.palette.observe(&found.player);
                    session
                        .scores
                        .insert(found.player.clone(), update.finder_score);
                }
                session.found_words.push(found);
                session.team_score = update.team_score;
                session.current_rank = update.current_rank;

                let rank = session.current_rank.clone();
                self.observe_rank(&rank);
            }
            PushEvent::PlayerJoined { player_name } => {
                self.palette.observe(&player_name);
                self.notice = Some(Notice::info(format!("{} joined the game", player_name)));
            }
            PushEvent::PlayerLeft { player_name } => {
                self.notice = Some(Notice::info(format!("{} left the game", player_name)));
            }
        }
        true
    }

    /// Record the end of the game and the full answer list.
    pub fn apply_game_over(&mut self, result: EndGameResult) {
        self.all_words = result.all_words;
        self.merge_progress(result.game_state);
        self.entry.clear();
        self.phase = SessionPhase::Finished;
    }

    /// Close the summary screen. The finished session is dropped.
    pub fn dismiss_summary(&mut self) {
        if self.phase != SessionPhase::Finished {
            return;
        }
        self.phase = SessionPhase::NoGame;
        self.session = None;
        self.grid = None;
        self.notice = None;
        self.all_words.clear();
        self.pending_celebration = None;
    }

    fn merge_progress(&mut self, update: GameSession) {
        let Some(session) = &mut self.session else {
            return;
        };

        for name in update.scores.keys() {
            self.palette.observe(name);
        }
        session.found_words = update.found_words;
        session.scores = update.scores;
        session.team_score = update.team_score;
        session.current_rank = update.current_rank;
        if !update.ranks.is_empty() {
            session.ranks = update.ranks;
        }

        let rank = session.current_rank.clone();
        self.observe_rank(&rank);
    }

    fn observe_rank(&mut self, rank: &Rank) {
        if let Some(reached) = self.celebration.observe(rank) {
            self.pending_celebration = Some(reached);
        }
    }
}
