// Modal overlays for the game screen.
//
// The app holds an Option<Modal>; while one is open it gets every key first.

use bee_types::Rank;
use crossterm::event::KeyCode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalAction {
    /// Input consumed, nothing else to do
    None,
    Close,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Modal {
    /// A milestone rank was just reached
    Celebration(Rank),
    /// Join link, shown when it could not go to the clipboard
    Share(String),
    Help,
}

impl Modal {
    pub fn title(&self) -> &'static str {
        match self {
            Modal::Celebration(_) => "Congratulations!",
            Modal::Share(_) => "Invite Players",
            Modal::Help => "Keys",
        }
    }

    pub fn handle_input(&mut self, key: KeyCode) -> ModalAction {
        match self {
            Modal::Celebration(_) => ModalAction::Close,
            Modal::Share(_) => match key {
                KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => ModalAction::Close,
                _ => ModalAction::None,
            },
            Modal::Help => match key {
                KeyCode::Esc | KeyCode::Enter | KeyCode::Char('?') | KeyCode::Char('q') => {
                    ModalAction::Close
                }
                _ => ModalAction::None,
            },
        }
    }
}

/// Headline for the celebration modal.
pub fn celebration_message(rank: &Rank) -> String {
    match rank {
        Rank::Queen => "You are the Queen Bee!".to_string(),
        Rank::Genius => "You reached Genius!".to_string(),
        Rank::Egg => "Keep going!".to_string(),
        Rank::Other(name) => format!("You reached {}!", name),
    }
}

pub const HELP_LINES: [(&str, &str); 10] = [
    ("a-z", "type a letter"),
    ("1-7", "tap a tile"),
    ("Enter", "submit word"),
    ("Backspace", "delete last letter"),
    ("Space", "shuffle letters"),
    ("Tab", "show or hide found words"),
    ("Ctrl+E", "end or leave the game"),
    ("Ctrl+S", "share the join link"),
    ("?", "this help"),
    ("Ctrl+C", "quit"),
];
