//! Start screen: the game menu and the small forms behind it.
//!
//! Pure input handling. The splash never talks to the service; it returns a
//! `SplashAction` and the app decides what to do with it.

use bee_types::GameType;
use crossterm::event::{KeyCode, KeyEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    SinglePlayer,
    JoinGame,
    Cooperative,
    Competitive,
}

impl MenuItem {
    pub const ALL: [MenuItem; 4] = [
        MenuItem::SinglePlayer,
        MenuItem::JoinGame,
        MenuItem::Cooperative,
        MenuItem::Competitive,
    ];

    pub fn label(self) -> &'static str {
        match self {
            MenuItem::SinglePlayer => "New Single Player Game",
            MenuItem::JoinGame => "Join Existing Game",
            MenuItem::Cooperative => "New Cooperative Game",
            MenuItem::Competitive => "New Competitive Game",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    Join { rejoin: bool },
    Create(GameType),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    GameCode,
    PlayerName,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Form {
    pub kind: FormKind,
    pub game_code: String,
    pub player_name: String,
    pub focus: Field,
}

impl Form {
    fn join(game_code: &str, player_name: &str, rejoin: bool) -> Self {
        let focus = if game_code.is_empty() {
            Field::GameCode
        } else {
            Field::PlayerName
        };
        Self {
            kind: FormKind::Join { rejoin },
            game_code: game_code.to_string(),
            player_name: player_name.to_string(),
            focus,
        }
    }

    fn create(game_type: GameType, player_name: &str) -> Self {
        Self {
            kind: FormKind::Create(game_type),
            game_code: String::new(),
            player_name: player_name.to_string(),
            focus: Field::PlayerName,
        }
    }

    pub fn title(&self) -> &'static str {
        match self.kind {
            FormKind::Join { rejoin: false } => "Join Existing Game",
            FormKind::Join { rejoin: true } => "Rejoin Game",
            FormKind::Create(GameType::Cooperative) => "New Cooperative Game",
            FormKind::Create(GameType::Competitive) => "New Competitive Game",
            FormKind::Create(GameType::SinglePlayer) => "New Single Player Game",
        }
    }

    pub fn has_game_code(&self) -> bool {
        matches!(self.kind, FormKind::Join { .. })
    }

    fn focused_mut(&mut self) -> &mut String {
        match self.focus {
            Field::GameCode => &mut self.game_code,
            Field::PlayerName => &mut self.player_name,
        }
    }

    fn toggle_focus(&mut self) {
        if self.has_game_code() {
            self.focus = match self.focus {
                Field::GameCode => Field::PlayerName,
                Field::PlayerName => Field::GameCode,
            };
        }
    }

    fn submit(&self) -> SplashAction {
        match self.kind {
            FormKind::Join { rejoin } => SplashAction::JoinGame {
                player_name: self.player_name.clone(),
                game_code: self.game_code.clone(),
                rejoin,
            },
            FormKind::Create(game_type) => SplashAction::CreateGame {
                game_type,
                player_name: Some(self.player_name.clone()),
            },
        }
    }
}

/// What the app should do after a key on the splash screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SplashAction {
    None,
    Quit,
    CreateGame {
        game_type: GameType,
        player_name: Option<String>,
    },
    JoinGame {
        player_name: String,
        game_code: String,
        rejoin: bool,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SplashView {
    Menu,
    Form(Form),
}

#[derive(Debug, Clone)]
pub struct Splash {
    pub view: SplashView,
    pub selected: usize,
    /// Remembered between forms so the player types it once.
    last_player_name: String,
}

impl Default for Splash {
    fn default() -> Self {
        Self::new()
    }
}

impl Splash {
    pub fn new() -> Self {
        Self {
            view: SplashView::Menu,
            selected: 0,
            last_player_name: String::new(),
        }
    }

    /// Open straight on the join form, as a shared link does.
    pub fn with_join(game_code: &str, player_name: Option<&str>, rejoin: bool) -> Self {
        let player_name = player_name.unwrap_or_default();
        Self {
            view: SplashView::Form(Form::join(game_code, player_name, rejoin)),
            selected: 1,
            last_player_name: player_name.to_string(),
        }
    }

    pub fn selected_item(&self) -> MenuItem {
        MenuItem::ALL[self.selected % MenuItem::ALL.len()]
    }

    /// Back to the menu, as after a finished game.
    pub fn reset(&mut self) {
        if let SplashView::Form(form) = &self.view {
            self.last_player_name = form.player_name.clone();
        }
        self.view = SplashView::Menu;
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> SplashAction {
        if key.code == KeyCode::Esc && matches!(self.view, SplashView::Form(_)) {
            self.reset();
            return SplashAction::None;
        }

        match &mut self.view {
            SplashView::Menu => self.handle_menu_key(key.code),
            SplashView::Form(form) => match key.code {
                KeyCode::Enter => form.submit(),
                KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
                    form.toggle_focus();
                    SplashAction::None
                }
                KeyCode::Backspace => {
                    form.focused_mut().pop();
                    SplashAction::None
                }
                KeyCode::Char(c) if !c.is_control() => {
                    form.focused_mut().push(c);
                    SplashAction::None
                }
                _ => SplashAction::None,
            },
        }
    }

    fn handle_menu_key(&mut self, code: KeyCode) -> SplashAction {
        let count = MenuItem::ALL.len();
        match code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = (self.selected + count - 1) % count;
                SplashAction::None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.selected = (self.selected + 1) % count;
                SplashAction::None
            }
            KeyCode::Char(c @ '1'..='4') => {
                self.selected = c as usize - '1' as usize;
                self.choose()
            }
            KeyCode::Enter => self.choose(),
            KeyCode::Esc | KeyCode::Char('q') => SplashAction::Quit,
            _ => SplashAction::None,
        }
    }

    fn choose(&mut self) -> SplashAction {
        let name = self.last_player_name.as_str();
        match self.selected_item() {
            MenuItem::SinglePlayer => SplashAction::CreateGame {
                game_type: GameType::SinglePlayer,
                player_name: None,
            },
            MenuItem::JoinGame => {
                self.view = SplashView::Form(Form::join("", name, false));
                SplashAction::None
            }
            MenuItem::Cooperative => {
                self.view = SplashView::Form(Form::create(GameType::Cooperative, name));
                SplashAction::None
            }
            MenuItem::Competitive => {
                self.view = SplashView::Form(Form::create(GameType::Competitive, name));
                SplashAction::None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(splash: &mut Splash, text: &str) {
        for c in text.chars() {
            splash.handle_key(press(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_single_player_starts_without_form() {
        let mut splash = Splash::new();
        assert_eq!(
            splash.handle_key(press(KeyCode::Enter)),
            SplashAction::CreateGame {
                game_type: GameType::SinglePlayer,
                player_name: None
            }
        );
        assert_eq!(splash.view, SplashView::Menu);
    }

    #[test]
    fn test_menu_navigation_wraps() {
        let mut splash = Splash::new();
        splash.handle_key(press(KeyCode::Up));
        assert_eq!(splash.selected_item(), MenuItem::Competitive);
        splash.handle_key(press(KeyCode::Down));
        assert_eq!(splash.selected_item(), MenuItem::SinglePlayer);
    }

    #[test]
    fn test_cooperative_form_submits_name() {
        let mut splash = Splash::new();
        splash.handle_key(press(KeyCode::Char('3')));
        type_text(&mut splash, "Alice");
        assert_eq!(
            splash.handle_key(press(KeyCode::Enter)),
            SplashAction::CreateGame {
                game_type: GameType::Cooperative,
                player_name: Some("Alice".to_string())
            }
        );
    }

    #[test]
    fn test_join_form_fields() {
        let mut splash = Splash::new();
        splash.handle_key(press(KeyCode::Char('2')));
        type_text(&mut splash, "HIVX");
        splash.handle_key(press(KeyCode::Backspace));
        type_text(&mut splash, "E");
        splash.handle_key(press(KeyCode::Tab));
        type_text(&mut splash, "Bob");

        assert_eq!(
            splash.handle_key(press(KeyCode::Enter)),
            SplashAction::JoinGame {
                player_name: "Bob".to_string(),
                game_code: "HIVE".to_string(),
                rejoin: false
            }
        );
    }

    #[test]
    fn test_prefilled_join_focuses_name() {
        let mut splash = Splash::with_join("HIVE", None, false);
        type_text(&mut splash, "Zoe");
        assert_eq!(
            splash.handle_key(press(KeyCode::Enter)),
            SplashAction::JoinGame {
                player_name: "Zoe".to_string(),
                game_code: "HIVE".to_string(),
                rejoin: false
            }
        );
    }

    #[test]
    fn test_escape_returns_to_menu_and_remembers_name() {
        let mut splash = Splash::new();
        splash.handle_key(press(KeyCode::Char('4')));
        type_text(&mut splash, "Carol");
        splash.handle_key(press(KeyCode::Esc));
        assert_eq!(splash.view, SplashView::Menu);

        splash.handle_key(press(KeyCode::Char('3')));
        match &splash.view {
            SplashView::Form(form) => assert_eq!(form.player_name, "Carol"),
            SplashView::Menu => panic!("expected the cooperative form"),
        }
        assert_eq!(splash.handle_key(press(KeyCode::Esc)), SplashAction::None);
        assert_eq!(splash.handle_key(press(KeyCode::Esc)), SplashAction::Quit);
    }
}
