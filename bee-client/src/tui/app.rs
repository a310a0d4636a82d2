use bee_core::{Notice, SessionPhase, SessionState};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use super::clipboard::copy_to_clipboard;
use super::modal::{Modal, ModalAction};
use super::scroll::ScrollState;
use super::splash::{Splash, SplashAction};
use crate::api::GameService;
use crate::controller::{
    Call, Outcome, ReplyReceiver, ReplySender, ServiceReply, SessionController,
};
use crate::subscription::{SubscriptionState, SubscriptionUpdate};

/// How the client was started from the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LaunchOptions {
    pub join_code: Option<String>,
    pub player_name: Option<String>,
    pub rejoin: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Splash,
    Game,
    Summary,
}

/// Everything a draw pass needs. Only the word-list scroll is written back,
/// with the sizes of the frame just drawn.
pub struct AppView<'a> {
    pub state: &'a SessionState,
    pub splash: &'a Splash,
    pub found_words_visible: bool,
    pub modal: Option<&'a Modal>,
    pub connection: SubscriptionState,
    pub busy: bool,
    pub words_scroll: &'a mut ScrollState,
}

impl AppView<'_> {
    pub fn screen(&self) -> Screen {
        screen_for(self.state.phase())
    }
}

fn screen_for(phase: SessionPhase) -> Screen {
    match phase {
        SessionPhase::NoGame => Screen::Splash,
        SessionPhase::Playing => Screen::Game,
        SessionPhase::Finished => Screen::Summary,
    }
}

/// Copies text somewhere the player can paste it from.
pub type CopyFn = fn(&str) -> anyhow::Result<()>;

pub struct App<S: GameService> {
    pub controller: SessionController<S>,
    pub splash: Splash,
    pub found_words_visible: bool,
    pub modal: Option<Modal>,
    pub should_quit: bool,
    pub words_scroll: ScrollState,
    /// A remote call is in flight. No other call starts until it replies.
    busy: bool,
    replies: ReplySender,
    copy: CopyFn,
    startup: Option<SplashAction>,
}

impl<S: GameService> App<S> {
    /// The returned receiver carries replies to calls the app sends; feed
    /// them back through `handle_reply`.
    pub fn new(controller: SessionController<S>, launch: &LaunchOptions) -> (Self, ReplyReceiver) {
        let (splash, startup) = match &launch.join_code {
            Some(code) => {
                let splash =
                    Splash::with_join(code, launch.player_name.as_deref(), launch.rejoin);
                // With both code and name there is nothing left to ask for
                let startup = launch.player_name.as_ref().map(|name| SplashAction::JoinGame {
                    player_name: name.clone(),
                    game_code: code.clone(),
                    rejoin: launch.rejoin,
                });
                (splash, startup)
            }
            None => (Splash::new(), None),
        };
        let (replies, receiver) = mpsc::unbounded_channel();

        let app = Self {
            controller,
            splash,
            found_words_visible: false,
            modal: None,
            should_quit: false,
            words_scroll: ScrollState::new(),
            busy: false,
            replies,
            copy: copy_to_clipboard,
            startup,
        };
        (app, receiver)
    }

    /// Replace the system clipboard.
    pub fn with_clipboard(mut self, copy: CopyFn) -> Self {
        self.copy = copy;
        self
    }

    pub fn screen(&self) -> Screen {
        screen_for(self.controller.state().phase())
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn view(&mut self) -> AppView<'_> {
        AppView {
            state: self.controller.state(),
            splash: &self.splash,
            found_words_visible: self.found_words_visible,
            modal: self.modal.as_ref(),
            connection: self.controller.subscription_state(),
            busy: self.busy,
            words_scroll: &mut self.words_scroll,
        }
    }

    /// Run the join requested on the command line, if any.
    pub fn start(&mut self) {
        if let Some(action) = self.startup.take() {
            self.run_splash_action(action);
        }
    }

    pub fn handle_update(&mut self, update: SubscriptionUpdate) {
        if self.controller.apply_update(update) {
            self.check_celebration();
        }
    }

    pub fn handle_reply(&mut self, reply: ServiceReply) {
        self.busy = false;

        match self.controller.apply_reply(reply) {
            Ok(Outcome::Started) => {
                self.found_words_visible = false;
                self.modal = None;
                self.words_scroll.scroll_to_top();
            }
            Ok(Outcome::Accepted(accepted)) => {
                debug!("Accepted {} for {}", accepted.word, accepted.word_score);
            }
            Ok(Outcome::Finished(summary)) => {
                self.modal = None;
                self.words_scroll.scroll_to_top();
                info!(
                    "Summary ready: {} answers, team score {}",
                    summary.all_words.len(),
                    summary.team_score
                );
            }
            Err(e) => debug!("Call failed: {}", e),
        }
        self.check_celebration();
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        if let Some(modal) = &mut self.modal {
            if modal.handle_input(key.code) == ModalAction::Close {
                self.modal = None;
            }
            return;
        }

        match self.screen() {
            Screen::Splash => {
                let action = self.splash.handle_key(key);
                self.run_splash_action(action);
            }
            Screen::Game => self.handle_game_key(key),
            Screen::Summary => self.handle_summary_key(key),
        }
    }

    /// Send a call on its own task so the loop keeps drawing and applying
    /// live updates while it is in flight.
    fn dispatch(&mut self, call: Call) {
        self.busy = true;
        let service = self.controller.service();
        let replies = self.replies.clone();
        tokio::spawn(async move {
            let reply = call.send(service.as_ref()).await;
            // Receiver is gone once the player has quit
            let _ = replies.send(reply);
        });
    }

    fn run_splash_action(&mut self, action: SplashAction) {
        let call = match action {
            SplashAction::None => return,
            SplashAction::Quit => {
                self.should_quit = true;
                return;
            }
            _ if self.busy => {
                debug!("Ignoring splash action while a call is in flight");
                return;
            }
            SplashAction::CreateGame {
                game_type,
                player_name,
            } => self
                .controller
                .begin_create(game_type, player_name.as_deref())
                .map(Call::Create),
            SplashAction::JoinGame {
                player_name,
                game_code,
                rejoin,
            } => self
                .controller
                .begin_join(&player_name, &game_code, rejoin)
                .map(|request| Call::Join { request, rejoin }),
        };

        match call {
            Ok(call) => self.dispatch(call),
            Err(e) => debug!("Could not start a game: {}", e),
        }
    }

    fn handle_game_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('e') => self.end_or_leave(),
                KeyCode::Char('s') => self.share(),
                _ => {}
            }
            return;
        }

        if self.scroll_words(key.code) {
            return;
        }

        match key.code {
            KeyCode::Enter => self.submit(),
            KeyCode::Tab => self.found_words_visible = !self.found_words_visible,
            KeyCode::Char('?') => self.modal = Some(Modal::Help),
            code => {
                let state = self.controller.state_mut();
                match code {
                    KeyCode::Backspace => state.delete_letter(),
                    KeyCode::Char(' ') => state.shuffle(&mut rand::thread_rng()),
                    KeyCode::Char(digit @ '1'..='7') => {
                        state.tap_tile(digit as usize - '1' as usize)
                    }
                    KeyCode::Char(letter) if letter.is_alphabetic() => state.tap_letter(letter),
                    _ => {}
                }
            }
        }
    }

    fn handle_summary_key(&mut self, key: KeyEvent) {
        if self.scroll_words(key.code) {
            return;
        }

        if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char('q')) {
            self.controller.state_mut().dismiss_summary();
            self.splash.reset();
            self.words_scroll.scroll_to_top();
        }
    }

    /// Up/Down/PgUp/PgDn/Home/End move the word list. Returns false for any
    /// other key.
    fn scroll_words(&mut self, code: KeyCode) -> bool {
        let scroll = &mut self.words_scroll;
        match code {
            KeyCode::Up => scroll.scroll_up(),
            KeyCode::Down => scroll.scroll_down(),
            KeyCode::PageUp => scroll.page_up(),
            KeyCode::PageDown => scroll.page_down(),
            KeyCode::Home => scroll.scroll_to_top(),
            KeyCode::End => scroll.scroll_to_bottom(),
            _ => return false,
        }
        true
    }

    fn submit(&mut self) {
        if self.busy {
            debug!("Submission ignored while a call is in flight");
            return;
        }
        match self.controller.begin_submit() {
            Ok(request) => self.dispatch(Call::Submit(request)),
            Err(e) => debug!("Submission not sent: {}", e),
        }
    }

    fn end_or_leave(&mut self) {
        if self.busy {
            return;
        }
        let call = if self.controller.state().is_multiplayer() {
            self.controller.begin_leave().map(Call::Leave)
        } else {
            self.controller.begin_end().map(Call::End)
        };

        match call {
            Ok(call) => self.dispatch(call),
            Err(e) => debug!("Could not end the game: {}", e),
        }
    }

    /// Copy the join link, or show it when there is no clipboard.
    fn share(&mut self) {
        if !self.controller.state().is_multiplayer() {
            return;
        }
        let Some(link) = self.controller.share_link() else {
            return;
        };

        match (self.copy)(&link) {
            Ok(()) => {
                self.controller
                    .state_mut()
                    .set_notice(Notice::success("Join link copied to clipboard"));
            }
            Err(e) => {
                warn!("Clipboard unavailable: {:#}", e);
                self.modal = Some(Modal::Share(link));
            }
        }
    }

    fn check_celebration(&mut self) {
        if let Some(rank) = self.controller.state_mut().take_celebration() {
            info!("Reached {}", rank);
            self.modal = Some(Modal::Celebration(rank));
        }
    }
}
