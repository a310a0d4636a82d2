use bee_core::{Notice, PlayerScoreEntry, SessionPhase, SessionState, ValidationError};
use bee_types::{
    CreateGameRequest, EndGameRequest, EndGameResult, GameId, GameSession, GameType, GameWord,
    JoinGameRequest, JoinGameResult, LeaveGameRequest, ServiceResponse, SubmitWordRequest,
    SubmitWordResult,
};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::api::GameService;
use crate::config::Config;
use crate::error::ClientError;
use crate::subscription::{
    Subscription, SubscriptionId, SubscriptionState, SubscriptionUpdate, UpdateReceiver,
    UpdateSender,
};

/// What the player sees after a successful submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordAccepted {
    pub word: String,
    pub word_score: i32,
    pub is_pangram: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSummary {
    pub all_words: Vec<GameWord>,
    pub final_scores: Vec<PlayerScoreEntry>,
    pub team_score: i32,
}

pub type ReplySender = mpsc::UnboundedSender<ServiceReply>;
pub type ReplyReceiver = mpsc::UnboundedReceiver<ServiceReply>;

/// A remote call that passed local validation and is ready to send.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Create(CreateGameRequest),
    Join {
        request: JoinGameRequest,
        rejoin: bool,
    },
    Submit(SubmitWordRequest),
    End(EndGameRequest),
    Leave(LeaveGameRequest),
}

impl Call {
    /// Send the call. The reply carries what `apply_reply` needs to merge it.
    pub async fn send<S: GameService>(self, service: &S) -> ServiceReply {
        match self {
            Call::Create(request) => {
                let player_name = request.player_name.clone().unwrap_or_default();
                ServiceReply::Created {
                    player_name,
                    result: service.create_game(request).await,
                }
            }
            Call::Join { request, rejoin } => {
                let player_name = request.player_name.clone();
                let result = if rejoin {
                    service.rejoin_game(request).await
                } else {
                    service.join_game(request).await
                };
                ServiceReply::Joined {
                    player_name,
                    result,
                }
            }
            Call::Submit(request) => {
                let word = request.word.clone();
                ServiceReply::Submitted {
                    word,
                    result: service.submit_word(request).await,
                }
            }
            Call::End(request) => ServiceReply::Finished {
                result: service.end_game(request).await,
            },
            Call::Leave(request) => ServiceReply::Finished {
                result: service.leave_game(request).await,
            },
        }
    }
}

/// Outcome of a sent `Call`.
#[derive(Debug)]
pub enum ServiceReply {
    Created {
        player_name: String,
        result: Result<GameSession, ClientError>,
    },
    Joined {
        player_name: String,
        result: Result<ServiceResponse<JoinGameResult>, ClientError>,
    },
    Submitted {
        word: String,
        result: Result<ServiceResponse<SubmitWordResult>, ClientError>,
    },
    Finished {
        result: Result<EndGameResult, ClientError>,
    },
}

/// What a merged reply changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Started,
    Accepted(WordAccepted),
    Finished(GameSummary),
}

/// Drives the session lifecycle against a `GameService`.
///
/// The controller owns the `SessionState` and at most one live-update
/// subscription. Every remote call is split in two: a `begin_*` step that
/// validates locally and builds the request, and a finish step that merges
/// the reply. The async methods run both around an inline await; the UI
/// instead sends a `Call` on its own task and hands the `ServiceReply` to
/// `apply_reply`. Either way each completed call results in exactly one
/// merge. Push updates come back through the receiver returned by `new` and
/// must be fed to `apply_update` by the same consumer.
pub struct SessionController<S: GameService> {
    service: Arc<S>,
    config: Config,
    state: SessionState,
    subscription: Option<Subscription>,
    next_subscription: SubscriptionId,
    updates: UpdateSender,
}

impl<S: GameService> SessionController<S> {
    pub fn new(service: Arc<S>, config: Config) -> (Self, UpdateReceiver) {
        let (updates, receiver) = mpsc::unbounded_channel();
        let controller = Self {
            service,
            config,
            state: SessionState::new(),
            subscription: None,
            next_subscription: SubscriptionId::new(1),
            updates,
        };
        (controller, receiver)
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut SessionState {
        &mut self.state
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn subscription_state(&self) -> SubscriptionState {
        self.subscription
            .as_ref()
            .map_or(SubscriptionState::Disconnected, Subscription::state)
    }

    pub fn subscription_id(&self) -> Option<SubscriptionId> {
        self.subscription.as_ref().map(Subscription::id)
    }

    pub fn service(&self) -> Arc<S> {
        Arc::clone(&self.service)
    }

    /// Start a new game. Multiplayer modes need a player name; single
    /// player games may go without one.
    pub async fn create_game(
        &mut self,
        game_type: GameType,
        player_name: Option<&str>,
    ) -> Result<(), ClientError> {
        let request = self.begin_create(game_type, player_name)?;
        let player_name = request.player_name.clone().unwrap_or_default();
        let result = self.service.create_game(request).await;
        self.finish_create(&player_name, result)
    }

    pub async fn join_game(&mut self, player_name: &str, game_code: &str) -> Result<(), ClientError> {
        let request = self.begin_join(player_name, game_code, false)?;
        let response = self.service.join_game(request.clone()).await;
        self.finish_join(response, &request.player_name)
    }

    /// Rejoin a game this player was already part of.
    pub async fn rejoin_game(
        &mut self,
        player_name: &str,
        game_code: &str,
    ) -> Result<(), ClientError> {
        let request = self.begin_join(player_name, game_code, true)?;
        let response = self.service.rejoin_game(request.clone()).await;
        self.finish_join(response, &request.player_name)
    }

    pub async fn submit_word(&mut self) -> Result<WordAccepted, ClientError> {
        let request = self.begin_submit()?;
        let word = request.word.clone();
        let response = self.service.submit_word(request).await;
        self.finish_submit(word, response)
    }

    /// End the game for everyone.
    pub async fn end_game(&mut self) -> Result<GameSummary, ClientError> {
        let request = self.begin_end()?;
        let result = self.service.end_game(request).await;
        self.finish_game(result)
    }

    /// Leave a multiplayer game. The other players keep playing.
    pub async fn leave_game(&mut self) -> Result<GameSummary, ClientError> {
        let request = self.begin_leave()?;
        let result = self.service.leave_game(request).await;
        self.finish_game(result)
    }

    pub fn begin_create(
        &mut self,
        game_type: GameType,
        player_name: Option<&str>,
    ) -> Result<CreateGameRequest, ClientError> {
        let player_name = player_name.map(str::trim).unwrap_or_default();
        if game_type.is_multiplayer() && player_name.is_empty() {
            return Err(self.report(ValidationError::EmptyPlayerName.into()));
        }

        info!(
            "Creating {} game for '{}'",
            game_type.label(),
            player_name
        );
        Ok(CreateGameRequest {
            game_type,
            player_name: (!player_name.is_empty()).then(|| player_name.to_string()),
        })
    }

    pub fn begin_join(
        &mut self,
        player_name: &str,
        game_code: &str,
        rejoin: bool,
    ) -> Result<JoinGameRequest, ClientError> {
        let player_name = player_name.trim();
        let game_code = game_code.trim();
        if game_code.is_empty() {
            return Err(self.report(ValidationError::EmptyGameCode.into()));
        }
        if player_name.is_empty() {
            return Err(self.report(ValidationError::EmptyPlayerName.into()));
        }

        let verb = if rejoin { "Rejoining" } else { "Joining" };
        info!("{} game {} as '{}'", verb, game_code, player_name);
        Ok(JoinGameRequest {
            player_name: player_name.to_string(),
            game_id: game_code.to_string(),
        })
    }

    /// Check the entry locally. A short word sets the notice and never
    /// becomes a request.
    pub fn begin_submit(&mut self) -> Result<SubmitWordRequest, ClientError> {
        let request = self.state.prepare_submission()?;
        debug!("Submitting '{}' to game {}", request.word, request.game_id);
        Ok(request)
    }

    pub fn begin_end(&mut self) -> Result<EndGameRequest, ClientError> {
        let game_id = self.active_game_id()?;
        info!("Ending game {}", game_id);
        Ok(EndGameRequest { game_id })
    }

    pub fn begin_leave(&mut self) -> Result<LeaveGameRequest, ClientError> {
        let game_id = self.active_game_id()?;
        let request = LeaveGameRequest {
            game_id,
            player_name: self.state.player_name().to_string(),
        };
        info!("Leaving game {} as '{}'", game_id, request.player_name);
        Ok(request)
    }

    /// Merge the reply to a `Call` sent outside the controller.
    pub fn apply_reply(&mut self, reply: ServiceReply) -> Result<Outcome, ClientError> {
        match reply {
            ServiceReply::Created {
                player_name,
                result,
            } => self
                .finish_create(&player_name, result)
                .map(|()| Outcome::Started),
            ServiceReply::Joined {
                player_name,
                result,
            } => self
                .finish_join(result, &player_name)
                .map(|()| Outcome::Started),
            ServiceReply::Submitted { word, result } => {
                self.finish_submit(word, result).map(Outcome::Accepted)
            }
            ServiceReply::Finished { result } => self.finish_game(result).map(Outcome::Finished),
        }
    }

    /// Join link for the active game.
    pub fn share_link(&self) -> Option<String> {
        self.state
            .game_code()
            .map(|code| self.config.share_link(code))
    }

    /// Fold one subscription update into the session. Returns true when
    /// something visible changed.
    pub fn apply_update(&mut self, update: SubscriptionUpdate) -> bool {
        let Some(subscription) = self
            .subscription
            .as_mut()
            .filter(|current| current.id() == update.id())
        else {
            debug!("Dropping update from stale subscription {}", update.id());
            return false;
        };
        if subscription.state() == SubscriptionState::Closed {
            debug!("Dropping update from closed subscription {}", update.id());
            return false;
        }

        match update {
            SubscriptionUpdate::Opened { id } => {
                info!("Update subscription {} connected", id);
                subscription.mark_connected();
                true
            }
            SubscriptionUpdate::Event { event, .. } => self.state.apply_push(event),
            SubscriptionUpdate::Failed { id, reason } => {
                warn!("Update subscription {} failed: {}", id, reason);
                subscription.mark_closed();
                true
            }
            SubscriptionUpdate::Ended { id } => {
                warn!("Update subscription {} was closed by the service", id);
                subscription.mark_closed();
                true
            }
        }
    }

    /// Close the live-update channel, if one is open.
    pub fn close_subscription(&mut self) {
        if let Some(subscription) = &mut self.subscription {
            subscription.close();
        }
    }

    fn finish_create(
        &mut self,
        player_name: &str,
        result: Result<GameSession, ClientError>,
    ) -> Result<(), ClientError> {
        match result {
            Ok(session) => self.start_session(session, player_name),
            Err(e) => Err(self.report(e)),
        }
    }

    fn finish_join(
        &mut self,
        response: Result<ServiceResponse<JoinGameResult>, ClientError>,
        player_name: &str,
    ) -> Result<(), ClientError> {
        let response = match response {
            Ok(response) => response,
            Err(e) => return Err(self.report(e)),
        };

        match response.into_result() {
            Ok(result) => self.start_session(result.game_state, player_name),
            Err(message) => {
                warn!("Join refused: {}", message);
                Err(self.report(ClientError::server(message)))
            }
        }
    }

    fn start_session(&mut self, session: GameSession, player_name: &str) -> Result<(), ClientError> {
        let multiplayer = session.game_type.is_multiplayer();
        let game_code = session.game_code.clone();

        if let Err(e) = self.state.load(session, player_name) {
            return Err(self.report(e.into()));
        }
        info!("Playing game {}", game_code);

        self.close_subscription();
        if multiplayer {
            let id = self.next_subscription;
            self.next_subscription = id.next();
            self.subscription = Some(Subscription::open(
                id,
                Arc::clone(&self.service),
                &game_code,
                player_name,
                self.updates.clone(),
            ));
        } else {
            self.subscription = None;
        }
        Ok(())
    }

    fn active_game_id(&mut self) -> Result<GameId, ClientError> {
        match (self.state.phase(), self.state.game_id()) {
            (SessionPhase::Playing, Some(game_id)) => Ok(game_id),
            _ => Err(self.report(ValidationError::NoActiveGame.into())),
        }
    }

    fn finish_submit(
        &mut self,
        word: String,
        response: Result<ServiceResponse<SubmitWordResult>, ClientError>,
    ) -> Result<WordAccepted, ClientError> {
        let response = match response {
            Ok(response) => response,
            Err(e) => return Err(self.report(e)),
        };

        match response.into_result() {
            Ok(result) => {
                info!("'{}' accepted for {} points", word, result.word_score);
                let accepted = WordAccepted {
                    word,
                    word_score: result.word_score,
                    is_pangram: result.is_pangram,
                };
                self.state.apply_word_accepted(result);
                Ok(accepted)
            }
            Err(message) => {
                debug!("'{}' rejected: {}", word, message);
                self.state.apply_word_rejected(&message);
                Err(ClientError::server(message))
            }
        }
    }

    fn finish_game(
        &mut self,
        result: Result<EndGameResult, ClientError>,
    ) -> Result<GameSummary, ClientError> {
        let result = match result {
            Ok(result) => result,
            Err(e) => return Err(self.report(e)),
        };

        self.close_subscription();
        self.state.apply_game_over(result);
        info!(
            "Game over with {} of {} words found",
            self.state.found_word_count(),
            self.state.all_words().len()
        );

        Ok(GameSummary {
            all_words: self.state.all_words().to_vec(),
            final_scores: self.state.player_entries(),
            team_score: self.state.team_score(),
        })
    }

    /// Put a failure in front of the player and hand it back to the caller.
    fn report(&mut self, err: ClientError) -> ClientError {
        match &err {
            ClientError::Validation(_) | ClientError::Server { .. } => {}
            other => warn!("Service call failed: {}", other),
        }
        self.state.set_notice(Notice::error(err.user_message()));
        err
    }
}
