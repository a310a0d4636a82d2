//! Live-update subscriber.
//!
//! Each subscription is a spawned task that reads the service's event stream
//! and forwards decoded `PushEvent`s over a channel. The task never touches
//! session state: the single consumer of the channel (the UI loop) hands each
//! update to `SessionController::apply_update`, so merges happen one at a
//! time on one task.

pub mod sse;

use bee_types::{PushEvent, PushPayload};
use bytes::Bytes;
use futures_util::{Stream, StreamExt};
use std::fmt;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::api::GameService;
use crate::error::ClientError;
use sse::SseDecoder;

pub type UpdateSender = mpsc::UnboundedSender<SubscriptionUpdate>;
pub type UpdateReceiver = mpsc::UnboundedReceiver<SubscriptionUpdate>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubscriptionState {
    Disconnected,
    Connected,
    Closed,
}

/// Output of a subscription task, tagged with the subscription it came from.
#[derive(Debug, Clone, PartialEq)]
pub enum SubscriptionUpdate {
    Opened { id: SubscriptionId },
    Event { id: SubscriptionId, event: PushEvent },
    Failed { id: SubscriptionId, reason: String },
    Ended { id: SubscriptionId },
}

impl SubscriptionUpdate {
    pub fn id(&self) -> SubscriptionId {
        match self {
            SubscriptionUpdate::Opened { id }
            | SubscriptionUpdate::Event { id, .. }
            | SubscriptionUpdate::Failed { id, .. }
            | SubscriptionUpdate::Ended { id } => *id,
        }
    }
}

pub struct Subscription {
    id: SubscriptionId,
    game_code: String,
    state: SubscriptionState,
    task: JoinHandle<()>,
}

impl Subscription {
    /// Spawn the task for `game_code` / `player_name`. The subscription
    /// starts Disconnected and becomes Connected once its `Opened` update
    /// is applied.
    pub fn open<S: GameService>(
        id: SubscriptionId,
        service: Arc<S>,
        game_code: &str,
        player_name: &str,
        sender: UpdateSender,
    ) -> Self {
        info!(
            "Subscribing {} to updates for game {} as '{}'",
            id, game_code, player_name
        );
        let task = tokio::spawn(run_subscription(
            id,
            service,
            game_code.to_string(),
            player_name.to_string(),
            sender,
        ));

        Self {
            id,
            game_code: game_code.to_string(),
            state: SubscriptionState::Disconnected,
            task,
        }
    }

    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    pub fn state(&self) -> SubscriptionState {
        self.state
    }

    pub fn game_code(&self) -> &str {
        &self.game_code
    }

    pub fn mark_connected(&mut self) {
        if self.state == SubscriptionState::Disconnected {
            self.state = SubscriptionState::Connected;
        }
    }

    /// The stream failed or ended on its own. No reconnection is attempted.
    pub fn mark_closed(&mut self) {
        self.state = SubscriptionState::Closed;
    }

    pub fn close(&mut self) {
        if self.state != SubscriptionState::Closed {
            info!("Closing update subscription {}", self.id);
        }
        self.task.abort();
        self.state = SubscriptionState::Closed;
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn run_subscription<S: GameService>(
    id: SubscriptionId,
    service: Arc<S>,
    game_code: String,
    player_name: String,
    sender: UpdateSender,
) {
    match service.open_updates(&game_code, &player_name).await {
        Ok(stream) => {
            if sender.send(SubscriptionUpdate::Opened { id }).is_err() {
                return;
            }
            forward_events(id, stream, &sender).await;
        }
        Err(e) => {
            let _ = sender.send(SubscriptionUpdate::Failed {
                id,
                reason: e.to_string(),
            });
        }
    }
}

/// Decode the event stream and forward every event in delivery order.
pub async fn forward_events<St>(id: SubscriptionId, mut stream: St, sender: &UpdateSender)
where
    St: Stream<Item = Result<Bytes, ClientError>> + Unpin,
{
    let mut decoder = SseDecoder::new();

    while let Some(chunk) = stream.next().await {
        let bytes = match chunk {
            Ok(bytes) => bytes,
            Err(e) => {
                let _ = sender.send(SubscriptionUpdate::Failed {
                    id,
                    reason: e.to_string(),
                });
                return;
            }
        };

        for payload in decoder.feed(&bytes) {
            match decode_event(&payload) {
                Ok(Some(event)) => {
                    debug!("Subscription {} received {:?}", id, event);
                    if sender.send(SubscriptionUpdate::Event { id, event }).is_err() {
                        // Receiver is gone; nobody is listening any more
                        return;
                    }
                }
                Ok(None) => {}
                Err(e) => warn!("Skipping undecodable update on {}: {} ({})", id, e, payload),
            }
        }
    }

    let _ = sender.send(SubscriptionUpdate::Ended { id });
}

/// Decode one event payload. Empty and `null` payloads are keep-alives.
pub fn decode_event(payload: &str) -> Result<Option<PushEvent>, serde_json::Error> {
    let payload = payload.trim();
    if payload.is_empty() || payload == "null" {
        return Ok(None);
    }
    serde_json::from_str::<PushPayload>(payload).map(|decoded| Some(decoded.into()))
}
