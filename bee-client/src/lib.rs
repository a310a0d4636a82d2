pub mod api;
pub mod config;
pub mod controller;
pub mod error;
pub mod logging;
pub mod subscription;
pub mod tui;

pub use api::{GameService, HttpGameService, UpdateStream};
pub use config::{Config, ConfigError};
pub use controller::{
    Call, GameSummary, Outcome, ReplyReceiver, ServiceReply, SessionController, WordAccepted,
};
pub use error::ClientError;
pub use subscription::{SubscriptionId, SubscriptionState, SubscriptionUpdate};
