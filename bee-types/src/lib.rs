pub mod events;
pub mod game;
pub mod messages;

// Re-export all types
pub use events::*;
pub use game::*;
pub use messages::*;
