pub mod entry;
pub mod errors;
pub mod letters;
pub mod players;
pub mod rank;
pub mod session;

// Re-export main components
pub use entry::*;
pub use errors::*;
pub use letters::*;
pub use players::*;
pub use rank::*;
pub use session::*;
