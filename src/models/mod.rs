pub mod difficulty;
pub mod messages;
pub mod view_state;

// Re-export important types
pub use difficulty::*;
pub use messages::*;
pub use view_state::*;
