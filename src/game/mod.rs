pub mod captured;
pub mod clock;
pub mod mirror;
pub mod san;
pub mod utils;

pub use captured::CapturedPieces;
pub use mirror::{ClientGame, PositionSync};
pub use san::HistoryEntry;
