pub mod controller;
pub mod game_handlers;
pub mod handler;

pub use controller::{
    AttachConnection, DifficultySelected, DragStart, DropOutcome, DropPiece, HoverSquare,
    LeaveSquare, ResetClicked, SnapEnd, ViewController,
};
pub use handler::ServerConnection;
