//! Page surface the client renders into.
//!
//! The element ids are a fixed contract with the page markup; a `Page`
//! implementation maps them onto whatever it draws with.

use chess::{Piece, Square};
use std::fmt;

use crate::game::utils::piece_letter;

pub mod board;
#[cfg(test)]
pub mod recording;
pub mod terminal;

pub use board::{BoardWidget, PieceCode};

/// Marker applied to squares a hovered piece can move to
pub const HIGHLIGHT_CLASS: &str = "highlight-legal";

pub const CAPTURED_ICON_SIZE: u32 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementId {
    Board,
    Status,
    WhiteClock,
    BlackClock,
    WhiteCaptured,
    BlackCaptured,
    Strategy,
    ResetButton,
    DifficultySelect,
}

impl ElementId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ElementId::Board => "board",
            ElementId::Status => "status",
            ElementId::WhiteClock => "white-clock",
            ElementId::BlackClock => "black-clock",
            ElementId::WhiteCaptured => "white-captured",
            ElementId::BlackCaptured => "black-captured",
            ElementId::Strategy => "strategy",
            ElementId::ResetButton => "reset-btn",
            ElementId::DifficultySelect => "difficulty-select",
        }
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Image element placed in a captured-pieces container
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PieceImage {
    pub src: String,
    pub alt: String,
    pub width: u32,
    pub height: u32,
}

impl PieceImage {
    /// Icon for `piece` in `container`. The white container shows black
    /// icons and the black container shows white ones.
    pub fn captured(theme: &str, container: ElementId, piece: Piece) -> Self {
        let prefix = if container == ElementId::WhiteCaptured { 'b' } else { 'w' };
        let letter = piece_letter(piece);
        let code = format!("{}{}", prefix, letter.to_ascii_uppercase());
        PieceImage {
            src: piece_url(theme, &code),
            alt: letter.to_string(),
            width: CAPTURED_ICON_SIZE,
            height: CAPTURED_ICON_SIZE,
        }
    }
}

/// URL of the image for a piece code such as `wP`
pub fn piece_url(theme: &str, code: &str) -> String {
    format!("{}{}.svg", theme, code)
}

/// What the view controller draws into.
pub trait Page {
    /// Replace the text content of an element.
    fn set_text(&mut self, id: ElementId, text: &str);

    /// Replace the children of a container with the given images.
    fn set_images(&mut self, id: ElementId, images: &[PieceImage]);

    fn add_square_class(&mut self, square: Square, class: &str);

    /// Remove `class` from every element carrying it.
    fn remove_class(&mut self, class: &str);

    fn render_board(&mut self, board: &BoardWidget);

    /// Blocking notification.
    fn alert(&mut self, message: &str);

    /// Ask the user for a line of text. `None` means cancelled.
    fn prompt(&mut self, message: &str, default: &str) -> Option<String>;
}
