use chess::Color;

use crate::game::utils::status_text;
use crate::game::{CapturedPieces, ClientGame};
use crate::models::{ClockUpdate, GameOverInfo};
use crate::view::BoardWidget;

/// Everything the view shows, owned by the view controller.
///
/// Server pushes overwrite it; local moves only touch it optimistically.
#[derive(Debug, Clone)]
pub struct ViewModel {
    pub game: ClientGame,
    pub board: BoardWidget,
    /// Whose turn the client believes it is
    pub current_player: Color,
    pub clocks: Option<ClockUpdate>,
    pub strategy: Option<String>,
    pub game_over: Option<GameOverInfo>,
}

impl Default for ViewModel {
    fn default() -> Self {
        ViewModel::new()
    }
}

impl ViewModel {
    pub fn new() -> Self {
        ViewModel {
            game: ClientGame::new(),
            board: BoardWidget::new(),
            current_player: Color::White,
            clocks: None,
            strategy: None,
            game_over: None,
        }
    }

    pub fn status(&self) -> String {
        status_text(&self.game)
    }

    pub fn captured(&self) -> CapturedPieces {
        CapturedPieces::from_history(self.game.history())
    }
}
