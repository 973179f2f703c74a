use chess::{Board, Color, Piece, Square, ALL_SQUARES};
use std::collections::HashMap;
use std::fmt;

use crate::game::utils::{color_prefix, piece_letter};

/// Widget-level piece identifier such as `wP` or `bK`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceCode {
    pub color: Color,
    pub piece: Piece,
}

impl fmt::Display for PieceCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", color_prefix(self.color), piece_letter(self.piece).to_ascii_uppercase())
    }
}

pub type Placement = HashMap<Square, PieceCode>;

/// Visual board state: what is drawn where, and whether pieces can be dragged.
#[derive(Debug, Clone)]
pub struct BoardWidget {
    placement: Placement,
    pub draggable: bool,
}

impl Default for BoardWidget {
    fn default() -> Self {
        BoardWidget::new()
    }
}

impl BoardWidget {
    /// Draggable widget showing the start position
    pub fn new() -> Self {
        let mut widget = BoardWidget {
            placement: HashMap::new(),
            draggable: true,
        };
        widget.set_position(&Board::default());
        widget
    }

    pub fn set_position(&mut self, board: &Board) {
        self.placement = ALL_SQUARES
            .iter()
            .filter_map(|&square| {
                let piece = board.piece_on(square)?;
                let color = board.color_on(square)?;
                Some((square, PieceCode { color, piece }))
            })
            .collect();
    }

    pub fn piece_on(&self, square: Square) -> Option<PieceCode> {
        self.placement.get(&square).copied()
    }

    /// Move the drawn piece and hand back the placement from before the move
    pub fn move_piece(&mut self, from: Square, to: Square) -> Placement {
        let previous = self.placement.clone();
        if let Some(code) = self.placement.remove(&from) {
            self.placement.insert(to, code);
        }
        previous
    }

    /// Put every piece back where it was before a rejected drop
    pub fn snapback(&mut self, previous: Placement) {
        self.placement = previous;
    }
}
