use chess::Piece;
use std::cmp::Reverse;

use crate::game::san::HistoryEntry;

/// Material value used to order captured pieces
pub fn piece_value(piece: Piece) -> u8 {
    match piece {
        Piece::Pawn => 1,
        Piece::Knight => 3,
        Piece::Bishop => 3,
        Piece::Rook => 5,
        Piece::Queen => 9,
        Piece::King => 0,
    }
}

/// Pieces taken so far, keyed by the container they are shown in.
///
/// Moves at even history indexes fill `black`, odd ones fill `white`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapturedPieces {
    pub white: Vec<Piece>,
    pub black: Vec<Piece>,
}

impl CapturedPieces {
    /// Recompute the tally from the full move history
    pub fn from_history(history: &[HistoryEntry]) -> Self {
        let mut tally = CapturedPieces::default();
        for (index, entry) in history.iter().enumerate() {
            let Some(piece) = entry.captured else {
                continue;
            };
            if index % 2 == 0 {
                tally.black.push(piece);
            } else {
                tally.white.push(piece);
            }
        }
        sort_by_value(&mut tally.white);
        sort_by_value(&mut tally.black);
        tally
    }
}

fn sort_by_value(pieces: &mut [Piece]) {
    pieces.sort_by_key(|&piece| Reverse(piece_value(piece)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::mirror::ClientGame;
    use chess::Square;

    #[test]
    fn no_captures_in_opening() {
        let mut game = ClientGame::new();
        game.play(Square::E2, Square::E4, Piece::Queen).unwrap();
        game.play(Square::E7, Square::E5, Piece::Queen).unwrap();
        assert_eq!(CapturedPieces::from_history(game.history()), CapturedPieces::default());
    }

    #[test]
    fn attributes_by_history_parity_and_sorts_descending() {
        let mut game = ClientGame::new();
        let moves = [
            (Square::E2, Square::E4),
            (Square::D7, Square::D5),
            (Square::E4, Square::D5), // white takes a pawn
            (Square::D8, Square::D5), // black takes a pawn
            (Square::B1, Square::C3),
            (Square::D5, Square::A2), // black takes a pawn
            (Square::C3, Square::B5),
            (Square::A2, Square::A1), // black takes a rook
        ];
        for (from, to) in moves {
            game.play(from, to, Piece::Queen).unwrap();
        }

        let tally = CapturedPieces::from_history(game.history());
        assert_eq!(tally.black, vec![Piece::Pawn]);
        assert_eq!(tally.white, vec![Piece::Rook, Piece::Pawn, Piece::Pawn]);
    }

    #[test]
    fn equal_values_keep_history_order() {
        let mut pieces = vec![Piece::Pawn, Piece::Bishop, Piece::Queen, Piece::Knight];
        sort_by_value(&mut pieces);
        assert_eq!(pieces, vec![Piece::Queen, Piece::Bishop, Piece::Knight, Piece::Pawn]);
    }
}
