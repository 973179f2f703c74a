use chess::{BitBoard, Board, Color, Piece, Rank, Square, ALL_SQUARES};
use std::str::FromStr;

use crate::error::{ClientError, ClientResult};
use crate::game::mirror::ClientGame;

/// Capitalized color name as shown in status lines
pub fn color_name(color: Color) -> &'static str {
    match color {
        Color::White => "White",
        Color::Black => "Black",
    }
}

/// Single-letter prefix used in piece codes (`wP`, `bQ`)
pub fn color_prefix(color: Color) -> char {
    match color {
        Color::White => 'w',
        Color::Black => 'b',
    }
}

/// Lowercase piece letter (`p`, `n`, `b`, `r`, `q`, `k`)
pub fn piece_letter(piece: Piece) -> char {
    match piece {
        Piece::Pawn => 'p',
        Piece::Knight => 'n',
        Piece::Bishop => 'b',
        Piece::Rook => 'r',
        Piece::Queen => 'q',
        Piece::King => 'k',
    }
}

pub fn piece_from_letter(letter: char) -> Option<Piece> {
    match letter.to_ascii_lowercase() {
        'p' => Some(Piece::Pawn),
        'n' => Some(Piece::Knight),
        'b' => Some(Piece::Bishop),
        'r' => Some(Piece::Rook),
        'q' => Some(Piece::Queen),
        'k' => Some(Piece::King),
        _ => None,
    }
}

/// Parse an algebraic square such as `e4`
pub fn parse_square(text: &str) -> ClientResult<Square> {
    Square::from_str(&text.trim().to_lowercase())
        .map_err(|_| ClientError::InvalidSquare(text.to_string()))
}

/// Rank a pawn of `color` promotes on
pub fn promotion_rank(color: Color) -> Rank {
    match color {
        Color::White => Rank::Eighth,
        Color::Black => Rank::First,
    }
}

/// Human-readable status line for the mirrored game
pub fn status_text(game: &ClientGame) -> String {
    if game.in_checkmate() {
        match game.turn() {
            Color::White => "Game over, Black wins by checkmate".to_string(),
            Color::Black => "Game over, White wins by checkmate".to_string(),
        }
    } else if game.in_draw() {
        "Game over, drawn position".to_string()
    } else {
        let mover = color_name(game.turn());
        let mut status = format!("{} to move", mover);
        if game.in_check() {
            status.push_str(&format!(", {} is in check", mover));
        }
        status
    }
}

fn count(board: &Board, color: Color, piece: Piece) -> u32 {
    (board.pieces(piece) & board.color_combined(color)).popcnt()
}

fn is_light_square(square: Square) -> bool {
    (square.get_rank().to_index() + square.get_file().to_index()) % 2 == 1
}

/// Check if the board has insufficient material for checkmate
pub fn has_insufficient_material(board: &Board) -> bool {
    let heavy = [Piece::Pawn, Piece::Rook, Piece::Queen];
    for color in [Color::White, Color::Black] {
        if heavy.iter().any(|&piece| count(board, color, piece) > 0) {
            return false;
        }
    }

    let knights = count(board, Color::White, Piece::Knight) + count(board, Color::Black, Piece::Knight);
    let bishops: BitBoard = *board.pieces(Piece::Bishop);
    let minors = knights + bishops.popcnt();

    // King vs king, or a single minor piece
    if minors <= 1 {
        return true;
    }

    // Only bishops left, all on squares of one color
    if knights == 0 {
        let mut light = false;
        let mut dark = false;
        for square in ALL_SQUARES.iter().copied() {
            if board.piece_on(square) == Some(Piece::Bishop) {
                if is_light_square(square) {
                    light = true;
                } else {
                    dark = true;
                }
            }
        }
        return !(light && dark);
    }

    false
}
