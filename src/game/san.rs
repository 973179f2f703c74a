use chess::{Board, BoardStatus, ChessMove, Color, MoveGen, Piece, EMPTY};

use crate::game::utils::piece_letter;

/// One played move as recorded in the client history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub chess_move: ChessMove,
    pub mover: Color,
    pub san: String,
    pub captured: Option<Piece>,
}

impl HistoryEntry {
    /// Record `chess_move` as played on `board`. The move must be legal there.
    pub fn record(board: &Board, chess_move: ChessMove) -> Self {
        HistoryEntry {
            chess_move,
            mover: board.side_to_move(),
            san: format_san(board, chess_move),
            captured: captured_piece(board, chess_move),
        }
    }
}

/// Piece removed from the board by `chess_move`, including en passant victims
pub fn captured_piece(board: &Board, chess_move: ChessMove) -> Option<Piece> {
    let source = chess_move.get_source();
    let dest = chess_move.get_dest();
    match board.piece_on(dest) {
        Some(piece) if board.color_on(dest) != Some(board.side_to_move()) => Some(piece),
        Some(_) => None,
        None => {
            let diagonal_pawn = board.piece_on(source) == Some(Piece::Pawn)
                && source.get_file() != dest.get_file();
            diagonal_pawn.then_some(Piece::Pawn)
        }
    }
}

fn is_castle(board: &Board, chess_move: ChessMove) -> bool {
    let source = chess_move.get_source();
    let dest = chess_move.get_dest();
    board.piece_on(source) == Some(Piece::King)
        && source.get_file().to_index().abs_diff(dest.get_file().to_index()) == 2
}

fn disambiguation(board: &Board, chess_move: ChessMove, piece: Piece) -> String {
    let source = chess_move.get_source();
    let rivals: Vec<_> = MoveGen::new_legal(board)
        .filter(|m| {
            m.get_dest() == chess_move.get_dest()
                && m.get_source() != source
                && board.piece_on(m.get_source()) == Some(piece)
        })
        .map(|m| m.get_source())
        .collect();

    if rivals.is_empty() {
        return String::new();
    }

    let square = source.to_string();
    let (file, rank) = square.split_at(1);
    if rivals.iter().all(|s| s.get_file() != source.get_file()) {
        file.to_string()
    } else if rivals.iter().all(|s| s.get_rank() != source.get_rank()) {
        rank.to_string()
    } else {
        square
    }
}

/// Format a legal move in standard algebraic notation
pub fn format_san(board: &Board, chess_move: ChessMove) -> String {
    let source = chess_move.get_source();
    let dest = chess_move.get_dest();
    let piece = board.piece_on(source).unwrap_or(Piece::Pawn);

    let mut san = if is_castle(board, chess_move) {
        if dest.get_file().to_index() > source.get_file().to_index() {
            "O-O".to_string()
        } else {
            "O-O-O".to_string()
        }
    } else {
        let capture = captured_piece(board, chess_move).is_some();
        let mut text = String::new();
        if piece == Piece::Pawn {
            if capture {
                text.push_str(&source.to_string()[..1]);
            }
        } else {
            text.push(piece_letter(piece).to_ascii_uppercase());
            text.push_str(&disambiguation(board, chess_move, piece));
        }
        if capture {
            text.push('x');
        }
        text.push_str(&dest.to_string());
        if let Some(promotion) = chess_move.get_promotion() {
            text.push('=');
            text.push(piece_letter(promotion).to_ascii_uppercase());
        }
        text
    };

    let next = board.make_move_new(chess_move);
    if next.status() == BoardStatus::Checkmate {
        san.push('#');
    } else if *next.checkers() != EMPTY {
        san.push('+');
    }
    san
}
