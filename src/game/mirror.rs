//! Client-side mirror of the server's game.
//!
//! The server is authoritative: every pushed position overwrites the mirror.
//! History survives a push only when the pushed position is the current one
//! or follows from it by a single legal move.

use chess::{Board, BoardStatus, ChessMove, Color, Game, MoveGen, Piece, Square, EMPTY};
use log::{debug, info};
use std::str::FromStr;

use crate::error::{ClientError, ClientResult};
use crate::game::san::HistoryEntry;
use crate::game::utils::{has_insufficient_material, promotion_rank};

/// How a pushed position related to the mirror before it was applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PositionSync {
    Unchanged,
    Advanced(HistoryEntry),
    Replaced,
}

/// Plies without a pawn move or capture after which the game is drawn
pub const FIFTY_MOVE_PLIES: u32 = 100;

#[derive(Debug, Clone)]
pub struct ClientGame {
    game: Game,
    history: Vec<HistoryEntry>,
    halfmove_clock: u32,
}

impl Default for ClientGame {
    fn default() -> Self {
        ClientGame::new()
    }
}

impl ClientGame {
    pub fn new() -> Self {
        ClientGame {
            game: Game::new(),
            history: Vec::new(),
            halfmove_clock: 0,
        }
    }

    pub fn from_fen(fen: &str) -> ClientResult<Self> {
        Ok(ClientGame {
            game: Game::new_with_board(parse_fen(fen)?),
            history: Vec::new(),
            halfmove_clock: parse_halfmove_clock(fen).unwrap_or(0),
        })
    }

    pub fn position(&self) -> Board {
        self.game.current_position()
    }

    pub fn turn(&self) -> Color {
        self.game.side_to_move()
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    pub fn fen(&self) -> String {
        self.position().to_string()
    }

    /// Piece and color standing on `square`
    pub fn piece_at(&self, square: Square) -> Option<(Color, Piece)> {
        let board = self.position();
        Some((board.color_on(square)?, board.piece_on(square)?))
    }

    /// Attempt a move. `promotion` is only used when a pawn reaches its last
    /// rank. Returns `None` when the rules reject the move.
    pub fn play(&mut self, from: Square, to: Square, promotion: Piece) -> Option<HistoryEntry> {
        let board = self.position();
        let promotes = board.piece_on(from) == Some(Piece::Pawn)
            && to.get_rank() == promotion_rank(board.side_to_move());
        let chess_move = ChessMove::new(from, to, promotes.then_some(promotion));

        if !board.legal(chess_move) || !self.game.make_move(chess_move) {
            debug!("Rejected move {}", chess_move);
            return None;
        }

        let entry = HistoryEntry::record(&board, chess_move);
        self.advance_halfmove_clock(&board, &entry);
        self.history.push(entry.clone());
        Some(entry)
    }

    /// Distinct destination squares reachable from `from` by the side to move
    pub fn legal_targets(&self, from: Square) -> Vec<Square> {
        let mut targets: Vec<Square> = MoveGen::new_legal(&self.position())
            .filter(|m| m.get_source() == from)
            .map(|m| m.get_dest())
            .collect();
        targets.sort();
        targets.dedup();
        targets
    }

    /// Overwrite the mirror with a server-pushed position
    pub fn load_fen(&mut self, fen: &str) -> ClientResult<PositionSync> {
        let pushed = parse_fen(fen)?;
        let pushed_clock = parse_halfmove_clock(fen);
        let current = self.position();

        if pushed.get_hash() == current.get_hash() {
            if let Some(clock) = pushed_clock {
                self.halfmove_clock = clock;
            }
            return Ok(PositionSync::Unchanged);
        }

        let bridge = MoveGen::new_legal(&current)
            .find(|m| current.make_move_new(*m).get_hash() == pushed.get_hash());
        if let Some(chess_move) = bridge {
            let entry = HistoryEntry::record(&current, chess_move);
            if self.game.make_move(chess_move) {
                self.advance_halfmove_clock(&current, &entry);
                if let Some(clock) = pushed_clock {
                    self.halfmove_clock = clock;
                }
                self.history.push(entry.clone());
                return Ok(PositionSync::Advanced(entry));
            }
        }

        info!("Replacing mirrored game with pushed position {}", fen);
        self.game = Game::new_with_board(pushed);
        self.history.clear();
        self.halfmove_clock = pushed_clock.unwrap_or(0);
        Ok(PositionSync::Replaced)
    }

    fn advance_halfmove_clock(&mut self, before: &Board, entry: &HistoryEntry) {
        let pawn_move = before.piece_on(entry.chess_move.get_source()) == Some(Piece::Pawn);
        if pawn_move || entry.captured.is_some() {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock += 1;
        }
    }

    pub fn in_check(&self) -> bool {
        *self.position().checkers() != EMPTY
    }

    pub fn in_checkmate(&self) -> bool {
        self.position().status() == BoardStatus::Checkmate
    }

    pub fn in_draw(&self) -> bool {
        let board = self.position();
        board.status() == BoardStatus::Stalemate
            || has_insufficient_material(&board)
            || self.halfmove_clock >= FIFTY_MOVE_PLIES
            || self.game.can_declare_draw()
    }

    pub fn is_game_over(&self) -> bool {
        self.in_checkmate() || self.in_draw()
    }
}

/// Fifth FEN field, when present and numeric
fn parse_halfmove_clock(fen: &str) -> Option<u32> {
    fen.split_whitespace().nth(4).and_then(|field| field.parse().ok())
}

fn parse_fen(fen: &str) -> ClientResult<Board> {
    Board::from_str(fen.trim()).map_err(|e| ClientError::InvalidFen {
        fen: fen.to_string(),
        reason: format!("{:?}", e),
    })
}
