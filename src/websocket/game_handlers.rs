use chess::{Color, Piece, Square};
use log::{debug, error, info, warn};
use serde_json::Value;

use crate::error::ClientResult;
use crate::game::clock::format_time;
use crate::game::utils::{color_name, piece_from_letter, piece_letter, promotion_rank};
use crate::models::{ClientMessage, ClockUpdate, Difficulty, GameOverInfo, ServerEvent};
use crate::view::{ElementId, PieceImage, HIGHLIGHT_CLASS};
use crate::websocket::controller::{DropOutcome, ViewController};

pub const PROMOTION_PROMPT: &str =
    "Choose promotion piece: q (Queen), r (Rook), b (Bishop), n (Knight)";

const PROMOTION_CHOICES: [&str; 4] = ["q", "r", "b", "n"];

/// Text shown when the server ends the game
pub fn game_over_message(info: &GameOverInfo) -> String {
    if info.winner == "Draw" {
        return "Game over! It's a draw!".to_string();
    }
    let mut message = format!("Game over! {} wins!", info.winner);
    if info.ai_surrender {
        message.push_str(" The AI has no legal moves left and surrenders.");
    }
    message
}

fn promotion_choice(answer: Option<String>) -> Option<Piece> {
    let answer = answer?;
    if !PROMOTION_CHOICES.contains(&answer.as_str()) {
        return None;
    }
    answer.chars().next().and_then(piece_from_letter)
}

impl ViewController {
    /// Whether the piece on `square` may be lifted
    pub fn on_drag_start(&self, square: Square) -> bool {
        let Some(code) = self.model.board.piece_on(square) else {
            return false;
        };
        if !self.model.board.draggable || self.model.game.is_game_over() {
            return false;
        }
        if code.color != self.model.current_player {
            return false;
        }
        // The client only ever plays white
        self.model.current_player != Color::Black
    }

    /// Validate a drop locally and build the move for the server
    pub fn on_drop(&mut self, source: Square, target: Square) -> (DropOutcome, Option<ClientMessage>) {
        let previous = self.model.board.move_piece(source, target);

        let promotion = match self.model.game.piece_at(source) {
            Some((color, Piece::Pawn)) if target.get_rank() == promotion_rank(color) => {
                let answer = self.page.prompt(PROMOTION_PROMPT, "q");
                match promotion_choice(answer) {
                    Some(piece) => piece,
                    None => {
                        debug!("Promotion from {} to {} cancelled", source, target);
                        self.model.board.snapback(previous);
                        return (DropOutcome::Snapback, None);
                    }
                }
            }
            _ => Piece::Queen,
        };

        let Some(entry) = self.model.game.play(source, target, promotion) else {
            self.model.board.snapback(previous);
            return (DropOutcome::Snapback, None);
        };

        let mut text = format!("{}{}", source, target);
        if self.config.uci_promotion {
            if let Some(piece) = entry.chess_move.get_promotion() {
                text.push(piece_letter(piece));
            }
        }
        info!("Playing {} ({})", entry.san, text);

        self.update_status();
        self.update_captured_pieces();
        (DropOutcome::Accepted, Some(ClientMessage::chess_move(text)))
    }

    /// Redraw the widget from the mirrored position after a drop
    pub fn on_snap_end(&mut self) {
        let position = self.model.game.position();
        self.model.board.set_position(&position);
        self.page.render_board(&self.model.board);
    }

    pub fn on_mouseover_square(&mut self, square: Square) {
        self.page.remove_class(HIGHLIGHT_CLASS);
        let targets = self.model.game.legal_targets(square);
        debug!("Highlighting {} legal moves from {}", targets.len(), square);
        for target in targets {
            self.page.add_square_class(target, HIGHLIGHT_CLASS);
        }
    }

    pub fn on_mouseout_square(&mut self) {
        self.page.remove_class(HIGHLIGHT_CLASS);
    }

    /// Reset waits for the server to push a fresh board
    pub fn on_reset_clicked(&self) -> ClientMessage {
        info!("Requesting game reset");
        ClientMessage::ResetGame
    }

    pub fn update_status(&mut self) {
        let status = self.model.status();
        self.page.set_text(ElementId::Status, &status);
    }

    pub fn update_captured_pieces(&mut self) {
        let captured = self.model.captured();
        let theme = &self.config.piece_theme;
        for (container, pieces) in [
            (ElementId::WhiteCaptured, &captured.white),
            (ElementId::BlackCaptured, &captured.black),
        ] {
            let images: Vec<PieceImage> = pieces
                .iter()
                .map(|&piece| PieceImage::captured(theme, container, piece))
                .collect();
            self.page.set_images(container, &images);
        }
    }

    pub fn on_server_event(&mut self, event: ServerEvent) {
        match event {
            ServerEvent::UpdateBoard(fen) => self.on_update_board(&fen),
            ServerEvent::UpdateClock(clock) => self.on_update_clock(clock),
            ServerEvent::StrategySuggestion(text) => {
                self.page.set_text(ElementId::Strategy, &text);
                self.model.strategy = Some(text);
            }
            ServerEvent::GameOver(info) => self.on_game_over(info),
        }
    }

    fn on_update_board(&mut self, fen: &str) {
        match self.model.game.load_fen(fen) {
            Ok(sync) => debug!("Board update applied: {:?}", sync),
            Err(e) => {
                warn!("Ignoring board update: {}", e);
                return;
            }
        }

        let position = self.model.game.position();
        self.model.board.set_position(&position);
        self.page.render_board(&self.model.board);
        self.update_status();
        self.update_captured_pieces();
        self.model.current_player = self.model.game.turn();

        if !self.model.board.draggable && !self.model.game.is_game_over() {
            info!("Fresh position received, dragging enabled again");
            self.model.board.draggable = true;
            self.model.game_over = None;
        }
        debug!("Now tracking {} to move", color_name(self.model.current_player));
    }

    fn on_update_clock(&mut self, clock: ClockUpdate) {
        self.page.set_text(ElementId::WhiteClock, &format_time(clock.white));
        self.page.set_text(ElementId::BlackClock, &format_time(clock.black));
        self.model.clocks = Some(clock);
    }

    fn on_game_over(&mut self, info: GameOverInfo) {
        if !self.model.board.draggable && self.model.game_over.as_ref() == Some(&info) {
            debug!("Repeated game over for {}", info.winner);
            return;
        }
        let message = game_over_message(&info);
        info!("{}", message);
        self.page.alert(&message);
        self.model.board.draggable = false;
        self.model.game_over = Some(info);
    }

    pub fn on_difficulty_result(&mut self, difficulty: Difficulty, result: ClientResult<Value>) {
        match result {
            Ok(data) => {
                info!("Difficulty set: {}", data);
                self.page.alert(&format!("AI difficulty set to {}", difficulty));
            }
            Err(e) => {
                error!("Error setting difficulty: {}", e);
                self.page.alert(&format!("Failed to set AI difficulty: {}", e));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::error::ClientError;
    use crate::view::recording::RecordingPage;

    const FOOLS_MATE: &str = "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3";
    const BLACK_MATED: &str = "rnbqkbnr/ppppp2p/5p2/6pQ/4P3/2N5/PPPP1PPP/R1B1KBNR b KQkq - 1 3";
    const PROMOTION: &str = "8/4P3/8/8/8/8/k7/4K3 w - - 0 1";
    const BLACK_PROMOTION: &str = "4k3/8/8/8/8/8/p7/4K3 b - - 0 1";
    const FIFTY_MOVES: &str = "4k3/8/8/8/8/8/R7/4K3 w - - 100 80";

    fn controller() -> (ViewController, RecordingPage) {
        controller_with(Config::default())
    }

    fn controller_with(config: Config) -> (ViewController, RecordingPage) {
        let page = RecordingPage::default();
        (ViewController::new(Box::new(page.clone()), config), page)
    }

    fn push(controller: &mut ViewController, fen: &str) {
        controller.on_server_event(ServerEvent::UpdateBoard(fen.to_string()));
    }

    #[test]
    fn drag_start_follows_turn_ownership() {
        let (mut controller, _) = controller();
        assert!(controller.on_drag_start(Square::E2));
        assert!(!controller.on_drag_start(Square::E7));
        assert!(!controller.on_drag_start(Square::E4));

        push(&mut controller, "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1");
        assert_eq!(controller.model().current_player, Color::Black);
        assert!(!controller.on_drag_start(Square::E7));
        assert!(!controller.on_drag_start(Square::D2));
    }

    #[test]
    fn drag_start_rejected_when_game_over() {
        let (mut controller, _) = controller();
        push(&mut controller, FOOLS_MATE);
        assert!(!controller.on_drag_start(Square::E2));
    }

    #[test]
    fn legal_drop_emits_square_pair_and_updates_status() {
        let (mut controller, page) = controller();
        let (outcome, msg) = controller.on_drop(Square::E2, Square::E4);
        assert_eq!(outcome, DropOutcome::Accepted);
        assert_eq!(msg, Some(ClientMessage::chess_move("e2e4")));
        assert_eq!(page.log.borrow().text(ElementId::Status), Some("Black to move"));
    }

    #[test]
    fn illegal_drop_snaps_back_without_message() {
        let (mut controller, _) = controller();
        let (outcome, msg) = controller.on_drop(Square::E2, Square::E5);
        assert_eq!(outcome, DropOutcome::Snapback);
        assert_eq!(msg, None);
        assert!(controller.model().board.piece_on(Square::E2).is_some());
        assert!(controller.model().board.piece_on(Square::E5).is_none());
        assert!(controller.model().game.history().is_empty());
    }

    #[test]
    fn promotion_prompts_and_accepts_knight() {
        let (mut controller, page) = controller();
        push(&mut controller, PROMOTION);
        page.answer(Some("n"));

        let (outcome, msg) = controller.on_drop(Square::E7, Square::E8);
        assert_eq!(outcome, DropOutcome::Accepted);
        assert_eq!(msg, Some(ClientMessage::chess_move("e7e8")));
        assert_eq!(page.log.borrow().prompts, vec![PROMOTION_PROMPT.to_string()]);

        controller.on_snap_end();
        let code = controller.model().board.piece_on(Square::E8).unwrap();
        assert_eq!(code.to_string(), "wN");
    }

    #[test]
    fn invalid_or_cancelled_promotion_snaps_back() {
        for answer in [Some("k"), Some("Q"), Some(""), None] {
            let (mut controller, page) = controller();
            push(&mut controller, PROMOTION);
            page.answer(answer);

            let (outcome, msg) = controller.on_drop(Square::E7, Square::E8);
            assert_eq!(outcome, DropOutcome::Snapback, "answer {:?}", answer);
            assert_eq!(msg, None);
            assert!(controller.model().board.piece_on(Square::E7).is_some());
        }
    }

    #[test]
    fn black_pawn_reaching_first_rank_prompts() {
        let (mut controller, page) = controller();
        push(&mut controller, BLACK_PROMOTION);
        page.answer(Some("x"));

        let (outcome, msg) = controller.on_drop(Square::A2, Square::A1);
        assert_eq!(outcome, DropOutcome::Snapback);
        assert_eq!(msg, None);
        assert_eq!(page.log.borrow().prompts, vec![PROMOTION_PROMPT.to_string()]);
        assert!(controller.model().board.piece_on(Square::A2).is_some());

        page.answer(Some("q"));
        let (outcome, msg) = controller.on_drop(Square::A2, Square::A1);
        assert_eq!(outcome, DropOutcome::Accepted);
        assert_eq!(msg, Some(ClientMessage::chess_move("a2a1")));
        assert_eq!(page.log.borrow().prompts.len(), 2);
    }

    #[test]
    fn uci_promotion_appends_piece_letter() {
        let config = Config { uci_promotion: true, ..Config::default() };
        let (mut controller, page) = controller_with(config);
        push(&mut controller, PROMOTION);
        page.answer(Some("r"));
        let (_, msg) = controller.on_drop(Square::E7, Square::E8);
        assert_eq!(msg, Some(ClientMessage::chess_move("e7e8r")));

        let (_, msg) = controller_with(Config { uci_promotion: true, ..Config::default() })
            .0
            .on_drop(Square::G1, Square::F3);
        assert_eq!(msg, Some(ClientMessage::chess_move("g1f3")));
    }

    #[test]
    fn checkmate_push_sets_status() {
        let (mut controller, page) = controller();
        push(&mut controller, BLACK_MATED);
        assert_eq!(
            page.log.borrow().text(ElementId::Status),
            Some("Game over, White wins by checkmate")
        );
    }

    #[test]
    fn fifty_move_push_is_a_draw() {
        let (mut controller, page) = controller();
        push(&mut controller, FIFTY_MOVES);
        assert_eq!(page.log.borrow().text(ElementId::Status), Some("Game over, drawn position"));
        assert!(!controller.on_drag_start(Square::A2));
    }

    #[test]
    fn check_is_appended_to_turn() {
        let (mut controller, page) = controller();
        push(&mut controller, "rnbqkbnr/ppppp1pp/8/5p1Q/4P3/8/PPPP1PPP/RNB1KBNR b KQkq - 1 2");
        assert_eq!(
            page.log.borrow().text(ElementId::Status),
            Some("Black to move, Black is in check")
        );
    }

    #[test]
    fn clock_update_is_formatted() {
        let (mut controller, page) = controller();
        controller.on_server_event(ServerEvent::UpdateClock(ClockUpdate { white: 125, black: 59 }));
        let log = page.log.borrow();
        assert_eq!(log.text(ElementId::WhiteClock), Some("2:05"));
        assert_eq!(log.text(ElementId::BlackClock), Some("0:59"));
    }

    #[test]
    fn negative_clock_shows_zero() {
        let (mut controller, page) = controller();
        controller.on_server_event(ServerEvent::UpdateClock(ClockUpdate { white: -3, black: 600 }));
        let log = page.log.borrow();
        assert_eq!(log.text(ElementId::WhiteClock), Some("0:00"));
        assert_eq!(log.text(ElementId::BlackClock), Some("10:00"));
    }

    #[test]
    fn strategy_is_written_verbatim() {
        let (mut controller, page) = controller();
        controller.on_server_event(ServerEvent::StrategySuggestion("Castle your king to safety".into()));
        assert_eq!(page.log.borrow().text(ElementId::Strategy), Some("Castle your king to safety"));
    }

    #[test]
    fn draw_disables_dragging() {
        let (mut controller, page) = controller();
        controller.on_server_event(ServerEvent::GameOver(GameOverInfo {
            winner: "Draw".to_string(),
            ai_surrender: true,
        }));
        assert_eq!(page.log.borrow().alerts, vec!["Game over! It's a draw!".to_string()]);
        assert!(!controller.model().board.draggable);
        assert!(!controller.on_drag_start(Square::E2));
    }

    #[test]
    fn win_with_surrender_note_is_alerted_once() {
        let (mut controller, page) = controller();
        let info = GameOverInfo { winner: "White".to_string(), ai_surrender: true };
        controller.on_server_event(ServerEvent::GameOver(info.clone()));
        controller.on_server_event(ServerEvent::GameOver(info));
        assert_eq!(
            page.log.borrow().alerts,
            vec!["Game over! White wins! The AI has no legal moves left and surrenders.".to_string()]
        );
    }

    #[test]
    fn fresh_board_after_game_over_enables_dragging() {
        let (mut controller, _) = controller();
        controller.on_server_event(ServerEvent::GameOver(GameOverInfo {
            winner: "Black".to_string(),
            ai_surrender: false,
        }));
        push(&mut controller, "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1");
        assert!(controller.model().board.draggable);
        assert!(controller.on_drag_start(Square::E2));
    }

    #[test]
    fn captures_render_with_opponent_icons() {
        let (mut controller, page) = controller();
        controller.on_drop(Square::E2, Square::E4);
        push(&mut controller, "rnbqkbnr/ppp1pppp/8/3p4/4P3/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 2");
        controller.on_drop(Square::E4, Square::D5);

        let log = page.log.borrow();
        let black = &log.images[&ElementId::BlackCaptured];
        assert_eq!(black.len(), 1);
        assert_eq!(black[0].src, "/static/img/chesspieces/wikipedia/wP.svg");
        assert!(log.images[&ElementId::WhiteCaptured].is_empty());
    }

    #[test]
    fn hover_highlights_legal_targets() {
        let (mut controller, page) = controller();
        controller.on_mouseover_square(Square::E2);
        assert_eq!(
            page.log.borrow().highlighted.iter().copied().collect::<Vec<_>>(),
            vec![Square::E3, Square::E4]
        );
        controller.on_mouseover_square(Square::E7);
        assert!(page.log.borrow().highlighted.is_empty());
        controller.on_mouseover_square(Square::B1);
        controller.on_mouseout_square();
        assert!(page.log.borrow().highlighted.is_empty());
    }

    #[test]
    fn reset_changes_nothing_locally() {
        let (mut controller, _) = controller();
        controller.on_drop(Square::E2, Square::E4);
        assert_eq!(controller.on_reset_clicked(), ClientMessage::ResetGame);
        assert_eq!(controller.model().game.history().len(), 1);
    }

    #[test]
    fn invalid_board_push_is_ignored() {
        let (mut controller, page) = controller();
        push(&mut controller, "garbage");
        assert_eq!(controller.model().game.fen(), chess::Board::default().to_string());
        assert_eq!(page.log.borrow().board_renders, 0);
    }

    #[test]
    fn difficulty_outcomes_are_alerted() {
        let (mut controller, page) = controller();
        controller.on_difficulty_result(Difficulty::Hard, Ok(serde_json::json!({"status": "success"})));
        controller.on_difficulty_result(
            Difficulty::Easy,
            Err(ClientError::Http("connection refused".to_string())),
        );
        assert_eq!(
            page.log.borrow().alerts,
            vec![
                "AI difficulty set to hard".to_string(),
                "Failed to set AI difficulty: HTTP request failed: connection refused".to_string(),
            ]
        );
    }

    #[test]
    fn promotion_choice_accepts_exact_letters_only() {
        assert_eq!(promotion_choice(Some("b".to_string())), Some(Piece::Bishop));
        assert_eq!(promotion_choice(Some(" q".to_string())), None);
        assert_eq!(promotion_choice(None), None);
    }
}
