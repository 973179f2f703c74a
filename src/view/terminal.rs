use chess::{Color, File, Rank, Square};
use log::{debug, info};
use std::collections::{BTreeSet, VecDeque};
use std::str::FromStr;
use std::sync::{Arc, Mutex};

use super::{BoardWidget, ElementId, Page, PieceImage};
use crate::game::utils::{parse_square, piece_letter};

/// Answers queued by the input loop for upcoming prompts
pub type PromptAnswers = Arc<Mutex<VecDeque<String>>>;

/// A `Page` that prints to stdout.
pub struct TerminalPage {
    answers: PromptAnswers,
    highlighted: BTreeSet<Square>,
}

impl TerminalPage {
    pub fn new(answers: PromptAnswers) -> Self {
        TerminalPage {
            answers,
            highlighted: BTreeSet::new(),
        }
    }
}

fn glyph(board: &BoardWidget, square: Square) -> char {
    match board.piece_on(square) {
        Some(code) => {
            let letter = piece_letter(code.piece);
            if code.color == Color::White {
                letter.to_ascii_uppercase()
            } else {
                letter
            }
        }
        None => '.',
    }
}

/// Text drawing of the board, white at the bottom
pub fn draw_board(board: &BoardWidget, highlighted: &BTreeSet<Square>) -> String {
    let mut out = String::new();
    for rank in (0..8).rev() {
        out.push_str(&format!("{} ", rank + 1));
        for file in 0..8 {
            let square = Square::make_square(Rank::from_index(rank), File::from_index(file));
            out.push(glyph(board, square));
            out.push(if highlighted.contains(&square) { '*' } else { ' ' });
        }
        out.push('\n');
    }
    out.push_str("  a b c d e f g h");
    out
}

impl Page for TerminalPage {
    fn set_text(&mut self, id: ElementId, text: &str) {
        println!("[{}] {}", id, text);
    }

    fn set_images(&mut self, id: ElementId, images: &[PieceImage]) {
        let alts: Vec<&str> = images.iter().map(|img| img.alt.as_str()).collect();
        debug!("{} images: {:?}", id, images.iter().map(|img| &img.src).collect::<Vec<_>>());
        println!("[{}] {}", id, alts.join(" "));
    }

    fn add_square_class(&mut self, square: Square, class: &str) {
        debug!("Adding {} to {}", class, square);
        self.highlighted.insert(square);
        println!("[{}] {}", class, square);
    }

    fn remove_class(&mut self, class: &str) {
        if !self.highlighted.is_empty() {
            debug!("Clearing {} from {} squares", class, self.highlighted.len());
        }
        self.highlighted.clear();
    }

    fn render_board(&mut self, board: &BoardWidget) {
        println!("{}", draw_board(board, &self.highlighted));
    }

    fn alert(&mut self, message: &str) {
        info!("Alert: {}", message);
        println!("*** {} ***", message);
    }

    fn prompt(&mut self, message: &str, default: &str) -> Option<String> {
        let answer = match self.answers.lock() {
            Ok(mut queue) => queue.pop_front(),
            Err(_) => None,
        };
        let answer = answer.unwrap_or_else(|| default.to_string());
        println!("{} [{}] > {}", message, default, answer);
        Some(answer)
    }
}

pub const HELP: &str = "commands: <from><to>[q|r|b|n] (e.g. e2e4, e7e8n), hover <square>, out, \
reset, difficulty <easy|medium|hard>, board, help, quit";

/// One line typed by the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminalCommand {
    Move {
        source: Square,
        target: Square,
        promotion: Option<String>,
    },
    Hover(Square),
    Out,
    Reset,
    Difficulty(String),
    Board,
    Help,
    Quit,
}

impl FromStr for TerminalCommand {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let head = words.next().ok_or_else(|| "empty command".to_string())?;
        let arg = words.next();

        let command = match (head, arg) {
            ("hover", Some(square)) => {
                TerminalCommand::Hover(parse_square(square).map_err(|e| e.to_string())?)
            }
            ("out", None) => TerminalCommand::Out,
            ("reset", None) => TerminalCommand::Reset,
            ("difficulty", Some(value)) => TerminalCommand::Difficulty(value.to_string()),
            ("board", None) => TerminalCommand::Board,
            ("help", None) => TerminalCommand::Help,
            ("quit", None) | ("exit", None) => TerminalCommand::Quit,
            (text, None) if (4..=5).contains(&text.len()) && text.is_ascii() => {
                let source = parse_square(&text[0..2]).map_err(|e| e.to_string())?;
                let target = parse_square(&text[2..4]).map_err(|e| e.to_string())?;
                let promotion = (text.len() == 5).then(|| text[4..].to_string());
                TerminalCommand::Move { source, target, promotion }
            }
            _ => return Err(format!("unknown command: {}", line.trim())),
        };
        if words.next().is_some() {
            return Err(format!("unexpected arguments: {}", line.trim()));
        }
        Ok(command)
    }
}
