use chess::Square;
use std::cell::RefCell;
use std::collections::{BTreeSet, HashMap, VecDeque};
use std::rc::Rc;

use super::{BoardWidget, ElementId, Page, PieceImage};

/// Everything a `RecordingPage` has been asked to show.
#[derive(Debug, Default)]
pub struct PageLog {
    pub texts: HashMap<ElementId, String>,
    pub images: HashMap<ElementId, Vec<PieceImage>>,
    pub highlighted: BTreeSet<Square>,
    pub alerts: Vec<String>,
    pub prompts: Vec<String>,
    pub answers: VecDeque<Option<String>>,
    pub board_renders: usize,
}

impl PageLog {
    pub fn text(&self, id: ElementId) -> Option<&str> {
        self.texts.get(&id).map(String::as_str)
    }
}

/// In-memory page used by tests; clones share the same log.
#[derive(Clone, Default)]
pub struct RecordingPage {
    pub log: Rc<RefCell<PageLog>>,
}

impl RecordingPage {
    pub fn answer(&self, answer: Option<&str>) {
        self.log.borrow_mut().answers.push_back(answer.map(str::to_string));
    }
}

impl Page for RecordingPage {
    fn set_text(&mut self, id: ElementId, text: &str) {
        self.log.borrow_mut().texts.insert(id, text.to_string());
    }

    fn set_images(&mut self, id: ElementId, images: &[PieceImage]) {
        self.log.borrow_mut().images.insert(id, images.to_vec());
    }

    fn add_square_class(&mut self, square: Square, _class: &str) {
        self.log.borrow_mut().highlighted.insert(square);
    }

    fn remove_class(&mut self, _class: &str) {
        self.log.borrow_mut().highlighted.clear();
    }

    fn render_board(&mut self, _board: &BoardWidget) {
        self.log.borrow_mut().board_renders += 1;
    }

    fn alert(&mut self, message: &str) {
        self.log.borrow_mut().alerts.push(message.to_string());
    }

    fn prompt(&mut self, message: &str, default: &str) -> Option<String> {
        let mut log = self.log.borrow_mut();
        log.prompts.push(message.to_string());
        log.answers.pop_front().unwrap_or_else(|| Some(default.to_string()))
    }
}
