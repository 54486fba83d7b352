use crate::model::{AppState, Chapter, Question};
use crate::session::QuizSession;
use std::sync::mpsc::Receiver;

pub mod actions;

/// The widget's controller: chapters, the live session, and the
/// bookkeeping for requests still in flight.
pub struct QuizApp {
    pub chapters: Vec<Chapter>,
    pub chapters_failed: bool,
    pub selected_chapter: Option<String>,
    pub num_questions_input: String,
    pub session: Option<QuizSession>,
    pub state: AppState,
    /// Inline validation/status text shown next to the controls.
    pub message: String,
    /// What the error view displays.
    pub error: String,
    /// Pretty-printed answer-key document, built once per finished quiz.
    pub export_json: Option<String>,
    pub export_saved: Option<String>,
    pub(crate) chapters_rx: Option<Receiver<Result<Vec<Chapter>, String>>>,
    pub(crate) generate_rx: Option<Receiver<Result<Vec<Question>, String>>>,
}

impl QuizApp {
    pub fn new() -> Self {
        let mut app = Self::bare();
        app.start_chapter_load();
        app
    }

    /// The same controller without the startup request. Used by `new`
    /// and by tests that must not touch the network.
    pub(crate) fn bare() -> Self {
        Self {
            chapters: Vec::new(),
            chapters_failed: false,
            selected_chapter: None,
            num_questions_input: String::new(),
            session: None,
            state: AppState::Setup,
            message: String::new(),
            error: String::new(),
            export_json: None,
            export_saved: None,
            chapters_rx: None,
            generate_rx: None,
        }
    }

    pub fn is_loading_chapters(&self) -> bool {
        self.chapters_rx.is_some()
    }

    pub fn is_generating(&self) -> bool {
        self.generate_rx.is_some()
    }

    pub fn selected_chapter_title(&self) -> Option<&str> {
        let id = self.selected_chapter.as_deref()?;
        self.chapters
            .iter()
            .find(|c| c.id == id)
            .map(|c| c.title.as_str())
    }
}

impl Default for QuizApp {
    fn default() -> Self {
        Self::new()
    }
}
