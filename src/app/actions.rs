use super::*;
use crate::api;
use crate::session::Step;
use serde::Serialize;
use std::sync::mpsc;

pub const DEFAULT_NUM_QUESTIONS: u32 = 5;

#[cfg(not(target_arch = "wasm32"))]
pub const EXPORT_FILE: &str = "quiz_export.json";

#[derive(Serialize)]
struct ExportDocument<'a> {
    questions: &'a [Question],
}

/// The answer-key artifact: the questions exactly as the server sent
/// them, correct indices and explanations included.
pub fn export_document(questions: &[Question]) -> String {
    serde_json::to_string_pretty(&ExportDocument { questions }).unwrap_or_default()
}

impl QuizApp {
    pub fn start_chapter_load(&mut self) {
        if self.chapters_rx.is_some() {
            return;
        }
        let (tx, rx) = mpsc::channel::<Result<Vec<Chapter>, String>>();
        self.chapters_rx = Some(rx);

        #[cfg(not(target_arch = "wasm32"))]
        std::thread::spawn(move || {
            let _ = tx.send(api::fetch_chapters());
        });

        #[cfg(target_arch = "wasm32")]
        wasm_bindgen_futures::spawn_local(async move {
            let _ = tx.send(api::fetch_chapters().await);
        });
    }

    pub fn poll_chapter_load(&mut self) {
        let result = self.chapters_rx.as_ref().and_then(|rx| rx.try_recv().ok());
        if let Some(result) = result {
            self.chapters_rx = None;
            match result {
                Ok(chapters) => {
                    self.chapters = chapters;
                    self.chapters_failed = false;
                }
                Err(err) => {
                    // Degrade to an empty selector; the widget stays usable.
                    log::warn!("chapter list unavailable: {err}");
                    self.chapters = Vec::new();
                    self.chapters_failed = true;
                }
            }
        }
    }

    /// The count the user asked for; blank or unparseable input means 5.
    pub fn requested_count(&self) -> u32 {
        self.num_questions_input
            .trim()
            .parse()
            .unwrap_or(DEFAULT_NUM_QUESTIONS)
    }

    /// Validates the selection and fires the generation request.
    /// A second call while one is pending is a no-op.
    pub fn start_generate(&mut self) {
        if self.generate_rx.is_some() {
            return;
        }
        let chapter_id = match self.selected_chapter.as_deref() {
            Some(id) if !id.is_empty() => id.to_string(),
            _ => {
                self.message = "Please select a chapter".to_string();
                return;
            }
        };
        let count = self.requested_count();

        let (tx, rx) = mpsc::channel::<Result<Vec<Question>, String>>();
        self.generate_rx = Some(rx);
        self.message.clear();
        self.state = AppState::Loading;

        #[cfg(not(target_arch = "wasm32"))]
        std::thread::spawn(move || {
            let _ = tx.send(api::generate_questions(&chapter_id, count));
        });

        #[cfg(target_arch = "wasm32")]
        wasm_bindgen_futures::spawn_local(async move {
            let _ = tx.send(api::generate_questions(&chapter_id, count).await);
        });
    }

    /// Settles a finished generation request. Dropping the receiver here
    /// ends the loading state on every outcome.
    pub fn poll_generate(&mut self) {
        let result = self.generate_rx.as_ref().and_then(|rx| rx.try_recv().ok());
        if let Some(result) = result {
            self.generate_rx = None;
            match result {
                Ok(questions) => {
                    self.export_json = None;
                    self.export_saved = None;
                    self.session = Some(QuizSession::new(questions));
                    self.state = AppState::Quiz;
                }
                Err(err) => {
                    log::warn!("question generation failed: {err}");
                    self.error = err;
                    self.state = AppState::Error;
                }
            }
        }
    }

    pub fn select_option(&mut self, index: usize) {
        if let Some(session) = self.session.as_mut() {
            // Idempotent inside the session; a second click changes nothing.
            let _ = session.answer(index);
        }
    }

    pub fn next_question(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if !session.is_answered() {
            return;
        }
        if session.advance() == Step::Finished {
            self.finish();
        }
    }

    fn finish(&mut self) {
        if let Some(session) = &self.session {
            self.export_json = Some(export_document(session.questions()));
        }
        self.state = AppState::Summary;
    }

    /// Back to setup; the chapter list survives, the session does not.
    pub fn restart(&mut self) {
        self.session = None;
        self.export_json = None;
        self.export_saved = None;
        self.message.clear();
        self.error.clear();
        self.state = AppState::Setup;
    }

    /// Error-view reload: fresh controller, chapters fetched again.
    pub fn reload(&mut self) {
        *self = QuizApp::new();
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save_export(&mut self) {
        let Some(json) = &self.export_json else {
            return;
        };
        match std::fs::write(EXPORT_FILE, json) {
            Ok(()) => self.export_saved = Some(EXPORT_FILE.to_string()),
            Err(err) => self.message = format!("Could not write {EXPORT_FILE}: {err}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_questions() -> Vec<Question> {
        (0..3)
            .map(|i| Question {
                question: format!("Q{}", i + 1),
                options: vec!["a".into(), "b".into(), "c".into(), "d".into()],
                correct: i,
                explanation: Some("restates the fact".into()),
            })
            .collect()
    }

    #[test]
    fn generate_without_a_chapter_sends_nothing() {
        let mut app = QuizApp::bare();
        app.start_generate();

        assert_eq!(app.message, "Please select a chapter");
        assert!(app.generate_rx.is_none());
        assert_eq!(app.state, AppState::Setup);
    }

    #[test]
    fn blank_count_field_defaults_to_five() {
        let mut app = QuizApp::bare();
        assert_eq!(app.requested_count(), 5);

        app.num_questions_input = "  ".to_string();
        assert_eq!(app.requested_count(), 5);

        app.num_questions_input = "abc".to_string();
        assert_eq!(app.requested_count(), 5);

        app.num_questions_input = "8".to_string();
        assert_eq!(app.requested_count(), 8);
    }

    #[test]
    fn export_reproduces_the_generated_questions() {
        let questions = sample_questions();
        let json = export_document(&questions);

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let exported = value.get("questions").unwrap().as_array().unwrap();
        assert_eq!(exported.len(), 3);
        assert_eq!(value["questions"], serde_json::to_value(&questions).unwrap());
        assert_eq!(exported[1]["correct"], 1);
        assert_eq!(exported[0]["explanation"], "restates the fact");
    }

    #[test]
    fn finishing_a_quiz_builds_the_export() {
        let mut app = QuizApp::bare();
        app.session = Some(QuizSession::new(sample_questions()));
        app.state = AppState::Quiz;

        for answer in [0, 0, 0] {
            app.select_option(answer);
            app.next_question();
        }

        assert_eq!(app.state, AppState::Summary);
        let session = app.session.as_ref().unwrap();
        assert_eq!(session.score(), 1);
        assert!(app.export_json.is_some());
    }

    #[test]
    fn next_is_ignored_until_the_question_is_answered() {
        let mut app = QuizApp::bare();
        app.session = Some(QuizSession::new(sample_questions()));
        app.state = AppState::Quiz;

        app.next_question();
        assert_eq!(app.session.as_ref().unwrap().current_index(), 0);

        app.select_option(0);
        app.next_question();
        assert_eq!(app.session.as_ref().unwrap().current_index(), 1);
    }

    #[test]
    fn restart_clears_the_session_but_keeps_chapters() {
        let mut app = QuizApp::bare();
        app.chapters = vec![Chapter {
            id: "ch1".into(),
            title: "Chapter 1".into(),
        }];
        app.session = Some(QuizSession::new(sample_questions()));
        app.export_json = Some("{}".into());
        app.state = AppState::Summary;

        app.restart();

        assert_eq!(app.state, AppState::Setup);
        assert!(app.session.is_none());
        assert!(app.export_json.is_none());
        assert_eq!(app.chapters.len(), 1);
    }
}
