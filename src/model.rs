use serde::{Deserialize, Serialize};

/// A content unit the server can generate questions for.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Chapter {
    pub id: String,
    pub title: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub question: String,
    pub options: Vec<String>,
    pub correct: usize, // index into options
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Setup,
    Loading,
    Quiz,
    Summary,
    Error,
}

impl Default for AppState {
    fn default() -> Self {
        AppState::Setup
    }
}
