pub mod api;
pub mod app;
pub mod model;
pub mod session;
pub mod ui;

pub use app::QuizApp;
