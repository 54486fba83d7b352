pub mod layout;
pub mod views;

use crate::app::QuizApp;
use crate::model::AppState;
use eframe::{App, Frame};
use egui::Context;
use layout::{bottom_panel, top_panel};

impl App for QuizApp {
    fn update(&mut self, ctx: &Context, _frame: &mut Frame) {
        // Settle any background request before drawing this frame.
        self.poll_chapter_load();
        self.poll_generate();
        if self.is_loading_chapters() || self.is_generating() {
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }

        // Restart shortcut only once a quiz exists.
        if matches!(self.state, AppState::Quiz | AppState::Summary) {
            top_panel(self, ctx);
        }
        bottom_panel(ctx);

        match self.state {
            AppState::Setup => views::setup::ui_setup(self, ctx),
            AppState::Loading => views::loading::ui_loading(self, ctx),
            AppState::Quiz => views::quiz::ui_quiz(self, ctx),
            AppState::Summary => views::summary::ui_summary(self, ctx),
            AppState::Error => views::error::ui_error(self, ctx),
        }
    }
}
