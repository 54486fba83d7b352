use crate::QuizApp;
use crate::ui::layout::centered_panel;
use egui::Context;

pub fn ui_loading(app: &mut QuizApp, ctx: &Context) {
    let chapter = app
        .selected_chapter_title()
        .map(str::to_owned)
        .unwrap_or_else(|| "the chapter".to_owned());

    centered_panel(ctx, 160.0, 420.0, |ui| {
        ui.vertical_centered(|ui| {
            ui.add_space(10.0);
            ui.spinner();
            ui.add_space(10.0);
            ui.heading("Generating questions…");
            ui.label(format!("Reading {chapter} and writing your quiz."));
        });
    });
}
