use crate::QuizApp;
use crate::ui::layout::centered_panel;
use egui::{Button, Context};

pub fn ui_error(app: &mut QuizApp, ctx: &Context) {
    let mut reload = false;

    centered_panel(ctx, 200.0, 480.0, |ui| {
        ui.vertical_centered(|ui| {
            ui.heading("⚠ Could not generate the quiz");
            ui.add_space(10.0);
            if app.error.is_empty() {
                ui.label("Something went wrong while talking to the server.");
            } else {
                ui.label(&app.error);
            }
            ui.add_space(16.0);
            if ui
                .add_sized([180.0, 36.0], Button::new("🔄 Reload"))
                .clicked()
            {
                reload = true;
            }
        });
    });

    if reload {
        app.reload();
    }
}
