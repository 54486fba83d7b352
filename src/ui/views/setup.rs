use crate::QuizApp;
use crate::ui::layout::centered_panel;
use egui::{Button, Context};

pub fn ui_setup(app: &mut QuizApp, ctx: &Context) {
    centered_panel(ctx, 280.0, 520.0, |ui| {
        ui.vertical_centered(|ui| {
            ui.heading("📚 AI Chapter Quiz");
            ui.add_space(10.0);
            ui.label("Pick a chapter and generate a quiz from its content.");
            ui.add_space(16.0);

            ui.horizontal(|ui| {
                ui.label("Chapter:");
                let selected_title = app
                    .selected_chapter_title()
                    .map(str::to_owned)
                    .unwrap_or_else(|| placeholder_text(app).to_owned());

                egui::ComboBox::from_id_salt("chapter_select")
                    .width(280.0)
                    .selected_text(selected_title)
                    .show_ui(ui, |ui| {
                        if app.chapters.is_empty() {
                            // Placeholder entry, nothing to pick.
                            ui.add_enabled(false, Button::new(placeholder_text(app)));
                        }
                        for chapter in &app.chapters {
                            ui.selectable_value(
                                &mut app.selected_chapter,
                                Some(chapter.id.clone()),
                                &chapter.title,
                            );
                        }
                    });
                if app.is_loading_chapters() {
                    ui.spinner();
                }
            });

            ui.add_space(8.0);

            ui.horizontal(|ui| {
                ui.label("Questions:");
                ui.add(
                    egui::TextEdit::singleline(&mut app.num_questions_input)
                        .desired_width(60.0)
                        .hint_text("5"),
                );
            });

            ui.add_space(16.0);

            if ui
                .add_sized([220.0, 36.0], Button::new("✨ Generate quiz"))
                .clicked()
            {
                app.start_generate();
            }

            ui.add_space(8.0);
            if !app.message.is_empty() {
                ui.colored_label(ui.visuals().warn_fg_color, &app.message);
            }
        });
    });
}

fn placeholder_text(app: &QuizApp) -> &'static str {
    if app.is_loading_chapters() {
        "Loading chapters…"
    } else if app.chapters_failed || app.chapters.is_empty() {
        "No chapters available"
    } else {
        "Select a chapter"
    }
}
