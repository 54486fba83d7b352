use crate::QuizApp;
use crate::ui::layout::centered_panel;
use egui::{Button, Color32, Context, ProgressBar, RichText, ScrollArea};

const CORRECT_FILL: Color32 = Color32::from_rgb(27, 94, 32);
const INCORRECT_FILL: Color32 = Color32::from_rgb(127, 29, 29);

pub fn ui_quiz(app: &mut QuizApp, ctx: &Context) {
    // Snapshot of the session so the option loop does not fight the
    // &mut calls below.
    let Some(session) = app.session.as_ref() else {
        return;
    };
    let Some(question) = session.current_question().cloned() else {
        // Out of range; nothing to render.
        return;
    };
    let index = session.current_index();
    let total = session.total();
    let answered = session.is_answered();
    let selected = session.selected();
    let fraction = session.progress_fraction();
    let percent = session.progress_percent();

    let mut clicked_option = None;
    let mut clicked_next = false;

    centered_panel(ctx, 460.0, 620.0, |ui| {
        ui.vertical_centered(|ui| {
            let panel_width = ui.available_width().min(560.0);

            ui.heading(format!("Question {} of {}", index + 1, total));
            ui.add_space(6.0);
            ui.add(
                ProgressBar::new(fraction)
                    .desired_width(panel_width)
                    .text(format!("{percent}%")),
            );
            ui.add_space(12.0);

            ScrollArea::vertical().max_height(120.0).show(ui, |ui| {
                ui.label(RichText::new(&question.question).size(16.0));
            });
            ui.add_space(12.0);

            for (i, option) in question.options.iter().enumerate() {
                let mut button = Button::new(option);
                if answered {
                    if i == question.correct {
                        button = button.fill(CORRECT_FILL);
                    } else if selected == Some(i) {
                        button = button.fill(INCORRECT_FILL);
                    }
                }
                let response = ui.add_enabled(
                    !answered,
                    button.min_size(egui::vec2(panel_width, 32.0)),
                );
                if response.clicked() {
                    clicked_option = Some(i);
                }
                ui.add_space(4.0);
            }

            ui.add_space(8.0);

            if answered {
                if selected == Some(question.correct) {
                    ui.label("✅ Correct!");
                } else {
                    ui.label("❌ Incorrect.");
                }
                if let Some(explanation) = &question.explanation {
                    ui.add_space(4.0);
                    ui.label(RichText::new(explanation).italics());
                }
            }

            ui.add_space(10.0);
            let next_label = if index + 1 == total {
                "Finish"
            } else {
                "Next question"
            };
            if ui
                .add_enabled(
                    answered,
                    Button::new(next_label).min_size(egui::vec2(180.0, 36.0)),
                )
                .clicked()
            {
                clicked_next = true;
            }
        });
    });

    if let Some(i) = clicked_option {
        app.select_option(i);
    }
    if clicked_next {
        app.next_question();
    }
}
