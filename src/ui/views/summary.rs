use crate::QuizApp;
use crate::ui::layout::{centered_panel, two_button_row};
use egui::{Context, ScrollArea};

pub fn ui_summary(app: &mut QuizApp, ctx: &Context) {
    let Some(session) = app.session.as_ref() else {
        app.restart();
        return;
    };
    let score = session.score();
    let total = session.total();
    let percent = session.final_percent();
    let answer_key: Vec<(String, String)> = session
        .questions()
        .iter()
        .map(|q| {
            let correct = q
                .options
                .get(q.correct)
                .cloned()
                .unwrap_or_else(|| format!("option {}", q.correct));
            (q.question.clone(), correct)
        })
        .collect();

    let mut restart = false;
    let mut copy_json = false;
    #[cfg(not(target_arch = "wasm32"))]
    let mut save_json = false;

    centered_panel(ctx, 420.0, 560.0, |ui| {
        ui.vertical_centered(|ui| {
            let panel_width = ui.available_width().min(480.0);

            ui.heading("🎉 Quiz complete!");
            ui.add_space(10.0);
            ui.label(format!("You scored {score} out of {total} ({percent}%)."));
            ui.add_space(12.0);

            ui.collapsing("Answer key", |ui| {
                ScrollArea::vertical().max_height(220.0).show(ui, |ui| {
                    for (question, correct) in &answer_key {
                        ui.label(question);
                        ui.label(format!("    ✔ {correct}"));
                        ui.add_space(4.0);
                    }
                });
            });

            ui.add_space(12.0);

            #[cfg(not(target_arch = "wasm32"))]
            {
                let (save, copy) =
                    two_button_row(ui, panel_width, "💾 Save quiz JSON", "📋 Copy quiz JSON");
                save_json = save;
                copy_json = copy;
            }
            #[cfg(target_arch = "wasm32")]
            if ui
                .add_sized([panel_width, 36.0], egui::Button::new("📋 Copy quiz JSON"))
                .clicked()
            {
                copy_json = true;
            }

            if let Some(path) = &app.export_saved {
                ui.add_space(4.0);
                ui.label(format!("Saved to {path}"));
            }
            if !app.message.is_empty() {
                ui.add_space(4.0);
                ui.label(&app.message);
            }

            ui.add_space(12.0);
            if ui
                .add_sized([panel_width / 2.0, 36.0], egui::Button::new("New quiz"))
                .clicked()
            {
                restart = true;
            }
        });
    });

    #[cfg(not(target_arch = "wasm32"))]
    if save_json {
        app.save_export();
    }
    if copy_json {
        if let Some(json) = &app.export_json {
            ctx.copy_text(json.clone());
            app.message = "Quiz JSON copied to the clipboard".to_string();
        }
    }
    if restart {
        app.restart();
    }
}
