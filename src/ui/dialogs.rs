use crate::app::TimelineApp;
use crate::ui::theme;
use egui::{Context, RichText, Window};

/// Render the "About" dialog.
pub fn show_about_dialog(app: &mut TimelineApp, ctx: &Context) {
    let mut should_close = false;
    Window::new("About")
        .resizable(false)
        .collapsible(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .fixed_size([300.0, 170.0])
        .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(12.0);
                ui.heading(RichText::new("Project Timeline").strong());
                ui.add_space(2.0);
                ui.label(
                    RichText::new(format!("Version {}", env!("CARGO_PKG_VERSION")))
                        .color(theme::TEXT_SECONDARY),
                );
                ui.add_space(10.0);
                ui.label("Milestones, deliverables and tasks");
                ui.label("on a Gantt timeline.");
                ui.add_space(14.0);
                if ui.add_sized([100.0, 28.0], egui::Button::new("Close")).clicked() {
                    should_close = true;
                }
            });
        });
    if should_close || ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        app.show_about = false;
    }
}

/// Render the "CSV Import Format" help dialog.
pub fn show_csv_help_dialog(app: &mut TimelineApp, ctx: &Context) {
    let mut should_close = false;

    Window::new(RichText::new("CSV Import Format").strong().size(14.0))
        .resizable(true)
        .collapsible(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .default_size([560.0, 460.0])
        .show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.add_space(4.0);

                ui.label(RichText::new("Delimiters").strong());
                ui.label("The delimiter is auto-detected: comma (,), semicolon (;), or tab.");
                ui.add_space(8.0);

                ui.label(RichText::new("Columns").strong());
                ui.add_space(2.0);
                egui::Grid::new("csv_columns")
                    .num_columns(2)
                    .striped(true)
                    .spacing([12.0, 4.0])
                    .show(ui, |ui| {
                        for (column, headers) in [
                            ("Milestone (required)", "Milestone, Milestone Name, Phase"),
                            ("Deliverable", "Deliverable, Deliverable Name"),
                            ("Task", "Task, Task Name, Task Label, Todo"),
                            ("Start", "Start, Start Date, Calculated Start Date, From, Begin"),
                            ("End", "End, End Date, Due, Due Date, Finish, To"),
                            ("Status", "Status, State, Stage"),
                        ] {
                            ui.label(RichText::new(column).strong());
                            ui.label(headers);
                            ui.end_row();
                        }
                    });
                ui.add_space(8.0);

                ui.label(RichText::new("Notes").strong());
                ui.add_space(2.0);
                let notes = [
                    "• Each row describes the most specific item it names (task, else deliverable, else milestone).",
                    "• Items are matched by name, so repeating a milestone name adds to the same milestone.",
                    "• Unreadable dates are left empty; such items are kept but not drawn.",
                    "• Rows without a milestone name are skipped.",
                ];
                for note in &notes {
                    ui.label(RichText::new(*note).small());
                }
                ui.add_space(10.0);

                ui.label(RichText::new("Example (semicolon-delimited)").strong());
                ui.add_space(2.0);
                let example = "Milestone;Deliverable;Task;Start Date;Due Date;Status\n\
                               Design;;;2025-01-06;2025-01-31;In Progress\n\
                               Design;Wireframes;;2025-01-06;2025-01-17;\n\
                               Design;Wireframes;Home page;;2025-01-10;Done";
                egui::Frame::dark_canvas(ui.style()).show(ui, |ui| {
                    ui.add(
                        egui::TextEdit::multiline(&mut example.to_string())
                            .font(egui::TextStyle::Monospace)
                            .desired_width(f32::INFINITY)
                            .interactive(false),
                    );
                });
                ui.add_space(8.0);
            });

            ui.separator();
            ui.add_space(4.0);
            if ui.add_sized([80.0, 28.0], egui::Button::new("Close")).clicked() {
                should_close = true;
            }
            ui.add_space(2.0);
        });

    if should_close || ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        app.show_csv_help = false;
    }
}
