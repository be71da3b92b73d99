use crate::app::TimelineApp;
use crate::ui::theme;
use egui::{menu, RichText, Ui};
use egui_phosphor::regular::{CALENDAR, CLOCK_COUNTER_CLOCKWISE};
use project_timeline::model::ViewMode;

fn view_mode_label(mode: ViewMode) -> &'static str {
    match mode {
        ViewMode::Day => "Day",
        ViewMode::Week => "Week",
        ViewMode::Auto => "Auto",
        ViewMode::Month => "Month",
    }
}

/// Render the top toolbar / menu bar.
pub fn show_toolbar(app: &mut TimelineApp, ui: &mut Ui) {
    menu::bar(ui, |ui| {
        ui.menu_button(RichText::new("  File  ").font(theme::font_menu()), |ui| {
            if ui.button("  New Project").clicked() {
                app.new_project();
                ui.close_menu();
            }
            if ui.button("  Open...").clicked() {
                app.open_project();
                ui.close_menu();
            }
            ui.separator();
            if ui.button("  Save          Ctrl+S").clicked() {
                app.save_project();
                ui.close_menu();
            }
            if ui.button("  Save As...").clicked() {
                app.save_project_as();
                ui.close_menu();
            }
            ui.separator();
            if ui.button("  Import CSV...").clicked() {
                app.import_csv();
                ui.close_menu();
            }
            if ui.button("  Export Layout CSV...").clicked() {
                app.export_layout_csv();
                ui.close_menu();
            }
            ui.separator();
            if ui.button("  Open Settings Folder").clicked() {
                app.open_settings_folder();
                ui.close_menu();
            }
        });

        ui.menu_button(RichText::new("  View  ").font(theme::font_menu()), |ui| {
            ui.label(RichText::new("Timeline Scale").small().weak());
            for mode in ViewMode::ALL {
                if ui
                    .radio(app.view_mode == mode, view_mode_label(mode))
                    .clicked()
                {
                    app.set_view_mode(mode);
                    ui.close_menu();
                }
            }
        });

        ui.menu_button(RichText::new("  Help  ").font(theme::font_menu()), |ui| {
            if ui.button("CSV Import Format").clicked() {
                app.show_csv_help = true;
                ui.close_menu();
            }
            if ui.button("About").clicked() {
                app.show_about = true;
                ui.close_menu();
            }
        });

        ui.separator();

        // Quick scale switcher
        for mode in ViewMode::ALL {
            if ui
                .selectable_label(app.view_mode == mode, view_mode_label(mode))
                .clicked()
            {
                app.set_view_mode(mode);
            }
        }

        ui.separator();

        ui.label(RichText::new(format!("{CALENDAR} Today")).size(11.0).weak());
        let picker = ui.add(
            egui_extras::DatePickerButton::new(&mut app.today_edit).id_salt("dp_today"),
        );
        if picker.changed() {
            let date = app.today_edit;
            app.pin_today(date);
        }
        if app.settings.pinned_today.is_some()
            && ui
                .button(RichText::new(CLOCK_COUNTER_CLOCKWISE).size(12.0))
                .on_hover_text("Follow the system clock")
                .clicked()
        {
            app.unpin_today();
        }

        // Right-aligned project name
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let modified = if app.file_path.is_some() { "" } else { " (unsaved)" };
            ui.label(
                RichText::new(format!("{}{}", app.project.name, modified))
                    .size(11.0)
                    .weak(),
            );
        });
    });
}
