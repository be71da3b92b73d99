use egui::{RichText, Ui};
use egui_phosphor::regular::{CARET_DOWN, CARET_RIGHT, CHECK_SQUARE, FLAG, PACKAGE};
use project_timeline::model::{ItemLevel, OutlineRow};

use crate::ui::theme;

/// Actions that the outline panel can request.
pub enum TreeAction {
    None,
    Select(String),
    Toggle(String),
    ExpandAll,
    CollapseAll,
}

fn level_icon(level: ItemLevel) -> &'static str {
    match level {
        ItemLevel::Milestone => FLAG,
        ItemLevel::Deliverable => PACKAGE,
        ItemLevel::Task => CHECK_SQUARE,
    }
}

/// Render the left-side milestone → deliverable → task outline.
pub fn show_item_tree(
    rows: &[OutlineRow<'_>],
    is_expanded: impl Fn(&str) -> bool,
    selected: Option<&str>,
    total_items: usize,
    ui: &mut Ui,
) -> TreeAction {
    let mut action = TreeAction::None;

    ui.add_space(2.0);
    ui.horizontal(|ui| {
        ui.label(
            RichText::new("Outline")
                .strong()
                .size(15.0)
                .color(theme::TEXT_PRIMARY),
        );
        ui.label(
            RichText::new(format!("({total_items})"))
                .size(11.0)
                .color(theme::TEXT_DIM),
        );
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.small_button("Collapse").clicked() {
                action = TreeAction::CollapseAll;
            }
            if ui.small_button("Expand").clicked() {
                action = TreeAction::ExpandAll;
            }
        });
    });
    ui.add_space(4.0);
    ui.separator();

    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            for row in rows {
                let is_selected = selected == Some(row.id);
                ui.horizontal(|ui| {
                    ui.add_space(row.level.depth() as f32 * 16.0);

                    if row.has_children {
                        let caret = if is_expanded(row.id) { CARET_DOWN } else { CARET_RIGHT };
                        if ui
                            .add(egui::Button::new(RichText::new(caret).size(11.0)).frame(false))
                            .clicked()
                        {
                            action = TreeAction::Toggle(row.id.to_string());
                        }
                    } else {
                        ui.add_space(18.0);
                    }

                    ui.label(
                        RichText::new(level_icon(row.level))
                            .color(theme::status_color(row.status)),
                    );

                    let name = if row.name.is_empty() { "(untitled)" } else { row.name };
                    let text = RichText::new(name).size(12.0).color(if is_selected {
                        theme::TEXT_PRIMARY
                    } else {
                        theme::TEXT_SECONDARY
                    });
                    if ui.selectable_label(is_selected, text).clicked() {
                        action = TreeAction::Select(row.id.to_string());
                    }
                });
            }
        });

    action
}
