use chrono::NaiveDate;
use egui::{Align2, Color32, Pos2, Rect, Rounding, Sense, Stroke, Ui, Vec2};
use project_timeline::layout::{BarGeometry, HeaderGroup, TimelineLayout};
use project_timeline::model::{Granularity, ItemLevel, OutlineRow, ViewMode};

use crate::ui::theme;

const ROW_HEIGHT: f32 = theme::ROW_HEIGHT;
const ROW_GAP: f32 = theme::ROW_GAP;
const TIER_HEIGHT: f32 = theme::HEADER_TIER_HEIGHT;

/// Requests raised by clicks in the chart.
#[derive(Debug, Clone, Default)]
pub struct ChartInteraction {
    pub select: Option<String>,
    pub toggle: Option<String>,
    pub clear_selection: bool,
}

/// Render the Gantt chart area (central panel).
pub fn show_gantt_chart(
    rows: &[OutlineRow<'_>],
    layout: &TimelineLayout,
    selected: Option<&str>,
    ui: &mut Ui,
) -> ChartInteraction {
    let mut interaction = ChartInteraction::default();
    let tiers = 1 + usize::from(layout.grid.headers.secondary.is_some());
    let header_height = theme::header_height(tiers);
    let available = ui.available_size();
    let chart_width = layout.grid.total_width.max(available.x);
    let chart_height = header_height + rows.len() as f32 * (ROW_HEIGHT + ROW_GAP) + 40.0;

    egui::ScrollArea::both()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            let (response, painter) = ui.allocate_painter(
                Vec2::new(chart_width, chart_height.max(available.y)),
                Sense::click(),
            );
            let origin = response.rect.min;
            let height = response.rect.height();
            let mut consumed_click = false;

            painter.rect_filled(response.rect, 0.0, theme::BG_DARK);

            draw_grid(&painter, origin, layout, header_height, height);
            draw_today_marker(&painter, origin, layout, header_height, height);
            draw_header(&painter, origin, layout, chart_width, header_height);

            for (i, row) in rows.iter().enumerate() {
                let y = origin.y + header_height + i as f32 * (ROW_HEIGHT + ROW_GAP);
                let is_selected = selected == Some(row.id);

                if is_selected {
                    painter.rect_filled(
                        Rect::from_min_size(
                            Pos2::new(origin.x, y),
                            Vec2::new(chart_width, ROW_HEIGHT + ROW_GAP),
                        ),
                        0.0,
                        theme::BG_SELECTED,
                    );
                }

                let item_rect = match (row.level, row.span.start, row.span.end) {
                    (ItemLevel::Task, None, Some(due)) => {
                        draw_due_marker(&painter, origin, layout.date_x(due), row, y, is_selected)
                    }
                    _ => {
                        let bar = layout.bar(row.span);
                        if !bar.is_visible() {
                            continue;
                        }
                        draw_bar(&painter, origin, bar, row, y, is_selected)
                    }
                };

                let response = ui.interact(
                    item_rect.expand(2.0),
                    ui.make_persistent_id(("timeline-item", row.id)),
                    Sense::click(),
                );
                if response.clicked() {
                    interaction.select = Some(row.id.to_string());
                    consumed_click = true;
                }
                if response.double_clicked() && row.has_children {
                    interaction.toggle = Some(row.id.to_string());
                }
                if response.hovered() {
                    ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
                    egui::show_tooltip_at_pointer(
                        ui.ctx(),
                        ui.layer_id(),
                        egui::Id::new(("timeline-tip", row.id)),
                        |ui| {
                            ui.strong(row.name);
                            let range = format!(
                                "{} → {}",
                                format_date(row.span.start),
                                format_date(row.span.end),
                            );
                            match row.span.duration_days() {
                                Some(days) => ui.label(format!("{range} ({days} days)")),
                                None => ui.label(range),
                            };
                            ui.label(row.status.display_name());
                        },
                    );
                }
            }

            // Empty click on background clears selection
            if response.clicked() && !consumed_click {
                interaction.clear_selection = true;
            }
        });

    interaction
}

fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%d/%m/%Y").to_string())
        .unwrap_or_else(|| "—".to_string())
}

fn draw_header(
    painter: &egui::Painter,
    origin: Pos2,
    layout: &TimelineLayout,
    width: f32,
    header_height: f32,
) {
    painter.rect_filled(
        Rect::from_min_size(origin, Vec2::new(width, header_height)),
        0.0,
        theme::BG_HEADER,
    );

    let mut tiers: Vec<&Vec<HeaderGroup>> = vec![&layout.grid.headers.primary];
    if let Some(secondary) = &layout.grid.headers.secondary {
        tiers.push(secondary);
    }

    for (t, groups) in tiers.iter().enumerate() {
        let y = origin.y + t as f32 * TIER_HEIGHT;
        for group in groups.iter() {
            let rect = Rect::from_min_size(
                Pos2::new(origin.x + group.left, y),
                Vec2::new(group.width, TIER_HEIGHT),
            );
            painter.line_segment(
                [rect.left_top(), rect.left_bottom()],
                Stroke::new(1.0, theme::BORDER_SUBTLE),
            );
            painter.with_clip_rect(rect).text(
                Pos2::new(rect.left() + 5.0, rect.center().y),
                Align2::LEFT_CENTER,
                &group.label,
                theme::font_header(),
                theme::TEXT_PRIMARY,
            );
        }
    }

    let cell_width = layout.grid.cell_width;
    let label_y = origin.y + tiers.len() as f32 * TIER_HEIGHT + TIER_HEIGHT / 2.0;
    let daily = layout.grid.granularity == Granularity::Daily;
    for (i, label) in layout.grid.labels.iter().enumerate() {
        let color = if daily && label.is_weekend {
            theme::TEXT_DIM
        } else {
            theme::TEXT_SECONDARY
        };
        painter.text(
            Pos2::new(origin.x + (i as f32 + 0.5) * cell_width, label_y),
            Align2::CENTER_CENTER,
            &label.text,
            theme::font_sub(),
            color,
        );
    }

    // Bottom border of header
    painter.line_segment(
        [
            Pos2::new(origin.x, origin.y + header_height),
            Pos2::new(origin.x + width, origin.y + header_height),
        ],
        Stroke::new(1.0, theme::BORDER_SUBTLE),
    );
}

fn draw_grid(
    painter: &egui::Painter,
    origin: Pos2,
    layout: &TimelineLayout,
    header_height: f32,
    height: f32,
) {
    let cell_width = layout.grid.cell_width;
    let daily = layout.grid.granularity == Granularity::Daily;
    for (i, label) in layout.grid.labels.iter().enumerate() {
        let x = origin.x + i as f32 * cell_width;
        if daily && label.is_weekend {
            painter.rect_filled(
                Rect::from_min_size(
                    Pos2::new(x, origin.y + header_height),
                    Vec2::new(cell_width, height - header_height),
                ),
                0.0,
                theme::BG_WEEKEND,
            );
        }
        painter.line_segment(
            [
                Pos2::new(x, origin.y + header_height),
                Pos2::new(x, origin.y + height),
            ],
            Stroke::new(0.5, theme::GRID_LINE),
        );
    }
}

/// Day view highlights today's column; coarser views get a thin line.
fn draw_today_marker(
    painter: &egui::Painter,
    origin: Pos2,
    layout: &TimelineLayout,
    header_height: f32,
    height: f32,
) {
    if !layout.today_visible() {
        return;
    }

    if layout.view_mode == ViewMode::Day {
        let cell_width = layout.grid.cell_width;
        let column = (layout.today_x / cell_width).floor();
        painter.rect_filled(
            Rect::from_min_size(
                Pos2::new(origin.x + column * cell_width, origin.y + header_height),
                Vec2::new(cell_width, height - header_height),
            ),
            0.0,
            theme::TODAY_COLUMN,
        );
        return;
    }

    let x = origin.x + layout.today_x;
    painter.line_segment(
        [
            Pos2::new(x, origin.y + header_height),
            Pos2::new(x, origin.y + height),
        ],
        Stroke::new(1.5, theme::TODAY_LINE),
    );

    let badge_w = 42.0;
    let badge_rect = Rect::from_min_size(
        Pos2::new(x - badge_w / 2.0, origin.y + header_height - 1.0),
        Vec2::new(badge_w, 14.0),
    );
    painter.rect_filled(badge_rect, Rounding::same(3.0), theme::TODAY_LINE);
    painter.text(
        badge_rect.center(),
        Align2::CENTER_CENTER,
        "Today",
        theme::font_small(),
        Color32::WHITE,
    );
}

fn draw_bar(
    painter: &egui::Painter,
    origin: Pos2,
    bar: BarGeometry,
    row: &OutlineRow<'_>,
    y: f32,
    is_selected: bool,
) -> Rect {
    // Milestones fill the row; nested levels get progressively slimmer bars.
    let inset = theme::BAR_INSET + row.level.depth() as f32 * 2.0;
    let bar_rect = Rect::from_min_size(
        Pos2::new(origin.x + bar.left, y + inset),
        Vec2::new(bar.width, ROW_HEIGHT - inset * 2.0),
    );
    let rounding = Rounding::same(theme::BAR_ROUNDING);

    let shadow_rect = bar_rect.translate(Vec2::new(1.0, 2.0));
    painter.rect_filled(shadow_rect, rounding, Color32::from_black_alpha(35));
    painter.rect_filled(bar_rect, rounding, theme::bar_color(row.level, row.status));

    if is_selected {
        painter.rect_stroke(
            bar_rect.expand(1.5),
            Rounding::same(theme::BAR_ROUNDING + 1.5),
            Stroke::new(2.0, theme::BORDER_ACCENT),
        );
    }

    // Item name on bar (single line, clipped to bar bounds)
    if bar.width > 30.0 {
        let galley =
            painter.layout_no_wrap(row.name.to_string(), theme::font_bar(), theme::TEXT_ON_BAR);
        let text_y = bar_rect.top() + (bar_rect.height() - galley.size().y) / 2.0;
        painter.with_clip_rect(bar_rect).galley(
            Pos2::new(bar_rect.left() + 6.0, text_y),
            galley,
            Color32::TRANSPARENT,
        );
    }

    bar_rect
}

fn draw_due_marker(
    painter: &egui::Painter,
    origin: Pos2,
    x: f32,
    row: &OutlineRow<'_>,
    y: f32,
    is_selected: bool,
) -> Rect {
    let center = Pos2::new(origin.x + x, y + ROW_HEIGHT / 2.0);
    let size = (ROW_HEIGHT / 2.0 - 6.0).max(5.0);
    let points = vec![
        Pos2::new(center.x, center.y - size),
        Pos2::new(center.x + size, center.y),
        Pos2::new(center.x, center.y + size),
        Pos2::new(center.x - size, center.y),
    ];
    painter.add(egui::Shape::convex_polygon(
        points.clone(),
        theme::bar_color(row.level, row.status),
        Stroke::NONE,
    ));

    if is_selected {
        painter.add(egui::Shape::convex_polygon(
            points,
            Color32::TRANSPARENT,
            Stroke::new(2.0, theme::BORDER_ACCENT),
        ));
    }

    painter.text(
        Pos2::new(center.x + size + 6.0, center.y),
        Align2::LEFT_CENTER,
        row.name,
        theme::font_bar(),
        theme::TEXT_SECONDARY,
    );

    Rect::from_center_size(center, Vec2::splat(size * 2.0 + 2.0))
}
