use std::path::Path;

use chrono::NaiveDate;

use crate::error::{Error, Result};
use crate::layout::{Clock, TimelineLayout};
use crate::model::{Project, ViewMode};

fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

/// Write one semicolon-delimited row per item with its computed bar geometry.
///
/// Columns: Level ; Name ; Status ; Start ; End ; Left ; Width.
/// Items without a full date span get empty geometry cells.
/// Returns the number of items written.
pub fn write_layout_csv<W: std::io::Write>(
    project: &Project,
    layout: &TimelineLayout,
    writer: W,
) -> Result<usize> {
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(b';')
        .has_headers(false)
        .from_writer(writer);

    wtr.write_record(["Level", "Name", "Status", "Start", "End", "Left", "Width"])?;

    let rows = project.outline(|_| true);
    for row in &rows {
        let bar = layout.bar(row.span);
        let (left, width) = if bar.is_visible() {
            (format!("{:.1}", bar.left), format!("{:.1}", bar.width))
        } else {
            (String::new(), String::new())
        };
        let start = format_date(row.span.start);
        let end = format_date(row.span.end);
        wtr.write_record([
            row.level.as_str(),
            row.name,
            row.status.as_str(),
            start.as_str(),
            end.as_str(),
            left.as_str(),
            width.as_str(),
        ])?;
    }

    wtr.flush().map_err(csv::Error::from)?;
    Ok(rows.len())
}

/// Lay out the project for `view_mode` and export the geometry to a file.
pub fn export_layout_csv<C: Clock + ?Sized>(
    project: &Project,
    view_mode: ViewMode,
    clock: &C,
    path: &Path,
) -> Result<usize> {
    let layout = TimelineLayout::compute(&project.milestones, view_mode, clock);
    let file = std::fs::File::create(path).map_err(|e| Error::io(path, e))?;
    let count = write_layout_csv(project, &layout, file)?;
    tracing::info!(path = %path.display(), count, %view_mode, "exported layout CSV");
    Ok(count)
}
