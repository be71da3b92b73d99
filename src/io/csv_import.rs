use std::path::Path;

use chrono::NaiveDate;

use crate::error::{Error, Result};
use crate::model::date::parse_date;
use crate::model::{Deliverable, Milestone, Project, Status, Task};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Column {
    Milestone,
    Deliverable,
    Task,
    Start,
    End,
    Status,
}

/// Detect delimiter by checking the first line for common separators.
fn detect_delimiter(first_line: &str) -> u8 {
    let semicolons = first_line.matches(';').count();
    let commas = first_line.matches(',').count();
    let tabs = first_line.matches('\t').count();

    if semicolons >= commas && semicolons >= tabs {
        b';'
    } else if tabs >= commas {
        b'\t'
    } else {
        b','
    }
}

/// Map a header cell to a column, ignoring case, spaces, dashes and underscores.
fn header_to_column(header: &str) -> Option<Column> {
    let normalized = header.trim().to_lowercase().replace([' ', '-', '_'], "");
    match normalized.as_str() {
        "milestone" | "milestonename" | "phase" => Some(Column::Milestone),
        "deliverable" | "deliverablename" => Some(Column::Deliverable),
        "task" | "taskname" | "tasklabel" | "todo" => Some(Column::Task),
        "start" | "startdate" | "calculatedstartdate" | "from" | "begin" => Some(Column::Start),
        "end" | "enddate" | "calculatedenddate" | "to" | "finish" | "due" | "duedate" => {
            Some(Column::End)
        }
        "status" | "state" | "stage" => Some(Column::Status),
        _ => None,
    }
}

#[derive(Debug, Default)]
struct Row {
    milestone: String,
    deliverable: String,
    task: String,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    status: Option<Status>,
}

/// Import a project outline from a CSV file.
///
/// The project is named after the file. Returns `(project, skipped_rows)`.
pub fn import_csv(path: &Path) -> Result<(Project, usize)> {
    let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    let name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("Imported Project");
    import_csv_str(&content, name)
}

/// Import a project outline from CSV text.
///
/// Each row names a milestone and optionally a deliverable and a task;
/// the dates and status apply to the most specific item named. Items are
/// matched by name (case-insensitive) so repeated names extend the same
/// branch. Rows without a milestone are skipped; unparsable dates are kept
/// as absent.
pub fn import_csv_str(content: &str, project_name: &str) -> Result<(Project, usize)> {
    let first_line = content.lines().next().unwrap_or("");
    let delimiter = detect_delimiter(first_line);

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let headers = reader.headers()?.clone();
    let columns: Vec<Option<Column>> = headers.iter().map(header_to_column).collect();
    if !columns.contains(&Some(Column::Milestone)) {
        return Err(Error::MissingColumns {
            found: headers.iter().map(str::to_string).collect(),
        });
    }

    let mut project = Project::new(project_name);
    let mut imported = 0usize;
    let mut skipped = 0usize;

    for (i, result) in reader.records().enumerate() {
        let line = i + 2;
        let record = match result {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!(line, error = %e, "skipping unreadable CSV row");
                skipped += 1;
                continue;
            }
        };

        let mut row = Row::default();
        for (field, column) in record.iter().zip(&columns) {
            match column {
                Some(Column::Milestone) => row.milestone = field.to_string(),
                Some(Column::Deliverable) => row.deliverable = field.to_string(),
                Some(Column::Task) => row.task = field.to_string(),
                Some(Column::Start) => row.start = parse_date(field),
                Some(Column::End) => row.end = parse_date(field),
                Some(Column::Status) if !field.is_empty() => {
                    row.status = Some(Status::from_label(field))
                }
                _ => {}
            }
        }

        if row.milestone.is_empty() {
            tracing::warn!(line, "skipping CSV row without a milestone name");
            skipped += 1;
            continue;
        }

        apply_row(&mut project, row);
        imported += 1;
    }

    if imported == 0 {
        return Err(Error::Empty { skipped });
    }
    tracing::info!(imported, skipped, "imported CSV outline");
    Ok((project, skipped))
}

fn apply_row(project: &mut Project, row: Row) {
    let milestone = find_or_insert(
        &mut project.milestones,
        &row.milestone,
        |m| &m.name,
        || Milestone::new(row.milestone.clone(), None, None),
    );
    if row.deliverable.is_empty() {
        fill_dates(
            &mut milestone.calculated_start_date,
            &mut milestone.calculated_end_date,
            &row,
        );
        if let Some(status) = row.status {
            milestone.status = status;
        }
        return;
    }

    let deliverable = find_or_insert(
        &mut milestone.deliverables,
        &row.deliverable,
        |d| &d.name,
        || Deliverable::new(row.deliverable.clone(), None, None),
    );
    if row.task.is_empty() {
        fill_dates(
            &mut deliverable.calculated_start_date,
            &mut deliverable.calculated_end_date,
            &row,
        );
        if let Some(status) = row.status {
            deliverable.status = status;
        }
        return;
    }

    let task = find_or_insert(
        &mut deliverable.tasks,
        &row.task,
        |t| &t.name,
        || Task::new(row.task.clone(), None),
    );
    fill_dates(&mut task.calculated_start_date, &mut task.due_date, &row);
    if let Some(status) = row.status {
        task.status = status;
    }
}

// Later rows only fill in dates, never erase ones already read.
fn fill_dates(start: &mut Option<NaiveDate>, end: &mut Option<NaiveDate>, row: &Row) {
    if row.start.is_some() {
        *start = row.start;
    }
    if row.end.is_some() {
        *end = row.end;
    }
}

fn find_or_insert<'a, T>(
    items: &'a mut Vec<T>,
    name: &str,
    name_of: impl Fn(&T) -> &String,
    create: impl FnOnce() -> T,
) -> &'a mut T {
    let index = match items
        .iter()
        .position(|item| name_of(item).eq_ignore_ascii_case(name))
    {
        Some(index) => index,
        None => {
            items.push(create());
            items.len() - 1
        }
    };
    &mut items[index]
}
