use std::collections::HashSet;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use project_timeline::config::AppSettings;
use project_timeline::io;
use project_timeline::layout::{Clock, TimelineLayout};
use project_timeline::model::{Client, Deliverable, Milestone, Project, Status, Task, ViewMode};

use crate::ui;

/// Host state around the layout engine: the open project, view options and settings.
pub struct TimelineApp {
    pub project: Project,
    pub file_path: Option<PathBuf>,
    pub view_mode: ViewMode,
    /// Ids of milestones and deliverables whose children are shown.
    pub expanded: HashSet<String>,
    pub selected: Option<String>,

    pub settings: AppSettings,
    pub settings_path: PathBuf,
    /// Backing value for the "today" date picker.
    pub today_edit: NaiveDate,

    // Dialog state
    pub show_about: bool,
    pub show_csv_help: bool,

    // Status message
    pub status_message: String,
}

impl TimelineApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        // Phosphor glyphs are used inline in labels
        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);

        let settings_path = AppSettings::default_path();
        let settings = AppSettings::load_from(&settings_path);
        let today = settings.clock().today();

        let mut app = Self {
            project: Self::sample_project(today),
            file_path: None,
            view_mode: settings.default_view_mode,
            expanded: HashSet::new(),
            selected: None,
            today_edit: today,
            settings,
            settings_path,
            show_about: false,
            show_csv_help: false,
            status_message: "Ready".to_string(),
        };

        if let Some(path) = app.settings.last_project.clone() {
            app.load_from(&path);
        }
        app.expand_milestones();
        app
    }

    /// Demo outline dated relative to `today`, shown when nothing was reopened.
    fn sample_project(today: NaiveDate) -> Project {
        let day = |offset: i64| Some(today + chrono::Duration::days(offset));
        let mut project = Project::new("Sample Project");
        project.client = Some(Client {
            name: "Acme Corp".to_string(),
            contact_email: None,
        });

        // ── Milestone 1: Discovery ──────────────────────────────────
        let mut kickoff = Task::new("Kickoff meeting", day(-12));
        kickoff.status = Status::Completed;
        let mut interviews = Task::new("Stakeholder interviews", day(-4));
        interviews.status = Status::Completed;
        let mut research = Deliverable::new("Research report", day(-14), day(-2))
            .with_task(kickoff)
            .with_task(interviews);
        research.status = Status::Completed;

        let mut discovery =
            Milestone::new("Discovery", day(-14), day(3)).with_deliverable(research);
        discovery.status = Status::InProgress;
        let mut brief = Deliverable::new("Project brief", day(-2), day(3))
            .with_task(Task::new("Draft brief", day(1)))
            .with_task(Task::new("Client sign-off", day(3)));
        brief.status = Status::InProgress;
        discovery.deliverables.push(brief);

        // ── Milestone 2: Delivery ───────────────────────────────────
        let delivery = Milestone::new("Delivery", day(4), day(40))
            .with_deliverable(
                Deliverable::new("Design system", day(4), day(18))
                    .with_task(Task::new("Colour palette", day(8)))
                    .with_task(Task::new("Component library", day(18))),
            )
            .with_deliverable(
                Deliverable::new("Web application", day(12), day(36))
                    .with_task(Task::new("API integration", day(26)))
                    .with_task(Task::new("QA pass", day(34))),
            );

        // ── Milestone 3: Launch (dates not yet computed) ────────────
        let mut launch = Milestone::new("Launch", None, day(45));
        launch.status = Status::OnHold;

        project.milestones = vec![discovery, delivery, launch];
        project
    }

    // --- File operations ---

    pub fn new_project(&mut self) {
        self.project = Project::default();
        self.file_path = None;
        self.selected = None;
        self.expanded.clear();
        self.status_message = "New project created".to_string();
    }

    pub fn open_project(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Timeline Project", &["timeline.json", "json"])
            .pick_file()
        {
            self.load_from(&path);
        }
    }

    fn load_from(&mut self, path: &Path) {
        match io::load_project(path) {
            Ok(project) => {
                self.project = project;
                self.file_path = Some(path.to_path_buf());
                self.selected = None;
                self.expanded.clear();
                self.expand_milestones();
                self.remember_project(path);
                self.status_message = "Project loaded".to_string();
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "failed to load project");
                self.status_message = format!("Error loading: {}", e);
            }
        }
    }

    pub fn save_project(&mut self) {
        if let Some(path) = self.file_path.clone() {
            self.project.touch();
            match io::save_project(&self.project, &path) {
                Ok(()) => self.status_message = "Project saved".to_string(),
                Err(e) => self.status_message = format!("Error saving: {}", e),
            }
        } else {
            self.save_project_as();
        }
    }

    pub fn save_project_as(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Timeline Project", &["timeline.json", "json"])
            .set_file_name(format!("{}.timeline.json", self.project.name))
            .save_file()
        {
            self.project.touch();
            match io::save_project(&self.project, &path) {
                Ok(()) => {
                    self.remember_project(&path);
                    self.file_path = Some(path);
                    self.status_message = "Project saved".to_string();
                }
                Err(e) => self.status_message = format!("Error saving: {}", e),
            }
        }
    }

    pub fn import_csv(&mut self) {
        // Guard: if current project has items, confirm before replacing
        if !self.project.milestones.is_empty() {
            let confirm = rfd::MessageDialog::new()
                .set_title("Import CSV")
                .set_description("This will replace the current project. Continue?")
                .set_buttons(rfd::MessageButtons::YesNo)
                .show();
            if confirm != rfd::MessageDialogResult::Yes {
                return;
            }
        }

        if let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv", "txt"])
            .pick_file()
        {
            match io::import_csv(&path) {
                Ok((project, skipped)) => {
                    let count = project.item_count();
                    self.project = project;
                    self.file_path = None;
                    self.selected = None;
                    self.expanded.clear();
                    self.expand_milestones();

                    self.status_message = if skipped > 0 {
                        format!("Imported {} items ({} rows skipped)", count, skipped)
                    } else {
                        format!("Imported {} items", count)
                    };
                }
                Err(e) => {
                    self.status_message = format!("CSV import failed: {}", e);
                }
            }
        }
    }

    pub fn export_layout_csv(&mut self) {
        if self.project.milestones.is_empty() {
            self.status_message = "Nothing to export: project has no milestones".to_string();
            return;
        }

        let default_name = format!("{}-{}.csv", self.project.name, self.view_mode);
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .set_file_name(default_name)
            .save_file()
        {
            let clock = self.settings.clock();
            match io::export_layout_csv(&self.project, self.view_mode, clock.as_ref(), &path) {
                Ok(count) => {
                    self.status_message = format!("Exported layout of {} items", count);
                }
                Err(e) => {
                    self.status_message = format!("Layout export failed: {}", e);
                }
            }
        }
    }

    pub fn open_settings_folder(&mut self) {
        let dir = AppSettings::config_dir();
        if let Err(e) = std::fs::create_dir_all(&dir).and_then(|()| open::that(&dir)) {
            self.status_message = format!("Cannot open {}: {}", dir.display(), e);
        }
    }

    // --- View state ---

    pub fn set_view_mode(&mut self, mode: ViewMode) {
        if self.view_mode == mode {
            return;
        }
        self.view_mode = mode;
        self.settings.default_view_mode = mode;
        self.persist_settings();
        self.status_message = format!("Scale: {}", mode);
    }

    pub fn pin_today(&mut self, date: NaiveDate) {
        self.settings.pinned_today = Some(date);
        self.persist_settings();
        self.status_message = format!("Viewing timeline as of {}", date.format("%d/%m/%Y"));
    }

    pub fn unpin_today(&mut self) {
        self.settings.pinned_today = None;
        self.today_edit = self.settings.clock().today();
        self.persist_settings();
        self.status_message = "Following the system clock".to_string();
    }

    pub fn toggle_expanded(&mut self, id: &str) {
        if !self.expanded.remove(id) {
            self.expanded.insert(id.to_string());
        }
    }

    fn expand_milestones(&mut self) {
        self.expanded
            .extend(self.project.milestones.iter().map(|m| m.id.clone()));
    }

    fn expand_all(&mut self) {
        for milestone in &self.project.milestones {
            self.expanded.insert(milestone.id.clone());
            self.expanded
                .extend(milestone.deliverables.iter().map(|d| d.id.clone()));
        }
    }

    fn remember_project(&mut self, path: &Path) {
        self.settings.last_project = Some(path.to_path_buf());
        self.persist_settings();
    }

    fn persist_settings(&mut self) {
        if let Err(e) = self.settings.save_to(&self.settings_path) {
            tracing::warn!(error = %e, "failed to save settings");
            self.status_message = format!("Settings not saved: {}", e);
        }
    }
}

impl eframe::App for TimelineApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ui::theme::apply_theme(ctx);

        // Ctrl+S saves
        if ctx.input(|i| i.modifiers.ctrl && i.key_pressed(egui::Key::S)) {
            self.save_project();
        }

        // Top panel: toolbar
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui::toolbar::show_toolbar(self, ui);
        });

        let clock = self.settings.clock();
        let layout = TimelineLayout::compute(&self.project.milestones, self.view_mode, clock.as_ref());
        let pinned = self.settings.pinned_today.is_some();

        // Bottom panel: status bar
        egui::TopBottomPanel::bottom("status_bar")
            .exact_height(ui::theme::STATUS_BAR_HEIGHT)
            .frame(
                egui::Frame::default()
                    .fill(ui::theme::BG_STATUS_BAR)
                    .inner_margin(egui::Margin::symmetric(10.0, 0.0)),
            )
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    ui.label(
                        egui::RichText::new(&self.status_message)
                            .size(11.0)
                            .color(ui::theme::TEXT_SECONDARY),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(
                            egui::RichText::new(format!("Items: {}", self.project.item_count()))
                                .size(10.5)
                                .color(ui::theme::TEXT_DIM),
                        );
                        ui.label(egui::RichText::new(" · ").size(10.5).color(ui::theme::TEXT_DIM));
                        ui.label(
                            egui::RichText::new(format!(
                                "{} → {} ({} days)",
                                layout.window.min_date.format("%d/%m/%Y"),
                                layout.window.max_date.format("%d/%m/%Y"),
                                layout.window.total_days,
                            ))
                            .size(10.5)
                            .color(ui::theme::TEXT_DIM),
                        );
                        if pinned {
                            ui.label(
                                egui::RichText::new(format!(
                                    "Pinned to {} · ",
                                    layout.today.format("%d/%m/%Y")
                                ))
                                .size(10.5)
                                .color(ui::theme::TODAY_LINE),
                            );
                        }
                    });
                });
            });

        let expanded = &self.expanded;
        let rows = self.project.outline(|id| expanded.contains(id));
        let selected = self.selected.as_deref();

        // Left panel: outline
        let mut tree_action = ui::item_tree::TreeAction::None;
        egui::SidePanel::left("outline_panel")
            .default_width(ui::theme::SIDE_PANEL_WIDTH)
            .min_width(180.0)
            .max_width(ui::theme::SIDE_PANEL_WIDTH * 2.0)
            .resizable(true)
            .frame(
                egui::Frame::default()
                    .fill(ui::theme::BG_PANEL)
                    .inner_margin(egui::Margin::same(8.0))
                    .stroke(egui::Stroke::new(1.0, ui::theme::BORDER_SUBTLE)),
            )
            .show(ctx, |ui| {
                tree_action = ui::item_tree::show_item_tree(
                    &rows,
                    |id| expanded.contains(id),
                    selected,
                    self.project.item_count(),
                    ui,
                );
            });

        // Central panel: Gantt chart
        let chart_frame = egui::Frame::default()
            .fill(ui::theme::BG_DARK)
            .inner_margin(egui::Margin::ZERO);
        let mut chart = ui::gantt_chart::ChartInteraction::default();
        egui::CentralPanel::default().frame(chart_frame).show(ctx, |ui| {
            chart = ui::gantt_chart::show_gantt_chart(&rows, &layout, selected, ui);
        });

        // Handle outline and chart actions
        match tree_action {
            ui::item_tree::TreeAction::Select(id) => self.selected = Some(id),
            ui::item_tree::TreeAction::Toggle(id) => self.toggle_expanded(&id),
            ui::item_tree::TreeAction::ExpandAll => self.expand_all(),
            ui::item_tree::TreeAction::CollapseAll => self.expanded.clear(),
            ui::item_tree::TreeAction::None => {}
        }
        if let Some(id) = chart.select {
            self.selected = Some(id);
        } else if chart.clear_selection {
            self.selected = None;
        }
        if let Some(id) = chart.toggle {
            self.toggle_expanded(&id);
        }

        // Dialogs
        if self.show_about {
            ui::dialogs::show_about_dialog(self, ctx);
        }
        if self.show_csv_help {
            ui::dialogs::show_csv_help_dialog(self, ctx);
        }
    }
}
