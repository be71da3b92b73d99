pub mod dialogs;
pub mod gantt_chart;
pub mod item_tree;
pub mod theme;
pub mod toolbar;
