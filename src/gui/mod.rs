pub mod actions;
pub mod app;
pub mod controls;
pub mod results_table;
pub mod toast;
pub mod top_bar;

pub use app::AnalyzerApp;
