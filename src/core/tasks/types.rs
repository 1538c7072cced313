use std::path::PathBuf;

use crate::core::{
    models::RawResponse,
    session::RequestTicket,
    AnalyzerError,
};

#[derive(Debug)]
pub enum TaskResult {
    Analysis { ticket: RequestTicket, outcome: Result<RawResponse, AnalyzerError> },
    ExportSaved(Result<PathBuf, String>),
}

impl TaskResult {
    pub fn task_type(&self) -> &'static str {
        match self {
            TaskResult::Analysis { .. } => "analysis",
            TaskResult::ExportSaved(_) => "export_saved",
        }
    }
}
