//! The analysis workflow: file selection, output format, the in-flight
//! request and the current result.
//!
//! State is published through a [`watch`] channel so views can subscribe and
//! recompute their projections when it changes. Only the session mutates it.
//!
//! Requests are tagged with a [`RequestTicket`] when they are issued. A
//! completion is applied only if its ticket carries the latest generation and
//! the file and format it was issued for are still the selected ones; every
//! other completion is dropped without touching the result.
//!
//! Changing the file or format ends the loading state at once. The request
//! still in flight is orphaned and its completion is discarded.

use tokio::sync::watch;
use tracing::{
    debug,
    error,
    info,
};

use crate::core::{
    codec::{
        self,
        ExportPayload,
    },
    errors::ErrorKind,
    http::AnalysisClient,
    models::{
        AnalysisResult,
        CanonicalResult,
        FileHandle,
        OutputFormat,
        RawResponse,
    },
    notifications::NotificationCenter,
    AnalyzerError,
};

pub const NO_FILE_LABEL: &str = "No file chosen";
pub const ANALYSIS_FAILED_MESSAGE: &str = "An error occurred during analysis.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    /// Unique per selection, so picking the same path again is a new context.
    pub id: u64,
    pub handle: FileHandle,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    pub selected_file: Option<SelectedFile>,
    pub file_name: String,
    pub output_format: OutputFormat,
    pub is_loading: bool,
    pub result: Option<AnalysisResult>,
}

impl SessionState {
    fn new(output_format: OutputFormat) -> Self {
        Self {
            selected_file: None,
            file_name: NO_FILE_LABEL.to_string(),
            output_format,
            is_loading: false,
            result: None,
        }
    }

    pub fn has_file(&self) -> bool {
        self.selected_file.is_some()
    }

    pub fn canonical(&self) -> Option<&CanonicalResult> {
        self.result.as_ref().map(|result| &result.canonical)
    }

    fn matches(&self, ticket: &RequestTicket) -> bool {
        self.output_format == ticket.format
            && self.selected_file.as_ref().is_some_and(|file| file.id == ticket.file_id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket {
    pub generation: u64,
    pub file_id: u64,
    pub format: OutputFormat,
}

/// An issued request, carrying everything needed to run it off the session.
#[derive(Debug, Clone)]
pub struct PendingAnalysis {
    pub ticket: RequestTicket,
    pub file: FileHandle,
}

impl PendingAnalysis {
    pub async fn fetch(&self, client: &dyn AnalysisClient) -> Result<RawResponse, AnalyzerError> {
        let text = self.file.read_text().await?;
        let body = client.analyze(&text, self.ticket.format).await?;
        codec::parse_body(self.ticket.format, body)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscardReason {
    /// A newer `analyze` was issued after this one.
    Superseded,
    /// The file or output format changed while the request was in flight.
    ContextChanged,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Applied,
    Failed(ErrorKind),
    Discarded(DiscardReason),
}

pub struct AnalysisSession {
    state: watch::Sender<SessionState>,
    notifications: NotificationCenter,
    generation: u64,
    next_file_id: u64,
}

impl AnalysisSession {
    pub fn new(output_format: OutputFormat) -> Self {
        let (state, _) = watch::channel(SessionState::new(output_format));
        Self { state, notifications: NotificationCenter::new(), generation: 0, next_file_id: 0 }
    }

    pub fn state(&self) -> watch::Ref<'_, SessionState> {
        self.state.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    pub fn notifications(&self) -> &NotificationCenter {
        &self.notifications
    }

    pub fn notifications_mut(&mut self) -> &mut NotificationCenter {
        &mut self.notifications
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().is_loading
    }

    /// An absent or empty handle resets to the "no file" state.
    pub fn select_file(&mut self, handle: Option<FileHandle>) {
        let Some(handle) = handle.filter(|handle| !handle.is_empty()) else {
            self.clear_file();
            return;
        };

        self.next_file_id += 1;
        let id = self.next_file_id;
        info!(file = %handle.name, "File selected");

        self.state.send_modify(|state| {
            state.file_name = handle.name.clone();
            state.selected_file = Some(SelectedFile { id, handle });
            state.result = None;
            state.is_loading = false;
        });
    }

    pub fn clear_file(&mut self) {
        self.state.send_modify(|state| {
            state.selected_file = None;
            state.file_name = NO_FILE_LABEL.to_string();
            state.result = None;
            state.is_loading = false;
        });
    }

    /// Switching format drops the result; re-selecting the current one is a no-op.
    pub fn set_output_format(&mut self, format: OutputFormat) {
        self.state.send_if_modified(|state| {
            if state.output_format == format {
                return false;
            }
            state.output_format = format;
            state.result = None;
            state.is_loading = false;
            true
        });
    }

    /// Issues a request for the selected file and format, superseding any
    /// request still in flight. Returns `None` when no file is selected.
    pub fn begin_analysis(&mut self) -> Option<PendingAnalysis> {
        let (file, format) = {
            let state = self.state.borrow();
            (state.selected_file.clone()?, state.output_format)
        };

        self.generation += 1;
        let ticket = RequestTicket { generation: self.generation, file_id: file.id, format };
        debug!(
            generation = ticket.generation,
            file = %file.handle.name,
            %format,
            "Analysis started"
        );

        self.state.send_modify(|state| state.is_loading = true);
        Some(PendingAnalysis { ticket, file: file.handle })
    }

    pub fn complete(
        &mut self,
        ticket: RequestTicket,
        outcome: Result<RawResponse, AnalyzerError>,
    ) -> Completion {
        if ticket.generation != self.generation {
            debug!(
                generation = ticket.generation,
                latest = self.generation,
                "Superseded response discarded"
            );
            return Completion::Discarded(DiscardReason::Superseded);
        }

        let still_current = self.state.borrow().matches(&ticket);
        if !still_current {
            debug!(generation = ticket.generation, "Stale response discarded");
            self.state.send_modify(|state| state.is_loading = false);
            return Completion::Discarded(DiscardReason::ContextChanged);
        }

        let decoded = outcome.and_then(|raw| {
            let canonical = codec::decode(&raw, ticket.format)?;
            Ok(AnalysisResult { canonical, raw })
        });

        match decoded {
            Ok(result) => {
                info!(
                    slow_bike_count = result.canonical.slow_bike_count,
                    consonants = result.canonical.consonant_counts.len(),
                    "Analysis complete"
                );
                self.state.send_modify(|state| {
                    state.result = Some(result);
                    state.is_loading = false;
                });
                Completion::Applied
            }
            Err(e) => {
                error!(error = %e, "Error during text analysis");
                self.notifications.show(ANALYSIS_FAILED_MESSAGE);
                self.state.send_modify(|state| state.is_loading = false);
                Completion::Failed(e.kind())
            }
        }
    }

    /// Runs a whole request inline. `None` when no file is selected.
    pub async fn analyze(&mut self, client: &dyn AnalysisClient) -> Option<Completion> {
        let pending = self.begin_analysis()?;
        let outcome = pending.fetch(client).await;
        Some(self.complete(pending.ticket, outcome))
    }

    /// Export of the current result in the current format, `None` without a result.
    pub fn download(&self) -> Result<Option<ExportPayload>, AnalyzerError> {
        let state = self.state.borrow();
        match &state.result {
            Some(result) => codec::encode(result, state.output_format).map(Some),
            None => Ok(None),
        }
    }
}
