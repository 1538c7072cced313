use std::{
    mem,
    path::PathBuf,
    sync::Arc,
    time::{
        Duration,
        Instant,
    },
};

use eframe::egui;
use rfd::FileDialog;
use tracing::{
    info,
    warn,
};

use super::{
    actions::{
        ActionQueue,
        UiAction,
    },
    controls::ControlsWidget,
    results_table::ResultsTableWidget,
    toast::Toast,
    top_bar::TopBar,
};
use crate::{
    core::{
        http::AnalysisClient,
        metrics::MetricsView,
        tasks::{
            TaskManager,
            TaskResult,
        },
        AnalysisSession,
        AnalyzerError,
        FileHandle,
    },
    settings::SettingsData,
};

const EXPORT_FAILED_MESSAGE: &str = "Unable to export the results.";
const TEXT_EXTENSIONS: [&str; 2] = ["txt", "text"];
const LOADING_REPAINT_INTERVAL: Duration = Duration::from_millis(100);

pub struct AnalyzerApp {
    session: AnalysisSession,
    metrics: MetricsView,
    actions: ActionQueue,

    // External Services
    client: Arc<dyn AnalysisClient>,
    task_manager: TaskManager,
}

impl AnalyzerApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        settings: SettingsData,
    ) -> Result<Self, AnalyzerError> {
        let client = settings.service.client()?;
        info!(endpoint = client.endpoint(), "Using analysis service");

        Self::with_client(settings, Arc::new(client))
    }

    pub fn with_client(
        settings: SettingsData,
        client: Arc<dyn AnalysisClient>,
    ) -> Result<Self, AnalyzerError> {
        let session = AnalysisSession::new(settings.default_output_format);
        let metrics = MetricsView::new(session.subscribe());

        Ok(Self {
            session,
            metrics,
            actions: ActionQueue::new(),
            client,
            task_manager: TaskManager::new()?,
        })
    }

    fn handle_action(&mut self, action: UiAction, ctx: &egui::Context) {
        match action {
            UiAction::ChooseFile => {
                let picked =
                    FileDialog::new().add_filter("Text files", &TEXT_EXTENSIONS).pick_file();
                self.apply_file_choice(picked);
            }
            UiAction::SelectFile(handle) => self.session.select_file(handle),
            UiAction::ClearFile => self.session.clear_file(),
            UiAction::SetOutputFormat(format) => self.session.set_output_format(format),
            UiAction::Analyze => {
                if let Some(pending) = self.session.begin_analysis() {
                    self.task_manager.analyze(pending, Arc::clone(&self.client));
                }
            }
            UiAction::Download => self.download(),
            UiAction::DismissNotification => self.session.notifications_mut().hide(),
            UiAction::Quit => ctx.send_viewport_cmd(egui::ViewportCommand::Close),
        }
    }

    /// A cancelled dialog resets to "no file" like an empty selection.
    fn apply_file_choice(&mut self, picked: Option<PathBuf>) {
        self.session.select_file(picked.map(FileHandle::from_path));
    }

    fn download(&mut self) {
        let payload = match self.session.download() {
            Ok(Some(payload)) => payload,
            Ok(None) => return,
            Err(e) => {
                warn!(error = %e, "Export failed");
                self.session.notifications_mut().show(EXPORT_FAILED_MESSAGE);
                return;
            }
        };

        let extension = self.session.state().output_format.extension();
        if let Some(path) = FileDialog::new()
            .set_file_name(&payload.file_name)
            .add_filter(payload.mime_type, &[extension])
            .save_file()
        {
            self.task_manager.save_export(payload, path);
        }
    }

    fn handle_task_result(&mut self, result: TaskResult) {
        match result {
            TaskResult::Analysis { ticket, outcome } => {
                self.session.complete(ticket, outcome);
            }
            TaskResult::ExportSaved(result) => match result {
                Ok(path) => info!("Results saved to: {}", path.display()),
                Err(e) => {
                    warn!("{}", e);
                    self.session.notifications_mut().show(EXPORT_FAILED_MESSAGE);
                }
            },
        }
    }

    fn handle_file_drops(&mut self, ctx: &egui::Context) {
        let dropped = ctx.input_mut(|i| mem::take(&mut i.raw.dropped_files));
        let Some(file) = dropped.into_iter().next() else {
            return;
        };

        let handle = match (file.path, file.bytes) {
            (Some(path), _) => Some(FileHandle::from_path(path)),
            (None, Some(bytes)) => Some(FileHandle::from_bytes(file.name, bytes)),
            (None, None) => None,
        };
        self.actions.push(UiAction::SelectFile(handle));
    }

    fn schedule_repaint(&self, ctx: &egui::Context) {
        if self.session.is_loading() {
            ctx.request_repaint_after(LOADING_REPAINT_INTERVAL);
        }
        if let Some(remaining) = self.session.notifications().remaining_at(Instant::now()) {
            ctx.request_repaint_after(remaining);
        }
    }
}

impl eframe::App for AnalyzerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        for result in self.task_manager.poll_results() {
            self.handle_task_result(result);
        }

        self.session.notifications_mut().tick();
        self.handle_file_drops(ctx);
        self.metrics.refresh();

        {
            let state = self.session.state();

            TopBar::show(ctx, &state, &mut self.actions);

            egui::CentralPanel::default().show(ctx, |ui| {
                ui.heading("Text Analysis");
                ui.add_space(8.0);
                ControlsWidget::show(ui, &state, &mut self.actions);

                if state.result.is_some() {
                    ui.separator();
                    ResultsTableWidget::show(ui, &self.metrics);
                }
            });
        }

        Toast::show(ctx, self.session.notifications(), &mut self.actions);

        let actions: Vec<UiAction> = self.actions.drain().collect();
        for action in actions {
            self.handle_action(action, ctx);
        }

        self.schedule_repaint(ctx);
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::core::{
        session::NO_FILE_LABEL,
        OutputFormat,
    };

    struct UnusedClient;

    #[async_trait]
    impl AnalysisClient for UnusedClient {
        async fn analyze(
            &self,
            _text: &str,
            _format: OutputFormat,
        ) -> Result<String, AnalyzerError> {
            Err(AnalyzerError::Custom("not expected in this test".to_string()))
        }
    }

    fn test_app() -> AnalyzerApp {
        AnalyzerApp::with_client(SettingsData::default(), Arc::new(UnusedClient)).unwrap()
    }

    #[test]
    fn test_cancelled_file_choice_resets_selection() {
        let mut app = test_app();

        app.apply_file_choice(Some(PathBuf::from("/tmp/fox.txt")));
        assert_eq!(app.session.state().file_name, "fox.txt");

        app.apply_file_choice(None);
        let state = app.session.state();
        assert!(!state.has_file());
        assert_eq!(state.file_name, NO_FILE_LABEL);
    }

    #[test]
    fn test_format_change_reenables_analyze_while_request_is_out() {
        let mut app = test_app();
        app.apply_file_choice(Some(PathBuf::from("/tmp/fox.txt")));

        let pending = app.session.begin_analysis();
        assert!(pending.is_some());
        assert!(app.session.is_loading());

        app.handle_action(UiAction::SetOutputFormat(OutputFormat::Xml), &egui::Context::default());
        let state = app.session.state();
        assert!(state.has_file() && !state.is_loading);
    }
}
