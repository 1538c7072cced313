use std::{
    path::PathBuf,
    sync::{
        mpsc,
        Arc,
    },
};

use tokio::runtime::Runtime;
use tracing::debug;

use super::TaskResult;
use crate::core::{
    codec::ExportPayload,
    http::AnalysisClient,
    session::PendingAnalysis,
    AnalyzerError,
};

/// Runs network and disk work off the UI thread. Results are queued and
/// picked up with [`TaskManager::poll_results`] on the next frame.
pub struct TaskManager {
    runtime: Arc<Runtime>,
    receiver: mpsc::Receiver<TaskResult>,
    sender: mpsc::Sender<TaskResult>,
}

impl TaskManager {
    pub fn new() -> Result<Self, AnalyzerError> {
        let runtime = Arc::new(Runtime::new()?);

        let (sender, receiver) = mpsc::channel();

        Ok(Self { runtime, receiver, sender })
    }

    pub fn poll_results(&mut self) -> Vec<TaskResult> {
        let mut results = Vec::new();

        while let Ok(result) = self.receiver.try_recv() {
            debug!(task = result.task_type(), "Task finished");
            results.push(result);
        }

        results
    }

    fn task_context(&self) -> (mpsc::Sender<TaskResult>, Arc<Runtime>) {
        (self.sender.clone(), self.runtime.clone())
    }

    pub fn analyze(&self, pending: PendingAnalysis, client: Arc<dyn AnalysisClient>) {
        let (sender, runtime) = self.task_context();

        runtime.spawn(async move {
            let outcome = pending.fetch(client.as_ref()).await;
            let _ = sender.send(TaskResult::Analysis { ticket: pending.ticket, outcome });
        });
    }

    pub fn save_export(&self, payload: ExportPayload, path: PathBuf) {
        let (sender, runtime) = self.task_context();

        runtime.spawn(async move {
            let result = tokio::fs::write(&path, &payload.bytes)
                .await
                .map(|_| path.clone())
                .map_err(|e| format!("Failed to write {}: {}", path.display(), e));

            let _ = sender.send(TaskResult::ExportSaved(result));
        });
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use async_trait::async_trait;

    use super::*;
    use crate::core::{
        models::{
            FileHandle,
            OutputFormat,
            RawResponse,
        },
        session::AnalysisSession,
    };

    struct EchoXmlClient;

    #[async_trait]
    impl AnalysisClient for EchoXmlClient {
        async fn analyze(
            &self,
            text: &str,
            _format: OutputFormat,
        ) -> Result<String, AnalyzerError> {
            Ok(format!("<r><slowBikeCount>{}</slowBikeCount></r>", text.len()))
        }
    }

    fn wait_for_results(manager: &mut TaskManager) -> Vec<TaskResult> {
        for _ in 0..200 {
            let results = manager.poll_results();
            if !results.is_empty() {
                return results;
            }
            std::thread::sleep(Duration::from_millis(10));
        }
        panic!("task did not finish");
    }

    #[test]
    fn test_analysis_result_is_delivered_with_ticket() {
        let mut manager = TaskManager::new().unwrap();
        let mut session = AnalysisSession::new(OutputFormat::Xml);
        session.select_file(Some(FileHandle::from_bytes("four.txt", b"four".to_vec())));

        let pending = session.begin_analysis().unwrap();
        let ticket = pending.ticket;
        manager.analyze(pending, Arc::new(EchoXmlClient));

        let mut results = wait_for_results(&mut manager);
        let Some(TaskResult::Analysis { ticket: delivered, outcome }) = results.pop() else {
            panic!("expected an analysis result");
        };
        assert_eq!(delivered, ticket);
        assert_eq!(
            outcome.unwrap(),
            RawResponse::Xml("<r><slowBikeCount>4</slowBikeCount></r>".to_string())
        );
    }

    #[test]
    fn test_save_export_writes_bytes() {
        let mut manager = TaskManager::new().unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("analysis-results.json");
        let payload = ExportPayload {
            file_name: "analysis-results.json".to_string(),
            mime_type: "application/json",
            bytes: b"{}".to_vec(),
        };

        manager.save_export(payload, path.clone());

        let mut results = wait_for_results(&mut manager);
        let Some(TaskResult::ExportSaved(saved)) = results.pop() else {
            panic!("expected an export result");
        };
        assert_eq!(saved.unwrap(), path);
        assert_eq!(std::fs::read(&path).unwrap(), b"{}");
    }
}
