//! # Draft Autosave
//!
//! Debounced saving of one report draft. Each edit restarts the delay; when
//! it expires the latest schema is posted. A manual save cancels the pending
//! autosave and posts immediately.
//!
//! All saves run on one worker task, so they reach the server in the order
//! they were issued. Dropping the handle saves any pending edit, then stops
//! the worker.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use shared::{is_valid_report_id, ChecklistSchema, Report};
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::{sleep, Instant};

use crate::core::error::{ApiError, AppError, Result};
use crate::core::service::ApiService;

#[derive(Debug, Clone, Default, PartialEq)]
pub enum AutosaveStatus {
    #[default]
    Idle,
    /// An edit is waiting for the delay to pass
    Pending,
    Saving,
    Saved(Box<Report>),
    Failed(ApiError),
}

impl AutosaveStatus {
    pub fn is_busy(&self) -> bool {
        matches!(self, AutosaveStatus::Pending | AutosaveStatus::Saving)
    }
}

enum Command {
    Edit(ChecklistSchema),
    SaveNow(ChecklistSchema, oneshot::Sender<std::result::Result<Report, ApiError>>),
    Flush(oneshot::Sender<Option<std::result::Result<Report, ApiError>>>),
}

pub struct DraftAutosaver {
    report_id: String,
    commands: mpsc::UnboundedSender<Command>,
    status: watch::Receiver<AutosaveStatus>,
    worker: Option<JoinHandle<()>>,
}

impl fmt::Debug for DraftAutosaver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DraftAutosaver")
            .field("report_id", &self.report_id)
            .field("status", &*self.status.borrow())
            .finish()
    }
}

impl DraftAutosaver {
    /// Spawn the worker on the current tokio runtime.
    pub fn new(api: Arc<dyn ApiService>, report_id: impl Into<String>, delay: Duration) -> Result<Self> {
        let report_id = report_id.into();
        if !is_valid_report_id(&report_id) {
            return Err(AppError::Validation(format!("invalid report id: {report_id:?}")));
        }

        let (commands, rx) = mpsc::unbounded_channel();
        let (status_tx, status) = watch::channel(AutosaveStatus::Idle);
        let worker = Worker {
            api,
            report_id: report_id.clone(),
            delay,
            status: status_tx,
        };
        let worker = tokio::spawn(worker.run(rx));

        Ok(Self {
            report_id,
            commands,
            status,
            worker: Some(worker),
        })
    }

    pub fn report_id(&self) -> &str {
        &self.report_id
    }

    /// Record an edit. Restarts the delay.
    pub fn edit(&self, schema: ChecklistSchema) -> Result<()> {
        self.send(Command::Edit(schema))
    }

    /// Save `schema` now, dropping any pending autosave.
    pub async fn save_now(&self, schema: ChecklistSchema) -> Result<Report> {
        let (reply, response) = oneshot::channel();
        self.send(Command::SaveNow(schema, reply))?;
        Ok(response.await.map_err(|_| stopped())??)
    }

    /// Save the pending edit now, if any.
    pub async fn flush(&self) -> Result<Option<Report>> {
        let (reply, response) = oneshot::channel();
        self.send(Command::Flush(reply))?;
        match response.await.map_err(|_| stopped())? {
            Some(result) => Ok(Some(result?)),
            None => Ok(None),
        }
    }

    pub fn status(&self) -> AutosaveStatus {
        self.status.borrow().clone()
    }

    pub fn watch_status(&self) -> watch::Receiver<AutosaveStatus> {
        self.status.clone()
    }

    /// Save the pending edit and stop the worker.
    pub async fn close(mut self) {
        let worker = self.worker.take();
        drop(self);
        if let Some(worker) = worker {
            if let Err(e) = worker.await {
                tracing::warn!(error = %e, "Autosave worker panicked");
            }
        }
    }

    fn send(&self, command: Command) -> Result<()> {
        self.commands.send(command).map_err(|_| stopped())
    }
}

fn stopped() -> AppError {
    AppError::State("autosave worker has stopped".to_string())
}

struct Worker {
    api: Arc<dyn ApiService>,
    report_id: String,
    delay: Duration,
    status: watch::Sender<AutosaveStatus>,
}

impl Worker {
    async fn run(self, mut commands: mpsc::UnboundedReceiver<Command>) {
        tracing::debug!(report_id = %self.report_id, "Autosave worker started");
        let mut pending: Option<ChecklistSchema> = None;
        let timer = sleep(self.delay);
        tokio::pin!(timer);

        loop {
            tokio::select! {
                command = commands.recv() => match command {
                    Some(Command::Edit(schema)) => {
                        pending = Some(schema);
                        timer.as_mut().reset(Instant::now() + self.delay);
                        self.status.send_replace(AutosaveStatus::Pending);
                    }
                    Some(Command::SaveNow(schema, reply)) => {
                        if pending.take().is_some() {
                            tracing::debug!("Pending autosave superseded by manual save");
                        }
                        let result = self.save(schema).await;
                        let _ = reply.send(result);
                    }
                    Some(Command::Flush(reply)) => {
                        let result = match pending.take() {
                            Some(schema) => Some(self.save(schema).await),
                            None => None,
                        };
                        let _ = reply.send(result);
                    }
                    None => {
                        if let Some(schema) = pending.take() {
                            let _ = self.save(schema).await;
                        }
                        break;
                    }
                },
                () = &mut timer, if pending.is_some() => {
                    if let Some(schema) = pending.take() {
                        let _ = self.save(schema).await;
                    }
                }
            }
        }
        tracing::debug!(report_id = %self.report_id, "Autosave worker stopped");
    }

    #[tracing::instrument(skip(self, schema), fields(report_id = %self.report_id))]
    async fn save(&self, schema: ChecklistSchema) -> std::result::Result<Report, ApiError> {
        self.status.send_replace(AutosaveStatus::Saving);
        match self.api.save_draft(&self.report_id, schema).await {
            Ok(report) => {
                tracing::debug!("Draft saved");
                self.status.send_replace(AutosaveStatus::Saved(Box::new(report.clone())));
                Ok(report)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Draft save failed");
                self.status.send_replace(AutosaveStatus::Failed(e.clone()));
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use shared::{ChecklistItem, ChecklistSection, UpdateItemRequest, UpdateSectionRequest};

    const REPORT: &str = "7d7f3c1e-5b1a-4c1e-9a57-3f7f1d2b9a10";

    #[derive(Default)]
    struct RecordingApi {
        saves: Mutex<Vec<String>>,
        fail: Mutex<bool>,
    }

    #[async_trait]
    impl ApiService for RecordingApi {
        async fn update_item(&self, _: i64, _: UpdateItemRequest) -> std::result::Result<ChecklistItem, ApiError> {
            unreachable!()
        }

        async fn update_section(
            &self,
            _: i64,
            _: UpdateSectionRequest,
        ) -> std::result::Result<ChecklistSection, ApiError> {
            unreachable!()
        }

        async fn save_draft(&self, report_id: &str, schema: ChecklistSchema) -> std::result::Result<Report, ApiError> {
            self.saves.lock().push(schema.version.clone());
            if *self.fail.lock() {
                return Err(ApiError::network("offline"));
            }
            Ok(Report {
                id: report_id.to_string(),
                checklist_schema: Some(schema),
                ..Default::default()
            })
        }
    }

    fn version(v: &str) -> ChecklistSchema {
        ChecklistSchema {
            version: v.into(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_rejects_nil_report_id() {
        let api = Arc::new(RecordingApi::default());
        let err = DraftAutosaver::new(api, shared::NIL_REPORT_ID, Duration::from_secs(1)).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_edits_are_coalesced() {
        let api = Arc::new(RecordingApi::default());
        let saver = DraftAutosaver::new(api.clone(), REPORT, Duration::from_millis(1000)).unwrap();

        saver.edit(version("1")).unwrap();
        tokio::time::sleep(Duration::from_millis(400)).await;
        saver.edit(version("2")).unwrap();
        tokio::time::sleep(Duration::from_millis(400)).await;
        saver.edit(version("3")).unwrap();
        tokio::time::sleep(Duration::from_millis(400)).await;
        assert!(api.saves.lock().is_empty());
        assert_eq!(saver.status(), AutosaveStatus::Pending);

        tokio::time::sleep(Duration::from_millis(700)).await;
        assert_eq!(*api.saves.lock(), vec!["3".to_string()]);
        assert!(matches!(saver.status(), AutosaveStatus::Saved(report) if report.id == REPORT));
    }

    #[tokio::test(start_paused = true)]
    async fn test_manual_save_cancels_pending_autosave() {
        let api = Arc::new(RecordingApi::default());
        let saver = DraftAutosaver::new(api.clone(), REPORT, Duration::from_millis(1000)).unwrap();

        saver.edit(version("draft")).unwrap();
        let report = saver.save_now(version("manual")).await.unwrap();
        assert_eq!(report.id, REPORT);

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(*api.saves.lock(), vec!["manual".to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_flush_and_close_save_pending_edit() {
        let api = Arc::new(RecordingApi::default());
        let saver = DraftAutosaver::new(api.clone(), REPORT, Duration::from_secs(30)).unwrap();

        assert_eq!(saver.flush().await.unwrap(), None);
        saver.edit(version("a")).unwrap();
        assert!(saver.flush().await.unwrap().is_some());

        saver.edit(version("b")).unwrap();
        saver.close().await;
        assert_eq!(*api.saves.lock(), vec!["a".to_string(), "b".to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_is_reported_in_status() {
        let api = Arc::new(RecordingApi::default());
        *api.fail.lock() = true;
        let saver = DraftAutosaver::new(api.clone(), REPORT, Duration::from_millis(100)).unwrap();

        let err = saver.save_now(version("x")).await.unwrap_err();
        assert!(matches!(err, AppError::Api(ApiError::Network { .. })));
        assert!(matches!(saver.status(), AutosaveStatus::Failed(_)));
    }
}
