//! # Mutation Queue
//!
//! Serializes reorder writes issued by the checklist editor. Drag-and-drop
//! produces bursts of edits; only the latest pending order per section
//! matters, and writes for one section must not interleave.
//!
//! ```text
//! add_reorder ──► pending (VecDeque) ──► worker task ──► ApiService::update_*
//!                      ▲                      │
//!                      └── retry (front) ◄────┤ failure, retries left
//!                                             ├──► watch<QueueStatus>
//!                                             └──► async_channel<QueueEvent>
//! ```
//!
//! - A new operation replaces a *pending* one with the same target. The
//!   operation already running is never replaced.
//! - One operation runs at a time; its PATCHes run concurrently.
//! - A failed operation goes back to the front of the queue until it has
//!   been retried `max_retries` times, then it is counted as failed.
//!
//! Event receivers compete for events; the buffer is bounded and events are
//! dropped when nobody drains it.

use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use futures::future::try_join_all;
use parking_lot::Mutex;
use shared::{ChecklistItem, ChecklistSection, UpdateItemRequest, UpdateSectionRequest};
use tokio::sync::{watch, Notify};
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::checklist::reorder::{self, Ordered};
use crate::config::ClientConfig;
use crate::core::error::ApiError;
use crate::core::service::ApiService;
use crate::services::api::RetryPolicy;

const EVENT_BUFFER: usize = 256;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OperationId(String);

impl OperationId {
    fn new(target: ReorderTarget) -> Self {
        let scope = match target {
            ReorderTarget::Items { section_id } => format!("items_{section_id}"),
            ReorderTarget::Sections { listing_type_id } => {
                format!("sections_{}", listing_type_id.map_or_else(|| "all".to_string(), |id| id.to_string()))
            }
        };
        Self(format!("reorder_{scope}_{}", Uuid::new_v4().simple()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OperationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What a reorder operation rewrites. Pending operations with the same
/// target replace each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReorderTarget {
    /// Items inside one section
    Items { section_id: i64 },
    /// Sections of one listing type (`None` for the unfiltered list)
    Sections { listing_type_id: Option<i64> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationSummary {
    pub id: OperationId,
    pub target: ReorderTarget,
    /// Number of `sort_order` writes
    pub changes: usize,
    pub retry_count: u32,
}

#[derive(Debug, Clone)]
struct Operation {
    id: OperationId,
    target: ReorderTarget,
    /// `(id, new sort_order)`
    orders: Vec<(i64, i64)>,
    retry_count: u32,
    generation: u64,
}

impl Operation {
    fn summary(&self) -> OperationSummary {
        OperationSummary {
            id: self.id.clone(),
            target: self.target,
            changes: self.orders.len(),
            retry_count: self.retry_count,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueueStatus {
    pub is_processing: bool,
    pub is_paused: bool,
    pub queue_length: usize,
    pub current_operation: Option<OperationSummary>,
    pub completed_count: u64,
    pub failed_count: u64,
}

impl QueueStatus {
    /// Nothing running and nothing the worker will pick up.
    pub fn is_idle(&self) -> bool {
        !self.is_processing && (self.queue_length == 0 || self.is_paused)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum QueueEvent {
    Started(OperationSummary),
    Succeeded(OperationSummary),
    /// Put back at the front of the queue
    Retrying { operation: OperationSummary, error: ApiError },
    /// Out of retries
    Failed { operation: OperationSummary, error: ApiError },
    /// Failed while a newer order for the same target was queued; not retried
    Superseded(OperationSummary),
    /// The queue ran empty after processing
    Drained(QueueStatus),
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct QueueStatistics {
    pub total_processed: u64,
    /// Completed share of processed operations, `0.0..=1.0`
    pub success_rate: f64,
    /// Retries spent per completed or dropped operation; pending operations
    /// are not counted
    pub average_retries: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueueConfig {
    pub max_retries: u32,
    /// Delay before the first retry; doubles with each further retry
    pub retry_delay: Duration,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            retry_delay: Duration::from_millis(500),
        }
    }
}

impl From<&ClientConfig> for QueueConfig {
    fn from(config: &ClientConfig) -> Self {
        Self {
            max_retries: config.queue_max_retries,
            ..Default::default()
        }
    }
}

#[derive(Default)]
struct QueueState {
    pending: VecDeque<Operation>,
    current: Option<OperationSummary>,
    processing: bool,
    paused: bool,
    closed: bool,
    completed: u64,
    failed: u64,
    retries_of_processed: u64,
    generation: u64,
}

impl QueueState {
    fn snapshot(&self) -> QueueStatus {
        QueueStatus {
            is_processing: self.processing,
            is_paused: self.paused,
            queue_length: self.pending.len(),
            current_operation: self.current.clone(),
            completed_count: self.completed,
            failed_count: self.failed,
        }
    }
}

struct QueueInner {
    api: Arc<dyn ApiService>,
    config: QueueConfig,
    state: Mutex<QueueState>,
    wake: Notify,
    status: watch::Sender<QueueStatus>,
    events_tx: async_channel::Sender<QueueEvent>,
    events_rx: async_channel::Receiver<QueueEvent>,
}

impl QueueInner {
    fn publish(&self) {
        let snapshot = self.state.lock().snapshot();
        self.status.send_replace(snapshot);
    }

    fn emit(&self, event: QueueEvent) {
        if let Err(e) = self.events_tx.try_send(event) {
            tracing::trace!(error = %e, "Queue event dropped");
        }
    }
}

/// Handle to the queue and its worker task. Dropping it stops the worker
/// after the running operation.
pub struct MutationQueue {
    inner: Arc<QueueInner>,
    worker: Option<JoinHandle<()>>,
}

impl fmt::Debug for MutationQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MutationQueue")
            .field("config", &self.inner.config)
            .field("status", &self.status())
            .finish()
    }
}

impl MutationQueue {
    /// Spawn the worker on the current tokio runtime.
    pub fn new(api: Arc<dyn ApiService>, config: QueueConfig) -> Self {
        let (status, _) = watch::channel(QueueStatus::default());
        let (events_tx, events_rx) = async_channel::bounded(EVENT_BUFFER);
        let inner = Arc::new(QueueInner {
            api,
            config,
            state: Mutex::new(QueueState::default()),
            wake: Notify::new(),
            status,
            events_tx,
            events_rx,
        });
        let worker = tokio::spawn(run_worker(inner.clone()));
        Self {
            inner,
            worker: Some(worker),
        }
    }

    /// Queue the item order of one section.
    ///
    /// With `original`, only items whose `sort_order` differs from it are
    /// written. An empty change set queues nothing; the returned id is still
    /// unique.
    pub fn add_reorder(
        &self,
        section_id: i64,
        items: &[ChecklistItem],
        original: Option<&[ChecklistItem]>,
    ) -> OperationId {
        self.enqueue(ReorderTarget::Items { section_id }, order_changes(items, original))
    }

    /// Queue the order of the sections shown for one listing type.
    pub fn add_section_reorder(
        &self,
        listing_type_id: Option<i64>,
        sections: &[ChecklistSection],
        original: Option<&[ChecklistSection]>,
    ) -> OperationId {
        self.enqueue(ReorderTarget::Sections { listing_type_id }, order_changes(sections, original))
    }

    /// [`add_reorder`](Self::add_reorder) for several sections, in order.
    pub fn add_batch<'a, I>(&self, batch: I) -> Vec<OperationId>
    where
        I: IntoIterator<Item = (i64, &'a [ChecklistItem], Option<&'a [ChecklistItem]>)>,
    {
        batch
            .into_iter()
            .map(|(section_id, items, original)| self.add_reorder(section_id, items, original))
            .collect()
    }

    fn enqueue(&self, target: ReorderTarget, orders: Vec<(i64, i64)>) -> OperationId {
        let id = OperationId::new(target);
        if orders.is_empty() {
            tracing::debug!(?target, "No order changes, nothing queued");
            return id;
        }

        {
            let mut state = self.inner.state.lock();
            let before = state.pending.len();
            state.pending.retain(|op| op.target != target);
            if state.pending.len() != before {
                tracing::debug!(?target, "Replaced pending reorder");
            }
            let generation = state.generation;
            state.pending.push_back(Operation {
                id: id.clone(),
                target,
                orders,
                retry_count: 0,
                generation,
            });
        }
        tracing::debug!(operation = %id, "Reorder queued");
        self.inner.publish();
        self.inner.wake.notify_one();
        id
    }

    /// Stop picking up operations. The running one finishes.
    pub fn pause(&self) {
        self.inner.state.lock().paused = true;
        self.inner.publish();
    }

    pub fn resume(&self) {
        self.inner.state.lock().paused = false;
        self.inner.publish();
        self.inner.wake.notify_one();
    }

    /// Drop every pending operation and reset the counters. A running
    /// operation finishes but is not retried.
    pub fn clear(&self) {
        {
            let mut state = self.inner.state.lock();
            state.pending.clear();
            state.completed = 0;
            state.failed = 0;
            state.retries_of_processed = 0;
            state.generation += 1;
        }
        self.inner.publish();
    }

    /// Remove a pending operation. Returns false when it is not pending.
    pub fn remove_operation(&self, id: &OperationId) -> bool {
        let removed = {
            let mut state = self.inner.state.lock();
            let before = state.pending.len();
            state.pending.retain(|op| &op.id != id);
            state.pending.len() != before
        };
        if removed {
            self.inner.publish();
        }
        removed
    }

    pub fn status(&self) -> QueueStatus {
        self.inner.status.borrow().clone()
    }

    pub fn watch_status(&self) -> watch::Receiver<QueueStatus> {
        self.inner.status.subscribe()
    }

    pub fn events(&self) -> async_channel::Receiver<QueueEvent> {
        self.inner.events_rx.clone()
    }

    /// Next operation the worker will pick up.
    pub fn next_operation(&self) -> Option<OperationSummary> {
        self.inner.state.lock().pending.front().map(Operation::summary)
    }

    pub fn statistics(&self) -> QueueStatistics {
        let state = self.inner.state.lock();
        let total = state.completed + state.failed;
        if total == 0 {
            return QueueStatistics::default();
        }
        QueueStatistics {
            total_processed: total,
            success_rate: state.completed as f64 / total as f64,
            average_retries: state.retries_of_processed as f64 / total as f64,
        }
    }

    /// Wait until nothing is running and nothing runnable is pending.
    pub async fn wait_idle(&self) {
        let mut status = self.watch_status();
        // Errors only once the sender is gone, and `inner` owns it.
        let _ = status.wait_for(QueueStatus::is_idle).await;
    }

    /// Stop the worker once the running operation is done and wait for it.
    /// Pending operations are abandoned.
    pub async fn shutdown(mut self) {
        self.close();
        if let Some(worker) = self.worker.take() {
            if let Err(e) = worker.await {
                tracing::warn!(error = %e, "Mutation queue worker panicked");
            }
        }
    }

    fn close(&self) {
        self.inner.state.lock().closed = true;
        self.inner.wake.notify_one();
    }
}

impl Drop for MutationQueue {
    fn drop(&mut self) {
        self.close();
    }
}

/// `(id, sort_order)` pairs to write.
fn order_changes<T: Ordered>(updated: &[T], original: Option<&[T]>) -> Vec<(i64, i64)> {
    let entries: Vec<&T> = match original {
        Some(original) => reorder::changed(updated, original),
        None => updated.iter().collect(),
    };
    entries.into_iter().map(|e| (e.key(), e.sort_order())).collect()
}

enum Next {
    Run(Operation),
    Wait { drained: bool },
    Stop,
}

async fn run_worker(inner: Arc<QueueInner>) {
    tracing::debug!("Mutation queue worker started");
    loop {
        let next = {
            let mut state = inner.state.lock();
            if state.closed {
                Next::Stop
            } else if state.paused {
                state.processing = false;
                Next::Wait { drained: false }
            } else if let Some(op) = state.pending.pop_front() {
                state.processing = true;
                state.current = Some(op.summary());
                Next::Run(op)
            } else {
                let drained = state.processing;
                state.processing = false;
                Next::Wait { drained }
            }
        };
        inner.publish();

        match next {
            Next::Stop => break,
            Next::Wait { drained } => {
                if drained {
                    tracing::debug!("Mutation queue drained");
                    inner.emit(QueueEvent::Drained(inner.status.borrow().clone()));
                }
                inner.wake.notified().await;
            }
            Next::Run(op) => process(&inner, op).await,
        }
    }
    tracing::debug!("Mutation queue worker stopped");
}

async fn execute(api: &dyn ApiService, op: &Operation) -> Result<(), ApiError> {
    match op.target {
        ReorderTarget::Items { .. } => {
            try_join_all(
                op.orders
                    .iter()
                    .map(|&(id, order)| api.update_item(id, UpdateItemRequest::sort_order(order))),
            )
            .await?;
        }
        ReorderTarget::Sections { .. } => {
            try_join_all(
                op.orders
                    .iter()
                    .map(|&(id, order)| api.update_section(id, UpdateSectionRequest::sort_order(order))),
            )
            .await?;
        }
    }
    Ok(())
}

#[tracing::instrument(skip(inner, op), fields(operation = %op.id, changes = op.orders.len(), retry = op.retry_count))]
async fn process(inner: &QueueInner, mut op: Operation) {
    inner.emit(QueueEvent::Started(op.summary()));

    let result = execute(inner.api.as_ref(), &op).await;

    let mut retry_delay = None;
    let event = {
        let mut state = inner.state.lock();
        state.current = None;
        let current_generation = op.generation == state.generation;
        match result {
            Ok(()) => {
                if current_generation {
                    state.completed += 1;
                    state.retries_of_processed += u64::from(op.retry_count);
                }
                tracing::info!("Reorder applied");
                QueueEvent::Succeeded(op.summary())
            }
            Err(error) if state.pending.iter().any(|pending| pending.target == op.target) => {
                tracing::debug!(error = %error, "Reorder failed, newer order pending");
                QueueEvent::Superseded(op.summary())
            }
            Err(error) if op.retry_count < inner.config.max_retries && current_generation => {
                op.retry_count += 1;
                tracing::warn!(error = %error, attempt = op.retry_count, "Reorder failed, retrying");
                retry_delay = Some(RetryPolicy {
                    max_attempts: inner.config.max_retries + 1,
                    base_delay: inner.config.retry_delay,
                }
                .delay_after(op.retry_count));
                let summary = op.summary();
                state.pending.push_front(op);
                QueueEvent::Retrying {
                    operation: summary,
                    error,
                }
            }
            Err(error) => {
                if current_generation {
                    state.failed += 1;
                    state.retries_of_processed += u64::from(op.retry_count);
                }
                tracing::error!(error = %error, "Reorder failed");
                QueueEvent::Failed {
                    operation: op.summary(),
                    error,
                }
            }
        }
    };
    inner.publish();
    inner.emit(event);

    if let Some(delay) = retry_delay {
        tokio::time::sleep(delay).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: i64, sort_order: i64) -> ChecklistItem {
        ChecklistItem {
            id,
            sort_order,
            ..Default::default()
        }
    }

    #[test]
    fn test_order_changes_diffs_against_original() {
        let original = vec![item(1, 1), item(2, 2), item(3, 3)];
        let mut updated = original.clone();
        reorder::swap(&mut updated, 0, 2);

        assert_eq!(order_changes(&updated, Some(original.as_slice())), vec![(3, 1), (1, 3)]);
        assert!(order_changes(&original, Some(original.as_slice())).is_empty());
        assert_eq!(order_changes(&original, None).len(), 3);
    }

    #[test]
    fn test_idle_status() {
        let mut status = QueueStatus::default();
        assert!(status.is_idle());
        status.queue_length = 2;
        assert!(!status.is_idle());
        status.is_paused = true;
        assert!(status.is_idle());
        status.is_processing = true;
        assert!(!status.is_idle());
    }

    #[test]
    fn test_operation_ids_are_unique_and_scoped() {
        let target = ReorderTarget::Items { section_id: 7 };
        let a = OperationId::new(target);
        let b = OperationId::new(target);
        assert_ne!(a, b);
        assert!(a.as_str().starts_with("reorder_items_7_"));
        assert!(OperationId::new(ReorderTarget::Sections { listing_type_id: None })
            .as_str()
            .starts_with("reorder_sections_all_"));
    }
}
