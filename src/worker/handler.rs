//! Worker thread implementation for asynchronous store operations.
//!
//! This module implements the Zellij worker thread interface, running all store
//! operations off the main plugin rendering loop. Each operation sleeps for a
//! short artificial latency to exercise the loading states the UI would show
//! against a real backend. It includes distributed tracing support for
//! cross-thread observability.

use crate::domain::error::{Result, StorekeeperError};
use crate::domain::pagination::{page_bounds, Pagination};
use crate::domain::{StoreDraft, StorePatch};
use crate::storage::{MemoryRepository, StoreRepository};
use crate::worker::{WorkerMessage, WorkerResponse};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use zellij_tile::prelude::{PluginMessage, ZellijWorker};
use zellij_tile::shim::post_message_to_plugin;

/// Simulated backend latency for list operations.
const LIST_LATENCY: Duration = Duration::from_millis(500);

/// Simulated backend latency for single-record fetches.
const GET_LATENCY: Duration = Duration::from_millis(300);

/// Simulated backend latency for create and update operations.
const WRITE_LATENCY: Duration = Duration::from_millis(800);

/// Worker thread state for handling store operations.
///
/// This struct runs on a separate thread spawned by Zellij and processes
/// messages sent from the main plugin thread. The repository backend is
/// initialized lazily on first message receipt.
#[derive(Serialize, Deserialize, Default)]
pub struct StorekeeperWorker {
    /// Store repository, initialized lazily on first use.
    #[serde(skip)]
    repository: Option<Box<dyn StoreRepository>>,

    /// Disables the artificial latency. Only set by test constructors.
    #[serde(skip)]
    skip_latency: bool,
}

impl StorekeeperWorker {
    /// Creates a new worker backed by the seeded in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self {
            repository: Some(Box::new(MemoryRepository::seeded())),
            skip_latency: false,
        }
    }

    /// Creates a worker over an arbitrary repository with latency disabled.
    ///
    /// Intended for tests and for embedding the worker logic against a
    /// different backend.
    #[must_use]
    pub fn without_latency(repository: Box<dyn StoreRepository>) -> Self {
        Self {
            repository: Some(repository),
            skip_latency: true,
        }
    }

    /// Returns a mutable reference to the repository, failing if not initialized.
    ///
    /// # Errors
    ///
    /// Returns an error if the repository has not been initialized yet.
    fn get_repository(&mut self) -> Result<&mut Box<dyn StoreRepository>> {
        self.repository
            .as_mut()
            .ok_or_else(|| StorekeeperError::Worker("Repository not initialized".to_string()))
    }

    /// Sleeps for the simulated backend latency unless disabled.
    fn simulate_latency(&self, latency: Duration) {
        if !self.skip_latency {
            std::thread::sleep(latency);
        }
    }

    /// Helper for handling repository operation results with consistent logging.
    ///
    /// This function standardizes error handling and success logging across all
    /// store operations in the worker.
    fn handle_repo_result<T, F>(operation: &str, result: Result<T>, on_success: F) -> WorkerResponse
    where
        F: FnOnce(T) -> WorkerResponse,
    {
        match result {
            Ok(value) => {
                tracing::debug!(operation = operation, "store operation successful");
                on_success(value)
            }
            Err(e) => {
                tracing::debug!(operation = operation, error = %e, "store operation failed");
                WorkerResponse::Error {
                    message: e.to_string(),
                }
            }
        }
    }

    /// Handles the `ListStores` message.
    ///
    /// Filters the repository by the search string, then cuts the requested
    /// page out of the filtered sequence. Pagination is computed over the
    /// filtered total, not the full record count.
    fn handle_list_stores(&mut self, page: usize, search: &str) -> WorkerResponse {
        self.simulate_latency(LIST_LATENCY);

        Self::handle_repo_result(
            "list stores",
            self.get_repository()
                .and_then(|repository| repository.list(search)),
            |filtered| {
                let total = filtered.len();
                let (start, end) = page_bounds(page, total);
                let stores = filtered[start..end].to_vec();

                tracing::debug!(
                    page = page,
                    filtered_total = total,
                    page_len = stores.len(),
                    "stores listed"
                );

                WorkerResponse::StoresLoaded {
                    stores,
                    pagination: Pagination::for_page(page, total),
                }
            },
        )
    }

    /// Handles the `GetStore` message.
    fn handle_get_store(&mut self, id: &str) -> WorkerResponse {
        self.simulate_latency(GET_LATENCY);

        Self::handle_repo_result(
            "get store",
            self.get_repository()
                .and_then(|repository| repository.get(id)),
            |store| {
                tracing::debug!(store_id = %store.id, "store loaded");
                WorkerResponse::StoreLoaded { store }
            },
        )
    }

    /// Handles the `CreateStore` message.
    fn handle_create_store(&mut self, draft: StoreDraft) -> WorkerResponse {
        self.simulate_latency(WRITE_LATENCY);

        Self::handle_repo_result(
            "create store",
            self.get_repository()
                .and_then(|repository| repository.insert(draft)),
            |store| {
                tracing::debug!(store_id = %store.id, store_name = %store.name, "store created");
                WorkerResponse::StoreCreated { store }
            },
        )
    }

    /// Handles the `UpdateStore` message.
    fn handle_update_store(&mut self, id: &str, patch: StorePatch) -> WorkerResponse {
        self.simulate_latency(WRITE_LATENCY);

        Self::handle_repo_result(
            "update store",
            self.get_repository()
                .and_then(|repository| repository.merge(id, patch)),
            |store| {
                tracing::debug!(store_id = %store.id, "store updated");
                WorkerResponse::StoreUpdated { store }
            },
        )
    }

    /// Attaches the parent trace context from a message to the current thread.
    ///
    /// This function reconstructs the OpenTelemetry context from the serialized
    /// trace information in the message, allowing spans created in the worker
    /// thread to be linked to their parent spans in the main thread.
    ///
    /// Returns a context guard that must be held for the duration of the operation.
    fn attach_parent_trace_context(message: &WorkerMessage) -> Option<opentelemetry::ContextGuard> {
        use opentelemetry::trace::{
            SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState,
        };

        let trace_context = match message {
            WorkerMessage::ListStores { trace_context, .. }
            | WorkerMessage::GetStore { trace_context, .. }
            | WorkerMessage::CreateStore { trace_context, .. }
            | WorkerMessage::UpdateStore { trace_context, .. } => trace_context,
        }
        .as_ref()?;

        let trace_id = TraceId::from_hex(&trace_context.trace_id).ok()?;
        let span_id = SpanId::from_hex(&trace_context.parent_span_id).ok()?;

        let span_context = SpanContext::new(
            trace_id,
            span_id,
            TraceFlags::SAMPLED,
            true,
            TraceState::default(),
        );

        let otel_context = opentelemetry::Context::current().with_remote_span_context(span_context);

        Some(otel_context.attach())
    }

    /// Processes a worker message and returns the appropriate response.
    ///
    /// This is the main message handling entry point, dispatching to specific
    /// handlers based on the message variant. Automatically attaches trace context
    /// and creates a tracing span for the operation.
    pub fn handle_message(&mut self, message: WorkerMessage) -> WorkerResponse {
        let _context_guard = Self::attach_parent_trace_context(&message);

        let span = tracing::debug_span!("worker_handle_message", message_type = ?message);
        let _guard = span.entered();

        match message {
            WorkerMessage::ListStores { page, search, .. } => {
                self.handle_list_stores(page, &search)
            }

            WorkerMessage::GetStore { id, .. } => self.handle_get_store(&id),

            WorkerMessage::CreateStore { draft, .. } => self.handle_create_store(draft),

            WorkerMessage::UpdateStore { id, patch, .. } => self.handle_update_store(&id, patch),
        }
    }
}

/// Initializes tracing for the worker thread.
///
/// Sets up the same tracing configuration as the main thread, ensuring logs
/// from both threads are written to the same file.
fn init_worker_tracing() {
    use crate::observability;
    use crate::Config;

    let config = Config::default();
    observability::init_tracing(&config);
}

/// Tracks whether worker tracing has been initialized.
///
/// Used to ensure tracing is only set up once per worker thread lifetime.
static WORKER_TRACING_INITIALIZED: std::sync::atomic::AtomicBool =
    std::sync::atomic::AtomicBool::new(false);

impl ZellijWorker<'_> for StorekeeperWorker {
    /// Handles incoming messages from the main plugin thread.
    ///
    /// This is the Zellij worker interface entry point. It:
    /// 1. Initializes tracing on first message (once per worker lifetime)
    /// 2. Lazy-initializes the repository backend if needed
    /// 3. Deserializes the message payload
    /// 4. Processes the message via `handle_message`
    /// 5. Serializes and sends the response back to the main thread
    ///
    /// # Arguments
    ///
    /// * `message` - Message name used for routing the response
    /// * `payload` - JSON-serialized `WorkerMessage`
    fn on_message(&mut self, message: String, payload: String) {
        if !WORKER_TRACING_INITIALIZED.load(std::sync::atomic::Ordering::Relaxed) {
            init_worker_tracing();
            WORKER_TRACING_INITIALIZED.store(true, std::sync::atomic::Ordering::Relaxed);
        }

        if self.repository.is_none() {
            self.repository = Some(Box::new(MemoryRepository::seeded()));
        }

        let worker_message: WorkerMessage = match serde_json::from_str(&payload) {
            Ok(msg) => msg,
            Err(e) => {
                tracing::debug!(error = %e, "failed to deserialize worker message");
                return;
            }
        };

        let response = self.handle_message(worker_message);

        match serde_json::to_string(&response) {
            Ok(payload) => {
                let plugin_message = PluginMessage {
                    name: message,
                    payload,
                    worker_name: None,
                };
                post_message_to_plugin(plugin_message);
            }
            Err(e) => {
                tracing::debug!(error = %e, "failed to serialize worker response");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PAGE_SIZE;

    fn seeded_worker() -> StorekeeperWorker {
        StorekeeperWorker::without_latency(Box::new(MemoryRepository::seeded()))
    }

    fn draft(name: &str) -> StoreDraft {
        StoreDraft {
            name: name.to_string(),
            alias: "test-shop".to_string(),
            description: "Created while exercising the worker".to_string(),
            latitude: 45.5,
            longitude: -73.6,
            image: "/test.png".to_string(),
            thumbnail: "/test.png".to_string(),
            address: None,
        }
    }

    #[test]
    fn list_returns_seed_data_with_pagination() {
        let mut worker = seeded_worker();

        let response = worker.handle_message(WorkerMessage::list_stores(1, String::new()));
        match response {
            WorkerResponse::StoresLoaded { stores, pagination } => {
                assert_eq!(stores.len(), 3);
                assert_eq!(pagination.current_page, 1);
                assert_eq!(pagination.total_pages, 1);
                assert_eq!(pagination.total_items, 3);
                assert_eq!(pagination.page_size, PAGE_SIZE);
            }
            other => panic!("unexpected response: {other:?}"),
        }
    }

    #[test]
    fn list_paginates_the_filtered_sequence() {
        let mut worker = StorekeeperWorker::without_latency(Box::new(MemoryRepository::new()));
        for i in 0..25 {
            let response = worker.handle_message(WorkerMessage::create_store(draft(&format!(
                "Shop {i}"
            ))));
            assert!(matches!(response, WorkerResponse::StoreCreated { .. }));
        }

        let page2 = worker.handle_message(WorkerMessage::list_stores(2, String::new()));
        match page2 {
            WorkerResponse::StoresLoaded { stores, pagination } => {
                assert_eq!(stores.len(), 10);
                assert_eq!(pagination.total_pages, 3);
                assert_eq!(pagination.total_items, 25);
            }
            other => panic!("unexpected response: {other:?}"),
        }

        let page3 = worker.handle_message(WorkerMessage::list_stores(3, String::new()));
        match page3 {
            WorkerResponse::StoresLoaded { stores, .. } => assert_eq!(stores.len(), 5),
            other => panic!("unexpected response: {other:?}"),
        }
    }

    #[test]
    fn list_search_filters_before_paginating() {
        let mut worker = seeded_worker();

        let response = worker.handle_message(WorkerMessage::list_stores(1, "coffee".to_string()));
        match response {
            WorkerResponse::StoresLoaded { stores, pagination } => {
                assert_eq!(stores.len(), 1);
                assert_eq!(stores[0].name, "Coffee Corner");
                assert_eq!(pagination.total_items, 1);
            }
            other => panic!("unexpected response: {other:?}"),
        }
    }

    #[test]
    fn get_unknown_store_reports_not_found() {
        let mut worker = seeded_worker();

        let response = worker.handle_message(WorkerMessage::get_store("999".to_string()));
        match response {
            WorkerResponse::Error { message } => assert_eq!(message, "Store not found"),
            other => panic!("unexpected response: {other:?}"),
        }
    }

    #[test]
    fn create_then_get_round_trips_through_the_worker() {
        let mut worker = seeded_worker();

        let created = match worker.handle_message(WorkerMessage::create_store(draft("Test Shop")))
        {
            WorkerResponse::StoreCreated { store } => store,
            other => panic!("unexpected response: {other:?}"),
        };

        // the new record leads page one
        match worker.handle_message(WorkerMessage::list_stores(1, String::new())) {
            WorkerResponse::StoresLoaded { stores, pagination } => {
                assert_eq!(stores[0].name, "Test Shop");
                assert_eq!(pagination.total_items, 4);
            }
            other => panic!("unexpected response: {other:?}"),
        }

        match worker.handle_message(WorkerMessage::get_store(created.id.clone())) {
            WorkerResponse::StoreLoaded { store } => assert_eq!(store.id, created.id),
            other => panic!("unexpected response: {other:?}"),
        }
    }

    #[test]
    fn update_merges_and_update_of_unknown_id_fails() {
        let mut worker = seeded_worker();

        let patch = StorePatch {
            description: Some("Fresh beans roasted daily on site".to_string()),
            ..Default::default()
        };

        match worker.handle_message(WorkerMessage::update_store("3".to_string(), patch.clone())) {
            WorkerResponse::StoreUpdated { store } => {
                assert_eq!(store.name, "Coffee Corner");
                assert_eq!(store.description, "Fresh beans roasted daily on site");
            }
            other => panic!("unexpected response: {other:?}"),
        }

        match worker.handle_message(WorkerMessage::update_store("999".to_string(), patch)) {
            WorkerResponse::Error { message } => assert_eq!(message, "Store not found"),
            other => panic!("unexpected response: {other:?}"),
        }
    }
}
