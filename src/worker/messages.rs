//! Worker thread message types for cross-thread communication.
//!
//! This module defines the request and response protocol between the main plugin
//! thread and the background worker thread that runs store operations. It also
//! implements distributed tracing context propagation across thread boundaries.
//!
//! Requests map one-to-one to the four asynchronous store operations. Each
//! request eventually produces exactly one response: the matching success
//! variant or [`WorkerResponse::Error`].

use crate::domain::{Pagination, Store, StoreDraft, StorePatch};
use serde::{Deserialize, Serialize};

/// Distributed tracing context for cross-thread span propagation.
///
/// Captures the current trace and span IDs from OpenTelemetry to maintain
/// trace continuity when passing messages to the worker thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceContext {
    /// OpenTelemetry trace ID as a hex string.
    pub trace_id: String,

    /// Parent span ID for linking spans across threads.
    pub parent_span_id: String,
}

impl TraceContext {
    /// Creates a trace context from the current tracing span.
    ///
    /// Extracts the OpenTelemetry trace ID and span ID from the active span.
    /// Returns `None` if the current span context is invalid or not sampled.
    pub fn from_current() -> Option<Self> {
        use opentelemetry::trace::TraceContextExt;
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let span = tracing::Span::current();

        let otel_context = span.context();
        let span_ref = otel_context.span();
        let span_context = span_ref.span_context();

        if span_context.is_valid() {
            let trace_id_str = format!("{:032x}", span_context.trace_id());
            let parent_span_id_str = format!("{:016x}", span_context.span_id());

            tracing::debug!(
                trace_id = %trace_id_str,
                parent_span_id = %parent_span_id_str,
                "capturing trace context"
            );

            Some(Self {
                trace_id: trace_id_str,
                parent_span_id: parent_span_id_str,
            })
        } else {
            tracing::debug!("span context is not valid");
            None
        }
    }
}

/// Macro to generate builder methods for `WorkerMessage` variants.
///
/// Generates convenience constructors that automatically attach the current
/// trace context to each message variant.
macro_rules! worker_message_builders {
    (
        $(
            $builder_name:ident($variant:ident { $($field:ident: $ty:ty),* $(,)? })
        ),* $(,)?
    ) => {
        impl WorkerMessage {
            $(
                #[doc = concat!("Create a ", stringify!($variant), " message with current trace context")]
                pub fn $builder_name($($field: $ty),*) -> Self {
                    Self::$variant {
                        $($field,)*
                        trace_context: TraceContext::from_current(),
                    }
                }
            )*
        }
    };
}

worker_message_builders! {
    list_stores(ListStores { page: usize, search: String }),
    get_store(GetStore { id: String }),
    create_store(CreateStore { draft: StoreDraft }),
    update_store(UpdateStore { id: String, patch: StorePatch }),
}

/// Messages sent from the main thread to the worker thread.
///
/// Each variant corresponds to a store operation performed asynchronously.
/// Dispatching one of these is the "pending" phase of the operation: the
/// sender marks itself loading and waits for the matching response. All
/// variants include an optional trace context for distributed tracing support.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum WorkerMessage {
    /// Load one page of stores, filtered by a search string.
    ListStores {
        /// Page to load (1-based).
        page: usize,

        /// Search string applied before pagination. Empty means no filter.
        search: String,

        /// Trace context for linking spans across threads.
        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// Load a single store by id.
    GetStore {
        /// Id of the store to load.
        id: String,

        /// Trace context for linking spans across threads.
        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// Create a new store from a draft.
    CreateStore {
        /// Fields of the store to create.
        draft: StoreDraft,

        /// Trace context for linking spans across threads.
        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// Merge a partial update into an existing store.
    UpdateStore {
        /// Id of the store to update.
        id: String,

        /// Fields to overwrite. Absent fields keep their current value.
        patch: StorePatch,

        /// Trace context for linking spans across threads.
        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },
}

/// Responses sent from the worker thread back to the main thread.
///
/// Each variant corresponds to the completion of a worker operation, either
/// successfully with result data (the "fulfilled" phase) or with an error
/// message (the "rejected" phase).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum WorkerResponse {
    /// One page of stores was loaded.
    StoresLoaded {
        /// The stores on the requested page.
        stores: Vec<Store>,

        /// Pagination descriptor for the filtered sequence.
        pagination: Pagination,
    },

    /// A single store was loaded.
    StoreLoaded {
        /// The requested store.
        store: Store,
    },

    /// A new store was created.
    StoreCreated {
        /// The complete record as stored, with assigned id and timestamp.
        store: Store,
    },

    /// An existing store was updated.
    StoreUpdated {
        /// The record after the merge.
        store: Store,
    },

    /// An error occurred during the worker operation.
    Error {
        /// Human-readable error message.
        message: String,
    },
}
