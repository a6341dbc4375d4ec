//! FFI module for UniFFI bindings
//!
//! Exposes the call-log controller and the chat launcher to Kotlin/Swift.
//! The host app supplies the platform pieces through callback interfaces:
//! the call-history query, package lookup / activity start / toasts, and a
//! listener for screen-state changes. No async functions cross the boundary.

use std::sync::{Arc, OnceLock};

use parking_lot::Mutex;
use tokio::runtime::{Handle, Runtime};
use tokio::task::JoinHandle;

use crate::controller::{CallLogController, ControllerState};
use crate::launcher::ContactActionLauncher;
use crate::models::{CallRecord, CallType};
use crate::presentation::ScreenState;

mod callback_api;
mod host;
mod launcher_api;
mod lifecycle_api;

pub use host::{HostCallHistory, HostLauncher};

/// Shared Tokio runtime for background loads started through FFI
static TOKIO_RUNTIME: OnceLock<Runtime> = OnceLock::new();

/// Get or initialize the shared Tokio runtime
fn tokio_runtime() -> Result<&'static Runtime, NoSaveError> {
    if let Some(runtime) = TOKIO_RUNTIME.get() {
        return Ok(runtime);
    }
    let runtime = Runtime::new().map_err(|e| NoSaveError::Runtime {
        message: e.to_string(),
    })?;
    // Another thread may have won the race; either runtime is fine
    let _ = TOKIO_RUNTIME.set(runtime);
    TOKIO_RUNTIME.get().ok_or_else(|| NoSaveError::Runtime {
        message: "runtime was not initialized".to_string(),
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Enum)]
pub enum CallTypeInfo {
    Incoming,
    Outgoing,
    Missed,
    Rejected,
    Blocked,
    Unknown,
}

impl From<CallType> for CallTypeInfo {
    fn from(call_type: CallType) -> Self {
        match call_type {
            CallType::Incoming => Self::Incoming,
            CallType::Outgoing => Self::Outgoing,
            CallType::Missed => Self::Missed,
            CallType::Rejected => Self::Rejected,
            CallType::Blocked => Self::Blocked,
            CallType::Unknown => Self::Unknown,
        }
    }
}

/// One call-log row, with the display strings already derived.
#[derive(Debug, Clone, uniffi::Record)]
pub struct CallRecordInfo {
    pub id: String,
    pub number: String,
    pub name: Option<String>,
    pub timestamp_millis: i64,
    pub duration_seconds: u64,
    pub call_type: CallTypeInfo,
    pub call_type_label: String,
    pub formatted_timestamp: String,
    pub display_name: String,
    pub duration_label: String,
}

impl From<&CallRecord> for CallRecordInfo {
    fn from(record: &CallRecord) -> Self {
        Self {
            id: record.id().to_string(),
            number: record.number().to_string(),
            name: record.name().map(str::to_string),
            timestamp_millis: record.timestamp_millis(),
            duration_seconds: record.duration_seconds(),
            call_type: record.call_type().into(),
            call_type_label: record.call_type().label().to_string(),
            formatted_timestamp: record.formatted_timestamp().to_string(),
            display_name: record.display_name().to_string(),
            duration_label: record.duration_label(),
        }
    }
}

/// What the call-log screen should render.
#[derive(Debug, Clone, uniffi::Enum)]
pub enum ScreenStateInfo {
    Loading,
    Failed { message: String },
    PermissionDenied,
    Empty,
    Records { records: Vec<CallRecordInfo> },
}

impl From<&ControllerState> for ScreenStateInfo {
    fn from(state: &ControllerState) -> Self {
        match ScreenState::from_state(state) {
            ScreenState::Loading => Self::Loading,
            ScreenState::Error(message) => Self::Failed {
                message: message.to_string(),
            },
            ScreenState::PermissionDenied => Self::PermissionDenied,
            ScreenState::Empty => Self::Empty,
            ScreenState::Records(records) => Self::Records {
                records: records.iter().map(CallRecordInfo::from).collect(),
            },
        }
    }
}

/// Result of a host call-history query.
#[derive(Debug, Clone, uniffi::Enum)]
pub enum HostQueryResult {
    /// Column names plus rows of cells; null cells are `None`.
    Rows {
        columns: Vec<String>,
        rows: Vec<Vec<Option<String>>>,
    },
    PermissionDenied,
    Failed { message: String },
}

/// Host-side call-history provider (e.g. a content resolver query).
#[uniffi::export(callback_interface)]
pub trait CallHistoryProvider: Send + Sync {
    /// Run the projected query sorted by `sort_order` ("date DESC").
    fn query(&self, projection: Vec<String>, sort_order: String) -> HostQueryResult;
}

/// Host-side app launching.
#[uniffi::export(callback_interface)]
pub trait AppHost: Send + Sync {
    fn is_package_installed(&self, package: String) -> bool;
    /// Start a view of `uri`, restricted to `package` when given.
    /// Returns false when nothing could handle it.
    fn start_view(&self, uri: String, package: Option<String>) -> bool;
    fn show_notice(&self, message: String, long_duration: bool);
}

/// Screen-state listener.
///
/// # Thread Safety
/// Invoked from a background thread; dispatch to the main thread for UI updates.
#[uniffi::export(callback_interface)]
pub trait StateCallback: Send + Sync {
    fn on_state_changed(&self, state: ScreenStateInfo);
}

/// Errors that can occur while setting up the core.
#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum NoSaveError {
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },
    #[error("Runtime unavailable: {message}")]
    Runtime { message: String },
}

/// Call-log core exposed to foreign languages.
#[derive(uniffi::Object)]
pub struct NoSaveCore {
    controller: CallLogController,
    launcher: ContactActionLauncher<HostLauncher>,
    runtime: Handle,
    state_listener: Mutex<Option<JoinHandle<()>>>,
}

impl Drop for NoSaveCore {
    fn drop(&mut self) {
        if let Some(listener) = self.state_listener.lock().take() {
            listener.abort();
        }
    }
}
