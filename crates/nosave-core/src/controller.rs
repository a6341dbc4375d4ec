//! Call-log loading state machine.
//!
//! The controller publishes a single [`ControllerState`] snapshot through a
//! `tokio::sync::watch` channel. Loads run the source on a blocking worker and
//! post their result into that channel when they finish. Overlapping loads
//! are neither serialized nor cancelled: whichever completes last is what the
//! snapshot shows.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::constants::LOAD_ERROR_PREFIX;
use crate::models::LoadState;
use crate::source::CallLogSource;

/// Whether the user allowed reading the call history.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PermissionState {
    #[default]
    Unknown,
    Granted,
    Denied,
}

impl PermissionState {
    pub fn is_granted(&self) -> bool {
        matches!(self, Self::Granted)
    }
}

impl From<bool> for PermissionState {
    fn from(granted: bool) -> Self {
        if granted {
            Self::Granted
        } else {
            Self::Denied
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ControllerState {
    pub permission: PermissionState,
    pub load: LoadState,
}

/// What the host has to do after [`CallLogController::start`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StartAction {
    /// A load was started.
    Loading,
    /// Ask the user for call-history access, then report back through
    /// [`CallLogController::on_permission_result`].
    RequestPermission,
    /// Access was refused earlier; nothing to do until it is granted.
    Nothing,
}

pub struct CallLogController {
    source: Arc<dyn CallLogSource>,
    runtime: Handle,
    state_tx: Arc<watch::Sender<ControllerState>>,
    permission_requested: AtomicBool,
}

impl CallLogController {
    pub fn new(source: Arc<dyn CallLogSource>, runtime: Handle) -> Self {
        let (state_tx, _) = watch::channel(ControllerState::default());
        Self {
            source,
            runtime,
            state_tx: Arc::new(state_tx),
            permission_requested: AtomicBool::new(false),
        }
    }

    /// Start with a permission status the host already knows about.
    pub fn with_permission(self, permission: PermissionState) -> Self {
        self.state_tx.send_modify(|state| state.permission = permission);
        self
    }

    pub fn state(&self) -> ControllerState {
        self.state_tx.borrow().clone()
    }

    pub fn load_state(&self) -> LoadState {
        self.state_tx.borrow().load.clone()
    }

    pub fn permission(&self) -> PermissionState {
        self.state_tx.borrow().permission
    }

    /// Receive every state change. Dropping the receiver unsubscribes.
    pub fn subscribe(&self) -> watch::Receiver<ControllerState> {
        self.state_tx.subscribe()
    }

    /// First display of the call log.
    pub fn start(&self) -> StartAction {
        match self.permission() {
            PermissionState::Granted => {
                self.load();
                StartAction::Loading
            }
            PermissionState::Unknown if !self.permission_requested.swap(true, Ordering::SeqCst) => {
                StartAction::RequestPermission
            }
            _ => StartAction::Nothing,
        }
    }

    /// Record the user's answer; a grant triggers exactly one load.
    pub fn on_permission_result(&self, granted: bool) -> Option<JoinHandle<()>> {
        self.permission_requested.store(true, Ordering::SeqCst);
        let permission = PermissionState::from(granted);
        info!(?permission, "call history permission result");
        self.state_tx.send_modify(|state| state.permission = permission);
        if granted {
            self.load()
        } else {
            None
        }
    }

    /// Refresh the call list.
    ///
    /// Without read permission no query is made and `None` is returned.
    /// Otherwise the state moves to `Loading` right away and the returned
    /// task posts `Loaded` or `Failed` when the source finishes.
    pub fn load(&self) -> Option<JoinHandle<()>> {
        if !self.permission().is_granted() {
            debug!("load skipped, call history permission not granted");
            return None;
        }

        self.state_tx.send_modify(|state| state.load = LoadState::Loading);
        debug!("call log load started");

        let source = self.source.clone();
        let state_tx = self.state_tx.clone();
        Some(self.runtime.spawn(async move {
            let fetched = tokio::task::spawn_blocking(move || source.fetch_recent()).await;
            let next = match fetched {
                Ok(Ok(records)) => {
                    info!(count = records.len(), "call log loaded");
                    LoadState::Loaded(records)
                }
                Ok(Err(e)) => {
                    warn!(error = %e, "call log load failed");
                    LoadState::Failed(format!("{}: {}", LOAD_ERROR_PREFIX, e))
                }
                Err(e) => {
                    warn!(error = %e, "call log worker did not finish");
                    LoadState::Failed(format!("{}: {}", LOAD_ERROR_PREFIX, e))
                }
            };
            state_tx.send_modify(|state| state.load = next);
        }))
    }

    /// The application became visible again. Always a full refresh.
    pub fn on_foreground(&self) -> Option<JoinHandle<()>> {
        self.load()
    }
}
