use super::*;

use crate::config::CoreConfig;
use crate::controller::{PermissionState, StartAction};
use crate::source::StoreCallLogSource;

#[uniffi::export]
impl NoSaveCore {
    /// Create the core.
    ///
    /// `permission_granted` is the host's current view of the call-log read
    /// permission. `config_json` optionally overrides the chat app and date
    /// format (same camelCase JSON as the config file).
    #[uniffi::constructor]
    pub fn new(
        provider: Box<dyn CallHistoryProvider>,
        host: Box<dyn AppHost>,
        permission_granted: bool,
        config_json: Option<String>,
    ) -> Result<Self, NoSaveError> {
        let config = match config_json {
            Some(json) => serde_json::from_str::<CoreConfig>(&json).map_err(|e| {
                NoSaveError::InvalidConfig {
                    message: e.to_string(),
                }
            })?,
            None => CoreConfig::default(),
        };
        let runtime = tokio_runtime()?.handle().clone();

        let source = StoreCallLogSource::new(
            HostCallHistory::new(provider),
            config.timestamp_formatter(),
        );
        let permission = if permission_granted {
            PermissionState::Granted
        } else {
            PermissionState::Unknown
        };
        let controller =
            CallLogController::new(Arc::new(source), runtime.clone()).with_permission(permission);
        let launcher = ContactActionLauncher::new(HostLauncher::new(host), config.chat_app);

        Ok(Self {
            controller,
            launcher,
            runtime,
            state_listener: Mutex::new(None),
        })
    }

    /// Call when the call-log screen is first shown.
    /// Returns true when the host should request the read permission now.
    pub fn start(&self) -> bool {
        self.controller.start() == StartAction::RequestPermission
    }

    /// Report the outcome of the permission request.
    pub fn on_permission_result(&self, granted: bool) {
        self.controller.on_permission_result(granted);
    }

    /// Reload the call history in the background.
    pub fn load(&self) {
        self.controller.load();
    }

    /// Call when the app returns to the foreground.
    pub fn on_foreground(&self) {
        self.controller.on_foreground();
    }

    pub fn screen_state(&self) -> ScreenStateInfo {
        ScreenStateInfo::from(&self.controller.state())
    }
}
