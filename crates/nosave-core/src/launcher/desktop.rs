use std::path::{Path, PathBuf};

use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info};

use super::{LaunchPlatform, LaunchRequest, Notice};
use crate::config::ChatAppConfig;
use crate::error::CallLogError;

/// Launch platform for desktop frontends.
///
/// The chat app counts as installed when its configured executable is on
/// `PATH`. Package-scoped requests spawn that executable detached, so a
/// successful launch means "started", not "exited". Everything else goes
/// through the system URL handler, whose exit status decides success.
pub struct DesktopPlatform {
    package: String,
    command: Option<String>,
    notices: Option<UnboundedSender<Notice>>,
}

impl DesktopPlatform {
    pub fn new(app: &ChatAppConfig) -> Self {
        Self {
            package: app.package.clone(),
            command: app.desktop_command.clone(),
            notices: None,
        }
    }

    /// Forward notices to a frontend instead of only logging them.
    pub fn with_notices(mut self, notices: UnboundedSender<Notice>) -> Self {
        self.notices = Some(notices);
        self
    }

    fn installed_command(&self) -> Option<PathBuf> {
        self.command.as_deref().and_then(find_executable)
    }
}

fn find_executable(command: &str) -> Option<PathBuf> {
    let candidate = Path::new(command);
    if candidate.components().count() > 1 {
        return candidate.is_file().then(|| candidate.to_path_buf());
    }
    let path_var = std::env::var_os("PATH")?;
    std::env::split_paths(&path_var)
        .map(|dir| dir.join(command))
        .find(|path| path.is_file())
}

impl LaunchPlatform for DesktopPlatform {
    fn is_installed(&self, package: &str) -> bool {
        package == self.package && self.installed_command().is_some()
    }

    fn open(&self, request: &LaunchRequest) -> Result<(), CallLogError> {
        let scoped_command = request
            .package
            .as_deref()
            .filter(|package| *package == self.package)
            .and_then(|_| self.installed_command());

        let result = match scoped_command {
            Some(command) => {
                debug!(uri = %request.uri, command = %command.display(), "opening with chat app");
                open::with_detached(&request.uri, command.to_string_lossy())
            }
            None => {
                debug!(uri = %request.uri, "opening with system handler");
                open::that(&request.uri)
            }
        };
        result.map_err(|e| CallLogError::launch_failure(&request.uri, e.to_string()))
    }

    fn notify(&self, notice: Notice) {
        info!(message = %notice.message, "notice");
        if let Some(tx) = &self.notices {
            let _ = tx.send(notice);
        }
    }
}
