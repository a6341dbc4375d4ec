//! Opening a chat with a phone number in an external messaging app.
//!
//! The launcher never leaves the user with a silent no-op: when the chat app
//! is missing it points to the app store (market URI first, then the store's
//! web page), and every failure surfaces as a [`Notice`].

mod desktop;

pub use desktop::DesktopPlatform;

use std::sync::Arc;

use tracing::{debug, info, warn};
use url::Url;

use crate::config::ChatAppConfig;
use crate::error::CallLogError;

/// How long a notice should stay visible.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeLength {
    Short,
    Long,
}

/// One-shot user-visible message (a toast on mobile, a status line in the TUI).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    pub length: NoticeLength,
}

impl Notice {
    pub fn short(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            length: NoticeLength::Short,
        }
    }

    pub fn long(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            length: NoticeLength::Long,
        }
    }
}

/// A view request: open `uri`, optionally restricted to one application so
/// no chooser is shown.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LaunchRequest {
    pub uri: String,
    pub package: Option<String>,
}

impl LaunchRequest {
    pub fn unscoped(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            package: None,
        }
    }

    pub fn scoped(uri: impl Into<String>, package: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            package: Some(package.into()),
        }
    }
}

/// What the hosting platform can do for the launcher.
pub trait LaunchPlatform: Send + Sync {
    fn is_installed(&self, package: &str) -> bool;
    fn open(&self, request: &LaunchRequest) -> Result<(), CallLogError>;
    fn notify(&self, notice: Notice);
}

impl<T: LaunchPlatform + ?Sized> LaunchPlatform for Arc<T> {
    fn is_installed(&self, package: &str) -> bool {
        (**self).is_installed(package)
    }

    fn open(&self, request: &LaunchRequest) -> Result<(), CallLogError> {
        (**self).open(request)
    }

    fn notify(&self, notice: Notice) {
        (**self).notify(notice)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LaunchOutcome {
    /// The chat app was started with the deep link.
    Launched,
    /// Chat app missing; the store detail page was opened.
    StoreOpened,
    /// Chat app missing and no store app; the store web page was opened.
    WebStoreOpened,
    /// Chat app missing and neither store target could be opened.
    StoreUnavailable,
    /// Chat app present but the launch failed.
    LaunchFailed,
}

impl LaunchOutcome {
    pub fn launched(&self) -> bool {
        matches!(self, Self::Launched)
    }
}

/// Strip whitespace, hyphens and parentheses: "(555) 123-4567" -> "5551234567".
pub fn normalize_number(phone_number: &str) -> String {
    phone_number
        .chars()
        .filter(|c| !c.is_whitespace() && !matches!(c, '-' | '(' | ')'))
        .collect()
}

/// Deep link carrying the normalized number as the `phone` query parameter.
pub fn chat_link(app: &ChatAppConfig, phone_number: &str) -> Result<String, CallLogError> {
    let url = Url::parse_with_params(
        &app.deep_link_base,
        &[("phone", normalize_number(phone_number))],
    )
    .map_err(|e| CallLogError::launch_failure(&app.deep_link_base, e.to_string()))?;
    Ok(url.into())
}

pub struct ContactActionLauncher<P> {
    platform: P,
    app: ChatAppConfig,
}

impl<P: LaunchPlatform> ContactActionLauncher<P> {
    pub fn new(platform: P, app: ChatAppConfig) -> Self {
        Self { platform, app }
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    pub fn app(&self) -> &ChatAppConfig {
        &self.app
    }

    /// True only when the chat app itself was launched.
    pub fn open_chat(&self, phone_number: &str) -> bool {
        self.open_chat_outcome(phone_number).launched()
    }

    pub fn open_chat_outcome(&self, phone_number: &str) -> LaunchOutcome {
        if !self.platform.is_installed(&self.app.package) {
            info!(package = %self.app.package, "chat app not installed, redirecting to store");
            self.platform.notify(Notice::long(format!(
                "{name} is not installed. Please install {name} to use this feature.",
                name = self.app.display_name
            )));
            return self.open_store();
        }

        let request = match chat_link(&self.app, phone_number) {
            Ok(uri) => LaunchRequest::scoped(uri, &self.app.package),
            Err(e) => {
                warn!(error = %e, "could not build chat link");
                self.notify_launch_error();
                return LaunchOutcome::LaunchFailed;
            }
        };

        match self.platform.open(&request) {
            Ok(()) => {
                debug!(uri = %request.uri, "chat app launched");
                LaunchOutcome::Launched
            }
            Err(e) => {
                warn!(error = %e, "failed to launch chat app");
                self.notify_launch_error();
                LaunchOutcome::LaunchFailed
            }
        }
    }

    fn open_store(&self) -> LaunchOutcome {
        let market = LaunchRequest::unscoped(self.app.market_uri());
        let Err(market_err) = self.platform.open(&market) else {
            return LaunchOutcome::StoreOpened;
        };
        debug!(error = %market_err, "store app unavailable, trying web store");

        let web = LaunchRequest::unscoped(self.app.store_web_url());
        match self.platform.open(&web) {
            Ok(()) => LaunchOutcome::WebStoreOpened,
            Err(e) => {
                warn!(error = %e, "could not open the store web page");
                self.platform
                    .notify(Notice::short("Could not open the app store"));
                LaunchOutcome::StoreUnavailable
            }
        }
    }

    fn notify_launch_error(&self) {
        self.platform
            .notify(Notice::short(format!("Error opening {}", self.app.display_name)));
    }
}
