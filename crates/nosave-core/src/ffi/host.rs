use tracing::debug;

use super::{AppHost, CallHistoryProvider, HostQueryResult};
use crate::error::CallLogError;
use crate::launcher::{LaunchPlatform, LaunchRequest, Notice, NoticeLength};
use crate::source::{Cell, CallHistoryStore, RowCursor, RowSet};

/// [`CallHistoryStore`] answered by the host app.
pub struct HostCallHistory {
    provider: Box<dyn CallHistoryProvider>,
}

impl HostCallHistory {
    pub fn new(provider: Box<dyn CallHistoryProvider>) -> Self {
        Self { provider }
    }
}

impl CallHistoryStore for HostCallHistory {
    fn query(
        &self,
        projection: &[&str],
        sort_order: &str,
    ) -> Result<Box<dyn RowCursor>, CallLogError> {
        let projection = projection.iter().map(|c| c.to_string()).collect();
        match self.provider.query(projection, sort_order.to_string()) {
            HostQueryResult::Rows { columns, rows } => {
                debug!(rows = rows.len(), "host returned call history");
                let mut set = RowSet::new(columns);
                for row in rows {
                    set.push_row(row.into_iter().map(Cell::from).collect());
                }
                Ok(Box::new(set))
            }
            // Access was revoked after the controller's check
            HostQueryResult::PermissionDenied => Err(CallLogError::data_access(
                "call history permission was revoked",
            )),
            HostQueryResult::Failed { message } => Err(CallLogError::data_access(message)),
        }
    }
}

/// [`LaunchPlatform`] backed by the host's package manager and activities.
pub struct HostLauncher {
    host: Box<dyn AppHost>,
}

impl HostLauncher {
    pub fn new(host: Box<dyn AppHost>) -> Self {
        Self { host }
    }
}

impl LaunchPlatform for HostLauncher {
    fn is_installed(&self, package: &str) -> bool {
        self.host.is_package_installed(package.to_string())
    }

    fn open(&self, request: &LaunchRequest) -> Result<(), CallLogError> {
        if self
            .host
            .start_view(request.uri.clone(), request.package.clone())
        {
            Ok(())
        } else {
            Err(CallLogError::launch_failure(
                &request.uri,
                "no activity could handle the request",
            ))
        }
    }

    fn notify(&self, notice: Notice) {
        self.host
            .show_notice(notice.message, notice.length == NoticeLength::Long);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Revoked;

    impl CallHistoryProvider for Revoked {
        fn query(&self, _projection: Vec<String>, _sort_order: String) -> HostQueryResult {
            HostQueryResult::PermissionDenied
        }
    }

    #[test]
    fn test_revoked_permission_is_data_access_error() {
        let store = HostCallHistory::new(Box::new(Revoked));
        let err = store.query(&["_id"], "date DESC").err().unwrap();
        assert_eq!(
            err,
            CallLogError::data_access("call history permission was revoked")
        );
    }
}
