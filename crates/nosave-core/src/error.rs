/// Errors produced while reading call history or launching external apps.
///
/// None of these are fatal: the controller turns `DataAccess` into a
/// `Failed` load state, the launcher turns `LaunchFailure` into a notice.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CallLogError {
    #[error("permission to read call history was denied")]
    PermissionDenied,
    #[error("{message}")]
    DataAccess { message: String },
    #[error("could not open {target}: {message}")]
    LaunchFailure { target: String, message: String },
}

impl CallLogError {
    pub fn data_access(message: impl Into<String>) -> Self {
        Self::DataAccess {
            message: message.into(),
        }
    }

    pub fn launch_failure(target: impl Into<String>, message: impl Into<String>) -> Self {
        Self::LaunchFailure {
            target: target.into(),
            message: message.into(),
        }
    }
}

impl From<rusqlite::Error> for CallLogError {
    fn from(err: rusqlite::Error) -> Self {
        Self::data_access(err.to_string())
    }
}
