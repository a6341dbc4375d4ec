use crate::controller::{ControllerState, PermissionState};
use crate::models::{CallRecord, LoadState};

pub const PERMISSION_REQUIRED_MESSAGE: &str = "Permission to access call logs is required";
pub const EMPTY_MESSAGE: &str = "No call logs found";

/// What a call-log screen should show.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScreenState<'a> {
    Loading,
    Error(&'a str),
    PermissionDenied,
    Empty,
    Records(&'a [CallRecord]),
}

impl<'a> ScreenState<'a> {
    /// Priority: loading, error, permission, empty, records.
    pub fn from_state(state: &'a ControllerState) -> Self {
        match &state.load {
            LoadState::Loading => Self::Loading,
            LoadState::Failed(message) => Self::Error(message),
            _ if state.permission != PermissionState::Granted => Self::PermissionDenied,
            LoadState::Loaded(records) if !records.is_empty() => Self::Records(records),
            _ => Self::Empty,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CallType, TimestampFormatter};

    fn state(permission: PermissionState, load: LoadState) -> ControllerState {
        ControllerState { permission, load }
    }

    fn record() -> CallRecord {
        CallRecord::new("1", "555", None, 0, 0, CallType::Missed, &TimestampFormatter::default())
    }

    #[test]
    fn test_loading_wins() {
        let s = state(PermissionState::Denied, LoadState::Loading);
        assert_eq!(ScreenState::from_state(&s), ScreenState::Loading);
    }

    #[test]
    fn test_error_before_permission() {
        let s = state(PermissionState::Denied, LoadState::Failed("boom".into()));
        assert_eq!(ScreenState::from_state(&s), ScreenState::Error("boom"));
    }

    #[test]
    fn test_permission_denied_and_unknown() {
        for permission in [PermissionState::Denied, PermissionState::Unknown] {
            let s = state(permission, LoadState::Idle);
            assert_eq!(ScreenState::from_state(&s), ScreenState::PermissionDenied);
        }
    }

    #[test]
    fn test_empty_and_records() {
        let empty = state(PermissionState::Granted, LoadState::Loaded(vec![]));
        assert_eq!(ScreenState::from_state(&empty), ScreenState::Empty);

        let idle = state(PermissionState::Granted, LoadState::Idle);
        assert_eq!(ScreenState::from_state(&idle), ScreenState::Empty);

        let loaded = state(PermissionState::Granted, LoadState::Loaded(vec![record()]));
        assert!(matches!(
            ScreenState::from_state(&loaded),
            ScreenState::Records(records) if records.len() == 1
        ));
    }
}
