// UniFFI scaffolding for generating Kotlin/Swift bindings
uniffi::setup_scaffolding!();

pub mod config;
pub mod constants;
pub mod controller;
pub mod error;
pub mod ffi;
pub mod launcher;
pub mod models;
pub mod presentation;
pub mod source;
pub mod tracing_setup;

pub use controller::{CallLogController, ControllerState, PermissionState, StartAction};
pub use error::CallLogError;
pub use ffi::{NoSaveCore, NoSaveError};
pub use models::{CallRecord, CallType, LoadState};
