pub mod call_record;
pub mod load_state;

pub use call_record::{format_duration, CallRecord, CallType, TimeZoneMode, TimestampFormatter};
pub use load_state::LoadState;
