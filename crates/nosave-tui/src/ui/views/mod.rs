pub mod call_log;
pub mod permission;

pub use call_log::render_call_log;
pub use permission::render_permission_prompt;
