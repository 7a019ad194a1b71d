//! CLI command handling

pub mod action;
pub mod call_log;
pub mod output;
pub mod replay;
pub mod runtime;

pub use action::*;
pub use call_log::*;
pub use output::*;
pub use replay::*;
pub use runtime::Runtime;
