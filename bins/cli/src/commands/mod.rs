//! CLI command handlers.

pub mod check;
pub mod emit;
pub mod info;
pub mod show;

pub use check::run_check;
pub use emit::{EmitCommandInput, run_emit};
pub use info::run_info;
pub use show::run_show;
