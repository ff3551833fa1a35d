pub mod dispatch;
pub mod run;
pub mod status;

pub use dispatch::dispatch;
pub use run::{SessionStats, run, run_session};
