pub mod add;
pub mod commit;
pub mod log;

pub use add::add;
pub use commit::commit;
pub use log::{log, History, LogEntry};
