//! Application-level orchestration utilities.
//!
//! The TUI applies the exports and charts requested on the command line after every re-read.

mod post_process;

pub(crate) use post_process::process_report;
