//! Native UNIX helpers for the build tool's filesystem layer.
//!
//! The host runtime has no portable access to `fstatat(2)` or the extended
//! attribute calls, and it reports failures as exceptions rather than error
//! numbers. This crate provides:
//! - [`syscall`]: forwarding shims that set `errno` to `ENOSYS` where the
//!   platform lacks a call,
//! - [`stat_times`]: timestamp accessors for `struct stat`,
//! - [`errors`]: translation of error numbers into exceptions raised through
//!   a [`HostRuntime`].
#![cfg(unix)]

#[macro_use]
mod check;
pub mod errors;
mod host;
pub mod stat_times;
pub mod syscall;

#[doc(hidden)]
pub use check::check_failed;
pub use errors::ExceptionCategory;
pub use errors::ExceptionPayload;
pub use errors::error_message;
pub use errors::post_exception;
pub use errors::post_file_exception;
pub use host::HostError;
pub use host::HostRuntime;
pub use stat_times::StatTimes;
pub use stat_times::StatTimestamp;
pub use stat_times::stat_nanoseconds;
pub use stat_times::stat_seconds;
pub use stat_times::stat_timestamp;
