//! Translation of UNIX error numbers into host-runtime exceptions.
//!
//! The category table is kept consistent with the exception classes the
//! build tool's filesystem layer catches. Messages for file errors follow the
//! `"<file> (<description>)"` shape the host runtime's own I/O library uses.

use std::ffi::CStr;
use std::fmt;

use libc::c_char;
use libc::c_int;

use crate::host::HostRuntime;

/// Host-runtime exception class selected for an error number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExceptionCategory {
    IllegalArgument,
    SocketTimeout,
    FileNotFound,
    FileAccess,
    InterruptedIo,
    OutOfMemory,
    UnsupportedOperation,
    InvalidArgumentIo,
    SymlinkLoop,
    /// Fallback for every error number without a more specific class.
    Io,
}

impl ExceptionCategory {
    pub fn for_errno(error_number: c_int) -> Self {
        match error_number {
            // Bad pointer or descriptor: a caller bug rather than an I/O failure.
            libc::EFAULT | libc::EBADF => ExceptionCategory::IllegalArgument,
            libc::ETIMEDOUT => ExceptionCategory::SocketTimeout,
            libc::ENOENT => ExceptionCategory::FileNotFound,
            libc::EACCES | libc::EPERM => ExceptionCategory::FileAccess,
            libc::EINTR => ExceptionCategory::InterruptedIo,
            libc::ENOMEM => ExceptionCategory::OutOfMemory,
            libc::ENOSYS | libc::ENOTSUP => ExceptionCategory::UnsupportedOperation,
            // Same value as ENOTSUP on Linux, distinct on the BSDs and macOS.
            n if n == libc::EOPNOTSUPP => ExceptionCategory::UnsupportedOperation,
            libc::EINVAL => ExceptionCategory::InvalidArgumentIo,
            libc::ELOOP => ExceptionCategory::SymlinkLoop,
            _ => ExceptionCategory::Io,
        }
    }

    /// Fully qualified class name in the host runtime's slash-separated form.
    pub fn class_name(self) -> &'static str {
        match self {
            ExceptionCategory::IllegalArgument => "java/lang/IllegalArgumentException",
            ExceptionCategory::SocketTimeout => "java/net/SocketTimeoutException",
            ExceptionCategory::FileNotFound => "java/io/FileNotFoundException",
            ExceptionCategory::FileAccess => {
                "com/google/devtools/build/lib/vfs/FileAccessException"
            }
            ExceptionCategory::InterruptedIo => "java/io/InterruptedIOException",
            ExceptionCategory::OutOfMemory => "java/lang/OutOfMemoryError",
            ExceptionCategory::UnsupportedOperation => "java/lang/UnsupportedOperationException",
            ExceptionCategory::InvalidArgumentIo => {
                "com/google/devtools/build/lib/unix/InvalidArgumentIOException"
            }
            ExceptionCategory::SymlinkLoop => {
                "com/google/devtools/build/lib/vfs/FileSymlinkLoopException"
            }
            ExceptionCategory::Io => "java/io/IOException",
        }
    }
}

/// An exception ready to be raised in the host runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExceptionPayload {
    pub category: ExceptionCategory,
    pub message: String,
}

impl ExceptionPayload {
    pub fn new(error_number: c_int, message: impl Into<String>) -> Self {
        Self {
            category: ExceptionCategory::for_errno(error_number),
            message: message.into(),
        }
    }

    /// Message is `"<filename> (<strerror text>)"`.
    pub fn for_file(error_number: c_int, filename: &str) -> Self {
        let description = error_message(error_number);
        Self::new(error_number, format!("{filename} ({description})"))
    }
}

impl fmt::Display for ExceptionPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.category.class_name(), self.message)
    }
}

/// Raises an exception whose class is chosen by `error_number` and whose
/// message is `message` verbatim.
pub fn post_exception<H>(host: &mut H, error_number: c_int, message: &str)
where
    H: HostRuntime + ?Sized,
{
    raise(host, &ExceptionPayload::new(error_number, message));
}

/// Like [`post_exception`], but the message names `filename` and carries the
/// standard description of `error_number`.
pub fn post_file_exception<H>(host: &mut H, error_number: c_int, filename: &str)
where
    H: HostRuntime + ?Sized,
{
    raise(host, &ExceptionPayload::for_file(error_number, filename));
}

fn raise<H>(host: &mut H, payload: &ExceptionPayload)
where
    H: HostRuntime + ?Sized,
{
    let refusal = host.throw_new(payload).err();
    let raised = refusal.is_none();
    check!(
        raised,
        "cannot raise {payload}: {}",
        refusal.map(|err| err.to_string()).unwrap_or_default()
    );
}

/// Returns the C library's description of `error_number`.
pub fn error_message(error_number: c_int) -> String {
    let mut buf: [c_char; 256] = [0; 256];
    // SAFETY: `buf` is writable for `buf.len()` bytes and strerror_r never
    // writes past the length it is given.
    let rc = unsafe { libc::strerror_r(error_number, buf.as_mut_ptr(), buf.len()) };
    // Unknown numbers fail with EINVAL but usually still fill in "Unknown error N".
    if rc != 0 && buf[0] == 0 {
        return format!("Unknown error {error_number}");
    }
    // Guarantee termination even if the text was truncated.
    buf[buf.len() - 1] = 0;
    // SAFETY: `buf` is NUL-terminated.
    unsafe { CStr::from_ptr(buf.as_ptr()) }
        .to_string_lossy()
        .into_owned()
}
