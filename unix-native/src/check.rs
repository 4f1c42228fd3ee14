use std::fmt;

/// Aborts the process when `condition` is false.
///
/// Reserved for contract violations between the host runtime and this
/// library, where returning an error would leave the caller in an undefined
/// state. An optional format string adds detail to the failure line; its
/// arguments are only evaluated when the check fails.
#[macro_export]
macro_rules! check {
    ($condition:expr $(,)?) => {
        if !$condition {
            $crate::check_failed(file!(), line!(), stringify!($condition), None);
        }
    };
    ($condition:expr, $($detail:tt)+) => {
        if !$condition {
            $crate::check_failed(
                file!(),
                line!(),
                stringify!($condition),
                Some(format_args!($($detail)+)),
            );
        }
    };
}

#[doc(hidden)]
#[cold]
pub fn check_failed(
    file: &str,
    line: u32,
    condition: &str,
    detail: Option<fmt::Arguments<'_>>,
) -> ! {
    let message = match detail {
        Some(detail) => format!("{file}:{line}: check failed: {condition}: {detail}"),
        None => format!("{file}:{line}: check failed: {condition}"),
    };
    tracing::error!("{message}");
    eprintln!("{message}");
    std::process::abort();
}
