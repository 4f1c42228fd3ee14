//! Stand-in for the namespace sandbox on platforms where it cannot run.
//!
//! The build graph always declares a `namespace-sandbox` target. Where Linux
//! namespaces are unavailable this binary takes its place so that building
//! the target succeeds instead of failing with an unhelpful message. It has
//! no flags, reads no environment and prints nothing.

/// Terminates the process with status 0.
pub fn run_main() -> ! {
    std::process::exit(0);
}
