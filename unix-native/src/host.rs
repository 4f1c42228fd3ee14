use crate::errors::ExceptionPayload;

/// The embedding runtime's exception mechanism.
///
/// An implementation makes `payload` the pending exception of the calling
/// thread, using [`ExceptionCategory::class_name`] to pick the class.
///
/// [`ExceptionCategory::class_name`]: crate::ExceptionCategory::class_name
pub trait HostRuntime {
    fn throw_new(&mut self, payload: &ExceptionPayload) -> Result<(), HostError>;
}

#[derive(Debug, thiserror::Error)]
pub enum HostError {
    #[error("exception class {class_name} not found")]
    ClassNotFound { class_name: &'static str },
    #[error("failed to throw {class_name}: {reason}")]
    ThrowFailed {
        class_name: &'static str,
        reason: String,
    },
}
