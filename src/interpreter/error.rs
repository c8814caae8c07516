use alloc::borrow::Cow;
use alloc::format;
use alloc::string::String;
use core::fmt;

/// Why a single directive call did not complete.
///
/// None of these stop a run: the interpreter reports the error for the
/// offending line and moves on to the next one.
#[derive(Debug, Clone, PartialEq)]
pub enum DispatchError {
    UnknownDirective(String),
    ArityMismatch {
        name: String,
        expected: usize,
        found: usize,
    },
    ActionFailed(Cow<'static, str>),
}

macro_rules! bail_action {
    ($msg:expr, $($arg:tt)*) => { return Err(DispatchError::ActionFailed(alloc::format!($msg, $($arg)*).into())) };
    ($msg:expr) =>              { return Err(DispatchError::ActionFailed(alloc::format!($msg).into())) };
}

pub(crate) use bail_action;

pub trait ErrorContext: Sized {
    type Ok;
    fn context_action(
        self,
        msg: impl Into<Cow<'static, str>>,
    ) -> Result<Self::Ok, DispatchError> {
        self.with_context_action(|| msg)
    }
    fn with_context_action<R: Into<Cow<'static, str>>>(
        self,
        f: impl FnOnce() -> R,
    ) -> Result<Self::Ok, DispatchError>;
}

impl<T, E: fmt::Display> ErrorContext for Result<T, E> {
    type Ok = T;
    fn with_context_action<R: Into<Cow<'static, str>>>(
        self,
        f: impl FnOnce() -> R,
    ) -> Result<T, DispatchError> {
        self.map_err(|e| DispatchError::ActionFailed(Cow::from(format!("{}: {}", f().into(), e))))
    }
}

impl<T> ErrorContext for Option<T> {
    type Ok = T;
    fn with_context_action<R: Into<Cow<'static, str>>>(
        self,
        f: impl FnOnce() -> R,
    ) -> Result<T, DispatchError> {
        self.ok_or_else(|| DispatchError::ActionFailed(f().into()))
    }
}

impl fmt::Display for DispatchError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DispatchError::UnknownDirective(name) => write!(f, "Unknown directive: {}", name),
            DispatchError::ArityMismatch {
                name,
                expected,
                found,
            } => write!(
                f,
                "Directive '{}' expects {} argument(s), got {}",
                name, expected, found
            ),
            DispatchError::ActionFailed(msg) => write!(f, "{}", msg),
        }
    }
}

impl core::error::Error for DispatchError {}
