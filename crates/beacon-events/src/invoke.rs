//! Seams to the embedding scripting runtime.
//!
//! The registry never sees a concrete closure or script value type. The
//! runtime supplies an [`Invocable`] per listener and a [`ValueConverter`]
//! that maps domain [`Value`]s into whatever the runtime passes to callbacks.

use crate::value::Value;

/// Boxed error returned by collaborators.
///
/// Not `Send`: dispatch is single-threaded and script runtimes hand back
/// errors that cannot leave their thread.
pub type BoxError = Box<dyn std::error::Error + 'static>;

/// A callback that can be invoked with an ordered argument list.
///
/// Implementations may call back into the registry (register, remove,
/// clear, even dispatch) while running.
pub trait Invocable<V> {
    /// Run the callback.
    ///
    /// # Errors
    ///
    /// Returns the callback's own failure. The registry reports it and keeps
    /// delivering to the remaining listeners.
    fn invoke(&self, arguments: &[V]) -> Result<(), BoxError>;
}

impl<V, F> Invocable<V> for F
where
    F: Fn(&[V]) -> Result<(), BoxError>,
{
    fn invoke(&self, arguments: &[V]) -> Result<(), BoxError> {
        self(arguments)
    }
}

/// Converts domain values into the scripting runtime's representation.
pub trait ValueConverter {
    /// Script-side value type handed to callbacks.
    type Output;

    /// Convert one argument.
    ///
    /// # Errors
    ///
    /// Returns an error if the runtime cannot represent the value.
    fn convert(&self, value: &Value) -> Result<Self::Output, BoxError>;
}

/// Converter that hands callbacks the domain values unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityConverter;

impl ValueConverter for IdentityConverter {
    type Output = Value;

    fn convert(&self, value: &Value) -> Result<Value, BoxError> {
        Ok(value.clone())
    }
}
