//! Where caught dispatch failures go.

use tracing::warn;

use crate::error::DispatchError;

/// Receives failures caught during dispatch.
pub trait ErrorReporter {
    /// Report one failure. Must not panic.
    fn report(&self, error: &DispatchError);
}

impl<F> ErrorReporter for F
where
    F: Fn(&DispatchError),
{
    fn report(&self, error: &DispatchError) {
        self(error);
    }
}

/// Default reporter: logs each failure as a `warn` event.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl ErrorReporter for TracingReporter {
    fn report(&self, error: &DispatchError) {
        match error.listener() {
            Some(listener) => warn!(
                listener_id = %listener,
                event = %error.event(),
                entity = %error.entity(),
                error = %error,
                "Event listener failed"
            ),
            None => warn!(
                event = %error.event(),
                entity = %error.entity(),
                error = %error,
                "Event arguments could not be converted"
            ),
        }
    }
}
