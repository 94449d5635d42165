use crate::clock::Clock;
use crate::profiler::state::ProfilingState;
use crate::profiler::Instrumented;
use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

/// A transparent stand-in that times the measured operations of an interface
///
/// `Profiled<dyn I>` implements `I` by forwarding every call to the wrapped object through
/// [`Profiled::measure`] or [`Profiled::measure_async`]. Operations declared as measured in
/// `I`'s [`Instrumented`] declaration are timed; all others pass straight through.
/// Build one with [`Profiler::wrap`](crate::profiler::Profiler::wrap).
pub struct Profiled<I: ?Sized> {
    inner: Arc<I>,
    implementation: &'static str,
    state: Arc<ProfilingState>,
    clock: Arc<dyn Clock>,
}

impl<I: ?Sized + Instrumented> Profiled<I> {
    pub(crate) fn new(inner: Arc<I>, state: Arc<ProfilingState>, clock: Arc<dyn Clock>) -> Self {
        let implementation = inner.type_name();
        Self {
            inner,
            implementation,
            state,
            clock,
        }
    }

    /// The wrapped object
    pub fn inner(&self) -> &I {
        &self.inner
    }

    /// Whether calls to `operation` are timed
    pub fn is_measured(operation: &str) -> bool {
        I::OPERATIONS
            .iter()
            .any(|op| op.measured && op.name == operation)
    }

    /// Runs a synchronous call, timing it if `operation` is measured
    pub fn measure<T>(&self, operation: &'static str, call: impl FnOnce() -> T) -> T {
        let _timer = self.start(operation);
        call()
    }

    /// Awaits an asynchronous call, timing it if `operation` is measured
    pub async fn measure_async<F: Future>(&self, operation: &'static str, call: F) -> F::Output {
        let _timer = self.start(operation);
        call.await
    }

    fn start(&self, operation: &'static str) -> Option<CallTimer<'_>> {
        if !Self::is_measured(operation) {
            return None;
        }

        Some(CallTimer {
            state: &self.state,
            clock: self.clock.as_ref(),
            implementation: self.implementation,
            operation,
            started: self.clock.instant(),
        })
    }
}

/// Records the elapsed time of one call when dropped
///
/// Dropping happens on every exit path: a normal return, an error value, a panic unwinding
/// through the call, or an async call being cancelled.
struct CallTimer<'a> {
    state: &'a ProfilingState,
    clock: &'a dyn Clock,
    implementation: &'static str,
    operation: &'static str,
    started: Instant,
}

impl Drop for CallTimer<'_> {
    fn drop(&mut self) {
        let elapsed = self.clock.instant().saturating_duration_since(self.started);
        self.state
            .record(self.implementation, self.operation, elapsed);
    }
}
