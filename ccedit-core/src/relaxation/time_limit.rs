//! Wall-clock limit around an [`LpSolver`].

use std::{
    sync::{Arc, mpsc},
    thread,
    time::Duration,
};

use tracing::warn;

use crate::error::SolverError;

use super::{LpSolution, LpSolver, RelaxationProgram};

/// Runs the wrapped solver on a worker thread and gives up after `limit`.
///
/// Backends cannot be interrupted, so a timed-out worker is detached and
/// finishes in the background; its result is dropped.
///
/// # Examples
/// ```
/// use std::{sync::Arc, time::Duration};
///
/// use ccedit_core::{LpSolution, LpSolver, RelaxationProgram, SolverError, TimeLimitedSolver};
///
/// struct Zeros;
///
/// impl LpSolver for Zeros {
///     fn name(&self) -> &str {
///         "zeros"
///     }
///
///     fn solve(&self, program: &RelaxationProgram) -> Result<LpSolution, SolverError> {
///         Ok(LpSolution::new(vec![0.0; program.variable_count()]))
///     }
/// }
///
/// let solver = TimeLimitedSolver::new(Arc::new(Zeros), Duration::from_secs(5));
/// assert_eq!(solver.name(), "zeros");
/// assert_eq!(solver.limit(), Duration::from_secs(5));
/// ```
#[derive(Clone)]
pub struct TimeLimitedSolver {
    inner: Arc<dyn LpSolver + Send + Sync>,
    limit: Duration,
}

impl TimeLimitedSolver {
    /// Wraps `inner` with a wall-clock `limit`.
    #[must_use]
    pub fn new(inner: Arc<dyn LpSolver + Send + Sync>, limit: Duration) -> Self {
        Self { inner, limit }
    }

    /// Configured limit.
    #[must_use]
    #[rustfmt::skip]
    pub fn limit(&self) -> Duration { self.limit }
}

impl std::fmt::Debug for TimeLimitedSolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimeLimitedSolver")
            .field("inner", &self.inner.name())
            .field("limit", &self.limit)
            .finish()
    }
}

impl LpSolver for TimeLimitedSolver {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn solve(&self, program: &RelaxationProgram) -> Result<LpSolution, SolverError> {
        let (sender, receiver) = mpsc::channel();
        let inner = Arc::clone(&self.inner);
        let program = program.clone();
        thread::Builder::new()
            .name("ccedit-lp-solve".to_owned())
            .spawn(move || {
                // The receiver is gone once the limit elapsed.
                let _ = sender.send(inner.solve(&program));
            })
            .map_err(|err| SolverError::Backend {
                message: format!("failed to spawn solver thread: {err}"),
            })?;

        match receiver.recv_timeout(self.limit) {
            Ok(result) => result,
            Err(mpsc::RecvTimeoutError::Timeout) => {
                warn!(
                    solver = self.inner.name(),
                    limit_ms = u64::try_from(self.limit.as_millis()).unwrap_or(u64::MAX),
                    "solver exceeded its time limit"
                );
                Err(SolverError::TimedOut { limit: self.limit })
            }
            Err(mpsc::RecvTimeoutError::Disconnected) => Err(SolverError::Backend {
                message: "solver thread exited without a result".to_owned(),
            }),
        }
    }
}
