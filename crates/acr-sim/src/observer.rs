//! Run observer trait for progress reporting.

use acr_agent::PassengerStore;
use acr_core::Tick;

/// Callbacks invoked by [`Run::run`][crate::Run::run] at step boundaries.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example — exposure printer
///
/// ```rust,ignore
/// struct ExposurePrinter;
///
/// impl RunObserver for ExposurePrinter {
///     fn on_step_end(&mut self, step: Tick, exposures: usize, _store: &PassengerStore) {
///         if exposures > 0 {
///             println!("{step}: {exposures} new exposures");
///         }
///     }
/// }
/// ```
pub trait RunObserver {
    /// Called at the start of each step, before the dose phase.
    fn on_step_start(&mut self, _step: Tick) {}

    /// Called at the end of each step.
    ///
    /// `exposures` is the number of S→E transitions this step; `store` gives
    /// read-only access to the full passenger state.
    fn on_step_end(&mut self, _step: Tick, _exposures: usize, _store: &PassengerStore) {}

    /// Called once after the final step completes (not called on failure).
    fn on_run_end(&mut self, _final_step: Tick) {}
}

/// A [`RunObserver`] that does nothing.
pub struct NoopObserver;

impl RunObserver for NoopObserver {}
