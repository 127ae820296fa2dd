//! Progress notification port
//!
//! Defines the interface for reporting progress during an analysis run.

use concept_domain::BackendDescriptor;

/// Callback for progress updates during analysis
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (console, web UI, etc.)
pub trait AnalysisProgress: Send + Sync {
    /// Called once the shared prompt is built and backends are dispatched
    fn on_dispatch_start(&self, total_backends: usize);

    /// Called as each backend finishes, in completion order
    fn on_backend_complete(&self, backend: &BackendDescriptor, success: bool);

    /// Called when the final result is assembled
    fn on_analysis_complete(&self, _fallback_used: bool) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl AnalysisProgress for NoProgress {
    fn on_dispatch_start(&self, _total_backends: usize) {}
    fn on_backend_complete(&self, _backend: &BackendDescriptor, _success: bool) {}
}
