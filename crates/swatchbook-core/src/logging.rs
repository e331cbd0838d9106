//! Logging facilities for Swatchbook.
//!
//! Swatchbook uses the `tracing` crate for instrumentation. To see logs, install
//! a subscriber in your application:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("swatchbook=debug,swatchbook_core=info")
//!     .init();
//! ```
//!
//! Every event is emitted under one of the [`targets`] so subsystems can be
//! filtered independently.

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Core framework target.
    pub const CORE: &str = "swatchbook_core";
    /// Signal/slot system target.
    pub const SIGNAL: &str = "swatchbook_core::signal";
    /// Property and change notifier target.
    pub const PROPERTY: &str = "swatchbook_core::property";
    /// Deferred task queue target.
    pub const TASK: &str = "swatchbook_core::task";
    /// Palette selection list target.
    pub const SELECTION: &str = "swatchbook::selection";
    /// Swatch strip target.
    pub const STRIP: &str = "swatchbook::strip";
    /// Detail editor target.
    pub const EDITOR: &str = "swatchbook::editor";
    /// Palette/editor synchronization target.
    pub const CONTROLLER: &str = "swatchbook::controller";
    /// User-facing notices target.
    pub const NOTICE: &str = "swatchbook::notice";
    /// Configuration loading target.
    pub const CONFIG: &str = "swatchbook::config";
}

/// A guard for timing an operation with tracing.
///
/// Creates an `info`-level span under `swatchbook::perf` that stays entered
/// until the guard is dropped.
///
/// ```
/// use swatchbook_core::PerfSpan;
///
/// {
///     let _span = PerfSpan::new("rebuild_strip");
///     // work...
/// }
/// ```
pub struct PerfSpan {
    _span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Create a new performance span.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::info_span!(target: "swatchbook::perf", "perf", operation = name);
        Self {
            _span: span.entered(),
        }
    }
}

impl std::fmt::Debug for PerfSpan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PerfSpan").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_targets_are_namespaced() {
        for target in [targets::SIGNAL, targets::PROPERTY, targets::TASK] {
            assert!(target.starts_with(targets::CORE));
        }
        for target in [targets::SELECTION, targets::CONTROLLER, targets::NOTICE] {
            assert!(target.starts_with("swatchbook::"));
        }
    }

    #[test]
    fn test_perf_span() {
        let _span = PerfSpan::new("test_operation");
    }
}
