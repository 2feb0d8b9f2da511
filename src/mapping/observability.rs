use std::fmt;
use std::sync::Arc;

use crate::error::TabularError;

/// Severity classification used for observer callbacks and alerting thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum MappingSeverity {
    /// Informational event.
    Info,
    /// Warning-level event (caller misuse, nothing was touched).
    Warning,
    /// Error-level event (operation failed).
    Error,
    /// Critical error (I/O or a sheet whose rows could not be loaded).
    Critical,
}

/// Which mapping operation produced an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MappingOperation {
    /// Header-matched read into records.
    Read,
    /// Ordinal-positioned read into records.
    ReadPositional,
    /// Raw row scan with a callback.
    Scan,
    /// Records written into a new workbook.
    Write,
}

/// Context about a mapping attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingContext {
    /// Operation that produced the event.
    pub operation: MappingOperation,
    /// Sheet requested by the caller.
    pub sheet: String,
}

impl MappingContext {
    /// Create a context for `operation` on `sheet`.
    pub fn new(operation: MappingOperation, sheet: impl Into<String>) -> Self {
        Self {
            operation,
            sheet: sheet.into(),
        }
    }
}

/// Minimal stats reported on success.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MappingStats {
    /// Records read or written (rows visited for a scan).
    pub rows: usize,
}

/// Observer interface for mapping outcomes.
///
/// Implementors can record metrics, logs, or trigger alerts.
pub trait MappingObserver: Send + Sync {
    /// Called when a mapping operation succeeds.
    fn on_success(&self, _ctx: &MappingContext, _stats: MappingStats) {}

    /// Called when a mapping operation fails.
    fn on_failure(&self, _ctx: &MappingContext, _severity: MappingSeverity, _error: &TabularError) {}

    /// Called when a failure meets the alert threshold.
    ///
    /// Default behavior forwards to [`Self::on_failure`].
    fn on_alert(&self, ctx: &MappingContext, severity: MappingSeverity, error: &TabularError) {
        self.on_failure(ctx, severity, error)
    }
}

/// Fans callbacks out to a list of observers.
#[derive(Default)]
pub struct CompositeObserver {
    observers: Vec<Arc<dyn MappingObserver>>,
}

impl CompositeObserver {
    /// Create a new composite observer from a list of observers.
    pub fn new(observers: Vec<Arc<dyn MappingObserver>>) -> Self {
        Self { observers }
    }
}

impl fmt::Debug for CompositeObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeObserver")
            .field("observers_len", &self.observers.len())
            .finish()
    }
}

impl MappingObserver for CompositeObserver {
    fn on_success(&self, ctx: &MappingContext, stats: MappingStats) {
        for o in &self.observers {
            o.on_success(ctx, stats);
        }
    }

    fn on_failure(&self, ctx: &MappingContext, severity: MappingSeverity, error: &TabularError) {
        for o in &self.observers {
            o.on_failure(ctx, severity, error);
        }
    }

    fn on_alert(&self, ctx: &MappingContext, severity: MappingSeverity, error: &TabularError) {
        for o in &self.observers {
            o.on_alert(ctx, severity, error);
        }
    }
}

/// Logs mapping events to stderr, one line per event.
#[derive(Debug, Default)]
pub struct StdErrObserver;

impl MappingObserver for StdErrObserver {
    fn on_success(&self, ctx: &MappingContext, stats: MappingStats) {
        eprintln!(
            "[sheet][ok] op={:?} sheet={} rows={}",
            ctx.operation, ctx.sheet, stats.rows
        );
    }

    fn on_failure(&self, ctx: &MappingContext, severity: MappingSeverity, error: &TabularError) {
        eprintln!(
            "[sheet][{:?}] op={:?} sheet={} err={}",
            severity, ctx.operation, ctx.sheet, error
        );
    }

    fn on_alert(&self, ctx: &MappingContext, severity: MappingSeverity, error: &TabularError) {
        eprintln!(
            "[ALERT][sheet][{:?}] op={:?} sheet={} err={}",
            severity, ctx.operation, ctx.sheet, error
        );
    }
}

/// Severity assigned to a failed operation.
pub fn severity_for_error(e: &TabularError) -> MappingSeverity {
    match e {
        TabularError::Io(_) => MappingSeverity::Critical,
        TabularError::RowIterator { .. } => MappingSeverity::Critical,
        TabularError::EmptyInput => MappingSeverity::Warning,
        TabularError::MissingUpload { .. } => MappingSeverity::Warning,
        TabularError::Open(_)
        | TabularError::SheetNotFound { .. }
        | TabularError::ScanAborted { .. }
        | TabularError::InvalidCellReference { .. }
        | TabularError::Xlsx(_) => MappingSeverity::Error,
        #[cfg(feature = "http")]
        TabularError::Http(_) => MappingSeverity::Error,
    }
}

pub(crate) fn report(
    observer: Option<&Arc<dyn MappingObserver>>,
    alert_at_or_above: MappingSeverity,
    ctx: &MappingContext,
    outcome: Result<usize, &TabularError>,
) {
    let Some(obs) = observer else {
        return;
    };
    match outcome {
        Ok(rows) => obs.on_success(ctx, MappingStats { rows }),
        Err(e) => {
            let sev = severity_for_error(e);
            obs.on_failure(ctx, sev, e);
            if sev >= alert_at_or_above {
                obs.on_alert(ctx, sev, e);
            }
        }
    }
}
