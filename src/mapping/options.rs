use std::fmt;
use std::sync::Arc;

use super::observability::{MappingObserver, MappingSeverity};

/// Sheet used when the caller does not name one.
pub const DEFAULT_SHEET: &str = "Sheet1";

/// How to choose the sheet to read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SheetSelection {
    /// A sheet by exact name.
    Named(String),
    /// Whatever sheet comes first in the workbook.
    First,
}

impl Default for SheetSelection {
    fn default() -> Self {
        Self::Named(DEFAULT_SHEET.to_string())
    }
}

impl fmt::Display for SheetSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(name) => f.write_str(name),
            Self::First => f.write_str("<first>"),
        }
    }
}

/// Options controlling reads.
///
/// Use [`Default`] for the common case (`Sheet1`, no observer).
#[derive(Clone)]
pub struct ReadOptions {
    /// Sheet to read. Defaults to `Sheet1`.
    pub sheet: SheetSelection,
    /// Optional observer for logging/alerts.
    pub observer: Option<Arc<dyn MappingObserver>>,
    /// Severity threshold at which `on_alert` is invoked.
    pub alert_at_or_above: MappingSeverity,
}

impl ReadOptions {
    /// Read the named sheet.
    pub fn sheet(name: impl Into<String>) -> Self {
        Self {
            sheet: SheetSelection::Named(name.into()),
            ..Default::default()
        }
    }
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            sheet: SheetSelection::default(),
            observer: None,
            alert_at_or_above: MappingSeverity::Critical,
        }
    }
}

impl fmt::Debug for ReadOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReadOptions")
            .field("sheet", &self.sheet)
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

/// Options controlling writes.
#[derive(Clone)]
pub struct WriteOptions {
    /// Name of the sheet to create. Defaults to `Sheet1`.
    pub sheet_name: String,
    /// Optional observer for logging/alerts.
    pub observer: Option<Arc<dyn MappingObserver>>,
    /// Severity threshold at which `on_alert` is invoked.
    pub alert_at_or_above: MappingSeverity,
}

impl WriteOptions {
    /// Write into a sheet named `name`.
    pub fn sheet(name: impl Into<String>) -> Self {
        Self {
            sheet_name: name.into(),
            ..Default::default()
        }
    }
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            sheet_name: DEFAULT_SHEET.to_string(),
            observer: None,
            alert_at_or_above: MappingSeverity::Critical,
        }
    }
}

impl fmt::Debug for WriteOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WriteOptions")
            .field("sheet_name", &self.sheet_name)
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}
