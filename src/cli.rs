//! The `catalog-check` command.

use std::path::{Path, PathBuf};

use crate::services::consistency::check_records;
use crate::services::import::load_document;
use crate::settings::Settings;

/// Outcome of a check run, mapped to the process exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckStatus {
    /// No findings, or findings outside strict mode.
    Passed,
    /// Findings were reported and `strict` is set.
    FindingsReported,
    /// No document, or it could not be loaded or checked.
    Failed,
}

impl CheckStatus {
    pub fn code(self) -> u8 {
        match self {
            Self::Passed => 0,
            Self::FindingsReported => 1,
            Self::Failed => 2,
        }
    }
}

/// Check the document at `path`, falling back to `settings.document`.
pub fn run(path: Option<PathBuf>, settings: &Settings) -> CheckStatus {
    let Some(path) = path.or_else(|| settings.document.clone()) else {
        log::error!("No catalog document given; pass a path or set CATALOG__DOCUMENT");
        return CheckStatus::Failed;
    };
    check_document(&path, settings.strict)
}

fn check_document(path: &Path, strict: bool) -> CheckStatus {
    let document = match load_document(path) {
        Ok(document) => document,
        Err(e) => {
            log::error!("{e}");
            return CheckStatus::Failed;
        }
    };

    let report = match check_records(&document.categories, &document.products) {
        Ok(report) => report,
        Err(e) => {
            log::error!("Consistency check failed: {e}");
            return CheckStatus::Failed;
        }
    };

    for finding in &report.findings {
        log::warn!("{finding}");
    }
    log::info!(
        "Checked {} categories and {} products: {} findings",
        report.categories_checked,
        report.products_checked,
        report.findings.len()
    );

    if strict && !report.is_clean() {
        CheckStatus::FindingsReported
    } else {
        CheckStatus::Passed
    }
}
