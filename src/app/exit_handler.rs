//! Exit code logic for the labsite process.
//!
//! Single responsibility: map a validation report to the process exit outcome.

use labsite_core::ValidationReport;

use crate::ProcessExit;

/// Errors always fail; warnings only count when `strict` is set.
pub(crate) fn determine_validation_exit(report: &ValidationReport, strict: bool) -> ProcessExit {
    if report.has_errors() {
        ProcessExit::Failure
    } else if strict && report.warning_count() > 0 {
        ProcessExit::Partial
    } else {
        ProcessExit::Success
    }
}
