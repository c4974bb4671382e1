//! Run summary logging.

use log::{info, warn};

use crate::SearchReport;

/// Logs a one-line summary of a search, plus a warning when it stopped early.
pub fn log_search_summary(report: &SearchReport) {
    info!(
        "Retrieved {} ad{} from {} page{} in {:.1}s",
        report.records.len(),
        if report.records.len() == 1 { "" } else { "s" },
        report.pages,
        if report.pages == 1 { "" } else { "s" },
        report.elapsed_seconds
    );

    if report.rate_limited > 0 {
        info!("Waited out {} rate limit response(s)", report.rate_limited);
    }

    let demographic_columns = report.records.demographic_columns().len();
    if demographic_columns > 0 {
        info!("{demographic_columns} demographic bucket(s) present");
    }

    if let Some(e) = &report.error {
        warn!(
            "Search stopped early; showing the {} ads retrieved before the error: {e}",
            report.records.len()
        );
    }

    if let Some(export) = &report.export {
        info!("Saved {} rows to {}", export.rows, export.path.display());
    }
}
