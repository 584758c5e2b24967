//! Cross-locale summary and locale list parsing

use crate::model::{AverageSuccessRate, LocaleSummary, Report, Summary};

/// Two-decimal rendering used for every rate exposed over the API.
/// Ties round up (`3.125` renders as `3.13`).
pub fn format_rate(rate: f64) -> String {
    format!("{:.2}", (rate * 100.0).round() / 100.0)
}

pub fn summarize(reports: &[Report]) -> Summary {
    let mut summary = Summary {
        total_locales: reports.len(),
        locales: Vec::with_capacity(reports.len()),
        total_broken_links: 0,
        total_successful: 0,
        average_success_rate: AverageSuccessRate::default(),
    };

    // Averages the already-rounded per-locale rates, as displayed.
    let mut rate_sum = 0.0;
    for report in reports {
        let rate = format_rate(report.success_rate());
        rate_sum += rate.parse::<f64>().unwrap_or(0.0);

        summary.locales.push(LocaleSummary {
            locale: report.locale.clone(),
            success_rate: rate,
            broken_links: report.broken_count(),
            success_count: report.success_count,
        });

        summary.total_broken_links += report.broken_count();
        summary.total_successful += report.success_count;
    }

    if !summary.locales.is_empty() {
        summary.average_success_rate =
            AverageSuccessRate::Rate(format_rate(rate_sum / summary.locales.len() as f64));
    }

    summary
}

/// Split a comma-separated locale list, trimming each entry.
pub fn parse_locale_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}
