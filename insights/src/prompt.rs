//! Prompt construction for AI insights

use linkprobe_core::Report;

/// Number of broken links quoted in the prompt
pub const TOP_BROKEN_LINKS: usize = 5;

pub fn system_prompt() -> &'static str {
    "You are an expert QA analyst specializing in link validation and web performance."
}

pub fn build_prompt(report: &Report) -> String {
    let top_broken = report
        .broken_links
        .iter()
        .take(TOP_BROKEN_LINKS)
        .map(|l| format!("- {} ({})", l.url, l.status))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"
Analyze this link validation report and provide actionable insights:

Locale: {locale}
Environment: {environment}
Pages Scanned: {pages}
Total Links: {total}
Successful: {success}
Broken (404): {broken_404}
Server Errors (5xx): {broken_5xx}
Skipped: {skipped}

Top broken links:
{top_broken}

Provide in JSON format:
{{
  "severity": "Critical|High|Medium|Low",
  "mostAffectedPages": ["page1", "page2"],
  "commonPatterns": ["pattern1", "pattern2"],
  "rootCauseAnalysis": "brief explanation",
  "recommendedActions": ["action1", "action2"],
  "summary": "one-line summary"
}}
"#,
        locale = report.locale,
        environment = report.environment,
        pages = report.pages_scanned,
        total = report.total_links,
        success = report.success_count,
        broken_404 = report.count_404(),
        broken_5xx = report.count_5xx(),
        skipped = report.skipped,
    )
}
