//! Export rendering and the mock email sender.
//!
//! This crate renders export content; writing files (or triggering a
//! download) is the presentation layer's side of the contract. Empty
//! datasets render to `None` — exports silently no-op rather than erroring.

use crate::error::StoreError;
use crate::queries::InsightsService;
use crate::types::Call;

/// Lines of body text per report page.
const REPORT_LINES_PER_PAGE: usize = 35;

/// Quote a CSV field if it contains a comma or double-quote, doubling any
/// embedded quotes.
fn csv_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Render flat records as CSV with a header row. `None` when there are no
/// rows.
pub fn render_csv(fields: &[&str], rows: &[Vec<String>]) -> Option<String> {
    if rows.is_empty() {
        return None;
    }
    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(fields.iter().map(|f| csv_field(f)).collect::<Vec<_>>().join(","));
    for row in rows {
        lines.push(row.iter().map(|v| csv_field(v)).collect::<Vec<_>>().join(","));
    }
    Some(lines.join("\n"))
}

/// Flatten calls into the CSV shape the search page exports.
pub fn calls_csv(calls: &[Call]) -> Option<String> {
    let fields = [
        "id",
        "agentName",
        "customerName",
        "startedAt",
        "durationSec",
        "sentimentScore",
        "sentimentLabel",
        "topics",
        "resolved",
        "csat",
    ];
    let rows: Vec<Vec<String>> = calls
        .iter()
        .map(|c| {
            vec![
                c.id.clone(),
                c.agent_name.clone(),
                c.customer_name.clone(),
                c.started_at.clone(),
                c.duration_sec.to_string(),
                c.sentiment_score.to_string(),
                c.sentiment_label.as_str().to_string(),
                c.topics.join("; "),
                c.resolved.to_string(),
                c.csat.map(|v| v.to_string()).unwrap_or_default(),
            ]
        })
        .collect();
    render_csv(&fields, &rows)
}

/// Paginate freeform multi-line text into report pages: a titled first
/// page, then a fixed line count per page. `None` for blank input.
pub fn paginate_report(title: &str, body: &str) -> Option<Vec<String>> {
    if body.trim().is_empty() {
        return None;
    }
    let lines: Vec<&str> = body.lines().collect();
    let mut pages = Vec::new();
    for (i, chunk) in lines.chunks(REPORT_LINES_PER_PAGE).enumerate() {
        if i == 0 {
            pages.push(format!("{}\n\n{}", title, chunk.join("\n")));
        } else {
            pages.push(chunk.join("\n"));
        }
    }
    Some(pages)
}

impl InsightsService {
    /// Mock email "send": appends to the sent-email log, no transport.
    pub fn send_email_mock(
        &mut self,
        to: &str,
        subject: &str,
        body: &str,
    ) -> Result<String, StoreError> {
        self.store_mut().add_sent_email(to, subject, body)?;
        Ok(format!("Email queued to {to}"))
    }
}
