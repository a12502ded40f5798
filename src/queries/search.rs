//! Call search with simulated remote latency.

use rand::RngExt;
use serde::{Deserialize, Serialize};

use crate::summary;
use crate::types::Call;

use super::InsightsService;

const DEFAULT_PAGE_SIZE: usize = 20;

/// Search criteria. Omitted fields mean "no constraint", never "constrain
/// to empty". All criteria are combined with AND; the keyword alone fans
/// out (OR) across transcript text, topics, customer name, and agent name.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchParams {
    pub keyword: Option<String>,
    pub agent_id: Option<String>,
    pub agent_ids: Option<Vec<String>>,
    pub sentiment_min: Option<f64>,
    pub sentiment_max: Option<f64>,
    /// ISO-8601 bounds compared lexicographically — callers must pass
    /// zero-padded dates for correct ordering.
    pub date_from: Option<String>,
    pub date_to: Option<String>,
    /// 1-indexed.
    pub page: Option<usize>,
    pub page_size: Option<usize>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub calls: Vec<Call>,
    pub total: usize,
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
}

impl InsightsService {
    /// Search the corpus. Sleeps 200–400 ms first to emulate a remote
    /// analytics call — a UX-simulation contract, not a correctness one.
    ///
    /// There is no cancellation: once issued a search always resolves, and
    /// overlapping searches may resolve out of order. A later-issued but
    /// faster-resolving response can overwrite a newer one in the caller's
    /// view; that race is an accepted property of the demo.
    pub async fn search_calls(&self, params: &SearchParams) -> SearchResult {
        let delay_ms = rand::rng().random_range(200..=400u64);
        tokio::time::sleep(std::time::Duration::from_millis(delay_ms)).await;
        self.search_calls_now(params)
    }

    /// The synchronous filter/paginate core of `search_calls`.
    pub fn search_calls_now(&self, params: &SearchParams) -> SearchResult {
        let page = params.page.unwrap_or(1).max(1);
        let page_size = params.page_size.unwrap_or(DEFAULT_PAGE_SIZE).max(1);

        let filtered: Vec<&Call> = self
            .corpus
            .calls
            .iter()
            .filter(|call| matches(call, params))
            .collect();

        let total = filtered.len();
        let total_pages = total.div_ceil(page_size);
        let start = (page - 1) * page_size;
        // Page beyond range yields an empty slice with totals still correct.
        let calls: Vec<Call> = filtered
            .into_iter()
            .skip(start)
            .take(page_size)
            .cloned()
            .collect();

        SearchResult {
            calls,
            total,
            page,
            page_size,
            total_pages,
        }
    }
}

fn matches(call: &Call, params: &SearchParams) -> bool {
    if let Some(keyword) = params.keyword.as_deref().filter(|k| !k.trim().is_empty()) {
        let keyword = keyword.to_lowercase();
        let transcript_match = summary::script_for(call.sentiment_label)
            .iter()
            .any(|(_, text, _)| text.to_lowercase().contains(&keyword));
        let topic_match = call.topics.iter().any(|t| t.contains(&keyword));
        let name_match = call.customer_name.to_lowercase().contains(&keyword)
            || call.agent_name.to_lowercase().contains(&keyword);
        if !transcript_match && !topic_match && !name_match {
            return false;
        }
    }
    if let Some(agent_id) = &params.agent_id {
        if &call.agent_id != agent_id {
            return false;
        }
    }
    if let Some(agent_ids) = params.agent_ids.as_deref().filter(|ids| !ids.is_empty()) {
        if !agent_ids.contains(&call.agent_id) {
            return false;
        }
    }
    if let Some(min) = params.sentiment_min {
        if call.sentiment_score < min {
            return false;
        }
    }
    if let Some(max) = params.sentiment_max {
        if call.sentiment_score > max {
            return false;
        }
    }
    if let Some(from) = &params.date_from {
        if &call.started_at < from {
            return false;
        }
    }
    if let Some(to) = &params.date_to {
        if &call.started_at > to {
            return false;
        }
    }
    true
}
