//! Exemplar call selection.

use serde::{Deserialize, Serialize};

use crate::types::{Call, SentimentLabel};

use super::InsightsService;

/// How many corpus calls back the default exemplar list when no flags are
/// set.
const DEFAULT_EXEMPLAR_COUNT: usize = 8;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExemplarFilters {
    pub topic: Option<String>,
    pub min_sentiment: Option<f64>,
}

impl InsightsService {
    /// Union of supervisor-flagged exemplars and the default fallback (the
    /// first eight positive resolved calls in corpus order), deduplicated
    /// with flagged calls first. Flags pointing at unknown call ids are
    /// dropped rather than erroring.
    pub fn get_exemplars(&self, filters: &ExemplarFilters) -> Vec<&Call> {
        let mut ids: Vec<&str> = self
            .store
            .exemplar_call_ids()
            .iter()
            .map(String::as_str)
            .collect();
        for call in self
            .corpus
            .calls
            .iter()
            .filter(|c| c.sentiment_label == SentimentLabel::Positive && c.resolved)
            .take(DEFAULT_EXEMPLAR_COUNT)
        {
            if !ids.contains(&call.id.as_str()) {
                ids.push(&call.id);
            }
        }

        ids.iter()
            .filter_map(|id| self.corpus.call(id))
            .filter(|call| {
                if let Some(topic) = &filters.topic {
                    if !call.has_topic(topic) {
                        return false;
                    }
                }
                if let Some(min) = filters.min_sentiment {
                    if call.sentiment_score < min {
                        return false;
                    }
                }
                true
            })
            .collect()
    }
}
