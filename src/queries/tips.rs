//! Post-call coaching tips.
//!
//! Four independent rules are evaluated against a single call; each firing
//! rule contributes one templated tip (capped at three) and one clause of
//! the reason string. A clean call gets a single reinforcement tip.

use serde::Serialize;

use crate::error::StoreError;
use crate::types::{AgentTip, Call};

use super::InsightsService;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TipResult {
    pub tips: Vec<String>,
    pub reason: String,
}

/// Pure function of one call record.
pub fn generate_post_call_tips(call: &Call) -> TipResult {
    let mut tips: Vec<String> = Vec::new();
    let mut reasons: Vec<&str> = Vec::new();

    if call.sentiment_score < -0.3 {
        tips.push("Try acknowledging the customer's frustration earlier in the call".to_string());
        reasons.push("negative sentiment detected");
    }
    if call.duration_sec > 900 {
        tips.push("Consider summarizing the issue earlier to reduce call duration".to_string());
        reasons.push("long call duration");
    }
    if !call.resolved {
        tips.push("Ensure clear next steps are communicated before ending the call".to_string());
        reasons.push("call not resolved");
    }
    if call.has_topic("refund") || call.has_topic("cancellation") {
        tips.push(
            "For retention calls, try offering alternatives before processing cancellation"
                .to_string(),
        );
        reasons.push("retention opportunity");
    }

    if tips.is_empty() {
        tips.push("Great job! Continue maintaining your positive interaction style".to_string());
    }
    tips.truncate(3);

    let reason = if reasons.is_empty() {
        "Based on call analysis".to_string()
    } else {
        format!("Based on: {}", reasons.join(", "))
    };

    TipResult { tips, reason }
}

impl InsightsService {
    /// Generate tips for a call and record them against its agent.
    /// `None` when the call id is unknown.
    pub fn record_post_call_tips(&mut self, call_id: &str) -> Result<Option<AgentTip>, StoreError> {
        let Some(call) = self.corpus.call(call_id) else {
            return Ok(None);
        };
        let agent_id = call.agent_id.clone();
        let result = generate_post_call_tips(call);
        self.store
            .add_agent_tip(call_id, &agent_id, result.tips, &result.reason)
            .map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::service_from_calls;
    use super::*;
    use crate::corpus::{agent_roster, test_support::make_call};
    use crate::types::Call;

    fn call_with(score: f64, duration: u32, resolved: bool, topics: &[&str]) -> Call {
        let agents = agent_roster();
        let mut call = make_call("c1", &agents[0], "2026-08-19T10:00:00.000Z", score, topics, resolved);
        call.duration_sec = duration;
        call
    }

    #[test]
    fn each_rule_fires_independently() {
        let result = generate_post_call_tips(&call_with(-0.5, 300, true, &["billing"]));
        assert_eq!(result.tips.len(), 1);
        assert_eq!(result.reason, "Based on: negative sentiment detected");

        let result = generate_post_call_tips(&call_with(0.5, 1200, true, &["billing"]));
        assert_eq!(result.reason, "Based on: long call duration");

        let result = generate_post_call_tips(&call_with(0.5, 300, false, &["billing"]));
        assert_eq!(result.reason, "Based on: call not resolved");

        let result = generate_post_call_tips(&call_with(0.5, 300, true, &["cancellation"]));
        assert_eq!(result.reason, "Based on: retention opportunity");
    }

    #[test]
    fn tips_capped_at_three_when_all_rules_fire() {
        let result = generate_post_call_tips(&call_with(-0.9, 1200, false, &["refund"]));
        assert_eq!(result.tips.len(), 3);
        // All four reasons still appear even though the fourth tip is cut.
        assert_eq!(
            result.reason,
            "Based on: negative sentiment detected, long call duration, call not resolved, retention opportunity"
        );
    }

    #[test]
    fn clean_call_gets_reinforcement() {
        let result = generate_post_call_tips(&call_with(0.8, 300, true, &["upsell"]));
        assert_eq!(result.tips.len(), 1);
        assert!(result.tips[0].starts_with("Great job!"));
        assert_eq!(result.reason, "Based on call analysis");
    }

    #[test]
    fn record_tips_stores_against_agent() {
        let agents = agent_roster();
        let calls = vec![make_call(
            "c1",
            &agents[3],
            "2026-08-19T10:00:00.000Z",
            -0.8,
            &["refund"],
            false,
        )];
        let mut service = service_from_calls(calls);
        let tip = service.record_post_call_tips("c1").unwrap().unwrap();
        assert_eq!(tip.agent_id, "a4");
        assert_eq!(tip.tips.len(), 3);
        assert_eq!(service.store().tips_for_agent("a4").len(), 1);

        assert!(service.record_post_call_tips("missing").unwrap().is_none());
    }
}
