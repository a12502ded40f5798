//! Synthetic corpus generator.
//!
//! Produces the read-only demo population: a fixed agent roster, a
//! pseudo-random call history over the trailing 30 days, the initial alert
//! list derived from it, and per-day rollups. Everything here is a pure
//! function of the injected random source and clock, so tests run against a
//! seeded `StdRng` and a pinned `now`.

use chrono::{DateTime, Duration, Utc};
use rand::seq::IndexedRandom;
use rand::{Rng, RngExt};

use crate::types::{
    Agent, AgentStatus, Alert, AlertRule, AlertStatus, Call, DailyMetric, SentimentLabel, Severity,
};
use crate::util::{day_str, mean, round2, to_iso};

/// Closed topic vocabulary. No call may carry a topic outside this list.
pub const TOPICS: [&str; 8] = [
    "billing",
    "shipping",
    "returns",
    "technical-support",
    "account-setup",
    "upsell",
    "cancellation",
    "refund",
];

const CUSTOMER_NAMES: [&str; 10] = [
    "John Smith",
    "Mary Johnson",
    "Robert Davis",
    "Patricia Brown",
    "Michael Wilson",
    "Linda Martinez",
    "William Anderson",
    "Barbara Taylor",
    "David Thomas",
    "Elizabeth Moore",
];

pub const DEFAULT_CALL_COUNT: usize = 300;

/// At most this many generator-derived alerts are seeded.
pub const ALERT_CAP: usize = 25;

/// The read-only corpus. Generated once per process; all mutability lives
/// in the annotation store.
#[derive(Debug, Clone)]
pub struct Corpus {
    pub agents: Vec<Agent>,
    pub calls: Vec<Call>,
    pub alerts: Vec<Alert>,
    pub daily_metrics: Vec<DailyMetric>,
}

impl Corpus {
    /// Generate the default-size corpus from the ambient clock and RNG.
    pub fn generate_default() -> Self {
        Self::generate(&mut rand::rng(), DEFAULT_CALL_COUNT, Utc::now())
    }

    /// Generate `call_count` calls ending at `now`. The corpus shape is
    /// reproducible from a seeded RNG and a pinned clock.
    pub fn generate(rng: &mut impl Rng, call_count: usize, now: DateTime<Utc>) -> Self {
        let agents = agent_roster();
        let mut calls: Vec<Call> = (0..call_count)
            .map(|i| generate_call(rng, &agents, i + 1, now))
            .collect();
        // Newest-first ordering is a generation-time invariant; list views
        // and alert seeding both rely on it.
        calls.sort_by(|a, b| b.started_at.cmp(&a.started_at));

        let alerts = derive_alerts(&calls, rng);
        let daily_metrics = derive_daily_metrics(&calls, now);

        log::info!(
            "generated corpus: {} calls, {} alerts, {} metric days",
            calls.len(),
            alerts.len(),
            daily_metrics.len()
        );

        Self {
            agents,
            calls,
            alerts,
            daily_metrics,
        }
    }

    /// Build a corpus from pre-made calls, deriving alerts and rollups the
    /// same way generation does. Used for deterministic fixtures.
    pub fn from_calls(calls: Vec<Call>, rng: &mut impl Rng, now: DateTime<Utc>) -> Self {
        let mut calls = calls;
        calls.sort_by(|a, b| b.started_at.cmp(&a.started_at));
        let alerts = derive_alerts(&calls, rng);
        let daily_metrics = derive_daily_metrics(&calls, now);
        Self {
            agents: agent_roster(),
            calls,
            alerts,
            daily_metrics,
        }
    }

    pub fn call(&self, call_id: &str) -> Option<&Call> {
        self.calls.iter().find(|c| c.id == call_id)
    }

    pub fn agent(&self, agent_id: &str) -> Option<&Agent> {
        self.agents.iter().find(|a| a.id == agent_id)
    }

    pub fn calls_by_agent(&self, agent_id: &str) -> Vec<&Call> {
        self.calls.iter().filter(|c| c.agent_id == agent_id).collect()
    }
}

/// The fixed 12-agent roster.
pub fn agent_roster() -> Vec<Agent> {
    let rows: [(&str, &str, &str, &str, AgentStatus); 12] = [
        ("a1", "Sarah Chen", "Billing", "2023-01-15", AgentStatus::Active),
        ("a2", "Marcus Rodriguez", "Technical", "2022-08-20", AgentStatus::Active),
        ("a3", "Emily Johnson", "Sales", "2023-03-10", AgentStatus::Active),
        ("a4", "David Kim", "Billing", "2022-11-05", AgentStatus::Active),
        ("a5", "Lisa Martinez", "Technical", "2023-05-12", AgentStatus::Away),
        ("a6", "James Wilson", "Sales", "2022-06-30", AgentStatus::Active),
        ("a7", "Rachel Brown", "Returns", "2023-02-18", AgentStatus::Active),
        ("a8", "Michael Davis", "Technical", "2022-09-14", AgentStatus::Active),
        ("a9", "Jennifer Garcia", "Billing", "2023-04-22", AgentStatus::Active),
        ("a10", "Robert Taylor", "Returns", "2022-12-08", AgentStatus::Offline),
        ("a11", "Amanda White", "Sales", "2023-06-01", AgentStatus::Active),
        ("a12", "Christopher Lee", "Technical", "2022-07-19", AgentStatus::Active),
    ];
    rows.iter()
        .map(|(id, name, team, hired, status)| Agent {
            id: id.to_string(),
            name: name.to_string(),
            team: team.to_string(),
            hire_date: hired.to_string(),
            status: *status,
        })
        .collect()
}

/// Three-branch sentiment mixture: 15% negative tail, 50% near-neutral,
/// 35% positive.
fn sample_sentiment(rng: &mut impl Rng) -> f64 {
    let branch: f64 = rng.random();
    if branch < 0.15 {
        -(rng.random::<f64>() * 0.8 + 0.2)
    } else if branch < 0.65 {
        rng.random::<f64>() * 0.4 - 0.1
    } else {
        rng.random::<f64>() * 0.6 + 0.4
    }
}

fn generate_call(rng: &mut impl Rng, agents: &[Agent], seq: usize, now: DateTime<Utc>) -> Call {
    let agent = agents.choose(rng).expect("roster is non-empty");

    let days_ago = rng.random_range(0..30i64);
    let intra_day_sec = rng.random_range(0..86_400i64);
    let started_at = now - Duration::days(days_ago) - Duration::seconds(intra_day_sec);

    let score = round2(sample_sentiment(rng));

    let topic_count = rng.random_range(1..=3usize);
    let topics: Vec<String> = TOPICS
        .choose_multiple(rng, topic_count)
        .map(|t| t.to_string())
        .collect();

    let csat = if rng.random_bool(0.7) {
        Some(rng.random_range(3..=5u8))
    } else {
        None
    };

    Call {
        id: format!("call-{}", seq),
        agent_id: agent.id.clone(),
        agent_name: agent.name.clone(),
        started_at: to_iso(started_at),
        duration_sec: rng.random_range(180..=1380u32),
        sentiment_score: score,
        sentiment_label: SentimentLabel::from_score(score),
        topics,
        resolved: rng.random_bool(0.85),
        csat,
        customer_name: CUSTOMER_NAMES
            .choose(rng)
            .expect("name list is non-empty")
            .to_string(),
    }
}

fn call_qualifies_for_alert(call: &Call) -> bool {
    call.sentiment_score < -0.5
        || !call.resolved
        || call.has_topic("refund")
        || call.has_topic("cancellation")
}

/// Derive the initial alert population: first `ALERT_CAP` qualifying calls
/// in corpus (newest-first) order. Open/closed status is randomized here,
/// at generation time only — afterwards status lives in the annotation
/// store.
pub fn derive_alerts(calls: &[Call], rng: &mut impl Rng) -> Vec<Alert> {
    calls
        .iter()
        .filter(|c| call_qualifies_for_alert(c))
        .take(ALERT_CAP)
        .enumerate()
        .map(|(idx, call)| {
            let rule = if call.sentiment_score < -0.5 {
                AlertRule::NegativeSentiment
            } else if !call.resolved {
                AlertRule::UnresolvedLongCall
            } else {
                AlertRule::HighRiskKeyword
            };
            let severity = if call.sentiment_score < -0.7 {
                Severity::High
            } else if call.sentiment_score < -0.4 {
                Severity::Medium
            } else {
                Severity::Low
            };
            let status = if rng.random_bool(0.6) {
                AlertStatus::Open
            } else {
                AlertStatus::Closed
            };
            Alert {
                id: format!("alert-{}", idx + 1),
                call_id: call.id.clone(),
                created_at: call.started_at.clone(),
                rule_label: rule.label().to_string(),
                rule_id: rule,
                severity,
                status,
                issue: format!(
                    "{} - {} sentiment",
                    call.topics.first().map(String::as_str).unwrap_or("general"),
                    call.sentiment_label.as_str()
                ),
            }
        })
        .collect()
}

/// Thirty days of rollups, oldest to newest. Days with no calls are
/// omitted, not zero-filled.
pub fn derive_daily_metrics(calls: &[Call], now: DateTime<Utc>) -> Vec<DailyMetric> {
    let mut metrics = Vec::new();
    for days_back in (0..30i64).rev() {
        let date = day_str(now - Duration::days(days_back));
        let day_calls: Vec<&Call> = calls
            .iter()
            .filter(|c| c.started_at.starts_with(&date))
            .collect();
        if day_calls.is_empty() {
            continue;
        }
        let avg_sentiment = mean(day_calls.iter().map(|c| c.sentiment_score));
        let avg_duration = mean(day_calls.iter().map(|c| c.duration_sec as f64));
        let negative = day_calls
            .iter()
            .filter(|c| c.sentiment_label == SentimentLabel::Negative)
            .count();
        metrics.push(DailyMetric {
            date,
            avg_sentiment: round2(avg_sentiment),
            call_count: day_calls.len(),
            avg_duration: avg_duration.round() as u32,
            negative_percent: ((negative as f64 / day_calls.len() as f64) * 100.0).round() as u32,
        });
    }
    metrics
}


#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 8, 20, 12, 0, 0).unwrap()
    }

    #[test]
    fn topics_within_vocabulary_and_arity() {
        let mut rng = StdRng::seed_from_u64(7);
        let corpus = Corpus::generate(&mut rng, 300, fixed_now());
        for call in &corpus.calls {
            assert!(
                (1..=3).contains(&call.topics.len()),
                "call {} has {} topics",
                call.id,
                call.topics.len()
            );
            for topic in &call.topics {
                assert!(TOPICS.contains(&topic.as_str()), "unknown topic {topic}");
            }
            // No duplicates within a call (drawn without replacement)
            let mut seen = call.topics.clone();
            seen.sort();
            seen.dedup();
            assert_eq!(seen.len(), call.topics.len());
        }
    }

    #[test]
    fn labels_match_scores_everywhere() {
        let mut rng = StdRng::seed_from_u64(11);
        let corpus = Corpus::generate(&mut rng, 300, fixed_now());
        for call in &corpus.calls {
            assert_eq!(
                call.sentiment_label,
                SentimentLabel::from_score(call.sentiment_score),
                "label drift on {}",
                call.id
            );
            assert!((-1.0..=1.0).contains(&call.sentiment_score));
        }
    }

    #[test]
    fn corpus_sorted_newest_first() {
        let mut rng = StdRng::seed_from_u64(13);
        let corpus = Corpus::generate(&mut rng, 100, fixed_now());
        for pair in corpus.calls.windows(2) {
            assert!(pair[0].started_at >= pair[1].started_at);
        }
    }

    #[test]
    fn csat_in_range_when_present() {
        let mut rng = StdRng::seed_from_u64(17);
        let corpus = Corpus::generate(&mut rng, 300, fixed_now());
        let mut present = 0;
        for call in &corpus.calls {
            if let Some(csat) = call.csat {
                present += 1;
                assert!((3..=5).contains(&csat));
            }
        }
        // p=0.7 over 300 calls; a wildly different count means the branch is wrong
        assert!(present > 150 && present < 270, "csat present on {present}/300");
    }

    #[test]
    fn alerts_capped_and_rules_assigned() {
        let mut rng = StdRng::seed_from_u64(19);
        let corpus = Corpus::generate(&mut rng, 300, fixed_now());
        assert!(corpus.alerts.len() <= ALERT_CAP);
        for alert in &corpus.alerts {
            let call = corpus.call(&alert.call_id).expect("alert references corpus call");
            match alert.rule_id {
                AlertRule::NegativeSentiment => assert!(call.sentiment_score < -0.5),
                AlertRule::UnresolvedLongCall => {
                    assert!(call.sentiment_score >= -0.5 && !call.resolved)
                }
                AlertRule::HighRiskKeyword => {
                    assert!(call.has_topic("refund") || call.has_topic("cancellation"))
                }
                AlertRule::Manual => panic!("generator never emits manual alerts"),
            }
            assert_eq!(alert.rule_label, alert.rule_id.label());
        }
    }

    #[test]
    fn daily_metrics_skip_empty_days() {
        let agents = agent_roster();
        let calls = vec![
            test_support::make_call("c1", &agents[0], "2026-08-19T10:00:00.000Z", -0.5, &["billing"], true),
            test_support::make_call("c2", &agents[0], "2026-08-19T11:00:00.000Z", 0.5, &["billing"], true),
            test_support::make_call("c3", &agents[1], "2026-08-10T09:00:00.000Z", 0.0, &["returns"], true),
        ];
        let metrics = derive_daily_metrics(&calls, fixed_now());
        assert_eq!(metrics.len(), 2);
        assert_eq!(metrics[0].date, "2026-08-10");
        assert_eq!(metrics[1].date, "2026-08-19");
        assert_eq!(metrics[1].call_count, 2);
        assert_eq!(metrics[1].avg_sentiment, 0.0);
        assert_eq!(metrics[1].negative_percent, 50);
    }

    /// End-to-end label/alert scenario from a fixed 10-call population:
    /// 3 at -0.8, 4 at 0.1, 3 at 0.6.
    #[test]
    fn ten_call_scenario_labels_and_alerts() {
        let agents = agent_roster();
        let mut calls = Vec::new();
        for i in 0..3 {
            calls.push(test_support::make_call(
                &format!("neg-{i}"),
                &agents[0],
                &format!("2026-08-1{i}T10:00:00.000Z"),
                -0.8,
                &["billing"],
                true,
            ));
        }
        for i in 0..4 {
            calls.push(test_support::make_call(
                &format!("neu-{i}"),
                &agents[1],
                &format!("2026-08-1{i}T11:00:00.000Z"),
                0.1,
                &["shipping"],
                true,
            ));
        }
        for i in 0..3 {
            calls.push(test_support::make_call(
                &format!("pos-{i}"),
                &agents[2],
                &format!("2026-08-1{i}T12:00:00.000Z"),
                0.6,
                &["upsell"],
                true,
            ));
        }

        let mut rng = StdRng::seed_from_u64(23);
        let corpus = Corpus::from_calls(calls, &mut rng, fixed_now());

        let negative = corpus
            .calls
            .iter()
            .filter(|c| c.sentiment_label == SentimentLabel::Negative)
            .count();
        let neutral = corpus
            .calls
            .iter()
            .filter(|c| c.sentiment_label == SentimentLabel::Neutral)
            .count();
        let positive = corpus
            .calls
            .iter()
            .filter(|c| c.sentiment_label == SentimentLabel::Positive)
            .count();
        assert_eq!((negative, neutral, positive), (3, 4, 3));

        // Only the three score<-0.5 calls qualify; everything else is
        // resolved with safe topics.
        assert_eq!(corpus.alerts.len(), 3);
        for alert in &corpus.alerts {
            assert_eq!(alert.rule_id, AlertRule::NegativeSentiment);
            assert_eq!(alert.severity, Severity::High);
            assert!(alert.call_id.starts_with("neg-"));
        }
    }
}
