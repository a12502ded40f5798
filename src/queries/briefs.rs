//! Daily brief synthesis.
//!
//! A brief is the day's rollup plus a trailing comparison: average
//! sentiment over the 7 days before the target day, the delta against it,
//! the top topics by frequency, coaching opportunities pulled from the
//! day's negative calls, and exemplar links from its positive resolved
//! calls. Generation is an explicit user action and always appends — a
//! second "generate" for the same date produces a second brief.

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};

use crate::error::StoreError;
use crate::types::{BriefContent, Call, DailyBrief, SentimentLabel};
use crate::util::{mean, round2};

use super::InsightsService;

impl InsightsService {
    /// Generate and store the brief for a calendar day ("YYYY-MM-DD").
    ///
    /// A date with zero calls still yields a brief — all-zero numbers and
    /// empty lists — so the console can render "quiet day" rather than an
    /// error.
    pub fn generate_daily_brief(&mut self, date: &str) -> Result<DailyBrief, StoreError> {
        let content = self.build_brief_content(date);
        self.store.add_daily_brief(date, content)
    }

    fn build_brief_content(&self, date: &str) -> BriefContent {
        let day_calls: Vec<&Call> = self
            .corpus
            .calls
            .iter()
            .filter(|c| c.started_at.starts_with(date))
            .collect();

        // Prior week: [target - 7d, target), exclusive of the target day.
        let prior_calls: Vec<&Call> = match day_start(date) {
            Some(target) => {
                let window_start = target - Duration::days(7);
                self.corpus
                    .calls
                    .iter()
                    .filter(|c| {
                        parse_ts(&c.started_at)
                            .map(|ts| ts >= window_start && ts < target)
                            .unwrap_or(false)
                    })
                    .collect()
            }
            None => Vec::new(),
        };

        let avg_sentiment = mean(day_calls.iter().map(|c| c.sentiment_score));
        let prior_avg = mean(prior_calls.iter().map(|c| c.sentiment_score));
        let negative_percent = if day_calls.is_empty() {
            0
        } else {
            let negative = day_calls
                .iter()
                .filter(|c| c.sentiment_label == SentimentLabel::Negative)
                .count();
            ((negative as f64 / day_calls.len() as f64) * 100.0).round() as u32
        };

        let coaching_opportunities: Vec<String> = day_calls
            .iter()
            .filter(|c| c.sentiment_label == SentimentLabel::Negative)
            .take(3)
            .map(|c| {
                format!(
                    "{}: {} call - improve empathy and resolution",
                    c.agent_name,
                    c.topics.first().map(String::as_str).unwrap_or("general")
                )
            })
            .collect();

        let exemplar_links: Vec<String> = day_calls
            .iter()
            .filter(|c| c.sentiment_label == SentimentLabel::Positive && c.resolved)
            .take(3)
            .map(|c| c.id.clone())
            .collect();

        BriefContent {
            total_calls: day_calls.len(),
            avg_sentiment: round2(avg_sentiment),
            negative_percent,
            delta_vs_prior: round2(avg_sentiment - prior_avg),
            top_issues: top_topics(&day_calls, 3),
            coaching_opportunities,
            exemplar_links,
        }
    }
}

/// Topic frequencies over a call set, descending, ties broken by
/// first-encountered order. Returns at most `limit` topic names.
fn top_topics(calls: &[&Call], limit: usize) -> Vec<String> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    for call in calls {
        for topic in &call.topics {
            match counts.iter_mut().find(|(t, _)| t == topic) {
                Some((_, n)) => *n += 1,
                None => counts.push((topic.clone(), 1)),
            }
        }
    }
    // Stable sort keeps insertion order among equal counts.
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.into_iter().take(limit).map(|(t, _)| t).collect()
}

fn day_start(date: &str) -> Option<DateTime<Utc>> {
    let day = NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()?;
    Utc.from_local_datetime(&day.and_hms_opt(0, 0, 0)?).single()
}

fn parse_ts(ts: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(ts)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::super::test_support::service_from_calls;
    use super::*;
    use crate::corpus::{agent_roster, test_support::make_call};

    #[test]
    fn empty_day_yields_zeroed_brief() {
        let agents = agent_roster();
        let calls = vec![make_call(
            "c1",
            &agents[0],
            "2026-08-01T10:00:00.000Z",
            0.5,
            &["billing"],
            true,
        )];
        let mut service = service_from_calls(calls);
        let brief = service.generate_daily_brief("2026-08-19").unwrap();
        assert_eq!(brief.content.total_calls, 0);
        assert_eq!(brief.content.avg_sentiment, 0.0);
        assert_eq!(brief.content.negative_percent, 0);
        assert!(brief.content.top_issues.is_empty());
        assert!(brief.content.coaching_opportunities.is_empty());
        assert!(brief.content.exemplar_links.is_empty());
    }

    #[test]
    fn delta_compares_against_prior_week_only() {
        let agents = agent_roster();
        let calls = vec![
            // Target day: avg 0.6
            make_call("t1", &agents[0], "2026-08-19T10:00:00.000Z", 0.6, &["billing"], true),
            // Inside prior window (1 and 6 days before): avg 0.2
            make_call("p1", &agents[0], "2026-08-18T10:00:00.000Z", 0.1, &["billing"], true),
            make_call("p2", &agents[0], "2026-08-13T10:00:00.000Z", 0.3, &["billing"], true),
            // Outside the window: 8 days before and the day after.
            make_call("x1", &agents[0], "2026-08-11T10:00:00.000Z", -1.0, &["billing"], true),
            make_call("x2", &agents[0], "2026-08-20T10:00:00.000Z", -1.0, &["billing"], true),
        ];
        let mut service = service_from_calls(calls);
        let brief = service.generate_daily_brief("2026-08-19").unwrap();
        assert_eq!(brief.content.total_calls, 1);
        assert_eq!(brief.content.avg_sentiment, 0.6);
        assert_eq!(brief.content.delta_vs_prior, 0.4);
    }

    #[test]
    fn top_topics_ranked_with_first_encounter_tiebreak() {
        let agents = agent_roster();
        let calls = vec![
            make_call("c1", &agents[0], "2026-08-19T09:00:00.000Z", 0.0, &["shipping", "billing"], true),
            make_call("c2", &agents[0], "2026-08-19T10:00:00.000Z", 0.0, &["billing"], true),
            make_call("c3", &agents[0], "2026-08-19T11:00:00.000Z", 0.0, &["returns", "upsell"], true),
        ];
        let mut service = service_from_calls(calls);
        let brief = service.generate_daily_brief("2026-08-19").unwrap();
        // billing appears twice; the three singletons tie and keep
        // first-encountered order (corpus is newest-first: c3 before c2/c1).
        assert_eq!(brief.content.top_issues[0], "billing");
        assert_eq!(brief.content.top_issues.len(), 3);
        assert_eq!(brief.content.top_issues[1], "returns");
    }

    #[test]
    fn coaching_and_exemplars_capped_at_three() {
        let agents = agent_roster();
        let mut calls = Vec::new();
        for i in 0..5 {
            calls.push(make_call(
                &format!("n{i}"),
                &agents[0],
                &format!("2026-08-19T0{i}:00:00.000Z"),
                -0.6,
                &["refund"],
                true,
            ));
            calls.push(make_call(
                &format!("p{i}"),
                &agents[1],
                &format!("2026-08-19T1{i}:00:00.000Z"),
                0.8,
                &["upsell"],
                true,
            ));
        }
        let mut service = service_from_calls(calls);
        let brief = service.generate_daily_brief("2026-08-19").unwrap();
        assert_eq!(brief.content.coaching_opportunities.len(), 3);
        assert_eq!(brief.content.exemplar_links.len(), 3);
        assert!(brief.content.coaching_opportunities[0].contains("Sarah Chen"));
        assert!(brief.content.coaching_opportunities[0].contains("refund call"));
    }

    #[test]
    fn regenerating_appends_a_duplicate() {
        let agents = agent_roster();
        let calls = vec![make_call(
            "c1",
            &agents[0],
            "2026-08-19T10:00:00.000Z",
            0.5,
            &["billing"],
            true,
        )];
        let mut service = service_from_calls(calls);
        let first = service.generate_daily_brief("2026-08-19").unwrap();
        let second = service.generate_daily_brief("2026-08-19").unwrap();
        assert_ne!(first.id, second.id);
        assert_eq!(service.store().daily_briefs().len(), 2);
        assert_eq!(service.store().daily_briefs()[0].date, "2026-08-19");
        assert_eq!(service.store().daily_briefs()[1].date, "2026-08-19");
    }
}
