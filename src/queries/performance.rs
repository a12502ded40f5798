//! Agent performance rollups.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::types::Call;
use crate::util::{day_str, mean, round2};

use super::InsightsService;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    /// Short weekday label ("Mon").
    pub day: String,
    pub sentiment: f64,
    pub calls: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentPerformance {
    pub total_calls: usize,
    pub avg_sentiment: f64,
    /// Team percentile, 25–95. A cosmetic placeholder — a fixed linear
    /// transform of average sentiment, not a real rank.
    pub percentile: u32,
    /// Seven points, oldest to newest, zero-filled for quiet days.
    pub weekly_trend: Vec<TrendPoint>,
}

impl InsightsService {
    /// Trailing-7-day performance for one agent, relative to now.
    pub fn get_agent_performance(&self, agent_id: &str) -> AgentPerformance {
        self.agent_performance_at(agent_id, Utc::now())
    }

    /// Clock-injected variant so rollups are reproducible in tests.
    pub fn agent_performance_at(&self, agent_id: &str, now: DateTime<Utc>) -> AgentPerformance {
        let agent_calls = self.corpus.calls_by_agent(agent_id);
        let window_start = now - Duration::days(7);

        let recent: Vec<&&Call> = agent_calls
            .iter()
            .filter(|c| {
                DateTime::parse_from_rfc3339(&c.started_at)
                    .map(|ts| ts.with_timezone(&Utc) > window_start)
                    .unwrap_or(false)
            })
            .collect();

        let avg_sentiment = mean(recent.iter().map(|c| c.sentiment_score));
        // clamp(50 + avg*40, 25, 95) — reproduced exactly for behavioral
        // parity with the console, zero calls landing on 50.
        let percentile = (50.0 + avg_sentiment * 40.0).clamp(25.0, 95.0).round() as u32;

        let weekly_trend = (0..7)
            .map(|i| {
                let date = now - Duration::days(6 - i);
                let prefix = day_str(date);
                let day_calls: Vec<&&Call> = agent_calls
                    .iter()
                    .filter(|c| c.started_at.starts_with(&prefix))
                    .collect();
                TrendPoint {
                    day: date.format("%a").to_string(),
                    sentiment: mean(day_calls.iter().map(|c| c.sentiment_score)),
                    calls: day_calls.len(),
                }
            })
            .collect();

        AgentPerformance {
            total_calls: recent.len(),
            avg_sentiment: round2(avg_sentiment),
            percentile,
            weekly_trend,
        }
    }

}
