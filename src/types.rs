use serde::{Deserialize, Serialize};

// =============================================================================
// Corpus entities (read-only after generation)
// =============================================================================

/// Roster status for an agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentStatus {
    Active,
    Away,
    Offline,
}

/// A contact-center agent. Created once at corpus generation, immutable after.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Agent {
    pub id: String,
    pub name: String,
    pub team: String,
    pub hire_date: String,
    pub status: AgentStatus,
}

/// Sentiment bucket derived from the continuous score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Neutral,
    Negative,
}

impl SentimentLabel {
    /// The one threshold rule in the system. The stored label on a `Call` is
    /// always the output of this function for its score — never set
    /// independently.
    pub fn from_score(score: f64) -> Self {
        if score < -0.2 {
            SentimentLabel::Negative
        } else if score > 0.3 {
            SentimentLabel::Positive
        } else {
            SentimentLabel::Neutral
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "positive",
            SentimentLabel::Neutral => "neutral",
            SentimentLabel::Negative => "negative",
        }
    }
}

/// A completed call. Timestamps are RFC 3339 strings so date-range filters
/// can compare lexicographically, matching the persisted wire shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Call {
    pub id: String,
    pub agent_id: String,
    pub agent_name: String,
    pub started_at: String,
    pub duration_sec: u32,
    pub sentiment_score: f64,
    pub sentiment_label: SentimentLabel,
    pub topics: Vec<String>,
    pub resolved: bool,
    /// Customer-satisfaction rating 1–5. Absent means "unknown", never zero.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub csat: Option<u8>,
    pub customer_name: String,
}

impl Call {
    pub fn has_topic(&self, topic: &str) -> bool {
        self.topics.iter().any(|t| t == topic)
    }
}

/// One speaker turn in a synthesized transcript.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscriptTurn {
    pub speaker: String,
    pub text: String,
    pub timestamp: String,
}

/// Synthesized on demand from the call record — never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallSummary {
    pub call_id: String,
    pub summary_text: String,
    pub key_phrases: Vec<String>,
    pub entities: Vec<String>,
    pub transcript: Vec<TranscriptTurn>,
}

// =============================================================================
// Alerts
// =============================================================================

/// Which detection rule produced an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlertRule {
    #[serde(rename = "R1")]
    NegativeSentiment,
    #[serde(rename = "R2")]
    HighRiskKeyword,
    #[serde(rename = "R3")]
    UnresolvedLongCall,
    #[serde(rename = "manual")]
    Manual,
}

impl AlertRule {
    pub fn label(&self) -> &'static str {
        match self {
            AlertRule::NegativeSentiment => "Negative Sentiment Detected",
            AlertRule::HighRiskKeyword => "High-Risk Keyword",
            AlertRule::UnresolvedLongCall => "Unresolved Long Call",
            AlertRule::Manual => "Manually Created",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertStatus {
    Open,
    Closed,
}

/// A supervisor alert. The referenced call may be absent from the corpus
/// (e.g. manual alerts) — consumers must tolerate a dangling `call_id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    pub id: String,
    pub call_id: String,
    pub created_at: String,
    pub rule_id: AlertRule,
    pub rule_label: String,
    pub severity: Severity,
    pub status: AlertStatus,
    pub issue: String,
}

/// Partial update for a stored alert. `None` fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<AlertStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<Severity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issue: Option<String>,
}

// =============================================================================
// Rollups and briefs
// =============================================================================

/// Per-day rollup over the call corpus. Days with zero calls are omitted
/// from metric lists, never zero-filled.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyMetric {
    pub date: String,
    pub avg_sentiment: f64,
    pub call_count: usize,
    pub avg_duration: u32,
    pub negative_percent: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BriefContent {
    pub total_calls: usize,
    pub avg_sentiment: f64,
    pub negative_percent: u32,
    pub delta_vs_prior: f64,
    pub top_issues: Vec<String>,
    pub coaching_opportunities: Vec<String>,
    pub exemplar_links: Vec<String>,
}

/// A generated daily brief. Append-only: regenerating for the same date
/// produces a second brief rather than replacing the first.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyBrief {
    pub id: String,
    pub date: String,
    pub generated_at: String,
    pub content: BriefContent,
}

// =============================================================================
// Annotations
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallNote {
    pub id: String,
    pub call_id: String,
    pub user_id: String,
    pub user_name: String,
    pub text: String,
    pub created_at: String,
}

/// Post-call coaching tips surfaced to an agent. Feedback fields are
/// mutable after creation; tips are never deleted, only dismissed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentTip {
    pub id: String,
    pub call_id: String,
    pub agent_id: String,
    pub created_at: String,
    pub tips: Vec<String>,
    pub reason: String,
    pub dismissed: bool,
    pub bookmarked: bool,
    /// Tri-state helpfulness feedback: unset until the agent votes.
    #[serde(default)]
    pub helpful: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentTipPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dismissed: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bookmarked: Option<bool>,
    /// `Some(None)` is not expressible here; a vote can be set or changed
    /// but not cleared, matching the console UI.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub helpful: Option<bool>,
}

/// Supervisor-tunable settings. Singleton, field-patchable, persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub sentiment_threshold: f64,
    pub keywords: Vec<String>,
    pub data_retention_days: u32,
    pub slack_webhook: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sentiment_threshold: -0.5,
            keywords: ["refund", "cancel", "supervisor", "complaint", "chargeback"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            data_retention_days: 30,
            slack_webhook: String::new(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentiment_threshold: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_retention_days: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slack_webhook: Option<String>,
}

/// Mock outbound email — append-only log, no real delivery.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SentEmail {
    pub id: String,
    pub to: String,
    pub subject: String,
    pub body: String,
    pub sent_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    pub message: String,
    pub read: bool,
    pub created_at: String,
}

// =============================================================================
// Identity
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Supervisor,
    Agent,
}

/// A demo sign-in identity. Agents carry a linkage to their corpus agent.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: UserRole,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent_id: Option<String>,
}
