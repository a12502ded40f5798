//! Mutable annotation store.
//!
//! Everything user-introduced lives here, layered over the read-only
//! corpus: alert status changes, manual alerts, exemplar flags, notes,
//! coaching-tip feedback, briefs, the notification and sent-email logs, and
//! settings. The store persists synchronously after every mutation through
//! an injected `Storage` backend, and carries the one-time seeding contract:
//! generator alerts are copied in exactly once per installation, gated by a
//! persisted marker that sits beside (not inside) the collection blob.

use std::io::Write;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::types::{
    Alert, AlertPatch, AlertRule, AlertStatus, AgentTip, AgentTipPatch, CallNote, DailyBrief,
    BriefContent, Notification, SentEmail, Settings, SettingsPatch, Severity,
};
use crate::util::{new_id, now_iso};

// =============================================================================
// Storage backends
// =============================================================================

/// Injected persistence seam: a single load/save pair over one typed blob.
pub trait Storage<T>: Send + Sync {
    /// `Ok(None)` means "nothing persisted yet" — first run.
    fn load(&self) -> Result<Option<T>, StoreError>;
    fn save(&self, value: &T) -> Result<(), StoreError>;
}

/// JSON-file backend. Writes go to a temp file in the same directory and
/// are renamed into place, so a crash mid-save never truncates state.
pub struct JsonFileStorage<T> {
    path: PathBuf,
    _marker: PhantomData<fn() -> T>,
}

impl<T> JsonFileStorage<T> {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _marker: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Default data directory: platform data dir, falling back to a local
/// dot-directory when the platform gives us nothing.
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|d| d.join("connect-insights"))
        .unwrap_or_else(|| PathBuf::from(".connect-insights"))
}

impl<T: Serialize + DeserializeOwned> Storage<T> for JsonFileStorage<T> {
    fn load(&self) -> Result<Option<T>, StoreError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let raw = std::fs::read_to_string(&self.path)?;
        Ok(Some(serde_json::from_str(&raw)?))
    }

    fn save(&self, value: &T) -> Result<(), StoreError> {
        let parent = self.path.parent().unwrap_or_else(|| Path::new("."));
        std::fs::create_dir_all(parent)?;
        let json = serde_json::to_string_pretty(value)?;
        let mut tmp = tempfile::NamedTempFile::new_in(parent)?;
        tmp.write_all(json.as_bytes())?;
        tmp.flush()?;
        tmp.persist(&self.path)?;
        Ok(())
    }
}

/// In-memory backend for tests and throwaway demo sessions.
#[derive(Default)]
pub struct MemoryStorage<T> {
    slot: Mutex<Option<T>>,
}

impl<T: Clone + Send> Storage<T> for MemoryStorage<T> {
    fn load(&self) -> Result<Option<T>, StoreError> {
        Ok(self.slot.lock().map_err(|_| poisoned())?.clone())
    }

    fn save(&self, value: &T) -> Result<(), StoreError> {
        *self.slot.lock().map_err(|_| poisoned())? = Some(value.clone());
        Ok(())
    }
}

fn poisoned() -> StoreError {
    StoreError::Commit("memory storage lock poisoned".to_string())
}

// =============================================================================
// Persisted shape
// =============================================================================

/// Every annotation collection plus settings. Shapes here are the persisted
/// wire format — renaming a field breaks existing installs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnnotationState {
    pub alerts: Vec<Alert>,
    pub exemplar_call_ids: Vec<String>,
    pub bookmarked_exemplars: Vec<String>,
    pub call_notes: Vec<CallNote>,
    pub daily_briefs: Vec<DailyBrief>,
    pub sent_emails: Vec<SentEmail>,
    pub agent_tips: Vec<AgentTip>,
    pub settings: Settings,
    pub notifications: Vec<Notification>,
}

/// On-disk envelope: the collections plus the seeded marker. The marker is
/// a sibling of the app blob so reset can clear both atomically from the
/// caller's point of view.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersistedState {
    pub app: AnnotationState,
    pub seeded_at: Option<String>,
}

// =============================================================================
// Store
// =============================================================================

/// The annotation store service object. One logical writer; mutations are
/// `&mut self` and persist before returning.
pub struct AnnotationStore {
    state: PersistedState,
    storage: Box<dyn Storage<PersistedState>>,
}

impl AnnotationStore {
    /// Open the store, loading any persisted state. A corrupt or unreadable
    /// state file degrades to a fresh store with a warning rather than
    /// refusing to start.
    pub fn open(storage: Box<dyn Storage<PersistedState>>) -> Self {
        let state = match storage.load() {
            Ok(Some(state)) => state,
            Ok(None) => PersistedState::default(),
            Err(e) => {
                log::warn!("failed to load annotation state: {e}. Starting fresh.");
                PersistedState::default()
            }
        };
        Self { state, storage }
    }

    fn persist(&self) -> Result<(), StoreError> {
        self.storage.save(&self.state)
    }

    // -------------------------------------------------------------------------
    // Seeding
    // -------------------------------------------------------------------------

    pub fn seeded(&self) -> bool {
        self.state.seeded_at.is_some()
    }

    /// One-time copy of generator alerts into the store. Returns whether
    /// seeding ran. A prior run (persisted marker) makes this a no-op
    /// unless `force` is set.
    pub fn seed_alerts(&mut self, alerts: &[Alert], force: bool) -> Result<bool, StoreError> {
        if self.seeded() && !force {
            return Ok(false);
        }
        if self.state.app.alerts.is_empty() || force {
            self.state.app.alerts = alerts.to_vec();
        }
        self.state.seeded_at = Some(now_iso());
        self.persist()?;
        log::info!("seeded {} alerts into annotation store", self.state.app.alerts.len());
        Ok(true)
    }

    /// Clear every annotation collection and the seeded marker, then seed
    /// again immediately.
    pub fn reset_and_reseed(&mut self, alerts: &[Alert]) -> Result<(), StoreError> {
        self.state = PersistedState::default();
        self.seed_alerts(alerts, true)?;
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Alerts
    // -------------------------------------------------------------------------

    pub fn alerts(&self) -> &[Alert] {
        &self.state.app.alerts
    }

    /// Patch a stored alert. `None` when the id is absent; the collection
    /// is left untouched (nothing persisted) in that case.
    pub fn update_alert(
        &mut self,
        alert_id: &str,
        patch: &AlertPatch,
    ) -> Result<Option<Alert>, StoreError> {
        let Some(alert) = self.state.app.alerts.iter_mut().find(|a| a.id == alert_id) else {
            return Ok(None);
        };
        if let Some(status) = patch.status {
            alert.status = status;
        }
        if let Some(severity) = patch.severity {
            alert.severity = severity;
        }
        if let Some(issue) = &patch.issue {
            alert.issue = issue.clone();
        }
        let updated = alert.clone();
        self.persist()?;
        Ok(Some(updated))
    }

    /// Append a supervisor-created alert.
    pub fn add_manual_alert(
        &mut self,
        call_id: &str,
        issue: &str,
        severity: Severity,
    ) -> Result<Alert, StoreError> {
        let alert = Alert {
            id: new_id("alert"),
            call_id: call_id.to_string(),
            created_at: now_iso(),
            rule_id: AlertRule::Manual,
            rule_label: AlertRule::Manual.label().to_string(),
            severity,
            status: AlertStatus::Open,
            issue: issue.to_string(),
        };
        self.state.app.alerts.push(alert.clone());
        self.persist()?;
        Ok(alert)
    }

    // -------------------------------------------------------------------------
    // Exemplars and bookmarks
    // -------------------------------------------------------------------------

    pub fn exemplar_call_ids(&self) -> &[String] {
        &self.state.app.exemplar_call_ids
    }

    pub fn bookmarked_exemplars(&self) -> &[String] {
        &self.state.app.bookmarked_exemplars
    }

    /// Flag or unflag a call as an exemplar. Returns the new flagged state.
    pub fn toggle_exemplar(&mut self, call_id: &str) -> Result<bool, StoreError> {
        let flagged = toggle_membership(&mut self.state.app.exemplar_call_ids, call_id);
        self.persist()?;
        Ok(flagged)
    }

    pub fn toggle_bookmark(&mut self, call_id: &str) -> Result<bool, StoreError> {
        let bookmarked = toggle_membership(&mut self.state.app.bookmarked_exemplars, call_id);
        self.persist()?;
        Ok(bookmarked)
    }

    // -------------------------------------------------------------------------
    // Notes
    // -------------------------------------------------------------------------

    /// Append a note to a call. Blank text silently no-ops (the UI disables
    /// the submit button, this is the backstop).
    pub fn add_note(
        &mut self,
        call_id: &str,
        user_id: &str,
        user_name: &str,
        text: &str,
    ) -> Result<Option<CallNote>, StoreError> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(None);
        }
        let note = CallNote {
            id: new_id("note"),
            call_id: call_id.to_string(),
            user_id: user_id.to_string(),
            user_name: user_name.to_string(),
            text: text.to_string(),
            created_at: now_iso(),
        };
        self.state.app.call_notes.push(note.clone());
        self.persist()?;
        Ok(Some(note))
    }

    pub fn notes_for_call(&self, call_id: &str) -> Vec<&CallNote> {
        self.state
            .app
            .call_notes
            .iter()
            .filter(|n| n.call_id == call_id)
            .collect()
    }

    // -------------------------------------------------------------------------
    // Briefs
    // -------------------------------------------------------------------------

    pub fn daily_briefs(&self) -> &[DailyBrief] {
        &self.state.app.daily_briefs
    }

    /// Append a brief. Never an upsert: regenerating for a date that
    /// already has a brief adds a second one, by design.
    pub fn add_daily_brief(
        &mut self,
        date: &str,
        content: BriefContent,
    ) -> Result<DailyBrief, StoreError> {
        let brief = DailyBrief {
            id: new_id("brief"),
            date: date.to_string(),
            generated_at: now_iso(),
            content,
        };
        self.state.app.daily_briefs.push(brief.clone());
        self.persist()?;
        Ok(brief)
    }

    // -------------------------------------------------------------------------
    // Emails
    // -------------------------------------------------------------------------

    pub fn sent_emails(&self) -> &[SentEmail] {
        &self.state.app.sent_emails
    }

    pub fn add_sent_email(
        &mut self,
        to: &str,
        subject: &str,
        body: &str,
    ) -> Result<SentEmail, StoreError> {
        let email = SentEmail {
            id: new_id("email"),
            to: to.to_string(),
            subject: subject.to_string(),
            body: body.to_string(),
            sent_at: now_iso(),
        };
        self.state.app.sent_emails.push(email.clone());
        self.persist()?;
        Ok(email)
    }

    // -------------------------------------------------------------------------
    // Agent tips
    // -------------------------------------------------------------------------

    pub fn agent_tips(&self) -> &[AgentTip] {
        &self.state.app.agent_tips
    }

    pub fn tips_for_agent(&self, agent_id: &str) -> Vec<&AgentTip> {
        self.state
            .app
            .agent_tips
            .iter()
            .filter(|t| t.agent_id == agent_id)
            .collect()
    }

    pub fn add_agent_tip(
        &mut self,
        call_id: &str,
        agent_id: &str,
        tips: Vec<String>,
        reason: &str,
    ) -> Result<AgentTip, StoreError> {
        let tip = AgentTip {
            id: new_id("tip"),
            call_id: call_id.to_string(),
            agent_id: agent_id.to_string(),
            created_at: now_iso(),
            tips,
            reason: reason.to_string(),
            dismissed: false,
            bookmarked: false,
            helpful: None,
        };
        self.state.app.agent_tips.push(tip.clone());
        self.persist()?;
        Ok(tip)
    }

    /// Patch tip feedback fields. Tips are never deleted, only dismissed.
    pub fn update_agent_tip(
        &mut self,
        tip_id: &str,
        patch: &AgentTipPatch,
    ) -> Result<Option<AgentTip>, StoreError> {
        let Some(tip) = self.state.app.agent_tips.iter_mut().find(|t| t.id == tip_id) else {
            return Ok(None);
        };
        if let Some(dismissed) = patch.dismissed {
            tip.dismissed = dismissed;
        }
        if let Some(bookmarked) = patch.bookmarked {
            tip.bookmarked = bookmarked;
        }
        if let Some(helpful) = patch.helpful {
            tip.helpful = Some(helpful);
        }
        let updated = tip.clone();
        self.persist()?;
        Ok(Some(updated))
    }

    // -------------------------------------------------------------------------
    // Settings
    // -------------------------------------------------------------------------

    pub fn settings(&self) -> &Settings {
        &self.state.app.settings
    }

    pub fn update_settings(&mut self, patch: &SettingsPatch) -> Result<Settings, StoreError> {
        let settings = &mut self.state.app.settings;
        if let Some(threshold) = patch.sentiment_threshold {
            settings.sentiment_threshold = threshold;
        }
        if let Some(keywords) = &patch.keywords {
            settings.keywords = keywords.clone();
        }
        if let Some(days) = patch.data_retention_days {
            settings.data_retention_days = days;
        }
        if let Some(webhook) = &patch.slack_webhook {
            settings.slack_webhook = webhook.clone();
        }
        let updated = settings.clone();
        self.persist()?;
        Ok(updated)
    }

    /// Add a watchlist keyword, case-normalized. Blank or duplicate input
    /// is a silent no-op; returns whether anything was added.
    pub fn add_keyword(&mut self, keyword: &str) -> Result<bool, StoreError> {
        let keyword = keyword.trim().to_lowercase();
        if keyword.is_empty() || self.state.app.settings.keywords.contains(&keyword) {
            return Ok(false);
        }
        self.state.app.settings.keywords.push(keyword);
        self.persist()?;
        Ok(true)
    }

    pub fn remove_keyword(&mut self, keyword: &str) -> Result<bool, StoreError> {
        let keyword = keyword.trim().to_lowercase();
        let before = self.state.app.settings.keywords.len();
        self.state.app.settings.keywords.retain(|k| k != &keyword);
        if self.state.app.settings.keywords.len() == before {
            return Ok(false);
        }
        self.persist()?;
        Ok(true)
    }

    // -------------------------------------------------------------------------
    // Notifications
    // -------------------------------------------------------------------------

    pub fn notifications(&self) -> &[Notification] {
        &self.state.app.notifications
    }

    /// Prepend a notification (newest-first display order).
    pub fn add_notification(&mut self, message: &str) -> Result<Notification, StoreError> {
        let notification = Notification {
            id: new_id("notif"),
            message: message.to_string(),
            read: false,
            created_at: now_iso(),
        };
        self.state.app.notifications.insert(0, notification.clone());
        self.persist()?;
        Ok(notification)
    }

    pub fn mark_all_notifications_read(&mut self) -> Result<(), StoreError> {
        for n in &mut self.state.app.notifications {
            n.read = true;
        }
        self.persist()
    }
}

fn toggle_membership(ids: &mut Vec<String>, id: &str) -> bool {
    if let Some(pos) = ids.iter().position(|x| x == id) {
        ids.remove(pos);
        false
    } else {
        ids.push(id.to_string());
        true
    }
}
