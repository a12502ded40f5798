//! Alert listing and mutation.
//!
//! Reads are a two-tier overlay: the annotation store's alert list wins
//! whenever it is non-empty, otherwise the generator-derived list is the
//! fallback. The two are never merged field-by-field.

use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::types::{Alert, AlertPatch, AlertStatus, Severity};

use super::InsightsService;

/// Optional alert filters, applied conjunctively.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AlertFilters {
    pub status: Option<AlertStatus>,
    pub severity: Option<Severity>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
}

impl InsightsService {
    pub fn list_alerts(&self, filters: &AlertFilters) -> Vec<Alert> {
        let base: &[Alert] = if self.store.alerts().is_empty() {
            &self.corpus.alerts
        } else {
            self.store.alerts()
        };
        base.iter()
            .filter(|alert| {
                if let Some(status) = filters.status {
                    if alert.status != status {
                        return false;
                    }
                }
                if let Some(severity) = filters.severity {
                    if alert.severity != severity {
                        return false;
                    }
                }
                if let Some(from) = &filters.date_from {
                    if &alert.created_at < from {
                        return false;
                    }
                }
                if let Some(to) = &filters.date_to {
                    if &alert.created_at > to {
                        return false;
                    }
                }
                true
            })
            .cloned()
            .collect()
    }

    /// Patch a stored alert's fields. `None` when the id is absent — only
    /// alerts that have been seeded or created into the store are mutable;
    /// the generator's own list is read-only.
    pub fn mutate_alert(
        &mut self,
        alert_id: &str,
        patch: &AlertPatch,
    ) -> Result<Option<Alert>, StoreError> {
        self.store.update_alert(alert_id, patch)
    }

    /// Create a supervisor-authored alert against a call.
    pub fn create_manual_alert(
        &mut self,
        call_id: &str,
        issue: &str,
        severity: Severity,
    ) -> Result<Alert, StoreError> {
        self.store.add_manual_alert(call_id, issue, severity)
    }

    /// Display label for an alert's call — tolerates dangling references.
    pub fn alert_call_label(&self, alert: &Alert) -> String {
        match self.corpus.call(&alert.call_id) {
            Some(call) => format!("{} ({})", call.customer_name, call.agent_name),
            None => "unknown call".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{seeded_service, service_from_calls};
    use super::*;
    use crate::corpus::{agent_roster, test_support::make_call};
    use crate::types::AlertRule;

    #[test]
    fn store_alerts_preferred_over_generator() {
        let mut service = seeded_service(41);
        let generator_count = service.corpus().alerts.len();
        assert_eq!(service.list_alerts(&AlertFilters::default()).len(), generator_count);

        // A manual alert grows the store list; the overlay now reflects it.
        service
            .create_manual_alert("call-1", "spot check", Severity::Low)
            .unwrap();
        assert_eq!(
            service.list_alerts(&AlertFilters::default()).len(),
            generator_count + 1
        );
    }

    #[test]
    fn falls_back_to_generator_when_store_empty() {
        // Unseeded service: store has no alerts at all.
        let agents = agent_roster();
        let calls = vec![make_call(
            "c1",
            &agents[0],
            "2026-08-19T10:00:00.000Z",
            -0.9,
            &["refund"],
            false,
        )];
        let service = service_from_calls(calls);
        assert!(service.store().alerts().is_empty());
        let listed = service.list_alerts(&AlertFilters::default());
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].rule_id, AlertRule::NegativeSentiment);
    }

    #[test]
    fn filters_are_conjunctive() {
        let service = seeded_service(41);
        let open_high = service.list_alerts(&AlertFilters {
            status: Some(AlertStatus::Open),
            severity: Some(Severity::High),
            ..Default::default()
        });
        for alert in &open_high {
            assert_eq!(alert.status, AlertStatus::Open);
            assert_eq!(alert.severity, Severity::High);
        }
    }

    #[test]
    fn mutate_alert_toggles_status() {
        let mut service = seeded_service(41);
        let id = service.store().alerts()[0].id.clone();
        let updated = service
            .mutate_alert(
                &id,
                &AlertPatch {
                    status: Some(AlertStatus::Closed),
                    ..Default::default()
                },
            )
            .unwrap()
            .unwrap();
        assert_eq!(updated.status, AlertStatus::Closed);
        assert_eq!(
            service.store().alerts().iter().find(|a| a.id == id).unwrap().status,
            AlertStatus::Closed
        );
    }

    #[test]
    fn mutate_alert_miss_is_not_found() {
        let mut service = seeded_service(41);
        let before = service.store().alerts().len();
        let result = service
            .mutate_alert("nope", &AlertPatch::default())
            .unwrap();
        assert!(result.is_none());
        assert_eq!(service.store().alerts().len(), before);
    }

    #[test]
    fn dangling_call_reference_is_tolerated() {
        let mut service = seeded_service(41);
        let alert = service
            .create_manual_alert("call-that-never-was", "escalated via email", Severity::Medium)
            .unwrap();
        assert_eq!(service.alert_call_label(&alert), "unknown call");
    }
}
