//! Session/identity state.
//!
//! The signed-in user persists independently of the annotation store — two
//! separate blobs, so a demo reset can wipe annotations without signing the
//! user out. There is no real authentication; sign-in picks one of the
//! fixed demo identities.

use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::store::Storage;
use crate::types::{User, UserRole};

/// The fixed demo roster shown on the role-selection screen.
pub fn mock_users() -> Vec<User> {
    let rows: [(&str, &str, &str, UserRole, Option<&str>, Option<&str>); 5] = [
        ("sup-1", "supervisor.ada@demo.com", "Ada", UserRole::Supervisor, Some("East"), None),
        ("sup-2", "supervisor.lee@demo.com", "Lee", UserRole::Supervisor, Some("West"), None),
        ("agent-1", "agent.jordan@demo.com", "Jordan", UserRole::Agent, None, Some("a1")),
        ("agent-2", "agent.sam@demo.com", "Sam", UserRole::Agent, None, Some("a2")),
        ("agent-3", "agent.renee@demo.com", "Renee", UserRole::Agent, None, Some("a3")),
    ];
    rows.iter()
        .map(|(id, email, name, role, team, agent_id)| User {
            id: id.to_string(),
            email: email.to_string(),
            name: name.to_string(),
            role: *role,
            team: team.map(|t| t.to_string()),
            agent_id: agent_id.map(|a| a.to_string()),
        })
        .collect()
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SessionState {
    pub user: Option<User>,
}

pub struct SessionStore {
    state: SessionState,
    storage: Box<dyn Storage<SessionState>>,
}

impl SessionStore {
    pub fn open(storage: Box<dyn Storage<SessionState>>) -> Self {
        let state = match storage.load() {
            Ok(Some(state)) => state,
            Ok(None) => SessionState::default(),
            Err(e) => {
                log::warn!("failed to load session state: {e}. Starting signed out.");
                SessionState::default()
            }
        };
        Self { state, storage }
    }

    pub fn current_user(&self) -> Option<&User> {
        self.state.user.as_ref()
    }

    pub fn sign_in(&mut self, user: User) -> Result<(), StoreError> {
        self.state.user = Some(user);
        self.storage.save(&self.state)
    }

    pub fn sign_out(&mut self) -> Result<(), StoreError> {
        self.state.user = None;
        self.storage.save(&self.state)
    }
}
