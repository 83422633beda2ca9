//! Credential store and session events.
//!
//! DESIGN
//! ======
//! Two independent credential slots (user, admin) plus a cached role
//! indicator, held behind a cloneable handle. Nothing here is ambient: the
//! guard and every API client receive the handle via constructor, so each
//! can be exercised against a fresh store in tests. Tokens are opaque
//! strings understood only by the backend; the client never inspects them.
//!
//! The role indicator is written on every credential insert and cleared when
//! the indicated credential is cleared. [`Credentials::active_role`] adds a
//! read-side derivation (admin wins when both slots are present) so routing
//! still has an answer when the indicator was lost to a partial clear.
//!
//! Expiry is surfaced as a [`SessionEvent`] on subscriber channels; the
//! composition root translates it into a navigation command.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::fmt;
use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

/// One of the two independent credential storage locations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Slot {
    User,
    Admin,
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User => f.write_str("user"),
            Self::Admin => f.write_str("admin"),
        }
    }
}

/// Subject role carried by a credential and cached as the role indicator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

impl Role {
    /// Map a backend role string onto the client's role model. The backend
    /// distinguishes `admin` from `super_admin`; both govern routing the
    /// same way here.
    #[must_use]
    pub fn from_subject(subject: &str) -> Self {
        match subject {
            "admin" | "super_admin" => Self::Admin,
            _ => Self::User,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User => f.write_str("user"),
            Self::Admin => f.write_str("admin"),
        }
    }
}

/// An opaque bearer token plus the subject role it was issued for.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    pub token: String,
    pub role: Role,
}

/// Session state derived from the two slots. Never stored; recomputed on
/// every read.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    Anonymous,
    User,
    Admin,
    Dual,
}

/// Event emitted when a credential is evicted after an authorization
/// failure. `redirect` is the login route the shell should navigate to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionEvent {
    AuthExpired { slot: Slot, redirect: &'static str },
}

/// Serializable image of the store, used for durable persistence between
/// process runs (the browser build keeps the same fields in local storage).
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Snapshot {
    pub user: Option<Credential>,
    pub admin: Option<Credential>,
    pub role: Option<Role>,
    pub username: Option<String>,
    pub admin_username: Option<String>,
}

#[derive(Default)]
struct Inner {
    user: Option<Credential>,
    admin: Option<Credential>,
    role: Option<Role>,
    username: Option<String>,
    admin_username: Option<String>,
    listeners: Vec<mpsc::UnboundedSender<SessionEvent>>,
}

/// Cloneable handle to the shared credential store.
#[derive(Clone, Default)]
pub struct Credentials {
    inner: Arc<RwLock<Inner>>,
}

impl Credentials {
    /// Fresh store with both slots empty.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Write a credential and point the role indicator at its role.
    pub fn set(&self, slot: Slot, token: impl Into<String>, role: Role) {
        let mut inner = self.inner.write().expect("credential store poisoned");
        let credential = Credential { token: token.into(), role };
        match slot {
            Slot::User => inner.user = Some(credential),
            Slot::Admin => inner.admin = Some(credential),
        }
        inner.role = Some(role);
    }

    /// Read a slot.
    #[must_use]
    pub fn get(&self, slot: Slot) -> Option<Credential> {
        let inner = self.inner.read().expect("credential store poisoned");
        match slot {
            Slot::User => inner.user.clone(),
            Slot::Admin => inner.admin.clone(),
        }
    }

    /// Remove a credential and its cached display name. If the role
    /// indicator pointed at the removed credential's role, it is cleared
    /// too.
    pub fn clear(&self, slot: Slot) {
        let mut inner = self.inner.write().expect("credential store poisoned");
        let removed = match slot {
            Slot::User => {
                inner.username = None;
                inner.user.take()
            }
            Slot::Admin => {
                inner.admin_username = None;
                inner.admin.take()
            }
        };
        if let Some(credential) = removed {
            if inner.role == Some(credential.role) {
                inner.role = None;
            }
        }
    }

    /// Hard logout: clear both slots, the role indicator, and the display
    /// name caches.
    pub fn clear_all(&self) {
        let mut inner = self.inner.write().expect("credential store poisoned");
        inner.user = None;
        inner.admin = None;
        inner.role = None;
        inner.username = None;
        inner.admin_username = None;
    }

    /// The raw role indicator.
    #[must_use]
    pub fn role(&self) -> Option<Role> {
        self.inner.read().expect("credential store poisoned").role
    }

    /// The role that should govern routing: the indicator when set,
    /// otherwise derived from the slots with admin winning.
    #[must_use]
    pub fn active_role(&self) -> Option<Role> {
        let inner = self.inner.read().expect("credential store poisoned");
        if inner.role.is_some() {
            return inner.role;
        }
        if inner.admin.is_some() {
            return Some(Role::Admin);
        }
        inner.user.as_ref().map(|credential| credential.role)
    }

    /// Session state derived from slot presence.
    #[must_use]
    pub fn state(&self) -> SessionState {
        let inner = self.inner.read().expect("credential store poisoned");
        match (inner.user.is_some(), inner.admin.is_some()) {
            (false, false) => SessionState::Anonymous,
            (true, false) => SessionState::User,
            (false, true) => SessionState::Admin,
            (true, true) => SessionState::Dual,
        }
    }

    /// Cache a display name alongside a slot. Read-only passthrough state;
    /// nothing in the guard or clients depends on it.
    pub fn set_display_name(&self, slot: Slot, name: impl Into<String>) {
        let mut inner = self.inner.write().expect("credential store poisoned");
        match slot {
            Slot::User => inner.username = Some(name.into()),
            Slot::Admin => inner.admin_username = Some(name.into()),
        }
    }

    /// Cached display name for a slot.
    #[must_use]
    pub fn display_name(&self, slot: Slot) -> Option<String> {
        let inner = self.inner.read().expect("credential store poisoned");
        match slot {
            Slot::User => inner.username.clone(),
            Slot::Admin => inner.admin_username.clone(),
        }
    }

    /// Subscribe to session events. Each subscriber gets every event emitted
    /// after the call; closed receivers are dropped on the next emit.
    #[must_use]
    pub fn subscribe(&self) -> mpsc::UnboundedReceiver<SessionEvent> {
        let (sender, receiver) = mpsc::unbounded_channel();
        let mut inner = self.inner.write().expect("credential store poisoned");
        inner.listeners.push(sender);
        receiver
    }

    /// Evict a credential after an authorization failure and notify
    /// subscribers where the shell should navigate.
    pub fn expire(&self, slot: Slot, redirect: &'static str) {
        tracing::warn!(%slot, redirect, "authorization failure; evicting credential");
        self.clear(slot);
        self.emit(SessionEvent::AuthExpired { slot, redirect });
    }

    /// Capture the store for durable persistence.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        let inner = self.inner.read().expect("credential store poisoned");
        Snapshot {
            user: inner.user.clone(),
            admin: inner.admin.clone(),
            role: inner.role,
            username: inner.username.clone(),
            admin_username: inner.admin_username.clone(),
        }
    }

    /// Replace the store contents from a persisted snapshot. Listeners are
    /// kept; no events are emitted.
    pub fn restore(&self, snapshot: Snapshot) {
        let mut inner = self.inner.write().expect("credential store poisoned");
        inner.user = snapshot.user;
        inner.admin = snapshot.admin;
        inner.role = snapshot.role;
        inner.username = snapshot.username;
        inner.admin_username = snapshot.admin_username;
    }

    fn emit(&self, event: SessionEvent) {
        let mut inner = self.inner.write().expect("credential store poisoned");
        inner.listeners.retain(|listener| listener.send(event).is_ok());
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Tokens stay out of debug output.
        f.debug_struct("Credentials").field("state", &self.state()).finish()
    }
}
