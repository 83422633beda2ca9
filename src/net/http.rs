//! Core request dispatch shared by every API area.
//!
//! ERROR HANDLING
//! ==============
//! HTTP 401 is the sole authorization-failure signal. It is handled here
//! with a compensating side effect (evict the attached credential, emit
//! [`crate::session::SessionEvent::AuthExpired`] pointing at the right
//! login page) and the
//! caller receives the [`ClientError::AuthExpired`] marker. Every other
//! failure propagates unmodified: network and timeout errors as
//! [`ClientError::Http`], non-2xx responses as [`ClientError::Status`] with
//! the backend's `detail` string when the body carries one.
//!
//! Success responses are normalized to the payload body only; callers never
//! unwrap an envelope.

#[cfg(test)]
#[path = "http_test.rs"]
mod http_test;

use std::time::Duration;

use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

use crate::config::Config;
use crate::error::ClientError;
use crate::nav::Location;
use crate::routes;
use crate::session::{Credentials, Slot};

/// Which credential slot a client attaches to outgoing requests.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenPreference {
    /// Prefer the user slot, fall back to the admin slot. Lets an
    /// administrator read non-admin-scoped endpoints without a separate
    /// user login.
    UserThenAdmin,
    /// Admin slot only; used by the admin-management area.
    AdminOnly,
}

impl TokenPreference {
    /// Resolve the credential to attach, if any.
    #[must_use]
    pub fn resolve(self, credentials: &Credentials) -> Option<(Slot, String)> {
        match self {
            Self::UserThenAdmin => credentials
                .get(Slot::User)
                .map(|credential| (Slot::User, credential.token))
                .or_else(|| credentials.get(Slot::Admin).map(|credential| (Slot::Admin, credential.token))),
            Self::AdminOnly => credentials.get(Slot::Admin).map(|credential| (Slot::Admin, credential.token)),
        }
    }

    /// The slot held responsible for a 401 when no credential was attached.
    fn primary_slot(self) -> Slot {
        match self {
            Self::UserThenAdmin => Slot::User,
            Self::AdminOnly => Slot::Admin,
        }
    }
}

/// Uniform request dispatch for one backend area.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    preference: TokenPreference,
    credentials: Credentials,
    location: Location,
}

impl ApiClient {
    /// Build a client for one area. The timeout is fixed for the lifetime
    /// of the instance; requests that exceed it surface as ordinary
    /// [`ClientError::Http`] failures. No request is retried or cancelled.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the underlying HTTP client cannot
    /// be constructed.
    pub fn new(
        config: &Config,
        preference: TokenPreference,
        timeout: Duration,
        credentials: Credentials,
        location: Location,
    ) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: config.base_url().to_owned(),
            preference,
            credentials,
            location,
        })
    }

    /// Dispatch an authenticated JSON request and return the normalized
    /// payload body.
    pub(crate) async fn request<Q: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        query: Option<&Q>,
        body: Option<Value>,
    ) -> Result<Value, ClientError> {
        let attached = self.preference.resolve(&self.credentials);
        let mut request = self.http.request(method.clone(), self.url(path));
        if let Some(query) = query {
            request = request.query(query);
        }
        if let Some((_, token)) = &attached {
            request = request.bearer_auth(token);
        }
        if let Some(json) = &body {
            request = request.json(json);
        }

        let slot_label = attached.as_ref().map_or("none", |(slot, _)| match slot {
            Slot::User => "user",
            Slot::Admin => "admin",
        });
        tracing::debug!(%method, path, slot = slot_label, "dispatching request");
        let response = request.send().await?;
        self.normalize(response, attached.map(|(slot, _)| slot)).await
    }

    /// Submit form-encoded credentials to a login endpoint. Login calls
    /// skip credential resolution entirely; there is no token yet.
    pub(crate) async fn post_form(
        &self,
        path: &str,
        form: &[(&'static str, &str)],
    ) -> Result<Value, ClientError> {
        let response = self.http.post(self.url(path)).form(form).send().await?;
        self.normalize(response, None).await
    }

    /// Dispatch an unauthenticated JSON POST (registration).
    pub(crate) async fn post_unauthenticated(&self, path: &str, body: Value) -> Result<Value, ClientError> {
        let response = self.http.post(self.url(path)).json(&body).send().await?;
        self.normalize(response, None).await
    }

    async fn normalize(
        &self,
        response: reqwest::Response,
        attached: Option<Slot>,
    ) -> Result<Value, ClientError> {
        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(self.handle_unauthorized(attached));
        }

        let value = response.json::<Value>().await.unwrap_or_else(|_| Value::Null);
        if !status.is_success() {
            return Err(ClientError::Status { status: status.as_u16(), detail: error_detail(&value) });
        }
        Ok(value)
    }

    /// Compensating side effect for an authorization failure: evict the
    /// credential the request ran under and tell subscribers which login
    /// page to navigate to. Admin-area locations go to the admin login,
    /// everything else to the general login.
    pub(crate) fn handle_unauthorized(&self, attached: Option<Slot>) -> ClientError {
        let slot = attached.unwrap_or_else(|| self.preference.primary_slot());
        let redirect = if self.location.in_admin_area() { routes::ADMIN_LOGIN } else { routes::LOGIN };
        self.credentials.expire(slot, redirect);
        ClientError::AuthExpired { slot }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    #[cfg(test)]
    pub(crate) fn base_url(&self) -> &str {
        &self.base_url
    }
}

fn error_detail(value: &Value) -> String {
    value
        .get("detail")
        .and_then(Value::as_str)
        .map(ToOwned::to_owned)
        .unwrap_or_else(|| value.to_string())
}

/// Decode a normalized payload into a typed value.
pub(crate) fn decode<T: serde::de::DeserializeOwned>(value: Value) -> Result<T, ClientError> {
    Ok(serde_json::from_value(value)?)
}
