//! Auth area: login, registration, profile, and admin user management.
//!
//! Two dispatch paths live here. Ordinary profile reads go through a
//! user-preferring client; the admin user-management endpoints go through a
//! dedicated admin-only client so a stale user token can never leak into
//! back-office calls.

use reqwest::Method;

use crate::error::ClientError;
use crate::net::http::{ApiClient, decode};
use crate::net::types::{
    AdminUserPage, AdminUserQuery, NewUser, PasswordReset, TokenGrant, UserAccount,
};

pub struct AuthApi {
    api: ApiClient,
    admin: ApiClient,
}

impl AuthApi {
    /// `api` resolves user-then-admin; `admin` must be an admin-only client.
    #[must_use]
    pub fn new(api: ApiClient, admin: ApiClient) -> Self {
        Self { api, admin }
    }

    /// `POST /auth/register`. Unauthenticated; there is no token yet.
    pub async fn register(&self, user: &NewUser) -> Result<UserAccount, ClientError> {
        let body = serde_json::to_value(user)?;
        decode(self.api.post_unauthenticated("/auth/register", body).await?)
    }

    /// `POST /auth/login`. Form-encoded to match the backend's password
    /// flow; the success path never consults the credential store.
    pub async fn login(&self, username: &str, password: &str) -> Result<TokenGrant, ClientError> {
        let form = [("username", username), ("password", password)];
        decode(self.api.post_form("/auth/login", &form).await?)
    }

    /// `POST /auth/admin/login`. Same form encoding as [`Self::login`].
    pub async fn admin_login(&self, username: &str, password: &str) -> Result<TokenGrant, ClientError> {
        let form = [("username", username), ("password", password)];
        decode(self.api.post_form("/auth/admin/login", &form).await?)
    }

    /// `GET /auth/me`.
    pub async fn me(&self) -> Result<UserAccount, ClientError> {
        decode(self.api.request::<()>(Method::GET, "/auth/me", None, None).await?)
    }

    /// `GET /auth/admin/users`.
    pub async fn admin_users(&self, query: &AdminUserQuery) -> Result<AdminUserPage, ClientError> {
        decode(self.admin.request(Method::GET, "/auth/admin/users", Some(query), None).await?)
    }

    /// `GET /auth/admin/users/{id}`.
    pub async fn admin_user(&self, user_id: i64) -> Result<UserAccount, ClientError> {
        let path = format!("/auth/admin/users/{user_id}");
        decode(self.admin.request::<()>(Method::GET, &path, None, None).await?)
    }

    /// `PATCH /auth/admin/users/{id}/status`.
    pub async fn set_admin_user_status(&self, user_id: i64, is_active: bool) -> Result<UserAccount, ClientError> {
        let path = format!("/auth/admin/users/{user_id}/status");
        let query = [("is_active", is_active)];
        decode(self.admin.request(Method::PATCH, &path, Some(&query), None).await?)
    }

    /// `POST /auth/admin/users/{id}/reset-password`.
    pub async fn reset_admin_user_password(&self, user_id: i64) -> Result<PasswordReset, ClientError> {
        let path = format!("/auth/admin/users/{user_id}/reset-password");
        decode(self.admin.request::<()>(Method::POST, &path, None, None).await?)
    }
}
