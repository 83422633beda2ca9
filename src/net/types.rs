//! Payload types for the backend REST contract.
//!
//! IDs are `i64` and timestamps are RFC 3339 strings passed through
//! verbatim; the client never does date arithmetic. Request types skip
//! unset fields so partial updates stay partial on the wire.

use serde::{Deserialize, Serialize};

// =============================================================================
// AUTH
// =============================================================================

/// Token issued by the login endpoints.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TokenGrant {
    pub access_token: String,
    pub token_type: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

/// Account payload for registration.
#[derive(Clone, Debug, Serialize)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// User account as returned by `/auth/me` and the admin user endpoints.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UserAccount {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub role: String,
    pub is_active: bool,
    pub created_at: String,
}

/// Filters for the admin user listing.
#[derive(Clone, Debug, Default, Serialize)]
pub struct AdminUserQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
    /// `active` or `disabled`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AdminUserPage {
    pub items: Vec<UserAccount>,
    pub total: i64,
    pub page: i64,
    pub page_size: i64,
}

/// Result of an admin password reset.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PasswordReset {
    pub message: String,
    pub initial_password: String,
}

// =============================================================================
// HEALTH RECORDS
// =============================================================================

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HealthRecord {
    pub id: i64,
    pub user_id: i64,
    pub weight: Option<f64>,
    pub height: Option<f64>,
    pub blood_pressure_systolic: Option<i64>,
    pub blood_pressure_diastolic: Option<i64>,
    pub heart_rate: Option<i64>,
    pub blood_sugar: Option<f64>,
    pub recorded_at: String,
}

/// Measurements for creating or patching a record. Unset fields are left
/// untouched by the backend on update.
#[derive(Clone, Debug, Default, Serialize)]
pub struct HealthMeasurements {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blood_pressure_systolic: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blood_pressure_diastolic: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heart_rate: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blood_sugar: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recorded_at: Option<String>,
}

/// Windowing filters for the record listing.
#[derive(Clone, Debug, Default, Serialize)]
pub struct HealthRecordQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}

/// Aggregate statistics. The backend answers with only a `message` when no
/// records exist, so every field is optional.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HealthSummary {
    pub total_records: Option<i64>,
    pub latest_record: Option<String>,
    pub average_weight: Option<f64>,
    pub average_heart_rate: Option<f64>,
    pub records_this_month: Option<i64>,
    pub message: Option<String>,
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct AnalysisWindow {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HealthAnalysis {
    pub analysis: String,
    pub recommendations: Vec<String>,
}

// =============================================================================
// AI ASSISTANT
// =============================================================================

#[derive(Clone, Debug, Serialize)]
pub struct ChatPrompt {
    pub message: String,
    pub is_user: bool,
}

impl ChatPrompt {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into(), is_user: true }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChatReply {
    pub reply: String,
    pub timestamp: String,
    #[serde(default)]
    pub chat_id: Option<i64>,
}

/// One conversation in the history listing (the backend groups messages by
/// day).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChatSession {
    pub id: i64,
    pub title: String,
    pub last_message_time: String,
    pub message_count: i64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChatRecord {
    pub id: i64,
    pub message: String,
    pub is_user: bool,
    pub created_at: String,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Recommendations {
    pub recommendations: Vec<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AiAnalysis {
    pub analysis: String,
    pub insights: Vec<serde_json::Value>,
}

// =============================================================================
// KNOWLEDGE BASE
// =============================================================================

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Article {
    pub id: i64,
    pub title: String,
    pub category: String,
    pub summary: Option<String>,
    pub content: String,
    pub cover_image: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub view_count: i64,
    #[serde(default)]
    pub favorite_count: i64,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ArticlePage {
    pub items: Vec<Article>,
    pub total: i64,
    pub page: i64,
    pub page_size: i64,
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct ArticleQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
}

#[derive(Clone, Debug, Serialize)]
pub struct NewArticle {
    pub title: String,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
    pub tags: Vec<String>,
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct ArticlePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FavoriteStatus {
    pub article_id: i64,
    pub is_favorited: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ReadHistoryEntry {
    pub article_id: i64,
    pub article_title: String,
    pub category: String,
    pub last_read_at: String,
    pub read_count: i64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HomeRecommendations {
    pub hot_articles: Vec<Article>,
    pub latest_articles: Vec<Article>,
}

// =============================================================================
// SHARED
// =============================================================================

/// Acknowledgement body returned by delete endpoints.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Acknowledgement {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_grant_decodes_without_optional_fields() {
        let grant: TokenGrant =
            serde_json::from_str(r#"{"access_token":"jwt","token_type":"bearer","username":null,"role":null}"#)
                .unwrap();
        assert_eq!(grant.token_type, "bearer");
        assert!(grant.role.is_none());
    }

    #[test]
    fn empty_summary_decodes_from_message_only_body() {
        let summary: HealthSummary = serde_json::from_str(r#"{"message":"暂无健康数据"}"#).unwrap();
        assert!(summary.total_records.is_none());
        assert_eq!(summary.message.as_deref(), Some("暂无健康数据"));
    }

    #[test]
    fn measurements_skip_unset_fields() {
        let patch = HealthMeasurements { weight: Some(71.5), ..HealthMeasurements::default() };
        let json = serde_json::to_string(&patch).unwrap();
        assert_eq!(json, r#"{"weight":71.5}"#);
    }
}
