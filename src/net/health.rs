//! Health records area: CRUD, summary statistics, and rule-based analysis.

use reqwest::Method;

use crate::error::ClientError;
use crate::net::http::{ApiClient, decode};
use crate::net::types::{
    Acknowledgement, AnalysisWindow, HealthAnalysis, HealthMeasurements, HealthRecord,
    HealthRecordQuery, HealthSummary,
};

pub struct HealthApi {
    api: ApiClient,
}

impl HealthApi {
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// `GET /health/records`.
    pub async fn records(&self, query: &HealthRecordQuery) -> Result<Vec<HealthRecord>, ClientError> {
        decode(self.api.request(Method::GET, "/health/records", Some(query), None).await?)
    }

    /// `POST /health/records`.
    pub async fn create_record(&self, record: &HealthMeasurements) -> Result<HealthRecord, ClientError> {
        let body = serde_json::to_value(record)?;
        decode(self.api.request::<()>(Method::POST, "/health/records", None, Some(body)).await?)
    }

    /// `GET /health/records/{id}`.
    pub async fn record(&self, record_id: i64) -> Result<HealthRecord, ClientError> {
        let path = format!("/health/records/{record_id}");
        decode(self.api.request::<()>(Method::GET, &path, None, None).await?)
    }

    /// `PUT /health/records/{id}`.
    pub async fn update_record(
        &self,
        record_id: i64,
        patch: &HealthMeasurements,
    ) -> Result<HealthRecord, ClientError> {
        let path = format!("/health/records/{record_id}");
        let body = serde_json::to_value(patch)?;
        decode(self.api.request::<()>(Method::PUT, &path, None, Some(body)).await?)
    }

    /// `DELETE /health/records/{id}`.
    pub async fn delete_record(&self, record_id: i64) -> Result<Acknowledgement, ClientError> {
        let path = format!("/health/records/{record_id}");
        decode(self.api.request::<()>(Method::DELETE, &path, None, None).await?)
    }

    /// `GET /health/summary`.
    pub async fn summary(&self) -> Result<HealthSummary, ClientError> {
        decode(self.api.request::<()>(Method::GET, "/health/summary", None, None).await?)
    }

    /// `POST /health/analyze`.
    pub async fn analyze(&self, window: &AnalysisWindow) -> Result<HealthAnalysis, ClientError> {
        let body = serde_json::to_value(window)?;
        decode(self.api.request::<()>(Method::POST, "/health/analyze", None, Some(body)).await?)
    }
}
