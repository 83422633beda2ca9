//! Knowledge base area: articles, favorites, reading history, and the
//! admin-side article management endpoints.

use reqwest::Method;

use crate::error::ClientError;
use crate::net::http::{ApiClient, decode};
use crate::net::types::{
    Acknowledgement, Article, ArticlePage, ArticlePatch, ArticleQuery, FavoriteStatus,
    HomeRecommendations, NewArticle, ReadHistoryEntry,
};

pub struct KnowledgeApi {
    api: ApiClient,
    admin: ApiClient,
}

impl KnowledgeApi {
    /// `api` resolves user-then-admin for reading; `admin` must be an
    /// admin-only client for article management.
    #[must_use]
    pub fn new(api: ApiClient, admin: ApiClient) -> Self {
        Self { api, admin }
    }

    /// `GET /knowledge/articles`.
    pub async fn articles(&self, query: &ArticleQuery) -> Result<ArticlePage, ClientError> {
        decode(self.api.request(Method::GET, "/knowledge/articles", Some(query), None).await?)
    }

    /// `GET /knowledge/articles/{id}`. Reading an article also records it
    /// into the caller's reading history server-side.
    pub async fn article(&self, article_id: i64) -> Result<Article, ClientError> {
        let path = format!("/knowledge/articles/{article_id}");
        decode(self.api.request::<()>(Method::GET, &path, None, None).await?)
    }

    /// `POST /knowledge/articles/{id}/favorite`.
    pub async fn favorite(&self, article_id: i64) -> Result<FavoriteStatus, ClientError> {
        let path = format!("/knowledge/articles/{article_id}/favorite");
        decode(self.api.request::<()>(Method::POST, &path, None, None).await?)
    }

    /// `DELETE /knowledge/articles/{id}/favorite`.
    pub async fn unfavorite(&self, article_id: i64) -> Result<FavoriteStatus, ClientError> {
        let path = format!("/knowledge/articles/{article_id}/favorite");
        decode(self.api.request::<()>(Method::DELETE, &path, None, None).await?)
    }

    /// `GET /knowledge/favorites`.
    pub async fn favorites(&self, query: &ArticleQuery) -> Result<ArticlePage, ClientError> {
        decode(self.api.request(Method::GET, "/knowledge/favorites", Some(query), None).await?)
    }

    /// `GET /knowledge/read-history`.
    pub async fn read_history(&self, limit: u32) -> Result<Vec<ReadHistoryEntry>, ClientError> {
        let query = [("limit", limit)];
        decode(self.api.request(Method::GET, "/knowledge/read-history", Some(&query), None).await?)
    }

    /// `GET /knowledge/recommendations/home`.
    pub async fn home_recommendations(&self) -> Result<HomeRecommendations, ClientError> {
        decode(self.api.request::<()>(Method::GET, "/knowledge/recommendations/home", None, None).await?)
    }

    /// `POST /knowledge/admin/articles`.
    pub async fn create_article(&self, article: &NewArticle) -> Result<Article, ClientError> {
        let body = serde_json::to_value(article)?;
        decode(self.admin.request::<()>(Method::POST, "/knowledge/admin/articles", None, Some(body)).await?)
    }

    /// `PUT /knowledge/admin/articles/{id}`.
    pub async fn update_article(&self, article_id: i64, patch: &ArticlePatch) -> Result<Article, ClientError> {
        let path = format!("/knowledge/admin/articles/{article_id}");
        let body = serde_json::to_value(patch)?;
        decode(self.admin.request::<()>(Method::PUT, &path, None, Some(body)).await?)
    }

    /// `DELETE /knowledge/admin/articles/{id}`.
    pub async fn delete_article(&self, article_id: i64) -> Result<Acknowledgement, ClientError> {
        let path = format!("/knowledge/admin/articles/{article_id}");
        decode(self.admin.request::<()>(Method::DELETE, &path, None, None).await?)
    }
}
