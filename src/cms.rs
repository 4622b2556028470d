//! Headless CMS client.
//!
//! All content this site serves lives in a Strapi-shaped CMS reached over
//! HTTP. [`ContentSource`] is the seam the composition engine talks to, so
//! tests can substitute an in-memory source; [`CmsClient`] is the real
//! implementation: locale-qualified REST queries with explicit populate /
//! filter / sort / pagination parameters, decoded with serde.
//!
//! Fetch failures are values, never panics: a non-2xx response becomes
//! [`CmsError::Status`], a body that fails to decode becomes
//! [`CmsError::Decode`]. The composition engine maps all of them to a
//! user-safe not-found outcome.
//!
//! ## Global-data cache
//!
//! Navigation and site identity (`global`) are fetched on almost every
//! request, so `CmsClient` keeps them in a bounded moka cache keyed by
//! locale with a configurable TTL. Entries expire and refresh on next
//! access; nothing else is cached.

use async_trait::async_trait;
use moka::future::Cache;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

use crate::config::CmsConfig;
use crate::content::{Article, GlobalData, Job, KutakArticle, ListMeta, Page};
use crate::locale::Locale;

#[derive(Error, Debug)]
pub enum CmsError {
    #[error("CMS request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("CMS returned status {status} for {path}")]
    Status { status: u16, path: String },
    #[error("CMS response decode failed: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Listing query for articles and jobs.
#[derive(Debug, Clone, Default)]
pub struct ListQuery {
    pub featured: Option<bool>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    /// Strapi sort expression, e.g. `publishDate:desc`.
    pub sort: Option<String>,
    /// Only records published strictly before this date.
    pub published_before: Option<String>,
    /// Only records published strictly after this date.
    pub published_after: Option<String>,
}

/// A page of records plus pagination metadata.
#[derive(Debug, Clone)]
pub struct Listing<T> {
    pub data: Vec<T>,
    pub meta: ListMeta,
}

/// Result of a kutak like/unlike call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LikeOutcome {
    pub success: bool,
    pub likes: u64,
}

/// The content operations the site needs. Implemented by [`CmsClient`]
/// in production and by in-memory stubs in tests.
#[async_trait]
pub trait ContentSource: Send + Sync {
    async fn global(&self, locale: Locale) -> Result<Option<GlobalData>, CmsError>;
    async fn homepage(&self, locale: Locale) -> Result<Option<Page>, CmsError>;
    async fn page_by_slug(&self, slug: &str, locale: Locale) -> Result<Option<Page>, CmsError>;
    async fn article_by_slug(
        &self,
        slug: &str,
        locale: Locale,
    ) -> Result<Option<Article>, CmsError>;
    async fn articles(&self, locale: Locale, query: &ListQuery)
        -> Result<Listing<Article>, CmsError>;
    async fn jobs(&self, locale: Locale, query: &ListQuery) -> Result<Listing<Job>, CmsError>;
    async fn kutak_articles(&self, locale: Locale) -> Result<Vec<KutakArticle>, CmsError>;
    /// Like a kutak article by its stable string `documentId` — not the
    /// numeric database id, which changes across republishes.
    async fn like_kutak(&self, document_id: &str) -> Result<LikeOutcome, CmsError>;
    async fn unlike_kutak(&self, document_id: &str) -> Result<LikeOutcome, CmsError>;
}

#[derive(Debug, Deserialize)]
struct SingleEnvelope<T> {
    data: Option<T>,
}

#[derive(Debug, Deserialize)]
struct ListEnvelope<T> {
    #[serde(default = "Vec::new")]
    data: Vec<T>,
    #[serde(default)]
    meta: ListMeta,
}

#[derive(Debug, Deserialize)]
struct LikeEnvelope {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    data: Option<LikeData>,
}

#[derive(Debug, Deserialize)]
struct LikeData {
    #[serde(default)]
    likes: u64,
}

/// HTTP client for the CMS REST API.
pub struct CmsClient {
    http: reqwest::Client,
    base_url: String,
    global_cache: Cache<Locale, GlobalData>,
}

impl CmsClient {
    pub fn new(config: &CmsConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            // One entry per locale; capacity is a formality.
            global_cache: Cache::builder()
                .max_capacity(16)
                .time_to_live(Duration::from_secs(config.nav_cache_ttl_secs))
                .build(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(String, String)],
    ) -> Result<T, CmsError> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .http
            .get(&url)
            .query(query)
            .header("Accept", "application/json")
            // The CMS is the single source of truth; never serve it stale.
            .header("Cache-Control", "no-store")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CmsError::Status {
                status: status.as_u16(),
                path: path.to_string(),
            });
        }
        let value: serde_json::Value = response.json().await?;
        Ok(serde_json::from_value(value)?)
    }

    async fn post_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, CmsError> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .http
            .post(&url)
            .header("Content-Type", "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CmsError::Status {
                status: status.as_u16(),
                path: path.to_string(),
            });
        }
        let value: serde_json::Value = response.json().await?;
        Ok(serde_json::from_value(value)?)
    }

    fn list_params(locale: Locale, query: &ListQuery, default_sort: &str) -> Vec<(String, String)> {
        let mut params = vec![("locale".to_string(), locale.code().to_string())];
        params.push((
            "sort".to_string(),
            query.sort.clone().unwrap_or_else(|| default_sort.to_string()),
        ));
        if let Some(featured) = query.featured {
            params.push(("filters[featured]".to_string(), featured.to_string()));
        }
        if let Some(before) = &query.published_before {
            params.push(("filters[publishDate][$lt]".to_string(), before.clone()));
        }
        if let Some(after) = &query.published_after {
            params.push(("filters[publishDate][$gt]".to_string(), after.clone()));
        }
        if let Some(page) = query.page {
            params.push(("pagination[page]".to_string(), page.to_string()));
        }
        if let Some(size) = query.page_size {
            params.push(("pagination[pageSize]".to_string(), size.to_string()));
        }
        params
    }

    fn article_populate() -> Vec<(String, String)> {
        vec![
            ("populate[author][fields]".to_string(), "name,email".to_string()),
            (
                "populate[author][populate][avatar][fields]".to_string(),
                "url,alternativeText".to_string(),
            ),
            (
                "populate[cover][fields]".to_string(),
                "url,alternativeText".to_string(),
            ),
            (
                "populate[category][fields]".to_string(),
                "name,slug".to_string(),
            ),
        ]
    }
}

#[async_trait]
impl ContentSource for CmsClient {
    async fn global(&self, locale: Locale) -> Result<Option<GlobalData>, CmsError> {
        if let Some(cached) = self.global_cache.get(&locale).await {
            return Ok(Some(cached));
        }
        let params = vec![
            ("locale".to_string(), locale.code().to_string()),
            ("populate".to_string(), "*".to_string()),
        ];
        let envelope: SingleEnvelope<GlobalData> = self.get_json("/api/global", &params).await?;
        if let Some(data) = &envelope.data {
            self.global_cache.insert(locale, data.clone()).await;
        }
        Ok(envelope.data)
    }

    async fn homepage(&self, locale: Locale) -> Result<Option<Page>, CmsError> {
        let params = vec![
            ("locale".to_string(), locale.code().to_string()),
            (
                "populate[sections][populate]".to_string(),
                "*".to_string(),
            ),
        ];
        let envelope: SingleEnvelope<Page> = self.get_json("/api/homepage", &params).await?;
        Ok(envelope.data)
    }

    async fn page_by_slug(&self, slug: &str, locale: Locale) -> Result<Option<Page>, CmsError> {
        let params = vec![
            ("locale".to_string(), locale.code().to_string()),
            ("filters[slug]".to_string(), slug.to_string()),
            (
                "populate[sections][populate]".to_string(),
                "*".to_string(),
            ),
        ];
        let envelope: ListEnvelope<Page> = self.get_json("/api/pages", &params).await?;
        Ok(envelope.data.into_iter().next())
    }

    async fn article_by_slug(
        &self,
        slug: &str,
        locale: Locale,
    ) -> Result<Option<Article>, CmsError> {
        let mut params = vec![
            ("locale".to_string(), locale.code().to_string()),
            ("filters[slug]".to_string(), slug.to_string()),
        ];
        params.extend(Self::article_populate());
        let envelope: ListEnvelope<Article> = self.get_json("/api/articles", &params).await?;
        Ok(envelope.data.into_iter().next())
    }

    async fn articles(
        &self,
        locale: Locale,
        query: &ListQuery,
    ) -> Result<Listing<Article>, CmsError> {
        let mut params = Self::list_params(locale, query, "publishDate:desc");
        params.extend(Self::article_populate());
        let envelope: ListEnvelope<Article> = self.get_json("/api/articles", &params).await?;
        Ok(Listing {
            data: envelope.data,
            meta: envelope.meta,
        })
    }

    async fn jobs(&self, locale: Locale, query: &ListQuery) -> Result<Listing<Job>, CmsError> {
        let mut params = Self::list_params(locale, query, "jobStart:desc");
        params.push(("populate".to_string(), "image".to_string()));
        let envelope: ListEnvelope<Job> = self.get_json("/api/jobs", &params).await?;
        Ok(Listing {
            data: envelope.data,
            meta: envelope.meta,
        })
    }

    async fn kutak_articles(&self, locale: Locale) -> Result<Vec<KutakArticle>, CmsError> {
        let params = vec![
            ("locale".to_string(), locale.code().to_string()),
            ("pagination[pageSize]".to_string(), "100".to_string()),
            ("sort".to_string(), "publishDate:desc".to_string()),
            // Drafts must never leak onto the public site.
            ("publicationState".to_string(), "live".to_string()),
            (
                "populate[image][fields]".to_string(),
                "url,alternativeText".to_string(),
            ),
            (
                "populate[downloadLink][fields]".to_string(),
                "url,name,ext".to_string(),
            ),
        ];
        let envelope: ListEnvelope<KutakArticle> =
            self.get_json("/api/kutak-articles", &params).await?;
        Ok(envelope.data)
    }

    async fn like_kutak(&self, document_id: &str) -> Result<LikeOutcome, CmsError> {
        let envelope: LikeEnvelope = self
            .post_json(&format!("/api/kutak-articles/{document_id}/like"))
            .await?;
        Ok(LikeOutcome {
            success: envelope.success,
            likes: envelope.data.map(|d| d.likes).unwrap_or(0),
        })
    }

    async fn unlike_kutak(&self, document_id: &str) -> Result<LikeOutcome, CmsError> {
        let envelope: LikeEnvelope = self
            .post_json(&format!("/api/kutak-articles/{document_id}/unlike"))
            .await?;
        Ok(LikeOutcome {
            success: envelope.success,
            likes: envelope.data.map(|d| d.likes).unwrap_or(0),
        })
    }
}
