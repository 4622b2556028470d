//! Page composition engine.
//!
//! Takes a resolved route and decides what the response *is* — not yet what
//! it looks like. Every outcome is a [`RenderResult`] value: not-found,
//! under-construction, a full article, or a section-built page with its
//! listing data already fetched. Content fetch failures never escape as
//! errors; they are logged and collapse into `NotFound`, so a flaky CMS
//! degrades to a 404 instead of a 500.
//!
//! Listing sections (blog, jobs, kutak) declare their data needs in the CMS
//! but cannot fetch it themselves — rendering is pure. Composition walks the
//! section list once and prefetches everything into a [`SectionData`] bundle
//! that the renderer consumes synchronously.

use serde::Deserialize;

use crate::cms::{CmsError, ContentSource, ListQuery};
use crate::content::{Article, Job, KutakArticle, ListMeta, Page, Section};
use crate::locale::{self, ResolvedRoute};

/// What a request path resolves to, ready for rendering.
#[derive(Debug)]
pub enum RenderResult {
    /// No content exists at this path.
    NotFound,
    /// The page exists in the CMS but has no sections yet.
    UnderConstruction { title: String },
    /// A blog article plus its publish-date neighbors.
    Article {
        article: Box<Article>,
        nav: ArticleNav,
    },
    /// A section-composed page plus the data its listing sections need.
    Sections {
        page: Box<Page>,
        data: SectionData,
    },
}

/// Adjacent articles in publish-date order: `previous` is the next-older
/// one, `next` the next-newer.
#[derive(Debug, Default)]
pub struct ArticleNav {
    pub previous: Option<Article>,
    pub next: Option<Article>,
}

/// Query-string parameters content pages accept.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<u32>,
}

/// Prefetched records for data-backed sections. Empty unless the page
/// actually contains the corresponding section.
#[derive(Debug, Default)]
pub struct SectionData {
    pub articles: Vec<Article>,
    /// Pagination metadata for the article listing, when one was fetched.
    pub articles_meta: ListMeta,
    pub jobs: Vec<Job>,
    pub kutak: Vec<KutakArticle>,
}

/// Compose the homepage for a locale.
pub async fn compose_home(
    source: &dyn ContentSource,
    route: &ResolvedRoute,
    query: &PageQuery,
) -> RenderResult {
    let page = match source.homepage(route.locale).await {
        Ok(Some(page)) => page,
        Ok(None) => return RenderResult::NotFound,
        Err(err) => return not_found_on_error("homepage", err),
    };
    finish_sections_page(source, route, query, page).await
}

/// Compose whatever lives at a resolved route.
///
/// Asset-looking paths short-circuit before any fetch. A content path of
/// `blog/<slug>` is an article; everything else is a slug-addressed page.
/// A page with an empty section list is real but unfinished, and renders
/// as under-construction rather than 404.
pub async fn compose_page(
    source: &dyn ContentSource,
    route: &ResolvedRoute,
    query: &PageQuery,
) -> RenderResult {
    if locale::is_asset_path(&route.content_path) {
        return RenderResult::NotFound;
    }
    if route.content_path.is_empty() {
        return compose_home(source, route, query).await;
    }

    let slug = route.slug();
    if let Some(article_slug) = article_slug(&slug) {
        return compose_article(source, route, article_slug).await;
    }

    let page = match source.page_by_slug(&slug, route.locale).await {
        Ok(Some(page)) => page,
        Ok(None) => return RenderResult::NotFound,
        Err(err) => return not_found_on_error(&slug, err),
    };
    finish_sections_page(source, route, query, page).await
}

/// `blog/<slug>` is an article; bare `blog` is the listing page.
fn article_slug(slug: &str) -> Option<&str> {
    slug.strip_prefix("blog/").filter(|rest| !rest.is_empty())
}

async fn compose_article(
    source: &dyn ContentSource,
    route: &ResolvedRoute,
    slug: &str,
) -> RenderResult {
    let article = match source.article_by_slug(slug, route.locale).await {
        Ok(Some(article)) => article,
        Ok(None) => return RenderResult::NotFound,
        Err(err) => return not_found_on_error(slug, err),
    };
    let nav = article_neighbors(source, route, &article).await;
    RenderResult::Article {
        article: Box::new(article),
        nav,
    }
}

/// Look up the articles published directly before and after this one.
/// An article without a publish date, or a failed lookup, just leaves
/// the corresponding link out.
async fn article_neighbors(
    source: &dyn ContentSource,
    route: &ResolvedRoute,
    article: &Article,
) -> ArticleNav {
    let Some(date) = article.publish_date.clone() else {
        return ArticleNav::default();
    };
    let previous = neighbor(
        source,
        route,
        ListQuery {
            published_before: Some(date.clone()),
            sort: Some("publishDate:desc".to_string()),
            page_size: Some(1),
            ..ListQuery::default()
        },
    )
    .await;
    let next = neighbor(
        source,
        route,
        ListQuery {
            published_after: Some(date),
            sort: Some("publishDate:asc".to_string()),
            page_size: Some(1),
            ..ListQuery::default()
        },
    )
    .await;
    ArticleNav { previous, next }
}

async fn neighbor(
    source: &dyn ContentSource,
    route: &ResolvedRoute,
    query: ListQuery,
) -> Option<Article> {
    match source.articles(route.locale, &query).await {
        Ok(listing) => listing.data.into_iter().next(),
        Err(err) => {
            tracing::warn!(locale = %route.locale, error = %err, "neighbor article fetch failed");
            None
        }
    }
}

async fn finish_sections_page(
    source: &dyn ContentSource,
    route: &ResolvedRoute,
    query: &PageQuery,
    page: Page,
) -> RenderResult {
    let sections = page.sections.as_deref().unwrap_or(&[]);
    if sections.is_empty() {
        let title = page
            .title
            .clone()
            .or_else(|| page.slug.clone())
            .unwrap_or_else(|| route.slug());
        return RenderResult::UnderConstruction { title };
    }
    let data = prefetch(source, route, query, sections).await;
    RenderResult::Sections {
        page: Box::new(page),
        data,
    }
}

/// Fetch listing data for the sections that need it. A failed listing fetch
/// degrades that one section to empty; the rest of the page still renders.
async fn prefetch(
    source: &dyn ContentSource,
    route: &ResolvedRoute,
    query: &PageQuery,
    sections: &[Section],
) -> SectionData {
    let mut data = SectionData::default();
    for section in sections {
        match section {
            Section::BlogListing(listing) if data.articles.is_empty() => {
                let list_query = ListQuery {
                    page: query.page,
                    page_size: listing.articles_per_page,
                    ..ListQuery::default()
                };
                match source.articles(route.locale, &list_query).await {
                    Ok(found) => {
                        data.articles = found.data;
                        data.articles_meta = found.meta;
                    }
                    Err(err) => {
                        tracing::warn!(locale = %route.locale, error = %err, "article listing fetch failed");
                    }
                }
            }
            Section::JobListing(listing) if data.jobs.is_empty() => {
                let query = ListQuery {
                    page_size: listing.jobs_per_page,
                    ..ListQuery::default()
                };
                match source.jobs(route.locale, &query).await {
                    Ok(listing) => data.jobs = listing.data,
                    Err(err) => {
                        tracing::warn!(locale = %route.locale, error = %err, "job listing fetch failed");
                    }
                }
            }
            Section::Kutak(_) if data.kutak.is_empty() => {
                match source.kutak_articles(route.locale).await {
                    Ok(articles) => data.kutak = articles,
                    Err(err) => {
                        tracing::warn!(locale = %route.locale, error = %err, "kutak listing fetch failed");
                    }
                }
            }
            _ => {}
        }
    }
    data
}

fn not_found_on_error(what: &str, err: CmsError) -> RenderResult {
    tracing::warn!(slug = what, error = %err, "content fetch failed, serving not-found");
    RenderResult::NotFound
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cms::{Listing, LikeOutcome};
    use crate::content::{GlobalData, ListMeta};
    use crate::locale::{resolve_path, Locale};
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// In-memory content source: one page per slug, one article, fixed
    /// listings. `fail` makes every call return an error.
    #[derive(Default)]
    struct StubSource {
        pages: Vec<Page>,
        homepage: Option<Page>,
        articles: Vec<Article>,
        jobs: Vec<Job>,
        kutak: Vec<KutakArticle>,
        fail: bool,
        fetches: AtomicUsize,
    }

    impl StubSource {
        fn failing() -> Self {
            Self {
                fail: true,
                ..Self::default()
            }
        }

        fn check(&self) -> Result<(), CmsError> {
            self.fetches.fetch_add(1, Ordering::Relaxed);
            if self.fail {
                Err(CmsError::Status {
                    status: 500,
                    path: "/api/test".into(),
                })
            } else {
                Ok(())
            }
        }
    }

    #[async_trait]
    impl ContentSource for StubSource {
        async fn global(&self, _locale: Locale) -> Result<Option<GlobalData>, CmsError> {
            self.check()?;
            Ok(None)
        }
        async fn homepage(&self, _locale: Locale) -> Result<Option<Page>, CmsError> {
            self.check()?;
            Ok(self.homepage.clone())
        }
        async fn page_by_slug(
            &self,
            slug: &str,
            _locale: Locale,
        ) -> Result<Option<Page>, CmsError> {
            self.check()?;
            Ok(self
                .pages
                .iter()
                .find(|p| p.slug.as_deref() == Some(slug))
                .cloned())
        }
        async fn article_by_slug(
            &self,
            slug: &str,
            _locale: Locale,
        ) -> Result<Option<Article>, CmsError> {
            self.check()?;
            Ok(self.articles.iter().find(|a| a.slug == slug).cloned())
        }
        async fn articles(
            &self,
            _locale: Locale,
            query: &ListQuery,
        ) -> Result<Listing<Article>, CmsError> {
            self.check()?;
            let mut data: Vec<Article> = self
                .articles
                .iter()
                .filter(|a| {
                    let date = a.publish_date.as_deref().unwrap_or("");
                    query
                        .published_before
                        .as_deref()
                        .map_or(true, |bound| date < bound)
                        && query
                            .published_after
                            .as_deref()
                            .map_or(true, |bound| date > bound)
                })
                .cloned()
                .collect();
            match query.sort.as_deref() {
                Some("publishDate:asc") => data.sort_by(|x, y| x.publish_date.cmp(&y.publish_date)),
                _ => data.sort_by(|x, y| y.publish_date.cmp(&x.publish_date)),
            }
            if let Some(size) = query.page_size {
                data.truncate(size as usize);
            }
            let mut meta = ListMeta::default();
            meta.pagination.page = query.page.unwrap_or(1);
            meta.pagination.total = data.len() as u32;
            Ok(Listing { data, meta })
        }
        async fn jobs(&self, _locale: Locale, _query: &ListQuery) -> Result<Listing<Job>, CmsError> {
            self.check()?;
            Ok(Listing {
                data: self.jobs.clone(),
                meta: ListMeta::default(),
            })
        }
        async fn kutak_articles(&self, _locale: Locale) -> Result<Vec<KutakArticle>, CmsError> {
            self.check()?;
            Ok(self.kutak.clone())
        }
        async fn like_kutak(&self, _document_id: &str) -> Result<LikeOutcome, CmsError> {
            self.check()?;
            Ok(LikeOutcome {
                success: true,
                likes: 1,
            })
        }
        async fn unlike_kutak(&self, _document_id: &str) -> Result<LikeOutcome, CmsError> {
            self.check()?;
            Ok(LikeOutcome {
                success: true,
                likes: 0,
            })
        }
    }

    fn page(slug: &str, sections: serde_json::Value) -> Page {
        serde_json::from_value(json!({
            "slug": slug,
            "title": format!("Title for {slug}"),
            "sections": sections,
        }))
        .unwrap()
    }

    fn article(slug: &str) -> Article {
        serde_json::from_value(json!({ "slug": slug, "title": "Post" })).unwrap()
    }

    fn dated_article(slug: &str, publish_date: &str) -> Article {
        serde_json::from_value(json!({
            "slug": slug,
            "title": format!("Post {slug}"),
            "publishDate": publish_date,
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn missing_page_is_not_found() {
        let source = StubSource::default();
        let result = compose_page(&source, &resolve_path("/nowhere"), &PageQuery::default()).await;
        assert!(matches!(result, RenderResult::NotFound));
    }

    #[tokio::test]
    async fn empty_sections_render_under_construction() {
        let source = StubSource {
            pages: vec![page("soon", json!([]))],
            ..StubSource::default()
        };
        let result = compose_page(&source, &resolve_path("/soon"), &PageQuery::default()).await;
        match result {
            RenderResult::UnderConstruction { title } => assert_eq!(title, "Title for soon"),
            other => panic!("expected under-construction, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn sectioned_page_composes() {
        let source = StubSource {
            pages: vec![page("about", json!([{ "__component": "shared.hero" }]))],
            ..StubSource::default()
        };
        let result = compose_page(&source, &resolve_path("/about"), &PageQuery::default()).await;
        match result {
            RenderResult::Sections { page, .. } => {
                assert_eq!(page.slug.as_deref(), Some("about"));
            }
            other => panic!("expected sections, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn blog_path_with_slug_is_an_article() {
        let source = StubSource {
            articles: vec![article("my-post")],
            ..StubSource::default()
        };
        let result = compose_page(&source, &resolve_path("/blog/my-post"), &PageQuery::default()).await;
        match result {
            RenderResult::Article { article, .. } => assert_eq!(article.slug, "my-post"),
            other => panic!("expected article, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn article_neighbors_follow_publish_date_order() {
        let source = StubSource {
            articles: vec![
                dated_article("oldest", "2025-01-01"),
                dated_article("middle", "2025-02-01"),
                dated_article("newest", "2025-03-01"),
            ],
            ..StubSource::default()
        };
        let result =
            compose_page(&source, &resolve_path("/blog/middle"), &PageQuery::default()).await;
        match result {
            RenderResult::Article { nav, .. } => {
                assert_eq!(nav.previous.map(|a| a.slug), Some("oldest".to_string()));
                assert_eq!(nav.next.map(|a| a.slug), Some("newest".to_string()));
            }
            other => panic!("expected article, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn edge_articles_have_one_sided_navigation() {
        let source = StubSource {
            articles: vec![
                dated_article("oldest", "2025-01-01"),
                dated_article("newest", "2025-03-01"),
            ],
            ..StubSource::default()
        };
        let result =
            compose_page(&source, &resolve_path("/blog/newest"), &PageQuery::default()).await;
        match result {
            RenderResult::Article { nav, .. } => {
                assert_eq!(nav.previous.map(|a| a.slug), Some("oldest".to_string()));
                assert!(nav.next.is_none());
            }
            other => panic!("expected article, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn undated_article_skips_neighbor_lookup() {
        let source = StubSource {
            articles: vec![article("my-post"), dated_article("other", "2025-01-01")],
            ..StubSource::default()
        };
        let result =
            compose_page(&source, &resolve_path("/blog/my-post"), &PageQuery::default()).await;
        match result {
            RenderResult::Article { nav, .. } => {
                assert!(nav.previous.is_none());
                assert!(nav.next.is_none());
            }
            other => panic!("expected article, got {other:?}"),
        }
        // One fetch for the article itself, none for neighbors.
        assert_eq!(source.fetches.load(Ordering::Relaxed), 1);
    }

    #[tokio::test]
    async fn bare_blog_path_is_a_page_not_an_article() {
        let source = StubSource {
            pages: vec![page("blog", json!([{ "__component": "shared.blog-listing" }]))],
            articles: vec![article("my-post")],
            ..StubSource::default()
        };
        let result = compose_page(&source, &resolve_path("/blog"), &PageQuery::default()).await;
        match result {
            RenderResult::Sections { data, .. } => {
                // The listing section triggers the article prefetch.
                assert_eq!(data.articles.len(), 1);
            }
            other => panic!("expected sections, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn page_query_reaches_the_article_listing() {
        let source = StubSource {
            pages: vec![page("blog", json!([{ "__component": "shared.blog-listing" }]))],
            articles: vec![article("my-post")],
            ..StubSource::default()
        };
        let query = PageQuery { page: Some(2) };
        let result = compose_page(&source, &resolve_path("/blog"), &query).await;
        match result {
            RenderResult::Sections { data, .. } => {
                assert_eq!(data.articles_meta.pagination.page, 2);
            }
            other => panic!("expected sections, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn fetch_errors_collapse_to_not_found() {
        let source = StubSource::failing();
        let result = compose_page(&source, &resolve_path("/about"), &PageQuery::default()).await;
        assert!(matches!(result, RenderResult::NotFound));
        let result = compose_page(&source, &resolve_path("/blog/my-post"), &PageQuery::default()).await;
        assert!(matches!(result, RenderResult::NotFound));
    }

    #[tokio::test]
    async fn asset_paths_never_hit_the_source() {
        let source = StubSource::default();
        let result = compose_page(&source, &resolve_path("/favicon.png"), &PageQuery::default()).await;
        assert!(matches!(result, RenderResult::NotFound));
        let result = compose_page(&source, &resolve_path("/uploads/img.jpg"), &PageQuery::default()).await;
        assert!(matches!(result, RenderResult::NotFound));
        assert_eq!(source.fetches.load(Ordering::Relaxed), 0);
    }

    #[tokio::test]
    async fn prefetch_only_fetches_what_sections_need() {
        let source = StubSource {
            pages: vec![page(
                "jobs",
                json!([
                    { "__component": "shared.hero" },
                    { "__component": "shared.job-listing" },
                ]),
            )],
            jobs: vec![serde_json::from_value(json!({ "title": "Caregiver" })).unwrap()],
            kutak: vec![serde_json::from_value(
                json!({ "documentId": "k1", "title": "Kutak" }),
            )
            .unwrap()],
            ..StubSource::default()
        };
        let result = compose_page(&source, &resolve_path("/jobs"), &PageQuery::default()).await;
        match result {
            RenderResult::Sections { data, .. } => {
                assert_eq!(data.jobs.len(), 1);
                assert!(data.articles.is_empty());
                assert!(data.kutak.is_empty());
            }
            other => panic!("expected sections, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn listing_fetch_failure_degrades_to_empty_data() {
        // Page fetch succeeds, listing fetch fails: the page still renders.
        struct FlakyListings(StubSource);

        #[async_trait]
        impl ContentSource for FlakyListings {
            async fn global(&self, locale: Locale) -> Result<Option<GlobalData>, CmsError> {
                self.0.global(locale).await
            }
            async fn homepage(&self, locale: Locale) -> Result<Option<Page>, CmsError> {
                self.0.homepage(locale).await
            }
            async fn page_by_slug(
                &self,
                slug: &str,
                locale: Locale,
            ) -> Result<Option<Page>, CmsError> {
                self.0.page_by_slug(slug, locale).await
            }
            async fn article_by_slug(
                &self,
                slug: &str,
                locale: Locale,
            ) -> Result<Option<Article>, CmsError> {
                self.0.article_by_slug(slug, locale).await
            }
            async fn articles(
                &self,
                _locale: Locale,
                _query: &ListQuery,
            ) -> Result<Listing<Article>, CmsError> {
                Err(CmsError::Status {
                    status: 502,
                    path: "/api/articles".into(),
                })
            }
            async fn jobs(
                &self,
                locale: Locale,
                query: &ListQuery,
            ) -> Result<Listing<Job>, CmsError> {
                self.0.jobs(locale, query).await
            }
            async fn kutak_articles(&self, locale: Locale) -> Result<Vec<KutakArticle>, CmsError> {
                self.0.kutak_articles(locale).await
            }
            async fn like_kutak(&self, id: &str) -> Result<LikeOutcome, CmsError> {
                self.0.like_kutak(id).await
            }
            async fn unlike_kutak(&self, id: &str) -> Result<LikeOutcome, CmsError> {
                self.0.unlike_kutak(id).await
            }
        }

        let source = FlakyListings(StubSource {
            pages: vec![page("blog", json!([{ "__component": "shared.blog-listing" }]))],
            ..StubSource::default()
        });
        let result = compose_page(&source, &resolve_path("/blog"), &PageQuery::default()).await;
        match result {
            RenderResult::Sections { data, .. } => assert!(data.articles.is_empty()),
            other => panic!("expected sections, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn homepage_composes_for_locale() {
        let source = StubSource {
            homepage: Some(page("home", json!([{ "__component": "shared.hero" }]))),
            ..StubSource::default()
        };
        let result = compose_page(&source, &resolve_path("/"), &PageQuery::default()).await;
        assert!(matches!(result, RenderResult::Sections { .. }));
    }
}
