//! Article pages and the data-backed listing sections.
//!
//! Listing sections render whatever the composition engine prefetched for
//! them; an empty listing is a CMS-authored empty state, not an error.

use maud::{html, Markup};

use crate::compose::ArticleNav;
use crate::content::{
    Article, BlogListingSection, Job, JobListingSection, KutakArticle, KutakSection, ListMeta,
};
use crate::render::RenderCtx;
use crate::richtext::{self, RichText};

fn rich(content: &Option<RichText>) -> Markup {
    html! {
        @if let Some(content) = content {
            (richtext::render(content))
        }
    }
}

/// Full article page body. Publish-date neighbors appear above and below
/// the body, like the original layout.
pub fn article_page(ctx: &RenderCtx, article: &Article, nav: &ArticleNav) -> Markup {
    html! {
        article .article {
            header {
                @if let Some(category) = &article.category {
                    p .headline { (category.name) }
                }
                h1 { (article.title) }
                @if let Some(description) = &article.description {
                    p .article-description { (description) }
                }
                .article-byline {
                    @if let Some(author) = &article.author {
                        @if let Some(name) = &author.name { span { (name) } }
                    }
                    @if let Some(date) = &article.publish_date {
                        time datetime=(date) { (date) }
                    }
                }
            }
            (article_navigation(ctx, nav))
            @if let Some(cover) = &article.cover {
                img src=(cover.url(ctx.cms_base)) alt=(cover.alt(&article.title));
            }
            .article-body {
                (rich(&article.content))
            }
            (article_navigation(ctx, nav))
            a href=(ctx.url("/blog")) { "←" }
        }
    }
}

/// Links to the adjacent articles by publish date. Renders nothing when
/// the article has no neighbors.
fn article_navigation(ctx: &RenderCtx, nav: &ArticleNav) -> Markup {
    html! {
        @if nav.previous.is_some() || nav.next.is_some() {
            nav .article-nav {
                @if let Some(previous) = &nav.previous {
                    a .article-nav-prev href=(ctx.url(&format!("/blog/{}", previous.slug))) {
                        span { "←" }
                        span { (previous.title) }
                    }
                }
                @if let Some(next) = &nav.next {
                    a .article-nav-next href=(ctx.url(&format!("/blog/{}", next.slug))) {
                        span { (next.title) }
                        span { "→" }
                    }
                }
            }
        }
    }
}

/// Card used in blog listings and featured strips.
fn post_card(ctx: &RenderCtx, article: &Article) -> Markup {
    let href = ctx.url(&format!("/blog/{}", article.slug));
    html! {
        a .post-card href=(href) {
            @if let Some(cover) = &article.cover {
                img src=(cover.url(ctx.cms_base)) alt=(cover.alt(&article.title));
            }
            @if let Some(category) = &article.category {
                p .headline { (category.name) }
            }
            h3 { (article.title) }
            @if let Some(description) = &article.description {
                p { (description) }
            }
        }
    }
}

/// Blog listing: optional featured strip first, then the current page of
/// the full list with its page controls.
pub fn blog_listing(
    ctx: &RenderCtx,
    s: &BlogListingSection,
    articles: &[Article],
    meta: &ListMeta,
) -> Markup {
    let featured: Vec<&Article> = if s.show_featured == Some(true) {
        let count = s.featured_count.unwrap_or(3) as usize;
        articles.iter().filter(|a| a.featured).take(count).collect()
    } else {
        Vec::new()
    };
    html! {
        section .blog-listing {
            (rich(&s.intro_text))
            @if !featured.is_empty() {
                @if let Some(title) = &s.featured_title { h2 { (title) } }
                .post-grid .post-grid-featured {
                    @for article in &featured {
                        (post_card(ctx, article))
                    }
                }
            }
            @if let Some(title) = &s.all_title { h2 { (title) } }
            .post-grid {
                @for article in articles {
                    (post_card(ctx, article))
                }
            }
            (page_controls(meta))
        }
    }
}

/// Prev/next links plus a "page X of Y" label, driven by the `?page=`
/// query parameter. Hidden for single-page listings.
fn page_controls(meta: &ListMeta) -> Markup {
    let p = &meta.pagination;
    html! {
        @if p.page_count > 1 {
            nav .pagination {
                @if p.page > 1 {
                    a href=(format!("?page={}", p.page - 1)) { "←" }
                }
                span { "Stranica " (p.page) " od " (p.page_count) }
                @if p.page < p.page_count {
                    a href=(format!("?page={}", p.page + 1)) { "→" }
                }
            }
        }
    }
}

/// Open-positions listing with a CMS-authored empty state.
pub fn job_listing(ctx: &RenderCtx, s: &JobListingSection, jobs: &[Job]) -> Markup {
    html! {
        section .job-listing {
            @if let Some(title) = &s.title { h2 { (title) } }
            (rich(&s.intro_text))
            @if jobs.is_empty() {
                .no-results {
                    @if let Some(title) = &s.no_results_title { h3 { (title) } }
                    @if let Some(message) = &s.no_results_message { p { (message) } }
                }
            } @else {
                .job-grid {
                    @for job in jobs {
                        (job_card(ctx, s, job))
                    }
                }
            }
        }
    }
}

fn job_card(ctx: &RenderCtx, s: &JobListingSection, job: &Job) -> Markup {
    html! {
        .job-card .job-featured[job.featured] {
            @if let Some(image) = &job.image {
                img src=(image.url(ctx.cms_base)) alt=(job.title.as_deref().unwrap_or(""));
            }
            @if let Some(title) = &job.title { h3 { (title) } }
            dl {
                @if let Some(start) = &job.job_start {
                    dt { (s.start_label.as_deref().unwrap_or("Početak")) }
                    dd { (start) }
                }
                @if let Some(location) = &job.location {
                    dt { (s.location_label.as_deref().unwrap_or("Lokacija")) }
                    dd { (location) }
                }
            }
            (rich(&job.patient_description))
            @if !job.requirements.is_empty() {
                ul .job-requirements {
                    @for line in &job.requirements { li { (line.text()) } }
                }
            }
            @if !job.advantages.is_empty() {
                ul .job-advantages {
                    @for line in &job.advantages { li { (line.text()) } }
                }
            }
        }
    }
}

/// Kutak corner: downloadable resources with a like counter. The like
/// button posts to the kutak API by `documentId` via the embedded script.
pub fn kutak_listing(ctx: &RenderCtx, s: &KutakSection, articles: &[KutakArticle]) -> Markup {
    html! {
        section .kutak {
            header .kutak-header {
                @if let Some(title) = &s.header_title { h2 { (title) } }
                (rich(&s.header_text))
            }
            .kutak-grid data-load-more=[s.load_more_label.as_deref()] {
                @for article in articles {
                    (kutak_card(ctx, article))
                }
            }
        }
    }
}

fn kutak_card(ctx: &RenderCtx, article: &KutakArticle) -> Markup {
    html! {
        .kutak-card {
            @if let Some(image) = &article.image {
                img src=(image.url(ctx.cms_base)) alt=(image.alt(&article.title));
            }
            h3 { (article.title) }
            (rich(&article.content))
            @if article.download {
                @if let Some(link) = &article.download_link {
                    a .button href=(absolute_media(ctx, &link.url)) download {
                        (article.download_title.as_deref().unwrap_or("Preuzmi"))
                    }
                    @if let Some(text) = &article.download_text { p { (text) } }
                }
            }
            button .like-button
                data-like=(article.document_id)
                data-likes=(article.likes) {
                "♥ " span .like-count { (article.likes) }
            }
        }
    }
}

fn absolute_media(ctx: &RenderCtx, url: &str) -> String {
    if url.starts_with('/') {
        format!("{}{}", ctx.cms_base, url)
    } else {
        url.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::Locale;
    use serde_json::json;

    fn ctx() -> RenderCtx<'static> {
        RenderCtx::new(Locale::Hr, "http://localhost:1337")
    }

    fn article(slug: &str, featured: bool) -> Article {
        serde_json::from_value(json!({
            "slug": slug,
            "title": format!("Post {slug}"),
            "featured": featured,
        }))
        .unwrap()
    }

    #[test]
    fn article_page_shows_title_and_body() {
        let a: Article = serde_json::from_value(json!({
            "slug": "njega-starijih",
            "title": "Njega starijih osoba",
            "content": [{ "type": "paragraph", "children": [{ "type": "text", "text": "Tekst." }] }],
            "publishDate": "2025-03-01",
        }))
        .unwrap();
        let html = article_page(&ctx(), &a, &ArticleNav::default()).into_string();
        assert!(html.contains("<h1>Njega starijih osoba</h1>"));
        assert!(html.contains("<p>Tekst.</p>"));
        assert!(html.contains("datetime=\"2025-03-01\""));
        // No neighbors, no navigation block.
        assert!(!html.contains("article-nav"));
    }

    #[test]
    fn article_navigation_links_both_neighbors() {
        let nav = ArticleNav {
            previous: Some(article("stariji", false)),
            next: Some(article("noviji", false)),
        };
        let a: Article =
            serde_json::from_value(json!({ "slug": "sredina", "title": "Sredina" })).unwrap();
        let html = article_page(&ctx(), &a, &nav).into_string();
        assert!(html.contains("href=\"/blog/stariji\""));
        assert!(html.contains("href=\"/blog/noviji\""));
        // Mounted above and below the body.
        assert_eq!(html.matches("article-nav-prev").count(), 2);
    }

    #[test]
    fn post_cards_link_to_the_article_path() {
        let articles = vec![article("first", false)];
        let s = BlogListingSection::default();
        let html = blog_listing(&ctx(), &s, &articles, &ListMeta::default()).into_string();
        assert!(html.contains("href=\"/blog/first\""));
    }

    #[test]
    fn page_controls_render_for_multi_page_listings() {
        let meta: ListMeta = serde_json::from_value(json!({
            "pagination": { "page": 2, "pageSize": 6, "pageCount": 5, "total": 27 },
        }))
        .unwrap();
        let s = BlogListingSection::default();
        let html = blog_listing(&ctx(), &s, &[], &meta).into_string();
        assert!(html.contains("Stranica 2 od 5"));
        assert!(html.contains("href=\"?page=1\""));
        assert!(html.contains("href=\"?page=3\""));

        let single = blog_listing(&ctx(), &s, &[], &ListMeta::default()).into_string();
        assert!(!single.contains("pagination"));
    }

    #[test]
    fn featured_strip_respects_flag_and_count() {
        let articles = vec![
            article("a", true),
            article("b", true),
            article("c", true),
            article("d", false),
        ];
        let s: BlogListingSection = serde_json::from_value(json!({
            "showFeatured": true,
            "featuredCount": 2,
            "featuredTitle": "Izdvojeno",
        }))
        .unwrap();
        let html = blog_listing(&ctx(), &s, &articles, &ListMeta::default()).into_string();
        assert!(html.contains("Izdvojeno"));
        // 2 featured cards + 4 regular cards.
        assert_eq!(html.matches("post-card").count(), 6);
    }

    #[test]
    fn empty_job_listing_shows_the_authored_empty_state() {
        let s: JobListingSection = serde_json::from_value(json!({
            "noResultsTitle": "Nema otvorenih pozicija",
            "noResultsMessage": "Provjerite ponovno uskoro.",
        }))
        .unwrap();
        let html = job_listing(&ctx(), &s, &[]).into_string();
        assert!(html.contains("Nema otvorenih pozicija"));
        assert!(html.contains("Provjerite ponovno uskoro."));
    }

    #[test]
    fn kutak_card_carries_document_id_and_download() {
        let a: KutakArticle = serde_json::from_value(json!({
            "documentId": "abc123",
            "title": "Vježbe za pamćenje",
            "likes": 7,
            "download": true,
            "downloadTitle": "Preuzmi PDF",
            "downloadLink": { "url": "/uploads/vjezbe.pdf" },
        }))
        .unwrap();
        let html = kutak_listing(&ctx(), &KutakSection::default(), &[a]).into_string();
        assert!(html.contains("data-like=\"abc123\""));
        assert!(html.contains("Preuzmi PDF"));
        assert!(html.contains("http://localhost:1337/uploads/vjezbe.pdf"));
        assert!(html.contains("<span class=\"like-count\">7</span>"));
    }
}
