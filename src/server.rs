//! HTTP surface: routing, the default-locale redirect, and the handlers
//! that glue resolution, composition, and rendering together.
//!
//! Two content routes cover the whole site: the root and a catch-all. The
//! form and kutak endpoints live under `/api` and speak JSON. Canonical
//! URLs never carry the default-locale prefix; requests that do are
//! permanently redirected to the unprefixed form before routing.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, Request, State},
    http::{header, StatusCode, Uri},
    middleware::{self, Next},
    response::{IntoResponse, Json, Redirect, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;
use tower_http::trace::TraceLayer;

use crate::cms::ContentSource;
use crate::compose::{self, PageQuery, RenderResult};
use crate::config::SiteConfig;
use crate::content::GlobalData;
use crate::forms::{self, FormError, MessageForm, ReferralForm, RequestForm, Submission};
use crate::locale::{self, ResolvedRoute, DEFAULT_LOCALE};
use crate::mailer::Mailer;
use crate::render::{self, layout, RenderCtx};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<SiteConfig>,
    pub content: Arc<dyn ContentSource>,
    pub mailer: Arc<dyn Mailer>,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/{*path}", get(page))
        .route("/api/submit-message-form", post(submit_message))
        .route("/api/submit-referral-form", post(submit_referral))
        .route("/api/submit-request-form", post(submit_request))
        .route("/api/submit-job-form", post(submit_job))
        .route("/api/kutak/{document_id}/like", post(like))
        .route("/api/kutak/{document_id}/unlike", post(unlike))
        .layer(middleware::from_fn(default_locale_redirect))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind and serve until ctrl-c.
pub async fn serve(state: AppState) -> anyhow::Result<()> {
    let bind = state.config.server.bind.clone();
    let router = build_router(state);
    let listener = tokio::net::TcpListener::bind(&bind).await?;
    tracing::info!(%bind, "listening");
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to install shutdown handler");
    }
    tracing::info!("shutting down");
}

// ============================================================================
// Default-locale redirect
// ============================================================================

/// `/hr` and `/hr/...` are the default locale's prefixed spellings; their
/// canonical URLs are the unprefixed ones. API calls and file-looking
/// paths pass through untouched.
async fn default_locale_redirect(request: Request, next: Next) -> Response {
    if let Some(target) = canonical_redirect(request.uri()) {
        return Redirect::permanent(&target).into_response();
    }
    next.run(request).await
}

fn canonical_redirect(uri: &Uri) -> Option<String> {
    let path = uri.path();
    if path.starts_with("/api/") {
        return None;
    }
    if path.rsplit('/').next().is_some_and(|last| last.contains('.')) {
        return None;
    }
    let prefix = format!("/{}", DEFAULT_LOCALE.code());
    let stripped = if path == prefix {
        "/"
    } else if let Some(rest) = path.strip_prefix(&format!("{prefix}/")) {
        if rest.is_empty() {
            "/"
        } else {
            return Some(append_query(&format!("/{rest}"), uri));
        }
    } else {
        return None;
    };
    Some(append_query(stripped, uri))
}

fn append_query(path: &str, uri: &Uri) -> String {
    match uri.query() {
        Some(query) => format!("{path}?{query}"),
        None => path.to_string(),
    }
}

// ============================================================================
// Content handlers
// ============================================================================

async fn home(State(state): State<AppState>, Query(query): Query<PageQuery>) -> Response {
    respond(&state, locale::resolve_path("/"), &query).await
}

async fn page(
    State(state): State<AppState>,
    Path(path): Path<String>,
    Query(query): Query<PageQuery>,
) -> Response {
    respond(&state, locale::resolve_path(&path), &query).await
}

async fn respond(state: &AppState, route: ResolvedRoute, query: &PageQuery) -> Response {
    // Asset-looking paths get a bare 404 without touching the CMS at all.
    if locale::is_asset_path(&route.content_path) {
        return render_response(state, &route, RenderResult::NotFound, None);
    }
    let result = compose::compose_page(state.content.as_ref(), &route, query).await;
    let global = match state.content.global(route.locale).await {
        Ok(global) => global,
        Err(err) => {
            tracing::warn!(error = %err, "global data fetch failed, rendering without it");
            None
        }
    };
    render_response(state, &route, result, global.as_ref())
}

fn render_response(
    state: &AppState,
    route: &ResolvedRoute,
    result: RenderResult,
    global: Option<&GlobalData>,
) -> Response {
    let ctx = RenderCtx::new(route.locale, &state.config.cms.base_url);
    let content_path = format!("/{}", route.slug());
    let site_name = state.config.site.name.clone();

    let (status, meta, body) = match result {
        RenderResult::NotFound => {
            let meta = layout::PageMeta::new("404", content_path);
            (
                StatusCode::NOT_FOUND,
                meta,
                layout::not_found_page(&ctx),
            )
        }
        RenderResult::UnderConstruction { title } => {
            let meta = layout::PageMeta::new(title.clone(), content_path);
            (
                StatusCode::OK,
                meta,
                layout::under_construction_page(&ctx, &title),
            )
        }
        RenderResult::Article { article, nav } => {
            let mut meta = layout::PageMeta::new(article.title.clone(), content_path);
            meta.description = article.description.clone();
            meta.share_image = article.cover.as_ref().map(|c| c.url(ctx.cms_base));
            (
                StatusCode::OK,
                meta,
                render::article::article_page(&ctx, &article, &nav),
            )
        }
        RenderResult::Sections { page, data } => {
            let title = page.title.clone().unwrap_or_else(|| site_name.clone());
            let mut meta = layout::PageMeta::new(title, content_path);
            meta.description = page
                .seo
                .as_ref()
                .and_then(|s| s.meta_description.clone())
                .or_else(|| page.description.clone());
            meta.share_image = page
                .seo
                .as_ref()
                .and_then(|s| s.share_image.as_ref())
                .map(|m| m.url(ctx.cms_base));
            let sections = page.sections.as_deref().unwrap_or(&[]);
            (
                StatusCode::OK,
                meta,
                render::render_sections(&ctx, sections, &data),
            )
        }
    };

    let document = layout::base_document(&ctx, global, &meta, body).into_string();
    (
        status,
        [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
        document,
    )
        .into_response()
}

// ============================================================================
// Form endpoints
// ============================================================================

async fn submit_message(
    State(state): State<AppState>,
    Json(form): Json<MessageForm>,
) -> Response {
    handle_submission(&state, Submission::Message(form)).await
}

async fn submit_referral(
    State(state): State<AppState>,
    Json(form): Json<ReferralForm>,
) -> Response {
    handle_submission(&state, Submission::Referral(form)).await
}

async fn submit_request(
    State(state): State<AppState>,
    Json(form): Json<RequestForm>,
) -> Response {
    handle_submission(&state, Submission::Request(form)).await
}

async fn submit_job(State(state): State<AppState>, Json(form): Json<MessageForm>) -> Response {
    handle_submission(&state, Submission::Job(form)).await
}

async fn handle_submission(state: &AppState, submission: Submission) -> Response {
    match forms::submit(&submission, state.mailer.as_ref(), &state.config.mail).await {
        Ok(()) => Json(json!({ "message": "Email sent successfully" })).into_response(),
        Err(err) => {
            let status = match &err {
                FormError::Mail(inner) => {
                    tracing::error!(error = %inner, "form forwarding failed");
                    StatusCode::INTERNAL_SERVER_ERROR
                }
                _ => StatusCode::BAD_REQUEST,
            };
            (status, Json(json!({ "error": err.user_message() }))).into_response()
        }
    }
}

// ============================================================================
// Kutak like proxy
// ============================================================================

async fn like(State(state): State<AppState>, Path(document_id): Path<String>) -> Response {
    like_response(state.content.like_kutak(&document_id).await, &document_id)
}

async fn unlike(State(state): State<AppState>, Path(document_id): Path<String>) -> Response {
    like_response(state.content.unlike_kutak(&document_id).await, &document_id)
}

fn like_response(
    result: Result<crate::cms::LikeOutcome, crate::cms::CmsError>,
    document_id: &str,
) -> Response {
    match result {
        Ok(outcome) => Json(json!({
            "success": outcome.success,
            "data": { "likes": outcome.likes },
        }))
        .into_response(),
        Err(err) => {
            tracing::warn!(document_id, error = %err, "kutak like call failed");
            (
                StatusCode::BAD_GATEWAY,
                Json(json!({ "success": false, "error": "CMS unavailable" })),
            )
                .into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uri(s: &str) -> Uri {
        s.parse().unwrap()
    }

    #[test]
    fn default_locale_prefix_redirects_to_unprefixed() {
        assert_eq!(canonical_redirect(&uri("/hr")).as_deref(), Some("/"));
        assert_eq!(canonical_redirect(&uri("/hr/")).as_deref(), Some("/"));
        assert_eq!(
            canonical_redirect(&uri("/hr/about")).as_deref(),
            Some("/about")
        );
        assert_eq!(
            canonical_redirect(&uri("/hr/blog/my-post")).as_deref(),
            Some("/blog/my-post")
        );
    }

    #[test]
    fn other_locales_and_plain_paths_pass_through() {
        assert_eq!(canonical_redirect(&uri("/en/about")), None);
        assert_eq!(canonical_redirect(&uri("/about")), None);
        assert_eq!(canonical_redirect(&uri("/")), None);
        // "hrvatska" starts with "hr" but is not the locale prefix.
        assert_eq!(canonical_redirect(&uri("/hrvatska")), None);
    }

    #[test]
    fn api_and_file_paths_are_never_redirected() {
        assert_eq!(canonical_redirect(&uri("/api/submit-message-form")), None);
        assert_eq!(canonical_redirect(&uri("/hr/logo.png")), None);
    }

    #[test]
    fn query_strings_survive_the_redirect() {
        assert_eq!(
            canonical_redirect(&uri("/hr/blog?page=2")).as_deref(),
            Some("/blog?page=2")
        );
    }
}
