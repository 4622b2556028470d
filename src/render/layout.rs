//! Document shell: head metadata, navbar, footer, and the two standalone
//! pages (not-found and under-construction).
//!
//! The stylesheet and the small form-submission script are compiled into
//! the binary; the site serves no static files beyond what the CMS hosts.

use maud::{html, Markup, PreEscaped, DOCTYPE};

use crate::content::GlobalData;
use crate::locale::{localized_url, Locale, LOCALES};
use crate::render::RenderCtx;

const STYLESHEET: &str = include_str!("../../static/style.css");
const FORM_SCRIPT: &str = include_str!("../../static/forms.js");

/// Head-level metadata for one response, already resolved against the
/// global defaults.
#[derive(Debug, Clone, Default)]
pub struct PageMeta {
    pub title: String,
    pub description: Option<String>,
    pub share_image: Option<String>,
    /// Site-relative content path without locale prefix, e.g. `/about`.
    /// Drives the alternate-language links.
    pub content_path: String,
}

impl PageMeta {
    pub fn new(title: impl Into<String>, content_path: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content_path: content_path.into(),
            ..Self::default()
        }
    }
}

/// The full HTML document around a rendered body.
pub fn base_document(
    ctx: &RenderCtx,
    global: Option<&GlobalData>,
    meta: &PageMeta,
    body: Markup,
) -> Markup {
    let site_name = global
        .and_then(|g| g.site_name.as_deref())
        .unwrap_or("ELAN Living");
    let description = meta.description.clone().or_else(|| {
        global.and_then(|g| {
            g.default_seo
                .as_ref()
                .and_then(|s| s.meta_description.clone())
                .or_else(|| g.site_description.clone())
        })
    });
    let favicon = global
        .and_then(|g| g.favicon.as_ref())
        .map(|m| m.url(ctx.cms_base));

    html! {
        (DOCTYPE)
        html lang=(ctx.locale.code()) {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (meta.title) " | " (site_name) }
                @if let Some(desc) = &description {
                    meta name="description" content=(desc);
                }
                meta property="og:title" content=(meta.title);
                @if let Some(desc) = &description {
                    meta property="og:description" content=(desc);
                }
                @if let Some(image) = &meta.share_image {
                    meta property="og:image" content=(image);
                }
                @if let Some(favicon) = &favicon {
                    link rel="icon" href=(favicon);
                }
                @for locale in LOCALES {
                    link rel="alternate" hreflang=(locale.code())
                        href=(localized_url(&meta.content_path, locale));
                }
                style { (PreEscaped(STYLESHEET)) }
            }
            body {
                (navbar(ctx, global, &meta.content_path))
                main { (body) }
                (footer(ctx, global, site_name))
                script { (PreEscaped(FORM_SCRIPT)) }
            }
        }
    }
}

fn navbar(ctx: &RenderCtx, global: Option<&GlobalData>, content_path: &str) -> Markup {
    let site_name = global
        .and_then(|g| g.site_name.as_deref())
        .unwrap_or("ELAN Living");
    html! {
        header .navbar {
            a .navbar-brand href=(ctx.url("/")) { (site_name) }
            nav .navbar-links {
                @if let Some(global) = global {
                    @for item in &global.navigation {
                        a href=(ctx.url(&item.path)) { (item.label) }
                    }
                }
            }
            (language_switcher(ctx.locale, content_path))
        }
    }
}

/// Links to the same content path in every locale, current one marked.
fn language_switcher(current: Locale, content_path: &str) -> Markup {
    html! {
        nav .lang-switcher {
            @for locale in LOCALES {
                @if locale == current {
                    span .lang-current { (locale.code()) }
                } @else {
                    a href=(localized_url(content_path, locale)) { (locale.code()) }
                }
            }
        }
    }
}

fn footer(ctx: &RenderCtx, global: Option<&GlobalData>, site_name: &str) -> Markup {
    html! {
        footer .footer {
            @if let Some(text) = global.and_then(|g| g.footer_text.as_deref()) {
                p { (text) }
            }
            p { "© " (site_name) }
            a href=(ctx.url("/")) { (site_name) }
        }
    }
}

/// 404 body. Served with status 404 and the normal document shell.
pub fn not_found_page(ctx: &RenderCtx) -> Markup {
    let (title, text, back) = match ctx.locale {
        Locale::Hr => (
            "Stranica nije pronađena",
            "Stranica koju tražite ne postoji ili je premještena.",
            "Natrag na početnu",
        ),
        Locale::En => (
            "Page not found",
            "The page you are looking for does not exist or has moved.",
            "Back to home",
        ),
        Locale::De => (
            "Seite nicht gefunden",
            "Die gesuchte Seite existiert nicht oder wurde verschoben.",
            "Zurück zur Startseite",
        ),
    };
    html! {
        section .error-page {
            h1 { "404" }
            h2 { (title) }
            p { (text) }
            a .button href=(ctx.url("/")) { (back) }
        }
    }
}

/// Body for a page that exists in the CMS but has no sections yet.
pub fn under_construction_page(ctx: &RenderCtx, title: &str) -> Markup {
    let text = match ctx.locale {
        Locale::Hr => "Ova stranica je u izradi. Posjetite nas uskoro ponovno.",
        Locale::En => "This page is under construction. Please check back soon.",
        Locale::De => "Diese Seite befindet sich im Aufbau. Schauen Sie bald wieder vorbei.",
    };
    html! {
        section .under-construction {
            h1 { (title) }
            p { (text) }
        }
    }
}
