//! Locale set and locale/slug resolution for incoming URL paths.
//!
//! URLs follow the `/<locale>?/<slug...>` convention: the default locale is
//! served unprefixed (`/about`), every other locale carries its code as the
//! first path segment (`/en/about`). The first segment of a request path is
//! therefore ambiguous — it may be a locale code or the start of a content
//! slug. [`resolve`] settles that ambiguity with one rule: an exact locale
//! match always wins; anything else is content in the default locale.
//!
//! Resolution is a pure function of the segments and the static locale set.
//! It performs no I/O and cannot fail.

use std::fmt;

/// A supported content locale.
///
/// The set is closed and compile-time static: adding a language means adding
/// a variant here, not touching runtime configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Locale {
    /// Croatian — the default locale, served without a URL prefix.
    Hr,
    /// English.
    En,
    /// German.
    De,
}

/// All supported locales, default first.
pub const LOCALES: [Locale; 3] = [Locale::Hr, Locale::En, Locale::De];

/// The locale served at unprefixed URLs.
pub const DEFAULT_LOCALE: Locale = Locale::Hr;

impl Locale {
    /// The two-letter code used in URLs and CMS queries.
    pub fn code(self) -> &'static str {
        match self {
            Locale::Hr => "hr",
            Locale::En => "en",
            Locale::De => "de",
        }
    }

    /// Exact-match parse of a path segment. No aliases, no case folding —
    /// `/EN/about` is a content path, not English.
    pub fn from_segment(segment: &str) -> Option<Locale> {
        LOCALES.into_iter().find(|l| l.code() == segment)
    }

    pub fn is_default(self) -> bool {
        self == DEFAULT_LOCALE
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Outcome of resolving a request path: which locale to serve, and which
/// segments identify the content. Recomputed per request, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRoute {
    pub locale: Locale,
    /// Path segments remaining after locale resolution. Empty means the
    /// site root (homepage).
    pub content_path: Vec<String>,
    pub is_default: bool,
}

impl ResolvedRoute {
    /// The content path joined with `/`, e.g. `blog/my-post`.
    pub fn slug(&self) -> String {
        self.content_path.join("/")
    }
}

/// Resolve raw path segments into a locale and content path.
///
/// - `[]` → default locale, empty content path (site root)
/// - `["en", "about"]` → English, `["about"]`
/// - `["about"]` → default locale, `["about"]`
/// - `["blog", "my-post"]` → default locale, `["blog", "my-post"]`
///
/// A first segment that is simultaneously a locale code and a plausible slug
/// is always taken as the locale. The non-locale branch keeps the full
/// original sequence, so a leading `blog` segment stays on the content path
/// without special casing.
pub fn resolve<S: AsRef<str>>(segments: &[S]) -> ResolvedRoute {
    match segments.first().and_then(|s| Locale::from_segment(s.as_ref())) {
        Some(locale) => ResolvedRoute {
            locale,
            content_path: segments[1..]
                .iter()
                .map(|s| s.as_ref().to_string())
                .collect(),
            is_default: locale.is_default(),
        },
        None => ResolvedRoute {
            locale: DEFAULT_LOCALE,
            content_path: segments.iter().map(|s| s.as_ref().to_string()).collect(),
            is_default: true,
        },
    }
}

/// Split a URL path into non-empty segments and resolve it.
pub fn resolve_path(path: &str) -> ResolvedRoute {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    resolve(&segments)
}

/// Recognize asset-like request paths (favicons, CMS upload passthroughs)
/// that must short-circuit to not-found before any content fetch.
pub fn is_asset_path<S: AsRef<str>>(segments: &[S]) -> bool {
    segments.iter().any(|s| {
        let s = s.as_ref();
        s.contains("favicon") || s.contains(".ico") || s == "uploads"
    })
}

/// Prefix a site-relative path with the locale code, unless the locale is
/// the default (which lives at unprefixed URLs).
pub fn localized_url(path: &str, locale: Locale) -> String {
    let path = if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    };
    if locale.is_default() {
        path
    } else {
        format!("/{}{}", locale.code(), path)
    }
}
