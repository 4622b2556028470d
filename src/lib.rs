//! caresite — server-rendered multi-locale website for a home-care
//! service, backed by a headless CMS.
//!
//! Every page is assembled at request time: resolve the URL into a locale
//! and content path, fetch the matching CMS record, and render its ordered
//! section list to HTML. There is no client-side framework; a small
//! embedded script upgrades forms and like buttons where scripting exists.
//!
//! # Request pipeline
//!
//! ```text
//! request path
//!   └─ locale::resolve      locale + content path (pure)
//!        └─ compose          what the response is (fetches content)
//!             └─ render      what it looks like (pure)
//!                  └─ server HTTP status + document
//! ```
//!
//! # Modules
//!
//! | Module     | Role                                                   |
//! |------------|--------------------------------------------------------|
//! | `locale`   | Locale set, path resolution, localized URLs            |
//! | `config`   | `config.toml` loading, env overrides, validation       |
//! | `content`  | CMS data model: pages, sections, articles, jobs, kutak |
//! | `richtext` | CMS rich-text tree to HTML                             |
//! | `cms`      | `ContentSource` trait + HTTP client with global cache  |
//! | `compose`  | Route → `RenderResult`, listing-data prefetch          |
//! | `render`   | Layout, section renderers, article pages               |
//! | `forms`    | Submission validation, sanitization, email forwarding  |
//! | `mailer`   | `Mailer` trait + Resend HTTP implementation            |
//! | `server`   | Router, redirect middleware, handlers                  |
//!
//! # Design notes
//!
//! - **Fetch failures degrade, never crash.** A CMS error on a page fetch
//!   becomes a 404; on a listing fetch, an empty listing; on global data,
//!   a chrome-less but served page.
//! - **Sections are a closed sum with an open tail.** Known `__component`
//!   tags decode into typed variants; anything else lands in
//!   `Section::Unknown` and is skipped at render time with a warning, so
//!   editors adding new CMS components cannot break existing pages.
//! - **Rendering is pure.** All I/O happens in `compose`; renderers are
//!   total functions from data to markup, which keeps them trivially
//!   testable.

pub mod cms;
pub mod compose;
pub mod config;
pub mod content;
pub mod forms;
pub mod locale;
pub mod mailer;
pub mod render;
pub mod richtext;
pub mod server;
