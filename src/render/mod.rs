//! HTML rendering.
//!
//! Rendering is a pure function from composed content to markup: no I/O, no
//! fallibility. The dispatcher walks a page's section list in CMS order and
//! hands each typed section to its renderer; a section the code does not
//! recognize is logged and skipped, never a page failure.
//!
//! Submodules:
//! - [`layout`] — document shell, navbar, footer, error pages
//! - [`sections`] — one renderer per CMS section type
//! - [`article`] — article pages and the data-backed listing sections

pub mod article;
pub mod layout;
pub mod sections;

use maud::{html, Markup};

use crate::compose::SectionData;
use crate::content::Section;
use crate::locale::Locale;

/// Everything a renderer may need besides the content itself.
#[derive(Debug, Clone, Copy)]
pub struct RenderCtx<'a> {
    pub locale: Locale,
    /// CMS base URL for absolutizing relative media paths.
    pub cms_base: &'a str,
}

impl<'a> RenderCtx<'a> {
    pub fn new(locale: Locale, cms_base: &'a str) -> Self {
        Self { locale, cms_base }
    }

    /// Locale-prefix a site-relative path.
    pub fn url(&self, path: &str) -> String {
        crate::locale::localized_url(path, self.locale)
    }
}

/// Render a page's sections in CMS order.
///
/// Order is preserved exactly; a renderer that declines (returns `None`)
/// or an unknown section drops only itself from the output.
pub fn render_sections(ctx: &RenderCtx, sections: &[Section], data: &SectionData) -> Markup {
    html! {
        @for section in sections {
            @if let Some(markup) = render_section(ctx, section, data) {
                (markup)
            }
        }
    }
}

fn render_section(ctx: &RenderCtx, section: &Section, data: &SectionData) -> Option<Markup> {
    match section {
        Section::AboutCard(s) => Some(sections::about_card(ctx, s)),
        Section::BlogListing(s) => {
            Some(article::blog_listing(ctx, s, &data.articles, &data.articles_meta))
        }
        Section::CallToAction(s) => Some(sections::call_to_action(ctx, s)),
        Section::CardGroup(s) => Some(sections::card_group(s)),
        Section::Cards(s) => Some(sections::cards(ctx, s)),
        Section::Carousel(s) => Some(sections::carousel(ctx, s)),
        Section::Contact(s) => Some(sections::contact(ctx, s)),
        Section::FeatureCards(s) => Some(sections::feature_cards(s)),
        Section::Feature(s) => Some(sections::feature(ctx, s)),
        Section::Hero(s) => Some(sections::hero(ctx, s)),
        Section::HeroFlat(s) => sections::hero_flat(ctx, s),
        Section::IconGrid(s) => Some(sections::icon_grid(ctx, s)),
        Section::JobForm(s) => Some(sections::message_form(ctx, s, "/api/submit-job-form")),
        Section::JobListing(s) => Some(article::job_listing(ctx, s, &data.jobs)),
        Section::Kutak(s) => Some(article::kutak_listing(ctx, s, &data.kutak)),
        Section::Map(s) => Some(sections::map(s)),
        Section::MessageForm(s) => {
            Some(sections::message_form(ctx, s, "/api/submit-message-form"))
        }
        Section::Parallax(s) => Some(sections::parallax(ctx, s, false)),
        Section::ParallaxCenter(s) => Some(sections::parallax(ctx, s, true)),
        Section::ReferralForm(s) => Some(sections::referral_form(ctx, s)),
        Section::RequestForm(s) => Some(sections::request_form(ctx, s)),
        Section::Review(s) => Some(sections::review(s)),
        Section::Steps(s) => Some(sections::steps(s)),
        Section::Testimonials(s) => Some(sections::testimonials(ctx, s)),
        Section::WallOfText(s) => Some(sections::wall_of_text(ctx, s)),
        Section::WallOfTextBanner(s) => Some(sections::wall_of_text_banner(ctx, s)),
        Section::Unknown { component_type } => {
            tracing::warn!(component = %component_type, "skipping unknown section type");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ctx() -> RenderCtx<'static> {
        RenderCtx::new(Locale::Hr, "http://localhost:1337")
    }

    fn section(v: serde_json::Value) -> Section {
        serde_json::from_value(v).unwrap()
    }

    #[test]
    fn sections_render_in_cms_order() {
        let sections = vec![
            section(json!({ "__component": "shared.review", "quote": "first", "author": "A" })),
            section(json!({ "__component": "shared.review", "quote": "second", "author": "B" })),
        ];
        let html = render_sections(&ctx(), &sections, &SectionData::default()).into_string();
        let first = html.find("first").unwrap();
        let second = html.find("second").unwrap();
        assert!(first < second);
    }

    #[test]
    fn unknown_sections_are_skipped_without_dropping_the_rest() {
        let sections = vec![
            section(json!({ "__component": "shared.review", "quote": "before", "author": "A" })),
            section(json!({ "__component": "shared.brand-new-thing", "anything": 1 })),
            section(json!({ "__component": "shared.review", "quote": "after", "author": "B" })),
        ];
        let html = render_sections(&ctx(), &sections, &SectionData::default()).into_string();
        assert!(html.contains("before"));
        assert!(html.contains("after"));
        assert!(!html.contains("brand-new-thing"));
    }

    #[test]
    fn hero_flat_without_required_fields_renders_nothing() {
        let sections = vec![section(json!({ "__component": "shared.hero-flat" }))];
        let html = render_sections(&ctx(), &sections, &SectionData::default()).into_string();
        assert!(html.is_empty());
    }

    #[test]
    fn every_known_section_type_renders() {
        let tags = [
            "shared.about-card",
            "shared.blog-listing",
            "shared.call-to-action",
            "shared.card-group",
            "shared.cards",
            "shared.carousel",
            "shared.contact",
            "shared.feature-cards",
            "shared.feature",
            "shared.hero",
            "shared.icon-grid",
            "shared.job-form",
            "shared.job-listing",
            "shared.kutak",
            "shared.map",
            "shared.message-form",
            "shared.parallax-section",
            "shared.parallax-section-center",
            "shared.referral-form",
            "shared.request-form",
            "shared.review",
            "shared.steps",
            "shared.testimonials",
            "shared.wall-of-text",
            "shared.wall-of-text-banner",
        ];
        for tag in tags {
            let s = section(json!({ "__component": tag }));
            let rendered = render_section(&ctx(), &s, &SectionData::default());
            assert!(rendered.is_some(), "section {tag} did not render");
        }
    }
}
