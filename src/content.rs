//! CMS content model.
//!
//! Serde types for the records the headless CMS serves: global site data,
//! pages built from ordered content sections, blog articles, job postings,
//! and the "kutak" tips articles. Everything here is read-only — the CMS
//! owns and mutates these records, this crate only decodes them per request.
//!
//! ## Sections
//!
//! A page body is an ordered list of typed sections. The CMS tags each one
//! with a `__component` string (`shared.hero`, `shared.cards`, …). Rather
//! than a string-keyed registry, [`Section`] is a sum type decoded from that
//! tag, with an explicit [`Section::Unknown`] variant for tags this build
//! does not know. Decoding never fails on an unknown tag — the renderer
//! skips those sections and keeps going.

use serde::de::{self, DeserializeOwned};
use serde::{Deserialize, Deserializer, Serialize};

use crate::richtext::RichText;

// ============================================================================
// Shared building blocks
// ============================================================================

/// A CMS media file. The API sometimes inlines a bare URL string and
/// sometimes a full upload object, so both shapes decode.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Media {
    Url(String),
    Object {
        url: String,
        #[serde(rename = "alternativeText", default)]
        alternative_text: Option<String>,
        #[serde(default)]
        width: Option<u32>,
        #[serde(default)]
        height: Option<u32>,
    },
}

impl Media {
    /// The raw URL as the CMS sent it (possibly `/uploads/...`-relative).
    pub fn raw_url(&self) -> &str {
        match self {
            Media::Url(u) => u,
            Media::Object { url, .. } => url,
        }
    }

    /// Absolute URL: relative upload paths are joined onto the CMS base URL.
    pub fn url(&self, cms_base: &str) -> String {
        let raw = self.raw_url();
        if raw.starts_with('/') {
            format!("{}{}", cms_base.trim_end_matches('/'), raw)
        } else {
            raw.to_string()
        }
    }

    pub fn alt<'a>(&'a self, fallback: &'a str) -> &'a str {
        match self {
            Media::Object {
                alternative_text: Some(alt),
                ..
            } if !alt.is_empty() => alt,
            _ => fallback,
        }
    }
}

/// A CMS-authored link (button targets, nav entries).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Link {
    pub href: Option<String>,
    pub url: Option<String>,
    pub label: Option<String>,
    #[serde(rename = "isExternal")]
    pub is_external: Option<bool>,
    pub target: Option<String>,
}

impl Link {
    /// First available target, falling back to the site root.
    pub fn target_url(&self) -> &str {
        self.href
            .as_deref()
            .or(self.url.as_deref())
            .filter(|u| !u.is_empty())
            .unwrap_or("/")
    }
}

/// A downloadable file attached to a kutak article.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FileRef {
    pub url: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub ext: Option<String>,
}

/// Per-page SEO overrides.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Seo {
    #[serde(rename = "metaDescription")]
    pub meta_description: Option<String>,
    #[serde(rename = "shareImage")]
    pub share_image: Option<Media>,
}

/// Navigation entry from global data.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct NavItem {
    pub label: String,
    pub path: String,
}

/// Site-wide data: name, description, navigation, SEO defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GlobalData {
    #[serde(rename = "siteName")]
    pub site_name: Option<String>,
    #[serde(rename = "siteDescription")]
    pub site_description: Option<String>,
    pub favicon: Option<Media>,
    #[serde(rename = "defaultSeo")]
    pub default_seo: Option<Seo>,
    pub navigation: Vec<NavItem>,
    #[serde(rename = "footerText")]
    pub footer_text: Option<String>,
}

/// List-endpoint pagination metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Pagination {
    pub page: u32,
    #[serde(rename = "pageSize")]
    pub page_size: u32,
    #[serde(rename = "pageCount")]
    pub page_count: u32,
    pub total: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ListMeta {
    pub pagination: Pagination,
}

// ============================================================================
// Content records
// ============================================================================

/// A CMS page: a slug plus an ordered list of sections.
///
/// A page that exists but has no sections yet is a valid "under
/// construction" state, distinct from not-found.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Page {
    pub slug: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub seo: Option<Seo>,
    pub sections: Option<Vec<Section>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Author {
    pub name: Option<String>,
    pub email: Option<String>,
    pub avatar: Option<Media>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Category {
    pub name: String,
    pub slug: String,
}

/// A blog article.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Article {
    pub slug: String,
    pub title: String,
    pub description: Option<String>,
    pub content: Option<RichText>,
    pub cover: Option<Media>,
    pub author: Option<Author>,
    pub category: Option<Category>,
    #[serde(rename = "publishDate")]
    pub publish_date: Option<String>,
    pub featured: bool,
}

/// A job requirement/advantage line — the CMS serves either bare strings
/// or `{text}` objects depending on content age.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum JobLine {
    Text(String),
    Object { text: String },
}

impl JobLine {
    pub fn text(&self) -> &str {
        match self {
            JobLine::Text(t) => t,
            JobLine::Object { text } => text,
        }
    }
}

/// A care job posting.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Job {
    pub title: Option<String>,
    #[serde(rename = "jobStart")]
    pub job_start: Option<String>,
    pub location: Option<String>,
    pub salary: Option<f64>,
    #[serde(rename = "patientDescription")]
    pub patient_description: Option<RichText>,
    pub requirements: Vec<JobLine>,
    pub advantages: Vec<JobLine>,
    pub featured: bool,
    pub image: Option<Media>,
    #[serde(rename = "publishDate")]
    pub publish_date: Option<String>,
}

/// A "kutak" (caregivers' corner) tips article.
///
/// `document_id` is the stable string identifier used for like/unlike
/// calls; the numeric database id is not stable across CMS republishes.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct KutakArticle {
    #[serde(rename = "documentId")]
    pub document_id: String,
    pub title: String,
    pub content: Option<RichText>,
    #[serde(rename = "publishDate")]
    pub publish_date: Option<String>,
    pub likes: u64,
    pub image: Option<Media>,
    pub download: bool,
    #[serde(rename = "downloadTitle")]
    pub download_title: Option<String>,
    #[serde(rename = "downloadText")]
    pub download_text: Option<String>,
    #[serde(rename = "downloadLink")]
    pub download_link: Option<FileRef>,
    #[serde(rename = "shareText")]
    pub share_text: Option<String>,
}

// ============================================================================
// Sections
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct HeroSection {
    pub headline: Option<String>,
    pub title: Option<String>,
    pub content: Option<RichText>,
    pub button: Option<String>,
    #[serde(rename = "buttonLink")]
    pub button_link: Option<Link>,
    pub image: Option<Media>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AboutCardSection {
    pub headline: Option<String>,
    pub title: Option<String>,
    pub text: Option<RichText>,
    pub button: Option<bool>,
    #[serde(rename = "buttonLink")]
    pub button_link: Option<Link>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CallToActionSection {
    pub headline: Option<String>,
    pub title: Option<String>,
    pub button: Option<String>,
    #[serde(rename = "buttonLink")]
    pub button_link: Option<Link>,
    pub image: Option<Media>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CardGroupSection {
    #[serde(rename = "card1Text")]
    pub card1_text: Option<String>,
    #[serde(rename = "card2Text")]
    pub card2_text: Option<String>,
    #[serde(rename = "card3Text")]
    pub card3_text: Option<String>,
}

/// Two side-by-side cards with flat CMS field names.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CardsSection {
    pub card1headline: Option<String>,
    pub card1title: Option<String>,
    pub card1text: Option<String>,
    pub card1image: Option<Media>,
    pub card1link: Option<String>,
    pub card1linktext: Option<String>,
    pub card2headline: Option<String>,
    pub card2title: Option<String>,
    pub card2text: Option<String>,
    pub card2image: Option<Media>,
    pub card2link: Option<String>,
    pub card2linktext: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CarouselSection {
    pub slide1text: Option<String>,
    pub slide1image: Option<Media>,
    pub slide2text: Option<String>,
    pub slide2image: Option<Media>,
    pub interval: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ContactIcon {
    pub image: Option<Media>,
    pub label: Option<String>,
    pub link: Option<String>,
    pub target: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ContactSection {
    pub title1: Option<String>,
    pub richtext1: Option<RichText>,
    #[serde(rename = "icon1Image")]
    pub icon1_image: Option<Media>,
    #[serde(rename = "icon1Label")]
    pub icon1_label: Option<String>,
    #[serde(rename = "icon1Link")]
    pub icon1_link: Option<String>,
    #[serde(rename = "icon2Image")]
    pub icon2_image: Option<Media>,
    #[serde(rename = "icon2Label")]
    pub icon2_label: Option<String>,
    #[serde(rename = "icon2Link")]
    pub icon2_link: Option<String>,
    pub title2: Option<String>,
    pub richtext2: Option<RichText>,
    #[serde(rename = "icon3Image")]
    pub icon3_image: Option<Media>,
    #[serde(rename = "icon3Label")]
    pub icon3_label: Option<String>,
    #[serde(rename = "icon3Link")]
    pub icon3_link: Option<String>,
    #[serde(rename = "icon4Image")]
    pub icon4_image: Option<Media>,
    #[serde(rename = "icon4Label")]
    pub icon4_label: Option<String>,
    #[serde(rename = "icon4Link")]
    pub icon4_link: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FeatureCardsSection {
    pub headline: Option<String>,
    pub title: Option<String>,
    pub feature1headline: Option<String>,
    pub feature1title: Option<String>,
    pub feature1text: Option<String>,
    pub feature2headline: Option<String>,
    pub feature2title: Option<String>,
    pub feature2text: Option<String>,
    pub feature3headline: Option<String>,
    pub feature3title: Option<String>,
    pub feature3text: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FeatureSection {
    pub headline: Option<String>,
    pub title: Option<String>,
    pub content: Option<RichText>,
    pub button: Option<String>,
    #[serde(rename = "buttonLink")]
    pub button_link: Option<Link>,
    pub text_left: Option<bool>,
    pub image_1: Option<Media>,
    pub image_2: Option<Media>,
    pub overlay: Option<bool>,
    pub overlay_text: Option<bool>,
    pub overlayicon: Option<Media>,
    pub overlaytitle: Option<String>,
    pub overlaytext: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct IconGridSection {
    pub headline: Option<String>,
    pub title: Option<String>,
    pub icon_1: Option<Media>,
    pub subtitle_1: Option<String>,
    pub text_1: Option<String>,
    pub icon_2: Option<Media>,
    pub subtitle_2: Option<String>,
    pub text_2: Option<String>,
    pub icon_3: Option<Media>,
    pub subtitle_3: Option<String>,
    pub text_3: Option<String>,
    pub icon_4: Option<Media>,
    pub subtitle_4: Option<String>,
    pub text_4: Option<String>,
}

/// CMS-authored labels for the contact/job form fields.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MessageFormSection {
    pub description: Option<String>,
    #[serde(rename = "firstName")]
    pub first_name: Option<String>,
    #[serde(rename = "lastName")]
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub comment: Option<String>,
    pub submit: Option<String>,
    pub submitting: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ReferralFormSection {
    pub description: Option<String>,
    #[serde(rename = "referralSection")]
    pub referral_section: Option<String>,
    #[serde(rename = "referralFirstName")]
    pub referral_first_name: Option<String>,
    #[serde(rename = "referralLastName")]
    pub referral_last_name: Option<String>,
    #[serde(rename = "referralEmail")]
    pub referral_email: Option<String>,
    #[serde(rename = "referralPhone")]
    pub referral_phone: Option<String>,
    #[serde(rename = "referrerSection")]
    pub referrer_section: Option<String>,
    #[serde(rename = "referrerFirstName")]
    pub referrer_first_name: Option<String>,
    #[serde(rename = "referrerLastName")]
    pub referrer_last_name: Option<String>,
    #[serde(rename = "referrerEmail")]
    pub referrer_email: Option<String>,
    #[serde(rename = "referrerPhone")]
    pub referrer_phone: Option<String>,
    pub comment: Option<String>,
    pub submit: Option<String>,
    pub submitting: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RequestFormSection {
    pub title: Option<String>,
    pub text: Option<RichText>,
    pub description: Option<String>,
    #[serde(rename = "contractorFirstName")]
    pub contractor_first_name: Option<String>,
    #[serde(rename = "contractorLastName")]
    pub contractor_last_name: Option<String>,
    #[serde(rename = "contractorEmail")]
    pub contractor_email: Option<String>,
    #[serde(rename = "contractorPhone")]
    pub contractor_phone: Option<String>,
    pub submit: Option<String>,
    pub submitting: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MapSection {
    pub title: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub zoom: Option<u8>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ParallaxSection {
    pub image: Option<Media>,
    pub quote: Option<RichText>,
    pub author: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ReviewSection {
    pub quote: Option<String>,
    pub author: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StepsSection {
    pub title: Option<String>,
    pub description: Option<String>,
    pub step1title: Option<String>,
    pub step1: Option<String>,
    pub step2title: Option<String>,
    pub step2: Option<String>,
    pub step3title: Option<String>,
    pub step3: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Testimonial {
    pub image: Option<Media>,
    pub title: Option<String>,
    pub text: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TestimonialsSection {
    pub testimonials: Vec<Testimonial>,
    #[serde(rename = "showMoreLabel")]
    pub show_more_label: Option<String>,
    #[serde(rename = "showLessLabel")]
    pub show_less_label: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct WallOfTextSection {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub content: Option<RichText>,
    pub button: Option<String>,
    #[serde(rename = "buttonLink")]
    pub button_link: Option<Link>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct WallOfTextBannerSection {
    pub caption: Option<String>,
    pub content: Option<RichText>,
    pub button: Option<String>,
    #[serde(rename = "buttonLink")]
    pub button_link: Option<Link>,
    pub image: Option<Media>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BlogListingSection {
    #[serde(rename = "featuredTitle")]
    pub featured_title: Option<String>,
    #[serde(rename = "allTitle")]
    pub all_title: Option<String>,
    #[serde(rename = "showFeatured")]
    pub show_featured: Option<bool>,
    #[serde(rename = "featuredCount")]
    pub featured_count: Option<u32>,
    #[serde(rename = "articlesPerPage")]
    pub articles_per_page: Option<u32>,
    #[serde(rename = "introText")]
    pub intro_text: Option<RichText>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct JobListingSection {
    pub title: Option<String>,
    #[serde(rename = "introText")]
    pub intro_text: Option<RichText>,
    #[serde(rename = "jobsPerPage")]
    pub jobs_per_page: Option<u32>,
    #[serde(rename = "noResultsTitle")]
    pub no_results_title: Option<String>,
    #[serde(rename = "noResultsMessage")]
    pub no_results_message: Option<String>,
    #[serde(rename = "startLabel")]
    pub start_label: Option<String>,
    #[serde(rename = "locationLabel")]
    pub location_label: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct KutakSection {
    #[serde(rename = "headerTitle")]
    pub header_title: Option<String>,
    #[serde(rename = "headerText")]
    pub header_text: Option<RichText>,
    #[serde(rename = "loadMoreLabel")]
    pub load_more_label: Option<String>,
    #[serde(rename = "backgroundImage")]
    pub background_image: Option<Media>,
}

/// One typed content block of a page body. Ordering within a page is
/// significant and preserved end to end.
#[derive(Debug, Clone)]
pub enum Section {
    AboutCard(AboutCardSection),
    BlogListing(BlogListingSection),
    CallToAction(CallToActionSection),
    CardGroup(CardGroupSection),
    Cards(CardsSection),
    Carousel(CarouselSection),
    Contact(ContactSection),
    FeatureCards(FeatureCardsSection),
    Feature(FeatureSection),
    Hero(HeroSection),
    HeroFlat(HeroSection),
    IconGrid(IconGridSection),
    JobForm(MessageFormSection),
    JobListing(JobListingSection),
    Kutak(KutakSection),
    Map(MapSection),
    MessageForm(MessageFormSection),
    Parallax(ParallaxSection),
    ParallaxCenter(ParallaxSection),
    ReferralForm(ReferralFormSection),
    RequestForm(RequestFormSection),
    Review(ReviewSection),
    Steps(StepsSection),
    Testimonials(TestimonialsSection),
    WallOfText(WallOfTextSection),
    WallOfTextBanner(WallOfTextBannerSection),
    /// A component type this build has no renderer for. Skipped with a
    /// diagnostic, never a page-level failure.
    Unknown { component_type: String },
}

impl Section {
    /// The CMS `__component` tag this section decoded from.
    pub fn component_type(&self) -> &str {
        match self {
            Section::AboutCard(_) => "shared.about-card",
            Section::BlogListing(_) => "shared.blog-listing",
            Section::CallToAction(_) => "shared.call-to-action",
            Section::CardGroup(_) => "shared.card-group",
            Section::Cards(_) => "shared.cards",
            Section::Carousel(_) => "shared.carousel",
            Section::Contact(_) => "shared.contact",
            Section::FeatureCards(_) => "shared.feature-cards",
            Section::Feature(_) => "shared.feature",
            Section::Hero(_) => "shared.hero",
            Section::HeroFlat(_) => "shared.hero-flat",
            Section::IconGrid(_) => "shared.icon-grid",
            Section::JobForm(_) => "shared.job-form",
            Section::JobListing(_) => "shared.job-listing",
            Section::Kutak(_) => "shared.kutak",
            Section::Map(_) => "shared.map",
            Section::MessageForm(_) => "shared.message-form",
            Section::Parallax(_) => "shared.parallax-section",
            Section::ParallaxCenter(_) => "shared.parallax-section-center",
            Section::ReferralForm(_) => "shared.referral-form",
            Section::RequestForm(_) => "shared.request-form",
            Section::Review(_) => "shared.review",
            Section::Steps(_) => "shared.steps",
            Section::Testimonials(_) => "shared.testimonials",
            Section::WallOfText(_) => "shared.wall-of-text",
            Section::WallOfTextBanner(_) => "shared.wall-of-text-banner",
            Section::Unknown { component_type } => component_type,
        }
    }
}

fn decode<T, E>(value: serde_json::Value) -> Result<T, E>
where
    T: DeserializeOwned,
    E: de::Error,
{
    serde_json::from_value(value).map_err(de::Error::custom)
}

impl<'de> Deserialize<'de> for Section {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        let tag = value
            .get("__component")
            .and_then(|v| v.as_str())
            .unwrap_or("")
            .to_string();

        Ok(match tag.as_str() {
            "shared.about-card" => Section::AboutCard(decode(value)?),
            "shared.blog-listing" => Section::BlogListing(decode(value)?),
            "shared.call-to-action" => Section::CallToAction(decode(value)?),
            "shared.card-group" => Section::CardGroup(decode(value)?),
            "shared.cards" => Section::Cards(decode(value)?),
            "shared.carousel" => Section::Carousel(decode(value)?),
            "shared.contact" => Section::Contact(decode(value)?),
            "shared.feature-cards" => Section::FeatureCards(decode(value)?),
            "shared.feature" => Section::Feature(decode(value)?),
            "shared.hero" => Section::Hero(decode(value)?),
            "shared.hero-flat" => Section::HeroFlat(decode(value)?),
            "shared.icon-grid" => Section::IconGrid(decode(value)?),
            "shared.job-form" => Section::JobForm(decode(value)?),
            "shared.job-listing" => Section::JobListing(decode(value)?),
            "shared.kutak" => Section::Kutak(decode(value)?),
            "shared.map" => Section::Map(decode(value)?),
            "shared.message-form" => Section::MessageForm(decode(value)?),
            "shared.parallax-section" => Section::Parallax(decode(value)?),
            "shared.parallax-section-center" => Section::ParallaxCenter(decode(value)?),
            "shared.referral-form" => Section::ReferralForm(decode(value)?),
            "shared.request-form" => Section::RequestForm(decode(value)?),
            "shared.review" => Section::Review(decode(value)?),
            "shared.steps" => Section::Steps(decode(value)?),
            "shared.testimonials" => Section::Testimonials(decode(value)?),
            "shared.wall-of-text" => Section::WallOfText(decode(value)?),
            "shared.wall-of-text-banner" => Section::WallOfTextBanner(decode(value)?),
            _ => Section::Unknown {
                component_type: tag,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn section_decodes_by_component_tag() {
        let s: Section = serde_json::from_value(json!({
            "__component": "shared.hero",
            "headline": "Care at home",
            "title": "ELAN Living",
        }))
        .unwrap();
        match s {
            Section::Hero(h) => {
                assert_eq!(h.headline.as_deref(), Some("Care at home"));
                assert_eq!(h.title.as_deref(), Some("ELAN Living"));
            }
            other => panic!("expected hero, got {}", other.component_type()),
        }
    }

    #[test]
    fn unknown_tag_decodes_to_unknown_variant() {
        let s: Section = serde_json::from_value(json!({
            "__component": "shared.brand-new-thing",
            "whatever": 1,
        }))
        .unwrap();
        match s {
            Section::Unknown { component_type } => {
                assert_eq!(component_type, "shared.brand-new-thing");
            }
            other => panic!("expected unknown, got {}", other.component_type()),
        }
    }

    #[test]
    fn missing_tag_decodes_to_unknown_variant() {
        let s: Section = serde_json::from_value(json!({ "title": "orphan" })).unwrap();
        assert!(matches!(s, Section::Unknown { .. }));
    }

    #[test]
    fn page_preserves_section_order() {
        let page: Page = serde_json::from_value(json!({
            "slug": "home",
            "title": "Home",
            "sections": [
                { "__component": "shared.hero", "title": "one" },
                { "__component": "shared.steps", "title": "two" },
                { "__component": "shared.review", "quote": "three" },
            ]
        }))
        .unwrap();
        let types: Vec<&str> = page
            .sections
            .as_deref()
            .unwrap()
            .iter()
            .map(|s| s.component_type())
            .collect();
        assert_eq!(
            types,
            vec!["shared.hero", "shared.steps", "shared.review"]
        );
    }

    #[test]
    fn media_absolutizes_relative_uploads() {
        let m = Media::Url("/uploads/pic.jpg".into());
        assert_eq!(
            m.url("http://localhost:1337"),
            "http://localhost:1337/uploads/pic.jpg"
        );
        let abs = Media::Url("https://cdn.example.com/pic.jpg".into());
        assert_eq!(abs.url("http://localhost:1337"), "https://cdn.example.com/pic.jpg");
    }

    #[test]
    fn media_object_alt_falls_back() {
        let m: Media = serde_json::from_value(json!({
            "url": "/uploads/pic.jpg",
            "alternativeText": "A caregiver",
        }))
        .unwrap();
        assert_eq!(m.alt("fallback"), "A caregiver");
        let bare = Media::Url("/uploads/pic.jpg".into());
        assert_eq!(bare.alt("fallback"), "fallback");
    }

    #[test]
    fn job_lines_decode_both_shapes() {
        let job: Job = serde_json::from_value(json!({
            "location": "Zagreb",
            "requirements": ["experience", { "text": "driving licence" }],
        }))
        .unwrap();
        let lines: Vec<&str> = job.requirements.iter().map(|l| l.text()).collect();
        assert_eq!(lines, vec!["experience", "driving licence"]);
    }

    #[test]
    fn link_target_falls_back_to_root() {
        assert_eq!(Link::default().target_url(), "/");
        let l = Link {
            href: Some("/contact".into()),
            ..Default::default()
        };
        assert_eq!(l.target_url(), "/contact");
    }
}
