//! One renderer per CMS section type.
//!
//! Renderers are total over their input: every field is optional in the
//! CMS, so missing values collapse to nothing rather than placeholder
//! text. The one exception is the flat hero, which the editors use as a
//! page banner and which is meaningless without its headline, title, and
//! image; it declines to render instead.

use maud::{html, Markup};

use crate::content::{
    AboutCardSection, CallToActionSection, CardGroupSection, CardsSection, CarouselSection,
    ContactSection, FeatureCardsSection, FeatureSection, HeroSection, IconGridSection, Link,
    MapSection, Media, MessageFormSection, ParallaxSection, ReferralFormSection,
    RequestFormSection, ReviewSection, StepsSection, TestimonialsSection, WallOfTextBannerSection,
    WallOfTextSection,
};
use crate::render::RenderCtx;
use crate::richtext::{self, RichText};

// ============================================================================
// Shared building blocks
// ============================================================================

fn image(ctx: &RenderCtx, media: &Media, alt_fallback: &str) -> Markup {
    html! {
        img src=(media.url(ctx.cms_base)) alt=(media.alt(alt_fallback));
    }
}

fn maybe_image(ctx: &RenderCtx, media: &Option<Media>, alt_fallback: &str) -> Markup {
    html! {
        @if let Some(media) = media {
            (image(ctx, media, alt_fallback))
        }
    }
}

/// The headline-over-title pattern most sections open with.
fn heading(headline: &Option<String>, title: &Option<String>) -> Markup {
    html! {
        @if let Some(headline) = headline {
            p .headline { (headline) }
        }
        @if let Some(title) = title {
            h2 { (title) }
        }
    }
}

fn rich(content: &Option<RichText>) -> Markup {
    html! {
        @if let Some(content) = content {
            (richtext::render(content))
        }
    }
}

fn button(ctx: &RenderCtx, label: &Option<String>, link: &Option<Link>) -> Markup {
    html! {
        @if let Some(label) = label {
            @let target = link.as_ref().map(|l| l.target_url()).unwrap_or("/");
            @let href = if target.starts_with("http") || target.starts_with("mailto:") {
                target.to_string()
            } else {
                ctx.url(target)
            };
            a .button href=(href) { (label) }
        }
    }
}

fn text_input(name: &str, label: &Option<String>, fallback: &str, input_type: &str) -> Markup {
    let label = label.as_deref().unwrap_or(fallback);
    html! {
        label {
            span { (label) }
            input type=(input_type) name=(name) required;
        }
    }
}

fn textarea(name: &str, label: &Option<String>, fallback: &str, required: bool) -> Markup {
    let label = label.as_deref().unwrap_or(fallback);
    html! {
        label {
            span { (label) }
            textarea name=(name) required[required] {}
        }
    }
}

fn submit_button(section_label: &Option<String>, submitting: &Option<String>) -> Markup {
    html! {
        button type="submit"
            data-submitting=[submitting.as_deref()] {
            (section_label.as_deref().unwrap_or("Pošalji"))
        }
    }
}

// ============================================================================
// Section renderers
// ============================================================================

pub fn hero(ctx: &RenderCtx, s: &HeroSection) -> Markup {
    html! {
        section .hero {
            .hero-text {
                (heading(&s.headline, &s.title))
                (rich(&s.content))
                (button(ctx, &s.button, &s.button_link))
            }
            (maybe_image(ctx, &s.image, s.title.as_deref().unwrap_or("")))
        }
    }
}

/// Flat hero banner. Requires headline, title, and image; without all
/// three there is nothing worth a full-width banner, so it renders nothing.
pub fn hero_flat(ctx: &RenderCtx, s: &HeroSection) -> Option<Markup> {
    let headline = s.headline.as_ref()?;
    let title = s.title.as_ref()?;
    let img = s.image.as_ref()?;
    Some(html! {
        section .hero-flat {
            (image(ctx, img, title))
            .hero-flat-text {
                p .headline { (headline) }
                h1 { (title) }
            }
        }
    })
}

pub fn about_card(ctx: &RenderCtx, s: &AboutCardSection) -> Markup {
    html! {
        section .about-card {
            (heading(&s.headline, &s.title))
            (rich(&s.text))
            @if s.button == Some(true) {
                (button(ctx, &Some("Saznaj više".to_string()), &s.button_link))
            }
        }
    }
}

pub fn call_to_action(ctx: &RenderCtx, s: &CallToActionSection) -> Markup {
    html! {
        section .call-to-action {
            (maybe_image(ctx, &s.image, s.title.as_deref().unwrap_or("")))
            (heading(&s.headline, &s.title))
            (button(ctx, &s.button, &s.button_link))
        }
    }
}

pub fn card_group(s: &CardGroupSection) -> Markup {
    let cards = [&s.card1_text, &s.card2_text, &s.card3_text];
    html! {
        section .card-group {
            @for text in cards.into_iter().flatten() {
                .card { p { (text) } }
            }
        }
    }
}

pub fn cards(ctx: &RenderCtx, s: &CardsSection) -> Markup {
    let pair = [
        (
            &s.card1headline,
            &s.card1title,
            &s.card1text,
            &s.card1image,
            &s.card1link,
            &s.card1linktext,
        ),
        (
            &s.card2headline,
            &s.card2title,
            &s.card2text,
            &s.card2image,
            &s.card2link,
            &s.card2linktext,
        ),
    ];
    html! {
        section .cards {
            @for (headline, title, text, img, link, link_text) in pair {
                .card {
                    (maybe_image(ctx, img, title.as_deref().unwrap_or("")))
                    (heading(headline, title))
                    @if let Some(text) = text { p { (text) } }
                    @if let (Some(link), Some(link_text)) = (link, link_text) {
                        a href=(ctx.url(link)) { (link_text) }
                    }
                }
            }
        }
    }
}

pub fn carousel(ctx: &RenderCtx, s: &CarouselSection) -> Markup {
    let slides = [(&s.slide1text, &s.slide1image), (&s.slide2text, &s.slide2image)];
    html! {
        section .carousel data-interval=[s.interval] {
            @for (text, img) in slides {
                @if text.is_some() || img.is_some() {
                    .slide {
                        (maybe_image(ctx, img, text.as_deref().unwrap_or("")))
                        @if let Some(text) = text { p { (text) } }
                    }
                }
            }
        }
    }
}

pub fn contact(ctx: &RenderCtx, s: &ContactSection) -> Markup {
    let icons = [
        (&s.icon1_image, &s.icon1_label, &s.icon1_link),
        (&s.icon2_image, &s.icon2_label, &s.icon2_link),
        (&s.icon3_image, &s.icon3_label, &s.icon3_link),
        (&s.icon4_image, &s.icon4_label, &s.icon4_link),
    ];
    html! {
        section .contact {
            .contact-block {
                @if let Some(title) = &s.title1 { h2 { (title) } }
                (rich(&s.richtext1))
            }
            .contact-block {
                @if let Some(title) = &s.title2 { h2 { (title) } }
                (rich(&s.richtext2))
            }
            .contact-icons {
                @for (img, label, link) in icons {
                    @if let Some(label) = label {
                        a .contact-icon href=(link.as_deref().unwrap_or("#")) {
                            (maybe_image(ctx, img, label))
                            span { (label) }
                        }
                    }
                }
            }
        }
    }
}

pub fn feature(ctx: &RenderCtx, s: &FeatureSection) -> Markup {
    html! {
        section .feature .feature-text-left[s.text_left == Some(true)] {
            .feature-text {
                (heading(&s.headline, &s.title))
                (rich(&s.content))
                (button(ctx, &s.button, &s.button_link))
            }
            .feature-images {
                (maybe_image(ctx, &s.image_1, s.title.as_deref().unwrap_or("")))
                (maybe_image(ctx, &s.image_2, ""))
                @if s.overlay == Some(true) {
                    .feature-overlay {
                        (maybe_image(ctx, &s.overlayicon, ""))
                        @if s.overlay_text == Some(true) {
                            @if let Some(title) = &s.overlaytitle { h3 { (title) } }
                            @if let Some(text) = &s.overlaytext { p { (text) } }
                        }
                    }
                }
            }
        }
    }
}

pub fn feature_cards(s: &FeatureCardsSection) -> Markup {
    let features = [
        (&s.feature1headline, &s.feature1title, &s.feature1text),
        (&s.feature2headline, &s.feature2title, &s.feature2text),
        (&s.feature3headline, &s.feature3title, &s.feature3text),
    ];
    html! {
        section .feature-cards {
            (heading(&s.headline, &s.title))
            .feature-card-grid {
                @for (headline, title, text) in features {
                    @if headline.is_some() || title.is_some() || text.is_some() {
                        .feature-card {
                            (heading(headline, title))
                            @if let Some(text) = text { p { (text) } }
                        }
                    }
                }
            }
        }
    }
}

pub fn icon_grid(ctx: &RenderCtx, s: &IconGridSection) -> Markup {
    let cells = [
        (&s.icon_1, &s.subtitle_1, &s.text_1),
        (&s.icon_2, &s.subtitle_2, &s.text_2),
        (&s.icon_3, &s.subtitle_3, &s.text_3),
        (&s.icon_4, &s.subtitle_4, &s.text_4),
    ];
    html! {
        section .icon-grid {
            (heading(&s.headline, &s.title))
            .icon-grid-cells {
                @for (icon, subtitle, text) in cells {
                    @if subtitle.is_some() || text.is_some() {
                        .icon-cell {
                            (maybe_image(ctx, icon, subtitle.as_deref().unwrap_or("")))
                            @if let Some(subtitle) = subtitle { h3 { (subtitle) } }
                            @if let Some(text) = text { p { (text) } }
                        }
                    }
                }
            }
        }
    }
}

pub fn map(s: &MapSection) -> Markup {
    // Coordinates are exposed as data attributes; the map itself is
    // progressive enhancement and the address text still reads without it.
    html! {
        section .map
            data-lat=[s.lat]
            data-lng=[s.lng]
            data-zoom=[s.zoom] {
            @if let Some(title) = &s.title { h2 { (title) } }
        }
    }
}

pub fn parallax(ctx: &RenderCtx, s: &ParallaxSection, centered: bool) -> Markup {
    html! {
        section .parallax .parallax-center[centered] {
            (maybe_image(ctx, &s.image, ""))
            blockquote {
                (rich(&s.quote))
                @if let Some(author) = &s.author { cite { (author) } }
            }
        }
    }
}

pub fn review(s: &ReviewSection) -> Markup {
    html! {
        section .review {
            blockquote {
                @if let Some(quote) = &s.quote { p { (quote) } }
                @if let Some(author) = &s.author { cite { (author) } }
            }
        }
    }
}

pub fn steps(s: &StepsSection) -> Markup {
    let steps = [
        (&s.step1title, &s.step1),
        (&s.step2title, &s.step2),
        (&s.step3title, &s.step3),
    ];
    html! {
        section .steps {
            @if let Some(title) = &s.title { h2 { (title) } }
            @if let Some(description) = &s.description { p { (description) } }
            ol {
                @for (title, text) in steps {
                    @if title.is_some() || text.is_some() {
                        li {
                            @if let Some(title) = title { h3 { (title) } }
                            @if let Some(text) = text { p { (text) } }
                        }
                    }
                }
            }
        }
    }
}

pub fn testimonials(ctx: &RenderCtx, s: &TestimonialsSection) -> Markup {
    html! {
        section .testimonials
            data-show-more=[s.show_more_label.as_deref()]
            data-show-less=[s.show_less_label.as_deref()] {
            @for t in &s.testimonials {
                .testimonial {
                    (maybe_image(ctx, &t.image, t.title.as_deref().unwrap_or("")))
                    @if let Some(title) = &t.title { h3 { (title) } }
                    @if let Some(text) = &t.text { p { (text) } }
                }
            }
        }
    }
}

pub fn wall_of_text(ctx: &RenderCtx, s: &WallOfTextSection) -> Markup {
    html! {
        section .wall-of-text {
            @if let Some(title) = &s.title { h2 { (title) } }
            @if let Some(subtitle) = &s.subtitle { h3 { (subtitle) } }
            (rich(&s.content))
            (button(ctx, &s.button, &s.button_link))
        }
    }
}

pub fn wall_of_text_banner(ctx: &RenderCtx, s: &WallOfTextBannerSection) -> Markup {
    html! {
        section .wall-of-text-banner {
            (maybe_image(ctx, &s.image, s.caption.as_deref().unwrap_or("")))
            @if let Some(caption) = &s.caption { p .headline { (caption) } }
            (rich(&s.content))
            (button(ctx, &s.button, &s.button_link))
        }
    }
}

// ============================================================================
// Form sections
// ============================================================================

/// Contact and job-application forms share one field shape; only the
/// endpoint differs. The `data-form` form posts as JSON via the embedded
/// script and degrades to a normal POST without it.
pub fn message_form(_ctx: &RenderCtx, s: &MessageFormSection, action: &str) -> Markup {
    html! {
        section .form-section {
            @if let Some(description) = &s.description { p { (description) } }
            form data-form action=(action) method="post" {
                (text_input("firstName", &s.first_name, "Ime", "text"))
                (text_input("lastName", &s.last_name, "Prezime", "text"))
                (text_input("email", &s.email, "Email", "email"))
                (text_input("phone", &s.phone, "Telefon", "tel"))
                (textarea("comment", &s.comment, "Poruka", true))
                (submit_button(&s.submit, &s.submitting))
            }
        }
    }
}

pub fn referral_form(_ctx: &RenderCtx, s: &ReferralFormSection) -> Markup {
    html! {
        section .form-section {
            @if let Some(description) = &s.description { p { (description) } }
            form data-form action="/api/submit-referral-form" method="post" {
                fieldset {
                    @if let Some(legend) = &s.referral_section { legend { (legend) } }
                    (text_input("referralFirstName", &s.referral_first_name, "Ime", "text"))
                    (text_input("referralLastName", &s.referral_last_name, "Prezime", "text"))
                    (text_input("referralEmail", &s.referral_email, "Email", "email"))
                    (text_input("referralPhone", &s.referral_phone, "Telefon", "tel"))
                }
                fieldset {
                    @if let Some(legend) = &s.referrer_section { legend { (legend) } }
                    (text_input("referrerFirstName", &s.referrer_first_name, "Ime", "text"))
                    (text_input("referrerLastName", &s.referrer_last_name, "Prezime", "text"))
                    (text_input("referrerEmail", &s.referrer_email, "Email", "email"))
                    (text_input("referrerPhone", &s.referrer_phone, "Telefon", "tel"))
                }
                (textarea("comment", &s.comment, "Napomena", false))
                (submit_button(&s.submit, &s.submitting))
            }
        }
    }
}

pub fn request_form(_ctx: &RenderCtx, s: &RequestFormSection) -> Markup {
    html! {
        section .form-section {
            @if let Some(title) = &s.title { h2 { (title) } }
            (rich(&s.text))
            @if let Some(description) = &s.description { p { (description) } }
            form data-form action="/api/submit-request-form" method="post" {
                (text_input("contractorFirstName", &s.contractor_first_name, "Ime", "text"))
                (text_input("contractorLastName", &s.contractor_last_name, "Prezime", "text"))
                (text_input("contractorEmail", &s.contractor_email, "Email", "email"))
                (text_input("contractorPhone", &s.contractor_phone, "Telefon", "tel"))
                (submit_button(&s.submit, &s.submitting))
            }
        }
    }
}
