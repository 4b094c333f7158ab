//! Static and mostly-static pages.

use maud::{Markup, html};
use signalpath_core::navigation::Route;

use super::{Page, notice};
use crate::config::SiteSettings;
use crate::content::{BlogPost, POSTS};

// ── Marketing ────────────────────────────────────────────────────────

pub fn home() -> Page {
    let features = [
        (
            "Buying signals, not lists",
            "Funding rounds, leadership changes, and hiring spikes surface the accounts worth a call this week.",
        ),
        (
            "Sequences that read like people",
            "Every first line references the signal that put the account on your list.",
        ),
        (
            "One queue for the whole team",
            "Reps start the day with a ranked list instead of a spreadsheet.",
        ),
    ];

    Page::new(
        "Outbound that starts with intent",
        Route::Home,
        html! {
            section class="sp-hero" {
                h1 { "Outbound that starts with intent" }
                p { "SignalPath watches the market for buying signals and tells your reps who to contact, when, and why." }
                a class="sp-btn sp-btn-primary" href="/pilot-application" { "Apply for the pilot" }
            }
            section class="sp-grid" {
                @for (title, text) in features {
                    div class="sp-card" {
                        h3 { (title) }
                        p { (text) }
                    }
                }
            }
        },
    )
}

pub fn about() -> Page {
    Page::new(
        "About",
        Route::About,
        html! {
            article class="sp-prose" {
                h1 { "About SignalPath" }
                p { "We started SignalPath after years of running outbound teams that worked hard on the wrong accounts." }
                p { "Our small team builds tools that put timing first. We work closely with pilot customers and ship what they need." }
                h2 { "Join the pilot" }
                p {
                    "We are onboarding a limited number of teams. "
                    a href="/pilot-application" { "Apply here" }
                    "."
                }
            }
        },
    )
}

// ── Blog ─────────────────────────────────────────────────────────────

pub fn blog_index() -> Page {
    Page::new(
        "Blog",
        Route::Blog,
        html! {
            section class="sp-prose" {
                h1 { "Blog" }
                @for post in POSTS {
                    article class="sp-card" {
                        h3 { a href={ "/blog/" (post.slug) } { (post.title) } }
                        p class="sp-meta" { (post.published) " · " (post.author) }
                        p { (post.summary) }
                    }
                }
            }
        },
    )
}

pub fn blog_post(post: &BlogPost) -> Page {
    Page::new(
        post.title,
        Route::BlogPost {
            slug: post.slug.to_owned(),
        },
        html! {
            article class="sp-prose" {
                h1 { (post.title) }
                p class="sp-meta" { (post.published) " · " (post.author) }
                @for paragraph in post.paragraphs {
                    p { (paragraph) }
                }
                p { a href="/blog" { "← All posts" } }
            }
        },
    )
}

// ── Legal ────────────────────────────────────────────────────────────

pub fn privacy(site: &SiteSettings) -> Page {
    Page::new(
        "Privacy Policy",
        Route::Privacy,
        html! {
            article class="sp-prose" {
                h1 { "Privacy Policy" }
                p { "We collect the information you give us in the pilot application and on the email preference center." }
                h2 { "What we store" }
                p { "Pilot applications hold your company details, contact details, and answers to our qualification questions." }
                p { "Email preferences hold the categories and channels you chose, how often you want to hear from us, and a record of each consent change." }
                h2 { "Your choices" }
                p {
                    "You can change what we send you at any time from the "
                    a href="/preferences" { "email preference center" }
                    " or unsubscribe from every list with the link in any email."
                }
                h2 { "Contact" }
                p { "Questions about your data: " a href={ "mailto:" (site.support_email) } { (site.support_email) } }
            }
        },
    )
}

pub fn terms(site: &SiteSettings) -> Page {
    Page::new(
        "Terms of Service",
        Route::Terms,
        html! {
            article class="sp-prose" {
                h1 { "Terms of Service" }
                p { "By using this site you agree to these terms." }
                h2 { "Pilot program" }
                p { "Pilot access is free for the duration of the program. In return, pilot teams agree to share feedback in regular check-ins." }
                p { "We may end a pilot early if the program changes. We will tell you first." }
                h2 { "Contact" }
                p { a href={ "mailto:" (site.support_email) } { (site.support_email) } }
            }
        },
    )
}

// ── Placeholders and errors ──────────────────────────────────────────

/// Lead detail lives in the product app; this page points there.
pub fn lead_detail(id: &str, site: &SiteSettings) -> Page {
    Page::new(
        "Lead",
        Route::LeadDetail { id: id.to_owned() },
        html! {
            section class="sp-prose" {
                h1 { "Lead " (id) }
                p { "Lead details are available in the SignalPath app." }
                a class="sp-btn sp-btn-primary" hx-boost="false"
                    href={ (site.app_url) "/leads/" (urlencoding::encode(id).into_owned()) } { "Open in the app" }
            }
        },
    )
}

pub fn not_found(path: &str) -> Page {
    Page::new(
        "Page not found",
        Route::NotFound {
            path: path.to_owned(),
        },
        error_body("Page not found", &format!("Nothing lives at {path}.")),
    )
}

/// A terminal error: the message and a way home, nothing else.
pub fn error_body(heading: &str, message: &str) -> Markup {
    html! {
        section class="sp-prose" id="error-panel" {
            h1 { (heading) }
            (notice(message, true))
            a class="sp-btn sp-btn-primary" href="/" { "Return home" }
        }
    }
}
