//! Pilot application form and its confirmation view.

use maud::{Markup, html};
use signalpath_core::navigation::Route;
use signalpath_core::pilot::{PilotApplicationDraft, PilotApplicationForm, PilotField};

use super::{Page, notice};

const COMPANY_SIZES: [&str; 6] = ["1-10", "11-50", "51-200", "201-500", "501-1000", "1000+"];
const INDUSTRIES: [&str; 7] = [
    "SaaS",
    "Fintech",
    "Healthcare",
    "Manufacturing",
    "Professional services",
    "E-commerce",
    "Other",
];
const OUTREACH_VOLUMES: [&str; 5] = ["<500", "500-1000", "1000-5000", "5000-10000", "10000+"];
const PRIMARY_GOALS: [(&str, &str); 4] = [
    ("book-meetings", "Book more meetings"),
    ("improve-reply-rates", "Improve reply rates"),
    ("find-accounts", "Find in-market accounts"),
    ("save-time", "Save rep research time"),
];
const TIMELINES: [(&str, &str); 4] = [
    ("immediately", "Immediately"),
    ("1-month", "Within a month"),
    ("3-months", "Within three months"),
    ("exploring", "Just exploring"),
];
const REFERRAL_SOURCES: [&str; 5] = ["Search", "LinkedIn", "Referral", "Event", "Other"];

pub fn page(form: &PilotApplicationForm) -> Page {
    Page::new(
        "Pilot program application",
        Route::PilotApplication,
        html! {
            section class="sp-hero" {
                h1 { "Join the SignalPath pilot" }
                p { "Ninety days of free access for outbound teams willing to tell us what works." }
            }
            (panel(form))
        },
    )
}

/// The swappable panel: the form while editing, the confirmation once
/// submitted.
pub fn panel(form: &PilotApplicationForm) -> Markup {
    if form.is_submitted() {
        return confirmation();
    }
    let draft = form.draft();

    html! {
        form id="pilot-panel" class="sp-form" method="post" action="/pilot-application"
            hx-post="/pilot-application" hx-target="#pilot-panel" hx-select="#pilot-panel"
            hx-swap="outerHTML" hx-disabled-elt="find button[type='submit']" {
            @if let Some(message) = form.error_message() {
                (notice(message, true))
            }
            fieldset {
                legend { "Company" }
                div class="sp-row" {
                    (text_input(draft, PilotField::CompanyName, "text"))
                    (text_input(draft, PilotField::CompanyWebsite, "url"))
                }
                div class="sp-row" {
                    (select(draft, PilotField::CompanySize, &pairs(&COMPANY_SIZES)))
                    (select(draft, PilotField::Industry, &pairs(&INDUSTRIES)))
                }
            }
            fieldset {
                legend { "You" }
                div class="sp-row" {
                    (text_input(draft, PilotField::FirstName, "text"))
                    (text_input(draft, PilotField::LastName, "text"))
                }
                div class="sp-row" {
                    (text_input(draft, PilotField::Email, "email"))
                    (text_input(draft, PilotField::Phone, "tel"))
                }
                div class="sp-row" {
                    (text_input(draft, PilotField::JobTitle, "text"))
                    (text_input(draft, PilotField::LinkedinUrl, "url"))
                }
            }
            fieldset {
                legend { "Your outbound today" }
                (text_input(draft, PilotField::CurrentTools, "text"))
                div class="sp-row" {
                    (select(draft, PilotField::MonthlyOutreachVolume, &pairs(&OUTREACH_VOLUMES)))
                    (select(draft, PilotField::PrimaryGoal, &PRIMARY_GOALS))
                }
                (textarea(draft, PilotField::BiggestChallenge))
                div class="sp-row" {
                    (select(draft, PilotField::Timeline, &TIMELINES))
                    (select(draft, PilotField::ReferralSource, &pairs(&REFERRAL_SOURCES)))
                }
            }
            fieldset {
                (checkbox(PilotField::AgreeToTerms, draft.agree_to_terms))
                (checkbox(PilotField::AgreeToFeedback, draft.agree_to_feedback))
            }
            button class="sp-btn sp-btn-primary" type="submit" { "Submit application" }
        }
    }
}

fn confirmation() -> Markup {
    html! {
        section id="pilot-panel" class="sp-form" {
            h2 { "Application Received!" }
            p { "Thanks for applying. We review every application and will reply within five business days." }
            a class="sp-btn sp-btn-primary" href="/" { "Back to home" }
        }
    }
}

fn pairs<'a>(values: &[&'a str]) -> Vec<(&'a str, &'a str)> {
    values.iter().map(|v| (*v, *v)).collect()
}

fn text_input(draft: &PilotApplicationDraft, field: PilotField, kind: &str) -> Markup {
    html! {
        label class="sp-field" {
            span { (field.label()) @if field.is_required() { " *" } }
            input type=(kind) name=(field.name()) value=(draft.text(field)) required[field.is_required()];
        }
    }
}

fn textarea(draft: &PilotApplicationDraft, field: PilotField) -> Markup {
    html! {
        label class="sp-field" {
            span { (field.label()) }
            textarea name=(field.name()) rows="3" { (draft.text(field)) }
        }
    }
}

fn select(draft: &PilotApplicationDraft, field: PilotField, options: &[(&str, &str)]) -> Markup {
    let current = draft.text(field);
    html! {
        label class="sp-field" {
            span { (field.label()) @if field.is_required() { " *" } }
            select name=(field.name()) required[field.is_required()] {
                option value="" selected[current.is_empty()] { "Select…" }
                @for (value, label) in options {
                    option value=(value) selected[current == *value] { (label) }
                }
            }
        }
    }
}

fn checkbox(field: PilotField, checked: bool) -> Markup {
    html! {
        label class="sp-check" {
            input type="checkbox" name=(field.name()) value="on" checked[checked] required;
            span { (field.label()) }
        }
    }
}
