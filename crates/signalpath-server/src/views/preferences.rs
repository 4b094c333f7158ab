//! Email preference center and unsubscribe views.

use maud::{Markup, html};
use signalpath_core::error::PreferenceError;
use signalpath_core::navigation::Route;
use signalpath_core::preferences::{FLASH_DISMISS_AFTER, PreferenceDraft, PreferenceField, SuccessBanner};
use signalpath_store::{EmailPreference, Frequency};

use super::pages::error_body;
use super::{Page, notice};

/// What to show above the panel after a save attempt.
#[derive(Debug, Clone, Copy)]
pub enum Flash<'a> {
    Saved(&'a SuccessBanner),
    Failed(&'a str),
}

pub fn page(preference: &EmailPreference, flash: Option<Flash<'_>>) -> Page {
    Page::new(
        "Email preferences",
        Route::Preferences,
        html! {
            section class="sp-prose" {
                h1 { "Email preferences" }
                p { "Managing email for " strong { (preference.email) } "." }
            }
            (panel(preference, flash))
        },
    )
}

pub fn panel(preference: &EmailPreference, flash: Option<Flash<'_>>) -> Markup {
    let draft = PreferenceDraft::from(preference);
    let dismiss_ms = FLASH_DISMISS_AFTER.as_millis().to_string();

    html! {
        form id="preference-panel" class="sp-form" method="post" action="/preferences"
            hx-post="/preferences" hx-target="#preference-panel" hx-select="#preference-panel"
            hx-swap="outerHTML" hx-disabled-elt="find button[type='submit']" {
            @match flash {
                Some(Flash::Saved(_)) => {
                    div data-dismiss-after-ms=(dismiss_ms) { (notice(SuccessBanner::MESSAGE, false)) }
                }
                Some(Flash::Failed(message)) => { (notice(message, true)) }
                None => {}
            }
            input type="hidden" name="email" value=(preference.email);
            fieldset {
                legend { "What you hear about" }
                @for field in PreferenceField::CATEGORIES {
                    (toggle(&draft, field))
                }
            }
            fieldset {
                legend { "How you hear from us" }
                @for field in PreferenceField::CHANNELS {
                    (toggle(&draft, field))
                }
            }
            fieldset {
                label class="sp-field" {
                    span { "Frequency" }
                    select name="frequency" {
                        @for freq in Frequency::ALL {
                            option value=(freq.as_str()) selected[draft.frequency == freq] { (freq.label()) }
                        }
                    }
                }
            }
            button class="sp-btn sp-btn-primary" type="submit" { "Save preferences" }
            p class="sp-meta" {
                "Want to stop everything? "
                a href={ "/unsubscribe?email=" (urlencoding::encode(&preference.email).into_owned()) } { "Unsubscribe from all" }
            }
        }
    }
}

fn toggle(draft: &PreferenceDraft, field: PreferenceField) -> Markup {
    html! {
        label class="sp-check" {
            input type="checkbox" name=(field.name()) value="on" checked[draft.get(field)];
            span {
                (field.label())
                small { (field.description()) }
            }
        }
    }
}

/// Terminal state for the page load: the message and a way home, no panel.
pub fn error_page(err: &PreferenceError) -> Page {
    Page::new(
        "Email preferences",
        Route::Preferences,
        error_body("Email preferences", err.user_message()),
    )
}

// ── Unsubscribe ──────────────────────────────────────────────────────

pub fn unsubscribe_confirm(email: &str, failure: Option<&str>) -> Page {
    Page::new(
        "Unsubscribe",
        Route::Unsubscribe,
        html! {
            form id="unsubscribe-panel" class="sp-form" method="post" action="/unsubscribe"
                hx-post="/unsubscribe" hx-target="#unsubscribe-panel" hx-select="#unsubscribe-panel"
                hx-swap="outerHTML" hx-disabled-elt="find button[type='submit']" {
                h1 { "Unsubscribe" }
                @if let Some(message) = failure {
                    (notice(message, true))
                }
                p { "Stop all SignalPath email to " strong { (email) } "?" }
                input type="hidden" name="email" value=(email);
                button class="sp-btn sp-btn-primary" type="submit" { "Unsubscribe from all" }
                p class="sp-meta" {
                    "Or "
                    a href={ "/preferences?email=" (urlencoding::encode(email).into_owned()) } { "choose what you receive" }
                    "."
                }
            }
        },
    )
}

pub fn unsubscribed(preference: &EmailPreference) -> Page {
    Page::new(
        "Unsubscribed",
        Route::Unsubscribe,
        html! {
            section id="unsubscribe-panel" class="sp-form" {
                h1 { "You have been unsubscribed" }
                p { strong { (preference.email) } " will no longer receive email from us." }
                p {
                    "Changed your mind? "
                    a href={ "/preferences?token=" (preference.preference_token) } { "Update your preferences" }
                    "."
                }
            }
        },
    )
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use super::*;

    #[test]
    fn defaults_render_every_box_checked() {
        let pref = EmailPreference::with_defaults("user@x.com");
        let html = panel(&pref, None).into_string();
        for field in PreferenceField::CATEGORIES {
            assert!(html.contains(&format!("name=\"{}\" value=\"on\" checked", field.name())));
        }
        assert!(html.contains("<option value=\"weekly\" selected>"));
        assert!(!html.contains("data-dismiss-after-ms"));
    }

    #[test]
    fn saved_banner_dismisses_after_five_seconds() {
        let pref = EmailPreference::with_defaults("user@x.com");
        let banner = SuccessBanner::shown_at(Instant::now());
        let html = panel(&pref, Some(Flash::Saved(&banner))).into_string();
        assert!(html.contains("data-dismiss-after-ms=\"5000\""));
        assert!(html.contains(SuccessBanner::MESSAGE));
    }

    #[test]
    fn error_page_has_no_panel() {
        let html = error_page(&PreferenceError::InvalidLink).body.into_string();
        assert!(html.contains("Invalid preference link."));
        assert!(!html.contains("preference-panel"));
        assert!(html.contains("href=\"/\""));
    }
}
