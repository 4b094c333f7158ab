//! Server-rendered markup.
//!
//! Every page is rendered whole inside one shell. The shell is `hx-boost`ed,
//! so in-site links and forms swap `#main` and push history without a full
//! reload; without JavaScript the same links work as plain navigation.

pub mod pages;
pub mod pilot;
pub mod preferences;
mod style;

use maud::{DOCTYPE, Markup, PreEscaped, html};
use signalpath_core::navigation::Route;

use crate::config::SiteSettings;

const HTMX_SRC: &str = "https://unpkg.com/htmx.org@2.0.4/dist/htmx.min.js";

/// Swap every response, including 4xx/5xx pages, so error pages reach the
/// visitor during boosted navigation.
const HTMX_CONFIG: &str =
    r#"{"responseHandling":[{"code":"204","swap":false},{"code":".*","swap":true}]}"#;

/// Removes elements carrying `data-dismiss-after-ms` once their delay passes.
const DISMISS_SCRIPT: &str = r"
function spDismiss(root){root.querySelectorAll('[data-dismiss-after-ms]').forEach(function(el){
var ms=parseInt(el.getAttribute('data-dismiss-after-ms'),10);if(ms>0){setTimeout(function(){el.remove();},ms);}});}
document.addEventListener('DOMContentLoaded',function(){spDismiss(document);});
document.addEventListener('htmx:afterSwap',function(e){spDismiss(e.detail.target);});
";

const NAV: [(&str, &str); 4] = [
    ("/", "Home"),
    ("/about", "About"),
    ("/blog", "Blog"),
    ("/pilot-application", "Pilot program"),
];

/// A rendered page body plus what the shell needs to frame it.
#[derive(Debug, Clone)]
pub struct Page {
    pub title: String,
    pub route: Route,
    pub body: Markup,
}

impl Page {
    pub fn new(title: impl Into<String>, route: Route, body: Markup) -> Self {
        Self {
            title: title.into(),
            route,
            body,
        }
    }
}

/// Render `page` inside the site shell. `site` is `None` only when the
/// settings are unavailable (error responses built outside a handler).
pub fn render(page: &Page, site: Option<&SiteSettings>) -> String {
    let active = page.route.section();
    let markup = html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                meta name="htmx-config" content=(HTMX_CONFIG);
                title { (page.title) " | SignalPath" }
                style { (PreEscaped(style::CSS)) }
                script src=(HTMX_SRC) defer {}
                script { (PreEscaped(DISMISS_SCRIPT)) }
            }
            body hx-boost="true" hx-target="#main" hx-select="#main" hx-swap="outerHTML" {
                header class="sp-nav" {
                    a class="sp-logo" href="/" { "SignalPath" }
                    nav class="sp-links" {
                        @for (href, label) in NAV {
                            a href=(href) class=[(active == Some(href)).then_some("active")] { (label) }
                        }
                        a class="sp-pill" href="/login" hx-boost="false" { "Log in" }
                        a class="sp-btn sp-btn-primary" href="/signup" hx-boost="false" { "Start free" }
                    }
                }
                main id="main" {
                    (page.body)
                }
                (footer(site))
            }
        }
    };
    markup.into_string()
}

fn footer(site: Option<&SiteSettings>) -> Markup {
    html! {
        footer class="sp-footer" {
            span { "© 2026 SignalPath" }
            nav {
                a href="/privacy" { "Privacy" }
                a href="/terms" { "Terms" }
                a href="/preferences" { "Email preferences" }
                @if let Some(site) = site {
                    a href={ "mailto:" (site.support_email) } { (site.support_email) }
                }
            }
        }
    }
}

/// A full-width notice box.
pub fn notice(message: &str, is_error: bool) -> Markup {
    html! {
        div class=(if is_error { "sp-notice error" } else { "sp-notice" }) role=(if is_error { "alert" } else { "status" }) {
            (message)
        }
    }
}
