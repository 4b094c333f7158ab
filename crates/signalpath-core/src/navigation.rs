//! Page routing and navigation history.
//!
//! [`Route`] is the closed set of top-level pages. Every path resolves to
//! exactly one route, so exactly one page is ever "current".
//!
//! [`Navigator`] is the injectable stand-in for browser history: it pushes
//! locations and notifies subscribers synchronously through a
//! `tokio::sync::watch` channel. The server resolves each request path with
//! [`Route::resolve`]; the navigator drives the same table wherever history
//! has to be modelled explicitly.

use tokio::sync::watch;

/// A top-level page of the site.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    About,
    Blog,
    /// One blog post. The slug is opaque; the page decides whether it exists.
    BlogPost { slug: String },
    PilotApplication,
    Privacy,
    Terms,
    /// Sign-in lives in the product app, not on this site.
    Login,
    /// Sign-up lives in the product app, not on this site.
    Signup,
    Unsubscribe,
    Preferences,
    /// Placeholder lead detail view. The id is passed through unvalidated.
    LeadDetail { id: String },
    NotFound { path: String },
}

impl Route {
    /// Resolve a request path (without query) to its page.
    ///
    /// Trailing slashes are ignored. Relative paths and paths outside the
    /// table resolve to [`Route::NotFound`].
    #[must_use]
    pub fn resolve(path: &str) -> Self {
        let Some(rest) = path.strip_prefix('/') else {
            return Self::NotFound {
                path: path.to_owned(),
            };
        };
        let trimmed = rest.trim_end_matches('/');
        let segments: Vec<&str> = if trimmed.is_empty() {
            Vec::new()
        } else {
            trimmed.split('/').collect()
        };

        match segments.as_slice() {
            [] => Self::Home,
            ["about"] => Self::About,
            ["blog"] => Self::Blog,
            ["blog", slug] if !slug.is_empty() => Self::BlogPost {
                slug: (*slug).to_owned(),
            },
            ["pilot-application"] => Self::PilotApplication,
            ["privacy"] => Self::Privacy,
            ["terms"] => Self::Terms,
            ["login"] => Self::Login,
            ["signup"] => Self::Signup,
            ["unsubscribe"] => Self::Unsubscribe,
            ["preferences"] => Self::Preferences,
            ["lead", id] if !id.is_empty() => Self::LeadDetail {
                id: (*id).to_owned(),
            },
            _ => Self::NotFound {
                path: path.to_owned(),
            },
        }
    }

    /// Canonical path for this route.
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::Home => "/".to_owned(),
            Self::About => "/about".to_owned(),
            Self::Blog => "/blog".to_owned(),
            Self::BlogPost { slug } => format!("/blog/{slug}"),
            Self::PilotApplication => "/pilot-application".to_owned(),
            Self::Privacy => "/privacy".to_owned(),
            Self::Terms => "/terms".to_owned(),
            Self::Login => "/login".to_owned(),
            Self::Signup => "/signup".to_owned(),
            Self::Unsubscribe => "/unsubscribe".to_owned(),
            Self::Preferences => "/preferences".to_owned(),
            Self::LeadDetail { id } => format!("/lead/{id}"),
            Self::NotFound { path } => path.clone(),
        }
    }

    /// Whether the page is served by the external product app.
    #[must_use]
    pub const fn is_external(&self) -> bool {
        matches!(self, Self::Login | Self::Signup)
    }

    /// Which nav entry to highlight for this route.
    #[must_use]
    pub const fn section(&self) -> Option<&'static str> {
        match self {
            Self::Home => Some("/"),
            Self::About => Some("/about"),
            Self::Blog | Self::BlogPost { .. } => Some("/blog"),
            Self::PilotApplication => Some("/pilot-application"),
            _ => None,
        }
    }
}

/// A path plus its raw query string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub path: String,
    pub query: Option<String>,
}

impl Location {
    /// Split a `path?query` string. An empty path becomes `/`.
    #[must_use]
    pub fn parse(target: &str) -> Self {
        let (path, query) = match target.split_once('?') {
            Some((p, q)) => (p, Some(q.to_owned()).filter(|q| !q.is_empty())),
            None => (target, None),
        };
        let path = if path.is_empty() { "/" } else { path };
        Self {
            path: path.to_owned(),
            query,
        }
    }

    /// First value of a query parameter, percent-decoded.
    #[must_use]
    pub fn query_param(&self, name: &str) -> Option<String> {
        let query = self.query.as_deref()?;
        url::form_urlencoded::parse(query.as_bytes())
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.into_owned())
    }

    /// The page this location selects.
    #[must_use]
    pub fn route(&self) -> Route {
        Route::resolve(&self.path)
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.query {
            Some(q) => write!(f, "{}?{q}", self.path),
            None => f.write_str(&self.path),
        }
    }
}

/// The navigation stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct History {
    entries: Vec<Location>,
}

impl History {
    /// The location currently shown. The stack is never empty.
    #[must_use]
    pub fn current(&self) -> &Location {
        // `entries` starts with one element and `pop` refuses to drop the last.
        &self.entries[self.entries.len() - 1]
    }

    /// Number of entries on the stack.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always `false`; kept for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Navigation state with change notification.
///
/// `navigate` is synchronous and unconditional: the location is updated and
/// every subscriber is marked changed before it returns.
#[derive(Debug)]
pub struct Navigator {
    state: watch::Sender<History>,
}

impl Navigator {
    /// Start at `initial` (a `path?query` string).
    #[must_use]
    pub fn new(initial: &str) -> Self {
        let (state, _rx) = watch::channel(History {
            entries: vec![Location::parse(initial)],
        });
        Self { state }
    }

    /// Push `target` onto history and notify subscribers.
    pub fn navigate(&self, target: &str) -> Location {
        let location = Location::parse(target);
        self.state.send_modify(|history| history.entries.push(location.clone()));
        tracing::debug!(location = %location, "navigated");
        location
    }

    /// Pop one entry, like the browser back button. Returns the location now
    /// shown, or `None` when already at the first entry.
    pub fn back(&self) -> Option<Location> {
        let mut shown = None;
        self.state.send_if_modified(|history| {
            if history.entries.len() > 1 {
                history.entries.pop();
                shown = Some(history.current().clone());
                true
            } else {
                false
            }
        });
        shown
    }

    /// The location currently shown.
    #[must_use]
    pub fn current(&self) -> Location {
        self.state.borrow().current().clone()
    }

    /// The page currently selected.
    #[must_use]
    pub fn current_route(&self) -> Route {
        self.state.borrow().current().route()
    }

    /// Subscribe to location changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<History> {
        self.state.subscribe()
    }
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new("/")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn resolves_every_known_page() {
        let cases = [
            ("/", Route::Home),
            ("/about", Route::About),
            ("/blog", Route::Blog),
            ("/pilot-application", Route::PilotApplication),
            ("/privacy", Route::Privacy),
            ("/terms", Route::Terms),
            ("/login", Route::Login),
            ("/signup", Route::Signup),
            ("/unsubscribe", Route::Unsubscribe),
            ("/preferences", Route::Preferences),
        ];
        for (path, route) in cases {
            assert_eq!(Route::resolve(path), route, "path {path}");
            assert_eq!(route.path(), path);
        }
    }

    #[test]
    fn detail_views_carry_opaque_ids() {
        assert_eq!(
            Route::resolve("/lead/4f2a-x"),
            Route::LeadDetail {
                id: "4f2a-x".to_owned()
            }
        );
        assert_eq!(
            Route::resolve("/blog/why-triggers-beat-lists"),
            Route::BlogPost {
                slug: "why-triggers-beat-lists".to_owned()
            }
        );
    }

    #[test]
    fn trailing_slash_is_ignored() {
        assert_eq!(Route::resolve("/about/"), Route::About);
        assert_eq!(Route::resolve("//"), Route::Home);
    }

    #[test]
    fn unknown_paths_are_not_found() {
        assert_eq!(
            Route::resolve("/pricing"),
            Route::NotFound {
                path: "/pricing".to_owned()
            }
        );
        assert!(matches!(Route::resolve("/lead"), Route::NotFound { .. }));
        assert!(matches!(Route::resolve("/about/team"), Route::NotFound { .. }));
    }

    #[test]
    fn relative_paths_are_not_found() {
        assert_eq!(
            Route::resolve("about"),
            Route::NotFound {
                path: "about".to_owned()
            }
        );
        assert!(matches!(Route::resolve(""), Route::NotFound { .. }));

        let nav = Navigator::new("/");
        let location = nav.navigate("about");
        assert_eq!(location.path, "about");
        assert!(matches!(nav.current_route(), Route::NotFound { .. }));
    }

    #[test]
    fn location_query_params_are_decoded() {
        let loc = Location::parse("/preferences?email=User%40X.com&token=");
        assert_eq!(loc.path, "/preferences");
        assert_eq!(loc.query_param("email").as_deref(), Some("User@X.com"));
        assert_eq!(loc.query_param("token").as_deref(), Some(""));
        assert_eq!(loc.query_param("missing"), None);
        assert_eq!(loc.route(), Route::Preferences);
    }

    #[test]
    fn navigate_then_read_yields_path() {
        let nav = Navigator::default();
        nav.navigate("/pilot-application");
        assert_eq!(nav.current().path, "/pilot-application");
        assert_eq!(nav.current_route(), Route::PilotApplication);
    }

    #[test]
    fn navigate_notifies_subscribers_synchronously() {
        let nav = Navigator::new("/");
        let mut rx = nav.subscribe();
        assert!(!rx.has_changed().unwrap());

        nav.navigate("/blog?page=2");
        assert!(rx.has_changed().unwrap());
        let seen = rx.borrow_and_update().current().clone();
        assert_eq!(seen.to_string(), "/blog?page=2");
    }

    #[test]
    fn back_pops_until_first_entry() {
        let nav = Navigator::new("/");
        nav.navigate("/about");
        nav.navigate("/terms");

        assert_eq!(nav.back().unwrap().path, "/about");
        assert_eq!(nav.back().unwrap().path, "/");
        assert_eq!(nav.back(), None);
        assert_eq!(nav.current_route(), Route::Home);
    }

    #[test]
    fn back_at_first_entry_does_not_notify() {
        let nav = Navigator::new("/");
        let rx = nav.subscribe();
        assert_eq!(nav.back(), None);
        assert!(!rx.has_changed().unwrap());
    }
}
