//! Static copy for the blog.

/// One published blog post.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlogPost {
    pub slug: &'static str,
    pub title: &'static str,
    pub summary: &'static str,
    pub author: &'static str,
    /// ISO date, rendered as-is.
    pub published: &'static str,
    pub paragraphs: &'static [&'static str],
}

/// Newest first.
pub const POSTS: &[BlogPost] = &[
    BlogPost {
        slug: "signals-beat-lists",
        title: "Why buying signals beat bigger lead lists",
        summary: "A list tells you who exists. A signal tells you who is ready to talk.",
        author: "Maya Okafor",
        published: "2026-09-22",
        paragraphs: &[
            "Most outbound teams still start from a spreadsheet. They buy a list, \
             filter it by title and headcount, and work it top to bottom.",
            "The problem is timing. A perfect-fit account that just signed a \
             three-year contract with a competitor will not reply, no matter how \
             good the sequence is.",
            "Signals change the order of the list. A new VP of Sales, a funding \
             round, or a hiring spike for SDRs moves an account to the top for a \
             few weeks, and then it fades.",
            "SignalPath watches for those moments and hands your reps the accounts \
             that are worth a call today.",
        ],
    },
    BlogPost {
        slug: "pilot-program-lessons",
        title: "What we learned from our first pilot cohort",
        summary: "Twelve teams, ninety days, and a lot of honest feedback.",
        author: "Daniel Reyes",
        published: "2026-08-05",
        paragraphs: &[
            "Our first pilot cohort ran for ninety days with twelve outbound teams \
             ranging from four reps to sixty.",
            "The biggest surprise was how much of the value came from saying no. \
             Teams that let SignalPath deprioritise cold accounts sent fewer \
             emails and booked more meetings.",
            "We also learned that feedback loops matter more than features. The \
             pilots that met with us every two weeks shaped most of what shipped.",
            "Applications for the next cohort are open now.",
        ],
    },
    BlogPost {
        slug: "writing-first-lines",
        title: "First lines that earn a second line",
        summary: "How to open a cold email with something the reader actually cares about.",
        author: "Maya Okafor",
        published: "2026-06-17",
        paragraphs: &[
            "A first line has one job: make the second line worth reading.",
            "The easiest way to do that is to lead with the signal. If a company \
             just opened an office in Austin, say so, and say why it matters to them.",
            "Avoid compliments that could apply to anyone. Specific beats flattering.",
        ],
    },
];

/// Look up a post by slug.
pub fn find_post(slug: &str) -> Option<&'static BlogPost> {
    POSTS.iter().find(|post| post.slug == slug)
}
