//! View Models for page rendering
//!
//! Plain serializable structs handed to whatever renders the site (templates,
//! a static generator, or the JSON API). All text is already formatted.

use serde::Serialize;

use crate::catalog::{Link, MediaKind, Metric, RecordKind};

pub const SITE_NAME: &str = "Human Machine";

/// `<head>` metadata for a page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageMeta {
    pub title: String,
    pub description: String,
    pub og_title: String,
    pub og_description: String,
}

impl PageMeta {
    /// Title becomes "{title} | Human Machine"; Open Graph keeps `og_title`.
    pub fn for_page(title: &str, og_title: &str, description: &str) -> Self {
        Self {
            title: format!("{} | {}", title, SITE_NAME),
            description: description.to_string(),
            og_title: og_title.to_string(),
            og_description: description.to_string(),
        }
    }

    /// Static pages whose Open Graph title repeats the full title.
    pub fn fixed(title: &str, description: &str) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
            og_title: title.to_string(),
            og_description: description.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BackLink {
    pub href: String,
    pub label: String,
}

/// An outbound link, flagged when it points at a GitHub repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkView {
    pub label: String,
    pub url: String,
    pub github: bool,
}

impl From<&Link> for LinkView {
    fn from(link: &Link) -> Self {
        Self {
            label: link.label.clone(),
            url: link.url.clone(),
            github: link.label.to_lowercase().contains("github"),
        }
    }
}

// ============================================================================
// Cards
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InterviewCard {
    pub href: String,
    pub title: String,
    pub category: String,
    pub category_gradient: String,
    /// "Name, Company"
    pub byline: String,
    pub description: String,
    pub date_label: String,
    pub duration: String,
    pub thumbnail: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkCard {
    pub href: String,
    pub company: String,
    pub project: String,
    /// "Role • Duration"
    pub role_line: String,
    pub description: String,
    pub date_label: String,
    pub tags: Vec<String>,
    pub metrics: Vec<Metric>,
    pub thumbnail: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayCard {
    pub href: String,
    pub title: String,
    pub kind: String,
    pub type_gradient: String,
    pub description: String,
    pub date_label: String,
    pub technologies: Vec<String>,
    pub links: Vec<LinkView>,
    pub thumbnail: Option<String>,
}

// ============================================================================
// List pages
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListPage<C> {
    pub meta: PageMeta,
    pub kind: RecordKind,
    /// Gradient-highlighted part of the heading, then the rest.
    pub heading_accent: String,
    pub heading_rest: String,
    pub intro: String,
    /// Grouping values available as filters (interviews only).
    pub categories: Vec<String>,
    pub items: Vec<C>,
}

// ============================================================================
// Detail pages
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InterviewPage {
    pub meta: PageMeta,
    pub back: BackLink,
    pub title: String,
    pub category: String,
    pub category_gradient: String,
    pub guest_name: String,
    /// "Role at Company"
    pub guest_line: String,
    pub date_label: String,
    pub duration: String,
    pub media: MediaKind,
    pub key_takeaways: Vec<String>,
    pub body_html: String,
    pub tags: Vec<String>,
    pub links: Vec<LinkView>,
    pub transcript_html: Option<String>,
    pub related_heading: String,
    pub related: Vec<InterviewCard>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkPage {
    pub meta: PageMeta,
    pub back: BackLink,
    pub company: String,
    pub project: String,
    pub description: String,
    pub role: String,
    pub duration: String,
    pub date_label: String,
    pub impact: String,
    pub thumbnail: Option<String>,
    pub metrics: Vec<Metric>,
    pub body_html: String,
    pub images: Vec<String>,
    pub team: Vec<String>,
    pub technologies: Vec<String>,
    pub tags: Vec<String>,
    pub links: Vec<LinkView>,
    pub related_heading: String,
    pub related: Vec<WorkCard>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayPage {
    pub meta: PageMeta,
    pub back: BackLink,
    pub title: String,
    pub kind: String,
    pub type_gradient: String,
    pub description: String,
    pub date_label: String,
    pub links: Vec<LinkView>,
    pub thumbnail: Option<String>,
    pub body_html: String,
    pub images: Vec<String>,
    pub technologies: Vec<String>,
    pub tags: Vec<String>,
    pub related_heading: String,
    pub related: Vec<PlayCard>,
}

// ============================================================================
// Home and 404
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LatestRail<C> {
    pub title: String,
    pub view_all_href: String,
    pub items: Vec<C>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HomePage {
    pub meta: PageMeta,
    pub latest_interviews: LatestRail<InterviewCard>,
    pub latest_work: LatestRail<WorkCard>,
    pub latest_play: LatestRail<PlayCard>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotFoundPage {
    pub status: u16,
    pub meta: PageMeta,
    pub message: String,
    pub home_href: String,
}
