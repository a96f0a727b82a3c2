//! View Builder - converts catalog records to view models
//!
//! Every page runs the same steps: resolve or query records through the
//! catalog, then map each record to a card or page. Cards are produced by
//! the `CardView` impls, so list pages, home rails and related sections share
//! one code path across the three kinds.

use crate::catalog::query::{self, ListFilters};
use crate::catalog::{
    Catalog, CatalogRecord, InterviewRecord, NotFoundError, PlayRecord, RecordKind, SiteCatalog, WorkRecord,
};
use crate::presentation::format::{format_long_date, format_month_year, non_empty, render_markdown};
use crate::presentation::view_models::*;

/// Tags and technologies shown on a card.
const CARD_CHIPS: usize = 3;
/// Metrics shown on a work card.
const CARD_METRICS: usize = 2;

const NOT_FOUND_MESSAGE: &str = "The page you're looking for doesn't exist or has been moved.";

/// Maps a record to its card.
pub trait CardView: CatalogRecord {
    type Card;

    fn card(&self) -> Self::Card;
}

impl CardView for InterviewRecord {
    type Card = InterviewCard;

    fn card(&self) -> InterviewCard {
        InterviewCard {
            href: detail_href(RecordKind::Interview, &self.slug),
            title: self.title.clone(),
            category: self.category.clone(),
            category_gradient: self.category_gradient.clone(),
            byline: format!("{}, {}", self.guest.name, self.guest.company),
            description: self.description.clone(),
            date_label: format_long_date(&self.date),
            duration: self.duration.clone(),
            thumbnail: non_empty(&self.thumbnail),
        }
    }
}

impl CardView for WorkRecord {
    type Card = WorkCard;

    fn card(&self) -> WorkCard {
        WorkCard {
            href: detail_href(RecordKind::Work, &self.slug),
            company: self.company.clone(),
            project: self.project.clone(),
            role_line: format!("{} • {}", self.role, self.duration),
            description: self.description.clone(),
            date_label: format_month_year(&self.date),
            tags: self.tags.iter().take(CARD_CHIPS).cloned().collect(),
            metrics: self.metrics.iter().take(CARD_METRICS).cloned().collect(),
            thumbnail: non_empty(&self.thumbnail),
        }
    }
}

impl CardView for PlayRecord {
    type Card = PlayCard;

    fn card(&self) -> PlayCard {
        PlayCard {
            href: detail_href(RecordKind::Play, &self.slug),
            title: self.title.clone(),
            kind: self.kind.clone(),
            type_gradient: self.type_gradient.clone(),
            description: self.description.clone(),
            date_label: format_month_year(&self.date),
            technologies: self.technologies.iter().take(CARD_CHIPS).cloned().collect(),
            links: self.links.iter().map(LinkView::from).collect(),
            thumbnail: non_empty(&self.thumbnail),
        }
    }
}

fn cards<R: CardView>(records: &[&R]) -> Vec<R::Card> {
    records.iter().map(|r| r.card()).collect()
}

fn detail_href(kind: RecordKind, slug: &str) -> String {
    format!("/{}/{}", kind.route_segment(), slug)
}

fn back_link(kind: RecordKind) -> BackLink {
    let label = match kind {
        RecordKind::Interview => "Back to Interviews",
        RecordKind::Work => "Back to Work",
        RecordKind::Play => "Back to Projects",
    };
    BackLink {
        href: format!("/{}", kind.route_segment()),
        label: label.to_string(),
    }
}

// ============================================================================
// List pages
// ============================================================================

struct ListCopy {
    title: &'static str,
    description: &'static str,
    heading_accent: &'static str,
    heading_rest: &'static str,
    intro: &'static str,
}

fn list_copy(kind: RecordKind) -> ListCopy {
    match kind {
        RecordKind::Interview => ListCopy {
            title: "Interviews | Human Machine",
            description: "Conversations with builders making technology more human",
            heading_accent: "Conversations",
            heading_rest: "with Builders",
            intro: "In-depth discussions with people building the future of digital identity, \
                    sustainable commerce, and human-centered technology.",
        },
        RecordKind::Work => ListCopy {
            title: "Work | Human Machine",
            description: "Case studies and projects in digital identity, product passports, and enterprise UX",
            heading_accent: "Work",
            heading_rest: "& Projects",
            intro: "Case studies from building digital identity systems, product passports, \
                    and enterprise design systems at scale.",
        },
        RecordKind::Play => ListCopy {
            title: "Play | Human Machine",
            description: "Open source projects, design resources, and experiments",
            heading_accent: "Side Projects",
            heading_rest: "& Experiments",
            intro: "Open source tools, design resources, and experimental projects \
                    exploring new ideas in digital identity and sustainable commerce.",
        },
    }
}

/// A list page: filtered records, newest first.
pub fn list_page<R: CardView>(catalog: &Catalog<R>, filters: &ListFilters) -> ListPage<R::Card> {
    let copy = list_copy(R::KIND);
    let items = filters.apply(catalog);

    ListPage {
        meta: PageMeta::fixed(copy.title, copy.description),
        kind: R::KIND,
        heading_accent: copy.heading_accent.to_string(),
        heading_rest: copy.heading_rest.to_string(),
        intro: copy.intro.to_string(),
        categories: query::categories(catalog).into_iter().map(str::to_string).collect(),
        items: cards(&items),
    }
}

// ============================================================================
// Detail pages
// ============================================================================

pub fn interview_page(
    catalog: &Catalog<InterviewRecord>,
    slug: &str,
    related_limit: usize,
) -> Result<InterviewPage, NotFoundError> {
    let interview = query::by_slug_or_not_found(catalog, slug)?;
    let related = query::related(catalog, interview, related_limit);

    Ok(InterviewPage {
        meta: PageMeta::for_page(&interview.title, &interview.title, &interview.description),
        back: back_link(RecordKind::Interview),
        title: interview.title.clone(),
        category: interview.category.clone(),
        category_gradient: interview.category_gradient.clone(),
        guest_name: interview.guest.name.clone(),
        guest_line: format!("{} at {}", interview.guest.role, interview.guest.company),
        date_label: format_long_date(&interview.date),
        duration: interview.duration.clone(),
        media: interview.media.clone(),
        key_takeaways: interview.key_takeaways.clone(),
        body_html: render_markdown(&interview.long_description),
        tags: interview.tags.clone(),
        links: interview.links.iter().map(LinkView::from).collect(),
        transcript_html: interview
            .transcript
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .map(render_markdown),
        related_heading: "More Interviews".to_string(),
        related: cards(&related),
    })
}

pub fn work_page(catalog: &Catalog<WorkRecord>, slug: &str, related_limit: usize) -> Result<WorkPage, NotFoundError> {
    let work = query::by_slug_or_not_found(catalog, slug)?;
    let related = query::related(catalog, work, related_limit);

    Ok(WorkPage {
        meta: PageMeta::for_page(
            &work.project,
            &format!("{} - {}", work.project, work.company),
            &work.description,
        ),
        back: back_link(RecordKind::Work),
        company: work.company.clone(),
        project: work.project.clone(),
        description: work.description.clone(),
        role: work.role.clone(),
        duration: work.duration.clone(),
        date_label: format_month_year(&work.date),
        impact: work.impact.clone(),
        thumbnail: non_empty(&work.thumbnail),
        metrics: work.metrics.clone(),
        body_html: render_markdown(&work.long_description),
        images: work.images.clone(),
        team: work.team.clone(),
        technologies: work.technologies.clone(),
        tags: work.tags.clone(),
        links: work.links.iter().map(LinkView::from).collect(),
        related_heading: "More Work".to_string(),
        related: cards(&related),
    })
}

pub fn play_page(catalog: &Catalog<PlayRecord>, slug: &str, related_limit: usize) -> Result<PlayPage, NotFoundError> {
    let project = query::by_slug_or_not_found(catalog, slug)?;
    let related = query::related(catalog, project, related_limit);

    Ok(PlayPage {
        meta: PageMeta::for_page(&project.title, &project.title, &project.description),
        back: back_link(RecordKind::Play),
        title: project.title.clone(),
        kind: project.kind.clone(),
        type_gradient: project.type_gradient.clone(),
        description: project.description.clone(),
        date_label: format_month_year(&project.date),
        links: project.links.iter().map(LinkView::from).collect(),
        thumbnail: non_empty(&project.thumbnail),
        body_html: render_markdown(&project.long_description),
        images: project.images.clone(),
        technologies: project.technologies.clone(),
        tags: project.tags.clone(),
        related_heading: "More Projects".to_string(),
        related: cards(&related),
    })
}

// ============================================================================
// Home and 404
// ============================================================================

/// Home rails: newest interviews, newest featured work and play.
pub fn home_page(site: &SiteCatalog, latest_limit: usize) -> HomePage {
    HomePage {
        meta: PageMeta::fixed(
            "Human Machine - Making Technology More Human",
            "Exploring digital identity, product passports, and enterprise UX at the \
             intersection of human needs and machine capabilities.",
        ),
        latest_interviews: LatestRail {
            title: "Latest Conversations".to_string(),
            view_all_href: "/interviews".to_string(),
            items: cards(&query::latest(site.interviews(), latest_limit)),
        },
        latest_work: LatestRail {
            title: "Featured Work".to_string(),
            view_all_href: "/work".to_string(),
            items: cards(&query::featured_latest(site.work(), latest_limit)),
        },
        latest_play: LatestRail {
            title: "Side Projects".to_string(),
            view_all_href: "/play".to_string(),
            items: cards(&query::featured_latest(site.play(), latest_limit)),
        },
    }
}

/// The 404 view. Record kinds get their own title; unknown routes a generic one.
pub fn not_found_page(error: &NotFoundError) -> NotFoundPage {
    let title = match error.kind {
        Some(RecordKind::Interview) => "Interview Not Found",
        Some(RecordKind::Work) => "Work Not Found",
        Some(RecordKind::Play) => "Project Not Found",
        None => "Page Not Found",
    };

    NotFoundPage {
        status: 404,
        meta: PageMeta::fixed(title, NOT_FOUND_MESSAGE),
        message: NOT_FOUND_MESSAGE.to_string(),
        home_href: "/".to_string(),
    }
}
