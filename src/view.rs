//! Display tree for the portfolio page.
//!
//! [`build_page`] is a pure function from the two fetched documents plus the
//! static site text to a [`PageView`]. It performs no I/O and applies no
//! filtering, sorting, or rewriting: every portfolio entry becomes exactly
//! one card, in mapping order, with its key and URL carried over verbatim.

use serde::Serialize;

use crate::config::schema::SiteContent;
use crate::fetch::{GeneralInfo, PortfolioMapping};

/// Heading of the projects section.
pub const PROJECTS_HEADING: &str = "Projects";

/// Root of the display tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageView {
    /// Document title
    pub title: String,
    /// Header with name and tagline
    pub profile: ProfileSection,
    /// Project card grid
    pub projects: ProjectsSection,
}

/// The page header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileSection {
    /// Top-level heading text
    pub name: String,
    /// Fixed tagline under the heading
    pub tagline: String,
}

/// The projects grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectsSection {
    /// Section heading
    pub heading: String,
    /// One card per portfolio entry, in mapping order
    pub cards: Vec<ProjectCard>,
}

/// A single project card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectCard {
    /// Card identity; the portfolio key
    pub key: String,
    /// Card title; the portfolio key
    pub title: String,
    /// Link target; the portfolio value, unmodified
    pub href: String,
    /// Anchor text
    pub link_label: String,
}

impl ProjectsSection {
    /// Card keys in display order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.cards.iter().map(|card| card.key.as_str())
    }
}

/// Derives the display tree from already-fetched documents.
#[must_use]
pub fn build_page(
    general_info: &GeneralInfo,
    portfolio: &PortfolioMapping,
    content: &SiteContent,
) -> PageView {
    let cards = portfolio
        .entries()
        .map(|(name, url)| ProjectCard {
            key: name.to_string(),
            title: name.to_string(),
            href: url.to_string(),
            link_label: content.link_label.clone(),
        })
        .collect();

    PageView {
        title: content.title.clone(),
        profile: ProfileSection {
            name: general_info.name.clone(),
            tagline: content.tagline.clone(),
        },
        projects: ProjectsSection {
            heading: PROJECTS_HEADING.to_string(),
            cards,
        },
    }
}
