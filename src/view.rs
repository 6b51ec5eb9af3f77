//! Display models derived from portal state

use std::fmt::Write;

use crate::auth::SessionIdentity;
use crate::config::ClientOptions;
use crate::news::Item;
use crate::pagination::PageState;

const DEFAULT_CATEGORY: &str = "General";
const SUMMARY_CHARS: usize = 150;

/// One news card of the grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemCard {
    pub id: String,
    pub title: String,
    pub summary: String,
    pub category: String,
    pub image_url: Option<String>,
    /// Formatted publication date
    pub published: Option<String>,
    pub detail_path: String,
}

impl ItemCard {
    pub fn from_item(item: &Item, options: &ClientOptions) -> Self {
        Self {
            id: item.id.clone(),
            title: item.title.clone(),
            summary: summarize(item),
            category: item
                .category
                .clone()
                .filter(|c| !c.is_empty())
                .unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
            image_url: item
                .image
                .clone()
                .filter(|i| !i.is_empty())
                .or_else(|| options.fallback_image_url.clone()),
            published: item.published().and_then(|d| {
                let mut out = String::new();
                write!(out, "{}", d.format(&options.date_format)).ok()?;
                Some(out)
            }),
            detail_path: format!("/news/{}", item.id),
        }
    }
}

/// Subtitle, else the start of the description
fn summarize(item: &Item) -> String {
    if let Some(subtitle) = item.subtitle.as_deref().filter(|s| !s.is_empty()) {
        return subtitle.to_string();
    }
    match item.description.as_deref() {
        Some(description) if !description.is_empty() => {
            let head: String = description.chars().take(SUMMARY_CHARS).collect();
            format!("{}...", head)
        }
        _ => String::new(),
    }
}

/// A jump-to-page button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageButton {
    pub number: usize,
    pub active: bool,
}

/// Previous/next/jump controls under the grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationBar {
    pub previous_enabled: bool,
    pub next_enabled: bool,
    pub pages: Vec<PageButton>,
    /// e.g. `Showing 10 to 18 of 20 news`
    pub label: String,
}

impl PaginationBar {
    /// The controls for `page`, or none when everything fits on one page
    pub fn for_page(page: &PageState) -> Option<Self> {
        if !page.shows_controls() {
            return None;
        }

        let pages = page
            .page_numbers()
            .map(|number| PageButton {
                number,
                active: number == page.current_page,
            })
            .collect();

        Some(Self {
            previous_enabled: page.can_go_previous(),
            next_enabled: page.can_go_next(),
            pages,
            label: format!(
                "Showing {} to {} of {} news",
                page.start + 1,
                page.end,
                page.total_items
            ),
        })
    }
}

/// What the page header offers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderView {
    /// `Welcome, {name}` for a logged-in user
    pub greeting: Option<String>,
    pub show_logout: bool,
    pub show_login: bool,
    pub show_register: bool,
    /// Admins may publish news
    pub show_create_news: bool,
}

impl HeaderView {
    pub fn for_identity(identity: Option<&SessionIdentity>) -> Self {
        match identity {
            Some(identity) => Self {
                greeting: Some(format!("Welcome, {}", identity.display_name)),
                show_logout: true,
                show_login: false,
                show_register: false,
                show_create_news: identity.is_admin,
            },
            None => Self {
                greeting: None,
                show_logout: false,
                show_login: true,
                show_register: true,
                show_create_news: false,
            },
        }
    }
}

/// Banner text for a failed news load
pub fn warning_banner(warning: &str) -> String {
    format!("Warning: no news could be loaded ({})", warning)
}
