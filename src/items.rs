//! Menu item building, separated from any particular host rendering
//!
//! Items are plain serializable data; the host decides how to draw them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::locale::Catalog;
use crate::ph::Post;
use crate::reldate;

/// Action name that re-invokes the whole run
pub const RUN_ACTION: &str = "run";

/// Action name that renders the detail view for a selected post
pub const DETAILS_ACTION: &str = "details";

/// Fixed icon names understood by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Icon {
    Time,
    Caution,
    Logo,
    Upvotes,
    Comments,
    User,
}

/// One row handed back to the host menu
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItem {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<Icon>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    #[serde(
        default,
        rename = "actionReturnsItems",
        skip_serializing_if = "Option::is_none"
    )]
    pub action_returns_items: Option<bool>,
    /// The post behind a listing row, retained for the detail view
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post: Option<Post>,
}

impl MenuItem {
    /// Creates an item with just a title
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            subtitle: None,
            icon: None,
            url: None,
            action: None,
            action_returns_items: None,
            post: None,
        }
    }

    pub fn subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    pub fn icon(mut self, icon: Icon) -> Self {
        self.icon = Some(icon);
        self
    }

    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn action(mut self, action: &str) -> Self {
        self.action = Some(action.to_string());
        self
    }

    pub fn returns_items(mut self) -> Self {
        self.action_returns_items = Some(true);
        self
    }

    pub fn post(mut self, post: Post) -> Self {
        self.post = Some(post);
        self
    }
}

/// Section header for one day's listing
pub fn day_header(caption: &str, catalog: &Catalog) -> MenuItem {
    MenuItem::new(catalog.localize(caption)).icon(Icon::Time)
}

/// A selectable row for one post
///
/// Carries the full post so the detail view renders without refetching.
pub fn post_item(post: Post) -> MenuItem {
    MenuItem::new(post.name.clone())
        .subtitle(post.tagline.clone())
        .url(post.discussion_url.clone())
        .icon(Icon::Logo)
        .action(DETAILS_ACTION)
        .returns_items()
        .post(post)
}

/// The five-row drill-down view for a selected post
///
/// When the creation timestamp yields no relative age the raw timestamp is
/// shown instead, keeping the row count fixed.
pub fn post_details(post: &Post, now: DateTime<Utc>, catalog: &Catalog) -> Vec<MenuItem> {
    let created = reldate::make_localized(&post.created_at, now, catalog)
        .unwrap_or_else(|| post.created_at.clone());

    vec![
        MenuItem::new(post.name.clone())
            .subtitle(post.tagline.clone())
            .icon(Icon::Logo)
            .url(post.redirect_url.clone()),
        MenuItem::new(post.votes_count.to_string())
            .subtitle(catalog.localize("upvotes"))
            .icon(Icon::Upvotes)
            .url(post.discussion_url.clone()),
        MenuItem::new(post.comments_count.to_string())
            .subtitle(catalog.localize("comments"))
            .icon(Icon::Comments)
            .url(post.discussion_url.clone()),
        MenuItem::new(post.user.name.clone())
            .subtitle(catalog.localize("Posted by"))
            .icon(Icon::User)
            .url(post.user.profile_url.clone()),
        MenuItem::new(created)
            .subtitle(catalog.localize("Created"))
            .icon(Icon::Time)
            .url(post.discussion_url.clone()),
    ]
}
