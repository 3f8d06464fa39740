use serde::{Deserialize, Serialize};

/// One ranked listing record from Product Hunt
///
/// Immutable once fetched; carried inside the menu item that renders it so
/// the detail view never has to refetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub name: String,
    pub tagline: String,
    pub redirect_url: String,
    pub discussion_url: String,
    pub votes_count: i64,
    pub comments_count: i64,
    pub user: PostUser,
    /// Kept as the raw server string: a malformed timestamp should degrade to
    /// "no age shown", not fail the whole listing.
    pub created_at: String,
}

/// The hunter who posted a product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostUser {
    pub name: String,
    pub profile_url: String,
}

/// Listings envelope from the posts endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostsResponse {
    pub posts: Vec<Post>,
}

/// Error fields the API attaches to non-200 responses
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub error_description: Option<String>,
}
