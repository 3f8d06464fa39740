//! Run orchestration
//!
//! Drives one user-triggered run: first-run token acquisition, validation,
//! the two-day fetch sequence, and recovery when the server revokes the
//! stored credential. Every path resolves to a non-empty item list; nothing
//! here is fatal to the process.

use crate::error::{ActionError, ErrorKind};
use crate::host::{HostEnvironment, PromptChoice};
use crate::items::{self, Icon, MenuItem};
use crate::locale::Catalog;
use crate::ph::{HttpClient, PhClient};
use crate::time::Clock;

/// Where users create a developer token
pub const TOKEN_PAGE_URL: &str = "https://www.producthunt.com/v1/oauth/applications";

const NOTIFICATION_TITLE: &str = "Product Hunt";

/// Result of the token-acquisition dialog flow
enum TokenOutcome {
    /// A validated credential is stored; fetching can proceed
    Ready,
    /// The run ends here with these items
    Items(Vec<MenuItem>),
}

/// The launcher action itself
pub struct App<H: HttpClient, E: HostEnvironment, C: Clock> {
    client: PhClient<H>,
    host: E,
    clock: C,
    catalog: Catalog,
}

impl<H: HttpClient, E: HostEnvironment, C: Clock> App<H, E, C> {
    /// Wires the orchestrator to its collaborators
    pub fn new(client: PhClient<H>, host: E, clock: C, catalog: Catalog) -> Self {
        Self {
            client,
            host,
            clock,
            catalog,
        }
    }

    /// Entry point: one run, returning the menu to display
    pub async fn run(&self) -> Vec<MenuItem> {
        if self.client.token().await.is_none() {
            match self.acquire_token().await {
                TokenOutcome::Ready => {}
                TokenOutcome::Items(items) => return items,
            }
        }

        self.fetch_listings().await
    }

    /// Detail view for a selected post row. Stateless
    pub fn details(&self, item: &MenuItem) -> Result<Vec<MenuItem>, ActionError> {
        let post = item
            .post
            .as_ref()
            .ok_or_else(|| ActionError::new(ErrorKind::Api))?;

        Ok(items::post_details(post, self.clock.now(), &self.catalog))
    }

    /// First-run flow: point the user at the token page, then read the
    /// pasted candidate from the clipboard and validate it
    async fn acquire_token(&self) -> TokenOutcome {
        if let Err(e) = self.host.open_url(TOKEN_PAGE_URL) {
            tracing::warn!("Failed to open token page: {}", e);
        }

        let choice = self.host.prompt_for_token(
            self.catalog.localize("Token missing"),
            self.catalog
                .localize("Please create a Developer Token and copy it to the clipboard."),
            self.catalog.localize("Okay, copied"),
            self.catalog.localize("Cancel"),
        );

        if choice == PromptChoice::Cancelled {
            return TokenOutcome::Items(vec![MenuItem::new(
                self.catalog.localize("Token missing"),
            )
            .icon(Icon::Caution)
            .url(TOKEN_PAGE_URL)]);
        }

        let candidate = self.host.read_clipboard();
        if !self.client.test_token(candidate.as_deref()).await {
            return TokenOutcome::Items(self.invalid_token_items());
        }

        // test_token only passes for a present, non-empty candidate
        let token = candidate.unwrap_or_default();
        if let Err(e) = self.client.set_token(&token).await {
            let err = ActionError::with_message(ErrorKind::Unknown, e.to_string());
            err.log();
            return TokenOutcome::Items(self.generic_error_items(&err));
        }

        self.host.notify(
            NOTIFICATION_TITLE,
            self.catalog
                .localize("Token has been successfully saved. Loading products…"),
        );

        TokenOutcome::Ready
    }

    /// Fetches both day windows, falling back to captioned error items
    async fn fetch_listings(&self) -> Vec<MenuItem> {
        match self.try_fetch_listings().await {
            Ok(items) => items,
            Err(e) if e.kind() == ErrorKind::TokenInvalid => {
                // Revoked server-side. Drop the credential so the next run
                // asks for a fresh one.
                if let Err(clear_err) = self.client.clear_token().await {
                    tracing::warn!("Failed to clear stored token: {}", clear_err);
                }
                self.invalid_token_items()
            }
            Err(e) => {
                e.log();
                self.generic_error_items(&e)
            }
        }
    }

    async fn try_fetch_listings(&self) -> Result<Vec<MenuItem>, ActionError> {
        let mut out = vec![items::day_header("Today", &self.catalog)];
        for post in self.client.get_posts(None).await? {
            out.push(items::post_item(post));
        }

        out.push(items::day_header("Yesterday", &self.catalog));
        for post in self.client.get_posts(Some(1)).await? {
            out.push(items::post_item(post));
        }

        Ok(out)
    }

    /// "Invalid token" plus a re-entrant retry row
    fn invalid_token_items(&self) -> Vec<MenuItem> {
        vec![
            MenuItem::new(self.catalog.localize("Invalid token")).icon(Icon::Caution),
            MenuItem::new(self.catalog.localize("Please try again…")).action(items::RUN_ACTION),
        ]
    }

    fn generic_error_items(&self, err: &ActionError) -> Vec<MenuItem> {
        vec![MenuItem::new(self.catalog.localize("Error occurred"))
            .icon(Icon::Caution)
            .subtitle(err.message())]
    }
}
