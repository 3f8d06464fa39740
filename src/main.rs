use clap::{Parser, Subcommand};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use producthunt_menu::app::App;
use producthunt_menu::host::DesktopHost;
use producthunt_menu::items::MenuItem;
use producthunt_menu::locale::Catalog;
use producthunt_menu::ph::PhClient;
use producthunt_menu::prefs::FilePrefStore;
use producthunt_menu::time::SystemClock;

#[derive(Parser)]
#[command(
    name = "producthunt-menu",
    about = "A desktop launcher-menu plugin for browsing Product Hunt posts"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch today's and yesterday's posts as menu items
    Run,
    /// Render the detail view for a selected item (JSON payload)
    Details {
        /// The selected menu item, as emitted by `run`
        payload: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Menu JSON goes to stdout; keep logs off it
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let store = Arc::new(FilePrefStore::new()?);
    let client = PhClient::new(store);
    client.restore_token().await?;

    let app = App::new(
        client,
        DesktopHost::new(),
        SystemClock,
        Catalog::for_system_locale(),
    );

    let items = match cli.command.unwrap_or(Command::Run) {
        Command::Run => app.run().await,
        Command::Details { payload } => {
            let item: MenuItem = serde_json::from_str(&payload)?;
            app.details(&item)?
        }
    };

    println!("{}", serde_json::to_string_pretty(&items)?);
    Ok(())
}
