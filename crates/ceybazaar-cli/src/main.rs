//! `CeyBazaar` Admin CLI
//!
//! Staff console for the `CeyBazaar` store backend: orders, catalog,
//! delivery regions and sales reports.

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::anyhow;
use clap::{Parser, Subcommand};
use tracing::{info, warn};

use ceybazaar_core::config::load_config;
use ceybazaar_core::tracing_init::{default_filter, init_tracing};
use ceybazaar_core::{FileSessionStore, SessionStore};

use ceybazaar_cli::category_cmd::{self, CategoryAction};
use ceybazaar_cli::context::PageContext;
use ceybazaar_cli::order_cmd::{self, OrderAction};
use ceybazaar_cli::pages::Navigation;
use ceybazaar_cli::product_cmd::{self, ProductAction};
use ceybazaar_cli::region_cmd::{self, RegionAction};
use ceybazaar_cli::report_cmd::{self, ReportAction};
use ceybazaar_cli::routes::Route;
use ceybazaar_cli::{auth_cmd, console};

/// Exit code when the command needs a fresh login.
const EXIT_LOGIN_REQUIRED: u8 = 2;

#[derive(Parser, Debug)]
#[command(name = "ceybazaar-admin")]
#[command(version, about = "CeyBazaar store administration console", long_about = None)]
struct Cli {
    /// Explicit config file (JSON).
    #[arg(long, global = true, env = "CEYBAZAAR_CONFIG")]
    config: Option<PathBuf>,

    /// Backend base URL, e.g. http://localhost:8080/CeyBazaar
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Where the login session is stored.
    #[arg(long, global = true)]
    session_file: Option<PathBuf>,

    /// Emit log lines as JSON.
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sign in as an administrator.
    Login {
        #[arg(short, long)]
        email: Option<String>,
        /// Password (prompted when omitted).
        #[arg(short, long, env = "CEYBAZAAR_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
    /// Sign out and forget the session.
    Logout,
    /// Show the signed-in user and session validity.
    Status,
    /// Today's figures, recent orders and low stock.
    Dashboard,
    /// Product categories.
    Category {
        #[command(subcommand)]
        action: CategoryAction,
    },
    /// Products.
    Product {
        #[command(subcommand)]
        action: ProductAction,
    },
    /// Delivery regions.
    Region {
        #[command(subcommand)]
        action: RegionAction,
    },
    /// Orders.
    Order {
        #[command(subcommand)]
        action: OrderAction,
    },
    /// Sales reports.
    Report {
        #[command(subcommand)]
        action: ReportAction,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let mut config = load_config(cli.config.as_deref())?;
    if let Some(url) = cli.base_url {
        config.backend.base_url = url;
    }
    if let Some(path) = cli.session_file {
        config.session.store_path = Some(path);
    }
    if cli.log_json {
        config.log.json = true;
    }

    init_tracing(&default_filter(&config.log.level), config.log.json);
    info!(
        version = env!("CARGO_PKG_VERSION"),
        base_url = %config.backend.base_url,
        "Starting ceybazaar-admin"
    );

    let store_path = config
        .session
        .resolved_store_path()
        .ok_or_else(|| anyhow!("Cannot locate a home directory. Use --session-file <path>"))?;
    let session: Arc<dyn SessionStore> =
        Arc::new(FileSessionStore::new(store_path, config.session.ttl()));
    let ctx = PageContext::new(&config, session)?;

    let shutdown = ctx.root_token();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, cancelling in-flight requests");
            shutdown.cancel();
        }
    });

    let mut out = io::stdout().lock();
    let result = match dispatch(cli.command, &ctx, &mut out).await {
        Ok(nav) => console::follow(&ctx, nav, &mut out).await,
        Err(e) => Err(e),
    };
    out.flush()?;

    let mut err = io::stderr();
    let had_errors = ctx.notices.flush_to(&mut err)?;
    match result? {
        Navigation::Redirect(Route::Login) => {
            writeln!(err, "Run `ceybazaar-admin login` to sign in.")?;
            Ok(ExitCode::from(EXIT_LOGIN_REQUIRED))
        }
        _ if had_errors => Ok(ExitCode::FAILURE),
        _ => Ok(ExitCode::SUCCESS),
    }
}

async fn dispatch(
    command: Command,
    ctx: &PageContext,
    out: &mut impl Write,
) -> anyhow::Result<Navigation> {
    match command {
        Command::Login { email, password } => auth_cmd::login(ctx, email, password).await,
        Command::Logout => {
            // Signing out is the end of the command, not a prompt to sign in again.
            auth_cmd::logout(ctx);
            Ok(Navigation::Stay)
        }
        Command::Status => {
            auth_cmd::status(ctx, out)?;
            Ok(Navigation::Stay)
        }
        Command::Dashboard => console::open(ctx, Route::Home, out).await,
        Command::Category { action } => category_cmd::run(action, ctx, out).await,
        Command::Product { action } => product_cmd::run(action, ctx, out).await,
        Command::Region { action } => region_cmd::run(action, ctx, out).await,
        Command::Order { action } => order_cmd::run(action, ctx, out).await,
        Command::Report { action } => report_cmd::run(action, ctx, out).await,
    }
}
