mod demo;
mod render;

#[cfg(test)]
#[path = "main_test.rs"]
mod main_test;

use std::rc::Rc;

use clap::{Parser, Subcommand};
use pocketbook::alert::Alerter;
use pocketbook::config::{
    ConfigError, DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_STORE_URL, StoreConfig,
    StoreTimeouts,
};
use pocketbook::session::SessionResolver;
use pocketbook::store::rest::RestStore;
use pocketbook::store::{DataStore, StoreError};
use pocketbook::views::balances::{BalancesState, load_balances};
use pocketbook::views::items::{ItemDraft, ItemsState, load_items, submit_draft};
use pocketbook::views::load::LoadPhase;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("store client failed: {0}")]
    Store(#[from] StoreError),
    #[error("{0} failed; see alert above")]
    ViewFailed(&'static str),
}

#[derive(Parser, Debug)]
#[command(name = "pocketbook-cli", about = "Pocketbook balances and items in the terminal")]
struct Cli {
    /// Hosted store base URL.
    #[arg(long, env = "POCKETBOOK_STORE_URL", default_value = DEFAULT_STORE_URL)]
    store_url: String,

    /// Project anon key. Required unless `--demo`.
    #[arg(long, env = "POCKETBOOK_ANON_KEY", hide_env_values = true)]
    anon_key: Option<String>,

    /// Signed-in user's access token. Without one every view reports no session.
    #[arg(long, env = "POCKETBOOK_ACCESS_TOKEN", hide_env_values = true)]
    access_token: Option<String>,

    #[arg(long, env = "POCKETBOOK_REQUEST_TIMEOUT_SECS", default_value_t = DEFAULT_REQUEST_TIMEOUT_SECS)]
    request_timeout_secs: u64,

    #[arg(long, env = "POCKETBOOK_CONNECT_TIMEOUT_SECS", default_value_t = DEFAULT_CONNECT_TIMEOUT_SECS)]
    connect_timeout_secs: u64,

    /// Use an in-memory store with sample data instead of the hosted one.
    #[arg(long)]
    demo: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the signed-in user's balances.
    Balances,
    /// List tracked items with funding against the default balance.
    Items,
    /// Add a tracked item.
    AddItem {
        #[arg(long)]
        name: String,
        #[arg(long)]
        price: String,
        #[arg(long, default_value = "")]
        image: String,
        #[arg(long, default_value = "0")]
        priority: String,
    },
}

/// Alerts go to stderr so stdout stays pipeable.
struct StderrAlerter;

impl Alerter for StderrAlerter {
    fn alert(&self, message: &str) {
        eprintln!("alert: {message}");
    }
}

/// Flags win over `POCKETBOOK_*` env vars; clap resolves that per flag.
fn store_config(cli: &Cli) -> Result<StoreConfig, CliError> {
    let timeouts = StoreTimeouts { request_secs: cli.request_timeout_secs, connect_secs: cli.connect_timeout_secs };
    Ok(StoreConfig::new(&cli.store_url, cli.anon_key.clone(), cli.access_token.clone(), timeouts)?)
}

fn build_store(cli: &Cli) -> Result<Rc<dyn DataStore>, CliError> {
    if cli.demo {
        return Ok(Rc::new(demo::demo_store()));
    }
    let config = store_config(cli)?;
    tracing::debug!(store_url = %config.store_url, signed_in = config.access_token.is_some(), "using hosted store");
    Ok(Rc::new(RestStore::new(&config)?))
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();
    let resolver = SessionResolver::new(build_store(&cli)?);
    let alerter = StderrAlerter;

    match cli.command {
        Command::Balances => run_balances(&resolver, &alerter).await,
        Command::Items => run_items(&resolver, &alerter).await,
        Command::AddItem { name, price, image, priority } => {
            let draft = ItemDraft { name, price, image, priority };
            run_add_item(&resolver, &alerter, draft).await
        }
    }
}

async fn run_balances(resolver: &SessionResolver, alerter: &dyn Alerter) -> Result<(), CliError> {
    let mut state = BalancesState::default();
    load_balances(&mut state, resolver, alerter).await;
    if state.phase == LoadPhase::Failed {
        return Err(CliError::ViewFailed("loading balances"));
    }
    for line in render::balances(&state) {
        println!("{line}");
    }
    Ok(())
}

async fn run_items(resolver: &SessionResolver, alerter: &dyn Alerter) -> Result<(), CliError> {
    let mut state = ItemsState::default();
    load_items(&mut state, resolver, alerter).await;
    if state.phase == LoadPhase::Failed {
        return Err(CliError::ViewFailed("loading items"));
    }
    for line in render::items(&state) {
        println!("{line}");
    }
    Ok(())
}

async fn run_add_item(resolver: &SessionResolver, alerter: &dyn Alerter, draft: ItemDraft) -> Result<(), CliError> {
    let mut state = ItemsState::default();
    state.toggle_form();
    state.draft = draft;
    submit_draft(&mut state, resolver, alerter).await;
    if state.form_open() {
        return Err(CliError::ViewFailed("adding item"));
    }
    if let Some(item) = state.items.last() {
        println!("added: {}", item.name);
    }
    Ok(())
}
