//! Roster CLI
//!
//! Manage a fantasy-football lineup and bench from the terminal. The roster
//! is saved after every change.

#[cfg(feature = "cli")]
use anyhow::{bail, Context, Result};
#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};
#[cfg(feature = "cli")]
use env_logger::Env;
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
use roster_cli::{
    describe_outcome, open_local_session, open_session, render_market, render_roster,
    CatalogCache, HttpCatalog,
};
#[cfg(feature = "cli")]
use roster_core::{
    Action, Catalog, CatalogSource, Formation, MarketFilter, Outcome, Position, RosterConfig,
    StaticCatalog,
};

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "roster")]
#[command(about = "Fantasy football lineup and bench manager", long_about = None)]
struct Cli {
    /// JSON config file (defaults to $ROSTER_CONFIG_PATH, then built-in values)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding the roster save and catalog cache
    #[arg(long, global = true)]
    save_dir: Option<PathBuf>,

    /// Never touch the network; use the built-in catalog
    #[arg(long, global = true, default_value = "false")]
    offline: bool,

    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Print the lineup, bench and totals
    Show,

    /// Load the marketplace catalog and cache it locally
    Fetch,

    /// Browse the catalog, best rating first
    Market {
        /// Position code (GOL, LAT, ZAG, VOL, MEI, ATA)
        #[arg(long)]
        position: Option<Position>,

        /// Club id
        #[arg(long)]
        club: Option<u32>,

        /// Name search, case-insensitive
        #[arg(long)]
        search: Option<String>,

        #[arg(long, default_value = "20")]
        limit: usize,
    },

    /// Add a catalog player to the lineup (first fitting slot) or bench
    Add {
        id: u32,

        #[arg(long, default_value = "false")]
        bench: bool,
    },

    /// Switch formation (4-3-3, 4-4-2, 3-5-2); players stay where they are
    Formation { name: String },

    /// Exchange a lineup slot with a bench player
    Swap { slot: usize, bench_index: usize },

    /// Empty a lineup slot
    Remove { slot: usize },

    /// Drop a bench player
    RemoveBench { index: usize },

    /// Clear lineup, bench and the saved roster (the next run starts fresh)
    Reset,
}

#[cfg(feature = "cli")]
fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = resolve_config(&cli)?;

    match cli.command {
        Commands::Show => {
            let session = open_local_session(&config, cli.offline)?;
            print!("{}", render_roster(session.state()));
        }

        Commands::Fetch => {
            // Offline keeps the built-in squad for a fresh roster; a fetched
            // catalog seeds the best-rated squad instead.
            let mut session = if cli.offline {
                open_local_session(&config, true)?
            } else {
                open_session(&config, Catalog::default())
            };
            let source: Box<dyn CatalogSource> = if cli.offline {
                Box::new(StaticCatalog)
            } else {
                Box::new(HttpCatalog::from_config(&config))
            };
            session.load_catalog(source.as_ref());

            let state = session.state();
            if let Some(error) = &state.error {
                bail!("Catalog load failed: {} (try --offline)", error);
            }

            let catalog = Catalog { players: state.catalog.clone(), clubs: state.clubs.clone() };
            CatalogCache::in_dir(&config.save_dir).write(&catalog)?;

            println!("Loaded {} players from {} clubs", catalog.players.len(), catalog.clubs.len());
            print!("{}", render_roster(state));
        }

        Commands::Market { position, club, search, limit } => {
            let session = open_local_session(&config, cli.offline)?;
            let filter = MarketFilter { position, club_id: club, search };
            let players = filter.apply(&session.state().catalog);
            print!("{}", render_market(session.state(), &players, limit));
        }

        Commands::Add { id, bench } => {
            let mut session = open_local_session(&config, cli.offline)?;
            let Some(outcome) = session.add_from_catalog(id, bench) else {
                bail!("No player with id {} in the catalog", id);
            };
            report(&outcome)?;
            print!("{}", render_roster(session.state()));
        }

        Commands::Formation { name } => {
            let mut session = open_local_session(&config, cli.offline)?;
            if let Outcome::Ignored = session.dispatch(Action::SetFormationNamed(name.clone())) {
                let known: Vec<&str> = Formation::ALL.iter().map(|f| f.name()).collect();
                bail!("Unknown formation '{}'; expected one of {}", name, known.join(", "));
            }
            print!("{}", render_roster(session.state()));
        }

        Commands::Swap { slot, bench_index } => {
            let mut session = open_local_session(&config, cli.offline)?;
            report(&session.swap(slot, bench_index))?;
            print!("{}", render_roster(session.state()));
        }

        Commands::Remove { slot } => {
            let mut session = open_local_session(&config, cli.offline)?;
            report(&session.dispatch(Action::RemoveFromLineup(slot)))?;
            print!("{}", render_roster(session.state()));
        }

        Commands::RemoveBench { index } => {
            let mut session = open_local_session(&config, cli.offline)?;
            report(&session.dispatch(Action::RemoveFromBench(index)))?;
            print!("{}", render_roster(session.state()));
        }

        Commands::Reset => {
            let mut session = open_local_session(&config, cli.offline)?;
            session.reset();
            println!("Roster cleared; the next start begins from a fresh squad");
        }
    }

    Ok(())
}

/// Config file from `--config`, else `$ROSTER_CONFIG_PATH`, else defaults;
/// `--save-dir` wins over all of them.
#[cfg(feature = "cli")]
fn resolve_config(cli: &Cli) -> Result<RosterConfig> {
    let mut config = match &cli.config {
        Some(path) => RosterConfig::load(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => RosterConfig::from_env().context("Failed to load config from environment")?.unwrap_or_default(),
    };

    if let Some(dir) = &cli.save_dir {
        config.save_dir = dir.clone();
    }

    log::debug!("Using save file {}", config.save_path().display());
    Ok(config)
}

/// Refusals become a non-zero exit; no-ops are only reported.
#[cfg(feature = "cli")]
fn report(outcome: &Outcome) -> Result<()> {
    match outcome {
        Outcome::Rejected(_) | Outcome::Malformed(_) => bail!("{}", describe_outcome(outcome)),
        _ => {
            println!("{}", describe_outcome(outcome));
            Ok(())
        }
    }
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("roster CLI is not available. Enable the 'cli' feature to use it.");
    std::process::exit(1);
}
