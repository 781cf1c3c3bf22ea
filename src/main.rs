use anyhow::{anyhow, bail};
use clap::{Parser, Subcommand};
use marketrank::notify::{notify_subscribers, LogNotifier, Notification, Subscriber};
use marketrank::{
    Catalog, Error, ExplainedProduct, FileSnapshotStore, ProductId, RankingConfig, RankingStats,
    TopProductsTracker,
};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

/// Product ranking and search for marketplace catalogs
#[derive(Parser, Debug)]
#[command(name = "marketrank")]
#[command(about = "Rank and search marketplace products", long_about = None)]
struct Args {
    /// Directory holding the top products snapshot
    #[arg(short, long, default_value = "./data", global = true)]
    data_dir: PathBuf,

    /// Ranking configuration (JSON: top_n, weights)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log level
    #[arg(long, default_value = "info", global = true)]
    log_level: String,

    /// Print per-component score contributions
    #[arg(long, global = true)]
    explain: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Recompute the top products and notify subscribers on change
    Top {
        /// Product catalog (JSON array)
        #[arg(long)]
        catalog: PathBuf,

        /// Subscribers to notify (JSON array of {email, subscribed})
        #[arg(long)]
        subscribers: Option<PathBuf>,

        /// Override the configured list size
        #[arg(long)]
        top_n: Option<usize>,
    },
    /// Search verified products by name or description
    Search {
        #[arg(long)]
        catalog: PathBuf,

        query: String,
    },
    /// Score a chosen set of products against each other
    Compare {
        #[arg(long)]
        catalog: PathBuf,

        /// Comma separated product ids
        #[arg(long, value_delimiter = ',')]
        ids: Vec<String>,
    },
    /// Show the stored top products snapshot
    Snapshot,
}

#[derive(Serialize)]
struct TopResponse<T: Serialize> {
    changed: bool,
    result: Vec<T>,
}

#[derive(Serialize)]
struct ExplainResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    changed: Option<bool>,
    result: Vec<ExplainedProduct>,
    stats: RankingStats,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    // stdout carries JSON results, logs go to stderr
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let mut config = RankingConfig::load_or_default(args.config.as_deref())?;
    let explain = args.explain;

    match args.command {
        Command::Top { catalog, subscribers, top_n } => {
            if let Some(top_n) = top_n {
                config.top_n = top_n;
                config.validate()?;
            }
            run_top(&args.data_dir, &config, &catalog, subscribers, explain)
        }
        Command::Search { catalog, query } => {
            let catalog = Catalog::load_json(&catalog)?;
            let matches = catalog.search(&query);
            info!("{} products match {:?}", matches.len(), query);
            print_json(&matches)
        }
        Command::Compare { catalog, ids } => {
            let catalog = Catalog::load_json(&catalog)?;
            let ids: Vec<ProductId> = ids.iter().map(|id| ProductId::parse(id)).collect();
            if ids.is_empty() {
                bail!("Please provide product ids");
            }

            let products = catalog.get_many(&ids);
            let ranker = config.ranker()?;
            if explain {
                let explained = ExplainedProduct::from_list(ranker.explain(&products).map_err(no_products)?, true);
                let stats = RankingStats::compute(&explained, products.len());
                print_json(&ExplainResponse { changed: None, result: explained, stats })
            } else {
                print_json(&ranker.compare(&products).map_err(no_products)?)
            }
        }
        Command::Snapshot => {
            let store = FileSnapshotStore::new(&args.data_dir)?;
            match store.describe()? {
                Some(description) => print_json(&description),
                None => bail!("No snapshot stored in {:?}", args.data_dir),
            }
        }
    }
}

fn run_top(
    data_dir: &Path,
    config: &RankingConfig,
    catalog: &Path,
    subscribers: Option<PathBuf>,
    explain: bool,
) -> anyhow::Result<()> {
    let catalog = Catalog::load_json(catalog)?;
    let store = FileSnapshotStore::new(data_dir)?;
    let tracker = TopProductsTracker::new(config.ranker()?, store);

    info!("Ranking {} verified of {} products", catalog.verified().len(), catalog.count());

    let ranking = match tracker.refresh_catalog(&catalog) {
        Ok(ranking) => ranking,
        Err(Error::SnapshotNotReplaced { ranking, reason }) => {
            // serve the ranking, but the change must not pass silently
            print_json(&TopResponse { changed: true, result: ranking })?;
            bail!("Top products changed but the snapshot was not replaced: {}", reason);
        }
        Err(e) => return Err(no_products(e)),
    };

    if ranking.changed {
        match subscribers {
            Some(path) => {
                let subscribers = Subscriber::load_json(&path)?;
                let report = notify_subscribers(
                    &LogNotifier,
                    &subscribers,
                    &Notification::top_products_changed(),
                );
                info!(
                    "Notified {} subscribers ({} skipped, {} failed)",
                    report.sent,
                    report.skipped,
                    report.failed.len()
                );
            }
            None => warn!("Top products changed but no subscriber list was given"),
        }
    }

    if explain {
        let verified = catalog.verified();
        let mut explained = tracker.ranker().explain(&verified)?;
        explained.truncate(config.top_n);
        let explained = ExplainedProduct::from_list(explained, false);
        let stats = RankingStats::compute(&explained, verified.len());
        return print_json(&ExplainResponse {
            changed: Some(ranking.changed),
            result: explained,
            stats,
        });
    }

    print_json(&TopResponse { changed: ranking.changed, result: ranking.products })
}

fn no_products(e: Error) -> anyhow::Error {
    match e {
        Error::NoCandidates => anyhow!("No products found"),
        other => other.into(),
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
