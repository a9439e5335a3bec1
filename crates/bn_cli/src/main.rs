use anyhow::Context;
use bn_core::{Corpus, Interaction};
use bn_recommend::{recommend, recommend_for_interactions, PolicyConfig, RecommendationParams};
use bn_web::{create_app, AppState};
use clap::Parser;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about = "Balanced news recommendations", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args, Debug, Clone)]
struct ParamArgs {
    /// Slots reserved for the leaning of the closest article
    #[arg(long, default_value_t = 2)]
    primary_weight: usize,
    #[arg(long, default_value_t = 5)]
    top_n: usize,
    /// Initial half-width of the publication window, in days
    #[arg(long, default_value_t = 5)]
    base_days_window: u32,
    #[arg(long, default_value_t = 10)]
    max_days_window: u32,
    #[arg(long, default_value_t = 2)]
    max_per_outlet: usize,
}

impl From<&ParamArgs> for RecommendationParams {
    fn from(args: &ParamArgs) -> Self {
        Self {
            primary_weight: args.primary_weight,
            top_n: args.top_n,
            base_days_window: args.base_days_window,
            max_days_window: args.max_days_window,
            max_per_outlet: args.max_per_outlet,
        }
    }
}

#[derive(clap::Args, Debug, Clone)]
struct PolicyArgs {
    /// Minimum read time for a read to seed recommendations
    #[arg(long, default_value_t = 120)]
    read_time_threshold: u32,
    /// Interaction lookback for users without earlier recommendations
    #[arg(long, default_value_t = 24)]
    lookback_hours: i64,
}

impl From<&PolicyArgs> for PolicyConfig {
    fn from(args: &PolicyArgs) -> Self {
        Self {
            read_time_threshold_seconds: args.read_time_threshold,
            default_lookback_hours: args.lookback_hours,
        }
    }
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Recommend articles for one source article
    Recommend {
        /// Corpus file (JSON array or JSON Lines)
        #[arg(long)]
        corpus: PathBuf,
        #[arg(long)]
        article: i64,
        #[command(flatten)]
        params: ParamArgs,
    },
    /// Recommend from a JSON list of interactions
    Batch {
        #[arg(long)]
        corpus: PathBuf,
        #[arg(long)]
        interactions: PathBuf,
        #[command(flatten)]
        params: ParamArgs,
        #[command(flatten)]
        policy: PolicyArgs,
    },
    /// Serve the HTTP API
    Serve {
        #[arg(long)]
        corpus: PathBuf,
        #[arg(long, default_value = "0.0.0.0:5002")]
        addr: String,
        #[command(flatten)]
        params: ParamArgs,
        #[command(flatten)]
        policy: PolicyArgs,
    },
}

fn open_corpus(path: &Path) -> anyhow::Result<Corpus> {
    let (corpus, report) = bn_storage::load_corpus(path)
        .with_context(|| format!("failed to load corpus from {}", path.display()))?;
    info!("📰 Corpus ready: {} articles ({} rows skipped)", report.loaded, report.skipped);
    Ok(corpus)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Recommend { corpus, article, params } => {
            let corpus = open_corpus(&corpus)?;
            let result = recommend(&corpus, article, &RecommendationParams::from(&params))?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Commands::Batch { corpus, interactions, params, policy } => {
            let corpus = open_corpus(&corpus)?;
            let raw = std::fs::read_to_string(&interactions)
                .with_context(|| format!("failed to read {}", interactions.display()))?;
            let interactions: Vec<Interaction> = serde_json::from_str(&raw)?;
            let records = recommend_for_interactions(
                &corpus,
                &interactions,
                &RecommendationParams::from(&params),
                &PolicyConfig::from(&policy),
            )?;
            println!("{}", serde_json::to_string_pretty(&records)?);
        }
        Commands::Serve { corpus, addr, params, policy } => {
            let corpus = Arc::new(open_corpus(&corpus)?);
            let params = RecommendationParams::from(&params);
            params.validate()?;
            let app = create_app(AppState::new(corpus, params, PolicyConfig::from(&policy)));
            let listener = tokio::net::TcpListener::bind(&addr)
                .await
                .with_context(|| format!("failed to bind {}", addr))?;
            info!("🚀 Listening on {}", addr);
            axum::serve(listener, app).await?;
        }
    }

    Ok(())
}
