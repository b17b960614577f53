use clap::Parser;
use crypto_sentinel::cli::{Cli, Commands};
use crypto_sentinel::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(&cli.config).unwrap_or_else(|e| {
        eprintln!("Warning: Could not load config from {}: {}", cli.config, e);
        eprintln!("Using default configuration");
        Config::default()
    });

    // Initialize telemetry
    let _telemetry = crypto_sentinel::telemetry::init_telemetry(&config.telemetry)?;

    match cli.command {
        Commands::Run(args) => {
            tracing::info!("Starting ETL run");
            args.execute(&config).await?;
        }
        Commands::Score(args) => {
            args.execute().await?;
        }
        Commands::Summary(args) => {
            args.execute().await?;
        }
        Commands::Config => {
            println!("Current configuration:");
            println!(
                "  Price: {} ({}/{})",
                config.price.base_url, config.price.coin_id, config.price.vs_currency
            );
            println!("  RSS sources: {}", config.news.rss_sources.len());
            for source in &config.news.rss_sources {
                println!("    - {}", source);
            }
            println!(
                "  News fallback: {} (below {} items)",
                config.news.news_api_url, config.news.min_items_before_fallback
            );
            println!("  Parallel scoring: {}", config.sentiment.parallel);
            println!(
                "  Reports: {} (kept {} days)",
                config.report.output_dir.display(),
                config.report.retention_days
            );
            if config.storage.enabled {
                println!(
                    "  Storage: s3://{}/{} ({})",
                    config.storage.bucket, config.storage.prefix, config.storage.region
                );
            } else {
                println!("  Storage: disabled");
            }
        }
        Commands::Cleanup(args) => {
            args.execute(&config).await?;
        }
        Commands::Reports(args) => {
            args.execute(&config).await?;
        }
    }

    Ok(())
}
