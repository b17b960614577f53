//! Reports command implementation: browse and fetch stored reports

use crate::config::Config;
use crate::storage::{LocalStore, ObjectStore, S3Store, StoredObject};
use clap::{Args, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Args, Debug)]
pub struct ReportsArgs {
    #[command(subcommand)]
    pub command: ReportsCommand,

    /// Use a local store rooted at this directory instead of S3
    #[arg(long, global = true)]
    pub local: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum ReportsCommand {
    /// List stored reports under the configured prefix
    List {
        /// Maximum number of reports
        #[arg(long, default_value_t = 20)]
        max: usize,

        /// Output JSON
        #[arg(long)]
        json: bool,
    },
    /// Download one report by key
    Fetch {
        key: String,

        /// Destination; defaults to the report directory plus the key's file name
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}

impl ReportsArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let store: Box<dyn ObjectStore> = match &self.local {
            Some(root) => Box::new(LocalStore::new(root, config.storage.prefix.clone())),
            None => Box::new(S3Store::from_config(&config.storage).await),
        };

        match &self.command {
            ReportsCommand::List { max, json } => {
                let objects = store.list(*max).await?;
                if *json {
                    println!("{}", serde_json::to_string_pretty(&objects)?);
                } else if objects.is_empty() {
                    println!("No reports found in {}", store.name());
                } else {
                    for object in &objects {
                        println!("{}", format_object(object));
                    }
                }
            }
            ReportsCommand::Fetch { key, out } => {
                let dest = match out {
                    Some(path) => path.clone(),
                    None => default_destination(&config.report.output_dir, key),
                };
                let written = store.download(key, &dest).await?;
                println!("Fetched {} ({} bytes) to {}", key, written, dest.display());
            }
        }
        Ok(())
    }
}

fn format_object(object: &StoredObject) -> String {
    let modified = object
        .last_modified
        .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| "-".to_string());
    format!("{:>19}  {:>10}  {}", modified, object.size_bytes, object.key)
}

fn default_destination(dir: &Path, key: &str) -> PathBuf {
    let name = key.rsplit('/').next().unwrap_or(key);
    dir.join(name)
}
