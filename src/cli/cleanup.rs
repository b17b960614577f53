//! Cleanup command implementation

use crate::config::Config;
use crate::report::cleanup_old_reports;
use clap::Args;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Args, Debug)]
pub struct CleanupArgs {
    /// Report directory; defaults to `report.output_dir`
    #[arg(long)]
    pub dir: Option<PathBuf>,

    /// Retention in days; defaults to `report.retention_days`
    #[arg(long)]
    pub days: Option<u64>,
}

impl CleanupArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let dir = self.dir.as_ref().unwrap_or(&config.report.output_dir);
        let days = self.days.unwrap_or(config.report.retention_days);

        let removed = cleanup_old_reports(dir, Duration::from_secs(days * 86_400))?;
        println!("Removed {} report(s) older than {} days from {}", removed, days, dir.display());
        Ok(())
    }
}
