//! Run command implementation

use crate::config::Config;
use crate::pipeline::EtlPipeline;
use clap::Args;

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Keep the report local even if storage is enabled
    #[arg(long)]
    pub no_upload: bool,

    /// Print the run summary as JSON instead of the text digest
    #[arg(long)]
    pub json: bool,
}

impl RunArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let pipeline = EtlPipeline::from_config(config, !self.no_upload).await?;
        let summary = pipeline.run().await?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&summary)?);
        } else {
            print!("{}", summary.render_text());
        }

        summary.validate()?;
        Ok(())
    }
}
