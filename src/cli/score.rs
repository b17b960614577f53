//! Score command implementation

use super::read_lines;
use crate::sentiment::{ScoredText, SentimentAnalyzer};
use clap::Args;

#[derive(Args, Debug)]
pub struct ScoreArgs {
    /// Texts to score; read from stdin when omitted
    pub texts: Vec<String>,

    /// Output JSON
    #[arg(long)]
    pub json: bool,

    /// Score on the rayon pool
    #[arg(long)]
    pub parallel: bool,
}

impl ScoreArgs {
    pub async fn execute(&self) -> anyhow::Result<()> {
        let texts = if self.texts.is_empty() {
            read_lines(std::io::stdin().lock())?
        } else {
            self.texts.clone()
        };

        let analyzer = SentimentAnalyzer::new();
        let scored = if self.parallel {
            analyzer.score_batch_parallel(&texts)
        } else {
            analyzer.score_batch(&texts)
        };

        if self.json {
            println!("{}", serde_json::to_string_pretty(&scored)?);
        } else {
            for s in &scored {
                println!("{}", format_line(s));
            }
        }
        Ok(())
    }
}

fn format_line(scored: &ScoredText) -> String {
    let record = &scored.record;
    let mut line = format!(
        "{:+.4}  {:<8}  {:<6}  {:<16}  {}",
        record.polarity,
        record.label.as_str(),
        record.confidence.as_str(),
        record.method.as_str(),
        scored.original_text
    );
    if !record.crypto_terms.is_empty() {
        line.push_str(&format!("  [{}]", record.terms_joined()));
    }
    line
}
