//! Summary command implementation

use super::read_lines;
use crate::sentiment::{extract_price_mentions, BatchSummary, ScoredText, SentimentAnalyzer};
use clap::Args;
use serde::Serialize;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

/// Headlines used when no file is given
const SAMPLE_TEXTS: &[&str] = &[
    "Bitcoin to the moon! Diamond hands HODL 🚀",
    "Massive rug pull wipes out small caps, traders rekt",
    "BTC breakout above resistance as institutional adoption grows",
    "Whale dump triggers liquidations across exchanges 📉",
    "Bitcoin trades sideways near $64,000 ahead of the Fed decision",
    "Analysts see bullish accumulation despite FUD",
    "Exchange hack sparks panic selling",
    "Lightning network usage hits all time high",
];

/// Dollar amounts quoted across a text set
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct PriceMentions {
    /// Texts quoting at least one amount
    pub texts: usize,
    pub mentions: usize,
    pub highest: Option<f64>,
}

impl PriceMentions {
    pub fn from_texts<S: AsRef<str>>(texts: &[S]) -> Self {
        let mut out = Self::default();
        for text in texts {
            let prices = extract_price_mentions(text.as_ref());
            if prices.is_empty() {
                continue;
            }
            out.texts += 1;
            out.mentions += prices.len();
            for price in prices {
                out.highest = Some(out.highest.map_or(price, |h| h.max(price)));
            }
        }
        out
    }
}

#[derive(Serialize)]
struct SummaryOutput<'a> {
    #[serde(flatten)]
    batch: &'a BatchSummary,
    price_mentions: PriceMentions,
}

#[derive(Args, Debug)]
pub struct SummaryArgs {
    /// File with one text per line; a built-in sample set is used when omitted
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Output JSON
    #[arg(long)]
    pub json: bool,
}

impl SummaryArgs {
    pub async fn execute(&self) -> anyhow::Result<()> {
        let texts = match &self.file {
            Some(path) => read_lines(BufReader::new(File::open(path)?))?,
            None => SAMPLE_TEXTS.iter().map(|s| s.to_string()).collect(),
        };

        let scored = SentimentAnalyzer::new().score_batch(&texts);
        let summary = BatchSummary::from_records(&scored);
        let prices = PriceMentions::from_texts(&texts);

        if self.json {
            let output = SummaryOutput {
                batch: &summary,
                price_mentions: prices,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
            return Ok(());
        }

        println!("Texts:          {}", summary.total);
        println!("Mean polarity:  {:+.3}", summary.mean_polarity);
        println!(
            "Distribution:   {} positive / {} negative / {} neutral",
            summary.positive, summary.negative, summary.neutral
        );
        println!(
            "Crypto lexicon: {} texts ({:.1}%), {} term matches",
            summary.enhanced,
            summary.enhanced_pct(),
            summary.term_matches
        );
        println!("Fallbacks:      {}", summary.fallbacks);
        match prices.highest {
            Some(highest) => println!(
                "Price mentions: {} in {} texts (highest ${:.2})",
                prices.mentions, prices.texts, highest
            ),
            None => println!("Price mentions: none"),
        }

        if let Some((most_positive, most_negative)) = extremes(&scored) {
            println!(
                "Most positive:  {:+.3}  {}",
                most_positive.record.polarity, most_positive.original_text
            );
            println!(
                "Most negative:  {:+.3}  {}",
                most_negative.record.polarity, most_negative.original_text
            );
        }
        Ok(())
    }
}

/// Highest and lowest polarity texts
fn extremes(scored: &[ScoredText]) -> Option<(&ScoredText, &ScoredText)> {
    let max = scored
        .iter()
        .max_by(|a, b| a.record.polarity.total_cmp(&b.record.polarity))?;
    let min = scored
        .iter()
        .min_by(|a, b| a.record.polarity.total_cmp(&b.record.polarity))?;
    Some((max, min))
}
