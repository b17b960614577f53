//! RSS feed text source

use super::{TextItem, TextOrigin, TextSource};
use anyhow::Context;
use async_trait::async_trait;
use chrono::Utc;
use quick_xml::events::Event;
use quick_xml::Reader;
use reqwest::Client;

/// Headlines from one RSS 2.0 feed, filtered by keyword
pub struct RssSource {
    url: String,
    client: Client,
    /// Items examined per feed, before keyword filtering
    limit: usize,
    keywords: Vec<String>,
}

impl RssSource {
    pub fn new(
        url: impl Into<String>,
        client: Client,
        limit: usize,
        keywords: Vec<String>,
    ) -> Self {
        Self {
            url: url.into(),
            client,
            limit,
            keywords: keywords.into_iter().map(|k| k.to_lowercase()).collect(),
        }
    }
}

#[async_trait]
impl TextSource for RssSource {
    async fn fetch(&self) -> anyhow::Result<Vec<TextItem>> {
        tracing::info!(url = %self.url, "Fetching RSS feed");

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .with_context(|| format!("RSS request to {} failed", self.url))?
            .error_for_status()?;

        let body = response.text().await?;
        parse_feed(&body, self.limit, &self.keywords)
    }

    fn name(&self) -> &str {
        &self.url
    }
}

#[derive(Debug, Default)]
struct RawItem {
    title: Option<String>,
    description: String,
    pub_date: String,
}

#[derive(Debug, Clone, Copy)]
enum Field {
    Title,
    Description,
    PubDate,
}

/// Parse an RSS document into text items.
///
/// Only the first `limit` `<item>`s are examined; of those, items without a
/// title or not mentioning any keyword are dropped.
pub fn parse_feed(xml: &str, limit: usize, keywords: &[String]) -> anyhow::Result<Vec<TextItem>> {
    let raw = read_items(xml)?;
    let collected_at = Utc::now();

    let items = raw
        .into_iter()
        .take(limit)
        .filter_map(|item| {
            let title = item.title?;
            let haystack = format!("{} {}", title, item.description).to_lowercase();
            if !keywords.iter().any(|k| haystack.contains(k.as_str())) {
                return None;
            }
            Some(TextItem {
                text: title,
                description: item.description,
                origin: TextOrigin::RssFeed,
                published: item.pub_date,
                collected_at,
            })
        })
        .collect();

    Ok(items)
}

fn read_items(xml: &str) -> anyhow::Result<Vec<RawItem>> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut items = Vec::new();
    let mut current: Option<RawItem> = None;
    let mut field: Option<Field> = None;

    loop {
        match reader.read_event().context("Malformed RSS document")? {
            Event::Start(e) => match e.name().as_ref() {
                b"item" => current = Some(RawItem::default()),
                b"title" => field = Some(Field::Title),
                b"description" => field = Some(Field::Description),
                b"pubDate" => field = Some(Field::PubDate),
                _ => {}
            },
            Event::Text(t) => {
                let text = t
                    .unescape()
                    .map(|c| c.into_owned())
                    .unwrap_or_else(|_| String::from_utf8_lossy(&t).into_owned());
                append(&mut current, field, &text);
            }
            Event::CData(c) => {
                let text = String::from_utf8_lossy(&c.into_inner()).into_owned();
                append(&mut current, field, &text);
            }
            Event::End(e) => match e.name().as_ref() {
                b"item" => {
                    if let Some(item) = current.take() {
                        items.push(item);
                    }
                }
                b"title" | b"description" | b"pubDate" => field = None,
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(items)
}

fn append(current: &mut Option<RawItem>, field: Option<Field>, text: &str) {
    let (Some(item), Some(field)) = (current.as_mut(), field) else {
        return;
    };
    match field {
        Field::Title => item.title.get_or_insert_with(String::new).push_str(text),
        Field::Description => item.description.push_str(text),
        Field::PubDate => item.pub_date.push_str(text),
    }
}
