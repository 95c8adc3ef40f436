//! Open Library search client.
//!
//! Wraps the public `search.json` endpoint and normalizes its loosely-typed
//! documents into [`BookSummary`] values the UI can render directly. Every
//! upstream field is optional on the wire; fallbacks are applied here so the
//! rest of the app never has to reason about missing data.

use anyhow::{Context, Result};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::Deserialize;
use tracing::debug;

use crate::config::PlaceholderStyle;

const SEARCH_ENDPOINT: &str = "https://openlibrary.org/search.json";
const CATALOG_BASE: &str = "https://openlibrary.org";
const COVERS_BASE: &str = "https://covers.openlibrary.org/b/id";
const PLAIN_PLACEHOLDER: &str = "https://dummyimage.com/260x200/cccccc/555555.png";

/// Characters kept verbatim when templating a title into a placeholder URL.
/// Matches the unreserved set of `encodeURIComponent`.
const TITLE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Normalized, display-ready projection of one search result.
#[derive(Debug, Clone, PartialEq)]
pub struct BookSummary {
    pub title: String,
    pub authors: Vec<String>,
    pub first_publish_year: Option<i32>,
    pub subjects: Vec<String>,
    pub cover_id: Option<u64>,
    pub detail_key: String,
}

impl BookSummary {
    /// Comma-joined author list, or the unknown-author label.
    pub fn author_label(&self) -> String {
        if self.authors.is_empty() {
            "Unknown author".to_string()
        } else {
            self.authors.join(", ")
        }
    }

    pub fn year_label(&self) -> String {
        self.first_publish_year
            .map(|year| year.to_string())
            .unwrap_or_else(|| "N/A".to_string())
    }

    pub fn subject_label(&self) -> String {
        if self.subjects.is_empty() {
            "N/A".to_string()
        } else {
            self.subjects.join(", ")
        }
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    docs: Vec<SearchDoc>,
}

#[derive(Debug, Deserialize)]
struct SearchDoc {
    title: Option<String>,
    author_name: Option<Vec<String>>,
    first_publish_year: Option<i32>,
    subject: Option<Vec<String>>,
    cover_i: Option<u64>,
    key: Option<String>,
}

/// Run one keyword search and return the normalized result set.
///
/// Any transport problem (connection failure, non-2xx status, body that is
/// not the expected JSON shape) surfaces as a single `anyhow` error; the
/// caller decides how to report it.
pub async fn search_books(client: &reqwest::Client, query: &str) -> Result<Vec<BookSummary>> {
    let response = client
        .get(SEARCH_ENDPOINT)
        .query(&[("q", query)])
        .send()
        .await
        .context("search request failed")?
        .error_for_status()
        .context("search request rejected by server")?;

    let body: SearchResponse = response
        .json()
        .await
        .context("malformed search response")?;

    Ok(normalize(body.docs))
}

/// Fetch a cover (or placeholder) image as raw bytes.
pub async fn fetch_cover(client: &reqwest::Client, url: &str) -> Result<Vec<u8>> {
    let response = client
        .get(url)
        .send()
        .await
        .context("cover request failed")?
        .error_for_status()
        .context("cover request rejected by server")?;
    let bytes = response.bytes().await.context("cover body truncated")?;
    Ok(bytes.to_vec())
}

fn normalize(docs: Vec<SearchDoc>) -> Vec<BookSummary> {
    docs.into_iter()
        .filter_map(|doc| {
            // Without a key there is no catalog page to link to; such docs
            // are rare and dropped rather than rendered half-broken.
            let Some(detail_key) = doc.key else {
                debug!(title = ?doc.title, "Dropping search doc without a key");
                return None;
            };
            Some(BookSummary {
                title: doc.title.unwrap_or_default(),
                authors: doc.author_name.unwrap_or_default(),
                first_publish_year: doc.first_publish_year,
                subjects: doc.subject.unwrap_or_default(),
                cover_id: doc.cover_i,
                detail_key,
            })
        })
        .collect()
}

/// External catalog page for a book, built from its upstream key.
pub fn detail_url(detail_key: &str) -> String {
    format!("{CATALOG_BASE}{detail_key}")
}

/// Resolve the image URL for a result card: the real cover when one exists,
/// otherwise a placeholder chosen by the configured style.
pub fn cover_image_url(style: PlaceholderStyle, cover_id: Option<u64>, title: &str) -> String {
    match cover_id {
        Some(id) => format!("{COVERS_BASE}/{id}-M.jpg"),
        None => match style {
            PlaceholderStyle::Plain => PLAIN_PLACEHOLDER.to_string(),
            PlaceholderStyle::TitledText => {
                let encoded = utf8_percent_encode(title.trim(), TITLE_SET)
                    .to_string()
                    .replace("%20", "+");
                format!("{PLAIN_PLACEHOLDER}&text={encoded}")
            }
        },
    }
}
