use serde::Deserialize;
use std::time::Duration;
use tracing::warn;

use crate::models::book::{BookRecord, UNKNOWN_FIELD, UNTITLED};

/// How many documents to request per search, so there is enough data for
/// pagination on our side.
pub const RESULT_LIMIT: u32 = 50;
/// Total budget for the outbound call; expiry counts as any other failure.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

const COVER_URL_BASE: &str = "https://covers.openlibrary.org/b/id";

#[derive(Debug, Deserialize)]
struct SearchBody {
    #[serde(default)]
    docs: Vec<SearchDoc>,
}

/// One document from the OpenLibrary search response. Every field may be
/// absent; mapping must not fail on any of them.
#[derive(Debug, Default, Deserialize)]
pub struct SearchDoc {
    pub title: Option<String>,
    pub author_name: Option<Vec<String>>,
    pub publisher: Option<Vec<String>>,
    pub first_publish_year: Option<i32>,
    pub cover_i: Option<i64>,
}

pub fn doc_to_record(doc: SearchDoc) -> BookRecord {
    let author = match doc.author_name {
        Some(names) if !names.is_empty() => names.join(", "),
        _ => UNKNOWN_FIELD.to_string(),
    };

    let publisher = doc
        .publisher
        .and_then(|publishers| publishers.into_iter().next())
        .unwrap_or_else(|| UNKNOWN_FIELD.to_string());

    BookRecord {
        title: doc.title.unwrap_or_else(|| UNTITLED.to_string()),
        author,
        publisher,
        year: doc.first_publish_year,
        image: doc
            .cover_i
            .map(|cover_id| format!("{}/{}-M.jpg", COVER_URL_BASE, cover_id)),
    }
}

/// Best-effort enrichment: any failure of the outbound call collapses to an
/// empty contribution. The reason only reaches the log, never the caller.
pub async fn search_external(
    client: &reqwest::Client,
    base_url: &str,
    query: &str,
) -> Vec<BookRecord> {
    match fetch_documents(client, base_url, query).await {
        Ok(records) => records,
        Err(e) => {
            warn!("External search for '{}' failed, degrading to local results: {}", query, e);
            Vec::new()
        }
    }
}

async fn fetch_documents(
    client: &reqwest::Client,
    base_url: &str,
    query: &str,
) -> Result<Vec<BookRecord>, reqwest::Error> {
    let limit = RESULT_LIMIT.to_string();
    let response = client
        .get(base_url)
        .query(&[("q", query), ("limit", limit.as_str())])
        .send()
        .await?
        .error_for_status()?;

    let body: SearchBody = response.json().await?;
    Ok(body.docs.into_iter().map(doc_to_record).collect())
}
