use std::cmp::Ordering;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{anyhow, Context, Result};
use grimm_core::model::{SearchRequest, SearchResponse, SearchResult, Tale};
use grimm_core::{parse, scan};
use reqwest::Client;
use tokio::sync::{Mutex, OnceCell};

const FETCH_TIMEOUT: Duration = Duration::from_secs(12);
const USER_AGENT: &str = "grimm-search/0.1";

struct TaleEntry {
    meta: Tale,
    content: Mutex<Option<Arc<str>>>,
}

/// Full-text search over a remote fairy-tale corpus.
///
/// The corpus is an HTML index page listing .txt documents. The index is
/// fetched and parsed at most once per process; each tale body is fetched
/// lazily on first access and cached in memory for the process lifetime.
pub struct SearchService {
    client: Client,
    base_url: String,
    index: OnceCell<Vec<TaleEntry>>,
}

impl SearchService {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .redirect(reqwest::redirect::Policy::limited(5))
            .timeout(FETCH_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            index: OnceCell::new(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn is_initialized(&self) -> bool {
        self.index.initialized()
    }

    pub fn tale_count(&self) -> usize {
        self.index.get().map_or(0, Vec::len)
    }

    /// Index entries, fetching and parsing the remote listing on first use.
    /// Concurrent callers share a single in-flight initialization; a failed
    /// attempt leaves the cell empty so a later call can retry.
    async fn entries(&self) -> Result<&[TaleEntry]> {
        let entries = self.index.get_or_try_init(|| self.load_index()).await?;
        Ok(entries)
    }

    async fn load_index(&self) -> Result<Vec<TaleEntry>> {
        tracing::info!(base_url = %self.base_url, "loading tale index");
        let response = self
            .client
            .get(&self.base_url)
            .send()
            .await
            .with_context(|| format!("fetching tale index from {}", self.base_url))?;
        if !response.status().is_success() {
            return Err(anyhow!("index fetch returned {}", response.status()));
        }
        let html = response.text().await.context("reading tale index body")?;
        let tales = parse::parse_tale_index(&html, &self.base_url);
        tracing::info!(count = tales.len(), "tale index loaded");
        Ok(tales
            .into_iter()
            .map(|meta| TaleEntry {
                meta,
                content: Mutex::new(None),
            })
            .collect())
    }

    /// Tale body, fetched on first access and cached on success. A transport
    /// failure is logged and yields nothing so one unreachable tale cannot
    /// abort a whole search; the failure itself is not cached, so the next
    /// access retries. The per-tale lock is held across the fetch, making
    /// concurrent loads for the same tale await the one already in flight
    /// instead of refetching.
    async fn content(&self, entry: &TaleEntry) -> Option<Arc<str>> {
        let mut slot = entry.content.lock().await;
        if let Some(text) = slot.as_ref() {
            return Some(Arc::clone(text));
        }
        match self.fetch_text(&entry.meta.url).await {
            Ok(text) => {
                let text: Arc<str> = text.into();
                *slot = Some(Arc::clone(&text));
                Some(text)
            }
            Err(err) => {
                tracing::warn!(tale = %entry.meta.id, error = %err, "tale fetch failed, skipping");
                None
            }
        }
    }

    async fn fetch_text(&self, url: &str) -> Result<String> {
        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(anyhow!("fetch returned {}", response.status()));
        }
        Ok(response.text().await?)
    }

    /// Run one search across the whole corpus. Tales are scanned in index
    /// order; tales whose body is unavailable are skipped. The result list is
    /// sorted by descending relevance score (stable, so index order breaks
    /// ties) and truncated to the requested limit.
    pub async fn search(&self, request: SearchRequest) -> Result<SearchResponse> {
        let start = Instant::now();
        let entries = self.entries().await?;

        let mut results: Vec<SearchResult> = Vec::new();
        for entry in entries {
            let Some(content) = self.content(entry).await else {
                continue;
            };
            if content.is_empty() {
                continue;
            }
            let matches = scan::scan_content(&content, &request.query, request.case_sensitive);
            if matches.is_empty() {
                continue;
            }
            let relevance_score = scan::relevance_score(matches.len(), content.len());
            let mut tale = entry.meta.clone();
            tale.content = scan::preview(&content);
            results.push(SearchResult {
                tale,
                matches,
                relevance_score,
            });
        }

        results.sort_by(|a, b| {
            b.relevance_score
                .partial_cmp(&a.relevance_score)
                .unwrap_or(Ordering::Equal)
        });
        let total_results = results.len();
        results.truncate(request.limit);

        Ok(SearchResponse {
            results,
            total_results,
            query: request.query,
            search_time: start.elapsed().as_millis(),
        })
    }

    /// All known tales in list form (content empty).
    pub async fn tales(&self) -> Result<Vec<Tale>> {
        let entries = self.entries().await?;
        Ok(entries.iter().map(|e| e.meta.clone()).collect())
    }

    /// One tale with its full body, or None when the id is unknown.
    pub async fn tale_by_id(&self, id: &str) -> Result<Option<Tale>> {
        let entries = self.entries().await?;
        let Some(entry) = entries.iter().find(|e| e.meta.id == id) else {
            return Ok(None);
        };
        let mut tale = entry.meta.clone();
        if let Some(content) = self.content(entry).await {
            tale.content = content.to_string();
        }
        Ok(Some(tale))
    }
}
