use serde::{Deserialize, Serialize};

/// One fairy-tale document from the remote corpus. `id` is the source
/// filename with its extension stripped; `content` stays empty until the
/// tale body has been fetched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tale {
    pub id: String,
    pub title: String,
    pub url: String,
    pub content: String,
}

/// A single occurrence of the query within one line of a tale.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchMatch {
    /// The full matching line, whitespace-trimmed.
    pub line: String,
    /// 1-based line number within the tale.
    pub line_number: u32,
    /// Up to 50 characters of surrounding text on each side of the match,
    /// clamped to the line and trimmed.
    pub context: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    /// The tale with `content` cut down to a fixed-length preview.
    pub tale: Tale,
    pub matches: Vec<SearchMatch>,
    pub relevance_score: f64,
}

/// Validated search parameters. The HTTP layer trims the query and applies
/// the defaults (limit 10, case-insensitive) before constructing this.
#[derive(Debug, Clone)]
pub struct SearchRequest {
    pub query: String,
    pub limit: usize,
    pub case_sensitive: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    /// Results ordered by descending relevance score, truncated to the
    /// requested limit.
    pub results: Vec<SearchResult>,
    /// Count of matching tales before the limit was applied.
    pub total_results: usize,
    pub query: String,
    /// Wall-clock milliseconds spent on this search.
    pub search_time: u128,
}
