use crate::model::SearchMatch;

/// Characters of surrounding text kept on each side of a match.
const CONTEXT_WINDOW: usize = 50;

/// Characters of tale content kept in a search result preview.
const PREVIEW_LEN: usize = 500;

/// Scan one tale body line by line and emit a match record for every
/// occurrence of the query. Occurrences are found by advancing one character
/// past each match start, so overlapping occurrences are all counted
/// ("aa" in "aaa" yields two matches).
pub fn scan_content(content: &str, query: &str, case_sensitive: bool) -> Vec<SearchMatch> {
    let needle = if case_sensitive {
        query.to_string()
    } else {
        query.to_lowercase()
    };
    if needle.is_empty() {
        return Vec::new();
    }

    let mut matches = Vec::new();
    for (idx, line) in content.split('\n').enumerate() {
        let haystack = if case_sensitive {
            line.to_string()
        } else {
            line.to_lowercase()
        };
        for start in occurrences(&haystack, &needle) {
            matches.push(SearchMatch {
                line: line.trim().to_string(),
                line_number: (idx + 1) as u32,
                context: context_window(&haystack, line, start, needle.len()),
            });
        }
    }
    matches
}

/// Relevance score for one tale: `matches * 10 + density * 5`, where density
/// is matches per 1000 characters of content. Three matches in a 2000-char
/// tale score exactly 37.5. A simple heuristic, kept verbatim for
/// compatibility with existing clients.
pub fn relevance_score(match_count: usize, content_len: usize) -> f64 {
    let matches = match_count as f64;
    let density = matches / (content_len as f64 / 1000.0);
    matches * 10.0 + density * 5.0
}

/// First 500 characters of the tale plus an ellipsis marker, bounding the
/// size of search responses.
pub fn preview(content: &str) -> String {
    let head: String = content.chars().take(PREVIEW_LEN).collect();
    format!("{head}...")
}

/// Byte offsets of every occurrence of `needle` in `haystack`, advancing one
/// character past each match start so adjacent and overlapping occurrences
/// are both found.
fn occurrences(haystack: &str, needle: &str) -> Vec<usize> {
    let mut found = Vec::new();
    let mut from = 0;
    while let Some(pos) = haystack[from..].find(needle) {
        let at = from + pos;
        found.push(at);
        from = at + haystack[at..].chars().next().map_or(1, char::len_utf8);
    }
    found
}

/// Window of up to `CONTEXT_WINDOW` characters on each side of the match,
/// clamped to the line and trimmed. Offsets come from the case-folded
/// haystack; the original line is sliced when folding kept byte offsets
/// stable, otherwise the folded text is used so no character is split.
fn context_window(haystack: &str, line: &str, start: usize, needle_len: usize) -> String {
    let source = if line.len() == haystack.len() { line } else { haystack };
    let from = floor_char_boundary(source, start.saturating_sub(CONTEXT_WINDOW));
    let to = ceil_char_boundary(source, start + needle_len + CONTEXT_WINDOW);
    source[from..to].trim().to_string()
}

fn floor_char_boundary(s: &str, at: usize) -> usize {
    let mut i = at.min(s.len());
    while !s.is_char_boundary(i) {
        i -= 1;
    }
    i
}

fn ceil_char_boundary(s: &str, at: usize) -> usize {
    let mut i = at.min(s.len());
    while !s.is_char_boundary(i) {
        i += 1;
    }
    i
}
