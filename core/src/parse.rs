use crate::model::Tale;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Anchors pointing at .txt resources. The remote index page is a fixed
    // external given, so matching is tied to its exact markup on purpose.
    static ref TALE_LINK: Regex =
        Regex::new(r#"(?i)<a\s+href="([^"]+\.txt)"[^>]*>([^<]+)</a>"#).expect("valid regex");
}

/// Extract tale records (content empty) from the raw HTML of the corpus
/// index page, in document order. Anchors that do not match the pattern are
/// skipped silently; empty input yields an empty list.
pub fn parse_tale_index(html: &str, base_url: &str) -> Vec<Tale> {
    let base = base_url.trim_end_matches('/');
    TALE_LINK
        .captures_iter(html)
        .map(|caps| {
            let filename = &caps[1];
            let id = filename.strip_suffix(".txt").unwrap_or(filename);
            Tale {
                id: id.to_string(),
                title: caps[2].trim().to_string(),
                url: format!("{base}/{filename}"),
                content: String::new(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://tales.example.org/corpus";

    #[test]
    fn extracts_txt_anchors_in_document_order() {
        let html = r#"<html><body>
            <a href="hansel.txt">Hansel and Gretel</a>
            <a href="cinder.txt"> Cinderella </a>
        </body></html>"#;
        let tales = parse_tale_index(html, BASE);
        assert_eq!(tales.len(), 2);
        assert_eq!(tales[0].id, "hansel");
        assert_eq!(tales[0].title, "Hansel and Gretel");
        assert_eq!(tales[0].url, format!("{BASE}/hansel.txt"));
        assert!(tales[0].content.is_empty());
        assert_eq!(tales[1].id, "cinder");
        assert_eq!(tales[1].title, "Cinderella");
    }

    #[test]
    fn skips_non_txt_and_malformed_anchors() {
        let html = r#"
            <a href="notes.pdf">Not a tale</a>
            <a href="rapunzel.txt">Rapunzel</a>
            <a href="broken.txt"><b>nested markup</b></a>
        "#;
        let tales = parse_tale_index(html, BASE);
        assert_eq!(tales.len(), 1);
        assert_eq!(tales[0].id, "rapunzel");
    }

    #[test]
    fn empty_input_yields_empty_list() {
        assert!(parse_tale_index("", BASE).is_empty());
        assert!(parse_tale_index("<html><body>no links</body></html>", BASE).is_empty());
    }

    #[test]
    fn trailing_slash_on_base_url_is_normalized() {
        let tales = parse_tale_index(r#"<a href="frog.txt">The Frog King</a>"#, "http://x/");
        assert_eq!(tales[0].url, "http://x/frog.txt");
    }
}
