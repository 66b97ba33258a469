//! HTML extraction for the catalog pages. Nothing in here touches the network.

use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::{Error, Result, DOWNLOAD_ANCHOR_TEXT, RECORD_ANCHOR_TITLE};

/// Extracts the record page links from one search result page.
///
/// Looks at every `<tr valign="top">` row and takes its first anchor titled
/// [`RECORD_ANCHOR_TITLE`], resolved against `page_url`. A page without such
/// rows yields an empty `Vec`.
pub fn parse_result_page(html: &str, page_url: &str) -> Result<Vec<String>> {
    let doc = Html::parse_document(html);
    let base = Url::parse(page_url)?;

    let row_selector = create_selector(r#"tr[valign="top"]"#)?;
    let anchor_selector = create_selector(&format!(r#"a[title="{RECORD_ANCHOR_TITLE}"]"#))?;

    let mut links = Vec::new();
    for row in doc.select(&row_selector) {
        let Some(href) = row
            .select(&anchor_selector)
            .next()
            .and_then(|a| a.value().attr("href"))
        else {
            continue;
        };
        links.push(base.join(href)?.to_string());
    }
    Ok(links)
}

/// First `<a>` whose text is exactly [`DOWNLOAD_ANCHOR_TEXT`].
pub fn find_primary_anchor(doc: &Html) -> Option<String> {
    let anchor_selector = create_selector("a").ok()?;
    doc.select(&anchor_selector)
        .filter(|a| a.text().collect::<String>() == DOWNLOAD_ANCHOR_TEXT)
        .find_map(href_of)
}

/// Looser search: the first text node containing [`DOWNLOAD_ANCHOR_TEXT`]
/// whose parent is an anchor, or whose parent contains one.
pub fn find_fallback_anchor(doc: &Html) -> Option<String> {
    let anchor_selector = create_selector("a").ok()?;
    doc.tree
        .root()
        .descendants()
        .filter(|node| {
            node.value()
                .as_text()
                .is_some_and(|text| text.contains(DOWNLOAD_ANCHOR_TEXT))
        })
        .filter_map(|node| node.parent().and_then(ElementRef::wrap))
        .find_map(|parent| {
            if parent.value().name() == "a" {
                return href_of(parent);
            }
            parent.select(&anchor_selector).next().and_then(href_of)
        })
}

/// The raw `href` of a record page's download anchor, if any.
pub fn find_download_link(html: &str) -> Option<String> {
    let doc = Html::parse_document(html);
    find_primary_anchor(&doc).or_else(|| find_fallback_anchor(&doc))
}

fn href_of(anchor: ElementRef) -> Option<String> {
    anchor.value().attr("href").map(str::to_string)
}

#[inline]
fn create_selector(sel_str: &str) -> Result<Selector> {
    Selector::parse(sel_str).map_err(|_| Error::ParseMissingSelector(sel_str.into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE_URL: &str = "https://catalog.test/search.php?req=rust&page=0";

    #[test]
    fn result_page_collects_one_link_per_row() {
        let html = r#"<html><body><table>
            <tr valign="top"><td>Title</td></tr>
            <tr valign="top"><td>
                <a href="book/index.php?md5=AAA" title="Libgen & IPFS & Tor">Rust</a>
                <a href="book/index.php?md5=DUP" title="Libgen & IPFS & Tor">again</a>
            </td></tr>
            <tr valign="top"><td><a href="/abs/BBB" title="Libgen &amp; IPFS &amp; Tor">Go</a></td></tr>
            <tr valign="bottom"><td><a href="/skip" title="Libgen & IPFS & Tor">x</a></td></tr>
            <tr valign="top"><td><a href="/other" title="Something else">y</a></td></tr>
        </table></body></html>"#;

        let links = parse_result_page(html, PAGE_URL).unwrap();
        assert_eq!(
            links,
            vec![
                "https://catalog.test/book/index.php?md5=AAA",
                "https://catalog.test/abs/BBB",
            ]
        );
    }

    #[test]
    fn result_page_without_matches_is_empty() {
        let html = "<html><body><p>No results</p></body></html>";
        assert!(parse_result_page(html, PAGE_URL).unwrap().is_empty());
    }

    #[test]
    fn result_page_needs_absolute_page_url() {
        let err = parse_result_page("<html></html>", "not a url").unwrap_err();
        assert!(matches!(err, Error::Url(_)));
    }

    #[test]
    fn primary_anchor_requires_exact_text() {
        let html = r#"<a href="/nope">GET mirror</a><a href="/file.pdf">GET</a>"#;
        let doc = Html::parse_document(html);
        assert_eq!(find_primary_anchor(&doc).as_deref(), Some("/file.pdf"));
    }

    #[test]
    fn primary_anchor_skips_missing_href() {
        let html = r#"<a name="x">GET</a><a href="/second">GET</a>"#;
        let doc = Html::parse_document(html);
        assert_eq!(find_primary_anchor(&doc).as_deref(), Some("/second"));
    }

    #[test]
    fn fallback_uses_anchor_parent() {
        let html = r#"<div><a href="/a.pdf">GET (mirror 1)</a></div>"#;
        let doc = Html::parse_document(html);
        assert_eq!(find_primary_anchor(&doc), None);
        assert_eq!(find_fallback_anchor(&doc).as_deref(), Some("/a.pdf"));
    }

    #[test]
    fn fallback_uses_anchor_inside_parent() {
        let html = r#"<h2>GET it from <a href="/b.pdf">this mirror</a></h2>"#;
        let doc = Html::parse_document(html);
        assert_eq!(find_fallback_anchor(&doc).as_deref(), Some("/b.pdf"));
    }

    #[test]
    fn fallback_keeps_looking_past_dead_ends() {
        let html = r#"<p><b>GET</b> options below</p><span>GET <a href="/c.pdf">c</a></span>"#;
        let doc = Html::parse_document(html);
        assert_eq!(find_fallback_anchor(&doc).as_deref(), Some("/c.pdf"));
    }

    #[test]
    fn primary_wins_over_fallback() {
        let html = r#"<h2>GET <a href="/fallback.pdf">x</a></h2><a href="/primary.pdf">GET</a>"#;
        assert_eq!(find_download_link(html).as_deref(), Some("/primary.pdf"));
    }

    #[test]
    fn no_link_found() {
        let html = r#"<html><body><a href="/x">download</a><p>nothing here</p></body></html>"#;
        assert_eq!(find_download_link(html), None);
    }
}
