use scraper::{Html, Selector};

/// Pulls every `a[href]` target out of a document, raw and unresolved.
/// The parser is lenient, so malformed markup degrades to fewer (or zero)
/// links rather than an error.
pub fn extract_links(body: &str) -> Vec<String> {
    let document = Html::parse_document(body);
    let link_selector = Selector::parse("a[href]").unwrap();

    document
        .select(&link_selector)
        .filter_map(|element| element.value().attr("href"))
        .map(str::to_string)
        .collect()
}
