use scraper::{Html, Selector};

/// Tags that never carry product copy worth inspecting by hand.
const NOISE_TAGS: &[&str] = &["script", "iframe", "style", "svg", "header", "nav", "footer"];

/// Returns the text content of every `<script>` element that has any, in
/// document order. External scripts (`<script src=..>`) and blank ones are
/// skipped.
///
/// Parsing is lenient: malformed markup degrades to whatever the HTML5
/// parser recovers, never to an error.
pub fn extract_scripts(html: &str) -> Vec<String> {
    if html.is_empty() {
        return Vec::new();
    }

    let doc = Html::parse_document(html);
    let script_selector = Selector::parse("script").expect("valid script selector");

    doc.select(&script_selector)
        .map(|e| e.text().collect::<String>())
        .filter(|text| !text.trim().is_empty())
        .collect()
}

/// Removes scripts, styles, frames and page chrome from `html` and
/// re-serializes what is left.
pub fn strip_noise(html: &str) -> String {
    if html.is_empty() {
        return String::new();
    }

    let mut doc = Html::parse_document(html);
    let noise_selector = Selector::parse(&NOISE_TAGS.join(", ")).expect("valid noise selector");

    let noise: Vec<_> = doc.select(&noise_selector).map(|e| e.id()).collect();
    for id in noise {
        if let Some(mut node) = doc.tree.get_mut(id) {
            node.detach();
        }
    }

    doc.root_element().html()
}
