//! File naming for run artifacts.

use reqwest::Url;

/// Path segments too generic to identify a product.
const GENERIC_SEGMENTS: &[&str] = &[
    "category",
    "categories",
    "product",
    "products",
    "shop",
    "store",
    "collection",
    "collections",
];

const FALLBACK_NAME: &str = "output";

/// Derives a filesystem-safe base name from the last meaningful path
/// segment of `url`.
///
/// Query and fragment are ignored. Never returns an empty string; when no
/// usable segment remains the result is `"output"`.
pub fn output_slug(url: &str) -> String {
    let path = match Url::parse(url) {
        Ok(parsed) => parsed.path().to_string(),
        Err(_) => url.split(['?', '#']).next().unwrap_or_default().to_string(),
    };

    let Some(segment) = path
        .split('/')
        .filter(|s| !s.is_empty())
        .filter(|s| !GENERIC_SEGMENTS.iter().any(|g| g.eq_ignore_ascii_case(s)))
        .next_back()
    else {
        return FALLBACK_NAME.to_string();
    };

    let slug: String = strip_extension(segment)
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect();

    if slug.is_empty() {
        FALLBACK_NAME.to_string()
    } else {
        slug
    }
}

/// Drops a trailing `.ext` where `ext` is one or more ASCII alphanumerics.
fn strip_extension(segment: &str) -> &str {
    match segment.rfind('.') {
        Some(dot)
            if dot + 1 < segment.len()
                && segment[dot + 1..].chars().all(|c| c.is_ascii_alphanumeric()) =>
        {
            &segment[..dot]
        }
        _ => segment,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_ignores_category_and_query() {
        assert_eq!(
            output_slug("https://shop.example.com/category/lipstick-P123?skuId=99"),
            "lipstick-P123"
        );
    }

    #[test]
    fn slug_falls_back_for_root_path() {
        assert_eq!(output_slug("https://example.com/"), "output");
        assert_eq!(output_slug("https://example.com"), "output");
    }

    #[test]
    fn slug_strips_extension() {
        assert_eq!(output_slug("https://example.com/products/widget.html"), "widget");
    }

    #[test]
    fn slug_skips_generic_segments_case_insensitively() {
        assert_eq!(
            output_slug("https://example.com/gloss-bomb/Products/SHOP/"),
            "gloss-bomb"
        );
        assert_eq!(output_slug("https://example.com/Collections/Store"), "output");
    }

    #[test]
    fn slug_replaces_unsafe_characters() {
        assert_eq!(
            output_slug("https://example.com/p/rouge%20dior+lipstick"),
            "rouge_20dior_lipstick"
        );
    }

    #[test]
    fn slug_ignores_fragment() {
        assert_eq!(output_slug("https://example.com/item/abc#reviews"), "abc");
    }

    #[test]
    fn slug_handles_unparseable_input() {
        assert_eq!(output_slug("not a url/thing.json?x=1"), "thing");
    }

    #[test]
    fn slug_never_empty_for_bare_extension() {
        assert_eq!(output_slug("https://example.com/.html"), "output");
    }
}
