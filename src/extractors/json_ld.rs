use super::parse_selector;
use html_escape::decode_html_entities;
use log::debug;
use scraper::Html;
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
struct ImageObject {
    url: Option<String>,
    #[serde(rename = "contentUrl")]
    content_url: Option<String>,
}

impl ImageObject {
    fn into_url(self) -> Option<String> {
        self.url
            .filter(|url| !url.trim().is_empty())
            .or(self.content_url)
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ImageEntry {
    String(String),
    Object(ImageObject),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ImageType {
    None,
    String(String),
    // strings and objects may be mixed in one list
    Multiple(Vec<ImageEntry>),
    Object(ImageObject),
}

impl ImageType {
    fn first_url(self) -> Option<String> {
        let url = match self {
            ImageType::None => None,
            ImageType::String(url) => Some(url),
            ImageType::Object(obj) => obj.into_url(),
            ImageType::Multiple(entries) => entries.into_iter().find_map(|entry| {
                let url = match entry {
                    ImageEntry::String(url) => Some(url),
                    ImageEntry::Object(obj) => obj.into_url(),
                }?;
                (!url.trim().is_empty()).then_some(url)
            }),
        }?;
        let url = decode_html_symbols(url.trim());
        (!url.is_empty()).then_some(url)
    }
}

/// First `image` declared in the page's JSON-LD blocks.
///
/// Recipe nodes are preferred; any other node carrying an image is used
/// only when no recipe node has one.
pub fn structured_data_image(document: &Html) -> Option<String> {
    let selector = parse_selector("script[type='application/ld+json']")?;

    let blocks: Vec<Value> = document
        .select(&selector)
        .enumerate()
        .filter_map(|(index, script)| {
            let raw = script.inner_html();
            match serde_json::from_str::<Value>(&strip_trailing_commas(&raw)) {
                Ok(value) => Some(value),
                Err(e) => {
                    debug!("Skipping JSON-LD block {}: {}", index, e);
                    None
                }
            }
        })
        .collect();

    let nodes: Vec<&Value> = blocks.iter().flat_map(ld_nodes).collect();

    nodes
        .iter()
        .filter(|node| is_recipe_type(node))
        .chain(nodes.iter().filter(|node| !is_recipe_type(node)))
        .find_map(|node| node_image(node))
}

/// The node itself, array members and `@graph` members
fn ld_nodes(value: &Value) -> Vec<&Value> {
    match value {
        Value::Array(items) => items.iter().flat_map(ld_nodes).collect(),
        Value::Object(map) => {
            let mut nodes = vec![value];
            if let Some(graph) = map.get("@graph") {
                nodes.extend(ld_nodes(graph));
            }
            nodes
        }
        _ => Vec::new(),
    }
}

fn node_image(node: &Value) -> Option<String> {
    let image = node.get("image")?;
    match serde_json::from_value::<ImageType>(image.clone()) {
        Ok(image) => image.first_url(),
        Err(e) => {
            debug!("Unrecognised JSON-LD image shape: {}", e);
            None
        }
    }
}

fn is_recipe_type(value: &Value) -> bool {
    match value.get("@type") {
        Some(Value::String(kind)) => kind.eq_ignore_ascii_case("recipe"),
        Some(Value::Array(kinds)) => kinds
            .iter()
            .any(|kind| kind.as_str().is_some_and(|k| k.eq_ignore_ascii_case("recipe"))),
        _ => false,
    }
}

fn decode_html_symbols(text: &str) -> String {
    // some sites double-encode entities
    decode_html_entities(&decode_html_entities(text)).into_owned()
}

/// Remove commas directly before `]` or `}` outside of strings
fn strip_trailing_commas(json: &str) -> String {
    let mut out = String::with_capacity(json.len());
    let mut in_string = false;
    let mut escaped = false;
    // a comma plus the whitespace after it, held until the next token is known
    let mut held: Option<String> = None;

    for c in json.chars() {
        if in_string {
            out.push(c);
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match (c, held.as_mut()) {
            (c, Some(pending)) if c.is_whitespace() => pending.push(c),
            (']' | '}', Some(pending)) => {
                out.push_str(pending.trim_start_matches(','));
                held = None;
                out.push(c);
            }
            (',', pending) => {
                if let Some(pending) = pending {
                    out.push_str(pending);
                }
                held = Some(",".to_string());
            }
            (_, pending) => {
                if let Some(pending) = pending {
                    out.push_str(pending);
                }
                held = None;
                if c == '"' {
                    in_string = true;
                }
                out.push(c);
            }
        }
    }
    if let Some(pending) = held {
        out.push_str(&pending);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_html_document(json_ld: &str) -> Html {
        Html::parse_document(&format!(
            r#"
            <!DOCTYPE html>
            <html>
            <head>
                <script type="application/ld+json">
                    {json_ld}
                </script>
            </head>
            <body></body>
            </html>
            "#
        ))
    }

    #[test]
    fn test_string_image() {
        let document = create_html_document(
            r#"{"@type": "Recipe", "name": "Soup", "image": "https://example.com/soup.jpg"}"#,
        );
        assert_eq!(
            structured_data_image(&document),
            Some("https://example.com/soup.jpg".to_string())
        );
    }

    #[test]
    fn test_object_image() {
        let document = create_html_document(
            r#"{"@type": "Recipe", "image": {"@type": "ImageObject", "url": "https://example.com/a.jpg", "width": 1200}}"#,
        );
        assert_eq!(
            structured_data_image(&document),
            Some("https://example.com/a.jpg".to_string())
        );
    }

    #[test]
    fn test_mixed_list_image() {
        let document = create_html_document(
            r#"{"@type": "Recipe", "image": [{"@type": "ImageObject", "contentUrl": "https://example.com/1.jpg"}, "https://example.com/2.jpg"]}"#,
        );
        assert_eq!(
            structured_data_image(&document),
            Some("https://example.com/1.jpg".to_string())
        );
    }

    #[test]
    fn test_image_object_with_url_and_content_url() {
        let document = create_html_document(
            r#"{"@type": "Recipe", "image": {"@type": "ImageObject", "url": "https://example.com/a.jpg", "contentUrl": "https://example.com/a.jpg"}}"#,
        );
        assert_eq!(
            structured_data_image(&document),
            Some("https://example.com/a.jpg".to_string())
        );

        let document = create_html_document(
            r##"{"@type": "Recipe", "image": [
                {"@type": "ImageObject", "@id": "#primaryimage"},
                {"@type": "ImageObject", "url": "https://example.com/b.jpg", "contentUrl": "https://example.com/b-full.jpg"}
            ]}"##,
        );
        assert_eq!(
            structured_data_image(&document),
            Some("https://example.com/b.jpg".to_string())
        );
    }

    #[test]
    fn test_recipe_in_graph_preferred() {
        let document = create_html_document(
            r#"{"@context": "https://schema.org", "@graph": [
                {"@type": "WebPage", "image": "https://example.com/page.jpg"},
                {"@type": ["Recipe"], "image": ["https://example.com/recipe.jpg"]}
            ]}"#,
        );
        assert_eq!(
            structured_data_image(&document),
            Some("https://example.com/recipe.jpg".to_string())
        );
    }

    #[test]
    fn test_non_recipe_image_used_last() {
        let document = create_html_document(
            r#"[{"@type": "Recipe", "name": "No image"}, {"@type": "Article", "image": "https://example.com/article.jpg"}]"#,
        );
        assert_eq!(
            structured_data_image(&document),
            Some("https://example.com/article.jpg".to_string())
        );
    }

    #[test]
    fn test_trailing_commas_and_entities() {
        let document = create_html_document(
            r#"{"@type": "Recipe", "image": ["https://example.com/a.jpg?x=1&amp;y=2",],}"#,
        );
        assert_eq!(
            structured_data_image(&document),
            Some("https://example.com/a.jpg?x=1&y=2".to_string())
        );
    }

    #[test]
    fn test_no_structured_data() {
        assert!(structured_data_image(&Html::parse_document("<p>plain</p>")).is_none());
    }

    #[test]
    fn test_strip_trailing_commas_keeps_strings() {
        assert_eq!(strip_trailing_commas(r#"{"a": "x,]", "b": [1, 2, ],}"#), r#"{"a": "x,]", "b": [1, 2 ]}"#);
    }
}
