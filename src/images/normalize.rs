use crate::config::ImageConfig;
use log::debug;
use url::Url;

const IMAGE_EXTENSIONS: &[&str] = &[".jpg", ".jpeg", ".png", ".webp", ".gif"];

/// Hosts that resize images according to `w`/`h`/`fit` query parameters
const RESIZING_HOSTS: &[&str] = &["images.unsplash.com", "plus.unsplash.com", "images.pexels.com"];

const SIZE_PARAMS: &[&str] = &["w", "h", "fit"];

/// Absolute, cleaned-up form of an image reference found on `page`.
///
/// Returns `None` for empty values, unparseable URLs and anything that is not
/// http(s). An absolute reference keeps its spelling apart from query changes;
/// relative ones are resolved against `page` and serialized by `Url`, as are
/// references to resizing hosts since their query is rebuilt. Normalizing an
/// already normalized URL returns it unchanged.
pub fn normalize_image_url(raw: &str, page: Option<&Url>, config: &ImageConfig) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    let absolute = !raw.starts_with("//") && Url::parse(raw).is_ok();

    let parsed = if let Some(rest) = raw.strip_prefix("//") {
        let scheme = page.map(Url::scheme).unwrap_or("https");
        Url::parse(&format!("{scheme}://{rest}"))
    } else {
        match page {
            Some(page) => page.join(raw),
            None => Url::parse(raw),
        }
    };
    let mut url = match parsed {
        Ok(url) => url,
        Err(e) => {
            debug!("Discarding image reference '{}': {}", raw, e);
            return None;
        }
    };
    if !matches!(url.scheme(), "http" | "https") {
        debug!("Discarding non-http image reference '{}'", truncate(raw));
        return None;
    }

    let path = url.path().to_ascii_lowercase();
    let image_path = IMAGE_EXTENSIONS.iter().any(|ext| path.ends_with(ext));
    if image_path {
        url.set_query(None);
    }

    if url.host_str().is_some_and(|host| RESIZING_HOSTS.contains(&host)) {
        request_size(&mut url, config);
        return Some(url.to_string());
    }

    match (absolute, image_path) {
        (true, true) => Some(without_query(raw)),
        (true, false) => Some(raw.to_string()),
        (false, _) => Some(url.to_string()),
    }
}

/// `raw` with its query removed and any fragment kept
fn without_query(raw: &str) -> String {
    let (base, fragment) = match raw.split_once('#') {
        Some((base, fragment)) => (base, Some(fragment)),
        None => (raw, None),
    };
    let base = base.split_once('?').map_or(base, |(base, _)| base);
    match fragment {
        Some(fragment) => format!("{base}#{fragment}"),
        None => base.to_string(),
    }
}

/// Replace any size parameters with the configured ones, keeping the rest
fn request_size(url: &mut Url, config: &ImageConfig) {
    let kept: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| !SIZE_PARAMS.contains(&key.as_ref()))
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();

    url.query_pairs_mut()
        .clear()
        .extend_pairs(kept)
        .append_pair("w", &config.width.to_string())
        .append_pair("h", &config.height.to_string())
        .append_pair("fit", &config.fit);
}

fn truncate(raw: &str) -> String {
    raw.chars().take(40).collect()
}
