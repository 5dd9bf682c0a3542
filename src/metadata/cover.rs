//! Best-effort cover image lookup used as a fallback by providers that
//! carry no image of their own.

use crate::isbn;

/// Try to resolve a cover image URL from Amazon's image service.
///
/// Amazon only serves book covers keyed on the ISBN-10 form, and answers
/// with a 1x1 `image/gif` placeholder when it has no cover for the ISBN.
pub async fn amazon_cover(client: &reqwest::Client, isbn: &str) -> Option<String> {
    let isbn10 = isbn::to_isbn10(isbn)?;
    let url = format!("http://images.amazon.com/images/P/{}", isbn10);

    let response = match client.get(&url).send().await {
        Ok(r) => r,
        Err(e) => {
            tracing::warn!("Amazon cover lookup failed for {}: {}", isbn10, e);
            return None;
        }
    };

    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)?
        .to_str()
        .ok()?;

    if content_type == "image/gif" {
        None
    } else {
        Some(url)
    }
}
