//! Cursor-driven pagination for list endpoints

use std::future::Future;

/// One page of results and the cursor for the next one
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// `None` or an empty cursor marks the last page
    pub next: Option<String>,
}

/// Fetches pages until the cursor runs out and concatenates their items in
/// page order. The first failing page aborts the whole listing; items
/// gathered so far are discarded.
pub async fn collect_pages<T, E, F, Fut>(mut fetch: F) -> Result<Vec<T>, E>
where
    F: FnMut(Option<String>) -> Fut,
    Fut: Future<Output = Result<Page<T>, E>>,
{
    let mut items = Vec::new();
    let mut cursor: Option<String> = None;

    loop {
        let page = fetch(cursor.take()).await?;
        items.extend(page.items);

        match page.next {
            Some(next) if !next.is_empty() => {
                tracing::trace!("Fetching next page: {}", next);
                cursor = Some(next);
            }
            _ => break,
        }
    }

    Ok(items)
}
