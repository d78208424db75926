use crate::models::book::BookRecord;
use crate::models::responses::{SearchMetadata, SearchResponse};

/// Case-insensitive substring match of `query` against title or author,
/// preserving catalog order among matches.
pub fn filter_local(records: &[BookRecord], query: &str) -> Vec<BookRecord> {
    let folded = query.to_lowercase();
    records
        .iter()
        .filter(|book| {
            book.title.to_lowercase().contains(&folded)
                || book.author.to_lowercase().contains(&folded)
        })
        .cloned()
        .collect()
}

/// Slices one page out of the merged result list and computes the page
/// metadata. A page past the end yields an empty list, not an error.
pub fn paginate(query: &str, combined: Vec<BookRecord>, page: usize, size: usize) -> SearchResponse {
    let total_items = combined.len();
    let total_pages = total_items.div_ceil(size);
    // saturating: an absurdly large page must land past the end, not overflow
    let start = page.saturating_sub(1).saturating_mul(size);

    let books: Vec<BookRecord> = combined.into_iter().skip(start).take(size).collect();

    SearchResponse {
        metadata: SearchMetadata {
            query: query.to_string(),
            total_items,
            total_pages,
            current_page: page,
            page_size: size,
            has_next: page < total_pages,
            has_previous: page > 1,
        },
        books,
    }
}
