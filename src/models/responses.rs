use serde::{Deserialize, Serialize};

use super::book::BookRecord;

#[derive(Deserialize, Serialize, Debug)]
pub struct HealthResponse {
    pub service: String,
    pub status: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SearchMetadata {
    pub query: String,
    pub total_items: usize,
    pub total_pages: usize,
    pub current_page: usize,
    pub page_size: usize,
    pub has_next: bool,
    pub has_previous: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SearchResponse {
    pub metadata: SearchMetadata,
    pub books: Vec<BookRecord>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AddBookResponse {
    pub status: String,
    pub message: String,
    pub book: BookRecord,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
