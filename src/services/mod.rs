pub mod openlibrary;
pub mod search;
