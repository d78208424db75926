use axum::extract::{FromRequest, Multipart, Request, State};
use axum::http::{header::CONTENT_TYPE, StatusCode};
use axum::response::Json;
use serde::Deserialize;
use tracing::{error, info};

use super::ApiError;
use crate::models::book::{BookRecord, UNKNOWN_FIELD};
use crate::models::responses::AddBookResponse;
use crate::utils::file::save_upload;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub publisher: Option<String>,
    pub year: Option<i32>,
}

/// One route, two modes: a plain JSON body, or a multipart form carrying the
/// same fields plus a required `image` file that is persisted under the static
/// directory.
pub async fn add_book(
    State(state): State<AppState>,
    req: Request,
) -> Result<(StatusCode, Json<AddBookResponse>), ApiError> {
    let is_multipart = req
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.starts_with("multipart/form-data"))
        .unwrap_or(false);

    let book = if is_multipart {
        let multipart = Multipart::from_request(req, &())
            .await
            .map_err(|e| ApiError::Body(e.to_string()))?;
        book_from_multipart(&state, multipart).await?
    } else {
        let Json(payload) = Json::<NewBook>::from_request(req, &())
            .await
            .map_err(|e| ApiError::Body(e.to_string()))?;
        book_from_payload(payload)?
    };

    state.catalog.append(book.clone()).await;
    info!("Stored '{}' by {} in the catalog", book.title, book.author);

    Ok((
        StatusCode::CREATED,
        Json(AddBookResponse {
            status: "success".to_string(),
            message: "book stored in the catalog".to_string(),
            book,
        }),
    ))
}

fn book_from_payload(payload: NewBook) -> Result<BookRecord, ApiError> {
    validate_fields(&payload.title, &payload.author, payload.year)?;

    Ok(BookRecord {
        title: payload.title,
        author: payload.author,
        publisher: normalize_publisher(payload.publisher),
        year: payload.year,
        image: None,
    })
}

async fn book_from_multipart(
    state: &AppState,
    mut multipart: Multipart,
) -> Result<BookRecord, ApiError> {
    let mut title = None;
    let mut author = None;
    let mut publisher = None;
    let mut year = None;
    let mut image = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::Body(e.to_string()))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "title" => title = Some(read_text(field).await?),
            "author" => author = Some(read_text(field).await?),
            "publisher" => publisher = Some(read_text(field).await?),
            "year" => {
                let raw = read_text(field).await?;
                if !raw.trim().is_empty() {
                    year = Some(raw.trim().parse::<i32>().map_err(|_| {
                        ApiError::Validation("year must be a non-negative integer".to_string())
                    })?);
                }
            }
            "image" => {
                let original = field.file_name().unwrap_or("upload").to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::Body(e.to_string()))?;
                image = Some((original, bytes));
            }
            _ => {}
        }
    }

    let title =
        title.ok_or_else(|| ApiError::Validation("title field is required".to_string()))?;
    let author =
        author.ok_or_else(|| ApiError::Validation("author field is required".to_string()))?;
    validate_fields(&title, &author, year)?;

    let (original, bytes) =
        image.ok_or_else(|| ApiError::Validation("image file is required".to_string()))?;
    if bytes.is_empty() {
        return Err(ApiError::Validation("image file is empty".to_string()));
    }

    let filename = save_upload(&state.config.upload_dir, &original, &bytes).map_err(|e| {
        error!("Failed to persist upload '{}': {}", original, e);
        ApiError::Upload(e)
    })?;

    Ok(BookRecord {
        title,
        author,
        publisher: normalize_publisher(publisher),
        year,
        image: Some(format!("/static/{}", filename)),
    })
}

async fn read_text(field: axum::extract::multipart::Field<'_>) -> Result<String, ApiError> {
    field.text().await.map_err(|e| ApiError::Body(e.to_string()))
}

fn normalize_publisher(publisher: Option<String>) -> String {
    match publisher {
        Some(p) if !p.trim().is_empty() => p,
        _ => UNKNOWN_FIELD.to_string(),
    }
}

fn validate_fields(title: &str, author: &str, year: Option<i32>) -> Result<(), ApiError> {
    let title_len = title.chars().count();
    if !(3..=100).contains(&title_len) {
        return Err(ApiError::Validation(
            "title must be between 3 and 100 characters".to_string(),
        ));
    }

    if author.chars().count() < 2 {
        return Err(ApiError::Validation(
            "author must be at least 2 characters".to_string(),
        ));
    }

    if matches!(year, Some(y) if y < 0) {
        return Err(ApiError::Validation(
            "year must be a non-negative integer".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::models::storage::MemoryCatalog;
    use crate::routes::search::{search_books, SearchParams};
    use axum::body::Body;
    use axum::extract::Query;
    use serde_json::json;
    use std::sync::Arc;

    fn test_state(upload_dir: &str) -> AppState {
        AppState {
            catalog: Arc::new(MemoryCatalog::new()),
            http: reqwest::Client::new(),
            config: Arc::new(AppConfig {
                port: "0".to_string(),
                search_url: "http://127.0.0.1:9/search.json".to_string(),
                upload_dir: upload_dir.to_string(),
            }),
        }
    }

    fn json_request(body: serde_json::Value) -> Request {
        Request::builder()
            .method("POST")
            .uri("/add-book")
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap()
    }

    const BOUNDARY: &str = "test-boundary-7f3a";

    fn multipart_request(image_filename: &str) -> Request {
        let body = format!(
            "--{b}\r\nContent-Disposition: form-data; name=\"title\"\r\n\r\nThe Hobbit\r\n\
             --{b}\r\nContent-Disposition: form-data; name=\"author\"\r\n\r\nJ.R.R. Tolkien\r\n\
             --{b}\r\nContent-Disposition: form-data; name=\"image\"; filename=\"{f}\"\r\n\
             Content-Type: image/png\r\n\r\nnot-a-real-png\r\n--{b}--\r\n",
            b = BOUNDARY,
            f = image_filename,
        );

        Request::builder()
            .method("POST")
            .uri("/add-book")
            .header(
                CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", BOUNDARY),
            )
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn missing_publisher_and_year_fall_back_to_placeholders() {
        let state = test_state("uploads");

        let (status, Json(response)) = add_book(
            State(state.clone()),
            json_request(json!({"title": "The Hobbit", "author": "J.R.R. Tolkien"})),
        )
        .await
        .unwrap();

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(response.status, "success");
        assert_eq!(response.book.publisher, UNKNOWN_FIELD);
        assert_eq!(response.book.year, None);
        assert_eq!(response.book.image, None);
    }

    #[tokio::test]
    async fn stored_book_is_immediately_findable() {
        let state = test_state("uploads");

        add_book(
            State(state.clone()),
            json_request(json!({"title": "The Hobbit", "author": "J.R.R. Tolkien"})),
        )
        .await
        .unwrap();

        let Json(response) = search_books(
            Query(SearchParams {
                q: Some("hobbit".to_string()),
                page: None,
                size: None,
            }),
            State(state),
        )
        .await
        .unwrap();

        assert_eq!(response.metadata.total_items, 1);
        assert_eq!(response.books[0].title, "The Hobbit");
    }

    #[tokio::test]
    async fn rejects_invalid_fields() {
        let state = test_state("uploads");

        let too_short = add_book(
            State(state.clone()),
            json_request(json!({"title": "Hi", "author": "J.R.R. Tolkien"})),
        )
        .await;
        assert!(matches!(too_short, Err(ApiError::Validation(_))));

        let negative_year = add_book(
            State(state.clone()),
            json_request(json!({"title": "The Hobbit", "author": "J.R.R. Tolkien", "year": -1})),
        )
        .await;
        assert!(matches!(negative_year, Err(ApiError::Validation(_))));

        let bad_body = add_book(
            State(state),
            Request::builder()
                .method("POST")
                .uri("/add-book")
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from("not json"))
                .unwrap(),
        )
        .await;
        assert!(matches!(bad_body, Err(ApiError::Body(_))));
    }

    #[tokio::test]
    async fn upload_stores_the_file_and_links_it() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(dir.path().to_str().unwrap());

        let (status, Json(response)) =
            add_book(State(state), multipart_request("cover.png")).await.unwrap();

        assert_eq!(status, StatusCode::CREATED);
        let image = response.book.image.expect("upload should carry an image URL");
        assert!(image.starts_with("/static/"));
        assert!(image.ends_with(".png"));

        let filename = image.strip_prefix("/static/").unwrap();
        assert!(dir.path().join(filename).exists());
    }

    #[tokio::test]
    async fn same_original_filename_produces_distinct_urls() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(dir.path().to_str().unwrap());

        let (_, Json(first)) = add_book(State(state.clone()), multipart_request("cover.png"))
            .await
            .unwrap();
        let (_, Json(second)) = add_book(State(state), multipart_request("cover.png"))
            .await
            .unwrap();

        assert_ne!(first.book.image, second.book.image);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 2);
    }

    #[tokio::test]
    async fn multipart_without_an_image_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(dir.path().to_str().unwrap());

        let body = format!(
            "--{b}\r\nContent-Disposition: form-data; name=\"title\"\r\n\r\nThe Hobbit\r\n\
             --{b}\r\nContent-Disposition: form-data; name=\"author\"\r\n\r\nJ.R.R. Tolkien\r\n\
             --{b}--\r\n",
            b = BOUNDARY,
        );
        let req = Request::builder()
            .method("POST")
            .uri("/add-book")
            .header(
                CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", BOUNDARY),
            )
            .body(Body::from(body))
            .unwrap();

        let result = add_book(State(state), req).await;
        assert!(matches!(result, Err(ApiError::Validation(_))));
    }
}
