//! Book catalog API handlers
//!
//! Contains HTTP request handlers for book CRUD operations.

use crate::api::envelope::Envelope;
use crate::api::validation::{parse_book_payload, BookIdPath};
use crate::app::AppState;
use crate::error::AppError;
use crate::store::Book;
use axum::{body::Bytes, extract::State, http::StatusCode, response::Json};
use tracing::info;

/// GET /books - List all books
pub async fn list_books(
    State(state): State<AppState>,
) -> Result<Json<Envelope<Vec<Book>>>, AppError> {
    let books = state.books.list_all().await?;
    Ok(Json(Envelope::list(books)))
}

/// GET /books/:id - Get a specific book
pub async fn get_book(
    State(state): State<AppState>,
    BookIdPath(id): BookIdPath,
) -> Result<Json<Envelope<Book>>, AppError> {
    let book = state
        .books
        .find_by_id(id)
        .await?
        .ok_or(AppError::BookNotFound(id))?;

    Ok(Json(Envelope::data(book)))
}

/// POST /books - Create a new book
pub async fn create_book(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<Envelope<Book>>), AppError> {
    let request = parse_book_payload(&body)?;
    let book = state.books.insert(&request).await?;

    info!(book_id = book.id, title = %book.title, "Book created");
    Ok((
        StatusCode::CREATED,
        Json(Envelope::data(book).with_message("Book added successfully")),
    ))
}

/// PUT /books/:id - Replace all fields of a book
pub async fn update_book(
    State(state): State<AppState>,
    BookIdPath(id): BookIdPath,
    body: Bytes,
) -> Result<Json<Envelope<()>>, AppError> {
    let request = parse_book_payload(&body)?;
    if state.books.update(id, &request).await? == 0 {
        return Err(AppError::BookNotFound(id));
    }

    info!(book_id = id, "Book updated");
    Ok(Json(Envelope::message("Book updated successfully")))
}

/// DELETE /books/:id - Delete a book
pub async fn delete_book(
    State(state): State<AppState>,
    BookIdPath(id): BookIdPath,
) -> Result<Json<Envelope<()>>, AppError> {
    if state.books.delete_by_id(id).await? == 0 {
        return Err(AppError::BookNotFound(id));
    }

    info!(book_id = id, "Book deleted");
    Ok(Json(Envelope::message("Book deleted successfully")))
}
