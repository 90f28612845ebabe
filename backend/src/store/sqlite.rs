//! SQLite book store
//!
//! Each repository call is a single statement executed on a connection
//! borrowed from the pool.

use super::{Book, BookId, BookRepository, NewBook, StoreError};
use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::{debug, info};

/// Book store backed by a SQLite database file
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Open (creating if needed) the database and run migrations
    ///
    /// # Arguments
    /// * `db_path` - Path to the SQLite database file, with or without a `sqlite:` prefix
    ///
    /// # Returns
    /// * `Ok(SqliteStore)` if successful
    /// * `Err(StoreError)` if the file could not be created or opened
    pub async fn open(db_path: &str) -> Result<Self, StoreError> {
        let file_path = db_path.strip_prefix("sqlite:").unwrap_or(db_path);
        if let Some(parent) = PathBuf::from(file_path).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    StoreError::Unavailable(format!("Failed to create db directory: {}", e))
                })?;
            }
        }

        let connection_string = if db_path.starts_with("sqlite:") {
            db_path.to_string()
        } else {
            format!("sqlite:{}", db_path)
        };

        let options = SqliteConnectOptions::from_str(&connection_string)?.create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        info!("Connected to SQLite database at: {}", db_path);

        let store = Self { pool };
        store.run_migrations().await?;

        Ok(store)
    }

    /// Run the embedded schema migration
    async fn run_migrations(&self) -> Result<(), StoreError> {
        info!("Running database migrations...");

        let migration_sql = include_str!("../../migrations/001_create_books.sql");

        let mut cleaned_sql = String::new();
        for line in migration_sql.lines() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with("--") {
                continue;
            }
            let without_comments = match trimmed.find("--") {
                Some(comment_pos) => &trimmed[..comment_pos],
                None => trimmed,
            };
            cleaned_sql.push_str(without_comments.trim());
            cleaned_sql.push(' ');
        }

        for statement in cleaned_sql.split(';').map(str::trim).filter(|s| !s.is_empty()) {
            sqlx::query(statement).execute(&self.pool).await?;
        }

        info!("Database migrations completed successfully");
        Ok(())
    }
}

#[async_trait]
impl BookRepository for SqliteStore {
    async fn list_all(&self) -> Result<Vec<Book>, StoreError> {
        let books =
            sqlx::query_as::<_, Book>("SELECT id, title, author, year FROM books ORDER BY id")
                .fetch_all(&self.pool)
                .await?;

        Ok(books)
    }

    async fn find_by_id(&self, id: BookId) -> Result<Option<Book>, StoreError> {
        let book =
            sqlx::query_as::<_, Book>("SELECT id, title, author, year FROM books WHERE id = ?")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(book)
    }

    async fn insert(&self, book: &NewBook) -> Result<Book, StoreError> {
        let result = sqlx::query("INSERT INTO books (title, author, year) VALUES (?, ?, ?)")
            .bind(&book.title)
            .bind(&book.author)
            .bind(book.year)
            .execute(&self.pool)
            .await?;

        let id = result.last_insert_rowid();
        debug!("Inserted book: {}", id);
        Ok(book.clone().into_book(id))
    }

    async fn update(&self, id: BookId, book: &NewBook) -> Result<u64, StoreError> {
        let result = sqlx::query("UPDATE books SET title = ?, author = ?, year = ? WHERE id = ?")
            .bind(&book.title)
            .bind(&book.author)
            .bind(book.year)
            .bind(id)
            .execute(&self.pool)
            .await?;

        debug!("Updated book {}: {} row(s)", id, result.rows_affected());
        Ok(result.rows_affected())
    }

    async fn delete_by_id(&self, id: BookId) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM books WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        debug!("Deleted book {}: {} row(s)", id, result.rows_affected());
        Ok(result.rows_affected())
    }
}
