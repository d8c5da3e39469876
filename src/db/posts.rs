//! Post repository for database operations.

use sqlx::SqlitePool;

use super::RepositoryError;
use crate::models::{Post, PostId, UserId};

/// Raw `posts` row.
#[derive(sqlx::FromRow)]
struct PostRow {
    id: i64,
    author_id: i64,
    title: String,
    subtitle: String,
    date: String,
    body: String,
    img_url: String,
}

impl From<PostRow> for Post {
    fn from(r: PostRow) -> Self {
        Self {
            id: PostId::new(r.id),
            author_id: UserId::new(r.author_id),
            title: r.title,
            subtitle: r.subtitle,
            date: r.date,
            body: r.body,
            img_url: r.img_url,
        }
    }
}

const POST_COLUMNS: &str = "id, author_id, title, subtitle, date, body, img_url";

/// Repository for post database operations.
pub struct PostRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> PostRepository<'a> {
    /// Create a new post repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// List all posts, oldest first (id ascending).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<Post>, RepositoryError> {
        let rows = sqlx::query_as::<_, PostRow>(&format!(
            "SELECT {POST_COLUMNS} FROM posts ORDER BY id ASC"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Post::from).collect())
    }

    /// Get a post by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: PostId) -> Result<Option<Post>, RepositoryError> {
        let row = sqlx::query_as::<_, PostRow>(&format!(
            "SELECT {POST_COLUMNS} FROM posts WHERE id = ?"
        ))
        .bind(id.as_i64())
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Post::from))
    }

    /// Create a new post.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the title is already taken.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(
        &self,
        author_id: UserId,
        title: &str,
        subtitle: &str,
        date: &str,
        body: &str,
        img_url: &str,
    ) -> Result<Post, RepositoryError> {
        let row = sqlx::query_as::<_, PostRow>(&format!(
            "INSERT INTO posts (author_id, title, subtitle, date, body, img_url) \
             VALUES (?, ?, ?, ?, ?, ?) \
             RETURNING {POST_COLUMNS}"
        ))
        .bind(author_id.as_i64())
        .bind(title)
        .bind(subtitle)
        .bind(date)
        .bind(body)
        .bind(img_url)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict("title already exists".to_owned());
            }
            RepositoryError::Database(e)
        })?;

        Ok(Post::from(row))
    }

    /// Overwrite a post's title, subtitle, image URL, and body.
    ///
    /// The author and the original publication date are left untouched.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the post doesn't exist.
    /// Returns `RepositoryError::Conflict` if the new title is already taken.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update(
        &self,
        id: PostId,
        title: &str,
        subtitle: &str,
        body: &str,
        img_url: &str,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "UPDATE posts SET title = ?, subtitle = ?, body = ?, img_url = ? WHERE id = ?",
        )
        .bind(title)
        .bind(subtitle)
        .bind(body)
        .bind(img_url)
        .bind(id.as_i64())
        .execute(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict("title already exists".to_owned());
            }
            RepositoryError::Database(e)
        })?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// Delete a post.
    ///
    /// Its comments go with it via the `ON DELETE CASCADE` on `comments.post_id`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the post doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn delete(&self, id: PostId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM posts WHERE id = ?")
            .bind(id.as_i64())
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
