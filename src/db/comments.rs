//! Comment repository for database operations.

use sqlx::SqlitePool;

use super::RepositoryError;
use crate::models::{Comment, CommentId, CommentView, PostId, UserId};

/// Repository for comment database operations.
pub struct CommentRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> CommentRepository<'a> {
    /// Create a new comment repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// List a post's comments with author names, oldest first (id ascending).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_post(
        &self,
        post_id: PostId,
    ) -> Result<Vec<CommentView>, RepositoryError> {
        #[derive(sqlx::FromRow)]
        struct CommentViewRow {
            id: i64,
            text: String,
            author_name: String,
        }

        let rows = sqlx::query_as::<_, CommentViewRow>(
            "SELECT c.id, c.text, u.name AS author_name \
             FROM comments c \
             JOIN users u ON u.id = c.author_id \
             WHERE c.post_id = ? \
             ORDER BY c.id ASC",
        )
        .bind(post_id.as_i64())
        .fetch_all(self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| CommentView {
                id: CommentId::new(r.id),
                text: r.text,
                author_name: r.author_name,
            })
            .collect())
    }

    /// Create a comment on a post.
    ///
    /// Both the post and the author must exist; the handler checks the post
    /// first so a missing id surfaces as 404 rather than a constraint error.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails (including
    /// foreign key violations for a vanished post or user).
    pub async fn create(
        &self,
        post_id: PostId,
        author_id: UserId,
        text: &str,
    ) -> Result<Comment, RepositoryError> {
        #[derive(sqlx::FromRow)]
        struct CommentRow {
            id: i64,
            post_id: i64,
            author_id: i64,
            text: String,
        }

        let row = sqlx::query_as::<_, CommentRow>(
            "INSERT INTO comments (text, post_id, author_id) \
             VALUES (?, ?, ?) \
             RETURNING id, post_id, author_id, text",
        )
        .bind(text)
        .bind(post_id.as_i64())
        .bind(author_id.as_i64())
        .fetch_one(self.pool)
        .await?;

        Ok(Comment {
            id: CommentId::new(row.id),
            post_id: PostId::new(row.post_id),
            author_id: UserId::new(row.author_id),
            text: row.text,
        })
    }
}
