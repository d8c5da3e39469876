//! Post and comment domain types.

use crate::models::{CommentId, PostId, UserId};

/// A blog post.
#[derive(Debug, Clone)]
pub struct Post {
    /// Unique post ID.
    pub id: PostId,
    /// The authoring user.
    pub author_id: UserId,
    /// Post title, unique across all posts.
    pub title: String,
    /// Short subtitle shown on the listing.
    pub subtitle: String,
    /// Human-readable publication date ("August 06, 2026").
    ///
    /// Stored as the display string, not a sortable type; it is stamped once
    /// at creation and never touched by edits.
    pub date: String,
    /// Free-text body.
    pub body: String,
    /// URL of the header image.
    pub img_url: String,
}

/// A comment on a post.
#[derive(Debug, Clone)]
pub struct Comment {
    /// Unique comment ID.
    pub id: CommentId,
    /// The post this comment belongs to.
    pub post_id: PostId,
    /// The commenting user.
    pub author_id: UserId,
    /// Comment text.
    pub text: String,
}

/// A comment joined with its author's display name, ready for rendering.
#[derive(Debug, Clone)]
pub struct CommentView {
    /// Unique comment ID.
    pub id: CommentId,
    /// Comment text.
    pub text: String,
    /// Display name of the commenting user.
    pub author_name: String,
}
