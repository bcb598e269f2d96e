use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use ulid::Ulid;

use crate::database::table_names::{COMMENT_LIKE_TABLE_NAME, POST_LIKE_TABLE_NAME};

/// Stored name of the user reference, shared by every like kind.
pub const USER_FIELD: &str = "uid";

/// A like of one subject by one user. Filters for a kind are built only from these
/// constants so they always name the persisted fields.
pub trait LikeRecord: Serialize + DeserializeOwned + Send + Sync + 'static {
    const COLLECTION: &'static str;
    /// Stored name of the subject reference.
    const SUBJECT_FIELD: &'static str;

    fn subject_id(&self) -> &str;
    fn user_id(&self) -> &str;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostLike {
    pub id: String,
    #[serde(rename = "uid")]
    pub user_id: String,
    #[serde(rename = "postid")]
    pub post_id: String,
    #[serde(rename = "created")]
    pub created_at: DateTime<Utc>,
}

impl PostLike {
    pub fn new(user_id: &str, post_id: &str) -> Self {
        Self {
            id: Ulid::new().to_string(),
            user_id: user_id.to_string(),
            post_id: post_id.to_string(),
            created_at: Utc::now(),
        }
    }
}

impl LikeRecord for PostLike {
    const COLLECTION: &'static str = POST_LIKE_TABLE_NAME;
    const SUBJECT_FIELD: &'static str = "postid";

    fn subject_id(&self) -> &str {
        &self.post_id
    }

    fn user_id(&self) -> &str {
        &self.user_id
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentLike {
    pub id: String,
    #[serde(rename = "uid")]
    pub user_id: String,
    #[serde(rename = "commentid")]
    pub comment_id: String,
    #[serde(rename = "created")]
    pub created_at: DateTime<Utc>,
}

impl CommentLike {
    pub fn new(user_id: &str, comment_id: &str) -> Self {
        Self {
            id: Ulid::new().to_string(),
            user_id: user_id.to_string(),
            comment_id: comment_id.to_string(),
            created_at: Utc::now(),
        }
    }
}

impl LikeRecord for CommentLike {
    const COLLECTION: &'static str = COMMENT_LIKE_TABLE_NAME;
    const SUBJECT_FIELD: &'static str = "commentid";

    fn subject_id(&self) -> &str {
        &self.comment_id
    }

    fn user_id(&self) -> &str {
        &self.user_id
    }
}
