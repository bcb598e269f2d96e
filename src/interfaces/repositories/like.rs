use crate::entities::like::{CommentLike, PostLike};
use crate::middleware::error::AppResult;
use async_trait::async_trait;

#[async_trait]
pub trait LikesRepositoryInterface {
    async fn find_post_like_count(&self, post_id: &str) -> AppResult<usize>;
    /// `Ok(true)` when the like exists, `NotFound` when it doesn't.
    async fn is_post_liked(&self, post_id: &str, user_id: &str) -> AppResult<bool>;
    async fn create_post_like(&self, like: PostLike) -> AppResult<bool>;
    async fn delete_post_like(&self, post_id: &str, user_id: &str) -> AppResult<bool>;

    async fn find_comment_like_count(&self, comment_id: &str) -> AppResult<usize>;
    async fn is_comment_liked(&self, comment_id: &str, user_id: &str) -> AppResult<bool>;
    async fn create_comment_like(&self, like: CommentLike) -> AppResult<bool>;
    async fn delete_comment_like(&self, comment_id: &str, user_id: &str) -> AppResult<bool>;

    /// Post ids liked by the user. Comment likes are not listed.
    async fn find_user_likes(&self, user_id: &str) -> AppResult<Vec<String>>;
}
