use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::entities::like::{CommentLike, PostLike};
use crate::interfaces::repositories::like::LikesRepositoryInterface;
use crate::middleware::auth_user::AuthUser;
use crate::middleware::error::{CtxError, CtxResult};
use crate::middleware::mw_ctx::CtxState;

/// Name this service presents to the auth service.
pub const SERVICE_NAME: &str = "like-service";

pub fn routes() -> Router<Arc<CtxState>> {
    Router::new()
        .route("/ping", get(ping))
        .route("/like-service/postcount", get(post_like_count))
        .route(
            "/like-service/post",
            get(is_post_liked).post(like_post).delete(unlike_post),
        )
        .route("/like-service/commentcount", get(comment_like_count))
        .route(
            "/like-service/comment",
            get(is_comment_liked)
                .post(like_comment)
                .delete(unlike_comment),
        )
        .route("/like-service/user", get(user_likes))
        .route("/internal/post", post(internal_like_post))
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct PostQuery {
    #[serde(default)]
    pub postid: String,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct CommentQuery {
    #[serde(default)]
    pub commentid: String,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct InternalPostQuery {
    #[serde(default)]
    pub uid: String,
    #[serde(default)]
    pub postid: String,
}

async fn ping() -> &'static str {
    "OK"
}

#[instrument(name = "get postlike count", skip_all, fields(post_id = %q.postid))]
async fn post_like_count(
    _user: AuthUser,
    State(state): State<Arc<CtxState>>,
    Query(q): Query<PostQuery>,
) -> CtxResult<String> {
    let count = state
        .db
        .likes
        .find_post_like_count(&q.postid)
        .await
        .map_err(CtxError::with(StatusCode::NOT_FOUND, "like not found"))?;
    Ok(count.to_string())
}

#[instrument(name = "get post like", skip_all, fields(post_id = %q.postid))]
async fn is_post_liked(
    user: AuthUser,
    State(state): State<Arc<CtxState>>,
    Query(q): Query<PostQuery>,
) -> CtxResult<String> {
    let liked = state
        .db
        .likes
        .is_post_liked(&q.postid, &user.uid)
        .await
        .map_err(CtxError::with(StatusCode::NOT_FOUND, "like not found"))?;
    Ok(liked.to_string())
}

#[instrument(name = "like post", skip_all, fields(post_id = %q.postid))]
async fn like_post(
    user: AuthUser,
    State(state): State<Arc<CtxState>>,
    Query(q): Query<PostQuery>,
) -> CtxResult<&'static str> {
    state
        .db
        .likes
        .create_post_like(PostLike::new(&user.uid, &q.postid))
        .await
        .map_err(CtxError::with(
            StatusCode::INTERNAL_SERVER_ERROR,
            "create like error",
        ))?;
    Ok("Liked")
}

#[instrument(name = "unlike post", skip_all, fields(post_id = %q.postid))]
async fn unlike_post(
    user: AuthUser,
    State(state): State<Arc<CtxState>>,
    Query(q): Query<PostQuery>,
) -> CtxResult<&'static str> {
    state
        .db
        .likes
        .delete_post_like(&q.postid, &user.uid)
        .await
        .map_err(CtxError::with(
            StatusCode::INTERNAL_SERVER_ERROR,
            "delete like error",
        ))?;
    Ok("deleted")
}

#[instrument(name = "get comment like count", skip_all, fields(comment_id = %q.commentid))]
async fn comment_like_count(
    _user: AuthUser,
    State(state): State<Arc<CtxState>>,
    Query(q): Query<CommentQuery>,
) -> CtxResult<String> {
    let count = state
        .db
        .likes
        .find_comment_like_count(&q.commentid)
        .await
        .map_err(CtxError::with(
            StatusCode::NOT_FOUND,
            "comment like not found",
        ))?;
    Ok(count.to_string())
}

#[instrument(name = "get comment like", skip_all, fields(comment_id = %q.commentid))]
async fn is_comment_liked(
    user: AuthUser,
    State(state): State<Arc<CtxState>>,
    Query(q): Query<CommentQuery>,
) -> CtxResult<String> {
    let liked = state
        .db
        .likes
        .is_comment_liked(&q.commentid, &user.uid)
        .await
        .map_err(CtxError::with(
            StatusCode::NOT_FOUND,
            "comment like not found",
        ))?;
    Ok(liked.to_string())
}

#[instrument(name = "like comment", skip_all, fields(comment_id = %q.commentid))]
async fn like_comment(
    user: AuthUser,
    State(state): State<Arc<CtxState>>,
    Query(q): Query<CommentQuery>,
) -> CtxResult<&'static str> {
    state
        .db
        .likes
        .create_comment_like(CommentLike::new(&user.uid, &q.commentid))
        .await
        .map_err(CtxError::with(
            StatusCode::INTERNAL_SERVER_ERROR,
            "create like error",
        ))?;
    Ok("Liked")
}

#[instrument(name = "unlike comment", skip_all, fields(comment_id = %q.commentid))]
async fn unlike_comment(
    user: AuthUser,
    State(state): State<Arc<CtxState>>,
    Query(q): Query<CommentQuery>,
) -> CtxResult<&'static str> {
    state
        .db
        .likes
        .delete_comment_like(&q.commentid, &user.uid)
        .await
        .map_err(CtxError::with(
            StatusCode::INTERNAL_SERVER_ERROR,
            "error delete like",
        ))?;
    Ok("deleted")
}

#[instrument(name = "get user like", skip_all, fields(uid = %user.uid))]
async fn user_likes(
    user: AuthUser,
    State(state): State<Arc<CtxState>>,
) -> CtxResult<Json<Vec<String>>> {
    let post_ids = state
        .db
        .likes
        .find_user_likes(&user.uid)
        .await
        .map_err(CtxError::with(StatusCode::NOT_FOUND, "not found"))?;
    Ok(Json(post_ids))
}

// called by other services, no session
#[instrument(name = "internal generate like post", skip_all, fields(uid = %q.uid, post_id = %q.postid))]
async fn internal_like_post(
    State(state): State<Arc<CtxState>>,
    Query(q): Query<InternalPostQuery>,
) -> CtxResult<&'static str> {
    state
        .db
        .likes
        .create_post_like(PostLike::new(&q.uid, &q.postid))
        .await
        .map_err(CtxError::with(
            StatusCode::INTERNAL_SERVER_ERROR,
            "error create post like",
        ))?;
    Ok("Liked")
}
