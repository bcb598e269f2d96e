use crate::database::client::Db;
use crate::database::document_store::DocumentStore;
use crate::database::filter::Filter;
use crate::entities::like::{CommentLike, LikeRecord, PostLike, USER_FIELD};
use crate::interfaces::repositories::like::LikesRepositoryInterface;
use crate::middleware::error::{AppError, AppResult};
use async_trait::async_trait;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct LikesRepository {
    client: Arc<Db>,
    store: Arc<DocumentStore>,
}

impl LikesRepository {
    pub fn new(client: Arc<Db>, store: Arc<DocumentStore>) -> Self {
        Self { client, store }
    }

    /// One like per (subject, user) pair, enforced by the database.
    pub(in crate::database) async fn mutate_db(&self) -> Result<(), AppError> {
        let sql = format!(
            "{}{}",
            unique_like_index::<PostLike>(),
            unique_like_index::<CommentLike>()
        );
        self.client.query(sql).await?.check()?;
        Ok(())
    }

    fn match_filter<L: LikeRecord>(subject_id: &str, user_id: &str) -> Filter {
        Filter::field(L::SUBJECT_FIELD, subject_id).and(USER_FIELD, user_id)
    }

    async fn count<L: LikeRecord>(&self, subject_id: &str) -> AppResult<usize> {
        let likes = self
            .store
            .query_all_by_field::<L>(L::COLLECTION, L::SUBJECT_FIELD, subject_id)
            .await?;
        Ok(likes.len())
    }

    async fn is_liked<L: LikeRecord>(&self, subject_id: &str, user_id: &str) -> AppResult<bool> {
        let filter = Self::match_filter::<L>(subject_id, user_id);
        self.store.query_one::<L>(L::COLLECTION, &filter).await?;
        Ok(true)
    }

    async fn create<L: LikeRecord>(&self, like: L) -> AppResult<bool> {
        let filter = Self::match_filter::<L>(like.subject_id(), like.user_id());
        match self.store.upsert(L::COLLECTION, &filter, &like).await {
            Ok(_) => Ok(true),
            // a concurrent like for the same pair got there first
            Err(err) if err.is_store() => {
                match self.is_liked::<L>(like.subject_id(), like.user_id()).await {
                    Ok(true) => Ok(true),
                    _ => Err(err),
                }
            }
            Err(err) => Err(err),
        }
    }

    async fn delete<L: LikeRecord>(&self, subject_id: &str, user_id: &str) -> AppResult<bool> {
        let filter = Self::match_filter::<L>(subject_id, user_id);
        self.store.delete(L::COLLECTION, &filter).await?;
        Ok(true)
    }
}

#[async_trait]
impl LikesRepositoryInterface for LikesRepository {
    async fn find_post_like_count(&self, post_id: &str) -> AppResult<usize> {
        self.count::<PostLike>(post_id).await
    }

    async fn is_post_liked(&self, post_id: &str, user_id: &str) -> AppResult<bool> {
        self.is_liked::<PostLike>(post_id, user_id).await
    }

    async fn create_post_like(&self, like: PostLike) -> AppResult<bool> {
        self.create(like).await
    }

    async fn delete_post_like(&self, post_id: &str, user_id: &str) -> AppResult<bool> {
        self.delete::<PostLike>(post_id, user_id).await
    }

    async fn find_comment_like_count(&self, comment_id: &str) -> AppResult<usize> {
        self.count::<CommentLike>(comment_id).await
    }

    async fn is_comment_liked(&self, comment_id: &str, user_id: &str) -> AppResult<bool> {
        self.is_liked::<CommentLike>(comment_id, user_id).await
    }

    async fn create_comment_like(&self, like: CommentLike) -> AppResult<bool> {
        self.create(like).await
    }

    async fn delete_comment_like(&self, comment_id: &str, user_id: &str) -> AppResult<bool> {
        self.delete::<CommentLike>(comment_id, user_id).await
    }

    async fn find_user_likes(&self, user_id: &str) -> AppResult<Vec<String>> {
        let likes = self
            .store
            .query_all_by_field::<PostLike>(PostLike::COLLECTION, USER_FIELD, user_id)
            .await?;
        Ok(likes.into_iter().map(|like| like.post_id).collect())
    }
}

fn unique_like_index<L: LikeRecord>() -> String {
    let table = L::COLLECTION;
    let subject = L::SUBJECT_FIELD;
    format!(
        "DEFINE INDEX IF NOT EXISTS {table}_{subject}_{USER_FIELD}_unique_idx ON {table} \
         FIELDS {subject}, {USER_FIELD} UNIQUE;\n"
    )
}
