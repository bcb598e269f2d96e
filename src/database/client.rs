use std::sync::Arc;
use std::time::Duration;

use surrealdb::engine::any::{connect, Any};
use surrealdb::opt::auth::Root;
use surrealdb::Surreal;
use tracing::info;

use crate::database::document_store::DocumentStore;
use crate::database::repositories::like::LikesRepository;
use crate::middleware::error::AppResult;

pub type Db = Surreal<Any>;

#[derive(Debug)]
pub struct DbConfig<'a> {
    pub url: &'a str,
    pub database: &'a str,
    pub namespace: &'a str,
    pub username: Option<&'a str>,
    pub password: Option<&'a str>,
    /// Upper bound for every single store call.
    pub timeout: Duration,
}

#[derive(Debug)]
pub struct Database {
    pub store: Arc<DocumentStore>,
    pub likes: LikesRepository,
}

impl Database {
    pub async fn connect(config: DbConfig<'_>) -> AppResult<Self> {
        info!(
            "->> connecting DB url={} ns={} db={}",
            config.url, config.namespace, config.database
        );
        let conn = connect(config.url).await?;

        if let (Some(username), Some(password)) = (config.username, config.password) {
            conn.signin(Root { username, password }).await?;
        }

        conn.use_ns(config.namespace)
            .use_db(config.database)
            .await?;

        let version = conn.version().await?;
        info!("->> connected DB version: {version}");

        let client = Arc::new(conn);
        let store = Arc::new(DocumentStore::new(client.clone(), config.timeout));
        let likes = LikesRepository::new(client, store.clone());
        likes.mutate_db().await?;

        Ok(Self { store, likes })
    }
}
