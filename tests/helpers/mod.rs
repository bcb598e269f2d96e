use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::http::{header, HeaderValue};
use axum_test::{TestRequest, TestServer};
use fake::{faker, Fake};
use like_service::database::client::{Database, DbConfig};
use like_service::entities::user_auth::UserAuthData;
use like_service::init;
use like_service::interfaces::auth::AuthServiceInterface;
use like_service::middleware::error::{AppError, AppResult};
use like_service::middleware::mw_ctx::{create_ctx_state, CtxState};

pub const VALID_TOKEN_PREFIX: &str = "valid-";

#[macro_export]
macro_rules! test_with_db {
    ($name:ident, |$db:ident| $body:block) => {
        #[tokio::test(flavor = "multi_thread")]
        async fn $name() {
            let $db = $crate::helpers::init_test_db().await;
            $body
        }
    };
}

#[allow(dead_code)]
pub async fn init_test_db() -> Database {
    Database::connect(DbConfig {
        url: "mem://",
        database: "test",
        namespace: "test",
        username: None,
        password: None,
        timeout: Duration::from_secs(5),
    })
    .await
    .expect("in-memory db should connect")
}

/// Accepts `valid-<uid>` tokens and rejects everything else.
pub struct MockAuthService;

#[async_trait]
impl AuthServiceInterface for MockAuthService {
    async fn check(&self, _service: &str, token: &str) -> AppResult<UserAuthData> {
        match token.strip_prefix(VALID_TOKEN_PREFIX) {
            Some(uid) if !uid.is_empty() => Ok(UserAuthData {
                uid: uid.to_string(),
                email: format!("{uid}@email.com"),
                role: "standard".to_string(),
                created: "2020-01-01T00:00:00".to_string(),
            }),
            _ => Err(AppError::AuthenticationFail),
        }
    }
}

#[allow(dead_code)]
pub async fn create_test_server() -> (TestServer, Arc<CtxState>) {
    let db = init_test_db().await;
    let ctx_state = create_ctx_state(db, Arc::new(MockAuthService));
    let server =
        TestServer::new(init::main_router(&ctx_state)).expect("Failed to create test server");
    (server, ctx_state)
}

#[allow(dead_code)]
pub fn with_token(request: TestRequest, uid: &str) -> TestRequest {
    let cookie = format!("token={VALID_TOKEN_PREFIX}{uid}");
    request.add_header(
        header::COOKIE,
        HeaderValue::from_str(&cookie).expect("valid cookie header"),
    )
}

#[allow(dead_code)]
pub fn fake_id(prefix: &str) -> String {
    let word = faker::lorem::en::Word().fake::<String>();
    let n = (1..100_000u32).fake::<u32>();
    format!("{prefix}-{word}-{n}")
}
