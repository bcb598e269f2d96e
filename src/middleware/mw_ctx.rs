use std::fmt::{Debug, Formatter};
use std::sync::Arc;

use crate::database::client::Database;
use crate::interfaces::auth::AuthServiceInterface;

pub const TOKEN_KEY: &str = "token";

pub struct CtxState {
    pub db: Database,
    pub auth: Arc<dyn AuthServiceInterface + Send + Sync>,
}

impl Debug for CtxState {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CtxState").field("db", &self.db).finish()
    }
}

pub fn create_ctx_state(
    db: Database,
    auth: Arc<dyn AuthServiceInterface + Send + Sync>,
) -> Arc<CtxState> {
    Arc::new(CtxState { db, auth })
}
