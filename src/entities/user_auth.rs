use serde::{Deserialize, Serialize};

/// Identity resolved by the authentication service for a session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAuthData {
    pub uid: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub created: String,
}
