pub const POST_LIKE_TABLE_NAME: &str = "postlike";
pub const COMMENT_LIKE_TABLE_NAME: &str = "commentlike";
