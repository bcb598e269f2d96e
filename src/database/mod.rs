pub mod client;
pub mod document_store;
pub mod filter;
pub mod repositories;
pub mod table_names;
