pub mod clothing_item;
pub mod collection;
pub mod document_store;
pub mod outfit;
pub mod store_repo;
pub mod user;
