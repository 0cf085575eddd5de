pub mod clothing_item;
pub mod collection;
pub mod document;
pub mod filters;
pub mod option_fields;
pub mod outfit;
pub mod stats;
pub mod user_profile;
