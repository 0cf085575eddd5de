pub mod clothing;
pub mod collections;
pub mod extractors;
pub mod filters;
pub mod outfits;
pub mod profile;
pub mod resolver;
pub mod stats;
