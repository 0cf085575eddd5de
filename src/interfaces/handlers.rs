pub mod clothing;
pub mod collections;
pub mod home;
pub mod json_error;
pub mod outfits;
pub mod profiles;
pub mod system;
