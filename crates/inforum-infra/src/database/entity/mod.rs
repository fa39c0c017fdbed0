//! SeaORM entities.

pub mod blog_post;
pub mod category;
pub mod comment;
pub mod home;
pub mod star;
pub mod sub_comment;
