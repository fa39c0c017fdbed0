//! Domain entities - the core business objects.

mod blog_post;
mod cascade;
mod category;
mod comment;
mod home;
mod page;
mod role;
mod star;

pub use blog_post::{BlogPost, BlogPostChanges, NewBlogPost, PostQuery};
pub use cascade::{CASCADE_ORDER, CascadeReport, Dependent};
pub use category::{Category, NewCategory};
pub use comment::{Comment, NewComment, NewSubComment, SubComment};
pub use home::{Home, NewHome};
pub use page::{Page, PaginationMetadata};
pub use role::Role;
pub use star::{Star, StarChange, StarToggle};
