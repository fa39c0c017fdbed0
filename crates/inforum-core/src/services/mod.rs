//! Application services - business operations composed over the ports.

mod posts;

pub use posts::{PostContent, PostService};
