//! The render pipeline and application bootstrap.

pub use multiview_pages::*;
