//! Path matching and route resolution.
//!
//! # Examples
//!
//! ```rust,ignore
//! use multiview::urls::{Router, RouterOptions, RouterTree, RouteLiteral};
//!
//! let mut tree = RouterTree::new();
//! tree.add(
//!     Router::new(RouterOptions::new().with_prefix("/auth"))
//!         .add_route(RouteLiteral::new("/login", ComponentClass::of::<Login>()).index()),
//! );
//! let matched = tree.match_path("/auth").await?;
//! ```

pub use multiview_urls::*;
