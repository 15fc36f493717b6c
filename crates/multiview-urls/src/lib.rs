//! # Multiview URLs
//!
//! Path matching and route resolution for the Multiview single-page
//! framework.
//!
//! ## Overview
//!
//! - [`Path`] / [`PathSegment`]: tokenized paths with literal and dynamic
//!   (`/{name}`) segments, each dynamic segment checked by a validation rule
//! - [`RouteBuilder`] / [`Route`]: immutable routes with generated ids
//! - [`Router`]: routes sharing a prefix and an optional layout
//! - [`RouterTree`]: first-match-wins resolution of a URL path, with lazily
//!   loaded routers
//! - [`dsl`]: `path!` and typed `param_*` shorthands
//!
//! ## Example
//!
//! ```ignore
//! use multiview_urls::{Router, RouterOptions, RouterTree, RouteLiteral};
//!
//! let mut tree = RouterTree::new();
//! tree.add(
//!     Router::new(RouterOptions::new().with_prefix("/auth"))
//!         .add_route(RouteLiteral::new("/login", ComponentClass::of::<Login>()).index()),
//! );
//!
//! let matched = tree.match_path("/auth").await?;
//! assert_eq!(matched.route.path().full(), "/auth/login");
//! ```

#![warn(missing_docs)]

pub mod builder;
pub mod dsl;
pub mod error;
pub mod handler;
pub mod path;
pub mod route;
pub mod router;
pub mod tree;

pub use builder::RouteBuilder;
pub use error::{RouterError, RouterResult};
pub use handler::{Handler, ResolvedHandler};
pub use path::{Path, PathParams, PathSegment};
pub use route::{IdGenerator, Route, RouteId, SequentialIdGenerator, UuidGenerator};
pub use router::{RouteDefinition, RouteLiteral, Router, RouterOptions};
pub use tree::{LazyRouters, RouteMatch, RouterSource, RouterTree};
