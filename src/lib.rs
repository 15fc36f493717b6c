//! # Multiview
//!
//! Client-side routing and view rendering for single-page applications.
//!
//! A URL path is resolved against an ordered tree of routers. The matched
//! route names a view type and method; the renderer constructs the view,
//! composes its output with the router's layout and writes the result into
//! a mount element of an in-memory document.
//!
//! ## Feature Flags
//!
//! - `urls` - paths, routes, routers and the router tree
//! - `pages` - the renderer and application bootstrap (enables `urls`)
//! - `full` (default) - everything
//!
//! ## Quick Example
//!
//! ```rust,ignore
//! use multiview::prelude::*;
//!
//! #[derive(Default)]
//! struct Home;
//!
//! impl Component for Home {
//!     fn render(&self) -> Rendered {
//!         Some(RenderOutput::page(Head::new().with_title("Home"), "Welcome"))
//!     }
//! }
//!
//! let document = Document::new();
//! let mut app = Application::new(
//!     "docs",
//!     "1.0.0",
//!     ApplicationOptions::new()
//!         .with_document(document.clone())
//!         .with_element(document.body()),
//! )
//! .router(Router::default().add_route(("/", ComponentClass::of::<Home>())));
//!
//! app.start("/").await?;
//! assert_eq!(document.title(), "Home");
//! ```

pub mod core;
#[cfg(feature = "pages")]
pub mod pages;
#[cfg(feature = "urls")]
pub mod urls;

pub use multiview_core::{
	Component, ComponentClass, Document, Head, Layout, LayoutClass, Lazy, LoadError, Memo, Node,
	PageOutput, RenderOutput, Rendered, Signal, StyleSheet, Subscription,
};

#[cfg(feature = "urls")]
pub use multiview_urls::{
	Handler, Path, PathParams, PathSegment, Route, RouteBuilder, RouteId, RouteLiteral, RouteMatch,
	Router, RouterError, RouterOptions, RouterResult, RouterTree,
};

#[cfg(feature = "pages")]
pub use multiview_pages::{
	Application, ApplicationError, ApplicationOptions, ApplicationResult, RenderError,
	RenderResult, Renderer,
};

/// Commonly used types.
pub mod prelude {
	pub use crate::{
		Component, ComponentClass, Document, Head, Layout, LayoutClass, Lazy, Memo, Node,
		RenderOutput, Rendered, Signal,
	};

	// External
	pub use async_trait::async_trait;
	pub use serde::{Deserialize, Serialize};

	#[cfg(feature = "urls")]
	pub use crate::{Path, PathSegment, RouteBuilder, RouteLiteral, Router, RouterOptions, RouterTree};
	#[cfg(feature = "urls")]
	pub use multiview_urls::dsl::{
		param, param_double, param_enum, param_float, param_int, param_number, param_str,
	};
	#[cfg(feature = "urls")]
	pub use multiview_urls::path;

	#[cfg(feature = "pages")]
	pub use crate::{Application, ApplicationOptions, Renderer};
}
