//! Routers: groups of routes sharing a prefix and a layout.

use crate::builder::RouteBuilder;
use crate::error::RouterResult;
use crate::handler::Handler;
use crate::path::Path;
use crate::route::{IdGenerator, Route, RouteId, UuidGenerator};
use multiview_core::component::LazyLayout;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

/// Router configuration.
#[derive(Debug, Clone, Default)]
pub struct RouterOptions {
	/// Layout wrapping the output of every route of the router.
	pub layout: Option<LazyLayout>,
	/// Prefix of every route path. Defaults to `/`.
	pub prefix: Option<String>,
}

impl RouterOptions {
	/// Creates empty options.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the layout.
	pub fn with_layout(mut self, layout: LazyLayout) -> Self {
		self.layout = Some(layout);
		self
	}

	/// Sets the prefix.
	pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
		self.prefix = Some(prefix.into());
		self
	}
}

/// A route given as plain data.
#[derive(Debug, Clone)]
pub struct RouteLiteral {
	/// Route path, relative to the router prefix.
	pub path: Path,
	/// Route handler.
	pub handler: Handler,
	/// Whether the route also answers the bare router prefix.
	pub index: bool,
}

impl RouteLiteral {
	/// Creates a non-index route literal.
	pub fn new(path: impl Into<Path>, handler: impl Into<Handler>) -> Self {
		Self {
			path: path.into(),
			handler: handler.into(),
			index: false,
		}
	}

	/// Marks the route as an index route.
	pub fn index(mut self) -> Self {
		self.index = true;
		self
	}
}

/// The accepted forms of [`Router::add_route`].
#[derive(Debug, Clone)]
pub enum RouteDefinition {
	/// A configured builder. The router prefix applies unless the builder
	/// sets its own.
	Builder(RouteBuilder),
	/// A route literal.
	Literal(RouteLiteral),
	/// A `(path, handler)` pair.
	Pair(Path, Handler),
}

impl From<RouteBuilder> for RouteDefinition {
	fn from(builder: RouteBuilder) -> Self {
		Self::Builder(builder)
	}
}

impl From<RouteLiteral> for RouteDefinition {
	fn from(literal: RouteLiteral) -> Self {
		Self::Literal(literal)
	}
}

impl<P, H> From<(P, H)> for RouteDefinition
where
	P: Into<Path>,
	H: Into<Handler>,
{
	fn from((path, handler): (P, H)) -> Self {
		Self::Pair(path.into(), handler.into())
	}
}

/// A collection of routes sharing a prefix and an optional layout.
///
/// # Examples
///
/// ```ignore
/// use multiview_urls::{Router, RouterOptions, RouteLiteral};
///
/// let router = Router::new(RouterOptions::new().with_prefix("/auth"))
///     .add_route(RouteLiteral::new("/login", ComponentClass::of::<Login>()).index())
///     .add_route(("/logout", ComponentClass::of::<Logout>()));
///
/// assert_eq!(router.route_count(), 2);
/// ```
pub struct Router {
	prefix: String,
	layout: Option<LazyLayout>,
	routes: Vec<Route>,
	by_id: HashMap<RouteId, usize>,
	ids: Rc<dyn IdGenerator>,
}

impl Default for Router {
	fn default() -> Self {
		Self::new(RouterOptions::default())
	}
}

impl Router {
	/// Creates a router from options.
	pub fn new(options: RouterOptions) -> Self {
		Self {
			prefix: options.prefix.unwrap_or_else(|| "/".to_string()),
			layout: options.layout,
			routes: Vec::new(),
			by_id: HashMap::new(),
			ids: Rc::new(UuidGenerator),
		}
	}

	/// Replaces the route identifier generator.
	pub fn with_id_generator(mut self, ids: impl IdGenerator + 'static) -> Self {
		self.ids = Rc::new(ids);
		self
	}

	/// Returns the prefix.
	pub fn prefix(&self) -> &str {
		&self.prefix
	}

	/// Returns whether the prefix is non-empty.
	pub fn has_prefix(&self) -> bool {
		!self.prefix.is_empty()
	}

	/// Returns the layout.
	pub fn layout(&self) -> Option<&LazyLayout> {
		self.layout.as_ref()
	}

	/// Iterates over the routes in insertion order.
	pub fn routes(&self) -> impl Iterator<Item = &Route> {
		self.routes.iter()
	}

	/// Returns the route with the given identifier.
	pub fn route(&self, id: &RouteId) -> Option<&Route> {
		self.by_id.get(id).map(|&idx| &self.routes[idx])
	}

	/// Returns the number of routes.
	pub fn route_count(&self) -> usize {
		self.routes.len()
	}

	/// Adds a route and returns the router (builder style).
	///
	/// # Panics
	///
	/// Panics if the route is not fully configured or its path is invalid.
	/// Use [`try_add_route`](Self::try_add_route) for fallible registration.
	pub fn add_route(mut self, route: impl Into<RouteDefinition>) -> Self {
		if let Err(e) = self.try_add_route(route) {
			panic!("Invalid route: {}", e);
		}
		self
	}

	/// Adds a route.
	///
	/// # Errors
	///
	/// Returns the [`RouteBuilder::build`] error when the route cannot be
	/// built.
	pub fn try_add_route(&mut self, route: impl Into<RouteDefinition>) -> RouterResult<RouteId> {
		let builder = match route.into() {
			RouteDefinition::Builder(builder) if builder.prefix().is_some() => builder,
			RouteDefinition::Builder(builder) => builder.with_prefix(self.prefix.clone()),
			RouteDefinition::Literal(literal) => {
				let builder = RouteBuilder::new()
					.with_prefix(self.prefix.clone())
					.with_path(literal.path)
					.with_handler(literal.handler);
				if literal.index {
					builder.as_index()
				} else {
					builder
				}
			}
			RouteDefinition::Pair(path, handler) => RouteBuilder::new()
				.with_prefix(self.prefix.clone())
				.with_path(path)
				.with_handler(handler),
		};

		let route = builder.build_with(self.ids.as_ref())?;
		let id = route.id().clone();
		self.by_id.insert(id.clone(), self.routes.len());
		self.routes.push(route);
		Ok(id)
	}
}

impl fmt::Debug for Router {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Router")
			.field("prefix", &self.prefix)
			.field("has_layout", &self.layout.is_some())
			.field("routes", &self.routes.len())
			.finish()
	}
}
