//! Route builder.

use crate::error::{RouterError, RouterResult};
use crate::handler::Handler;
use crate::path::{Path, SEPARATOR};
use crate::route::{IdGenerator, Route, UuidGenerator};

/// Accumulates the parts of a [`Route`].
///
/// The final path is the prefix followed by the path, except that a `/`
/// path under a non-root prefix yields the prefix itself (`/auth`, never
/// `/auth/`), so it matches the normalized URL.
///
/// # Examples
///
/// ```ignore
/// use multiview_urls::RouteBuilder;
///
/// let route = RouteBuilder::new()
///     .with_prefix("/auth")
///     .with_path("/login")
///     .with_handler(ComponentClass::of::<Login>())
///     .as_index()
///     .build()?;
///
/// assert_eq!(route.path().full(), "/auth/login");
/// ```
#[derive(Debug, Clone, Default)]
pub struct RouteBuilder {
	prefix: Option<String>,
	path: Option<Path>,
	handler: Option<Handler>,
	index: bool,
}

impl RouteBuilder {
	/// Creates an empty builder with the root prefix.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the prefix prepended to the path.
	pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
		self.prefix = Some(prefix.into());
		self
	}

	/// Sets the path, either a literal or a [`Path`] with parameter rules.
	pub fn with_path(mut self, path: impl Into<Path>) -> Self {
		self.path = Some(path.into());
		self
	}

	/// Sets the handler.
	///
	/// A `(view, method)` tuple selects the method to invoke.
	pub fn with_handler(mut self, handler: impl Into<Handler>) -> Self {
		self.handler = Some(handler.into());
		self
	}

	/// Marks the route as the index of its router.
	pub fn as_index(mut self) -> Self {
		self.index = true;
		self
	}

	/// Returns the configured prefix, if any.
	pub fn prefix(&self) -> Option<&str> {
		self.prefix.as_deref()
	}

	/// Builds the route with a random identifier.
	///
	/// # Errors
	///
	/// See [`build_with`](Self::build_with).
	pub fn build(self) -> RouterResult<Route> {
		self.build_with(&UuidGenerator)
	}

	/// Builds the route with an identifier from `ids`.
	///
	/// The final path is the prefix, without its trailing separator,
	/// followed by the configured path. A root path (`/`) under a non-root
	/// prefix yields the prefix itself.
	///
	/// # Errors
	///
	/// Returns [`RouterError::Configuration`] when the path or the handler
	/// is missing, and [`RouterError::InvalidPattern`] when the final path
	/// does not compile.
	pub fn build_with(self, ids: &dyn IdGenerator) -> RouterResult<Route> {
		let (mut path, handler) = match (self.path, self.handler) {
			(Some(path), Some(handler)) => (path, handler),
			(None, None) => {
				return Err(RouterError::Configuration(
					"RouteBuilder is not fully configured: path and handler are missing".to_string(),
				));
			}
			(None, Some(_)) => {
				return Err(RouterError::Configuration(
					"RouteBuilder is not fully configured: path is missing".to_string(),
				));
			}
			(Some(path), None) => {
				return Err(RouterError::Configuration(format!(
					"RouteBuilder is not fully configured: handler is missing for '{}'",
					path
				)));
			}
		};

		let prefix = self.prefix.as_deref().unwrap_or("/");
		let prefix = prefix.trim_end_matches(SEPARATOR);
		if !prefix.is_empty() {
			if path.full() == "/" {
				path = Path::default();
			}
			for segment in Path::from_literal(prefix).segments().iter().rev() {
				path.prepend(segment.clone());
			}
		}

		path.pattern()?;

		let route = Route::new(ids.generate(), path, handler, self.index);
		tracing::debug!(
			id = %route.id(),
			path = %route.path(),
			index = route.is_index(),
			"built route"
		);
		Ok(route)
	}
}
