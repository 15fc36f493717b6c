//! Routes and route identifiers.

use crate::handler::Handler;
use crate::path::Path;
use std::cell::Cell;
use std::fmt;

/// Opaque, unique identifier of a route.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RouteId(String);

impl RouteId {
	/// Wraps an identifier string.
	pub fn new(id: impl Into<String>) -> Self {
		Self(id.into())
	}

	/// Returns the identifier as a string.
	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for RouteId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

/// Source of route identifiers.
pub trait IdGenerator {
	/// Returns an identifier never returned before by this generator.
	fn generate(&self) -> RouteId;
}

/// Generates random v4 UUIDs.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
	fn generate(&self) -> RouteId {
		RouteId(uuid::Uuid::new_v4().to_string())
	}
}

/// Generates `route-1`, `route-2`, ... in order.
#[derive(Debug, Default)]
pub struct SequentialIdGenerator {
	next: Cell<u64>,
}

impl SequentialIdGenerator {
	/// Creates a generator starting at `route-1`.
	pub fn new() -> Self {
		Self::default()
	}
}

impl IdGenerator for SequentialIdGenerator {
	fn generate(&self) -> RouteId {
		let next = self.next.get() + 1;
		self.next.set(next);
		RouteId(format!("route-{}", next))
	}
}

/// An immutable route: identifier, path, handler and index flag.
///
/// An index route also answers the bare prefix of the router owning it.
#[derive(Debug, Clone)]
pub struct Route {
	id: RouteId,
	path: Path,
	handler: Handler,
	index: bool,
}

impl Route {
	pub(crate) fn new(id: RouteId, path: Path, handler: Handler, index: bool) -> Self {
		Self {
			id,
			path,
			handler,
			index,
		}
	}

	/// Returns the route identifier.
	pub fn id(&self) -> &RouteId {
		&self.id
	}

	/// Returns the full path, router prefix included.
	pub fn path(&self) -> &Path {
		&self.path
	}

	/// Returns the handler.
	pub fn handler(&self) -> &Handler {
		&self.handler
	}

	/// Returns whether this is an index route.
	pub fn is_index(&self) -> bool {
		self.index
	}
}
