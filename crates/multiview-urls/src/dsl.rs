//! Shorthands for declaring paths and typed parameters.
//!
//! ```ignore
//! use multiview_urls::dsl::*;
//! use multiview_urls::path;
//!
//! let route = create_route_builder()
//!     .with_path(path!["/posts", param_int("id"), "/comments"])
//!     .with_handler(ComponentClass::of::<Comments>());
//! ```

use crate::builder::RouteBuilder;
use crate::path::{Path, PathSegment};
use multiview_core::validators::{
	DecimalRule, EnumRule, IntegerRule, NumberRule, Rule, StringRule,
};

/// Default decimal places of [`param_float`].
pub const FLOAT_PRECISION: usize = 2;

/// Default decimal places of [`param_double`].
pub const DOUBLE_PRECISION: usize = 4;

/// Builds a [`Path`] from literal strings and segments.
///
/// Each literal becomes a single segment, as written.
///
/// ```ignore
/// let p = path!["/users", param_int("id")];
/// assert_eq!(p.full(), "/users/{id}");
/// ```
#[macro_export]
macro_rules! path {
	($($part:expr),* $(,)?) => {
		$crate::dsl::path([$($crate::PathSegment::from($part)),*])
	};
}

/// Builds a [`Path`] from segments, without tokenizing literals.
pub fn path<I, S>(parts: I) -> Path
where
	I: IntoIterator<Item = S>,
	S: Into<PathSegment>,
{
	Path::new(parts.into_iter().map(Into::into).collect())
}

/// Creates an empty [`RouteBuilder`].
pub fn create_route_builder() -> RouteBuilder {
	RouteBuilder::new()
}

/// A dynamic segment `/{name}` checked by `rule`.
pub fn param(name: &str, rule: impl Rule + 'static) -> PathSegment {
	PathSegment::with_rule(format!("/{{{}}}", name), rule)
}

/// A non-empty string parameter.
pub fn param_str(name: &str) -> PathSegment {
	param(name, StringRule)
}

/// Alias of [`param_str`].
pub fn param_string(name: &str) -> PathSegment {
	param_str(name)
}

/// An integer parameter (a number without decimal places).
pub fn param_int(name: &str) -> PathSegment {
	param(name, IntegerRule)
}

/// Alias of [`param_int`].
pub fn param_integer(name: &str) -> PathSegment {
	param_int(name)
}

/// A numeric parameter.
pub fn param_number(name: &str) -> PathSegment {
	param(name, NumberRule)
}

/// A decimal parameter with exactly `precision` decimal places
/// ([`FLOAT_PRECISION`] when `None`).
pub fn param_float(name: &str, precision: Option<usize>) -> PathSegment {
	param(
		name,
		DecimalRule::exact(precision.unwrap_or(FLOAT_PRECISION)),
	)
}

/// A decimal parameter with exactly `precision` decimal places
/// ([`DOUBLE_PRECISION`] when `None`).
pub fn param_double(name: &str, precision: Option<usize>) -> PathSegment {
	param(
		name,
		DecimalRule::exact(precision.unwrap_or(DOUBLE_PRECISION)),
	)
}

/// A parameter restricted to `choices`.
pub fn param_enum<I, S>(name: &str, choices: I) -> PathSegment
where
	I: IntoIterator<Item = S>,
	S: Into<String>,
{
	param(name, EnumRule::new(choices))
}
