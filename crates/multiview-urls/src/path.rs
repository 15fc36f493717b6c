//! Route paths and path segments.
//!
//! A [`Path`] is an ordered list of [`PathSegment`]s. A segment is either
//! literal text (`/users`) or a named dynamic placeholder (`/{id}`) carrying
//! a validation [`Rule`].
//!
//! # Matching
//!
//! [`Path::captures`] matches a URL path in two steps:
//!
//! 1. If both full strings are equal, the match succeeds immediately and no
//!    rule runs. Literal equality always wins, even when `self` contains
//!    dynamic segments whose text happens to equal the URL.
//! 2. Otherwise `self` is compiled into an anchored pattern. Literal
//!    segments are escaped; a dynamic segment matches one non-empty
//!    segment without `/`. Every captured value is then validated by the
//!    rule of its segment, in order. The path matches only if every rule
//!    accepts its value.

use crate::error::{RouterError, RouterResult};
use multiview_core::validators::{AnyRule, Rule, ValidationResult};
use regex::{Regex, RegexBuilder};
use serde_json::Value;
use std::cell::OnceCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

/// Path separator.
pub const SEPARATOR: char = '/';

/// Maximum allowed size for a compiled path pattern (in bytes).
const MAX_PATTERN_SIZE: usize = 1 << 20; // 1 MiB

/// One token of a path: literal text or a named dynamic placeholder.
#[derive(Clone)]
pub struct PathSegment {
	text: String,
	rule: Rc<dyn Rule>,
}

impl PathSegment {
	/// Creates a segment accepting any value.
	pub fn new(text: impl Into<String>) -> Self {
		Self::with_rule(text, AnyRule)
	}

	/// Creates a segment whose dynamic value is checked by `rule`.
	pub fn with_rule(text: impl Into<String>, rule: impl Rule + 'static) -> Self {
		Self {
			text: text.into(),
			rule: Rc::new(rule),
		}
	}

	/// Returns the raw text of the segment.
	pub fn text(&self) -> &str {
		&self.text
	}

	/// Returns the attached rule.
	pub fn rule(&self) -> &dyn Rule {
		self.rule.as_ref()
	}

	/// Returns whether the segment is written `/{name}`.
	pub fn is_dynamic(&self) -> bool {
		self.text.starts_with("/{") && self.text.ends_with('}')
	}

	/// Returns the parameter name of a dynamic segment.
	pub fn param_name(&self) -> Option<&str> {
		if !self.is_dynamic() {
			return None;
		}
		let start = self.text.find('{')? + 1;
		let end = self.text.find('}')?;
		self.text.get(start..end)
	}

	/// Returns whether the segment text equals `text`.
	pub fn eq_text(&self, text: &str) -> bool {
		self.text == text
	}

	/// Returns whether the segment text contains `needle`.
	pub fn contains(&self, needle: &str) -> bool {
		self.text.contains(needle)
	}

	/// Runs the attached rule on a captured value.
	pub async fn validate(&self, raw: &str) -> ValidationResult<Value> {
		self.rule.validate(raw).await
	}

	fn pattern_fragment(&self) -> String {
		match self.param_name() {
			Some(name) => format!("/(?P<{}>[^/]+)", name),
			None => regex::escape(&self.text),
		}
	}
}

impl fmt::Debug for PathSegment {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("PathSegment")
			.field("text", &self.text)
			.field("rule", &self.rule.name())
			.finish()
	}
}

impl fmt::Display for PathSegment {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.text)
	}
}

impl From<&str> for PathSegment {
	fn from(text: &str) -> Self {
		Self::new(text)
	}
}

impl From<String> for PathSegment {
	fn from(text: String) -> Self {
		Self::new(text)
	}
}

/// Validated values captured from a URL, keyed by parameter name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathParams {
	values: HashMap<String, Value>,
}

impl PathParams {
	/// Creates an empty set of parameters.
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns the value of a parameter.
	pub fn get(&self, name: &str) -> Option<&Value> {
		self.values.get(name)
	}

	/// Returns a string parameter.
	pub fn get_str(&self, name: &str) -> Option<&str> {
		self.get(name).and_then(Value::as_str)
	}

	/// Returns an integer parameter.
	pub fn get_i64(&self, name: &str) -> Option<i64> {
		self.get(name).and_then(Value::as_i64)
	}

	/// Returns a numeric parameter.
	pub fn get_f64(&self, name: &str) -> Option<f64> {
		self.get(name).and_then(Value::as_f64)
	}

	/// Returns the number of parameters.
	pub fn len(&self) -> usize {
		self.values.len()
	}

	/// Returns whether no parameter was captured.
	pub fn is_empty(&self) -> bool {
		self.values.is_empty()
	}

	/// Iterates over the parameters.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
		self.values.iter().map(|(name, value)| (name.as_str(), value))
	}

	fn insert(&mut self, name: impl Into<String>, value: Value) {
		self.values.insert(name.into(), value);
	}
}

/// An ordered sequence of path segments.
#[derive(Clone, Default)]
pub struct Path {
	segments: Vec<PathSegment>,
	pattern: OnceCell<Regex>,
}

impl Path {
	/// Creates a path from segments.
	pub fn new(segments: Vec<PathSegment>) -> Self {
		Self {
			segments,
			pattern: OnceCell::new(),
		}
	}

	/// Tokenizes a path string.
	///
	/// Every `/` starts a new segment made of the separator and the word
	/// characters, `{` and `}` that follow it. Any other run of characters
	/// becomes a literal segment of its own, so `full()` always returns the
	/// input unchanged.
	///
	/// # Examples
	///
	/// ```
	/// use multiview_urls::Path;
	///
	/// let path = Path::from_literal("/users/{id}");
	/// assert_eq!(path.len(), 2);
	/// assert!(path.at(1).unwrap().is_dynamic());
	/// assert_eq!(path.full(), "/users/{id}");
	/// ```
	pub fn from_literal(text: &str) -> Self {
		let mut segments = Vec::new();
		let mut current = String::new();
		let mut in_token = false;

		for c in text.chars() {
			if c == SEPARATOR {
				if !current.is_empty() {
					segments.push(PathSegment::new(std::mem::take(&mut current)));
				}
				current.push(c);
				in_token = true;
				continue;
			}
			let token_char = c.is_ascii_alphanumeric() || matches!(c, '_' | '{' | '}');
			if in_token && !token_char {
				segments.push(PathSegment::new(std::mem::take(&mut current)));
				in_token = false;
			}
			current.push(c);
		}
		if !current.is_empty() {
			segments.push(PathSegment::new(current));
		}

		Self::new(segments)
	}

	/// Strips trailing separators. The root path `/` is returned unchanged.
	///
	/// # Examples
	///
	/// ```
	/// use multiview_urls::Path;
	///
	/// assert_eq!(Path::normalize("/a/b/"), "/a/b");
	/// assert_eq!(Path::normalize("/"), "/");
	/// ```
	pub fn normalize(text: &str) -> String {
		if text == "/" {
			return text.to_string();
		}
		let trimmed = text.trim_end_matches(SEPARATOR);
		if trimmed.is_empty() && !text.is_empty() {
			return SEPARATOR.to_string();
		}
		trimmed.to_string()
	}

	/// Returns the concatenation of all segment texts.
	pub fn full(&self) -> String {
		self.segments.iter().map(PathSegment::text).collect()
	}

	/// Returns the segments.
	pub fn segments(&self) -> &[PathSegment] {
		&self.segments
	}

	/// Returns the first segment.
	pub fn first(&self) -> Option<&PathSegment> {
		self.segments.first()
	}

	/// Returns the segment at `index`.
	pub fn at(&self, index: usize) -> Option<&PathSegment> {
		self.segments.get(index)
	}

	/// Returns the number of segments.
	pub fn len(&self) -> usize {
		self.segments.len()
	}

	/// Returns whether the path has no segment.
	pub fn is_empty(&self) -> bool {
		self.segments.is_empty()
	}

	/// Inserts a segment at the front.
	pub fn prepend(&mut self, segment: impl Into<PathSegment>) {
		self.segments.insert(0, segment.into());
		self.pattern = OnceCell::new();
	}

	/// Returns whether the path has a dynamic segment.
	pub fn is_dynamic(&self) -> bool {
		self.segments.iter().any(PathSegment::is_dynamic)
	}

	/// Compiles the path into an anchored matching pattern.
	///
	/// # Errors
	///
	/// Returns [`RouterError::InvalidPattern`] when a parameter name is not
	/// a valid group name, or the same name is used twice.
	pub fn pattern(&self) -> RouterResult<&Regex> {
		if let Some(regex) = self.pattern.get() {
			return Ok(regex);
		}
		let mut source = String::from("^");
		for segment in &self.segments {
			source.push_str(&segment.pattern_fragment());
		}
		source.push('$');

		let regex = RegexBuilder::new(&source)
			.size_limit(MAX_PATTERN_SIZE)
			.build()
			.map_err(|e| RouterError::InvalidPattern {
				pattern: self.full(),
				reason: e.to_string(),
			})?;
		Ok(self.pattern.get_or_init(|| regex))
	}

	/// Matches `other` against this path and returns the validated
	/// parameters. See the [module documentation](self) for the rules.
	pub async fn captures(&self, other: &Path) -> Option<PathParams> {
		let url = other.full();
		if self.full() == url {
			return Some(PathParams::new());
		}

		let regex = match self.pattern() {
			Ok(regex) => regex,
			Err(err) => {
				tracing::warn!(error = %err, "skipping path with an invalid pattern");
				return None;
			}
		};
		let caps = regex.captures(&url)?;

		let mut params = PathParams::new();
		for name in regex.capture_names().flatten() {
			let Some(value) = caps.name(name) else {
				continue;
			};
			let segment = self
				.segments
				.iter()
				.find(|segment| segment.param_name() == Some(name))?;
			match segment.validate(value.as_str()).await {
				Ok(validated) => params.insert(name, validated),
				Err(err) => {
					tracing::debug!(
						param = name,
						value = value.as_str(),
						error = %err,
						"path parameter rejected"
					);
					return None;
				}
			}
		}
		Some(params)
	}

	/// Returns whether `other` matches this path.
	pub async fn matches(&self, other: &Path) -> bool {
		self.captures(other).await.is_some()
	}
}

impl fmt::Debug for Path {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("Path").field(&self.segments).finish()
	}
}

impl fmt::Display for Path {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.full())
	}
}

impl PartialEq for Path {
	fn eq(&self, other: &Self) -> bool {
		self.full() == other.full()
	}
}

impl From<&str> for Path {
	fn from(text: &str) -> Self {
		Self::from_literal(text)
	}
}

impl From<String> for Path {
	fn from(text: String) -> Self {
		Self::from_literal(&text)
	}
}

impl From<Vec<PathSegment>> for Path {
	fn from(segments: Vec<PathSegment>) -> Self {
		Self::new(segments)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use multiview_core::validators::IntegerRule;
	use rstest::rstest;
	use serde_json::json;

	#[rstest]
	#[case("/a/b", &["/a", "/b"])]
	#[case("/", &["/"])]
	#[case("/users/{id}/edit", &["/users", "/{id}", "/edit"])]
	#[case("/a-b/c", &["/a", "-b", "/c"])]
	#[case("/files/report.pdf", &["/files", "/report", ".pdf"])]
	fn test_from_literal_tokens(#[case] input: &str, #[case] expected: &[&str]) {
		let path = Path::from_literal(input);
		let texts: Vec<&str> = path.segments().iter().map(PathSegment::text).collect();
		assert_eq!(texts, expected);
		assert_eq!(path.full(), input);
	}

	#[rstest]
	#[case("/a/b/", "/a/b")]
	#[case("/a/b///", "/a/b")]
	#[case("/a/b", "/a/b")]
	#[case("/", "/")]
	#[case("//", "/")]
	#[case("", "")]
	fn test_normalize(#[case] input: &str, #[case] expected: &str) {
		assert_eq!(Path::normalize(input), expected);
	}

	#[rstest]
	#[case("/{id}", true, Some("id"))]
	#[case("/users", false, None)]
	#[case("{id}", false, None)]
	#[case("/{}", true, Some(""))]
	fn test_segment_dynamic(
		#[case] text: &str,
		#[case] dynamic: bool,
		#[case] name: Option<&str>,
	) {
		let segment = PathSegment::new(text);
		assert_eq!(segment.is_dynamic(), dynamic);
		assert_eq!(segment.param_name(), name);
	}

	#[rstest]
	fn test_segment_text_helpers() {
		let segment = PathSegment::new("/users");
		assert!(segment.eq_text("/users"));
		assert!(segment.contains("user"));
		assert!(!segment.contains("{"));
	}

	#[rstest]
	fn test_prepend_and_accessors() {
		let mut path = Path::from_literal("/login");
		path.prepend("/auth");

		assert_eq!(path.full(), "/auth/login");
		assert_eq!(path.len(), 2);
		assert!(path.first().unwrap().eq_text("/auth"));
		assert!(path.at(2).is_none());
	}

	#[rstest]
	fn test_literal_pattern_is_escaped() {
		let path = Path::from_literal("/v1.0");
		let regex = path.pattern().unwrap();
		assert!(regex.is_match("/v1.0"));
		assert!(!regex.is_match("/v1x0"));
	}

	#[rstest]
	fn test_duplicate_param_is_invalid_pattern() {
		let path = Path::from_literal("/{a}/{a}");
		assert!(matches!(
			path.pattern(),
			Err(RouterError::InvalidPattern { .. })
		));
	}

	#[rstest]
	#[tokio::test]
	async fn test_dynamic_segment_matches_single_segment() {
		let route = Path::new(vec![PathSegment::with_rule("/{id}", IntegerRule)]);

		let params = route.captures(&Path::from_literal("/42")).await.unwrap();
		assert_eq!(params.get("id"), Some(&json!(42)));
		assert!(!route.matches(&Path::from_literal("/42/43")).await);
	}

	#[rstest]
	#[tokio::test]
	async fn test_rule_rejection_is_negative_match() {
		let route = Path::new(vec![
			PathSegment::new("/posts"),
			PathSegment::with_rule("/{id}", IntegerRule),
		]);
		assert!(!route.matches(&Path::from_literal("/posts/abc")).await);
		assert!(route.matches(&Path::from_literal("/posts/7")).await);
	}

	#[rstest]
	#[tokio::test]
	async fn test_literal_equality_skips_validation() {
		let route = Path::new(vec![PathSegment::with_rule("/{id}", IntegerRule)]);
		let params = route.captures(&Path::from_literal("/{id}")).await.unwrap();
		assert!(params.is_empty());
	}

	#[rstest]
	#[tokio::test]
	async fn test_multiple_params_captured() {
		let route = Path::from_literal("/users/{user}/posts/{post}");
		let params = route
			.captures(&Path::from_literal("/users/ada/posts/9"))
			.await
			.unwrap();

		assert_eq!(params.len(), 2);
		assert_eq!(params.get_str("user"), Some("ada"));
		assert_eq!(params.get_str("post"), Some("9"));
	}

	#[rstest]
	#[tokio::test]
	async fn test_invalid_pattern_never_matches() {
		let route = Path::from_literal("/{a}/{a}");
		assert!(!route.matches(&Path::from_literal("/x/y")).await);
	}
}
