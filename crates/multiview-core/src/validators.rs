//! Validation rules.
//!
//! Dynamic path parameters carry a [`Rule`] that checks the captured raw
//! text and converts it into a typed JSON value. Structured render outputs
//! are checked against the page shape through a [`ShapeValidator`].

use crate::page::PageShape;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::fmt;
use thiserror::Error;

/// Error returned when a parameter rule rejects a value.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
	/// The value is not a number.
	#[error("The value '{value}' must be a number")]
	NotANumber {
		/// The rejected raw value.
		value: String,
	},

	/// The value has a fractional part.
	#[error("The value '{value}' must not contain decimal places")]
	NotAnInteger {
		/// The rejected raw value.
		value: String,
	},

	/// The value has a disallowed number of decimal places.
	#[error("The value '{value}' must have {min} to {max} decimal places")]
	DecimalPlaces {
		/// The rejected raw value.
		value: String,
		/// Minimum number of decimal places.
		min: usize,
		/// Maximum number of decimal places.
		max: usize,
	},

	/// The value is not one of the accepted choices.
	#[error("The value '{value}' must be one of: {}", .choices.join(", "))]
	NotInChoices {
		/// The rejected raw value.
		value: String,
		/// Accepted choices.
		choices: Vec<String>,
	},

	/// The value is empty.
	#[error("The value must not be empty")]
	Empty,

	/// A rule-specific failure.
	#[error("{rule}: {message}")]
	Custom {
		/// Name of the failing rule.
		rule: String,
		/// Failure description.
		message: String,
	},
}

/// Result type for parameter rules.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// An asynchronous rule attached to a dynamic path segment.
#[async_trait(?Send)]
pub trait Rule: fmt::Debug {
	/// Checks `raw` and converts it into a typed value.
	async fn validate(&self, raw: &str) -> ValidationResult<Value>;

	/// Short name used in diagnostics.
	fn name(&self) -> &'static str;
}

/// Accepts any value as a string. The default rule of a dynamic segment.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnyRule;

#[async_trait(?Send)]
impl Rule for AnyRule {
	async fn validate(&self, raw: &str) -> ValidationResult<Value> {
		Ok(Value::String(raw.to_string()))
	}

	fn name(&self) -> &'static str {
		"any"
	}
}

/// Accepts a non-empty string.
#[derive(Debug, Clone, Copy, Default)]
pub struct StringRule;

#[async_trait(?Send)]
impl Rule for StringRule {
	async fn validate(&self, raw: &str) -> ValidationResult<Value> {
		if raw.is_empty() {
			return Err(ValidationError::Empty);
		}
		Ok(Value::String(raw.to_string()))
	}

	fn name(&self) -> &'static str {
		"string"
	}
}

fn parse_number(raw: &str) -> ValidationResult<f64> {
	raw.trim()
		.parse::<f64>()
		.ok()
		.filter(|n| n.is_finite())
		.ok_or_else(|| ValidationError::NotANumber {
			value: raw.to_string(),
		})
}

fn number_value(n: f64) -> Value {
	serde_json::Number::from_f64(n)
		.map(Value::Number)
		.unwrap_or(Value::Null)
}

/// Accepts any finite number.
#[derive(Debug, Clone, Copy, Default)]
pub struct NumberRule;

#[async_trait(?Send)]
impl Rule for NumberRule {
	async fn validate(&self, raw: &str) -> ValidationResult<Value> {
		parse_number(raw).map(number_value)
	}

	fn name(&self) -> &'static str {
		"number"
	}
}

/// Accepts a number without decimal places.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntegerRule;

#[async_trait(?Send)]
impl Rule for IntegerRule {
	async fn validate(&self, raw: &str) -> ValidationResult<Value> {
		let n = parse_number(raw)?;
		if n.fract() != 0.0 {
			return Err(ValidationError::NotAnInteger {
				value: raw.to_string(),
			});
		}
		if n.abs() < i64::MAX as f64 {
			Ok(Value::from(n as i64))
		} else {
			Ok(number_value(n))
		}
	}

	fn name(&self) -> &'static str {
		"integer"
	}
}

/// Accepts a number whose decimal places fall within a range.
///
/// Places are counted on the raw text, so `"1.50"` has two places.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecimalRule {
	min_places: usize,
	max_places: usize,
}

impl DecimalRule {
	/// Requires exactly `places` decimal places.
	pub fn exact(places: usize) -> Self {
		Self {
			min_places: places,
			max_places: places,
		}
	}

	/// Requires between `min` and `max` decimal places (inclusive).
	pub fn range(min: usize, max: usize) -> Self {
		Self {
			min_places: min.min(max),
			max_places: min.max(max),
		}
	}
}

#[async_trait(?Send)]
impl Rule for DecimalRule {
	async fn validate(&self, raw: &str) -> ValidationResult<Value> {
		let n = parse_number(raw)?;
		let places = raw
			.trim()
			.split_once('.')
			.map(|(_, fraction)| fraction.len())
			.unwrap_or(0);
		if places < self.min_places || places > self.max_places {
			return Err(ValidationError::DecimalPlaces {
				value: raw.to_string(),
				min: self.min_places,
				max: self.max_places,
			});
		}
		Ok(number_value(n))
	}

	fn name(&self) -> &'static str {
		"decimal"
	}
}

/// Accepts one of a fixed list of strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumRule {
	choices: Vec<String>,
}

impl EnumRule {
	/// Creates a rule accepting the given choices.
	pub fn new<I, S>(choices: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self {
			choices: choices.into_iter().map(Into::into).collect(),
		}
	}

	/// Returns the accepted choices.
	pub fn choices(&self) -> &[String] {
		&self.choices
	}
}

#[async_trait(?Send)]
impl Rule for EnumRule {
	async fn validate(&self, raw: &str) -> ValidationResult<Value> {
		if self.choices.iter().any(|choice| choice == raw) {
			Ok(Value::String(raw.to_string()))
		} else {
			Err(ValidationError::NotInChoices {
				value: raw.to_string(),
				choices: self.choices.clone(),
			})
		}
	}

	fn name(&self) -> &'static str {
		"enum"
	}
}

/// Error returned when a structure does not have the page shape.
#[derive(Debug, Error)]
pub enum ShapeError {
	/// The structure could not be read as a page.
	#[error("Invalid page structure: {0}")]
	Invalid(#[from] serde_json::Error),

	/// The page body is null.
	#[error("Page body must not be null")]
	NullBody,
}

/// Checks a plain structure against the `{ head?, body }` page shape.
pub trait ShapeValidator {
	/// Returns the typed page, or why the structure is not a page.
	fn validate(&self, value: &Value) -> Result<PageShape, ShapeError>;
}

/// Page shape validation backed by `serde`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SerdeShapeValidator;

impl ShapeValidator for SerdeShapeValidator {
	fn validate(&self, value: &Value) -> Result<PageShape, ShapeError> {
		let shape = PageShape::deserialize(value)?;
		if shape.body.is_null() {
			return Err(ShapeError::NullBody);
		}
		Ok(shape)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;

	#[rstest]
	#[case("42", json!(42))]
	#[case("-7", json!(-7))]
	#[case("3.0", json!(3))]
	#[tokio::test]
	async fn test_integer_rule_accepts(#[case] raw: &str, #[case] expected: Value) {
		assert_eq!(IntegerRule.validate(raw).await, Ok(expected));
	}

	#[rstest]
	#[case("3.5")]
	#[case("abc")]
	#[case("")]
	#[tokio::test]
	async fn test_integer_rule_rejects(#[case] raw: &str) {
		assert!(IntegerRule.validate(raw).await.is_err());
	}

	#[rstest]
	#[case("1.25", true)]
	#[case("1.5", false)]
	#[case("1", false)]
	#[case("x.12", false)]
	#[tokio::test]
	async fn test_decimal_rule_exact(#[case] raw: &str, #[case] ok: bool) {
		assert_eq!(DecimalRule::exact(2).validate(raw).await.is_ok(), ok);
	}

	#[rstest]
	#[tokio::test]
	async fn test_decimal_rule_range() {
		let rule = DecimalRule::range(0, 2);
		assert!(rule.validate("4").await.is_ok());
		assert!(rule.validate("4.1").await.is_ok());
		assert!(rule.validate("4.123").await.is_err());
	}

	#[rstest]
	#[tokio::test]
	async fn test_enum_rule() {
		let rule = EnumRule::new(["en", "fr"]);
		assert_eq!(rule.validate("fr").await, Ok(json!("fr")));
		let err = rule.validate("de").await.unwrap_err();
		assert_eq!(err.to_string(), "The value 'de' must be one of: en, fr");
	}

	#[rstest]
	#[tokio::test]
	async fn test_string_rule_rejects_empty() {
		assert_eq!(StringRule.validate("").await, Err(ValidationError::Empty));
		assert_eq!(AnyRule.validate("").await, Ok(json!("")));
	}

	#[rstest]
	fn test_shape_validator_accepts_page() {
		let shape = SerdeShapeValidator
			.validate(&json!({"head": {"title": "Home"}, "body": "X"}))
			.unwrap();
		assert_eq!(shape.head.unwrap().title.as_deref(), Some("Home"));
		assert_eq!(shape.body, json!("X"));
	}

	#[rstest]
	#[case(json!({"name": "x"}))]
	#[case(json!({"body": null}))]
	#[case(json!({"head": {"title": 3}, "body": "X"}))]
	#[case(json!([1, 2]))]
	fn test_shape_validator_rejects(#[case] value: Value) {
		assert!(SerdeShapeValidator.validate(&value).is_err());
	}
}
