//! Error types for routing.

use multiview_core::LoadError;
use thiserror::Error;

/// Error type for route configuration and matching.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouterError {
	/// No registered route matches the URL.
	#[error("No route found for URL path '{0}'")]
	NotFound(String),

	/// A route was built from an incomplete configuration.
	#[error("Route configuration error: {0}")]
	Configuration(String),

	/// A path compiled into an invalid pattern.
	#[error("Invalid route pattern '{pattern}': {reason}")]
	InvalidPattern {
		/// The path whose pattern failed to compile.
		pattern: String,
		/// Why compilation failed.
		reason: String,
	},

	/// A lazy router source failed to load.
	#[error(transparent)]
	Load(#[from] LoadError),
}

/// Result type for routing operations.
pub type RouterResult<T> = Result<T, RouterError>;

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_router_error_display() {
		assert_eq!(
			RouterError::NotFound("/missing".to_string()).to_string(),
			"No route found for URL path '/missing'"
		);
		assert_eq!(
			RouterError::InvalidPattern {
				pattern: "/{a}/{a}".to_string(),
				reason: "duplicate capture group".to_string(),
			}
			.to_string(),
			"Invalid route pattern '/{a}/{a}': duplicate capture group"
		);
	}

	#[rstest]
	fn test_load_error_converts() {
		let err: RouterError = LoadError::Failed("offline".to_string()).into();
		assert_eq!(err.to_string(), "Failed to load module: offline");
	}
}
