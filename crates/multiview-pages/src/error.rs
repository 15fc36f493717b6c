//! Error types for rendering and application startup.

use multiview_core::lazy::LoadError;
use multiview_urls::RouterError;
use thiserror::Error;

/// Error raised by the render pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
	/// A view method produced a null output.
	#[error("Your render function ({type_name}#{method}) returns a null/undefined value.")]
	NullOutput {
		/// Name of the view type.
		type_name: String,
		/// Name of the invoked method.
		method: String,
	},

	/// The view type has no method with the requested name.
	#[error("The view {type_name} has no method named '{method}'.")]
	UnknownMethod {
		/// Name of the view type.
		type_name: String,
		/// Name of the requested method.
		method: String,
	},

	/// `render` was called before a handler was set.
	#[error("No route handler was set on the renderer")]
	MissingHandler,

	/// No mount element is configured.
	#[error("No mount element was set on the renderer")]
	MissingElement,

	/// A view or layout type failed to load.
	#[error(transparent)]
	Load(#[from] LoadError),
}

/// Result type for rendering.
pub type RenderResult<T> = Result<T, RenderError>;

/// Error raised by [`Application::start`](crate::Application::start).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApplicationError {
	/// No route matches the start URL.
	#[error("The application does not contain any routes containing the URL path '{0}'.")]
	NoRoute(String),

	/// Routing failed for another reason.
	#[error(transparent)]
	Router(RouterError),

	/// Rendering failed.
	#[error(transparent)]
	Render(#[from] RenderError),
}

impl From<RouterError> for ApplicationError {
	fn from(err: RouterError) -> Self {
		match err {
			RouterError::NotFound(url) => Self::NoRoute(url),
			other => Self::Router(other),
		}
	}
}

/// Result type for application startup.
pub type ApplicationResult<T> = Result<T, ApplicationError>;

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_null_output_names_type_and_method() {
		let err = RenderError::NullOutput {
			type_name: "Home".to_string(),
			method: "render".to_string(),
		};
		assert_eq!(
			err.to_string(),
			"Your render function (Home#render) returns a null/undefined value."
		);
	}

	#[rstest]
	fn test_not_found_maps_to_no_route() {
		let err = ApplicationError::from(RouterError::NotFound("/nope".to_string()));
		assert_eq!(
			err.to_string(),
			"The application does not contain any routes containing the URL path '/nope'."
		);
	}

	#[rstest]
	fn test_other_router_errors_pass_through() {
		let err = ApplicationError::from(RouterError::Configuration("bad".to_string()));
		assert!(matches!(err, ApplicationError::Router(_)));
	}
}
