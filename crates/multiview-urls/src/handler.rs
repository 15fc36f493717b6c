//! Route handlers.
//!
//! A handler names the view type answering a route, and optionally the view
//! method to invoke on it. The view type is either available directly or
//! loaded lazily.

use multiview_core::component::{ComponentClass, DEFAULT_METHOD, LazyComponent};
use multiview_core::lazy::LoadError;
use std::borrow::Cow;

/// The view answering a route.
#[derive(Debug, Clone)]
pub enum Handler {
	/// A view type rendered with [`DEFAULT_METHOD`].
	Direct(ComponentClass),
	/// A lazily loaded view type rendered with [`DEFAULT_METHOD`].
	Lazy(LazyComponent),
	/// A view type and the method to invoke.
	DirectMethod(ComponentClass, Cow<'static, str>),
	/// A lazily loaded view type and the method to invoke.
	LazyMethod(LazyComponent, Cow<'static, str>),
}

/// A handler resolved to a concrete view type and method.
#[derive(Debug, Clone)]
pub struct ResolvedHandler {
	/// The view type to construct.
	pub class: ComponentClass,
	/// The method to invoke on the fresh instance.
	pub method: Cow<'static, str>,
}

impl Handler {
	/// Selects the view method to invoke, keeping the view type.
	pub fn with_method(self, method: impl Into<Cow<'static, str>>) -> Self {
		let method = method.into();
		match self {
			Self::Direct(class) | Self::DirectMethod(class, _) => Self::DirectMethod(class, method),
			Self::Lazy(lazy) | Self::LazyMethod(lazy, _) => Self::LazyMethod(lazy, method),
		}
	}

	/// Returns the method this handler invokes.
	pub fn method(&self) -> &str {
		match self {
			Self::Direct(_) | Self::Lazy(_) => DEFAULT_METHOD,
			Self::DirectMethod(_, method) | Self::LazyMethod(_, method) => method,
		}
	}

	/// Returns whether the view type has to be loaded first.
	pub fn is_lazy(&self) -> bool {
		matches!(self, Self::Lazy(_) | Self::LazyMethod(..))
	}

	/// Resolves the view type and method.
	///
	/// Lazy view types fall back to their configured fallback type when
	/// loading fails.
	///
	/// # Errors
	///
	/// Returns the load error when a lazy view type fails to load and has
	/// no fallback.
	pub async fn resolve(&self) -> Result<ResolvedHandler, LoadError> {
		let class = match self {
			Self::Direct(class) | Self::DirectMethod(class, _) => class.clone(),
			Self::Lazy(lazy) | Self::LazyMethod(lazy, _) => lazy.load_or_fallback().await?,
		};
		let method = match self {
			Self::Direct(_) | Self::Lazy(_) => Cow::Borrowed(DEFAULT_METHOD),
			Self::DirectMethod(_, method) | Self::LazyMethod(_, method) => method.clone(),
		};
		tracing::debug!(view = class.name(), method = %method, "resolved route handler");
		Ok(ResolvedHandler { class, method })
	}
}

impl From<ComponentClass> for Handler {
	fn from(class: ComponentClass) -> Self {
		Self::Direct(class)
	}
}

impl From<LazyComponent> for Handler {
	fn from(lazy: LazyComponent) -> Self {
		Self::Lazy(lazy)
	}
}

impl From<(ComponentClass, &'static str)> for Handler {
	fn from((class, method): (ComponentClass, &'static str)) -> Self {
		Self::DirectMethod(class, Cow::Borrowed(method))
	}
}

impl From<(ComponentClass, String)> for Handler {
	fn from((class, method): (ComponentClass, String)) -> Self {
		Self::DirectMethod(class, Cow::Owned(method))
	}
}

impl From<(LazyComponent, &'static str)> for Handler {
	fn from((lazy, method): (LazyComponent, &'static str)) -> Self {
		Self::LazyMethod(lazy, Cow::Borrowed(method))
	}
}

impl From<(LazyComponent, String)> for Handler {
	fn from((lazy, method): (LazyComponent, String)) -> Self {
		Self::LazyMethod(lazy, Cow::Owned(method))
	}
}
