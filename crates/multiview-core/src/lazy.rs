//! Lazily loaded module references.
//!
//! A [`Lazy<T>`] wraps a zero-argument asynchronous loader. Loading is
//! repeated on every call to [`Lazy::load`]; callers that need "resolve
//! once" semantics keep the loaded value themselves.
//!
//! A lazy reference may carry a fallback value, used by
//! [`Lazy::load_or_fallback`] when the loader fails.

use futures::future::{FutureExt, LocalBoxFuture};
use std::fmt;
use std::future::Future;
use std::rc::Rc;
use thiserror::Error;

/// Error raised when a lazy reference cannot be loaded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
	/// The loader itself failed.
	#[error("Failed to load module: {0}")]
	Failed(String),

	/// The loaded value does not have the expected module shape.
	#[error("Module has no usable default export: {0}")]
	MissingExport(String),
}

type Loader<T> = dyn Fn() -> LocalBoxFuture<'static, Result<T, LoadError>>;

/// A zero-argument asynchronous loader resolving to a module value.
pub struct Lazy<T: 'static> {
	loader: Rc<Loader<T>>,
	fallback: Option<T>,
}

impl<T: Clone + 'static> Clone for Lazy<T> {
	fn clone(&self) -> Self {
		Self {
			loader: Rc::clone(&self.loader),
			fallback: self.fallback.clone(),
		}
	}
}

impl<T: 'static> Lazy<T> {
	/// Creates a lazy reference from an async loader.
	pub fn new<F, Fut>(loader: F) -> Self
	where
		F: Fn() -> Fut + 'static,
		Fut: Future<Output = Result<T, LoadError>> + 'static,
	{
		Self {
			loader: Rc::new(move || loader().boxed_local()),
			fallback: None,
		}
	}

	/// Creates a lazy reference that resolves to `value`.
	pub fn ready(value: T) -> Self
	where
		T: Clone,
	{
		Self::new(move || futures::future::ready(Ok(value.clone())))
	}

	/// Sets the value used when loading fails.
	pub fn with_fallback(mut self, fallback: T) -> Self {
		self.fallback = Some(fallback);
		self
	}

	/// Returns the fallback value.
	pub fn fallback(&self) -> Option<&T> {
		self.fallback.as_ref()
	}

	/// Runs the loader.
	pub async fn load(&self) -> Result<T, LoadError> {
		(self.loader)().await
	}

	/// Runs the loader, substituting the fallback when loading fails.
	///
	/// The loader error is returned only when no fallback is configured.
	pub async fn load_or_fallback(&self) -> Result<T, LoadError>
	where
		T: Clone,
	{
		match self.load().await {
			Ok(value) => Ok(value),
			Err(err) => match &self.fallback {
				Some(fallback) => {
					tracing::warn!(error = %err, "lazy load failed, using fallback value");
					Ok(fallback.clone())
				}
				None => Err(err),
			},
		}
	}
}

impl<T: 'static> fmt::Debug for Lazy<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Lazy")
			.field("loader", &"<async fn>")
			.field("has_fallback", &self.fallback.is_some())
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use std::cell::Cell;

	#[rstest]
	#[tokio::test]
	async fn test_ready_resolves_value() {
		let lazy = Lazy::ready(5);
		assert_eq!(lazy.load().await, Ok(5));
	}

	#[rstest]
	#[tokio::test]
	async fn test_loader_runs_on_every_load() {
		let calls = Rc::new(Cell::new(0));
		let counter = calls.clone();
		let lazy = Lazy::new(move || {
			counter.set(counter.get() + 1);
			async { Ok::<_, LoadError>("module") }
		});

		lazy.load().await.unwrap();
		lazy.load().await.unwrap();

		assert_eq!(calls.get(), 2);
	}

	#[rstest]
	#[tokio::test]
	async fn test_load_or_fallback_uses_fallback() {
		let lazy = Lazy::new(|| async { Err::<u8, _>(LoadError::Failed("offline".into())) })
			.with_fallback(9);
		assert_eq!(lazy.load_or_fallback().await, Ok(9));
	}

	#[rstest]
	#[tokio::test]
	async fn test_load_or_fallback_without_fallback_errors() {
		let lazy = Lazy::new(|| async { Err::<u8, _>(LoadError::MissingExport("default".into())) });
		assert_eq!(
			lazy.load_or_fallback().await,
			Err(LoadError::MissingExport("default".into()))
		);
	}
}
