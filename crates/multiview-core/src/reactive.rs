//! Reactive cells.
//!
//! A [`Signal`] is a state cell; a [`Memo`] is a computed cell derived from a
//! signal. Both expose `subscribe`, which returns a [`Subscription`] that
//! stops notifications when dropped or explicitly unsubscribed.
//!
//! The renderer consumes cells through the object-safe [`ReactiveText`]
//! trait, which reduces any cell with a displayable value to text.

mod memo;
mod signal;

pub use memo::Memo;
pub use signal::Signal;

use std::fmt;

/// Handle to a live subscription.
///
/// The subscription is released exactly once: on [`unsubscribe`](Self::unsubscribe)
/// or when the handle is dropped.
#[must_use = "dropping a Subscription releases it immediately"]
pub struct Subscription {
	release: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
	/// Creates a subscription that runs `release` when released.
	pub fn new(release: impl FnOnce() + 'static) -> Self {
		Self {
			release: Some(Box::new(release)),
		}
	}

	/// Releases the subscription.
	pub fn unsubscribe(mut self) {
		self.release_now();
	}

	fn release_now(&mut self) {
		if let Some(release) = self.release.take() {
			release();
		}
	}
}

impl Drop for Subscription {
	fn drop(&mut self) {
		self.release_now();
	}
}

impl fmt::Debug for Subscription {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Subscription")
			.field("active", &self.release.is_some())
			.finish()
	}
}

/// A reactive cell viewed as text.
pub trait ReactiveText {
	/// Returns the current value rendered as text.
	fn current_text(&self) -> String;

	/// Calls `on_change` with the new text after every change.
	fn subscribe_text(&self, on_change: Box<dyn Fn(String)>) -> Subscription;
}

impl<T> ReactiveText for Signal<T>
where
	T: Clone + fmt::Display + 'static,
{
	fn current_text(&self) -> String {
		self.with(|value| value.to_string())
	}

	fn subscribe_text(&self, on_change: Box<dyn Fn(String)>) -> Subscription {
		self.subscribe(move |value: &T| on_change(value.to_string()))
	}
}

impl<T> ReactiveText for Memo<T>
where
	T: Clone + fmt::Display + 'static,
{
	fn current_text(&self) -> String {
		self.with(|value| value.to_string())
	}

	fn subscribe_text(&self, on_change: Box<dyn Fn(String)>) -> Subscription {
		self.subscribe(move |value: &T| on_change(value.to_string()))
	}
}
