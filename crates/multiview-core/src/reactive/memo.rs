//! Memo - computed cell.
//!
//! A `Memo<T>` caches `compute(&source)` and recomputes it whenever the
//! source [`Signal`] changes. Subscribers of the memo are notified with the
//! recomputed value.

use super::{Signal, Subscription};
use std::fmt;
use std::rc::Rc;

/// A computed cell derived from a [`Signal`].
pub struct Memo<T: 'static> {
	value: Signal<T>,
	source: Rc<Subscription>,
}

impl<T: 'static> Clone for Memo<T> {
	fn clone(&self) -> Self {
		Self {
			value: self.value.clone(),
			source: Rc::clone(&self.source),
		}
	}
}

impl<T: Clone + 'static> Memo<T> {
	/// Creates a memo computing its value from `source`.
	pub fn new<S, F>(source: &Signal<S>, compute: F) -> Self
	where
		S: 'static,
		F: Fn(&S) -> T + 'static,
	{
		let value = Signal::new(source.with(&compute));
		let target = value.clone();
		let subscription = source.subscribe(move |input| target.set(compute(input)));
		Self {
			value,
			source: Rc::new(subscription),
		}
	}

	/// Returns a clone of the current value.
	pub fn get(&self) -> T {
		self.value.get()
	}

	/// Reads the current value by reference.
	pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
		self.value.with(f)
	}

	/// Registers `callback` to run after every recomputation.
	///
	/// The returned subscription keeps the memo connected to its source
	/// even if every `Memo` handle is dropped.
	pub fn subscribe(&self, callback: impl Fn(&T) + 'static) -> Subscription {
		let inner = self.value.subscribe(callback);
		let source = Rc::clone(&self.source);
		Subscription::new(move || {
			inner.unsubscribe();
			drop(source);
		})
	}
}

impl<T: fmt::Debug + 'static> fmt::Debug for Memo<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Memo").field("value", &self.value).finish()
	}
}
