//! Signal - state cell.
//!
//! `Signal<T>` holds a value shared between clones and notifies its
//! subscribers after every `set` or `update`.
//!
//! ## Example
//!
//! ```ignore
//! use multiview_core::reactive::Signal;
//!
//! let count = Signal::new(0);
//! let subscription = count.subscribe(|n| println!("count is {n}"));
//!
//! count.set(1); // prints "count is 1"
//! subscription.unsubscribe();
//! count.set(2); // prints nothing
//! ```

use super::Subscription;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

type Callback<T> = Rc<dyn Fn(&T)>;

struct Subscribers<T> {
	next_id: Cell<u64>,
	entries: RefCell<Vec<(u64, Callback<T>)>>,
}

/// A state cell with change subscriptions.
///
/// Cloning a `Signal` shares the value and the subscriber list.
pub struct Signal<T: 'static> {
	value: Rc<RefCell<T>>,
	subscribers: Rc<Subscribers<T>>,
}

impl<T: 'static> Clone for Signal<T> {
	fn clone(&self) -> Self {
		Self {
			value: Rc::clone(&self.value),
			subscribers: Rc::clone(&self.subscribers),
		}
	}
}

impl<T: 'static> Signal<T> {
	/// Creates a signal with an initial value.
	pub fn new(value: T) -> Self {
		Self {
			value: Rc::new(RefCell::new(value)),
			subscribers: Rc::new(Subscribers {
				next_id: Cell::new(0),
				entries: RefCell::new(Vec::new()),
			}),
		}
	}

	/// Returns a clone of the current value.
	pub fn get(&self) -> T
	where
		T: Clone,
	{
		self.value.borrow().clone()
	}

	/// Reads the current value by reference.
	pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
		f(&self.value.borrow())
	}

	/// Replaces the value and notifies subscribers.
	pub fn set(&self, value: T)
	where
		T: Clone,
	{
		*self.value.borrow_mut() = value;
		self.notify();
	}

	/// Mutates the value in place and notifies subscribers once.
	pub fn update(&self, f: impl FnOnce(&mut T))
	where
		T: Clone,
	{
		f(&mut self.value.borrow_mut());
		self.notify();
	}

	/// Registers `callback` to run after every change.
	pub fn subscribe(&self, callback: impl Fn(&T) + 'static) -> Subscription {
		let id = self.subscribers.next_id.get();
		self.subscribers.next_id.set(id + 1);
		self.subscribers
			.entries
			.borrow_mut()
			.push((id, Rc::new(callback)));

		let subscribers: Weak<Subscribers<T>> = Rc::downgrade(&self.subscribers);
		Subscription::new(move || {
			if let Some(subscribers) = subscribers.upgrade() {
				subscribers
					.entries
					.borrow_mut()
					.retain(|(entry_id, _)| *entry_id != id);
			}
		})
	}

	/// Returns the number of live subscribers.
	pub fn subscriber_count(&self) -> usize {
		self.subscribers.entries.borrow().len()
	}

	// Callbacks receive a snapshot so they may read or write the signal.
	fn notify(&self)
	where
		T: Clone,
	{
		let callbacks: Vec<Callback<T>> = self
			.subscribers
			.entries
			.borrow()
			.iter()
			.map(|(_, callback)| Rc::clone(callback))
			.collect();
		if callbacks.is_empty() {
			return;
		}
		let snapshot = self.value.borrow().clone();
		for callback in callbacks {
			callback(&snapshot);
		}
	}
}

impl<T: fmt::Debug + 'static> fmt::Debug for Signal<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Signal")
			.field("value", &*self.value.borrow())
			.field("subscribers", &self.subscribers.entries.borrow().len())
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_signal_get_set() {
		let signal = Signal::new(1);
		signal.set(2);
		assert_eq!(signal.get(), 2);
	}

	#[rstest]
	fn test_signal_update_notifies_once() {
		let signal = Signal::new(vec![1]);
		let calls = Rc::new(Cell::new(0));
		let counter = calls.clone();
		let _subscription = signal.subscribe(move |_| counter.set(counter.get() + 1));

		signal.update(|v| {
			v.push(2);
			v.push(3);
		});

		assert_eq!(calls.get(), 1);
		assert_eq!(signal.get(), vec![1, 2, 3]);
	}

	#[rstest]
	fn test_clones_share_state() {
		let signal = Signal::new("a".to_string());
		let other = signal.clone();
		other.set("b".to_string());
		assert_eq!(signal.get(), "b");
	}

	#[rstest]
	fn test_unsubscribe_stops_notifications() {
		let signal = Signal::new(0);
		let seen = Rc::new(RefCell::new(Vec::new()));
		let log = seen.clone();
		let subscription = signal.subscribe(move |v| log.borrow_mut().push(*v));

		signal.set(1);
		subscription.unsubscribe();
		signal.set(2);

		assert_eq!(*seen.borrow(), vec![1]);
		assert_eq!(signal.subscriber_count(), 0);
	}

	#[rstest]
	fn test_callback_may_read_signal() {
		let signal = Signal::new(10);
		let reader = signal.clone();
		let seen = Rc::new(Cell::new(0));
		let slot = seen.clone();
		let _subscription = signal.subscribe(move |_| slot.set(reader.get()));

		signal.set(11);

		assert_eq!(seen.get(), 11);
	}
}
