//! View and layout contracts.
//!
//! A route handler refers to a view *type*, not an instance. A fresh
//! instance is constructed from its [`ComponentClass`] for every render,
//! and the selected view method is invoked on it by name through
//! [`Component::call`].

use crate::dom::Node;
use crate::lazy::Lazy;
use crate::page::Rendered;
use std::borrow::Cow;
use std::fmt;
use std::rc::Rc;

/// Name of the view method used when a handler does not name one.
pub const DEFAULT_METHOD: &str = "render";

/// A view type.
///
/// ## Example
///
/// ```ignore
/// use multiview_core::component::Component;
/// use multiview_core::page::{RenderOutput, Rendered};
///
/// #[derive(Default)]
/// struct Profile;
///
/// impl Component for Profile {
///     fn render(&self) -> Rendered {
///         Some("profile".into())
///     }
///
///     fn call(&self, method: &str) -> Option<Rendered> {
///         match method {
///             "render" => Some(self.render()),
///             "settings" => Some(Some(RenderOutput::text("settings"))),
///             _ => None,
///         }
///     }
/// }
/// ```
pub trait Component: 'static {
	/// The default view method.
	fn render(&self) -> Rendered;

	/// Invokes a view method by name.
	///
	/// Returns `None` when the type has no method with that name. The
	/// default implementation only knows [`DEFAULT_METHOD`].
	fn call(&self, method: &str) -> Option<Rendered> {
		(method == DEFAULT_METHOD).then(|| self.render())
	}
}

type Constructor<T> = Rc<dyn Fn() -> T>;

/// A constructible view type.
#[derive(Clone)]
pub struct ComponentClass {
	name: Cow<'static, str>,
	construct: Constructor<Box<dyn Component>>,
}

impl ComponentClass {
	/// Creates a class from a name and a constructor.
	pub fn new<C, F>(name: impl Into<Cow<'static, str>>, construct: F) -> Self
	where
		C: Component,
		F: Fn() -> C + 'static,
	{
		Self {
			name: name.into(),
			construct: Rc::new(move || Box::new(construct()) as Box<dyn Component>),
		}
	}

	/// Creates a class for a `Default` view type, named after the type.
	pub fn of<C: Component + Default>() -> Self {
		Self::new(short_type_name::<C>(), C::default)
	}

	/// Returns the type name used in diagnostics.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Constructs a fresh instance.
	pub fn instantiate(&self) -> Box<dyn Component> {
		(self.construct)()
	}
}

impl fmt::Debug for ComponentClass {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("ComponentClass").field(&self.name).finish()
	}
}

/// A layout type: renders a root element that may contain a slot.
pub trait Layout: 'static {
	/// Renders the layout root.
	fn render(&self) -> Node;
}

/// A constructible layout type.
#[derive(Clone)]
pub struct LayoutClass {
	name: Cow<'static, str>,
	construct: Constructor<Box<dyn Layout>>,
}

impl LayoutClass {
	/// Creates a class from a name and a constructor.
	pub fn new<L, F>(name: impl Into<Cow<'static, str>>, construct: F) -> Self
	where
		L: Layout,
		F: Fn() -> L + 'static,
	{
		Self {
			name: name.into(),
			construct: Rc::new(move || Box::new(construct()) as Box<dyn Layout>),
		}
	}

	/// Creates a class for a `Default` layout type, named after the type.
	pub fn of<L: Layout + Default>() -> Self {
		Self::new(short_type_name::<L>(), L::default)
	}

	/// Creates a class rendering the node returned by `render`.
	pub fn from_fn(name: impl Into<Cow<'static, str>>, render: impl Fn() -> Node + 'static) -> Self {
		let render: Rc<dyn Fn() -> Node> = Rc::new(render);
		Self::new(name, move || FnLayout(Rc::clone(&render)))
	}

	/// Returns the type name used in diagnostics.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Constructs a fresh instance.
	pub fn instantiate(&self) -> Box<dyn Layout> {
		(self.construct)()
	}
}

impl fmt::Debug for LayoutClass {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("LayoutClass").field(&self.name).finish()
	}
}

struct FnLayout(Rc<dyn Fn() -> Node>);

impl Layout for FnLayout {
	fn render(&self) -> Node {
		(self.0)()
	}
}

/// A lazily loaded view type.
pub type LazyComponent = Lazy<ComponentClass>;

/// A lazily loaded layout type.
pub type LazyLayout = Lazy<LayoutClass>;

fn short_type_name<T>() -> &'static str {
	let full = std::any::type_name::<T>();
	let base = full.split('<').next().unwrap_or(full);
	match base.rfind("::") {
		Some(idx) => &full[idx + 2..],
		None => full,
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::page::RenderOutput;
	use rstest::rstest;
	use std::cell::Cell;

	#[derive(Default)]
	struct Home;

	impl Component for Home {
		fn render(&self) -> Rendered {
			Some(RenderOutput::text("home"))
		}
	}

	struct Account;

	impl Component for Account {
		fn render(&self) -> Rendered {
			None
		}

		fn call(&self, method: &str) -> Option<Rendered> {
			match method {
				"render" => Some(self.render()),
				"settings" => Some(Some(RenderOutput::text("settings"))),
				_ => None,
			}
		}
	}

	#[rstest]
	fn test_class_of_uses_short_type_name() {
		assert_eq!(ComponentClass::of::<Home>().name(), "Home");
	}

	#[rstest]
	fn test_default_call_only_knows_render() {
		let view = ComponentClass::of::<Home>().instantiate();
		assert!(view.call(DEFAULT_METHOD).is_some());
		assert!(view.call("missing").is_none());
	}

	#[rstest]
	fn test_named_method_dispatch() {
		let view = ComponentClass::new("Account", || Account).instantiate();
		let output = view.call("settings").unwrap().unwrap();
		assert!(matches!(output, RenderOutput::Text(ref t) if t == "settings"));
		assert!(view.call("render").unwrap().is_none());
	}

	#[rstest]
	fn test_fresh_instance_per_instantiate() {
		let built = Rc::new(Cell::new(0));
		let counter = built.clone();
		let class = ComponentClass::new("Home", move || {
			counter.set(counter.get() + 1);
			Home
		});

		let _ = class.instantiate();
		let _ = class.instantiate();

		assert_eq!(built.get(), 2);
	}

	#[rstest]
	fn test_layout_from_fn() {
		let layout = LayoutClass::from_fn("Shell", || Node::element("main").with_child(Node::slot()));
		let root = layout.instantiate().render();
		assert_eq!(root.to_html(), "<main><slot></slot></main>");
		assert_eq!(layout.name(), "Shell");
	}
}
