//! Render output types.
//!
//! A view method returns a [`Rendered`] value: `None` stands for a
//! null/undefined result, which the renderer rejects, and `Some` carries a
//! [`RenderOutput`]. The renderer dispatches on the variant:
//!
//! | Variant | Rendered as |
//! |---|---|
//! | `Text`, `Number`, `BigInt` | text |
//! | `Bool` | `"true"` / `"false"` |
//! | `Date` | its canonical text form |
//! | `Node` | the node itself |
//! | `Callable` | the result of calling it, if any |
//! | `Reactive` | a text node kept in sync with the cell |
//! | `Future` | the resolved value |
//! | `Page` | head side effects, then the body |
//! | `Json` | a page if it matches [`PageShape`], otherwise JSON text |
//! | `Opaque` | nothing (a warning is logged) |

use crate::dom::{Node, StyleSheet};
use crate::lazy::Lazy;
use crate::reactive::{Memo, ReactiveText, Signal};
use chrono::{DateTime, Utc};
use futures::future::{FutureExt, LocalBoxFuture};
use serde::Deserialize;
use std::any::Any;
use std::borrow::Cow;
use std::fmt;
use std::future::Future;
use std::rc::Rc;

/// What a view method returns; `None` is a null output.
pub type Rendered = Option<RenderOutput>;

/// A deferred render value.
pub type RenderFuture = LocalBoxFuture<'static, Rendered>;

/// A value produced by a view method.
pub enum RenderOutput {
	/// A string.
	Text(Cow<'static, str>),
	/// A floating point number.
	Number(f64),
	/// An integer too wide for `Number`.
	BigInt(i128),
	/// A boolean.
	Bool(bool),
	/// A point in time.
	Date(DateTime<Utc>),
	/// A document node.
	Node(Node),
	/// A zero-argument callable producing another value.
	Callable(Box<dyn FnOnce() -> Rendered>),
	/// A reactive cell rendered as live text.
	Reactive(Rc<dyn ReactiveText>),
	/// A deferred value.
	Future(RenderFuture),
	/// A structured page with an optional head.
	Page(PageOutput),
	/// A plain keyed structure.
	Json(serde_json::Value),
	/// A value the renderer does not know how to display.
	Opaque(Opaque),
}

impl RenderOutput {
	/// Creates a text output.
	pub fn text(text: impl Into<Cow<'static, str>>) -> Self {
		Self::Text(text.into())
	}

	/// Creates a callable output.
	pub fn callable(f: impl FnOnce() -> Rendered + 'static) -> Self {
		Self::Callable(Box::new(f))
	}

	/// Creates a deferred output.
	pub fn future(fut: impl Future<Output = Rendered> + 'static) -> Self {
		Self::Future(fut.boxed_local())
	}

	/// Creates a reactive output from any cell.
	pub fn reactive(cell: impl ReactiveText + 'static) -> Self {
		Self::Reactive(Rc::new(cell))
	}

	/// Creates a structured page output.
	pub fn page(head: Head, body: impl Into<RenderOutput>) -> Self {
		Self::Page(PageOutput {
			head: Some(head),
			body: Box::new(body.into()),
		})
	}

	/// Wraps a value the renderer cannot display.
	pub fn opaque<T: Any>(value: T) -> Self {
		Self::Opaque(Opaque::new(value))
	}

	/// Converts a JSON value, mapping scalars to their typed variants.
	pub fn from_json(value: serde_json::Value) -> Self {
		match value {
			serde_json::Value::String(text) => Self::Text(Cow::Owned(text)),
			serde_json::Value::Bool(flag) => Self::Bool(flag),
			serde_json::Value::Number(number) => match number.as_f64() {
				Some(n) => Self::Number(n),
				None => Self::Json(serde_json::Value::Number(number)),
			},
			other => Self::Json(other),
		}
	}

	/// Returns the variant name, for diagnostics.
	pub fn kind(&self) -> &'static str {
		match self {
			Self::Text(_) => "text",
			Self::Number(_) => "number",
			Self::BigInt(_) => "bigint",
			Self::Bool(_) => "boolean",
			Self::Date(_) => "date",
			Self::Node(_) => "node",
			Self::Callable(_) => "callable",
			Self::Reactive(_) => "reactive",
			Self::Future(_) => "future",
			Self::Page(_) => "page",
			Self::Json(_) => "json",
			Self::Opaque(_) => "opaque",
		}
	}
}

impl fmt::Debug for RenderOutput {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Text(text) => f.debug_tuple("Text").field(text).finish(),
			Self::Number(n) => f.debug_tuple("Number").field(n).finish(),
			Self::BigInt(n) => f.debug_tuple("BigInt").field(n).finish(),
			Self::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
			Self::Date(d) => f.debug_tuple("Date").field(d).finish(),
			Self::Node(n) => f.debug_tuple("Node").field(n).finish(),
			Self::Page(p) => f.debug_tuple("Page").field(p).finish(),
			Self::Json(v) => f.debug_tuple("Json").field(v).finish(),
			Self::Opaque(o) => f.debug_tuple("Opaque").field(o).finish(),
			other => write!(f, "{}(..)", other.kind()),
		}
	}
}

impl From<&'static str> for RenderOutput {
	fn from(text: &'static str) -> Self {
		Self::Text(Cow::Borrowed(text))
	}
}

impl From<String> for RenderOutput {
	fn from(text: String) -> Self {
		Self::Text(Cow::Owned(text))
	}
}

macro_rules! impl_from_number {
	($($ty:ty),* $(,)?) => {
		$(
			impl From<$ty> for RenderOutput {
				fn from(n: $ty) -> Self {
					Self::Number(f64::from(n))
				}
			}
		)*
	};
}

impl_from_number!(i8, i16, i32, u8, u16, u32, f32, f64);

macro_rules! impl_from_bigint {
	($($ty:ty),* $(,)?) => {
		$(
			impl From<$ty> for RenderOutput {
				fn from(n: $ty) -> Self {
					Self::BigInt(i128::from(n))
				}
			}
		)*
	};
}

impl_from_bigint!(i64, u64, i128);

impl From<bool> for RenderOutput {
	fn from(flag: bool) -> Self {
		Self::Bool(flag)
	}
}

impl From<Node> for RenderOutput {
	fn from(node: Node) -> Self {
		Self::Node(node)
	}
}

impl From<DateTime<Utc>> for RenderOutput {
	fn from(date: DateTime<Utc>) -> Self {
		Self::Date(date)
	}
}

impl From<serde_json::Value> for RenderOutput {
	fn from(value: serde_json::Value) -> Self {
		Self::from_json(value)
	}
}

impl From<PageOutput> for RenderOutput {
	fn from(page: PageOutput) -> Self {
		Self::Page(page)
	}
}

impl<T> From<Signal<T>> for RenderOutput
where
	T: Clone + fmt::Display + 'static,
{
	fn from(signal: Signal<T>) -> Self {
		Self::reactive(signal)
	}
}

impl<T> From<Memo<T>> for RenderOutput
where
	T: Clone + fmt::Display + 'static,
{
	fn from(memo: Memo<T>) -> Self {
		Self::reactive(memo)
	}
}

/// A value of a type the renderer does not support.
pub struct Opaque {
	type_name: &'static str,
	#[allow(dead_code)] // Held so the value lives as long as the output
	value: Box<dyn Any>,
}

impl Opaque {
	/// Wraps a value.
	pub fn new<T: Any>(value: T) -> Self {
		Self {
			type_name: std::any::type_name::<T>(),
			value: Box::new(value),
		}
	}

	/// Returns the wrapped value's type name.
	pub fn type_name(&self) -> &'static str {
		self.type_name
	}
}

impl fmt::Debug for Opaque {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Opaque")
			.field("type_name", &self.type_name)
			.finish()
	}
}

/// A stylesheet entry of a page head.
#[derive(Debug)]
pub enum StyleSource {
	/// Inline CSS text.
	Inline(String),
	/// A lazily loaded module exporting a stylesheet.
	Module(Lazy<StyleSheet>),
}

impl From<&str> for StyleSource {
	fn from(css: &str) -> Self {
		Self::Inline(css.to_string())
	}
}

impl From<String> for StyleSource {
	fn from(css: String) -> Self {
		Self::Inline(css)
	}
}

impl From<Lazy<StyleSheet>> for StyleSource {
	fn from(module: Lazy<StyleSheet>) -> Self {
		Self::Module(module)
	}
}

/// The head section of a page.
#[derive(Debug, Default)]
pub struct Head {
	/// Document title.
	pub title: Option<String>,
	/// Stylesheets to adopt.
	pub styles: Vec<StyleSource>,
}

impl Head {
	/// Creates an empty head.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the title.
	pub fn with_title(mut self, title: impl Into<String>) -> Self {
		self.title = Some(title.into());
		self
	}

	/// Adds a stylesheet.
	pub fn with_style(mut self, style: impl Into<StyleSource>) -> Self {
		self.styles.push(style.into());
		self
	}
}

/// A structured `{ head?, body }` output.
#[derive(Debug)]
pub struct PageOutput {
	/// Optional head side effects.
	pub head: Option<Head>,
	/// The content to render.
	pub body: Box<RenderOutput>,
}

impl PageOutput {
	/// Creates a page without a head.
	pub fn body(body: impl Into<RenderOutput>) -> Self {
		Self {
			head: None,
			body: Box::new(body.into()),
		}
	}
}

/// The page shape expected from plain keyed structures.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PageShape {
	/// Optional head.
	#[serde(default)]
	pub head: Option<HeadShape>,
	/// Body content; must not be null.
	pub body: serde_json::Value,
}

/// The head part of a [`PageShape`].
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct HeadShape {
	/// Document title.
	#[serde(default)]
	pub title: Option<String>,
	/// Inline CSS texts.
	#[serde(default)]
	pub styles: Vec<String>,
}

impl From<PageShape> for PageOutput {
	fn from(shape: PageShape) -> Self {
		Self {
			head: shape.head.map(|head| Head {
				title: head.title,
				styles: head.styles.into_iter().map(StyleSource::Inline).collect(),
			}),
			body: Box::new(RenderOutput::from_json(shape.body)),
		}
	}
}
