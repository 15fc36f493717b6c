//! # Multiview Core
//!
//! Shared building blocks of the Multiview single-page framework.
//!
//! ## Modules
//!
//! - [`dom`]: in-memory document tree the renderer mutates
//! - [`reactive`]: state and computed cells with explicit subscriptions
//! - [`page`]: the [`RenderOutput`](page::RenderOutput) a view method produces
//! - [`component`]: view and layout type contracts
//! - [`lazy`]: lazily loaded module references
//! - [`validators`]: path parameter rules and the page shape schema
//!
//! ## Example
//!
//! ```ignore
//! use multiview_core::component::{Component, ComponentClass};
//! use multiview_core::page::{Head, RenderOutput, Rendered};
//!
//! #[derive(Default)]
//! struct Home;
//!
//! impl Component for Home {
//!     fn render(&self) -> Rendered {
//!         Some(RenderOutput::page(Head::new().with_title("Home"), "Welcome"))
//!     }
//! }
//!
//! let class = ComponentClass::of::<Home>();
//! assert_eq!(class.name(), "Home");
//! ```

#![warn(missing_docs)]

pub mod component;
pub mod dom;
pub mod lazy;
pub mod page;
pub mod reactive;
pub mod validators;

pub use component::{
	Component, ComponentClass, DEFAULT_METHOD, Layout, LayoutClass, LazyComponent, LazyLayout,
};
pub use dom::{Document, Node, NodeKind, SLOT_TAG, StyleSheet, WeakNode};
pub use lazy::{Lazy, LoadError};
pub use page::{
	Head, HeadShape, Opaque, PageOutput, PageShape, RenderFuture, RenderOutput, Rendered,
	StyleSource,
};
pub use reactive::{Memo, ReactiveText, Signal, Subscription};
pub use validators::{
	AnyRule, DecimalRule, EnumRule, IntegerRule, NumberRule, Rule, SerdeShapeValidator, ShapeError,
	ShapeValidator, StringRule, ValidationError, ValidationResult,
};
