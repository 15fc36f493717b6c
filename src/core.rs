//! Document model, reactive cells, render outputs and view contracts.
//!
//! # Examples
//!
//! ```rust,no_run
//! use multiview::core::dom::Node;
//! use multiview::core::reactive::Signal;
//!
//! let count = Signal::new(0);
//! let button = Node::element("button").with_text("+1");
//! # let _ = (count, button);
//! ```

pub use multiview_core::*;
