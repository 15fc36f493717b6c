//! # Multiview Pages
//!
//! View rendering and application bootstrap for the Multiview single-page
//! framework.
//!
//! - [`Renderer`]: resolves a route handler, composes its output with the
//!   route's layout and writes the result into a mount element
//! - [`Application`]: ties a [`RouterTree`](multiview_urls::RouterTree) to a
//!   [`Renderer`] and renders the page for a start URL

#![warn(missing_docs)]

pub mod application;
pub mod error;
pub mod renderer;

pub use application::{Application, ApplicationOptions};
pub use error::{ApplicationError, ApplicationResult, RenderError, RenderResult};
pub use renderer::{Renderer, Strategy};
