//! The render pipeline.
//!
//! [`Renderer::render`] runs three stages:
//!
//! 1. **Resolve** the handler into a view type and method, construct a fresh
//!    instance and invoke the method.
//! 2. **Compose** the output with the layout, if any
//!    ([`Renderer::use_layout`]). The output replaces the layout's `<slot>`
//!    placeholder, or is appended under the layout root when there is none.
//! 3. **Dispatch** the final value into the mount element. Dispatching is
//!    type directed and recursive; see [`RenderOutput`] for how each variant
//!    is rendered.

use crate::error::{RenderError, RenderResult};
use futures::future::{FutureExt, LocalBoxFuture, join_all};
use multiview_core::component::LazyLayout;
use multiview_core::dom::{Document, Node, SLOT_TAG, StyleSheet};
use multiview_core::page::{Head, PageOutput, RenderOutput, Rendered, StyleSource};
use multiview_core::reactive::ReactiveText;
use multiview_core::validators::{SerdeShapeValidator, ShapeValidator};
use multiview_urls::Handler;
use std::fmt;
use std::rc::Rc;

/// Where dispatched content goes.
#[derive(Debug, Clone)]
pub enum Strategy {
	/// Add the content as the last child of the node.
	Append(Node),
	/// Replace the node with the content.
	Swap(Node),
}

impl Strategy {
	fn place(&self, content: &Node) {
		match self {
			Self::Append(target) => {
				if !target.append_child(content) {
					tracing::warn!("content contains the append target, content was not placed");
				}
			}
			Self::Swap(target) => {
				if !target.replace_with(content) {
					tracing::warn!("swap target is detached or inside the content, content was not placed");
				}
			}
		}
	}
}

/// Renders a route handler into a mount element.
pub struct Renderer {
	document: Document,
	element: Option<Node>,
	layout: Option<LazyLayout>,
	handler: Option<Handler>,
	shapes: Rc<dyn ShapeValidator>,
}

impl Default for Renderer {
	fn default() -> Self {
		Self::new(Document::new())
	}
}

impl Renderer {
	/// Creates a renderer writing into `document`.
	pub fn new(document: Document) -> Self {
		Self {
			document,
			element: None,
			layout: None,
			handler: None,
			shapes: Rc::new(SerdeShapeValidator),
		}
	}

	/// Replaces the validator used for plain structured outputs.
	pub fn with_shape_validator(mut self, shapes: impl ShapeValidator + 'static) -> Self {
		self.shapes = Rc::new(shapes);
		self
	}

	/// Returns the document.
	pub fn document(&self) -> &Document {
		&self.document
	}

	/// Returns the mount element.
	pub fn element(&self) -> Option<&Node> {
		self.element.as_ref()
	}

	/// Sets the mount element.
	pub fn set_element(&mut self, element: Node) {
		self.element = Some(element);
	}

	/// Sets the layout.
	pub fn set_layout(&mut self, layout: LazyLayout) {
		self.layout = Some(layout);
	}

	/// Removes the layout.
	pub fn clear_layout(&mut self) {
		self.layout = None;
	}

	/// Sets the route handler.
	pub fn set_handler(&mut self, handler: Handler) {
		self.handler = Some(handler);
	}

	/// Renders the handler into the mount element.
	///
	/// # Errors
	///
	/// - [`RenderError::MissingHandler`] / [`RenderError::MissingElement`]
	///   when the renderer is not configured
	/// - [`RenderError::Load`] when the view or layout type fails to load
	/// - [`RenderError::UnknownMethod`] when the view has no such method
	/// - [`RenderError::NullOutput`] when the method produces a null output
	pub async fn render(&self) -> RenderResult<()> {
		let handler = self.handler.as_ref().ok_or(RenderError::MissingHandler)?;
		let element = self.element.clone().ok_or(RenderError::MissingElement)?;

		let resolved = handler.resolve().await?;
		let type_name = resolved.class.name();
		let view = resolved.class.instantiate();
		let output = view
			.call(&resolved.method)
			.ok_or_else(|| RenderError::UnknownMethod {
				type_name: type_name.to_string(),
				method: resolved.method.to_string(),
			})?;

		let output = self.use_layout(type_name, &resolved.method, output).await?;
		self.dispatch(output, Strategy::Append(element)).await;
		Ok(())
	}

	/// Composes a view output with the layout.
	///
	/// A deferred output is awaited first. Without a layout the output is
	/// returned unchanged; otherwise it is dispatched into the layout and the
	/// layout root is returned.
	///
	/// # Errors
	///
	/// Returns [`RenderError::NullOutput`] naming `type_name` and `method`
	/// when the output is null, and [`RenderError::Load`] when the layout
	/// fails to load.
	pub async fn use_layout(
		&self,
		type_name: &str,
		method: &str,
		output: Rendered,
	) -> RenderResult<RenderOutput> {
		let output = match output {
			Some(RenderOutput::Future(deferred)) => deferred.await,
			other => other,
		};
		let Some(output) = output else {
			return Err(RenderError::NullOutput {
				type_name: type_name.to_string(),
				method: method.to_string(),
			});
		};

		let Some(layout) = &self.layout else {
			return Ok(output);
		};
		let layout_class = layout.load_or_fallback().await?;
		let root = layout_class.instantiate().render();

		let strategy = match root.query_selector(SLOT_TAG) {
			Some(slot) => Strategy::Swap(slot),
			None => Strategy::Append(root.clone()),
		};
		tracing::debug!(
			layout = layout_class.name(),
			view = type_name,
			method,
			strategy = ?strategy,
			"composing view with layout"
		);
		self.dispatch(output, strategy).await;

		Ok(RenderOutput::Node(root))
	}

	/// Renders `value` with `strategy`.
	///
	/// Never fails: unsupported values are logged and skipped.
	pub fn dispatch(&self, value: RenderOutput, strategy: Strategy) -> LocalBoxFuture<'_, ()> {
		async move {
			match value {
				RenderOutput::Text(text) => strategy.place(&Node::text(text)),
				RenderOutput::Number(n) => strategy.place(&Node::text(format_number(n))),
				RenderOutput::BigInt(n) => strategy.place(&Node::text(n.to_string())),
				RenderOutput::Bool(flag) => {
					strategy.place(&Node::text(if flag { "true" } else { "false" }))
				}
				RenderOutput::Date(date) => strategy.place(&Node::text(date.to_rfc3339())),
				RenderOutput::Node(node) => strategy.place(&node),
				RenderOutput::Callable(call) => match call() {
					Some(value) => self.dispatch(value, strategy).await,
					None => tracing::debug!("callable render value produced nothing"),
				},
				RenderOutput::Reactive(cell) => self.bind_reactive(cell, &strategy),
				RenderOutput::Future(deferred) => match deferred.await {
					Some(value) => self.dispatch(value, strategy).await,
					None => tracing::warn!("deferred render value resolved to nothing"),
				},
				RenderOutput::Page(page) => self.render_page(page, strategy).await,
				RenderOutput::Json(value) => match self.shapes.validate(&value) {
					Ok(shape) => self.render_page(shape.into(), strategy).await,
					Err(err) => {
						tracing::debug!(error = %err, "structure is not a page, rendering as JSON");
						strategy.place(&Node::text(value.to_string()));
					}
				},
				RenderOutput::Opaque(opaque) => {
					tracing::warn!(
						type_name = opaque.type_name(),
						"unsupported render value, nothing was rendered"
					);
				}
			}
		}
		.boxed_local()
	}

	fn bind_reactive(&self, cell: Rc<dyn ReactiveText>, strategy: &Strategy) {
		let node = Node::text(cell.current_text());
		strategy.place(&node);

		let weak = node.downgrade();
		let subscription = cell.subscribe_text(Box::new(move |text| {
			if let Some(node) = weak.upgrade() {
				node.set_text(text);
			}
		}));
		node.bind(subscription);
	}

	async fn render_page(&self, page: PageOutput, strategy: Strategy) {
		if let Some(head) = page.head {
			self.apply_head(head).await;
		}
		self.dispatch(*page.body, strategy).await;
	}

	async fn apply_head(&self, head: Head) {
		if let Some(title) = head.title {
			self.document.set_title(title);
		}

		let sheets = join_all(head.styles.into_iter().map(|style| async move {
			match style {
				StyleSource::Inline(css) => Ok(StyleSheet::parse(&css)),
				StyleSource::Module(module) => module.load().await,
			}
		}))
		.await;

		for sheet in sheets {
			match sheet {
				Ok(sheet) => self.document.adopt_style_sheet(sheet),
				Err(err) => tracing::warn!(error = %err, "failed to load stylesheet"),
			}
		}
	}
}

impl fmt::Debug for Renderer {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Renderer")
			.field("element", &self.element.is_some())
			.field("layout", &self.layout.is_some())
			.field("handler", &self.handler)
			.finish()
	}
}

/// Formats a number the way a browser displays it.
fn format_number(n: f64) -> String {
	if n.is_nan() {
		"NaN".to_string()
	} else if n.is_infinite() {
		if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
	} else if n == 0.0 {
		"0".to_string()
	} else {
		n.to_string()
	}
}
