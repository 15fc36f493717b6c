//! Application bootstrap.

use crate::error::{ApplicationResult, RenderError};
use crate::renderer::Renderer;
use multiview_core::component::LayoutClass;
use multiview_core::dom::{Document, Node};
use multiview_urls::{RouterSource, RouterTree};

/// Options for [`Application::new`].
#[derive(Debug, Clone, Default)]
pub struct ApplicationOptions {
	/// The mount element.
	pub element: Option<Node>,
	/// Shown under the mount element while the first page renders.
	pub loader: Option<LayoutClass>,
	/// The document receiving the title and stylesheets.
	pub document: Option<Document>,
}

impl ApplicationOptions {
	/// Creates empty options.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the mount element.
	pub fn with_element(mut self, element: Node) -> Self {
		self.element = Some(element);
		self
	}

	/// Sets the loading overlay.
	pub fn with_loader(mut self, loader: LayoutClass) -> Self {
		self.loader = Some(loader);
		self
	}

	/// Sets the document.
	pub fn with_document(mut self, document: Document) -> Self {
		self.document = Some(document);
		self
	}
}

/// A single-page application: a router tree plus a renderer.
///
/// # Examples
///
/// ```ignore
/// let mut app = Application::new("docs", "1.0.0", ApplicationOptions::new().with_element(root))
///     .router(Router::default().add_route(("/", ComponentClass::of::<Home>())));
/// app.start("/").await?;
/// ```
#[derive(Debug)]
pub struct Application {
	name: String,
	version: String,
	element: Option<Node>,
	loader: Option<LayoutClass>,
	tree: RouterTree,
	renderer: Renderer,
}

impl Application {
	/// Creates an application with an empty router tree.
	pub fn new(name: impl Into<String>, version: impl Into<String>, options: ApplicationOptions) -> Self {
		let ApplicationOptions {
			element,
			loader,
			document,
		} = options;
		Self {
			name: name.into(),
			version: version.into(),
			element,
			loader,
			tree: RouterTree::new(),
			renderer: Renderer::new(document.unwrap_or_default()),
		}
	}

	/// Adds a router or a lazy router source.
	pub fn router(mut self, source: impl Into<RouterSource>) -> Self {
		self.tree.add(source);
		self
	}

	/// Returns the application name.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Returns the application version.
	pub fn version(&self) -> &str {
		&self.version
	}

	/// Returns the router tree.
	pub fn tree(&self) -> &RouterTree {
		&self.tree
	}

	/// Returns the renderer.
	pub fn renderer(&self) -> &Renderer {
		&self.renderer
	}

	/// Resolves `url` and renders the matching route into the mount element.
	///
	/// The loading overlay, when configured, is attached before rendering
	/// and removed afterwards whether or not rendering succeeded.
	///
	/// # Errors
	///
	/// - [`ApplicationError::NoRoute`](crate::ApplicationError::NoRoute) when
	///   no route matches `url`
	/// - [`ApplicationError::Render`](crate::ApplicationError::Render) when
	///   the mount element is missing or rendering fails
	pub async fn start(&mut self, url: &str) -> ApplicationResult<()> {
		let matched = self.tree.match_path(url).await?;

		match matched.layout {
			Some(layout) => self.renderer.set_layout(layout),
			None => self.renderer.clear_layout(),
		}
		self.renderer.set_handler(matched.route.handler().clone());

		let element = self.element.clone().ok_or(RenderError::MissingElement)?;
		self.renderer.set_element(element.clone());

		let overlay = self.loader.as_ref().map(|loader| {
			let overlay = loader.instantiate().render();
			element.append_child(&overlay);
			overlay
		});

		let rendered = self.renderer.render().await;
		if let Some(overlay) = overlay {
			overlay.remove();
		}
		rendered?;

		tracing::info!(route = %matched.route.id(), url, "Starting {} v{}", self.name, self.version);
		Ok(())
	}
}
