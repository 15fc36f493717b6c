//! Integration tests for application startup
//!
//! These tests verify:
//! 1. The matched route is rendered into the mount element
//! 2. The router layout wraps the view
//! 3. The loading overlay is removed after rendering
//! 4. Unmatched URLs and missing mount elements are reported

use multiview_core::component::{Component, ComponentClass, LayoutClass};
use multiview_core::dom::{Document, Node};
use multiview_core::lazy::Lazy;
use multiview_core::page::{Head, RenderOutput, Rendered};
use multiview_pages::{Application, ApplicationError, ApplicationOptions, RenderError};
use multiview_urls::dsl::param_int;
use multiview_urls::{RouteLiteral, Router, RouterOptions, path};
use rstest::{fixture, rstest};

#[derive(Default)]
struct Home;

impl Component for Home {
	fn render(&self) -> Rendered {
		Some(RenderOutput::page(Head::new().with_title("Home"), "welcome"))
	}
}

#[derive(Default)]
struct Login;

impl Component for Login {
	fn render(&self) -> Rendered {
		Some(Node::element("form").with_text("login").into())
	}
}

#[derive(Default)]
struct Post;

impl Component for Post {
	fn render(&self) -> Rendered {
		Some("post".into())
	}
}

struct Fixture {
	document: Document,
	mount: Node,
	app: Application,
}

#[fixture]
fn fixture() -> Fixture {
	let document = Document::new();
	let mount = Node::element("div");
	document.body().append_child(&mount);

	let auth_layout = LayoutClass::from_fn("AuthShell", || {
		Node::element("section").with_child(Node::slot())
	});
	let app = Application::new(
		"docs",
		"1.2.0",
		ApplicationOptions::new()
			.with_document(document.clone())
			.with_element(mount.clone())
			.with_loader(LayoutClass::from_fn("Spinner", || {
				Node::element("progress")
			})),
	)
	.router(
		Router::default()
			.add_route(("/", ComponentClass::of::<Home>()))
			.add_route((path!["/posts", param_int("id")], ComponentClass::of::<Post>())),
	)
	.router(
		Router::new(
			RouterOptions::new()
				.with_prefix("/auth")
				.with_layout(Lazy::ready(auth_layout)),
		)
		.add_route(RouteLiteral::new("/login", ComponentClass::of::<Login>()).index()),
	);

	Fixture {
		document,
		mount,
		app,
	}
}

#[rstest]
#[tokio::test]
async fn test_start_renders_matched_route(fixture: Fixture) {
	let Fixture {
		document,
		mount,
		mut app,
	} = fixture;

	app.start("/").await.unwrap();

	assert_eq!(document.title(), "Home");
	assert_eq!(mount.to_html(), "<div>welcome</div>");
}

#[rstest]
#[tokio::test]
async fn test_start_wraps_view_in_router_layout(fixture: Fixture) {
	let Fixture { mount, mut app, .. } = fixture;

	app.start("/auth").await.unwrap();

	assert_eq!(
		mount.to_html(),
		"<div><section><form>login</form></section></div>"
	);
}

#[rstest]
#[tokio::test]
async fn test_loader_overlay_is_removed(fixture: Fixture) {
	let Fixture { mount, mut app, .. } = fixture;

	app.start("/posts/7").await.unwrap();

	assert!(mount.query_selector("progress").is_none());
	assert_eq!(mount.to_html(), "<div>post</div>");
}

#[rstest]
#[case("/missing")]
#[case("/posts/seven")]
#[tokio::test]
async fn test_unmatched_url_is_reported(fixture: Fixture, #[case] url: &str) {
	let Fixture { mount, mut app, .. } = fixture;

	let err = app.start(url).await.unwrap_err();

	assert_eq!(err, ApplicationError::NoRoute(url.to_string()));
	assert_eq!(
		err.to_string(),
		format!(
			"The application does not contain any routes containing the URL path '{}'.",
			url
		)
	);
	assert_eq!(mount.child_count(), 0);
}

#[rstest]
#[tokio::test]
async fn test_start_without_mount_element_fails() {
	let mut app = Application::new("docs", "1.2.0", ApplicationOptions::new())
		.router(Router::default().add_route(("/", ComponentClass::of::<Home>())));

	assert_eq!(
		app.start("/").await,
		Err(ApplicationError::Render(RenderError::MissingElement))
	);
}

#[rstest]
#[tokio::test]
async fn test_overlay_is_removed_when_rendering_fails() {
	#[derive(Default)]
	struct Empty;

	impl Component for Empty {
		fn render(&self) -> Rendered {
			None
		}
	}

	let mount = Node::element("div");
	let mut app = Application::new(
		"docs",
		"1.2.0",
		ApplicationOptions::new()
			.with_element(mount.clone())
			.with_loader(LayoutClass::from_fn("Spinner", || Node::element("progress"))),
	)
	.router(Router::default().add_route(("/", ComponentClass::of::<Empty>())));

	assert!(matches!(
		app.start("/").await,
		Err(ApplicationError::Render(RenderError::NullOutput { .. }))
	));
	assert_eq!(mount.child_count(), 0);
}
