//! The router tree: resolves a URL path to a router and route.

use crate::error::{RouterError, RouterResult};
use crate::path::{Path, PathParams};
use crate::route::Route;
use crate::router::Router;
use futures::future::join_all;
use multiview_core::component::LazyLayout;
use multiview_core::lazy::Lazy;

/// A lazily loaded list of routers.
pub type LazyRouters = Lazy<Vec<Router>>;

/// A router given to [`RouterTree::add`].
pub enum RouterSource {
	/// A router available now.
	Router(Router),
	/// Routers loaded on the first match.
	Lazy(LazyRouters),
}

impl From<Router> for RouterSource {
	fn from(router: Router) -> Self {
		Self::Router(router)
	}
}

impl From<LazyRouters> for RouterSource {
	fn from(lazy: LazyRouters) -> Self {
		Self::Lazy(lazy)
	}
}

/// The result of a successful match.
#[derive(Debug, Clone)]
pub struct RouteMatch {
	/// Layout of the router owning the route.
	pub layout: Option<LazyLayout>,
	/// The matched route.
	pub route: Route,
	/// Parameters captured from the URL.
	pub params: PathParams,
}

/// Registry of routers.
///
/// Candidates are evaluated one at a time in registration order: routers in
/// the order they were added (lazy routers after the routers known when they
/// were loaded), routes in insertion order. The first matching candidate
/// wins. A candidate matches when its path matches the URL, or when it is an
/// index route and the URL equals its router prefix.
#[derive(Default)]
pub struct RouterTree {
	routers: Vec<Router>,
	lazy_routers: Vec<LazyRouters>,
}

impl RouterTree {
	/// Creates an empty tree.
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds a router or a lazy router source.
	pub fn add(&mut self, source: impl Into<RouterSource>) -> &mut Self {
		match source.into() {
			RouterSource::Router(router) => self.routers.push(router),
			RouterSource::Lazy(lazy) => self.lazy_routers.push(lazy),
		}
		self
	}

	/// Returns the loaded routers.
	pub fn routers(&self) -> &[Router] {
		&self.routers
	}

	/// Returns the number of lazy sources not loaded yet.
	pub fn pending_sources(&self) -> usize {
		self.lazy_routers.len()
	}

	/// Loads every pending lazy source concurrently.
	///
	/// Sources are consumed even when loading fails; the routers of the
	/// sources that loaded are kept, in source order.
	///
	/// # Errors
	///
	/// Returns the first load error.
	pub async fn load_pending(&mut self) -> RouterResult<()> {
		if self.lazy_routers.is_empty() {
			return Ok(());
		}
		let sources = std::mem::take(&mut self.lazy_routers);
		tracing::debug!(count = sources.len(), "loading lazy routers");

		let results = join_all(sources.iter().map(|source| source.load())).await;
		let mut first_error = None;
		for result in results {
			match result {
				Ok(routers) => self.routers.extend(routers),
				Err(err) => {
					tracing::warn!(error = %err, "failed to load lazy routers");
					first_error.get_or_insert(err);
				}
			}
		}
		match first_error {
			Some(err) => Err(err.into()),
			None => Ok(()),
		}
	}

	/// Resolves `url` to the first matching route.
	///
	/// # Errors
	///
	/// Returns [`RouterError::NotFound`] with the URL as given when nothing
	/// matches, or a load error from a lazy source.
	pub async fn match_path(&mut self, url: &str) -> RouterResult<RouteMatch> {
		self.load_pending().await?;

		let url_path = Path::from_literal(&Path::normalize(url));
		let url_full = url_path.full();

		for router in &self.routers {
			for route in router.routes() {
				let params = match route.path().captures(&url_path).await {
					Some(params) => Some(params),
					None if route.is_index() && Path::normalize(router.prefix()) == url_full => {
						Some(PathParams::new())
					}
					None => None,
				};
				if let Some(params) = params {
					tracing::debug!(
						url,
						route = %route.path(),
						id = %route.id(),
						"matched route"
					);
					return Ok(RouteMatch {
						layout: router.layout().cloned(),
						route: route.clone(),
						params,
					});
				}
			}
		}

		tracing::debug!(url, "no route matched");
		Err(RouterError::NotFound(url.to_string()))
	}
}

impl std::fmt::Debug for RouterTree {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("RouterTree")
			.field("routers", &self.routers)
			.field("pending_sources", &self.lazy_routers.len())
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::dsl::param;
	use crate::router::{RouteLiteral, RouterOptions};
	use async_trait::async_trait;
	use multiview_core::component::{Component, ComponentClass};
	use multiview_core::lazy::LoadError;
	use multiview_core::page::Rendered;
	use multiview_core::validators::{Rule, ValidationResult};
	use rstest::rstest;
	use serde_json::Value;
	use std::cell::{Cell, RefCell};
	use std::rc::Rc;

	#[derive(Default)]
	struct View;

	impl Component for View {
		fn render(&self) -> Rendered {
			Some("view".into())
		}
	}

	fn view() -> ComponentClass {
		ComponentClass::of::<View>()
	}

	#[rstest]
	#[tokio::test]
	async fn test_empty_tree_is_not_found() {
		let mut tree = RouterTree::new();
		let err = tree.match_path("/anything/").await.unwrap_err();
		assert_eq!(err, RouterError::NotFound("/anything/".to_string()));
	}

	#[rstest]
	#[tokio::test]
	async fn test_lazy_sources_load_once() {
		let loads = Rc::new(Cell::new(0));
		let counter = loads.clone();
		let lazy: LazyRouters = Lazy::new(move || {
			counter.set(counter.get() + 1);
			async { Ok(vec![Router::default().add_route(("/lazy", view()))]) }
		});

		let mut tree = RouterTree::new();
		tree.add(lazy);
		assert_eq!(tree.pending_sources(), 1);

		tree.match_path("/lazy").await.unwrap();
		tree.match_path("/lazy").await.unwrap();

		assert_eq!(loads.get(), 1);
		assert_eq!(tree.pending_sources(), 0);
		assert_eq!(tree.routers().len(), 1);
	}

	#[rstest]
	#[tokio::test]
	async fn test_lazy_sources_load_concurrently() {
		let started = Rc::new(Cell::new(0));
		let seen_at_resume = Rc::new(RefCell::new(Vec::new()));

		let mut tree = RouterTree::new();
		for route in ["/first", "/second"] {
			let started = started.clone();
			let seen_at_resume = seen_at_resume.clone();
			let lazy: LazyRouters = Lazy::new(move || {
				let started = started.clone();
				let seen_at_resume = seen_at_resume.clone();
				async move {
					started.set(started.get() + 1);
					tokio::task::yield_now().await;
					seen_at_resume.borrow_mut().push(started.get());
					Ok(vec![Router::default().add_route((route, view()))])
				}
			});
			tree.add(lazy);
		}

		tree.load_pending().await.unwrap();

		assert_eq!(*seen_at_resume.borrow(), vec![2, 2]);
		let paths: Vec<String> = tree
			.routers()
			.iter()
			.flat_map(|router| router.routes().map(|route| route.path().full()))
			.collect();
		assert_eq!(paths, ["/first", "/second"]);
	}

	/// Accepts anything, counting how often it runs.
	#[derive(Debug)]
	struct CountingRule(Rc<Cell<usize>>);

	#[async_trait(?Send)]
	impl Rule for CountingRule {
		async fn validate(&self, raw: &str) -> ValidationResult<Value> {
			self.0.set(self.0.get() + 1);
			Ok(Value::String(raw.to_string()))
		}

		fn name(&self) -> &'static str {
			"counting"
		}
	}

	#[rstest]
	#[tokio::test]
	async fn test_later_candidates_are_not_evaluated_after_a_match() {
		let first_calls = Rc::new(Cell::new(0));
		let second_calls = Rc::new(Cell::new(0));
		let mut tree = RouterTree::new();
		tree.add(Router::default().add_route((
			crate::path![param("a", CountingRule(first_calls.clone()))],
			view(),
		)));
		tree.add(Router::default().add_route((
			crate::path![param("b", CountingRule(second_calls.clone()))],
			view(),
		)));

		let matched = tree.match_path("/x").await.unwrap();

		assert_eq!(matched.params.get_str("a"), Some("x"));
		assert_eq!(first_calls.get(), 1);
		assert_eq!(second_calls.get(), 0);
	}

	#[rstest]
	#[tokio::test]
	async fn test_lazy_failure_surfaces_load_error() {
		let lazy: LazyRouters = Lazy::new(|| async { Err(LoadError::Failed("offline".into())) });
		let mut tree = RouterTree::new();
		tree.add(Router::default().add_route(("/", view())));
		tree.add(lazy);

		let err = tree.match_path("/").await.unwrap_err();
		assert!(matches!(err, RouterError::Load(_)));
		assert!(tree.match_path("/").await.is_ok());
	}

	#[rstest]
	#[tokio::test]
	async fn test_index_route_answers_prefix() {
		let mut tree = RouterTree::new();
		tree.add(
			Router::new(RouterOptions::new().with_prefix("/auth"))
				.add_route(RouteLiteral::new("/login", view()).index()),
		);

		let by_prefix = tree.match_path("/auth/").await.unwrap();
		let direct = tree.match_path("/auth/login").await.unwrap();
		assert_eq!(by_prefix.route.id(), direct.route.id());
		assert!(by_prefix.params.is_empty());
	}
}
