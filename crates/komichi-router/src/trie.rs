//! Per-method route trie.
//!
//! Each registered dynamic route is a path through the trie, one node per
//! segment. A node's children are keyed by literal segment text, with two
//! reserved slots: [`PARAM_KEY`] for the single parameter child and
//! [`WILDCARD_KEY`] for the single wildcard child. Lookup priority at every
//! depth is literal, then parameter, then wildcard; a wildcard match ends
//! traversal immediately without consuming the remaining segments.

use std::collections::HashMap;
use std::sync::Arc;

use komichi_http::Handler;

/// Reserved child key for parameter segments (`:name`). Not a valid literal
/// key because literal keys are whole segments and this one is only ever
/// inserted by [`Node::insert`].
pub(crate) const PARAM_KEY: &str = ":param";

/// Reserved child key for the trailing wildcard segment (`*`).
pub(crate) const WILDCARD_KEY: &str = "*";

/// A node in the route trie.
///
/// `handler` is present iff some registered route terminates at this node;
/// intermediate nodes with no handler are pure prefixes and never match as
/// a full path.
pub(crate) struct Node {
	children: HashMap<String, Node>,
	handler: Option<Arc<dyn Handler>>,
	// Empty except on a parameter child that binds a name.
	param_name: String,
}

/// A successful trie lookup: the terminal handler plus the parameters bound
/// along the way.
pub(crate) struct TrieMatch {
	pub handler: Arc<dyn Handler>,
	pub params: HashMap<String, String>,
}

impl Node {
	pub(crate) fn new() -> Self {
		Self::new_child(String::new())
	}

	fn new_child(param_name: String) -> Self {
		Self {
			children: HashMap::new(),
			handler: None,
			param_name,
		}
	}

	/// Insert a route ending at the last of `segments`.
	///
	/// Segments starting with `:` become the parameter child (the rest of
	/// the segment is the parameter name), segments starting with `*` become
	/// the wildcard child, everything else is a literal child. The handler
	/// on the terminal node is replaced silently if already set; returns
	/// `true` in that case so the caller can surface the overwrite.
	pub(crate) fn insert(&mut self, segments: &[&str], handler: Arc<dyn Handler>) -> bool {
		let mut current = self;

		for segment in segments {
			let (key, param_name) = if let Some(name) = segment.strip_prefix(':') {
				(PARAM_KEY, name.to_string())
			} else if segment.starts_with('*') {
				(WILDCARD_KEY, String::new())
			} else {
				(*segment, String::new())
			};

			current = current
				.children
				.entry(key.to_string())
				.or_insert_with(|| Node::new_child(param_name));
		}

		current.handler.replace(handler).is_some()
	}

	/// Walk `path` (already trimmed of surrounding slashes) through the trie.
	///
	/// Returns `None` when the walk falls off the trie or ends on a node
	/// with no handler. A wildcard child short-circuits: its handler is
	/// returned immediately and the remaining segments are neither consumed
	/// nor validated.
	pub(crate) fn search(&self, path: &str) -> Option<TrieMatch> {
		let mut current = self;
		let mut params = HashMap::new();

		for segment in path.split('/') {
			if let Some(child) = current.children.get(segment) {
				current = child;
			} else if let Some(child) = current.children.get(PARAM_KEY) {
				current = child;
				if !child.param_name.is_empty() {
					params.insert(child.param_name.clone(), segment.to_string());
				}
			} else if let Some(child) = current.children.get(WILDCARD_KEY) {
				return child
					.handler
					.clone()
					.map(|handler| TrieMatch { handler, params });
			} else {
				return None;
			}
		}

		current
			.handler
			.clone()
			.map(|handler| TrieMatch { handler, params })
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use async_trait::async_trait;
	use komichi_http::{Request, Response, Result};

	struct TagHandler {
		tag: &'static str,
	}

	#[async_trait]
	impl Handler for TagHandler {
		async fn handle(&self, _request: Request) -> Result<Response> {
			Ok(Response::ok().with_body(self.tag))
		}
	}

	fn handler(tag: &'static str) -> Arc<dyn Handler> {
		Arc::new(TagHandler { tag })
	}

	async fn tag_of(m: &TrieMatch) -> String {
		let request = Request::builder().build().unwrap();
		m.handler.handle(request).await.unwrap().body_text()
	}

	#[tokio::test]
	async fn test_literal_insert_and_search() {
		let mut root = Node::new();
		root.insert(&["users", "list"], handler("list"));

		let m = root.search("users/list").unwrap();
		assert_eq!(tag_of(&m).await, "list");
		assert!(m.params.is_empty());
	}

	#[tokio::test]
	async fn test_param_binding() {
		let mut root = Node::new();
		root.insert(&["users", ":id"], handler("detail"));

		let m = root.search("users/42").unwrap();
		assert_eq!(tag_of(&m).await, "detail");
		assert_eq!(m.params.get("id"), Some(&"42".to_string()));
	}

	#[tokio::test]
	async fn test_unnamed_param_binds_nothing() {
		let mut root = Node::new();
		root.insert(&["users", ":"], handler("anon"));

		let m = root.search("users/42").unwrap();
		assert_eq!(tag_of(&m).await, "anon");
		assert!(m.params.is_empty());
	}

	#[tokio::test]
	async fn test_literal_beats_param() {
		let mut root = Node::new();
		root.insert(&["users", ":id"], handler("param"));
		root.insert(&["users", "me"], handler("literal"));

		let m = root.search("users/me").unwrap();
		assert_eq!(tag_of(&m).await, "literal");

		let m = root.search("users/77").unwrap();
		assert_eq!(tag_of(&m).await, "param");
	}

	#[tokio::test]
	async fn test_wildcard_short_circuits() {
		let mut root = Node::new();
		root.insert(&["files", "*"], handler("files"));

		// Any number of remaining segments matches, without binding params.
		let m = root.search("files/a").unwrap();
		assert_eq!(tag_of(&m).await, "files");

		let m = root.search("files/a/b/c").unwrap();
		assert_eq!(tag_of(&m).await, "files");
		assert!(m.params.is_empty());
	}

	#[test]
	fn test_params_bound_before_wildcard_are_kept() {
		let mut root = Node::new();
		root.insert(&["users", ":id", "*"], handler("rest"));

		let m = root.search("users/9/files/x").unwrap();
		assert_eq!(m.params.get("id"), Some(&"9".to_string()));
	}

	#[test]
	fn test_intermediate_node_is_no_match() {
		let mut root = Node::new();
		root.insert(&["a", "b", ":c"], handler("deep"));

		// "a" and "a/b" exist as prefixes but carry no handler.
		assert!(root.search("a").is_none());
		assert!(root.search("a/b").is_none());
	}

	#[test]
	fn test_unmatched_path() {
		let mut root = Node::new();
		root.insert(&["users", ":id"], handler("detail"));

		assert!(root.search("posts/1").is_none());
		assert!(root.search("users/1/extra").is_none());
	}

	#[tokio::test]
	async fn test_duplicate_insert_overwrites_and_reports() {
		let mut root = Node::new();
		assert!(!root.insert(&["users", ":id"], handler("first")));
		assert!(root.insert(&["users", ":id"], handler("second")));

		let m = root.search("users/1").unwrap();
		assert_eq!(tag_of(&m).await, "second");
	}

	#[tokio::test]
	async fn test_empty_path_is_single_empty_segment() {
		let mut root = Node::new();
		// A wildcard at the first position matches the empty segment too.
		root.insert(&["*"], handler("all"));

		let m = root.search("").unwrap();
		assert_eq!(tag_of(&m).await, "all");
	}
}
