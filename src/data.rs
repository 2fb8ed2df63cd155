//! Graph dataset: JSON shapes, link categories, and the startup fetch.

use log::info;
use serde::Deserialize;
use thiserror::Error;

/// A link category. Order here is the legend/domain order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkKind {
	Licensing,
	Suit,
	Resolved,
}

impl LinkKind {
	/// All categories in domain order.
	pub const ALL: [LinkKind; 3] = [LinkKind::Licensing, LinkKind::Suit, LinkKind::Resolved];

	/// Color shared by the edge stroke, arrowhead fill and legend swatch.
	pub fn color(self) -> &'static str {
		match self {
			LinkKind::Licensing => "#1f77b4",
			LinkKind::Suit => "#ff7f0e",
			LinkKind::Resolved => "#2ca02c",
		}
	}

	/// Legend text.
	pub fn label(self) -> &'static str {
		match self {
			LinkKind::Licensing => "licensing",
			LinkKind::Suit => "suit",
			LinkKind::Resolved => "resolved",
		}
	}
}

/// A graph vertex. Extra descriptive JSON attributes are tolerated and
/// ignored; positions are owned by the simulation.
#[derive(Clone, Debug, Deserialize)]
pub struct GraphNode {
	pub id: String,
}

/// A directed, categorized edge between two node ids.
#[derive(Clone, Debug, Deserialize)]
pub struct GraphLink {
	pub source: String,
	pub target: String,
	#[serde(rename = "type")]
	pub kind: LinkKind,
}

/// The full dataset handed to the canvas component.
#[derive(Clone, Debug, Deserialize)]
pub struct GraphData {
	pub nodes: Vec<GraphNode>,
	pub links: Vec<GraphLink>,
}

/// Failure of the startup data fetch. Carries messages rather than the
/// underlying errors so it stays `Clone` inside a resource signal.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum DataError {
	#[error("failed to fetch {url}: {message}")]
	Fetch { url: String, message: String },
	#[error("failed to decode {url}: {message}")]
	Decode { url: String, message: String },
}

async fn fetch_json<T: serde::de::DeserializeOwned>(url: &str) -> Result<T, DataError> {
	let response = reqwest::get(url)
		.await
		.and_then(|r| r.error_for_status())
		.map_err(|e| DataError::Fetch {
			url: url.to_string(),
			message: e.to_string(),
		})?;
	response.json().await.map_err(|e| DataError::Decode {
		url: url.to_string(),
		message: e.to_string(),
	})
}

/// Fetch the node and link lists, resolved relative to the page.
/// No retries; on failure the visualization does not render.
pub async fn load_graph(nodes_url: &str, links_url: &str) -> Result<GraphData, DataError> {
	let nodes: Vec<GraphNode> = fetch_json(nodes_url).await?;
	let links: Vec<GraphLink> = fetch_json(links_url).await?;
	info!("Loaded {} nodes, {} links", nodes.len(), links.len());
	Ok(GraphData { nodes, links })
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn link_kind_parses_lowercase_names() {
		let kinds: Vec<LinkKind> =
			serde_json::from_str(r#"["licensing", "suit", "resolved"]"#).unwrap();
		assert_eq!(kinds, LinkKind::ALL);
	}

	#[test]
	fn link_reads_the_type_field() {
		let link: GraphLink =
			serde_json::from_str(r#"{"source": "Apple", "target": "Samsung", "type": "suit"}"#)
				.unwrap();
		assert_eq!(link.source, "Apple");
		assert_eq!(link.target, "Samsung");
		assert_eq!(link.kind, LinkKind::Suit);
	}

	#[test]
	fn unknown_category_is_rejected() {
		let result: Result<GraphLink, _> =
			serde_json::from_str(r#"{"source": "a", "target": "b", "type": "merger"}"#);
		assert!(result.is_err());
	}

	#[test]
	fn node_tolerates_extra_attributes() {
		let node: GraphNode =
			serde_json::from_str(r#"{"id": "Apple", "country": "US", "founded": 1976}"#).unwrap();
		assert_eq!(node.id, "Apple");
	}

	#[test]
	fn colors_follow_domain_order() {
		let colors: Vec<&str> = LinkKind::ALL.iter().map(|k| k.color()).collect();
		assert_eq!(colors, ["#1f77b4", "#ff7f0e", "#2ca02c"]);
	}
}
