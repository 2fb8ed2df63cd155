use std::collections::HashMap;
use std::f64::consts::PI;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};
use log::warn;

use crate::data::{GraphData, LinkKind};

pub const NODE_RADIUS: f64 = 4.5;
pub const HIT_RADIUS: f64 = 12.0;

// Cooling schedule: alpha decays towards alpha_target each step and the
// simulation stops once alpha drops below ALPHA_MIN with no target set.
// A drag raises the target to REHEAT_TARGET until release.
const ALPHA_DECAY: f64 = 0.0228;
const ALPHA_MIN: f64 = 0.001;
const REHEAT_TARGET: f64 = 0.3;

#[derive(Clone, Debug)]
pub struct NodeInfo {
	pub id: String,
}

/// A simulation edge, keeping the category the dataset assigned to it.
#[derive(Clone, Copy, Debug)]
pub struct Edge {
	pub source: DefaultNodeIdx,
	pub target: DefaultNodeIdx,
	pub kind: LinkKind,
}

pub struct ForceGraphState {
	pub graph: ForceGraph<NodeInfo, ()>,
	pub width: f64,
	pub height: f64,
	edges: Vec<Edge>,
	dragging: Option<DefaultNodeIdx>,
	alpha: f64,
	alpha_target: f64,
}

impl ForceGraphState {
	/// Build the simulation from the dataset. Links whose endpoints do
	/// not resolve to a node id are dropped with a warning.
	pub fn new(data: &GraphData, width: f64, height: f64) -> Self {
		let mut graph = ForceGraph::new(SimulationParameters {
			force_charge: 200.0,
			force_spring: 0.05,
			force_max: 100.0,
			node_speed: 3000.0,
			damping_factor: 0.9,
		});
		let mut id_to_idx = HashMap::new();
		let mut edges = Vec::new();

		for (i, node) in data.nodes.iter().enumerate() {
			let angle = (i as f64) * 2.0 * PI / data.nodes.len() as f64;
			let (x, y) = (
				(width / 2.0 + 100.0 * angle.cos()) as f32,
				(height / 2.0 + 100.0 * angle.sin()) as f32,
			);

			let idx = graph.add_node(NodeData {
				x,
				y,
				mass: 10.0,
				is_anchor: false,
				user_data: NodeInfo {
					id: node.id.clone(),
				},
			});
			id_to_idx.insert(node.id.clone(), idx);
		}

		for link in &data.links {
			match (id_to_idx.get(&link.source), id_to_idx.get(&link.target)) {
				(Some(&source), Some(&target)) => {
					graph.add_edge(source, target, EdgeData::default());
					edges.push(Edge {
						source,
						target,
						kind: link.kind,
					});
				}
				_ => warn!(
					"dropping link {} -> {}: unknown endpoint",
					link.source, link.target
				),
			}
		}

		Self {
			graph,
			edges,
			dragging: None,
			width,
			height,
			alpha: 1.0,
			alpha_target: 0.0,
		}
	}

	pub fn edges(&self) -> &[Edge] {
		&self.edges
	}

	/// Current position of every node, keyed by simulation index.
	pub fn positions(&self) -> HashMap<DefaultNodeIdx, (f64, f64)> {
		let mut positions = HashMap::new();
		self.graph.visit_nodes(|node| {
			positions.insert(node.index(), (node.x() as f64, node.y() as f64));
		});
		positions
	}

	pub fn node_at_position(&self, x: f64, y: f64) -> Option<DefaultNodeIdx> {
		let mut found = None;
		self.graph.visit_nodes(|node| {
			let (dx, dy) = (node.x() as f64 - x, node.y() as f64 - y);
			if (dx * dx + dy * dy).sqrt() < HIT_RADIUS {
				found = Some(node.index());
			}
		});
		found
	}

	/// Whether the simulation has cooled to a standstill.
	pub fn is_cooled(&self) -> bool {
		self.alpha < ALPHA_MIN
	}

	/// Advance the simulation one step, scaled by the cooling alpha.
	/// A cooled simulation with no reheat target is left untouched.
	pub fn tick(&mut self, dt: f32) {
		if self.is_cooled() && self.alpha_target == 0.0 {
			return;
		}
		self.alpha += (self.alpha_target - self.alpha) * ALPHA_DECAY;
		self.graph.update(dt * self.alpha as f32);
		self.recenter();
	}

	// Keep the centroid of the free nodes at the canvas center. Pinned
	// nodes stay where the pointer put them.
	fn recenter(&mut self) {
		let (mut sum_x, mut sum_y, mut free) = (0.0f64, 0.0f64, 0usize);
		self.graph.visit_nodes(|node| {
			if !node.data.is_anchor {
				sum_x += node.x() as f64;
				sum_y += node.y() as f64;
				free += 1;
			}
		});
		if free == 0 {
			return;
		}
		let (shift_x, shift_y) = (
			(self.width / 2.0 - sum_x / free as f64) as f32,
			(self.height / 2.0 - sum_y / free as f64) as f32,
		);
		self.graph.visit_nodes_mut(|node| {
			if !node.data.is_anchor {
				node.data.x += shift_x;
				node.data.y += shift_y;
			}
		});
	}

	/// Pin the node under the pointer, if any, and reheat the simulation.
	/// Returns whether a node was hit.
	pub fn drag_start(&mut self, x: f64, y: f64) -> bool {
		let Some(idx) = self.node_at_position(x, y) else {
			return false;
		};
		self.dragging = Some(idx);
		self.graph.visit_nodes_mut(|node| {
			if node.index() == idx {
				node.data.is_anchor = true;
			}
		});
		self.alpha_target = REHEAT_TARGET;
		true
	}

	/// Move the pinned node to the pointer position.
	pub fn drag_move(&mut self, x: f64, y: f64) {
		let Some(idx) = self.dragging else {
			return;
		};
		self.graph.visit_nodes_mut(|node| {
			if node.index() == idx {
				node.data.x = x as f32;
				node.data.y = y as f32;
			}
		});
	}

	/// Unpin the dragged node so it resumes free movement, and let the
	/// simulation cool again.
	pub fn drag_end(&mut self) {
		if let Some(idx) = self.dragging.take() {
			self.graph.visit_nodes_mut(|node| {
				if node.index() == idx {
					node.data.is_anchor = false;
				}
			});
		}
		self.alpha_target = 0.0;
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::data::{GraphLink, GraphNode};

	fn node(id: &str) -> GraphNode {
		GraphNode { id: id.to_string() }
	}

	fn link(source: &str, target: &str, kind: LinkKind) -> GraphLink {
		GraphLink {
			source: source.to_string(),
			target: target.to_string(),
			kind,
		}
	}

	fn sample() -> GraphData {
		GraphData {
			nodes: vec![node("Apple"), node("Samsung"), node("Nokia")],
			links: vec![
				link("Apple", "Samsung", LinkKind::Suit),
				link("Nokia", "Apple", LinkKind::Resolved),
			],
		}
	}

	#[test]
	fn builds_one_simulation_node_per_dataset_node() {
		let state = ForceGraphState::new(&sample(), 960.0, 600.0);
		assert_eq!(state.positions().len(), 3);
		assert_eq!(state.edges().len(), 2);
	}

	#[test]
	fn link_with_unknown_endpoint_is_dropped() {
		let mut data = sample();
		data.links.push(link("Apple", "Motorola", LinkKind::Suit));
		let state = ForceGraphState::new(&data, 960.0, 600.0);
		assert_eq!(state.edges().len(), 2);
	}

	#[test]
	fn edges_keep_their_category() {
		let state = ForceGraphState::new(&sample(), 960.0, 600.0);
		assert_eq!(state.edges()[0].kind, LinkKind::Suit);
		assert_eq!(state.edges()[1].kind, LinkKind::Resolved);
	}

	#[test]
	fn hit_test_finds_a_node_at_its_seeded_position() {
		// A single node is seeded at angle 0 on the placement ring.
		let data = GraphData {
			nodes: vec![node("Apple")],
			links: vec![],
		};
		let state = ForceGraphState::new(&data, 960.0, 600.0);
		assert!(state.node_at_position(960.0 / 2.0 + 100.0, 300.0).is_some());
		assert!(state.node_at_position(0.0, 0.0).is_none());
	}

	#[test]
	fn drag_pins_tracks_and_releases() {
		let data = GraphData {
			nodes: vec![node("Apple")],
			links: vec![],
		};
		let mut state = ForceGraphState::new(&data, 960.0, 600.0);
		assert!(state.drag_start(580.0, 300.0));

		let mut anchored = false;
		state.graph.visit_nodes(|n| anchored = n.data.is_anchor);
		assert!(anchored);

		// While pinned, the node tracks the pointer exactly.
		state.drag_move(200.0, 150.0);
		state.tick(0.016);
		let idx = state.node_at_position(200.0, 150.0).unwrap();
		assert_eq!(state.positions()[&idx], (200.0, 150.0));

		state.drag_end();
		state.graph.visit_nodes(|n| anchored = n.data.is_anchor);
		assert!(!anchored);
	}

	#[test]
	fn drag_move_without_active_drag_is_ignored() {
		let mut state = ForceGraphState::new(&sample(), 960.0, 600.0);
		let before = state.positions();
		state.drag_move(10.0, 10.0);
		assert_eq!(state.positions(), before);
	}

	#[test]
	fn simulation_cools_and_a_drag_reheats_it() {
		let mut state = ForceGraphState::new(&sample(), 960.0, 600.0);
		assert!(!state.is_cooled());

		for _ in 0..400 {
			state.tick(0.016);
		}
		assert!(state.is_cooled());

		// Pointer-down on any node reheats; one step lifts alpha back
		// above the floor.
		let (x, y) = {
			let positions = state.positions();
			*positions.values().next().unwrap()
		};
		assert!(state.drag_start(x, y));
		state.tick(0.016);
		assert!(!state.is_cooled());

		// Release lets it decay again.
		state.drag_end();
		for _ in 0..400 {
			state.tick(0.016);
		}
		assert!(state.is_cooled());
	}
}
