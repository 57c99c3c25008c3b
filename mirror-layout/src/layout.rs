//! Layered top-to-bottom tree layout.
//!
//! Ranks come from a breadth-first walk from every node without incoming
//! edges; nodes the walk never reaches (cycles) start extra trees in input
//! order. A node reachable from several parents stays under the first one
//! the walk reaches.
//!
//! Horizontal placement is a tidy tree: each subtree reserves
//! `max(own width, children's widths + gaps)`, children sit left to right in
//! input order and the parent is centred over them. Rank `r` starts below
//! the tallest node of rank `r - 1` plus the rank gap.

use std::collections::{HashMap, VecDeque};

use crate::error::LayoutError;
use crate::graph::{LayoutGraph, Point, PositionedNode, TreeGraph};
use crate::{NODE_SEP, RANK_SEP};

/// Spacing parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutConfig {
    /// Minimum horizontal gap between neighbouring subtrees.
    pub node_sep: f64,
    /// Vertical gap between ranks.
    pub rank_sep: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            node_sep: NODE_SEP,
            rank_sep: RANK_SEP,
        }
    }
}

/// Lay out `graph` with the given spacing.
pub fn layout(graph: &TreeGraph, config: LayoutConfig) -> Result<LayoutGraph, LayoutError> {
    let n = graph.nodes.len();
    let mut index: HashMap<&str, usize> = HashMap::with_capacity(n);
    for (i, node) in graph.nodes.iter().enumerate() {
        if index.insert(node.id.as_str(), i).is_some() {
            return Err(LayoutError::DuplicateId(node.id.clone()));
        }
    }

    let mut children: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut incoming = vec![0usize; n];
    for edge in &graph.edges {
        let source = lookup(&index, &edge.source)?;
        let target = lookup(&index, &edge.target)?;
        if source != target {
            children[source].push(target);
            incoming[target] += 1;
        }
    }

    // Breadth-first ranks and the spanning tree actually used for placement.
    let mut rank = vec![0usize; n];
    let mut visited = vec![false; n];
    let mut tree: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut order = Vec::with_capacity(n);
    let mut roots = Vec::new();

    let starts = (0..n)
        .filter(|&i| incoming[i] == 0)
        .chain(0..n)
        .collect::<Vec<_>>();
    for start in starts {
        if visited[start] {
            continue;
        }
        visited[start] = true;
        roots.push(start);
        let mut queue = VecDeque::from([start]);
        while let Some(u) = queue.pop_front() {
            order.push(u);
            for &v in &children[u] {
                if !visited[v] {
                    visited[v] = true;
                    rank[v] = rank[u] + 1;
                    tree[u].push(v);
                    queue.push_back(v);
                }
            }
        }
    }

    // Subtree widths, children before parents.
    let mut span = vec![0.0f64; n];
    for &u in order.iter().rev() {
        let kids = &tree[u];
        let block = children_block(kids, &span, config.node_sep);
        span[u] = graph.nodes[u].width.max(block);
    }

    // Horizontal centres.
    let mut center_x = vec![0.0f64; n];
    let mut cursor = 0.0;
    for &root in &roots {
        let mut stack = vec![(root, cursor)];
        while let Some((u, left)) = stack.pop() {
            center_x[u] = left + span[u] / 2.0;
            let kids = &tree[u];
            let block = children_block(kids, &span, config.node_sep);
            let mut child_left = left + (span[u] - block) / 2.0;
            for &v in kids {
                stack.push((v, child_left));
                child_left += span[v] + config.node_sep;
            }
        }
        cursor += span[root] + config.node_sep;
    }

    // Vertical rank bands.
    let ranks = rank.iter().copied().max().map_or(0, |r| r + 1);
    let mut band_height = vec![0.0f64; ranks];
    for (i, node) in graph.nodes.iter().enumerate() {
        band_height[rank[i]] = band_height[rank[i]].max(node.height);
    }
    let mut band_top = vec![0.0f64; ranks];
    for r in 1..ranks {
        band_top[r] = band_top[r - 1] + band_height[r - 1] + config.rank_sep;
    }

    let min_left = graph
        .nodes
        .iter()
        .enumerate()
        .map(|(i, node)| center_x[i] - node.width / 2.0)
        .fold(f64::INFINITY, f64::min);
    let shift = if min_left.is_finite() { -min_left } else { 0.0 };

    let nodes = graph
        .nodes
        .iter()
        .enumerate()
        .map(|(i, node)| {
            let center_y = band_top[rank[i]] + band_height[rank[i]] / 2.0;
            PositionedNode {
                id: node.id.clone(),
                label: node.label.clone(),
                position: Point {
                    x: center_x[i] - node.width / 2.0 + shift,
                    y: center_y - node.height / 2.0,
                },
                width: node.width,
                height: node.height,
                rank: rank[i],
            }
        })
        .collect();

    tracing::debug!(nodes = n, roots = roots.len(), ranks, "laid out tree");

    Ok(LayoutGraph {
        nodes,
        edges: graph.edges.clone(),
    })
}

fn lookup(index: &HashMap<&str, usize>, id: &str) -> Result<usize, LayoutError> {
    index
        .get(id)
        .copied()
        .ok_or_else(|| LayoutError::UnknownNode(id.to_string()))
}

fn children_block(kids: &[usize], span: &[f64], node_sep: f64) -> f64 {
    if kids.is_empty() {
        return 0.0;
    }
    kids.iter().map(|&k| span[k]).sum::<f64>() + node_sep * (kids.len() - 1) as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{LayoutEdge, LayoutNode};
    use crate::{NODE_HEIGHT, NODE_WIDTH};

    fn graph(nodes: &[&str], edges: &[(&str, &str)]) -> TreeGraph {
        TreeGraph {
            nodes: nodes.iter().map(|id| LayoutNode::new(*id, *id)).collect(),
            edges: edges.iter().map(|(s, t)| LayoutEdge::new(*s, *t)).collect(),
        }
    }

    #[test]
    fn single_node_sits_at_origin() {
        let out = layout(&graph(&["root"], &[]), LayoutConfig::default()).unwrap();
        assert_eq!(out.position("root"), Some(Point { x: 0.0, y: 0.0 }));
    }

    #[test]
    fn root_centred_over_two_children() {
        let out = layout(
            &graph(&["r", "a", "b"], &[("r", "a"), ("r", "b")]),
            LayoutConfig::default(),
        )
        .unwrap();
        let a = out.position("a").unwrap();
        let b = out.position("b").unwrap();
        let r = out.position("r").unwrap();

        assert_eq!(a, Point { x: 0.0, y: NODE_HEIGHT + RANK_SEP });
        assert_eq!(b.x, NODE_WIDTH + NODE_SEP);
        assert_eq!(r.x, (NODE_WIDTH + NODE_SEP) / 2.0);
        assert_eq!(r.y, 0.0);
    }

    #[test]
    fn sibling_order_follows_input() {
        let out = layout(
            &graph(&["r", "z", "y", "x"], &[("r", "z"), ("r", "y"), ("r", "x")]),
            LayoutConfig::default(),
        )
        .unwrap();
        let xs: Vec<f64> = ["z", "y", "x"]
            .iter()
            .map(|id| out.position(id).unwrap().x)
            .collect();
        assert!(xs[0] < xs[1] && xs[1] < xs[2]);
    }

    #[test]
    fn wide_subtree_pushes_neighbour_right() {
        let out = layout(
            &graph(
                &["r", "a", "b", "a1", "a2", "a3"],
                &[("r", "a"), ("r", "b"), ("a", "a1"), ("a", "a2"), ("a", "a3")],
            ),
            LayoutConfig::default(),
        )
        .unwrap();
        let a3 = out.position("a3").unwrap();
        let b = out.position("b").unwrap();
        assert!(b.x >= a3.x + NODE_WIDTH + NODE_SEP);
        assert_eq!(out.node("a3").unwrap().rank, 2);
    }

    #[test]
    fn duplicate_id_is_rejected() {
        let err = layout(&graph(&["a", "a"], &[]), LayoutConfig::default()).unwrap_err();
        assert_eq!(err, LayoutError::DuplicateId("a".into()));
    }

    #[test]
    fn unknown_edge_endpoint_is_rejected() {
        let err = layout(&graph(&["a"], &[("a", "ghost")]), LayoutConfig::default()).unwrap_err();
        assert_eq!(err, LayoutError::UnknownNode("ghost".into()));
    }

    #[test]
    fn cycle_still_places_every_node() {
        let out = layout(
            &graph(&["a", "b"], &[("a", "b"), ("b", "a")]),
            LayoutConfig::default(),
        )
        .unwrap();
        assert_eq!(out.node("a").unwrap().rank, 0);
        assert_eq!(out.node("b").unwrap().rank, 1);
        assert_eq!(out.edges.len(), 2);
    }

    #[test]
    fn second_parent_is_ignored_for_placement() {
        let out = layout(
            &graph(&["r", "a", "b", "c"], &[("r", "a"), ("r", "b"), ("a", "c"), ("b", "c")]),
            LayoutConfig::default(),
        )
        .unwrap();
        let a = out.position("a").unwrap();
        let c = out.position("c").unwrap();
        assert_eq!(a.x, c.x);
    }

    #[test]
    fn empty_graph_is_empty_layout() {
        let out = layout(&TreeGraph::default(), LayoutConfig::default()).unwrap();
        assert!(out.nodes.is_empty());
    }
}
