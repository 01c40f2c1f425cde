// Copyright 2026 The Simlin Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

//! Forces for the label simulation.
//!
//! A force reads the positions as they stood at the start of the tick and
//! accumulates into velocities; positions are only written once every force
//! has run.  The formulas follow d3-force (exact pairwise many-body, no
//! Barnes-Hut approximation, since there are only ever a few dozen nodes).

use rand::Rng;
use rand::rngs::StdRng;

use super::graph::{Link, Node, Position};

/// Everything a force may touch during one tick.
pub struct TickState<'a> {
    pub nodes: &'a [Node],
    pub positions: &'a [Position],
    pub velocities: &'a mut [Position],
    pub alpha: f64,
    pub rng: &'a mut StdRng,
}

pub trait Force {
    fn apply(&mut self, state: &mut TickState<'_>);
}

/// Tiny random offset used to separate nodes at exactly the same spot.
fn jiggle(rng: &mut StdRng) -> f64 {
    (rng.random::<f64>() - 0.5) * 1e-6
}

/// Pairwise repulsion (negative strength) or attraction among all nodes.
pub struct ManyBody {
    strength: f64,
    distance_min2: f64,
}

impl ManyBody {
    pub fn new(strength: f64, distance_min: f64) -> Self {
        ManyBody {
            strength,
            distance_min2: distance_min * distance_min,
        }
    }
}

impl Force for ManyBody {
    fn apply(&mut self, state: &mut TickState<'_>) {
        let n = state.nodes.len();
        for i in 0..n {
            // fixed nodes never move, so their velocity is irrelevant
            if state.nodes[i].is_fixed() {
                continue;
            }
            let pos = state.positions[i];
            for j in 0..n {
                if i == j {
                    continue;
                }
                let mut d = state.positions[j] - pos;
                if d.x == 0.0 {
                    d.x = jiggle(state.rng);
                }
                if d.y == 0.0 {
                    d.y = jiggle(state.rng);
                }
                let mut l = d.dot(d);
                if l < self.distance_min2 {
                    l = (self.distance_min2 * l).sqrt();
                }
                state.velocities[i] += d * (self.strength * state.alpha / l);
            }
        }
    }
}

/// Springs pulling each label toward its anchor.
pub struct LinkForce {
    links: Vec<Link>,
    /// Share of each link's correction applied to the label end.
    bias: Vec<f64>,
}

impl LinkForce {
    pub fn new(links: Vec<Link>, node_count: usize) -> Self {
        let mut degree = vec![0usize; node_count];
        for link in &links {
            degree[link.anchor] += 1;
            degree[link.label] += 1;
        }
        let bias = links
            .iter()
            .map(|l| degree[l.anchor] as f64 / (degree[l.anchor] + degree[l.label]) as f64)
            .collect();
        LinkForce { links, bias }
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }
}

impl Force for LinkForce {
    fn apply(&mut self, state: &mut TickState<'_>) {
        for (link, &bias) in self.links.iter().zip(&self.bias) {
            let mut d = state.positions[link.label] - state.positions[link.anchor];
            if d.x == 0.0 {
                d.x = jiggle(state.rng);
            }
            if d.y == 0.0 {
                d.y = jiggle(state.rng);
            }
            let l = d.length();
            let k = (l - link.distance) / l * state.alpha * link.strength;
            let d = d * k;
            state.velocities[link.label] += d * -bias;
            state.velocities[link.anchor] += d * (1.0 - bias);
        }
    }
}

/// Nudges movable nodes so the centroid of all nodes drifts toward
/// `center`.
pub struct CenterForce {
    center: Position,
    strength: f64,
}

impl CenterForce {
    pub fn new(center: Position, strength: f64) -> Self {
        CenterForce { center, strength }
    }
}

impl Force for CenterForce {
    fn apply(&mut self, state: &mut TickState<'_>) {
        let n = state.positions.len();
        if n == 0 {
            return;
        }
        let sum = state
            .positions
            .iter()
            .fold(Position::default(), |acc, &p| acc + p);
        let mean = sum * (1.0 / n as f64);
        let shift = (mean - self.center) * self.strength;
        for (node, v) in state.nodes.iter().zip(state.velocities.iter_mut()) {
            if !node.is_fixed() {
                *v += shift * -1.0;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;

    use super::*;
    use crate::layout::graph::NodeKind;

    fn node(id: &str, kind: NodeKind) -> Node {
        Node {
            id: id.to_owned(),
            kind,
            datum: 0,
        }
    }

    fn run_force(
        force: &mut dyn Force,
        nodes: &[Node],
        positions: &[Position],
        alpha: f64,
    ) -> Vec<Position> {
        let mut velocities = vec![Position::default(); nodes.len()];
        let mut rng = StdRng::seed_from_u64(1);
        let mut state = TickState {
            nodes,
            positions,
            velocities: &mut velocities,
            alpha,
            rng: &mut rng,
        };
        force.apply(&mut state);
        velocities
    }

    #[test]
    fn test_many_body_repels_labels() {
        let nodes = [node("a", NodeKind::Label), node("b", NodeKind::Label)];
        let positions = [Position::new(0.0, 0.0), Position::new(10.0, 0.0)];
        let v = run_force(&mut ManyBody::new(-30.0, 1.0), &nodes, &positions, 1.0);
        // each pushed 30 * 10 / 100 away from the other
        assert!((v[0].x + 3.0).abs() < 1e-6, "{:?}", v[0]);
        assert!((v[1].x - 3.0).abs() < 1e-6, "{:?}", v[1]);
    }

    #[test]
    fn test_many_body_skips_fixed() {
        let nodes = [node("a", NodeKind::Anchor), node("a", NodeKind::Label)];
        let positions = [Position::new(0.0, 0.0), Position::new(3.0, 4.0)];
        let v = run_force(&mut ManyBody::new(-30.0, 1.0), &nodes, &positions, 1.0);
        assert_eq!(Position::default(), v[0]);
        // pushed away from the anchor
        assert!(v[1].x > 0.0 && v[1].y > 0.0);
    }

    #[test]
    fn test_many_body_separates_coincident_nodes() {
        let nodes = [node("a", NodeKind::Label), node("b", NodeKind::Label)];
        let positions = [Position::new(5.0, 5.0), Position::new(5.0, 5.0)];
        let v = run_force(&mut ManyBody::new(-30.0, 1.0), &nodes, &positions, 1.0);
        assert!(v.iter().all(|v| v.x.is_finite() && v.y.is_finite()));
        assert!(v[0].length() > 0.0);
    }

    #[test]
    fn test_link_pulls_label_back() {
        let nodes = [node("a", NodeKind::Anchor), node("a", NodeKind::Label)];
        let positions = [Position::new(0.0, 0.0), Position::new(30.0, 0.0)];
        let link = Link {
            anchor: 0,
            label: 1,
            distance: 10.0,
            strength: 1.0,
        };
        let mut force = LinkForce::new(vec![link], 2);
        let v = run_force(&mut force, &nodes, &positions, 1.0);
        // stretch of 20, split evenly between the two ends
        assert!((v[1].x + 10.0).abs() < 1e-9, "{:?}", v[1]);
        assert!((v[0].x - 10.0).abs() < 1e-9, "{:?}", v[0]);
    }

    #[test]
    fn test_link_pushes_when_compressed() {
        let nodes = [node("a", NodeKind::Anchor), node("a", NodeKind::Label)];
        let positions = [Position::new(0.0, 0.0), Position::new(0.0, 2.0)];
        let link = Link {
            anchor: 0,
            label: 1,
            distance: 10.0,
            strength: 1.0,
        };
        let v = run_force(&mut LinkForce::new(vec![link], 2), &nodes, &positions, 1.0);
        assert!(v[1].y > 0.0);
    }

    #[test]
    fn test_center_moves_only_free_nodes() {
        let nodes = [node("a", NodeKind::Anchor), node("a", NodeKind::Label)];
        let positions = [Position::new(10.0, 10.0), Position::new(30.0, 10.0)];
        let mut force = CenterForce::new(Position::new(0.0, 0.0), 0.5);
        let v = run_force(&mut force, &nodes, &positions, 1.0);
        assert_eq!(Position::default(), v[0]);
        assert_eq!(Position::new(-10.0, -5.0), v[1]);
    }
}
