// Copyright 2026 The Simlin Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

//! Tick-driven label placement.
//!
//! Each data point contributes two nodes: a fixed anchor at the point's
//! scaled coordinates and a free label tethered to it.  Nodes live in an
//! arena addressed by index (anchors `0..n`, labels `n..2n`); consumers only
//! ever see [`Snapshot`] copies taken after each tick.

use std::cell::Cell;
use std::collections::HashMap;
use std::rc::Rc;

use namelaw_core::layout_err;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::{debug, trace};

use super::config::LabelLayoutConfig;
use super::force::{CenterForce, Force, LinkForce, ManyBody, TickState};
use super::graph::{Link, Node, NodeKind, Position, Viewport};
use super::scale::LinearScale;
use crate::common::Result;
use crate::points::DataPoint;

/// Cancels the simulation it was taken from.  Clones share one flag, so a
/// subscriber can hold a handle and stop the run it is observing.
#[derive(Clone, Debug, Default)]
pub struct StopHandle(Rc<Cell<bool>>);

impl StopHandle {
    pub fn stop(&self) {
        self.0.set(true);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.get()
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// Ran one tick; more remain.
    Ticked,
    /// Alpha dropped below `alpha_min`.  Further calls do nothing.
    Converged,
    /// Stopped before or during this tick.
    Stopped,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NodeSnapshot {
    pub id: String,
    pub kind: NodeKind,
    pub x: f64,
    pub y: f64,
}

impl NodeSnapshot {
    pub fn position(&self) -> Position {
        Position::new(self.x, self.y)
    }
}

/// Positions of every node after a tick.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Snapshot {
    pub tick: usize,
    pub alpha: f64,
    pub nodes: Vec<NodeSnapshot>,
}

impl Snapshot {
    pub fn anchors(&self) -> impl Iterator<Item = &NodeSnapshot> {
        self.nodes.iter().filter(|n| n.kind == NodeKind::Anchor)
    }

    pub fn labels(&self) -> impl Iterator<Item = &NodeSnapshot> {
        self.nodes.iter().filter(|n| n.kind == NodeKind::Label)
    }

    pub fn position(&self, id: &str, kind: NodeKind) -> Option<Position> {
        self.nodes
            .iter()
            .find(|n| n.kind == kind && n.id == id)
            .map(NodeSnapshot::position)
    }
}

pub type Subscriber = Box<dyn FnMut(&Snapshot)>;

pub struct LabelSimulation {
    nodes: Vec<Node>,
    positions: Vec<Position>,
    velocities: Vec<Position>,
    /// Pinned position for anchors, `None` for labels.
    fixed: Vec<Option<Position>>,
    forces: Vec<Box<dyn Force>>,
    rng: StdRng,
    viewport: Viewport,
    config: LabelLayoutConfig,
    alpha: f64,
    tick: usize,
    converged: bool,
    stop: StopHandle,
    subscribers: Vec<Subscriber>,
}

impl LabelSimulation {
    pub fn new(
        points: &[DataPoint],
        x_scale: &LinearScale,
        y_scale: &LinearScale,
        viewport: Viewport,
        config: LabelLayoutConfig,
    ) -> Result<Self> {
        config.check()?;
        if points.is_empty() {
            return layout_err!(DegenerateDataset, "no data points to lay out".to_owned());
        }

        let n = points.len();
        let mut rng = StdRng::seed_from_u64(config.seed);
        let mut nodes = Vec::with_capacity(2 * n);
        let mut positions = Vec::with_capacity(2 * n);
        let mut fixed = Vec::with_capacity(2 * n);
        let mut anchor_ids: HashMap<&str, usize> = HashMap::with_capacity(n);

        for (i, point) in points.iter().enumerate() {
            if !point.x.is_finite() || !point.y.is_finite() {
                return layout_err!(
                    BadDataset,
                    format!("point {} has non-finite coordinates", point.id)
                );
            }
            if anchor_ids.insert(point.id.as_str(), i).is_some() {
                return layout_err!(BadDataset, format!("duplicate point id {}", point.id));
            }
            let pos = Position::new(x_scale.map(point.x), y_scale.map(point.y));
            nodes.push(Node {
                id: point.id.clone(),
                kind: NodeKind::Anchor,
                datum: i,
            });
            positions.push(pos);
            fixed.push(Some(pos));
        }

        let mut links = Vec::with_capacity(n);
        for (i, point) in points.iter().enumerate() {
            let Some(&anchor) = anchor_ids.get(point.id.as_str()) else {
                return layout_err!(BadDataset, format!("no anchor for {}", point.id));
            };
            let jitter = Position::new(rng.random::<f64>() - 0.5, rng.random::<f64>() - 0.5);
            let start = positions[anchor] + jitter * 1e-3;
            nodes.push(Node {
                id: point.id.clone(),
                kind: NodeKind::Label,
                datum: i,
            });
            positions.push(viewport.clamp(start, config.node_radius));
            fixed.push(None);
            links.push(Link {
                anchor,
                label: n + i,
                distance: config.link_distance,
                strength: config.link_strength,
            });
        }

        let forces: Vec<Box<dyn Force>> = vec![
            Box::new(LinkForce::new(links, 2 * n)),
            Box::new(ManyBody::new(config.charge, config.distance_min)),
            Box::new(CenterForce::new(viewport.center(), config.center_strength)),
        ];

        debug!(points = n, seed = config.seed, "starting label simulation");

        Ok(LabelSimulation {
            velocities: vec![Position::default(); 2 * n],
            nodes,
            positions,
            fixed,
            forces,
            rng,
            viewport,
            alpha: config.alpha,
            config,
            tick: 0,
            converged: false,
            stop: StopHandle::default(),
            subscribers: Vec::new(),
        })
    }

    /// Register a callback invoked with the snapshot after every tick.
    pub fn subscribe(&mut self, subscriber: impl FnMut(&Snapshot) + 'static) {
        self.subscribers.push(Box::new(subscriber));
    }

    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    /// Stop the simulation.  Once this returns no tick runs and no
    /// subscriber is called again.  Calling it more than once, or after
    /// convergence, is harmless.
    pub fn stop(&self) {
        if !self.stop.is_stopped() {
            debug!(tick = self.tick, "label simulation stopped");
        }
        self.stop.stop();
    }

    pub fn is_stopped(&self) -> bool {
        self.stop.is_stopped()
    }

    pub fn is_converged(&self) -> bool {
        self.converged
    }

    pub fn is_running(&self) -> bool {
        !self.converged && !self.stop.is_stopped()
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn tick_count(&self) -> usize {
        self.tick
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Advance one tick and notify subscribers.
    pub fn step(&mut self) -> TickOutcome {
        if self.stop.is_stopped() {
            return TickOutcome::Stopped;
        }
        if self.converged {
            return TickOutcome::Converged;
        }

        self.alpha += (self.config.alpha_target - self.alpha) * self.config.alpha_decay;

        let mut state = TickState {
            nodes: &self.nodes,
            positions: &self.positions,
            velocities: &mut self.velocities,
            alpha: self.alpha,
            rng: &mut self.rng,
        };
        for force in self.forces.iter_mut() {
            force.apply(&mut state);
        }

        let keep = 1.0 - self.config.velocity_decay;
        let radius = self.config.node_radius;
        for ((pos, vel), pin) in self
            .positions
            .iter_mut()
            .zip(self.velocities.iter_mut())
            .zip(&self.fixed)
        {
            match *pin {
                Some(p) => {
                    *pos = p;
                    *vel = Position::default();
                }
                None => {
                    *vel = *vel * keep;
                    *pos = self.viewport.clamp(*pos + *vel, radius);
                }
            }
        }

        self.tick += 1;
        self.converged = self.alpha < self.config.alpha_min;
        trace!(tick = self.tick, alpha = self.alpha, "tick");

        if !self.subscribers.is_empty() {
            let snapshot = self.snapshot();
            for subscriber in self.subscribers.iter_mut() {
                // a subscriber may have stopped us
                if self.stop.is_stopped() {
                    return TickOutcome::Stopped;
                }
                subscriber(&snapshot);
            }
        }

        if self.converged {
            debug!(tick = self.tick, alpha = self.alpha, "label simulation converged");
            TickOutcome::Converged
        } else {
            TickOutcome::Ticked
        }
    }

    /// Tick until converged, stopped, or `max_ticks` ticks have run, and
    /// return the final positions.
    pub fn run(&mut self) -> Snapshot {
        for _ in 0..self.config.max_ticks {
            if self.step() != TickOutcome::Ticked {
                break;
            }
        }
        if self.is_running() {
            debug!(
                tick = self.tick,
                alpha = self.alpha,
                "tick limit reached before convergence"
            );
        }
        self.snapshot()
    }

    pub fn snapshot(&self) -> Snapshot {
        let nodes = self
            .nodes
            .iter()
            .zip(&self.positions)
            .map(|(node, pos)| NodeSnapshot {
                id: node.id.clone(),
                kind: node.kind,
                x: pos.x,
                y: pos.y,
            })
            .collect();
        Snapshot {
            tick: self.tick,
            alpha: self.alpha,
            nodes,
        }
    }
}
