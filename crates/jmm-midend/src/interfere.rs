use std::collections::{BTreeSet, HashMap};

use log::trace;

use crate::liveness::Liveness;

/// Build the interference graph of a method: a variable live into an
/// instruction conflicts with every other variable that instruction defines
/// or keeps alive.
pub fn interference(liveness: &Liveness) -> InterferenceGraph {
    let mut graph = InterferenceGraph::new();

    for node in liveness.nodes.iter() {
        let targets: BTreeSet<&String> = node.def.union(&node.live_out).collect();

        for live in node.live_in.iter() {
            for other in targets.iter().filter(|other| **other != live) {
                graph.add_edge(live, other);
            }
        }
    }

    trace!(
        "interference graph has {} vertices and {} edges",
        graph.len(),
        graph.edges().count()
    );

    graph
}

/// An undirected graph over variable names. Vertices remember the order in
/// which they were first added.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct InterferenceGraph {
    order: Vec<String>,
    neighbours: HashMap<String, BTreeSet<String>>,
}

impl InterferenceGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_vertex(&mut self, name: &str) {
        if !self.neighbours.contains_key(name) {
            self.order.push(name.into());
            self.neighbours.insert(name.into(), BTreeSet::new());
        }
    }

    pub fn add_edge(&mut self, a: &str, b: &str) {
        self.add_vertex(a);
        self.add_vertex(b);

        if a != b {
            self.neighbours.entry(a.into()).or_default().insert(b.into());
            self.neighbours.entry(b.into()).or_default().insert(a.into());
        }
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.neighbours.contains_key(name)
    }

    /// The vertices in insertion order.
    pub fn vertices(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    pub fn neighbours(&self, name: &str) -> impl Iterator<Item = &str> {
        self.neighbours
            .get(name)
            .into_iter()
            .flatten()
            .map(String::as_str)
    }

    pub fn degree(&self, name: &str) -> usize {
        self.neighbours.get(name).map(BTreeSet::len).unwrap_or(0)
    }

    pub fn max_degree(&self) -> usize {
        self.neighbours.values().map(BTreeSet::len).max().unwrap_or(0)
    }

    pub fn has_edge(&self, a: &str, b: &str) -> bool {
        self.neighbours
            .get(a)
            .map(|neighbours| neighbours.contains(b))
            .unwrap_or(false)
    }

    /// Every edge once, with the earlier inserted vertex first.
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str)> {
        self.order.iter().enumerate().flat_map(move |(index, a)| {
            self.order[index + 1..]
                .iter()
                .filter(move |b| self.has_edge(a, b))
                .map(move |b| (a.as_str(), b.as_str()))
        })
    }
}
