use std::collections::{BTreeMap, HashMap, HashSet};

use log::trace;
use thiserror::Error;

use crate::interfere::InterferenceGraph;

/// A register for every vertex of an interference graph.
pub type Coloring = BTreeMap<String, usize>;

#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum Infeasible {
    #[error("`{name}` interferes with {degree} variables, more than the {budget} registers available")]
    Degree {
        name: String,
        degree: usize,
        budget: usize,
    },

    #[error("every register below {budget} is taken by a neighbour of `{name}`")]
    Exhausted { name: String, budget: usize },

    #[error("`{name}` must live in register {register}, outside the {budget} registers available")]
    Pinned {
        name: String,
        register: usize,
        budget: usize,
    },
}

impl InterferenceGraph {
    /// Color the graph with at most `max_registers` colors, or with as many
    /// as the graph could need if that is 0.
    pub fn color(&self, max_registers: usize) -> Result<Coloring, Infeasible> {
        self.color_with(max_registers, &HashMap::new())
    }

    /// Color the graph with some vertices fixed to a given register up front.
    ///
    /// Vertices are simplified in insertion order rather than by degree, so
    /// this may give up on graphs that do have a coloring within the budget.
    pub fn color_with(
        &self,
        max_registers: usize,
        pinned: &HashMap<String, usize>,
    ) -> Result<Coloring, Infeasible> {
        let k = if max_registers == 0 {
            let needed = self.max_degree() + 1;
            let fixed = pinned.values().map(|register| register + 1).max().unwrap_or(0);
            needed.max(fixed)
        } else {
            if let Some(name) = self
                .vertices()
                .find(|name| self.degree(name) > max_registers)
            {
                return Err(Infeasible::Degree {
                    name: name.into(),
                    degree: self.degree(name),
                    budget: max_registers,
                });
            }

            max_registers
        };

        let mut coloring = Coloring::new();
        for (name, register) in pinned.iter() {
            if !self.contains(name) {
                continue;
            }

            if *register >= k {
                return Err(Infeasible::Pinned {
                    name: name.clone(),
                    register: *register,
                    budget: k,
                });
            }

            coloring.insert(name.clone(), *register);
        }

        let mut stack: Vec<&str> = self
            .vertices()
            .filter(|name| !pinned.contains_key(*name))
            .collect();

        while let Some(name) = stack.pop() {
            let used: HashSet<usize> = self
                .neighbours(name)
                .filter_map(|other| coloring.get(other).copied())
                .collect();

            let color = (0..k)
                .find(|color| !used.contains(color))
                .ok_or_else(|| Infeasible::Exhausted {
                    name: name.into(),
                    budget: k,
                })?;

            trace!("`{name}` gets register {color}");
            coloring.insert(name.into(), color);
        }

        Ok(coloring)
    }
}
