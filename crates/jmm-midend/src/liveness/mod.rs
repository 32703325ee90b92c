//! Per-instruction liveness of the variables of a method.

#[cfg(test)]
mod tests;

use std::collections::BTreeSet;

use jmm_common::ir::{Element, InstId, InstructionKind, Method, Successor};
use log::{debug, trace};

pub type VarSet = BTreeSet<String>;

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LivenessNode {
    pub id: InstId,
    pub def: VarSet,
    pub uses: VarSet,
    pub live_in: VarSet,
    pub live_out: VarSet,

    /// Successors other than the end node.
    pub succs: Vec<InstId>,
}

/// The liveness of every instruction of a method, indexed by
/// [`InstId::index`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Liveness {
    pub nodes: Vec<LivenessNode>,
}

pub fn liveness(method: &Method) -> Liveness {
    debug!("computing liveness for `{}`", method.name);

    let mut liveness = Liveness {
        nodes: method
            .instructions
            .iter()
            .map(|inst| {
                let (def, uses) = def_use(&inst.kind);
                let succs = inst
                    .successors
                    .iter()
                    .filter_map(|succ| match succ {
                        Successor::Instruction(id) => Some(*id),
                        Successor::End => None,
                    })
                    .collect();

                LivenessNode {
                    id: inst.id,
                    def,
                    uses,
                    live_in: VarSet::new(),
                    live_out: VarSet::new(),
                    succs,
                }
            })
            .collect(),
    };

    let mut passes = 1;
    while liveness.iterate() {
        passes += 1;
    }

    trace!("liveness of `{}` settled after {passes} passes", method.name);

    liveness
}

impl Liveness {
    /// Run one pass over every instruction in program order, returning `true`
    /// if any set grew.
    pub fn iterate(&mut self) -> bool {
        let mut changed = false;

        for index in 0..self.nodes.len() {
            let node = &self.nodes[index];
            let live_in: VarSet = node
                .uses
                .iter()
                .chain(node.live_out.difference(&node.def))
                .cloned()
                .collect();

            let node = &mut self.nodes[index];
            let before = node.live_in.len();
            node.live_in.extend(live_in);
            changed |= node.live_in.len() != before;

            let mut live_out = VarSet::new();
            for succ in self.nodes[index].succs.iter() {
                let succ = self.nodes.get(succ.index()).unwrap_or_else(|| {
                    panic!("instruction {} has a dangling successor {succ}", index + 1)
                });
                live_out.extend(succ.live_in.iter().cloned());
            }

            let node = &mut self.nodes[index];
            let before = node.live_out.len();
            node.live_out.extend(live_out);
            changed |= node.live_out.len() != before;
        }

        changed
    }

    pub fn node(&self, id: InstId) -> &LivenessNode {
        &self.nodes[id.index()]
    }
}

/// The variables defined and used by an instruction. Only plain variable
/// destinations are definitions; storing into an array slot uses the array
/// and the index instead.
pub fn def_use(kind: &InstructionKind) -> (VarSet, VarSet) {
    let def = match kind {
        InstructionKind::Assign(assign) => match &assign.dest {
            Element::Operand { .. } => assign.dest.name().map(String::from).into_iter().collect(),
            Element::Literal { .. } | Element::Array { .. } => VarSet::new(),
        },
        _ => VarSet::new(),
    };

    let uses = kind
        .operands()
        .into_iter()
        .flat_map(Element::reads)
        .map(String::from)
        .collect();

    (def, uses)
}
