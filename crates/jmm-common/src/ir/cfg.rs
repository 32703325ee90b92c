use std::collections::HashMap;

use log::trace;
use thiserror::Error;

use super::{InstId, Instruction, InstructionKind, Successor};

#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum CfgError {
    #[error("method `{method}` jumps to unknown label `{label}`")]
    UnknownLabel { method: String, label: String },

    #[error("label `{label}` is defined more than once in method `{method}`")]
    DuplicateLabel { method: String, label: String },

    #[error("label `{label}` in method `{method}` is not followed by an instruction")]
    DanglingLabel { method: String, label: String },
}

/// Collect the labels attached to each instruction into a table from label to
/// the labelled instruction.
pub fn label_table(
    method: &str,
    instructions: &[Instruction],
) -> Result<HashMap<String, InstId>, CfgError> {
    let mut labels = HashMap::new();
    for inst in instructions {
        for label in inst.labels.iter() {
            if labels.insert(label.clone(), inst.id).is_some() {
                return Err(CfgError::DuplicateLabel {
                    method: method.into(),
                    label: label.clone(),
                });
            }
        }
    }

    Ok(labels)
}

/// Fill in the successors of every instruction. Instructions fall through to
/// the next one, jumps go to their label, and returns (as well as falling off
/// the last instruction) go to the end node.
pub fn build_cfg(
    method: &str,
    instructions: &mut [Instruction],
    labels: &HashMap<String, InstId>,
) -> Result<(), CfgError> {
    let count = instructions.len();
    let target = |label: &String| {
        labels
            .get(label)
            .copied()
            .map(Successor::Instruction)
            .ok_or_else(|| CfgError::UnknownLabel {
                method: method.into(),
                label: label.clone(),
            })
    };

    for (index, inst) in instructions.iter_mut().enumerate() {
        let next = if index + 1 < count {
            Successor::Instruction(InstId(index + 2))
        } else {
            Successor::End
        };

        inst.successors = match &inst.kind {
            InstructionKind::Goto(label) => vec![target(label)?],
            InstructionKind::Branch(branch) => vec![target(&branch.label)?, next],
            InstructionKind::Return(_) => vec![Successor::End],
            _ => vec![next],
        };

        trace!("{method}: {} -> {:?}", inst.id, inst.successors);
    }

    Ok(())
}
