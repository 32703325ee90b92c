use std::collections::HashMap;

use super::repr::Item;
use super::EmitError;

/// Tracks the operand stack depth through a method body.
///
/// Code that follows a `goto` or a return is only reachable through a label,
/// so the depth there is whatever it was at the jumps to that label. Labels
/// that are only jumped to from further down restart at zero.
#[derive(Debug, Default)]
pub struct Frame {
    depth: usize,
    max: usize,
    reachable: bool,
    labels: HashMap<String, usize>,
}

impl Frame {
    pub fn new() -> Self {
        Self {
            reachable: true,
            ..Default::default()
        }
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn max(&self) -> usize {
        self.max
    }

    pub fn apply(&mut self, item: &Item) -> Result<(), EmitError> {
        match item {
            Item::Label(label) => {
                if self.reachable {
                    self.labels.entry(label.clone()).or_insert(self.depth);
                } else {
                    self.depth = self.labels.get(label).copied().unwrap_or(0);
                    self.reachable = true;
                }
            }

            Item::Inst(inst) => {
                if !self.reachable {
                    self.depth = 0;
                    self.reachable = true;
                }

                let (pops, pushes) = inst.stack_effect();
                self.depth = self
                    .depth
                    .checked_sub(pops)
                    .ok_or_else(|| EmitError::StackUnderflow(inst.to_string()))?;
                self.depth += pushes;
                self.max = self.max.max(self.depth);

                if let Some(label) = inst.jump_target() {
                    self.labels.entry(label.into()).or_insert(self.depth);
                }

                if inst.is_terminator() {
                    self.reachable = false;
                }
            }
        }

        Ok(())
    }
}

/// The greatest stack depth reached anywhere in the given body.
pub fn max_stack(body: &[Item]) -> Result<usize, EmitError> {
    let mut frame = Frame::new();
    for item in body {
        frame.apply(item)?;
    }

    Ok(frame.max())
}
