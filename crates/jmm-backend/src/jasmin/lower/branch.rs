use std::collections::HashSet;

use jmm_common::ir::{BinaryOp, Branch, Category, Condition, InstructionKind, Operation, Return};

use super::Lowerer;
use crate::jasmin::repr::{Comparison, Instruction, Item};
use crate::jasmin::EmitError;

fn comparison(op: Operation) -> Option<Comparison> {
    match op {
        Operation::Lt => Some(Comparison::Lt),
        Operation::Gt => Some(Comparison::Gt),
        Operation::Le => Some(Comparison::Le),
        Operation::Ge => Some(Comparison::Ge),
        Operation::Eq => Some(Comparison::Eq),
        Operation::Ne => Some(Comparison::Ne),
        _ => None,
    }
}

impl Lowerer<'_> {
    /// Follow a label through any chain of unconditional jumps, stopping
    /// before a jump is visited twice.
    pub(super) fn follow(&self, label: &str) -> Result<String, EmitError> {
        let mut label = label.to_string();
        let mut seen = HashSet::from([label.clone()]);

        loop {
            let id = self
                .method
                .label(&label)
                .ok_or_else(|| EmitError::UnknownLabel(label.clone()))?;

            match &self.method.instruction(id).kind {
                InstructionKind::Goto(next) if seen.insert(next.clone()) => label = next.clone(),
                _ => return Ok(label),
            }
        }
    }

    pub(super) fn lower_branch(&mut self, branch: &Branch) -> Result<(), EmitError> {
        let target = self.follow(&branch.label)?;

        match &branch.condition {
            Condition::Single(element) => {
                self.load(element)?;
                self.push(Instruction::If(Comparison::Ne, target));
            }

            Condition::Unary(unary) if unary.op == Operation::Not => {
                self.load(&unary.operand)?;
                self.push(Instruction::If(Comparison::Eq, target));
            }

            Condition::Unary(unary) => {
                return Err(EmitError::Unsupported(format!("the condition `{unary}`")))
            }

            Condition::Binary(binary) if binary.op.is_comparison() => {
                self.compare_jump(binary, target)?;
            }

            Condition::Binary(binary) => {
                self.lower_value(&InstructionKind::BinaryOp(binary.clone()))?;
                self.push(Instruction::If(Comparison::Ne, target));
            }
        }

        Ok(())
    }

    /// Jump to `target` if the comparison holds. Comparisons against zero use
    /// the single operand forms, swapping the comparison when the zero is on
    /// the left.
    fn compare_jump(&mut self, binary: &BinaryOp, target: String) -> Result<(), EmitError> {
        let unsupported = || EmitError::Unsupported(format!("the comparison `{binary}`"));
        let cmp = comparison(binary.op).ok_or_else(unsupported)?;

        if binary.right.is_zero() {
            self.load(&binary.left)?;
            self.push(Instruction::If(cmp, target));
        } else if binary.left.is_zero() {
            let cmp = comparison(binary.op.mirror()).ok_or_else(unsupported)?;
            self.load(&binary.right)?;
            self.push(Instruction::If(cmp, target));
        } else {
            self.load(&binary.left)?;
            self.load(&binary.right)?;
            self.push(Instruction::IfIcmp(cmp, target));
        }

        Ok(())
    }

    /// Push 1 if the comparison holds and 0 otherwise.
    pub(super) fn lower_comparison(&mut self, binary: &BinaryOp) -> Result<(), EmitError> {
        let n = *self.comparisons;
        *self.comparisons += 1;

        let holds = format!("cmp{n}_true");
        let end = format!("cmp{n}_end");

        self.compare_jump(binary, holds.clone())?;
        self.push(Instruction::Iconst(0));
        self.push(Instruction::Goto(end.clone()));
        self.body.push(Item::Label(holds));
        self.push(Instruction::Iconst(1));
        self.body.push(Item::Label(end));
        Ok(())
    }

    pub(super) fn lower_return(&mut self, ret: &Return) -> Result<(), EmitError> {
        let inst = match (&ret.value, ret.ty.category()) {
            (None, Category::Void) => Instruction::Return,
            (None, _) => return Err(EmitError::MissingReturn),
            (Some(value), Category::Void) => {
                return Err(EmitError::Unsupported(format!("returning `{value}` from a void method")))
            }

            (Some(value), category) => {
                self.load(value)?;
                match category {
                    Category::Integer => Instruction::Ireturn,
                    _ => Instruction::Areturn,
                }
            }
        };

        self.push(inst);
        Ok(())
    }
}
