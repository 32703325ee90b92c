mod assign;
mod branch;
mod call;
mod value;

use std::collections::BTreeSet;

use jmm_common::ir::{ClassUnit, InstructionKind, Method};
use log::debug;

use super::frame;
use super::names::Names;
use super::repr::{self as jvm, Instruction, Item};
use super::{ClassEmitError, EmitError};

/// Lower every method of the class. All of them are attempted, and the
/// failures are collected together.
pub fn lower(class: &ClassUnit) -> Result<jvm::Class, ClassEmitError> {
    let names = Names::new(class);
    let mut comparisons = 0;

    let mut methods = Vec::new();
    let mut failures = Vec::new();

    for method in class.methods.iter() {
        debug!("lowering `{}.{}`", class.name, method.name);

        let mut lowerer = Lowerer::new(names, class, method, &mut comparisons);
        match lowerer.lower_method() {
            Ok(code) => methods.push(code),
            Err(err) => failures.push((method.name.clone(), err)),
        }
    }

    if !failures.is_empty() {
        return Err(ClassEmitError {
            class: class.name.clone(),
            failures,
        });
    }

    let fields = class
        .fields
        .iter()
        .map(|field| jvm::FieldDecl {
            access: names.access(field.access),
            is_static: field.is_static,
            is_final: field.is_final,
            name: field.name.clone(),
            descriptor: names.descriptor(&field.ty),
        })
        .collect();

    Ok(jvm::Class {
        name: class.name.clone(),
        access: names.access(class.access),
        is_final: class.is_final,
        super_class: names.super_class(),
        fields,
        methods,
    })
}

/// The number of local slots a method needs: every register in its variable
/// table, and slot 0 for `this` in instance methods.
fn max_locals(method: &Method) -> usize {
    let mut registers: BTreeSet<_> = method.vars.values().map(|desc| desc.register).collect();
    if !method.is_static {
        registers.insert(0);
    }

    let highest = registers.last().map_or(0, |register| register + 1);
    registers.len().max(highest)
}

#[derive(Debug)]
struct Lowerer<'a> {
    names: Names<'a>,
    class: &'a ClassUnit,
    method: &'a Method,
    body: Vec<Item>,

    /// Counts the comparisons materialized as values in the whole class, so
    /// that their labels stay unique.
    comparisons: &'a mut usize,
}

impl<'a> Lowerer<'a> {
    pub fn new(
        names: Names<'a>,
        class: &'a ClassUnit,
        method: &'a Method,
        comparisons: &'a mut usize,
    ) -> Self {
        Self {
            names,
            class,
            method,
            body: Vec::new(),
            comparisons,
        }
    }

    pub fn lower_method(&mut self) -> Result<jvm::MethodCode, EmitError> {
        self.lower_body()?;

        let body = std::mem::take(&mut self.body);
        let max_stack = frame::max_stack(&body)?;

        Ok(jvm::MethodCode {
            access: self.names.access(self.method.access),
            is_static: self.method.is_static,
            is_final: self.method.is_final,
            name: self.method.name.clone(),
            descriptor: self.names.method_descriptor(self.method),
            max_stack,
            max_locals: max_locals(self.method),
            body,
        })
    }

    fn lower_body(&mut self) -> Result<(), EmitError> {
        let method = self.method;
        let mut insts = method.instructions.iter().peekable();

        while let Some(inst) = insts.next() {
            for label in inst.labels.iter() {
                self.body.push(Item::Label(label.clone()));
            }

            if let Some(construction) = insts
                .peek()
                .copied()
                .and_then(|next| call::Construction::fuse(inst, next))
            {
                self.lower_construction(construction)?;
                insts.next();
                continue;
            }

            self.lower_instruction(&inst.kind)?;
        }

        if self.falls_through() {
            if !method.ret.is_void() {
                return Err(EmitError::MissingReturn);
            }

            self.push(Instruction::Return);
        }

        Ok(())
    }

    fn lower_instruction(&mut self, kind: &InstructionKind) -> Result<(), EmitError> {
        match kind {
            InstructionKind::Assign(assign) => self.lower_assign(assign),
            InstructionKind::Call(call) => {
                self.lower_call(call)?;
                if !call.ret.is_void() {
                    self.push(Instruction::Pop);
                }
                Ok(())
            }

            InstructionKind::Goto(label) => {
                let target = self.follow(label)?;
                self.push(Instruction::Goto(target));
                Ok(())
            }

            InstructionKind::Branch(branch) => self.lower_branch(branch),
            InstructionKind::Return(ret) => self.lower_return(ret),
            InstructionKind::PutField(put) => self.lower_put_field(put),

            InstructionKind::GetField(_)
            | InstructionKind::UnaryOp(_)
            | InstructionKind::BinaryOp(_)
            | InstructionKind::NoOp(_) => {
                self.lower_value(kind)?;
                self.push(Instruction::Pop);
                Ok(())
            }
        }
    }

    fn falls_through(&self) -> bool {
        !matches!(self.body.last(), Some(Item::Inst(inst)) if inst.is_terminator())
    }

    fn push(&mut self, inst: Instruction) {
        self.body.push(Item::Inst(inst));
    }
}
