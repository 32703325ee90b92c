use jmm_common::ir::{
    Assign, Call, Category, Element, Instruction as IrInstruction, InstructionKind, Invocation,
    Type,
};

use super::Lowerer;
use crate::jasmin::repr::{Instruction, Invoke, InvokeKind};
use crate::jasmin::EmitError;

const CONSTRUCTOR: &str = "<init>";

/// An object creation directly followed by its constructor call, which are
/// emitted together as `new C; dup; <args>; invokespecial C/<init>`.
#[derive(Clone, Copy, Debug)]
pub struct Construction<'a> {
    assign: &'a Assign,
    new: &'a Call,
    init: &'a Call,
}

impl<'a> Construction<'a> {
    pub fn fuse(inst: &'a IrInstruction, next: &'a IrInstruction) -> Option<Self> {
        let InstructionKind::Assign(assign) = &inst.kind else {
            return None;
        };

        let InstructionKind::Call(new) = assign.rhs.as_ref() else {
            return None;
        };

        let InstructionKind::Call(init) = &next.kind else {
            return None;
        };

        let Element::Operand { name, .. } = &assign.dest else {
            return None;
        };

        let fused = new.invocation == Invocation::New
            && !matches!(new.ret, Type::Array(_))
            && init.invocation == Invocation::Special
            && init.method.as_deref() == Some(CONSTRUCTOR)
            && init.target.name() == Some(name.as_str())
            && next.labels.is_empty();

        fused.then_some(Self { assign, new, init })
    }
}

impl Lowerer<'_> {
    pub(super) fn lower_construction(&mut self, construction: Construction) -> Result<(), EmitError> {
        let store = self.place(&construction.assign.dest)?;
        let class = self.new_class(construction.new)?;

        self.push(Instruction::New(class.clone()));
        self.push(Instruction::Dup);
        self.invoke(InvokeKind::Special, class, CONSTRUCTOR, construction.init)?;
        self.push(store);
        Ok(())
    }

    /// Push the result of a call, if it has one.
    pub(super) fn lower_call(&mut self, call: &Call) -> Result<(), EmitError> {
        match call.invocation {
            Invocation::Virtual => {
                let name = self.method_name(call)?;
                let class = self.target_class(call)?;
                self.load(&call.target)?;
                self.invoke(InvokeKind::Virtual, class, name, call)
            }

            Invocation::Static => {
                let name = self.method_name(call)?;
                let class = self.target_class(call)?;
                self.invoke(InvokeKind::Static, class, name, call)
            }

            Invocation::Special => {
                let name = self.method_name(call)?;
                let class = if self.calls_super(call, name) {
                    self.names.super_class()
                } else {
                    self.target_class(call)?
                };

                self.load(&call.target)?;
                self.invoke(InvokeKind::Special, class, name, call)
            }

            Invocation::New => self.lower_new(call),

            Invocation::ArrayLength => {
                self.load(&call.target)?;
                self.push(Instruction::Arraylength);
                Ok(())
            }
        }
    }

    fn lower_new(&mut self, call: &Call) -> Result<(), EmitError> {
        let Type::Array(elem) = &call.ret else {
            let class = self.new_class(call)?;
            self.push(Instruction::New(class));
            return Ok(());
        };

        let [length] = call.args.as_slice() else {
            let call = InstructionKind::Call(call.clone());
            return Err(EmitError::Unsupported(format!("`{call}` without exactly one length")));
        };

        self.load(length)?;

        let inst = match elem.as_ref() {
            Type::Int32 => Instruction::Newarray("int".into()),
            Type::Boolean => Instruction::Newarray("boolean".into()),
            ty => {
                let class = self
                    .names
                    .class_of(ty)
                    .ok_or_else(|| EmitError::Unsupported(format!("arrays of `{ty}`")))?;
                Instruction::Anewarray(class)
            }
        };

        self.push(inst);
        Ok(())
    }

    /// Push the arguments and call the method.
    fn invoke(
        &mut self,
        kind: InvokeKind,
        class: String,
        method: &str,
        call: &Call,
    ) -> Result<(), EmitError> {
        for arg in call.args.iter() {
            self.load(arg)?;
        }

        let params = call
            .args
            .iter()
            .map(|arg| self.names.descriptor(arg.ty()))
            .collect();
        let ret = self.names.descriptor(&call.ret);

        self.push(Instruction::Invoke(Invoke {
            kind,
            class,
            method: method.into(),
            params,
            ret,
        }));

        Ok(())
    }

    fn method_name<'c>(&self, call: &'c Call) -> Result<&'c str, EmitError> {
        call.method.as_deref().ok_or_else(|| {
            let call = InstructionKind::Call(call.clone());
            EmitError::Unsupported(format!("`{call}` without a method"))
        })
    }

    /// A constructor calling `<init>` on itself is calling the constructor of
    /// its superclass.
    fn calls_super(&self, call: &Call, name: &str) -> bool {
        self.method.is_constructor
            && name == CONSTRUCTOR
            && matches!(call.target.ty(), Type::This)
    }

    fn target_class(&self, call: &Call) -> Result<String, EmitError> {
        self.names
            .class_of(call.target.ty())
            .ok_or_else(|| EmitError::Unsupported(format!("calling methods on `{}`", call.target)))
    }

    fn new_class(&self, call: &Call) -> Result<String, EmitError> {
        match (call.target.ty(), call.ret.category()) {
            (Type::Class(_) | Type::Object(_), Category::Reference) => self.target_class(call),
            _ => Err(EmitError::Unsupported(format!("creating `{}`", call.target))),
        }
    }
}
