use jmm_common::ir::{Category, Element, Field, InstructionKind, Literal, Operation, Type};

use super::Lowerer;
use crate::jasmin::repr::Instruction;
use crate::jasmin::EmitError;

/// The shortest instruction that pushes the given integer.
pub fn int_constant(value: i32) -> Instruction {
    match value {
        -1..=5 => Instruction::Iconst(value),
        -128..=127 => Instruction::Bipush(value),
        -32768..=32767 => Instruction::Sipush(value),
        _ => Instruction::Ldc(value),
    }
}

fn literal_value(value: &Literal, ty: &Type) -> Result<i32, EmitError> {
    match (value, ty) {
        (Literal::Int(value), Type::Int32) => Ok(*value),
        (Literal::Int(value @ (0 | 1)), Type::Boolean) => Ok(*value),
        (Literal::Bool(value), Type::Boolean) => Ok(i32::from(*value)),
        (value, ty) => {
            let literal = match value {
                Literal::Int(value) => value.to_string(),
                Literal::Bool(value) => value.to_string(),
            };

            Err(EmitError::LiteralType {
                literal,
                ty: ty.to_string(),
            })
        }
    }
}

impl<'a> Lowerer<'a> {
    /// Push the value of an element.
    pub(super) fn load(&mut self, element: &Element) -> Result<(), EmitError> {
        match element {
            Element::Literal { value, ty } => {
                let value = literal_value(value, ty)?;
                self.push(int_constant(value));
                Ok(())
            }

            Element::Operand { name, ty: Type::Class(_) } => {
                Err(EmitError::NotAValue(name.clone()))
            }

            Element::Operand { name, ty } => self.load_variable(name, ty),

            Element::Array { name, index, ty } => {
                self.load_variable(name, &Type::array_of(ty.clone()))?;
                self.load(index)?;

                let inst = match ty.category() {
                    Category::Integer => Instruction::Iaload,
                    Category::Reference => Instruction::Aaload,
                    Category::Void => return Err(EmitError::Unsupported(element.to_string())),
                };

                self.push(inst);
                Ok(())
            }
        }
    }

    /// Push the value of a variable, or of a field of the class with the same
    /// name when there is no such variable.
    pub(super) fn load_variable(&mut self, name: &str, ty: &Type) -> Result<(), EmitError> {
        if let Some(register) = self.method.register(name) {
            let inst = match ty.category() {
                Category::Integer => Instruction::Iload(register),
                Category::Reference => Instruction::Aload(register),
                Category::Void => return Err(EmitError::NotAValue(name.into())),
            };

            self.push(inst);
            return Ok(());
        }

        let field = self.implicit_field(name)?;
        let class = self.names.this_class().to_string();
        let descriptor = self.names.descriptor(&field.ty);

        if field.is_static {
            self.push(Instruction::Getstatic(class, field.name.clone(), descriptor));
        } else {
            self.push(Instruction::Aload(0));
            self.push(Instruction::Getfield(class, field.name.clone(), descriptor));
        }

        Ok(())
    }

    /// A field of the class that is accessed by its bare name. Instance fields
    /// can only be reached like that from instance methods.
    pub(super) fn implicit_field(&self, name: &str) -> Result<&'a Field, EmitError> {
        let class = self.class;
        let in_instance = !self.method.is_static;

        class
            .field(name)
            .filter(|field| field.is_static || in_instance)
            .ok_or_else(|| EmitError::Unresolved(name.into()))
    }

    /// Push the value of a right-hand side.
    pub(super) fn lower_value(&mut self, kind: &InstructionKind) -> Result<(), EmitError> {
        match kind {
            InstructionKind::NoOp(element) => self.load(element),
            InstructionKind::Call(call) => self.lower_call(call),
            InstructionKind::GetField(get) => self.lower_get_field(get),

            InstructionKind::UnaryOp(unary) => match unary.op {
                Operation::Not => {
                    self.load(&unary.operand)?;
                    self.push(Instruction::Iconst(1));
                    self.push(Instruction::Ixor);
                    Ok(())
                }

                _ => Err(EmitError::Unsupported(kind.to_string())),
            },

            InstructionKind::BinaryOp(binary) if binary.op.is_comparison() => {
                self.lower_comparison(binary)
            }

            InstructionKind::BinaryOp(binary) => {
                let inst = match binary.op {
                    Operation::Add => Instruction::Iadd,
                    Operation::Sub => Instruction::Isub,
                    Operation::Mul => Instruction::Imul,
                    Operation::Div => Instruction::Idiv,
                    Operation::And => Instruction::Iand,
                    Operation::Or => Instruction::Ior,
                    _ => return Err(EmitError::Unsupported(kind.to_string())),
                };

                self.load(&binary.left)?;
                self.load(&binary.right)?;
                self.push(inst);
                Ok(())
            }

            InstructionKind::Assign(_)
            | InstructionKind::Goto(_)
            | InstructionKind::Branch(_)
            | InstructionKind::Return(_)
            | InstructionKind::PutField(_) => Err(EmitError::NotAValue(kind.to_string())),
        }
    }
}
