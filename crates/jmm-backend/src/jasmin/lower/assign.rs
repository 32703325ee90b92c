use jmm_common::ir::{Assign, Category, Element, GetField, InstructionKind, Operation, PutField, Type};

use super::Lowerer;
use crate::jasmin::repr::Instruction;
use crate::jasmin::EmitError;

fn field_name(field: &Element) -> Result<String, EmitError> {
    match field {
        Element::Operand { name, .. } => Ok(name.clone()),
        other => Err(EmitError::Unsupported(format!("`{other}` as a field"))),
    }
}

impl Lowerer<'_> {
    pub(super) fn lower_assign(&mut self, assign: &Assign) -> Result<(), EmitError> {
        if let Some((register, by)) = self.increment(&assign.dest, &assign.rhs) {
            self.push(Instruction::Iinc(register, by));
            return Ok(());
        }

        let store = self.place(&assign.dest)?;
        self.lower_value(&assign.rhs)?;
        self.push(store);
        Ok(())
    }

    /// Push whatever has to be below the value stored into `dest`, and return
    /// the instruction which does the storing.
    pub(super) fn place(&mut self, dest: &Element) -> Result<Instruction, EmitError> {
        match dest {
            Element::Literal { .. } | Element::Operand { ty: Type::Class(_), .. } => {
                Err(EmitError::Unsupported(format!("assigning to `{dest}`")))
            }

            Element::Operand { name, ty } => {
                if let Some(register) = self.method.register(name) {
                    return match ty.category() {
                        Category::Integer => Ok(Instruction::Istore(register)),
                        Category::Reference => Ok(Instruction::Astore(register)),
                        Category::Void => Err(EmitError::Unsupported(format!("assigning to `{dest}`"))),
                    };
                }

                let field = self.implicit_field(name)?;
                let class = self.names.this_class().to_string();
                let descriptor = self.names.descriptor(&field.ty);

                if field.is_static {
                    Ok(Instruction::Putstatic(class, field.name.clone(), descriptor))
                } else {
                    self.push(Instruction::Aload(0));
                    Ok(Instruction::Putfield(class, field.name.clone(), descriptor))
                }
            }

            Element::Array { name, index, ty } => {
                self.load_variable(name, &Type::array_of(ty.clone()))?;
                self.load(index)?;

                match ty.category() {
                    Category::Integer => Ok(Instruction::Iastore),
                    Category::Reference => Ok(Instruction::Aastore),
                    Category::Void => Err(EmitError::Unsupported(format!("assigning to `{dest}`"))),
                }
            }
        }
    }

    /// `x := x + c`, `x := c + x` and `x := x - c` where the increment fits in
    /// a byte become a single `iinc`. Variables sharing a register count as
    /// the same variable.
    fn increment(&self, dest: &Element, rhs: &InstructionKind) -> Option<(usize, i32)> {
        let Element::Operand { name, ty: Type::Int32 } = dest else {
            return None;
        };

        let register = self.method.register(name)?;
        let InstructionKind::BinaryOp(binary) = rhs else {
            return None;
        };

        let same = |element: &Element| match element {
            Element::Operand { name, ty: Type::Int32 } => self.method.register(name) == Some(register),
            _ => false,
        };

        let by = match binary.op {
            Operation::Add if same(&binary.left) => binary.right.int_literal()?,
            Operation::Add if same(&binary.right) => binary.left.int_literal()?,
            Operation::Sub if same(&binary.left) => binary.right.int_literal()?.checked_neg()?,
            _ => return None,
        };

        (-128..=127).contains(&by).then_some((register, by))
    }

    pub(super) fn lower_put_field(&mut self, put: &PutField) -> Result<(), EmitError> {
        let name = field_name(&put.field)?;
        let descriptor = self.names.descriptor(put.field.ty());

        if let Type::Class(class) = put.object.ty() {
            let class = self.names.resolve(class);
            self.load(&put.value)?;
            self.push(Instruction::Putstatic(class, name, descriptor));
            return Ok(());
        }

        let class = self
            .names
            .class_of(put.object.ty())
            .ok_or_else(|| EmitError::Unsupported(format!("fields of `{}`", put.object)))?;

        self.load(&put.object)?;
        self.load(&put.value)?;
        self.push(Instruction::Putfield(class, name, descriptor));
        Ok(())
    }

    pub(super) fn lower_get_field(&mut self, get: &GetField) -> Result<(), EmitError> {
        let name = field_name(&get.field)?;
        let descriptor = self.names.descriptor(&get.ty);

        if let Type::Class(class) = get.object.ty() {
            let class = self.names.resolve(class);
            self.push(Instruction::Getstatic(class, name, descriptor));
            return Ok(());
        }

        let class = self
            .names
            .class_of(get.object.ty())
            .ok_or_else(|| EmitError::Unsupported(format!("fields of `{}`", get.object)))?;

        self.load(&get.object)?;
        self.push(Instruction::Getfield(class, name, descriptor));
        Ok(())
    }
}
