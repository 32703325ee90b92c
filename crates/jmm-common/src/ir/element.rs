use std::fmt;

use super::Type;

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Literal {
    Int(i32),
    Bool(bool),
}

/// An operand of an instruction.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Element {
    Literal {
        value: Literal,
        ty: Type,
    },

    /// A variable, `this`, or (with a [`Type::Class`] type) a bare class name.
    Operand {
        name: String,
        ty: Type,
    },

    /// An element of the array variable `name`. `ty` is the element type.
    Array {
        name: String,
        index: Box<Element>,
        ty: Type,
    },
}

impl Element {
    pub fn int(value: i32) -> Self {
        Self::Literal {
            value: Literal::Int(value),
            ty: Type::Int32,
        }
    }

    pub fn boolean(value: bool) -> Self {
        Self::Literal {
            value: Literal::Bool(value),
            ty: Type::Boolean,
        }
    }

    pub fn operand(name: impl Into<String>, ty: Type) -> Self {
        Self::Operand {
            name: name.into(),
            ty,
        }
    }

    pub fn array(name: impl Into<String>, index: Element, ty: Type) -> Self {
        Self::Array {
            name: name.into(),
            index: Box::new(index),
            ty,
        }
    }

    pub fn this() -> Self {
        Self::operand("this", Type::This)
    }

    pub fn class(name: impl Into<String>) -> Self {
        let name = name.into();
        Self::Operand {
            ty: Type::Class(name.clone()),
            name,
        }
    }

    pub fn ty(&self) -> &Type {
        match self {
            Self::Literal { ty, .. } | Self::Operand { ty, .. } | Self::Array { ty, .. } => ty,
        }
    }

    /// The name of the variable this element refers to, if any.
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Literal { .. } => None,
            Self::Operand { ty: Type::Class(_), .. } => None,
            Self::Operand { name, .. } | Self::Array { name, .. } => Some(name),
        }
    }

    pub fn int_literal(&self) -> Option<i32> {
        match self {
            Self::Literal {
                value: Literal::Int(value),
                ty: Type::Int32,
            } => Some(*value),
            _ => None,
        }
    }

    pub fn is_zero(&self) -> bool {
        matches!(
            self,
            Self::Literal {
                value: Literal::Int(0) | Literal::Bool(false),
                ..
            }
        )
    }

    /// Every variable whose value is read when this element is evaluated: the
    /// variable itself, or an array and the variables of its index.
    pub fn reads(&self) -> Vec<&str> {
        match self {
            Self::Literal { .. } => Vec::new(),
            Self::Operand { ty: Type::Class(_), .. } => Vec::new(),
            Self::Operand { name, .. } => vec![name],
            Self::Array { name, index, .. } => {
                let mut reads = vec![name.as_str()];
                reads.extend(index.reads());
                reads
            }
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal {
                value: Literal::Int(value),
                ty,
            } => write!(f, "{value}.{ty}"),
            Self::Literal {
                value: Literal::Bool(value),
                ty,
            } => write!(f, "{value}.{ty}"),
            Self::Operand { name, ty: Type::Class(_) | Type::This } => write!(f, "{name}"),
            Self::Operand { name, ty } => write!(f, "{name}.{ty}"),
            Self::Array { name, index, ty } => write!(f, "{name}[{index}].{ty}"),
        }
    }
}
