//! The intermediate representation handed to the backend: one class with its
//! fields and methods, where every method body is a flat list of instructions
//! over typed elements, linked into a control flow graph.

pub use cfg::{build_cfg, label_table, CfgError};
pub use element::{Element, Literal};
pub use instruction::{
    Assign, BinaryOp, Branch, Call, Condition, GetField, InstId, Instruction, InstructionKind,
    Invocation, Operation, PutField, Return, Successor, UnaryOp,
};
pub use method::{Descriptor, Method, MethodBuilder, Parameter, VarScope, VarTable};
pub use types::{Category, Type};

mod cfg;
mod element;
mod instruction;
mod method;
mod types;

#[cfg(test)]
mod tests;

use std::fmt;

#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum AccessModifier {
    Public,
    Private,
    Protected,
    #[default]
    Default,
}

impl fmt::Display for AccessModifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Public => write!(f, "public"),
            Self::Private => write!(f, "private"),
            Self::Protected => write!(f, "protected"),
            Self::Default => Ok(()),
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Field {
    pub name: String,
    pub ty: Type,
    pub access: AccessModifier,
    pub is_static: bool,
    pub is_final: bool,
}

#[derive(Clone, Debug)]
pub struct ClassUnit {
    pub name: String,

    /// The unqualified name of the superclass, if it has one besides the
    /// root object class.
    pub super_class: Option<String>,
    pub access: AccessModifier,
    pub is_final: bool,

    /// Dotted import paths, like `java.util.List`.
    pub imports: Vec<String>,
    pub fields: Vec<Field>,
    pub methods: Vec<Method>,
}

impl ClassUnit {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            super_class: None,
            access: AccessModifier::Public,
            is_final: false,
            imports: Vec::new(),
            fields: Vec::new(),
            methods: Vec::new(),
        }
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.name == name)
    }

    pub fn method(&self, name: &str) -> Option<&Method> {
        self.methods.iter().find(|method| method.name == name)
    }
}
