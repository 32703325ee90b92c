pub use instruction::{Comparison, Instruction, Invoke, InvokeKind, Item};
pub use program::{Class, FieldDecl, MethodCode};

mod instruction;
mod program;
