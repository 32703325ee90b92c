use std::fmt;

use super::Item;

/// An assembled class, ready to be written out as Jasmin.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Class {
    pub name: String,
    pub access: String,
    pub is_final: bool,
    pub super_class: String,
    pub fields: Vec<FieldDecl>,
    pub methods: Vec<MethodCode>,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FieldDecl {
    pub access: String,
    pub is_static: bool,
    pub is_final: bool,
    pub name: String,
    pub descriptor: String,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MethodCode {
    pub access: String,
    pub is_static: bool,
    pub is_final: bool,
    pub name: String,
    pub descriptor: String,
    pub max_stack: usize,
    pub max_locals: usize,
    pub body: Vec<Item>,
}

fn flags(f: &mut fmt::Formatter<'_>, access: &str, is_static: bool, is_final: bool) -> fmt::Result {
    write!(f, "{access}")?;
    if is_static {
        write!(f, " static")?;
    }
    if is_final {
        write!(f, " final")?;
    }
    Ok(())
}

impl fmt::Display for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ".class ")?;
        flags(f, &self.access, false, self.is_final)?;
        writeln!(f, " {}", self.name)?;
        writeln!(f, ".super {}", self.super_class)?;

        if !self.fields.is_empty() {
            writeln!(f)?;
        }

        for field in self.fields.iter() {
            write!(f, ".field ")?;
            flags(f, &field.access, field.is_static, field.is_final)?;
            writeln!(f, " {} {}", field.name, field.descriptor)?;
        }

        for method in self.methods.iter() {
            writeln!(f)?;
            write!(f, "{method}")?;
        }

        Ok(())
    }
}

impl fmt::Display for MethodCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ".method ")?;
        flags(f, &self.access, self.is_static, self.is_final)?;
        writeln!(f, " {}{}", self.name, self.descriptor)?;
        writeln!(f, "\t.limit stack {}", self.max_stack)?;
        writeln!(f, "\t.limit locals {}", self.max_locals)?;

        for item in self.body.iter() {
            writeln!(f, "{item}")?;
        }

        writeln!(f, ".end method")
    }
}
