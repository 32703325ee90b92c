use std::collections::{BTreeMap, HashMap};

use super::cfg::{build_cfg, label_table, CfgError};
use super::{AccessModifier, Element, InstId, Instruction, InstructionKind, Type};

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum VarScope {
    This,
    Parameter,
    Local,
}

/// The storage assigned to a variable.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Descriptor {
    pub register: usize,
    pub ty: Type,
    pub scope: VarScope,
}

pub type VarTable = BTreeMap<String, Descriptor>;

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Parameter {
    pub name: String,
    pub ty: Type,
}

#[derive(Clone, Debug)]
pub struct Method {
    pub name: String,
    pub access: AccessModifier,
    pub is_static: bool,
    pub is_final: bool,
    pub is_constructor: bool,
    pub params: Vec<Parameter>,
    pub ret: Type,
    pub vars: VarTable,
    pub instructions: Vec<Instruction>,
    pub labels: HashMap<String, InstId>,
}

impl Method {
    /// Get the instruction with the given id. Panics if the id does not belong
    /// to this method.
    pub fn instruction(&self, id: InstId) -> &Instruction {
        self.instructions
            .get(id.index())
            .unwrap_or_else(|| panic!("instruction {id} does not exist in `{}`", self.name))
    }

    pub fn descriptor(&self, name: &str) -> Option<&Descriptor> {
        self.vars.get(name)
    }

    pub fn register(&self, name: &str) -> Option<usize> {
        self.vars.get(name).map(|desc| desc.register)
    }

    pub fn label(&self, label: &str) -> Option<InstId> {
        self.labels.get(label).copied()
    }

    /// Recompute the label table and the successors of every instruction.
    pub fn rebuild_cfg(&mut self) -> Result<(), CfgError> {
        self.labels = label_table(&self.name, &self.instructions)?;
        build_cfg(&self.name, &mut self.instructions, &self.labels)
    }
}

/// Incrementally construct a method body, numbering its instructions and
/// deriving its variable table and control flow graph once done.
#[derive(Debug)]
pub struct MethodBuilder {
    name: String,
    access: AccessModifier,
    is_static: bool,
    is_final: bool,
    is_constructor: bool,
    params: Vec<Parameter>,
    ret: Type,

    pending: Vec<String>,
    body: Vec<(Vec<String>, InstructionKind)>,
}

impl MethodBuilder {
    pub fn new(name: impl Into<String>, ret: Type) -> Self {
        Self {
            name: name.into(),
            access: AccessModifier::Public,
            is_static: false,
            is_final: false,
            is_constructor: false,
            params: Vec::new(),
            ret,
            pending: Vec::new(),
            body: Vec::new(),
        }
    }

    pub fn constructor() -> Self {
        let mut builder = Self::new("<init>", Type::Void);
        builder.is_constructor = true;
        builder
    }

    pub fn access(&mut self, access: AccessModifier) -> &mut Self {
        self.access = access;
        self
    }

    pub fn is_static(&mut self, is_static: bool) -> &mut Self {
        self.is_static = is_static;
        self
    }

    pub fn is_final(&mut self, is_final: bool) -> &mut Self {
        self.is_final = is_final;
        self
    }

    pub fn returns(&mut self, ret: Type) -> &mut Self {
        self.ret = ret;
        self
    }

    pub fn param(&mut self, name: impl Into<String>, ty: Type) -> &mut Self {
        self.params.push(Parameter {
            name: name.into(),
            ty,
        });
        self
    }

    /// Attach a label to the next instruction pushed.
    pub fn label(&mut self, label: impl Into<String>) -> &mut Self {
        self.pending.push(label.into());
        self
    }

    pub fn push(&mut self, kind: InstructionKind) -> InstId {
        let labels = std::mem::take(&mut self.pending);
        self.body.push((labels, kind));
        InstId(self.body.len())
    }

    pub fn build(self) -> Result<Method, CfgError> {
        if let Some(label) = self.pending.first() {
            return Err(CfgError::DanglingLabel {
                method: self.name,
                label: label.clone(),
            });
        }

        let instructions: Vec<_> = self
            .body
            .into_iter()
            .enumerate()
            .map(|(index, (labels, kind))| Instruction {
                id: InstId(index + 1),
                labels,
                successors: Vec::new(),
                kind,
            })
            .collect();

        let vars = make_var_table(self.is_static, &self.params, &instructions);

        let mut method = Method {
            name: self.name,
            access: self.access,
            is_static: self.is_static,
            is_final: self.is_final,
            is_constructor: self.is_constructor,
            params: self.params,
            ret: self.ret,
            vars,
            instructions,
            labels: HashMap::new(),
        };

        method.rebuild_cfg()?;
        Ok(method)
    }
}

/// `this` gets register 0 in instance methods, the parameters follow in order,
/// and then every other variable in order of first appearance.
fn make_var_table(is_static: bool, params: &[Parameter], body: &[Instruction]) -> VarTable {
    let mut table = Table {
        vars: VarTable::new(),
        next: 0,
    };

    if !is_static {
        table.declare("this", Type::This, VarScope::This);
    }

    for param in params {
        table.declare(&param.name, param.ty.clone(), VarScope::Parameter);
    }

    for inst in body {
        if let InstructionKind::Assign(assign) = &inst.kind {
            table.declare_element(&assign.dest);
        }

        for element in inst.kind.operands() {
            table.declare_element(element);
        }
    }

    table.vars
}

struct Table {
    vars: VarTable,
    next: usize,
}

impl Table {
    fn declare(&mut self, name: &str, ty: Type, scope: VarScope) {
        if self.vars.contains_key(name) {
            return;
        }

        let register = self.next;
        self.next += 1;
        self.vars.insert(
            name.into(),
            Descriptor {
                register,
                ty,
                scope,
            },
        );
    }

    fn declare_element(&mut self, element: &Element) {
        match element {
            Element::Literal { .. } => {}
            Element::Operand { ty, .. } if ty.is_class() => {}
            Element::Operand { name, ty } => self.declare(name, ty.clone(), VarScope::Local),
            Element::Array { name, index, ty } => {
                self.declare(name, Type::array_of(ty.clone()), VarScope::Local);
                self.declare_element(index);
            }
        }
    }
}
