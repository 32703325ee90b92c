use std::fmt;

use super::{Element, Type};

/// The id of an instruction within its method. Ids are 1-based and dense, so
/// `id.index()` can be used to index per-instruction tables.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct InstId(pub usize);

impl InstId {
    pub fn index(&self) -> usize {
        self.0 - 1
    }
}

impl fmt::Display for InstId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Successor {
    Instruction(InstId),

    /// The end node of the method body.
    End,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Instruction {
    pub id: InstId,
    pub labels: Vec<String>,
    pub successors: Vec<Successor>,
    pub kind: InstructionKind,
}

#[derive(Clone, Debug, PartialEq)]
pub enum InstructionKind {
    Assign(Assign),
    Call(Call),
    Goto(String),
    Branch(Branch),
    Return(Return),
    PutField(PutField),
    GetField(GetField),
    UnaryOp(UnaryOp),
    BinaryOp(BinaryOp),

    /// A lone element, e.g. the right-hand side of a copy.
    NoOp(Element),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Assign {
    pub dest: Element,
    pub ty: Type,
    pub rhs: Box<InstructionKind>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Call {
    pub invocation: Invocation,

    /// The receiver of the call, or the class for static calls and `new`.
    pub target: Element,
    pub method: Option<String>,
    pub args: Vec<Element>,
    pub ret: Type,
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Invocation {
    Virtual,
    Static,
    Special,
    New,
    ArrayLength,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Branch {
    pub condition: Condition,
    pub label: String,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Condition {
    Single(Element),
    Unary(UnaryOp),
    Binary(BinaryOp),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Return {
    pub value: Option<Element>,
    pub ty: Type,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PutField {
    pub object: Element,
    pub field: Element,
    pub value: Element,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GetField {
    pub object: Element,
    pub field: Element,
    pub ty: Type,
}

#[derive(Clone, Debug, PartialEq)]
pub struct UnaryOp {
    pub op: Operation,
    pub operand: Element,
}

#[derive(Clone, Debug, PartialEq)]
pub struct BinaryOp {
    pub op: Operation,
    pub left: Element,
    pub right: Element,
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Operation {
    Add,
    Sub,
    Mul,
    Div,
    And,
    Or,
    Not,
    Lt,
    Gt,
    Le,
    Ge,
    Eq,
    Ne,
}

impl Operation {
    pub fn is_comparison(&self) -> bool {
        matches!(
            self,
            Self::Lt | Self::Gt | Self::Le | Self::Ge | Self::Eq | Self::Ne
        )
    }

    pub fn is_arithmetic(&self) -> bool {
        matches!(self, Self::Add | Self::Sub | Self::Mul | Self::Div)
    }

    /// The comparison that holds exactly when the operands are swapped, so
    /// that `a op b` is `b op.mirror() a`.
    pub fn mirror(&self) -> Self {
        match self {
            Self::Lt => Self::Gt,
            Self::Gt => Self::Lt,
            Self::Le => Self::Ge,
            Self::Ge => Self::Le,
            other => *other,
        }
    }

    pub fn result_type(&self) -> Type {
        if self.is_arithmetic() {
            Type::Int32
        } else {
            Type::Boolean
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::And => "&&",
            Self::Or => "||",
            Self::Not => "!",
            Self::Lt => "<",
            Self::Gt => ">",
            Self::Le => "<=",
            Self::Ge => ">=",
            Self::Eq => "==",
            Self::Ne => "!=",
        }
    }
}

impl InstructionKind {
    /// The type of the value this instruction produces when used as a
    /// right-hand side.
    pub fn ty(&self) -> Type {
        match self {
            Self::Assign(assign) => assign.ty.clone(),
            Self::Call(call) => call.ret.clone(),
            Self::GetField(get) => get.ty.clone(),
            Self::UnaryOp(unary) => unary.op.result_type(),
            Self::BinaryOp(binary) => binary.op.result_type(),
            Self::NoOp(element) => element.ty().clone(),
            Self::Goto(_) | Self::Branch(_) | Self::Return(_) | Self::PutField(_) => Type::Void,
        }
    }

    /// Every element this instruction reads, in evaluation order. Field names
    /// are not included, since they do not name variables.
    pub fn operands(&self) -> Vec<&Element> {
        match self {
            Self::Assign(assign) => {
                let mut operands = Vec::new();
                // Storing into an array slot reads the array and its index.
                if let Element::Array { .. } = &assign.dest {
                    operands.push(&assign.dest);
                }
                operands.extend(assign.rhs.operands());
                operands
            }

            Self::Call(call) => std::iter::once(&call.target)
                .chain(call.args.iter())
                .collect(),

            Self::Goto(_) => Vec::new(),
            Self::Branch(branch) => match &branch.condition {
                Condition::Single(element) => vec![element],
                Condition::Unary(unary) => vec![&unary.operand],
                Condition::Binary(binary) => vec![&binary.left, &binary.right],
            },

            Self::Return(ret) => ret.value.iter().collect(),
            Self::PutField(put) => vec![&put.object, &put.value],
            Self::GetField(get) => vec![&get.object],
            Self::UnaryOp(unary) => vec![&unary.operand],
            Self::BinaryOp(binary) => vec![&binary.left, &binary.right],
            Self::NoOp(element) => vec![element],
        }
    }
}

impl fmt::Display for InstructionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Assign(assign) => write!(f, "{} :=.{} {}", assign.dest, assign.ty, assign.rhs),
            Self::Call(call) => {
                let name = match call.invocation {
                    Invocation::Virtual => "invokevirtual",
                    Invocation::Static => "invokestatic",
                    Invocation::Special => "invokespecial",
                    Invocation::New => "new",
                    Invocation::ArrayLength => "arraylength",
                };

                write!(f, "{name}({}", call.target)?;
                if let Some(method) = &call.method {
                    write!(f, ", \"{method}\"")?;
                }
                for arg in call.args.iter() {
                    write!(f, ", {arg}")?;
                }
                write!(f, ").{}", call.ret)
            }

            Self::Goto(label) => write!(f, "goto {label}"),
            Self::Branch(branch) => {
                write!(f, "if (")?;
                match &branch.condition {
                    Condition::Single(element) => write!(f, "{element}")?,
                    Condition::Unary(unary) => write!(f, "{unary}")?,
                    Condition::Binary(binary) => write!(f, "{binary}")?,
                }
                write!(f, ") goto {}", branch.label)
            }

            Self::Return(ret) => match &ret.value {
                Some(value) => write!(f, "ret.{} {value}", ret.ty),
                None => write!(f, "ret.{}", ret.ty),
            },

            Self::PutField(put) => write!(f, "putfield({}, {}, {}).V", put.object, put.field, put.value),
            Self::GetField(get) => write!(f, "getfield({}, {}).{}", get.object, get.field, get.ty),
            Self::UnaryOp(unary) => write!(f, "{unary}"),
            Self::BinaryOp(binary) => write!(f, "{binary}"),
            Self::NoOp(element) => write!(f, "{element}"),
        }
    }
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{} {}", self.op.symbol(), self.op.result_type(), self.operand)
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}.{} {}",
            self.left,
            self.op.symbol(),
            self.op.result_type(),
            self.right
        )
    }
}
