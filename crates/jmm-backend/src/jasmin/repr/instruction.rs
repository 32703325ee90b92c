use std::fmt;

/// A line of a method body.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Item {
    Label(String),
    Inst(Instruction),
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Comparison {
    Eq,
    Ne,
    Lt,
    Ge,
    Gt,
    Le,
}

impl Comparison {
    fn suffix(&self) -> &'static str {
        match self {
            Self::Eq => "eq",
            Self::Ne => "ne",
            Self::Lt => "lt",
            Self::Ge => "ge",
            Self::Gt => "gt",
            Self::Le => "le",
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum InvokeKind {
    Virtual,
    Static,
    Special,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Invoke {
    pub kind: InvokeKind,
    pub class: String,
    pub method: String,
    pub params: Vec<String>,
    pub ret: String,
}

impl Invoke {
    fn pops(&self) -> usize {
        match self.kind {
            InvokeKind::Static => self.params.len(),
            InvokeKind::Virtual | InvokeKind::Special => self.params.len() + 1,
        }
    }

    fn pushes(&self) -> usize {
        usize::from(self.ret != "V")
    }
}

/// The subset of JVM instructions the emitter produces.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Instruction {
    /// `iconst_m1` through `iconst_5`.
    Iconst(i32),
    Bipush(i32),
    Sipush(i32),
    Ldc(i32),

    Iload(usize),
    Aload(usize),
    Istore(usize),
    Astore(usize),
    Iinc(usize, i32),

    Iaload,
    Aaload,
    Iastore,
    Aastore,

    Iadd,
    Isub,
    Imul,
    Idiv,
    Iand,
    Ior,
    Ixor,

    /// Compare the top of the stack against zero.
    If(Comparison, String),
    IfIcmp(Comparison, String),
    Goto(String),

    Invoke(Invoke),
    New(String),

    /// `newarray` with a primitive element type, like `int`.
    Newarray(String),
    Anewarray(String),
    Arraylength,

    Getfield(String, String, String),
    Putfield(String, String, String),
    Getstatic(String, String, String),
    Putstatic(String, String, String),

    Dup,
    Pop,

    Ireturn,
    Areturn,
    Return,
}

impl Instruction {
    /// The number of values this instruction pops, and then pushes.
    pub fn stack_effect(&self) -> (usize, usize) {
        match self {
            Self::Iconst(_) | Self::Bipush(_) | Self::Sipush(_) | Self::Ldc(_) => (0, 1),
            Self::Iload(_) | Self::Aload(_) => (0, 1),
            Self::Istore(_) | Self::Astore(_) => (1, 0),
            Self::Iinc(..) => (0, 0),

            Self::Iaload | Self::Aaload => (2, 1),
            Self::Iastore | Self::Aastore => (3, 0),

            Self::Iadd | Self::Isub | Self::Imul | Self::Idiv => (2, 1),
            Self::Iand | Self::Ior | Self::Ixor => (2, 1),

            Self::If(..) => (1, 0),
            Self::IfIcmp(..) => (2, 0),
            Self::Goto(_) => (0, 0),

            Self::Invoke(invoke) => (invoke.pops(), invoke.pushes()),
            Self::New(_) => (0, 1),
            Self::Newarray(_) | Self::Anewarray(_) => (1, 1),
            Self::Arraylength => (1, 1),

            Self::Getfield(..) => (1, 1),
            Self::Putfield(..) => (2, 0),
            Self::Getstatic(..) => (0, 1),
            Self::Putstatic(..) => (1, 0),

            Self::Dup => (1, 2),
            Self::Pop => (1, 0),

            Self::Ireturn | Self::Areturn => (1, 0),
            Self::Return => (0, 0),
        }
    }

    /// The label this instruction may jump to.
    pub fn jump_target(&self) -> Option<&str> {
        match self {
            Self::If(_, label) | Self::IfIcmp(_, label) | Self::Goto(label) => Some(label),
            _ => None,
        }
    }

    /// Whether control never continues to the next instruction.
    pub fn is_terminator(&self) -> bool {
        matches!(
            self,
            Self::Goto(_) | Self::Ireturn | Self::Areturn | Self::Return
        )
    }
}

/// Registers below 4 have their own short opcodes.
fn slot(f: &mut fmt::Formatter<'_>, op: &str, register: usize) -> fmt::Result {
    if register < 4 {
        write!(f, "{op}_{register}")
    } else {
        write!(f, "{op} {register}")
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Iconst(-1) => write!(f, "iconst_m1"),
            Self::Iconst(value) => write!(f, "iconst_{value}"),
            Self::Bipush(value) => write!(f, "bipush {value}"),
            Self::Sipush(value) => write!(f, "sipush {value}"),
            Self::Ldc(value) => write!(f, "ldc {value}"),

            Self::Iload(register) => slot(f, "iload", *register),
            Self::Aload(register) => slot(f, "aload", *register),
            Self::Istore(register) => slot(f, "istore", *register),
            Self::Astore(register) => slot(f, "astore", *register),
            Self::Iinc(register, by) => write!(f, "iinc {register} {by}"),

            Self::Iaload => write!(f, "iaload"),
            Self::Aaload => write!(f, "aaload"),
            Self::Iastore => write!(f, "iastore"),
            Self::Aastore => write!(f, "aastore"),

            Self::Iadd => write!(f, "iadd"),
            Self::Isub => write!(f, "isub"),
            Self::Imul => write!(f, "imul"),
            Self::Idiv => write!(f, "idiv"),
            Self::Iand => write!(f, "iand"),
            Self::Ior => write!(f, "ior"),
            Self::Ixor => write!(f, "ixor"),

            Self::If(cmp, label) => write!(f, "if{} {label}", cmp.suffix()),
            Self::IfIcmp(cmp, label) => write!(f, "if_icmp{} {label}", cmp.suffix()),
            Self::Goto(label) => write!(f, "goto {label}"),

            Self::Invoke(invoke) => {
                let op = match invoke.kind {
                    InvokeKind::Virtual => "invokevirtual",
                    InvokeKind::Static => "invokestatic",
                    InvokeKind::Special => "invokespecial",
                };

                write!(
                    f,
                    "{op} {}/{}({}){}",
                    invoke.class,
                    invoke.method,
                    invoke.params.concat(),
                    invoke.ret
                )
            }

            Self::New(class) => write!(f, "new {class}"),
            Self::Newarray(elem) => write!(f, "newarray {elem}"),
            Self::Anewarray(class) => write!(f, "anewarray {class}"),
            Self::Arraylength => write!(f, "arraylength"),

            Self::Getfield(class, field, ty) => write!(f, "getfield {class}/{field} {ty}"),
            Self::Putfield(class, field, ty) => write!(f, "putfield {class}/{field} {ty}"),
            Self::Getstatic(class, field, ty) => write!(f, "getstatic {class}/{field} {ty}"),
            Self::Putstatic(class, field, ty) => write!(f, "putstatic {class}/{field} {ty}"),

            Self::Dup => write!(f, "dup"),
            Self::Pop => write!(f, "pop"),

            Self::Ireturn => write!(f, "ireturn"),
            Self::Areturn => write!(f, "areturn"),
            Self::Return => write!(f, "return"),
        }
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Label(label) => write!(f, "{label}:"),
            Self::Inst(inst) => write!(f, "\t{inst}"),
        }
    }
}
