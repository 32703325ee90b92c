use std::fmt;

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum Type {
    Int32,
    Boolean,
    Array(Box<Type>),
    /// An instance of some class.
    Object(String),
    /// A class itself, as the target of a static call or `new`.
    Class(String),
    This,
    String,
    Void,
}

/// The broad kind of value a type describes, which is what instruction
/// selection cares about.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Category {
    Integer,
    Reference,
    Void,
}

impl Type {
    pub fn array_of(elem: Type) -> Self {
        Self::Array(Box::new(elem))
    }

    pub fn category(&self) -> Category {
        match self {
            Self::Int32 | Self::Boolean => Category::Integer,
            Self::Array(_) | Self::Object(_) | Self::Class(_) | Self::This | Self::String => {
                Category::Reference
            }
            Self::Void => Category::Void,
        }
    }

    pub fn is_void(&self) -> bool {
        matches!(self, Self::Void)
    }

    pub fn is_class(&self) -> bool {
        matches!(self, Self::Class(_))
    }
}

/// Formats the type the way it is written in OLLIR.
impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int32 => write!(f, "i32"),
            Self::Boolean => write!(f, "bool"),
            Self::Array(elem) => write!(f, "array.{elem}"),
            Self::Object(name) | Self::Class(name) => write!(f, "{name}"),
            Self::This => write!(f, "this"),
            Self::String => write!(f, "String"),
            Self::Void => write!(f, "V"),
        }
    }
}
