use jmm_common::ir::{AccessModifier, ClassUnit, Method, Type};

/// The root of every class hierarchy.
const OBJECT: &str = "java/lang/Object";
const STRING: &str = "java/lang/String";

/// Turns the names and types of a class into their JVM spelling.
#[derive(Clone, Copy, Debug)]
pub struct Names<'a> {
    class: &'a ClassUnit,
}

impl<'a> Names<'a> {
    pub fn new(class: &'a ClassUnit) -> Self {
        Self { class }
    }

    pub fn this_class(&self) -> &'a str {
        &self.class.name
    }

    /// Resolve a class name through the imports, so that `List` becomes
    /// `java/util/List` when `java.util.List` was imported. Names that are not
    /// imported are left as they are.
    pub fn resolve(&self, name: &str) -> String {
        if name == "String" {
            return STRING.into();
        }

        self.class
            .imports
            .iter()
            .find(|import| import.rsplit('.').next() == Some(name))
            .map(|import| import.replace('.', "/"))
            .unwrap_or_else(|| name.into())
    }

    pub fn super_class(&self) -> String {
        match &self.class.super_class {
            Some(name) => self.resolve(name),
            None => OBJECT.into(),
        }
    }

    /// The class whose members are accessed through a value of the given
    /// type, if it has any.
    pub fn class_of(&self, ty: &Type) -> Option<String> {
        match ty {
            Type::This => Some(self.class.name.clone()),
            Type::Object(name) | Type::Class(name) => Some(self.resolve(name)),
            Type::String => Some(STRING.into()),
            Type::Int32 | Type::Boolean | Type::Array(_) | Type::Void => None,
        }
    }

    pub fn descriptor(&self, ty: &Type) -> String {
        match ty {
            Type::Int32 => "I".into(),
            Type::Boolean => "Z".into(),
            Type::Array(elem) => format!("[{}", self.descriptor(elem)),
            Type::Object(name) | Type::Class(name) => format!("L{};", self.resolve(name)),
            Type::This => format!("L{};", self.class.name),
            Type::String => format!("L{STRING};"),
            Type::Void => "V".into(),
        }
    }

    pub fn method_descriptor(&self, method: &Method) -> String {
        let params: String = method
            .params
            .iter()
            .map(|param| self.descriptor(&param.ty))
            .collect();

        format!("({params}){}", self.descriptor(&method.ret))
    }

    /// Package-private members are emitted as public.
    pub fn access(&self, access: AccessModifier) -> String {
        match access {
            AccessModifier::Default => AccessModifier::Public.to_string(),
            other => other.to_string(),
        }
    }
}
