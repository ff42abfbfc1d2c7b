use ast::Type;
use itertools::Itertools;
use std::fmt;

/// The primitive kinds of C--.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BasicKind {
    Int,
    Short,
    Bool,
    String,
    Void,
}

/// The statically computed type of a node.
///
/// `Error` marks a node that is ill-typed. It is never equal to any type,
/// itself included, so two independently broken nodes never "match". This
/// is why `DataType` implements `PartialEq` but not `Eq`.
#[derive(Debug, Clone)]
pub enum DataType {
    Basic(BasicKind),
    Ptr(Box<DataType>),
    Fn(FnType),
    Error,
}

/// Signature of a function: ordered formal types plus the return type.
#[derive(Debug, Clone)]
pub struct FnType {
    pub formals: Vec<DataType>,
    pub ret: Box<DataType>,
}

impl DataType {
    pub const INT: DataType = DataType::Basic(BasicKind::Int);
    pub const SHORT: DataType = DataType::Basic(BasicKind::Short);
    pub const BOOL: DataType = DataType::Basic(BasicKind::Bool);
    pub const STRING: DataType = DataType::Basic(BasicKind::String);
    pub const VOID: DataType = DataType::Basic(BasicKind::Void);

    pub fn ptr(pointee: DataType) -> DataType {
        DataType::Ptr(Box::new(pointee))
    }

    pub fn function(formals: Vec<DataType>, ret: DataType) -> DataType {
        DataType::Fn(FnType::new(formals, ret))
    }

    /// Structural equality without any coercion. `Error` is compatible with
    /// nothing.
    pub fn compatible(&self, other: &DataType) -> bool {
        use self::DataType::*;

        match (self, other) {
            (Error, _) | (_, Error) => false,
            (Basic(a), Basic(b)) => a == b,
            (Ptr(a), Ptr(b)) => a.compatible(b),
            (Fn(a), Fn(b)) => a.compatible(b),
            (Basic(_), _) | (Ptr(_), _) | (Fn(_), _) => false,
        }
    }

    fn is_basic(&self, kind: BasicKind) -> bool {
        match self {
            DataType::Basic(own) => *own == kind,
            DataType::Ptr(_) | DataType::Fn(_) | DataType::Error => false,
        }
    }

    pub fn is_int(&self) -> bool {
        self.is_basic(BasicKind::Int)
    }

    pub fn is_short(&self) -> bool {
        self.is_basic(BasicKind::Short)
    }

    /// `int` or `short`, the operand types of arithmetic.
    pub fn is_numeric(&self) -> bool {
        self.is_int() || self.is_short()
    }

    pub fn is_bool(&self) -> bool {
        self.is_basic(BasicKind::Bool)
    }

    pub fn is_string(&self) -> bool {
        self.is_basic(BasicKind::String)
    }

    pub fn is_void(&self) -> bool {
        self.is_basic(BasicKind::Void)
    }

    pub fn is_error(&self) -> bool {
        match self {
            DataType::Error => true,
            DataType::Basic(_) | DataType::Ptr(_) | DataType::Fn(_) => false,
        }
    }

    pub fn as_fn(&self) -> Option<&FnType> {
        match self {
            DataType::Fn(fn_type) => Some(fn_type),
            DataType::Basic(_) | DataType::Ptr(_) | DataType::Error => None,
        }
    }

    pub fn as_ptr(&self) -> Option<&DataType> {
        match self {
            DataType::Ptr(pointee) => Some(pointee),
            DataType::Basic(_) | DataType::Fn(_) | DataType::Error => None,
        }
    }
}

impl PartialEq for DataType {
    fn eq(&self, other: &DataType) -> bool {
        self.compatible(other)
    }
}

impl FnType {
    pub fn new(formals: Vec<DataType>, ret: DataType) -> Self {
        Self {
            formals,
            ret: Box::new(ret),
        }
    }

    pub fn arity(&self) -> usize {
        self.formals.len()
    }

    pub fn ret(&self) -> &DataType {
        &self.ret
    }

    pub fn compatible(&self, other: &FnType) -> bool {
        self.arity() == other.arity()
            && self
                .formals
                .iter()
                .zip(&other.formals)
                .all(|(a, b)| a.compatible(b))
            && self.ret.compatible(&other.ret)
    }
}

impl PartialEq for FnType {
    fn eq(&self, other: &FnType) -> bool {
        self.compatible(other)
    }
}

impl<'a> From<&'a Type> for DataType {
    fn from(ty: &'a Type) -> DataType {
        match ty {
            Type::Int => DataType::INT,
            Type::Short => DataType::SHORT,
            Type::Bool => DataType::BOOL,
            Type::String => DataType::STRING,
            Type::Void => DataType::VOID,
            Type::Ptr(pointee) => DataType::ptr(DataType::from(&**pointee)),
            Type::Fn { formals, ret } => DataType::function(
                formals.iter().map(DataType::from).collect(),
                DataType::from(&**ret),
            ),
        }
    }
}

impl fmt::Display for BasicKind {
    fn fmt(&self, f: &'_ mut fmt::Formatter<'_>) -> fmt::Result {
        use self::BasicKind::*;
        match self {
            Int => write!(f, "int"),
            Short => write!(f, "short"),
            Bool => write!(f, "bool"),
            String => write!(f, "string"),
            Void => write!(f, "void"),
        }
    }
}

impl fmt::Display for FnType {
    fn fmt(&self, f: &'_ mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({})->{}", self.formals.iter().join(","), self.ret)
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &'_ mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataType::Basic(kind) => write!(f, "{}", kind),
            DataType::Ptr(pointee) => write!(f, "ptr {}", pointee),
            DataType::Fn(fn_type) => write!(f, "{}", fn_type),
            DataType::Error => write!(f, "ERROR"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ast::build::ptr;

    #[test]
    fn error_is_never_equal() {
        assert!(!DataType::Error.compatible(&DataType::Error));
        assert_ne!(DataType::Error, DataType::Error);
        assert_ne!(DataType::Error, DataType::INT);
        assert_ne!(DataType::INT, DataType::Error);
    }

    #[test]
    fn basic_kinds_are_equal_to_themselves_only() {
        assert_eq!(DataType::INT, DataType::INT);
        assert_eq!(DataType::VOID, DataType::VOID);
        assert_ne!(DataType::INT, DataType::SHORT);
        assert_ne!(DataType::BOOL, DataType::STRING);
        assert_ne!(DataType::INT, DataType::ptr(DataType::INT));
    }

    #[test]
    fn functions_are_compared_structurally() {
        let f = DataType::function(vec![DataType::INT, DataType::BOOL], DataType::INT);
        let g = DataType::function(vec![DataType::INT, DataType::BOOL], DataType::INT);
        assert_eq!(f, g);

        let other_ret = DataType::function(vec![DataType::INT, DataType::BOOL], DataType::VOID);
        let other_arity = DataType::function(vec![DataType::INT], DataType::INT);
        let other_formal = DataType::function(vec![DataType::BOOL, DataType::BOOL], DataType::INT);
        assert_ne!(f, other_ret);
        assert_ne!(f, other_arity);
        assert_ne!(f, other_formal);

        // a signature mentioning an error type is just as broken
        let broken = DataType::function(vec![DataType::Error], DataType::INT);
        assert_ne!(broken, broken.clone());
    }

    #[test]
    fn predicates() {
        assert!(DataType::INT.is_numeric());
        assert!(DataType::SHORT.is_numeric());
        assert!(!DataType::BOOL.is_numeric());
        assert!(DataType::Error.is_error());
        assert!(!DataType::Error.is_void());
        assert_eq!(Some(&DataType::BOOL), DataType::ptr(DataType::BOOL).as_ptr());
        assert!(DataType::INT.as_fn().is_none());
        assert_eq!(
            2,
            DataType::function(vec![DataType::INT, DataType::INT], DataType::VOID)
                .as_fn()
                .map(FnType::arity)
                .unwrap()
        );
    }

    #[test]
    fn converts_declared_types() {
        let declared = Type::Fn {
            formals: vec![Type::Int, ptr(Type::Short)],
            ret: Box::new(Type::Void),
        };
        let expected = DataType::function(
            vec![DataType::INT, DataType::ptr(DataType::SHORT)],
            DataType::VOID,
        );
        assert_eq!(expected, DataType::from(&declared));
    }

    #[test]
    fn display() {
        let f = DataType::function(vec![DataType::INT, DataType::ptr(DataType::BOOL)], DataType::STRING);
        assert_eq!("(int,ptr bool)->string", f.to_string());
        assert_eq!("ERROR", DataType::Error.to_string());
        assert_eq!("()->void", DataType::function(vec![], DataType::VOID).to_string());
    }
}
