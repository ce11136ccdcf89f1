use std::{ops::Deref, rc::Rc};

use super::DeclarationType;
use crate::{printer::Sink, token::Token};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Primitive,
    Typedef,
    Function,
    Class,
    Struct,
    Union,
    Enum,
}

impl TypeKind {
    pub fn is_structure(self) -> bool {
        matches!(
            self,
            TypeKind::Class | TypeKind::Struct | TypeKind::Union | TypeKind::Enum
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StructureKind {
    Class,
    Struct,
    Union,
    Enum,
}

impl StructureKind {
    pub fn keyword(self) -> &'static str {
        match self {
            StructureKind::Class => "class",
            StructureKind::Struct => "struct",
            StructureKind::Union => "union",
            StructureKind::Enum => "enum",
        }
    }
}

/// The base type a [`DeclarationType`] refers to.
#[derive(Debug, Clone)]
pub enum TypeNode {
    /// A builtin type like `int`, known only by its name.
    Primitive(Token),
    Typedef(Typedef),
    Function(Function),
    Structure(Structure),
}

#[derive(Debug, Clone)]
pub struct Typedef {
    pub source: Option<Token>,
    pub base_type: DeclarationType,
}

#[derive(Debug, Clone)]
pub struct Function {
    pub source: Option<Token>,
    pub return_type: DeclarationType,
    pub args: Vec<Variable>,
    /// Declared as `(*name)(...)`.
    pub is_pointer: bool,
    /// Declared as `(^name)(...)`.
    pub is_block: bool,
}

/// A class, struct, union or enum. Only the declaration is modeled, members are not.
#[derive(Debug, Clone)]
pub struct Structure {
    pub kind: StructureKind,
    pub source: Option<Token>,
}

impl Function {
    pub fn new(return_type: DeclarationType, source: Option<Token>) -> Self {
        Self {
            source,
            return_type,
            args: Vec::new(),
            is_pointer: false,
            is_block: false,
        }
    }

    pub fn push_arg(&mut self, arg: Variable) {
        self.args.push(arg);
    }

    pub fn extend_args(&mut self, args: impl IntoIterator<Item = Variable>) {
        self.args.extend(args);
    }

    fn equals(&self, other: &Function) -> bool {
        self.is_pointer == other.is_pointer
            && self.is_block == other.is_block
            && self.args.len() == other.args.len()
            && self.return_type == other.return_type
            && self
                .args
                .iter()
                .zip(&other.args)
                .all(|(a, b)| a.vartype == b.vartype)
    }

    fn print_declaration(&self, name: &str, sink: &mut dyn Sink) {
        if self.is_pointer {
            self.return_type
                .print_declaration(sink, &format!("(*{name}"), true);
            sink.push_str(")");
        } else if self.is_block {
            self.return_type
                .print_declaration(sink, &format!("(^{name}"), true);
            sink.push_str(")");
        } else {
            self.return_type.print_declaration(sink, name, true);
        }

        sink.push_str("(");
        let arg_indent = sink.indent_from_newline();
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                sink.push_str(",\n");
                sink.push_str(&arg_indent);
            }
            arg.print_declaration(sink);
        }
        sink.push_str(")");
    }
}

impl TypeNode {
    pub fn primitive(name: impl Into<String>) -> Self {
        TypeNode::Primitive(Token::synthetic(name))
    }

    pub fn typedef(base_type: DeclarationType, source: Option<Token>) -> Self {
        TypeNode::Typedef(Typedef { source, base_type })
    }

    pub fn structure(kind: StructureKind, source: Option<Token>) -> Self {
        TypeNode::Structure(Structure { kind, source })
    }

    pub fn kind(&self) -> TypeKind {
        match self {
            TypeNode::Primitive(_) => TypeKind::Primitive,
            TypeNode::Typedef(_) => TypeKind::Typedef,
            TypeNode::Function(_) => TypeKind::Function,
            TypeNode::Structure(s) => match s.kind {
                StructureKind::Class => TypeKind::Class,
                StructureKind::Struct => TypeKind::Struct,
                StructureKind::Union => TypeKind::Union,
                StructureKind::Enum => TypeKind::Enum,
            },
        }
    }

    pub fn source(&self) -> Option<&Token> {
        match self {
            TypeNode::Primitive(source) => Some(source),
            TypeNode::Typedef(Typedef { source, .. })
            | TypeNode::Function(Function { source, .. })
            | TypeNode::Structure(Structure { source, .. }) => source.as_ref(),
        }
    }

    /// Empty for anonymous types.
    pub fn name(&self) -> &str {
        self.source().map_or("", |token| token.text.as_str())
    }

    pub fn is_named(&self) -> bool {
        !self.name().is_empty()
    }

    pub fn as_typedef(&self) -> Option<&Typedef> {
        match self {
            TypeNode::Typedef(typedef) => Some(typedef),
            _ => None,
        }
    }

    /// Prints the declaration introducing this type, e.g. `typedef int *intptr`.
    pub fn print_declaration(&self, sink: &mut dyn Sink) {
        match self {
            TypeNode::Primitive(source) => sink.push_str(&source.text),
            TypeNode::Typedef(typedef) => {
                sink.push_str("typedef ");
                typedef
                    .base_type
                    .print_declaration(sink, self.name(), true);
            }
            TypeNode::Function(function) => function.print_declaration(self.name(), sink),
            TypeNode::Structure(structure) => {
                sink.push_str(structure.kind.keyword());
                if self.is_named() {
                    sink.push_str(" ");
                    sink.push_str(self.name());
                }
            }
        }
    }

    /// Compares nodes of the same kind.
    fn equals(&self, other: &TypeNode) -> bool {
        match (self, other) {
            (TypeNode::Primitive(a), TypeNode::Primitive(b)) => a.text == b.text,
            (TypeNode::Typedef(a), TypeNode::Typedef(b)) => a.base_type == b.base_type,
            (TypeNode::Function(a), TypeNode::Function(b)) => a.equals(b),
            // Structures are only equal to themselves
            _ => false,
        }
    }
}

impl PartialEq for TypeNode {
    fn eq(&self, other: &Self) -> bool {
        if self.kind() != other.kind() {
            return false;
        }
        std::ptr::eq(self, other) || self.equals(other)
    }
}

impl From<Function> for TypeNode {
    fn from(function: Function) -> Self {
        TypeNode::Function(function)
    }
}

/// How a declaration holds its type node: named nodes are shared, anonymous ones are owned.
///
/// Cloning an `Owned` ref deep copies the node, cloning a `Shared` one only copies the handle.
#[derive(Debug, Clone)]
pub enum TypeRef {
    Owned(Box<TypeNode>),
    Shared(Rc<TypeNode>),
}

impl TypeRef {
    /// Refers to an already published node: shares it when named, copies it otherwise.
    pub fn from_node(node: &Rc<TypeNode>) -> Self {
        if node.is_named() {
            TypeRef::Shared(Rc::clone(node))
        } else {
            TypeRef::Owned(Box::new(TypeNode::clone(node)))
        }
    }

    pub fn is_shared(&self) -> bool {
        matches!(self, TypeRef::Shared(_))
    }
}

impl Deref for TypeRef {
    type Target = TypeNode;

    fn deref(&self) -> &TypeNode {
        match self {
            TypeRef::Owned(node) => node,
            TypeRef::Shared(node) => node,
        }
    }
}

/// A named declaration, e.g. a function parameter.
#[derive(Debug, Clone)]
pub struct Variable {
    pub vartype: DeclarationType,
    pub source: Option<Token>,
}

impl Variable {
    pub fn new(vartype: DeclarationType, source: Option<Token>) -> Self {
        Self { vartype, source }
    }

    pub fn name(&self) -> &str {
        self.source.as_ref().map_or("", |token| token.text.as_str())
    }

    pub fn print_declaration(&self, sink: &mut dyn Sink) {
        self.vartype.print_declaration(sink, self.name(), true);
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{printer::Printer, types::Pointer};

    fn int() -> Rc<TypeNode> {
        Rc::new(TypeNode::primitive("int"))
    }

    fn arg(node: &Rc<TypeNode>, pointers: usize, name: &str) -> Variable {
        let mut vartype = DeclarationType::of(node);
        for _ in 0..pointers {
            vartype.push_pointer(Pointer::new());
        }
        Variable::new(vartype, Some(Token::synthetic(name)))
    }

    fn function(return_type: &Rc<TypeNode>, args: Vec<Variable>) -> Function {
        let mut function = Function::new(DeclarationType::of(return_type), None);
        function.extend_args(args);
        function
    }

    #[test]
    fn kinds() {
        let structure = TypeNode::structure(StructureKind::Union, Some(Token::synthetic("u")));
        assert_eq!(structure.kind(), TypeKind::Union);
        assert!(structure.kind().is_structure());
        assert!(!TypeNode::primitive("int").kind().is_structure());
        assert_eq!(structure.name(), "u");

        let anonymous = TypeNode::structure(StructureKind::Struct, None);
        assert_eq!(anonymous.name(), "");
        assert!(!anonymous.is_named());
    }

    #[test]
    fn primitives_compare_by_name() {
        assert_eq!(TypeNode::primitive("int"), TypeNode::primitive("int"));
        assert_ne!(TypeNode::primitive("int"), TypeNode::primitive("float"));
    }

    #[test]
    fn structures_compare_by_identity() {
        let a = Rc::new(TypeNode::structure(
            StructureKind::Struct,
            Some(Token::synthetic("s")),
        ));
        let b = TypeNode::structure(StructureKind::Struct, Some(Token::synthetic("s")));
        assert_eq!(*a, *a);
        assert_ne!(*a, b);
    }

    #[test]
    fn functions_ignore_parameter_names() {
        let int = int();
        let float = Rc::new(TypeNode::primitive("float"));

        let a = function(&int, vec![arg(&int, 1, "a"), arg(&float, 0, "b")]);
        let b = function(&int, vec![arg(&int, 1, "x"), arg(&float, 0, "y")]);
        assert_eq!(TypeNode::from(a.clone()), TypeNode::from(b));

        let fewer = function(&int, vec![arg(&int, 1, "a")]);
        assert_ne!(TypeNode::from(a.clone()), TypeNode::from(fewer));

        let other_arg = function(&int, vec![arg(&int, 0, "a"), arg(&float, 0, "b")]);
        assert_ne!(TypeNode::from(a.clone()), TypeNode::from(other_arg));

        let other_return = function(&float, vec![arg(&int, 1, "a"), arg(&float, 0, "b")]);
        assert_ne!(TypeNode::from(a.clone()), TypeNode::from(other_return));

        let mut pointer = a.clone();
        pointer.is_pointer = true;
        assert_ne!(TypeNode::from(a), TypeNode::from(pointer));
    }

    #[test]
    fn type_refs_share_named_nodes() {
        let int = int();
        let shared = TypeRef::from_node(&int);
        assert!(shared.is_shared());
        assert!(std::ptr::eq(&*shared, &*int));

        let anonymous = Rc::new(TypeNode::structure(StructureKind::Enum, None));
        let owned = TypeRef::from_node(&anonymous);
        assert!(!owned.is_shared());
        assert!(!std::ptr::eq(&*owned, &*anonymous));
        assert_eq!(Rc::strong_count(&anonymous), 1);
    }

    #[test]
    fn print_function() {
        let int = int();
        let mut f = function(&int, vec![arg(&int, 1, "a"), arg(&int, 0, "b")]);
        f.source = Some(Token::synthetic("add"));

        let mut printer = Printer::new();
        TypeNode::from(f.clone()).print_declaration(&mut printer);
        assert_eq!(printer.as_str(), "int add(int *a,\n        int b)");

        f.is_pointer = true;
        let mut printer = Printer::new();
        TypeNode::from(f.clone()).print_declaration(&mut printer);
        assert_eq!(printer.as_str(), "int (*add)(int *a,\n           int b)");

        f.is_pointer = false;
        f.is_block = true;
        let mut printer = Printer::new();
        TypeNode::from(f).print_declaration(&mut printer);
        assert_eq!(printer.as_str(), "int (^add)(int *a,\n           int b)");
    }

    #[test]
    fn print_typedef_and_structure() {
        let mut base = DeclarationType::of(&int());
        base.push_pointer(Pointer::new());
        let typedef = TypeNode::typedef(base, Some(Token::synthetic("intptr")));

        let mut printer = Printer::new();
        typedef.print_declaration(&mut printer);
        assert_eq!(printer.as_str(), "typedef int *intptr");

        let mut printer = Printer::new();
        TypeNode::structure(StructureKind::Class, Some(Token::synthetic("Foo")))
            .print_declaration(&mut printer);
        assert_eq!(printer.as_str(), "class Foo");
    }
}
