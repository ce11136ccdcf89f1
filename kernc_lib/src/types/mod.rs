//! The declaration type system: what a parsed variable, parameter or typedef is declared as.
//!
//! A [`DeclarationType`] is a base [`TypeNode`] with [`Qualifiers`], [`Pointer`] levels,
//! [`Array`] dimensions and an optional reference marker. Named type nodes are shared between
//! every declaration using them, unnamed ones are owned by exactly one declaration (see
//! [`TypeRef`]).

mod node;
mod qualifier;
mod vartype;

pub use node::{Function, Structure, StructureKind, TypeKind, TypeNode, TypeRef, Typedef, Variable};
pub use qualifier::{Qualifier, Qualifiers};
pub use vartype::DeclarationType;

use std::fmt::Debug;

use crate::{
    diagnostic::{AggregateResult, Span},
    printer::Sink,
    token::Token,
    value::Value,
};

/// An expression used as an array bound.
///
/// Evaluating expressions is not done here, this is only what a declaration needs from one.
pub trait SizeExpr: Debug {
    fn can_evaluate(&self) -> bool;

    fn evaluate(&self) -> Value;

    fn print(&self, sink: &mut dyn Sink);

    fn clone_box(&self) -> Box<dyn SizeExpr>;
}

impl Clone for Box<dyn SizeExpr> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// A literal bound, e.g. the `4` in `int a[4]`.
impl SizeExpr for Value {
    fn can_evaluate(&self) -> bool {
        !self.is_nan()
    }

    fn evaluate(&self) -> Value {
        *self
    }

    fn print(&self, sink: &mut dyn Sink) {
        sink.push_str(&self.to_string());
    }

    fn clone_box(&self) -> Box<dyn SizeExpr> {
        Box::new(*self)
    }
}

/// One `*` of a declarator with the qualifiers written after it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pointer {
    pub qualifiers: Qualifiers,
}

impl Pointer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_qualifiers(qualifiers: Qualifiers) -> Self {
        Self { qualifiers }
    }

    pub fn has(&self, qualifier: Qualifier) -> bool {
        self.qualifiers.has(qualifier)
    }

    pub fn add_qualifier(&mut self, qualifier: Qualifier, span: Span) -> AggregateResult<()> {
        self.qualifiers.add(qualifier, span)
    }

    pub fn remove_qualifier(&mut self, qualifier: Qualifier) {
        self.qualifiers.remove(qualifier);
    }

    pub fn add_qualifiers(&mut self, qualifiers: &Qualifiers) {
        self.qualifiers.extend(qualifiers);
    }

    pub fn print_declaration(&self, sink: &mut dyn Sink) {
        sink.push_str("*");
        if !self.qualifiers.is_empty() {
            sink.push_str(" ");
            sink.push_str(&self.qualifiers.to_string());
        }
    }
}

/// One `[...]` of a declarator. An array without a size (`[]`) is different from one whose size
/// can't be evaluated.
#[derive(Debug, Clone, Default)]
pub struct Array {
    pub start: Option<Token>,
    pub end: Option<Token>,
    pub size: Option<Box<dyn SizeExpr>>,
}

impl Array {
    pub fn without_size() -> Self {
        Self::default()
    }

    pub fn sized(size: impl SizeExpr + 'static) -> Self {
        Self {
            start: None,
            end: None,
            size: Some(Box::new(size)),
        }
    }

    pub fn with_brackets(mut self, start: Token, end: Token) -> Self {
        self.start = Some(start);
        self.end = Some(end);
        self
    }

    pub fn has_size(&self) -> bool {
        self.size.is_some()
    }

    pub fn can_evaluate_size(&self) -> bool {
        self.size.as_ref().map_or(false, |size| size.can_evaluate())
    }

    /// [`Value::None`] for an unsized array.
    pub fn evaluate_size(&self) -> Value {
        self.size
            .as_ref()
            .map_or(Value::None, |size| size.evaluate())
    }

    pub fn print_declaration(&self, sink: &mut dyn Sink) {
        match &self.size {
            Some(size) => {
                sink.push_str("[");
                size.print(sink);
                sink.push_str("]");
            }
            None => sink.push_str("[]"),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::printer::Printer;

    #[derive(Debug, Clone)]
    struct Opaque(&'static str);

    impl SizeExpr for Opaque {
        fn can_evaluate(&self) -> bool {
            false
        }

        fn evaluate(&self) -> Value {
            Value::None
        }

        fn print(&self, sink: &mut dyn Sink) {
            sink.push_str(self.0);
        }

        fn clone_box(&self) -> Box<dyn SizeExpr> {
            Box::new(self.clone())
        }
    }

    fn print(f: impl FnOnce(&mut Printer)) -> String {
        let mut printer = Printer::new();
        f(&mut printer);
        printer.into_string()
    }

    #[test]
    fn array_sizes() {
        let unsized_array = Array::without_size();
        assert!(!unsized_array.has_size());
        assert!(!unsized_array.can_evaluate_size());
        assert_eq!(unsized_array.evaluate_size(), Value::None);
        assert_eq!(print(|p| unsized_array.print_declaration(p)), "[]");

        let literal = Array::sized(Value::Int32(4));
        assert!(literal.has_size());
        assert!(literal.can_evaluate_size());
        assert_eq!(literal.evaluate_size(), Value::Int32(4));
        assert_eq!(print(|p| literal.print_declaration(p)), "[4]");

        let opaque = Array::sized(Opaque("N + 1"))
            .with_brackets(Token::new(5..6, "["), Token::new(11..12, "]"));
        assert!(opaque.has_size());
        assert!(!opaque.can_evaluate_size());
        assert_eq!(print(|p| opaque.clone().print_declaration(p)), "[N + 1]");
        assert_eq!(opaque.start.as_ref().map(|t| t.span), Some(Span::from(5..6)));
    }

    #[test]
    fn pointer_qualifiers() {
        let mut pointer = Pointer::new();
        assert_eq!(print(|p| pointer.print_declaration(p)), "*");

        assert!(pointer.add_qualifier(Qualifier::Const, Span::default()).is_ok());
        assert!(pointer.add_qualifier(Qualifier::Const, Span::default()).is_rec());
        pointer.add_qualifiers(&[Qualifier::Restrict].into_iter().collect());
        assert!(pointer.has(Qualifier::Restrict));
        assert_eq!(print(|p| pointer.print_declaration(p)), "* const restrict");

        pointer.remove_qualifier(Qualifier::Const);
        assert_eq!(print(|p| pointer.print_declaration(p)), "* restrict");
    }
}
