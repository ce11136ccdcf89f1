use std::rc::Rc;

use super::{Array, Pointer, Qualifier, Qualifiers, TypeNode, TypeRef};
use crate::{
    diagnostic::{AggregateResult, Span},
    printer::Sink,
    token::Token,
};

/// The full type of a declared variable: `const int *const x[4]` is the qualifier `const`, the
/// type node `int`, one pointer level qualified `const` and one array dimension.
///
/// Only valid when it has a type node, see [`DeclarationType::is_valid`].
#[derive(Debug, Clone, Default)]
pub struct DeclarationType {
    pub qualifiers: Qualifiers,
    type_ref: Option<TypeRef>,
    pub pointers: Vec<Pointer>,
    pub arrays: Vec<Array>,
    reference_token: Option<Token>,
    type_token: Option<Token>,
}

impl DeclarationType {
    pub fn new(type_ref: TypeRef) -> Self {
        Self {
            type_ref: Some(type_ref),
            ..Default::default()
        }
    }

    /// A declaration of `node`, sharing it if it is named.
    pub fn of(node: &Rc<TypeNode>) -> Self {
        Self::new(TypeRef::from_node(node))
    }

    pub fn with_name_token(mut self, token: Token) -> Self {
        self.type_token = Some(token);
        self
    }

    pub fn type_node(&self) -> Option<&TypeNode> {
        self.type_ref.as_deref()
    }

    pub fn is_valid(&self) -> bool {
        self.type_ref.is_some()
    }

    /// Whether the declaration carries the token naming its type.
    pub fn is_named(&self) -> bool {
        self.type_token.is_some()
    }

    pub fn name(&self) -> &str {
        self.type_token
            .as_ref()
            .map_or("", |token| token.text.as_str())
    }

    pub fn set_reference_token(&mut self, token: Token) {
        self.reference_token = Some(token);
    }

    pub fn is_reference(&self) -> bool {
        self.reference_token.is_some()
    }

    pub fn has(&self, qualifier: Qualifier) -> bool {
        self.qualifiers.has(qualifier)
    }

    pub fn add_qualifier(&mut self, qualifier: Qualifier, span: Span) -> AggregateResult<()> {
        self.qualifiers.add(qualifier, span)
    }

    pub fn insert_qualifier(&mut self, qualifier: Qualifier) {
        self.qualifiers.insert(qualifier, Span::default());
    }

    pub fn remove_qualifier(&mut self, qualifier: Qualifier) {
        self.qualifiers.remove(qualifier);
    }

    pub fn add_qualifiers(&mut self, qualifiers: &Qualifiers) {
        self.qualifiers.extend(qualifiers);
    }

    pub fn push_pointer(&mut self, pointer: Pointer) {
        self.pointers.push(pointer);
    }

    pub fn extend_pointers(&mut self, pointers: &[Pointer]) {
        self.pointers.extend_from_slice(pointers);
    }

    pub fn push_array(&mut self, array: Array) {
        self.arrays.push(array);
    }

    pub fn extend_arrays(&mut self, arrays: &[Array]) {
        self.arrays.extend_from_slice(arrays);
    }

    /// Only the type node and the qualifiers, for declaring another variable of the same base
    /// type (`int *a, b;`).
    pub fn declaration_type(&self) -> DeclarationType {
        DeclarationType {
            qualifiers: self.qualifiers.clone(),
            type_ref: self.type_ref.clone(),
            ..Default::default()
        }
    }

    /// Resolves typedefs: the result has no typedef type node, the modifiers of every typedef in
    /// the chain are appended after those of the typedef it aliases.
    pub fn flatten(&self) -> DeclarationType {
        let Some(typedef) = self.type_node().and_then(TypeNode::as_typedef) else {
            return self.clone();
        };

        let mut flat = typedef.base_type.flatten();
        flat.add_qualifiers(&self.qualifiers);
        flat.extend_pointers(&self.pointers);
        flat.extend_arrays(&self.arrays);
        // `alias &x` declares a reference, so it equals `int &x`
        if self.reference_token.is_some() {
            flat.reference_token = self.reference_token.clone();
        }
        if self.type_token.is_some() {
            flat.type_token = self.type_token.clone();
        }
        flat
    }

    pub fn clear(&mut self) {
        *self = DeclarationType::default();
    }

    /// Prints a declarator for `var_name`, e.g. `const int * const x[4]`. Without `print_type`
    /// only the part after the type is printed, as for `b` in `int *a, b[2]`.
    pub fn print_declaration(&self, sink: &mut dyn Sink, var_name: &str, print_type: bool) {
        let Some(type_node) = self.type_node() else {
            return;
        };

        if print_type {
            if !self.qualifiers.is_empty() {
                sink.push_str(&self.qualifiers.to_string());
                sink.push_str(" ");
            }
            sink.push_str(type_node.name());
            sink.push_str(" ");
        }

        for pointer in &self.pointers {
            pointer.print_declaration(sink);
            // `* const x`, but `*x`
            if !pointer.qualifiers.is_empty() {
                sink.push_str(" ");
            }
        }

        sink.push_str(var_name);

        for array in &self.arrays {
            array.print_declaration(sink);
        }
    }

    pub fn print_extra_declaration(&self, sink: &mut dyn Sink, var_name: &str) {
        self.print_declaration(sink, var_name, false);
    }
}

/// Structural equality after flattening typedefs.
///
/// An invalid declaration is never equal to anything, itself included. Pointer levels and array
/// dimensions are counted together, so `int *` equals `int []`. Pointer levels one side has and
/// the other doesn't must be unqualified.
impl PartialEq for DeclarationType {
    fn eq(&self, other: &Self) -> bool {
        if !self.is_valid() || !other.is_valid() {
            return false;
        }

        let flat = self.flatten();
        let other_flat = other.flatten();

        if !flat.is_valid() || !other_flat.is_valid() {
            return false;
        }
        if flat.type_node() != other_flat.type_node()
            || flat.is_reference() != other_flat.is_reference()
            || flat.qualifiers != other_flat.qualifiers
        {
            return false;
        }

        if flat.pointers.len() + flat.arrays.len()
            != other_flat.pointers.len() + other_flat.arrays.len()
        {
            return false;
        }

        let (shorter, longer) = if flat.pointers.len() < other_flat.pointers.len() {
            (&flat.pointers, &other_flat.pointers)
        } else {
            (&other_flat.pointers, &flat.pointers)
        };

        shorter
            .iter()
            .zip(longer.iter())
            .all(|(a, b)| a.qualifiers == b.qualifiers)
            && longer[shorter.len()..]
                .iter()
                .all(|pointer| pointer.qualifiers.is_empty())
    }
}
