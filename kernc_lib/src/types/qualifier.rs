use std::fmt::Display;

use crate::diagnostic::{AggregateResult, DiagnosticBuilder, Span};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Qualifier {
    Const,
    Volatile,
    Restrict,
    Extern,
    Static,
    Inline,
    Register,
    Mutable,
    Typedef,
    Signed,
    Unsigned,
    Kernel,
    Device,
    Shared,
    Exclusive,
}

impl Qualifier {
    pub const ALL: [Qualifier; 15] = [
        Qualifier::Const,
        Qualifier::Volatile,
        Qualifier::Restrict,
        Qualifier::Extern,
        Qualifier::Static,
        Qualifier::Inline,
        Qualifier::Register,
        Qualifier::Mutable,
        Qualifier::Typedef,
        Qualifier::Signed,
        Qualifier::Unsigned,
        Qualifier::Kernel,
        Qualifier::Device,
        Qualifier::Shared,
        Qualifier::Exclusive,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Qualifier::Const => "const",
            Qualifier::Volatile => "volatile",
            Qualifier::Restrict => "restrict",
            Qualifier::Extern => "extern",
            Qualifier::Static => "static",
            Qualifier::Inline => "inline",
            Qualifier::Register => "register",
            Qualifier::Mutable => "mutable",
            Qualifier::Typedef => "typedef",
            Qualifier::Signed => "signed",
            Qualifier::Unsigned => "unsigned",
            Qualifier::Kernel => "kernel",
            Qualifier::Device => "device",
            Qualifier::Shared => "shared",
            Qualifier::Exclusive => "exclusive",
        }
    }

    pub fn from_name(name: &str) -> Option<Qualifier> {
        Self::ALL.into_iter().find(|q| q.name() == name)
    }
}

impl Display for Qualifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Qualifiers in the order they were written, each with the span it was written at.
#[derive(Debug, Clone, Default)]
pub struct Qualifiers(Vec<(Qualifier, Span)>);

impl Qualifiers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `qualifier`, unless it is already present. A duplicate leaves the set unchanged and
    /// gives a rec result pointing at both occurrences.
    pub fn add(&mut self, qualifier: Qualifier, span: Span) -> AggregateResult<()> {
        match self.span_of(qualifier) {
            Some(first_seen) => AggregateResult::new_rec(
                (),
                DiagnosticBuilder::new(span).build_duplicate_qualifier(qualifier, first_seen),
            ),
            None => {
                self.0.push((qualifier, span));
                AggregateResult::new_ok(())
            }
        }
    }

    /// Like [`Qualifiers::add`] but silently ignores duplicates.
    pub fn insert(&mut self, qualifier: Qualifier, span: Span) {
        if !self.has(qualifier) {
            self.0.push((qualifier, span));
        }
    }

    pub fn remove(&mut self, qualifier: Qualifier) {
        self.0.retain(|(q, _)| *q != qualifier);
    }

    /// Adds every qualifier of `other` not already in `self`, keeping `other`'s order.
    pub fn extend(&mut self, other: &Qualifiers) {
        for &(qualifier, span) in &other.0 {
            self.insert(qualifier, span);
        }
    }

    pub fn has(&self, qualifier: Qualifier) -> bool {
        self.span_of(qualifier).is_some()
    }

    pub fn span_of(&self, qualifier: Qualifier) -> Option<Span> {
        self.0
            .iter()
            .find_map(|&(q, span)| (q == qualifier).then_some(span))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Qualifier> + '_ {
        self.0.iter().map(|(q, _)| *q)
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }
}

/// Order and spans are ignored.
impl PartialEq for Qualifiers {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|q| other.has(q))
    }
}

impl Eq for Qualifiers {}

impl FromIterator<Qualifier> for Qualifiers {
    fn from_iter<T: IntoIterator<Item = Qualifier>>(iter: T) -> Self {
        let mut qualifiers = Qualifiers::new();
        for qualifier in iter {
            qualifiers.insert(qualifier, Span::default());
        }
        qualifiers
    }
}

impl Display for Qualifiers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, qualifier) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{qualifier}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::diagnostic::{Code, DiagnosticKind};

    #[test]
    fn duplicate_is_reported_and_ignored() {
        let mut qualifiers = Qualifiers::new();
        assert!(qualifiers.add(Qualifier::Const, (0..5).into()).is_ok());
        assert!(qualifiers.add(Qualifier::Volatile, (6..14).into()).is_ok());

        let res = qualifiers.add(Qualifier::Const, (15..20).into());
        assert!(res.is_rec());
        let (kind, diagnostic) = res.diagnostics().next().unwrap();
        assert_eq!(kind, DiagnosticKind::Rec);
        assert_eq!(diagnostic.code(), &Code::DuplicateQualifier);
        assert_eq!(diagnostic.main_span(), &Span::from(15..20));
        let (first_seen, _) = diagnostic.additional_spans().next().unwrap();
        assert_eq!(first_seen, &Span::from(0..5));

        assert_eq!(qualifiers.len(), 2);
        assert_eq!(qualifiers.to_string(), "const volatile");
    }

    #[test]
    fn equality_ignores_order() {
        let a: Qualifiers = [Qualifier::Const, Qualifier::Restrict].into_iter().collect();
        let b: Qualifiers = [Qualifier::Restrict, Qualifier::Const].into_iter().collect();
        let c: Qualifiers = [Qualifier::Const].into_iter().collect();
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(Qualifiers::new(), Qualifiers::new());
    }

    #[test]
    fn union_and_remove() {
        let mut a: Qualifiers = [Qualifier::Const].into_iter().collect();
        let b: Qualifiers = [Qualifier::Kernel, Qualifier::Const].into_iter().collect();
        a.extend(&b);
        assert_eq!(a.to_string(), "const kernel");

        a.remove(Qualifier::Const);
        assert!(!a.has(Qualifier::Const));
        assert!(a.has(Qualifier::Kernel));
        a.clear();
        assert!(a.is_empty());
    }

    #[test]
    fn names() {
        for qualifier in Qualifier::ALL {
            assert_eq!(Qualifier::from_name(qualifier.name()), Some(qualifier));
        }
        assert_eq!(Qualifier::from_name("constant"), None);
    }
}
