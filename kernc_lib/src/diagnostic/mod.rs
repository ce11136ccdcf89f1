pub mod builder;

use std::{
    collections::LinkedList,
    fmt::{Debug, Display},
};

pub use builder::DiagnosticBuilder;

#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Span {
    start: usize,
    length: usize,
}

impl From<std::ops::Range<usize>> for Span {
    fn from(value: std::ops::Range<usize>) -> Self {
        Self {
            start: value.start,
            length: value.len(),
        }
    }
}

impl From<Span> for std::ops::Range<usize> {
    fn from(val: Span) -> Self {
        val.start..val.excl_end()
    }
}

impl Debug for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..{}", self.start, self.excl_end())
    }
}

impl Span {
    pub fn start(&self) -> usize {
        self.start
    }

    pub fn excl_end(&self) -> usize {
        self.start + self.length
    }

    pub fn len(&self) -> usize {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }
}

// WARNING: Don't change the order of these (Error codes will change)
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Code {
    /// This is an internal code that should never be used for actual diagnostics.
    Unspecified = 0,
    InvalidLiteral,
    TrailingCharacters,
    UnknownOperator,
    DuplicateQualifier,
    ValueNotSet,
    FloatOperand,
    BoolOperand,
    DivisionByZero,
}

impl Code {
    /// Get a unique numeric code for this `Code`
    fn as_code(&self) -> u32 {
        *self as u32
    }
}

impl Display for Code {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:0>4x}", self.as_code())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    code: Code,
    message: String,
    main_span: (Span, Option<String>),
    additional_spans: Vec<(Span, Option<String>)>,
}

impl Diagnostic {
    pub fn code(&self) -> &Code {
        &self.code
    }

    pub fn message(&self) -> &String {
        &self.message
    }

    pub fn main_span(&self) -> &Span {
        &self.main_span.0
    }

    pub fn main_span_message(&self) -> Option<&String> {
        self.main_span.1.as_ref()
    }

    pub fn additional_spans(&self) -> impl Iterator<Item = (&Span, Option<&String>)> {
        self.additional_spans.iter().map(|(s, m)| (s, m.as_ref()))
    }

    pub fn additional_spans_len(&self) -> usize {
        self.additional_spans.len()
    }
}

/// Specifies the possibles types of diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// For recoverable diagnostics. (cfr. warnings)
    Rec,
    /// For non-recoverable diagnostics. (cfr. errors)
    Err,
}

/// A value together with the diagnostics collected while producing it.
///
/// The result is always in exactly one of three states:
/// - _ok_: a value and no diagnostics.
/// - _rec_: a (recovered) value and only [`DiagnosticKind::Rec`] diagnostics.
/// - _err_: no value and at least one [`DiagnosticKind::Err`] diagnostic.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateResult<T> {
    value: Option<T>,
    diagnostics: LinkedList<(DiagnosticKind, Diagnostic)>,
}

impl<T: Default> Default for AggregateResult<T> {
    fn default() -> Self {
        Self::new_ok(T::default())
    }
}

impl<T> AggregateResult<T> {
    /// ```
    /// # use kernc_lib::diagnostic::*;
    /// let res = AggregateResult::new_ok(2);
    ///
    /// assert!(res.is_ok());
    /// assert_eq!(res.value(), Some(&2));
    /// assert!(res.diagnostics().next().is_none());
    /// ```
    pub fn new_ok(value: T) -> Self {
        Self {
            value: Some(value),
            diagnostics: LinkedList::new(),
        }
    }

    /// The diagnostic is stored as [`DiagnosticKind::Rec`].
    ///
    /// ```
    /// # use kernc_lib::diagnostic::*;
    /// # let diagnostic = DiagnosticBuilder::new(0..2).build_trailing_characters("L");
    /// let res = AggregateResult::new_rec(16, diagnostic.clone());
    ///
    /// assert!(res.is_rec());
    /// assert_eq!(res.value(), Some(&16));
    /// let mut diags = res.diagnostics();
    /// assert_eq!(diags.next(), Some((DiagnosticKind::Rec, &diagnostic)));
    /// assert!(diags.next().is_none());
    /// ```
    pub fn new_rec(value: T, diagnostic: Diagnostic) -> Self {
        Self {
            value: Some(value),
            diagnostics: LinkedList::from([(DiagnosticKind::Rec, diagnostic)]),
        }
    }

    /// The diagnostic is stored as [`DiagnosticKind::Err`].
    ///
    /// ```
    /// # use kernc_lib::diagnostic::*;
    /// # let diagnostic = DiagnosticBuilder::new(0..3).build_invalid_literal("abc");
    /// let res = AggregateResult::<()>::new_err(diagnostic.clone());
    ///
    /// assert!(res.is_err());
    /// assert!(res.value().is_none());
    /// let mut diags = res.diagnostics();
    /// assert_eq!(diags.next(), Some((DiagnosticKind::Err, &diagnostic)));
    /// assert!(diags.next().is_none());
    /// ```
    pub fn new_err(diagnostic: Diagnostic) -> Self {
        Self {
            value: None,
            diagnostics: LinkedList::from([(DiagnosticKind::Err, diagnostic)]),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.value.is_some() && self.diagnostics.is_empty()
    }

    pub fn is_rec(&self) -> bool {
        self.value.is_some() && !self.diagnostics.is_empty()
    }

    pub fn is_err(&self) -> bool {
        self.value.is_none()
    }

    pub fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    pub fn into_value(self) -> Option<T> {
        self.value
    }

    pub fn diagnostics(&self) -> impl Iterator<Item = (DiagnosticKind, &Diagnostic)> {
        self.diagnostics.iter().map(|(dt, d)| (*dt, d))
    }

    pub fn into_diagnostics(self) -> impl Iterator<Item = (DiagnosticKind, Diagnostic)> {
        self.diagnostics.into_iter()
    }

    /// An _ok_ result becomes _rec_; an _err_ result stays _err_.
    pub fn add_rec_diagnostic(&mut self, diagnostic: Diagnostic) {
        self.diagnostics
            .push_back((DiagnosticKind::Rec, diagnostic));
    }

    /// Drops the contained value, the result is _err_ afterwards.
    pub fn add_err(&mut self, diagnostic: Diagnostic) {
        self.value = None;
        self.diagnostics
            .push_back((DiagnosticKind::Err, diagnostic));
    }

    /// Turns every recoverable diagnostic matching `predicate` into an error, which also makes the
    /// result _err_.
    pub fn upgrade_diagnostics<F>(&mut self, mut predicate: F)
    where
        F: FnMut(&Diagnostic) -> bool,
    {
        for (kind, diagnostic) in &mut self.diagnostics {
            if *kind == DiagnosticKind::Err {
                continue;
            }
            if predicate(diagnostic) {
                *kind = DiagnosticKind::Err;
                self.value = None;
            }
        }
    }

    #[must_use]
    pub fn map<U, F>(self, op: F) -> AggregateResult<U>
    where
        F: FnOnce(T) -> U,
    {
        AggregateResult {
            value: self.value.map(op),
            diagnostics: self.diagnostics,
        }
    }

    /// Calls `op` if the result has a value, keeping the diagnostics of both.
    #[must_use]
    pub fn and_then<U, F>(mut self, op: F) -> AggregateResult<U>
    where
        F: FnOnce(T) -> AggregateResult<U>,
    {
        match self.value {
            Some(t) => {
                let mut other = op(t);
                self.diagnostics.append(&mut other.diagnostics);
                other.diagnostics = self.diagnostics;
                other
            }
            None => AggregateResult {
                value: None,
                diagnostics: self.diagnostics,
            },
        }
    }

    /// Merges `self` into `other` in place: `f` combines the values when both have one,
    /// otherwise `other` becomes _err_. Diagnostics are always appended.
    pub fn add_to<U, F>(mut self, other: &mut AggregateResult<U>, f: F)
    where
        F: FnOnce(&mut U, T),
    {
        if let Some((u, t)) = other.value.as_mut().zip(self.value) {
            f(u, t);
        } else {
            other.value = None;
        }
        other.diagnostics.append(&mut self.diagnostics);
    }
}

/// Collects every value, keeping all diagnostics in order. One _err_ item makes the whole
/// collection _err_.
///
/// ```
/// # use kernc_lib::diagnostic::*;
/// # let diagnostic = DiagnosticBuilder::new(0..1).build_trailing_characters("L");
/// let all: AggregateResult<Vec<_>> =
///     [AggregateResult::new_ok(1), AggregateResult::new_rec(2, diagnostic)]
///         .into_iter()
///         .collect();
///
/// assert!(all.is_rec());
/// assert_eq!(all.value(), Some(&vec![1, 2]));
/// ```
impl<T> FromIterator<AggregateResult<T>> for AggregateResult<Vec<T>> {
    fn from_iter<I: IntoIterator<Item = AggregateResult<T>>>(iter: I) -> Self {
        let mut all = AggregateResult::new_ok(Vec::new());
        for res in iter {
            res.add_to(&mut all, |values, value| values.push(value));
        }
        all
    }
}
