//! Folds scalar statements, one per line.
//!
//! A statement is a single literal with at most one operator:
//!
//! ```text
//! 0x1F                // a literal
//! ~0b1010             // a prefix operator: ++ -- ! ~ (and - + when signs aren't lexed)
//! 255u++              // a postfix operator: ++ --
//! 3.5 * 2             // a binary operator
//! 200 <<= 2           // a compound assignment, folded to the assigned value
//! ```
//!
//! Empty lines and lines starting with `//` are skipped.

use crate::{
    diagnostic::{AggregateResult, Diagnostic, DiagnosticBuilder, Span},
    value::{self, BinaryOp, UnaryOp, Value, ValueError},
};

/// The value a statement folded to.
#[derive(Debug, Clone, PartialEq)]
pub struct FoldedLine {
    pub span: Span,
    pub source: String,
    pub value: Value,
}

/// With `include_sign` a leading `-` or `+` is part of a literal, otherwise it is an operator.
pub fn fold(source: &str, include_sign: bool) -> AggregateResult<Vec<FoldedLine>> {
    Folder::new(include_sign).fold(source)
}

const OPERATOR_CHARS: &str = "+-*/%&|^<>=!~?:";

#[derive(Debug, Clone, Copy)]
enum Prefix {
    Increment,
    Decrement,
    Unary(UnaryOp),
}

/// A statement and how much of it is left to parse.
struct Statement<'a> {
    text: &'a str,
    start: usize,
    rest: &'a str,
}

impl<'a> Statement<'a> {
    fn new(text: &'a str, start: usize) -> Self {
        Self {
            text,
            start,
            rest: text,
        }
    }

    fn offset(&self) -> usize {
        self.start + self.text.len() - self.rest.len()
    }

    fn span(&self) -> Span {
        Span::from(self.start..self.start + self.text.len())
    }

    fn skip_whitespace(&mut self) {
        self.rest = self.rest.trim_start();
    }

    fn eat(&mut self, prefix: &str) -> bool {
        match self.rest.strip_prefix(prefix) {
            Some(rest) => {
                self.rest = rest;
                true
            }
            None => false,
        }
    }

    /// The text up to the next whitespace.
    fn word(&self) -> (&'a str, Span) {
        let word = self.rest.split(char::is_whitespace).next().unwrap_or_default();
        let start = self.offset();
        (word, Span::from(start..start + word.len()))
    }

    fn literal(&mut self, include_sign: bool) -> Result<Value, Diagnostic> {
        self.skip_whitespace();
        let value = value::load(&mut self.rest, include_sign);
        if value.is_nan() {
            let (word, span) = self.word();
            return Err(DiagnosticBuilder::new(span).build_invalid_literal(word));
        }
        Ok(value)
    }
}

struct Folder {
    include_sign: bool,
}

impl Folder {
    fn new(include_sign: bool) -> Self {
        Folder { include_sign }
    }

    fn fold(&self, source: &str) -> AggregateResult<Vec<FoldedLine>> {
        let mut line_start = 0;
        let mut folded = Vec::new();
        for line in source.split_inclusive('\n') {
            let start = line_start;
            line_start += line.len();

            let text = line.trim();
            if text.is_empty() || text.starts_with("//") {
                continue;
            }
            let start = start + line.len() - line.trim_start().len();
            folded.push(self.fold_statement(text, start));
        }
        folded.into_iter().collect()
    }

    fn fold_statement(&self, text: &str, start: usize) -> AggregateResult<FoldedLine> {
        let mut statement = Statement::new(text, start);
        self.fold_expression(&mut statement).and_then(|value| {
            let mut res = AggregateResult::new_ok(FoldedLine {
                span: statement.span(),
                source: text.to_owned(),
                value,
            });
            statement.skip_whitespace();
            if !statement.rest.is_empty() {
                let span = Span::from(statement.offset()..statement.start + text.len());
                res.add_rec_diagnostic(
                    DiagnosticBuilder::new(span).build_trailing_characters(statement.rest),
                );
            }
            res
        })
    }

    fn fold_expression(&self, statement: &mut Statement) -> AggregateResult<Value> {
        let prefix = self.prefix(statement);
        let mut operand = match statement.literal(self.include_sign) {
            Ok(value) => value,
            Err(diagnostic) => return AggregateResult::new_err(diagnostic),
        };

        let value = match prefix {
            Some(Prefix::Increment) => operand.increment(),
            Some(Prefix::Decrement) => operand.decrement(),
            Some(Prefix::Unary(op)) => Value::unary(op, operand),
            None => Ok(operand),
        };
        let value = match value {
            Ok(value) => value,
            Err(err) => {
                return AggregateResult::new_err(
                    DiagnosticBuilder::new(statement.span()).build_value_error(&err),
                )
            }
        };

        let value = match self.fold_tail(statement, value) {
            Ok(value) => value,
            Err(diagnostic) => return AggregateResult::new_err(diagnostic),
        };
        AggregateResult::new_ok(value)
    }

    fn prefix(&self, statement: &mut Statement) -> Option<Prefix> {
        statement.skip_whitespace();
        let prefix = if statement.eat("++") {
            Prefix::Increment
        } else if statement.eat("--") {
            Prefix::Decrement
        } else if statement.eat("!") {
            Prefix::Unary(UnaryOp::Not)
        } else if statement.eat("~") {
            Prefix::Unary(UnaryOp::Tilde)
        } else if !self.include_sign && statement.eat("-") {
            Prefix::Unary(UnaryOp::Negative)
        } else if !self.include_sign && statement.eat("+") {
            Prefix::Unary(UnaryOp::Positive)
        } else {
            return None;
        };
        Some(prefix)
    }

    /// Applies a postfix or binary operator following `lhs`, if there is one.
    fn fold_tail(&self, statement: &mut Statement, mut lhs: Value) -> Result<Value, Diagnostic> {
        let span = statement.span();
        let value_error = |err: ValueError| DiagnosticBuilder::new(span).build_value_error(&err);

        statement.skip_whitespace();
        if statement.eat("++") {
            return lhs.post_increment().map_err(value_error);
        }
        if statement.eat("--") {
            return lhs.post_decrement().map_err(value_error);
        }

        let Some((op, is_assign)) = self.binary_op(statement)? else {
            return Ok(lhs);
        };
        let rhs = statement.literal(self.include_sign)?;
        if is_assign {
            lhs.assign(op, rhs).map_err(value_error)
        } else {
            Value::binary(op, lhs, rhs).map_err(value_error)
        }
    }

    /// Eats the longest binary operator (or compound assignment) at the cursor.
    ///
    /// Text not starting with an operator character isn't an operator and is left alone.
    fn binary_op(&self, statement: &mut Statement) -> Result<Option<(BinaryOp, bool)>, Diagnostic> {
        if !statement.rest.starts_with(|c: char| OPERATOR_CHARS.contains(c)) {
            return Ok(None);
        }

        let mut best: Option<(BinaryOp, bool, usize)> = None;
        for op in BinaryOp::ALL {
            let symbol = op.symbol();
            if !statement.rest.starts_with(symbol) {
                continue;
            }
            let is_assign = op.has_assign_form() && statement.rest[symbol.len()..].starts_with('=');
            let len = symbol.len() + usize::from(is_assign);
            if best.map_or(true, |(_, _, best_len)| len > best_len) {
                best = Some((op, is_assign, len));
            }
        }

        match best {
            Some((op, is_assign, len)) => {
                statement.rest = &statement.rest[len..];
                Ok(Some((op, is_assign)))
            }
            None => {
                let start = statement.offset();
                let len = statement
                    .rest
                    .find(|c: char| !OPERATOR_CHARS.contains(c))
                    .unwrap_or(statement.rest.len());
                let operator = &statement.rest[..len];
                Err(DiagnosticBuilder::new(start..start + len).build_unknown_operator(operator))
            }
        }
    }
}
