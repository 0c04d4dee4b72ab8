use crate::parser::check_infix;
use crate::record::{Record, RecordError, Reference};
use crate::rule::{Rule, UnknownRule};
use crate::verifier::{first_failure, verify_proof, Failure};
use std::fmt;
use thiserror::Error;
use tracing::debug;

/// A line rejected before it enters a proof.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum LineError {
    #[error("Invalid statement `{0}`.")]
    InvalidStatement(String),
    #[error("Invalid proof rule `{0}`.")]
    InvalidRule(String),
    #[error("Invalid line number(s): {0}.")]
    InvalidLineReference(String),
    #[error("Unreadable line: {0}.")]
    Unreadable(#[from] RecordError),
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProofLine {
    pub statement: String,
    pub rule: Rule,
    /// 1-based numbers of earlier lines.
    pub refs: Vec<usize>,
}

/// Lines that have each passed [`ProofLine::validate`] at their position.
#[derive(Clone, Debug, Default)]
pub struct Proof {
    lines: Vec<ProofLine>,
}

impl ProofLine {
    pub fn new(statement: impl Into<String>, rule: Rule, refs: Vec<usize>) -> Self {
        Self {
            statement: statement.into(),
            rule,
            refs,
        }
    }

    /// Builds the line numbered `number` from its record. The statement is
    /// checked first, then the rule, then the references.
    pub fn from_record(record: Record, number: usize) -> Result<Self, LineError> {
        let Record {
            statement,
            rule,
            refs,
        } = record;
        if !check_infix(&statement) {
            return Err(LineError::InvalidStatement(statement));
        }
        let rule: Rule = rule
            .parse()
            .map_err(|UnknownRule(rule)| LineError::InvalidRule(rule))?;
        let line = Self::new(statement, rule, line_numbers(&refs)?);
        line.check_refs(number)?;
        Ok(line)
    }

    /// Checks the line for position `number` in a proof.
    pub fn validate(&self, number: usize) -> Result<(), LineError> {
        if !check_infix(&self.statement) {
            return Err(LineError::InvalidStatement(self.statement.clone()));
        }
        self.check_refs(number)
    }

    fn check_refs(&self, number: usize) -> Result<(), LineError> {
        let arity = self.rule.arity();
        if self.refs.len() != arity {
            return Err(LineError::InvalidLineReference(format!(
                "{} refers to {arity} line(s), found {}",
                self.rule,
                self.refs.len()
            )));
        }
        if let Some(n) = self.refs.iter().find(|&&n| n == 0 || n >= number) {
            return Err(LineError::InvalidLineReference(format!(
                "line {n} is not before line {number}"
            )));
        }
        Ok(())
    }
}

/// Trailing blank fields are ignored, any other non-number is an error.
fn line_numbers(refs: &[Reference]) -> Result<Vec<usize>, LineError> {
    let mut refs = refs;
    while let [rest @ .., Reference::Blank] = refs {
        refs = rest;
    }
    if refs.len() > 2 {
        return Err(LineError::InvalidLineReference(format!(
            "{} references given",
            refs.len()
        )));
    }
    refs.iter()
        .map(|r| match r {
            Reference::Line(n) => Ok(*n),
            Reference::Blank => Err(LineError::InvalidLineReference(
                "blank reference".into(),
            )),
            Reference::Garbled(s) => Err(LineError::InvalidLineReference(format!(
                "`{s}` is not a line number"
            ))),
        })
        .collect()
}

impl fmt::Display for ProofLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {}", self.statement, self.rule)?;
        for n in &self.refs {
            write!(f, " / {n}")?;
        }
        Ok(())
    }
}

impl Proof {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[ProofLine] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The number the next pushed line will get.
    pub fn next_number(&self) -> usize {
        self.lines.len() + 1
    }

    pub fn push(&mut self, line: ProofLine) -> Result<(), LineError> {
        line.validate(self.next_number())?;
        self.lines.push(line);
        Ok(())
    }

    /// Reads a `statement / rule / ref / ref` record as the next line.
    pub fn push_record(&mut self, s: &str) -> Result<(), LineError> {
        let number = self.next_number();
        let line = Record::parse(s)
            .map_err(LineError::from)
            .and_then(|record| ProofLine::from_record(record, number))
            .map_err(|e| {
                debug!(number, record = s, error = %e, "rejected proof line");
                e
            })?;
        self.lines.push(line);
        Ok(())
    }

    pub fn verify(&self) -> bool {
        verify_proof(&self.lines)
    }

    pub fn first_failure(&self) -> Option<Failure> {
        first_failure(&self.lines)
    }
}

impl fmt::Display for Proof {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, line) in self.lines.iter().enumerate() {
            writeln!(f, "{}. {line}", i + 1)?;
        }
        Ok(())
    }
}
