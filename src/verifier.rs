use crate::checker::{diagnose_line, Mismatch};
use crate::proof::ProofLine;
use crate::rule::Rule;
use std::fmt;
use tracing::debug;

/// The first line of a proof that does not follow from its references.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Failure {
    /// 1-based.
    pub number: usize,
    pub reason: Mismatch,
}

/// Returns true if every line is a valid application of its rule.
pub fn verify_proof(lines: &[ProofLine]) -> bool {
    first_failure(lines).is_none()
}

/// Checks the lines in order and stops at the first one that fails.
pub fn first_failure(lines: &[ProofLine]) -> Option<Failure> {
    for (i, line) in lines.iter().enumerate() {
        let number = i + 1;
        if line.rule == Rule::Premise {
            continue;
        }
        if let Err(reason) = diagnose_line(line, &lines[..i]) {
            debug!(number, line = %line, %reason, "line does not follow");
            return Some(Failure { number, reason });
        }
        debug!(number, rule = %line.rule, "line checked");
    }
    None
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.number, self.reason)
    }
}
