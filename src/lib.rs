pub mod checker;
pub mod formula;
pub mod parser;
pub mod proof;
pub mod record;
pub mod rule;
pub mod verifier;

pub use checker::{check_line, diagnose_line, Mismatch};
pub use formula::{Formula, Token};
pub use parser::{check_infix, parse, to_postfix, ParseError, Postfix};
pub use proof::{LineError, Proof, ProofLine};
pub use rule::Rule;
pub use verifier::{first_failure, verify_proof, Failure};

use std::{fs, io, path::Path};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("line {number}: {source}")]
    Line { number: usize, source: LineError },
}

/// Reads a proof with one `statement / rule / ref / ref` record per line.
/// Empty lines and lines starting with `#` are skipped.
pub fn parse_proof(s: &str) -> Result<Proof, Error> {
    let mut proof = Proof::new();
    for (i, record) in s.lines().enumerate() {
        let record = record.trim();
        if record.is_empty() || record.starts_with('#') {
            continue;
        }
        proof.push_record(record).map_err(|source| Error::Line {
            number: i + 1,
            source,
        })?;
    }
    Ok(proof)
}

pub fn read_proof(path: impl AsRef<Path>) -> Result<Proof, Error> {
    parse_proof(&fs::read_to_string(path)?)
}
