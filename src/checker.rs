use crate::formula::{Formula, Token};
use crate::parser::{parse, to_postfix, ParseError, Postfix};
use crate::proof::ProofLine;
use crate::rule::Rule;
use thiserror::Error;

/// Why a line is not a valid application of its rule.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum Mismatch {
    #[error("{rule} refers to {expected} line(s), found {found}")]
    Arity {
        rule: Rule,
        expected: usize,
        found: usize,
    },
    #[error("line {0} is not an earlier line")]
    UnknownLine(usize),
    #[error("`{statement}` cannot be parsed")]
    Unparsable {
        statement: String,
        source: ParseError,
    },
    #[error("the main connective of `{statement}` is not `{expected}`")]
    WrongConnective { statement: String, expected: Token },
    #[error("`{statement}` does not follow by {rule}")]
    NotDerived { statement: String, rule: Rule },
}

/// Returns true if the line is a valid application of its rule to the
/// referenced lines in `prior`.
pub fn check_line(line: &ProofLine, prior: &[ProofLine]) -> bool {
    diagnose_line(line, prior).is_ok()
}

/// Like [`check_line`], but says which check failed.
///
/// `prior` holds the lines before `line`; references are 1-based indices
/// into it. Antecedent statements are trusted to be well-formed.
pub fn diagnose_line(line: &ProofLine, prior: &[ProofLine]) -> Result<(), Mismatch> {
    use Rule::*;
    use Token::{And, Implies, Not, Or};

    let s = line.statement.as_str();
    let derived = match line.rule {
        Premise => true,
        AndIntro => {
            let [a, b] = antecedents(line, prior)?;
            to_postfix(s).is_concat(&[&to_postfix(a), &to_postfix(b)], &[And])
        }
        AndElim1 => {
            let [a] = antecedents(line, prior)?;
            child_matches(a, And, Formula::left, s)?
        }
        AndElim2 => {
            let [a] = antecedents(line, prior)?;
            child_matches(a, And, Formula::right, s)?
        }
        OrIntro1 => {
            let [a] = antecedents(line, prior)?;
            child_matches(s, Or, Formula::left, a)?
        }
        OrIntro2 => {
            let [a] = antecedents(line, prior)?;
            child_matches(s, Or, Formula::right, a)?
        }
        ImpliesElim => {
            // a is the conditional, b its antecedent
            let [a, b] = antecedents(line, prior)?;
            to_postfix(a).is_concat(&[&to_postfix(b), &to_postfix(s)], &[Implies])
        }
        DoubleNegIntro => {
            let [a] = antecedents(line, prior)?;
            to_postfix(s).is_concat(&[&to_postfix(a)], &[Not, Not])
        }
        DoubleNegElim => {
            let [a] = antecedents(line, prior)?;
            to_postfix(a).is_concat(&[&to_postfix(s)], &[Not, Not])
        }
        ModusTollens => {
            // a is the conditional, b the negated consequent
            let [a, b] = antecedents(line, prior)?;
            let p = negated(s)?;
            let q = negated(b)?;
            to_postfix(a).is_concat(&[&p, &q], &[Implies])
        }
    };

    if derived {
        Ok(())
    } else {
        Err(Mismatch::NotDerived {
            statement: s.into(),
            rule: line.rule,
        })
    }
}

/// Looks up the statements of the referenced lines.
fn antecedents<'a, const N: usize>(
    line: &ProofLine,
    prior: &'a [ProofLine],
) -> Result<[&'a str; N], Mismatch> {
    let arity = Mismatch::Arity {
        rule: line.rule,
        expected: N,
        found: line.refs.len(),
    };
    if line.refs.len() != N {
        return Err(arity);
    }
    let statements = line
        .refs
        .iter()
        .map(|&n| {
            n.checked_sub(1)
                .and_then(|i| prior.get(i))
                .map(|l| l.statement.as_str())
                .ok_or(Mismatch::UnknownLine(n))
        })
        .collect::<Result<Vec<_>, _>>()?;
    statements.try_into().map_err(|_| arity)
}

fn tree(statement: &str) -> Result<Formula, Mismatch> {
    parse(statement).map_err(|source| Mismatch::Unparsable {
        statement: statement.into(),
        source,
    })
}

/// Checks that `statement` has `connective` at its root and that the chosen
/// child renders exactly as `expected`.
fn child_matches(
    statement: &str,
    connective: Token,
    child: fn(&Formula) -> Option<&Formula>,
    expected: &str,
) -> Result<bool, Mismatch> {
    let fml = tree(statement)?;
    if fml.root() != connective {
        return Err(Mismatch::WrongConnective {
            statement: statement.into(),
            expected: connective,
        });
    }
    Ok(child(&fml).is_some_and(|p| p.to_string() == expected))
}

/// The postfix form of `statement` with its leading negation stripped.
fn negated(statement: &str) -> Result<Postfix, Mismatch> {
    match &tree(statement)? {
        Formula::Not(p) => Ok(p.to_postfix()),
        _ => Err(Mismatch::WrongConnective {
            statement: statement.into(),
            expected: Token::Not,
        }),
    }
}
