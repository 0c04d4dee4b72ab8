use crate::formula::{Formula, Token, LEFT, RIGHT};
use itertools::Itertools;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum ParseError {
    #[error("empty formula")]
    Empty,
    #[error("missing operand for `{symbol}` at {position}")]
    MissingOperand { symbol: char, position: usize },
    #[error("unmatched `{symbol}` at {position}")]
    StrayBracket { symbol: char, position: usize },
    #[error("{0} operands are not connected")]
    DanglingOperands(usize),
    #[error("`{0}` is not a fully parenthesized formula")]
    NotCanonical(String),
}

/// Tokens of a formula in postfix order.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Postfix(Vec<Token>);

impl Postfix {
    /// Returns true if `self` is `parts` laid end to end, followed by `ops`.
    pub fn is_concat(&self, parts: &[&Postfix], ops: &[Token]) -> bool {
        self.0.iter().eq(parts
            .iter()
            .flat_map(|p| p.0.iter())
            .chain(ops.iter()))
    }

    /// Builds the tree. An empty sequence gives `Ok(None)`.
    pub fn to_tree(&self) -> Result<Option<Formula>, ParseError> {
        let mut stack: Vec<Formula> = Vec::new();
        for (position, &token) in self.0.iter().enumerate() {
            let missing = ParseError::MissingOperand {
                symbol: token.symbol(),
                position,
            };
            let fml = match token {
                Token::Atom(c) => Formula::Atom(c),
                Token::Not => {
                    let p = stack.pop().ok_or(missing)?;
                    Formula::Not(Box::new(p))
                }
                Token::And | Token::Or | Token::Implies => {
                    let q = Box::new(stack.pop().ok_or_else(|| missing.clone())?);
                    let p = Box::new(stack.pop().ok_or(missing)?);
                    match token {
                        Token::And => Formula::And(p, q),
                        Token::Or => Formula::Or(p, q),
                        _ => Formula::Implies(p, q),
                    }
                }
                Token::Left | Token::Right => {
                    return Err(ParseError::StrayBracket {
                        symbol: token.symbol(),
                        position,
                    });
                }
            };
            stack.push(fml);
        }
        match stack.len() {
            0 | 1 => Ok(stack.pop()),
            n => Err(ParseError::DanglingOperands(n)),
        }
    }
}

impl fmt::Display for Postfix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.iter().format(""))
    }
}

/// Converts infix text to postfix. Malformed text is converted as far as it
/// goes; nothing is rejected here.
pub fn to_postfix(infix: &str) -> Postfix {
    let mut postfix = Vec::with_capacity(infix.len());
    let mut stack: Vec<Token> = Vec::new();

    for token in infix.chars().map(Token::from) {
        if token.is_operand() {
            postfix.push(token);
        } else {
            stack.push(token);
        }

        if stack.last() == Some(&Token::Right) {
            stack.pop();
            while let Some(top) = stack.pop() {
                if top == Token::Left {
                    break;
                }
                postfix.push(top);
            }
        }

        // a negation binds as soon as its operand is complete
        if token == Token::Not {
            continue;
        }
        while stack.last() == Some(&Token::Not) {
            stack.pop();
            postfix.push(Token::Not);
        }
    }

    postfix.extend(stack.into_iter().rev());
    Postfix(postfix)
}

/// Parses infix text into a tree without checking that the text is canonical.
pub fn parse(infix: &str) -> Result<Formula, ParseError> {
    to_postfix(infix).to_tree()?.ok_or(ParseError::Empty)
}

/// Returns true if the text is a well-formed, fully parenthesized formula,
/// i.e. its brackets balance and it survives a postfix round trip unchanged.
pub fn check_infix(infix: &str) -> bool {
    let depth: isize = infix
        .chars()
        .map(|c| match c {
            LEFT => 1,
            RIGHT => -1,
            _ => 0,
        })
        .sum();
    if depth != 0 {
        return false;
    }
    matches!(to_postfix(infix).to_tree(), Ok(Some(fml)) if fml.to_string() == infix)
}

impl Formula {
    /// The postfix form of the rendered formula.
    pub fn to_postfix(&self) -> Postfix {
        to_postfix(&self.to_string())
    }
}

impl FromStr for Formula {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(ParseError::Empty);
        }
        if !check_infix(s) {
            return Err(ParseError::NotCanonical(s.into()));
        }
        parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_snapshot;

    fn postfix(s: &str) -> String {
        to_postfix(s).to_string()
    }

    #[test]
    fn test_to_postfix() {
        assert_eq!(postfix("P"), "P");
        assert_eq!(postfix("(A^B)"), "AB^");
        assert_eq!(postfix("((A^B)VC)"), "AB^CV");
        assert_eq!(postfix("(A>(BVC))"), "ABCV>");
        assert_eq!(postfix("~A"), "A~");
        assert_eq!(postfix("~~A"), "A~~");
        assert_eq!(postfix("~(A^B)"), "AB^~");
        assert_eq!(postfix("(~A^B)"), "A~B^");
        assert_eq!(postfix("(~~A>~(BVC))"), "A~~BCV~>");
        assert_eq!(postfix(""), "");
    }

    #[test]
    fn test_to_postfix_malformed() {
        assert_eq!(postfix("A^B"), "AB^");
        assert_eq!(postfix("A~"), "A~");
        assert_eq!(postfix("(A)"), "A");
        assert_eq!(postfix("~(~A)"), "A~~");
        assert_eq!(postfix("(^A)"), "A^");
        assert_eq!(postfix("A)"), "A");
        assert_eq!(postfix("(A^B"), "AB^(");
    }

    #[test]
    fn test_to_tree() {
        use Formula::*;
        assert_eq!(to_postfix("").to_tree(), Ok(None));
        assert_eq!(
            to_postfix("(P>~Q)").to_tree(),
            Ok(Some(Implies(
                Box::new(Atom('P')),
                Box::new(Not(Box::new(Atom('Q'))))
            )))
        );
        assert_eq!(
            to_postfix("(^A)").to_tree(),
            Err(ParseError::MissingOperand {
                symbol: '^',
                position: 1
            })
        );
        assert_eq!(
            to_postfix("~").to_tree(),
            Err(ParseError::MissingOperand {
                symbol: '~',
                position: 0
            })
        );
        assert_eq!(
            to_postfix("(A^B").to_tree(),
            Err(ParseError::StrayBracket {
                symbol: '(',
                position: 3
            })
        );
        assert_eq!(to_postfix("AB").to_tree(), Err(ParseError::DanglingOperands(2)));
    }

    #[test]
    fn test_check_infix() {
        for s in ["A", "(A^B)", "~A", "~~A", "(A>B)", "((A^B)VC)", "~(PVv)", "(~A>~~(B^C))"] {
            assert!(check_infix(s), "{s}");
        }
        for s in [
            "", "A^B", "(A^B", "A~", "(A)", "~(~A)", "((A^B))", "(^A)", "~", "()", "AB", "(A^B)C",
            ")A(", "(A^B^C)",
        ] {
            assert!(!check_infix(s), "{s}");
        }
    }

    #[test]
    fn test_check_infix_deep_nesting() {
        let depth = 50_000;
        assert!(check_infix(&("~".repeat(depth) + "P")));
        assert!(check_infix(&("(".repeat(depth) + "P" + &"^P)".repeat(depth))));
        assert!(!check_infix(&("(".repeat(depth) + "P" + &"^P".repeat(depth))));
        assert_eq!(
            parse(&("~".repeat(depth) + "P")).unwrap().to_postfix().to_string(),
            "P".to_string() + &"~".repeat(depth)
        );
    }

    #[test]
    fn test_round_trip() {
        for s in ["P", "~~~P", "((P^Q)V~(R>S))", "~((a^b)>~c)"] {
            let fml = parse(s).unwrap();
            let rendered = fml.to_string();
            assert_eq!(rendered, s);
            assert_eq!(parse(&rendered).unwrap(), fml);
            assert_eq!(parse(&rendered).unwrap().to_string(), rendered);
        }
    }

    #[test]
    fn test_canonical_form_is_fixed_point() {
        // non-canonical text settles after one rendering
        for s in ["A^B", "~(~A)", "(A)", "((A>B))"] {
            let once = parse(s).unwrap().to_string();
            assert!(check_infix(&once), "{s}");
            assert_eq!(parse(&once).unwrap().to_string(), once);
        }
    }

    #[test]
    fn test_from_str() {
        assert_eq!(
            "(P^Q)".parse::<Formula>(),
            Ok(Formula::And(
                Box::new(Formula::Atom('P')),
                Box::new(Formula::Atom('Q'))
            ))
        );
        assert_eq!("".parse::<Formula>(), Err(ParseError::Empty));
        assert_snapshot!("P^Q".parse::<Formula>().unwrap_err().to_string(), @"`P^Q` is not a fully parenthesized formula");
    }

    #[test]
    fn test_formula_to_postfix() {
        let fml = parse("(~P>(QVR))").unwrap();
        assert_eq!(fml.to_postfix().to_string(), "P~QRV>");
        assert_eq!(fml.to_postfix(), to_postfix("(~P>(QVR))"));
    }

    #[test]
    fn test_is_concat() {
        let a = to_postfix("(A^B)");
        let b = to_postfix("~C");
        assert!(to_postfix("((A^B)V~C)").is_concat(&[&a, &b], &[Token::Or]));
        assert!(!to_postfix("(~CV(A^B))").is_concat(&[&a, &b], &[Token::Or]));
        assert!(to_postfix("~~(A^B)").is_concat(&[&a], &[Token::Not, Token::Not]));
    }
}
