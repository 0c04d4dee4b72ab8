use std::{fmt, mem};

pub const LEFT: char = '(';
pub const RIGHT: char = ')';
pub const NOT: char = '~';
pub const AND: char = '^';
pub const OR: char = 'V';
pub const IMPLIES: char = '>';

/// A single classified character of a formula.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Token {
    Atom(char),
    Not,
    And,
    Or,
    Implies,
    Left,
    Right,
}

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum Formula {
    Atom(char),
    Not(Box<Formula>),
    And(Box<Formula>, Box<Formula>),
    Or(Box<Formula>, Box<Formula>),
    Implies(Box<Formula>, Box<Formula>),
}

impl From<char> for Token {
    fn from(c: char) -> Self {
        use Token::*;
        match c {
            LEFT => Left,
            RIGHT => Right,
            NOT => Not,
            AND => And,
            OR => Or,
            IMPLIES => Implies,
            c => Atom(c),
        }
    }
}

impl Token {
    pub fn symbol(self) -> char {
        use Token::*;
        match self {
            Atom(c) => c,
            Not => NOT,
            And => AND,
            Or => OR,
            Implies => IMPLIES,
            Left => LEFT,
            Right => RIGHT,
        }
    }

    pub fn is_operand(self) -> bool {
        matches!(self, Token::Atom(_))
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl Formula {
    /// The token at the root of the tree.
    pub fn root(&self) -> Token {
        use Formula::*;
        match self {
            Atom(c) => Token::Atom(*c),
            Not(_) => Token::Not,
            And(..) => Token::And,
            Or(..) => Token::Or,
            Implies(..) => Token::Implies,
        }
    }

    pub fn left(&self) -> Option<&Formula> {
        use Formula::*;
        match self {
            And(p, _) | Or(p, _) | Implies(p, _) => Some(p),
            Atom(_) | Not(_) => None,
        }
    }

    /// The right child. The operand of a negation is stored on the right.
    pub fn right(&self) -> Option<&Formula> {
        use Formula::*;
        match self {
            Not(p) | And(_, p) | Or(_, p) | Implies(_, p) => Some(p),
            Atom(_) => None,
        }
    }
}

impl fmt::Display for Formula {
    /// Renders without recursion; nesting is bounded only by the input length.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        enum Item<'a> {
            Fml(&'a Formula),
            Symbol(char),
        }

        use Formula::*;
        let mut stack = vec![Item::Fml(self)];
        while let Some(item) = stack.pop() {
            let fml = match item {
                Item::Symbol(c) => {
                    write!(f, "{c}")?;
                    continue;
                }
                Item::Fml(fml) => fml,
            };
            match fml {
                Atom(c) => write!(f, "{c}")?,
                Not(p) => {
                    write!(f, "{NOT}")?;
                    stack.push(Item::Fml(p));
                }
                And(p, q) | Or(p, q) | Implies(p, q) => {
                    write!(f, "{LEFT}")?;
                    stack.push(Item::Symbol(RIGHT));
                    stack.push(Item::Fml(q));
                    stack.push(Item::Symbol(fml.root().symbol()));
                    stack.push(Item::Fml(p));
                }
            }
        }
        Ok(())
    }
}

impl Formula {
    /// Moves the children out, leaving atoms behind.
    fn take_children(&mut self, out: &mut Vec<Formula>) {
        use Formula::*;
        match self {
            Atom(_) => {}
            Not(p) => out.push(mem::replace(&mut **p, Atom(NOT))),
            And(p, q) | Or(p, q) | Implies(p, q) => {
                out.push(mem::replace(&mut **p, Atom(LEFT)));
                out.push(mem::replace(&mut **q, Atom(RIGHT)));
            }
        }
    }
}

impl Drop for Formula {
    // the derived drop recurses once per level
    fn drop(&mut self) {
        let mut stack = Vec::new();
        self.take_children(&mut stack);
        while let Some(mut fml) = stack.pop() {
            fml.take_children(&mut stack);
        }
    }
}
