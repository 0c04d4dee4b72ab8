use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Inference rules of the proof system.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Rule {
    Premise,
    AndIntro,
    AndElim1,
    AndElim2,
    OrIntro1,
    OrIntro2,
    /// `>e`, also written `MP`.
    ImpliesElim,
    DoubleNegIntro,
    DoubleNegElim,
    ModusTollens,
}

#[derive(Clone, Debug, Eq, PartialEq, Error)]
#[error("unknown proof rule `{0}`")]
pub struct UnknownRule(pub String);

impl Rule {
    pub const ALL: [Rule; 10] = [
        Rule::Premise,
        Rule::AndIntro,
        Rule::AndElim1,
        Rule::AndElim2,
        Rule::OrIntro1,
        Rule::OrIntro2,
        Rule::ImpliesElim,
        Rule::DoubleNegIntro,
        Rule::DoubleNegElim,
        Rule::ModusTollens,
    ];

    /// The number of earlier lines the rule refers to.
    pub fn arity(self) -> usize {
        use Rule::*;
        match self {
            Premise => 0,
            AndElim1 | AndElim2 | OrIntro1 | OrIntro2 | DoubleNegIntro | DoubleNegElim => 1,
            AndIntro | ImpliesElim | ModusTollens => 2,
        }
    }

    pub fn token(self) -> &'static str {
        use Rule::*;
        match self {
            Premise => "P",
            AndIntro => "^i",
            AndElim1 => "^e1",
            AndElim2 => "^e2",
            OrIntro1 => "Vi1",
            OrIntro2 => "Vi2",
            ImpliesElim => ">e",
            DoubleNegIntro => "~~i",
            DoubleNegElim => "~~e",
            ModusTollens => "MT",
        }
    }
}

impl FromStr for Rule {
    type Err = UnknownRule;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "MP" {
            return Ok(Rule::ImpliesElim);
        }
        Rule::ALL
            .into_iter()
            .find(|rule| rule.token() == s)
            .ok_or_else(|| UnknownRule(s.into()))
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str() {
        for rule in Rule::ALL {
            assert_eq!(rule.token().parse(), Ok(rule));
        }
        assert_eq!("MP".parse(), Ok(Rule::ImpliesElim));
        assert_eq!("mp".parse::<Rule>(), Err(UnknownRule("mp".into())));
        assert_eq!("".parse::<Rule>(), Err(UnknownRule("".into())));
        assert_eq!("^e".parse::<Rule>(), Err(UnknownRule("^e".into())));
    }

    #[test]
    fn test_arity() {
        assert_eq!(Rule::Premise.arity(), 0);
        assert_eq!(Rule::AndElim2.arity(), 1);
        assert_eq!(Rule::DoubleNegElim.arity(), 1);
        assert_eq!(Rule::ImpliesElim.arity(), 2);
        assert_eq!(Rule::ModusTollens.arity(), 2);
    }

    #[test]
    fn test_display() {
        assert_eq!(Rule::OrIntro1.to_string(), "Vi1");
        assert_eq!("MP".parse::<Rule>().unwrap().to_string(), ">e");
    }
}
