use unicode_normalization::UnicodeNormalization;

/// A proof line as typed: `statement / rule / ref / ref`.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Record {
    pub statement: String,
    pub rule: String,
    pub refs: Vec<Reference>,
}

/// One reference field of a record.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Reference {
    Blank,
    Line(usize),
    Garbled(String),
}

pub type RecordError = peg::error::ParseError<peg::str::LineCol>;

peg::parser! {
    grammar record_parser() for str {
        rule blank() = quiet!{[' ' | '\t' | '\r' | '\n']*}

        rule end_of_field() = &("/" / ![_])

        // control characters other than blanks make a record unreadable
        rule field_char() = [c if c != '/' && (c.is_whitespace() || !c.is_control())]

        // blanks inside a field are dropped
        rule text() -> String
            = s:$(field_char()*) { s.chars().filter(|c| !c.is_whitespace()).collect() }

        rule number() -> usize
            = n:$(['0'..='9']+) {? n.parse().or(Err("line number")) }

        rule reference() -> Reference
            = blank() n:number() blank() end_of_field() { Reference::Line(n) }
            / s:text() {
                if s.is_empty() {
                    Reference::Blank
                } else {
                    Reference::Garbled(s)
                }
            }

        pub rule record() -> Record
            = statement:text() r:("/" t:text() { t })? refs:("/" t:reference() { t })* {
                Record {
                    statement,
                    rule: r.unwrap_or_default(),
                    refs,
                }
            }
    }
}

impl Record {
    /// Splits a record into its fields after NFKC normalization. Fails on
    /// control characters other than blanks.
    pub fn parse(s: &str) -> Result<Self, RecordError> {
        let s: String = s.nfkc().collect();
        record_parser::record(&s)
    }
}
