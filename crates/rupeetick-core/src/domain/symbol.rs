use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::ValidationError;

const MAX_SYMBOL_LEN: usize = 12;

/// Ticker symbol as typed at the command line, trimmed and uppercased.
///
/// Profile lookups are case-sensitive, so user input goes through this type
/// before it reaches the generator. Library callers may still pass raw
/// strings straight to [`crate::SeriesGenerator`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Symbol(String);

impl Symbol {
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let normalized = input.trim().to_ascii_uppercase();
        let mut chars = normalized.chars();

        match chars.next() {
            None => return Err(ValidationError::EmptySymbol),
            Some(first) if !first.is_ascii_alphabetic() => {
                return Err(ValidationError::SymbolInvalidStart { ch: first });
            }
            Some(_) => {}
        }

        let len = normalized.chars().count();
        if len > MAX_SYMBOL_LEN {
            return Err(ValidationError::SymbolTooLong {
                len,
                max: MAX_SYMBOL_LEN,
            });
        }

        if let Some((index, ch)) = normalized
            .char_indices()
            .find(|(_, ch)| !(ch.is_ascii_alphanumeric() || *ch == '.' || *ch == '-'))
        {
            return Err(ValidationError::SymbolInvalidChar { ch, index });
        }

        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Symbol {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Symbol> for String {
    fn from(value: Symbol) -> Self {
        value.0
    }
}

impl AsRef<str> for Symbol {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uppercases_lowercase_tickers() {
        let parsed = Symbol::parse("  nflx ").expect("symbol should parse");
        assert_eq!(parsed.as_str(), "NFLX");
    }

    #[test]
    fn keeps_share_class_suffix() {
        let parsed = Symbol::parse("brk.b").expect("symbol should parse");
        assert_eq!(parsed.as_str(), "BRK.B");
    }

    #[test]
    fn rejects_blank_input() {
        assert_eq!(Symbol::parse("   "), Err(ValidationError::EmptySymbol));
    }

    #[test]
    fn rejects_digit_prefix_and_symbols() {
        assert!(matches!(
            Symbol::parse("9NVDA"),
            Err(ValidationError::SymbolInvalidStart { ch: '9' })
        ));
        assert!(matches!(
            Symbol::parse("TSLA!"),
            Err(ValidationError::SymbolInvalidChar { ch: '!', index: 4 })
        ));
    }
}
