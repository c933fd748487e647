//! Subject selectors for the command line.
//!
//! `sheet:N`, `input:N` and `sprite:I.J` address the N-th sheet, the N-th input and the J-th
//! sprite of the I-th input (all zero-based, in document order). `root` is shorthand for
//! `sheet:0`.

use spright_core::{Config, SubjectId};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectorError {
    #[error("invalid subject selector '{0}' (expected sheet:N, input:N or sprite:I.J)")]
    Syntax(String),

    #[error("no subject matches '{0}'")]
    NotFound(SubjectSelector),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubjectSelector {
    Sheet(usize),
    Input(usize),
    Sprite { input: usize, sprite: usize },
}

impl SubjectSelector {
    pub fn resolve(self, config: &Config) -> Result<SubjectId, SelectorError> {
        let found = match self {
            Self::Sheet(n) => config.sheets().nth(n),
            Self::Input(n) => config.inputs().nth(n),
            Self::Sprite { input, sprite } => config
                .inputs()
                .nth(input)
                .and_then(|input| config.sprites(input).nth(sprite)),
        };
        found.ok_or(SelectorError::NotFound(self))
    }
}

impl FromStr for SubjectSelector {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let syntax = || SelectorError::Syntax(s.to_string());
        if s == "root" {
            return Ok(Self::Sheet(0));
        }
        let (kind, index) = s.split_once(':').ok_or_else(syntax)?;
        match kind {
            "sheet" => index.parse().map(Self::Sheet).map_err(|_| syntax()),
            "input" => index.parse().map(Self::Input).map_err(|_| syntax()),
            "sprite" => {
                let (input, sprite) = index.split_once('.').ok_or_else(syntax)?;
                Ok(Self::Sprite {
                    input: input.parse().map_err(|_| syntax())?,
                    sprite: sprite.parse().map_err(|_| syntax())?,
                })
            }
            _ => Err(syntax()),
        }
    }
}

impl fmt::Display for SubjectSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sheet(n) => write!(f, "sheet:{n}"),
            Self::Input(n) => write!(f, "input:{n}"),
            Self::Sprite { input, sprite } => write!(f, "sprite:{input}.{sprite}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_selectors() {
        assert_eq!("root".parse(), Ok(SubjectSelector::Sheet(0)));
        assert_eq!("input:2".parse(), Ok(SubjectSelector::Input(2)));
        assert_eq!(
            "sprite:1.3".parse(),
            Ok(SubjectSelector::Sprite { input: 1, sprite: 3 })
        );
        assert!("sprite:1".parse::<SubjectSelector>().is_err());
        assert!("output:0".parse::<SubjectSelector>().is_err());
    }

    #[test]
    fn test_resolve_against_config() {
        let config = Config::parse("input a.png\n  sprite x\n  sprite y");
        let sprite = SubjectSelector::Sprite { input: 0, sprite: 1 };
        let id = sprite.resolve(&config).unwrap();
        assert_eq!(config.line_no(id), Some(2));

        let missing = SubjectSelector::Input(1);
        assert_eq!(missing.resolve(&config), Err(SelectorError::NotFound(missing)));
    }
}
