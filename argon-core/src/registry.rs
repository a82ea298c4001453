//! Declared-option registry and its single-pass scanner.
//!
//! A registry is built once from a fixed schema of `-key=value` options.
//! Scanning walks the leading dash-prefixed run of an argument vector,
//! recording each match in place; everything after that run is left for
//! positional consumption.

use std::collections::HashMap;

use tracing::{debug, error};

use crate::convert::FromToken;
use crate::error::{ArgError, Result};

/// Declaration of a single named option.
///
/// Keys carry their leading dash(es) verbatim; scanning matches the text
/// left of the first `=` against them exactly as declared.
#[derive(Debug, Clone)]
pub struct OptionSpec {
    key: String,
    is_flag: bool,
    default: String,
}

impl OptionSpec {
    /// A valued option whose payload defaults to the empty string.
    pub fn valued(key: impl Into<String>) -> Self {
        Self::with_default(key, "")
    }

    /// A valued option with a declared default, returned by lookups when
    /// the scan never matched the key.
    pub fn with_default(key: impl Into<String>, default: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            is_flag: false,
            default: default.into(),
        }
    }

    /// A presence flag. Its stored payload becomes the literal `"true"`
    /// when matched; the right-hand side of the token is ignored.
    pub fn flag(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            is_flag: true,
            default: String::new(),
        }
    }
}

#[derive(Debug, Clone)]
struct OptionEntry {
    value: String,
    is_flag: bool,
    was_set: bool,
}

/// Fixed set of declared options plus their scan state.
///
/// Keys never change after construction; only each entry's payload and
/// set-marker mutate, during a single [`parse`](OptionRegistry::parse)
/// pass. One registry serves one parse pass.
#[derive(Debug, Clone)]
pub struct OptionRegistry {
    map: HashMap<String, OptionEntry>,
}

impl OptionRegistry {
    /// Build the registry from its full schema up front.
    pub fn new(specs: impl IntoIterator<Item = OptionSpec>) -> Self {
        let map = specs
            .into_iter()
            .map(|spec| {
                let entry = OptionEntry {
                    value: spec.default,
                    is_flag: spec.is_flag,
                    was_set: false,
                };
                (spec.key, entry)
            })
            .collect();
        Self { map }
    }

    /// Scan the leading run of `-key=value` tokens.
    ///
    /// Scanning stops at the first token that does not begin with `-`, or
    /// at end of input. A dash token without `=` is a hard failure, not a
    /// stop condition.
    ///
    /// # Returns
    ///
    /// The number of tokens consumed, for the caller to advance a cursor by.
    pub fn parse(&mut self, tokens: &[String]) -> Result<usize> {
        let mut found = 0;
        while found < tokens.len() && tokens[found].starts_with('-') {
            let token = &tokens[found];
            let Some((key, value)) = token.split_once('=') else {
                return Err(ArgError::InvalidOptionSyntax(token.clone()));
            };
            let entry = self
                .map
                .get_mut(key)
                .ok_or_else(|| ArgError::UnknownOption(key.to_string()))?;
            if entry.was_set {
                error!("Option '{}' supplied more than once", key);
                return Err(ArgError::DuplicateOption(key.to_string()));
            }
            entry.was_set = true;
            entry.value = if entry.is_flag {
                "true".to_string()
            } else {
                value.to_string()
            };
            found += 1;
        }
        debug!("Option scan consumed {} token(s)", found);
        Ok(found)
    }

    /// Convert the stored payload for `key` to the requested type.
    ///
    /// Lookups read whatever string currently occupies the slot: the
    /// declared default when the scan never matched the key, the scanned
    /// payload otherwise. The two cases are indistinguishable here; use
    /// [`was_set`](OptionRegistry::was_set) to tell them apart.
    pub fn get<T: FromToken>(&self, key: &str) -> Result<T> {
        let entry = self
            .map
            .get(key)
            .ok_or_else(|| ArgError::UnknownOption(key.to_string()))?;
        Ok(T::from_token(&entry.value))
    }

    /// Whether `key` was matched during the scan pass.
    pub fn was_set(&self, key: &str) -> Result<bool> {
        let entry = self
            .map
            .get(key)
            .ok_or_else(|| ArgError::UnknownOption(key.to_string()))?;
        Ok(entry.was_set)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn scans_value_into_declared_option() {
        let mut opts = OptionRegistry::new([OptionSpec::valued("-k")]);
        let consumed = opts.parse(&tokens(&["-k=v"])).unwrap();
        assert_eq!(consumed, 1);
        assert_eq!(opts.get::<String>("-k").unwrap(), "v");
        assert!(opts.was_set("-k").unwrap());
    }

    #[test]
    fn stops_at_first_positional_token() {
        let mut opts = OptionRegistry::new([
            OptionSpec::valued("-a"),
            OptionSpec::valued("-b"),
        ]);
        let consumed = opts
            .parse(&tokens(&["-a=1", "-b=2", "pos1", "pos2"]))
            .unwrap();
        assert_eq!(consumed, 2);
        assert_eq!(opts.get::<u32>("-a").unwrap(), 1);
        assert_eq!(opts.get::<u32>("-b").unwrap(), 2);
    }

    #[test]
    fn duplicate_option_is_fatal() {
        let mut opts = OptionRegistry::new([OptionSpec::valued("-k")]);
        let err = opts.parse(&tokens(&["-k=v1", "-k=v2"])).unwrap_err();
        assert_eq!(err, ArgError::DuplicateOption("-k".to_string()));
    }

    #[test]
    fn undeclared_key_is_fatal() {
        let mut opts = OptionRegistry::new([OptionSpec::valued("-k")]);
        let err = opts.parse(&tokens(&["-z=1"])).unwrap_err();
        assert_eq!(err, ArgError::UnknownOption("-z".to_string()));
    }

    #[test]
    fn dash_token_without_delimiter_is_fatal() {
        let mut opts = OptionRegistry::new([OptionSpec::valued("-k")]);
        let err = opts.parse(&tokens(&["-k"])).unwrap_err();
        assert_eq!(err, ArgError::InvalidOptionSyntax("-k".to_string()));
    }

    #[test]
    fn flag_stores_true_regardless_of_payload() {
        let mut opts = OptionRegistry::new([
            OptionSpec::flag("-verbose"),
            OptionSpec::flag("-quiet"),
        ]);
        opts.parse(&tokens(&["-verbose=", "-quiet=x"])).unwrap();
        assert!(opts.get::<bool>("-verbose").unwrap());
        assert!(opts.get::<bool>("-quiet").unwrap());
    }

    #[test]
    fn flag_without_delimiter_is_still_fatal() {
        let mut opts = OptionRegistry::new([OptionSpec::flag("-verbose")]);
        let err = opts.parse(&tokens(&["-verbose"])).unwrap_err();
        assert_eq!(err, ArgError::InvalidOptionSyntax("-verbose".to_string()));
    }

    #[test]
    fn unmatched_option_reads_back_its_default() {
        let opts = OptionRegistry::new([
            OptionSpec::with_default("-port", "848"),
            OptionSpec::valued("-host"),
        ]);
        assert_eq!(opts.get::<u16>("-port").unwrap(), 848);
        assert_eq!(opts.get::<String>("-host").unwrap(), "");
        assert!(!opts.was_set("-port").unwrap());
    }

    #[test]
    fn lookup_of_undeclared_key_is_fatal() {
        let opts = OptionRegistry::new([OptionSpec::valued("-k")]);
        let err = opts.get::<String>("-missing").unwrap_err();
        assert_eq!(err, ArgError::UnknownOption("-missing".to_string()));
    }

    #[test]
    fn empty_payload_is_preserved_for_valued_options() {
        let mut opts = OptionRegistry::new([OptionSpec::with_default("-k", "fallback")]);
        opts.parse(&tokens(&["-k="])).unwrap();
        assert_eq!(opts.get::<String>("-k").unwrap(), "");
        assert!(opts.was_set("-k").unwrap());
    }
}
