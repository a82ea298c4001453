//! Positional cursor over the tail of an argument vector.
//!
//! The cursor borrows the caller's argument vector, hands the leading
//! named-option run to an [`OptionRegistry`], then yields what remains one
//! token at a time. Running out of tokens is an expected condition, not a
//! failure: the caller-supplied usage hook is notified and a default value
//! is produced.

use tracing::debug;

use crate::convert::FromToken;
use crate::error::Result;
use crate::registry::OptionRegistry;

/// Caller-supplied hook fired when a required positional token is missing.
///
/// The hook may print usage text and may terminate the process. When it
/// returns instead, its exit code is ignored and the popping call still
/// produces a default value.
pub trait UsageHook {
    fn usage(&mut self, message: &str) -> i32;
}

impl<F> UsageHook for F
where
    F: FnMut(&str) -> i32,
{
    fn usage(&mut self, message: &str) -> i32 {
        self(message)
    }
}

/// Cursor over the unconsumed tail of an argument vector.
///
/// Holds a shrinking view into the caller-owned vector; it never copies
/// tokens and never outlives them. The remaining count only decreases, by
/// exactly the number of tokens each call consumes.
pub struct ArgCursor<'a> {
    usage: Box<dyn UsageHook + 'a>,
    rest: &'a [String],
}

impl<'a> ArgCursor<'a> {
    pub fn new(usage: impl UsageHook + 'a, args: &'a [String]) -> Self {
        Self {
            usage: Box::new(usage),
            rest: args,
        }
    }

    /// Scan the leading named options into `registry` and step past them.
    ///
    /// Returns the registry again so typed lookups chain directly off the
    /// parse call. Scan failures propagate unchanged and leave the cursor
    /// where it was.
    pub fn parse<'r>(&mut self, registry: &'r mut OptionRegistry) -> Result<&'r OptionRegistry> {
        let found = registry.parse(self.rest)?;
        self.rest = &self.rest[found..];
        Ok(registry)
    }

    /// Consume one positional token, converted to the requested type.
    ///
    /// On exhaustion the usage hook fires once when `error_message` is
    /// supplied, and the type's default is returned either way; whether
    /// the hook terminates the process is its own business.
    pub fn pop<T: FromToken + Default>(&mut self, error_message: Option<&str>) -> T {
        match self.take_front() {
            Some(token) => T::from_token(token),
            None => {
                self.report_missing(error_message);
                T::default()
            }
        }
    }

    /// Consume one positional token without conversion.
    ///
    /// `None` signals exhaustion, after the same usage-hook treatment as
    /// [`pop`](ArgCursor::pop).
    pub fn pop_raw(&mut self, error_message: Option<&str>) -> Option<&'a str> {
        let token = self.take_front();
        if token.is_none() {
            self.report_missing(error_message);
        }
        token.map(|t| t.as_str())
    }

    /// Tokens not yet consumed.
    pub fn remaining(&self) -> usize {
        self.rest.len()
    }

    fn take_front(&mut self) -> Option<&'a String> {
        let (first, rest) = self.rest.split_first()?;
        self.rest = rest;
        Some(first)
    }

    fn report_missing(&mut self, error_message: Option<&str>) {
        if let Some(message) = error_message {
            debug!("Argument vector exhausted, invoking usage hook: {}", message);
            let _ = self.usage.usage(message);
        }
    }
}
