//! Bound argument records.

use std::collections::BTreeMap;
use std::path::Path;

use crate::schema::ArgValue;

/// The typed result of binding a schema set against a token stream.
///
/// Fields assigned from tokens are *set*; fields filled from a schema
/// default are *defaulted*. [`get`](ArgumentRecord::get) reads through both,
/// while [`is_set`](ArgumentRecord::is_set) answers only for explicit
/// assignments — downstream code that cares must treat the two as distinct.
/// Unset boolean flags read as `false`. Non-flag leftovers are carried in
/// [`rest`](ArgumentRecord::rest), in the order they appeared.
///
/// # Examples
///
/// ```
/// use forgekit_core::{FlagSet, ValueType, bind, compose};
///
/// let set = compose([
///     &FlagSet::new("logging").flag(Some('v'), "verbose", "Verbose"),
/// ]).unwrap();
///
/// let tokens = vec!["--verbose".to_string(), "extra".to_string()];
/// let (record, remaining) = bind(&set, &tokens).unwrap();
/// assert!(record.flag("verbose"));
/// assert_eq!(remaining, vec!["extra".to_string()]);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArgumentRecord {
    set: BTreeMap<String, ArgValue>,
    defaults: BTreeMap<String, ArgValue>,
    rest: Vec<String>,
}

impl ArgumentRecord {
    /// Whether the field was explicitly assigned from a token.
    pub fn is_set(&self, long: &str) -> bool {
        self.set.contains_key(long)
    }

    /// Reads a field, falling back to its schema default.
    pub fn get(&self, long: &str) -> Option<&ArgValue> {
        self.set.get(long).or_else(|| self.defaults.get(long))
    }

    /// Reads a boolean flag; absent flags are `false`.
    pub fn flag(&self, long: &str) -> bool {
        self.get(long).and_then(ArgValue::as_bool).unwrap_or(false)
    }

    /// Reads a string-typed field.
    pub fn str_value(&self, long: &str) -> Option<&str> {
        self.get(long).and_then(ArgValue::as_str)
    }

    /// Reads a path-typed field.
    pub fn path_value(&self, long: &str) -> Option<&Path> {
        self.get(long).and_then(ArgValue::as_path)
    }

    /// Reads an integer-typed field.
    pub fn int_value(&self, long: &str) -> Option<i64> {
        self.get(long).and_then(ArgValue::as_int)
    }

    /// Tokens the binder left uninterpreted, in input order.
    pub fn rest(&self) -> &[String] {
        &self.rest
    }

    /// Attaches leftover tokens after resolution has consumed its share.
    pub fn with_rest(mut self, rest: Vec<String>) -> Self {
        self.rest = rest;
        self
    }

    /// Records an explicit assignment; the first occurrence wins and later
    /// duplicates are ignored.
    pub(crate) fn assign(&mut self, long: &str, value: ArgValue) {
        self.set.entry(long.to_string()).or_insert(value);
    }

    /// Records a schema default for a field with no explicit assignment.
    pub(crate) fn assign_default(&mut self, long: &str, value: ArgValue) {
        self.defaults.insert(long.to_string(), value);
    }
}
