//! Flag schema definitions.
//!
//! This module defines the static shape of the flags a command accepts. A
//! schema is pure data: the [binder](crate::bind) matches schemas against raw
//! tokens and produces typed values. The types derive [`serde`] traits and
//! can round-trip through JSON for external tooling.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Static type a flag binds to.
///
/// Boolean flags take no value token; every other type consumes the token
/// following the flag.
///
/// # Examples
///
/// ```
/// use forgekit_core::ValueType;
///
/// assert!(ValueType::Bool.hint().is_none());
/// assert_eq!(ValueType::Int.hint(), Some("<int>"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ValueType {
    /// Boolean flag (present or absent, no value token).
    #[default]
    Bool,
    /// Free-form string value.
    Str,
    /// Filesystem path value.
    Path,
    /// Signed integer value.
    Int,
}

impl ValueType {
    /// Returns the placeholder shown in usage output, or `None` for
    /// boolean flags.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            ValueType::Bool => None,
            ValueType::Str => Some("<str>"),
            ValueType::Path => Some("<path>"),
            ValueType::Int => Some("<int>"),
        }
    }
}

impl std::fmt::Display for ValueType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ValueType::Bool => "bool",
            ValueType::Str => "str",
            ValueType::Path => "path",
            ValueType::Int => "int",
        };
        f.write_str(name)
    }
}

/// A typed value produced by binding one flag.
///
/// # Examples
///
/// ```
/// use forgekit_core::{ArgValue, ValueType};
///
/// let jobs = ArgValue::parse("4", ValueType::Int).unwrap();
/// assert_eq!(jobs.as_int(), Some(4));
/// assert!(ArgValue::parse("four", ValueType::Int).is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ArgValue {
    /// Boolean flag state.
    Bool(bool),
    /// String value.
    Str(String),
    /// Path value.
    Path(PathBuf),
    /// Integer value.
    Int(i64),
}

impl ArgValue {
    /// Parses a raw token into a value of the requested type.
    ///
    /// Returns `None` when the token does not parse. `ValueType::Bool`
    /// never parses from a token — boolean flags are bound by presence.
    pub fn parse(raw: &str, value_type: ValueType) -> Option<ArgValue> {
        match value_type {
            ValueType::Bool => None,
            ValueType::Str => Some(ArgValue::Str(raw.to_string())),
            ValueType::Path => Some(ArgValue::Path(PathBuf::from(raw))),
            ValueType::Int => raw.parse::<i64>().ok().map(ArgValue::Int),
        }
    }

    /// The type this value was bound as.
    pub fn value_type(&self) -> ValueType {
        match self {
            ArgValue::Bool(_) => ValueType::Bool,
            ArgValue::Str(_) => ValueType::Str,
            ArgValue::Path(_) => ValueType::Path,
            ArgValue::Int(_) => ValueType::Int,
        }
    }

    /// Returns the boolean state, if this is a `Bool`.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ArgValue::Bool(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the string value, if this is a `Str`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ArgValue::Str(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the path value, if this is a `Path`.
    pub fn as_path(&self) -> Option<&std::path::Path> {
        match self {
            ArgValue::Path(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the integer value, if this is an `Int`.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            ArgValue::Int(value) => Some(*value),
            _ => None,
        }
    }
}

/// Declaration of one accepted flag.
///
/// A flag has an optional single-character short form (e.g. `-v`), a long
/// name (e.g. `--verbose`), help text, the static type it binds to, and an
/// optional default used when the flag is absent. The long name is the
/// flag's identity and must be unique within the composed schema set
/// presented to one command. Schemas are immutable once declared.
///
/// # Examples
///
/// ```
/// use forgekit_core::{ArgSchema, ArgValue, ValueType};
///
/// let verbose = ArgSchema::flag(Some('v'), "verbose", "Enable verbose logging");
/// assert!(verbose.matches("-v"));
/// assert!(verbose.matches("--verbose"));
/// assert!(!verbose.takes_value());
///
/// let jobs = ArgSchema::option(Some('j'), "jobs", "Parallel jobs", ValueType::Int)
///     .with_default(ArgValue::Int(1));
/// assert!(jobs.takes_value());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArgSchema {
    /// Short form, without the leading dash.
    pub short: Option<char>,
    /// Long name, without the leading dashes.
    pub long: String,
    /// One-line help text shown in usage output.
    pub help: String,
    /// The static type the flag binds to.
    pub value_type: ValueType,
    /// Value assumed when the flag is absent, if any.
    pub default: Option<ArgValue>,
}

impl ArgSchema {
    /// Declares a boolean flag.
    pub fn flag(short: Option<char>, long: &str, help: &str) -> Self {
        Self {
            short,
            long: long.to_string(),
            help: help.to_string(),
            value_type: ValueType::Bool,
            default: None,
        }
    }

    /// Declares a flag that consumes a value token of the given type.
    pub fn option(short: Option<char>, long: &str, help: &str, value_type: ValueType) -> Self {
        Self {
            short,
            long: long.to_string(),
            help: help.to_string(),
            value_type,
            default: None,
        }
    }

    /// Attaches a default value used when the flag is absent.
    pub fn with_default(mut self, default: ArgValue) -> Self {
        self.default = Some(default);
        self
    }

    /// Whether binding this flag consumes the following token.
    pub fn takes_value(&self) -> bool {
        self.value_type != ValueType::Bool
    }

    /// Checks whether a raw token addresses this flag in either form.
    ///
    /// # Examples
    ///
    /// ```
    /// use forgekit_core::ArgSchema;
    ///
    /// let schema = ArgSchema::flag(Some('v'), "verbose", "Enable verbose logging");
    /// assert!(schema.matches("-v"));
    /// assert!(schema.matches("--verbose"));
    /// assert!(!schema.matches("--version"));
    /// assert!(!schema.matches("verbose"));
    /// ```
    pub fn matches(&self, token: &str) -> bool {
        if let Some(long) = token.strip_prefix("--") {
            return long == self.long;
        }
        if let Some(short) = token.strip_prefix('-') {
            let mut chars = short.chars();
            return chars.next() == self.short && chars.next().is_none();
        }
        false
    }
}
