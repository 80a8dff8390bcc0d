//! Mixin flag-sets and schema composition.
//!
//! Commands do not declare flags one by one. Each concern (logging, plugin
//! loading, pod selection, ...) contributes a reusable [`FlagSet`], and a
//! command's effective schema is the flat union of every mixin it composes.
//! [`compose`] builds that union and rejects name collisions across mixins
//! at composition time, so a colliding pair of mixins fails when the command
//! is registered rather than when a user types the flag.
//!
//! # Example
//!
//! ```
//! use forgekit_core::{FlagSet, ValueType, compose};
//!
//! let logging = FlagSet::new("logging").flag(Some('v'), "verbose", "Enable verbose logging");
//! let pods = FlagSet::new("pods").option(None, "pod", "Target pod", ValueType::Str);
//!
//! let set = compose([&logging, &pods]).unwrap();
//! assert_eq!(set.len(), 2);
//! assert!(set.find("--verbose").is_some());
//! assert!(set.find("--pod").is_some());
//! ```

use thiserror::Error;

use crate::schema::{ArgSchema, ValueType};

/// A named bundle of flag declarations contributed by one concern.
///
/// # Examples
///
/// ```
/// use forgekit_core::FlagSet;
///
/// let logging = FlagSet::new("logging")
///     .flag(Some('v'), "verbose", "Enable verbose logging");
/// assert_eq!(logging.name(), "logging");
/// assert_eq!(logging.schemas().len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct FlagSet {
    name: String,
    schemas: Vec<ArgSchema>,
}

impl FlagSet {
    /// Creates an empty flag-set for the named concern.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            schemas: Vec::new(),
        }
    }

    /// Declares a boolean flag.
    pub fn flag(mut self, short: Option<char>, long: &str, help: &str) -> Self {
        self.schemas.push(ArgSchema::flag(short, long, help));
        self
    }

    /// Declares a value-taking flag.
    pub fn option(mut self, short: Option<char>, long: &str, help: &str, ty: ValueType) -> Self {
        self.schemas.push(ArgSchema::option(short, long, help, ty));
        self
    }

    /// Adds a pre-built schema, e.g. one carrying a default.
    pub fn declare(mut self, schema: ArgSchema) -> Self {
        self.schemas.push(schema);
        self
    }

    /// The concern this set belongs to.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The declared schemas, in declaration order.
    pub fn schemas(&self) -> &[ArgSchema] {
        &self.schemas
    }
}

/// Composition failures across mixins.
///
/// These are programmer errors in the command registration, not user input
/// errors; they surface when the command tree is built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ComposeError {
    /// Two mixins in one composition declare the same long name.
    #[error("flag --{long} declared by both `{first}` and `{second}`")]
    DuplicateLong {
        /// The colliding long name.
        long: String,
        /// Mixin that declared the flag first.
        first: String,
        /// Mixin that declared it again.
        second: String,
    },
    /// Two mixins in one composition declare the same short form.
    #[error("flag -{short} declared by both `{first}` and `{second}`")]
    DuplicateShort {
        /// The colliding short form.
        short: char,
        /// Mixin that declared the flag first.
        first: String,
        /// Mixin that declared it again.
        second: String,
    },
}

/// The flat schema set a command binds against.
///
/// Produced by [`compose`]; iteration preserves mixin declaration order,
/// which is also the order flags appear in usage output.
#[derive(Debug, Clone, Default)]
pub struct SchemaSet {
    schemas: Vec<ArgSchema>,
}

impl SchemaSet {
    /// Finds the schema a raw flag token addresses, if any.
    pub fn find(&self, token: &str) -> Option<&ArgSchema> {
        self.schemas.iter().find(|schema| schema.matches(token))
    }

    /// Iterates schemas in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &ArgSchema> {
        self.schemas.iter()
    }

    /// Number of composed schemas.
    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    /// Whether the composition declared no flags at all.
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}

/// Merges mixin flag-sets into one flat schema set.
///
/// Long names and short forms must be unique across the whole composition;
/// the first collision aborts with a [`ComposeError`] naming both mixins.
///
/// # Examples
///
/// ```
/// use forgekit_core::{ComposeError, FlagSet, compose};
///
/// let a = FlagSet::new("logging").flag(Some('v'), "verbose", "Verbose");
/// let b = FlagSet::new("plugins").flag(None, "verbose", "Also verbose");
///
/// let err = compose([&a, &b]).unwrap_err();
/// assert_eq!(
///     err,
///     ComposeError::DuplicateLong {
///         long: "verbose".into(),
///         first: "logging".into(),
///         second: "plugins".into(),
///     }
/// );
/// ```
pub fn compose<'a, I>(sets: I) -> Result<SchemaSet, ComposeError>
where
    I: IntoIterator<Item = &'a FlagSet>,
{
    let mut composed = SchemaSet::default();
    let mut long_owners: Vec<(String, String)> = Vec::new();
    let mut short_owners: Vec<(char, String)> = Vec::new();

    for set in sets {
        for schema in set.schemas() {
            if let Some((_, first)) = long_owners.iter().find(|(long, _)| *long == schema.long) {
                return Err(ComposeError::DuplicateLong {
                    long: schema.long.clone(),
                    first: first.clone(),
                    second: set.name().to_string(),
                });
            }
            if let Some(short) = schema.short {
                if let Some((_, first)) = short_owners.iter().find(|(c, _)| *c == short) {
                    return Err(ComposeError::DuplicateShort {
                        short,
                        first: first.clone(),
                        second: set.name().to_string(),
                    });
                }
                short_owners.push((short, set.name().to_string()));
            }
            long_owners.push((schema.long.clone(), set.name().to_string()));
            composed.schemas.push(schema.clone());
        }
    }

    Ok(composed)
}
