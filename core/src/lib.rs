//! Core flag-schema and argument-binding primitives for ForgeKit.
//!
//! This crate defines the data model the dispatch layer is built on:
//!
//! - [`ArgSchema`] — static declaration of one accepted flag (short form,
//!   long name, help text, bound type, optional default).
//! - [`FlagSet`] — a reusable mixin of schema declarations contributed by
//!   one concern.
//! - [`compose`] — merges mixins into one flat [`SchemaSet`], rejecting
//!   cross-mixin name collisions ([`ComposeError`]).
//! - [`bind`] / [`bind_partial`] — match a schema set against raw tokens,
//!   producing a typed [`ArgumentRecord`] or a [`BindError`].
//!
//! # Example
//!
//! ```
//! use forgekit_core::{FlagSet, ValueType, bind, compose};
//!
//! let logging = FlagSet::new("logging").flag(Some('v'), "verbose", "Enable verbose logging");
//! let build = FlagSet::new("build").option(Some('j'), "jobs", "Parallel jobs", ValueType::Int);
//!
//! let set = compose([&logging, &build]).unwrap();
//! let tokens: Vec<String> = ["-j", "4", "src"].iter().map(|s| s.to_string()).collect();
//! let (record, remaining) = bind(&set, &tokens).unwrap();
//!
//! assert_eq!(record.int_value("jobs"), Some(4));
//! assert!(!record.flag("verbose"));
//! assert_eq!(remaining, vec!["src".to_string()]);
//! ```

mod bind;
mod mixin;
mod record;
mod schema;

pub use bind::{BindError, bind, bind_partial, is_flag_token};
pub use mixin::{ComposeError, FlagSet, SchemaSet, compose};
pub use record::ArgumentRecord;
pub use schema::{ArgSchema, ArgValue, ValueType};
