//! Annotation-driven discovery and transformation of sensitive record fields.
//!
//! Fields of a record type are annotated with a role:
//!
//! - **`subjectID`**: identifies the subject (user, tenant, ...) the record is
//!   about; an optional `prefix` option is prepended to its value
//! - **`data`**: a sensitive string leaf; an optional `kind` option (`email`,
//!   `ipv4_addr`, ...) tells transformations what the value is
//! - **`dive`**: a nested record, optional record, or sequence or map of
//!   records to recurse into
//!
//! ```ignore
//! use sensitive::Sensitive;
//!
//! #[derive(Sensitive)]
//! struct Device {
//!     #[sensitive("data,kind=ipv4_addr")]
//!     ip: String,
//! }
//!
//! #[derive(Sensitive)]
//! struct Profile {
//!     #[sensitive("subjectID")]
//!     id: String,
//!     #[pii("data,kind=email")]
//!     email: String,
//!     #[sensitive("dive")]
//!     devices: Vec<Device>,
//! }
//! ```
//!
//! What this crate does:
//! - scans record types once and caches their descriptors ([`Scanner`])
//! - resolves the subject identifier of an instance across nested records
//! - replaces sensitive values in place through a caller-supplied callback
//!   ([`Accessor::replace`]), or with the [`redact`] and [`mask`] facades
//!
//! What it does not do:
//! - encrypt, tokenize or persist anything
//! - walk fields that are not annotated
//!
//! Annotations are parsed when a type is first scanned, so a misconfigured
//! annotation surfaces as [`Error::InvalidTagConfiguration`] at that point.
//! The `Sensitive` derive macro lives in `sensitive-derive` and is re-exported
//! from this crate.

// <https://doc.rust-lang.org/rustc/lints/listing/allowed-by-default.html>
#![warn(
    anonymous_parameters,
    bare_trait_objects,
    elided_lifetimes_in_paths,
    missing_copy_implementations,
    rust_2018_idioms,
    trivial_casts,
    trivial_numeric_casts,
    unreachable_pub,
    unsafe_code,
    unused_extern_crates,
    unused_import_braces
)]
// <https://rust-lang.github.io/rust-clippy/stable>
#![warn(
    clippy::all,
    clippy::cargo,
    clippy::dbg_macro,
    clippy::float_cmp_const,
    clippy::get_unwrap,
    clippy::mem_forget,
    clippy::nursery,
    clippy::pedantic,
    clippy::todo,
    clippy::unwrap_used,
    clippy::uninlined_format_args
)]
// Allow some clippy lints
#![allow(
    clippy::default_trait_access,
    clippy::doc_markdown,
    clippy::if_not_else,
    clippy::module_name_repetitions,
    clippy::multiple_crate_versions,
    clippy::must_use_candidate,
    clippy::needless_pass_by_value,
    clippy::needless_ifs,
    clippy::use_self,
    clippy::cargo_common_metadata,
    clippy::missing_errors_doc,
    clippy::enum_glob_use,
    clippy::struct_excessive_bools,
    clippy::missing_const_for_fn,
    clippy::redundant_pub_crate,
    clippy::result_large_err,
    clippy::future_not_send,
    clippy::option_if_let_else,
    clippy::from_over_into,
    clippy::manual_inspect
)]
// Allow some lints while testing
#![cfg_attr(test, allow(clippy::non_ascii_literal, clippy::unwrap_used))]

pub use sensitive_derive::Sensitive;

#[allow(unused_extern_crates)]
extern crate self as sensitive;

// Module declarations
mod check;
mod error;
#[cfg(feature = "mask")]
pub mod mask;
mod record;
mod redact;
mod scan;
mod tag;
mod text;
mod walk;

pub use check::check;
pub use error::{BoxError, ConfigError, Error, Result};
pub use record::{
    Annotation, Container, Dive, FieldMut, FieldRef, FieldSchema, Layout, Record, RecordType,
    Schema, ValueType,
};
pub use redact::{MASK_CHAR, RedactConfig, ReplaceFn, default_redact_fn, redact, redact_with};
pub use scan::{FieldDescriptor, Scanner, TypeDescriptor};
pub use tag::{
    OPTION_KIND, OPTION_PREFIX, Role, TAG_DATA, TAG_DIVE, TAG_IDS, TAG_SUBJECT_ID, TagOptions,
    TagPayload, extract_tag, field_tag, parse_annotations, parse_tag,
};
pub use walk::{Accessor, FieldReplace, scan};
