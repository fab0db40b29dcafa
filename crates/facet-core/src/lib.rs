//! Core types and logic for the Facet page metadata store.
//!
//! Column declarations, per-type normalization and rendering, and the
//! [`store::AttributeStore`] abstraction. This crate has no database or HTML
//! dependency; hosts plug in through the traits in [`host`].

pub mod column;
pub mod document;
pub mod error;
pub mod host;
pub mod kind;
pub mod normalize;
pub mod render;
pub mod store;
pub mod values;

pub use column::ColumnSpec;
pub use error::{Error, Result};
pub use kind::ValueType;
pub use values::MultiValue;
