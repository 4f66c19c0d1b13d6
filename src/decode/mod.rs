//! Lenient payload decoding
//!
//! RPD's serializer collapses one-element collections to a bare object or
//! scalar but emits a real array for multi-element collections. The
//! [`lenient`] decoder normalizes both shapes (and `null`) into a uniform
//! sequence so response schemas never special-case arity.
//!
//! [`error_body`] maps the two structured error formats (JSON, XML) into
//! the common [`ErrorRecord`] shape.
//!
//! [`ErrorRecord`]: crate::error::ErrorRecord

pub mod error_body;
pub mod lenient;
mod xml;

pub use lenient::{decode_list, lenient_seq};
