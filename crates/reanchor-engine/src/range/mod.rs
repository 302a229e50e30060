//! # Positions and ranges
//!
//! Converts between "character N of this container's flattened text" and
//! concrete `(text leaf, local offset)` points.
//!
//! - [`TextPosition`]: a container plus a character offset. Re-basing onto an
//!   ancestor adds the text length of the siblings passed on the way up.
//! - [`TextRange`]: two positions. Built from a concrete range or from raw
//!   offsets; materialized back into a [`DomRange`](crate::tree::DomRange)
//!   that is always anchored in text leaves.
//!
//! Offsets beyond the available text are reported as
//! [`AnchorError::OffsetOutOfRange`](crate::AnchorError::OffsetOutOfRange);
//! callers treat them as "cannot resolve", never as fatal.

pub mod position;
pub mod text_range;

pub use position::{ResolveDirection, TextPosition, resolve_offsets};
pub use text_range::TextRange;
