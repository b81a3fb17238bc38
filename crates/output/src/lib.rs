//! # naiad-output
//!
//! Decode the fixed-layout binary output files written by a hydraulic
//! network solver. Each file holds a prologue describing the network,
//! per-element metadata tables, one block of result arrays per reporting
//! period, and an epilogue carrying the period count. This crate exposes
//! the decoded arrays as `Vec<f32>` values, either streamed in file order
//! or fetched individually by period and attribute.

mod error;
mod layout;
mod reader;

pub use error::OutputError;
pub use layout::{
    ElementCounts, ElementKind, LINK_ATTRIBUTES, MAX_ID_BYTES, NODE_ATTRIBUTES, PROLOGUE_SIZE,
    WORD_SIZE, attribute_offset, bytes_per_period, data_start_offset,
};
pub use reader::{OutputReader, ResultArray, Results};
