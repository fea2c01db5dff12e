#![warn(missing_docs)]

//! Circuit record model and entity store for the pcad geometry core.
//!
//! The rendering pipeline produces boards, holes, pads, and components as
//! keyed records; the validation stages read them through [`CircuitDb`] and
//! write cutouts and overlap violations back. Every record kind lives in its
//! own typed [`Table`] with insert/get/list/delete semantics and stable,
//! never-reused ids.

pub mod records;
pub mod store;

pub use records::{
    Board, BoardId, Component, ComponentId, Cutout, CutoutId, CutoutShape, GroupRef, Hole, HoleId,
    HoleShape, Layer, OverlapViolation, Pad, PadId, SubcircuitRef, ViolationId,
};
pub use store::{CircuitDb, DbError, Table};
