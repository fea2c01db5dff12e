#![warn(missing_docs)]

//! Post-layout geometric validation and repair for PCB designs.
//!
//! The rendering pipeline produces a [`CircuitDb`] of finalized board,
//! hole, pad, and component records; this crate validates and repairs
//! that geometry against manufacturing constraints:
//!
//! - the **boundary clipper** converts holes crossing the board outline
//!   into cutout polygons ([`clip_holes_to_board`]);
//! - the **overlap check** flags pads of different components that
//!   overlap on the same layer ([`find_pad_overlaps`]).
//!
//! Both stages run in one call through [`run_post_layout_checks`].
//!
//! # Example
//!
//! ```
//! use pcad::{run_post_layout_checks, CircuitDb, Point2D};
//!
//! let mut db = CircuitDb::new();
//! let board = db.add_board(Point2D::ORIGIN, 10.0, 10.0);
//! db.add_circular_hole(Point2D::new(5.0, 0.0), 2.0);
//!
//! let report = run_post_layout_checks(&mut db, Some(board)).unwrap();
//! assert_eq!(report.clipped_holes, 1);
//! ```

pub use pcad_clip::{
    clip_holes_to_board, clip_holes_to_board_with_policy, ClipOutcome, HoleClass,
    OutsideHolePolicy, OUTSIDE_HOLE_POLICY,
};
pub use pcad_db::{
    Board, BoardId, CircuitDb, Component, ComponentId, Cutout, CutoutId, CutoutShape, DbError,
    GroupRef, Hole, HoleId, HoleShape, Layer, OverlapViolation, Pad, PadId, SubcircuitRef,
    ViolationId,
};
pub use pcad_drc::{find_pad_overlaps, pad_footprint, record_pad_overlaps, PadOverlap};
pub use pcad_math::{Point2, Point2D, Rect, Tolerance, Vec2};

pub mod error;

pub use error::{Result, ValidationError};

use log::debug;
use serde::Serialize;

/// Summary of one post-layout validation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostLayoutReport {
    /// Holes converted into cutouts by the boundary clipper.
    pub clipped_holes: usize,
    /// Holes deleted without replacement geometry (degenerate clips).
    pub dropped_holes: usize,
    /// Overlap violations recorded into the store, in emission order.
    pub violations: Vec<ViolationId>,
}

/// Reject malformed input geometry before the stages run.
///
/// Non-finite coordinates and non-positive dimensions are caller contract
/// violations; failing fast here beats silently producing garbage
/// geometry downstream.
pub fn validate_geometry(db: &CircuitDb) -> Result<()> {
    for board in db.boards.list() {
        check_finite(board.id.to_string(), &[board.center.x, board.center.y])?;
        check_positive(board.id.to_string(), "width", board.width)?;
        check_positive(board.id.to_string(), "height", board.height)?;
    }
    for hole in db.holes.list() {
        let HoleShape::Circle { center, diameter } = &hole.shape;
        check_finite(hole.id.to_string(), &[center.x, center.y])?;
        check_positive(hole.id.to_string(), "diameter", *diameter)?;
    }
    for pad in db.pads.list() {
        check_finite(
            pad.id.to_string(),
            &[pad.center.x, pad.center.y, pad.rotation_deg],
        )?;
        check_positive(pad.id.to_string(), "width", pad.width)?;
        check_positive(pad.id.to_string(), "height", pad.height)?;
    }
    for component in db.components.list() {
        check_finite(
            component.id.to_string(),
            &[component.center.x, component.center.y, component.rotation_deg],
        )?;
    }
    Ok(())
}

/// Run boundary clipping and the pad overlap check over the store.
///
/// Validates input geometry first. Clipping is skipped when no board id
/// is supplied (a board is optional context); the overlap check always
/// runs and persists its findings as violation records. The stages touch
/// disjoint record kinds, so their order does not matter.
pub fn run_post_layout_checks(
    db: &mut CircuitDb,
    board: Option<BoardId>,
) -> Result<PostLayoutReport> {
    validate_geometry(db)?;

    let clip = board
        .map(|id| clip_holes_to_board(db, id))
        .unwrap_or_default();
    debug!(
        "boundary clip: {} holes clipped, {} dropped",
        clip.clipped, clip.dropped
    );

    let violations = record_pad_overlaps(db);
    debug!("overlap check: {} violations", violations.len());

    Ok(PostLayoutReport {
        clipped_holes: clip.clipped,
        dropped_holes: clip.dropped,
        violations,
    })
}

fn check_finite(record: String, values: &[f64]) -> Result<()> {
    if values.iter().any(|v| !v.is_finite()) {
        return Err(ValidationError::NonFiniteCoordinate { record });
    }
    Ok(())
}

fn check_positive(record: String, dimension: &'static str, value: f64) -> Result<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ValidationError::NonPositiveDimension {
            record,
            dimension,
            value,
        });
    }
    Ok(())
}
