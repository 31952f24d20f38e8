//! Pre-defined page sizes for sheet printers and label printers.
//!
//! Sizes are (width, height). Label-printer media is given the way the roll
//! feeds: width across the print head, height along the feed.

use crate::units::*;

/// Page dimensions as (width, height) in points.
pub type PageSize = (Pt, Pt);

pub const A4: PageSize = (Pt(210.0 * 72.0 / 25.4), Pt(297.0 * 72.0 / 25.4));

/// 100×50 mm thermal label media
pub const ZEBRA_100X50: PageSize = (Pt(100.0 * 72.0 / 25.4), Pt(50.0 * 72.0 / 25.4));
