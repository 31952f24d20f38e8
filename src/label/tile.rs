use crate::label::config::LabelLayoutConfig;
use crate::units::Pt;
use crate::LabelError;

/// Slack allowed when labels fit a page exactly, so that float error in
/// mm → pt conversion does not lose a whole row or column
const FIT_EPSILON: f32 = 1e-3;

/// How many labels fit on a page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridMetrics {
    pub labels_per_row: usize,
    pub labels_per_col: usize,
    pub labels_per_page: usize,
}

fn fit(available: Pt, each: Pt) -> usize {
    if !(each.0 > 0.0) || available.0 <= 0.0 {
        return 0;
    }
    ((available.0 + FIT_EPSILON) / each.0).floor() as usize
}

impl GridMetrics {
    /// Work out the grid for `config`. A configuration that leaves no room for
    /// a single label is an error.
    pub fn for_config(config: &LabelLayoutConfig) -> Result<GridMetrics, LabelError> {
        if config.single_per_page {
            return Ok(GridMetrics {
                labels_per_row: 1,
                labels_per_col: 1,
                labels_per_page: 1,
            });
        }

        let labels_per_row = fit(config.page_width - config.margin * 2.0, config.label_width);
        let labels_per_col = fit(config.page_height - config.margin * 2.0, config.label_height);
        let labels_per_page = labels_per_row * labels_per_col;
        if labels_per_page == 0 {
            return Err(LabelError::Configuration(format!(
                "{}×{}pt labels do not fit a {}×{}pt page with a {}pt margin",
                config.label_width,
                config.label_height,
                config.page_width,
                config.page_height,
                config.margin
            )));
        }

        Ok(GridMetrics {
            labels_per_row,
            labels_per_col,
            labels_per_page,
        })
    }
}

/// Where one label lands. Coordinates are measured from the top-left corner of
/// the page with y growing downward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub page_index: usize,
    pub slot_index: usize,
    pub x: Pt,
    pub y: Pt,
    pub width: Pt,
    pub height: Pt,
}

impl Placement {
    /// The lower-left corner of the slot in PDF user space, where y grows upward
    pub fn pdf_origin(&self, page_height: Pt) -> (Pt, Pt) {
        (self.x, page_height - self.y - self.height)
    }
}

/// Lay out `total` labels, filling each page's rows left to right and top to
/// bottom before starting the next page
pub fn tile(total: usize, config: &LabelLayoutConfig) -> Result<Vec<Placement>, LabelError> {
    let grid = GridMetrics::for_config(config)?;

    if config.single_per_page {
        return Ok((0..total)
            .map(|page_index| Placement {
                page_index,
                slot_index: 0,
                x: Pt(0.0),
                y: Pt(0.0),
                width: config.page_width,
                height: config.page_height,
            })
            .collect());
    }

    Ok((0..total)
        .map(|i| {
            let slot_index = i % grid.labels_per_page;
            let row = slot_index / grid.labels_per_row;
            let col = slot_index % grid.labels_per_row;
            Placement {
                page_index: i / grid.labels_per_page,
                slot_index,
                x: config.margin + config.label_width * col as f32,
                y: config.margin + config.label_height * row as f32,
                width: config.label_width,
                height: config.label_height,
            }
        })
        .collect())
}
