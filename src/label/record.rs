use crate::LabelError;
use std::fmt;

/// Most problems a [QualityReport] lists; the counts still cover every row
pub const MAX_REPORTED_PROBLEMS: usize = 10;

/// One production order, rendered as exactly one label.
///
/// Records are validated when they are built and cannot be changed afterwards;
/// the quantity is printed on the label rather than producing one label per unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelRecord {
    order_id: String,
    unit_name: String,
    file_name: String,
    quantity: u32,
    person_name: Option<String>,
}

fn require(field: &'static str, value: String) -> Result<String, LabelError> {
    if value.trim().is_empty() {
        return Err(LabelError::InvalidRecord {
            field,
            reason: "must not be empty",
        });
    }
    Ok(value)
}

impl LabelRecord {
    /// Build a record, rejecting empty (or whitespace-only) required fields and a
    /// quantity of zero
    pub fn new<O, U, F>(
        order_id: O,
        unit_name: U,
        file_name: F,
        quantity: u32,
    ) -> Result<LabelRecord, LabelError>
    where
        O: Into<String>,
        U: Into<String>,
        F: Into<String>,
    {
        let order_id = require("order_id", order_id.into())?;
        let unit_name = require("unit_name", unit_name.into())?;
        let file_name = require("file_name", file_name.into())?;
        if quantity == 0 {
            return Err(LabelError::InvalidRecord {
                field: "quantity",
                reason: "must be greater than zero",
            });
        }

        Ok(LabelRecord {
            order_id,
            unit_name,
            file_name,
            quantity,
            person_name: None,
        })
    }

    /// Attach the optional person name. A blank name leaves the field unset.
    pub fn with_person_name<S: Into<String>>(mut self, person_name: S) -> LabelRecord {
        let person_name: String = person_name.into();
        self.person_name = if person_name.trim().is_empty() {
            None
        } else {
            Some(person_name)
        };
        self
    }

    pub fn order_id(&self) -> &str {
        &self.order_id
    }

    pub fn unit_name(&self) -> &str {
        &self.unit_name
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn person_name(&self) -> Option<&str> {
        self.person_name.as_deref()
    }
}

/// A row as it arrives from an import layer, before any validation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordDraft {
    pub order_id: String,
    pub unit_name: String,
    pub file_name: String,
    pub quantity: i64,
    pub person_name: Option<String>,
}

impl RecordDraft {
    pub fn new<O, U, F>(order_id: O, unit_name: U, file_name: F, quantity: i64) -> RecordDraft
    where
        O: Into<String>,
        U: Into<String>,
        F: Into<String>,
    {
        RecordDraft {
            order_id: order_id.into(),
            unit_name: unit_name.into(),
            file_name: file_name.into(),
            quantity,
            person_name: None,
        }
    }

    /// Validate the draft into a [LabelRecord]
    pub fn into_record(self) -> Result<LabelRecord, LabelError> {
        let quantity = u32::try_from(self.quantity).map_err(|_| LabelError::InvalidRecord {
            field: "quantity",
            reason: if self.quantity > 0 {
                "is too large"
            } else {
                "must be greater than zero"
            },
        })?;
        let record = LabelRecord::new(self.order_id, self.unit_name, self.file_name, quantity)?;
        Ok(match self.person_name {
            Some(name) => record.with_person_name(name),
            None => record,
        })
    }

    fn problems(&self, row: usize) -> Vec<RecordProblem> {
        let mut problems = Vec::new();
        if self.order_id.trim().is_empty() {
            problems.push(RecordProblem {
                row,
                kind: ProblemKind::EmptyOrderId,
            });
        }
        if self.unit_name.trim().is_empty() {
            problems.push(RecordProblem {
                row,
                kind: ProblemKind::EmptyUnit,
            });
        }
        if self.file_name.trim().is_empty() {
            problems.push(RecordProblem {
                row,
                kind: ProblemKind::EmptyFile,
            });
        }
        if self.quantity <= 0 {
            problems.push(RecordProblem {
                row,
                kind: ProblemKind::InvalidQuantity(self.quantity),
            });
        } else if u32::try_from(self.quantity).is_err() {
            problems.push(RecordProblem {
                row,
                kind: ProblemKind::QuantityTooLarge(self.quantity),
            });
        }
        problems
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProblemKind {
    EmptyOrderId,
    EmptyUnit,
    EmptyFile,
    InvalidQuantity(i64),
    QuantityTooLarge(i64),
}

/// A single issue found in an imported row. Rows are numbered from 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordProblem {
    pub row: usize,
    pub kind: ProblemKind,
}

impl fmt::Display for RecordProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ProblemKind::EmptyOrderId => write!(f, "row {}: empty order id", self.row),
            ProblemKind::EmptyUnit => write!(f, "row {}: empty unit", self.row),
            ProblemKind::EmptyFile => write!(f, "row {}: empty file", self.row),
            ProblemKind::InvalidQuantity(q) => {
                write!(f, "row {}: invalid quantity ({q})", self.row)
            }
            ProblemKind::QuantityTooLarge(q) => {
                write!(f, "row {}: quantity too large ({q})", self.row)
            }
        }
    }
}

/// Summary of how many imported rows would make usable labels
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QualityReport {
    pub total: usize,
    pub valid: usize,
    pub with_problems: usize,
    /// The first [MAX_REPORTED_PROBLEMS] problems, in row order
    pub problems: Vec<RecordProblem>,
}

impl QualityReport {
    pub fn is_clean(&self) -> bool {
        self.with_problems == 0
    }
}

/// Check every draft for empty required fields and quantities that cannot be
/// printed on a label
pub fn validate_records(drafts: &[RecordDraft]) -> QualityReport {
    let mut report = QualityReport {
        total: drafts.len(),
        ..QualityReport::default()
    };

    for (i, draft) in drafts.iter().enumerate() {
        let problems = draft.problems(i + 1);
        if problems.is_empty() {
            report.valid += 1;
        }
        report.problems.extend(problems);
    }

    report.with_problems = report.total - report.valid;
    report.problems.truncate(MAX_REPORTED_PROBLEMS);
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_required_fields() {
        let err = LabelRecord::new("", "Unit", "file.pdf", 1).unwrap_err();
        assert!(matches!(
            err,
            LabelError::InvalidRecord {
                field: "order_id",
                ..
            }
        ));
        assert!(LabelRecord::new("OP1", "  ", "file.pdf", 1).is_err());
        assert!(LabelRecord::new("OP1", "Unit", "", 1).is_err());
    }

    #[test]
    fn rejects_zero_quantity() {
        let err = LabelRecord::new("OP1", "Unit", "file.pdf", 0).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid record: quantity must be greater than zero"
        );
    }

    #[test]
    fn blank_person_name_is_absent() {
        let record = LabelRecord::new("OP1", "Unit", "file.pdf", 2)
            .unwrap()
            .with_person_name("   ");
        assert_eq!(record.person_name(), None);

        let record = record.with_person_name("Maria");
        assert_eq!(record.person_name(), Some("Maria"));
    }

    #[test]
    fn drafts_convert_through_validation() {
        let mut draft = RecordDraft::new("OP7", "Campinas", "a.pdf", 3);
        draft.person_name = Some(String::new());
        let record = draft.into_record().unwrap();
        assert_eq!(record.order_id(), "OP7");
        assert_eq!(record.quantity(), 3);
        assert_eq!(record.person_name(), None);

        assert!(RecordDraft::new("OP7", "Campinas", "a.pdf", -4)
            .into_record()
            .is_err());
    }

    #[test]
    fn quality_report_counts_rows_and_caps_problems() {
        let mut drafts = vec![RecordDraft::new("OP1", "Unit", "file.pdf", 1)];
        // every one of these rows has two problems
        for _ in 0..8 {
            drafts.push(RecordDraft::new("", "Unit", "", 1));
        }
        drafts.push(RecordDraft::new("OP2", "Unit", "file.pdf", 0));

        let report = validate_records(&drafts);
        assert_eq!(report.total, 10);
        assert_eq!(report.valid, 1);
        assert_eq!(report.with_problems, 9);
        assert_eq!(report.problems.len(), MAX_REPORTED_PROBLEMS);
        assert_eq!(report.problems[0].row, 2);
        assert_eq!(report.problems[0].to_string(), "row 2: empty order id");
        assert!(!report.is_clean());
    }

    #[test]
    fn oversized_quantity_is_a_problem_and_fails_conversion() {
        let draft = RecordDraft::new("OP3", "Unit", "file.pdf", i64::from(u32::MAX) + 1);
        let report = validate_records(std::slice::from_ref(&draft));
        assert_eq!(report.valid, 0);
        assert_eq!(report.problems[0].to_string(), "row 1: quantity too large (4294967296)");

        let err = draft.into_record().unwrap_err();
        assert_eq!(err.to_string(), "invalid record: quantity is too large");

        let largest = RecordDraft::new("OP3", "Unit", "file.pdf", i64::from(u32::MAX));
        assert!(validate_records(std::slice::from_ref(&largest)).is_clean());
        assert_eq!(largest.into_record().unwrap().quantity(), u32::MAX);
    }

    #[test]
    fn empty_input_is_clean() {
        let report = validate_records(&[]);
        assert_eq!(report, QualityReport::default());
        assert!(report.is_clean());
    }
}
