use crate::record::MonthKey;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("Month {key} appears more than once (record '{label}')")]
    DuplicateMonth { key: MonthKey, label: String },

    #[error("Record '{label}' ({key}) is not after the preceding month {previous}")]
    OutOfOrder {
        key: MonthKey,
        previous: MonthKey,
        label: String,
    },
}
