use thiserror::Error;

/// Rejections raised by the codec. Message texts are part of the API contract:
/// they travel unchanged into HTTP 400 bodies.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalendarError {
    /// A month/day pair where at least one argument is not an integral number.
    #[error("Invalid data types")]
    InvalidMonthDayTypes,

    /// An ordinal that is not an integral number.
    #[error("Invalid data type")]
    InvalidOrdinalType,

    #[error("{0} is an invalid month")]
    MonthOutOfRange(i64),

    #[error("{0} is an invalid day")]
    DayOutOfRange(i64),

    #[error("{0} is out of range, does not exists in current calendar")]
    OrdinalOutOfRange(i64),
}
