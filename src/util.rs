/// Numeric conversion helpers.
///
/// Checked conversions between the integer types the evaluator works with,
/// so that a negative count or an out-of-range index becomes an error value
/// instead of a silent wrap-around.
pub mod num;
