/// Converts an `i64` to `usize` if it is non-negative and fits.
///
/// ## Errors
/// Returns `Err(error)` for negative values and for values larger than
/// `usize::MAX` on the current target.
///
/// ## Parameters
/// - `value`: The integer to convert.
/// - `error`: The error to return if the conversion is not possible.
///
/// ## Example
/// ```
/// use mtl::util::num::i64_to_usize_checked;
///
/// assert_eq!(i64_to_usize_checked(42, "negative"), Ok(42));
/// assert_eq!(i64_to_usize_checked(-1, "negative"), Err("negative"));
/// ```
pub fn i64_to_usize_checked<E>(value: i64, error: E) -> Result<usize, E> {
    usize::try_from(value).map_err(|_| error)
}

