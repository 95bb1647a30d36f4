/// Resolves a signed position into an offset into a sequence of `len` elements.
///
/// Non-negative positions count from the front (`0` is the first element).
/// Negative positions count from the back (`-1` is the last element, `-len` is
/// the first). Returns `None` when `n` falls outside `[-len, len)`.
#[inline]
pub(crate) fn resolve(n: isize, len: usize) -> Option<usize> {
    if n >= 0 {
        let n = n.unsigned_abs();
        (n < len).then_some(n)
    } else {
        // `unsigned_abs` keeps `isize::MIN` from overflowing.
        len.checked_sub(n.unsigned_abs())
    }
}
