//! Typed coercion of stored entry strings into scalars, sequences and arrays.

/// Types that can be parsed from a stored configuration value.
///
/// Parsing is strict: the entire string must be consumed, so `"3.3abc"` fails
/// for every numeric target. Values that parse but fall outside the target
/// type's range also fail; callers cannot distinguish the two cases.
///
/// All integer targets parse through a signed 64-bit pivot. A negative value
/// therefore fails for unsigned targets while succeeding for signed ones of
/// sufficient width, and unsigned 64-bit values above `i64::MAX` are
/// rejected. Fractional input such as `"1.9"` fails for integer targets;
/// there is no implicit float-to-int truncation.
pub trait FromEntry: Sized {
    /// Parse `raw` into `Self`, or `None` if the string does not represent a
    /// value of this type.
    fn from_entry(raw: &str) -> Option<Self>;
}

macro_rules! impl_from_entry_int {
    ($($ty:ty)*) => {$(
        impl FromEntry for $ty {
            fn from_entry(raw: &str) -> Option<Self> {
                let wide: i64 = raw.parse().ok()?;
                Self::try_from(wide).ok()
            }
        }
    )*};
}

impl_from_entry_int!(i8 i16 i32 i64 isize u8 u16 u32 u64 usize);

impl FromEntry for f64 {
    fn from_entry(raw: &str) -> Option<Self> {
        // `parse` turns overflowing literals into infinity rather than
        // failing; treat those like any other out-of-range value.
        let value: f64 = raw.parse().ok()?;
        value.is_finite().then_some(value)
    }
}

impl FromEntry for f32 {
    fn from_entry(raw: &str) -> Option<Self> {
        let wide = f64::from_entry(raw)?;
        if wide.abs() > f64::from(f32::MAX) {
            return None;
        }
        Some(wide as f32)
    }
}

impl FromEntry for String {
    fn from_entry(raw: &str) -> Option<Self> {
        Some(raw.to_owned())
    }
}

/// `bool` is not a supported target type: the numeric pivot cannot carry
/// `"1"`/`"0"` truth semantics, so this impl is a documented guaranteed
/// failure rather than a surprise at the call site.
impl FromEntry for bool {
    fn from_entry(_raw: &str) -> Option<Self> {
        None
    }
}

/// Parse a comma-separated value into a vector.
///
/// An empty string yields an empty vector. Otherwise every element between
/// commas must parse; one bad element fails the whole call and partial
/// results are discarded.
pub(crate) fn parse_sequence<T: FromEntry>(raw: &str) -> Option<Vec<T>> {
    if raw.is_empty() {
        return Some(Vec::new());
    }
    raw.split(',').map(T::from_entry).collect()
}

/// Parse the first `N` comma-separated elements into a fixed-size array.
///
/// Elements beyond the first `N` are ignored. Fewer than `N` elements, or a
/// parse failure among the first `N`, fails the call.
pub(crate) fn parse_array<T: FromEntry, const N: usize>(raw: &str) -> Option<[T; N]> {
    let parsed: Vec<T> = raw.split(',').take(N).map(T::from_entry).collect::<Option<_>>()?;
    parsed.try_into().ok()
}
