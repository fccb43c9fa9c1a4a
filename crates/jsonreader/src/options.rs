/// Configuration options for [`TextReader`](crate::TextReader).
///
/// The defaults read standard JSON plus the `NaN`, `Infinity` and
/// `-Infinity` extensions, with nesting depth bounded only by available
/// memory.
///
/// # Examples
///
/// ```rust
/// use jsonreader::{ReaderOptions, TextReader};
///
/// let options = ReaderOptions {
///     max_nesting_depth: Some(64),
///     ..Default::default()
/// };
/// let value = TextReader::with_options("[[1]]", options).unwrap().read().unwrap();
/// assert!(value.is_array());
/// ```
///
/// # Default
///
/// All options default to `false` / `None`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReaderOptions {
    /// Maximum number of simultaneously open arrays and objects.
    ///
    /// Containers are tracked on a heap-allocated stack, so without a limit
    /// the reader accepts any depth that fits in memory. Set a limit when the
    /// input is untrusted.
    ///
    /// # Default
    ///
    /// `None`
    pub max_nesting_depth: Option<usize>,

    /// Whether to reject the non-finite number extensions.
    ///
    /// When `true`, `NaN`, `Infinity` and `-Infinity` are reported as
    /// unexpected tokens, which makes the reader strictly RFC 8259.
    ///
    /// # Default
    ///
    /// `false`
    pub reject_non_finite: bool,

    #[cfg(any(test, feature = "fuzzing"))]
    /// Panic on read errors instead of returning them.
    ///
    /// Enabled only in test and fuzzing builds to produce backtraces at the
    /// error site.
    pub panic_on_error: bool,
}
