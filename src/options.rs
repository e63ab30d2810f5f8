//! Configuration options for QDN encoding and decoding.
//!
//! ## Examples
//!
//! ```rust
//! use serde_qdn::{to_string_with_options, QdnOptions};
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Greeting { text: String }
//!
//! let greeting = Greeting { text: "hi".to_string() };
//!
//! let options = QdnOptions::new().with_quoted_strings(true);
//! let qdn = to_string_with_options(&greeting, options).unwrap();
//! assert_eq!(qdn, r#"Greeting<text="hi",>"#);
//! ```

/// Default limit on record nesting, top-level record included.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Configuration options for QDN encoding and decoding.
///
/// # Examples
///
/// ```rust
/// use serde_qdn::QdnOptions;
///
/// // Defaults: bare strings, 128 record levels
/// let options = QdnOptions::new();
/// assert!(!options.quote_strings);
/// assert_eq!(options.max_depth, 128);
///
/// let options = QdnOptions::new()
///     .with_quoted_strings(true)
///     .with_max_depth(8);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct QdnOptions {
    /// Wrap string values in `"..."` when encoding. Decoding accepts both forms.
    pub quote_strings: bool,
    /// Maximum number of record levels, top-level included, that encode and
    /// decode will enter.
    pub max_depth: usize,
}

impl Default for QdnOptions {
    fn default() -> Self {
        QdnOptions {
            quote_strings: false,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl QdnOptions {
    /// Creates default options (bare strings, depth limit of 128).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether string values are wrapped in double quotes.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_qdn::QdnOptions;
    ///
    /// let options = QdnOptions::new().with_quoted_strings(true);
    /// assert!(options.quote_strings);
    /// ```
    #[must_use]
    pub fn with_quoted_strings(mut self, quote: bool) -> Self {
        self.quote_strings = quote;
        self
    }

    /// Sets the nesting limit.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Returns an error if a record at `depth` (0 for the top-level record)
    /// would exceed the nesting limit.
    pub(crate) fn check_depth(&self, depth: usize) -> crate::Result<()> {
        if depth >= self.max_depth {
            return Err(crate::Error::depth_limit(self.max_depth));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_depth_check_counts_top_level() {
        let options = QdnOptions::new().with_max_depth(2);
        assert!(options.check_depth(0).is_ok());
        assert!(options.check_depth(1).is_ok());
        assert_eq!(
            options.check_depth(2),
            Err(crate::Error::DepthLimitExceeded { limit: 2 })
        );
    }
}
