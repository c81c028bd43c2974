//! String length rules
//!
//! Both rules accept `String` and `Option<String>` data. An absent string
//! has length 0. Lengths are counted in characters, after trimming
//! surrounding whitespace when the rule is built with
//! [`trimmed`](StringLengthGreaterThanRule::trimmed).

use crate::foundation::Rule;

fn measure(value: Option<&str>, trim: bool) -> usize {
    value.map_or(0, |value| {
        let value = if trim { value.trim() } else { value };
        value.chars().count()
    })
}

/// Valid when the string is strictly longer than a limit.
///
/// # Examples
///
/// ```rust,ignore
/// use rulegraph::rules::StringLengthGreaterThanRule;
///
/// let not_blank = StringLengthGreaterThanRule::new(0).trimmed();
/// assert!(!not_blank.validate(&String::from("   ")));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StringLengthGreaterThanRule {
    limit: usize,
    trim: bool,
}

impl StringLengthGreaterThanRule {
    /// Creates a rule requiring more than `limit` characters.
    pub const fn new(limit: usize) -> Self {
        Self { limit, trim: false }
    }

    /// Measures the string after trimming surrounding whitespace.
    #[must_use]
    pub const fn trimmed(mut self) -> Self {
        self.trim = true;
        self
    }

    /// Returns the exclusive lower bound.
    pub const fn limit(&self) -> usize {
        self.limit
    }

    fn check(&self, value: Option<&str>) -> bool {
        measure(value, self.trim) > self.limit
    }
}

impl Rule<String, bool> for StringLengthGreaterThanRule {
    fn validate(&self, data: &String) -> bool {
        self.check(Some(data))
    }
}

impl Rule<Option<String>, bool> for StringLengthGreaterThanRule {
    fn validate(&self, data: &Option<String>) -> bool {
        self.check(data.as_deref())
    }
}

/// Valid when the string has exactly a given length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StringLengthEqualToRule {
    length: usize,
    trim: bool,
}

impl StringLengthEqualToRule {
    /// Creates a rule requiring exactly `length` characters.
    pub const fn new(length: usize) -> Self {
        Self { length, trim: false }
    }

    /// Measures the string after trimming surrounding whitespace.
    #[must_use]
    pub const fn trimmed(mut self) -> Self {
        self.trim = true;
        self
    }

    /// Returns the expected length.
    pub const fn length(&self) -> usize {
        self.length
    }

    fn check(&self, value: Option<&str>) -> bool {
        measure(value, self.trim) == self.length
    }
}

impl Rule<String, bool> for StringLengthEqualToRule {
    fn validate(&self, data: &String) -> bool {
        self.check(Some(data))
    }
}

impl Rule<Option<String>, bool> for StringLengthEqualToRule {
    fn validate(&self, data: &Option<String>) -> bool {
        self.check(data.as_deref())
    }
}
