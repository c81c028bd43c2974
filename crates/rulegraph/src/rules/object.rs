//! Presence rule

use crate::foundation::Rule;

/// Valid when the value is present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NotNullRule;

impl<T> Rule<Option<T>, bool> for NotNullRule {
    fn validate(&self, data: &Option<T>) -> bool {
        data.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_null() {
        assert!(NotNullRule.validate(&Some(0_u8)));
        assert!(!NotNullRule.validate(&None::<String>));
    }
}
