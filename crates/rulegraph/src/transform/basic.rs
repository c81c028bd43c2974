//! Small stateless transformers

use std::fmt::Display;

use crate::foundation::Transformer;

/// Returns its input unchanged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Identity;

impl<T> Transformer<T, T> for Identity {
    fn transform(&self, input: T) -> T {
        input
    }
}

/// Boolean negation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Negate;

impl Transformer<bool, bool> for Negate {
    fn transform(&self, input: bool) -> bool {
        !input
    }
}

/// Formats any [`Display`] value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ToDisplayString;

impl<T: Display> Transformer<T, String> for ToDisplayString {
    fn transform(&self, input: T) -> String {
        input.to_string()
    }
}
