//! Constraint checking for user-entered values.

use std::fmt;

/// A value to check: free text or a parsed number
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value<'a> {
    Text(&'a str),
    Number(f64),
}

impl fmt::Display for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(s) => f.write_str(s),
            Value::Number(n) => write!(f, "{}", n),
        }
    }
}

/// A value plus the constraints it must satisfy.
///
/// Length constraints only apply to text and range constraints only to
/// numbers; `None` means the constraint is not checked.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Validatable<'a> {
    pub value: Value<'a>,
    pub required: bool,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl<'a> Validatable<'a> {
    /// Unconstrained value
    pub fn new(value: Value<'a>) -> Self {
        Self {
            value,
            required: false,
            min_length: None,
            max_length: None,
            min: None,
            max: None,
        }
    }

    /// Require a non-blank value
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Bound the text length in chars; `None` leaves a side open
    pub fn length(mut self, min: Option<usize>, max: Option<usize>) -> Self {
        self.min_length = min;
        self.max_length = max;
        self
    }

    /// Bound a numeric value; `None` leaves a side open
    pub fn range(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.min = min;
        self.max = max;
        self
    }
}

/// Check every applicable constraint; true when all hold
pub fn validate(input: &Validatable<'_>) -> bool {
    let mut is_valid = true;

    if input.required {
        is_valid &= !input.value.to_string().trim().is_empty();
    }

    if let Value::Text(text) = input.value {
        let len = text.chars().count();
        if let Some(min) = input.min_length {
            is_valid &= len >= min;
        }
        if let Some(max) = input.max_length {
            is_valid &= len <= max;
        }
    }

    // NaN compares false against everything, so it fails any bound
    if let Value::Number(n) = input.value {
        if let Some(min) = input.min {
            is_valid &= n >= min;
        }
        if let Some(max) = input.max {
            is_valid &= n <= max;
        }
    }

    is_valid
}
