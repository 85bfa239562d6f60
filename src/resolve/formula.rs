//! Numeric rendering for formulas and configuration records.
//!
//! All number-to-text decisions live here so sign placement and trailing-zero
//! suppression stay consistent between formulas and record parameters.

use std::fmt::Write;

/// Renders a value without unnecessary trailing zeros: `15`, not `15.0`, but
/// `0.05` preserved. Values are rounded to ten decimal places first, which
/// absorbs float noise like `0.8699999999999999` into `0.87`.
pub fn format_number(value: f64) -> String {
    let mut text = format!("{:.10}", value);
    if text.contains('.') {
        while text.ends_with('0') {
            text.pop();
        }
        if text.ends_with('.') {
            text.pop();
        }
    }
    if text == "-0" {
        text.truncate(0);
        text.push('0');
    }
    text
}

/// An intercept plus weighted parent terms, rendered in the order the terms
/// were added.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearFormula {
    intercept: f64,
    terms: Vec<(f64, String)>,
}

impl LinearFormula {
    pub fn new(intercept: f64) -> Self {
        Self { intercept, terms: Vec::new() }
    }

    pub fn push_term(&mut self, weight: f64, parent: impl Into<String>) {
        self.terms.push((weight, parent.into()));
    }

    /// `"{intercept} + {w1} * {p1} + {w2} * {p2} ..."`
    pub fn render(&self) -> String {
        let mut out = format_number(self.intercept);
        for (weight, parent) in &self.terms {
            // The separator is always " + "; a negative weight carries its
            // own sign, e.g. "5 + -0.3 * X".
            let _ = write!(out, " + {} * {}", format_number(*weight), parent);
        }
        out
    }
}
