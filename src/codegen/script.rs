//! Serializes configuration records into the textual program handed to the
//! external generation runtime.
//!
//! The output is plain R source: a `study_vars` list literal followed by the
//! fixed driver invocation. The driver routine itself is supplied by the
//! runtime, which prepends its own prelude before execution and answers with
//! headered CSV rows. Generation performs no I/O and has no side effects.

use super::record::{records, NodeRecord, RecordBody};
use crate::model::StudyDesign;
use crate::resolve::{format_number, ResolvedModel};
use std::fmt::Write;

/// Renders the full generation program for `design`, assuming `resolved` was
/// produced from the same design. `rows` is emitted verbatim as the sample
/// size argument.
pub fn generate_script(design: &StudyDesign, resolved: &ResolvedModel, rows: u32) -> String {
    let mut builder = ScriptBuilder::default();
    builder.config_block(&records(design, resolved));
    builder.driver_call(rows);
    builder.finish()
}

#[derive(Default)]
struct ScriptBuilder {
    out: String,
}

impl ScriptBuilder {
    fn config_block(&mut self, records: &[NodeRecord]) {
        if records.is_empty() {
            self.out.push_str("study_vars <- list()\n");
            return;
        }

        self.out.push_str("study_vars <- list(\n");
        for (index, record) in records.iter().enumerate() {
            self.out.push_str("  ");
            self.record(record);
            if index + 1 < records.len() {
                self.out.push(',');
            }
            self.out.push('\n');
        }
        self.out.push_str(")\n");
    }

    fn record(&mut self, record: &NodeRecord) {
        let _ = write!(
            self.out,
            "list(varname = {}, type = \"{}\"",
            r_string(&record.name),
            record.family
        );

        match &record.body {
            RecordBody::Formula { formula, variance } => {
                let _ = write!(
                    self.out,
                    ", formula = {}, variance = {}",
                    r_string(formula),
                    format_number(*variance)
                );
            }
            RecordBody::Range { min, max } => {
                let _ = write!(
                    self.out,
                    ", min = {}, max = {}",
                    format_number(*min),
                    format_number(*max)
                );
            }
            RecordBody::Labels { labels, order } => {
                self.out.push_str(", labels = c(");
                for (index, label) in labels.iter().enumerate() {
                    if index > 0 {
                        self.out.push_str(", ");
                    }
                    self.out.push_str(&r_string(label));
                }
                let _ = write!(self.out, "), order = {}", order);
            }
        }

        if !record.parents.is_empty() {
            self.out.push_str(", parents = list(");
            for (index, parent) in record.parents.iter().enumerate() {
                if index > 0 {
                    self.out.push_str(", ");
                }
                let _ = write!(
                    self.out,
                    "list(source = {}, coef = {}, type = \"{}\")",
                    r_string(&parent.source),
                    format_number(parent.coefficient),
                    parent.kind.label()
                );
            }
            self.out.push(')');
        }

        self.out.push(')');
    }

    fn driver_call(&mut self, rows: u32) {
        let _ = write!(self.out, "\ngenerate_study_data(study_vars, n = {})\n", rows);
    }

    fn finish(self) -> String {
        self.out
    }
}

/// Quotes a value as an R string literal.
fn r_string(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for ch in value.chars() {
        if ch == '"' || ch == '\\' {
            quoted.push('\\');
        }
        quoted.push(ch);
    }
    quoted.push('"');
    quoted
}
