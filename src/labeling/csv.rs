//! CSV rendering of labelled batches
//!
//! Produces the text only; writing it anywhere is up to the caller.

use super::batch::BatchResult;
use crate::severity::{SeverityClass, SeverityScheme};

impl BatchResult {
    /// `identifier,percentage,class` rows in input order
    ///
    /// Percentages are written with 4 decimals. When `scheme` carries class
    /// names a `class_name` column is appended.
    pub fn to_csv(&self, scheme: Option<&SeverityScheme>) -> String {
        let named = scheme.is_some_and(|s| s.class_name(SeverityClass(0)).is_some());

        let mut output = String::from("identifier,percentage,class");
        if named {
            output.push_str(",class_name");
        }
        output.push('\n');

        for record in &self.records {
            output.push_str(&escape_field(&record.identifier));
            output.push_str(&format!(",{:.4},{}", record.percentage, record.class));
            if let Some(name) = scheme.and_then(|s| s.class_name(record.class)) {
                output.push(',');
                output.push_str(&escape_field(name));
            }
            output.push('\n');
        }

        output
    }
}

/// Quote fields containing commas, quotes or newlines
fn escape_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
