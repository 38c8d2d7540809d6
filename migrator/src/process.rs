//! Line-by-line processing of insight document files.

use crate::error::Result;
use insight::SerializedInsight;
use log::warn;
use serde_json::Value;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;

/// Outcome of one pass over a document file.
#[derive(Debug, Default)]
pub struct Summary {
    pub total: usize,
    pub failed: usize,
}

impl Summary {
    pub fn all_ok(&self) -> bool {
        self.failed == 0
    }
}

/// Rewrites every document in `input` into the canonical schema.
///
/// Bad lines are logged and counted; good lines are written one per line to
/// `output` (stdout when none is given).
pub fn normalize(input: &Path, output: Option<&Path>) -> Result<Summary> {
    let mut sink: Box<dyn Write> = match output {
        Some(path) => Box::new(File::create(path)?),
        None => Box::new(io::stdout()),
    };
    let summary = process_lines(input, |line| {
        let document = SerializedInsight::from_json(line)?;
        writeln!(sink, "{}", document.to_json()?)?;
        Ok(())
    })?;
    sink.flush()?;
    Ok(summary)
}

/// Decodes every document in `input` down to an insight record.
///
/// In strict mode a document mixing canonical and deprecated keys counts
/// as a failure.
pub fn check(input: &Path, strict: bool) -> Result<Summary> {
    process_lines(input, |line| {
        let value: Value = serde_json::from_str(line).map_err(insight::InsightError::from)?;
        let document = if strict {
            SerializedInsight::from_document_strict(value)?
        } else {
            SerializedInsight::from_document(value)?
        };
        document.to_insight()?;
        Ok(())
    })
}

fn process_lines(input: &Path, mut handle: impl FnMut(&str) -> Result<()>) -> Result<Summary> {
    let reader = BufReader::new(File::open(input)?);
    let mut summary = Summary::default();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        summary.total += 1;
        if let Err(e) = handle(&line) {
            warn!("line {}: {}", index + 1, e);
            summary.failed += 1;
        }
    }
    Ok(summary)
}
