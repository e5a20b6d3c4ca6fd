//! Monolith indexing
//!
//! The legacy single-file source is carved into logical units by paired
//! sentinel comment lines:
//!
//! ```text
//! // ==BEGIN pet-automation==
//! ...unit code...
//! // ==END pet-automation==
//! ```
//!
//! Scanning produces an ordered list of byte-range segments that partitions
//! the file: marker lines belong to their unit, and everything outside any
//! section belongs to the synthetic [`UNCLASSIFIED`] unit. Concatenating all
//! segments in order reproduces the input byte-for-byte, which is what lets a
//! zero-module build degenerate to a faithful copy.

use std::collections::HashSet;
use std::ops::Range;

use crate::descriptor::is_valid_id;
use crate::error::{Result, WeldError};

/// Id of the synthetic unit owning all unmarked regions. Always
/// monolith-origin, never extractable by reference.
pub const UNCLASSIFIED: &str = "unclassified";

const BEGIN_PREFIX: &str = "==BEGIN";
const END_PREFIX: &str = "==END";
const MARKER_SUFFIX: &str = "==";

/// One contiguous byte range of the monolith attributed to a single unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// Unit id, or [`UNCLASSIFIED`] for unmarked regions
    pub unit: String,

    /// Byte range into the monolith text, marker lines included
    pub range: Range<usize>,
}

/// Ordered index of the monolith source. Built once per build, discarded
/// after assembly.
#[derive(Debug, Clone, Default)]
pub struct MonolithIndex {
    /// Segments in file order, partitioning the input
    pub segments: Vec<Segment>,

    /// Marked unit ids in first-appearance order (excludes [`UNCLASSIFIED`])
    units: Vec<String>,
}

enum Marker {
    Begin(String),
    End(String),
}

/// Recognize a sentinel marker line. `Ok(None)` for ordinary lines;
/// `Err(reason)` for lines that look like a marker but do not parse.
fn parse_marker(line: &str) -> std::result::Result<Option<Marker>, String> {
    let Some(body) = line.trim().strip_prefix("//").map(str::trim) else {
        return Ok(None);
    };

    for (prefix, is_begin) in [(BEGIN_PREFIX, true), (END_PREFIX, false)] {
        let Some(rest) = body.strip_prefix(prefix) else {
            continue;
        };
        // Prose like "==BEGINNING" is not a marker
        if !rest.starts_with(char::is_whitespace) && rest != MARKER_SUFFIX {
            continue;
        }
        let Some(id) = rest.trim().strip_suffix(MARKER_SUFFIX).map(str::trim) else {
            return Err(format!("marker '{body}' is missing its closing =="));
        };
        if !is_valid_id(id) {
            return Err(format!("invalid unit id in marker '{body}'"));
        }
        let id = id.to_string();
        return Ok(Some(if is_begin {
            Marker::Begin(id)
        } else {
            Marker::End(id)
        }));
    }

    Ok(None)
}

impl MonolithIndex {
    /// Scan the monolith text into an index.
    ///
    /// Fails with [`WeldError::IndexError`] on nested or overlapping
    /// sections, an END without a matching BEGIN, an unterminated section,
    /// a malformed marker line, or a unit id marked twice non-contiguously
    /// (re-opening the most recently closed unit is allowed and merges into
    /// the same unit).
    pub fn scan(text: &str) -> Result<Self> {
        let mut segments: Vec<Segment> = Vec::new();
        let mut units: Vec<String> = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();

        // (unit id, section start offset, BEGIN line number)
        let mut open: Option<(String, usize, usize)> = None;
        let mut last_closed: Option<String> = None;
        let mut unmarked_start = 0usize;
        let mut offset = 0usize;

        for (number, line) in text.split_inclusive('\n').enumerate() {
            let line_number = number + 1;
            let line_start = offset;
            offset += line.len();

            let marker = parse_marker(line).map_err(|reason| WeldError::IndexError {
                reason,
                line: line_number,
            })?;

            match marker {
                Some(Marker::Begin(unit)) => {
                    if unit == UNCLASSIFIED {
                        return Err(WeldError::IndexError {
                            reason: format!(
                                "unit id '{UNCLASSIFIED}' is reserved for unmarked code"
                            ),
                            line: line_number,
                        });
                    }
                    if let Some((ref open_unit, _, _)) = open {
                        return Err(WeldError::IndexError {
                            reason: format!(
                                "section '{unit}' opened inside still-open section '{open_unit}'"
                            ),
                            line: line_number,
                        });
                    }
                    if seen.contains(&unit) && last_closed.as_deref() != Some(unit.as_str()) {
                        return Err(WeldError::IndexError {
                            reason: format!("unit '{unit}' marked twice non-contiguously"),
                            line: line_number,
                        });
                    }
                    if unmarked_start < line_start {
                        segments.push(Segment {
                            unit: UNCLASSIFIED.to_string(),
                            range: unmarked_start..line_start,
                        });
                    }
                    open = Some((unit, line_start, line_number));
                }
                Some(Marker::End(unit)) => {
                    let Some((open_unit, start, _)) = open.take() else {
                        return Err(WeldError::IndexError {
                            reason: format!("END '{unit}' without a matching BEGIN"),
                            line: line_number,
                        });
                    };
                    if open_unit != unit {
                        return Err(WeldError::IndexError {
                            reason: format!(
                                "END '{unit}' does not close open section '{open_unit}'"
                            ),
                            line: line_number,
                        });
                    }
                    if seen.insert(unit.clone()) {
                        units.push(unit.clone());
                    }
                    segments.push(Segment {
                        unit: unit.clone(),
                        range: start..offset,
                    });
                    last_closed = Some(unit);
                    unmarked_start = offset;
                }
                None => {}
            }
        }

        if let Some((unit, _, begin_line)) = open {
            return Err(WeldError::IndexError {
                reason: format!("section '{unit}' opened at line {begin_line} is never closed"),
                line: begin_line,
            });
        }
        if unmarked_start < text.len() {
            segments.push(Segment {
                unit: UNCLASSIFIED.to_string(),
                range: unmarked_start..text.len(),
            });
        }

        Ok(MonolithIndex { segments, units })
    }

    /// Marked unit ids in first-appearance order
    pub fn units(&self) -> &[String] {
        &self.units
    }

    /// Whether the monolith still marks the given unit
    pub fn contains(&self, unit: &str) -> bool {
        self.units.iter().any(|u| u == unit)
    }
}
