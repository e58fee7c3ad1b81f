//! Branch trace decoding.
//!
//! A trace is a text stream with one branch event per line:
//!
//! ```text
//! 0x<pc>  0x<target>  <taken>  <conditional>  <call>  <return>  <direct>
//! ```
//!
//! Addresses are hexadecimal (the `0x` prefix is optional) and must fit in 32
//! bits; the five flags are `0` or `1`. Fields are separated by tabs or any
//! whitespace. Blank lines are ignored and fields past the seventh are not
//! inspected.
//!
//! Decoding problems are reported per line as [`TraceError::Malformed`] so the
//! caller decides whether to skip the line or stop.

use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use crate::common::{Outcome, TraceError};

/// Number of fields in a trace record.
const FIELDS: usize = 7;

/// One decoded branch event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct BranchRecord {
    /// Address of the branch instruction.
    pub pc: u32,
    /// Resolved target address.
    pub target: u32,
    /// Observed direction.
    pub outcome: Outcome,
    /// Conditional branch; only these are predicted and trained.
    pub conditional: bool,
    /// Call instruction.
    pub call: bool,
    /// Return instruction.
    pub ret: bool,
    /// Direct (target encoded in the instruction).
    pub direct: bool,
}

impl BranchRecord {
    /// Builds a direct conditional branch record with no target.
    pub const fn conditional(pc: u32, outcome: Outcome) -> Self {
        Self {
            pc,
            target: 0,
            outcome,
            conditional: true,
            call: false,
            ret: false,
            direct: true,
        }
    }

    /// Decodes one trace line.
    ///
    /// `line_no` is 1-based and only used for error reporting.
    ///
    /// # Errors
    ///
    /// Returns [`TraceError::Malformed`] if the line has fewer than seven
    /// fields, an address is not hexadecimal or wider than 32 bits, or a flag
    /// is not `0`/`1`.
    pub fn parse(line: &str, line_no: usize) -> Result<Self, TraceError> {
        decode(line).map_err(|reason| TraceError::Malformed {
            line: line_no,
            reason,
        })
    }
}

impl fmt::Display for BranchRecord {
    /// Formats the record as a trace line.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:#x}\t{:#x}\t{}\t{}\t{}\t{}\t{}",
            self.pc,
            self.target,
            self.outcome,
            u8::from(self.conditional),
            u8::from(self.call),
            u8::from(self.ret),
            u8::from(self.direct)
        )
    }
}

fn decode(line: &str) -> Result<BranchRecord, String> {
    let fields: Vec<&str> = line.split_whitespace().take(FIELDS).collect();
    if fields.len() < FIELDS {
        return Err(format!(
            "expected {FIELDS} fields, found {}",
            fields.len()
        ));
    }
    Ok(BranchRecord {
        pc: address(fields[0], "pc")?,
        target: address(fields[1], "target")?,
        outcome: flag(fields[2], "taken")?.into(),
        conditional: flag(fields[3], "conditional")?,
        call: flag(fields[4], "call")?,
        ret: flag(fields[5], "return")?,
        direct: flag(fields[6], "direct")?,
    })
}

fn address(field: &str, name: &str) -> Result<u32, String> {
    let digits = field
        .strip_prefix("0x")
        .or_else(|| field.strip_prefix("0X"))
        .unwrap_or(field);
    u32::from_str_radix(digits, 16).map_err(|e| format!("{name} `{field}`: {e}"))
}

fn flag(field: &str, name: &str) -> Result<bool, String> {
    match field {
        "0" => Ok(false),
        "1" => Ok(true),
        _ => Err(format!("{name} flag `{field}` is not 0 or 1")),
    }
}

/// Iterator over the records of a trace.
///
/// Yields one item per non-blank line. An I/O error or a malformed line is
/// yielded as an `Err` and iteration continues with the next line.
#[derive(Debug)]
pub struct TraceReader<R> {
    /// Underlying line source.
    reader: R,
    /// Reused line buffer.
    buf: String,
    /// 1-based number of the last line read.
    line_no: usize,
}

impl<R: BufRead> TraceReader<R> {
    /// Wraps a buffered reader.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: String::new(),
            line_no: 0,
        }
    }
}

impl TraceReader<BufReader<File>> {
    /// Opens a trace file.
    ///
    /// # Errors
    ///
    /// Returns [`TraceError::Io`] if the file cannot be opened.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, TraceError> {
        Ok(Self::new(BufReader::new(File::open(path)?)))
    }
}

impl<R: BufRead> Iterator for TraceReader<R> {
    type Item = Result<BranchRecord, TraceError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.buf.clear();
            match self.reader.read_line(&mut self.buf) {
                Ok(0) => return None,
                Ok(_) => {
                    self.line_no += 1;
                    let line = self.buf.trim();
                    if !line.is_empty() {
                        return Some(BranchRecord::parse(line, self.line_no));
                    }
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => {
                    self.line_no += 1;
                    return Some(Err(e.into()));
                }
            }
        }
    }
}
