//! Log sanitization for questionnaire answers.
//!
//! Answers are health data. The application never logs a whole answer
//! record, but formatted messages can still carry individual values (range
//! warnings, feature rows printed while debugging). This module scrubs them
//! from formatted log output:
//! - Numeric answers written as `age=30`, `weight: 70.5`, `height 1.7 out of range`
//! - Numeric rows such as `[1.0, 30.0, 1.7, 70.0]`
//! - UUIDs
//!
//! # Performance
//!
//! `sanitize()` caps its input at `OBESITY_SANITIZE_MAX_BYTES` (16 KiB by
//! default) so a runaway log line cannot stall the writer.

use regex::{Regex, RegexSet};
use std::sync::OnceLock;
use tracing_subscriber::fmt::MakeWriter;

static PATTERNS: OnceLock<Patterns> = OnceLock::new();

const DEFAULT_SANITIZE_MAX_BYTES: usize = 16 * 1024;

/// Numeric answer names as they appear in log text.
const NUMERIC_FIELDS: &str =
    r"age|idade|height|altura|weight|peso|meals|water|device_time|ch2o|tue|ncp|faf|fcvc";

struct Pattern {
    regex: Regex,
    replacement: &'static str,
}

struct Patterns {
    set: RegexSet,
    rules: Vec<Pattern>,
}

fn truncate_to_char_boundary(input: &str, max_bytes: usize) -> (&str, bool) {
    if input.len() <= max_bytes {
        return (input, false);
    }

    let mut end = max_bytes.min(input.len());
    while end > 0 && !input.is_char_boundary(end) {
        end -= 1;
    }
    (&input[..end], true)
}

fn max_sanitize_bytes() -> usize {
    std::env::var("OBESITY_SANITIZE_MAX_BYTES")
        .ok()
        .and_then(|v| v.parse::<usize>().ok())
        .filter(|&v| v > 0)
        .unwrap_or(DEFAULT_SANITIZE_MAX_BYTES)
}

fn get_patterns() -> &'static Patterns {
    PATTERNS.get_or_init(|| {
        let rules: Vec<(String, &'static str)> = vec![
            (
                r"[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}".into(),
                "[REDACTED-UUID]",
            ),
            // `age=30`, `weight: 70.5`
            (
                format!(r"(?i)\b({NUMERIC_FIELDS})\s*[=:]\s*-?\d+(?:\.\d+)?(?:e-?\d+)?"),
                "${1}=[REDACTED]",
            ),
            // `age 9 out of range [10, 100]`
            (
                format!(r"(?i)\b({NUMERIC_FIELDS})\s+-?\d+(?:\.\d+)?(?:e-?\d+)?\s+out of range"),
                "${1} [REDACTED] out of range",
            ),
            // four or more numbers in brackets: a feature row
            (
                r"\[\s*-?\d+(?:\.\d+)?(?:\s*,\s*-?\d+(?:\.\d+)?){3,}\s*\]".into(),
                "[REDACTED-ROW]",
            ),
        ];

        let set = RegexSet::new(rules.iter().map(|(p, _)| p.as_str())).expect("Valid regex set");
        let rules = rules
            .into_iter()
            .map(|(pattern, replacement)| Pattern {
                regex: Regex::new(&pattern).expect("Valid regex"),
                replacement,
            })
            .collect();

        Patterns { set, rules }
    })
}

/// Sanitize a string by redacting answer values.
#[must_use]
pub fn sanitize(input: &str) -> String {
    sanitize_with_limit(input, max_sanitize_bytes())
}

fn sanitize_with_limit(input: &str, max_bytes: usize) -> String {
    let patterns = get_patterns();
    let (prefix, truncated) = truncate_to_char_boundary(input, max_bytes);

    let mut result = prefix.to_string();
    for idx in patterns.set.matches(prefix).into_iter() {
        let pattern = &patterns.rules[idx];
        result = pattern
            .regex
            .replace_all(&result, pattern.replacement)
            .to_string();
    }

    if truncated {
        result.push_str(" [TRUNCATED]");
    }
    result
}

/// Check if a string carries an answer value.
#[must_use]
pub fn contains_answer_values(input: &str) -> bool {
    let (prefix, _) = truncate_to_char_boundary(input, max_sanitize_bytes());
    get_patterns().set.is_match(prefix)
}

/// A `tracing_subscriber` writer wrapper that sanitizes formatted log lines
/// before they reach the underlying sink.
#[derive(Debug)]
pub struct SanitizingMakeWriter<M> {
    inner: M,
}

impl<M> SanitizingMakeWriter<M> {
    #[must_use]
    pub fn new(inner: M) -> Self {
        Self { inner }
    }
}

impl<M> Clone for SanitizingMakeWriter<M>
where
    M: Clone,
{
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

pub struct SanitizingWriter<W> {
    inner: W,
    buffer: Vec<u8>,
}

impl<W> SanitizingWriter<W> {
    fn new(inner: W) -> Self {
        Self {
            inner,
            buffer: Vec::new(),
        }
    }
}

impl<W> SanitizingWriter<W>
where
    W: std::io::Write,
{
    fn flush_lines(&mut self) -> std::io::Result<()> {
        while let Some(pos) = self.buffer.iter().position(|&b| b == b'\n') {
            let line = self.buffer.drain(..=pos).collect::<Vec<u8>>();
            let sanitized = sanitize(&String::from_utf8_lossy(&line));
            self.inner.write_all(sanitized.as_bytes())?;
        }
        Ok(())
    }
}

impl<W> std::io::Write for SanitizingWriter<W>
where
    W: std::io::Write,
{
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.buffer.extend_from_slice(buf);

        // A huge line without newlines is flushed sanitized and truncated.
        let hard_cap = max_sanitize_bytes().saturating_mul(2);
        if hard_cap > 0 && self.buffer.len() > hard_cap {
            let sanitized = sanitize(&String::from_utf8_lossy(&self.buffer));
            self.inner.write_all(sanitized.as_bytes())?;
            self.inner.write_all(b"\n")?;
            self.buffer.clear();
            return Ok(buf.len());
        }

        self.flush_lines()?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.flush_lines()?;

        if !self.buffer.is_empty() {
            let sanitized = sanitize(&String::from_utf8_lossy(&self.buffer));
            self.inner.write_all(sanitized.as_bytes())?;
            self.buffer.clear();
        }

        self.inner.flush()
    }
}

impl<'a, M> MakeWriter<'a> for SanitizingMakeWriter<M>
where
    M: MakeWriter<'a>,
{
    type Writer = SanitizingWriter<M::Writer>;

    fn make_writer(&'a self) -> Self::Writer {
        SanitizingWriter::new(self.inner.make_writer())
    }
}
