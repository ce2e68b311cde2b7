//! Fuzzy excerpt matching against a source text
//!
//! An [`Excerpt`] accepts text that closely matches some passage of a
//! source document, for prompts that ask a model to quote from material it
//! was given. Both sides are normalized first: runs of non-word characters
//! collapse to one space and everything is lowercased, so punctuation and
//! case differences do not count against a quote.
//!
//! The source is cut into overlapping windows of `window` characters,
//! `stride` characters apart. A candidate is scored against the
//! candidate-sized slice starting at each word boundary of each window,
//! using the Sørensen-Dice bigram similarity. Quotes up to
//! `window - stride` characters always fit inside one window.
//!
//! Copyright (c) 2025 Pactum Team
//! Licensed under the Apache-2.0 license

use crate::error::{Result, SchemaError};
use crate::path::FieldPath;
use crate::rule::Rule;
use crate::validation::ValidationError;
use rand::RngCore;
use regex::Regex;
use serde_json::Value;

pub const DEFAULT_WINDOW: usize = 500;
pub const DEFAULT_STRIDE: usize = 250;
pub const DEFAULT_THRESHOLD: f64 = 0.75;

/// Shortest normalized candidate that can match
pub const MIN_EXCERPT_CHARS: usize = 30;

const SAMPLE_WORDS: usize = 30;

/// Text that closely matches a passage of a source document
#[derive(Debug, Clone)]
pub struct Excerpt {
    separators: Regex,
    source: Vec<char>,
    windows: Vec<(usize, usize)>,
    word_starts: Vec<usize>,
    window: usize,
    stride: usize,
    threshold: f64,
    sample: String,
}

impl Excerpt {
    /// Excerpt rule with the default window and stride
    pub fn new(source: &str, threshold: f64) -> Result<Self> {
        Self::with_window(source, threshold, DEFAULT_WINDOW, DEFAULT_STRIDE)
    }

    pub fn with_window(source: &str, threshold: f64, window: usize, stride: usize) -> Result<Self> {
        let invalid = |reason: String| SchemaError::InvalidExcerpt { reason };

        if !threshold.is_finite() || threshold <= 0.0 || threshold > 1.0 {
            return Err(invalid(format!("threshold must lie in (0, 1], got {}", threshold)));
        }
        if window < MIN_EXCERPT_CHARS {
            return Err(invalid(format!(
                "window must hold at least {} characters, got {}",
                MIN_EXCERPT_CHARS, window
            )));
        }
        if stride == 0 || stride > window {
            return Err(invalid(format!(
                "stride must lie between 1 and the window ({}), got {}",
                window, stride
            )));
        }

        let separators = Regex::new(r"\W+").map_err(|e| SchemaError::InvalidPattern {
            pattern: r"\W+".to_string(),
            source: e,
        })?;
        let source: Vec<char> = normalize(&separators, source).chars().collect();
        if source.len() < MIN_EXCERPT_CHARS {
            return Err(invalid(format!(
                "source has {} characters after normalization, at least {} are needed",
                source.len(),
                MIN_EXCERPT_CHARS
            )));
        }

        let windows = (0..source.len())
            .step_by(stride)
            .map(|start| (start, (start + window).min(source.len())))
            .collect();
        let word_starts: Vec<usize> = (0..source.len())
            .filter(|&i| source[i] != ' ' && (i == 0 || source[i - 1] == ' '))
            .collect();
        let sample = sample_prefix(&source, &word_starts, window);

        Ok(Self {
            separators,
            source,
            windows,
            word_starts,
            window,
            stride,
            threshold,
            sample,
        })
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn window(&self) -> usize {
        self.window
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Best similarity of `text` to any passage, `None` when it is too short
    pub fn similarity(&self, text: &str) -> Option<f64> {
        let candidate = normalize(&self.separators, text);
        let length = candidate.chars().count();
        if length < MIN_EXCERPT_CHARS {
            return None;
        }

        let mut best: f64 = 0.0;
        for &(start, end) in &self.windows {
            let first = self.word_starts.partition_point(|&i| i < start);
            let last = self.word_starts.partition_point(|&i| i < end);
            let offsets = std::iter::once(start).chain(self.word_starts[first..last].iter().copied());
            for offset in offsets {
                let stop = (offset + length).min(end);
                let passage: String = self.source[offset..stop].iter().collect();
                let score = strsim::sorensen_dice(&candidate, &passage);
                if score >= self.threshold {
                    return Some(score);
                }
                best = best.max(score);
            }
        }
        Some(best)
    }
}

fn normalize(separators: &Regex, text: &str) -> String {
    separators.replace_all(text, " ").trim().to_lowercase()
}

/// Leading words of the source: a third of them, at most [`SAMPLE_WORDS`],
/// extended to [`MIN_EXCERPT_CHARS`] and kept inside the first window
fn sample_prefix(source: &[char], word_starts: &[usize], window: usize) -> String {
    let wanted = (word_starts.len() / 3).clamp(1, SAMPLE_WORDS);
    let word_end = |start: usize| {
        source[start..]
            .iter()
            .position(|&c| c == ' ')
            .map_or(source.len(), |p| start + p)
    };

    let mut end = 0;
    for (count, &start) in word_starts.iter().enumerate() {
        end = word_end(start);
        if count + 1 >= wanted && end >= MIN_EXCERPT_CHARS {
            break;
        }
    }
    let mut end = end.max(MIN_EXCERPT_CHARS).min(window).min(source.len());
    // Never end on a separator, trimming would fall below the minimum
    if source[end - 1] == ' ' {
        end = (end + 1).min(source.len());
    }
    source[..end].iter().collect()
}

impl Rule for Excerpt {
    fn describe(&self) -> String {
        format!(
            "text closely matching a passage of the source (at least {}% similar)",
            (self.threshold * 100.0).round() as u32
        )
    }

    fn example(&self, _rng: &mut dyn RngCore) -> Value {
        Value::String(self.sample.clone())
    }

    fn validate(&self, value: &Value) -> bool {
        value
            .as_str()
            .and_then(|text| self.similarity(text))
            .is_some_and(|score| score >= self.threshold)
    }

    fn check(&self, value: &Value, path: &FieldPath) -> std::result::Result<(), ValidationError> {
        if !value.is_string() {
            return Err(ValidationError::type_mismatch(
                path.clone(),
                "string",
                value,
                &self.describe(),
            ));
        }
        if self.validate(value) {
            Ok(())
        } else {
            Err(ValidationError::rule_violation(path.clone(), &self.describe()))
        }
    }
}
