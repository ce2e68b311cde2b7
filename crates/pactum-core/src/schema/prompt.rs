//! Prompt rendering
//!
//! Copyright (c) 2025 Pactum Team
//! Licensed under the Apache-2.0 license

use super::Schema;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use serde_json::Value;

const LEAD: &str = "Fill in **valid JSON** for the fields below.";
const TRAILER: &str = "Return **only** the JSON object — no code-fences, no comments.";
const INDENT: &str = "  ";

impl Schema {
    /// Prompt text using the thread-local RNG for the example
    pub fn prompt(&self) -> String {
        self.prompt_with_rng(&mut rand::thread_rng())
    }

    /// Byte-for-byte reproducible prompt
    pub fn prompt_seeded(&self, seed: u64) -> String {
        self.prompt_with_rng(&mut StdRng::seed_from_u64(seed))
    }

    pub fn prompt_with_rng(&self, rng: &mut dyn RngCore) -> String {
        self.render_prompt(rng, self.preamble())
    }

    /// Render the prompt with an explicit preamble in place of the schema's
    pub fn render_prompt(&self, rng: &mut dyn RngCore, preamble: Option<&str>) -> String {
        let mut out = String::new();
        if let Some(preamble) = preamble.filter(|p| !p.trim().is_empty()) {
            out.push_str(preamble.trim_end());
            out.push_str("\n\n");
        }

        out.push_str(LEAD);
        if let Some(header) = self.header() {
            out.push_str(" – **");
            out.push_str(header);
            out.push_str("**");
        }
        out.push_str("\n\nRules\n");
        out.push_str(&self.rule_lines().join("\n"));
        out.push_str("\n\n");

        let examples = self.all_examples(rng);
        if examples.len() == 1 {
            out.push_str("Example:\n");
            out.push_str(&pretty(&examples[0]));
        } else {
            let blocks: Vec<String> = examples
                .iter()
                .enumerate()
                .map(|(i, example)| format!("Example {}:\n{}", i + 1, pretty(example)))
                .collect();
            out.push_str(&blocks.join("\n\n"));
        }

        out.push_str("\n\n");
        out.push_str(TRAILER);
        out
    }

    /// One line per field, nested schemas indented below their field
    pub fn rule_lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        self.push_rule_lines(&mut lines, "", 0);
        lines
    }

    fn push_rule_lines(&self, lines: &mut Vec<String>, prefix: &str, depth: usize) {
        let indent = INDENT.repeat(depth);
        for field in self.fields() {
            let mut line = format!(
                "{}- {}{} must be {}",
                indent,
                prefix,
                field.name(),
                field.rule().describe()
            );
            if !field.is_required() {
                line.push_str(" (optional)");
            }
            if let Some(note) = field.note() {
                line.push_str("  – ");
                line.push_str(note);
            }
            lines.push(line);

            for (suffix, nested) in field.rule().nested() {
                let child_prefix = format!("{}{}{}.", prefix, field.name(), suffix);
                nested.push_rule_lines(lines, &child_prefix, depth + 1);
            }
        }
    }

    /// Re-prompt asking the model to fix `data`
    ///
    /// The problem block is left out when `data` is valid.
    pub fn repair_prompt(&self, data: &Value) -> String {
        let mut out = String::from("The JSON below is invalid.\n\n");
        if let Some((actual, expected)) = self.validate_with_error(data).messages() {
            out.push_str(&format!(
                "Problem:\n- {}\n  Expected:\n {}\n\n",
                actual, expected
            ));
        }
        out.push_str("Rules:\n");
        out.push_str(&self.rule_lines().join("\n"));
        out.push_str("\n\nCurrent value (invalid):\n```json\n");
        out.push_str(&pretty(data));
        out.push_str("\n```\n\nReply with **only** the corrected JSON object.");
        out
    }
}

fn pretty(value: &Value) -> String {
    // serializing a Value cannot fail
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}
