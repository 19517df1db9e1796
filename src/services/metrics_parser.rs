//! Regex extraction of shot metrics from recognized text
//!
//! Pure deterministic stage: for each of the five fields, a tolerant
//! case-insensitive pattern matches a set of label synonyms, an optional
//! colon/whitespace separator, an integer-or-decimal value, and an
//! optional unit suffix. First match per field wins; unmatched fields are
//! left absent.

use crate::types::PartialMetrics;
use regex::Regex;

/// Compiled per-field patterns
///
/// Compiled once at construction; `parse` is allocation-light and safe to
/// call on every request.
#[derive(Debug, Clone)]
pub struct MetricsParser {
    ball_speed: Regex,
    launch_angle: Regex,
    spin_rate: Regex,
    carry: Regex,
    total: Regex,
}

impl MetricsParser {
    pub fn new() -> Self {
        Self {
            ball_speed: pattern(r"(?i)(?:ball\s*speed|velocity|BS)[:\s]*(\d+(?:\.\d+)?)\s*(?:mph)?"),
            launch_angle: pattern(
                r"(?i)(?:launch\s*angle|launch|LA|vert\s*angle)[:\s]*(\d+(?:\.\d+)?)\s*(?:deg|degrees|°)?",
            ),
            spin_rate: pattern(r"(?i)(?:spin\s*rate|spin|rpm|SR)[:\s]*(\d+(?:\.\d+)?)\s*(?:rpm)?"),
            carry: pattern(r"(?i)(?:carry\s*distance|carry|CRY)[:\s]*(\d+(?:\.\d+)?)\s*(?:yds|yards)?"),
            total: pattern(r"(?i)(?:total\s*distance|total|TOT)[:\s]*(\d+(?:\.\d+)?)\s*(?:yds|yards)?"),
        }
    }

    /// Extract whatever fields the text yields.
    pub fn parse(&self, text: &str) -> PartialMetrics {
        PartialMetrics {
            ball_speed: capture_value(&self.ball_speed, text),
            launch_angle: capture_value(&self.launch_angle, text),
            spin_rate: capture_value(&self.spin_rate, text),
            carry: capture_value(&self.carry, text),
            total: capture_value(&self.total, text),
        }
    }
}

impl Default for MetricsParser {
    fn default() -> Self {
        Self::new()
    }
}

fn pattern(p: &str) -> Regex {
    Regex::new(p).expect("hard-coded metric pattern is valid")
}

fn capture_value(re: &Regex, text: &str) -> Option<f64> {
    re.captures(text)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse().ok())
}
