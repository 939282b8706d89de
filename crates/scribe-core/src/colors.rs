//! ANSI color codes for terminal output.
//!
//! Style classes from language definitions map onto a small fixed palette:
//! - Blue: keywords
//! - Green: strings
//! - Yellow: numbers, constants
//! - Magenta: operators, punctuation
//! - Cyan: names, types
//! - Dim: comments, structure, metadata

/// ANSI color palette for CLI output.
///
/// Uses only standard 16-color ANSI codes (no RGB) so output reads well on light
/// and dark terminals alike.
#[derive(Clone, Copy, Debug)]
pub struct Colors {
    pub blue: &'static str,
    pub green: &'static str,
    pub yellow: &'static str,
    pub magenta: &'static str,
    pub cyan: &'static str,
    pub dim: &'static str,
    pub reset: &'static str,
}

impl Default for Colors {
    fn default() -> Self {
        Self::OFF
    }
}

impl Colors {
    /// Colors enabled (ANSI escape codes).
    pub const ON: Self = Self {
        blue: "\x1b[34m",
        green: "\x1b[32m",
        yellow: "\x1b[33m",
        magenta: "\x1b[35m",
        cyan: "\x1b[36m",
        dim: "\x1b[2m",
        reset: "\x1b[0m",
    };

    /// Colors disabled (empty strings).
    pub const OFF: Self = Self {
        blue: "",
        green: "",
        yellow: "",
        magenta: "",
        cyan: "",
        dim: "",
        reset: "",
    };

    /// Create colors based on enabled flag.
    pub fn new(enabled: bool) -> Self {
        if enabled { Self::ON } else { Self::OFF }
    }

    /// Check if colors are enabled.
    pub fn is_enabled(&self) -> bool {
        !self.reset.is_empty()
    }

    /// Escape code for a style class. Unknown classes render uncolored.
    pub fn for_style(&self, class: &str) -> &'static str {
        match class {
            "keyword" => self.blue,
            "string" => self.green,
            "number" | "constant" => self.yellow,
            "operator" | "punctuation" => self.magenta,
            "name" | "type" | "property" => self.cyan,
            "comment" => self.dim,
            _ => "",
        }
    }
}
