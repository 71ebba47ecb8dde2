//! Terminal rendering of results, pending indicators and errors.
//!
//! Color comes from `colored` and is dropped when output is not a terminal
//! or `--no-color` is set. Each surface has its own labels and badge style.

use colored::{ColoredString, Colorize};
use oracle_core::{GenderCategory, InferenceResult};

/// Width of the confidence bar, in cells
pub const BAR_WIDTH: usize = 20;

const FILLED: char = '█';
const EMPTY: char = '░';

/// Which view a piece of output belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surface {
    Text,
    Image,
}

impl Surface {
    fn title(self) -> &'static str {
        match self {
            Self::Text => "Analysis Result",
            Self::Image => "Visual Detection",
        }
    }

    fn confidence_label(self) -> &'static str {
        match self {
            Self::Text => "Confidence Score",
            Self::Image => "AI Certainty",
        }
    }

    fn pending_label(self) -> &'static str {
        match self {
            Self::Text => "Analyzing...",
            Self::Image => "Analyzing visual patterns...",
        }
    }
}

/// Number of filled cells for a confidence value, clamped to the bar.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn confidence_cells(confidence: f64) -> usize {
    let cells = (confidence.clamp(0.0, 1.0) * BAR_WIDTH as f64).round() as usize;
    cells.min(BAR_WIDTH)
}

pub fn confidence_bar(confidence: f64) -> String {
    let filled = confidence_cells(confidence);
    format!(
        "{}{}",
        FILLED.to_string().repeat(filled),
        EMPTY.to_string().repeat(BAR_WIDTH - filled)
    )
}

/// RGB used for a category's badge.
fn category_rgb(category: GenderCategory) -> (u8, u8, u8) {
    match category {
        GenderCategory::Male => (37, 99, 235),
        GenderCategory::Female => (219, 39, 119),
        GenderCategory::NonBinary => (147, 51, 234),
        GenderCategory::Unknown => (100, 116, 139),
    }
}

/// Category badge. The name form uses colored text; the image panel uses
/// white text on a solid background.
pub fn badge(surface: Surface, category: GenderCategory) -> ColoredString {
    let (r, g, b) = category_rgb(category);
    let label = format!(" {} ", category.as_str().to_uppercase());
    match surface {
        Surface::Text => label.truecolor(r, g, b).bold(),
        Surface::Image => label.white().on_truecolor(r, g, b).bold(),
    }
}

/// A rendered result for one surface.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultCard {
    pub surface: Surface,
    pub category: GenderCategory,
    pub percent: u32,
    pub bar: String,
    pub reasoning: String,
}

impl ResultCard {
    pub fn new(surface: Surface, result: &InferenceResult) -> Self {
        Self {
            surface,
            category: result.category,
            percent: result.confidence_percent(),
            bar: confidence_bar(result.confidence),
            reasoning: result.reasoning.clone(),
        }
    }

    fn header_line(&self) -> String {
        format!(
            "{}  {}",
            self.surface.title().to_uppercase().dimmed().bold(),
            badge(self.surface, self.category)
        )
    }

    fn confidence_line(&self) -> String {
        format!(
            "{}: {}",
            self.surface.confidence_label().dimmed(),
            format!("{}%", self.percent).bold()
        )
    }

    fn bar_line(&self) -> String {
        match self.surface {
            Surface::Text => self.bar.truecolor(79, 70, 229),
            Surface::Image => self.bar.truecolor(16, 185, 129),
        }
        .to_string()
    }

    fn reasoning_line(&self) -> String {
        format!("\"{}\"", self.reasoning).italic().to_string()
    }

    /// The card as printed: header with badge, confidence, bar, reasoning.
    pub fn render(&self) -> String {
        [
            self.header_line(),
            self.confidence_line(),
            self.bar_line(),
            self.reasoning_line(),
        ]
        .join("\n")
    }
}

pub fn pending_line(surface: Surface) -> ColoredString {
    match surface {
        Surface::Text => surface.pending_label().truecolor(79, 70, 229),
        Surface::Image => surface.pending_label().truecolor(16, 185, 129),
    }
}

pub fn error_line(message: &str) -> ColoredString {
    message.red()
}

pub fn notice_line(message: &str) -> ColoredString {
    message.yellow()
}
