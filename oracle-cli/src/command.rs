//! REPL command parsing.

use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Fill the name form and submit it
    Name(String),
    /// Select an image file
    Image(PathBuf),
    /// Run visual analysis on the selected image
    Analyze,
    Status,
    Models,
    Help,
    Quit,
    Empty,
    Unknown(String),
}

impl Command {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        match word.to_ascii_lowercase().as_str() {
            "" => Self::Empty,
            "name" | "guess" => Self::Name(rest.to_string()),
            "image" | "load" => {
                if rest.is_empty() {
                    Self::Unknown(line.to_string())
                } else {
                    Self::Image(PathBuf::from(unquote(rest)))
                }
            }
            "analyze" | "analyse" => Self::Analyze,
            "status" => Self::Status,
            "models" => Self::Models,
            "help" | "?" => Self::Help,
            "quit" | "exit" => Self::Quit,
            _ => Self::Unknown(line.to_string()),
        }
    }
}

/// Strip one pair of matching quotes, for paths pasted with spaces.
fn unquote(s: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = s.strip_prefix(quote).and_then(|s| s.strip_suffix(quote)) {
            return inner;
        }
    }
    s
}

pub const HELP: &str = "\
Commands:
  name <text>     guess gender from a name
  image <path>    select a photo for visual analysis
  analyze         run visual analysis on the selected photo
  status          show both panels
  models          show the model identifiers in use
  help            show this help
  quit            exit";
