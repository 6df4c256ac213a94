//! Indent settings a host applies from a verdict
//!
//! The inferencer reports any step size it saw. Deciding which widths are
//! acceptable happens here: only [`POSSIBLE_INDENTATIONS`] are ever applied,
//! and an unknown verdict leaves the settings alone.

use crate::detect::Verdict;
use crate::error::DetectError;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Space widths a verdict may set
pub const POSSIBLE_INDENTATIONS: [usize; 5] = [2, 3, 4, 6, 8];

pub fn is_possible_indentation(width: usize) -> bool {
    POSSIBLE_INDENTATIONS.contains(&width)
}

/// Indentation state of one document in the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IndentSettings {
    /// Insert spaces (true) or tab characters (false)
    pub soft_tabs: bool,
    /// Spaces per level when `soft_tabs` is set
    pub tab_length: usize,
}

impl Default for IndentSettings {
    fn default() -> Self {
        Self {
            soft_tabs: true,
            tab_length: 2,
        }
    }
}

impl IndentSettings {
    pub fn spaces(width: usize) -> Self {
        Self {
            soft_tabs: true,
            tab_length: width,
        }
    }

    /// Hard tabs, keeping the current display width
    pub fn tabs(self) -> Self {
        Self {
            soft_tabs: false,
            ..self
        }
    }

    /// Apply a verdict. Returns whether anything changed.
    ///
    /// `Spaces(n)` outside [`POSSIBLE_INDENTATIONS`] and `Unknown` are ignored.
    pub fn apply(&mut self, verdict: Verdict) -> bool {
        let next = match verdict {
            Verdict::Tabs => self.tabs(),
            Verdict::Spaces(n) if is_possible_indentation(n) => Self::spaces(n),
            Verdict::Spaces(n) => {
                tracing::debug!("Ignoring unsupported indent width {}", n);
                return false;
            }
            Verdict::Unknown => return false,
        };
        let changed = next != *self;
        *self = next;
        changed
    }

    /// Same settings expressed as a verdict
    pub fn as_verdict(&self) -> Verdict {
        if self.soft_tabs {
            Verdict::Spaces(self.tab_length)
        } else {
            Verdict::Tabs
        }
    }
}

/// Status text: `Tabs` or `N Spaces`
impl fmt::Display for IndentSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.soft_tabs {
            write!(f, "{} Spaces", self.tab_length)
        } else {
            f.write_str("Tabs")
        }
    }
}

/// An entry of the manual indentation selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndentChoice {
    /// Drop any manual override and detect again
    Automatic,
    Spaces(usize),
    Tabs,
}

impl IndentChoice {
    /// Selector entries in display order
    pub fn all() -> Vec<IndentChoice> {
        let mut items = vec![IndentChoice::Automatic];
        items.extend(POSSIBLE_INDENTATIONS.iter().map(|&n| IndentChoice::Spaces(n)));
        items.push(IndentChoice::Tabs);
        items
    }

    /// Verdict to apply for this choice (`None` for automatic)
    pub fn verdict(&self) -> Option<Verdict> {
        match self {
            IndentChoice::Automatic => None,
            IndentChoice::Spaces(n) => Some(Verdict::Spaces(*n)),
            IndentChoice::Tabs => Some(Verdict::Tabs),
        }
    }
}

impl fmt::Display for IndentChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndentChoice::Automatic => f.write_str("Automatic"),
            IndentChoice::Spaces(n) => write!(f, "{} Spaces", n),
            IndentChoice::Tabs => f.write_str("Tabs"),
        }
    }
}

/// Accepts `auto`, `automatic`, `tab`, `tabs`, `4`, `4 spaces`
/// (case-insensitive). Widths must be one of [`POSSIBLE_INDENTATIONS`].
impl FromStr for IndentChoice {
    type Err = DetectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "auto" | "automatic" => return Ok(IndentChoice::Automatic),
            "tab" | "tabs" => return Ok(IndentChoice::Tabs),
            _ => {}
        }

        let number = normalized
            .strip_suffix("spaces")
            .or_else(|| normalized.strip_suffix("space"))
            .unwrap_or(normalized.as_str())
            .trim();

        match number.parse::<usize>() {
            Ok(n) if is_possible_indentation(n) => Ok(IndentChoice::Spaces(n)),
            _ => Err(DetectError::InvalidIndent(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = IndentSettings::default();
        assert!(settings.soft_tabs);
        assert_eq!(settings.tab_length, 2);
        assert_eq!(settings.to_string(), "2 Spaces");
    }

    #[test]
    fn test_apply_tabs_keeps_width() {
        let mut settings = IndentSettings::spaces(4);
        assert!(settings.apply(Verdict::Tabs));
        assert!(!settings.soft_tabs);
        assert_eq!(settings.tab_length, 4);
        assert_eq!(settings.to_string(), "Tabs");
    }

    #[test]
    fn test_apply_allowed_widths() {
        for width in POSSIBLE_INDENTATIONS {
            let mut settings = IndentSettings::default().tabs();
            settings.apply(Verdict::Spaces(width));
            assert_eq!(settings, IndentSettings::spaces(width));
        }
    }

    #[test]
    fn test_apply_ignores_unsupported_widths() {
        for width in [1, 5, 7, 9, 16] {
            let mut settings = IndentSettings::spaces(4);
            assert!(!settings.apply(Verdict::Spaces(width)), "{}", width);
            assert_eq!(settings, IndentSettings::spaces(4));
        }
    }

    #[test]
    fn test_apply_unknown_leaves_settings() {
        let mut settings = IndentSettings::default().tabs();
        assert!(!settings.apply(Verdict::Unknown));
        assert!(!settings.soft_tabs);
    }

    #[test]
    fn test_apply_reports_no_change() {
        let mut settings = IndentSettings::spaces(4);
        assert!(!settings.apply(Verdict::Spaces(4)));
    }

    #[test]
    fn test_choices_order() {
        let labels: Vec<String> = IndentChoice::all().iter().map(|c| c.to_string()).collect();
        assert_eq!(
            labels,
            vec![
                "Automatic", "2 Spaces", "3 Spaces", "4 Spaces", "6 Spaces", "8 Spaces", "Tabs"
            ]
        );
    }

    #[test]
    fn test_parse_choice() {
        assert_eq!("auto".parse::<IndentChoice>().unwrap(), IndentChoice::Automatic);
        assert_eq!("Automatic".parse::<IndentChoice>().unwrap(), IndentChoice::Automatic);
        assert_eq!("tabs".parse::<IndentChoice>().unwrap(), IndentChoice::Tabs);
        assert_eq!("TAB".parse::<IndentChoice>().unwrap(), IndentChoice::Tabs);
        assert_eq!("4".parse::<IndentChoice>().unwrap(), IndentChoice::Spaces(4));
        assert_eq!("6 Spaces".parse::<IndentChoice>().unwrap(), IndentChoice::Spaces(6));
        assert_eq!("8spaces".parse::<IndentChoice>().unwrap(), IndentChoice::Spaces(8));
    }

    #[test]
    fn test_parse_choice_rejects_bad_widths() {
        assert!("5".parse::<IndentChoice>().is_err());
        assert!("0 spaces".parse::<IndentChoice>().is_err());
        assert!("wide".parse::<IndentChoice>().is_err());
        assert!("".parse::<IndentChoice>().is_err());
    }

    #[test]
    fn test_as_verdict_roundtrip() {
        let mut settings = IndentSettings::default();
        settings.apply(Verdict::Spaces(3));
        assert_eq!(settings.as_verdict(), Verdict::Spaces(3));
        settings.apply(Verdict::Tabs);
        assert_eq!(settings.as_verdict(), Verdict::Tabs);
    }
}
