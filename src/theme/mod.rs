//! Site colours

use std::fmt;

use serde::{Deserialize, Serialize};

/// Body class that switches the site to its dark palette
pub const DARK_MODE_CLASS: &str = "dark-mode";

/// An sRGB colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// CSS hex form, e.g. `#13294B`
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Semantic colours used by script-rendered elements
///
/// The page stylesheet owns the light/dark surfaces; toasts carry inline
/// colours that are the same in both modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    pub success: Rgb,
    pub error: Rgb,
    pub info: Rgb,
}

impl Theme {
    pub const SITE: Theme = Theme {
        success: Rgb(76, 175, 80), // #4CAF50
        error: Rgb(244, 67, 54),   // #F44336
        info: Rgb(19, 41, 75),     // #13294B
    };
}

impl Default for Theme {
    fn default() -> Self {
        Theme::SITE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_is_upper_case_with_hash() {
        assert_eq!(Rgb(19, 41, 75).to_hex(), "#13294B");
        assert_eq!(Rgb(0, 0, 0).to_string(), "#000000");
    }

    #[test]
    fn site_colours() {
        let theme = Theme::default();
        assert_eq!(theme.success.to_hex(), "#4CAF50");
        assert_eq!(theme.error.to_hex(), "#F44336");
        assert_eq!(theme.info.to_hex(), "#13294B");
    }
}
