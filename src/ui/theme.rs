use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use ratatui::style::{Color, Modifier, Style};
use rust_embed::Embed;
use serde::Deserialize;
use serde::de::{Deserializer, Error as _};

use wordrush::session::highlight::CharClass;

#[derive(Embed)]
#[folder = "assets/themes/"]
struct ThemeAssets;

#[derive(Clone, Debug, Deserialize)]
pub struct Theme {
    pub name: String,
    #[serde(default)]
    pub colors: ThemeColors,
}

/// Palette for the three screens.
///
/// A theme file only needs the keys it changes; the rest come from
/// [`ThemeColors::default`]. Unknown keys and malformed hex are errors.
#[derive(Clone, Debug, PartialEq)]
pub struct ThemeColors {
    pub bg: Color,
    pub fg: Color,
    pub accent: Color,
    pub border: Color,
    pub header_bg: Color,
    pub header_fg: Color,
    pub correct: Color,
    pub incorrect: Color,
    pub incorrect_bg: Color,
    pub upcoming: Color,
    pub cursor_fg: Color,
    pub cursor_bg: Color,
    pub time_left: Color,
    pub time_spent: Color,
    pub error: Color,
    pub warning: Color,
    pub success: Color,
}

const COLOR_KEYS: &[&str] = &[
    "bg",
    "fg",
    "accent",
    "border",
    "header_bg",
    "header_fg",
    "correct",
    "incorrect",
    "incorrect_bg",
    "upcoming",
    "cursor_fg",
    "cursor_bg",
    "time_left",
    "time_spent",
    "error",
    "warning",
    "success",
];

const fn rgb(hex: u32) -> Color {
    Color::Rgb((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
}

/// `#rrggbb` or `rrggbb`.
pub fn parse_hex(value: &str) -> Option<Color> {
    let hex = value.strip_prefix('#').unwrap_or(value);
    if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    u32::from_str_radix(hex, 16).ok().map(rgb)
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self {
            bg: rgb(0x1e1e2e),
            fg: rgb(0xcdd6f4),
            accent: rgb(0x89b4fa),
            border: rgb(0x45475a),
            header_bg: rgb(0x313244),
            header_fg: rgb(0xcdd6f4),
            correct: rgb(0xa6e3a1),
            incorrect: rgb(0xf38ba8),
            incorrect_bg: rgb(0x45273a),
            upcoming: rgb(0x585b70),
            cursor_fg: rgb(0x1e1e2e),
            cursor_bg: rgb(0xf5e0dc),
            time_left: rgb(0x89b4fa),
            time_spent: rgb(0x313244),
            error: rgb(0xf38ba8),
            warning: rgb(0xf9e2af),
            success: rgb(0xa6e3a1),
        }
    }
}

impl ThemeColors {
    fn slot_mut(&mut self, key: &str) -> Option<&mut Color> {
        Some(match key {
            "bg" => &mut self.bg,
            "fg" => &mut self.fg,
            "accent" => &mut self.accent,
            "border" => &mut self.border,
            "header_bg" => &mut self.header_bg,
            "header_fg" => &mut self.header_fg,
            "correct" => &mut self.correct,
            "incorrect" => &mut self.incorrect,
            "incorrect_bg" => &mut self.incorrect_bg,
            "upcoming" => &mut self.upcoming,
            "cursor_fg" => &mut self.cursor_fg,
            "cursor_bg" => &mut self.cursor_bg,
            "time_left" => &mut self.time_left,
            "time_spent" => &mut self.time_spent,
            "error" => &mut self.error,
            "warning" => &mut self.warning,
            "success" => &mut self.success,
            _ => return None,
        })
    }

    /// Style of one highlighted character in the typing area.
    pub fn glyph_style(&self, class: CharClass) -> Style {
        match class {
            CharClass::Correct => Style::default().fg(self.correct),
            CharClass::Incorrect => Style::default()
                .fg(self.incorrect)
                .bg(self.incorrect_bg)
                .add_modifier(Modifier::UNDERLINED),
            CharClass::Cursor => Style::default().fg(self.cursor_fg).bg(self.cursor_bg),
            CharClass::Plain => Style::default().fg(self.upcoming),
        }
    }
}

impl<'de> Deserialize<'de> for ThemeColors {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = BTreeMap::<String, String>::deserialize(deserializer)?;
        let mut colors = ThemeColors::default();
        for (key, value) in raw {
            let color = parse_hex(&value)
                .ok_or_else(|| D::Error::custom(format!("{key}: invalid color {value:?}")))?;
            let slot = colors
                .slot_mut(&key)
                .ok_or_else(|| D::Error::unknown_field(&key, COLOR_KEYS))?;
            *slot = color;
        }
        Ok(colors)
    }
}

impl Theme {
    fn user_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("wordrush").join("themes"))
    }

    /// User themes in the config dir shadow the bundled ones. A user theme
    /// that fails to parse is skipped with a warning.
    pub fn load(name: &str) -> Option<Self> {
        let filename = format!("{name}.toml");

        if let Some(path) = Self::user_dir().map(|dir| dir.join(&filename)) {
            if let Ok(content) = fs::read_to_string(&path) {
                match toml::from_str::<Theme>(&content) {
                    Ok(theme) => return Some(theme),
                    Err(err) => {
                        tracing::warn!(path = %path.display(), error = %err, "ignoring bad theme")
                    }
                }
            }
        }

        let file = ThemeAssets::get(&filename)?;
        let content = std::str::from_utf8(file.data.as_ref()).ok()?;
        match toml::from_str::<Theme>(content) {
            Ok(theme) => Some(theme),
            Err(err) => {
                tracing::error!(theme = name, error = %err, "bundled theme does not parse");
                None
            }
        }
    }

    pub fn available_themes() -> Vec<String> {
        let mut names: Vec<String> = ThemeAssets::iter()
            .filter_map(|f| f.strip_suffix(".toml").map(str::to_string))
            .collect();
        names.sort();
        names
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::load("default").unwrap_or_else(|| Self {
            name: "default".to_string(),
            colors: ThemeColors::default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_themes_parse() {
        let names = Theme::available_themes();
        assert_eq!(names, vec!["default".to_string(), "paper".to_string()]);
        for name in names {
            assert!(Theme::load(&name).is_some(), "theme {name} failed to parse");
        }
    }

    #[test]
    fn bundled_default_matches_builtin_palette() {
        let theme = Theme::load("default").unwrap();
        assert_eq!(theme.colors, ThemeColors::default());
    }

    #[test]
    fn parse_hex_accepts_optional_hash() {
        assert_eq!(parse_hex("#0a0b0c"), Some(Color::Rgb(10, 11, 12)));
        assert_eq!(parse_hex("ff8000"), Some(Color::Rgb(255, 128, 0)));
        assert_eq!(parse_hex("nope"), None);
        assert_eq!(parse_hex("#12345"), None);
        assert_eq!(parse_hex("+12345"), None);
    }

    #[test]
    fn partial_theme_keeps_defaults() {
        let theme: Theme = toml::from_str(
            r##"
name = "mine"

[colors]
accent = "#ff0000"
"##,
        )
        .unwrap();
        assert_eq!(theme.colors.accent, Color::Rgb(255, 0, 0));
        assert_eq!(theme.colors.bg, ThemeColors::default().bg);
    }

    #[test]
    fn bad_color_and_unknown_key_are_rejected() {
        let bad_hex = "name = \"x\"\n[colors]\nbg = \"#zzzzzz\"\n";
        assert!(toml::from_str::<Theme>(bad_hex).is_err());

        let unknown = "name = \"x\"\n[colors]\nfocused_key = \"#ffffff\"\n";
        assert!(toml::from_str::<Theme>(unknown).is_err());
    }

    #[test]
    fn glyph_styles_follow_palette() {
        let colors = ThemeColors::default();
        assert_eq!(colors.glyph_style(CharClass::Correct).fg, Some(colors.correct));
        assert_eq!(colors.glyph_style(CharClass::Plain).fg, Some(colors.upcoming));
        let wrong = colors.glyph_style(CharClass::Incorrect);
        assert_eq!(wrong.bg, Some(colors.incorrect_bg));
        assert!(wrong.add_modifier.contains(Modifier::UNDERLINED));
    }

    #[test]
    fn unknown_theme_is_none() {
        assert!(Theme::load("no-such-theme-here").is_none());
    }
}
