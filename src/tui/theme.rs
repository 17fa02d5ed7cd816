// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Canopy-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Canopy and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::env;

use ratatui::style::{Color, Modifier, Style};
use thiserror::Error;

const PALETTE_ENV: &str = "CANOPY_PALETTE";

/// Styles for the forest view. Without a palette override the terminal's own colors are used.
#[derive(Debug, Clone, Default)]
pub(crate) struct TuiTheme {
    palette: Option<TuiPalette>,
}

impl TuiTheme {
    pub(crate) fn from_env() -> Result<Self, ThemeError> {
        let palette = match env::var(PALETTE_ENV) {
            Ok(value) if value.trim().is_empty() => None,
            Ok(value) => Some(TuiPalette::parse_csv(value.trim()).map_err(|error| {
                ThemeError::InvalidEnv {
                    name: PALETTE_ENV,
                    value: format!("{} ({error})", value.trim()),
                }
            })?),
            Err(env::VarError::NotPresent) => None,
            Err(env::VarError::NotUnicode(_)) => {
                return Err(ThemeError::InvalidEnv {
                    name: PALETTE_ENV,
                    value: "<non-unicode>".to_owned(),
                });
            }
        };
        Ok(Self { palette })
    }

    pub(crate) fn base_style(&self) -> Style {
        match &self.palette {
            Some(palette) => Style::default().fg(palette.fg).bg(palette.bg),
            None => Style::default(),
        }
    }

    fn accent(&self) -> Color {
        self.palette.as_ref().map_or(Color::LightGreen, |palette| palette.accent)
    }

    fn muted(&self) -> Color {
        self.palette.as_ref().map_or(Color::DarkGray, |palette| palette.muted)
    }

    /// Subtrees beyond the focus separator.
    pub(crate) fn unfocused_style(&self) -> Style {
        self.base_style().fg(self.muted()).add_modifier(Modifier::DIM)
    }

    pub(crate) fn selection_style(&self) -> Style {
        self.base_style().fg(self.accent()).add_modifier(Modifier::BOLD)
    }

    /// The column being dragged.
    pub(crate) fn dragging_style(&self) -> Style {
        self.base_style().add_modifier(Modifier::REVERSED | Modifier::BOLD)
    }

    pub(crate) fn checked_style(&self) -> Style {
        self.base_style().add_modifier(Modifier::ITALIC)
    }

    pub(crate) fn status_style(&self) -> Style {
        self.base_style().fg(self.muted())
    }

    pub(crate) fn error_style(&self) -> Style {
        self.base_style().fg(Color::Red)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct TuiPalette {
    fg: Color,
    bg: Color,
    accent: Color,
    muted: Color,
}

impl TuiPalette {
    const CSV_LEN: usize = 4;

    fn parse_csv(value: &str) -> Result<Self, String> {
        let parts = value.split(',').map(str::trim).collect::<Vec<_>>();
        let [fg, bg, accent, muted] = parts.as_slice() else {
            return Err(format!(
                "expected {} comma-separated colors (fg,bg,accent,muted), got {}",
                Self::CSV_LEN,
                parts.len()
            ));
        };
        Ok(Self {
            fg: parse_palette_color(fg)?,
            bg: parse_palette_color(bg)?,
            accent: parse_palette_color(accent)?,
            muted: parse_palette_color(muted)?,
        })
    }
}

fn parse_palette_color(value: &str) -> Result<Color, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err("empty color".to_owned());
    }

    let lower = trimmed.to_ascii_lowercase();
    if let Some(rest) = lower.strip_prefix("rgb:") {
        let channels = rest.split('/').collect::<Vec<_>>();
        let [r, g, b] = channels.as_slice() else {
            return Err(format!("invalid rgb: value: {trimmed}"));
        };
        let [r, g, b] = [parse_hex_channel(r)?, parse_hex_channel(g)?, parse_hex_channel(b)?];
        return Ok(Color::Rgb(r, g, b));
    }

    let hex = trimmed.strip_prefix('#').unwrap_or(trimmed);
    if hex.len() != 6 || !hex.chars().all(|ch| ch.is_ascii_hexdigit()) {
        return Err(format!("invalid hex color: {trimmed} (expected #RRGGBB)"));
    }
    let rgb = u32::from_str_radix(hex, 16).map_err(|_| format!("invalid hex color: {trimmed}"))?;
    let [_, r, g, b] = rgb.to_be_bytes();
    Ok(Color::Rgb(r, g, b))
}

fn parse_hex_channel(value: &str) -> Result<u8, String> {
    let value = value.trim();
    match value.len() {
        2 => u8::from_str_radix(value, 16).map_err(|_| format!("invalid rgb: component {value}")),
        4 => u16::from_str_radix(value, 16)
            .map(|parsed| parsed.to_be_bytes()[0])
            .map_err(|_| format!("invalid rgb: component {value}")),
        _ => Err(format!("invalid rgb: component {value} (expected 2 or 4 hex digits)")),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ThemeError {
    #[error("invalid env {name}={value}")]
    InvalidEnv { name: &'static str, value: String },
}

#[cfg(test)]
mod tests {
    use ratatui::style::Color;

    use super::{TuiPalette, TuiTheme};

    #[test]
    fn palette_override_parses_hex_and_xterm_rgb() {
        let palette = TuiPalette::parse_csv("#111111, #222222, rgb:ff/80/00, rgb:8080/8080/8080")
            .expect("palette");

        assert_eq!(palette.fg, Color::Rgb(0x11, 0x11, 0x11));
        assert_eq!(palette.bg, Color::Rgb(0x22, 0x22, 0x22));
        assert_eq!(palette.accent, Color::Rgb(0xff, 0x80, 0x00));
        assert_eq!(palette.muted, Color::Rgb(0x80, 0x80, 0x80));
    }

    #[test]
    fn palette_override_rejects_wrong_arity_and_bad_colors() {
        assert!(TuiPalette::parse_csv("nope").unwrap_err().contains("expected 4"));
        assert!(TuiPalette::parse_csv("#111111,#222222,#333333,blue")
            .unwrap_err()
            .contains("invalid hex color"));
    }

    #[test]
    fn default_theme_keeps_terminal_colors() {
        let theme = TuiTheme::default();
        assert_eq!(theme.base_style(), ratatui::style::Style::default());
        assert_eq!(theme.selection_style().fg, Some(Color::LightGreen));
    }
}
