/*
Catppuccin Color Palette (subset used by the editor)

Mocha: Red f38ba8, Peach fab387, Yellow f9e2af, Green a6e3a1, Teal 94e2d5,
       Blue 89b4fa, Lavender b4befe, Mauve cba6f7, Text cdd6f4,
       Subtext 0 a6adc8, Overlay 1 7f849c, Surface 1 45475a, Surface 0 313244,
       Base 1e1e2e
*/

use ratatui::style::{Color, Modifier, Style};

#[derive(Debug, Clone)]
pub struct Theme {
    pub red: Color,
    pub peach: Color,
    pub yellow: Color,
    pub green: Color,
    pub teal: Color,
    pub blue: Color,
    pub lavender: Color,
    pub mauve: Color,
    pub text: Color,
    pub subtext0: Color,
    pub overlay1: Color,
    pub surface1: Color,
    pub surface0: Color,
    pub base: Color,
}

impl Theme {
    pub fn mocha() -> Self {
        Self {
            red: Color::Rgb(0xf3, 0x8b, 0xa8),
            peach: Color::Rgb(0xfa, 0xb3, 0x87),
            yellow: Color::Rgb(0xf9, 0xe2, 0xaf),
            green: Color::Rgb(0xa6, 0xe3, 0xa1),
            teal: Color::Rgb(0x94, 0xe2, 0xd5),
            blue: Color::Rgb(0x89, 0xb4, 0xfa),
            lavender: Color::Rgb(0xb4, 0xbe, 0xfe),
            mauve: Color::Rgb(0xcb, 0xa6, 0xf7),
            text: Color::Rgb(0xcd, 0xd6, 0xf4),
            subtext0: Color::Rgb(0xa6, 0xad, 0xc8),
            overlay1: Color::Rgb(0x7f, 0x84, 0x9c),
            surface1: Color::Rgb(0x45, 0x47, 0x5a),
            surface0: Color::Rgb(0x31, 0x32, 0x44),
            base: Color::Rgb(0x1e, 0x1e, 0x2e),
        }
    }

    // Status indicators (errors, warnings, success)
    pub fn error_style(&self) -> Style {
        Style::default().fg(self.red)
    }

    pub fn warning_style(&self) -> Style {
        Style::default().fg(self.yellow)
    }

    pub fn success_style(&self) -> Style {
        Style::default().fg(self.green)
    }

    pub fn info_style(&self) -> Style {
        Style::default().fg(self.teal)
    }

    pub fn selected_style(&self) -> Style {
        Style::default().bg(self.surface1).fg(self.text).add_modifier(Modifier::BOLD)
    }

    pub fn border_style(&self, focused: bool) -> Style {
        if focused {
            Style::default().fg(self.lavender)
        } else {
            Style::default().fg(self.overlay1)
        }
    }

    // Terminal cursor
    pub fn cursor_style(&self) -> Style {
        Style::default().bg(self.peach).fg(self.base)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::mocha()
    }
}
