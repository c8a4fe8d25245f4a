use colored::Color;

pub const PRIMARY: Color = Color::TrueColor { r: 102, g: 204, b: 255 };
pub const ACCENT: Color = Color::TrueColor { r: 255, g: 179, b: 71 };
pub const SEPARATOR: Color = Color::BrightBlack;
pub const TEXT_DEFAULT: Color = Color::TrueColor { r: 220, g: 220, b: 220 };

pub const COVERED: Color = Color::Green;
pub const NOT_COVERED: Color = Color::Red;
