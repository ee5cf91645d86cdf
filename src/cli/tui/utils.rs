//! Shared utilities for TUI views

use ratatui::style::Color;

/// Item colours, picked by the last character of the item id
pub const PALETTE: [Color; 5] = [
    Color::Rgb(0xff, 0x6b, 0x6b),
    Color::Rgb(0x4e, 0xcd, 0xc4),
    Color::Rgb(0x95, 0xe1, 0xd3),
    Color::Rgb(0xff, 0xd9, 0x3d),
    Color::Rgb(0xc6, 0x84, 0xff),
];

/// Stable colour for an item id
pub fn item_color(id: &str) -> Color {
    let code = id.chars().last().map(u32::from).unwrap_or(0);
    PALETTE[code as usize % PALETTE.len()]
}

/// Fits a label into exactly `width` columns, centred, cutting the end off
pub fn fit_label(label: &str, width: usize) -> String {
    let cut: String = label.chars().take(width).collect();
    format!("{:^width$}", cut, width = width)
}

/// Columns a cell takes for an item of the given width
pub fn cell_columns(base: u16, item_width: f64) -> usize {
    let scaled = (f64::from(base) * item_width).round();
    if scaled.is_finite() && scaled >= 1.0 {
        scaled as usize
    } else {
        1
    }
}
