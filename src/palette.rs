//! The "Tableau 20" colour table used by every plot
//!
//! Entries come in dark/light pairs: `0/1` blue, `2/3` orange, `4/5` green,
//! `6/7` red, `8/9` purple, and so on.

use plotters::style::RGBColor;

pub const TABLEAU20: [RGBColor; 20] = [
    RGBColor(31, 119, 180),
    RGBColor(174, 199, 232),
    RGBColor(255, 127, 14),
    RGBColor(255, 187, 120),
    RGBColor(44, 160, 44),
    RGBColor(152, 223, 138),
    RGBColor(214, 39, 40),
    RGBColor(255, 152, 150),
    RGBColor(148, 103, 189),
    RGBColor(197, 176, 213),
    RGBColor(140, 86, 75),
    RGBColor(196, 156, 148),
    RGBColor(227, 119, 194),
    RGBColor(247, 182, 210),
    RGBColor(127, 127, 127),
    RGBColor(199, 199, 199),
    RGBColor(188, 189, 34),
    RGBColor(219, 219, 141),
    RGBColor(23, 190, 207),
    RGBColor(158, 218, 229),
];

/// Palette entry, wrapping past the end
pub fn color(index: usize) -> RGBColor {
    TABLEAU20[index % TABLEAU20.len()]
}

/// Palette entry as RGB components scaled to `[0, 1]`
pub fn unit_rgb(index: usize) -> (f64, f64, f64) {
    let RGBColor(r, g, b) = color(index);
    (r as f64 / 255.0, g as f64 / 255.0, b as f64 / 255.0)
}
