//! Flat SVG status badge: "dependencies | <state>"

use crate::domain::BadgeState;
use crate::error::IoError;
use std::path::Path;

const LABEL: &str = "dependencies";
const LABEL_COLOR: &str = "#555";

/// Approximate width of one character of 11px Verdana
const CHAR_WIDTH: usize = 7;

/// Horizontal padding on each side of a text segment
const PADDING: usize = 5;

fn segment_width(text: &str) -> usize {
    text.chars().count() * CHAR_WIDTH + 2 * PADDING
}

/// Render the badge for a state
pub fn render_badge(state: BadgeState) -> String {
    let message = state.message();
    let label_width = segment_width(LABEL);
    let message_width = segment_width(message);
    let width = label_width + message_width;
    // Text x positions are in tenths of a pixel (scaled by 0.1)
    let label_x = label_width * 5;
    let message_x = (label_width + message_width / 2) * 10;

    format!(
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="20" role="img" aria-label="{label}: {message}">
<title>{label}: {message}</title>
<linearGradient id="s" x2="0" y2="100%"><stop offset="0" stop-color="#bbb" stop-opacity=".1"/><stop offset="1" stop-opacity=".1"/></linearGradient>
<clipPath id="r"><rect width="{width}" height="20" rx="3" fill="#fff"/></clipPath>
<g clip-path="url(#r)">
<rect width="{label_width}" height="20" fill="{label_color}"/>
<rect x="{label_width}" width="{message_width}" height="20" fill="{color}"/>
<rect width="{width}" height="20" fill="url(#s)"/>
</g>
<g fill="#fff" text-anchor="middle" font-family="Verdana,Geneva,DejaVu Sans,sans-serif" font-size="110">
<text x="{label_x}" y="150" fill="#010101" fill-opacity=".3" transform="scale(.1)">{label}</text>
<text x="{label_x}" y="140" transform="scale(.1)">{label}</text>
<text x="{message_x}" y="150" fill="#010101" fill-opacity=".3" transform="scale(.1)">{message}</text>
<text x="{message_x}" y="140" transform="scale(.1)">{message}</text>
</g>
</svg>
"##,
        label = LABEL,
        label_color = LABEL_COLOR,
        color = state.color(),
    )
}

/// Render the badge and write it to `path`
pub fn write_badge(path: &Path, state: BadgeState) -> Result<(), IoError> {
    std::fs::write(path, render_badge(state)).map_err(|e| IoError::generic(path, e))
}
