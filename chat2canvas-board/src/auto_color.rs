//! Board palette and deterministic color assignment.
//!
//! Columns and cards carry a `#rrggbb` background color. The palette is the
//! fixed set the Canvas Code prompt tells assistants to use; anything that
//! arrives without a color gets one picked from a hash of its title.

/// Slate, the neutral default background.
pub const SLATE: &str = "#f8fafc";
/// Light blue.
pub const BLUE: &str = "#e0f2fe";
/// Light green.
pub const GREEN: &str = "#dcfce7";
/// Light yellow.
pub const YELLOW: &str = "#fef3c7";
/// Light red.
pub const RED: &str = "#fee2e2";

/// Palette colors in prompt order.
pub const PALETTE: &[&str] = &[SLATE, BLUE, GREEN, YELLOW, RED];

/// Return a deterministic palette color for a title.
///
/// Uses a simple FNV-1a hash mapped to the palette index.
pub fn auto_color(title: &str) -> &'static str {
    let hash = fnv1a(title);
    let idx = (hash as usize) % PALETTE.len();
    PALETTE[idx]
}

/// FNV-1a hash (32-bit) for short strings.
fn fnv1a(s: &str) -> u32 {
    let mut hash: u32 = 0x811c_9dc5;
    for byte in s.bytes() {
        hash ^= byte as u32;
        hash = hash.wrapping_mul(0x0100_0193);
    }
    hash
}
