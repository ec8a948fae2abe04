//! Built-in palette definitions.
//!
//! Palettes are stored as packed `0xRRGGBB` values in palette-index order, so
//! index `i` is the color written with the alphabet's `i`-th code.

use crate::palette::Palette;

/// List of all available built-in palette names.
const BUILTIN_NAMES: &[&str] = &["pc66", "pico8", "gameboy", "1bit"];

/// Name of the palette used when nothing else is configured.
pub const DEFAULT_PALETTE: &str = "pc66";

/// Returns a list of all available built-in palette names.
pub fn list_builtins() -> Vec<&'static str> {
    BUILTIN_NAMES.to_vec()
}

/// Returns a built-in palette by name, or None if not found.
pub fn get_builtin(name: &str) -> Option<Palette> {
    let colors: &[u32] = match name {
        "pc66" => PC66,
        "pico8" => PICO8,
        "gameboy" => GAMEBOY,
        "1bit" => ONE_BIT,
        _ => return None,
    };
    Some(Palette::from_u32(name, colors))
}

/// PC-66 palette, the arcade game's colors.
/// Reference: https://lospec.com/palette-list/pc-66
const PC66: &[u32] = &[
    0x000000, 0x24222a, 0x4e4b5b, 0x7b768e, 0xaba4c1, 0xd3cde7, 0xfefdfe, 0xffefa8,
    0xe2b35a, 0x9f5611, 0x6e2100, 0x390800, 0x5e2e00, 0x915f01, 0xe6c429, 0xeceab7,
    0xd2fe7d, 0xc1e12c, 0x989800, 0x5b4d00, 0x362400, 0x004d03, 0x0c6d00, 0x2b9200,
    0x7ec43f, 0xb2da73, 0xc8feae, 0x83fe6b, 0x00fe00, 0x00cb22, 0x006d45, 0x004d3d,
    0x206100, 0x019000, 0x0bba3d, 0x2eda91, 0x4fffca, 0xd0fff6, 0xa9fbee, 0x01ffff,
    0x009cbe, 0x006092, 0x004373, 0x006cdc, 0x6dd0ff, 0xb6f3ff, 0xa4dbff, 0x687aff,
    0x0147ff, 0x0017c5, 0x140c81, 0x4200a5, 0x8d00f9, 0xc84ff5, 0xea9bf3, 0xf8dcf7,
    0xf49fb3, 0xf6629d, 0xff0092, 0xcc0095, 0xa30092, 0x920030, 0xc1003f, 0xff0000,
    0xf5765d, 0xd11717, 0xa41c1c, 0xab8169, 0x7c6822, 0xffc7ba, 0x254c93,
];

/// PICO-8 16-color palette.
/// Reference: https://lospec.com/palette-list/pico-8
const PICO8: &[u32] = &[
    0x000000, 0x1D2B53, 0x7E2553, 0x008751, 0xAB5236, 0x5F574F, 0xC2C3C7, 0xFFF1E8,
    0xFF004D, 0xFFA300, 0xFFEC27, 0x00E436, 0x29ADFF, 0x83769C, 0xFF77A8, 0xFFCCAA,
];

/// Game Boy 4-color green palette.
/// Reference: https://lospec.com/palette-list/nintendo-gameboy-bgb
const GAMEBOY: &[u32] = &[0x9BBC0F, 0x8BAC0F, 0x306230, 0x0F380F];

/// 1-bit black and white palette.
const ONE_BIT: &[u32] = &[0x000000, 0xFFFFFF];
