//! The character cell model: attributes, colours, and palettes.

use bitflags::bitflags;
use lazy_static::lazy_static;

bitflags! {
    /// Graphic rendition flags stored per cell.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct CellAttributes: u16 {
        const BOLD = 0b0000_0000_0000_0001;
        const FAINT = 0b0000_0000_0000_0010;
        const ITALIC = 0b0000_0000_0000_0100;
        const UNDERLINE = 0b0000_0000_0000_1000;
        const BLINK = 0b0000_0000_0001_0000;
        const INVERSE = 0b0000_0000_0010_0000;
        const INVISIBLE = 0b0000_0000_0100_0000;
        const STRIKETHROUGH = 0b0000_0000_1000_0000;
    }
}

/// True colour with an alpha channel. Cells always store true colour; the
/// palette mappers below reduce on demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Colour {
    pub alpha: u8,
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Colour {
    pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Colour {
            alpha: 0xFF,
            red,
            green,
            blue,
        }
    }
}

pub const DEFAULT_FOREGROUND: Colour = Colour::rgb(0xAA, 0xAA, 0xAA);
pub const DEFAULT_BACKGROUND: Colour = Colour::rgb(0x00, 0x00, 0x00);

/// The 16 base colours in ANSI order (SGR 30..37 then the bright set).
pub const BASE_PALETTE: [Colour; 16] = [
    Colour::rgb(0x00, 0x00, 0x00),
    Colour::rgb(0xAA, 0x00, 0x00),
    Colour::rgb(0x00, 0xAA, 0x00),
    Colour::rgb(0xAA, 0x55, 0x00),
    Colour::rgb(0x00, 0x00, 0xAA),
    Colour::rgb(0xAA, 0x00, 0xAA),
    Colour::rgb(0x00, 0xAA, 0xAA),
    Colour::rgb(0xAA, 0xAA, 0xAA),
    Colour::rgb(0x55, 0x55, 0x55),
    Colour::rgb(0xFF, 0x55, 0x55),
    Colour::rgb(0x55, 0xFF, 0x55),
    Colour::rgb(0xFF, 0xFF, 0x55),
    Colour::rgb(0x55, 0x55, 0xFF),
    Colour::rgb(0xFF, 0x55, 0xFF),
    Colour::rgb(0x55, 0xFF, 0xFF),
    Colour::rgb(0xFF, 0xFF, 0xFF),
];

lazy_static! {
    /// The xterm 256-colour palette: 16 base entries, a 6x6x6 colour cube,
    /// and a 24-step grey ramp.
    pub static ref XTERM_256_PALETTE: [Colour; 256] = {
        let mut palette = [DEFAULT_BACKGROUND; 256];
        palette[..16].copy_from_slice(&BASE_PALETTE);
        const CUBE: [u8; 6] = [0x00, 0x5F, 0x87, 0xAF, 0xD7, 0xFF];
        for r in 0..6 {
            for g in 0..6 {
                for b in 0..6 {
                    palette[16 + 36 * r + 6 * g + b] = Colour::rgb(CUBE[r], CUBE[g], CUBE[b]);
                }
            }
        }
        for i in 0..24 {
            let level = 8 + 10 * i as u8;
            palette[232 + i] = Colour::rgb(level, level, level);
        }
        palette
    };
}

impl Colour {
    /// Nearest base-palette index, for 16-colour output.
    pub fn to_palette16(self) -> u8 {
        let mut best = 0usize;
        let mut best_distance = u32::MAX;
        for (i, c) in BASE_PALETTE.iter().enumerate() {
            let dr = i32::from(self.red) - i32::from(c.red);
            let dg = i32::from(self.green) - i32::from(c.green);
            let db = i32::from(self.blue) - i32::from(c.blue);
            let distance = (dr * dr + dg * dg + db * db) as u32;
            if distance < best_distance {
                best_distance = distance;
                best = i;
            }
        }
        best as u8
    }

    /// Relational reduction to the 8 CGA hardware colours (B/G/R bit
    /// order), for the legacy cell layout.
    pub fn to_cga8(self) -> u8 {
        const CGA_BLACK: u8 = 0;
        const CGA_BLUE: u8 = 1;
        const CGA_GREEN: u8 = 2;
        const CGA_CYAN: u8 = 3;
        const CGA_RED: u8 = 4;
        const CGA_MAGENTA: u8 = 5;
        const CGA_YELLOW: u8 = 6;
        const CGA_WHITE: u8 = 7;

        if self.red < self.green {
            // Something with no red.
            if self.green < self.blue {
                CGA_BLUE
            } else if self.blue < self.green {
                CGA_GREEN
            } else {
                CGA_CYAN
            }
        } else if self.green < self.red {
            // Something with no green.
            if self.red < self.blue {
                CGA_BLUE
            } else if self.blue < self.red {
                CGA_RED
            } else {
                CGA_MAGENTA
            }
        } else {
            // Something with equal red and green.
            if self.red < self.blue {
                CGA_BLUE
            } else if self.blue < self.red {
                CGA_YELLOW
            } else if self.red != 0 {
                CGA_WHITE
            } else {
                CGA_BLACK
            }
        }
    }
}

/// The CGA hardware palette, indexed in B/G/R bit order.
pub const CGA_PALETTE: [Colour; 8] = [
    Colour::rgb(0x00, 0x00, 0x00),
    Colour::rgb(0x00, 0x00, 0xAA),
    Colour::rgb(0x00, 0xAA, 0x00),
    Colour::rgb(0x00, 0xAA, 0xAA),
    Colour::rgb(0xAA, 0x00, 0x00),
    Colour::rgb(0xAA, 0x00, 0xAA),
    Colour::rgb(0xAA, 0x55, 0x00),
    Colour::rgb(0xAA, 0xAA, 0xAA),
];

/// Active foreground/background pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColourPair {
    pub foreground: Colour,
    pub background: Colour,
}

impl Default for ColourPair {
    fn default() -> Self {
        ColourPair {
            foreground: DEFAULT_FOREGROUND,
            background: DEFAULT_BACKGROUND,
        }
    }
}

/// One cell of the display grid. `character` may be NUL for a blank, and
/// stores a raw code point so the historical UTF-8 range survives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharacterCell {
    pub character: u32,
    pub attributes: CellAttributes,
    pub foreground: Colour,
    pub background: Colour,
}

impl Default for CharacterCell {
    fn default() -> Self {
        CharacterCell {
            character: u32::from(b' '),
            attributes: CellAttributes::empty(),
            foreground: DEFAULT_FOREGROUND,
            background: DEFAULT_BACKGROUND,
        }
    }
}

impl CharacterCell {
    pub fn new(character: u32, attributes: CellAttributes, foreground: Colour, background: Colour) -> Self {
        CharacterCell {
            character,
            attributes,
            foreground,
            background,
        }
    }
}

/// Display width of a code point in cells: 2 for the East Asian wide and
/// fullwidth blocks, 1 otherwise.
pub fn character_width(code: u32) -> u16 {
    const WIDE: [(u32, u32); 13] = [
        (0x1100, 0x115F),
        (0x2E80, 0x303E),
        (0x3041, 0x33FF),
        (0x3400, 0x4DBF),
        (0x4E00, 0x9FFF),
        (0xA000, 0xA4CF),
        (0xAC00, 0xD7A3),
        (0xF900, 0xFAFF),
        (0xFE30, 0xFE4F),
        (0xFF00, 0xFF60),
        (0xFFE0, 0xFFE6),
        (0x2_0000, 0x2_FFFD),
        (0x3_0000, 0x3_FFFD),
    ];
    if WIDE.iter().any(|&(lo, hi)| (lo..=hi).contains(&code)) {
        2
    } else {
        1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_palette_round_trips_through_reduction() {
        for (i, c) in BASE_PALETTE.iter().enumerate() {
            assert_eq!(c.to_palette16() as usize, i);
        }
    }

    #[test]
    fn cga_reduction_is_relational() {
        assert_eq!(Colour::rgb(0, 0, 0).to_cga8(), 0);
        assert_eq!(Colour::rgb(10, 10, 200).to_cga8(), 1);
        assert_eq!(Colour::rgb(0, 200, 0).to_cga8(), 2);
        assert_eq!(Colour::rgb(200, 0, 0).to_cga8(), 4);
        assert_eq!(Colour::rgb(200, 200, 200).to_cga8(), 7);
    }

    #[test]
    fn xterm_palette_shape() {
        assert_eq!(XTERM_256_PALETTE[0], BASE_PALETTE[0]);
        assert_eq!(XTERM_256_PALETTE[16], Colour::rgb(0, 0, 0));
        assert_eq!(XTERM_256_PALETTE[196], Colour::rgb(0xFF, 0, 0));
        assert_eq!(XTERM_256_PALETTE[231], Colour::rgb(0xFF, 0xFF, 0xFF));
        assert_eq!(XTERM_256_PALETTE[232], Colour::rgb(8, 8, 8));
        assert_eq!(XTERM_256_PALETTE[255], Colour::rgb(238, 238, 238));
    }

    #[test]
    fn wide_characters_take_two_cells() {
        assert_eq!(character_width(u32::from(b'A')), 1);
        assert_eq!(character_width(0xE9), 1);
        assert_eq!(character_width(0x4E2D), 2);
        assert_eq!(character_width(0xFF21), 2);
    }
}
