//! Canonical persisted cell layouts.
//!
//! Two byte layouts survive from the file-backed display buffers: the
//! 2-byte legacy cell (`[char-low][attr]`, attribute packed as
//! `blink|_|_|_|bold|bg[3]|fg[3]`) and the 16-byte true-colour cell
//! (`[fg:4][bg:4][codepoint:4][attr:2][_:2]`, little-endian). The disk
//! plumbing itself lives with the host; these codecs are the contract.

use byteorder::{ByteOrder, LittleEndian};

use crate::cell::{CellAttributes, CharacterCell, CGA_PALETTE};

pub const LEGACY_CELL_LENGTH: usize = 2;
pub const UNICODE_CELL_LENGTH: usize = 16;

pub fn encode_legacy_cell(cell: &CharacterCell) -> [u8; LEGACY_CELL_LENGTH] {
    let character = if cell.character > 0xFE { 0xFF } else { cell.character as u8 };
    let mut attr = cell.foreground.to_cga8() | (cell.background.to_cga8() << 4);
    if cell.attributes.contains(CellAttributes::BLINK) {
        attr |= 0x80;
    }
    if cell.attributes.contains(CellAttributes::BOLD) {
        attr |= 0x08;
    }
    [character, attr]
}

pub fn decode_legacy_cell(bytes: [u8; LEGACY_CELL_LENGTH]) -> CharacterCell {
    let mut attributes = CellAttributes::empty();
    if bytes[1] & 0x80 != 0 {
        attributes |= CellAttributes::BLINK;
    }
    if bytes[1] & 0x08 != 0 {
        attributes |= CellAttributes::BOLD;
    }
    CharacterCell {
        character: u32::from(bytes[0]),
        attributes,
        foreground: CGA_PALETTE[usize::from(bytes[1] & 0x07)],
        background: CGA_PALETTE[usize::from((bytes[1] >> 4) & 0x07)],
    }
}

pub fn encode_unicode_cell(cell: &CharacterCell) -> [u8; UNICODE_CELL_LENGTH] {
    let mut bytes = [0u8; UNICODE_CELL_LENGTH];
    bytes[0] = cell.foreground.alpha;
    bytes[1] = cell.foreground.red;
    bytes[2] = cell.foreground.green;
    bytes[3] = cell.foreground.blue;
    bytes[4] = cell.background.alpha;
    bytes[5] = cell.background.red;
    bytes[6] = cell.background.green;
    bytes[7] = cell.background.blue;
    LittleEndian::write_u32(&mut bytes[8..12], cell.character);
    LittleEndian::write_u16(&mut bytes[12..14], cell.attributes.bits());
    bytes
}

pub fn decode_unicode_cell(bytes: [u8; UNICODE_CELL_LENGTH]) -> CharacterCell {
    CharacterCell {
        character: LittleEndian::read_u32(&bytes[8..12]),
        attributes: CellAttributes::from_bits_truncate(LittleEndian::read_u16(&bytes[12..14])),
        foreground: crate::Colour {
            alpha: bytes[0],
            red: bytes[1],
            green: bytes[2],
            blue: bytes[3],
        },
        background: crate::Colour {
            alpha: bytes[4],
            red: bytes[5],
            green: bytes[6],
            blue: bytes[7],
        },
    }
}
