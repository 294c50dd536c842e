//! Input events and their 32-bit wire framing.

use bitflags::bitflags;

bitflags! {
    /// Logical modifier state. The DEC wire form is `bits + 1`, so an
    /// unmodified key transmits 1.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
    #[serde(transparent)]
    pub struct Modifiers: u8 {
        const LEVEL2 = 1;
        const LEVEL3 = 2;
        const CONTROL = 4;
        const SUPER = 8;
        const GROUP2 = 16;
    }
}

impl Modifiers {
    pub fn dec_wire(self) -> u32 {
        u32::from(self.bits()) + 1
    }
}

/// Extended (non-character) key numbers: the cursor/editing keypad, the
/// calculator keypad, and a few aliases local to this crate.
///
/// Numbers with the `LOCAL_MARK` bits set are aliases that must never
/// reach the generic fallback encoding.
pub mod extended_keys {
    pub const UP_ARROW: u16 = 0x0001;
    pub const DOWN_ARROW: u16 = 0x0002;
    pub const RIGHT_ARROW: u16 = 0x0003;
    pub const LEFT_ARROW: u16 = 0x0004;
    pub const CENTRE: u16 = 0x0005;
    pub const HOME: u16 = 0x0006;
    pub const END: u16 = 0x0007;
    pub const INSERT: u16 = 0x0008;
    pub const DELETE: u16 = 0x0009;
    pub const PAGE_UP: u16 = 0x000A;
    pub const PAGE_DOWN: u16 = 0x000B;
    pub const FIND: u16 = 0x000C;
    pub const SELECT: u16 = 0x000D;
    pub const PREVIOUS: u16 = 0x000E;
    pub const NEXT: u16 = 0x000F;
    pub const INS_CHAR: u16 = 0x0010;
    pub const DEL_CHAR: u16 = 0x0011;
    pub const TAB: u16 = 0x0012;
    pub const BACKTAB: u16 = 0x0013;
    pub const BACKSPACE: u16 = 0x0014;
    pub const ESCAPE: u16 = 0x0015;
    pub const RETURN_OR_ENTER: u16 = 0x0016;

    pub const PAD_TAB: u16 = 0x0101;
    pub const PAD_ENTER: u16 = 0x0102;
    pub const PAD_F1: u16 = 0x0103;
    pub const PAD_F2: u16 = 0x0104;
    pub const PAD_F3: u16 = 0x0105;
    pub const PAD_F4: u16 = 0x0106;
    pub const PAD_F5: u16 = 0x0107;
    pub const PAD_EQUALS: u16 = 0x0108;
    pub const PAD_EQUALS_AS400: u16 = 0x0109;
    pub const PAD_ASTERISK: u16 = 0x010A;
    pub const PAD_PLUS: u16 = 0x010B;
    pub const PAD_COMMA: u16 = 0x010C;
    pub const PAD_MINUS: u16 = 0x010D;
    pub const PAD_DELETE: u16 = 0x010E;
    pub const PAD_SLASH: u16 = 0x010F;
    pub const PAD_INSERT: u16 = 0x0110;
    pub const PAD_END: u16 = 0x0111;
    pub const PAD_DOWN: u16 = 0x0112;
    pub const PAD_PAGE_DOWN: u16 = 0x0113;
    pub const PAD_LEFT: u16 = 0x0114;
    pub const PAD_CENTRE: u16 = 0x0115;
    pub const PAD_RIGHT: u16 = 0x0116;
    pub const PAD_HOME: u16 = 0x0117;
    pub const PAD_UP: u16 = 0x0118;
    pub const PAD_PAGE_UP: u16 = 0x0119;

    pub const PAD_00: u16 = 0x0120;
    pub const PAD_000: u16 = 0x0121;
    pub const PAD_THOUSANDS_SEP: u16 = 0x0122;
    pub const PAD_DECIMAL_SEP: u16 = 0x0123;
    pub const PAD_OPEN_BRACKET: u16 = 0x0124;
    pub const PAD_CLOSE_BRACKET: u16 = 0x0125;
    pub const PAD_OPEN_BRACE: u16 = 0x0126;
    pub const PAD_CLOSE_BRACE: u16 = 0x0127;
    pub const PAD_SPACE: u16 = 0x0128;
    pub const PAD_AT: u16 = 0x0129;
    pub const PAD_HASH: u16 = 0x012A;
    pub const PAD_COLON: u16 = 0x012B;
    pub const PAD_LESS: u16 = 0x012C;
    pub const PAD_GREATER: u16 = 0x012D;
    pub const PAD_PERCENT: u16 = 0x012E;
    pub const PAD_EXCLAMATION: u16 = 0x012F;

    pub const LOCAL_MARK: u16 = 0x0F00;
    pub const SCROLL_UP: u16 = 0x0F01;
    pub const SCROLL_DOWN: u16 = 0x0F02;
}

/// One abstract input event, as carried by the input message pipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum InputEvent {
    Character { code: u32, pasted: bool, accelerator: bool },
    ConsumerKey { key: u16, modifiers: Modifiers },
    ExtendedKey { key: u16, modifiers: Modifiers },
    FunctionKey { key: u16, modifiers: Modifiers },
    MouseColumn { position: u16, modifiers: Modifiers },
    MouseRow { position: u16, modifiers: Modifiers },
    MouseWheel { wheel: u8, delta: i8, modifiers: Modifiers },
    MouseButton { button: u8, pressed: bool, modifiers: Modifiers },
    Session,
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum InputMessageError {
    #[error("unknown input message tag {0:#03x}")]
    UnknownTag(u32),
}

const TAG_SHIFT: u32 = 28;
const TAG_UCS3: u32 = 0x1;
const TAG_PASTED_UCS3: u32 = 0x2;
const TAG_ACCELERATOR_UCS3: u32 = 0x3;
const TAG_CONSUMER_KEY: u32 = 0x4;
const TAG_EXTENDED_KEY: u32 = 0x5;
const TAG_FUNCTION_KEY: u32 = 0x6;
const TAG_MOUSE_COLUMN: u32 = 0x7;
const TAG_MOUSE_ROW: u32 = 0x8;
const TAG_MOUSE_WHEEL: u32 = 0x9;
const TAG_MOUSE_BUTTON: u32 = 0xA;
const TAG_SESSION: u32 = 0xB;

fn key_payload(key: u16, modifiers: Modifiers) -> u32 {
    (u32::from(key) << 8) | u32::from(modifiers.bits())
}

/// 32-bit little-endian input message codec.
///
/// Upper 4 bits are the tag; character tags carry the code point in the
/// low 28 bits, key and coordinate tags carry `value << 8 | modifiers`,
/// wheel and button tags carry `index << 16 | value << 8 | modifiers`.
pub struct InputMessage;

impl InputMessage {
    pub fn pack(event: InputEvent) -> u32 {
        let (tag, payload) = match event {
            InputEvent::Character { code, pasted, accelerator } => {
                let tag = if pasted {
                    TAG_PASTED_UCS3
                } else if accelerator {
                    TAG_ACCELERATOR_UCS3
                } else {
                    TAG_UCS3
                };
                (tag, code & 0x0FFF_FFFF)
            }
            InputEvent::ConsumerKey { key, modifiers } => (TAG_CONSUMER_KEY, key_payload(key, modifiers)),
            InputEvent::ExtendedKey { key, modifiers } => (TAG_EXTENDED_KEY, key_payload(key, modifiers)),
            InputEvent::FunctionKey { key, modifiers } => (TAG_FUNCTION_KEY, key_payload(key, modifiers)),
            InputEvent::MouseColumn { position, modifiers } => (TAG_MOUSE_COLUMN, key_payload(position, modifiers)),
            InputEvent::MouseRow { position, modifiers } => (TAG_MOUSE_ROW, key_payload(position, modifiers)),
            InputEvent::MouseWheel { wheel, delta, modifiers } => (
                TAG_MOUSE_WHEEL,
                (u32::from(wheel) << 16) | (u32::from(delta as u8) << 8) | u32::from(modifiers.bits()),
            ),
            InputEvent::MouseButton { button, pressed, modifiers } => (
                TAG_MOUSE_BUTTON,
                (u32::from(button) << 16) | (u32::from(u8::from(pressed)) << 8) | u32::from(modifiers.bits()),
            ),
            InputEvent::Session => (TAG_SESSION, 0),
        };
        (tag << TAG_SHIFT) | payload
    }

    pub fn pack_bytes(event: InputEvent) -> [u8; 4] {
        Self::pack(event).to_le_bytes()
    }

    pub fn parse(message: u32) -> Result<InputEvent, InputMessageError> {
        let payload = message & 0x0FFF_FFFF;
        let key = ((payload >> 8) & 0xFFFF) as u16;
        let modifiers = Modifiers::from_bits_truncate((payload & 0xFF) as u8);
        match message >> TAG_SHIFT {
            TAG_UCS3 => Ok(InputEvent::Character {
                code: payload,
                pasted: false,
                accelerator: false,
            }),
            TAG_PASTED_UCS3 => Ok(InputEvent::Character {
                code: payload,
                pasted: true,
                accelerator: false,
            }),
            TAG_ACCELERATOR_UCS3 => Ok(InputEvent::Character {
                code: payload,
                pasted: false,
                accelerator: true,
            }),
            TAG_CONSUMER_KEY => Ok(InputEvent::ConsumerKey { key, modifiers }),
            TAG_EXTENDED_KEY => Ok(InputEvent::ExtendedKey { key, modifiers }),
            TAG_FUNCTION_KEY => Ok(InputEvent::FunctionKey { key, modifiers }),
            TAG_MOUSE_COLUMN => Ok(InputEvent::MouseColumn { position: key, modifiers }),
            TAG_MOUSE_ROW => Ok(InputEvent::MouseRow { position: key, modifiers }),
            TAG_MOUSE_WHEEL => Ok(InputEvent::MouseWheel {
                wheel: ((payload >> 16) & 0xFF) as u8,
                delta: ((payload >> 8) & 0xFF) as u8 as i8,
                modifiers,
            }),
            TAG_MOUSE_BUTTON => Ok(InputEvent::MouseButton {
                button: ((payload >> 16) & 0xFF) as u8,
                pressed: (payload >> 8) & 0xFF != 0,
                modifiers,
            }),
            TAG_SESSION => Ok(InputEvent::Session),
            tag => Err(InputMessageError::UnknownTag(tag)),
        }
    }

    pub fn parse_bytes(bytes: [u8; 4]) -> Result<InputEvent, InputMessageError> {
        Self::parse(u32::from_le_bytes(bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_round_trip() {
        let events = [
            InputEvent::Character {
                code: 0x20AC,
                pasted: false,
                accelerator: false,
            },
            InputEvent::Character {
                code: u32::from(b'v'),
                pasted: true,
                accelerator: false,
            },
            InputEvent::Character {
                code: u32::from(b'x'),
                pasted: false,
                accelerator: true,
            },
            InputEvent::FunctionKey {
                key: 12,
                modifiers: Modifiers::LEVEL2 | Modifiers::CONTROL,
            },
            InputEvent::ExtendedKey {
                key: extended_keys::PAD_ENTER,
                modifiers: Modifiers::empty(),
            },
            InputEvent::ConsumerKey {
                key: 0x00E9,
                modifiers: Modifiers::SUPER,
            },
            InputEvent::MouseColumn {
                position: 1023,
                modifiers: Modifiers::LEVEL3,
            },
            InputEvent::MouseRow {
                position: 5,
                modifiers: Modifiers::empty(),
            },
            InputEvent::MouseWheel {
                wheel: 1,
                delta: -3,
                modifiers: Modifiers::empty(),
            },
            InputEvent::MouseButton {
                button: 2,
                pressed: true,
                modifiers: Modifiers::GROUP2,
            },
            InputEvent::Session,
        ];
        for event in events {
            assert_eq!(InputMessage::parse(InputMessage::pack(event)), Ok(event), "{event:?}");
        }
    }

    #[test]
    fn framing_is_little_endian() {
        let bytes = InputMessage::pack_bytes(InputEvent::Character {
            code: 0x41,
            pasted: false,
            accelerator: false,
        });
        assert_eq!(bytes, [0x41, 0x00, 0x00, 0x10]);
        assert_eq!(
            InputMessage::parse_bytes(bytes),
            Ok(InputEvent::Character {
                code: 0x41,
                pasted: false,
                accelerator: false,
            })
        );
    }

    #[test]
    fn unknown_tags_are_errors() {
        assert_eq!(InputMessage::parse(0xF000_0000), Err(InputMessageError::UnknownTag(0xF)));
        assert_eq!(InputMessage::parse(0), Err(InputMessageError::UnknownTag(0)));
    }

    #[test]
    fn dec_wire_modifiers_are_offset_by_one() {
        assert_eq!(Modifiers::empty().dec_wire(), 1);
        assert_eq!(Modifiers::LEVEL2.dec_wire(), 2);
        assert_eq!((Modifiers::LEVEL2 | Modifiers::CONTROL).dec_wire(), 6);
    }
}
