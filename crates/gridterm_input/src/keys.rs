//! Function, extended, and consumer key encoding, per dialect.
//!
//! The dialect differences live in the extended-key tables below; the
//! writer vocabulary in the encoder module keeps each entry to one line.
//! Keypad keys take three possible forms (SS3 application, CSI cursor,
//! DECFNK editing) selected by keypad mode and, on some dialects, by the
//! modifier state.

use crate::dialect::{sco_function_key_char, Dialect};
use crate::encoder::InputEncoder;
use crate::event::{extended_keys as xk, Modifiers};

const TAB: u8 = 0x09;
const DEL: u8 = 0x7F;

/// DEC's function-key index table: F1..F24 as transmitted in `CSI n ~`.
const DECFNK_INDEX: [u32; 24] = [
    11, 12, 13, 14, 15, 17, 18, 19, 20, 21, 23, 24, 25, 26, 28, 29, 31, 32, 33, 34, 35, 36, 42, 43,
];

impl InputEncoder {
    pub(crate) fn write_function_key(&mut self, k: u16, modifiers: Modifiers) {
        self.set_pasting(false);
        match self.dialect {
            Dialect::DecVt | Dialect::LinuxConsole | Dialect::NetBsdConsole | Dialect::XtermPc => self.write_function_key_decvt(k, modifiers),
            Dialect::Teken => self.write_function_key_teken(k, modifiers),
            Dialect::ScoConsole => self.write_function_key_sco_console(k, modifiers),
        }
    }

    fn write_function_key_decvt(&mut self, k: u16, modifiers: Modifiers) {
        if !self.send_dec_function_keys {
            self.write_fnk(u32::from(k), modifiers);
        } else if (1..=24).contains(&k) {
            self.write_decfnk_ambig(DECFNK_INDEX[usize::from(k - 1)], modifiers);
        } else {
            // Beyond the DEC table: fall back to the standard form.
            self.write_fnk(u32::from(k), modifiers);
        }
    }

    // The folding of modifiers into SCO key numbers is done by keyboard
    // map realizers, so none happens here.
    fn write_function_key_sco_console(&mut self, k: u16, modifiers: Modifiers) {
        if !self.send_sco_function_keys {
            self.write_function_key_decvt(k, modifiers);
        } else {
            match sco_function_key_char(k) {
                Some(c) => self.write_sco_console_fnk(modifiers, c),
                None => self.write_fnk(u32::from(k), modifiers),
            }
        }
    }

    // libteken switches between the DEC and SCO encodings per key: F1..F12
    // unmodified stay DEC, the rest go through the SCO table.
    fn write_function_key_teken(&mut self, k: u16, modifiers: Modifiers) {
        if !self.send_teken_function_keys || (k < 13 && modifiers.is_empty()) {
            self.write_function_key_decvt(k, modifiers);
        } else {
            self.write_function_key_sco_console(k, modifiers);
        }
    }

    pub(crate) fn write_consumer_key(&mut self, k: u16, modifiers: Modifiers) {
        self.set_pasting(false);
        self.write_usb_consumer_fnk(k, modifiers);
    }

    pub(crate) fn write_extended_key(&mut self, k: u16, modifiers: Modifiers) {
        self.set_pasting(false);
        match self.dialect {
            Dialect::DecVt => self.write_extended_key_decvt(k, modifiers),
            Dialect::ScoConsole => self.write_extended_key_sco_console(k, modifiers),
            Dialect::LinuxConsole => self.write_extended_key_linux_kvt(k, modifiers),
            Dialect::NetBsdConsole => self.write_extended_key_netbsd_console(k, modifiers),
            Dialect::XtermPc => self.write_extended_key_xterm_pc(k, modifiers),
            Dialect::Teken => self.write_extended_key_teken(k, modifiers),
        }
    }

    /// Strict DEC VT keypad: application mode is SS3 and swallows
    /// modifiers.
    fn write_decvt_keypad_fnk(&mut self, app_mode: bool, app_char: u8, decfnk: u32, m: Modifiers) {
        if app_mode {
            self.write_ss3_character(app_char);
        } else {
            self.write_decfnk_ambig(decfnk, m);
        }
    }

    fn write_decvt_keypad_csi(&mut self, app_mode: bool, app_char: u8, csi_char: u8, m: Modifiers) {
        if app_mode {
            self.write_ss3_character(app_char);
        } else {
            self.write_csi_sequence_ambig(1, m, csi_char);
        }
    }

    fn write_decvt_keypad(&mut self, app_mode: bool, app_char: u8, csi_char: u8, decfnk: u32, m: Modifiers) {
        if app_mode {
            self.write_ss3_character(app_char);
        } else if m.contains(Modifiers::LEVEL3) {
            self.write_decfnk_ambig(decfnk, m);
        } else {
            self.write_csi_sequence_ambig(1, m, csi_char);
        }
    }

    /// XTerm keypad: application form only under Level 2, and with the
    /// modifier parameter jammed into the SS3 sequence.
    fn write_xterm_pc_keypad_fnk(&mut self, app_mode: bool, app_char: u8, decfnk: u32, m: Modifiers) {
        if app_mode && m.contains(Modifiers::LEVEL2) {
            self.write_broken_ss3_sequence(m, app_char);
        } else {
            self.write_decfnk_ambig(decfnk, m);
        }
    }

    fn write_xterm_pc_keypad_csi(&mut self, app_mode: bool, app_char: u8, csi_char: u8, m: Modifiers) {
        if app_mode && m.contains(Modifiers::LEVEL2) {
            self.write_broken_ss3_sequence(m, app_char);
        } else {
            self.write_csi_sequence_ambig(1, m, csi_char);
        }
    }

    fn write_xterm_pc_keypad(&mut self, app_mode: bool, app_char: u8, csi_char: u8, decfnk: u32, m: Modifiers) {
        if app_mode && m.contains(Modifiers::LEVEL2) {
            self.write_broken_ss3_sequence(m, app_char);
        } else if m.contains(Modifiers::LEVEL3) {
            self.write_decfnk_ambig(decfnk, m);
        } else {
            self.write_csi_sequence_ambig(1, m, csi_char);
        }
    }

    fn write_teken_keypad(&mut self, app_mode: bool, app_char: u8, csi_char: u8, decfnk: u32, m: Modifiers) {
        if !m.is_empty() {
            self.write_decfnk(decfnk, m);
        } else {
            self.write_ss3_or_csi_sequence_split(app_mode, app_char, csi_char, m);
        }
    }

    /// The calculator-pad extension keys shared by every dialect, plus the
    /// private fallback forms.
    fn write_extended_key_common(&mut self, k: u16, m: Modifiers) {
        match k {
            xk::PAD_00 => self.write_raw(b"00"),
            xk::PAD_000 => self.write_raw(b"000"),
            xk::PAD_THOUSANDS_SEP => self.write_raw_byte(b','),
            xk::PAD_DECIMAL_SEP => self.write_raw_byte(b'.'),
            xk::PAD_OPEN_BRACKET => self.write_raw_byte(b'['),
            xk::PAD_CLOSE_BRACKET => self.write_raw_byte(b']'),
            xk::PAD_OPEN_BRACE => self.write_raw_byte(b'{'),
            xk::PAD_CLOSE_BRACE => self.write_raw_byte(b'}'),
            xk::PAD_SPACE => self.write_raw_byte(b' '),
            xk::PAD_AT => self.write_raw_byte(b'@'),
            xk::PAD_HASH => self.write_raw_byte(b'#'),
            xk::PAD_COLON => self.write_raw_byte(b':'),
            xk::PAD_LESS => self.write_raw_byte(b'<'),
            xk::PAD_GREATER => self.write_raw_byte(b'>'),
            xk::PAD_PERCENT => self.write_raw_byte(b'%'),
            xk::PAD_EXCLAMATION => self.write_raw_byte(b'!'),
            _ => {
                if k & xk::LOCAL_MARK != xk::LOCAL_MARK {
                    self.write_usb_extended_fnk(k, m);
                } else {
                    log::warn!("unknown extended key {k:#06x}");
                }
            }
        }
    }

    // The sequences of the DEC VT510/VT520 programmers' references. There
    // is no way to transmit modifier state with application-mode keys.
    fn write_extended_key_decvt(&mut self, k: u16, m: Modifiers) {
        let calc = self.calculator_application_mode;
        let cursor = self.cursor_application_mode;
        match k {
            // The calculator keypad.
            xk::PAD_TAB => self.write_latin1_or_csi_sequence(b'I', TAB, m),
            xk::PAD_ENTER => {
                if calc {
                    self.write_ss3_character(b'M');
                } else {
                    self.write_return_enter(m);
                }
            }
            xk::PAD_F1 => self.write_ss3_character(b'P'),
            xk::PAD_F2 => self.write_ss3_character(b'Q'),
            xk::PAD_F3 => self.write_ss3_character(b'R'),
            xk::PAD_F4 => self.write_ss3_character(b'S'),
            xk::PAD_F5 => self.write_ss3_character(b'T'),
            xk::PAD_EQUALS | xk::PAD_EQUALS_AS400 => self.write_ss3_or_latin1(calc, b'X', b'='),
            xk::PAD_ASTERISK => self.write_ss3_or_latin1(calc, b'j', b'*'),
            xk::PAD_PLUS => self.write_ss3_or_latin1(calc, b'k', b'+'),
            xk::PAD_COMMA => self.write_ss3_or_latin1(calc, b'l', b','),
            xk::PAD_MINUS => self.write_ss3_or_latin1(calc, b'm', b'-'),
            xk::PAD_DELETE => self.write_decvt_keypad_fnk(calc, b'n', 3, m),
            xk::PAD_SLASH => self.write_ss3_or_latin1(calc, b'o', b'/'),
            xk::PAD_INSERT => self.write_decvt_keypad_fnk(calc, b'p', 2, m),
            xk::PAD_END => self.write_decvt_keypad_csi(calc, b'q', b'F', m),
            xk::PAD_DOWN => self.write_decvt_keypad(calc, b'r', b'B', 8, m),
            xk::PAD_PAGE_DOWN => self.write_decvt_keypad_fnk(calc, b's', 6, m),
            xk::PAD_LEFT => self.write_decvt_keypad(calc, b't', b'D', 7, m),
            xk::PAD_CENTRE => self.write_decvt_keypad_csi(calc, b'u', b'E', m),
            xk::PAD_RIGHT => self.write_decvt_keypad(calc, b'v', b'C', 10, m),
            xk::PAD_HOME => self.write_decvt_keypad_csi(calc, b'w', b'H', m),
            xk::PAD_UP => self.write_decvt_keypad(calc, b'x', b'A', 9, m),
            xk::PAD_PAGE_UP => self.write_decvt_keypad_fnk(calc, b'y', 5, m),
            // The cursor/editing keypad.
            xk::SCROLL_UP | xk::UP_ARROW => self.write_decvt_keypad(cursor, b'A', b'A', 9, m),
            xk::SCROLL_DOWN | xk::DOWN_ARROW => self.write_decvt_keypad(cursor, b'B', b'B', 8, m),
            xk::RIGHT_ARROW => self.write_decvt_keypad(cursor, b'C', b'C', 10, m),
            xk::LEFT_ARROW => self.write_decvt_keypad(cursor, b'D', b'D', 7, m),
            xk::CENTRE => self.write_decvt_keypad_csi(false, b'E', b'E', m),
            xk::END => self.write_decvt_keypad_csi(false, b'F', b'F', m),
            xk::HOME => self.write_decvt_keypad_csi(false, b'H', b'H', m),
            xk::TAB => self.write_latin1_or_csi_sequence(b'I', TAB, m),
            xk::BACKTAB => self.write_decvt_keypad_csi(false, b'Z', b'Z', m),
            xk::FIND => self.write_decfnk_ambig(1, m),
            xk::INS_CHAR | xk::INSERT => self.write_decfnk_ambig(2, m),
            xk::DEL_CHAR | xk::DELETE => self.write_ord_or_decfnk_ambig(self.delete_is_del, DEL, 3, m),
            xk::SELECT => self.write_decfnk_ambig(4, m),
            xk::PREVIOUS | xk::PAGE_UP => self.write_decfnk_ambig(5, m),
            xk::NEXT | xk::PAGE_DOWN => self.write_decfnk_ambig(6, m),
            xk::BACKSPACE => self.write_backspace_or_del(m),
            xk::ESCAPE => self.write_esc_or_fs(m),
            xk::RETURN_OR_ENTER => self.write_return_enter(m),
            _ => self.write_extended_key_common(k, m),
        }
    }

    // XTerm in PC mode: modifiers ride in the (malformed) SS3 form in
    // application mode but revert the keypad to normal mode under
    // Control or Level 3.
    fn write_extended_key_xterm_pc(&mut self, k: u16, m: Modifiers) {
        let calc = self.calculator_application_mode;
        let cursor = self.cursor_application_mode;
        match k {
            xk::PAD_TAB => self.write_xterm_pc_keypad_csi(calc, b'I', b'I', m),
            xk::PAD_ENTER => {
                if calc {
                    self.write_xterm_pc_keypad_csi(calc, b'M', b'M', m);
                } else {
                    self.write_return_enter(m);
                }
            }
            xk::PAD_F1 => self.write_xterm_pc_keypad_csi(calc, b'P', b'P', m),
            xk::PAD_F2 => self.write_xterm_pc_keypad_csi(calc, b'Q', b'Q', m),
            xk::PAD_F3 => self.write_xterm_pc_keypad_csi(calc, b'R', b'R', m),
            xk::PAD_F4 => self.write_xterm_pc_keypad_csi(calc, b'S', b'S', m),
            xk::PAD_F5 => self.write_xterm_pc_keypad_csi(calc, b'T', b'T', m),
            xk::PAD_EQUALS | xk::PAD_EQUALS_AS400 => self.write_ss3_or_latin1(calc, b'X', b'='),
            xk::PAD_ASTERISK => self.write_ss3_or_latin1(calc, b'j', b'*'),
            xk::PAD_PLUS => self.write_ss3_or_latin1(calc, b'k', b'+'),
            xk::PAD_COMMA => self.write_ss3_or_latin1(calc, b'l', b','),
            xk::PAD_MINUS => self.write_ss3_or_latin1(calc, b'm', b'-'),
            xk::PAD_DELETE => self.write_xterm_pc_keypad_fnk(calc, b'n', 3, m),
            xk::PAD_SLASH => self.write_ss3_or_latin1(calc, b'o', b'/'),
            xk::PAD_INSERT => self.write_xterm_pc_keypad_fnk(calc, b'p', 2, m),
            xk::PAD_END => self.write_xterm_pc_keypad_csi(calc, b'q', b'F', m),
            xk::PAD_DOWN => self.write_xterm_pc_keypad(calc, b'r', b'B', 8, m),
            xk::PAD_PAGE_DOWN => self.write_xterm_pc_keypad_fnk(calc, b's', 6, m),
            xk::PAD_LEFT => self.write_xterm_pc_keypad(calc, b't', b'D', 7, m),
            xk::PAD_CENTRE => self.write_xterm_pc_keypad_csi(calc, b'u', b'E', m),
            xk::PAD_RIGHT => self.write_xterm_pc_keypad(calc, b'v', b'C', 10, m),
            xk::PAD_HOME => self.write_xterm_pc_keypad_csi(calc, b'w', b'H', m),
            xk::PAD_UP => self.write_xterm_pc_keypad(calc, b'x', b'A', 9, m),
            xk::PAD_PAGE_UP => self.write_xterm_pc_keypad_fnk(calc, b'y', 5, m),
            xk::SCROLL_UP | xk::UP_ARROW => self.write_ss3_or_csi_sequence_ambig(cursor, b'A', m),
            xk::SCROLL_DOWN | xk::DOWN_ARROW => self.write_ss3_or_csi_sequence_ambig(cursor, b'B', m),
            xk::RIGHT_ARROW => self.write_ss3_or_csi_sequence_ambig(cursor, b'C', m),
            xk::LEFT_ARROW => self.write_ss3_or_csi_sequence_ambig(cursor, b'D', m),
            xk::CENTRE => self.write_ss3_or_csi_sequence_ambig(cursor, b'E', m),
            xk::END => self.write_ss3_or_csi_sequence_ambig(cursor, b'F', m),
            xk::HOME => self.write_ss3_or_csi_sequence_ambig(cursor, b'H', m),
            xk::TAB => self.write_latin1_or_csi_sequence(b'I', TAB, m),
            xk::BACKTAB => self.write_ss3_or_csi_sequence(cursor, b'Z', m),
            xk::FIND => self.write_decfnk_ambig(1, m),
            xk::INS_CHAR | xk::INSERT => self.write_decfnk_ambig(2, m),
            xk::DEL_CHAR | xk::DELETE => self.write_ord_or_decfnk_ambig(self.delete_is_del, DEL, 3, m),
            xk::SELECT => self.write_decfnk_ambig(4, m),
            xk::PREVIOUS | xk::PAGE_UP => self.write_decfnk_ambig(5, m),
            xk::NEXT | xk::PAGE_DOWN => self.write_decfnk_ambig(6, m),
            xk::BACKSPACE => self.write_backspace_or_del(m),
            xk::ESCAPE => self.write_esc_or_fs(m),
            xk::RETURN_OR_ENTER => self.write_return_enter(m),
            _ => self.write_extended_key_common(k, m),
        }
    }

    // libteken, as the FreeBSD kernel uses it since 9.0. Application
    // keypad modes and transmitted modifiers are extensions, so the
    // DECFNK and CSI forms go out with sub-parameter modifiers.
    fn write_extended_key_teken(&mut self, k: u16, m: Modifiers) {
        let calc = self.calculator_application_mode;
        let cursor = self.cursor_application_mode;
        match k {
            xk::PAD_ENTER => {
                if calc {
                    self.write_ss3_or_csi_sequence(calc, b'M', m);
                } else {
                    self.write_return_enter(m);
                }
            }
            xk::PAD_F1 => self.write_ss3_or_csi_sequence(true, b'P', m),
            xk::PAD_F2 => self.write_ss3_or_csi_sequence(true, b'Q', m),
            xk::PAD_F3 => self.write_ss3_or_csi_sequence(true, b'R', m),
            xk::PAD_F4 => self.write_ss3_or_csi_sequence(true, b'S', m),
            xk::PAD_F5 => self.write_ss3_or_csi_sequence(true, b'T', m),
            xk::PAD_EQUALS | xk::PAD_EQUALS_AS400 => self.write_ss3_or_latin1(calc, b'X', b'='),
            xk::PAD_ASTERISK => self.write_ss3_or_latin1(calc, b'j', b'*'),
            xk::PAD_PLUS => self.write_ss3_or_latin1(calc, b'k', b'+'),
            xk::PAD_COMMA => self.write_ss3_or_latin1(calc, b'l', b','),
            xk::PAD_MINUS => self.write_ss3_or_latin1(calc, b'm', b'-'),
            xk::PAD_DELETE => self.write_ss3_or_decfnk(calc, b'n', 3, m),
            xk::PAD_SLASH => self.write_ss3_or_latin1(calc, b'o', b'/'),
            xk::PAD_INSERT => self.write_ss3_or_decfnk(calc, b'p', 2, m),
            xk::PAD_END => self.write_ss3_or_csi_sequence_split(calc, b'q', b'F', m),
            xk::PAD_DOWN => self.write_teken_keypad(calc, b'r', b'B', 8, m),
            xk::PAD_PAGE_DOWN => self.write_ss3_or_decfnk(calc, b's', 6, m),
            xk::PAD_LEFT => self.write_teken_keypad(calc, b't', b'D', 7, m),
            xk::PAD_CENTRE => self.write_ss3_or_csi_sequence_split(calc, b'u', b'E', m),
            xk::PAD_RIGHT => self.write_teken_keypad(calc, b'v', b'C', 10, m),
            xk::PAD_HOME => self.write_ss3_or_csi_sequence_split(calc, b'w', b'H', m),
            xk::PAD_UP => self.write_teken_keypad(calc, b'x', b'A', 9, m),
            xk::PAD_PAGE_UP => self.write_ss3_or_decfnk(calc, b'y', 5, m),
            xk::SCROLL_UP | xk::UP_ARROW => self.write_ss3_or_csi_sequence(cursor, b'A', m),
            xk::SCROLL_DOWN | xk::DOWN_ARROW => self.write_ss3_or_csi_sequence(cursor, b'B', m),
            xk::RIGHT_ARROW => self.write_ss3_or_csi_sequence(cursor, b'C', m),
            xk::LEFT_ARROW => self.write_ss3_or_csi_sequence(cursor, b'D', m),
            xk::CENTRE => self.write_ss3_or_csi_sequence(cursor, b'E', m),
            xk::END => self.write_ss3_or_csi_sequence(cursor, b'F', m),
            xk::HOME => self.write_ss3_or_csi_sequence(cursor, b'H', m),
            xk::PAD_TAB | xk::TAB => self.write_latin1_or_csi_sequence(b'I', TAB, m),
            xk::BACKTAB => self.write_ss3_or_csi_sequence(cursor, b'Z', m),
            xk::FIND => self.write_decfnk(1, m),
            xk::INS_CHAR | xk::INSERT => self.write_decfnk(2, m),
            xk::DEL_CHAR | xk::DELETE => self.write_ord_or_decfnk(self.delete_is_del, DEL, 3, m),
            xk::SELECT => self.write_decfnk(4, m),
            xk::PREVIOUS | xk::PAGE_UP => self.write_decfnk(5, m),
            xk::NEXT | xk::PAGE_DOWN => self.write_decfnk(6, m),
            xk::BACKSPACE => self.write_backspace_or_del(m),
            xk::ESCAPE => self.write_esc_or_fs(m),
            xk::RETURN_OR_ENTER => self.write_return_enter(m),
            _ => self.write_extended_key_common(k, m),
        }
    }

    // A DEC VT520 in SCO console mode; also teken's CONS25 mode and the
    // older cons25 FreeBSD console. The pads are not distinguished from
    // the editing keys.
    fn write_extended_key_sco_console(&mut self, k: u16, m: Modifiers) {
        let calc = self.calculator_application_mode;
        match k {
            xk::PAD_EQUALS | xk::PAD_EQUALS_AS400 => self.write_ss3_or_latin1(calc, b'X', b'='),
            xk::PAD_ASTERISK => self.write_raw_byte(b'*'),
            xk::PAD_PLUS => self.write_raw_byte(b'+'),
            xk::PAD_COMMA => self.write_raw_byte(b','),
            xk::PAD_MINUS => self.write_raw_byte(b'-'),
            xk::PAD_SLASH => self.write_raw_byte(b'/'),
            xk::SCROLL_UP | xk::PAD_UP | xk::UP_ARROW => self.write_csi_sequence_ambig(1, m, b'A'),
            xk::SCROLL_DOWN | xk::PAD_DOWN | xk::DOWN_ARROW => self.write_csi_sequence_ambig(1, m, b'B'),
            xk::PAD_RIGHT | xk::RIGHT_ARROW => self.write_csi_sequence_ambig(1, m, b'C'),
            xk::PAD_LEFT | xk::LEFT_ARROW => self.write_csi_sequence_ambig(1, m, b'D'),
            xk::PAD_CENTRE | xk::CENTRE => self.write_csi_sequence_ambig(1, m, b'E'),
            xk::PAD_END | xk::END => self.write_csi_sequence_ambig(1, m, b'F'),
            xk::PAD_PAGE_DOWN | xk::PAGE_DOWN => self.write_csi_sequence_ambig(1, m, b'G'),
            xk::PAD_HOME | xk::HOME => self.write_csi_sequence_ambig(1, m, b'H'),
            xk::PAD_PAGE_UP | xk::PAGE_UP => self.write_csi_sequence_ambig(1, m, b'I'),
            xk::INS_CHAR | xk::PAD_INSERT | xk::INSERT => self.write_csi_sequence_ambig(1, m, b'L'),
            xk::PAD_F1 => self.write_csi_sequence_ambig(1, m, b'M'),
            xk::PAD_F2 => self.write_csi_sequence_ambig(1, m, b'N'),
            xk::PAD_F3 => self.write_csi_sequence_ambig(1, m, b'O'),
            xk::PAD_F4 => self.write_csi_sequence_ambig(1, m, b'P'),
            xk::PAD_F5 => self.write_csi_sequence_ambig(1, m, b'Q'),
            xk::PAD_TAB | xk::TAB => self.write_latin1_or_csi_sequence(b'I', TAB, m),
            xk::BACKTAB => self.write_csi_sequence_ambig(1, m, b'Z'),
            xk::BACKSPACE => self.write_backspace_or_del(m),
            xk::ESCAPE => self.write_esc_or_fs(m),
            xk::RETURN_OR_ENTER | xk::PAD_ENTER => self.write_return_enter(m),
            xk::DEL_CHAR | xk::PAD_DELETE | xk::DELETE => self.write_raw_byte(DEL),
            _ => self.write_extended_key_common(k, m),
        }
    }

    // The Linux kernel terminal emulator. Home/Find and End/Select are
    // conflated, and the keypad function keys use the `CSI [` form.
    fn write_extended_key_linux_kvt(&mut self, k: u16, m: Modifiers) {
        let calc = self.calculator_application_mode;
        let cursor = self.cursor_application_mode;
        match k {
            xk::PAD_ENTER => {
                if calc {
                    self.write_ss3_or_csi_sequence(calc, b'M', m);
                } else {
                    self.write_return_enter(m);
                }
            }
            xk::PAD_EQUALS | xk::PAD_EQUALS_AS400 => self.write_ss3_or_latin1(calc, b'X', b'='),
            xk::PAD_F1 => self.write_linux_kvt_fnk(m, b'A'),
            xk::PAD_F2 => self.write_linux_kvt_fnk(m, b'B'),
            xk::PAD_F3 => self.write_linux_kvt_fnk(m, b'C'),
            xk::PAD_F4 => self.write_linux_kvt_fnk(m, b'D'),
            xk::PAD_F5 => self.write_linux_kvt_fnk(m, b'E'),
            xk::PAD_ASTERISK => self.write_ss3_or_latin1(calc, b'j', b'*'),
            xk::PAD_PLUS => self.write_ss3_or_latin1(calc, b'k', b'+'),
            xk::PAD_COMMA => self.write_ss3_or_latin1(calc, b'l', b','),
            xk::PAD_MINUS => self.write_ss3_or_latin1(calc, b'm', b'-'),
            xk::PAD_DELETE => {
                if calc {
                    self.write_ss3_or_latin1(calc, b'n', DEL);
                } else {
                    self.write_ord_or_decfnk(self.delete_is_del, DEL, 3, m);
                }
            }
            xk::PAD_SLASH => self.write_ss3_or_latin1(calc, b'o', b'/'),
            xk::PAD_INSERT => self.write_ss3_or_decfnk(calc, b'p', 2, m),
            xk::PAD_END => self.write_ss3_or_csi_sequence_split(calc, b'q', b'F', m),
            xk::PAD_DOWN => self.write_teken_keypad(calc, b'r', b'B', 8, m),
            xk::PAD_PAGE_DOWN => self.write_ss3_or_decfnk(calc, b's', 6, m),
            xk::PAD_LEFT => self.write_teken_keypad(calc, b't', b'D', 7, m),
            xk::PAD_CENTRE => self.write_ss3_or_csi_sequence_split(calc, b'u', b'G', m),
            xk::PAD_RIGHT => self.write_teken_keypad(calc, b'v', b'C', 10, m),
            xk::PAD_HOME => self.write_ss3_or_csi_sequence_split(calc, b'w', b'H', m),
            xk::PAD_UP => self.write_teken_keypad(calc, b'x', b'A', 9, m),
            xk::PAD_PAGE_UP => self.write_ss3_or_decfnk(calc, b'y', 5, m),
            xk::SCROLL_UP | xk::UP_ARROW => self.write_ss3_or_csi_sequence(cursor, b'A', m),
            xk::SCROLL_DOWN | xk::DOWN_ARROW => self.write_ss3_or_csi_sequence(cursor, b'B', m),
            xk::RIGHT_ARROW => self.write_ss3_or_csi_sequence(cursor, b'C', m),
            xk::LEFT_ARROW => self.write_ss3_or_csi_sequence(cursor, b'D', m),
            xk::CENTRE => self.write_csi_sequence_ambig(1, m, b'G'),
            xk::PAD_TAB | xk::TAB => self.write_latin1_or_csi_sequence(b'I', TAB, m),
            xk::BACKTAB => self.write_ss3_or_csi_sequence(cursor, b'Z', m),
            // The Linux KVT erroneously conflates Home with Find and End
            // with Select.
            xk::HOME | xk::FIND => self.write_decfnk_ambig(1, m),
            xk::INS_CHAR | xk::INSERT => self.write_decfnk_ambig(2, m),
            xk::DEL_CHAR | xk::DELETE => self.write_ord_or_decfnk(self.delete_is_del, DEL, 3, m),
            xk::END | xk::SELECT => self.write_decfnk_ambig(4, m),
            xk::PREVIOUS | xk::PAGE_UP => self.write_decfnk_ambig(5, m),
            xk::NEXT | xk::PAGE_DOWN => self.write_decfnk_ambig(6, m),
            xk::BACKSPACE => self.write_backspace_or_del(m),
            xk::ESCAPE => self.write_esc_or_fs(m),
            xk::RETURN_OR_ENTER => self.write_return_enter(m),
            _ => self.write_extended_key_common(k, m),
        }
    }

    // The NetBSD kernel terminal emulator in "vt100" mode: PF1..PF5 send
    // DECFNK, and Home/End have their own DECFNK numbers 7 and 8.
    fn write_extended_key_netbsd_console(&mut self, k: u16, m: Modifiers) {
        let calc = self.calculator_application_mode;
        let cursor = self.cursor_application_mode;
        match k {
            xk::PAD_ENTER => {
                if calc {
                    self.write_ss3_or_csi_sequence(calc, b'M', m);
                } else {
                    self.write_return_enter(m);
                }
            }
            xk::PAD_F1 => self.write_ss3_or_decfnk(calc, b'P', 11, m),
            xk::PAD_F2 => self.write_ss3_or_decfnk(calc, b'Q', 12, m),
            xk::PAD_F3 => self.write_ss3_or_decfnk(calc, b'R', 13, m),
            xk::PAD_F4 => self.write_ss3_or_decfnk(calc, b'S', 14, m),
            xk::PAD_F5 => self.write_ss3_or_decfnk(calc, b'T', 15, m),
            xk::PAD_EQUALS | xk::PAD_EQUALS_AS400 => self.write_ss3_or_latin1(calc, b'X', b'='),
            xk::PAD_ASTERISK => self.write_ss3_or_latin1(calc, b'j', b'*'),
            xk::PAD_PLUS => self.write_ss3_or_latin1(calc, b'k', b'+'),
            xk::PAD_COMMA => self.write_ss3_or_latin1(calc, b'l', b','),
            xk::PAD_MINUS => self.write_ss3_or_latin1(calc, b'm', b'-'),
            xk::PAD_DELETE => self.write_ss3_or_decfnk(calc, b'n', 3, m),
            xk::PAD_SLASH => self.write_ss3_or_latin1(calc, b'o', b'/'),
            xk::PAD_PAGE_UP => self.write_ss3_or_decfnk(calc, b'y', 5, m),
            xk::PAD_END => self.write_ss3_or_csi_sequence_split(calc, b'q', b'F', m),
            xk::PAD_DOWN => self.write_teken_keypad(calc, b'r', b'B', 8, m),
            xk::PAD_PAGE_DOWN => self.write_ss3_or_decfnk(calc, b's', 6, m),
            xk::PAD_LEFT => self.write_teken_keypad(calc, b't', b'D', 7, m),
            xk::PAD_CENTRE => self.write_ss3_or_csi_sequence_split(calc, b'u', b'E', m),
            xk::PAD_RIGHT => self.write_teken_keypad(calc, b'v', b'C', 10, m),
            xk::PAD_HOME => self.write_ss3_or_csi_sequence_split(calc, b'w', b'H', m),
            xk::PAD_UP => self.write_teken_keypad(calc, b'x', b'A', 9, m),
            xk::SCROLL_UP | xk::UP_ARROW => self.write_ss3_or_csi_sequence(cursor, b'A', m),
            xk::SCROLL_DOWN | xk::DOWN_ARROW => self.write_ss3_or_csi_sequence(cursor, b'B', m),
            xk::RIGHT_ARROW => self.write_ss3_or_csi_sequence(cursor, b'C', m),
            xk::LEFT_ARROW => self.write_ss3_or_csi_sequence(cursor, b'D', m),
            xk::CENTRE => self.write_ss3_or_csi_sequence(cursor, b'E', m),
            xk::INS_CHAR | xk::PAD_INSERT | xk::INSERT => self.write_csi_sequence_ambig(1, m, b'L'),
            xk::PAD_TAB | xk::TAB => self.write_latin1_or_csi_sequence(b'I', TAB, m),
            xk::BACKTAB => self.write_ss3_or_csi_sequence(cursor, b'Z', m),
            xk::FIND => self.write_decfnk_ambig(1, m),
            xk::DEL_CHAR | xk::DELETE => self.write_ord_or_decfnk(self.delete_is_del, DEL, 3, m),
            xk::SELECT => self.write_decfnk_ambig(4, m),
            xk::PREVIOUS | xk::PAGE_UP => self.write_decfnk_ambig(5, m),
            xk::NEXT | xk::PAGE_DOWN => self.write_decfnk_ambig(6, m),
            xk::HOME => self.write_decfnk_ambig(7, m),
            xk::END => self.write_decfnk_ambig(8, m),
            xk::BACKSPACE => self.write_backspace_or_del(m),
            xk::ESCAPE => self.write_esc_or_fs(m),
            xk::RETURN_OR_ENTER => self.write_return_enter(m),
            _ => self.write_extended_key_common(k, m),
        }
    }
}
