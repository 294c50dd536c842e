//! The input encoder: events in, dialect byte sequences out.

use gridterm_engine::{KeyboardSink, MouseSink};
use gridterm_parser::encode_utf8;

use crate::dialect::Dialect;
use crate::event::{InputEvent, InputMessage, Modifiers};

/// Staged-output capacity. Writes beyond it are dropped, matching the
/// no-back-pressure contract of the engines above.
pub const OUTPUT_BUFFER_SIZE: usize = 4096;
const INPUT_HEADROOM: usize = 128;

const BS: u8 = 0x08;
const LF: u8 = 0x0A;
const CR: u8 = 0x0D;
const ESC: u8 = 0x1B;
const FS: u8 = 0x1C;
const DEL: u8 = 0x7F;
const C1_CSI: u8 = 0x9B;
const C1_SS3: u8 = 0x8F;

pub struct InputEncoder {
    pub(crate) dialect: Dialect,
    pub(crate) send_8bit_controls: bool,
    pub(crate) backspace_is_bs: bool,
    pub(crate) escape_is_fs: bool,
    pub(crate) delete_is_del: bool,
    pub(crate) cursor_application_mode: bool,
    pub(crate) calculator_application_mode: bool,
    pub(crate) send_xterm_mouse: bool,
    pub(crate) send_xterm_mouse_clicks: bool,
    pub(crate) send_xterm_mouse_button_motions: bool,
    pub(crate) send_xterm_mouse_nobutton_motions: bool,
    pub(crate) send_locator_press_events: bool,
    pub(crate) send_locator_release_events: bool,
    pub(crate) send_dec_function_keys: bool,
    pub(crate) send_sco_function_keys: bool,
    pub(crate) send_teken_function_keys: bool,
    pub(crate) send_paste: bool,
    pub(crate) send_locator_mode: u32,
    output: Vec<u8>,
    pub(crate) mouse_column: u16,
    pub(crate) mouse_row: u16,
    pub(crate) mouse_buttons: [bool; 8],
    pasting: bool,
    window_size: Option<(u16, u16)>,
}

impl InputEncoder {
    pub fn new(dialect: Dialect) -> Self {
        InputEncoder {
            dialect,
            send_8bit_controls: false,
            backspace_is_bs: false,
            escape_is_fs: false,
            delete_is_del: false,
            cursor_application_mode: false,
            calculator_application_mode: false,
            send_xterm_mouse: false,
            send_xterm_mouse_clicks: false,
            send_xterm_mouse_button_motions: false,
            send_xterm_mouse_nobutton_motions: false,
            send_locator_press_events: false,
            send_locator_release_events: false,
            // Each dialect starts on its native function-key table.
            send_dec_function_keys: true,
            send_sco_function_keys: matches!(dialect, Dialect::ScoConsole | Dialect::Teken),
            send_teken_function_keys: matches!(dialect, Dialect::Teken),
            send_paste: false,
            send_locator_mode: 0,
            output: Vec::new(),
            mouse_column: 0,
            mouse_row: 0,
            mouse_buttons: [false; 8],
            pasting: false,
            window_size: None,
        }
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// Encoded bytes waiting for the host to drain.
    pub fn pending_output(&self) -> &[u8] {
        &self.output
    }

    pub fn output_available(&self) -> bool {
        !self.output.is_empty()
    }

    /// Back-pressure signal: accept more messages only while true.
    pub fn has_input_space(&self) -> bool {
        self.output.len() + INPUT_HEADROOM < OUTPUT_BUFFER_SIZE
    }

    pub fn take_output(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.output)
    }

    /// Discard the first `n` staged bytes after a partial host write.
    pub fn consume_output(&mut self, n: usize) {
        self.output.drain(..n.min(self.output.len()));
    }

    /// Bracketed-paste state; the auto-terminate rule is observable here.
    pub fn pasting(&self) -> bool {
        self.pasting
    }

    /// The size last reported by the display engine, for the host to apply
    /// to the backing pty.
    pub fn window_size(&self) -> Option<(u16, u16)> {
        self.window_size
    }

    /// Decode and dispatch one framed input message.
    pub fn handle_message(&mut self, message: u32) {
        match InputMessage::parse(message) {
            Ok(event) => self.handle_event(event),
            Err(error) => log::warn!("dropped input message {message:#010x}: {error}"),
        }
    }

    pub fn handle_event(&mut self, event: InputEvent) {
        match event {
            InputEvent::Character { code, pasted, accelerator } => self.write_character(code, pasted, accelerator),
            InputEvent::ConsumerKey { key, modifiers } => self.write_consumer_key(key, modifiers),
            InputEvent::ExtendedKey { key, modifiers } => self.write_extended_key(key, modifiers),
            InputEvent::FunctionKey { key, modifiers } => self.write_function_key(key, modifiers),
            InputEvent::MouseColumn { position, modifiers } => self.set_mouse_column(position, modifiers),
            InputEvent::MouseRow { position, modifiers } => self.set_mouse_row(position, modifiers),
            InputEvent::MouseWheel { wheel, delta, modifiers } => self.write_wheel_motion(wheel, delta, modifiers),
            InputEvent::MouseButton { button, pressed, modifiers } => self.set_mouse_button(button, pressed, modifiers),
            InputEvent::Session => {}
        }
    }

    pub(crate) fn write_raw(&mut self, bytes: &[u8]) {
        let space = OUTPUT_BUFFER_SIZE - self.output.len();
        self.output.extend_from_slice(&bytes[..bytes.len().min(space)]);
    }

    pub(crate) fn write_raw_byte(&mut self, byte: u8) {
        self.write_raw(&[byte]);
    }

    pub(crate) fn write_unicode(&mut self, code: u32) {
        if code < 0x80 {
            self.write_raw_byte(code as u8);
        } else {
            let encoded = encode_utf8(code);
            self.write_raw(encoded.as_bytes());
        }
    }

    fn write_latin1_byte(&mut self, byte: u8) {
        if byte < 0x80 {
            self.write_raw_byte(byte);
        } else {
            self.write_unicode(u32::from(byte));
        }
    }

    pub(crate) fn write_control1(&mut self, c1: u8) {
        if self.send_8bit_controls {
            self.write_unicode(u32::from(c1));
        } else {
            self.write_raw_byte(ESC);
            self.write_raw_byte(c1 - 0x40);
        }
    }

    pub(crate) fn write_csi(&mut self) {
        self.write_control1(C1_CSI);
    }

    pub(crate) fn write_ss3(&mut self) {
        self.write_control1(C1_SS3);
    }

    /// `CSI r : m final`, parameters omitted entirely when unmodified.
    pub(crate) fn write_csi_sequence(&mut self, r: u32, modifiers: Modifiers, c: u8) {
        self.write_csi();
        if !modifiers.is_empty() || r != 1 {
            let body = format!("{}:{}", r, modifiers.dec_wire());
            self.write_raw(body.as_bytes());
        }
        self.write_raw_byte(c);
    }

    /// The semicolon variant for clients that predate sub-parameters.
    pub(crate) fn write_csi_sequence_ambig(&mut self, r: u32, modifiers: Modifiers, c: u8) {
        self.write_csi();
        if !modifiers.is_empty() || r != 1 {
            let body = format!("{};{}", r, modifiers.dec_wire());
            self.write_raw(body.as_bytes());
        }
        self.write_raw_byte(c);
    }

    pub(crate) fn write_ss3_character(&mut self, c: u8) {
        self.write_ss3();
        self.write_raw_byte(c);
    }

    /// XTerm's malformed SS3 form: a modifier parameter inside a
    /// single-shift sequence.
    pub(crate) fn write_broken_ss3_sequence(&mut self, modifiers: Modifiers, c: u8) {
        self.write_ss3();
        if !modifiers.is_empty() {
            let body = modifiers.dec_wire().to_string();
            self.write_raw(body.as_bytes());
        }
        self.write_raw_byte(c);
    }

    /// The standard FNK control function. Modifiers ride in raw (not
    /// DEC offset) form as a sub-parameter.
    pub(crate) fn write_fnk(&mut self, n: u32, modifiers: Modifiers) {
        self.write_csi();
        let body = if modifiers.is_empty() {
            format!("{n} W")
        } else {
            format!("{}:{} W", n, modifiers.bits())
        };
        self.write_raw(body.as_bytes());
    }

    pub(crate) fn write_decfnk(&mut self, n: u32, modifiers: Modifiers) {
        self.write_csi();
        let body = if modifiers.is_empty() {
            format!("{n}~")
        } else {
            // Modifiers in ISO 8613-6 sub-parameter form.
            format!("{}:{}~", n, modifiers.dec_wire())
        };
        self.write_raw(body.as_bytes());
    }

    pub(crate) fn write_decfnk_ambig(&mut self, n: u32, modifiers: Modifiers) {
        self.write_csi();
        let body = if modifiers.is_empty() {
            format!("{n}~")
        } else {
            format!("{};{}~", n, modifiers.dec_wire())
        };
        self.write_raw(body.as_bytes());
    }

    /// XTerm's modified-other-key form: "the key that would have produced
    /// `n`, with modifiers `m`".
    pub(crate) fn write_xterm_mod_key(&mut self, n: u32, modifiers: Modifiers) {
        self.write_csi();
        let body = format!("27;{};{}~", modifiers.dec_wire(), n);
        self.write_raw(body.as_bytes());
    }

    pub(crate) fn write_linux_kvt_fnk(&mut self, modifiers: Modifiers, c: u8) {
        self.write_csi();
        self.write_raw_byte(b'[');
        if !modifiers.is_empty() {
            let body = format!("1;{}", modifiers.dec_wire());
            self.write_raw(body.as_bytes());
        }
        self.write_raw_byte(c);
    }

    /// Private FNK variant for USB extended keys with no better encoding.
    pub(crate) fn write_usb_extended_fnk(&mut self, n: u16, modifiers: Modifiers) {
        self.write_csi();
        let body = if modifiers.is_empty() {
            format!("?{n} W")
        } else {
            format!("?{}:{} W", n, modifiers.bits())
        };
        self.write_raw(body.as_bytes());
    }

    /// Private FNK variant for USB consumer-page keys.
    pub(crate) fn write_usb_consumer_fnk(&mut self, n: u16, modifiers: Modifiers) {
        self.write_csi();
        let body = if modifiers.is_empty() {
            format!("={n} W")
        } else {
            format!("={}:{} W", n, modifiers.bits())
        };
        self.write_raw(body.as_bytes());
    }

    /// The SCO-derived function-key form. Modifier folding is left to
    /// keyboard-map realizers; an unfolded modifier state rides in the
    /// sub-parameter extension.
    pub(crate) fn write_sco_console_fnk(&mut self, modifiers: Modifiers, c: u8) {
        self.write_csi();
        if !modifiers.is_empty() {
            let body = format!("1:{}", modifiers.bits());
            self.write_raw(body.as_bytes());
        }
        self.write_raw_byte(c);
    }

    pub(crate) fn write_latin1_or_csi_sequence(&mut self, csi_char: u8, ord_char: u8, modifiers: Modifiers) {
        if modifiers.is_empty() {
            self.write_latin1_byte(ord_char);
        } else {
            self.write_csi_sequence(1, modifiers, csi_char);
        }
    }

    pub(crate) fn write_ss3_or_latin1(&mut self, shift: bool, shifted_char: u8, ord_char: u8) {
        if shift {
            self.write_ss3_character(shifted_char);
        } else {
            self.write_latin1_byte(ord_char);
        }
    }

    pub(crate) fn write_ss3_or_csi_sequence(&mut self, shift: bool, c: u8, modifiers: Modifiers) {
        if shift && modifiers.is_empty() {
            self.write_ss3_character(c);
        } else {
            self.write_csi_sequence(1, modifiers, c);
        }
    }

    pub(crate) fn write_ss3_or_csi_sequence_split(&mut self, shift: bool, shifted_char: u8, csi_char: u8, modifiers: Modifiers) {
        if shift && modifiers.is_empty() {
            self.write_ss3_character(shifted_char);
        } else {
            self.write_csi_sequence(1, modifiers, csi_char);
        }
    }

    pub(crate) fn write_ss3_or_csi_sequence_ambig(&mut self, shift: bool, c: u8, modifiers: Modifiers) {
        if shift && modifiers.is_empty() {
            self.write_ss3_character(c);
        } else {
            self.write_csi_sequence_ambig(1, modifiers, c);
        }
    }

    pub(crate) fn write_ss3_or_decfnk(&mut self, shift: bool, c: u8, decfnk: u32, modifiers: Modifiers) {
        if shift && modifiers.is_empty() {
            self.write_ss3_character(c);
        } else {
            self.write_decfnk(decfnk, modifiers);
        }
    }

    pub(crate) fn write_ord_or_decfnk(&mut self, ord_mode: bool, ord_char: u8, decfnk: u32, modifiers: Modifiers) {
        if ord_mode && modifiers.is_empty() {
            self.write_latin1_byte(ord_char);
        } else {
            self.write_decfnk(decfnk, modifiers);
        }
    }

    pub(crate) fn write_ord_or_decfnk_ambig(&mut self, ord_mode: bool, ord_char: u8, decfnk: u32, modifiers: Modifiers) {
        if ord_mode && modifiers.is_empty() {
            self.write_latin1_byte(ord_char);
        } else {
            self.write_decfnk_ambig(decfnk, modifiers);
        }
    }

    pub(crate) fn write_backspace_or_del(&mut self, modifiers: Modifiers) {
        if !(modifiers - Modifiers::CONTROL).is_empty() {
            self.write_xterm_mod_key(8, modifiers);
        } else {
            let control = modifiers.contains(Modifiers::CONTROL);
            self.write_raw_byte(if self.backspace_is_bs ^ control { BS } else { DEL });
        }
    }

    pub(crate) fn write_esc_or_fs(&mut self, modifiers: Modifiers) {
        if !modifiers.is_empty() {
            self.write_xterm_mod_key(27, modifiers);
        } else {
            self.write_raw_byte(if self.escape_is_fs { FS } else { ESC });
        }
    }

    pub(crate) fn write_return_enter(&mut self, modifiers: Modifiers) {
        if !(modifiers - Modifiers::CONTROL).is_empty() {
            self.write_xterm_mod_key(13, modifiers);
        } else if modifiers.contains(Modifiers::CONTROL) {
            self.write_raw_byte(LF);
        } else {
            self.write_raw_byte(CR);
        }
    }

    pub(crate) fn set_pasting(&mut self, pasting: bool) {
        if pasting == self.pasting {
            return;
        }
        self.pasting = pasting;
        if self.send_paste {
            self.write_decfnk_ambig(if pasting { 200 } else { 201 }, Modifiers::empty());
        }
    }

    fn write_character(&mut self, code: u32, pasted: bool, accelerator: bool) {
        self.set_pasting(pasted);
        if accelerator {
            self.write_unicode(u32::from(ESC));
        }
        self.write_unicode(code);
        // A pasted character that could begin a control sequence ends the
        // bracket, so the paste cannot forge function keys.
        if code == u32::from(ESC) || code == u32::from(C1_CSI) {
            self.set_pasting(false);
        }
    }
}

impl KeyboardSink for InputEncoder {
    fn write_latin1(&mut self, data: &[u8]) {
        if data.iter().all(u8::is_ascii) {
            self.write_raw(data);
        } else {
            for &b in data {
                self.write_latin1_byte(b);
            }
        }
    }

    fn write_control1(&mut self, c1: u8) {
        InputEncoder::write_control1(self, c1);
    }

    fn set_8bit_control1(&mut self, on: bool) {
        self.send_8bit_controls = on;
    }

    fn set_backspace_is_bs(&mut self, on: bool) {
        self.backspace_is_bs = on;
    }

    fn set_escape_is_fs(&mut self, on: bool) {
        self.escape_is_fs = on;
    }

    fn set_delete_is_del(&mut self, on: bool) {
        self.delete_is_del = on;
    }

    fn set_send_paste_event(&mut self, on: bool) {
        self.send_paste = on;
    }

    fn set_dec_function_keys(&mut self, on: bool) {
        self.send_dec_function_keys = on;
    }

    fn set_sco_function_keys(&mut self, on: bool) {
        self.send_sco_function_keys = on;
    }

    fn set_teken_function_keys(&mut self, on: bool) {
        self.send_teken_function_keys = on;
    }

    fn set_cursor_application_mode(&mut self, on: bool) {
        self.cursor_application_mode = on;
    }

    fn set_calculator_application_mode(&mut self, on: bool) {
        self.calculator_application_mode = on;
    }

    fn report_size(&mut self, width: u16, height: u16) {
        self.window_size = Some((width, height));
    }
}

impl MouseSink for InputEncoder {
    fn set_send_xterm_mouse(&mut self, on: bool) {
        self.send_xterm_mouse = on;
    }

    fn set_send_xterm_mouse_clicks(&mut self, on: bool) {
        self.send_xterm_mouse_clicks = on;
    }

    fn set_send_xterm_mouse_button_motions(&mut self, on: bool) {
        self.send_xterm_mouse_button_motions = on;
    }

    fn set_send_xterm_mouse_nobutton_motions(&mut self, on: bool) {
        self.send_xterm_mouse_nobutton_motions = on;
    }

    fn set_send_dec_locator(&mut self, mode: u32) {
        self.send_locator_mode = mode;
    }

    fn set_send_dec_locator_press_events(&mut self, on: bool) {
        self.send_locator_press_events = on;
    }

    fn set_send_dec_locator_release_events(&mut self, on: bool) {
        self.send_locator_release_events = on;
    }

    fn request_dec_locator_report(&mut self) {
        self.set_pasting(false);
        if self.send_locator_mode == 0 {
            self.write_csi();
            self.write_raw(b"0&w");
            return;
        }
        self.write_requested_dec_locator_report();
    }
}
