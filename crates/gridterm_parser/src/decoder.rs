//! The layered ECMA-48 state machine.
//!
//! [`Ecma48Decoder::process`] consumes decoded UCS characters and reports
//! classified events to an [`Ecma48Sink`]: printable characters (with a
//! single-shift level), isolated C0/C1 controls, escape sequences,
//! parametric control sequences, and delimited control strings.
//!
//! The decoder is deliberately not wired to a byte decoder; feed it from
//! something like [`crate::Utf8Decoder`].

use crate::control_codes::*;
use crate::params::ControlSequenceParams;
use crate::utf8::DecodedChar;

/// Bound on stored control-string bodies; beyond it characters are dropped.
pub const MAX_CONTROL_STRING_LENGTH: usize = 2096;

/// Which introducer opened a control string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlStringKind {
    DeviceControl,
    OperatingSystemCommand,
    PrivacyMessage,
    ApplicationProgramCommand,
    StartOfString,
}

impl ControlStringKind {
    fn from_introducer(c: u32) -> Option<Self> {
        match c {
            DCS => Some(ControlStringKind::DeviceControl),
            OSC => Some(ControlStringKind::OperatingSystemCommand),
            PM => Some(ControlStringKind::PrivacyMessage),
            APC => Some(ControlStringKind::ApplicationProgramCommand),
            SOS => Some(ControlStringKind::StartOfString),
            _ => None,
        }
    }
}

/// Single-shift level attached to a printable character.
///
/// `None` marks characters that bypassed sequence processing entirely
/// (decode errors and over-length encodings). The dialect levels are the
/// SSA and SRS puns used by the Interix and Linux function-key encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShiftLevel {
    None,
    Normal,
    Single2,
    Single3,
    SelectedArea,
    ReversedString,
}

/// Construction-time switches for dialect behaviour.
#[derive(Debug, Clone, Copy, serde::Serialize, serde::Deserialize)]
pub struct DecoderConfig {
    /// Recognise DCS/OSC/PM/APC/SOS bodies; when off the introducers are
    /// swallowed and bodies pass through as ordinary input.
    pub control_strings: bool,
    /// Treat CAN as "abandon the current sequence".
    pub allow_cancel: bool,
    /// Reinterpret `ESC @`..`ESC _` as the corresponding C1 control.
    /// `ESC [` is always CSI regardless.
    pub allow_7bit_extensions: bool,
    /// Pretend Start of Selected Area is a dialect shift (Interix keys).
    pub dialect_area_shift: bool,
    /// Let `CSI $` pass as a function-key final (rxvt keys) instead of an
    /// intermediate.
    pub rxvt_function_keys: bool,
    /// Pretend `CSI [` is a dialect shift (Linux console keys).
    pub linux_function_keys: bool,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        DecoderConfig {
            control_strings: true,
            allow_cancel: true,
            allow_7bit_extensions: true,
            dialect_area_shift: false,
            rxvt_function_keys: false,
            linux_function_keys: false,
        }
    }
}

/// Receiver for classified decoder output.
pub trait Ecma48Sink {
    fn printable(&mut self, error: bool, shift: ShiftLevel, code: u32);
    fn control(&mut self, code: u32);
    fn escape(&mut self, code: u32, intermediate: u32);
    fn control_sequence(&mut self, final_byte: u32, intermediate: u32, private: u32, params: &mut ControlSequenceParams);
    fn control_string(&mut self, kind: ControlStringKind, data: &[u32]);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DecoderState {
    Normal,
    Shift2,
    Shift3,
    ShiftArea,
    ShiftLine,
    Escape,
    EscapeIntermediate,
    CsiParameter,
    CsiIntermediate,
    ControlString,
    ControlStringEscape,
}

fn is_control(c: u32) -> bool {
    c < SPC || (0x80..0xA0).contains(&c) || c == DEL
}

fn is_intermediate(c: u32) -> bool {
    (SPC..0x30).contains(&c)
}

fn is_parameter(c: u32) -> bool {
    (0x30..0x40).contains(&c)
}

fn is_always_7bit_extension(c: u32) -> bool {
    c == CSI - 0x40
}

pub struct Ecma48Decoder {
    state: DecoderState,
    config: DecoderConfig,
    first_private_parameter: u32,
    saved_intermediate: u32,
    string_introducer: u32,
    string_data: Vec<u32>,
    params: ControlSequenceParams,
}

impl Ecma48Decoder {
    pub fn new(config: DecoderConfig) -> Self {
        Ecma48Decoder {
            state: DecoderState::Normal,
            config,
            first_private_parameter: NUL,
            saved_intermediate: NUL,
            string_introducer: NUL,
            string_data: Vec::new(),
            params: ControlSequenceParams::new(),
        }
    }

    /// When Zero Default Mode is on, explicit zero parameters read as their
    /// defaults for the sequences that honour it.
    pub fn set_zero_default_mode(&mut self, on: bool) {
        self.params.set_zero_default_mode(on);
    }

    pub fn process(&mut self, ch: DecodedChar, sink: &mut dyn Ecma48Sink) {
        use DecoderState::*;
        match self.state {
            Normal | Shift2 | Shift3 | ShiftArea | ShiftLine => {
                if ch.error || ch.overlong {
                    // Over-length encodings must never be taken for
                    // controls; they render as printables and abandon the
                    // pending shift.
                    sink.printable(ch.error, ShiftLevel::None, ch.code);
                    self.state = Normal;
                } else if is_control(ch.code) {
                    match self.state {
                        Shift2 => sink.control(SS2),
                        Shift3 => sink.control(SS3),
                        ShiftArea => sink.control(SSA),
                        _ => {}
                    }
                    // Reset first so the control processing can override it.
                    self.state = Normal;
                    self.control_character(ch.code, sink);
                } else {
                    let shift = match self.state {
                        Shift2 => ShiftLevel::Single2,
                        Shift3 => ShiftLevel::Single3,
                        ShiftArea => ShiftLevel::SelectedArea,
                        ShiftLine => ShiftLevel::ReversedString,
                        _ => ShiftLevel::Normal,
                    };
                    sink.printable(false, shift, ch.code);
                    self.state = Normal;
                }
            }
            Escape | EscapeIntermediate | CsiParameter | CsiIntermediate | ControlString | ControlStringEscape => {
                if ch.error {
                    self.state = Normal;
                } else if ch.overlong {
                    sink.printable(false, ShiftLevel::None, ch.code);
                    self.state = Normal;
                } else {
                    match self.state {
                        Escape => self.escape_char(ch.code, sink),
                        EscapeIntermediate => self.escape_intermediate_char(ch.code, sink),
                        CsiParameter | CsiIntermediate => self.control_sequence_char(ch.code, sink),
                        ControlString => self.control_string_char(ch.code, sink),
                        ControlStringEscape => self.control_string_escape_char(ch.code, sink),
                        _ => unreachable!(),
                    }
                }
            }
        }
    }

    /// Abandon any sequence in progress, replaying its introducer to the
    /// sink as an isolated control so downstream consumers (an input
    /// handler treating a lone ESC as the Escape key, say) are not
    /// starved. Intermediate and parameter characters are not preserved.
    pub fn abort_sequence(&mut self, sink: &mut dyn Ecma48Sink) {
        use DecoderState::*;
        match self.state {
            Normal | Shift2 | Shift3 | ShiftArea | ShiftLine => {}
            Escape | EscapeIntermediate => sink.control(ESC),
            CsiParameter | CsiIntermediate => sink.control(CSI),
            ControlString | ControlStringEscape => sink.control(self.string_introducer),
        }
        self.state = DecoderState::Normal;
    }

    fn terminate_sequence(&mut self, sink: &mut dyn Ecma48Sink) {
        use DecoderState::*;
        if matches!(self.state, ControlString | ControlStringEscape) {
            if let Some(kind) = ControlStringKind::from_introducer(self.string_introducer) {
                sink.control_string(kind, &self.string_data);
            }
        }
        self.state = DecoderState::Normal;
    }

    fn reset_sequence_state(&mut self) {
        self.first_private_parameter = NUL;
        self.saved_intermediate = NUL;
        self.string_introducer = NUL;
        self.params.reset();
        self.string_data.clear();
    }

    fn control_character(&mut self, c: u32, sink: &mut dyn Ecma48Sink) {
        use DecoderState::*;
        // A new introducer aborts whatever sequence is in progress; ST
        // terminates a control string.
        match c {
            DCS | OSC | PM | APC | SOS => {
                if self.config.control_strings {
                    self.abort_sequence(sink);
                }
            }
            CSI => self.abort_sequence(sink),
            ESC => {
                if self.state != ControlString {
                    self.abort_sequence(sink);
                }
            }
            ST => self.terminate_sequence(sink),
            _ => {}
        }
        match c {
            SSA if self.config.dialect_area_shift => self.state = ShiftArea,
            CAN => {
                if self.config.allow_cancel {
                    self.state = Normal;
                } else {
                    sink.control(c);
                }
            }
            ESC => {
                self.state = if self.state == ControlString { ControlStringEscape } else { Escape };
                self.saved_intermediate = NUL;
            }
            CSI => {
                self.state = CsiParameter;
                self.reset_sequence_state();
            }
            SS2 => self.state = Shift2,
            SS3 => self.state = Shift3,
            DCS | OSC | PM | APC | SOS => {
                if self.config.control_strings {
                    self.state = ControlString;
                    self.reset_sequence_state();
                    self.string_introducer = c;
                }
            }
            ST => {
                if self.config.control_strings {
                    self.state = Normal;
                }
            }
            _ => sink.control(c),
        }
    }

    fn escape_char(&mut self, c: u32, sink: &mut dyn Ecma48Sink) {
        if is_control(c) {
            self.control_character(c, sink);
        } else if is_intermediate(c) {
            self.saved_intermediate = c;
            self.state = DecoderState::EscapeIntermediate;
        } else if is_parameter(c) {
            // ECMA-35 private control function (Fp).
            sink.escape(c, self.saved_intermediate);
            self.state = DecoderState::Normal;
        } else if (0x40..0x60).contains(&c) {
            if self.config.allow_7bit_extensions || is_always_7bit_extension(c) {
                // Reset first so the control processing can override it.
                self.state = DecoderState::Normal;
                // ECMA-35 7-bit code extension (Fe), defined for the
                // entire column pair.
                self.control_character(c + 0x40, sink);
            } else {
                sink.escape(c, self.saved_intermediate);
                self.state = DecoderState::Normal;
            }
        } else {
            // ECMA-35 standardized single control function (Fs).
            sink.escape(c, self.saved_intermediate);
            self.state = DecoderState::Normal;
        }
    }

    // See ECMA-35 section 13.2.2 for the "nF" sequence forms.
    fn escape_intermediate_char(&mut self, c: u32, sink: &mut dyn Ecma48Sink) {
        if is_control(c) {
            self.control_character(c, sink);
        } else if is_intermediate(c) {
            // Keep the first intermediate, not the last.
        } else {
            sink.escape(c, self.saved_intermediate);
            self.state = DecoderState::Normal;
        }
    }

    fn control_sequence_char(&mut self, c: u32, sink: &mut dyn Ecma48Sink) {
        if is_control(c) {
            self.control_character(c, sink);
        } else if is_parameter(c) {
            if self.state != DecoderState::CsiParameter {
                log::debug!("out of sequence CSI parameter character {c:#06x}");
                self.state = DecoderState::Normal;
            } else {
                match c {
                    0x30..=0x39 => self.params.append_digit(c - 0x30),
                    // Sub-argument delimiter, per ISO 8613-6 and assorted
                    // extensions.
                    0x3A => self.params.colon(),
                    0x3B => self.params.semicolon(),
                    // Everything else up to U+003F is a private parameter
                    // character per ECMA-48 5.4.1; DEC VTs use < = > ?.
                    _ => {
                        if self.first_private_parameter == NUL {
                            self.first_private_parameter = c;
                        }
                    }
                }
            }
        } else if is_intermediate(c) && !(self.config.rxvt_function_keys && c == 0x24) {
            self.saved_intermediate = c;
            self.state = DecoderState::CsiIntermediate;
        } else if self.config.linux_function_keys && c == u32::from(b'[') && self.saved_intermediate == NUL && self.first_private_parameter == NUL {
            // Pretend Start of Reversed String is a dialect shift.
            self.state = DecoderState::ShiftLine;
        } else {
            let intermediate = self.saved_intermediate;
            let private = self.first_private_parameter;
            sink.control_sequence(c, intermediate, private, &mut self.params);
            self.state = DecoderState::Normal;
        }
    }

    fn append_control_string(&mut self, c: u32) {
        if self.string_data.len() < MAX_CONTROL_STRING_LENGTH {
            self.string_data.push(c);
        }
    }

    fn control_string_char(&mut self, c: u32, sink: &mut dyn Ecma48Sink) {
        // BS, HT, LF, VT, FF, and CR are part of a control string, not
        // standalone controls.
        if (0x08..0x0E).contains(&c) {
            self.append_control_string(c);
        } else if is_control(c) {
            self.control_character(c, sink);
        } else {
            self.append_control_string(c);
        }
    }

    fn control_string_escape_char(&mut self, c: u32, sink: &mut dyn Ecma48Sink) {
        if (0x08..0x0E).contains(&c) {
            self.append_control_string(c);
        } else if is_control(c) {
            self.control_character(c, sink);
        } else if is_intermediate(c) || is_parameter(c) {
            // Ignored inside control strings.
        } else if (0x40..0x60).contains(&c) {
            if self.config.allow_7bit_extensions || is_always_7bit_extension(c) {
                self.control_character(c + 0x40, sink);
            }
            // Otherwise ignored inside control strings.
        }
        // Fs sequences are ignored inside control strings.
    }
}
