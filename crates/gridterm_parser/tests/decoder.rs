use gridterm_parser::{
    control_codes::*, ControlSequenceParams, ControlStringKind, DecodedChar, DecoderConfig, Ecma48Decoder, Ecma48Sink, ShiftLevel, Utf8Decoder,
};
use pretty_assertions::assert_eq;

#[derive(Debug, Clone, PartialEq)]
enum Event {
    Printable { error: bool, shift: ShiftLevel, code: u32 },
    Control(u32),
    Escape { code: u32, intermediate: u32 },
    ControlSequence { final_byte: u32, intermediate: u32, private: u32, args: Vec<Vec<Option<u32>>> },
    ControlString { kind: ControlStringKind, data: Vec<u32> },
}

#[derive(Default)]
struct CapturingSink {
    events: Vec<Event>,
}

impl Ecma48Sink for CapturingSink {
    fn printable(&mut self, error: bool, shift: ShiftLevel, code: u32) {
        self.events.push(Event::Printable { error, shift, code });
    }

    fn control(&mut self, code: u32) {
        self.events.push(Event::Control(code));
    }

    fn escape(&mut self, code: u32, intermediate: u32) {
        self.events.push(Event::Escape { code, intermediate });
    }

    fn control_sequence(&mut self, final_byte: u32, intermediate: u32, private: u32, params: &mut ControlSequenceParams) {
        let args = (0..params.arg_count())
            .map(|i| (0..params.subarg_count(i)).map(|j| params.get(i, j)).collect())
            .collect();
        self.events.push(Event::ControlSequence {
            final_byte,
            intermediate,
            private,
            args,
        });
    }

    fn control_string(&mut self, kind: ControlStringKind, data: &[u32]) {
        self.events.push(Event::ControlString { kind, data: data.to_vec() });
    }
}

fn decode(bytes: &[u8]) -> Vec<Event> {
    decode_with(bytes, DecoderConfig::default())
}

fn decode_with(bytes: &[u8], config: DecoderConfig) -> Vec<Event> {
    let mut utf8 = Utf8Decoder::new();
    let mut decoder = Ecma48Decoder::new(config);
    let mut sink = CapturingSink::default();
    for &b in bytes {
        for ch in utf8.push(b) {
            decoder.process(ch, &mut sink);
        }
    }
    sink.events
}

fn printable(code: u32) -> Event {
    Event::Printable {
        error: false,
        shift: ShiftLevel::Normal,
        code,
    }
}

#[test]
fn printables_and_controls_interleave() {
    assert_eq!(
        decode(b"a\rb"),
        vec![printable(0x61), Event::Control(CR), printable(0x62)]
    );
}

#[test]
fn csi_with_parameters() {
    let events = decode(b"\x1b[1;2H");
    assert_eq!(
        events,
        vec![Event::ControlSequence {
            final_byte: u32::from(b'H'),
            intermediate: NUL,
            private: NUL,
            args: vec![vec![Some(1)], vec![Some(2)]],
        }]
    );
}

#[test]
fn csi_empty_parameter_is_null() {
    let events = decode(b"\x1b[;3H");
    assert_eq!(
        events,
        vec![Event::ControlSequence {
            final_byte: u32::from(b'H'),
            intermediate: NUL,
            private: NUL,
            args: vec![vec![], vec![Some(3)]],
        }]
    );
}

#[test]
fn csi_colon_subparameters() {
    let events = decode(b"\x1b[38:2::10:20:30m");
    assert_eq!(
        events,
        vec![Event::ControlSequence {
            final_byte: u32::from(b'm'),
            intermediate: NUL,
            private: NUL,
            args: vec![vec![Some(38), Some(2), None, Some(10), Some(20), Some(30)]],
        }]
    );
}

#[test]
fn csi_private_parameter_marker() {
    let events = decode(b"\x1b[?25h");
    assert_eq!(
        events,
        vec![Event::ControlSequence {
            final_byte: u32::from(b'h'),
            intermediate: NUL,
            private: u32::from(b'?'),
            args: vec![vec![Some(25)]],
        }]
    );
}

#[test]
fn csi_intermediate_byte() {
    let events = decode(b"\x1b[2 q");
    assert_eq!(
        events,
        vec![Event::ControlSequence {
            final_byte: u32::from(b'q'),
            intermediate: SPC,
            private: NUL,
            args: vec![vec![Some(2)]],
        }]
    );
}

#[test]
fn fp_escape_sequences() {
    assert_eq!(
        decode(b"\x1b7\x1b8"),
        vec![
            Event::Escape {
                code: u32::from(b'7'),
                intermediate: NUL
            },
            Event::Escape {
                code: u32::from(b'8'),
                intermediate: NUL
            },
        ]
    );
}

#[test]
fn nf_escape_keeps_first_intermediate() {
    assert_eq!(
        decode(b"\x1b#(8"),
        vec![Event::Escape {
            code: u32::from(b'8'),
            intermediate: u32::from(b'#'),
        }]
    );
}

#[test]
fn seven_bit_extension_maps_to_c1() {
    // ESC D is Index when 7-bit extensions are on.
    assert_eq!(decode(b"\x1bD"), vec![Event::Control(IND)]);
    // With extensions off, it is a plain Fe escape sequence; ESC [ stays CSI.
    let config = DecoderConfig {
        allow_7bit_extensions: false,
        ..DecoderConfig::default()
    };
    assert_eq!(
        decode_with(b"\x1bD", config),
        vec![Event::Escape {
            code: u32::from(b'D'),
            intermediate: NUL
        }]
    );
    assert_eq!(
        decode_with(b"\x1b[5A", config),
        vec![Event::ControlSequence {
            final_byte: u32::from(b'A'),
            intermediate: NUL,
            private: NUL,
            args: vec![vec![Some(5)]],
        }]
    );
}

#[test]
fn eight_bit_csi_is_recognised() {
    // 0x9B encoded in UTF-8 is 0xC2 0x9B.
    let events = decode(&[0xC2, 0x9B, b'3', b'm']);
    assert_eq!(
        events,
        vec![Event::ControlSequence {
            final_byte: u32::from(b'm'),
            intermediate: NUL,
            private: NUL,
            args: vec![vec![Some(3)]],
        }]
    );
}

#[test]
fn control_string_bodies_are_delivered() {
    let events = decode(b"\x1b]0;hello\x1b\\");
    assert_eq!(
        events,
        vec![Event::ControlString {
            kind: ControlStringKind::OperatingSystemCommand,
            data: b"0;hello".iter().map(|&b| u32::from(b)).collect(),
        }]
    );
}

#[test]
fn control_string_accepts_embedded_format_controls() {
    // HT and CR are body data, not standalone controls.
    let events = decode(b"\x1bPa\tb\rc\x1b\\");
    assert_eq!(
        events,
        vec![Event::ControlString {
            kind: ControlStringKind::DeviceControl,
            data: vec![0x61, TAB, 0x62, CR, 0x63],
        }]
    );
}

#[test]
fn new_introducer_aborts_and_replays() {
    let events = decode(b"\x1b[12\x1b[3m");
    assert_eq!(
        events,
        vec![
            Event::Control(CSI),
            Event::ControlSequence {
                final_byte: u32::from(b'm'),
                intermediate: NUL,
                private: NUL,
                args: vec![vec![Some(3)]],
            },
        ]
    );
}

#[test]
fn esc_aborts_control_sequence() {
    // The aborted CSI is replayed; the lone ESC then starts a new escape
    // sequence which resolves to an Fs escape.
    let events = decode(b"\x1b[1\x1bc");
    assert_eq!(
        events,
        vec![
            Event::Control(CSI),
            Event::Escape {
                code: u32::from(b'c'),
                intermediate: NUL
            },
        ]
    );
}

#[test]
fn cancel_abandons_sequence_silently() {
    let events = decode(b"\x1b[12\x18A");
    assert_eq!(events, vec![printable(0x41)]);
    // With cancel disabled, CAN reaches the sink as a control.
    let config = DecoderConfig {
        allow_cancel: false,
        ..DecoderConfig::default()
    };
    assert_eq!(decode_with(b"aX\x18", config), vec![printable(0x61), printable(0x58), Event::Control(CAN)]);
}

#[test]
fn single_shift_marks_next_printable() {
    // SS3 is 0x8F, UTF-8 0xC2 0x8F.
    let events = decode(&[0xC2, 0x8F, b'P']);
    assert_eq!(
        events,
        vec![Event::Printable {
            error: false,
            shift: ShiftLevel::Single3,
            code: u32::from(b'P'),
        }]
    );
}

#[test]
fn single_shift_interrupted_by_control_is_replayed() {
    let events = decode(&[0xC2, 0x8E, CR as u8]);
    assert_eq!(events, vec![Event::Control(SS2), Event::Control(CR)]);
}

#[test]
fn overlong_encodings_render_as_printables() {
    // 0xC1 0x9B is an over-length two-byte encoding of '['; it must not be
    // taken as a control character.
    let events = decode(&[0xC1, 0x9B]);
    assert_eq!(
        events,
        vec![Event::Printable {
            error: false,
            shift: ShiftLevel::None,
            code: 0x5B,
        }]
    );
}

#[test]
fn overlong_esc_aborts_pending_sequence() {
    // An over-length ESC inside a CSI drops the sequence and prints.
    let events = decode(&[0x1B, b'[', b'1', 0xC0, 0x9B, b'A']);
    assert_eq!(
        events,
        vec![
            Event::Printable {
                error: false,
                shift: ShiftLevel::None,
                code: 0x1B,
            },
            printable(0x41),
        ]
    );
}

#[test]
fn decode_errors_emit_replacement_printables() {
    let events = decode(&[0xFF]);
    assert_eq!(
        events,
        vec![Event::Printable {
            error: true,
            shift: ShiftLevel::None,
            code: 0xFFFD,
        }]
    );
}

#[test]
fn rxvt_dollar_is_a_final() {
    let config = DecoderConfig {
        rxvt_function_keys: true,
        ..DecoderConfig::default()
    };
    assert_eq!(
        decode_with(b"\x1b[3$", config),
        vec![Event::ControlSequence {
            final_byte: u32::from(b'$'),
            intermediate: NUL,
            private: NUL,
            args: vec![vec![Some(3)]],
        }]
    );
    // Without the switch, $ is an intermediate.
    assert_eq!(
        decode(b"\x1b[3$x"),
        vec![Event::ControlSequence {
            final_byte: u32::from(b'x'),
            intermediate: u32::from(b'$'),
            private: NUL,
            args: vec![vec![Some(3)]],
        }]
    );
}

#[test]
fn linux_bracket_shift_marks_next_printable() {
    let config = DecoderConfig {
        linux_function_keys: true,
        ..DecoderConfig::default()
    };
    assert_eq!(
        decode_with(b"\x1b[[A", config),
        vec![Event::Printable {
            error: false,
            shift: ShiftLevel::ReversedString,
            code: u32::from(b'A'),
        }]
    );
}

#[test]
fn abort_replays_introducer_to_sink() {
    let mut decoder = Ecma48Decoder::new(DecoderConfig::default());
    let mut sink = CapturingSink::default();
    for ch in [0x1B, u32::from(b'[')].map(DecodedChar::ok) {
        decoder.process(ch, &mut sink);
    }
    decoder.abort_sequence(&mut sink);
    assert_eq!(sink.events, vec![Event::Control(CSI)]);
}
