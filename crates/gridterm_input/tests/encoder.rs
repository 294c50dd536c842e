use gridterm_engine::{KeyboardSink, MouseSink};
use gridterm_input::{extended_keys as xk, Dialect, InputEncoder, InputEvent, InputMessage, Modifiers};
use pretty_assertions::assert_eq;

fn encoder(dialect: Dialect) -> InputEncoder {
    InputEncoder::new(dialect)
}

fn drain(encoder: &mut InputEncoder) -> Vec<u8> {
    encoder.take_output()
}

fn extended(encoder: &mut InputEncoder, key: u16, modifiers: Modifiers) -> Vec<u8> {
    encoder.handle_event(InputEvent::ExtendedKey { key, modifiers });
    drain(encoder)
}

fn function(encoder: &mut InputEncoder, key: u16, modifiers: Modifiers) -> Vec<u8> {
    encoder.handle_event(InputEvent::FunctionKey { key, modifiers });
    drain(encoder)
}

fn character(encoder: &mut InputEncoder, code: u32, pasted: bool) -> Vec<u8> {
    encoder.handle_event(InputEvent::Character {
        code,
        pasted,
        accelerator: false,
    });
    drain(encoder)
}

#[test]
fn plain_characters_pass_through() {
    let mut enc = encoder(Dialect::DecVt);
    assert_eq!(character(&mut enc, u32::from(b'a'), false), b"a");
    assert_eq!(character(&mut enc, 0x20AC, false), "€".as_bytes());
}

#[test]
fn accelerator_prepends_escape() {
    let mut enc = encoder(Dialect::DecVt);
    enc.handle_event(InputEvent::Character {
        code: u32::from(b'x'),
        pasted: false,
        accelerator: true,
    });
    assert_eq!(drain(&mut enc), b"\x1bx");
}

#[test]
fn cursor_key_application_mode_suppresses_modifiers() {
    let mut enc = encoder(Dialect::DecVt);
    enc.set_cursor_application_mode(true);
    assert_eq!(extended(&mut enc, xk::UP_ARROW, Modifiers::LEVEL2), b"\x1bOA");
    enc.set_cursor_application_mode(false);
    assert_eq!(extended(&mut enc, xk::UP_ARROW, Modifiers::LEVEL2), b"\x1b[1;2A");
    assert_eq!(extended(&mut enc, xk::UP_ARROW, Modifiers::empty()), b"\x1b[A");
}

#[test]
fn level3_switches_cursor_keys_to_decfnk() {
    let mut enc = encoder(Dialect::DecVt);
    assert_eq!(extended(&mut enc, xk::UP_ARROW, Modifiers::LEVEL3), b"\x1b[9;3~");
}

#[test]
fn editing_keys_use_the_decfnk_numbers() {
    let mut enc = encoder(Dialect::DecVt);
    assert_eq!(extended(&mut enc, xk::INSERT, Modifiers::empty()), b"\x1b[2~");
    assert_eq!(extended(&mut enc, xk::DELETE, Modifiers::empty()), b"\x1b[3~");
    assert_eq!(extended(&mut enc, xk::FIND, Modifiers::empty()), b"\x1b[1~");
    assert_eq!(extended(&mut enc, xk::SELECT, Modifiers::empty()), b"\x1b[4~");
    assert_eq!(extended(&mut enc, xk::PAGE_UP, Modifiers::LEVEL2), b"\x1b[5;2~");
    assert_eq!(extended(&mut enc, xk::PAGE_DOWN, Modifiers::empty()), b"\x1b[6~");
}

#[test]
fn netbsd_home_and_end_have_their_own_numbers() {
    let mut enc = encoder(Dialect::NetBsdConsole);
    assert_eq!(extended(&mut enc, xk::HOME, Modifiers::empty()), b"\x1b[7~");
    assert_eq!(extended(&mut enc, xk::END, Modifiers::empty()), b"\x1b[8~");
}

#[test]
fn linux_conflates_home_with_find() {
    let mut enc = encoder(Dialect::LinuxConsole);
    assert_eq!(extended(&mut enc, xk::HOME, Modifiers::empty()), b"\x1b[1~");
    assert_eq!(extended(&mut enc, xk::END, Modifiers::empty()), b"\x1b[4~");
    assert_eq!(extended(&mut enc, xk::PAD_F1, Modifiers::empty()), b"\x1b[[A");
    assert_eq!(extended(&mut enc, xk::PAD_F1, Modifiers::LEVEL2), b"\x1b[[1;2A");
}

#[test]
fn function_keys_use_the_dec_index_table() {
    let mut enc = encoder(Dialect::DecVt);
    assert_eq!(function(&mut enc, 1, Modifiers::empty()), b"\x1b[11~");
    assert_eq!(function(&mut enc, 5, Modifiers::empty()), b"\x1b[15~");
    assert_eq!(function(&mut enc, 6, Modifiers::empty()), b"\x1b[17~");
    assert_eq!(function(&mut enc, 11, Modifiers::empty()), b"\x1b[23~");
    assert_eq!(function(&mut enc, 13, Modifiers::empty()), b"\x1b[25~");
    assert_eq!(function(&mut enc, 15, Modifiers::empty()), b"\x1b[28~");
    assert_eq!(function(&mut enc, 21, Modifiers::empty()), b"\x1b[35~");
    assert_eq!(function(&mut enc, 23, Modifiers::empty()), b"\x1b[42~");
    assert_eq!(function(&mut enc, 24, Modifiers::empty()), b"\x1b[43~");
    assert_eq!(function(&mut enc, 2, Modifiers::CONTROL), b"\x1b[12;5~");
    // Beyond the DEC table, the standard FNK form is the fallback.
    assert_eq!(function(&mut enc, 30, Modifiers::empty()), b"\x1b[30 W");
}

#[test]
fn sco_uses_the_letter_table() {
    let mut enc = encoder(Dialect::ScoConsole);
    assert_eq!(function(&mut enc, 1, Modifiers::empty()), b"\x1b[M");
    assert_eq!(function(&mut enc, 12, Modifiers::empty()), b"\x1b[X");
    // Modifiers ride in the sub-parameter extension, unfolded.
    assert_eq!(function(&mut enc, 1, Modifiers::LEVEL2), b"\x1b[1:1M");
    // Past the table, the standard FNK form again.
    assert_eq!(function(&mut enc, 49, Modifiers::empty()), b"\x1b[49 W");
}

#[test]
fn teken_switches_tables_per_key() {
    let mut enc = encoder(Dialect::Teken);
    assert_eq!(function(&mut enc, 1, Modifiers::empty()), b"\x1b[11~");
    assert_eq!(function(&mut enc, 13, Modifiers::empty()), b"\x1b[Y");
    assert_eq!(function(&mut enc, 1, Modifiers::LEVEL2), b"\x1b[1:1M");
}

#[test]
fn calculator_keypad_application_mode() {
    let mut enc = encoder(Dialect::DecVt);
    enc.set_calculator_application_mode(true);
    assert_eq!(extended(&mut enc, xk::PAD_PLUS, Modifiers::empty()), b"\x1bOk");
    assert_eq!(extended(&mut enc, xk::PAD_ENTER, Modifiers::empty()), b"\x1bOM");
    enc.set_calculator_application_mode(false);
    assert_eq!(extended(&mut enc, xk::PAD_PLUS, Modifiers::empty()), b"+");
    assert_eq!(extended(&mut enc, xk::PAD_ENTER, Modifiers::empty()), b"\r");
}

#[test]
fn xterm_pc_keypad_reverts_under_control() {
    let mut enc = encoder(Dialect::XtermPc);
    enc.set_calculator_application_mode(true);
    // Level 2 keeps the (malformed) SS3 form; Control reverts to normal.
    assert_eq!(extended(&mut enc, xk::PAD_HOME, Modifiers::LEVEL2), b"\x1bO2w");
    assert_eq!(extended(&mut enc, xk::PAD_HOME, Modifiers::CONTROL), b"\x1b[1;5H");
}

#[test]
fn control_like_keys_use_the_modified_key_extension() {
    let mut enc = encoder(Dialect::DecVt);
    assert_eq!(extended(&mut enc, xk::ESCAPE, Modifiers::CONTROL), b"\x1b[27;5;27~");
    assert_eq!(extended(&mut enc, xk::BACKSPACE, Modifiers::LEVEL2), b"\x1b[27;2;8~");
    assert_eq!(extended(&mut enc, xk::RETURN_OR_ENTER, Modifiers::LEVEL2), b"\x1b[27;2;13~");
}

#[test]
fn backspace_return_and_escape_honour_their_switches() {
    let mut enc = encoder(Dialect::DecVt);
    assert_eq!(extended(&mut enc, xk::BACKSPACE, Modifiers::empty()), b"\x7f");
    assert_eq!(extended(&mut enc, xk::BACKSPACE, Modifiers::CONTROL), b"\x08");
    enc.set_backspace_is_bs(true);
    assert_eq!(extended(&mut enc, xk::BACKSPACE, Modifiers::empty()), b"\x08");
    assert_eq!(extended(&mut enc, xk::RETURN_OR_ENTER, Modifiers::empty()), b"\r");
    assert_eq!(extended(&mut enc, xk::RETURN_OR_ENTER, Modifiers::CONTROL), b"\n");
    assert_eq!(extended(&mut enc, xk::ESCAPE, Modifiers::empty()), b"\x1b");
    enc.set_escape_is_fs(true);
    assert_eq!(extended(&mut enc, xk::ESCAPE, Modifiers::empty()), b"\x1c");
}

#[test]
fn eight_bit_controls_are_utf8_encoded() {
    let mut enc = encoder(Dialect::DecVt);
    enc.set_8bit_control1(true);
    assert_eq!(extended(&mut enc, xk::UP_ARROW, Modifiers::empty()), [0xC2, 0x9B, b'A']);
}

#[test]
fn consumer_keys_use_the_private_fnk_form() {
    let mut enc = encoder(Dialect::DecVt);
    enc.handle_event(InputEvent::ConsumerKey {
        key: 5,
        modifiers: Modifiers::empty(),
    });
    assert_eq!(drain(&mut enc), b"\x1b[=5 W");
    enc.handle_event(InputEvent::ConsumerKey {
        key: 5,
        modifiers: Modifiers::LEVEL2,
    });
    assert_eq!(drain(&mut enc), b"\x1b[=5:1 W");
}

#[test]
fn unknown_extended_keys_fall_back_to_the_private_form() {
    let mut enc = encoder(Dialect::DecVt);
    assert_eq!(extended(&mut enc, 0x0234, Modifiers::empty()), b"\x1b[?564 W");
    // Local aliases never reach the fallback.
    assert_eq!(extended(&mut enc, 0x0F42, Modifiers::empty()), b"");
}

#[test]
fn bracketed_paste_brackets_runs() {
    let mut enc = encoder(Dialect::DecVt);
    enc.set_send_paste_event(true);
    assert_eq!(character(&mut enc, u32::from(b'a'), true), b"\x1b[200~a");
    assert!(enc.pasting());
    assert_eq!(character(&mut enc, u32::from(b'b'), true), b"b");
    assert_eq!(character(&mut enc, u32::from(b'c'), false), b"\x1b[201~c");
    assert!(!enc.pasting());
}

#[test]
fn paste_auto_terminates_on_escape() {
    let mut enc = encoder(Dialect::DecVt);
    enc.set_send_paste_event(true);
    assert_eq!(character(&mut enc, u32::from(b'a'), true), b"\x1b[200~a");
    assert_eq!(character(&mut enc, 0x1B, true), b"\x1b\x1b[201~");
    assert!(!enc.pasting());
}

#[test]
fn key_events_end_a_paste() {
    let mut enc = encoder(Dialect::DecVt);
    enc.set_send_paste_event(true);
    assert_eq!(character(&mut enc, u32::from(b'a'), true), b"\x1b[200~a");
    assert_eq!(function(&mut enc, 1, Modifiers::empty()), b"\x1b[201~\x1b[11~");
}

#[test]
fn xterm_mouse_click_report() {
    let mut enc = encoder(Dialect::XtermPc);
    enc.set_send_xterm_mouse(true);
    enc.set_send_xterm_mouse_clicks(true);
    enc.set_mouse_position(10, 5, Modifiers::empty());
    enc.handle_event(InputEvent::MouseButton {
        button: 0,
        pressed: true,
        modifiers: Modifiers::LEVEL2,
    });
    assert_eq!(drain(&mut enc), b"\x1b[<4;11;6M");
    enc.handle_event(InputEvent::MouseButton {
        button: 0,
        pressed: false,
        modifiers: Modifiers::LEVEL2,
    });
    assert_eq!(drain(&mut enc), b"\x1b[<4;11;6m");
}

#[test]
fn xterm_mouse_motion_requires_a_motion_mode() {
    let mut enc = encoder(Dialect::XtermPc);
    enc.set_send_xterm_mouse(true);
    enc.set_send_xterm_mouse_clicks(true);
    enc.set_mouse_position(3, 3, Modifiers::empty());
    assert_eq!(drain(&mut enc), b"");
    enc.set_send_xterm_mouse_nobutton_motions(true);
    enc.set_mouse_position(4, 3, Modifiers::empty());
    assert_eq!(drain(&mut enc), b"\x1b[<32;5;4m");
}

#[test]
fn xterm_wheel_suppresses_release() {
    let mut enc = encoder(Dialect::XtermPc);
    enc.set_send_xterm_mouse(true);
    enc.set_send_xterm_mouse_clicks(true);
    enc.handle_event(InputEvent::MouseWheel {
        wheel: 0,
        delta: -1,
        modifiers: Modifiers::empty(),
    });
    // One detent, press only.
    assert_eq!(drain(&mut enc), b"\x1b[<64;1;1M");
    // Direction is carried by the locator protocol only; the wheel index
    // rides in the low bits here.
    enc.handle_event(InputEvent::MouseWheel {
        wheel: 0,
        delta: 2,
        modifiers: Modifiers::empty(),
    });
    assert_eq!(drain(&mut enc), b"\x1b[<64;1;1M\x1b[<64;1;1M");
}

#[test]
fn locator_reports_button_events() {
    let mut enc = encoder(Dialect::DecVt);
    enc.set_send_dec_locator(1);
    enc.set_send_dec_locator_press_events(true);
    enc.set_send_dec_locator_release_events(true);
    enc.set_mouse_position(10, 5, Modifiers::empty());
    enc.handle_event(InputEvent::MouseButton {
        button: 0,
        pressed: true,
        modifiers: Modifiers::empty(),
    });
    assert_eq!(drain(&mut enc), b"\x1b[2;1;6;11;0&w");
    enc.handle_event(InputEvent::MouseButton {
        button: 0,
        pressed: false,
        modifiers: Modifiers::empty(),
    });
    // The released button's bit still rides in the report.
    assert_eq!(drain(&mut enc), b"\x1b[3;1;6;11;0&w");
}

#[test]
fn locator_one_shot_is_spent_by_a_written_report() {
    let mut enc = encoder(Dialect::DecVt);
    enc.set_send_dec_locator(2);
    enc.set_send_dec_locator_press_events(true);
    // A suppressed report (release events off) leaves the one-shot armed.
    enc.handle_event(InputEvent::MouseButton {
        button: 0,
        pressed: true,
        modifiers: Modifiers::empty(),
    });
    assert_eq!(drain(&mut enc), b"\x1b[2;1;1;1;0&w");
    // The written report consumed the one-shot; further requests report
    // the locator as disabled.
    enc.request_dec_locator_report();
    assert_eq!(drain(&mut enc), b"\x1b[0&w");
}

#[test]
fn suppressed_reports_do_not_consume_the_one_shot() {
    let mut enc = encoder(Dialect::DecVt);
    enc.set_send_dec_locator(2);
    enc.set_send_dec_locator_press_events(false);
    enc.handle_event(InputEvent::MouseButton {
        button: 0,
        pressed: true,
        modifiers: Modifiers::empty(),
    });
    assert_eq!(drain(&mut enc), b"");
    // Still armed: an explicit request gets the unsolicited event.
    enc.request_dec_locator_report();
    assert_eq!(drain(&mut enc), b"\x1b[1;1;1;1;0&w");
}

#[test]
fn unsolicited_request_with_locator_off() {
    let mut enc = encoder(Dialect::DecVt);
    enc.request_dec_locator_report();
    assert_eq!(drain(&mut enc), b"\x1b[0&w");
}

#[test]
fn framed_messages_drive_the_encoder() {
    let mut enc = encoder(Dialect::DecVt);
    let message = InputMessage::pack(InputEvent::FunctionKey {
        key: 1,
        modifiers: Modifiers::empty(),
    });
    enc.handle_message(message);
    assert_eq!(drain(&mut enc), b"\x1b[11~");
    // Unknown tags are dropped without output.
    enc.handle_message(0xF000_0001);
    assert_eq!(drain(&mut enc), b"");
}

#[test]
fn output_buffer_exposes_back_pressure() {
    let mut enc = encoder(Dialect::DecVt);
    assert!(enc.has_input_space());
    assert!(!enc.output_available());
    for _ in 0..5000 {
        enc.handle_event(InputEvent::Character {
            code: u32::from(b'x'),
            pasted: false,
            accelerator: false,
        });
    }
    assert!(enc.output_available());
    assert!(!enc.has_input_space());
    assert_eq!(enc.pending_output().len(), gridterm_input::OUTPUT_BUFFER_SIZE);
    enc.consume_output(100);
    assert_eq!(enc.pending_output().len(), gridterm_input::OUTPUT_BUFFER_SIZE - 100);
}

#[test]
fn size_reports_surface_to_the_host() {
    let mut enc = encoder(Dialect::DecVt);
    enc.report_size(132, 50);
    assert_eq!(enc.window_size(), Some((132, 50)));
}
