//! Output-side contracts the display engine drives.
//!
//! These mirror the narrow keyboard/mouse capability surface: the engine
//! pushes mode changes down and writes its reports (device attributes,
//! cursor position) back through the keyboard path so they interleave
//! correctly with typed input.

/// Keyboard collaborator: report write-back and input-side mode switches.
pub trait KeyboardSink {
    fn write_latin1(&mut self, data: &[u8]);
    fn write_control1(&mut self, c1: u8);
    fn set_8bit_control1(&mut self, on: bool);
    fn set_backspace_is_bs(&mut self, on: bool);
    fn set_escape_is_fs(&mut self, on: bool);
    fn set_delete_is_del(&mut self, on: bool);
    fn set_send_paste_event(&mut self, on: bool);
    fn set_dec_function_keys(&mut self, on: bool);
    fn set_sco_function_keys(&mut self, on: bool);
    fn set_teken_function_keys(&mut self, on: bool);
    fn set_cursor_application_mode(&mut self, on: bool);
    fn set_calculator_application_mode(&mut self, on: bool);
    /// Propagate a display resize to the host (window-size change on the
    /// backing pty).
    fn report_size(&mut self, width: u16, height: u16);
}

/// Mouse collaborator: report-mode switches and the locator request.
pub trait MouseSink {
    fn set_send_xterm_mouse(&mut self, on: bool);
    fn set_send_xterm_mouse_clicks(&mut self, on: bool);
    fn set_send_xterm_mouse_button_motions(&mut self, on: bool);
    fn set_send_xterm_mouse_nobutton_motions(&mut self, on: bool);
    /// 0 = off, 1 = on, 2 = one-shot.
    fn set_send_dec_locator(&mut self, mode: u32);
    fn set_send_dec_locator_press_events(&mut self, on: bool);
    fn set_send_dec_locator_release_events(&mut self, on: bool);
    fn request_dec_locator_report(&mut self);
}
