//! Mouse report encoding: the XTerm SGR protocol and the DEC locator.

use crate::encoder::InputEncoder;
use crate::event::Modifiers;

// XTerm swaps middle and right relative to the event numbering.
fn xterm_button(button: u8) -> u32 {
    match button {
        1 => 2,
        2 => 1,
        b => u32::from(b),
    }
}

fn dec_coordinate(n: u16) -> u32 {
    u32::from(n) + 1
}

impl InputEncoder {
    pub(crate) fn set_mouse_column(&mut self, position: u16, modifiers: Modifiers) {
        self.set_pasting(false);
        if self.mouse_column != position {
            self.mouse_column = position;
            // DEC locator reports carry button events only.
            self.write_xterm_mouse_motion(modifiers);
        }
    }

    pub(crate) fn set_mouse_row(&mut self, position: u16, modifiers: Modifiers) {
        self.set_pasting(false);
        if self.mouse_row != position {
            self.mouse_row = position;
            self.write_xterm_mouse_motion(modifiers);
        }
    }

    /// Convenience for hosts that carry both coordinates in one event.
    pub fn set_mouse_position(&mut self, column: u16, row: u16, modifiers: Modifiers) {
        self.set_mouse_column(column, modifiers);
        self.set_mouse_row(row, modifiers);
    }

    pub(crate) fn set_mouse_button(&mut self, button: u8, pressed: bool, modifiers: Modifiers) {
        if usize::from(button) >= self.mouse_buttons.len() {
            return;
        }
        self.set_pasting(false);
        if self.mouse_buttons[usize::from(button)] != pressed {
            self.mouse_buttons[usize::from(button)] = pressed;
            self.write_xterm_mouse_button(button, pressed, modifiers);
            self.write_dec_locator_report_button(u32::from(button), pressed);
        }
    }

    /// A wheel detent becomes a press/release pair in both protocols. The
    /// locator numbers wheels from button 4 up, two event codes apiece.
    pub(crate) fn write_wheel_motion(&mut self, wheel: u8, delta: i8, modifiers: Modifiers) {
        self.set_pasting(false);
        let mut delta = i32::from(delta);
        while delta != 0 {
            if delta < 0 {
                delta += 1;
                let dec_button = 4 + 2 * u32::from(wheel);
                self.write_xterm_mouse_wheel(wheel, true, modifiers);
                self.write_dec_locator_report_button(dec_button, true);
                self.write_xterm_mouse_wheel(wheel, false, modifiers);
                self.write_dec_locator_report_button(dec_button, false);
            } else {
                delta -= 1;
                let dec_button = 5 + 2 * u32::from(wheel);
                self.write_xterm_mouse_wheel(wheel, true, modifiers);
                self.write_dec_locator_report_button(dec_button, true);
                self.write_xterm_mouse_wheel(wheel, false, modifiers);
                self.write_dec_locator_report_button(dec_button, false);
            }
        }
    }

    fn write_xterm_mouse(&mut self, mut flags: u32, pressed: bool, modifiers: Modifiers) {
        if modifiers.contains(Modifiers::LEVEL2) {
            flags |= 4;
        }
        if modifiers.contains(Modifiers::CONTROL) {
            flags |= 16;
        }
        if modifiers.contains(Modifiers::SUPER) {
            flags |= 8;
        }
        self.write_csi();
        let body = format!(
            "<{};{};{}{}",
            flags,
            dec_coordinate(self.mouse_column),
            dec_coordinate(self.mouse_row),
            if pressed { 'M' } else { 'm' }
        );
        self.write_raw(body.as_bytes());
    }

    fn write_xterm_mouse_button(&mut self, button: u8, pressed: bool, modifiers: Modifiers) {
        if !self.send_xterm_mouse || !self.send_xterm_mouse_clicks {
            return;
        }
        if button > 0x02 {
            return;
        }
        self.write_xterm_mouse(xterm_button(button), pressed, modifiers);
    }

    fn write_xterm_mouse_motion(&mut self, modifiers: Modifiers) {
        if !self.send_xterm_mouse {
            return;
        }
        let mut pressed = false;
        let mut flags = 32u32;
        // Best effort at a button number; XTerm itself reports the last
        // button pressed for motion events.
        for (button, &held) in self.mouse_buttons.iter().enumerate() {
            if button > 0x02 {
                flags |= 0x03;
                break;
            }
            if held {
                flags |= xterm_button(button as u8);
                pressed = true;
                break;
            }
        }
        if pressed {
            if !self.send_xterm_mouse_button_motions {
                return;
            }
        } else if !self.send_xterm_mouse_nobutton_motions {
            return;
        }
        self.write_xterm_mouse(flags, pressed, modifiers);
    }

    // Wheel reports use buttons 0..3 with bit 6 set; the motion bit is
    // never combined with a wheel report in practice, and vim cannot cope
    // with button-up wheel events.
    fn write_xterm_mouse_wheel(&mut self, wheel: u8, pressed: bool, modifiers: Modifiers) {
        if !self.send_xterm_mouse || !self.send_xterm_mouse_clicks {
            return;
        }
        if wheel > 0x03 || !pressed {
            return;
        }
        self.write_xterm_mouse(64 | u32::from(wheel), pressed, modifiers);
    }

    fn write_dec_locator_report(&mut self, event: u32, mut buttons: u32) {
        for (button, &held) in self.mouse_buttons.iter().enumerate() {
            if held {
                buttons |= 1 << button;
            }
        }
        self.write_csi();
        let page = 0u32;
        let body = format!(
            "{};{};{};{};{}&w",
            event,
            buttons,
            dec_coordinate(self.mouse_row),
            dec_coordinate(self.mouse_column),
            page
        );
        self.write_raw(body.as_bytes());

        // One-shot mode is spent only by a report the client actually
        // receives; suppressed reports leave it armed.
        if self.send_locator_mode == 2 {
            self.send_locator_mode = 0;
        }
    }

    pub(crate) fn write_dec_locator_report_button(&mut self, button: u32, pressed: bool) {
        if self.send_locator_mode == 0 {
            return;
        }
        if button >= 32 {
            return;
        }
        if pressed {
            if !self.send_locator_press_events {
                return;
            }
        } else if !self.send_locator_release_events {
            return;
        }
        let event = if button < 4 {
            button * 2 + 2 + u32::from(!pressed)
        } else {
            // Wheels extend the DEC protocol from event 12 up.
            (button - 4) * 2 + 12 + u32::from(!pressed)
        };
        self.write_dec_locator_report(event, 1 << button);
    }

    pub(crate) fn write_requested_dec_locator_report(&mut self) {
        if self.send_locator_mode == 0 {
            return;
        }
        self.write_dec_locator_report(1, 0);
    }
}
