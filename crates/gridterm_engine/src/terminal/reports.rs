//! Device attribute, status, and locator reports.
//!
//! Replies are written through the keyboard collaborator so they
//! interleave correctly with typed input; the C1 introducers go through
//! `write_control1` so the input encoder can choose 7- or 8-bit form.

use gridterm_parser::ControlSequenceParams;

use super::TermState;
use crate::keyboard::{KeyboardSink, MouseSink};
use crate::screen::ScreenBuffer;

const CSI: u8 = 0x9B;
const DCS: u8 = 0x90;
const ST: u8 = 0x9C;

impl<S: ScreenBuffer, K: KeyboardSink, M: MouseSink> TermState<S, K, M> {
    pub(super) fn write_report(&mut self, body: &str) {
        self.keyboard.write_control1(CSI);
        self.keyboard.write_latin1(body.as_bytes());
    }

    pub(super) fn send_primary_device_attributes(&mut self, params: &mut ControlSequenceParams) {
        if params.zero_if_empty(0) != 0 {
            return;
        }
        // VT420-class soft terminal with 132 columns, selective erase,
        // DRCS, UDK, horizontal scrolling, ANSI colour, and a locator.
        self.write_report("?64;1;6;9;15;21;22;29c");
    }

    pub(super) fn send_secondary_device_attributes(&mut self, params: &mut ControlSequenceParams) {
        if params.zero_if_empty(0) != 0 {
            return;
        }
        self.write_report(">61;20;1c");
    }

    pub(super) fn send_tertiary_device_attributes(&mut self, params: &mut ControlSequenceParams) {
        if params.zero_if_empty(0) != 0 {
            return;
        }
        self.keyboard.write_control1(DCS);
        self.keyboard.write_latin1(b"!|00000000");
        self.keyboard.write_control1(ST);
    }

    pub(super) fn send_device_status_report(&mut self, params: &mut ControlSequenceParams) {
        match params.zero_if_empty(0) {
            5 => self.write_report("0n"),
            6 => {
                let report = self.cursor_position_report();
                self.write_report(&report);
            }
            n => log::debug!("ignored device status report request {n}"),
        }
    }

    pub(super) fn send_private_device_status_report(&mut self, params: &mut ControlSequenceParams) {
        match params.zero_if_empty(0) {
            6 => {
                // DECXCPR carries the private marker back.
                let report = format!("?{}", self.cursor_position_report());
                self.write_report(&report);
            }
            15 => self.write_report("?13n"),      // no printer
            25 => self.write_report("?21n"),      // UDKs locked
            26 => self.write_report("?27;1;0;0n"), // keyboard: North American
            n => log::debug!("ignored private device status report request {n}"),
        }
    }

    /// CPR body; row and column are origin-relative when DECOM is on.
    fn cursor_position_report(&self) -> String {
        let (row_base, col_base) = if self.modes.origin {
            (self.region_top(), self.region_left())
        } else {
            (0, 0)
        };
        let row = self.cursor.y - row_base + 1;
        let col = self.cursor.x - col_base + 1;
        format!("{row};{col}R")
    }

    pub(super) fn enable_locator_reports(&mut self, params: &mut ControlSequenceParams) {
        // Second parameter selects units; cells are all this screen has.
        let mode = params.zero_if_empty(0).min(2);
        self.mouse.set_send_dec_locator(mode);
    }

    pub(super) fn select_locator_events(&mut self, params: &mut ControlSequenceParams) {
        params.minimum_one_arg();
        for i in 0..params.arg_count() {
            match params.zero_if_empty(i) {
                0 => {
                    self.mouse.set_send_dec_locator_press_events(false);
                    self.mouse.set_send_dec_locator_release_events(false);
                }
                1 => self.mouse.set_send_dec_locator_press_events(true),
                2 => self.mouse.set_send_dec_locator_press_events(false),
                3 => self.mouse.set_send_dec_locator_release_events(true),
                4 => self.mouse.set_send_dec_locator_release_events(false),
                n => log::debug!("ignored locator event selector {n}"),
            }
        }
    }

    pub(super) fn request_locator_report(&mut self) {
        self.mouse.request_dec_locator_report();
    }
}
