//! Horizontal and vertical tabulation.
//!
//! Stops live in fixed 256-slot arrays addressed modulo 256, so stops set
//! beyond the current width survive a later widening.

use gridterm_parser::ControlSequenceParams;

use super::TermState;
use crate::keyboard::{KeyboardSink, MouseSink};
use crate::screen::{Coordinate, ScreenBuffer};

const PIN_COUNT: usize = 256;

impl<S: ScreenBuffer, K: KeyboardSink, M: MouseSink> TermState<S, K, M> {
    fn h_pin(&self, p: Coordinate) -> bool {
        self.h_tab_pins[usize::from(p) % PIN_COUNT]
    }

    fn set_h_pin(&mut self, p: Coordinate, v: bool) {
        self.h_tab_pins[usize::from(p) % PIN_COUNT] = v;
    }

    fn v_pin(&self, p: Coordinate) -> bool {
        self.v_tab_pins[usize::from(p) % PIN_COUNT]
    }

    fn set_v_pin(&mut self, p: Coordinate, v: bool) {
        self.v_tab_pins[usize::from(p) % PIN_COUNT] = v;
    }

    pub(super) fn reset_tabstops(&mut self) {
        self.set_regular_horizontal_tabstops(8);
        self.v_tab_pins = [false; PIN_COUNT];
    }

    pub(super) fn set_horizontal_tabstop(&mut self) {
        self.set_h_pin(self.cursor.x, true);
    }

    pub(super) fn set_regular_horizontal_tabstops(&mut self, n: u32) {
        self.h_tab_pins = [false; PIN_COUNT];
        if n == 0 {
            return;
        }
        let mut p = 0usize;
        while p < PIN_COUNT {
            self.h_tab_pins[p] = true;
            p += n as usize;
        }
    }

    pub(super) fn horizontal_tab(&mut self, n: u32) {
        self.pending_advance = false;
        let right = self.right_bound();
        for _ in 0..n {
            if self.cursor.x >= right {
                break;
            }
            loop {
                self.cursor.x += 1;
                if self.cursor.x >= right || self.h_pin(self.cursor.x) {
                    break;
                }
            }
        }
    }

    pub(super) fn backwards_horizontal_tab(&mut self, n: u32) {
        self.pending_advance = false;
        let left = self.left_bound();
        for _ in 0..n {
            if self.cursor.x <= left {
                break;
            }
            loop {
                self.cursor.x -= 1;
                if self.cursor.x <= left || self.h_pin(self.cursor.x) {
                    break;
                }
            }
        }
    }

    pub(super) fn vertical_tab(&mut self, n: u32) {
        self.pending_advance = false;
        let bottom = if self.cursor.y <= self.region_bottom() {
            self.region_bottom()
        } else {
            self.display_margin.h - 1
        };
        for _ in 0..n {
            if self.cursor.y >= bottom {
                break;
            }
            loop {
                self.cursor.y += 1;
                if self.cursor.y >= bottom || self.v_pin(self.cursor.y) {
                    break;
                }
            }
        }
    }

    pub(super) fn tab_clear(&mut self, params: &mut ControlSequenceParams) {
        match params.zero_if_empty(0) {
            0 => self.set_h_pin(self.cursor.x, false),
            1 => self.set_v_pin(self.cursor.y, false),
            2 | 3 => self.h_tab_pins = [false; PIN_COUNT],
            4 => self.v_tab_pins = [false; PIN_COUNT],
            5 => {
                self.h_tab_pins = [false; PIN_COUNT];
                self.v_tab_pins = [false; PIN_COUNT];
            }
            n => log::debug!("ignored tabulation clear parameter {n}"),
        }
    }

    pub(super) fn cursor_tabulation_control(&mut self, params: &mut ControlSequenceParams) {
        params.minimum_one_arg();
        for i in 0..params.arg_count() {
            match params.zero_if_empty(i) {
                0 => self.set_h_pin(self.cursor.x, true),
                1 => self.set_v_pin(self.cursor.y, true),
                2 => self.set_h_pin(self.cursor.x, false),
                3 => self.set_v_pin(self.cursor.y, false),
                4 | 5 => self.h_tab_pins = [false; PIN_COUNT],
                6 => self.v_tab_pins = [false; PIN_COUNT],
                n => log::debug!("ignored tabulation control parameter {n}"),
            }
        }
    }

    /// The DEC private tabulation form; parameter 5 restores the regular
    /// every-8 stops.
    pub(super) fn dec_tabulation_control(&mut self, params: &mut ControlSequenceParams) {
        match params.zero_if_empty(0) {
            5 => self.set_regular_horizontal_tabstops(8),
            n => log::debug!("ignored DEC tabulation control parameter {n}"),
        }
    }
}
