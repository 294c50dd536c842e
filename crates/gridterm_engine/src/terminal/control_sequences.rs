//! Control-sequence dispatch: the CSI function catalogue and the mode
//! switches behind SM/RM and DECSET/DECRST.

use gridterm_parser::control_codes::NUL;
use gridterm_parser::ControlSequenceParams;

use super::TermState;
use crate::keyboard::{KeyboardSink, MouseSink};
use crate::screen::{CursorAttributes, CursorGlyph, ScreenBuffer};

impl<S: ScreenBuffer, K: KeyboardSink, M: MouseSink> TermState<S, K, M> {
    pub(super) fn dispatch_control_sequence(&mut self, final_byte: u32, intermediate: u32, private: u32, params: &mut ControlSequenceParams) {
        // Finals and intermediates are constrained to ASCII by the
        // decoder's classification.
        let f = final_byte as u8;
        match intermediate {
            NUL => match private {
                NUL => self.csi_plain(f, params),
                p if p == u32::from(b'?') => self.csi_dec_private(f, params),
                p if p == u32::from(b'>') => self.csi_secondary(f, params),
                p if p == u32::from(b'=') => self.csi_tertiary(f, params),
                _ => log::debug!("ignored control sequence {f:#04x} with private marker {private:#04x}"),
            },
            i if i == u32::from(b' ') => self.csi_space(f, params),
            i if i == u32::from(b'!') => self.csi_bang(f),
            i if i == u32::from(b'$') => self.csi_dollar(f, params),
            i if i == u32::from(b'\'') => self.csi_apostrophe(f, params),
            i if i == u32::from(b'&') => self.csi_ampersand(f),
            _ => log::debug!("ignored control sequence {f:#04x} with intermediate {intermediate:#04x}"),
        }
    }

    fn csi_plain(&mut self, f: u8, params: &mut ControlSequenceParams) {
        match f {
            b'@' => self.insert_characters(params.one_if_zero_or_empty(0)),                  // ICH
            b'A' => self.cursor_up(params.one_if_zero_or_empty(0), false),                   // CUU
            b'B' => self.cursor_down(params.one_if_zero_or_empty(0), false),                 // CUD
            b'C' => self.cursor_right(params.one_if_zero_or_empty(0)),                       // CUF
            b'D' => self.cursor_left(params.one_if_zero_or_empty(0)),                        // CUB
            b'E' => {
                // CNL
                self.cursor_down(params.one_if_zero_or_empty(0), false);
                self.carriage_return();
            }
            b'F' => {
                // CPL
                self.cursor_up(params.one_if_zero_or_empty(0), false);
                self.carriage_return();
            }
            b'G' | b'`' => self.goto_x(params.zdm_if_zero_one_if_empty(0)),                  // CHA / HPA
            b'H' | b'f' => {
                // CUP / HVP
                let row = params.zdm_if_zero_one_if_empty(0);
                let col = params.zdm_if_zero_one_if_empty(1);
                self.goto_yx(row, col);
            }
            b'I' => self.horizontal_tab(params.one_if_zero_or_empty(0)),                     // CHT
            b'J' => self.erase_in_display(params),                                           // ED
            b'K' => self.erase_in_line(params),                                              // EL
            b'L' => self.insert_lines(params.one_if_zero_or_empty(0)),                       // IL
            b'M' => self.delete_lines(params.one_if_zero_or_empty(0)),                       // DL
            b'P' => self.delete_characters(params.one_if_zero_or_empty(0)),                  // DCH
            b'S' => self.pan_or_scroll_up(params.one_if_zero_or_empty(0)),                   // SU
            b'T' => self.pan_or_scroll_down(params.one_if_zero_or_empty(0)),                 // SD
            b'W' => self.cursor_tabulation_control(params),                                  // CTC
            b'X' => self.erase_characters(params.one_if_zero_or_empty(0)),                   // ECH
            b'Y' => self.vertical_tab(params.one_if_zero_or_empty(0)),                       // CVT
            b'Z' => self.backwards_horizontal_tab(params.one_if_zero_or_empty(0)),           // CBT
            b'a' => self.cursor_right(params.one_if_zero_or_empty(0)),                       // HPR
            b'b' => self.repeat_printable_character(params.one_if_zero_or_empty(0)),         // REP
            b'c' => self.send_primary_device_attributes(params),                             // DA1
            b'd' => self.goto_y(params.zdm_if_zero_one_if_empty(0)),                         // VPA
            b'e' => self.cursor_down(params.one_if_zero_or_empty(0), false),                 // VPR
            b'g' => self.tab_clear(params),                                                  // TBC
            b'h' => self.set_modes(params, true),                                            // SM
            b'l' => self.set_modes(params, false),                                           // RM
            b'm' => self.select_graphic_rendition(params),                                   // SGR
            b'n' => self.send_device_status_report(params),                                  // DSR
            b'r' => self.set_top_bottom_margins(params),                                     // DECSTBM
            b's' => self.save_cursor_or_left_right_margins(params),                          // SCOSC / DECSLRM
            b't' => self.window_operation(params),                                           // DECSLPP and dtterm forms
            b'u' => self.restore_cursor(),                                                   // SCORC
            _ => log::debug!("ignored control sequence final {f:#04x}"),
        }
    }

    fn csi_dec_private(&mut self, f: u8, params: &mut ControlSequenceParams) {
        match f {
            b'h' => self.set_private_modes(params, true),                                    // DECSET
            b'l' => self.set_private_modes(params, false),                                   // DECRST
            b'n' => self.send_private_device_status_report(params),                          // DECDSR
            b'J' => self.erase_in_display(params),                                           // DECSED, treated as ED
            b'K' => self.erase_in_line(params),                                              // DECSEL, treated as EL
            b'W' => self.dec_tabulation_control(params),                                     // DECST8C
            b'c' => {}                                                                       // Linux cursor-shape form, consumed
            b's' => self.save_modes(),
            b'r' => self.restore_modes(),
            _ => log::debug!("ignored DEC private control sequence final {f:#04x}"),
        }
    }

    fn csi_secondary(&mut self, f: u8, params: &mut ControlSequenceParams) {
        match f {
            b'c' => self.send_secondary_device_attributes(params),                           // DA2
            _ => log::debug!("ignored secondary control sequence final {f:#04x}"),
        }
    }

    fn csi_tertiary(&mut self, f: u8, params: &mut ControlSequenceParams) {
        match f {
            b'c' => self.send_tertiary_device_attributes(params),                            // DA3
            // The SCO console mode and cursor-type forms land here too;
            // they have no observable effect on this terminal.
            _ => log::debug!("ignored tertiary control sequence final {f:#04x}"),
        }
    }

    fn csi_space(&mut self, f: u8, params: &mut ControlSequenceParams) {
        match f {
            b'q' => self.set_cursor_style(params),                                           // DECSCUSR
            b'@' => self.scroll_area_left(params.one_if_zero_or_empty(0)),                   // SL
            b'A' => self.scroll_area_right(params.one_if_zero_or_empty(0)),                  // SR
            _ => log::debug!("ignored control sequence SP {f:#04x}"),
        }
    }

    fn csi_bang(&mut self, f: u8) {
        match f {
            b'p' => self.soft_reset(),                                                       // DECSTR
            _ => log::debug!("ignored control sequence ! {f:#04x}"),
        }
    }

    fn csi_dollar(&mut self, f: u8, params: &mut ControlSequenceParams) {
        match f {
            b'r' => self.change_area_attributes(params),                                     // DECCARA
            b'|' => self.set_columns_per_page(params),                                       // DECSCPP
            _ => log::debug!("ignored control sequence $ {f:#04x}"),
        }
    }

    fn csi_apostrophe(&mut self, f: u8, params: &mut ControlSequenceParams) {
        match f {
            b'z' => self.enable_locator_reports(params),                                     // DECELR
            b'{' => self.select_locator_events(params),                                      // DECSLE
            b'|' => self.request_locator_report(),                                           // DECRQLP
            _ => log::debug!("ignored control sequence ' {f:#04x}"),
        }
    }

    fn csi_ampersand(&mut self, f: u8) {
        match f {
            b'w' => self.request_locator_report(),
            _ => log::debug!("ignored control sequence & {f:#04x}"),
        }
    }

    fn erase_in_display(&mut self, params: &mut ControlSequenceParams) {
        let fill = self.erasure_cell(u32::from(b' '));
        let cursor = self.addr(self.cursor.x, self.cursor.y);
        let total = self.display_margin.w * self.display_margin.h;
        match params.zero_if_empty(0) {
            0 => self.screen.write_n_cells(cursor, total - cursor, &fill),
            1 => self.screen.write_n_cells(0, cursor + 1, &fill),
            // 3 is the scrollback variant; without scrollback it is 2.
            2 | 3 => self.screen.write_n_cells(0, total, &fill),
            n => log::debug!("ignored erase-in-display parameter {n}"),
        }
    }

    fn erase_in_line(&mut self, params: &mut ControlSequenceParams) {
        let fill = self.erasure_cell(u32::from(b' '));
        let row = self.addr(0, self.cursor.y);
        let cursor = self.addr(self.cursor.x, self.cursor.y);
        let width = self.display_margin.w;
        match params.zero_if_empty(0) {
            0 => self.screen.write_n_cells(cursor, row + width - cursor, &fill),
            1 => self.screen.write_n_cells(row, cursor - row + 1, &fill),
            2 => self.screen.write_n_cells(row, width, &fill),
            n => log::debug!("ignored erase-in-line parameter {n}"),
        }
    }

    fn set_top_bottom_margins(&mut self, params: &mut ControlSequenceParams) {
        let height = u32::from(self.display_margin.h);
        let top = params.one_if_zero_or_empty(0);
        let bottom = params.this_if_zero_or_empty(1, height);
        if top < bottom && bottom <= height {
            self.scroll_origin.y = (top - 1) as u16;
            self.scroll_margin.h = (bottom - top + 1) as u16;
        } else {
            // Out-of-range or collapsed margins select the full screen.
            self.scroll_origin.y = 0;
            self.scroll_margin.h = self.display_margin.h;
        }
        self.home();
    }

    fn set_left_right_margins(&mut self, params: &mut ControlSequenceParams) {
        let width = u32::from(self.display_margin.w);
        let left = params.one_if_zero_or_empty(0);
        let right = params.this_if_zero_or_empty(1, width);
        if left < right && right <= width {
            self.scroll_origin.x = (left - 1) as u16;
            self.scroll_margin.w = (right - left + 1) as u16;
        } else {
            self.scroll_origin.x = 0;
            self.scroll_margin.w = self.display_margin.w;
        }
        self.home();
    }

    /// `CSI s` is SCO save-cursor, except that with DECLRMM on it is
    /// DECSLRM.
    fn save_cursor_or_left_right_margins(&mut self, params: &mut ControlSequenceParams) {
        if self.modes.left_right_margins {
            self.set_left_right_margins(params);
        } else {
            self.save_cursor();
        }
    }

    fn set_cursor_style(&mut self, params: &mut ControlSequenceParams) {
        let (glyph, blinks) = match params.zero_if_empty(0) {
            0 | 1 => (CursorGlyph::Block, true),
            2 => (CursorGlyph::Block, false),
            3 => (CursorGlyph::Underline, true),
            4 => (CursorGlyph::Underline, false),
            5 => (CursorGlyph::Bar, true),
            6 => (CursorGlyph::Bar, false),
            n => {
                log::debug!("ignored cursor style {n}");
                return;
            }
        };
        self.cursor_glyph = glyph;
        self.cursor_attributes.set(CursorAttributes::BLINKS, blinks);
        self.update_cursor_type();
    }

    fn set_columns_per_page(&mut self, params: &mut ControlSequenceParams) {
        let columns = params.this_if_zero_or_empty(0, 80);
        self.resize(super::arg_to_coordinate(columns), self.display_margin.h);
    }

    fn window_operation(&mut self, params: &mut ControlSequenceParams) {
        match params.zero_if_empty(0) {
            8 => {
                let rows = params.this_if_zero_or_empty(1, u32::from(self.display_margin.h));
                let columns = params.this_if_zero_or_empty(2, u32::from(self.display_margin.w));
                self.resize(super::arg_to_coordinate(columns), super::arg_to_coordinate(rows));
            }
            18 => {
                let report = format!("8;{};{}t", self.display_margin.h, self.display_margin.w);
                self.write_report(&report);
            }
            // DECSLPP: values from 24 up select the lines per page.
            n if n >= 24 => self.resize(self.display_margin.w, super::arg_to_coordinate(n)),
            n => log::debug!("ignored window operation {n}"),
        }
    }

    fn set_modes(&mut self, params: &mut ControlSequenceParams, on: bool) {
        params.minimum_one_arg();
        for i in 0..params.arg_count() {
            match params.zero_if_empty(i) {
                // IRM: insert rather than overwrite printables.
                4 => self.insert_mode = on,
                // LNM has no observable effect without a line discipline.
                20 => {}
                n => log::debug!("ignored mode {n}"),
            }
        }
    }

    fn set_private_modes(&mut self, params: &mut ControlSequenceParams, on: bool) {
        params.minimum_one_arg();
        for i in 0..params.arg_count() {
            self.set_private_mode(params.zero_if_empty(i), on);
        }
    }

    fn set_private_mode(&mut self, mode: u32, on: bool) {
        match mode {
            1 => self.keyboard.set_cursor_application_mode(on),     // DECCKM
            3 => self.set_columns_per_page_mode(on),                // DECCOLM
            4 => {}                                                 // DECSCLM
            5 => {
                // DECSCNM
                self.invert_screen = on;
                self.update_screen_flags();
            }
            6 => {
                // DECOM
                self.modes.origin = on;
                self.home();
            }
            7 => self.modes.automatic_right_margin = on,            // DECAWM
            8 => {}                                                 // DECARM
            12 => {
                self.cursor_attributes.set(CursorAttributes::BLINKS, on);
                self.update_cursor_type();
            }
            25 => {
                // DECTCEM
                self.cursor_attributes.set(CursorAttributes::VISIBLE, on);
                self.update_cursor_type();
            }
            40 => {}                                                // 80/132 switching enable
            47 => self.select_alternate_buffer(on, false, false),
            66 => self.keyboard.set_calculator_application_mode(on), // DECNKM
            67 => self.keyboard.set_backspace_is_bs(on),            // DECBKM
            69 => self.modes.left_right_margins = on,               // DECLRMM
            9 | 1000 => {
                // X10 / VT200 click reporting.
                self.mouse.set_send_xterm_mouse(on);
                self.mouse.set_send_xterm_mouse_clicks(on);
            }
            1002 => {
                self.mouse.set_send_xterm_mouse(on);
                self.mouse.set_send_xterm_mouse_clicks(on);
                self.mouse.set_send_xterm_mouse_button_motions(on);
            }
            1003 => {
                self.mouse.set_send_xterm_mouse(on);
                self.mouse.set_send_xterm_mouse_clicks(on);
                self.mouse.set_send_xterm_mouse_button_motions(on);
                self.mouse.set_send_xterm_mouse_nobutton_motions(on);
            }
            1004 => {}                                              // focus reports
            // The SGR coordinate form is the only one written; enabling
            // any extended-coordinate mode turns reporting on.
            1006 | 1015 | 1016 => self.mouse.set_send_xterm_mouse(on),
            1005 => log::debug!("ignored UTF-8 extended mouse mode"),
            1047 => self.select_alternate_buffer(on, true, false),
            1048 => {
                if on {
                    self.save_cursor();
                } else {
                    self.restore_cursor();
                }
            }
            1049 => self.select_alternate_buffer(on, true, true),
            1051 | 1052 | 1060 => {}                                // Sun/HP/legacy keyboards
            1053 => self.keyboard.set_sco_function_keys(on),
            1061 => self.keyboard.set_dec_function_keys(on),
            2004 => self.keyboard.set_send_paste_event(on),
            n => log::debug!("ignored private mode {n}"),
        }
    }

    /// DECCOLM: 132/80 column switch. Clears and homes unless suppressed
    /// by Setup.
    fn set_columns_per_page_mode(&mut self, on: bool) {
        let columns = if on { 132 } else { 80 };
        self.resize(columns, self.display_margin.h);
        if !self.no_clear_on_column_change {
            self.clear_display(u32::from(b' '));
        }
        self.home();
    }
}
