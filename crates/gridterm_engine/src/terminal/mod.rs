//! The soft-terminal display engine.
//!
//! `Terminal` owns the decode front end and the full terminal state:
//! cursor, margins, tab stops, attributes, colours, and modes. It drives a
//! [`ScreenBuffer`] and pushes input-side mode changes and reports through
//! the [`KeyboardSink`] and [`MouseSink`] contracts.

mod control_sequences;
mod rendition;
mod reports;
mod tabs;

use gridterm_parser::control_codes::*;
use gridterm_parser::{ControlSequenceParams, ControlStringKind, DecoderConfig, Ecma48Decoder, Ecma48Sink, ShiftLevel, Utf8Decoder};

use crate::cell::{character_width, CellAttributes, CharacterCell, ColourPair, DEFAULT_BACKGROUND, DEFAULT_FOREGROUND};
use crate::keyboard::{KeyboardSink, MouseSink};
use crate::screen::{Coordinate, CursorAttributes, CursorGlyph, PointerAttributes, ScreenBuffer, ScreenFlags};

/// Construction-time parameters.
#[derive(Debug, Clone, Copy, serde::Serialize, serde::Deserialize)]
pub struct Setup {
    pub width: Coordinate,
    pub height: Coordinate,
    /// Begin with the screen inverted (DECSCNM state).
    pub inverted: bool,
    /// SU/SD are window pans on DEC VTs but scroll-buffer operations on
    /// the Linux and teken consoles.
    pub pan_is_scroll: bool,
    /// Suppress the screen clear on an 80/132 column change.
    pub no_clear_on_column_change: bool,
}

impl Default for Setup {
    fn default() -> Self {
        Setup {
            width: 80,
            height: 24,
            inverted: false,
            pan_is_scroll: false,
            no_clear_on_column_change: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct Point {
    x: Coordinate,
    y: Coordinate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Extent {
    w: Coordinate,
    h: Coordinate,
}

#[derive(Debug, Clone, Copy)]
struct Modes {
    automatic_right_margin: bool,
    background_colour_erase: bool,
    origin: bool,
    left_right_margins: bool,
}

impl Modes {
    fn initial() -> Self {
        Modes {
            automatic_right_margin: true,
            background_colour_erase: true,
            origin: false,
            left_right_margins: false,
        }
    }
}

/// The DECSC capsule: position, rendition, and origin mode.
#[derive(Debug, Clone, Copy)]
struct SavedCursor {
    x: Coordinate,
    y: Coordinate,
    attributes: CellAttributes,
    colour: ColourPair,
    origin: bool,
}

impl Default for SavedCursor {
    fn default() -> Self {
        SavedCursor {
            x: 0,
            y: 0,
            attributes: CellAttributes::empty(),
            colour: ColourPair::default(),
            origin: false,
        }
    }
}

/// The display engine with its decode front end.
pub struct Terminal<S: ScreenBuffer, K: KeyboardSink, M: MouseSink> {
    utf8: Utf8Decoder,
    decoder: Ecma48Decoder,
    state: TermState<S, K, M>,
}

impl<S: ScreenBuffer, K: KeyboardSink, M: MouseSink> Terminal<S, K, M> {
    pub fn new(screen: S, keyboard: K, mouse: M, setup: Setup) -> Self {
        let mut state = TermState {
            screen,
            keyboard,
            mouse,
            scroll_origin: Point::default(),
            scroll_margin: Extent { w: 1, h: 1 },
            display_margin: Extent { w: 1, h: 1 },
            cursor: Point::default(),
            pending_advance: false,
            saved: SavedCursor::default(),
            h_tab_pins: [false; 256],
            v_tab_pins: [false; 256],
            modes: Modes::initial(),
            saved_modes: Modes::initial(),
            insert_mode: false,
            altbuffer: false,
            attributes: CellAttributes::empty(),
            colour: ColourPair::default(),
            cursor_glyph: CursorGlyph::Block,
            cursor_attributes: CursorAttributes::default(),
            initial_inverted: setup.inverted,
            invert_screen: setup.inverted,
            pan_is_scroll: setup.pan_is_scroll,
            no_clear_on_column_change: setup.no_clear_on_column_change,
            last_printable: u32::from(b' '),
            window_title: None,
        };
        state.resize(setup.width, setup.height);
        state.reset_to_initial_state();
        Terminal {
            utf8: Utf8Decoder::new(),
            decoder: Ecma48Decoder::new(DecoderConfig::default()),
            state,
        }
    }

    /// Feed one application byte through the decode pipeline.
    pub fn process(&mut self, byte: u8) {
        let Terminal { utf8, decoder, state } = self;
        for ch in utf8.push(byte) {
            decoder.process(ch, state);
        }
    }

    pub fn process_bytes(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.process(b);
        }
    }

    pub fn screen(&self) -> &S {
        &self.state.screen
    }

    pub fn screen_mut(&mut self) -> &mut S {
        &mut self.state.screen
    }

    pub fn keyboard(&self) -> &K {
        &self.state.keyboard
    }

    pub fn keyboard_mut(&mut self) -> &mut K {
        &mut self.state.keyboard
    }

    pub fn mouse(&self) -> &M {
        &self.state.mouse
    }

    pub fn size(&self) -> (Coordinate, Coordinate) {
        (self.state.display_margin.w, self.state.display_margin.h)
    }

    pub fn cursor_position(&self) -> (Coordinate, Coordinate) {
        (self.state.cursor.x, self.state.cursor.y)
    }

    /// Title last set through OSC 0/2, for the embedding host.
    pub fn window_title(&self) -> Option<&str> {
        self.state.window_title.as_deref()
    }

    /// Host-driven resize (window-size change on the terminal).
    pub fn resize(&mut self, width: Coordinate, height: Coordinate) {
        self.state.resize(width, height);
    }

    /// Legacy ECMA-48 Zero Default Mode, for clients that still send
    /// explicit zeros expecting the parameter default.
    pub fn set_zero_default_mode(&mut self, on: bool) {
        self.decoder.set_zero_default_mode(on);
    }
}

struct TermState<S, K, M> {
    screen: S,
    keyboard: K,
    mouse: M,
    scroll_origin: Point,
    scroll_margin: Extent,
    display_margin: Extent,
    cursor: Point,
    pending_advance: bool,
    saved: SavedCursor,
    h_tab_pins: [bool; 256],
    v_tab_pins: [bool; 256],
    modes: Modes,
    saved_modes: Modes,
    insert_mode: bool,
    altbuffer: bool,
    attributes: CellAttributes,
    colour: ColourPair,
    cursor_glyph: CursorGlyph,
    cursor_attributes: CursorAttributes,
    initial_inverted: bool,
    invert_screen: bool,
    pan_is_scroll: bool,
    no_clear_on_column_change: bool,
    last_printable: u32,
    window_title: Option<String>,
}

fn arg_to_coordinate(v: u32) -> Coordinate {
    v.min(u32::from(Coordinate::MAX)) as Coordinate
}

impl<S: ScreenBuffer, K: KeyboardSink, M: MouseSink> Ecma48Sink for TermState<S, K, M> {
    fn printable(&mut self, _error: bool, _shift: ShiftLevel, code: u32) {
        self.print_character(code);
    }

    fn control(&mut self, code: u32) {
        match code {
            NUL | ENQ | SO | SI | SUB | DEL => {}
            BEL => {}
            BS => self.cursor_left(1),
            TAB => self.horizontal_tab(1),
            LF | VT | FF | IND => self.line_feed(),
            CR => self.carriage_return(),
            NEL => {
                self.carriage_return();
                self.line_feed();
            }
            HTS => self.set_horizontal_tabstop(),
            RI => self.reverse_line_feed(),
            _ => log::debug!("ignored control character {code:#04x}"),
        }
        self.update_cursor_pos();
    }

    fn escape(&mut self, code: u32, intermediate: u32) {
        match (intermediate, code) {
            (NUL, 0x37) => self.save_cursor(),                                    // DECSC
            (NUL, 0x38) => self.restore_cursor(),                                 // DECRC
            (NUL, 0x63) => self.reset_to_initial_state(),                         // RIS
            (NUL, 0x3D) => self.keyboard.set_calculator_application_mode(true),   // DECKPAM
            (NUL, 0x3E) => self.keyboard.set_calculator_application_mode(false),  // DECKPNM
            (0x23, 0x38) => self.screen_alignment_fill(),                         // DECALN
            _ => log::debug!("ignored escape sequence {code:#04x} intermediate {intermediate:#04x}"),
        }
        self.update_cursor_pos();
    }

    fn control_sequence(&mut self, final_byte: u32, intermediate: u32, private: u32, params: &mut ControlSequenceParams) {
        self.dispatch_control_sequence(final_byte, intermediate, private, params);
        self.update_cursor_pos();
    }

    fn control_string(&mut self, kind: ControlStringKind, data: &[u32]) {
        if kind == ControlStringKind::OperatingSystemCommand {
            let body: String = data.iter().map(|&c| char::from_u32(c).unwrap_or('\u{FFFD}')).collect();
            if let Some(title) = body.strip_prefix("0;").or_else(|| body.strip_prefix("2;")) {
                self.window_title = Some(title.to_owned());
                return;
            }
        }
        log::debug!("ignored control string {kind:?} ({} characters)", data.len());
    }
}

impl<S: ScreenBuffer, K: KeyboardSink, M: MouseSink> TermState<S, K, M> {
    fn addr(&self, x: Coordinate, y: Coordinate) -> Coordinate {
        y * self.display_margin.w + x
    }

    fn region_top(&self) -> Coordinate {
        self.scroll_origin.y
    }

    fn region_bottom(&self) -> Coordinate {
        self.scroll_origin.y + self.scroll_margin.h - 1
    }

    fn region_left(&self) -> Coordinate {
        if self.modes.left_right_margins {
            self.scroll_origin.x
        } else {
            0
        }
    }

    fn region_right(&self) -> Coordinate {
        if self.modes.left_right_margins {
            self.scroll_origin.x + self.scroll_margin.w - 1
        } else {
            self.display_margin.w - 1
        }
    }

    fn full_width_region(&self) -> bool {
        self.region_left() == 0 && self.region_right() == self.display_margin.w - 1
    }

    /// Right stop for the cursor: the right margin when the cursor is
    /// inside the column band, the display edge otherwise.
    fn right_bound(&self) -> Coordinate {
        let right = self.region_right();
        if self.cursor.x <= right {
            right
        } else {
            self.display_margin.w - 1
        }
    }

    fn left_bound(&self) -> Coordinate {
        let left = self.region_left();
        if self.cursor.x >= left {
            left
        } else {
            0
        }
    }

    fn update_cursor_pos(&mut self) {
        self.screen.set_cursor_pos(self.cursor.x, self.cursor.y);
    }

    fn update_cursor_type(&mut self) {
        self.screen.set_cursor_type(self.cursor_glyph, self.cursor_attributes);
    }

    fn update_pointer_type(&mut self) {
        self.screen.set_pointer_type(PointerAttributes::VISIBLE);
    }

    fn update_screen_flags(&mut self) {
        let flags = if self.invert_screen { ScreenFlags::INVERTED } else { ScreenFlags::empty() };
        self.screen.set_screen_flags(flags);
    }

    /// The cell ED/EL/ECH paint with: a space carrying the current colours
    /// when background-colour erase is on, the default colours otherwise.
    fn erasure_cell(&self, character: u32) -> CharacterCell {
        if self.modes.background_colour_erase {
            CharacterCell::new(character, CellAttributes::empty(), self.colour.foreground, self.colour.background)
        } else {
            CharacterCell::new(character, CellAttributes::empty(), DEFAULT_FOREGROUND, DEFAULT_BACKGROUND)
        }
    }

    fn print_character(&mut self, code: u32) {
        let width = character_width(code);
        if self.pending_advance && self.modes.automatic_right_margin {
            self.carriage_return();
            self.line_feed();
        }
        self.pending_advance = false;
        if self.insert_mode {
            self.insert_characters(u32::from(width));
        }
        let right = self.right_bound();
        let cell = CharacterCell::new(code, self.attributes, self.colour.foreground, self.colour.background);
        let pos = self.addr(self.cursor.x, self.cursor.y);
        self.screen.write_n_cells(pos, 1, &cell);
        if width == 2 && self.cursor.x < right {
            // Wide characters occupy a NUL spacer cell.
            let spacer = CharacterCell::new(NUL, self.attributes, self.colour.foreground, self.colour.background);
            self.screen.write_n_cells(pos + 1, 1, &spacer);
        }
        self.last_printable = code;
        let advanced = self.cursor.x + width;
        if advanced > right {
            self.cursor.x = right;
            if self.modes.automatic_right_margin {
                self.pending_advance = true;
            }
        } else {
            self.cursor.x = advanced;
        }
        self.update_cursor_pos();
    }

    fn repeat_printable_character(&mut self, n: u32) {
        let code = self.last_printable;
        for _ in 0..n.min(u32::from(self.display_margin.w) * u32::from(self.display_margin.h)) {
            self.print_character(code);
        }
    }

    fn carriage_return(&mut self) {
        self.pending_advance = false;
        self.cursor.x = self.left_bound();
    }

    fn line_feed(&mut self) {
        self.pending_advance = false;
        if self.cursor.y == self.region_bottom() {
            self.scroll_area_up(1);
        } else if self.cursor.y + 1 < self.display_margin.h {
            self.cursor.y += 1;
        }
    }

    fn reverse_line_feed(&mut self) {
        self.pending_advance = false;
        if self.cursor.y == self.region_top() {
            self.scroll_area_down(1);
        } else if self.cursor.y > 0 {
            self.cursor.y -= 1;
        }
    }

    fn cursor_up(&mut self, n: u32, scroll_at_margin: bool) {
        self.pending_advance = false;
        let n = arg_to_coordinate(n);
        let top = if self.cursor.y >= self.region_top() { self.region_top() } else { 0 };
        let distance = self.cursor.y - top;
        if n <= distance {
            self.cursor.y -= n;
        } else {
            self.cursor.y = top;
            if scroll_at_margin {
                self.scroll_area_down(u32::from(n - distance));
            }
        }
    }

    fn cursor_down(&mut self, n: u32, scroll_at_margin: bool) {
        self.pending_advance = false;
        let n = arg_to_coordinate(n);
        let bottom = if self.cursor.y <= self.region_bottom() {
            self.region_bottom()
        } else {
            self.display_margin.h - 1
        };
        let distance = bottom - self.cursor.y;
        if n <= distance {
            self.cursor.y += n;
        } else {
            self.cursor.y = bottom;
            if scroll_at_margin {
                self.scroll_area_up(u32::from(n - distance));
            }
        }
    }

    fn cursor_left(&mut self, n: u32) {
        self.pending_advance = false;
        let n = arg_to_coordinate(n);
        let left = self.left_bound();
        self.cursor.x = self.cursor.x.saturating_sub(n).max(left);
    }

    fn cursor_right(&mut self, n: u32) {
        self.pending_advance = false;
        let n = arg_to_coordinate(n);
        self.cursor.x = (self.cursor.x + n.min(self.display_margin.w)).min(self.right_bound());
    }

    /// Absolute addressing, 1-based, origin-mode aware.
    fn goto_yx(&mut self, row: u32, col: u32) {
        self.goto_y(row);
        self.goto_x(col);
    }

    fn goto_x(&mut self, col: u32) {
        self.pending_advance = false;
        let (base, limit) = if self.modes.origin {
            (self.region_left(), self.region_right())
        } else {
            (0, self.display_margin.w - 1)
        };
        self.cursor.x = (base + arg_to_coordinate(col.saturating_sub(1)).min(limit)).min(limit);
    }

    fn goto_y(&mut self, row: u32) {
        self.pending_advance = false;
        let (base, limit) = if self.modes.origin {
            (self.region_top(), self.region_bottom())
        } else {
            (0, self.display_margin.h - 1)
        };
        self.cursor.y = (base + arg_to_coordinate(row.saturating_sub(1)).min(limit)).min(limit);
    }

    fn home(&mut self) {
        self.goto_yx(1, 1);
    }

    fn scroll_area_up(&mut self, n: u32) {
        self.scroll_rows_up(self.region_top(), self.region_bottom(), n);
    }

    fn scroll_area_down(&mut self, n: u32) {
        self.scroll_rows_down(self.region_top(), self.region_bottom(), n);
    }

    fn scroll_rows_up(&mut self, top: Coordinate, bottom: Coordinate, n: u32) {
        if top > bottom {
            return;
        }
        let rows = bottom - top + 1;
        let n = arg_to_coordinate(n).min(rows);
        if n == 0 {
            return;
        }
        let fill = self.erasure_cell(SPC);
        if self.full_width_region() {
            let start = self.addr(0, top);
            let end = self.addr(0, bottom) + self.display_margin.w;
            self.screen.scroll_up(start, end, n * self.display_margin.w, &fill);
        } else {
            let left = self.region_left();
            let width = self.region_right() - left + 1;
            if n < rows {
                for y in top..=bottom - n {
                    self.screen.copy_n_cells(self.addr(left, y), self.addr(left, y + n), width);
                }
            }
            for y in (bottom + 1 - n)..=bottom {
                self.screen.write_n_cells(self.addr(left, y), width, &fill);
            }
        }
    }

    fn scroll_rows_down(&mut self, top: Coordinate, bottom: Coordinate, n: u32) {
        if top > bottom {
            return;
        }
        let rows = bottom - top + 1;
        let n = arg_to_coordinate(n).min(rows);
        if n == 0 {
            return;
        }
        let fill = self.erasure_cell(SPC);
        if self.full_width_region() {
            let start = self.addr(0, top);
            let end = self.addr(0, bottom) + self.display_margin.w;
            self.screen.scroll_down(start, end, n * self.display_margin.w, &fill);
        } else {
            let left = self.region_left();
            let width = self.region_right() - left + 1;
            for y in ((top + n)..=bottom).rev() {
                self.screen.copy_n_cells(self.addr(left, y), self.addr(left, y - n), width);
            }
            for y in top..top + n {
                self.screen.write_n_cells(self.addr(left, y), width, &fill);
            }
        }
    }

    /// SU/SD: a pan of the whole display on DEC VTs, a scroll of the
    /// region on the consoles that treat them as buffer operations.
    fn pan_or_scroll_up(&mut self, n: u32) {
        if self.pan_is_scroll {
            self.scroll_area_up(n);
        } else {
            self.scroll_rows_up(0, self.display_margin.h - 1, n);
        }
    }

    fn pan_or_scroll_down(&mut self, n: u32) {
        if self.pan_is_scroll {
            self.scroll_area_down(n);
        } else {
            self.scroll_rows_down(0, self.display_margin.h - 1, n);
        }
    }

    fn scroll_area_left(&mut self, n: u32) {
        let (top, bottom) = (self.region_top(), self.region_bottom());
        let left = self.region_left();
        let width = self.region_right() - left + 1;
        let n = arg_to_coordinate(n).min(width);
        if n == 0 {
            return;
        }
        let fill = self.erasure_cell(SPC);
        for y in top..=bottom {
            if n < width {
                self.screen.copy_n_cells(self.addr(left, y), self.addr(left + n, y), width - n);
            }
            self.screen.write_n_cells(self.addr(left + width - n, y), n, &fill);
        }
    }

    fn scroll_area_right(&mut self, n: u32) {
        let (top, bottom) = (self.region_top(), self.region_bottom());
        let left = self.region_left();
        let width = self.region_right() - left + 1;
        let n = arg_to_coordinate(n).min(width);
        if n == 0 {
            return;
        }
        let fill = self.erasure_cell(SPC);
        for y in top..=bottom {
            if n < width {
                self.screen.copy_n_cells(self.addr(left + n, y), self.addr(left, y), width - n);
            }
            self.screen.write_n_cells(self.addr(left, y), n, &fill);
        }
    }

    fn insert_lines(&mut self, n: u32) {
        if self.cursor.y >= self.region_top() && self.cursor.y <= self.region_bottom() {
            self.scroll_rows_down(self.cursor.y, self.region_bottom(), n);
            self.cursor.x = self.left_bound();
            self.pending_advance = false;
        }
    }

    fn delete_lines(&mut self, n: u32) {
        if self.cursor.y >= self.region_top() && self.cursor.y <= self.region_bottom() {
            self.scroll_rows_up(self.cursor.y, self.region_bottom(), n);
            self.cursor.x = self.left_bound();
            self.pending_advance = false;
        }
    }

    fn insert_characters(&mut self, n: u32) {
        let right = self.right_bound();
        let count = right - self.cursor.x + 1;
        let n = arg_to_coordinate(n).min(count);
        if n == 0 {
            return;
        }
        let pos = self.addr(self.cursor.x, self.cursor.y);
        if n < count {
            self.screen.copy_n_cells(pos + n, pos, count - n);
        }
        let fill = self.erasure_cell(SPC);
        self.screen.write_n_cells(pos, n, &fill);
    }

    fn delete_characters(&mut self, n: u32) {
        let right = self.right_bound();
        let count = right - self.cursor.x + 1;
        let n = arg_to_coordinate(n).min(count);
        if n == 0 {
            return;
        }
        let pos = self.addr(self.cursor.x, self.cursor.y);
        if n < count {
            self.screen.copy_n_cells(pos, pos + n, count - n);
        }
        let fill = self.erasure_cell(SPC);
        self.screen.write_n_cells(pos + count - n, n, &fill);
    }

    fn erase_characters(&mut self, n: u32) {
        let right = self.right_bound();
        let count = right - self.cursor.x + 1;
        let n = arg_to_coordinate(n).min(count);
        let fill = self.erasure_cell(SPC);
        self.screen.write_n_cells(self.addr(self.cursor.x, self.cursor.y), n, &fill);
    }

    fn clear_display(&mut self, character: u32) {
        let fill = self.erasure_cell(character);
        let total = self.display_margin.w * self.display_margin.h;
        self.screen.write_n_cells(0, total, &fill);
    }

    fn screen_alignment_fill(&mut self) {
        let fill = CharacterCell::new(u32::from(b'E'), CellAttributes::empty(), DEFAULT_FOREGROUND, DEFAULT_BACKGROUND);
        let total = self.display_margin.w * self.display_margin.h;
        self.screen.write_n_cells(0, total, &fill);
        self.reset_margins();
        self.home();
    }

    fn save_cursor(&mut self) {
        self.saved = SavedCursor {
            x: self.cursor.x,
            y: self.cursor.y,
            attributes: self.attributes,
            colour: self.colour,
            origin: self.modes.origin,
        };
        self.saved_modes = self.modes;
    }

    fn restore_cursor(&mut self) {
        self.modes.origin = self.saved.origin;
        self.attributes = self.saved.attributes;
        self.colour = self.saved.colour;
        self.cursor.x = self.saved.x.min(self.display_margin.w - 1);
        self.cursor.y = self.saved.y.min(self.display_margin.h - 1);
        self.pending_advance = false;
    }

    fn reset_margins(&mut self) {
        self.scroll_origin = Point::default();
        self.scroll_margin = self.display_margin;
    }

    fn resize(&mut self, width: Coordinate, height: Coordinate) {
        // Sane-winsize policy: a degenerate size request becomes 1x1.
        // Either axis caps at 255 so linear cell addresses stay within
        // the buffer's 16-bit address space.
        let width = width.clamp(1, 255);
        let height = height.clamp(1, 255);
        self.display_margin = Extent { w: width, h: height };
        self.screen.set_size(width, height);
        self.reset_margins();
        self.cursor.x = self.cursor.x.min(width - 1);
        self.cursor.y = self.cursor.y.min(height - 1);
        self.pending_advance = false;
        self.keyboard.report_size(width, height);
        self.update_cursor_pos();
    }

    fn select_alternate_buffer(&mut self, on: bool, clear_on_enter: bool, with_cursor: bool) {
        if with_cursor && on {
            self.save_cursor();
        }
        if self.altbuffer != on {
            self.screen.set_alt_buffer(on);
            self.altbuffer = on;
            if on && clear_on_enter {
                self.clear_display(SPC);
            }
        }
        if with_cursor && !on {
            self.restore_cursor();
        }
    }

    fn reset_to_initial_state(&mut self) {
        self.attributes = CellAttributes::empty();
        self.colour = ColourPair::default();
        self.modes = Modes::initial();
        self.saved_modes = Modes::initial();
        self.insert_mode = false;
        self.saved = SavedCursor::default();
        self.reset_tabstops();
        self.reset_margins();
        self.invert_screen = self.initial_inverted;
        self.screen.set_alt_buffer(false);
        self.altbuffer = false;
        self.cursor = Point::default();
        self.pending_advance = false;
        self.cursor_glyph = CursorGlyph::Block;
        self.cursor_attributes = CursorAttributes::default();
        self.last_printable = u32::from(b' ');
        self.clear_display(SPC);

        self.keyboard.set_cursor_application_mode(false);
        self.keyboard.set_calculator_application_mode(false);
        self.keyboard.set_8bit_control1(false);
        self.keyboard.set_backspace_is_bs(false);
        self.keyboard.set_escape_is_fs(false);
        self.keyboard.set_delete_is_del(false);
        self.keyboard.set_send_paste_event(false);
        self.mouse.set_send_xterm_mouse(false);
        self.mouse.set_send_xterm_mouse_clicks(false);
        self.mouse.set_send_xterm_mouse_button_motions(false);
        self.mouse.set_send_xterm_mouse_nobutton_motions(false);
        self.mouse.set_send_dec_locator(0);
        self.mouse.set_send_dec_locator_press_events(false);
        self.mouse.set_send_dec_locator_release_events(false);

        self.update_cursor_type();
        self.update_pointer_type();
        self.update_screen_flags();
        self.update_cursor_pos();
    }

    /// DECSTR is a subset of RIS: modes only.
    fn soft_reset(&mut self) {
        self.modes = Modes::initial();
        self.saved_modes = Modes::initial();
        self.insert_mode = false;
        self.pending_advance = false;
    }

    fn save_modes(&mut self) {
        self.saved_modes = self.modes;
    }

    fn restore_modes(&mut self) {
        self.modes = self.saved_modes;
    }
}
