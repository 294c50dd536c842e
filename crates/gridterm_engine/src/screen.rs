//! The screen buffer seam and its concrete implementors.

use std::sync::Arc;

use bitflags::bitflags;
use parking_lot::Mutex;

use crate::cell::CharacterCell;

/// Linear (row-major) cell address or cell count.
pub type Coordinate = u16;

/// Cursor glyph selected with DECSCUSR and friends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub enum CursorGlyph {
    #[default]
    Block,
    Underline,
    Bar,
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct CursorAttributes: u8 {
        const VISIBLE = 0b0000_0001;
        const BLINKS = 0b0000_0010;
    }
}

impl Default for CursorAttributes {
    fn default() -> Self {
        CursorAttributes::VISIBLE | CursorAttributes::BLINKS
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct PointerAttributes: u8 {
        const VISIBLE = 0b0000_0001;
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct ScreenFlags: u8 {
        const INVERTED = 0b0000_0001;
    }
}

/// The display engine's one storage dependency: a cell grid with
/// read/write/scroll/copy primitives plus cursor and screen metadata.
///
/// Addressing is linear, row-major, in the bounds most recently set by
/// `set_size`. Implementors own whatever synchronisation their consumers
/// need; the engine assumes each call completes before the next.
pub trait ScreenBuffer {
    fn read_cell(&self, pos: Coordinate) -> CharacterCell;
    fn write_n_cells(&mut self, pos: Coordinate, n: Coordinate, cell: &CharacterCell);
    /// Bulk attribute/colour mutation that leaves characters alone.
    fn modify_n_cells(
        &mut self,
        pos: Coordinate,
        n: Coordinate,
        turnoff: crate::CellAttributes,
        flipon: crate::CellAttributes,
        foreground: Option<crate::Colour>,
        background: Option<crate::Colour>,
    );
    fn copy_n_cells(&mut self, dest: Coordinate, src: Coordinate, n: Coordinate);
    /// Shift `[start, end)` towards `start` by `n` cells, filling the
    /// vacated tail with `fill`.
    fn scroll_up(&mut self, start: Coordinate, end: Coordinate, n: Coordinate, fill: &CharacterCell);
    /// Shift `[start, end)` towards `end` by `n` cells, filling the
    /// vacated head with `fill`.
    fn scroll_down(&mut self, start: Coordinate, end: Coordinate, n: Coordinate, fill: &CharacterCell);
    fn set_cursor_pos(&mut self, x: Coordinate, y: Coordinate);
    fn set_cursor_type(&mut self, glyph: CursorGlyph, attributes: CursorAttributes);
    fn set_pointer_type(&mut self, attributes: PointerAttributes);
    fn set_screen_flags(&mut self, flags: ScreenFlags);
    fn set_size(&mut self, width: Coordinate, height: Coordinate);
    fn set_alt_buffer(&mut self, enabled: bool);
}

/// The primary in-memory grid, with an alternate-buffer swap store.
#[derive(Debug, Clone)]
pub struct MemoryScreenBuffer {
    width: Coordinate,
    height: Coordinate,
    cells: Vec<CharacterCell>,
    saved: Vec<CharacterCell>,
    altbuffer: bool,
    cursor: (Coordinate, Coordinate),
    cursor_glyph: CursorGlyph,
    cursor_attributes: CursorAttributes,
    pointer_attributes: PointerAttributes,
    flags: ScreenFlags,
}

impl MemoryScreenBuffer {
    pub fn new(width: Coordinate, height: Coordinate) -> Self {
        let mut buffer = MemoryScreenBuffer {
            width: 0,
            height: 0,
            cells: Vec::new(),
            saved: Vec::new(),
            altbuffer: false,
            cursor: (0, 0),
            cursor_glyph: CursorGlyph::default(),
            cursor_attributes: CursorAttributes::default(),
            pointer_attributes: PointerAttributes::default(),
            flags: ScreenFlags::empty(),
        };
        buffer.set_size(width, height);
        buffer
    }

    pub fn width(&self) -> Coordinate {
        self.width
    }

    pub fn height(&self) -> Coordinate {
        self.height
    }

    pub fn cursor(&self) -> (Coordinate, Coordinate) {
        self.cursor
    }

    pub fn cursor_type(&self) -> (CursorGlyph, CursorAttributes) {
        (self.cursor_glyph, self.cursor_attributes)
    }

    pub fn screen_flags(&self) -> ScreenFlags {
        self.flags
    }

    pub fn is_alt_buffer(&self) -> bool {
        self.altbuffer
    }

    pub fn cell_at(&self, x: Coordinate, y: Coordinate) -> CharacterCell {
        self.cells[usize::from(y) * usize::from(self.width) + usize::from(x)]
    }

    /// The row's characters as a string, NUL rendered as space.
    pub fn row_text(&self, y: Coordinate) -> String {
        (0..self.width)
            .map(|x| {
                let c = self.cell_at(x, y).character;
                if c == 0 {
                    ' '
                } else {
                    char::from_u32(c).unwrap_or('\u{FFFD}')
                }
            })
            .collect()
    }
}

impl ScreenBuffer for MemoryScreenBuffer {
    fn read_cell(&self, pos: Coordinate) -> CharacterCell {
        self.cells.get(usize::from(pos)).copied().unwrap_or_default()
    }

    fn write_n_cells(&mut self, pos: Coordinate, n: Coordinate, cell: &CharacterCell) {
        let start = usize::from(pos).min(self.cells.len());
        let end = (start + usize::from(n)).min(self.cells.len());
        self.cells[start..end].fill(*cell);
    }

    fn modify_n_cells(
        &mut self,
        pos: Coordinate,
        n: Coordinate,
        turnoff: crate::CellAttributes,
        flipon: crate::CellAttributes,
        foreground: Option<crate::Colour>,
        background: Option<crate::Colour>,
    ) {
        let start = usize::from(pos).min(self.cells.len());
        let end = (start + usize::from(n)).min(self.cells.len());
        for cell in &mut self.cells[start..end] {
            cell.attributes = (cell.attributes - turnoff) | flipon;
            if let Some(fg) = foreground {
                cell.foreground = fg;
            }
            if let Some(bg) = background {
                cell.background = bg;
            }
        }
    }

    fn copy_n_cells(&mut self, dest: Coordinate, src: Coordinate, n: Coordinate) {
        let len = self.cells.len();
        let dest = usize::from(dest).min(len);
        let src = usize::from(src).min(len);
        let n = usize::from(n).min(len - dest.max(src));
        self.cells.copy_within(src..src + n, dest);
    }

    fn scroll_up(&mut self, start: Coordinate, end: Coordinate, n: Coordinate, fill: &CharacterCell) {
        let len = self.cells.len();
        let start = usize::from(start).min(len);
        let end = usize::from(end).min(len);
        let n = usize::from(n);
        if start >= end {
            return;
        }
        if n < end - start {
            self.cells.copy_within(start + n..end, start);
            self.cells[end - n..end].fill(*fill);
        } else {
            self.cells[start..end].fill(*fill);
        }
    }

    fn scroll_down(&mut self, start: Coordinate, end: Coordinate, n: Coordinate, fill: &CharacterCell) {
        let len = self.cells.len();
        let start = usize::from(start).min(len);
        let end = usize::from(end).min(len);
        let n = usize::from(n);
        if start >= end {
            return;
        }
        if n < end - start {
            self.cells.copy_within(start..end - n, start + n);
            self.cells[start..start + n].fill(*fill);
        } else {
            self.cells[start..end].fill(*fill);
        }
    }

    fn set_cursor_pos(&mut self, x: Coordinate, y: Coordinate) {
        self.cursor = (x, y);
    }

    fn set_cursor_type(&mut self, glyph: CursorGlyph, attributes: CursorAttributes) {
        self.cursor_glyph = glyph;
        self.cursor_attributes = attributes;
    }

    fn set_pointer_type(&mut self, attributes: PointerAttributes) {
        self.pointer_attributes = attributes;
    }

    fn set_screen_flags(&mut self, flags: ScreenFlags) {
        self.flags = flags;
    }

    fn set_size(&mut self, width: Coordinate, height: Coordinate) {
        self.width = width;
        self.height = height;
        let cells = usize::from(width) * usize::from(height);
        self.cells.resize(cells, CharacterCell::default());
        self.saved.resize(cells, CharacterCell::default());
    }

    fn set_alt_buffer(&mut self, enabled: bool) {
        if self.altbuffer == enabled {
            return;
        }
        std::mem::swap(&mut self.cells, &mut self.saved);
        self.altbuffer = enabled;
    }
}

/// Fans every operation out to several buffers, so one emulator can feed
/// both a renderer-facing grid and a legacy byte-layout mirror.
#[derive(Default)]
pub struct MultiplexBuffer {
    buffers: Vec<Box<dyn ScreenBuffer>>,
}

impl MultiplexBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, buffer: Box<dyn ScreenBuffer>) {
        self.buffers.push(buffer);
    }
}

impl ScreenBuffer for MultiplexBuffer {
    fn read_cell(&self, pos: Coordinate) -> CharacterCell {
        self.buffers.iter().map(|b| b.read_cell(pos)).last().unwrap_or_default()
    }

    fn write_n_cells(&mut self, pos: Coordinate, n: Coordinate, cell: &CharacterCell) {
        for b in &mut self.buffers {
            b.write_n_cells(pos, n, cell);
        }
    }

    fn modify_n_cells(
        &mut self,
        pos: Coordinate,
        n: Coordinate,
        turnoff: crate::CellAttributes,
        flipon: crate::CellAttributes,
        foreground: Option<crate::Colour>,
        background: Option<crate::Colour>,
    ) {
        for b in &mut self.buffers {
            b.modify_n_cells(pos, n, turnoff, flipon, foreground, background);
        }
    }

    fn copy_n_cells(&mut self, dest: Coordinate, src: Coordinate, n: Coordinate) {
        for b in &mut self.buffers {
            b.copy_n_cells(dest, src, n);
        }
    }

    fn scroll_up(&mut self, start: Coordinate, end: Coordinate, n: Coordinate, fill: &CharacterCell) {
        for b in &mut self.buffers {
            b.scroll_up(start, end, n, fill);
        }
    }

    fn scroll_down(&mut self, start: Coordinate, end: Coordinate, n: Coordinate, fill: &CharacterCell) {
        for b in &mut self.buffers {
            b.scroll_down(start, end, n, fill);
        }
    }

    fn set_cursor_pos(&mut self, x: Coordinate, y: Coordinate) {
        for b in &mut self.buffers {
            b.set_cursor_pos(x, y);
        }
    }

    fn set_cursor_type(&mut self, glyph: CursorGlyph, attributes: CursorAttributes) {
        for b in &mut self.buffers {
            b.set_cursor_type(glyph, attributes);
        }
    }

    fn set_pointer_type(&mut self, attributes: PointerAttributes) {
        for b in &mut self.buffers {
            b.set_pointer_type(attributes);
        }
    }

    fn set_screen_flags(&mut self, flags: ScreenFlags) {
        for b in &mut self.buffers {
            b.set_screen_flags(flags);
        }
    }

    fn set_size(&mut self, width: Coordinate, height: Coordinate) {
        for b in &mut self.buffers {
            b.set_size(width, height);
        }
    }

    fn set_alt_buffer(&mut self, enabled: bool) {
        for b in &mut self.buffers {
            b.set_alt_buffer(enabled);
        }
    }
}

/// A clonable, lock-guarded buffer handle, for sharing one grid between
/// the emulator and a concurrent reader such as a renderer.
pub struct SharedScreenBuffer<B> {
    inner: Arc<Mutex<B>>,
}

impl<B> Clone for SharedScreenBuffer<B> {
    fn clone(&self) -> Self {
        SharedScreenBuffer {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<B> SharedScreenBuffer<B> {
    pub fn new(buffer: B) -> Self {
        SharedScreenBuffer {
            inner: Arc::new(Mutex::new(buffer)),
        }
    }

    pub fn lock(&self) -> parking_lot::MutexGuard<'_, B> {
        self.inner.lock()
    }
}

impl<B: ScreenBuffer> ScreenBuffer for SharedScreenBuffer<B> {
    fn read_cell(&self, pos: Coordinate) -> CharacterCell {
        self.inner.lock().read_cell(pos)
    }

    fn write_n_cells(&mut self, pos: Coordinate, n: Coordinate, cell: &CharacterCell) {
        self.inner.lock().write_n_cells(pos, n, cell);
    }

    fn modify_n_cells(
        &mut self,
        pos: Coordinate,
        n: Coordinate,
        turnoff: crate::CellAttributes,
        flipon: crate::CellAttributes,
        foreground: Option<crate::Colour>,
        background: Option<crate::Colour>,
    ) {
        self.inner.lock().modify_n_cells(pos, n, turnoff, flipon, foreground, background);
    }

    fn copy_n_cells(&mut self, dest: Coordinate, src: Coordinate, n: Coordinate) {
        self.inner.lock().copy_n_cells(dest, src, n);
    }

    fn scroll_up(&mut self, start: Coordinate, end: Coordinate, n: Coordinate, fill: &CharacterCell) {
        self.inner.lock().scroll_up(start, end, n, fill);
    }

    fn scroll_down(&mut self, start: Coordinate, end: Coordinate, n: Coordinate, fill: &CharacterCell) {
        self.inner.lock().scroll_down(start, end, n, fill);
    }

    fn set_cursor_pos(&mut self, x: Coordinate, y: Coordinate) {
        self.inner.lock().set_cursor_pos(x, y);
    }

    fn set_cursor_type(&mut self, glyph: CursorGlyph, attributes: CursorAttributes) {
        self.inner.lock().set_cursor_type(glyph, attributes);
    }

    fn set_pointer_type(&mut self, attributes: PointerAttributes) {
        self.inner.lock().set_pointer_type(attributes);
    }

    fn set_screen_flags(&mut self, flags: ScreenFlags) {
        self.inner.lock().set_screen_flags(flags);
    }

    fn set_size(&mut self, width: Coordinate, height: Coordinate) {
        self.inner.lock().set_size(width, height);
    }

    fn set_alt_buffer(&mut self, enabled: bool) {
        self.inner.lock().set_alt_buffer(enabled);
    }
}
