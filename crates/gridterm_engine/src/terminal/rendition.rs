//! Graphic rendition: SGR and the rectangular attribute-change form.

use gridterm_parser::ControlSequenceParams;

use super::TermState;
use crate::cell::{CellAttributes, Colour, ColourPair, BASE_PALETTE, XTERM_256_PALETTE};
use crate::keyboard::{KeyboardSink, MouseSink};
use crate::screen::ScreenBuffer;

impl<S: ScreenBuffer, K: KeyboardSink, M: MouseSink> TermState<S, K, M> {
    pub(super) fn select_graphic_rendition(&mut self, params: &mut ControlSequenceParams) {
        params.minimum_one_arg();
        let mut i = 0;
        while i < params.arg_count() {
            let code = params.this_if_empty(i, 0, 0);
            match code {
                0 => {
                    self.attributes = CellAttributes::empty();
                    self.colour = ColourPair::default();
                }
                1 => {
                    self.attributes |= CellAttributes::BOLD;
                    self.attributes -= CellAttributes::FAINT;
                }
                2 => {
                    self.attributes |= CellAttributes::FAINT;
                    self.attributes -= CellAttributes::BOLD;
                }
                3 => self.attributes |= CellAttributes::ITALIC,
                4 | 21 => self.attributes |= CellAttributes::UNDERLINE,
                5 | 6 => self.attributes |= CellAttributes::BLINK,
                7 => self.attributes |= CellAttributes::INVERSE,
                8 => self.attributes |= CellAttributes::INVISIBLE,
                9 => self.attributes |= CellAttributes::STRIKETHROUGH,
                22 => self.attributes -= CellAttributes::BOLD | CellAttributes::FAINT,
                23 => self.attributes -= CellAttributes::ITALIC,
                24 => self.attributes -= CellAttributes::UNDERLINE,
                25 => self.attributes -= CellAttributes::BLINK,
                27 => self.attributes -= CellAttributes::INVERSE,
                28 => self.attributes -= CellAttributes::INVISIBLE,
                29 => self.attributes -= CellAttributes::STRIKETHROUGH,
                30..=37 => self.colour.foreground = BASE_PALETTE[(code - 30) as usize],
                39 => self.colour.foreground = ColourPair::default().foreground,
                40..=47 => self.colour.background = BASE_PALETTE[(code - 40) as usize],
                49 => self.colour.background = ColourPair::default().background,
                90..=97 => self.colour.foreground = BASE_PALETTE[(code - 90 + 8) as usize],
                100..=107 => self.colour.background = BASE_PALETTE[(code - 100 + 8) as usize],
                38 | 48 => {
                    // The legacy semicolon form is pre-normalised into
                    // sub-arguments so both syntaxes read identically.
                    if params.subarg_count(i) <= 1 && params.has_no_subargs_from(i) {
                        params.collapse_to_subargs(i);
                    }
                    if let Some(colour) = extended_colour(params, i) {
                        if code == 38 {
                            self.colour.foreground = colour;
                        } else {
                            self.colour.background = colour;
                        }
                    }
                }
                n => log::debug!("ignored graphic rendition parameter {n}"),
            }
            i += 1;
        }
    }

    /// DECCARA: change attributes in a rectangular area without touching
    /// characters. Only the indexed attribute parameters apply.
    pub(super) fn change_area_attributes(&mut self, params: &mut ControlSequenceParams) {
        let height = u32::from(self.display_margin.h);
        let width = u32::from(self.display_margin.w);
        let top = params.one_if_zero_or_empty(0).min(height);
        let left = params.one_if_zero_or_empty(1).min(width);
        let bottom = params.this_if_zero_or_empty(2, height).min(height);
        let right = params.this_if_zero_or_empty(3, width).min(width);
        if top > bottom || left > right {
            return;
        }
        let mut turnoff = CellAttributes::empty();
        let mut flipon = CellAttributes::empty();
        for i in 4..params.arg_count().max(5) {
            match params.this_if_empty(i, 0, 0) {
                0 => {
                    turnoff = CellAttributes::all();
                    flipon = CellAttributes::empty();
                }
                1 => flipon |= CellAttributes::BOLD,
                4 => flipon |= CellAttributes::UNDERLINE,
                5 => flipon |= CellAttributes::BLINK,
                7 => flipon |= CellAttributes::INVERSE,
                22 => turnoff |= CellAttributes::BOLD,
                24 => turnoff |= CellAttributes::UNDERLINE,
                25 => turnoff |= CellAttributes::BLINK,
                27 => turnoff |= CellAttributes::INVERSE,
                n => log::debug!("ignored area attribute parameter {n}"),
            }
        }
        let band = (right - left + 1) as u16;
        for y in (top - 1)..bottom {
            let pos = self.addr((left - 1) as u16, y as u16);
            self.screen.modify_n_cells(pos, band, turnoff, flipon, None, None);
        }
    }
}

/// Decode an extended-colour parameter sublist: `38:5:n`, `38:2:r:g:b`, or
/// the ISO form with a colour-space identifier `38:2::r:g:b`.
fn extended_colour(params: &ControlSequenceParams, sub: usize) -> Option<Colour> {
    match params.this_if_empty(sub, 1, 0) {
        5 => {
            let index = params.this_if_empty(sub, 2, 0).min(255) as usize;
            Some(XTERM_256_PALETTE[index])
        }
        2 => {
            let base = if params.subarg_count(sub) >= 6 { 3 } else { 2 };
            let r = params.this_if_empty(sub, base, 0).min(255) as u8;
            let g = params.this_if_empty(sub, base + 1, 0).min(255) as u8;
            let b = params.this_if_empty(sub, base + 2, 0).min(255) as u8;
            Some(Colour::rgb(r, g, b))
        }
        n => {
            log::debug!("ignored extended colour selector {n}");
            None
        }
    }
}
