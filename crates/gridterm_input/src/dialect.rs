//! Terminal dialect selection and the SCO function-key letter machinery.

use crate::event::Modifiers;

/// The wire-format variant the encoder produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub enum Dialect {
    #[default]
    DecVt,
    ScoConsole,
    LinuxConsole,
    NetBsdConsole,
    Teken,
    XtermPc,
}

impl Dialect {
    /// The kernel consoles that treat SU/SD as buffer scrolls rather than
    /// window pans; mirrors the display engine's Setup flag.
    pub fn pan_is_scroll(self) -> bool {
        matches!(self, Dialect::LinuxConsole | Dialect::Teken)
    }
}

/// The SCO-derived function-key final character, as it lingers in the
/// FreeBSD console: F1..F14 map to `M`..`Z`, the folded bands continue
/// through the letters and a tail of punctuation. There is no F0.
pub fn sco_function_key_char(k: u16) -> Option<u8> {
    const TAIL: &[u8; 8] = b"@[\\]^_`{";
    match k {
        1..=14 => Some(b'M' + (k - 1) as u8),
        15..=40 => Some(b'a' + (k - 15) as u8),
        41..=48 => Some(TAIL[usize::from(k - 41)]),
        _ => None,
    }
}

/// Fold modifiers into an SCO function-key number: the console encodes
/// them by offsetting in 12-key bands.
pub fn fold_function_key(k: u16, modifiers: Modifiers) -> u16 {
    let mut k = k;
    if modifiers.contains(Modifiers::LEVEL2) {
        k += 12;
    }
    if modifiers.contains(Modifiers::CONTROL) {
        k += 24;
    }
    // The remaining bands are extensions beyond the 48-key table.
    if modifiers.contains(Modifiers::LEVEL3) {
        k += 48;
    }
    if modifiers.contains(Modifiers::GROUP2) {
        k += 96;
    }
    if modifiers.contains(Modifiers::SUPER) {
        k += 192;
    }
    k
}

/// Invert [`fold_function_key`] by successive subtraction.
pub fn unfold_function_key(mut k: u16) -> (u16, Modifiers) {
    let mut modifiers = Modifiers::empty();
    if k > 192 {
        k -= 192;
        modifiers |= Modifiers::SUPER;
    }
    if k > 96 {
        k -= 96;
        modifiers |= Modifiers::GROUP2;
    }
    if k > 48 {
        k -= 48;
        modifiers |= Modifiers::LEVEL3;
    }
    if k > 24 {
        k -= 24;
        modifiers |= Modifiers::CONTROL;
    }
    if k > 12 {
        k -= 12;
        modifiers |= Modifiers::LEVEL2;
    }
    (k, modifiers)
}
