//! Core stream-decoding infrastructure: the UTF-8 codec, the ECMA-48
//! state machine, and the control-sequence parameter accumulator.
//!
//! The crate deals in decoded UCS code points. Bytes enter through
//! [`Utf8Decoder`], whose output feeds [`Ecma48Decoder::process`]; the
//! decoder classifies the stream and reports it to an [`Ecma48Sink`].

pub mod control_codes;

mod utf8;
pub use utf8::*;

mod params;
pub use params::*;

mod decoder;
pub use decoder::*;
