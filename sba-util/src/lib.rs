//! Small pieces shared by every crate in the SBA/SPIR-V toolkit: the
//! on-wire byte order, and the error type produced when a textual
//! mnemonic doesn't match any variant of an enumerant table.

use std::error::Error;
use std::fmt;

/// Byte order of the SPIR-V wire format (spec §4.5, §6).
pub type Endian = byteorder::LittleEndian;

/// Returned when a token fails to parse as a mnemonic of some enum.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct ParseEnumError {
    pub value: String,
    pub enum_name: &'static str,
}

impl fmt::Display for ParseEnumError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "\"{}\" is not a recognized {}",
            &self.value, &self.enum_name
        )
    }
}

impl Error for ParseEnumError {}

/// Implemented by fieldless enums whose variants are named after SPIR-V
/// registry mnemonics. Derived via `sba_util_derive::EnumFromStr`.
pub trait EnumFromStr: Sized {
    fn from_str(s: &str) -> Result<Self, ParseEnumError>;
}
