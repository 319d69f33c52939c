//! The session-scoped error type (spec §7): one variant per error
//! category. Lexical/Arity/Enumerant failures are reported through the
//! `Diagnostics` sink during `assemble` (spec §7's "collected, not
//! thrown" policy) rather than through this type; `Error` is what
//! `disassemble` returns directly, since a Structural failure leaves no
//! usable partial model to keep collecting diagnostics against (spec
//! §4.4: "fails otherwise"). Grounded on `vasm/src/error.rs`'s
//! `ParseError`/`AssembleError` split, generalized from two ad hoc
//! variants to the five categories spec §7 actually names.

use spirv_ir::DecodeError;
use std::fmt;

#[derive(Debug)]
pub enum Error {
    Lexical(String),
    Arity(String),
    Enumerant(String),
    Structural(DecodeError),
    Resource(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Lexical(msg) => write!(f, "lexical error: {}", msg),
            Error::Arity(msg) => write!(f, "arity error: {}", msg),
            Error::Enumerant(msg) => write!(f, "enumerant error: {}", msg),
            Error::Structural(err) => write!(f, "structural error: {}", err),
            Error::Resource(msg) => write!(f, "resource error: {}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Structural(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DecodeError> for Error {
    fn from(err: DecodeError) -> Self {
        Error::Structural(err)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
