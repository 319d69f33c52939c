//! Shared SPIR-V data model: the Opcode Schema Table, the ~20 enumerant
//! tables, the Identifier Table, the Assembly Model, and the Binary
//! Codec. Consumed by `sba-asm`'s textual front end and `sba-cli`'s
//! command-line front end.

pub mod codec;
pub mod enums;
pub mod idtable;
pub mod model;
pub mod opcode;

pub use codec::{bake, decode, DecodeError, ReadModuleExt, WriteModuleExt};
pub use idtable::{IdentifierEntry, IdentifierTable, IdentifierTooLong, MAX_IDENTIFIER_LEN};
pub use model::{Instruction, Module, ModuleHeader, Section, SectionRouter, MAGIC, SECTION_COUNT, SECTION_ORDER};
pub use opcode::{lookup_code, lookup_mnemonic, EnumTableKind, Opcode, OpcodeInfo, OPCODE_TABLE};
