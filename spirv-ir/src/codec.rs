//! The Binary Codec (BC, spec §4.5, §6): bakes a `Module` to the
//! canonical little-endian SPIR-V byte stream, and decodes the same
//! stream back into a `Module`. Grounded on `vex/src/lib.rs`'s
//! `read`/`write` + `ReadVexExt`/`WriteVexExt` pattern, generalized from
//! a flat two-blob container to SPIR-V's length-prefixed instruction
//! stream.

use crate::model::{Instruction, Module, ModuleHeader, Section, SECTION_ORDER, MAGIC};
use byteorder::{ByteOrder, NativeEndian, ReadBytesExt, WriteBytesExt};
use sba_util::Endian;
use std::fmt;
use std::io::{self, Cursor, Read, Write};

/// The three structural decode failures of spec §7 category 4.
#[derive(Debug)]
pub enum DecodeError {
    MagicMismatch { found: u32 },
    ZeroWordCount { at_word: usize },
    Truncated { at_word: usize, expected: usize },
    Io(io::Error),
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DecodeError::MagicMismatch { found } => {
                write!(f, "bad magic: expected {:#010x}, found {:#010x}", MAGIC, found)
            }
            DecodeError::ZeroWordCount { at_word } => {
                write!(f, "zero word count for instruction starting at word {}", at_word)
            }
            DecodeError::Truncated { at_word, expected } => write!(
                f,
                "stream truncated at word {}: expected {} more words",
                at_word, expected
            ),
            DecodeError::Io(err) => write!(f, "i/o error: {}", err),
        }
    }
}

impl std::error::Error for DecodeError {}

impl From<io::Error> for DecodeError {
    fn from(err: io::Error) -> Self {
        DecodeError::Io(err)
    }
}

/// Bakes a module to its canonical byte stream (spec §4.5): header words
/// first, then each section in wire order, each instruction as a header
/// word `(wordCount << 16) | opcode` followed by its operand words
/// verbatim, all little-endian regardless of host endianness.
pub fn bake(module: &Module) -> Vec<u8> {
    let mut out = Vec::with_capacity(20 + module.instruction_count() * 8);
    write_header(&mut out, &module.header);

    for section in SECTION_ORDER {
        for instruction in module.section(section) {
            let header_word = ((instruction.word_count() as u32) << 16) | instruction.opcode as u32;
            out.write_u32::<Endian>(header_word).expect("vec write cannot fail");
            for &word in &instruction.words {
                out.write_u32::<Endian>(word).expect("vec write cannot fail");
            }
        }
    }

    out
}

fn write_header(out: &mut Vec<u8>, header: &ModuleHeader) {
    out.write_u32::<Endian>(header.magic).unwrap();
    out.write_u32::<Endian>(header.version).unwrap();
    out.write_u32::<Endian>(header.generator).unwrap();
    out.write_u32::<Endian>(header.bounds).unwrap();
    out.write_u32::<Endian>(header.schema).unwrap();
}

/// Decodes a byte stream into a `Module` (spec §4.4). Every instruction
/// is routed to its section with the same `SectionRouter` the line
/// parser uses, so assemble and disassemble cannot disagree about
/// placement.
pub fn decode(bytes: &[u8]) -> Result<Module, DecodeError> {
    let mut cursor = Cursor::new(bytes);
    let word_len = bytes.len() / 4;

    let magic = cursor.read_u32::<Endian>()?;
    if magic != MAGIC {
        return Err(DecodeError::MagicMismatch { found: magic });
    }
    let header = ModuleHeader {
        magic,
        version: cursor.read_u32::<Endian>()?,
        generator: cursor.read_u32::<Endian>()?,
        bounds: cursor.read_u32::<Endian>()?,
        schema: cursor.read_u32::<Endian>()?,
    };

    let mut module = Module::new(header);
    let mut router = crate::model::SectionRouter::new();
    let mut word_index = 5usize;

    while word_index < word_len {
        let leading = cursor.read_u32::<Endian>()?;
        let opcode = (leading & 0xFFFF) as u16;
        let word_count = (leading >> 16) as u16;
        if word_count == 0 {
            return Err(DecodeError::ZeroWordCount { at_word: word_index });
        }

        let operand_count = word_count as usize - 1;
        if word_index + 1 + operand_count > word_len {
            return Err(DecodeError::Truncated {
                at_word: word_index,
                expected: operand_count,
            });
        }

        let mut words = Vec::with_capacity(operand_count);
        for _ in 0..operand_count {
            words.push(cursor.read_u32::<Endian>()?);
        }
        word_index += word_count as usize;

        let instruction = Instruction::new(opcode, words);
        let section = match crate::opcode::lookup_code(opcode) {
            Some(info) => router.route(info),
            // Unknown opcode: the disassembler does not validate
            // semantics (spec §1's non-goals), it still has to place the
            // instruction somewhere; Functions is the catch-all family
            // in the routing table (spec §4.1's "everything else").
            None => Section::Functions,
        };
        module.deposit(section, instruction);
    }

    Ok(module)
}

/// Writer extension mirroring `vex`'s `WriteVexExt`.
pub trait WriteModuleExt: Write + Sized {
    fn write_module(&mut self, module: &Module) -> io::Result<()> {
        self.write_all(&bake(module))
    }
}

impl<W: Write + Sized> WriteModuleExt for W {}

/// Reader extension mirroring `vex`'s `ReadVexExt`.
pub trait ReadModuleExt: Read + Sized {
    fn read_module(&mut self) -> io::Result<Module> {
        let mut bytes = Vec::new();
        self.read_to_end(&mut bytes)?;
        decode(&bytes).map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))
    }
}

impl<R: Read + Sized> ReadModuleExt for R {}

/// Byte-swaps a little-endian-encoded stream in place if run on a
/// big-endian host, leaving it untouched on little-endian hosts (spec
/// §4.5, §9). `bake`/`decode` already use an explicit little-endian byte
/// order so this is rarely needed directly, but is exposed for callers
/// that memory-map a module and need host-order words.
pub fn to_host_order_words(bytes: &[u8]) -> Vec<u32> {
    let mut words = vec![0u32; bytes.len() / 4];
    NativeEndian::read_u32_into(
        &{
            if cfg!(target_endian = "big") {
                let mut swapped = bytes.to_vec();
                for chunk in swapped.chunks_exact_mut(4) {
                    chunk.reverse();
                }
                swapped
            } else {
                bytes.to_vec()
            }
        },
        &mut words,
    );
    words
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::model::ModuleHeader;

    #[test]
    fn empty_module_bakes_to_header_only() {
        let module = Module::new(ModuleHeader::new(0));
        let bytes = bake(&module);
        assert_eq!(bytes.len(), 20);
        assert_eq!(&bytes[0..4], &[0x03, 0x02, 0x23, 0x07]);
    }

    #[test]
    fn decode_rejects_bad_magic() {
        let bytes = [0u8; 20];
        assert!(matches!(decode(&bytes), Err(DecodeError::MagicMismatch { .. })));
    }

    #[test]
    fn decode_rejects_zero_word_count() {
        let header = ModuleHeader::new(1);
        let mut bytes = Vec::new();
        write_header(&mut bytes, &header);
        // Leading word with wordCount = 0, opcode = Capability (17).
        bytes.write_u32::<Endian>(17).unwrap();
        assert!(matches!(decode(&bytes), Err(DecodeError::ZeroWordCount { .. })));
    }

    #[test]
    fn decode_rejects_truncation() {
        let mut module = Module::new(ModuleHeader::new(1));
        module.deposit(
            Section::MemoryModel,
            Instruction::new(14, vec![0, 3]),
        );
        let mut bytes = bake(&module);
        bytes.truncate(bytes.len() - 4);
        assert!(matches!(decode(&bytes), Err(DecodeError::Truncated { .. })));
    }

    #[test]
    fn bake_then_decode_round_trips() {
        let mut module = Module::new(ModuleHeader::new(2));
        module.deposit(Section::Capability, Instruction::new(17, vec![1]));
        module.deposit(
            Section::MemoryModel,
            Instruction::new(14, vec![0, 3]),
        );
        let bytes = bake(&module);
        let decoded = decode(&bytes).unwrap();
        assert_eq!(decoded.header, module.header);
        assert_eq!(decoded.section(Section::Capability), module.section(Section::Capability));
        assert_eq!(decoded.section(Section::MemoryModel), module.section(Section::MemoryModel));
    }
}
