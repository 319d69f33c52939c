//! The Assembly Model (AM, spec §3, §4.1): a header plus the ten ordered
//! instruction sections of a SPIR-V module, and an `Instruction` made of
//! an opcode plus its operand words.

use crate::opcode::{Opcode, OpcodeInfo};

/// The fixed partition of a module's instructions, in prescribed wire
/// order (spec §2, §4.1).
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[repr(usize)]
pub enum Section {
    Capability = 0,
    Extensions = 1,
    Imports = 2,
    MemoryModel = 3,
    EntryPoints = 4,
    ExecutionModes = 5,
    Debug = 6,
    Annotations = 7,
    Types = 8,
    Functions = 9,
}

pub const SECTION_COUNT: usize = 10;

/// Every `Section` in canonical wire order (spec §2, §4.5).
pub const SECTION_ORDER: [Section; SECTION_COUNT] = [
    Section::Capability,
    Section::Extensions,
    Section::Imports,
    Section::MemoryModel,
    Section::EntryPoints,
    Section::ExecutionModes,
    Section::Debug,
    Section::Annotations,
    Section::Types,
    Section::Functions,
];

/// One instruction: an opcode and its operand words (spec §3). The
/// on-wire `wordCount` is `1 + words.len()` by construction rather than
/// a separately stored, separately-checked field.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Instruction {
    pub opcode: u16,
    pub words: Vec<u32>,
}

impl Instruction {
    pub fn new(opcode: u16, words: Vec<u32>) -> Self {
        Instruction { opcode, words }
    }

    /// The on-wire word count, including the header word itself.
    pub fn word_count(&self) -> u16 {
        1 + self.words.len() as u16
    }
}

/// The five header words common to every module (spec §3, §6).
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct ModuleHeader {
    pub magic: u32,
    pub version: u32,
    pub generator: u32,
    pub bounds: u32,
    pub schema: u32,
}

/// The SPIR-V magic number (spec §3, §6).
pub const MAGIC: u32 = 0x0723_0203;

/// Default version stamp: major 1, minor 0 (spec §1, §4.5, §6).
pub const DEFAULT_VERSION: u32 = 0x0001_0000;

/// Opaque-to-consumers default generator id (spec §6).
pub const DEFAULT_GENERATOR: u32 = 0;

impl ModuleHeader {
    pub fn new(bounds: u32) -> Self {
        ModuleHeader {
            magic: MAGIC,
            version: DEFAULT_VERSION,
            generator: DEFAULT_GENERATOR,
            bounds,
            schema: 0,
        }
    }
}

/// The in-memory module: a header plus the ten ordered sections (spec
/// §3). Sections are a fixed-size array indexed by `Section as usize`.
#[derive(Clone, Debug)]
pub struct Module {
    pub header: ModuleHeader,
    sections: [Vec<Instruction>; SECTION_COUNT],
}

impl Module {
    pub fn new(header: ModuleHeader) -> Self {
        Module {
            header,
            sections: std::array::from_fn(|_| Vec::new()),
        }
    }

    pub fn section(&self, section: Section) -> &[Instruction] {
        &self.sections[section as usize]
    }

    pub fn section_mut(&mut self, section: Section) -> &mut Vec<Instruction> {
        &mut self.sections[section as usize]
    }

    pub fn deposit(&mut self, section: Section, instruction: Instruction) {
        self.sections[section as usize].push(instruction);
    }

    /// Total instruction count across every section, in wire order.
    pub fn instruction_count(&self) -> usize {
        SECTION_ORDER.iter().map(|s| self.section(*s).len()).sum()
    }

    /// Total on-wire word count of every instruction (excluding the
    /// five header words), i.e. the baked byte size is
    /// `5 + total_word_count()` words (spec §4.5, §8 boundary scenario 2).
    pub fn total_word_count(&self) -> usize {
        SECTION_ORDER
            .iter()
            .flat_map(|s| self.section(*s))
            .map(|instr| instr.word_count() as usize)
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.instruction_count() == 0
    }
}

/// Tracks the single "inside function" boolean of spec §4.1 and decides
/// the destination section for one opcode. Shared by the assemble-path
/// line parser and the disassemble-path word-stream decoder so the two
/// directions cannot drift apart (spec §9's complaint about duplicated,
/// drifting logic).
#[derive(Default)]
pub struct SectionRouter {
    inside_function: bool,
}

impl SectionRouter {
    pub fn new() -> Self {
        SectionRouter {
            inside_function: false,
        }
    }

    pub fn route(&mut self, info: &OpcodeInfo) -> Section {
        if info.opcode == Opcode::Function {
            self.inside_function = true;
            return Section::Functions;
        }
        if info.opcode == Opcode::FunctionEnd {
            self.inside_function = false;
            return Section::Functions;
        }
        if self.inside_function {
            Section::Functions
        } else {
            info.section
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::opcode::lookup_mnemonic;

    #[test]
    fn variable_is_dual_placed_by_the_inside_function_flag() {
        let mut router = SectionRouter::new();
        let variable = lookup_mnemonic("Variable").unwrap();
        assert_eq!(router.route(variable), Section::Types);

        let function = lookup_mnemonic("Function").unwrap();
        router.route(function);
        assert_eq!(router.route(variable), Section::Functions);

        let function_end = lookup_mnemonic("FunctionEnd").unwrap();
        router.route(function_end);
        assert_eq!(router.route(variable), Section::Types);
    }

    #[test]
    fn word_count_is_one_plus_operand_words() {
        let instr = Instruction::new(17, vec![1]);
        assert_eq!(instr.word_count(), 2);
    }
}
