//! The Opcode Schema Table (OST, spec §3, §4.1). Static, process-lifetime
//! immutable data: for every supported mnemonic, its numeric SPIR-V
//! registry code, minimum word count (including the header word),
//! whether it admits trailing variadic operands, which enumerant tables
//! its remaining operands may be drawn from (in schema order, spec
//! §4.3 item 5), and which section it naturally belongs to before the
//! inside-function override of spec §4.1 is applied.
//!
//! `Opcode`'s discriminants are the real SPIR-V registry numbers, so the
//! wire code is recovered with a plain `as u16` cast; no lookup table is
//! needed for that direction. The reverse direction (numeric code ->
//! schema entry, used by the disassembler) and the mnemonic direction
//! (text -> schema entry, used by the assembler) are both linear scans
//! over `OPCODE_TABLE`, exactly as spec §3 allows ("small-N
//! constant-time-in-practice; implementers may hash").

use crate::model::Section;
use sba_util_derive::EnumFromStr;

/// One of the ~20 enumerant tables an operand position may draw from.
/// This is `EnumTableRef` from spec §3: in Rust, membership in a
/// `&'static [EnumTableKind]` slice plays the role the C sentinel played
/// in the source, since the slice already carries its own length.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum EnumTableKind {
    AddressingModel,
    MemoryModelKind,
    ExecutionModel,
    ExecutionModeKind,
    StorageClass,
    Dim,
    SamplerAddressingMode,
    SamplerFilterMode,
    ImageFormat,
    ImageChannelOrder,
    FPRoundingMode,
    LinkageType,
    AccessQualifier,
    Decoration,
    BuiltIn,
    Scope,
    GroupOperation,
    Capability,
    SelectionControl,
    LoopControl,
    FunctionControl,
    MemorySemantics,
    MemoryAccess,
}

/// Real SPIR-V registry opcodes this translator understands. Not
/// exhaustive of the ~400-opcode unified registry (spec §2's size
/// budget does not call for that); every family named in the spec
/// §4.1 routing table has at least one representative, and every
/// opcode exercised by the spec §8 boundary scenarios is present.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, EnumFromStr)]
#[repr(u16)]
pub enum Opcode {
    Nop = 0,
    Undef = 1,
    SourceContinued = 2,
    Source = 3,
    SourceExtension = 4,
    Name = 5,
    MemberName = 6,
    String = 7,
    Line = 8,
    Extension = 10,
    ExtInstImport = 11,
    ExtInst = 12,
    MemoryModel = 14,
    EntryPoint = 15,
    ExecutionMode = 16,
    Capability = 17,
    TypeVoid = 19,
    TypeBool = 20,
    TypeInt = 21,
    TypeFloat = 22,
    TypeVector = 23,
    TypeMatrix = 24,
    TypeImage = 25,
    TypeSampler = 26,
    TypeSampledImage = 27,
    TypeArray = 28,
    TypeRuntimeArray = 29,
    TypeStruct = 30,
    TypeOpaque = 31,
    TypePointer = 32,
    TypeFunction = 33,
    TypeEvent = 34,
    TypeDeviceEvent = 35,
    TypeReserveId = 36,
    TypeQueue = 37,
    TypePipe = 38,
    TypeForwardPointer = 39,
    ConstantTrue = 41,
    ConstantFalse = 42,
    Constant = 43,
    ConstantComposite = 44,
    ConstantSampler = 45,
    ConstantNull = 46,
    SpecConstantTrue = 48,
    SpecConstantFalse = 49,
    SpecConstant = 50,
    SpecConstantComposite = 51,
    Function = 54,
    FunctionParameter = 55,
    FunctionEnd = 56,
    FunctionCall = 57,
    Variable = 59,
    Load = 61,
    Store = 62,
    AccessChain = 65,
    InBoundsAccessChain = 66,
    Decorate = 71,
    MemberDecorate = 72,
    DecorationGroup = 73,
    GroupDecorate = 74,
    GroupMemberDecorate = 75,
    VectorShuffle = 79,
    CompositeConstruct = 80,
    CompositeExtract = 81,
    CompositeInsert = 82,
    ConvertFToU = 109,
    ConvertFToS = 110,
    ConvertSToF = 111,
    ConvertUToF = 112,
    Bitcast = 124,
    SNegate = 126,
    FNegate = 127,
    IAdd = 128,
    FAdd = 129,
    ISub = 130,
    FSub = 131,
    IMul = 132,
    FMul = 133,
    UDiv = 134,
    SDiv = 135,
    FDiv = 136,
    UMod = 137,
    SRem = 138,
    SMod = 139,
    FRem = 140,
    FMod = 141,
    LogicalEqual = 164,
    LogicalNotEqual = 165,
    LogicalOr = 166,
    LogicalAnd = 167,
    LogicalNot = 168,
    Select = 169,
    IEqual = 170,
    INotEqual = 171,
    UGreaterThan = 172,
    SGreaterThan = 173,
    UGreaterThanEqual = 174,
    SGreaterThanEqual = 175,
    ULessThan = 176,
    SLessThan = 177,
    ULessThanEqual = 178,
    SLessThanEqual = 179,
    FOrdEqual = 180,
    FUnordEqual = 181,
    FOrdNotEqual = 182,
    FUnordNotEqual = 183,
    FOrdLessThan = 184,
    FUnordLessThan = 185,
    FOrdGreaterThan = 186,
    FUnordGreaterThan = 187,
    FOrdLessThanEqual = 188,
    FUnordLessThanEqual = 189,
    FOrdGreaterThanEqual = 190,
    FUnordGreaterThanEqual = 191,
    ShiftRightLogical = 194,
    ShiftRightArithmetic = 195,
    ShiftLeftLogical = 196,
    BitwiseOr = 197,
    BitwiseXor = 198,
    BitwiseAnd = 199,
    Not = 200,
    Phi = 245,
    LoopMerge = 246,
    SelectionMerge = 247,
    Label = 248,
    Branch = 249,
    BranchConditional = 250,
    Switch = 251,
    Kill = 252,
    Return = 253,
    ReturnValue = 254,
    Unreachable = 255,
}

/// One row of the OST: `{ mnemonic, code, minWords, variadic,
/// enumTables }` plus the natural section the opcode belongs to.
pub struct OpcodeInfo {
    pub mnemonic: &'static str,
    pub opcode: Opcode,
    pub min_words: u16,
    pub variadic: bool,
    pub enum_tables: &'static [EnumTableKind],
    pub section: Section,
}

macro_rules! opcode_row {
    ($mnemonic:literal, $opcode:ident, $min_words:expr, $variadic:expr, [$($table:ident),*], $section:ident) => {
        OpcodeInfo {
            mnemonic: $mnemonic,
            opcode: Opcode::$opcode,
            min_words: $min_words,
            variadic: $variadic,
            enum_tables: &[$(EnumTableKind::$table),*],
            section: Section::$section,
        }
    };
}

pub static OPCODE_TABLE: &[OpcodeInfo] = &[
    opcode_row!("Nop", Nop, 1, false, [], Functions),
    opcode_row!("Undef", Undef, 3, false, [], Types),
    opcode_row!("SourceContinued", SourceContinued, 2, true, [], Debug),
    opcode_row!("Source", Source, 3, true, [], Debug),
    opcode_row!("SourceExtension", SourceExtension, 2, true, [], Debug),
    opcode_row!("Name", Name, 3, true, [], Debug),
    opcode_row!("MemberName", MemberName, 4, true, [], Debug),
    opcode_row!("String", String, 3, true, [], Debug),
    opcode_row!("Line", Line, 4, false, [], Types),
    opcode_row!("Extension", Extension, 2, true, [], Extensions),
    opcode_row!(
        "ExtInstImport",
        ExtInstImport,
        3,
        true,
        [],
        Imports
    ),
    opcode_row!("ExtInst", ExtInst, 5, true, [], Functions),
    opcode_row!(
        "MemoryModel",
        MemoryModel,
        3,
        false,
        [AddressingModel, MemoryModelKind],
        MemoryModel
    ),
    opcode_row!(
        "EntryPoint",
        EntryPoint,
        4,
        true,
        [ExecutionModel],
        EntryPoints
    ),
    opcode_row!(
        "ExecutionMode",
        ExecutionMode,
        3,
        true,
        [ExecutionModeKind],
        ExecutionModes
    ),
    opcode_row!(
        "Capability",
        Capability,
        2,
        false,
        [Capability],
        Capability
    ),
    opcode_row!("TypeVoid", TypeVoid, 2, false, [], Types),
    opcode_row!("TypeBool", TypeBool, 2, false, [], Types),
    opcode_row!("TypeInt", TypeInt, 4, false, [], Types),
    opcode_row!("TypeFloat", TypeFloat, 3, false, [], Types),
    opcode_row!("TypeVector", TypeVector, 4, false, [], Types),
    opcode_row!("TypeMatrix", TypeMatrix, 4, false, [], Types),
    opcode_row!(
        "TypeImage",
        TypeImage,
        9,
        true,
        [Dim, ImageFormat, AccessQualifier],
        Types
    ),
    opcode_row!(
        "TypeSampler",
        TypeSampler,
        2,
        false,
        [],
        Types
    ),
    opcode_row!(
        "TypeSampledImage",
        TypeSampledImage,
        3,
        false,
        [],
        Types
    ),
    opcode_row!("TypeArray", TypeArray, 4, false, [], Types),
    opcode_row!(
        "TypeRuntimeArray",
        TypeRuntimeArray,
        3,
        false,
        [],
        Types
    ),
    opcode_row!("TypeStruct", TypeStruct, 2, true, [], Types),
    opcode_row!("TypeOpaque", TypeOpaque, 2, true, [], Types),
    opcode_row!(
        "TypePointer",
        TypePointer,
        4,
        false,
        [StorageClass],
        Types
    ),
    opcode_row!(
        "TypeFunction",
        TypeFunction,
        3,
        true,
        [],
        Types
    ),
    opcode_row!("TypeEvent", TypeEvent, 2, false, [], Types),
    opcode_row!(
        "TypeDeviceEvent",
        TypeDeviceEvent,
        2,
        false,
        [],
        Types
    ),
    opcode_row!(
        "TypeReserveId",
        TypeReserveId,
        2,
        false,
        [],
        Types
    ),
    opcode_row!("TypeQueue", TypeQueue, 2, false, [], Types),
    opcode_row!("TypePipe", TypePipe, 3, false, [AccessQualifier], Types),
    opcode_row!(
        "TypeForwardPointer",
        TypeForwardPointer,
        3,
        false,
        [StorageClass],
        Types
    ),
    opcode_row!(
        "ConstantTrue",
        ConstantTrue,
        3,
        false,
        [],
        Types
    ),
    opcode_row!(
        "ConstantFalse",
        ConstantFalse,
        3,
        false,
        [],
        Types
    ),
    opcode_row!("Constant", Constant, 4, true, [], Types),
    opcode_row!(
        "ConstantComposite",
        ConstantComposite,
        3,
        true,
        [],
        Types
    ),
    opcode_row!(
        "ConstantSampler",
        ConstantSampler,
        6,
        false,
        [SamplerAddressingMode, SamplerFilterMode],
        Types
    ),
    opcode_row!(
        "ConstantNull",
        ConstantNull,
        3,
        false,
        [],
        Types
    ),
    opcode_row!(
        "SpecConstantTrue",
        SpecConstantTrue,
        3,
        false,
        [],
        Types
    ),
    opcode_row!(
        "SpecConstantFalse",
        SpecConstantFalse,
        3,
        false,
        [],
        Types
    ),
    opcode_row!(
        "SpecConstant",
        SpecConstant,
        4,
        true,
        [],
        Types
    ),
    opcode_row!(
        "SpecConstantComposite",
        SpecConstantComposite,
        3,
        true,
        [],
        Types
    ),
    opcode_row!(
        "Function",
        Function,
        5,
        false,
        [FunctionControl],
        Functions
    ),
    opcode_row!(
        "FunctionParameter",
        FunctionParameter,
        3,
        false,
        [],
        Functions
    ),
    opcode_row!(
        "FunctionEnd",
        FunctionEnd,
        1,
        false,
        [],
        Functions
    ),
    opcode_row!(
        "FunctionCall",
        FunctionCall,
        4,
        true,
        [],
        Functions
    ),
    opcode_row!(
        "Variable",
        Variable,
        4,
        true,
        [StorageClass],
        Types
    ),
    opcode_row!("Load", Load, 4, true, [MemoryAccess], Functions),
    opcode_row!("Store", Store, 3, true, [MemoryAccess], Functions),
    opcode_row!(
        "AccessChain",
        AccessChain,
        4,
        true,
        [],
        Functions
    ),
    opcode_row!(
        "InBoundsAccessChain",
        InBoundsAccessChain,
        4,
        true,
        [],
        Functions
    ),
    opcode_row!(
        "Decorate",
        Decorate,
        3,
        true,
        [Decoration],
        Annotations
    ),
    opcode_row!(
        "MemberDecorate",
        MemberDecorate,
        4,
        true,
        [Decoration],
        Annotations
    ),
    opcode_row!(
        "DecorationGroup",
        DecorationGroup,
        2,
        false,
        [],
        Annotations
    ),
    opcode_row!(
        "GroupDecorate",
        GroupDecorate,
        2,
        true,
        [],
        Annotations
    ),
    opcode_row!(
        "GroupMemberDecorate",
        GroupMemberDecorate,
        2,
        true,
        [],
        Annotations
    ),
    opcode_row!(
        "VectorShuffle",
        VectorShuffle,
        5,
        true,
        [],
        Functions
    ),
    opcode_row!(
        "CompositeConstruct",
        CompositeConstruct,
        3,
        true,
        [],
        Functions
    ),
    opcode_row!(
        "CompositeExtract",
        CompositeExtract,
        4,
        true,
        [],
        Functions
    ),
    opcode_row!(
        "CompositeInsert",
        CompositeInsert,
        5,
        true,
        [],
        Functions
    ),
    opcode_row!(
        "ConvertFToU",
        ConvertFToU,
        4,
        false,
        [],
        Functions
    ),
    opcode_row!(
        "ConvertFToS",
        ConvertFToS,
        4,
        false,
        [],
        Functions
    ),
    opcode_row!(
        "ConvertSToF",
        ConvertSToF,
        4,
        false,
        [],
        Functions
    ),
    opcode_row!(
        "ConvertUToF",
        ConvertUToF,
        4,
        false,
        [],
        Functions
    ),
    opcode_row!("Bitcast", Bitcast, 4, false, [], Functions),
    opcode_row!("SNegate", SNegate, 4, false, [], Functions),
    opcode_row!("FNegate", FNegate, 4, false, [], Functions),
    opcode_row!("IAdd", IAdd, 5, false, [], Functions),
    opcode_row!("FAdd", FAdd, 5, false, [], Functions),
    opcode_row!("ISub", ISub, 5, false, [], Functions),
    opcode_row!("FSub", FSub, 5, false, [], Functions),
    opcode_row!("IMul", IMul, 5, false, [], Functions),
    opcode_row!("FMul", FMul, 5, false, [], Functions),
    opcode_row!("UDiv", UDiv, 5, false, [], Functions),
    opcode_row!("SDiv", SDiv, 5, false, [], Functions),
    opcode_row!("FDiv", FDiv, 5, false, [], Functions),
    opcode_row!("UMod", UMod, 5, false, [], Functions),
    opcode_row!("SRem", SRem, 5, false, [], Functions),
    opcode_row!("SMod", SMod, 5, false, [], Functions),
    opcode_row!("FRem", FRem, 5, false, [], Functions),
    opcode_row!("FMod", FMod, 5, false, [], Functions),
    opcode_row!(
        "LogicalEqual",
        LogicalEqual,
        5,
        false,
        [],
        Functions
    ),
    opcode_row!(
        "LogicalNotEqual",
        LogicalNotEqual,
        5,
        false,
        [],
        Functions
    ),
    opcode_row!("LogicalOr", LogicalOr, 5, false, [], Functions),
    opcode_row!(
        "LogicalAnd",
        LogicalAnd,
        5,
        false,
        [],
        Functions
    ),
    opcode_row!(
        "LogicalNot",
        LogicalNot,
        4,
        false,
        [],
        Functions
    ),
    opcode_row!("Select", Select, 6, false, [], Functions),
    opcode_row!("IEqual", IEqual, 5, false, [], Functions),
    opcode_row!("INotEqual", INotEqual, 5, false, [], Functions),
    opcode_row!(
        "UGreaterThan",
        UGreaterThan,
        5,
        false,
        [],
        Functions
    ),
    opcode_row!(
        "SGreaterThan",
        SGreaterThan,
        5,
        false,
        [],
        Functions
    ),
    opcode_row!(
        "UGreaterThanEqual",
        UGreaterThanEqual,
        5,
        false,
        [],
        Functions
    ),
    opcode_row!(
        "SGreaterThanEqual",
        SGreaterThanEqual,
        5,
        false,
        [],
        Functions
    ),
    opcode_row!("ULessThan", ULessThan, 5, false, [], Functions),
    opcode_row!("SLessThan", SLessThan, 5, false, [], Functions),
    opcode_row!(
        "ULessThanEqual",
        ULessThanEqual,
        5,
        false,
        [],
        Functions
    ),
    opcode_row!(
        "SLessThanEqual",
        SLessThanEqual,
        5,
        false,
        [],
        Functions
    ),
    opcode_row!("FOrdEqual", FOrdEqual, 5, false, [], Functions),
    opcode_row!(
        "FUnordEqual",
        FUnordEqual,
        5,
        false,
        [],
        Functions
    ),
    opcode_row!(
        "FOrdNotEqual",
        FOrdNotEqual,
        5,
        false,
        [],
        Functions
    ),
    opcode_row!(
        "FUnordNotEqual",
        FUnordNotEqual,
        5,
        false,
        [],
        Functions
    ),
    opcode_row!(
        "FOrdLessThan",
        FOrdLessThan,
        5,
        false,
        [],
        Functions
    ),
    opcode_row!(
        "FUnordLessThan",
        FUnordLessThan,
        5,
        false,
        [],
        Functions
    ),
    opcode_row!(
        "FOrdGreaterThan",
        FOrdGreaterThan,
        5,
        false,
        [],
        Functions
    ),
    opcode_row!(
        "FUnordGreaterThan",
        FUnordGreaterThan,
        5,
        false,
        [],
        Functions
    ),
    opcode_row!(
        "FOrdLessThanEqual",
        FOrdLessThanEqual,
        5,
        false,
        [],
        Functions
    ),
    opcode_row!(
        "FUnordLessThanEqual",
        FUnordLessThanEqual,
        5,
        false,
        [],
        Functions
    ),
    opcode_row!(
        "FOrdGreaterThanEqual",
        FOrdGreaterThanEqual,
        5,
        false,
        [],
        Functions
    ),
    opcode_row!(
        "FUnordGreaterThanEqual",
        FUnordGreaterThanEqual,
        5,
        false,
        [],
        Functions
    ),
    opcode_row!(
        "ShiftRightLogical",
        ShiftRightLogical,
        5,
        false,
        [],
        Functions
    ),
    opcode_row!(
        "ShiftRightArithmetic",
        ShiftRightArithmetic,
        5,
        false,
        [],
        Functions
    ),
    opcode_row!(
        "ShiftLeftLogical",
        ShiftLeftLogical,
        5,
        false,
        [],
        Functions
    ),
    opcode_row!("BitwiseOr", BitwiseOr, 5, false, [], Functions),
    opcode_row!(
        "BitwiseXor",
        BitwiseXor,
        5,
        false,
        [],
        Functions
    ),
    opcode_row!(
        "BitwiseAnd",
        BitwiseAnd,
        5,
        false,
        [],
        Functions
    ),
    opcode_row!("Not", Not, 4, false, [], Functions),
    opcode_row!("Phi", Phi, 3, true, [], Functions),
    opcode_row!(
        "LoopMerge",
        LoopMerge,
        4,
        true,
        [LoopControl],
        Functions
    ),
    opcode_row!(
        "SelectionMerge",
        SelectionMerge,
        3,
        false,
        [SelectionControl],
        Functions
    ),
    opcode_row!("Label", Label, 2, false, [], Functions),
    opcode_row!("Branch", Branch, 2, false, [], Functions),
    opcode_row!(
        "BranchConditional",
        BranchConditional,
        4,
        true,
        [],
        Functions
    ),
    opcode_row!("Switch", Switch, 3, true, [], Functions),
    opcode_row!("Kill", Kill, 1, false, [], Functions),
    opcode_row!("Return", Return, 1, false, [], Functions),
    opcode_row!(
        "ReturnValue",
        ReturnValue,
        2,
        false,
        [],
        Functions
    ),
    opcode_row!(
        "Unreachable",
        Unreachable,
        1,
        false,
        [],
        Functions
    ),
];

/// Looks up an opcode's schema row by mnemonic (assemble direction).
/// Linear scan, per spec §3.
pub fn lookup_mnemonic(mnemonic: &str) -> Option<&'static OpcodeInfo> {
    OPCODE_TABLE.iter().find(|info| info.mnemonic == mnemonic)
}

/// Looks up an opcode's schema row by wire code (disassemble direction).
/// Linear scan, per spec §3.
pub fn lookup_code(code: u16) -> Option<&'static OpcodeInfo> {
    OPCODE_TABLE
        .iter()
        .find(|info| info.opcode as u16 == code)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn table_has_no_duplicate_mnemonics_or_codes() {
        let mut mnemonics: Vec<&str> = OPCODE_TABLE.iter().map(|i| i.mnemonic).collect();
        mnemonics.sort_unstable();
        mnemonics.dedup();
        assert_eq!(mnemonics.len(), OPCODE_TABLE.len());

        let mut codes: Vec<u16> = OPCODE_TABLE.iter().map(|i| i.opcode as u16).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), OPCODE_TABLE.len());
    }

    #[test]
    fn lookup_mnemonic_and_code_agree() {
        for info in OPCODE_TABLE {
            let by_mnemonic = lookup_mnemonic(info.mnemonic).unwrap();
            assert_eq!(by_mnemonic.opcode, info.opcode);
            let by_code = lookup_code(info.opcode as u16).unwrap();
            assert_eq!(by_code.mnemonic, info.mnemonic);
        }
    }

    #[test]
    fn min_words_is_at_least_the_header_word() {
        for info in OPCODE_TABLE {
            assert!(info.min_words >= 1);
        }
    }
}
