//! The ~20 enumerant tables referenced by opcode operands (spec §3, §4.3
//! item 5, §6). Each table is a fieldless enum whose discriminants are
//! the literal SPIR-V registry values, so converting an enumerant to its
//! operand word is just `value as u32`. Mnemonic parsing is provided by
//! `#[derive(EnumFromStr)]`, which matches the variant identifier
//! verbatim against the uppercase-normalized token (see
//! `crate::opcode::lookup_enumerant`).
//!
//! Aliases (spec §6, e.g. a `*KHR` suffix) are separate variants sharing
//! their base variant's discriminant; Rust permits this on fieldless
//! enums, so no separate alias table is needed.

use crate::opcode::EnumTableKind;
use sba_util_derive::EnumFromStr;

macro_rules! enumerant_table {
    (
        $(#[$meta:meta])*
        $name:ident { $( $(#[$vmeta:meta])* $variant:ident = $value:expr ),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Debug, EnumFromStr)]
        #[repr(u32)]
        pub enum $name {
            $( $(#[$vmeta])* $variant = $value ),+
        }

        impl $name {
            pub fn value(self) -> u32 {
                self as u32
            }
        }
    };
}

enumerant_table! {
    /// `OpMemoryModel`'s first operand.
    AddressingModel {
        Logical = 0,
        Physical32 = 1,
        Physical64 = 2,
        PhysicalStorageBuffer64 = 5348,
        PhysicalStorageBuffer64EXT = 5348,
    }
}

enumerant_table! {
    /// `OpMemoryModel`'s second operand.
    MemoryModelKind {
        Simple = 0,
        GLSL450 = 1,
        OpenCL = 2,
        Vulkan = 3,
        VulkanKHR = 3,
    }
}

enumerant_table! {
    /// `OpEntryPoint`'s first operand.
    ExecutionModel {
        Vertex = 0,
        TessellationControl = 1,
        TessellationEvaluation = 2,
        Geometry = 3,
        Fragment = 4,
        GLCompute = 5,
        Kernel = 6,
        TaskNV = 5267,
        MeshNV = 5268,
        RayGenerationKHR = 5313,
        IntersectionKHR = 5314,
        AnyHitKHR = 5315,
        ClosestHitKHR = 5316,
        MissKHR = 5317,
        CallableKHR = 5318,
    }
}

enumerant_table! {
    /// `OpExecutionMode`/`OpExecutionModeId`'s mode operand.
    ExecutionModeKind {
        Invocations = 0,
        SpacingEqual = 1,
        SpacingFractionalEven = 2,
        SpacingFractionalOdd = 3,
        VertexOrderCw = 4,
        VertexOrderCcw = 5,
        PixelCenterInteger = 6,
        OriginUpperLeft = 7,
        OriginLowerLeft = 8,
        EarlyFragmentTests = 9,
        PointMode = 10,
        Xfb = 11,
        DepthReplacing = 12,
        DepthGreater = 14,
        DepthLess = 15,
        DepthUnchanged = 16,
        LocalSize = 17,
        LocalSizeHint = 18,
        InputPoints = 19,
        InputLines = 20,
        InputLinesAdjacency = 21,
        Triangles = 22,
        InputTrianglesAdjacency = 23,
        Quads = 24,
        Isolines = 25,
        OutputVertices = 26,
        OutputPoints = 27,
        OutputLineStrip = 28,
        OutputTriangleStrip = 29,
        VecTypeHint = 30,
        ContractionOff = 31,
        LocalSizeId = 38,
    }
}

enumerant_table! {
    /// Result id storage class; used by `OpVariable` and pointer types.
    StorageClass {
        UniformConstant = 0,
        Input = 1,
        Uniform = 2,
        Output = 3,
        Workgroup = 4,
        CrossWorkgroup = 5,
        Private = 6,
        Function = 7,
        Generic = 8,
        PushConstant = 9,
        AtomicCounter = 10,
        Image = 11,
        StorageBuffer = 12,
    }
}

enumerant_table! {
    /// `OpTypeImage`'s dimensionality operand.
    Dim {
        #[mnemonic = "1D"]
        Dim1D = 0,
        #[mnemonic = "2D"]
        Dim2D = 1,
        #[mnemonic = "3D"]
        Dim3D = 2,
        Cube = 3,
        Rect = 4,
        Buffer = 5,
        SubpassData = 6,
    }
}

enumerant_table! {
    SamplerAddressingMode {
        None = 0,
        ClampToEdge = 1,
        Clamp = 2,
        Repeat = 3,
        RepeatMirrored = 4,
    }
}

enumerant_table! {
    SamplerFilterMode {
        Nearest = 0,
        Linear = 1,
    }
}

enumerant_table! {
    /// `OpTypeImage`'s format operand.
    ImageFormat {
        Unknown = 0,
        Rgba32f = 1,
        Rgba16f = 2,
        R32f = 3,
        Rgba8 = 4,
        Rgba8Snorm = 5,
        Rg32f = 6,
        Rg16f = 7,
        R11fG11fB10f = 8,
        R16f = 9,
        Rgba16 = 10,
        Rgb10A2 = 11,
        Rg16 = 12,
        Rg8 = 13,
        R16 = 14,
        R8 = 15,
        Rgba32i = 21,
        Rgba16i = 22,
        Rgba8i = 23,
        R32i = 24,
        Rgba32ui = 30,
        Rgba16ui = 31,
        Rgba8ui = 32,
        R32ui = 33,
    }
}

enumerant_table! {
    ImageChannelOrder {
        R = 0,
        A = 1,
        RG = 2,
        RA = 3,
        RGB = 4,
        RGBA = 5,
        BGRA = 6,
        ARGB = 7,
        Intensity = 8,
        Luminance = 9,
    }
}

enumerant_table! {
    FPRoundingMode {
        RTE = 0,
        RTZ = 1,
        RTP = 2,
        RTN = 3,
    }
}

enumerant_table! {
    /// `OpFunction`'s linkage attribute decoration payload.
    LinkageType {
        Export = 0,
        Import = 1,
    }
}

enumerant_table! {
    AccessQualifier {
        ReadOnly = 0,
        WriteOnly = 1,
        ReadWrite = 2,
    }
}

enumerant_table! {
    /// `OpDecorate`/`OpMemberDecorate`'s decoration-kind operand.
    Decoration {
        RelaxedPrecision = 0,
        SpecId = 1,
        Block = 2,
        BufferBlock = 3,
        RowMajor = 4,
        ColMajor = 5,
        ArrayStride = 6,
        MatrixStride = 7,
        GLSLShared = 8,
        GLSLPacked = 9,
        CPacked = 10,
        BuiltIn = 11,
        NoPerspective = 13,
        Flat = 14,
        Patch = 15,
        Centroid = 16,
        Sample = 17,
        Invariant = 18,
        Restrict = 19,
        Aliased = 20,
        Volatile = 21,
        Constant = 22,
        Coherent = 23,
        NonWritable = 24,
        NonReadable = 25,
        Uniform = 26,
        SaturatedConversion = 28,
        Stream = 29,
        Location = 30,
        Component = 31,
        Index = 32,
        Binding = 33,
        DescriptorSet = 34,
        Offset = 35,
        XfbBuffer = 36,
        XfbStride = 37,
        FuncParamAttr = 38,
        FPRoundingMode = 39,
        FPFastMathMode = 40,
        LinkageAttributes = 41,
        NoContraction = 42,
        InputAttachmentIndex = 43,
        Alignment = 44,
    }
}

enumerant_table! {
    /// Built-in semantic attached via `Decoration::BuiltIn`.
    BuiltIn {
        Position = 0,
        PointSize = 1,
        ClipDistance = 3,
        CullDistance = 4,
        VertexId = 5,
        InstanceId = 6,
        PrimitiveId = 7,
        InvocationId = 8,
        Layer = 9,
        ViewportIndex = 10,
        TessLevelOuter = 11,
        TessLevelInner = 12,
        TessCoord = 13,
        PatchVertices = 14,
        FragCoord = 15,
        PointCoord = 16,
        FrontFacing = 17,
        SampleId = 18,
        SamplePosition = 19,
        SampleMask = 20,
        FragDepth = 22,
        HelperInvocation = 23,
        NumWorkgroups = 24,
        WorkgroupSize = 25,
        WorkgroupId = 26,
        LocalInvocationId = 27,
        GlobalInvocationId = 28,
        LocalInvocationIndex = 29,
        VertexIndex = 42,
        InstanceIndex = 43,
    }
}

enumerant_table! {
    Scope {
        CrossDevice = 0,
        Device = 1,
        Workgroup = 2,
        Subgroup = 3,
        Invocation = 4,
        QueueFamily = 5,
    }
}

enumerant_table! {
    GroupOperation {
        Reduce = 0,
        InclusiveScan = 1,
        ExclusiveScan = 2,
    }
}

enumerant_table! {
    /// `OpCapability`'s (sole) operand.
    Capability {
        Matrix = 0,
        Shader = 1,
        Geometry = 2,
        Tessellation = 3,
        Addresses = 4,
        Linkage = 5,
        Kernel = 6,
        Vector16 = 7,
        Float16Buffer = 8,
        Float16 = 9,
        Float64 = 10,
        Int64 = 11,
        Int64Atomics = 12,
        ImageBasic = 13,
        Int16 = 22,
        TessellationPointSize = 23,
        GeometryPointSize = 24,
        ImageGatherExtended = 25,
        StorageImageMultisample = 27,
        UniformBufferArrayDynamicIndexing = 28,
        SampledImageArrayDynamicIndexing = 29,
        StorageBufferArrayDynamicIndexing = 30,
        StorageImageArrayDynamicIndexing = 31,
        ClipDistance = 32,
        CullDistance = 33,
        ImageCubeArray = 34,
        SampleRateShading = 35,
        ImageRect = 36,
        SampledRect = 37,
        GenericPointer = 38,
        Int8 = 39,
        InputAttachment = 40,
        SparseResidency = 41,
        MinLod = 42,
        Sampled1D = 43,
        Image1D = 44,
        SampledCubeArray = 45,
        SampledBuffer = 46,
        ImageBuffer = 47,
        ImageMSArray = 48,
        StorageImageExtendedFormats = 49,
        ImageQuery = 50,
        DerivativeControl = 51,
        InterpolationFunction = 52,
        TransformFeedback = 53,
        GeometryStreams = 54,
        StorageImageReadWithoutFormat = 55,
        StorageImageWriteWithoutFormat = 56,
        MultiViewport = 57,
    }
}

enumerant_table! {
    /// `OpSelectionMerge`'s control-flow hint operand.
    SelectionControl {
        None = 0,
        Flatten = 1,
        DontFlatten = 2,
    }
}

enumerant_table! {
    /// `OpLoopMerge`'s control-flow hint operand.
    LoopControl {
        None = 0,
        Unroll = 1,
        DontUnroll = 2,
    }
}

enumerant_table! {
    /// `OpFunction`'s control operand; a bitmask, but mnemonics name the
    /// individual flags (the low-level form does not parse `|`-combined
    /// masks, per spec §6's "no escape sequences"-style simplification).
    FunctionControl {
        None = 0,
        Inline = 1,
        DontInline = 2,
        Pure = 4,
        Const = 8,
    }
}

enumerant_table! {
    /// `OpLoad`/`OpStore`'s optional memory-access operand.
    MemoryAccess {
        None = 0,
        Volatile = 1,
        Aligned = 2,
        Nontemporal = 4,
    }
}

enumerant_table! {
    /// `OpAtomic*`'s memory-semantics operand; a bitmask of the same
    /// shape as `FunctionControl`.
    MemorySemantics {
        None = 0,
        Acquire = 2,
        Release = 4,
        AcquireRelease = 8,
        SequentiallyConsistent = 16,
        UniformMemory = 64,
        SubgroupMemory = 128,
        WorkgroupMemory = 256,
        CrossWorkgroupMemory = 512,
        AtomicCounterMemory = 1024,
        ImageMemory = 2048,
    }
}

/// Step 5 of spec §4.3's operand classification: looks up `text` as an
/// enumerant mnemonic across `tables`, in the schema-given order,
/// stopping at the first table that recognizes it.
pub fn lookup_enumerant(tables: &[EnumTableKind], text: &str) -> Option<u32> {
    tables.iter().find_map(|&table| lookup_in_table(table, text))
}

fn lookup_in_table(table: EnumTableKind, text: &str) -> Option<u32> {
    use EnumTableKind::*;
    match table {
        AddressingModel => text.parse::<AddressingModel>().ok().map(AddressingModel::value),
        MemoryModelKind => text.parse::<MemoryModelKind>().ok().map(MemoryModelKind::value),
        ExecutionModel => text.parse::<ExecutionModel>().ok().map(ExecutionModel::value),
        ExecutionModeKind => text.parse::<ExecutionModeKind>().ok().map(ExecutionModeKind::value),
        StorageClass => text.parse::<StorageClass>().ok().map(StorageClass::value),
        Dim => text.parse::<Dim>().ok().map(Dim::value),
        SamplerAddressingMode => text
            .parse::<SamplerAddressingMode>()
            .ok()
            .map(SamplerAddressingMode::value),
        SamplerFilterMode => text.parse::<SamplerFilterMode>().ok().map(SamplerFilterMode::value),
        ImageFormat => text.parse::<ImageFormat>().ok().map(ImageFormat::value),
        ImageChannelOrder => text.parse::<ImageChannelOrder>().ok().map(ImageChannelOrder::value),
        FPRoundingMode => text.parse::<FPRoundingMode>().ok().map(FPRoundingMode::value),
        LinkageType => text.parse::<LinkageType>().ok().map(LinkageType::value),
        AccessQualifier => text.parse::<AccessQualifier>().ok().map(AccessQualifier::value),
        Decoration => text.parse::<Decoration>().ok().map(Decoration::value),
        BuiltIn => text.parse::<BuiltIn>().ok().map(BuiltIn::value),
        Scope => text.parse::<Scope>().ok().map(Scope::value),
        GroupOperation => text.parse::<GroupOperation>().ok().map(GroupOperation::value),
        Capability => text.parse::<Capability>().ok().map(Capability::value),
        SelectionControl => text.parse::<SelectionControl>().ok().map(SelectionControl::value),
        LoopControl => text.parse::<LoopControl>().ok().map(LoopControl::value),
        FunctionControl => text.parse::<FunctionControl>().ok().map(FunctionControl::value),
        MemoryAccess => text.parse::<MemoryAccess>().ok().map(MemoryAccess::value),
        MemorySemantics => text.parse::<MemorySemantics>().ok().map(MemorySemantics::value),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn lookup_enumerant_tries_tables_in_order() {
        let tables = [EnumTableKind::Dim, EnumTableKind::Capability];
        assert_eq!(lookup_enumerant(&tables, "2D"), Some(1));
        assert_eq!(lookup_enumerant(&tables, "Shader"), Some(1));
        assert_eq!(lookup_enumerant(&tables, "NotARealEnumerant"), None);
    }

    #[test]
    fn aliases_share_the_base_variants_value() {
        assert_eq!("Vulkan".parse::<MemoryModelKind>().unwrap().value(), 3);
        assert_eq!("VulkanKHR".parse::<MemoryModelKind>().unwrap().value(), 3);
    }
}
