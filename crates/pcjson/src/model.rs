// Copyright 2026 The VkSC PCUtil Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Model
//!
//! Owned snapshot of the state handed to `vkCreateGraphicsPipelines` /
//! `vkCreateComputePipelines`, plus every create info it references by
//! pointer in C.  No handles, no pointers: objects that Vulkan links by
//! handle are carried here as named siblings and referenced by name.
//!
//! Extension chains are a closed set.  Vulkan's `pNext` is an open untyped
//! list, but the structures that can meaningfully extend a pipeline JSON are
//! few and fixed, so [`ExtensionNode`] enumerates exactly those and each
//! chain site declares which of them it accepts.

use ash::vk;
use serde_json::{Map, Value, json};

use crate::CodecError;

/// `VK_UUID_SIZE`.
pub const UUID_SIZE: usize = 16;

/// `VK_STRUCTURE_TYPE_PIPELINE_OFFLINE_CREATE_INFO` (Vulkan SC only, not in
/// `ash`).
pub const STRUCTURE_TYPE_PIPELINE_OFFLINE_CREATE_INFO: i32 = 1000298010;

/// `VK_PIPELINE_MATCH_CONTROL_APPLICATION_UUID_EXACT_MATCH`.
pub const PIPELINE_MATCH_CONTROL_APPLICATION_UUID_EXACT_MATCH: u32 = 0;

/// Everything recorded about one pre-compiled pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineSnapshot {
    pub pipeline_uuid: [u8; UUID_SIZE],
    /// Device extensions enabled when the pipeline was created, in
    /// activation order.
    pub device_extensions: Vec<String>,
    pub state: PipelineState,
}

/// Exactly one pipeline flavor per snapshot, by construction.
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineState {
    Graphics(GraphicsPipelineState),
    Compute(ComputePipelineState),
}

/// An object that other parts of the snapshot refer to by name.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Named<T> {
    pub name: String,
    pub info: T,
}

impl<T> Named<T> {
    pub fn new(name: impl Into<String>, info: T) -> Self {
        Self {
            name: name.into(),
            info,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GraphicsPipelineState {
    pub ycbcr_conversions: Vec<Named<SamplerYcbcrConversionCreateInfo>>,
    pub immutable_samplers: Vec<Named<SamplerCreateInfo>>,
    pub descriptor_set_layouts: Vec<Named<DescriptorSetLayoutCreateInfo>>,
    pub pipeline_layout: PipelineLayoutCreateInfo,
    pub pipeline: GraphicsPipelineCreateInfo,
    /// `(stage, source filename)` in pipeline creation order.
    pub shader_files: Vec<ShaderFileRef>,
    pub physical_device_features: Option<PhysicalDeviceFeatures2>,
    pub render_pass: RenderPassVariant,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ComputePipelineState {
    pub ycbcr_conversions: Vec<Named<SamplerYcbcrConversionCreateInfo>>,
    pub immutable_samplers: Vec<Named<SamplerCreateInfo>>,
    pub descriptor_set_layouts: Vec<Named<DescriptorSetLayoutCreateInfo>>,
    pub pipeline_layout: PipelineLayoutCreateInfo,
    pub pipeline: ComputePipelineCreateInfo,
    pub shader_files: Vec<ShaderFileRef>,
    pub physical_device_features: Option<PhysicalDeviceFeatures2>,
}

/// A graphics pipeline is created against either a version 1 or a version 2
/// render pass create info; the file records whichever was used.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderPassVariant {
    V1(RenderPassCreateInfo),
    V2(RenderPassCreateInfo2),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShaderFileRef {
    pub stage: vk::ShaderStageFlags,
    pub filename: String,
}

// --- extension chains ----------------------------------------------------

/// The closed set of extension structures this schema understands.
#[derive(Debug, Clone, PartialEq)]
pub enum ExtensionNode {
    PipelineOffline(PipelineOfflineCreateInfo),
    SamplerYcbcrConversion(SamplerYcbcrConversionInfo),
    DevicePrivateData(DevicePrivateDataCreateInfo),
    PipelinePropertiesIdentifier(PipelinePropertiesIdentifier),
}

impl ExtensionNode {
    /// Raw `VkStructureType` discriminant, as it appears on the wire.
    pub fn stype(&self) -> i32 {
        match self {
            Self::PipelineOffline(_) => STRUCTURE_TYPE_PIPELINE_OFFLINE_CREATE_INFO,
            Self::SamplerYcbcrConversion(_) => {
                vk::StructureType::SAMPLER_YCBCR_CONVERSION_INFO.as_raw()
            }
            Self::DevicePrivateData(_) => {
                vk::StructureType::DEVICE_PRIVATE_DATA_CREATE_INFO.as_raw()
            }
            Self::PipelinePropertiesIdentifier(_) => {
                vk::StructureType::PIPELINE_PROPERTIES_IDENTIFIER_EXT.as_raw()
            }
        }
    }
}

/// `VkPipelineOfflineCreateInfo`: ties a pipeline create info to its cache
/// entry and reserved pool size.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineOfflineCreateInfo {
    pub pipeline_identifier: [u8; UUID_SIZE],
    /// Raw `VkPipelineMatchControl`.
    pub match_control: u32,
    pub pool_entry_size: u64,
}

/// `VkSamplerYcbcrConversionInfo`, with the conversion referenced by name
/// instead of by handle.
#[derive(Debug, Clone, PartialEq)]
pub struct SamplerYcbcrConversionInfo {
    pub conversion: String,
}

/// `VkDevicePrivateDataCreateInfo`.
#[derive(Debug, Clone, PartialEq)]
pub struct DevicePrivateDataCreateInfo {
    pub private_data_slot_request_count: u32,
}

/// `VkPipelinePropertiesIdentifierEXT`.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelinePropertiesIdentifier {
    pub pipeline_identifier: [u8; UUID_SIZE],
}

// --- pipelines -----------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Default)]
pub struct GraphicsPipelineCreateInfo {
    pub next: Vec<ExtensionNode>,
    pub flags: vk::PipelineCreateFlags,
    pub stages: Vec<PipelineShaderStageCreateInfo>,
    pub vertex_input_state: Option<PipelineVertexInputStateCreateInfo>,
    pub input_assembly_state: Option<PipelineInputAssemblyStateCreateInfo>,
    pub tessellation_state: Option<PipelineTessellationStateCreateInfo>,
    pub viewport_state: Option<PipelineViewportStateCreateInfo>,
    pub rasterization_state: Option<PipelineRasterizationStateCreateInfo>,
    pub multisample_state: Option<PipelineMultisampleStateCreateInfo>,
    pub depth_stencil_state: Option<PipelineDepthStencilStateCreateInfo>,
    pub color_blend_state: Option<PipelineColorBlendStateCreateInfo>,
    pub dynamic_state: Option<PipelineDynamicStateCreateInfo>,
    pub subpass: u32,
    pub base_pipeline_index: i32,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ComputePipelineCreateInfo {
    pub next: Vec<ExtensionNode>,
    pub flags: vk::PipelineCreateFlags,
    pub stage: PipelineShaderStageCreateInfo,
    pub base_pipeline_index: i32,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PipelineShaderStageCreateInfo {
    pub flags: vk::PipelineShaderStageCreateFlags,
    pub stage: vk::ShaderStageFlags,
    /// Shader entry point.
    pub name: String,
    pub specialization_info: Option<SpecializationInfo>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SpecializationInfo {
    pub map_entries: Vec<SpecializationMapEntry>,
    pub data: Vec<u8>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SpecializationMapEntry {
    pub constant_id: u32,
    pub offset: u32,
    pub size: u32,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PipelineVertexInputStateCreateInfo {
    pub vertex_binding_descriptions: Vec<VertexInputBindingDescription>,
    pub vertex_attribute_descriptions: Vec<VertexInputAttributeDescription>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VertexInputBindingDescription {
    pub binding: u32,
    pub stride: u32,
    pub input_rate: vk::VertexInputRate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VertexInputAttributeDescription {
    pub location: u32,
    pub binding: u32,
    pub format: vk::Format,
    pub offset: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PipelineInputAssemblyStateCreateInfo {
    pub topology: vk::PrimitiveTopology,
    pub primitive_restart_enable: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PipelineTessellationStateCreateInfo {
    pub patch_control_points: u32,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PipelineViewportStateCreateInfo {
    pub viewports: Vec<Viewport>,
    pub scissors: Vec<Rect2D>,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub min_depth: f32,
    pub max_depth: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Offset2D {
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Extent2D {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect2D {
    pub offset: Offset2D,
    pub extent: Extent2D,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PipelineRasterizationStateCreateInfo {
    pub depth_clamp_enable: bool,
    pub rasterizer_discard_enable: bool,
    pub polygon_mode: vk::PolygonMode,
    pub cull_mode: vk::CullModeFlags,
    pub front_face: vk::FrontFace,
    pub depth_bias_enable: bool,
    pub depth_bias_constant_factor: f32,
    pub depth_bias_clamp: f32,
    pub depth_bias_slope_factor: f32,
    pub line_width: f32,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PipelineMultisampleStateCreateInfo {
    pub rasterization_samples: vk::SampleCountFlags,
    pub sample_shading_enable: bool,
    pub min_sample_shading: f32,
    pub sample_mask: Option<Vec<u32>>,
    pub alpha_to_coverage_enable: bool,
    pub alpha_to_one_enable: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StencilOpState {
    pub fail_op: vk::StencilOp,
    pub pass_op: vk::StencilOp,
    pub depth_fail_op: vk::StencilOp,
    pub compare_op: vk::CompareOp,
    pub compare_mask: u32,
    pub write_mask: u32,
    pub reference: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PipelineDepthStencilStateCreateInfo {
    pub depth_test_enable: bool,
    pub depth_write_enable: bool,
    pub depth_compare_op: vk::CompareOp,
    pub depth_bounds_test_enable: bool,
    pub stencil_test_enable: bool,
    pub front: StencilOpState,
    pub back: StencilOpState,
    pub min_depth_bounds: f32,
    pub max_depth_bounds: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PipelineColorBlendAttachmentState {
    pub blend_enable: bool,
    pub src_color_blend_factor: vk::BlendFactor,
    pub dst_color_blend_factor: vk::BlendFactor,
    pub color_blend_op: vk::BlendOp,
    pub src_alpha_blend_factor: vk::BlendFactor,
    pub dst_alpha_blend_factor: vk::BlendFactor,
    pub alpha_blend_op: vk::BlendOp,
    pub color_write_mask: vk::ColorComponentFlags,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PipelineColorBlendStateCreateInfo {
    pub logic_op_enable: bool,
    pub logic_op: vk::LogicOp,
    pub attachments: Vec<PipelineColorBlendAttachmentState>,
    pub blend_constants: [f32; 4],
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PipelineDynamicStateCreateInfo {
    pub dynamic_states: Vec<vk::DynamicState>,
}

// --- samplers and layouts ------------------------------------------------

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SamplerCreateInfo {
    pub next: Vec<ExtensionNode>,
    pub flags: vk::SamplerCreateFlags,
    pub mag_filter: vk::Filter,
    pub min_filter: vk::Filter,
    pub mipmap_mode: vk::SamplerMipmapMode,
    pub address_mode_u: vk::SamplerAddressMode,
    pub address_mode_v: vk::SamplerAddressMode,
    pub address_mode_w: vk::SamplerAddressMode,
    pub mip_lod_bias: f32,
    pub anisotropy_enable: bool,
    pub max_anisotropy: f32,
    pub compare_enable: bool,
    pub compare_op: vk::CompareOp,
    pub min_lod: f32,
    pub max_lod: f32,
    pub border_color: vk::BorderColor,
    pub unnormalized_coordinates: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ComponentMapping {
    pub r: vk::ComponentSwizzle,
    pub g: vk::ComponentSwizzle,
    pub b: vk::ComponentSwizzle,
    pub a: vk::ComponentSwizzle,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SamplerYcbcrConversionCreateInfo {
    pub next: Vec<ExtensionNode>,
    pub format: vk::Format,
    pub ycbcr_model: vk::SamplerYcbcrModelConversion,
    pub ycbcr_range: vk::SamplerYcbcrRange,
    pub components: ComponentMapping,
    pub x_chroma_offset: vk::ChromaLocation,
    pub y_chroma_offset: vk::ChromaLocation,
    pub chroma_filter: vk::Filter,
    pub force_explicit_reconstruction: bool,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DescriptorSetLayoutBinding {
    pub binding: u32,
    pub descriptor_type: vk::DescriptorType,
    pub descriptor_count: u32,
    pub stage_flags: vk::ShaderStageFlags,
    /// Immutable sampler names; length must equal `descriptor_count`.
    pub immutable_samplers: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DescriptorSetLayoutCreateInfo {
    pub next: Vec<ExtensionNode>,
    pub flags: vk::DescriptorSetLayoutCreateFlags,
    pub bindings: Vec<DescriptorSetLayoutBinding>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PushConstantRange {
    pub stage_flags: vk::ShaderStageFlags,
    pub offset: u32,
    pub size: u32,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PipelineLayoutCreateInfo {
    pub next: Vec<ExtensionNode>,
    pub flags: vk::PipelineLayoutCreateFlags,
    /// Descriptor set layout names, set number order.
    pub set_layouts: Vec<String>,
    pub push_constant_ranges: Vec<PushConstantRange>,
}

// --- render passes -------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AttachmentDescription {
    pub flags: vk::AttachmentDescriptionFlags,
    pub format: vk::Format,
    pub samples: vk::SampleCountFlags,
    pub load_op: vk::AttachmentLoadOp,
    pub store_op: vk::AttachmentStoreOp,
    pub stencil_load_op: vk::AttachmentLoadOp,
    pub stencil_store_op: vk::AttachmentStoreOp,
    pub initial_layout: vk::ImageLayout,
    pub final_layout: vk::ImageLayout,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AttachmentReference {
    /// Index into the render pass attachment array, or
    /// `VK_ATTACHMENT_UNUSED`.
    pub attachment: u32,
    pub layout: vk::ImageLayout,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SubpassDescription {
    pub flags: vk::SubpassDescriptionFlags,
    pub pipeline_bind_point: vk::PipelineBindPoint,
    pub input_attachments: Vec<AttachmentReference>,
    pub color_attachments: Vec<AttachmentReference>,
    pub resolve_attachments: Option<Vec<AttachmentReference>>,
    pub depth_stencil_attachment: Option<AttachmentReference>,
    pub preserve_attachments: Vec<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SubpassDependency {
    pub src_subpass: u32,
    pub dst_subpass: u32,
    pub src_stage_mask: vk::PipelineStageFlags,
    pub dst_stage_mask: vk::PipelineStageFlags,
    pub src_access_mask: vk::AccessFlags,
    pub dst_access_mask: vk::AccessFlags,
    pub dependency_flags: vk::DependencyFlags,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct RenderPassCreateInfo {
    pub next: Vec<ExtensionNode>,
    pub flags: vk::RenderPassCreateFlags,
    pub attachments: Vec<AttachmentDescription>,
    pub subpasses: Vec<SubpassDescription>,
    pub dependencies: Vec<SubpassDependency>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AttachmentDescription2 {
    pub flags: vk::AttachmentDescriptionFlags,
    pub format: vk::Format,
    pub samples: vk::SampleCountFlags,
    pub load_op: vk::AttachmentLoadOp,
    pub store_op: vk::AttachmentStoreOp,
    pub stencil_load_op: vk::AttachmentLoadOp,
    pub stencil_store_op: vk::AttachmentStoreOp,
    pub initial_layout: vk::ImageLayout,
    pub final_layout: vk::ImageLayout,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AttachmentReference2 {
    pub attachment: u32,
    pub layout: vk::ImageLayout,
    pub aspect_mask: vk::ImageAspectFlags,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SubpassDescription2 {
    pub flags: vk::SubpassDescriptionFlags,
    pub pipeline_bind_point: vk::PipelineBindPoint,
    pub view_mask: u32,
    pub input_attachments: Vec<AttachmentReference2>,
    pub color_attachments: Vec<AttachmentReference2>,
    pub resolve_attachments: Option<Vec<AttachmentReference2>>,
    pub depth_stencil_attachment: Option<AttachmentReference2>,
    pub preserve_attachments: Vec<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SubpassDependency2 {
    pub src_subpass: u32,
    pub dst_subpass: u32,
    pub src_stage_mask: vk::PipelineStageFlags,
    pub dst_stage_mask: vk::PipelineStageFlags,
    pub src_access_mask: vk::AccessFlags,
    pub dst_access_mask: vk::AccessFlags,
    pub dependency_flags: vk::DependencyFlags,
    pub view_offset: i32,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct RenderPassCreateInfo2 {
    pub next: Vec<ExtensionNode>,
    pub flags: vk::RenderPassCreateFlags,
    pub attachments: Vec<AttachmentDescription2>,
    pub subpasses: Vec<SubpassDescription2>,
    pub dependencies: Vec<SubpassDependency2>,
    pub correlated_view_masks: Vec<u32>,
}

// --- device features -----------------------------------------------------

/// Declares `PhysicalDeviceFeatures` and its JSON codec from one field
/// list, so the struct, the generator, and the parser cannot drift apart.
macro_rules! physical_device_features {
    ($($field:ident : $key:literal,)*) => {
        /// `VkPhysicalDeviceFeatures`, every `VkBool32` as a `bool`.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
        pub struct PhysicalDeviceFeatures {
            $(pub $field: bool,)*
        }

        impl PhysicalDeviceFeatures {
            pub(crate) fn to_value(&self) -> Value {
                let mut obj = Map::new();
                $(obj.insert($key.to_owned(), json!(self.$field));)*
                Value::Object(obj)
            }

            pub(crate) fn from_value(v: &Value, path: &str) -> Result<Self, CodecError> {
                let obj = v.as_object().ok_or_else(|| {
                    CodecError::schema(path, "expected an object")
                })?;
                let mut features = Self::default();
                $(
                    if let Some(flag) = obj.get($key) {
                        features.$field = flag.as_bool().ok_or_else(|| {
                            CodecError::schema(format!("{path}.{}", $key), "expected a boolean")
                        })?;
                    }
                )*
                Ok(features)
            }
        }
    };
}

physical_device_features! {
    robust_buffer_access: "robustBufferAccess",
    full_draw_index_uint32: "fullDrawIndexUint32",
    image_cube_array: "imageCubeArray",
    independent_blend: "independentBlend",
    geometry_shader: "geometryShader",
    tessellation_shader: "tessellationShader",
    sample_rate_shading: "sampleRateShading",
    dual_src_blend: "dualSrcBlend",
    logic_op: "logicOp",
    multi_draw_indirect: "multiDrawIndirect",
    draw_indirect_first_instance: "drawIndirectFirstInstance",
    depth_clamp: "depthClamp",
    depth_bias_clamp: "depthBiasClamp",
    fill_mode_non_solid: "fillModeNonSolid",
    depth_bounds: "depthBounds",
    wide_lines: "wideLines",
    large_points: "largePoints",
    alpha_to_one: "alphaToOne",
    multi_viewport: "multiViewport",
    sampler_anisotropy: "samplerAnisotropy",
    texture_compression_etc2: "textureCompressionETC2",
    texture_compression_astc_ldr: "textureCompressionASTC_LDR",
    texture_compression_bc: "textureCompressionBC",
    occlusion_query_precise: "occlusionQueryPrecise",
    pipeline_statistics_query: "pipelineStatisticsQuery",
    vertex_pipeline_stores_and_atomics: "vertexPipelineStoresAndAtomics",
    fragment_stores_and_atomics: "fragmentStoresAndAtomics",
    shader_tessellation_and_geometry_point_size: "shaderTessellationAndGeometryPointSize",
    shader_image_gather_extended: "shaderImageGatherExtended",
    shader_storage_image_extended_formats: "shaderStorageImageExtendedFormats",
    shader_storage_image_multisample: "shaderStorageImageMultisample",
    shader_storage_image_read_without_format: "shaderStorageImageReadWithoutFormat",
    shader_storage_image_write_without_format: "shaderStorageImageWriteWithoutFormat",
    shader_uniform_buffer_array_dynamic_indexing: "shaderUniformBufferArrayDynamicIndexing",
    shader_sampled_image_array_dynamic_indexing: "shaderSampledImageArrayDynamicIndexing",
    shader_storage_buffer_array_dynamic_indexing: "shaderStorageBufferArrayDynamicIndexing",
    shader_storage_image_array_dynamic_indexing: "shaderStorageImageArrayDynamicIndexing",
    shader_clip_distance: "shaderClipDistance",
    shader_cull_distance: "shaderCullDistance",
    shader_float64: "shaderFloat64",
    shader_int64: "shaderInt64",
    shader_int16: "shaderInt16",
    shader_resource_residency: "shaderResourceResidency",
    shader_resource_min_lod: "shaderResourceMinLod",
    sparse_binding: "sparseBinding",
    sparse_residency_buffer: "sparseResidencyBuffer",
    sparse_residency_image2_d: "sparseResidencyImage2D",
    sparse_residency_image3_d: "sparseResidencyImage3D",
    sparse_residency2_samples: "sparseResidency2Samples",
    sparse_residency4_samples: "sparseResidency4Samples",
    sparse_residency8_samples: "sparseResidency8Samples",
    sparse_residency16_samples: "sparseResidency16Samples",
    sparse_residency_aliased: "sparseResidencyAliased",
    variable_multisample_rate: "variableMultisampleRate",
    inherited_queries: "inheritedQueries",
}

/// `VkPhysicalDeviceFeatures2`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PhysicalDeviceFeatures2 {
    pub next: Vec<ExtensionNode>,
    pub features: PhysicalDeviceFeatures,
}

// --- single struct codec -------------------------------------------------

/// Any create info the single-structure codec can carry, discriminated on
/// the wire by a top-level raw `sType` member.
#[derive(Debug, Clone, PartialEq)]
pub enum AnyCreateInfo {
    GraphicsPipeline(GraphicsPipelineCreateInfo),
    ComputePipeline(ComputePipelineCreateInfo),
    SamplerYcbcrConversion(SamplerYcbcrConversionCreateInfo),
    Sampler(SamplerCreateInfo),
    DescriptorSetLayout(DescriptorSetLayoutCreateInfo),
    PipelineLayout(PipelineLayoutCreateInfo),
    PhysicalDeviceFeatures2(PhysicalDeviceFeatures2),
    RenderPass(RenderPassCreateInfo),
    RenderPass2(RenderPassCreateInfo2),
}

impl AnyCreateInfo {
    pub fn stype(&self) -> i32 {
        use vk::StructureType as S;
        match self {
            Self::GraphicsPipeline(_) => S::GRAPHICS_PIPELINE_CREATE_INFO.as_raw(),
            Self::ComputePipeline(_) => S::COMPUTE_PIPELINE_CREATE_INFO.as_raw(),
            Self::SamplerYcbcrConversion(_) => S::SAMPLER_YCBCR_CONVERSION_CREATE_INFO.as_raw(),
            Self::Sampler(_) => S::SAMPLER_CREATE_INFO.as_raw(),
            Self::DescriptorSetLayout(_) => S::DESCRIPTOR_SET_LAYOUT_CREATE_INFO.as_raw(),
            Self::PipelineLayout(_) => S::PIPELINE_LAYOUT_CREATE_INFO.as_raw(),
            Self::PhysicalDeviceFeatures2(_) => S::PHYSICAL_DEVICE_FEATURES_2.as_raw(),
            Self::RenderPass(_) => S::RENDER_PASS_CREATE_INFO.as_raw(),
            Self::RenderPass2(_) => S::RENDER_PASS_CREATE_INFO_2.as_raw(),
        }
    }
}
