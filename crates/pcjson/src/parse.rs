// Copyright 2026 The VkSC PCUtil Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Parse
//!
//! JSON text back to a [`PipelineSnapshot`].  Input is untrusted: every
//! member access and type coercion threads the `$`-rooted JSON path down so
//! a failure names the exact offending location, and nothing here panics on
//! malformed input.  Unknown members are ignored; missing required members,
//! wrong types, out-of-range integers, unknown `sType` values, and dangling
//! name references are hard errors.

use ash::vk;
use serde_json::{Map, Value};

use crate::CodecError;
use crate::generator::check_references;
use crate::model::*;

/// Deserializes pipeline JSON documents back into snapshots.
///
/// The parsed snapshot is owned by the parser and stays valid until the
/// next `parse` call on the same instance.
#[derive(Default)]
pub struct Parser {
    snapshot: Option<PipelineSnapshot>,
}

impl Parser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse one pipeline JSON document.
    pub fn parse(&mut self, text: &str) -> Result<&PipelineSnapshot, CodecError> {
        let doc: Value = serde_json::from_str(text)?;
        let root = obj(&doc, "$")?;

        let pipeline_uuid = uuid(get(root, "$", "pipelineUUID")?, "$.pipelineUUID")?;
        let device_extensions = string_array(
            get(root, "$", "deviceExtensions")?,
            "$.deviceExtensions",
        )?;

        let graphics = root.get("graphicsPipelineState");
        let compute = root.get("computePipelineState");
        let state = match (graphics, compute) {
            (Some(v), None) => PipelineState::Graphics(graphics_state(v)?),
            (None, Some(v)) => PipelineState::Compute(compute_state(v)?),
            (Some(_), Some(_)) => {
                return Err(CodecError::schema(
                    "$",
                    "graphicsPipelineState and computePipelineState are mutually exclusive",
                ));
            }
            (None, None) => {
                return Err(CodecError::schema(
                    "$",
                    "expected graphicsPipelineState or computePipelineState",
                ));
            }
        };

        let snapshot = PipelineSnapshot {
            pipeline_uuid,
            device_extensions,
            state,
        };
        check_references(&snapshot)?;

        Ok(self.snapshot.insert(snapshot))
    }

    /// Parse a standalone create info document written by
    /// [`crate::Generator::generate_struct`], dispatching on its `sType`.
    pub fn parse_struct(text: &str) -> Result<AnyCreateInfo, CodecError> {
        let doc: Value = serde_json::from_str(text)?;
        let root = obj(&doc, "$")?;
        let stype = as_i32(get(root, "$", "sType")?, "$.sType")?;

        use vk::StructureType as S;
        let info = if stype == S::GRAPHICS_PIPELINE_CREATE_INFO.as_raw() {
            AnyCreateInfo::GraphicsPipeline(graphics_pipeline(&doc, "$")?)
        } else if stype == S::COMPUTE_PIPELINE_CREATE_INFO.as_raw() {
            AnyCreateInfo::ComputePipeline(compute_pipeline(&doc, "$")?)
        } else if stype == S::SAMPLER_YCBCR_CONVERSION_CREATE_INFO.as_raw() {
            AnyCreateInfo::SamplerYcbcrConversion(ycbcr_conversion(&doc, "$")?)
        } else if stype == S::SAMPLER_CREATE_INFO.as_raw() {
            AnyCreateInfo::Sampler(sampler(&doc, "$")?)
        } else if stype == S::DESCRIPTOR_SET_LAYOUT_CREATE_INFO.as_raw() {
            AnyCreateInfo::DescriptorSetLayout(descriptor_set_layout(&doc, "$")?)
        } else if stype == S::PIPELINE_LAYOUT_CREATE_INFO.as_raw() {
            AnyCreateInfo::PipelineLayout(pipeline_layout(&doc, "$")?)
        } else if stype == S::PHYSICAL_DEVICE_FEATURES_2.as_raw() {
            AnyCreateInfo::PhysicalDeviceFeatures2(physical_device_features2(&doc, "$")?)
        } else if stype == S::RENDER_PASS_CREATE_INFO.as_raw() {
            AnyCreateInfo::RenderPass(render_pass(&doc, "$")?)
        } else if stype == S::RENDER_PASS_CREATE_INFO_2.as_raw() {
            AnyCreateInfo::RenderPass2(render_pass2(&doc, "$")?)
        } else {
            return Err(CodecError::schema(
                "$.sType",
                format!("unsupported structure type {stype}"),
            ));
        };
        Ok(info)
    }
}

// --- primitives ----------------------------------------------------------

fn obj<'a>(v: &'a Value, path: &str) -> Result<&'a Map<String, Value>, CodecError> {
    v.as_object()
        .ok_or_else(|| CodecError::schema(path, "expected an object"))
}

fn get<'a>(o: &'a Map<String, Value>, path: &str, key: &str) -> Result<&'a Value, CodecError> {
    o.get(key)
        .ok_or_else(|| CodecError::schema(format!("{path}.{key}"), "missing member"))
}

fn array<'a>(v: &'a Value, path: &str) -> Result<&'a [Value], CodecError> {
    v.as_array()
        .map(Vec::as_slice)
        .ok_or_else(|| CodecError::schema(path, "expected an array"))
}

fn as_bool(v: &Value, path: &str) -> Result<bool, CodecError> {
    v.as_bool()
        .ok_or_else(|| CodecError::schema(path, "expected a boolean"))
}

fn as_str<'a>(v: &'a Value, path: &str) -> Result<&'a str, CodecError> {
    v.as_str()
        .ok_or_else(|| CodecError::schema(path, "expected a string"))
}

fn as_u32(v: &Value, path: &str) -> Result<u32, CodecError> {
    v.as_u64()
        .and_then(|n| u32::try_from(n).ok())
        .ok_or_else(|| CodecError::schema(path, "expected an unsigned 32-bit integer"))
}

fn as_u64(v: &Value, path: &str) -> Result<u64, CodecError> {
    v.as_u64()
        .ok_or_else(|| CodecError::schema(path, "expected an unsigned 64-bit integer"))
}

fn as_i32(v: &Value, path: &str) -> Result<i32, CodecError> {
    v.as_i64()
        .and_then(|n| i32::try_from(n).ok())
        .ok_or_else(|| CodecError::schema(path, "expected a signed 32-bit integer"))
}

fn as_f32(v: &Value, path: &str) -> Result<f32, CodecError> {
    v.as_f64()
        .map(|f| f as f32)
        .ok_or_else(|| CodecError::schema(path, "expected a number"))
}

fn as_u8(v: &Value, path: &str) -> Result<u8, CodecError> {
    v.as_u64()
        .and_then(|n| u8::try_from(n).ok())
        .ok_or_else(|| CodecError::schema(path, "expected a byte value"))
}

fn uuid(v: &Value, path: &str) -> Result<[u8; UUID_SIZE], CodecError> {
    let items = array(v, path)?;
    if items.len() != UUID_SIZE {
        return Err(CodecError::schema(
            path,
            format!("expected {UUID_SIZE} bytes, found {}", items.len()),
        ));
    }
    let mut out = [0u8; UUID_SIZE];
    for (i, item) in items.iter().enumerate() {
        out[i] = as_u8(item, &format!("{path}[{i}]"))?;
    }
    Ok(out)
}

fn string_array(v: &Value, path: &str) -> Result<Vec<String>, CodecError> {
    array(v, path)?
        .iter()
        .enumerate()
        .map(|(i, item)| Ok(as_str(item, &format!("{path}[{i}]"))?.to_owned()))
        .collect()
}

fn u32_array(v: &Value, path: &str) -> Result<Vec<u32>, CodecError> {
    array(v, path)?
        .iter()
        .enumerate()
        .map(|(i, item)| as_u32(item, &format!("{path}[{i}]")))
        .collect()
}

// Typed member getters; `$key` missing or mistyped errors at `{path}.{key}`.

fn bool_member(o: &Map<String, Value>, path: &str, key: &str) -> Result<bool, CodecError> {
    as_bool(get(o, path, key)?, &format!("{path}.{key}"))
}

fn str_member(o: &Map<String, Value>, path: &str, key: &str) -> Result<String, CodecError> {
    Ok(as_str(get(o, path, key)?, &format!("{path}.{key}"))?.to_owned())
}

fn u32_member(o: &Map<String, Value>, path: &str, key: &str) -> Result<u32, CodecError> {
    as_u32(get(o, path, key)?, &format!("{path}.{key}"))
}

fn u64_member(o: &Map<String, Value>, path: &str, key: &str) -> Result<u64, CodecError> {
    as_u64(get(o, path, key)?, &format!("{path}.{key}"))
}

fn i32_member(o: &Map<String, Value>, path: &str, key: &str) -> Result<i32, CodecError> {
    as_i32(get(o, path, key)?, &format!("{path}.{key}"))
}

fn f32_member(o: &Map<String, Value>, path: &str, key: &str) -> Result<f32, CodecError> {
    as_f32(get(o, path, key)?, &format!("{path}.{key}"))
}

/// Raw Vulkan enum member, e.g. `vk::Format` or `vk::CompareOp`.
fn enum_member<T>(
    o: &Map<String, Value>,
    path: &str,
    key: &str,
    from_raw: fn(i32) -> T,
) -> Result<T, CodecError> {
    Ok(from_raw(i32_member(o, path, key)?))
}

/// Raw Vulkan flags member over the 32-bit `Flags` carrier.
fn flags_member<T>(
    o: &Map<String, Value>,
    path: &str,
    key: &str,
    from_raw: fn(u32) -> T,
) -> Result<T, CodecError> {
    Ok(from_raw(u32_member(o, path, key)?))
}

// --- extension chains ----------------------------------------------------

/// Which extension structures a given chain site accepts.  Shared with the
/// generator so a snapshot that generates also reparses.
#[derive(Clone, Copy)]
pub(crate) enum ChainSite {
    Pipeline,
    Sampler,
    None,
}

impl ChainSite {
    pub(crate) fn accepts(self, stype: i32) -> bool {
        use vk::StructureType as S;
        match self {
            Self::Pipeline => {
                stype == STRUCTURE_TYPE_PIPELINE_OFFLINE_CREATE_INFO
                    || stype == S::PIPELINE_PROPERTIES_IDENTIFIER_EXT.as_raw()
                    || stype == S::DEVICE_PRIVATE_DATA_CREATE_INFO.as_raw()
            }
            Self::Sampler => stype == S::SAMPLER_YCBCR_CONVERSION_INFO.as_raw(),
            Self::None => false,
        }
    }
}

/// Parse the optional `pNext` array of `o`; absence means an empty chain.
fn chain(
    o: &Map<String, Value>,
    path: &str,
    site: ChainSite,
) -> Result<Vec<ExtensionNode>, CodecError> {
    let Some(v) = o.get("pNext") else {
        return Ok(vec![]);
    };
    let chain_path = format!("{path}.pNext");
    array(v, &chain_path)?
        .iter()
        .enumerate()
        .map(|(i, item)| extension_node(item, &format!("{chain_path}[{i}]"), site))
        .collect()
}

fn extension_node(v: &Value, path: &str, site: ChainSite) -> Result<ExtensionNode, CodecError> {
    let o = obj(v, path)?;
    let stype = i32_member(o, path, "sType")?;

    if !site.accepts(stype) {
        return Err(CodecError::schema(
            format!("{path}.sType"),
            format!("structure type {stype} is not valid in this chain"),
        ));
    }

    use vk::StructureType as S;
    let node = if stype == STRUCTURE_TYPE_PIPELINE_OFFLINE_CREATE_INFO {
        ExtensionNode::PipelineOffline(PipelineOfflineCreateInfo {
            pipeline_identifier: uuid(
                get(o, path, "pipelineIdentifier")?,
                &format!("{path}.pipelineIdentifier"),
            )?,
            match_control: u32_member(o, path, "matchControl")?,
            pool_entry_size: u64_member(o, path, "poolEntrySize")?,
        })
    } else if stype == S::SAMPLER_YCBCR_CONVERSION_INFO.as_raw() {
        ExtensionNode::SamplerYcbcrConversion(SamplerYcbcrConversionInfo {
            conversion: str_member(o, path, "conversion")?,
        })
    } else if stype == S::DEVICE_PRIVATE_DATA_CREATE_INFO.as_raw() {
        ExtensionNode::DevicePrivateData(DevicePrivateDataCreateInfo {
            private_data_slot_request_count: u32_member(o, path, "privateDataSlotRequestCount")?,
        })
    } else if stype == S::PIPELINE_PROPERTIES_IDENTIFIER_EXT.as_raw() {
        ExtensionNode::PipelinePropertiesIdentifier(PipelinePropertiesIdentifier {
            pipeline_identifier: uuid(
                get(o, path, "pipelineIdentifier")?,
                &format!("{path}.pipelineIdentifier"),
            )?,
        })
    } else {
        return Err(CodecError::schema(
            format!("{path}.sType"),
            format!("unknown structure type {stype}"),
        ));
    };
    Ok(node)
}

// --- pipeline states -----------------------------------------------------

fn graphics_state(v: &Value) -> Result<GraphicsPipelineState, CodecError> {
    let path = "$.graphicsPipelineState";
    let o = obj(v, path)?;

    let render_pass = match (o.get("renderPass"), o.get("renderPass2")) {
        (Some(rp), None) => RenderPassVariant::V1(render_pass(rp, &format!("{path}.renderPass"))?),
        (None, Some(rp)) => {
            RenderPassVariant::V2(render_pass2(rp, &format!("{path}.renderPass2"))?)
        }
        (Some(_), Some(_)) => {
            return Err(CodecError::schema(
                path,
                "renderPass and renderPass2 are mutually exclusive",
            ));
        }
        (None, None) => {
            return Err(CodecError::schema(
                path,
                "expected renderPass or renderPass2",
            ));
        }
    };

    Ok(GraphicsPipelineState {
        ycbcr_conversions: named(o, path, "ycbcrSamplers", ycbcr_conversion)?,
        immutable_samplers: named(o, path, "immutableSamplers", sampler)?,
        descriptor_set_layouts: named(o, path, "descriptorSetLayouts", descriptor_set_layout)?,
        pipeline_layout: pipeline_layout(
            get(o, path, "pipelineLayout")?,
            &format!("{path}.pipelineLayout"),
        )?,
        pipeline: graphics_pipeline(
            get(o, path, "graphicsPipeline")?,
            &format!("{path}.graphicsPipeline"),
        )?,
        shader_files: shader_files(o, path)?,
        physical_device_features: features_member(o, path)?,
        render_pass,
    })
}

fn compute_state(v: &Value) -> Result<ComputePipelineState, CodecError> {
    let path = "$.computePipelineState";
    let o = obj(v, path)?;

    Ok(ComputePipelineState {
        ycbcr_conversions: named(o, path, "ycbcrSamplers", ycbcr_conversion)?,
        immutable_samplers: named(o, path, "immutableSamplers", sampler)?,
        descriptor_set_layouts: named(o, path, "descriptorSetLayouts", descriptor_set_layout)?,
        pipeline_layout: pipeline_layout(
            get(o, path, "pipelineLayout")?,
            &format!("{path}.pipelineLayout"),
        )?,
        pipeline: compute_pipeline(
            get(o, path, "computePipeline")?,
            &format!("{path}.computePipeline"),
        )?,
        shader_files: shader_files(o, path)?,
        physical_device_features: features_member(o, path)?,
    })
}

fn named<T>(
    o: &Map<String, Value>,
    path: &str,
    key: &str,
    body: fn(&Value, &str) -> Result<T, CodecError>,
) -> Result<Vec<Named<T>>, CodecError> {
    let list_path = format!("{path}.{key}");
    array(get(o, path, key)?, &list_path)?
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let item_path = format!("{list_path}[{i}]");
            let item_obj = obj(item, &item_path)?;
            Ok(Named {
                name: str_member(item_obj, &item_path, "name")?,
                info: body(item, &item_path)?,
            })
        })
        .collect()
}

fn shader_files(o: &Map<String, Value>, path: &str) -> Result<Vec<ShaderFileRef>, CodecError> {
    let list_path = format!("{path}.shaderFileNames");
    array(get(o, path, "shaderFileNames")?, &list_path)?
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let item_path = format!("{list_path}[{i}]");
            let item_obj = obj(item, &item_path)?;
            Ok(ShaderFileRef {
                stage: flags_member(
                    item_obj,
                    &item_path,
                    "stage",
                    vk::ShaderStageFlags::from_raw,
                )?,
                filename: str_member(item_obj, &item_path, "filename")?,
            })
        })
        .collect()
}

fn features_member(
    o: &Map<String, Value>,
    path: &str,
) -> Result<Option<PhysicalDeviceFeatures2>, CodecError> {
    o.get("physicalDeviceFeatures")
        .map(|v| physical_device_features2(v, &format!("{path}.physicalDeviceFeatures")))
        .transpose()
}

// --- pipelines -----------------------------------------------------------

fn shader_stage(v: &Value, path: &str) -> Result<PipelineShaderStageCreateInfo, CodecError> {
    let o = obj(v, path)?;
    let specialization_info = o
        .get("specializationInfo")
        .map(|spec| {
            let spec_path = format!("{path}.specializationInfo");
            let spec_obj = obj(spec, &spec_path)?;
            let entries_path = format!("{spec_path}.mapEntries");
            let map_entries = array(get(spec_obj, &spec_path, "mapEntries")?, &entries_path)?
                .iter()
                .enumerate()
                .map(|(i, entry)| {
                    let entry_path = format!("{entries_path}[{i}]");
                    let entry_obj = obj(entry, &entry_path)?;
                    Ok(SpecializationMapEntry {
                        constant_id: u32_member(entry_obj, &entry_path, "constantID")?,
                        offset: u32_member(entry_obj, &entry_path, "offset")?,
                        size: u32_member(entry_obj, &entry_path, "size")?,
                    })
                })
                .collect::<Result<_, CodecError>>()?;
            let data_path = format!("{spec_path}.data");
            let data = array(get(spec_obj, &spec_path, "data")?, &data_path)?
                .iter()
                .enumerate()
                .map(|(i, b)| as_u8(b, &format!("{data_path}[{i}]")))
                .collect::<Result<_, CodecError>>()?;
            Ok::<_, CodecError>(SpecializationInfo { map_entries, data })
        })
        .transpose()?;

    Ok(PipelineShaderStageCreateInfo {
        flags: flags_member(o, path, "flags", vk::PipelineShaderStageCreateFlags::from_raw)?,
        stage: flags_member(o, path, "stage", vk::ShaderStageFlags::from_raw)?,
        name: str_member(o, path, "name")?,
        specialization_info,
    })
}

fn graphics_pipeline(v: &Value, path: &str) -> Result<GraphicsPipelineCreateInfo, CodecError> {
    let o = obj(v, path)?;

    let stages_path = format!("{path}.stages");
    let stages = array(get(o, path, "stages")?, &stages_path)?
        .iter()
        .enumerate()
        .map(|(i, stage)| shader_stage(stage, &format!("{stages_path}[{i}]")))
        .collect::<Result<_, CodecError>>()?;

    let optional = |key: &str| o.get(key).map(|v| (v, format!("{path}.{key}")));

    Ok(GraphicsPipelineCreateInfo {
        next: chain(o, path, ChainSite::Pipeline)?,
        flags: flags_member(o, path, "flags", vk::PipelineCreateFlags::from_raw)?,
        stages,
        vertex_input_state: optional("vertexInputState")
            .map(|(v, p)| vertex_input(v, &p))
            .transpose()?,
        input_assembly_state: optional("inputAssemblyState")
            .map(|(v, p)| input_assembly(v, &p))
            .transpose()?,
        tessellation_state: optional("tessellationState")
            .map(|(v, p)| {
                Ok::<_, CodecError>(PipelineTessellationStateCreateInfo {
                    patch_control_points: u32_member(obj(v, &p)?, &p, "patchControlPoints")?,
                })
            })
            .transpose()?,
        viewport_state: optional("viewportState")
            .map(|(v, p)| viewport_state(v, &p))
            .transpose()?,
        rasterization_state: optional("rasterizationState")
            .map(|(v, p)| rasterization(v, &p))
            .transpose()?,
        multisample_state: optional("multisampleState")
            .map(|(v, p)| multisample(v, &p))
            .transpose()?,
        depth_stencil_state: optional("depthStencilState")
            .map(|(v, p)| depth_stencil(v, &p))
            .transpose()?,
        color_blend_state: optional("colorBlendState")
            .map(|(v, p)| color_blend(v, &p))
            .transpose()?,
        dynamic_state: optional("dynamicState")
            .map(|(v, p)| {
                let o = obj(v, &p)?;
                let list_path = format!("{p}.dynamicStates");
                let dynamic_states = array(get(o, &p, "dynamicStates")?, &list_path)?
                    .iter()
                    .enumerate()
                    .map(|(i, d)| {
                        Ok(vk::DynamicState::from_raw(as_i32(
                            d,
                            &format!("{list_path}[{i}]"),
                        )?))
                    })
                    .collect::<Result<_, CodecError>>()?;
                Ok::<_, CodecError>(PipelineDynamicStateCreateInfo { dynamic_states })
            })
            .transpose()?,
        subpass: u32_member(o, path, "subpass")?,
        base_pipeline_index: i32_member(o, path, "basePipelineIndex")?,
    })
}

fn compute_pipeline(v: &Value, path: &str) -> Result<ComputePipelineCreateInfo, CodecError> {
    let o = obj(v, path)?;
    Ok(ComputePipelineCreateInfo {
        next: chain(o, path, ChainSite::Pipeline)?,
        flags: flags_member(o, path, "flags", vk::PipelineCreateFlags::from_raw)?,
        stage: shader_stage(get(o, path, "stage")?, &format!("{path}.stage"))?,
        base_pipeline_index: i32_member(o, path, "basePipelineIndex")?,
    })
}

fn vertex_input(v: &Value, path: &str) -> Result<PipelineVertexInputStateCreateInfo, CodecError> {
    let o = obj(v, path)?;

    let bindings_path = format!("{path}.vertexBindingDescriptions");
    let vertex_binding_descriptions =
        array(get(o, path, "vertexBindingDescriptions")?, &bindings_path)?
            .iter()
            .enumerate()
            .map(|(i, b)| {
                let p = format!("{bindings_path}[{i}]");
                let b = obj(b, &p)?;
                Ok(VertexInputBindingDescription {
                    binding: u32_member(b, &p, "binding")?,
                    stride: u32_member(b, &p, "stride")?,
                    input_rate: enum_member(b, &p, "inputRate", vk::VertexInputRate::from_raw)?,
                })
            })
            .collect::<Result<_, CodecError>>()?;

    let attrs_path = format!("{path}.vertexAttributeDescriptions");
    let vertex_attribute_descriptions =
        array(get(o, path, "vertexAttributeDescriptions")?, &attrs_path)?
            .iter()
            .enumerate()
            .map(|(i, a)| {
                let p = format!("{attrs_path}[{i}]");
                let a = obj(a, &p)?;
                Ok(VertexInputAttributeDescription {
                    location: u32_member(a, &p, "location")?,
                    binding: u32_member(a, &p, "binding")?,
                    format: enum_member(a, &p, "format", vk::Format::from_raw)?,
                    offset: u32_member(a, &p, "offset")?,
                })
            })
            .collect::<Result<_, CodecError>>()?;

    Ok(PipelineVertexInputStateCreateInfo {
        vertex_binding_descriptions,
        vertex_attribute_descriptions,
    })
}

fn input_assembly(
    v: &Value,
    path: &str,
) -> Result<PipelineInputAssemblyStateCreateInfo, CodecError> {
    let o = obj(v, path)?;
    Ok(PipelineInputAssemblyStateCreateInfo {
        topology: enum_member(o, path, "topology", vk::PrimitiveTopology::from_raw)?,
        primitive_restart_enable: bool_member(o, path, "primitiveRestartEnable")?,
    })
}

fn viewport_state(v: &Value, path: &str) -> Result<PipelineViewportStateCreateInfo, CodecError> {
    let o = obj(v, path)?;

    let viewports_path = format!("{path}.viewports");
    let viewports = array(get(o, path, "viewports")?, &viewports_path)?
        .iter()
        .enumerate()
        .map(|(i, vp)| {
            let p = format!("{viewports_path}[{i}]");
            let vp = obj(vp, &p)?;
            Ok(Viewport {
                x: f32_member(vp, &p, "x")?,
                y: f32_member(vp, &p, "y")?,
                width: f32_member(vp, &p, "width")?,
                height: f32_member(vp, &p, "height")?,
                min_depth: f32_member(vp, &p, "minDepth")?,
                max_depth: f32_member(vp, &p, "maxDepth")?,
            })
        })
        .collect::<Result<_, CodecError>>()?;

    let scissors_path = format!("{path}.scissors");
    let scissors = array(get(o, path, "scissors")?, &scissors_path)?
        .iter()
        .enumerate()
        .map(|(i, r)| {
            let p = format!("{scissors_path}[{i}]");
            let r = obj(r, &p)?;
            let offset_path = format!("{p}.offset");
            let offset = obj(get(r, &p, "offset")?, &offset_path)?;
            let extent_path = format!("{p}.extent");
            let extent = obj(get(r, &p, "extent")?, &extent_path)?;
            Ok(Rect2D {
                offset: Offset2D {
                    x: i32_member(offset, &offset_path, "x")?,
                    y: i32_member(offset, &offset_path, "y")?,
                },
                extent: Extent2D {
                    width: u32_member(extent, &extent_path, "width")?,
                    height: u32_member(extent, &extent_path, "height")?,
                },
            })
        })
        .collect::<Result<_, CodecError>>()?;

    Ok(PipelineViewportStateCreateInfo { viewports, scissors })
}

fn rasterization(
    v: &Value,
    path: &str,
) -> Result<PipelineRasterizationStateCreateInfo, CodecError> {
    let o = obj(v, path)?;
    Ok(PipelineRasterizationStateCreateInfo {
        depth_clamp_enable: bool_member(o, path, "depthClampEnable")?,
        rasterizer_discard_enable: bool_member(o, path, "rasterizerDiscardEnable")?,
        polygon_mode: enum_member(o, path, "polygonMode", vk::PolygonMode::from_raw)?,
        cull_mode: flags_member(o, path, "cullMode", vk::CullModeFlags::from_raw)?,
        front_face: enum_member(o, path, "frontFace", vk::FrontFace::from_raw)?,
        depth_bias_enable: bool_member(o, path, "depthBiasEnable")?,
        depth_bias_constant_factor: f32_member(o, path, "depthBiasConstantFactor")?,
        depth_bias_clamp: f32_member(o, path, "depthBiasClamp")?,
        depth_bias_slope_factor: f32_member(o, path, "depthBiasSlopeFactor")?,
        line_width: f32_member(o, path, "lineWidth")?,
    })
}

fn multisample(v: &Value, path: &str) -> Result<PipelineMultisampleStateCreateInfo, CodecError> {
    let o = obj(v, path)?;
    Ok(PipelineMultisampleStateCreateInfo {
        rasterization_samples: flags_member(
            o,
            path,
            "rasterizationSamples",
            vk::SampleCountFlags::from_raw,
        )?,
        sample_shading_enable: bool_member(o, path, "sampleShadingEnable")?,
        min_sample_shading: f32_member(o, path, "minSampleShading")?,
        sample_mask: o
            .get("sampleMask")
            .map(|m| u32_array(m, &format!("{path}.sampleMask")))
            .transpose()?,
        alpha_to_coverage_enable: bool_member(o, path, "alphaToCoverageEnable")?,
        alpha_to_one_enable: bool_member(o, path, "alphaToOneEnable")?,
    })
}

fn stencil_op_state(v: &Value, path: &str) -> Result<StencilOpState, CodecError> {
    let o = obj(v, path)?;
    Ok(StencilOpState {
        fail_op: enum_member(o, path, "failOp", vk::StencilOp::from_raw)?,
        pass_op: enum_member(o, path, "passOp", vk::StencilOp::from_raw)?,
        depth_fail_op: enum_member(o, path, "depthFailOp", vk::StencilOp::from_raw)?,
        compare_op: enum_member(o, path, "compareOp", vk::CompareOp::from_raw)?,
        compare_mask: u32_member(o, path, "compareMask")?,
        write_mask: u32_member(o, path, "writeMask")?,
        reference: u32_member(o, path, "reference")?,
    })
}

fn depth_stencil(
    v: &Value,
    path: &str,
) -> Result<PipelineDepthStencilStateCreateInfo, CodecError> {
    let o = obj(v, path)?;
    Ok(PipelineDepthStencilStateCreateInfo {
        depth_test_enable: bool_member(o, path, "depthTestEnable")?,
        depth_write_enable: bool_member(o, path, "depthWriteEnable")?,
        depth_compare_op: enum_member(o, path, "depthCompareOp", vk::CompareOp::from_raw)?,
        depth_bounds_test_enable: bool_member(o, path, "depthBoundsTestEnable")?,
        stencil_test_enable: bool_member(o, path, "stencilTestEnable")?,
        front: stencil_op_state(get(o, path, "front")?, &format!("{path}.front"))?,
        back: stencil_op_state(get(o, path, "back")?, &format!("{path}.back"))?,
        min_depth_bounds: f32_member(o, path, "minDepthBounds")?,
        max_depth_bounds: f32_member(o, path, "maxDepthBounds")?,
    })
}

fn color_blend(v: &Value, path: &str) -> Result<PipelineColorBlendStateCreateInfo, CodecError> {
    let o = obj(v, path)?;

    let attachments_path = format!("{path}.attachments");
    let attachments = array(get(o, path, "attachments")?, &attachments_path)?
        .iter()
        .enumerate()
        .map(|(i, a)| {
            let p = format!("{attachments_path}[{i}]");
            let a = obj(a, &p)?;
            Ok(PipelineColorBlendAttachmentState {
                blend_enable: bool_member(a, &p, "blendEnable")?,
                src_color_blend_factor: enum_member(
                    a,
                    &p,
                    "srcColorBlendFactor",
                    vk::BlendFactor::from_raw,
                )?,
                dst_color_blend_factor: enum_member(
                    a,
                    &p,
                    "dstColorBlendFactor",
                    vk::BlendFactor::from_raw,
                )?,
                color_blend_op: enum_member(a, &p, "colorBlendOp", vk::BlendOp::from_raw)?,
                src_alpha_blend_factor: enum_member(
                    a,
                    &p,
                    "srcAlphaBlendFactor",
                    vk::BlendFactor::from_raw,
                )?,
                dst_alpha_blend_factor: enum_member(
                    a,
                    &p,
                    "dstAlphaBlendFactor",
                    vk::BlendFactor::from_raw,
                )?,
                alpha_blend_op: enum_member(a, &p, "alphaBlendOp", vk::BlendOp::from_raw)?,
                color_write_mask: flags_member(
                    a,
                    &p,
                    "colorWriteMask",
                    vk::ColorComponentFlags::from_raw,
                )?,
            })
        })
        .collect::<Result<_, CodecError>>()?;

    let constants_path = format!("{path}.blendConstants");
    let constants = array(get(o, path, "blendConstants")?, &constants_path)?;
    if constants.len() != 4 {
        return Err(CodecError::schema(
            &constants_path,
            format!("expected 4 blend constants, found {}", constants.len()),
        ));
    }
    let mut blend_constants = [0.0f32; 4];
    for (i, c) in constants.iter().enumerate() {
        blend_constants[i] = as_f32(c, &format!("{constants_path}[{i}]"))?;
    }

    Ok(PipelineColorBlendStateCreateInfo {
        logic_op_enable: bool_member(o, path, "logicOpEnable")?,
        logic_op: enum_member(o, path, "logicOp", vk::LogicOp::from_raw)?,
        attachments,
        blend_constants,
    })
}

// --- samplers and layouts ------------------------------------------------

fn sampler(v: &Value, path: &str) -> Result<SamplerCreateInfo, CodecError> {
    let o = obj(v, path)?;
    Ok(SamplerCreateInfo {
        next: chain(o, path, ChainSite::Sampler)?,
        flags: flags_member(o, path, "flags", vk::SamplerCreateFlags::from_raw)?,
        mag_filter: enum_member(o, path, "magFilter", vk::Filter::from_raw)?,
        min_filter: enum_member(o, path, "minFilter", vk::Filter::from_raw)?,
        mipmap_mode: enum_member(o, path, "mipmapMode", vk::SamplerMipmapMode::from_raw)?,
        address_mode_u: enum_member(o, path, "addressModeU", vk::SamplerAddressMode::from_raw)?,
        address_mode_v: enum_member(o, path, "addressModeV", vk::SamplerAddressMode::from_raw)?,
        address_mode_w: enum_member(o, path, "addressModeW", vk::SamplerAddressMode::from_raw)?,
        mip_lod_bias: f32_member(o, path, "mipLodBias")?,
        anisotropy_enable: bool_member(o, path, "anisotropyEnable")?,
        max_anisotropy: f32_member(o, path, "maxAnisotropy")?,
        compare_enable: bool_member(o, path, "compareEnable")?,
        compare_op: enum_member(o, path, "compareOp", vk::CompareOp::from_raw)?,
        min_lod: f32_member(o, path, "minLod")?,
        max_lod: f32_member(o, path, "maxLod")?,
        border_color: enum_member(o, path, "borderColor", vk::BorderColor::from_raw)?,
        unnormalized_coordinates: bool_member(o, path, "unnormalizedCoordinates")?,
    })
}

fn ycbcr_conversion(v: &Value, path: &str) -> Result<SamplerYcbcrConversionCreateInfo, CodecError> {
    let o = obj(v, path)?;
    let components_path = format!("{path}.components");
    let components = obj(get(o, path, "components")?, &components_path)?;
    Ok(SamplerYcbcrConversionCreateInfo {
        next: chain(o, path, ChainSite::None)?,
        format: enum_member(o, path, "format", vk::Format::from_raw)?,
        ycbcr_model: enum_member(
            o,
            path,
            "ycbcrModel",
            vk::SamplerYcbcrModelConversion::from_raw,
        )?,
        ycbcr_range: enum_member(o, path, "ycbcrRange", vk::SamplerYcbcrRange::from_raw)?,
        components: ComponentMapping {
            r: enum_member(components, &components_path, "r", vk::ComponentSwizzle::from_raw)?,
            g: enum_member(components, &components_path, "g", vk::ComponentSwizzle::from_raw)?,
            b: enum_member(components, &components_path, "b", vk::ComponentSwizzle::from_raw)?,
            a: enum_member(components, &components_path, "a", vk::ComponentSwizzle::from_raw)?,
        },
        x_chroma_offset: enum_member(o, path, "xChromaOffset", vk::ChromaLocation::from_raw)?,
        y_chroma_offset: enum_member(o, path, "yChromaOffset", vk::ChromaLocation::from_raw)?,
        chroma_filter: enum_member(o, path, "chromaFilter", vk::Filter::from_raw)?,
        force_explicit_reconstruction: bool_member(o, path, "forceExplicitReconstruction")?,
    })
}

fn descriptor_set_layout(
    v: &Value,
    path: &str,
) -> Result<DescriptorSetLayoutCreateInfo, CodecError> {
    let o = obj(v, path)?;

    let bindings_path = format!("{path}.bindings");
    let bindings = array(get(o, path, "bindings")?, &bindings_path)?
        .iter()
        .enumerate()
        .map(|(i, b)| {
            let p = format!("{bindings_path}[{i}]");
            let b = obj(b, &p)?;
            let descriptor_count = u32_member(b, &p, "descriptorCount")?;
            let immutable_samplers = b
                .get("immutableSamplers")
                .map(|names| string_array(names, &format!("{p}.immutableSamplers")))
                .transpose()?;
            if let Some(names) = &immutable_samplers {
                if names.len() as u32 != descriptor_count {
                    return Err(CodecError::schema(
                        format!("{p}.immutableSamplers"),
                        format!(
                            "expected {descriptor_count} sampler names, found {}",
                            names.len()
                        ),
                    ));
                }
            }
            Ok(DescriptorSetLayoutBinding {
                binding: u32_member(b, &p, "binding")?,
                descriptor_type: enum_member(
                    b,
                    &p,
                    "descriptorType",
                    vk::DescriptorType::from_raw,
                )?,
                descriptor_count,
                stage_flags: flags_member(b, &p, "stageFlags", vk::ShaderStageFlags::from_raw)?,
                immutable_samplers,
            })
        })
        .collect::<Result<_, CodecError>>()?;

    Ok(DescriptorSetLayoutCreateInfo {
        next: chain(o, path, ChainSite::None)?,
        flags: flags_member(o, path, "flags", vk::DescriptorSetLayoutCreateFlags::from_raw)?,
        bindings,
    })
}

fn pipeline_layout(v: &Value, path: &str) -> Result<PipelineLayoutCreateInfo, CodecError> {
    let o = obj(v, path)?;

    let ranges_path = format!("{path}.pushConstantRanges");
    let push_constant_ranges = array(get(o, path, "pushConstantRanges")?, &ranges_path)?
        .iter()
        .enumerate()
        .map(|(i, r)| {
            let p = format!("{ranges_path}[{i}]");
            let r = obj(r, &p)?;
            Ok(PushConstantRange {
                stage_flags: flags_member(r, &p, "stageFlags", vk::ShaderStageFlags::from_raw)?,
                offset: u32_member(r, &p, "offset")?,
                size: u32_member(r, &p, "size")?,
            })
        })
        .collect::<Result<_, CodecError>>()?;

    Ok(PipelineLayoutCreateInfo {
        next: chain(o, path, ChainSite::None)?,
        flags: flags_member(o, path, "flags", vk::PipelineLayoutCreateFlags::from_raw)?,
        set_layouts: string_array(get(o, path, "setLayouts")?, &format!("{path}.setLayouts"))?,
        push_constant_ranges,
    })
}

fn physical_device_features2(v: &Value, path: &str) -> Result<PhysicalDeviceFeatures2, CodecError> {
    let o = obj(v, path)?;
    Ok(PhysicalDeviceFeatures2 {
        next: chain(o, path, ChainSite::None)?,
        features: PhysicalDeviceFeatures::from_value(
            get(o, path, "features")?,
            &format!("{path}.features"),
        )?,
    })
}

// --- render passes -------------------------------------------------------

fn attachment_reference(v: &Value, path: &str) -> Result<AttachmentReference, CodecError> {
    let o = obj(v, path)?;
    Ok(AttachmentReference {
        attachment: u32_member(o, path, "attachment")?,
        layout: enum_member(o, path, "layout", vk::ImageLayout::from_raw)?,
    })
}

fn reference_array(
    o: &Map<String, Value>,
    path: &str,
    key: &str,
) -> Result<Vec<AttachmentReference>, CodecError> {
    let list_path = format!("{path}.{key}");
    array(get(o, path, key)?, &list_path)?
        .iter()
        .enumerate()
        .map(|(i, r)| attachment_reference(r, &format!("{list_path}[{i}]")))
        .collect()
}

fn render_pass(v: &Value, path: &str) -> Result<RenderPassCreateInfo, CodecError> {
    let o = obj(v, path)?;

    let attachments_path = format!("{path}.attachments");
    let attachments = array(get(o, path, "attachments")?, &attachments_path)?
        .iter()
        .enumerate()
        .map(|(i, a)| {
            let p = format!("{attachments_path}[{i}]");
            let a = obj(a, &p)?;
            Ok(AttachmentDescription {
                flags: flags_member(a, &p, "flags", vk::AttachmentDescriptionFlags::from_raw)?,
                format: enum_member(a, &p, "format", vk::Format::from_raw)?,
                samples: flags_member(a, &p, "samples", vk::SampleCountFlags::from_raw)?,
                load_op: enum_member(a, &p, "loadOp", vk::AttachmentLoadOp::from_raw)?,
                store_op: enum_member(a, &p, "storeOp", vk::AttachmentStoreOp::from_raw)?,
                stencil_load_op: enum_member(a, &p, "stencilLoadOp", vk::AttachmentLoadOp::from_raw)?,
                stencil_store_op: enum_member(
                    a,
                    &p,
                    "stencilStoreOp",
                    vk::AttachmentStoreOp::from_raw,
                )?,
                initial_layout: enum_member(a, &p, "initialLayout", vk::ImageLayout::from_raw)?,
                final_layout: enum_member(a, &p, "finalLayout", vk::ImageLayout::from_raw)?,
            })
        })
        .collect::<Result<_, CodecError>>()?;

    let subpasses_path = format!("{path}.subpasses");
    let subpasses = array(get(o, path, "subpasses")?, &subpasses_path)?
        .iter()
        .enumerate()
        .map(|(i, s)| {
            let p = format!("{subpasses_path}[{i}]");
            let s = obj(s, &p)?;
            Ok(SubpassDescription {
                flags: flags_member(s, &p, "flags", vk::SubpassDescriptionFlags::from_raw)?,
                pipeline_bind_point: enum_member(
                    s,
                    &p,
                    "pipelineBindPoint",
                    vk::PipelineBindPoint::from_raw,
                )?,
                input_attachments: reference_array(s, &p, "inputAttachments")?,
                color_attachments: reference_array(s, &p, "colorAttachments")?,
                resolve_attachments: s
                    .get("resolveAttachments")
                    .map(|_| reference_array(s, &p, "resolveAttachments"))
                    .transpose()?,
                depth_stencil_attachment: s
                    .get("depthStencilAttachment")
                    .map(|ds| attachment_reference(ds, &format!("{p}.depthStencilAttachment")))
                    .transpose()?,
                preserve_attachments: u32_array(
                    get(s, &p, "preserveAttachments")?,
                    &format!("{p}.preserveAttachments"),
                )?,
            })
        })
        .collect::<Result<_, CodecError>>()?;

    let dependencies_path = format!("{path}.dependencies");
    let dependencies = array(get(o, path, "dependencies")?, &dependencies_path)?
        .iter()
        .enumerate()
        .map(|(i, d)| {
            let p = format!("{dependencies_path}[{i}]");
            let d = obj(d, &p)?;
            Ok(SubpassDependency {
                src_subpass: u32_member(d, &p, "srcSubpass")?,
                dst_subpass: u32_member(d, &p, "dstSubpass")?,
                src_stage_mask: flags_member(d, &p, "srcStageMask", vk::PipelineStageFlags::from_raw)?,
                dst_stage_mask: flags_member(d, &p, "dstStageMask", vk::PipelineStageFlags::from_raw)?,
                src_access_mask: flags_member(d, &p, "srcAccessMask", vk::AccessFlags::from_raw)?,
                dst_access_mask: flags_member(d, &p, "dstAccessMask", vk::AccessFlags::from_raw)?,
                dependency_flags: flags_member(d, &p, "dependencyFlags", vk::DependencyFlags::from_raw)?,
            })
        })
        .collect::<Result<_, CodecError>>()?;

    Ok(RenderPassCreateInfo {
        next: chain(o, path, ChainSite::None)?,
        flags: flags_member(o, path, "flags", vk::RenderPassCreateFlags::from_raw)?,
        attachments,
        subpasses,
        dependencies,
    })
}

fn attachment_reference2(v: &Value, path: &str) -> Result<AttachmentReference2, CodecError> {
    let o = obj(v, path)?;
    Ok(AttachmentReference2 {
        attachment: u32_member(o, path, "attachment")?,
        layout: enum_member(o, path, "layout", vk::ImageLayout::from_raw)?,
        aspect_mask: flags_member(o, path, "aspectMask", vk::ImageAspectFlags::from_raw)?,
    })
}

fn reference2_array(
    o: &Map<String, Value>,
    path: &str,
    key: &str,
) -> Result<Vec<AttachmentReference2>, CodecError> {
    let list_path = format!("{path}.{key}");
    array(get(o, path, key)?, &list_path)?
        .iter()
        .enumerate()
        .map(|(i, r)| attachment_reference2(r, &format!("{list_path}[{i}]")))
        .collect()
}

fn render_pass2(v: &Value, path: &str) -> Result<RenderPassCreateInfo2, CodecError> {
    let o = obj(v, path)?;

    let attachments_path = format!("{path}.attachments");
    let attachments = array(get(o, path, "attachments")?, &attachments_path)?
        .iter()
        .enumerate()
        .map(|(i, a)| {
            let p = format!("{attachments_path}[{i}]");
            let a = obj(a, &p)?;
            Ok(AttachmentDescription2 {
                flags: flags_member(a, &p, "flags", vk::AttachmentDescriptionFlags::from_raw)?,
                format: enum_member(a, &p, "format", vk::Format::from_raw)?,
                samples: flags_member(a, &p, "samples", vk::SampleCountFlags::from_raw)?,
                load_op: enum_member(a, &p, "loadOp", vk::AttachmentLoadOp::from_raw)?,
                store_op: enum_member(a, &p, "storeOp", vk::AttachmentStoreOp::from_raw)?,
                stencil_load_op: enum_member(a, &p, "stencilLoadOp", vk::AttachmentLoadOp::from_raw)?,
                stencil_store_op: enum_member(
                    a,
                    &p,
                    "stencilStoreOp",
                    vk::AttachmentStoreOp::from_raw,
                )?,
                initial_layout: enum_member(a, &p, "initialLayout", vk::ImageLayout::from_raw)?,
                final_layout: enum_member(a, &p, "finalLayout", vk::ImageLayout::from_raw)?,
            })
        })
        .collect::<Result<_, CodecError>>()?;

    let subpasses_path = format!("{path}.subpasses");
    let subpasses = array(get(o, path, "subpasses")?, &subpasses_path)?
        .iter()
        .enumerate()
        .map(|(i, s)| {
            let p = format!("{subpasses_path}[{i}]");
            let s = obj(s, &p)?;
            Ok(SubpassDescription2 {
                flags: flags_member(s, &p, "flags", vk::SubpassDescriptionFlags::from_raw)?,
                pipeline_bind_point: enum_member(
                    s,
                    &p,
                    "pipelineBindPoint",
                    vk::PipelineBindPoint::from_raw,
                )?,
                view_mask: u32_member(s, &p, "viewMask")?,
                input_attachments: reference2_array(s, &p, "inputAttachments")?,
                color_attachments: reference2_array(s, &p, "colorAttachments")?,
                resolve_attachments: s
                    .get("resolveAttachments")
                    .map(|_| reference2_array(s, &p, "resolveAttachments"))
                    .transpose()?,
                depth_stencil_attachment: s
                    .get("depthStencilAttachment")
                    .map(|ds| attachment_reference2(ds, &format!("{p}.depthStencilAttachment")))
                    .transpose()?,
                preserve_attachments: u32_array(
                    get(s, &p, "preserveAttachments")?,
                    &format!("{p}.preserveAttachments"),
                )?,
            })
        })
        .collect::<Result<_, CodecError>>()?;

    let dependencies_path = format!("{path}.dependencies");
    let dependencies = array(get(o, path, "dependencies")?, &dependencies_path)?
        .iter()
        .enumerate()
        .map(|(i, d)| {
            let p = format!("{dependencies_path}[{i}]");
            let d = obj(d, &p)?;
            Ok(SubpassDependency2 {
                src_subpass: u32_member(d, &p, "srcSubpass")?,
                dst_subpass: u32_member(d, &p, "dstSubpass")?,
                src_stage_mask: flags_member(d, &p, "srcStageMask", vk::PipelineStageFlags::from_raw)?,
                dst_stage_mask: flags_member(d, &p, "dstStageMask", vk::PipelineStageFlags::from_raw)?,
                src_access_mask: flags_member(d, &p, "srcAccessMask", vk::AccessFlags::from_raw)?,
                dst_access_mask: flags_member(d, &p, "dstAccessMask", vk::AccessFlags::from_raw)?,
                dependency_flags: flags_member(d, &p, "dependencyFlags", vk::DependencyFlags::from_raw)?,
                view_offset: i32_member(d, &p, "viewOffset")?,
            })
        })
        .collect::<Result<_, CodecError>>()?;

    Ok(RenderPassCreateInfo2 {
        next: chain(o, path, ChainSite::None)?,
        flags: flags_member(o, path, "flags", vk::RenderPassCreateFlags::from_raw)?,
        attachments,
        subpasses,
        dependencies,
        correlated_view_masks: u32_array(
            get(o, path, "correlatedViewMasks")?,
            &format!("{path}.correlatedViewMasks"),
        )?,
    })
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::Generator;
    use crate::test_fixtures::{compute_snapshot, graphics_snapshot};

    fn schema_path(err: CodecError) -> String {
        match err {
            CodecError::Schema { path, .. } => path,
            CodecError::Syntax(e) => panic!("expected a schema error, got syntax error: {e}"),
        }
    }

    #[test]
    fn graphics_snapshot_round_trips() {
        let snapshot = graphics_snapshot();
        let mut pcg = Generator::new();
        let text = pcg.generate(&snapshot).unwrap().to_owned();

        let mut pcp = Parser::new();
        assert_eq!(pcp.parse(&text).unwrap(), &snapshot);
    }

    #[test]
    fn compute_snapshot_round_trips() {
        let snapshot = compute_snapshot();
        let mut pcg = Generator::new();
        let text = pcg.generate(&snapshot).unwrap().to_owned();

        let mut pcp = Parser::new();
        assert_eq!(pcp.parse(&text).unwrap(), &snapshot);
    }

    #[test]
    fn regenerated_document_is_content_equivalent() {
        let mut pcg = Generator::new();
        let first = pcg.generate(&compute_snapshot()).unwrap().to_owned();

        let mut pcp = Parser::new();
        let reparsed = pcp.parse(&first).unwrap().clone();
        let second = pcg.generate(&reparsed).unwrap();

        let a: Value = serde_json::from_str(&first).unwrap();
        let b: Value = serde_json::from_str(second).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn syntax_error_is_reported_as_such() {
        let err = Parser::new().parse("{ not json").unwrap_err();
        assert!(matches!(err, CodecError::Syntax(_)));
    }

    #[test]
    fn missing_state_object_is_rejected() {
        let err = Parser::new()
            .parse(r#"{ "pipelineUUID": [0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0], "deviceExtensions": [] }"#)
            .unwrap_err();
        assert_eq!(schema_path(err), "$");
    }

    #[test]
    fn both_state_objects_are_rejected() {
        let err = Parser::new()
            .parse(
                r#"{
                    "pipelineUUID": [0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0],
                    "deviceExtensions": [],
                    "graphicsPipelineState": {},
                    "computePipelineState": {}
                }"#,
            )
            .unwrap_err();
        assert_eq!(schema_path(err), "$");
    }

    #[test]
    fn short_uuid_is_rejected_with_path() {
        let err = Parser::new()
            .parse(r#"{ "pipelineUUID": [1, 2, 3], "deviceExtensions": [] }"#)
            .unwrap_err();
        assert_eq!(schema_path(err), "$.pipelineUUID");
    }

    #[test]
    fn type_error_names_the_exact_member() {
        let mut pcg = Generator::new();
        let text = pcg.generate(&compute_snapshot()).unwrap();
        let mut doc: Value = serde_json::from_str(text).unwrap();
        doc["computePipelineState"]["computePipeline"]["stage"]["name"] = Value::Bool(true);

        let err = Parser::new().parse(&doc.to_string()).unwrap_err();
        assert_eq!(
            schema_path(err),
            "$.computePipelineState.computePipeline.stage.name"
        );
    }

    #[test]
    fn ycbcr_info_is_rejected_on_a_pipeline_chain() {
        let mut pcg = Generator::new();
        let text = pcg.generate(&compute_snapshot()).unwrap();
        let mut doc: Value = serde_json::from_str(text).unwrap();
        // A conversion reference is only valid on a sampler.
        doc["computePipelineState"]["computePipeline"]["pNext"] = serde_json::json!([{
            "sType": vk::StructureType::SAMPLER_YCBCR_CONVERSION_INFO.as_raw(),
            "conversion": "camera_ycbcr"
        }]);

        let err = Parser::new().parse(&doc.to_string()).unwrap_err();
        assert_eq!(
            schema_path(err),
            "$.computePipelineState.computePipeline.pNext[0].sType"
        );
    }

    #[test]
    fn dangling_sampler_reference_is_rejected() {
        let mut pcg = Generator::new();
        let text = pcg.generate(&compute_snapshot()).unwrap();
        let mut doc: Value = serde_json::from_str(text).unwrap();
        doc["computePipelineState"]["descriptorSetLayouts"][0]["bindings"][0]
            ["immutableSamplers"] = serde_json::json!(["nonexistent"]);

        let err = Parser::new().parse(&doc.to_string()).unwrap_err();
        assert_eq!(
            schema_path(err),
            "$.computePipelineState.descriptorSetLayouts[0].bindings[0].immutableSamplers[0]"
        );
    }

    #[test]
    fn sampler_count_mismatch_is_rejected() {
        let mut pcg = Generator::new();
        let text = pcg.generate(&compute_snapshot()).unwrap();
        let mut doc: Value = serde_json::from_str(text).unwrap();
        doc["computePipelineState"]["descriptorSetLayouts"][0]["bindings"][0]
            ["immutableSamplers"] = serde_json::json!(["camera_sampler", "camera_sampler"]);

        let err = Parser::new().parse(&doc.to_string()).unwrap_err();
        assert_eq!(
            schema_path(err),
            "$.computePipelineState.descriptorSetLayouts[0].bindings[0].immutableSamplers"
        );
    }

    #[test]
    fn standalone_struct_round_trips() {
        let snapshot = graphics_snapshot();
        let crate::PipelineState::Graphics(state) = &snapshot.state else {
            unreachable!();
        };
        let info = AnyCreateInfo::GraphicsPipeline(state.pipeline.clone());

        let mut pcg = Generator::new();
        let text = pcg.generate_struct(&info).unwrap();
        assert_eq!(Parser::parse_struct(text).unwrap(), info);
    }

    #[test]
    fn standalone_struct_with_unknown_stype_is_rejected() {
        let err = Parser::parse_struct(r#"{ "sType": -1 }"#).unwrap_err();
        assert_eq!(schema_path(err), "$.sType");
    }
}
