// Copyright 2026 The VkSC PCUtil Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Generator
//!
//! Snapshot to JSON text.  Serialization itself cannot fail; what can fail
//! is the snapshot's internal consistency, so the generator checks every
//! name reference (set layouts, immutable samplers, YCbCr conversions)
//! against the named objects actually present before emitting anything.
//! Diagnostics use the same `$`-rooted paths as the parser, pointing at
//! where the dangling reference would have appeared in the output.

use std::collections::HashSet;

use serde_json::{Map, Value, json};

use crate::CodecError;
use crate::model::*;
use crate::parse::ChainSite;

/// Serializes pipeline snapshots and standalone create infos to JSON.
///
/// The generated text is owned by the generator and stays valid until the
/// next `generate*` call on the same instance.
#[derive(Default)]
pub struct Generator {
    output: String,
}

impl Generator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generate the pipeline JSON document for one snapshot.
    pub fn generate(&mut self, snapshot: &PipelineSnapshot) -> Result<&str, CodecError> {
        check_references(snapshot)?;

        let mut root = Map::new();
        root.insert("pipelineUUID".to_owned(), uuid_value(&snapshot.pipeline_uuid));
        root.insert(
            "deviceExtensions".to_owned(),
            json!(snapshot.device_extensions),
        );
        match &snapshot.state {
            PipelineState::Graphics(state) => {
                root.insert("graphicsPipelineState".to_owned(), graphics_state(state));
            }
            PipelineState::Compute(state) => {
                root.insert("computePipelineState".to_owned(), compute_state(state));
            }
        }

        self.output = serde_json::to_string_pretty(&Value::Object(root))?;
        Ok(&self.output)
    }

    /// Generate a standalone create info document, discriminated by a raw
    /// `sType` member so it can be parsed back without outside context.
    pub fn generate_struct(&mut self, info: &AnyCreateInfo) -> Result<&str, CodecError> {
        let body = match info {
            AnyCreateInfo::GraphicsPipeline(ci) => graphics_pipeline(ci),
            AnyCreateInfo::ComputePipeline(ci) => compute_pipeline(ci),
            AnyCreateInfo::SamplerYcbcrConversion(ci) => ycbcr_conversion(ci),
            AnyCreateInfo::Sampler(ci) => sampler(ci),
            AnyCreateInfo::DescriptorSetLayout(ci) => descriptor_set_layout(ci),
            AnyCreateInfo::PipelineLayout(ci) => pipeline_layout(ci),
            AnyCreateInfo::PhysicalDeviceFeatures2(ci) => physical_device_features2(ci),
            AnyCreateInfo::RenderPass(ci) => render_pass(ci),
            AnyCreateInfo::RenderPass2(ci) => render_pass2(ci),
        };

        let mut root = Map::new();
        root.insert("sType".to_owned(), json!(info.stype()));
        if let Value::Object(fields) = body {
            root.extend(fields);
        }

        self.output = serde_json::to_string_pretty(&Value::Object(root))?;
        Ok(&self.output)
    }
}

/// Every by-name reference in the snapshot must resolve to a named object
/// in the same snapshot, and every extension chain must only carry
/// structures its site accepts.  Shared with the parser, which enforces the
/// same rules on incoming documents; the paths read the same from either
/// side.
pub(crate) fn check_references(snapshot: &PipelineSnapshot) -> Result<(), CodecError> {
    let (state_key, conversions, samplers, set_layouts, layout, features) = match &snapshot.state {
        PipelineState::Graphics(s) => (
            "graphicsPipelineState",
            &s.ycbcr_conversions,
            &s.immutable_samplers,
            &s.descriptor_set_layouts,
            &s.pipeline_layout,
            &s.physical_device_features,
        ),
        PipelineState::Compute(s) => (
            "computePipelineState",
            &s.ycbcr_conversions,
            &s.immutable_samplers,
            &s.descriptor_set_layouts,
            &s.pipeline_layout,
            &s.physical_device_features,
        ),
    };

    match &snapshot.state {
        PipelineState::Graphics(s) => {
            check_chain(
                &s.pipeline.next,
                ChainSite::Pipeline,
                &format!("$.{state_key}.graphicsPipeline"),
            )?;
            match &s.render_pass {
                RenderPassVariant::V1(rp) => check_chain(
                    &rp.next,
                    ChainSite::None,
                    &format!("$.{state_key}.renderPass"),
                )?,
                RenderPassVariant::V2(rp) => check_chain(
                    &rp.next,
                    ChainSite::None,
                    &format!("$.{state_key}.renderPass2"),
                )?,
            }
        }
        PipelineState::Compute(s) => {
            check_chain(
                &s.pipeline.next,
                ChainSite::Pipeline,
                &format!("$.{state_key}.computePipeline"),
            )?;
        }
    }
    for (i, conv) in conversions.iter().enumerate() {
        check_chain(
            &conv.info.next,
            ChainSite::None,
            &format!("$.{state_key}.ycbcrSamplers[{i}]"),
        )?;
    }
    for (i, dsl) in set_layouts.iter().enumerate() {
        check_chain(
            &dsl.info.next,
            ChainSite::None,
            &format!("$.{state_key}.descriptorSetLayouts[{i}]"),
        )?;
    }
    check_chain(
        &layout.next,
        ChainSite::None,
        &format!("$.{state_key}.pipelineLayout"),
    )?;
    if let Some(features) = features {
        check_chain(
            &features.next,
            ChainSite::None,
            &format!("$.{state_key}.physicalDeviceFeatures"),
        )?;
    }

    let conversion_names: HashSet<&str> = conversions.iter().map(|n| n.name.as_str()).collect();
    let sampler_names: HashSet<&str> = samplers.iter().map(|n| n.name.as_str()).collect();
    let layout_names: HashSet<&str> = set_layouts.iter().map(|n| n.name.as_str()).collect();

    for (i, samp) in samplers.iter().enumerate() {
        check_chain(
            &samp.info.next,
            ChainSite::Sampler,
            &format!("$.{state_key}.immutableSamplers[{i}]"),
        )?;
        for node in &samp.info.next {
            if let ExtensionNode::SamplerYcbcrConversion(info) = node {
                if !conversion_names.contains(info.conversion.as_str()) {
                    return Err(CodecError::schema(
                        format!("$.{state_key}.immutableSamplers[{i}].pNext"),
                        format!("unknown YCbCr conversion \"{}\"", info.conversion),
                    ));
                }
            }
        }
    }

    for (i, dsl) in set_layouts.iter().enumerate() {
        for (j, binding) in dsl.info.bindings.iter().enumerate() {
            let Some(names) = &binding.immutable_samplers else {
                continue;
            };
            for (k, name) in names.iter().enumerate() {
                if !sampler_names.contains(name.as_str()) {
                    return Err(CodecError::schema(
                        format!(
                            "$.{state_key}.descriptorSetLayouts[{i}].bindings[{j}].immutableSamplers[{k}]"
                        ),
                        format!("unknown immutable sampler \"{name}\""),
                    ));
                }
            }
        }
    }

    for (i, name) in layout.set_layouts.iter().enumerate() {
        if !layout_names.contains(name.as_str()) {
            return Err(CodecError::schema(
                format!("$.{state_key}.pipelineLayout.setLayouts[{i}]"),
                format!("unknown descriptor set layout \"{name}\""),
            ));
        }
    }

    Ok(())
}

fn check_chain(next: &[ExtensionNode], site: ChainSite, path: &str) -> Result<(), CodecError> {
    for (i, node) in next.iter().enumerate() {
        let stype = node.stype();
        if !site.accepts(stype) {
            return Err(CodecError::schema(
                format!("{path}.pNext[{i}].sType"),
                format!("structure type {stype} is not valid in this chain"),
            ));
        }
    }
    Ok(())
}

fn uuid_value(uuid: &[u8; UUID_SIZE]) -> Value {
    Value::Array(uuid.iter().map(|b| json!(b)).collect())
}

fn named<T>(items: &[Named<T>], body: impl Fn(&T) -> Value) -> Value {
    Value::Array(
        items
            .iter()
            .map(|n| {
                let mut obj = Map::new();
                obj.insert("name".to_owned(), json!(n.name));
                if let Value::Object(fields) = body(&n.info) {
                    obj.extend(fields);
                }
                Value::Object(obj)
            })
            .collect(),
    )
}

fn shader_files(files: &[ShaderFileRef]) -> Value {
    Value::Array(
        files
            .iter()
            .map(|f| {
                json!({
                    "stage": f.stage.as_raw(),
                    "filename": f.filename,
                })
            })
            .collect(),
    )
}

fn graphics_state(state: &GraphicsPipelineState) -> Value {
    let mut obj = Map::new();
    obj.insert(
        "ycbcrSamplers".to_owned(),
        named(&state.ycbcr_conversions, ycbcr_conversion),
    );
    obj.insert(
        "immutableSamplers".to_owned(),
        named(&state.immutable_samplers, sampler),
    );
    obj.insert(
        "descriptorSetLayouts".to_owned(),
        named(&state.descriptor_set_layouts, descriptor_set_layout),
    );
    obj.insert(
        "pipelineLayout".to_owned(),
        pipeline_layout(&state.pipeline_layout),
    );
    match &state.render_pass {
        RenderPassVariant::V1(rp) => {
            obj.insert("renderPass".to_owned(), render_pass(rp));
        }
        RenderPassVariant::V2(rp) => {
            obj.insert("renderPass2".to_owned(), render_pass2(rp));
        }
    }
    obj.insert(
        "graphicsPipeline".to_owned(),
        graphics_pipeline(&state.pipeline),
    );
    obj.insert("shaderFileNames".to_owned(), shader_files(&state.shader_files));
    if let Some(features) = &state.physical_device_features {
        obj.insert(
            "physicalDeviceFeatures".to_owned(),
            physical_device_features2(features),
        );
    }
    Value::Object(obj)
}

fn compute_state(state: &ComputePipelineState) -> Value {
    let mut obj = Map::new();
    obj.insert(
        "ycbcrSamplers".to_owned(),
        named(&state.ycbcr_conversions, ycbcr_conversion),
    );
    obj.insert(
        "immutableSamplers".to_owned(),
        named(&state.immutable_samplers, sampler),
    );
    obj.insert(
        "descriptorSetLayouts".to_owned(),
        named(&state.descriptor_set_layouts, descriptor_set_layout),
    );
    obj.insert(
        "pipelineLayout".to_owned(),
        pipeline_layout(&state.pipeline_layout),
    );
    obj.insert(
        "computePipeline".to_owned(),
        compute_pipeline(&state.pipeline),
    );
    obj.insert("shaderFileNames".to_owned(), shader_files(&state.shader_files));
    if let Some(features) = &state.physical_device_features {
        obj.insert(
            "physicalDeviceFeatures".to_owned(),
            physical_device_features2(features),
        );
    }
    Value::Object(obj)
}

// --- extension chains ----------------------------------------------------

fn extension_node(node: &ExtensionNode) -> Value {
    let mut obj = Map::new();
    obj.insert("sType".to_owned(), json!(node.stype()));
    match node {
        ExtensionNode::PipelineOffline(info) => {
            obj.insert(
                "pipelineIdentifier".to_owned(),
                uuid_value(&info.pipeline_identifier),
            );
            obj.insert("matchControl".to_owned(), json!(info.match_control));
            obj.insert("poolEntrySize".to_owned(), json!(info.pool_entry_size));
        }
        ExtensionNode::SamplerYcbcrConversion(info) => {
            obj.insert("conversion".to_owned(), json!(info.conversion));
        }
        ExtensionNode::DevicePrivateData(info) => {
            obj.insert(
                "privateDataSlotRequestCount".to_owned(),
                json!(info.private_data_slot_request_count),
            );
        }
        ExtensionNode::PipelinePropertiesIdentifier(info) => {
            obj.insert(
                "pipelineIdentifier".to_owned(),
                uuid_value(&info.pipeline_identifier),
            );
        }
    }
    Value::Object(obj)
}

/// Empty chains are omitted from the output entirely.
fn insert_next(obj: &mut Map<String, Value>, next: &[ExtensionNode]) {
    if !next.is_empty() {
        obj.insert(
            "pNext".to_owned(),
            Value::Array(next.iter().map(extension_node).collect()),
        );
    }
}

// --- pipelines -----------------------------------------------------------

fn shader_stage(stage: &PipelineShaderStageCreateInfo) -> Value {
    let mut obj = Map::new();
    obj.insert("flags".to_owned(), json!(stage.flags.as_raw()));
    obj.insert("stage".to_owned(), json!(stage.stage.as_raw()));
    obj.insert("name".to_owned(), json!(stage.name));
    if let Some(spec) = &stage.specialization_info {
        obj.insert(
            "specializationInfo".to_owned(),
            json!({
                "mapEntries": spec
                    .map_entries
                    .iter()
                    .map(|e| json!({
                        "constantID": e.constant_id,
                        "offset": e.offset,
                        "size": e.size,
                    }))
                    .collect::<Vec<_>>(),
                "data": spec.data,
            }),
        );
    }
    Value::Object(obj)
}

fn graphics_pipeline(ci: &GraphicsPipelineCreateInfo) -> Value {
    let mut obj = Map::new();
    insert_next(&mut obj, &ci.next);
    obj.insert("flags".to_owned(), json!(ci.flags.as_raw()));
    obj.insert(
        "stages".to_owned(),
        Value::Array(ci.stages.iter().map(shader_stage).collect()),
    );
    if let Some(s) = &ci.vertex_input_state {
        obj.insert("vertexInputState".to_owned(), vertex_input(s));
    }
    if let Some(s) = &ci.input_assembly_state {
        obj.insert(
            "inputAssemblyState".to_owned(),
            json!({
                "topology": s.topology.as_raw(),
                "primitiveRestartEnable": s.primitive_restart_enable,
            }),
        );
    }
    if let Some(s) = &ci.tessellation_state {
        obj.insert(
            "tessellationState".to_owned(),
            json!({ "patchControlPoints": s.patch_control_points }),
        );
    }
    if let Some(s) = &ci.viewport_state {
        obj.insert("viewportState".to_owned(), viewport_state(s));
    }
    if let Some(s) = &ci.rasterization_state {
        obj.insert("rasterizationState".to_owned(), rasterization(s));
    }
    if let Some(s) = &ci.multisample_state {
        obj.insert("multisampleState".to_owned(), multisample(s));
    }
    if let Some(s) = &ci.depth_stencil_state {
        obj.insert("depthStencilState".to_owned(), depth_stencil(s));
    }
    if let Some(s) = &ci.color_blend_state {
        obj.insert("colorBlendState".to_owned(), color_blend(s));
    }
    if let Some(s) = &ci.dynamic_state {
        obj.insert(
            "dynamicState".to_owned(),
            json!({
                "dynamicStates": s
                    .dynamic_states
                    .iter()
                    .map(|d| d.as_raw())
                    .collect::<Vec<_>>(),
            }),
        );
    }
    obj.insert("subpass".to_owned(), json!(ci.subpass));
    obj.insert(
        "basePipelineIndex".to_owned(),
        json!(ci.base_pipeline_index),
    );
    Value::Object(obj)
}

fn compute_pipeline(ci: &ComputePipelineCreateInfo) -> Value {
    let mut obj = Map::new();
    insert_next(&mut obj, &ci.next);
    obj.insert("flags".to_owned(), json!(ci.flags.as_raw()));
    obj.insert("stage".to_owned(), shader_stage(&ci.stage));
    obj.insert(
        "basePipelineIndex".to_owned(),
        json!(ci.base_pipeline_index),
    );
    Value::Object(obj)
}

fn vertex_input(s: &PipelineVertexInputStateCreateInfo) -> Value {
    json!({
        "vertexBindingDescriptions": s
            .vertex_binding_descriptions
            .iter()
            .map(|b| json!({
                "binding": b.binding,
                "stride": b.stride,
                "inputRate": b.input_rate.as_raw(),
            }))
            .collect::<Vec<_>>(),
        "vertexAttributeDescriptions": s
            .vertex_attribute_descriptions
            .iter()
            .map(|a| json!({
                "location": a.location,
                "binding": a.binding,
                "format": a.format.as_raw(),
                "offset": a.offset,
            }))
            .collect::<Vec<_>>(),
    })
}

fn viewport_state(s: &PipelineViewportStateCreateInfo) -> Value {
    json!({
        "viewports": s
            .viewports
            .iter()
            .map(|v| json!({
                "x": v.x,
                "y": v.y,
                "width": v.width,
                "height": v.height,
                "minDepth": v.min_depth,
                "maxDepth": v.max_depth,
            }))
            .collect::<Vec<_>>(),
        "scissors": s
            .scissors
            .iter()
            .map(|r| json!({
                "offset": { "x": r.offset.x, "y": r.offset.y },
                "extent": { "width": r.extent.width, "height": r.extent.height },
            }))
            .collect::<Vec<_>>(),
    })
}

fn rasterization(s: &PipelineRasterizationStateCreateInfo) -> Value {
    json!({
        "depthClampEnable": s.depth_clamp_enable,
        "rasterizerDiscardEnable": s.rasterizer_discard_enable,
        "polygonMode": s.polygon_mode.as_raw(),
        "cullMode": s.cull_mode.as_raw(),
        "frontFace": s.front_face.as_raw(),
        "depthBiasEnable": s.depth_bias_enable,
        "depthBiasConstantFactor": s.depth_bias_constant_factor,
        "depthBiasClamp": s.depth_bias_clamp,
        "depthBiasSlopeFactor": s.depth_bias_slope_factor,
        "lineWidth": s.line_width,
    })
}

fn multisample(s: &PipelineMultisampleStateCreateInfo) -> Value {
    let mut obj = Map::new();
    obj.insert(
        "rasterizationSamples".to_owned(),
        json!(s.rasterization_samples.as_raw()),
    );
    obj.insert(
        "sampleShadingEnable".to_owned(),
        json!(s.sample_shading_enable),
    );
    obj.insert("minSampleShading".to_owned(), json!(s.min_sample_shading));
    if let Some(mask) = &s.sample_mask {
        obj.insert("sampleMask".to_owned(), json!(mask));
    }
    obj.insert(
        "alphaToCoverageEnable".to_owned(),
        json!(s.alpha_to_coverage_enable),
    );
    obj.insert("alphaToOneEnable".to_owned(), json!(s.alpha_to_one_enable));
    Value::Object(obj)
}

fn stencil_op_state(s: &StencilOpState) -> Value {
    json!({
        "failOp": s.fail_op.as_raw(),
        "passOp": s.pass_op.as_raw(),
        "depthFailOp": s.depth_fail_op.as_raw(),
        "compareOp": s.compare_op.as_raw(),
        "compareMask": s.compare_mask,
        "writeMask": s.write_mask,
        "reference": s.reference,
    })
}

fn depth_stencil(s: &PipelineDepthStencilStateCreateInfo) -> Value {
    json!({
        "depthTestEnable": s.depth_test_enable,
        "depthWriteEnable": s.depth_write_enable,
        "depthCompareOp": s.depth_compare_op.as_raw(),
        "depthBoundsTestEnable": s.depth_bounds_test_enable,
        "stencilTestEnable": s.stencil_test_enable,
        "front": stencil_op_state(&s.front),
        "back": stencil_op_state(&s.back),
        "minDepthBounds": s.min_depth_bounds,
        "maxDepthBounds": s.max_depth_bounds,
    })
}

fn color_blend(s: &PipelineColorBlendStateCreateInfo) -> Value {
    json!({
        "logicOpEnable": s.logic_op_enable,
        "logicOp": s.logic_op.as_raw(),
        "attachments": s
            .attachments
            .iter()
            .map(|a| json!({
                "blendEnable": a.blend_enable,
                "srcColorBlendFactor": a.src_color_blend_factor.as_raw(),
                "dstColorBlendFactor": a.dst_color_blend_factor.as_raw(),
                "colorBlendOp": a.color_blend_op.as_raw(),
                "srcAlphaBlendFactor": a.src_alpha_blend_factor.as_raw(),
                "dstAlphaBlendFactor": a.dst_alpha_blend_factor.as_raw(),
                "alphaBlendOp": a.alpha_blend_op.as_raw(),
                "colorWriteMask": a.color_write_mask.as_raw(),
            }))
            .collect::<Vec<_>>(),
        "blendConstants": s.blend_constants,
    })
}

// --- samplers and layouts ------------------------------------------------

fn sampler(ci: &SamplerCreateInfo) -> Value {
    let mut obj = Map::new();
    insert_next(&mut obj, &ci.next);
    obj.insert("flags".to_owned(), json!(ci.flags.as_raw()));
    obj.insert("magFilter".to_owned(), json!(ci.mag_filter.as_raw()));
    obj.insert("minFilter".to_owned(), json!(ci.min_filter.as_raw()));
    obj.insert("mipmapMode".to_owned(), json!(ci.mipmap_mode.as_raw()));
    obj.insert("addressModeU".to_owned(), json!(ci.address_mode_u.as_raw()));
    obj.insert("addressModeV".to_owned(), json!(ci.address_mode_v.as_raw()));
    obj.insert("addressModeW".to_owned(), json!(ci.address_mode_w.as_raw()));
    obj.insert("mipLodBias".to_owned(), json!(ci.mip_lod_bias));
    obj.insert("anisotropyEnable".to_owned(), json!(ci.anisotropy_enable));
    obj.insert("maxAnisotropy".to_owned(), json!(ci.max_anisotropy));
    obj.insert("compareEnable".to_owned(), json!(ci.compare_enable));
    obj.insert("compareOp".to_owned(), json!(ci.compare_op.as_raw()));
    obj.insert("minLod".to_owned(), json!(ci.min_lod));
    obj.insert("maxLod".to_owned(), json!(ci.max_lod));
    obj.insert("borderColor".to_owned(), json!(ci.border_color.as_raw()));
    obj.insert(
        "unnormalizedCoordinates".to_owned(),
        json!(ci.unnormalized_coordinates),
    );
    Value::Object(obj)
}

fn ycbcr_conversion(ci: &SamplerYcbcrConversionCreateInfo) -> Value {
    let mut obj = Map::new();
    insert_next(&mut obj, &ci.next);
    obj.insert("format".to_owned(), json!(ci.format.as_raw()));
    obj.insert("ycbcrModel".to_owned(), json!(ci.ycbcr_model.as_raw()));
    obj.insert("ycbcrRange".to_owned(), json!(ci.ycbcr_range.as_raw()));
    obj.insert(
        "components".to_owned(),
        json!({
            "r": ci.components.r.as_raw(),
            "g": ci.components.g.as_raw(),
            "b": ci.components.b.as_raw(),
            "a": ci.components.a.as_raw(),
        }),
    );
    obj.insert(
        "xChromaOffset".to_owned(),
        json!(ci.x_chroma_offset.as_raw()),
    );
    obj.insert(
        "yChromaOffset".to_owned(),
        json!(ci.y_chroma_offset.as_raw()),
    );
    obj.insert("chromaFilter".to_owned(), json!(ci.chroma_filter.as_raw()));
    obj.insert(
        "forceExplicitReconstruction".to_owned(),
        json!(ci.force_explicit_reconstruction),
    );
    Value::Object(obj)
}

fn descriptor_set_layout(ci: &DescriptorSetLayoutCreateInfo) -> Value {
    let mut obj = Map::new();
    insert_next(&mut obj, &ci.next);
    obj.insert("flags".to_owned(), json!(ci.flags.as_raw()));
    obj.insert(
        "bindings".to_owned(),
        Value::Array(
            ci.bindings
                .iter()
                .map(|b| {
                    let mut binding = Map::new();
                    binding.insert("binding".to_owned(), json!(b.binding));
                    binding.insert(
                        "descriptorType".to_owned(),
                        json!(b.descriptor_type.as_raw()),
                    );
                    binding.insert("descriptorCount".to_owned(), json!(b.descriptor_count));
                    binding.insert("stageFlags".to_owned(), json!(b.stage_flags.as_raw()));
                    if let Some(names) = &b.immutable_samplers {
                        binding.insert("immutableSamplers".to_owned(), json!(names));
                    }
                    Value::Object(binding)
                })
                .collect(),
        ),
    );
    Value::Object(obj)
}

fn pipeline_layout(ci: &PipelineLayoutCreateInfo) -> Value {
    let mut obj = Map::new();
    insert_next(&mut obj, &ci.next);
    obj.insert("flags".to_owned(), json!(ci.flags.as_raw()));
    obj.insert("setLayouts".to_owned(), json!(ci.set_layouts));
    obj.insert(
        "pushConstantRanges".to_owned(),
        Value::Array(
            ci.push_constant_ranges
                .iter()
                .map(|r| {
                    json!({
                        "stageFlags": r.stage_flags.as_raw(),
                        "offset": r.offset,
                        "size": r.size,
                    })
                })
                .collect(),
        ),
    );
    Value::Object(obj)
}

fn physical_device_features2(ci: &PhysicalDeviceFeatures2) -> Value {
    let mut obj = Map::new();
    insert_next(&mut obj, &ci.next);
    obj.insert("features".to_owned(), ci.features.to_value());
    Value::Object(obj)
}

// --- render passes -------------------------------------------------------

fn attachment_reference(r: &AttachmentReference) -> Value {
    json!({ "attachment": r.attachment, "layout": r.layout.as_raw() })
}

fn render_pass(ci: &RenderPassCreateInfo) -> Value {
    let mut obj = Map::new();
    insert_next(&mut obj, &ci.next);
    obj.insert("flags".to_owned(), json!(ci.flags.as_raw()));
    obj.insert(
        "attachments".to_owned(),
        Value::Array(
            ci.attachments
                .iter()
                .map(|a| {
                    json!({
                        "flags": a.flags.as_raw(),
                        "format": a.format.as_raw(),
                        "samples": a.samples.as_raw(),
                        "loadOp": a.load_op.as_raw(),
                        "storeOp": a.store_op.as_raw(),
                        "stencilLoadOp": a.stencil_load_op.as_raw(),
                        "stencilStoreOp": a.stencil_store_op.as_raw(),
                        "initialLayout": a.initial_layout.as_raw(),
                        "finalLayout": a.final_layout.as_raw(),
                    })
                })
                .collect(),
        ),
    );
    obj.insert(
        "subpasses".to_owned(),
        Value::Array(
            ci.subpasses
                .iter()
                .map(|s| {
                    let mut sub = Map::new();
                    sub.insert("flags".to_owned(), json!(s.flags.as_raw()));
                    sub.insert(
                        "pipelineBindPoint".to_owned(),
                        json!(s.pipeline_bind_point.as_raw()),
                    );
                    sub.insert(
                        "inputAttachments".to_owned(),
                        Value::Array(s.input_attachments.iter().map(attachment_reference).collect()),
                    );
                    sub.insert(
                        "colorAttachments".to_owned(),
                        Value::Array(s.color_attachments.iter().map(attachment_reference).collect()),
                    );
                    if let Some(resolve) = &s.resolve_attachments {
                        sub.insert(
                            "resolveAttachments".to_owned(),
                            Value::Array(resolve.iter().map(attachment_reference).collect()),
                        );
                    }
                    if let Some(ds) = &s.depth_stencil_attachment {
                        sub.insert(
                            "depthStencilAttachment".to_owned(),
                            attachment_reference(ds),
                        );
                    }
                    sub.insert(
                        "preserveAttachments".to_owned(),
                        json!(s.preserve_attachments),
                    );
                    Value::Object(sub)
                })
                .collect(),
        ),
    );
    obj.insert(
        "dependencies".to_owned(),
        Value::Array(
            ci.dependencies
                .iter()
                .map(|d| {
                    json!({
                        "srcSubpass": d.src_subpass,
                        "dstSubpass": d.dst_subpass,
                        "srcStageMask": d.src_stage_mask.as_raw(),
                        "dstStageMask": d.dst_stage_mask.as_raw(),
                        "srcAccessMask": d.src_access_mask.as_raw(),
                        "dstAccessMask": d.dst_access_mask.as_raw(),
                        "dependencyFlags": d.dependency_flags.as_raw(),
                    })
                })
                .collect(),
        ),
    );
    Value::Object(obj)
}

fn attachment_reference2(r: &AttachmentReference2) -> Value {
    json!({
        "attachment": r.attachment,
        "layout": r.layout.as_raw(),
        "aspectMask": r.aspect_mask.as_raw(),
    })
}

fn render_pass2(ci: &RenderPassCreateInfo2) -> Value {
    let mut obj = Map::new();
    insert_next(&mut obj, &ci.next);
    obj.insert("flags".to_owned(), json!(ci.flags.as_raw()));
    obj.insert(
        "attachments".to_owned(),
        Value::Array(
            ci.attachments
                .iter()
                .map(|a| {
                    json!({
                        "flags": a.flags.as_raw(),
                        "format": a.format.as_raw(),
                        "samples": a.samples.as_raw(),
                        "loadOp": a.load_op.as_raw(),
                        "storeOp": a.store_op.as_raw(),
                        "stencilLoadOp": a.stencil_load_op.as_raw(),
                        "stencilStoreOp": a.stencil_store_op.as_raw(),
                        "initialLayout": a.initial_layout.as_raw(),
                        "finalLayout": a.final_layout.as_raw(),
                    })
                })
                .collect(),
        ),
    );
    obj.insert(
        "subpasses".to_owned(),
        Value::Array(
            ci.subpasses
                .iter()
                .map(|s| {
                    let mut sub = Map::new();
                    sub.insert("flags".to_owned(), json!(s.flags.as_raw()));
                    sub.insert(
                        "pipelineBindPoint".to_owned(),
                        json!(s.pipeline_bind_point.as_raw()),
                    );
                    sub.insert("viewMask".to_owned(), json!(s.view_mask));
                    sub.insert(
                        "inputAttachments".to_owned(),
                        Value::Array(s.input_attachments.iter().map(attachment_reference2).collect()),
                    );
                    sub.insert(
                        "colorAttachments".to_owned(),
                        Value::Array(s.color_attachments.iter().map(attachment_reference2).collect()),
                    );
                    if let Some(resolve) = &s.resolve_attachments {
                        sub.insert(
                            "resolveAttachments".to_owned(),
                            Value::Array(resolve.iter().map(attachment_reference2).collect()),
                        );
                    }
                    if let Some(ds) = &s.depth_stencil_attachment {
                        sub.insert(
                            "depthStencilAttachment".to_owned(),
                            attachment_reference2(ds),
                        );
                    }
                    sub.insert(
                        "preserveAttachments".to_owned(),
                        json!(s.preserve_attachments),
                    );
                    Value::Object(sub)
                })
                .collect(),
        ),
    );
    obj.insert(
        "dependencies".to_owned(),
        Value::Array(
            ci.dependencies
                .iter()
                .map(|d| {
                    json!({
                        "srcSubpass": d.src_subpass,
                        "dstSubpass": d.dst_subpass,
                        "srcStageMask": d.src_stage_mask.as_raw(),
                        "dstStageMask": d.dst_stage_mask.as_raw(),
                        "srcAccessMask": d.src_access_mask.as_raw(),
                        "dstAccessMask": d.dst_access_mask.as_raw(),
                        "dependencyFlags": d.dependency_flags.as_raw(),
                        "viewOffset": d.view_offset,
                    })
                })
                .collect(),
        ),
    );
    obj.insert(
        "correlatedViewMasks".to_owned(),
        json!(ci.correlated_view_masks),
    );
    Value::Object(obj)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::test_fixtures::{compute_snapshot, graphics_snapshot};

    #[test]
    fn graphics_document_has_expected_shape() {
        let mut pcg = Generator::new();
        let text = pcg.generate(&graphics_snapshot()).unwrap().to_owned();
        let doc: serde_json::Value = serde_json::from_str(&text).unwrap();

        assert_eq!(doc["pipelineUUID"].as_array().unwrap().len(), 16);
        let state = &doc["graphicsPipelineState"];
        assert_eq!(state["descriptorSetLayouts"].as_array().unwrap().len(), 2);
        assert_eq!(
            state["pipelineLayout"]["setLayouts"][0],
            state["descriptorSetLayouts"][0]["name"]
        );
        assert_eq!(state["graphicsPipeline"]["stages"].as_array().unwrap().len(), 2);
        // Render pass came in as version 2, so the v1 key must be absent.
        assert!(state.get("renderPass").is_none());
        assert!(state["renderPass2"]["subpasses"][0].get("viewMask").is_some());
        assert!(state["renderPass2"]["correlatedViewMasks"].is_array());
    }

    #[test]
    fn compute_document_has_expected_shape() {
        let mut pcg = Generator::new();
        let text = pcg.generate(&compute_snapshot()).unwrap().to_owned();
        let doc: serde_json::Value = serde_json::from_str(&text).unwrap();

        let state = &doc["computePipelineState"];
        assert!(doc.get("graphicsPipelineState").is_none());
        assert_eq!(state["ycbcrSamplers"].as_array().unwrap().len(), 1);
        // The sampler's conversion reference names the conversion above it.
        assert_eq!(
            state["immutableSamplers"][0]["pNext"][0]["conversion"],
            state["ycbcrSamplers"][0]["name"]
        );
        assert!(state["computePipeline"]["stage"]["specializationInfo"].is_object());
    }

    #[test]
    fn empty_extension_chain_is_omitted() {
        let mut pcg = Generator::new();
        let text = pcg.generate(&graphics_snapshot()).unwrap().to_owned();
        let doc: serde_json::Value = serde_json::from_str(&text).unwrap();

        // The pipeline layout in the fixture has no chain.
        let layout = &doc["graphicsPipelineState"]["pipelineLayout"];
        assert!(layout.get("pNext").is_none());
    }

    #[test]
    fn dangling_set_layout_reference_is_rejected() {
        let mut snapshot = graphics_snapshot();
        let PipelineState::Graphics(state) = &mut snapshot.state else {
            unreachable!();
        };
        state.pipeline_layout.set_layouts.push("no_such_layout".to_owned());

        let err = Generator::new().generate(&snapshot).unwrap_err();
        let CodecError::Schema { path, message } = err else {
            panic!("expected a schema error, got {err}");
        };
        assert_eq!(path, "$.graphicsPipelineState.pipelineLayout.setLayouts[2]");
        assert!(message.contains("no_such_layout"));
    }

    #[test]
    fn dangling_conversion_reference_is_rejected() {
        let mut snapshot = compute_snapshot();
        let PipelineState::Compute(state) = &mut snapshot.state else {
            unreachable!();
        };
        state.ycbcr_conversions.clear();

        let err = Generator::new().generate(&snapshot).unwrap_err();
        let CodecError::Schema { path, .. } = err else {
            panic!("expected a schema error, got {err}");
        };
        assert_eq!(path, "$.computePipelineState.immutableSamplers[0].pNext");
    }

    #[test]
    fn misplaced_extension_structure_is_rejected() {
        // A private-data request is a pipeline-chain structure; on the
        // pipeline layout it must be refused before any text is emitted,
        // with the same diagnostic the parser would give.
        let mut snapshot = compute_snapshot();
        let PipelineState::Compute(state) = &mut snapshot.state else {
            unreachable!();
        };
        state
            .pipeline_layout
            .next
            .push(ExtensionNode::DevicePrivateData(DevicePrivateDataCreateInfo {
                private_data_slot_request_count: 1,
            }));

        let err = Generator::new().generate(&snapshot).unwrap_err();
        let CodecError::Schema { path, message } = err else {
            panic!("expected a schema error, got {err}");
        };
        assert_eq!(path, "$.computePipelineState.pipelineLayout.pNext[0].sType");
        assert!(message.contains("not valid in this chain"));
    }

    #[test]
    fn standalone_struct_carries_stype() {
        let mut pcg = Generator::new();
        let info = AnyCreateInfo::Sampler(SamplerCreateInfo::default());
        let text = pcg.generate_struct(&info).unwrap().to_owned();
        let doc: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(doc["sType"], json!(info.stype()));
        assert_eq!(doc["magFilter"], json!(0));
    }
}
