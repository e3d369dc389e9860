// Copyright 2026 The VkSC PCUtil Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Snapshot fixtures shared by the generator and parser tests.  Deliberately
//! busy: every optional sub-state, both named-reference kinds, and an
//! extension chain on each side of the graphics/compute split.

use ash::vk;

use crate::model::*;

pub fn graphics_snapshot() -> PipelineSnapshot {
    let vertex_stage = PipelineShaderStageCreateInfo {
        flags: vk::PipelineShaderStageCreateFlags::empty(),
        stage: vk::ShaderStageFlags::VERTEX,
        name: "main".to_owned(),
        specialization_info: None,
    };
    let fragment_stage = PipelineShaderStageCreateInfo {
        flags: vk::PipelineShaderStageCreateFlags::empty(),
        stage: vk::ShaderStageFlags::FRAGMENT,
        name: "frag_main".to_owned(),
        specialization_info: Some(SpecializationInfo {
            map_entries: vec![SpecializationMapEntry {
                constant_id: 3,
                offset: 0,
                size: 4,
            }],
            data: vec![1, 0, 0, 0],
        }),
    };

    let pipeline = GraphicsPipelineCreateInfo {
        next: vec![ExtensionNode::PipelineOffline(PipelineOfflineCreateInfo {
            pipeline_identifier: [7; UUID_SIZE],
            match_control: PIPELINE_MATCH_CONTROL_APPLICATION_UUID_EXACT_MATCH,
            pool_entry_size: 65536,
        })],
        flags: vk::PipelineCreateFlags::empty(),
        stages: vec![vertex_stage, fragment_stage],
        vertex_input_state: Some(PipelineVertexInputStateCreateInfo {
            vertex_binding_descriptions: vec![VertexInputBindingDescription {
                binding: 0,
                stride: 32,
                input_rate: vk::VertexInputRate::VERTEX,
            }],
            vertex_attribute_descriptions: vec![
                VertexInputAttributeDescription {
                    location: 0,
                    binding: 0,
                    format: vk::Format::R32G32B32_SFLOAT,
                    offset: 0,
                },
                VertexInputAttributeDescription {
                    location: 1,
                    binding: 0,
                    format: vk::Format::R32G32_SFLOAT,
                    offset: 12,
                },
            ],
        }),
        input_assembly_state: Some(PipelineInputAssemblyStateCreateInfo {
            topology: vk::PrimitiveTopology::TRIANGLE_LIST,
            primitive_restart_enable: false,
        }),
        tessellation_state: None,
        viewport_state: Some(PipelineViewportStateCreateInfo {
            viewports: vec![Viewport {
                x: 0.0,
                y: 0.0,
                width: 1920.0,
                height: 1080.0,
                min_depth: 0.0,
                max_depth: 1.0,
            }],
            scissors: vec![Rect2D {
                offset: Offset2D { x: 0, y: 0 },
                extent: Extent2D {
                    width: 1920,
                    height: 1080,
                },
            }],
        }),
        rasterization_state: Some(PipelineRasterizationStateCreateInfo {
            depth_clamp_enable: false,
            rasterizer_discard_enable: false,
            polygon_mode: vk::PolygonMode::FILL,
            cull_mode: vk::CullModeFlags::BACK,
            front_face: vk::FrontFace::COUNTER_CLOCKWISE,
            depth_bias_enable: false,
            depth_bias_constant_factor: 0.0,
            depth_bias_clamp: 0.0,
            depth_bias_slope_factor: 0.0,
            line_width: 1.0,
        }),
        multisample_state: Some(PipelineMultisampleStateCreateInfo {
            rasterization_samples: vk::SampleCountFlags::TYPE_4,
            sample_shading_enable: false,
            min_sample_shading: 0.0,
            sample_mask: Some(vec![0xffff_ffff]),
            alpha_to_coverage_enable: false,
            alpha_to_one_enable: false,
        }),
        depth_stencil_state: Some(PipelineDepthStencilStateCreateInfo {
            depth_test_enable: true,
            depth_write_enable: true,
            depth_compare_op: vk::CompareOp::LESS,
            depth_bounds_test_enable: false,
            stencil_test_enable: false,
            front: StencilOpState::default(),
            back: StencilOpState::default(),
            min_depth_bounds: 0.0,
            max_depth_bounds: 1.0,
        }),
        color_blend_state: Some(PipelineColorBlendStateCreateInfo {
            logic_op_enable: false,
            logic_op: vk::LogicOp::COPY,
            attachments: vec![PipelineColorBlendAttachmentState {
                blend_enable: true,
                src_color_blend_factor: vk::BlendFactor::SRC_ALPHA,
                dst_color_blend_factor: vk::BlendFactor::ONE_MINUS_SRC_ALPHA,
                color_blend_op: vk::BlendOp::ADD,
                src_alpha_blend_factor: vk::BlendFactor::ONE,
                dst_alpha_blend_factor: vk::BlendFactor::ZERO,
                alpha_blend_op: vk::BlendOp::ADD,
                color_write_mask: vk::ColorComponentFlags::RGBA,
            }],
            blend_constants: [0.0, 0.0, 0.0, 0.5],
        }),
        dynamic_state: Some(PipelineDynamicStateCreateInfo {
            dynamic_states: vec![vk::DynamicState::VIEWPORT, vk::DynamicState::SCISSOR],
        }),
        subpass: 0,
        base_pipeline_index: -1,
    };

    let render_pass = RenderPassVariant::V2(RenderPassCreateInfo2 {
        next: vec![],
        flags: vk::RenderPassCreateFlags::empty(),
        attachments: vec![
            AttachmentDescription2 {
                flags: vk::AttachmentDescriptionFlags::empty(),
                format: vk::Format::B8G8R8A8_SRGB,
                samples: vk::SampleCountFlags::TYPE_4,
                load_op: vk::AttachmentLoadOp::CLEAR,
                store_op: vk::AttachmentStoreOp::STORE,
                stencil_load_op: vk::AttachmentLoadOp::DONT_CARE,
                stencil_store_op: vk::AttachmentStoreOp::DONT_CARE,
                initial_layout: vk::ImageLayout::UNDEFINED,
                final_layout: vk::ImageLayout::PRESENT_SRC_KHR,
            },
            AttachmentDescription2 {
                flags: vk::AttachmentDescriptionFlags::empty(),
                format: vk::Format::D32_SFLOAT,
                samples: vk::SampleCountFlags::TYPE_4,
                load_op: vk::AttachmentLoadOp::CLEAR,
                store_op: vk::AttachmentStoreOp::DONT_CARE,
                stencil_load_op: vk::AttachmentLoadOp::DONT_CARE,
                stencil_store_op: vk::AttachmentStoreOp::DONT_CARE,
                initial_layout: vk::ImageLayout::UNDEFINED,
                final_layout: vk::ImageLayout::DEPTH_STENCIL_ATTACHMENT_OPTIMAL,
            },
        ],
        subpasses: vec![SubpassDescription2 {
            flags: vk::SubpassDescriptionFlags::empty(),
            pipeline_bind_point: vk::PipelineBindPoint::GRAPHICS,
            view_mask: 0,
            input_attachments: vec![],
            color_attachments: vec![AttachmentReference2 {
                attachment: 0,
                layout: vk::ImageLayout::COLOR_ATTACHMENT_OPTIMAL,
                aspect_mask: vk::ImageAspectFlags::COLOR,
            }],
            resolve_attachments: None,
            depth_stencil_attachment: Some(AttachmentReference2 {
                attachment: 1,
                layout: vk::ImageLayout::DEPTH_STENCIL_ATTACHMENT_OPTIMAL,
                aspect_mask: vk::ImageAspectFlags::DEPTH,
            }),
            preserve_attachments: vec![],
        }],
        dependencies: vec![SubpassDependency2 {
            src_subpass: vk::SUBPASS_EXTERNAL,
            dst_subpass: 0,
            src_stage_mask: vk::PipelineStageFlags::COLOR_ATTACHMENT_OUTPUT,
            dst_stage_mask: vk::PipelineStageFlags::COLOR_ATTACHMENT_OUTPUT,
            src_access_mask: vk::AccessFlags::empty(),
            dst_access_mask: vk::AccessFlags::COLOR_ATTACHMENT_WRITE,
            dependency_flags: vk::DependencyFlags::empty(),
            view_offset: 0,
        }],
        correlated_view_masks: vec![0b11],
    });

    let features = PhysicalDeviceFeatures {
        sampler_anisotropy: true,
        depth_clamp: true,
        ..Default::default()
    };

    PipelineSnapshot {
        pipeline_uuid: [
            0x10, 0x11, 0x12, 0x13, 0x14, 0x15, 0x16, 0x17, 0x18, 0x19, 0x1a, 0x1b, 0x1c, 0x1d,
            0x1e, 0x1f,
        ],
        device_extensions: vec!["VK_KHR_swapchain".to_owned()],
        state: PipelineState::Graphics(GraphicsPipelineState {
            ycbcr_conversions: vec![],
            immutable_samplers: vec![Named::new(
                "shadow_sampler",
                SamplerCreateInfo {
                    mag_filter: vk::Filter::LINEAR,
                    min_filter: vk::Filter::LINEAR,
                    compare_enable: true,
                    compare_op: vk::CompareOp::LESS_OR_EQUAL,
                    max_lod: 1.0,
                    border_color: vk::BorderColor::FLOAT_OPAQUE_WHITE,
                    ..Default::default()
                },
            )],
            descriptor_set_layouts: vec![
                Named::new(
                    "scene_set",
                    DescriptorSetLayoutCreateInfo {
                        next: vec![],
                        flags: vk::DescriptorSetLayoutCreateFlags::empty(),
                        bindings: vec![DescriptorSetLayoutBinding {
                            binding: 0,
                            descriptor_type: vk::DescriptorType::UNIFORM_BUFFER,
                            descriptor_count: 1,
                            stage_flags: vk::ShaderStageFlags::VERTEX
                                | vk::ShaderStageFlags::FRAGMENT,
                            immutable_samplers: None,
                        }],
                    },
                ),
                Named::new(
                    "material_set",
                    DescriptorSetLayoutCreateInfo {
                        next: vec![],
                        flags: vk::DescriptorSetLayoutCreateFlags::empty(),
                        bindings: vec![DescriptorSetLayoutBinding {
                            binding: 0,
                            descriptor_type: vk::DescriptorType::COMBINED_IMAGE_SAMPLER,
                            descriptor_count: 1,
                            stage_flags: vk::ShaderStageFlags::FRAGMENT,
                            immutable_samplers: Some(vec!["shadow_sampler".to_owned()]),
                        }],
                    },
                ),
            ],
            pipeline_layout: PipelineLayoutCreateInfo {
                next: vec![],
                flags: vk::PipelineLayoutCreateFlags::empty(),
                set_layouts: vec!["scene_set".to_owned(), "material_set".to_owned()],
                push_constant_ranges: vec![PushConstantRange {
                    stage_flags: vk::ShaderStageFlags::VERTEX,
                    offset: 0,
                    size: 64,
                }],
            },
            pipeline,
            shader_files: vec![
                ShaderFileRef {
                    stage: vk::ShaderStageFlags::VERTEX,
                    filename: "scene.vert.spv".to_owned(),
                },
                ShaderFileRef {
                    stage: vk::ShaderStageFlags::FRAGMENT,
                    filename: "scene.frag.spv".to_owned(),
                },
            ],
            physical_device_features: Some(PhysicalDeviceFeatures2 {
                next: vec![],
                features,
            }),
            render_pass,
        }),
    }
}

pub fn compute_snapshot() -> PipelineSnapshot {
    PipelineSnapshot {
        pipeline_uuid: [0xc0; UUID_SIZE],
        device_extensions: vec![
            "VK_KHR_sampler_ycbcr_conversion".to_owned(),
            "VK_EXT_pipeline_properties".to_owned(),
        ],
        state: PipelineState::Compute(ComputePipelineState {
            ycbcr_conversions: vec![Named::new(
                "camera_ycbcr",
                SamplerYcbcrConversionCreateInfo {
                    next: vec![],
                    format: vk::Format::G8_B8R8_2PLANE_420_UNORM,
                    ycbcr_model: vk::SamplerYcbcrModelConversion::YCBCR_709,
                    ycbcr_range: vk::SamplerYcbcrRange::ITU_NARROW,
                    components: ComponentMapping {
                        r: vk::ComponentSwizzle::IDENTITY,
                        g: vk::ComponentSwizzle::IDENTITY,
                        b: vk::ComponentSwizzle::IDENTITY,
                        a: vk::ComponentSwizzle::IDENTITY,
                    },
                    x_chroma_offset: vk::ChromaLocation::MIDPOINT,
                    y_chroma_offset: vk::ChromaLocation::MIDPOINT,
                    chroma_filter: vk::Filter::LINEAR,
                    force_explicit_reconstruction: false,
                },
            )],
            immutable_samplers: vec![Named::new(
                "camera_sampler",
                SamplerCreateInfo {
                    next: vec![ExtensionNode::SamplerYcbcrConversion(
                        SamplerYcbcrConversionInfo {
                            conversion: "camera_ycbcr".to_owned(),
                        },
                    )],
                    mag_filter: vk::Filter::LINEAR,
                    min_filter: vk::Filter::LINEAR,
                    ..Default::default()
                },
            )],
            descriptor_set_layouts: vec![Named::new(
                "camera_set",
                DescriptorSetLayoutCreateInfo {
                    next: vec![],
                    flags: vk::DescriptorSetLayoutCreateFlags::empty(),
                    bindings: vec![
                        DescriptorSetLayoutBinding {
                            binding: 0,
                            descriptor_type: vk::DescriptorType::COMBINED_IMAGE_SAMPLER,
                            descriptor_count: 1,
                            stage_flags: vk::ShaderStageFlags::COMPUTE,
                            immutable_samplers: Some(vec!["camera_sampler".to_owned()]),
                        },
                        DescriptorSetLayoutBinding {
                            binding: 1,
                            descriptor_type: vk::DescriptorType::STORAGE_IMAGE,
                            descriptor_count: 1,
                            stage_flags: vk::ShaderStageFlags::COMPUTE,
                            immutable_samplers: None,
                        },
                    ],
                },
            )],
            pipeline_layout: PipelineLayoutCreateInfo {
                next: vec![],
                flags: vk::PipelineLayoutCreateFlags::empty(),
                set_layouts: vec!["camera_set".to_owned()],
                push_constant_ranges: vec![],
            },
            pipeline: ComputePipelineCreateInfo {
                next: vec![ExtensionNode::PipelinePropertiesIdentifier(
                    PipelinePropertiesIdentifier {
                        pipeline_identifier: [0xc0; UUID_SIZE],
                    },
                )],
                flags: vk::PipelineCreateFlags::empty(),
                stage: PipelineShaderStageCreateInfo {
                    flags: vk::PipelineShaderStageCreateFlags::empty(),
                    stage: vk::ShaderStageFlags::COMPUTE,
                    name: "main".to_owned(),
                    specialization_info: Some(SpecializationInfo {
                        map_entries: vec![
                            SpecializationMapEntry {
                                constant_id: 0,
                                offset: 0,
                                size: 4,
                            },
                            SpecializationMapEntry {
                                constant_id: 1,
                                offset: 4,
                                size: 4,
                            },
                        ],
                        data: vec![16, 0, 0, 0, 16, 0, 0, 0],
                    }),
                },
                base_pipeline_index: -1,
            },
            shader_files: vec![ShaderFileRef {
                stage: vk::ShaderStageFlags::COMPUTE,
                filename: "debayer.comp.spv".to_owned(),
            }],
            physical_device_features: None,
        }),
    }
}
