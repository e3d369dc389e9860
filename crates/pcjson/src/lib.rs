// Copyright 2026 The VkSC PCUtil Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # PCJson
//!
//! The interchange half of the pipeline cache story: an owned, pointer-free
//! model of everything that went into creating one graphics or compute
//! pipeline ([`PipelineSnapshot`]), a [`Generator`] that serializes a
//! snapshot to the pipeline JSON schema, and a [`Parser`] that reconstructs
//! a snapshot from JSON text.
//!
//! The round-trip contract is the whole point: `parse(generate(s))` is
//! field-for-field equal to `s`, and `generate(parse(j))` is
//! content-equivalent to `j` (formatting aside).  Array order is
//! significant and preserved everywhere.
//!
//! Vulkan enum and flag types come from `ash` and travel through JSON as
//! their raw Vulkan integer values.  Device handles never appear in the
//! model at all; cross-references between objects (descriptor set layouts,
//! immutable samplers, YCbCr conversions) are by name.
//!
//! The parser is built for cache-adjacent JSON of unknown provenance: a
//! malformed document produces a [`CodecError`] naming the offending JSON
//! path, never a panic.

pub mod capi;
pub mod generator;
pub mod model;
pub mod parse;

#[cfg(test)]
mod test_fixtures;

pub use generator::Generator;
pub use model::{
    AnyCreateInfo, ComputePipelineState, ExtensionNode, GraphicsPipelineState, Named,
    PipelineSnapshot, PipelineState, RenderPassVariant,
};
pub use parse::Parser;

/// Codec failure: either the text is not JSON at all, or it is JSON that
/// does not satisfy the pipeline schema.  `Schema` paths are `$`-rooted,
/// e.g. `$.graphicsPipelineState.pipelineLayout.setLayouts[1]`.
#[derive(thiserror::Error, Debug)]
pub enum CodecError {
    #[error("{path}: {message}")]
    Schema { path: String, message: String },

    #[error("failed to parse JSON: {0}")]
    Syntax(#[from] serde_json::Error),
}

impl CodecError {
    pub(crate) fn schema(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Schema {
            path: path.into(),
            message: message.into(),
        }
    }
}
