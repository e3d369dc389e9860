// Copyright 2026 The VkSC PCUtil Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # PCUtil
//!
//! Reader and writer for the `VK_PIPELINE_CACHE_HEADER_VERSION_SAFETY_CRITICAL_ONE`
//! pipeline cache container: a fixed header, a table of per-pipeline index
//! entries, a per-pipeline table of shader stage entries, and offset-addressed
//! JSON and SPIR-V blobs.
//!
//! Both halves operate on memory the caller already owns.  [`CacheReader`]
//! borrows an immutable byte buffer and hands out bounds-checked views into
//! it; [`CacheWriter`] collects borrowed payloads and serializes them into a
//! caller-provided mutable buffer in one pass.  Neither does any I/O.
//!
//! Every field on the wire is read and written as an explicit little-endian
//! scalar at a computed byte offset.  The buffer is never reinterpreted as a
//! native struct, so a corrupted or hostile file can at worst make an
//! accessor return `None`.

pub mod layout;
pub mod reader;
pub mod writer;

pub use layout::{PipelineIndexEntry, SafetyCriticalHeader, StageIndexEntry, UUID_SIZE};
pub use reader::CacheReader;
pub use writer::{CacheWriter, PipelineEntry};

/// Errors produced by the cache writer and by reader construction.
///
/// Malformed *data* inside an otherwise valid cache never produces an error:
/// the reader's accessors report absence with `None` instead, per the
/// "hostile input is not a fault" contract.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum CacheError {
    #[error("buffer does not start with a valid safety critical one header")]
    InvalidHeader,

    #[error("buffer too small: need {needed} bytes, have {available}")]
    BufferTooSmall { needed: u64, available: u64 },

    #[error("pipeline index was already allocated")]
    IndexAlreadyAllocated,

    #[error("stage entries were already allocated")]
    StagesAlreadyAllocated,

    #[error("entry index {index} out of range (count {count})")]
    EntryOutOfRange { index: u32, count: u32 },

    #[error("pipeline index offset {offset} overlaps the {header} byte header")]
    OffsetInsideHeader { offset: u64, header: u64 },

    #[error("duplicate pipeline identifier {0:02x?}")]
    DuplicatePipelineIdentifier([u8; UUID_SIZE]),

    #[error("pipeline entry {0} was never set")]
    MissingPipelineEntry(u32),
}
