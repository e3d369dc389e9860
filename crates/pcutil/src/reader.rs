// Copyright 2026 The VkSC PCUtil Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Reader
//!
//! Random-access view over one in-memory pipeline cache file.  The buffer is
//! borrowed, never copied, and never modified.  Construction validates the
//! header; every other accessor re-checks bounds on each use, because the
//! counts, strides, and offsets it navigates by all come from the file
//! itself and may lie.

use crate::CacheError;
use crate::layout::{self, PipelineIndexEntry, SafetyCriticalHeader, StageIndexEntry, UUID_SIZE};

/// Bounds-checked reader over a safety critical pipeline cache blob.
#[derive(Debug)]
pub struct CacheReader<'a> {
    data: &'a [u8],
    header: SafetyCriticalHeader,
}

impl<'a> CacheReader<'a> {
    /// Validate the safety critical header at the start of `data` and wrap
    /// the buffer.  Fails with [`CacheError::InvalidHeader`] when the header
    /// size, header version, or validation version does not match.
    pub fn new(data: &'a [u8]) -> Result<Self, CacheError> {
        let header = Self::decode_header(data).ok_or(CacheError::InvalidHeader)?;

        if header.header_size != layout::SC1_HEADER_SIZE as u32
            || header.header_version != layout::HEADER_VERSION_SAFETY_CRITICAL_ONE
            || header.validation_version != layout::VALIDATION_VERSION_SAFETY_CRITICAL_ONE
        {
            return Err(CacheError::InvalidHeader);
        }

        Ok(Self { data, header })
    }

    fn decode_header(data: &[u8]) -> Option<SafetyCriticalHeader> {
        Some(SafetyCriticalHeader {
            header_size: layout::read_u32(data, layout::H_HEADER_SIZE)?,
            header_version: layout::read_u32(data, layout::H_HEADER_VERSION)?,
            vendor_id: layout::read_u32(data, layout::H_VENDOR_ID)?,
            device_id: layout::read_u32(data, layout::H_DEVICE_ID)?,
            pipeline_cache_uuid: layout::read_uuid(data, layout::H_CACHE_UUID)?,
            validation_version: layout::read_u32(data, layout::H_VALIDATION_VERSION)?,
            implementation_data: layout::read_u32(data, layout::H_IMPLEMENTATION_DATA)?,
            pipeline_index_count: layout::read_u32(data, layout::H_PIPELINE_INDEX_COUNT)?,
            pipeline_index_stride: layout::read_u32(data, layout::H_PIPELINE_INDEX_STRIDE)?,
            pipeline_index_offset: layout::read_u64(data, layout::H_PIPELINE_INDEX_OFFSET)?,
        })
    }

    /// The decoded safety critical header.
    pub fn header(&self) -> &SafetyCriticalHeader {
        &self.header
    }

    pub fn pipeline_index_count(&self) -> u32 {
        self.header.pipeline_index_count
    }

    /// Pipeline index entry by position, or `None` when `index` is out of
    /// range or the entry does not fit in the buffer.
    pub fn pipeline_index_entry(&self, index: u32) -> Option<PipelineIndexEntry> {
        if index >= self.header.pipeline_index_count {
            return None;
        }

        let offset = self
            .header
            .pipeline_index_offset
            .checked_add(u64::from(index).checked_mul(u64::from(self.header.pipeline_index_stride))?)?;

        self.decode_pipeline_entry(offset)
    }

    /// First pipeline index entry whose identifier matches, or `None`.
    ///
    /// Lookup is first-match-wins; files written by [`crate::CacheWriter`]
    /// never contain duplicates, but foreign files might.
    pub fn pipeline_index_entry_by_uuid(&self, identifier: &[u8; UUID_SIZE]) -> Option<PipelineIndexEntry> {
        (0..self.header.pipeline_index_count)
            .filter_map(|i| self.pipeline_index_entry(i))
            .find(|entry| &entry.pipeline_identifier == identifier)
    }

    fn decode_pipeline_entry(&self, offset: u64) -> Option<PipelineIndexEntry> {
        // The whole fixed-field block must be in bounds before any field read.
        layout::span(self.data, offset, layout::PIPELINE_INDEX_ENTRY_SIZE)?;

        Some(PipelineIndexEntry {
            pipeline_identifier: layout::read_uuid(self.data, offset + layout::P_IDENTIFIER)?,
            pipeline_memory_size: layout::read_u64(self.data, offset + layout::P_MEMORY_SIZE)?,
            json_size: layout::read_u64(self.data, offset + layout::P_JSON_SIZE)?,
            json_offset: layout::read_u64(self.data, offset + layout::P_JSON_OFFSET)?,
            stage_index_count: layout::read_u32(self.data, offset + layout::P_STAGE_INDEX_COUNT)?,
            stage_index_stride: layout::read_u32(self.data, offset + layout::P_STAGE_INDEX_STRIDE)?,
            stage_index_offset: layout::read_u64(self.data, offset + layout::P_STAGE_INDEX_OFFSET)?,
            entry_offset: offset,
        })
    }

    /// Stage index entry `stage` of `pipeline`, or `None` when out of that
    /// pipeline's stage range or out of the buffer.
    pub fn stage_index_entry(&self, pipeline: &PipelineIndexEntry, stage: u32) -> Option<StageIndexEntry> {
        if stage >= pipeline.stage_index_count {
            return None;
        }

        let offset = pipeline
            .stage_index_offset
            .checked_add(u64::from(stage).checked_mul(u64::from(pipeline.stage_index_stride))?)?;

        layout::span(self.data, offset, layout::STAGE_INDEX_ENTRY_SIZE)?;

        Some(StageIndexEntry {
            code_size: layout::read_u64(self.data, offset + layout::S_CODE_SIZE)?,
            code_offset: layout::read_u64(self.data, offset + layout::S_CODE_OFFSET)?,
            entry_offset: offset,
        })
    }

    /// The JSON blob of a pipeline, or `None` when absent (zero offset) or
    /// out of bounds.
    pub fn json(&self, pipeline: &PipelineIndexEntry) -> Option<&'a [u8]> {
        if pipeline.json_offset == 0 {
            return None;
        }
        layout::span(self.data, pipeline.json_offset, pipeline.json_size)
    }

    /// The SPIR-V blob of a stage, or `None` when absent (zero offset) or
    /// out of bounds.
    pub fn spirv(&self, stage: &StageIndexEntry) -> Option<&'a [u8]> {
        if stage.code_offset == 0 {
            return None;
        }
        layout::span(self.data, stage.code_offset, stage.code_size)
    }
}
