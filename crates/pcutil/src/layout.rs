// Copyright 2026 The VkSC PCUtil Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Layout
//!
//! The byte-exact shape of the safety critical pipeline cache, transcribed
//! from the `VkPipelineCacheHeaderVersionSafetyCriticalOne`,
//! `VkPipelineCacheSafetyCriticalIndexEntry`, and
//! `VkPipelineCacheStageValidationIndexEntry` structures.  All multi-byte
//! fields are little-endian.  The index strides stored in a file may exceed
//! the fixed sizes below; the difference is opaque vendor data.

/// `VK_UUID_SIZE`.
pub const UUID_SIZE: usize = 16;

/// `VK_PIPELINE_CACHE_HEADER_VERSION_SAFETY_CRITICAL_ONE`.
pub const HEADER_VERSION_SAFETY_CRITICAL_ONE: u32 = 1000298000;

/// `VK_PIPELINE_CACHE_VALIDATION_VERSION_SAFETY_CRITICAL_ONE`.
pub const VALIDATION_VERSION_SAFETY_CRITICAL_ONE: u32 = 1;

/// Size of the safety critical header, which doubles as its `headerSize`
/// field value.
pub const SC1_HEADER_SIZE: u64 = 56;

/// Fixed-field size of one pipeline index entry, and the minimum legal
/// pipeline index stride.
pub const PIPELINE_INDEX_ENTRY_SIZE: u64 = 56;

/// Fixed-field size of one stage index entry, and the minimum legal stage
/// index stride.
pub const STAGE_INDEX_ENTRY_SIZE: u64 = 16;

// Field offsets within the safety critical header.
pub(crate) const H_HEADER_SIZE: u64 = 0;
pub(crate) const H_HEADER_VERSION: u64 = 4;
pub(crate) const H_VENDOR_ID: u64 = 8;
pub(crate) const H_DEVICE_ID: u64 = 12;
pub(crate) const H_CACHE_UUID: u64 = 16;
pub(crate) const H_VALIDATION_VERSION: u64 = 32;
pub(crate) const H_IMPLEMENTATION_DATA: u64 = 36;
pub(crate) const H_PIPELINE_INDEX_COUNT: u64 = 40;
pub(crate) const H_PIPELINE_INDEX_STRIDE: u64 = 44;
pub(crate) const H_PIPELINE_INDEX_OFFSET: u64 = 48;

// Field offsets within one pipeline index entry.
pub(crate) const P_IDENTIFIER: u64 = 0;
pub(crate) const P_MEMORY_SIZE: u64 = 16;
pub(crate) const P_JSON_SIZE: u64 = 24;
pub(crate) const P_JSON_OFFSET: u64 = 32;
pub(crate) const P_STAGE_INDEX_COUNT: u64 = 40;
pub(crate) const P_STAGE_INDEX_STRIDE: u64 = 44;
pub(crate) const P_STAGE_INDEX_OFFSET: u64 = 48;

// Field offsets within one stage index entry.
pub(crate) const S_CODE_SIZE: u64 = 0;
pub(crate) const S_CODE_OFFSET: u64 = 8;

/// Decoded `VkPipelineCacheHeaderVersionSafetyCriticalOne`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SafetyCriticalHeader {
    pub header_size: u32,
    pub header_version: u32,
    pub vendor_id: u32,
    pub device_id: u32,
    pub pipeline_cache_uuid: [u8; UUID_SIZE],
    pub validation_version: u32,
    pub implementation_data: u32,
    pub pipeline_index_count: u32,
    pub pipeline_index_stride: u32,
    pub pipeline_index_offset: u64,
}

/// Decoded fixed fields of one `VkPipelineCacheSafetyCriticalIndexEntry`.
///
/// `entry_offset` is where the entry itself lives in the buffer; vendor data,
/// if the file's stride leaves room for any, starts at
/// `entry_offset + PIPELINE_INDEX_ENTRY_SIZE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineIndexEntry {
    pub pipeline_identifier: [u8; UUID_SIZE],
    pub pipeline_memory_size: u64,
    pub json_size: u64,
    pub json_offset: u64,
    pub stage_index_count: u32,
    pub stage_index_stride: u32,
    pub stage_index_offset: u64,
    pub entry_offset: u64,
}

/// Decoded fixed fields of one `VkPipelineCacheStageValidationIndexEntry`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageIndexEntry {
    pub code_size: u64,
    pub code_offset: u64,
    pub entry_offset: u64,
}

/// Return the `len` bytes at `offset` if they fall entirely inside `data`.
pub(crate) fn span(data: &[u8], offset: u64, len: u64) -> Option<&[u8]> {
    let end = offset.checked_add(len)?;
    if end > data.len() as u64 {
        return None;
    }
    Some(&data[offset as usize..end as usize])
}

pub(crate) fn read_u32(data: &[u8], offset: u64) -> Option<u32> {
    let b = span(data, offset, 4)?;
    Some(u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
}

pub(crate) fn read_u64(data: &[u8], offset: u64) -> Option<u64> {
    let b = span(data, offset, 8)?;
    Some(u64::from_le_bytes([
        b[0], b[1], b[2], b[3], b[4], b[5], b[6], b[7],
    ]))
}

pub(crate) fn read_uuid(data: &[u8], offset: u64) -> Option<[u8; UUID_SIZE]> {
    let b = span(data, offset, UUID_SIZE as u64)?;
    let mut uuid = [0u8; UUID_SIZE];
    uuid.copy_from_slice(b);
    Some(uuid)
}

// The write side only runs after the writer has verified capacity, so these
// index with the ordinary panicking slice ops.

pub(crate) fn write_u32(data: &mut [u8], offset: u64, v: u32) {
    let offset = offset as usize;
    data[offset..offset + 4].copy_from_slice(&v.to_le_bytes());
}

pub(crate) fn write_u64(data: &mut [u8], offset: u64, v: u64) {
    let offset = offset as usize;
    data[offset..offset + 8].copy_from_slice(&v.to_le_bytes());
}

pub(crate) fn write_bytes(data: &mut [u8], offset: u64, v: &[u8]) {
    let offset = offset as usize;
    data[offset..offset + v.len()].copy_from_slice(v);
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn scalar_reads_are_little_endian() {
        let data = [0x01u8, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08];
        assert_eq!(read_u32(&data, 0), Some(0x0403_0201));
        assert_eq!(read_u64(&data, 0), Some(0x0807_0605_0403_0201));
        assert_eq!(read_u32(&data, 4), Some(0x0807_0605));
    }

    #[test]
    fn out_of_bounds_reads_return_none() {
        let data = [0u8; 8];
        assert_eq!(read_u32(&data, 5), None);
        assert_eq!(read_u64(&data, 1), None);
        assert_eq!(read_uuid(&data, 0), None);
        // Offsets that would overflow u64 arithmetic must not wrap.
        assert_eq!(read_u32(&data, u64::MAX - 2), None);
        assert!(span(&data, u64::MAX, 8).is_none());
    }

    #[test]
    fn write_read_round_trip() {
        let mut data = [0u8; 16];
        write_u32(&mut data, 2, 0xDEAD_BEEF);
        write_u64(&mut data, 8, 0x0123_4567_89AB_CDEF);
        assert_eq!(read_u32(&data, 2), Some(0xDEAD_BEEF));
        assert_eq!(read_u64(&data, 8), Some(0x0123_4567_89AB_CDEF));
    }
}
