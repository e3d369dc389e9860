// Copyright 2026 The VkSC PCUtil Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Writer
//!
//! Builds a new pipeline cache blob.  Payloads (JSON text, SPIR-V) are
//! borrowed, not copied, until the final serialization into the caller's
//! buffer.
//!
//! The write is single-pass in the observable sense: [`CacheWriter::write_pipeline_index`]
//! first lays out every entry and blob on paper, verifies the whole plan
//! fits the buffer, and only then writes bytes.  Offsets are therefore final
//! the moment the call returns, and a caller that wants to attach vendor
//! data can open a [`crate::CacheReader`] over the same buffer, read the
//! entry offsets back, and patch its bytes in directly.  The read-back
//! protocol the format grew up with keeps working.
//!
//! Blob placement policy (not mandated by the format, but kept for
//! compatibility): after the pipeline index table, per pipeline in index
//! order, comes its JSON, its stage index table, then each stage's code.

use crate::CacheError;
use crate::layout::{self, UUID_SIZE};

/// One pipeline's worth of content headed for the cache.
pub struct PipelineEntry<'a> {
    identifier: [u8; UUID_SIZE],
    memory_size: u64,
    json: Option<&'a [u8]>,
    stages: Option<Vec<Option<&'a [u8]>>>,
}

impl<'a> PipelineEntry<'a> {
    /// A new entry with the pipeline `identifier` and its
    /// `pipelineMemorySize` estimate.  Stages and JSON are optional.
    pub fn new(identifier: [u8; UUID_SIZE], memory_size: u64) -> Self {
        Self {
            identifier,
            memory_size,
            json: None,
            stages: None,
        }
    }

    /// Borrow the pipeline's JSON description.
    pub fn set_json_code(&mut self, json: &'a [u8]) {
        self.json = Some(json);
    }

    /// Reserve `count` stage slots.  Callable once.
    pub fn allocate_stages(&mut self, count: u32) -> Result<(), CacheError> {
        if self.stages.is_some() {
            return Err(CacheError::StagesAlreadyAllocated);
        }
        self.stages = Some(vec![None; count as usize]);
        Ok(())
    }

    /// Borrow SPIR-V for stage `stage`.  Stages must be set in the order
    /// they were provided to pipeline creation.
    pub fn set_shader_stage_code(&mut self, stage: u32, code: &'a [u8]) -> Result<(), CacheError> {
        let stages = self.stages.as_mut().ok_or(CacheError::EntryOutOfRange {
            index: stage,
            count: 0,
        })?;
        let count = stages.len() as u32;
        let slot = stages
            .get_mut(stage as usize)
            .ok_or(CacheError::EntryOutOfRange { index: stage, count })?;
        *slot = Some(code);
        Ok(())
    }

    fn stage_count(&self) -> u32 {
        self.stages.as_ref().map_or(0, |s| s.len() as u32)
    }

    /// Bytes of associated data (JSON, stage index, stage code) this entry
    /// adds beyond its slot in the pipeline index table.
    fn extra_size(&self, stage_stride: u64) -> u64 {
        let json = self.json.map_or(0, |j| j.len() as u64);
        let stage_index = u64::from(self.stage_count()) * stage_stride;
        let code: u64 = self
            .stages
            .iter()
            .flatten()
            .map(|code| code.map_or(0, |c| c.len() as u64))
            .sum();
        json + stage_index + code
    }
}

/// Collects pipeline entries and serializes the safety critical header and
/// pipeline index into a caller-provided buffer.
pub struct CacheWriter<'a> {
    vendor_id: u32,
    device_id: u32,
    pipeline_cache_uuid: [u8; UUID_SIZE],
    implementation_data: u32,

    pipeline_index_stride: u32,
    pipeline_index_offset: u64,
    stage_index_stride: u32,

    pipelines: Option<Vec<Option<PipelineEntry<'a>>>>,
}

impl Default for CacheWriter<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> CacheWriter<'a> {
    /// A writer with zeroed device identity; set vendor, device, and cache
    /// UUID before writing the header.
    pub fn new() -> Self {
        Self {
            vendor_id: 0,
            device_id: 0,
            pipeline_cache_uuid: [0; UUID_SIZE],
            implementation_data: 0,
            pipeline_index_stride: layout::PIPELINE_INDEX_ENTRY_SIZE as u32,
            pipeline_index_offset: layout::SC1_HEADER_SIZE,
            stage_index_stride: layout::STAGE_INDEX_ENTRY_SIZE as u32,
            pipelines: None,
        }
    }

    /// A writer with device identity filled in.
    pub fn with_device(vendor_id: u32, device_id: u32, pipeline_cache_uuid: [u8; UUID_SIZE]) -> Self {
        Self {
            vendor_id,
            device_id,
            pipeline_cache_uuid,
            ..Self::new()
        }
    }

    pub fn set_vendor_id(&mut self, vendor_id: u32) {
        self.vendor_id = vendor_id;
    }

    pub fn set_device_id(&mut self, device_id: u32) {
        self.device_id = device_id;
    }

    pub fn set_pipeline_cache_uuid(&mut self, uuid: [u8; UUID_SIZE]) {
        self.pipeline_cache_uuid = uuid;
    }

    /// Opaque 32-bit tag stored in the header's `implementationData` field.
    pub fn set_implementation_data(&mut self, implementation_data: u32) {
        self.implementation_data = implementation_data;
    }

    /// Stride between pipeline index entries.  Values below the fixed entry
    /// size are clamped up to it; anything above leaves per-pipeline room
    /// for vendor data.
    pub fn set_pipeline_index_stride(&mut self, stride: u32) {
        self.pipeline_index_stride = stride.max(layout::PIPELINE_INDEX_ENTRY_SIZE as u32);
    }

    /// Stride between stage index entries, clamped like
    /// [`Self::set_pipeline_index_stride`].
    pub fn set_stage_index_stride(&mut self, stride: u32) {
        self.stage_index_stride = stride.max(layout::STAGE_INDEX_ENTRY_SIZE as u32);
    }

    /// Where the pipeline index table starts.  Defaults to immediately after
    /// the header; push it further out to reserve room for global vendor
    /// data between header and table.
    pub fn set_pipeline_index_offset(&mut self, offset: u64) -> Result<(), CacheError> {
        if offset < layout::SC1_HEADER_SIZE {
            return Err(CacheError::OffsetInsideHeader {
                offset,
                header: layout::SC1_HEADER_SIZE,
            });
        }
        self.pipeline_index_offset = offset;
        Ok(())
    }

    /// Reserve `count` pipeline slots.  Callable once.
    pub fn allocate_pipeline_index(&mut self, count: u32) -> Result<(), CacheError> {
        if self.pipelines.is_some() {
            return Err(CacheError::IndexAlreadyAllocated);
        }
        self.pipelines = Some((0..count).map(|_| None).collect());
        Ok(())
    }

    /// Place `entry` at position `index` of the pipeline index.
    pub fn set_pipeline_entry(&mut self, index: u32, entry: PipelineEntry<'a>) -> Result<(), CacheError> {
        let pipelines = self.pipelines.as_mut().ok_or(CacheError::EntryOutOfRange {
            index,
            count: 0,
        })?;
        let count = pipelines.len() as u32;
        let slot = pipelines
            .get_mut(index as usize)
            .ok_or(CacheError::EntryOutOfRange { index, count })?;
        *slot = Some(entry);
        Ok(())
    }

    fn pipeline_count(&self) -> u32 {
        self.pipelines.as_ref().map_or(0, |p| p.len() as u32)
    }

    /// Space required for the pipeline index and all associated data, not
    /// counting the header or any gap before the table.
    pub fn pipeline_index_size(&self) -> u64 {
        let index = u64::from(self.pipeline_count()) * u64::from(self.pipeline_index_stride);
        let extra: u64 = self
            .pipelines
            .iter()
            .flatten()
            .flatten()
            .map(|entry| entry.extra_size(u64::from(self.stage_index_stride)))
            .sum();
        index + extra
    }

    /// Serialize the safety critical header at the start of `data`.
    pub fn write_header_safety_critical_one(&self, data: &mut [u8]) -> Result<(), CacheError> {
        if (data.len() as u64) < layout::SC1_HEADER_SIZE {
            return Err(CacheError::BufferTooSmall {
                needed: layout::SC1_HEADER_SIZE,
                available: data.len() as u64,
            });
        }

        layout::write_u32(data, layout::H_HEADER_SIZE, layout::SC1_HEADER_SIZE as u32);
        layout::write_u32(data, layout::H_HEADER_VERSION, layout::HEADER_VERSION_SAFETY_CRITICAL_ONE);
        layout::write_u32(data, layout::H_VENDOR_ID, self.vendor_id);
        layout::write_u32(data, layout::H_DEVICE_ID, self.device_id);
        layout::write_bytes(data, layout::H_CACHE_UUID, &self.pipeline_cache_uuid);
        layout::write_u32(
            data,
            layout::H_VALIDATION_VERSION,
            layout::VALIDATION_VERSION_SAFETY_CRITICAL_ONE,
        );
        layout::write_u32(data, layout::H_IMPLEMENTATION_DATA, self.implementation_data);
        layout::write_u32(data, layout::H_PIPELINE_INDEX_COUNT, self.pipeline_count());
        layout::write_u32(data, layout::H_PIPELINE_INDEX_STRIDE, self.pipeline_index_stride);
        layout::write_u64(data, layout::H_PIPELINE_INDEX_OFFSET, self.pipeline_index_offset);

        Ok(())
    }

    /// Serialize the pipeline index and every JSON and SPIR-V blob.  Returns
    /// the offset immediately after the written data.
    ///
    /// Fails before writing a single byte when any entry was never set, when
    /// two entries share a pipeline identifier, or when the laid-out data
    /// does not fit `data`.
    pub fn write_pipeline_index(&self, data: &mut [u8]) -> Result<u64, CacheError> {
        let pipelines = self.validated_pipelines()?;

        let index_size = u64::from(self.pipeline_count()) * u64::from(self.pipeline_index_stride);
        let needed = self.pipeline_index_offset + self.pipeline_index_size();
        if needed > data.len() as u64 {
            return Err(CacheError::BufferTooSmall {
                needed,
                available: data.len() as u64,
            });
        }

        let stage_stride = u64::from(self.stage_index_stride);
        let mut entry_offset = self.pipeline_index_offset;
        let mut extra_offset = self.pipeline_index_offset + index_size;

        for entry in pipelines {
            extra_offset = self.write_pipeline_entry(data, entry, entry_offset, extra_offset, stage_stride);
            entry_offset += u64::from(self.pipeline_index_stride);
        }

        Ok(extra_offset)
    }

    /// All entries present and identifiers unique, in index order.
    fn validated_pipelines(&self) -> Result<Vec<&PipelineEntry<'a>>, CacheError> {
        let slots = self.pipelines.as_deref().unwrap_or(&[]);
        let mut entries = Vec::with_capacity(slots.len());
        for (i, slot) in slots.iter().enumerate() {
            entries.push(slot.as_ref().ok_or(CacheError::MissingPipelineEntry(i as u32))?);
        }

        for (i, entry) in entries.iter().enumerate() {
            if entries[..i].iter().any(|e| e.identifier == entry.identifier) {
                return Err(CacheError::DuplicatePipelineIdentifier(entry.identifier));
            }
        }

        Ok(entries)
    }

    /// Capacity was verified by the caller; this only lays bytes down.
    fn write_pipeline_entry(
        &self,
        data: &mut [u8],
        entry: &PipelineEntry<'a>,
        entry_offset: u64,
        mut extra_offset: u64,
        stage_stride: u64,
    ) -> u64 {
        layout::write_bytes(data, entry_offset + layout::P_IDENTIFIER, &entry.identifier);
        layout::write_u64(data, entry_offset + layout::P_MEMORY_SIZE, entry.memory_size);

        match entry.json {
            Some(json) if !json.is_empty() => {
                layout::write_u64(data, entry_offset + layout::P_JSON_SIZE, json.len() as u64);
                layout::write_u64(data, entry_offset + layout::P_JSON_OFFSET, extra_offset);
                layout::write_bytes(data, extra_offset, json);
                extra_offset += json.len() as u64;
            }
            _ => {
                layout::write_u64(data, entry_offset + layout::P_JSON_SIZE, 0);
                layout::write_u64(data, entry_offset + layout::P_JSON_OFFSET, 0);
            }
        }

        let stage_count = entry.stage_count();
        if stage_count > 0 {
            let table_offset = extra_offset;
            layout::write_u32(data, entry_offset + layout::P_STAGE_INDEX_COUNT, stage_count);
            layout::write_u32(data, entry_offset + layout::P_STAGE_INDEX_STRIDE, stage_stride as u32);
            layout::write_u64(data, entry_offset + layout::P_STAGE_INDEX_OFFSET, table_offset);
            extra_offset += u64::from(stage_count) * stage_stride;

            for (i, code) in entry.stages.iter().flatten().enumerate() {
                let stage_entry = table_offset + i as u64 * stage_stride;
                match code {
                    Some(code) if !code.is_empty() => {
                        layout::write_u64(data, stage_entry + layout::S_CODE_SIZE, code.len() as u64);
                        layout::write_u64(data, stage_entry + layout::S_CODE_OFFSET, extra_offset);
                        layout::write_bytes(data, extra_offset, code);
                        extra_offset += code.len() as u64;
                    }
                    _ => {
                        layout::write_u64(data, stage_entry + layout::S_CODE_SIZE, 0);
                        layout::write_u64(data, stage_entry + layout::S_CODE_OFFSET, 0);
                    }
                }
            }
        } else {
            layout::write_u32(data, entry_offset + layout::P_STAGE_INDEX_COUNT, 0);
            layout::write_u32(data, entry_offset + layout::P_STAGE_INDEX_STRIDE, 0);
            layout::write_u64(data, entry_offset + layout::P_STAGE_INDEX_OFFSET, 0);
        }

        extra_offset
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::CacheReader;
    use crate::layout::{SC1_HEADER_SIZE, STAGE_INDEX_ENTRY_SIZE};

    fn uuid(seed: u8) -> [u8; 16] {
        let mut u = [0u8; 16];
        for (i, b) in u.iter_mut().enumerate() {
            *b = seed.wrapping_add(i as u8);
        }
        u
    }

    #[test]
    fn empty_cache_round_trips() {
        let writer = CacheWriter::with_device(0x10DE, 0x2204, uuid(7));
        let mut buf = vec![0u8; SC1_HEADER_SIZE as usize];
        writer.write_header_safety_critical_one(&mut buf).unwrap();
        assert_eq!(writer.write_pipeline_index(&mut buf).unwrap(), SC1_HEADER_SIZE);

        let pcr = CacheReader::new(&buf).unwrap();
        assert_eq!(pcr.header().vendor_id, 0x10DE);
        assert_eq!(pcr.header().device_id, 0x2204);
        assert_eq!(pcr.header().pipeline_cache_uuid, uuid(7));
        assert_eq!(pcr.pipeline_index_count(), 0);
    }

    #[test]
    fn multi_pipeline_round_trip() {
        let jsons = [br#"{"a":1}"#.as_slice(), br#"{"b":2}"#.as_slice(), br#"{"c":3}"#.as_slice()];
        let codes = [
            vec![0x07u8, 0x23, 0x02, 0x03],
            vec![0x11u8; 40],
            vec![0x42u8; 9],
        ];

        let mut writer = CacheWriter::with_device(0x1002, 0x73BF, uuid(0x40));
        writer.set_implementation_data(0xCAFE);
        writer.allocate_pipeline_index(3).unwrap();
        for i in 0..3u32 {
            let mut entry = PipelineEntry::new(uuid(i as u8), 1000 + u64::from(i));
            entry.set_json_code(jsons[i as usize]);
            entry.allocate_stages(1).unwrap();
            entry.set_shader_stage_code(0, &codes[i as usize]).unwrap();
            writer.set_pipeline_entry(i, entry).unwrap();
        }

        let size = SC1_HEADER_SIZE + writer.pipeline_index_size();
        let mut buf = vec![0u8; size as usize];
        writer.write_header_safety_critical_one(&mut buf).unwrap();
        let end = writer.write_pipeline_index(&mut buf).unwrap();
        assert_eq!(end, size);

        let pcr = CacheReader::new(&buf).unwrap();
        assert_eq!(pcr.header().implementation_data, 0xCAFE);
        assert_eq!(pcr.pipeline_index_count(), 3);
        for i in 0..3u32 {
            let pie = pcr.pipeline_index_entry(i).unwrap();
            assert_eq!(pie.pipeline_identifier, uuid(i as u8));
            assert_eq!(pie.pipeline_memory_size, 1000 + u64::from(i));
            assert_eq!(pie.json_size, jsons[i as usize].len() as u64);
            assert_eq!(pcr.json(&pie).unwrap(), jsons[i as usize]);
            let sie = pcr.stage_index_entry(&pie, 0).unwrap();
            assert_eq!(sie.code_size, codes[i as usize].len() as u64);
            assert_eq!(pcr.spirv(&sie).unwrap(), codes[i as usize].as_slice());
        }

        // Lookup by identifier finds the matching entry.
        let by_uuid = pcr.pipeline_index_entry_by_uuid(&uuid(2)).unwrap();
        assert_eq!(by_uuid.pipeline_memory_size, 1002);
        assert_eq!(pcr.pipeline_index_entry_by_uuid(&uuid(0xEE)), None);
    }

    #[test]
    fn vendor_data_read_back_and_patch() {
        // One pipeline, UUID 0..16, JSON "abc", two stages with vendor data
        // of 11 and 22 bytes; the file-wide stage stride must fit the larger.
        let spirv0 = [0xDEu8, 0xAD, 0xBE, 0xEF];
        let spirv1 = [0xC0u8, 0xDE, 0xF0, 0x0D, 0x12, 0x34];
        let vendor: [usize; 2] = [11, 22];
        let stage_stride = STAGE_INDEX_ENTRY_SIZE as u32 + vendor[1] as u32;

        let mut writer = CacheWriter::new();
        writer.set_stage_index_stride(stage_stride);
        writer.allocate_pipeline_index(1).unwrap();
        let mut entry = PipelineEntry::new(uuid(0), 4096);
        entry.set_json_code(b"abc");
        entry.allocate_stages(2).unwrap();
        entry.set_shader_stage_code(0, &spirv0).unwrap();
        entry.set_shader_stage_code(1, &spirv1).unwrap();
        writer.set_pipeline_entry(0, entry).unwrap();

        let size = SC1_HEADER_SIZE + writer.pipeline_index_size();
        let mut buf = vec![0u8; size as usize];
        writer.write_header_safety_critical_one(&mut buf).unwrap();
        writer.write_pipeline_index(&mut buf).unwrap();

        // Phase two: read the final stage entry offsets back and patch the
        // vendor bytes in behind the fixed fields.
        let mut patches = Vec::new();
        {
            let pcr = CacheReader::new(&buf).unwrap();
            let pie = pcr.pipeline_index_entry(0).unwrap();
            assert_eq!(pie.stage_index_stride, stage_stride);
            for stage in 0..2u32 {
                let sie = pcr.stage_index_entry(&pie, stage).unwrap();
                let at = sie.entry_offset + STAGE_INDEX_ENTRY_SIZE;
                patches.push((at as usize, vec![0xA0 + stage as u8; vendor[stage as usize]]));
            }
        }
        for (at, bytes) in &patches {
            buf[*at..*at + bytes.len()].copy_from_slice(bytes);
        }

        // The patch must not have disturbed any structural data or payload.
        let pcr = CacheReader::new(&buf).unwrap();
        let pie = pcr.pipeline_index_entry(0).unwrap();
        assert_eq!(pie.json_size, 3);
        assert_eq!(pcr.json(&pie).unwrap(), b"abc");
        let sie0 = pcr.stage_index_entry(&pie, 0).unwrap();
        let sie1 = pcr.stage_index_entry(&pie, 1).unwrap();
        assert_eq!(pcr.spirv(&sie0).unwrap(), &spirv0);
        assert_eq!(pcr.spirv(&sie1).unwrap(), &spirv1);
        assert_eq!(pcr.stage_index_entry(&pie, 2), None);
        let v0 = sie0.entry_offset as usize + STAGE_INDEX_ENTRY_SIZE as usize;
        assert_eq!(&buf[v0..v0 + 11], &[0xA0; 11]);
    }

    #[test]
    fn duplicate_identifiers_are_rejected() {
        let mut writer = CacheWriter::new();
        writer.allocate_pipeline_index(2).unwrap();
        writer.set_pipeline_entry(0, PipelineEntry::new(uuid(1), 64)).unwrap();
        writer.set_pipeline_entry(1, PipelineEntry::new(uuid(1), 64)).unwrap();

        let mut buf = vec![0u8; 4096];
        assert_eq!(
            writer.write_pipeline_index(&mut buf).unwrap_err(),
            CacheError::DuplicatePipelineIdentifier(uuid(1)),
        );
    }

    #[test]
    fn missing_entry_is_rejected() {
        let mut writer = CacheWriter::new();
        writer.allocate_pipeline_index(2).unwrap();
        writer.set_pipeline_entry(1, PipelineEntry::new(uuid(1), 64)).unwrap();

        let mut buf = vec![0u8; 4096];
        assert_eq!(
            writer.write_pipeline_index(&mut buf).unwrap_err(),
            CacheError::MissingPipelineEntry(0),
        );
    }

    #[test]
    fn short_buffer_is_rejected_before_any_write() {
        let mut writer = CacheWriter::new();
        writer.allocate_pipeline_index(1).unwrap();
        let mut entry = PipelineEntry::new(uuid(9), 128);
        entry.set_json_code(b"{}");
        writer.set_pipeline_entry(0, entry).unwrap();

        let mut buf = vec![0u8; SC1_HEADER_SIZE as usize + 8];
        let before = buf.clone();
        assert!(matches!(
            writer.write_pipeline_index(&mut buf),
            Err(CacheError::BufferTooSmall { .. })
        ));
        assert_eq!(buf, before);
    }

    #[test]
    fn strides_clamp_to_entry_sizes() {
        let mut writer = CacheWriter::new();
        writer.set_pipeline_index_stride(4);
        writer.set_stage_index_stride(1);
        writer.allocate_pipeline_index(0).unwrap();

        let mut buf = vec![0u8; SC1_HEADER_SIZE as usize];
        writer.write_header_safety_critical_one(&mut buf).unwrap();
        let pcr = CacheReader::new(&buf).unwrap();
        assert_eq!(pcr.header().pipeline_index_stride as u64, crate::layout::PIPELINE_INDEX_ENTRY_SIZE);
    }

    #[test]
    fn index_offset_must_clear_the_header() {
        let mut writer = CacheWriter::new();
        assert!(writer.set_pipeline_index_offset(8).is_err());
        writer.set_pipeline_index_offset(SC1_HEADER_SIZE + 64).unwrap();
        writer.allocate_pipeline_index(1).unwrap();
        writer.set_pipeline_entry(0, PipelineEntry::new(uuid(3), 32)).unwrap();

        let size = SC1_HEADER_SIZE + 64 + writer.pipeline_index_size();
        let mut buf = vec![0u8; size as usize];
        writer.write_header_safety_critical_one(&mut buf).unwrap();
        writer.write_pipeline_index(&mut buf).unwrap();

        let pcr = CacheReader::new(&buf).unwrap();
        assert_eq!(pcr.header().pipeline_index_offset, SC1_HEADER_SIZE + 64);
        assert_eq!(pcr.pipeline_index_entry(0).unwrap().pipeline_identifier, uuid(3));
    }

    #[test]
    fn allocate_twice_fails() {
        let mut writer = CacheWriter::new();
        writer.allocate_pipeline_index(1).unwrap();
        assert_eq!(
            writer.allocate_pipeline_index(1).unwrap_err(),
            CacheError::IndexAlreadyAllocated
        );

        let mut entry = PipelineEntry::new(uuid(0), 0);
        entry.allocate_stages(1).unwrap();
        assert_eq!(entry.allocate_stages(1).unwrap_err(), CacheError::StagesAlreadyAllocated);
    }
}
