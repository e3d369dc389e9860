// Copyright 2026 The VkSC PCUtil Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Vkscpcinfo
//!
//! Command line inspector for safety critical pipeline cache files: dump
//! headers and index entries at selectable detail, and dry-run the bucketing
//! of pipelines into fixed-size memory pools to size a recycled pool
//! configuration before deployment.

use std::fmt::Write as _;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::Parser;
use log::{info, warn};

use vksc_pcutil::{CacheReader, PipelineIndexEntry, UUID_SIZE};

#[derive(Parser, Debug)]
#[command(version, about = "Inspect Vulkan SC pipeline cache files")]
struct Args {
    /// List basic pipeline info (index, identifier, memory size)
    #[arg(short = 'l')]
    list: bool,

    /// Print the first header (device info, pipeline index)
    #[arg(short = 'f')]
    first_header: bool,

    /// List detailed pipeline info (-l, plus all header fields)
    #[arg(short = 'd')]
    detailed: bool,

    /// List all pipeline info (-d, plus embedded JSON and SPIR-V)
    #[arg(short = 'a')]
    all: bool,

    /// Add a bucket of the given size; repeatable (also spelled -pool)
    #[arg(long = "pool", value_name = "SIZE")]
    pools: Vec<u64>,

    /// The pipeline cache file to inspect
    file: PathBuf,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
enum DetailMode {
    None,
    Basic,
    FirstHeader,
    AllHeaders,
    All,
}

impl Args {
    /// The most detailed mode wins when several flags are given.
    fn detail_mode(&self) -> DetailMode {
        if self.all {
            DetailMode::All
        } else if self.detailed {
            DetailMode::AllHeaders
        } else if self.first_header {
            DetailMode::FirstHeader
        } else if self.list {
            DetailMode::Basic
        } else {
            DetailMode::None
        }
    }
}

/// One size class of a recycled pipeline memory pool.
struct PipelinePool {
    size: u64,
    min: u64,
    max: u64,
    total: u64,
    entries: Vec<u32>,
}

impl PipelinePool {
    fn new(size: u64) -> Self {
        Self {
            size,
            min: u64::MAX,
            max: 0,
            total: 0,
            entries: Vec::new(),
        }
    }
}

fn uuid_hex(uuid: &[u8; UUID_SIZE]) -> String {
    let mut out = String::with_capacity(2 + 2 * UUID_SIZE);
    out.push_str("0x");
    for byte in uuid {
        let _ = write!(out, "{byte:02X}");
    }
    out
}

fn print_first_header(pcr: &CacheReader) {
    let header = pcr.header();
    println!();
    println!("headerSize:          {}", header.header_size);
    println!("headerVersion:       {}", header.header_version);
    println!("vendorID:            {:#x}", header.vendor_id);
    println!("deviceID:            {:#x}", header.device_id);
    println!("pipelineCacheUUID:   {}", uuid_hex(&header.pipeline_cache_uuid));
    println!("validationVersion:   {}", header.validation_version);
    println!("implementationData:  {}", header.implementation_data);
    println!("pipelineIndexCount:  {}", header.pipeline_index_count);
    println!("pipelineIndexStride: {}", header.pipeline_index_stride);
    println!("pipelineIndexOffset: {}", header.pipeline_index_offset);
    println!();
}

fn print_spirv(code: &[u8]) {
    print!("    spirv:            ");
    for (k, word) in code.chunks_exact(4).enumerate() {
        let word = u32::from_le_bytes([word[0], word[1], word[2], word[3]]);
        print!("{word:#010x},");
        if k % 8 == 7 {
            print!("\n                      ");
        }
    }
    println!();
}

fn print_pipeline_details(
    pcr: &CacheReader,
    index: u32,
    pie: &PipelineIndexEntry,
    details: DetailMode,
) {
    println!("pipeline {index}:");
    println!("  pipelineIdentifier: {}", uuid_hex(&pie.pipeline_identifier));
    println!("  pipelineMemorySize: {}", pie.pipeline_memory_size);
    println!("  jsonSize:           {}", pie.json_size);
    println!("  jsonOffset:         {}", pie.json_offset);
    println!("  stageIndexCount:    {}", pie.stage_index_count);
    println!("  stageIndexStride:   {}", pie.stage_index_stride);
    println!("  stageIndexOffset:   {}", pie.stage_index_offset);

    for j in 0..pie.stage_index_count {
        let Some(sie) = pcr.stage_index_entry(pie, j) else {
            continue;
        };
        println!("  stage {j}:");
        println!("    codeSize:         {}", sie.code_size);
        println!("    codeOffset:       {}", sie.code_offset);
        if details >= DetailMode::All {
            if let Some(code) = pcr.spirv(&sie) {
                print_spirv(code);
            }
        }
    }

    if details >= DetailMode::All {
        if let Some(json) = pcr.json(pie) {
            println!("  json:");
            println!("{}", String::from_utf8_lossy(json));
        }
    }
    println!();
}

fn print_cache_info(pcr: &CacheReader, details: DetailMode) -> anyhow::Result<()> {
    if details >= DetailMode::FirstHeader {
        print_first_header(pcr);
    }

    let mut min_size = u64::MAX;
    let mut max_size = 0u64;

    for i in 0..pcr.pipeline_index_count() {
        let Some(pie) = pcr.pipeline_index_entry(i) else {
            bail!("pipeline index entry {i} not found, malformed pipeline cache");
        };

        if details >= DetailMode::AllHeaders {
            print_pipeline_details(pcr, i, &pie, details);
        } else if details == DetailMode::Basic {
            println!(
                "index: {i:3} id: {} pipelineMemorySize: {}",
                uuid_hex(&pie.pipeline_identifier),
                pie.pipeline_memory_size
            );
        }
        min_size = min_size.min(pie.pipeline_memory_size);
        max_size = max_size.max(pie.pipeline_memory_size);
    }

    println!(
        "found {} pipelines, sizes [{min_size}, {max_size}]",
        pcr.pipeline_index_count()
    );
    Ok(())
}

/// Add every pipeline to the smallest pool it fits in.  `pools` must be
/// sorted by increasing size.  Returns false when at least one pipeline fit
/// no pool.
fn bucket_pipelines(pcr: &CacheReader, pools: &mut [PipelinePool]) -> bool {
    let mut all_added = true;

    for i in 0..pcr.pipeline_index_count() {
        let Some(pie) = pcr.pipeline_index_entry(i) else {
            continue;
        };

        let target = pools
            .iter_mut()
            .find(|pool| pie.pipeline_memory_size <= pool.size);
        match target {
            Some(pool) => {
                pool.entries.push(i);
                pool.min = pool.min.min(pie.pipeline_memory_size);
                pool.max = pool.max.max(pie.pipeline_memory_size);
                pool.total += pie.pipeline_memory_size;
            }
            None => {
                warn!(
                    "index {i} id: {} pipelineMemorySize: {} did not fit in any pool",
                    uuid_hex(&pie.pipeline_identifier),
                    pie.pipeline_memory_size
                );
                all_added = false;
            }
        }
    }

    all_added
}

fn print_pools(pcr: &CacheReader, pools: &[PipelinePool]) {
    for pool in pools {
        let count = pool.entries.len() as u64;
        println!("======================================");
        println!("pool size: {}, pool entries: {count}", pool.size);
        if count == 0 {
            continue;
        }
        println!("pool min size: {}", pool.min);
        println!("pool max size: {}", pool.max);
        println!("pool average size: {}", pool.total / count);
        println!("pool allocated space: {}", pool.size * count);
        println!("pool wasted space: {}", pool.size * count - pool.total);
        println!("pool entry identifiers (hex):");
        for &index in &pool.entries {
            if let Some(pie) = pcr.pipeline_index_entry(index) {
                println!("    {}", uuid_hex(&pie.pipeline_identifier));
            }
        }
    }
}

/// The historical spelling of the pool flag is single-dash `-pool`, which
/// the option parser cannot express; rewrite it before parsing.
fn normalize_args(argv: impl IntoIterator<Item = String>) -> Vec<String> {
    argv.into_iter()
        .map(|arg| {
            if arg == "-pool" {
                "--pool".to_owned()
            } else {
                arg
            }
        })
        .collect()
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse_from(normalize_args(std::env::args()));

    let data = fs::read(&args.file)
        .with_context(|| format!("failed to read {}", args.file.display()))?;
    info!("read {} bytes from {}", data.len(), args.file.display());

    let pcr = CacheReader::new(&data).with_context(|| {
        format!(
            "{} is not a valid safety critical pipeline cache",
            args.file.display()
        )
    })?;

    let details = args.detail_mode();
    if details >= DetailMode::Basic {
        print_cache_info(&pcr, details)?;
    }

    if !args.pools.is_empty() {
        let mut pools: Vec<PipelinePool> =
            args.pools.iter().map(|&size| PipelinePool::new(size)).collect();
        pools.sort_by_key(|pool| pool.size);

        println!("requested pools");
        for pool in &pools {
            println!("    pool size: {}", pool.size);
        }

        bucket_pipelines(&pcr, &mut pools);
        print_pools(&pcr, &pools);
    }

    Ok(())
}
