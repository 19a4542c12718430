//! Partitioned output directories with per-partition index files.
//!
//! Partition `i` of base path `out/cfg` is the directory `out/cfg_i`. Each
//! holds one `<name>.ccf` per configuration and an `index.txt` listing the
//! names in the order they were written.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tessera_expand::Configuration;

use crate::accumulator::RoundRobin;
use crate::error::EmitError;

/// File name of the per-partition index.
pub const INDEX_FILE: &str = "index.txt";

/// Extension of configuration files.
pub const CCF_EXTENSION: &str = "ccf";

/// Directory of partition `index` for base path `base`.
pub fn partition_dir(base: &Path, index: usize) -> PathBuf {
    let mut name = base.as_os_str().to_owned();
    name.push(format!("_{index}"));
    PathBuf::from(name)
}

struct Partition {
    dir: PathBuf,
    index: BufWriter<File>,
    written: usize,
}

impl Partition {
    /// Wipes and recreates the partition directory with an empty index.
    fn create(dir: PathBuf) -> Result<Self, EmitError> {
        match fs::remove_dir_all(&dir) {
            Ok(()) => tracing::debug!("wiped {}", dir.display()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(EmitError::io(&dir, e)),
        }
        fs::create_dir_all(&dir).map_err(|e| EmitError::io(&dir, e))?;
        let index_path = dir.join(INDEX_FILE);
        let file = File::create(&index_path).map_err(|e| EmitError::io(&index_path, e))?;
        Ok(Self {
            dir,
            index: BufWriter::new(file),
            written: 0,
        })
    }

    fn write(&mut self, config: &Configuration) -> Result<String, EmitError> {
        let name = config.name();
        write_ccf(&self.dir, &name, config)?;
        writeln!(self.index, "{name}").map_err(|e| EmitError::io(self.dir.join(INDEX_FILE), e))?;
        self.written += 1;
        Ok(name)
    }
}

fn write_ccf(dir: &Path, name: &str, config: &Configuration) -> Result<PathBuf, EmitError> {
    let path = dir.join(format!("{name}.{CCF_EXTENSION}"));
    fs::write(&path, config.to_ccf()).map_err(|e| EmitError::io(&path, e))?;
    Ok(path)
}

/// What one partition received.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PartitionSummary {
    /// The partition directory.
    pub dir: PathBuf,
    /// Number of configurations written to it.
    pub written: usize,
}

/// Distributes configurations round-robin across `N` output partitions.
pub struct Sharder {
    partitions: Vec<Partition>,
    counter: RoundRobin,
}

impl Sharder {
    /// Creates `count` fresh partitions next to `base`, wiping any that exist.
    pub fn create(base: &Path, count: usize) -> Result<Self, EmitError> {
        if count == 0 {
            return Err(EmitError::NoPartitions);
        }
        let partitions = (0..count)
            .map(|i| Partition::create(partition_dir(base, i)))
            .collect::<Result<Vec<_>, _>>()?;
        tracing::info!(partitions = count, "created output partitions under {}", base.display());
        Ok(Self {
            partitions,
            counter: RoundRobin::new(count),
        })
    }

    /// Writes one accepted configuration to the next partition in turn.
    ///
    /// Returns the partition index it went to.
    pub fn emit(&mut self, config: &Configuration) -> Result<usize, EmitError> {
        let shard = self.counter.next_partition();
        self.emit_to(config, shard)?;
        Ok(shard)
    }

    /// Writes one configuration to partition `shard`.
    ///
    /// Fails with [`EmitError::UnknownPartition`] if `shard` is not below the
    /// partition count.
    pub fn emit_to(&mut self, config: &Configuration, shard: usize) -> Result<(), EmitError> {
        let partitions = self.partitions.len();
        let partition = self
            .partitions
            .get_mut(shard)
            .ok_or(EmitError::UnknownPartition { shard, partitions })?;
        let name = partition.write(config)?;
        tracing::debug!(shard, "wrote {name}");
        Ok(())
    }

    /// Number of configurations emitted through [`emit`](Self::emit).
    pub fn accepted(&self) -> u64 {
        self.counter.accepted()
    }

    /// Number of partitions.
    pub fn partition_count(&self) -> usize {
        self.partitions.len()
    }

    /// Flushes every index file and reports what each partition received.
    pub fn finish(self) -> Result<Vec<PartitionSummary>, EmitError> {
        let mut summaries = Vec::with_capacity(self.partitions.len());
        for mut partition in self.partitions {
            partition
                .index
                .flush()
                .map_err(|e| EmitError::io(partition.dir.join(INDEX_FILE), e))?;
            summaries.push(PartitionSummary {
                dir: partition.dir,
                written: partition.written,
            });
        }
        Ok(summaries)
    }
}

/// Writes a single configuration and a one-line index into `dir`.
///
/// The directory is created if needed; existing files other than the two
/// written here are left alone.
pub fn write_single(dir: &Path, config: &Configuration) -> Result<PathBuf, EmitError> {
    fs::create_dir_all(dir).map_err(|e| EmitError::io(dir, e))?;
    let name = config.name();
    let path = write_ccf(dir, &name, config)?;
    let index_path = dir.join(INDEX_FILE);
    fs::write(&index_path, format!("{name}\n")).map_err(|e| EmitError::io(&index_path, e))?;
    tracing::info!("wrote {}", path.display());
    Ok(path)
}
