//! Directory-cluster scanning.

use core::fmt::Debug;

use crate::error::Error;
use crate::fat::Chain;
use crate::io::Device;
use crate::region::dir::{trim_padding, DirEntry, EntryKind, RawEntry};
use crate::region::dir::{END_OF_DIRECTORY, ENTRY_SIZE, FREE_ENTRY};
use crate::types::ClusterID;
use crate::Volume;

/// Iterator over the classified records of one directory cluster.
///
/// Owns the cluster buffer it walks; the buffer dies with the iterator.
/// Long-name fragments and deleted slots are skipped, the end-of-directory
/// marker stops the scan.
pub struct DirIter {
    buffer: Vec<u8>,
    offset: usize,
    done: bool,
}

impl DirIter {
    /// Whether the scan stopped at an end-of-directory marker, as opposed
    /// to running out of cluster.
    pub fn hit_end_marker(&self) -> bool {
        self.done
    }
}

impl Iterator for DirIter {
    type Item = DirEntry;

    fn next(&mut self) -> Option<DirEntry> {
        while !self.done && self.offset + ENTRY_SIZE <= self.buffer.len() {
            let record = &self.buffer[self.offset..self.offset + ENTRY_SIZE];
            let raw: &RawEntry = record.try_into().ok()?;
            self.offset += ENTRY_SIZE;
            match raw[0] {
                END_OF_DIRECTORY => {
                    self.done = true;
                    return None;
                }
                FREE_ENTRY => continue,
                _ => {}
            }
            let entry = DirEntry::parse(raw);
            if entry.kind() == EntryKind::LongNameFragment {
                continue;
            }
            return Some(entry);
        }
        None
    }
}

impl<E: Debug, D: Device<Error = E>> Volume<D> {
    /// Load one cluster and iterate the directory records in it.
    ///
    /// Scans the whole cluster, `bytes_per_cluster / 32` records.
    pub fn scan_dir(&mut self, cluster: ClusterID) -> Result<DirIter, Error<E>> {
        let buffer = self.read_cluster(cluster)?;
        Ok(DirIter { buffer, offset: 0, done: false })
    }

    /// All entries of the directory starting at `start`, chain followed.
    pub fn read_dir(&mut self, start: ClusterID) -> Result<Vec<DirEntry>, Error<E>> {
        let mut entries = Vec::new();
        let mut chain = Chain::new(start, &self.geometry);
        while let Some(cluster) = chain.current() {
            let mut records = self.scan_dir(cluster)?;
            entries.extend(&mut records);
            if records.hit_end_marker() {
                break;
            }
            chain.advance(self)?;
        }
        Ok(entries)
    }

    /// Entries of the root directory.
    pub fn read_root_dir(&mut self) -> Result<Vec<DirEntry>, Error<E>> {
        let root = self.geometry.root_cluster();
        self.read_dir(root)
    }

    /// First volume-label record of the root directory, trimmed.
    ///
    /// Absence is a normal outcome, not an error.
    pub(crate) fn find_volume_label(&mut self) -> Result<Option<heapless::String<11>>, Error<E>> {
        let root = self.geometry.root_cluster();
        for entry in self.scan_dir(root)? {
            if entry.kind() != EntryKind::VolumeLabel {
                continue;
            }
            let mut label = heapless::String::new();
            for &byte in trim_padding(entry.raw_name()) {
                let _ = label.push(byte as char);
            }
            return Ok(Some(label));
        }
        Ok(None)
    }
}
