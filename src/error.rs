use core::fmt::Debug;
use std::io;

use thiserror::Error;

/// The on-disk data contradicts the FAT32 layout.
#[derive(Copy, Clone, Debug, Error, PartialEq, Eq)]
pub enum DataError {
    /// Boot-sector or FSInfo validation failed.
    #[error("not a FAT32 volume")]
    NotFat32,
    /// A cluster chain revisits clusters instead of terminating.
    #[error("cluster chain exceeded {limit} clusters without terminating")]
    CorruptChain { limit: u32 },
}

/// The caller asked for something outside the volume.
#[derive(Copy, Clone, Debug, Error, PartialEq, Eq)]
pub enum InputError {
    /// Cluster numbers below 2 or beyond the data region address nothing.
    #[error("cluster {cluster} is outside the data region")]
    InvalidCluster { cluster: u32 },
}

/// Any failure surfaced by a volume operation.
///
/// `E` is the backing device's error type. Failures abort the operation
/// that raised them; the volume never retries or recovers partially.
#[derive(Debug, Error)]
pub enum Error<E: Debug> {
    /// The backing device failed to seek or read.
    #[error("device error: {0:?}")]
    Device(E),
    /// The backing device ran out of bytes mid-read.
    #[error("device returned fewer bytes than requested")]
    ShortRead,
    /// The output sink stopped accepting bytes.
    #[error("sink accepted fewer bytes than requested")]
    ShortWrite,
    /// The output sink failed.
    #[error("sink error: {0}")]
    Sink(#[source] io::Error),
    #[error(transparent)]
    Data(#[from] DataError),
    #[error(transparent)]
    Input(#[from] InputError),
}
