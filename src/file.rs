//! File extraction: stream a cluster chain into a sink.

use core::cmp::min;
use core::fmt::Debug;
use std::io::{ErrorKind, Write};

use crate::error::Error;
use crate::fat::Chain;
use crate::io::Device;
use crate::types::ClusterID;
use crate::Volume;

impl<E: Debug, D: Device<Error = E>> Volume<D> {
    /// Stream the file starting at `start` into `sink`.
    ///
    /// Follows the cluster chain, writing `file_size` bytes in total: each
    /// visited cluster contributes `min(remaining, bytes_per_cluster)`
    /// bytes. Stops at end-of-chain or once the size is exhausted,
    /// whichever comes first; a size landing exactly on a cluster boundary
    /// never reads a cluster past its last data. Returns the bytes
    /// written. A failed read or write aborts the extraction; whatever
    /// already reached the sink stays there.
    pub fn extract<W: Write>(
        &mut self,
        start: ClusterID,
        file_size: u32,
        sink: &mut W,
    ) -> Result<u64, Error<E>> {
        let bytes_per_cluster = self.geometry.bytes_per_cluster();
        let mut remaining = file_size;
        let mut written = 0u64;
        let mut chain = Chain::new(start, &self.geometry);
        while let Some(cluster) = chain.current() {
            if remaining == 0 {
                break;
            }
            let buffer = self.read_cluster(cluster)?;
            let take = min(remaining, bytes_per_cluster) as usize;
            write_all(sink, &buffer[..take])?;
            remaining -= take as u32;
            written += take as u64;
            if remaining == 0 {
                break;
            }
            chain.advance(self)?;
        }
        trace!("extracted {} bytes from the chain at cluster {}", written, start);
        Ok(written)
    }
}

fn write_all<E: Debug, W: Write>(sink: &mut W, mut bytes: &[u8]) -> Result<(), Error<E>> {
    while !bytes.is_empty() {
        match sink.write(bytes) {
            Ok(0) => return Err(Error::ShortWrite),
            Ok(accepted) => bytes = &bytes[accepted..],
            Err(error) if error.kind() == ErrorKind::Interrupted => continue,
            Err(error) => return Err(Error::Sink(error)),
        }
    }
    Ok(())
}
