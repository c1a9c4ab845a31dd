use std::fs;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

use super::Device;

/// Adapter exposing any `Read + Seek` handle as a [`Device`].
#[derive(Debug)]
pub struct StdDevice<T> {
    inner: T,
}

impl<T> StdDevice<T> {
    pub fn new(inner: T) -> Self {
        Self { inner }
    }

    /// Release the wrapped handle.
    pub fn into_inner(self) -> T {
        self.inner
    }
}

impl StdDevice<fs::File> {
    /// Open a disk image read-only.
    pub fn open<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        Ok(Self::new(fs::File::open(path)?))
    }
}

impl<T: Read + Seek> Device for StdDevice<T> {
    type Error = std::io::Error;

    fn seek(&mut self, offset: u64) -> Result<(), Self::Error> {
        self.inner.seek(SeekFrom::Start(offset)).map(|_| ())
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        self.inner.read(buf)
    }
}
