#![doc = include_str!("../README.md")]

#[macro_use]
extern crate log;

mod directory;
mod endian;
pub mod error;
mod fat;
mod file;
mod geometry;
pub mod io;
mod region;
pub mod types;

use core::fmt::Debug;
use core::mem;

pub use directory::DirIter;
use error::{DataError, Error};
pub use fat::Chain;
pub use geometry::Geometry;
use io::{read_exact_at, Device};
use region::boot::{BootSector, FsInfoSector, FSINFO_UNKNOWN, RESERVED_STRUCT_SIZE};
pub use region::dir::{Attributes, DirEntry, EntryKind};
pub use region::fat::FatEntry;
pub use types::{ClusterID, SectorID};

/// A mounted read-only FAT32 volume over a caller-supplied device.
///
/// The device moves in at mount and can be lent instead (`&mut D` is a
/// device too); [`Volume::into_device`] hands it back. Geometry and the
/// cached label never change after mounting.
pub struct Volume<D> {
    pub(crate) device: D,
    pub(crate) geometry: Geometry,
    volume_id: u32,
    free_clusters: Option<u32>,
    volume_label: Option<heapless::String<11>>,
}

impl<E: Debug, D: Device<Error = E>> Volume<D> {
    /// Parse the reserved region of `device` and mount the volume.
    ///
    /// Reads and validates the boot sector and the FSInfo sector it points
    /// at, derives the geometry and caches the volume label from the root
    /// directory.
    pub fn mount(mut device: D) -> Result<Self, Error<E>> {
        let mut buffer = [0u8; RESERVED_STRUCT_SIZE];
        read_exact_at(&mut device, u64::from(SectorID::BOOT), &mut buffer)?;
        let boot: &BootSector = unsafe { mem::transmute(&buffer) };
        if !boot.is_fat32() {
            return Err(DataError::NotFat32.into());
        }
        let geometry = Geometry::from_boot(boot);
        let volume_id = boot.volume_id.get();
        let fsinfo_sector = SectorID::from(boot.fsinfo_sector.get() as u64);
        debug!("FAT32 volume {:08X}: {:?}", volume_id, geometry);

        let mut buffer = [0u8; RESERVED_STRUCT_SIZE];
        read_exact_at(&mut device, geometry.byte_of(fsinfo_sector), &mut buffer)?;
        let fsinfo: &FsInfoSector = unsafe { mem::transmute(&buffer) };
        if !fsinfo.is_valid() {
            return Err(DataError::NotFat32.into());
        }
        let free_count = fsinfo.free_count.get();
        let free_clusters =
            (free_count != FSINFO_UNKNOWN && free_count <= geometry.cluster_count())
                .then_some(free_count);

        let mut volume =
            Self { device, geometry, volume_id, free_clusters, volume_label: None };
        volume.volume_label = volume.find_volume_label()?;
        Ok(volume)
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// Volume serial number from the boot sector.
    pub fn volume_id(&self) -> u32 {
        self.volume_id
    }

    /// Free-cluster count recorded in FSInfo, when one is recorded.
    pub fn free_clusters(&self) -> Option<u32> {
        self.free_clusters
    }

    /// Volume label from the root directory, if one exists.
    pub fn volume_label(&self) -> Option<&str> {
        self.volume_label.as_ref().map(|label| label.as_str())
    }

    /// Successor of `cluster` in its FAT chain.
    pub fn next_cluster(&mut self, cluster: ClusterID) -> Result<FatEntry, Error<E>> {
        fat::next_cluster(&mut self.device, &self.geometry, cluster)
    }

    /// Begin a bounded walk of the chain starting at `start`.
    pub fn chain(&self, start: ClusterID) -> Chain {
        Chain::new(start, &self.geometry)
    }

    /// Load the full contents of one data cluster.
    ///
    /// The buffer belongs to the caller and is never cached; every access
    /// rereads the device.
    pub fn read_cluster(&mut self, cluster: ClusterID) -> Result<Vec<u8>, Error<E>> {
        let sector = self.geometry.first_sector_of(cluster)?;
        let mut buffer = vec![0u8; self.geometry.bytes_per_cluster() as usize];
        read_exact_at(&mut self.device, self.geometry.byte_of(sector), &mut buffer)?;
        Ok(buffer)
    }

    /// Unmount, releasing the backing device.
    pub fn into_device(self) -> D {
        self.device
    }
}
