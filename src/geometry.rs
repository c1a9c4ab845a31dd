//! Sector and cluster arithmetic derived from the BPB.

use crate::error::InputError;
use crate::region::boot::BootSector;
use crate::region::fat::FAT_ENTRY_SIZE;
use crate::types::{ClusterID, SectorID};

/// Immutable volume geometry, derived once from the boot sector.
///
/// Every method is a pure function of the stored fields; nothing here
/// touches the backing device.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Geometry {
    pub(crate) bytes_per_sector: u16,
    pub(crate) sectors_per_cluster: u8,
    pub(crate) reserved_sectors: u16,
    pub(crate) fat_count: u8,
    pub(crate) fat_size: u32,
    pub(crate) total_sectors: u32,
    pub(crate) root_cluster: ClusterID,
}

impl Geometry {
    pub(crate) fn from_boot(boot: &BootSector) -> Self {
        Self {
            bytes_per_sector: boot.bytes_per_sector.get(),
            sectors_per_cluster: boot.sectors_per_cluster,
            reserved_sectors: boot.reserved_sectors.get(),
            fat_count: boot.fat_count,
            fat_size: boot.fat_size.get(),
            total_sectors: boot.total_sectors.get(),
            root_cluster: boot.root_cluster.get().into(),
        }
    }

    pub fn bytes_per_sector(&self) -> u16 {
        self.bytes_per_sector
    }

    pub fn sectors_per_cluster(&self) -> u8 {
        self.sectors_per_cluster
    }

    pub fn reserved_sectors(&self) -> u16 {
        self.reserved_sectors
    }

    pub fn fat_count(&self) -> u8 {
        self.fat_count
    }

    /// Size of one FAT copy, in sectors.
    pub fn fat_size(&self) -> u32 {
        self.fat_size
    }

    pub fn total_sectors(&self) -> u32 {
        self.total_sectors
    }

    /// First cluster of the root directory.
    pub fn root_cluster(&self) -> ClusterID {
        self.root_cluster
    }

    /// First sector past the reserved region and all FAT copies.
    pub fn first_data_sector(&self) -> u32 {
        self.reserved_sectors as u32 + self.fat_count as u32 * self.fat_size
    }

    /// Sectors available to data clusters.
    pub fn data_sector_count(&self) -> u32 {
        self.total_sectors - self.first_data_sector()
    }

    /// Data clusters on the volume; also the step ceiling for chain walks.
    pub fn cluster_count(&self) -> u32 {
        self.data_sector_count() / self.sectors_per_cluster as u32
    }

    pub fn bytes_per_cluster(&self) -> u32 {
        self.sectors_per_cluster as u32 * self.bytes_per_sector as u32
    }

    /// First sector of a data cluster.
    ///
    /// Defined only for addressable clusters; anything below 2 or past the
    /// data region fails rather than produce a bogus offset.
    pub fn first_sector_of(&self, cluster: ClusterID) -> Result<SectorID, InputError> {
        self.check(cluster)?;
        let sectors = cluster.index() as u64 * self.sectors_per_cluster as u64;
        Ok(SectorID::from(self.first_data_sector() as u64 + sectors))
    }

    /// FAT sector holding the entry for `cluster`.
    pub fn fat_sector_of(&self, cluster: ClusterID) -> SectorID {
        let fat_offset = u32::from(cluster) as u64 * FAT_ENTRY_SIZE;
        SectorID::from(self.reserved_sectors as u64 + fat_offset / self.bytes_per_sector as u64)
    }

    /// Byte offset of the entry for `cluster` within its FAT sector.
    pub fn fat_entry_offset(&self, cluster: ClusterID) -> u32 {
        let fat_offset = u32::from(cluster) as u64 * FAT_ENTRY_SIZE;
        (fat_offset % self.bytes_per_sector as u64) as u32
    }

    /// Absolute byte offset of a sector.
    pub(crate) fn byte_of(&self, sector: SectorID) -> u64 {
        u64::from(sector) * self.bytes_per_sector as u64
    }

    pub(crate) fn check(&self, cluster: ClusterID) -> Result<(), InputError> {
        let raw = u32::from(cluster);
        if !cluster.is_addressable() || raw >= self.cluster_count() + 2 {
            return Err(InputError::InvalidCluster { cluster: raw });
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::Geometry;
    use crate::error::InputError;
    use crate::types::{ClusterID, SectorID};

    fn geometry() -> Geometry {
        Geometry {
            bytes_per_sector: 512,
            sectors_per_cluster: 8,
            reserved_sectors: 32,
            fat_count: 2,
            fat_size: 128,
            total_sectors: 131072,
            root_cluster: ClusterID::from(2u32),
        }
    }

    #[test]
    fn data_region_accounts_for_every_sector() {
        let geometry = geometry();
        assert_eq!(geometry.first_data_sector(), 32 + 2 * 128);
        assert_eq!(geometry.first_data_sector() + geometry.data_sector_count(), 131072);
    }

    #[test]
    fn cluster_count_uses_integer_division() {
        let mut geometry = geometry();
        geometry.total_sectors = 131077; // 5 trailing sectors never make a cluster
        assert_eq!(geometry.cluster_count(), (131077 - 288) / 8);
    }

    #[test]
    fn first_cluster_starts_the_data_region() {
        let geometry = geometry();
        let sector = geometry.first_sector_of(ClusterID::FIRST_DATA).unwrap();
        assert_eq!(sector, SectorID::from(geometry.first_data_sector() as u64));
        let sector = geometry.first_sector_of(ClusterID::from(3u32)).unwrap();
        assert_eq!(sector, SectorID::from(geometry.first_data_sector() as u64 + 8));
    }

    #[test]
    fn reserved_and_out_of_range_clusters_are_rejected() {
        let geometry = geometry();
        for cluster in [0u32, 1] {
            let error = geometry.first_sector_of(cluster.into()).unwrap_err();
            assert_eq!(error, InputError::InvalidCluster { cluster });
        }
        let past_end = geometry.cluster_count() + 2;
        let error = geometry.first_sector_of(past_end.into()).unwrap_err();
        assert_eq!(error, InputError::InvalidCluster { cluster: past_end });
        assert!(geometry.first_sector_of((past_end - 1).into()).is_ok());
    }

    #[test]
    fn fat_entry_addressing() {
        let geometry = geometry();
        // four bytes per entry, 128 entries per 512-byte sector
        assert_eq!(geometry.fat_sector_of(ClusterID::from(2u32)), SectorID::from(32u64));
        assert_eq!(geometry.fat_entry_offset(ClusterID::from(2u32)), 8);
        assert_eq!(geometry.fat_sector_of(ClusterID::from(128u32)), SectorID::from(33u64));
        assert_eq!(geometry.fat_entry_offset(ClusterID::from(128u32)), 0);
    }
}
