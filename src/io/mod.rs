pub mod std;

use core::fmt::Debug;

use crate::error::Error;

/// Random-access byte store backing a mounted volume.
///
/// The volume issues seek-then-read pairs against one shared cursor, so a
/// device handle must not be used by several logical operations at once;
/// callers needing that serialize externally or duplicate the handle.
pub trait Device {
    type Error: Debug;

    /// Position the cursor at an absolute byte offset.
    fn seek(&mut self, offset: u64) -> Result<(), Self::Error>;

    /// Read into `buf`, returning how many bytes were read. Zero means the
    /// store has no more bytes at the current position.
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error>;
}

impl<D: Device> Device for &mut D {
    type Error = D::Error;

    fn seek(&mut self, offset: u64) -> Result<(), Self::Error> {
        (**self).seek(offset)
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        (**self).read(buf)
    }
}

/// Fill `buf` completely from `device` starting at `offset`.
pub(crate) fn read_exact_at<D: Device>(
    device: &mut D,
    offset: u64,
    buf: &mut [u8],
) -> Result<(), Error<D::Error>> {
    device.seek(offset).map_err(Error::Device)?;
    let mut filled = 0;
    while filled < buf.len() {
        match device.read(&mut buf[filled..]).map_err(Error::Device)? {
            0 => return Err(Error::ShortRead),
            read => filled += read,
        }
    }
    Ok(())
}
