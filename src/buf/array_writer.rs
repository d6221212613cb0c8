use crate::error::{Error, ErrorKind, Result};
use crate::frame::Frame;
use crate::write::Write;

use super::{Alloc, OwnedBuf, MAX_ARRAY_LENGTH};

/// Writes the frame of an array into an [`OwnedBuf`].
///
/// The `u32` byte length of the payload is allocated up front and backfilled
/// by [`ArrayWriter::finish`]. Padding between the length and the payload is
/// not counted in the length.
///
/// # Examples
///
/// ```
/// use dbus_wire::proto::Endianness;
/// use dbus_wire::{ArrayWriter, OwnedBuf};
///
/// let mut buf = OwnedBuf::with_endianness(Endianness::LITTLE);
///
/// let mut array = ArrayWriter::new(&mut buf, 4);
/// array.store(1u32);
/// array.store(2u32);
/// array.finish()?;
///
/// assert_eq!(buf.get(), &[8, 0, 0, 0, 1, 0, 0, 0, 2, 0, 0, 0]);
/// # Ok::<_, dbus_wire::Error>(())
/// ```
pub struct ArrayWriter<'a> {
    buf: &'a mut OwnedBuf,
    len: Alloc<u32>,
    start: usize,
}

impl<'a> ArrayWriter<'a> {
    /// Start an array whose elements have the given natural alignment.
    pub fn new(buf: &'a mut OwnedBuf, element_alignment: usize) -> Self {
        let len = buf.alloc::<u32>();
        buf.align_mut(element_alignment);
        let start = buf.len();

        Self { buf, len, start }
    }

    /// Store a fixed-size element.
    pub fn store<T>(&mut self, frame: T)
    where
        T: Frame,
    {
        self.buf.store(frame);
    }

    /// Write a length-prefixed element.
    pub fn write<T>(&mut self, value: &T)
    where
        T: ?Sized + Write,
    {
        self.buf.write(value);
    }

    /// Pad the payload to `align`.
    pub fn align_mut(&mut self, align: usize) {
        self.buf.align_mut(align);
    }

    /// Access the underlying buffer, for nested frames.
    pub fn buf(&mut self) -> &mut OwnedBuf {
        self.buf
    }

    /// Backfill the payload length.
    pub fn finish(self) -> Result<()> {
        let bytes = self.buf.len() - self.start;

        if bytes > MAX_ARRAY_LENGTH as usize {
            let bytes = u32::try_from(bytes).unwrap_or(u32::MAX);
            return Err(Error::new(ErrorKind::ArrayTooLong(bytes)));
        }

        self.buf.store_at(self.len, bytes as u32);
        Ok(())
    }
}
