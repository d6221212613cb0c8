use std::fmt;
use std::mem::{align_of, size_of};
use std::ptr;

use crate::error::{Error, ErrorKind, Result};
use crate::frame::Frame;
use crate::proto::Endianness;
use crate::read::Read;

use super::{padding_to, MAX_ARRAY_LENGTH};

/// A position-tracked read-only view over a byte buffer.
///
/// The view borrows the buffer and interprets multi-byte values in the
/// endianness it was constructed with. Every read honors the natural
/// alignment of the value being read, counted from the start of the
/// underlying buffer, which for message decoding is the start of the
/// message.
///
/// # Examples
///
/// ```
/// use dbus_wire::proto::Endianness;
/// use dbus_wire::ReadBuf;
///
/// let mut buf = ReadBuf::from_slice(&[0x12, 0x00, 0x34, 0x56, 0x78], Endianness::LITTLE);
///
/// assert_eq!(buf.load::<u8>()?, 0x12);
/// // one padding byte is skipped to reach 2-alignment
/// assert_eq!(buf.load::<i16>()?, 0x5634);
/// assert_eq!(buf.load::<u8>()?, 0x78);
/// assert_eq!(buf.pos(), 5);
/// assert!(buf.is_empty());
/// # Ok::<_, dbus_wire::Error>(())
/// ```
pub struct ReadBuf<'a> {
    /// The buffer from its alignment base up to the limit of this view.
    data: &'a [u8],
    /// The read position inside of `data`.
    read: usize,
    endianness: Endianness,
}

impl<'a> ReadBuf<'a> {
    /// Construct an empty read buffer.
    pub const fn empty() -> Self {
        Self {
            data: &[],
            read: 0,
            endianness: Endianness::NATIVE,
        }
    }

    /// Construct a read buffer over a slice.
    ///
    /// Alignment is counted from the start of the slice.
    pub const fn from_slice(data: &'a [u8], endianness: Endianness) -> Self {
        Self {
            data,
            read: 0,
            endianness,
        }
    }

    /// Get the endianness of the buffer.
    pub fn endianness(&self) -> Endianness {
        self.endianness
    }

    /// Set the endianness of the buffer.
    pub(crate) fn set_endianness(&mut self, endianness: Endianness) {
        self.endianness = endianness;
    }

    /// The current read position, counted from the alignment base.
    pub fn pos(&self) -> usize {
        self.read
    }

    /// The number of bytes left to read.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.read
    }

    /// Test if the buffer has been read to the end.
    pub fn is_empty(&self) -> bool {
        self.read == self.data.len()
    }

    /// Get the bytes which have not been read yet.
    pub fn get(&self) -> &'a [u8] {
        &self.data[self.read..]
    }

    /// Load a fixed-size value of type `T`.
    ///
    /// The read position is first advanced to the natural alignment of `T`,
    /// then by its size. The returned value is interpreted in the buffer's
    /// endianness.
    ///
    /// # Examples
    ///
    /// ```
    /// use dbus_wire::proto::Endianness;
    /// use dbus_wire::ReadBuf;
    ///
    /// let mut buf = ReadBuf::from_slice(&[1, 0, 0, 0], Endianness::LITTLE);
    /// assert_eq!(buf.load::<u32>()?, 1);
    /// assert!(buf.load::<u8>().is_err());
    /// # Ok::<_, dbus_wire::Error>(())
    /// ```
    pub fn load<T>(&mut self) -> Result<T>
    where
        T: Frame,
    {
        if self.read == self.data.len() {
            return Err(Error::new(ErrorKind::EndOfStream));
        }

        let padding = padding_to(align_of::<T>(), self.read);

        if self.read + padding + size_of::<T>() > self.data.len() {
            return Err(Error::new(ErrorKind::InvalidAlignment));
        }

        self.check_padding(padding)?;
        self.read += padding;

        // SAFETY: The read position was just checked to be in bounds and any
        // Frame type inhabits all bit patterns.
        let mut frame = unsafe {
            ptr::read_unaligned(self.data.as_ptr().add(self.read).cast::<T>())
        };

        self.read += size_of::<T>();
        frame.adjust(self.endianness);
        Ok(frame)
    }

    /// Load a boolean.
    ///
    /// Booleans are marshalled as a `u32` where only `0` and `1` are valid.
    pub fn load_bool(&mut self) -> Result<bool> {
        match self.load::<u32>()? {
            0 => Ok(false),
            1 => Ok(true),
            value => Err(Error::new(ErrorKind::InvalidBoolean(value))),
        }
    }

    /// Read a reference from the buffer.
    ///
    /// This is used for length-prefixed unsized values such as `str` and
    /// [`Signature`] which implement [`Read`].
    ///
    /// [`Signature`]: crate::Signature
    ///
    /// # Examples
    ///
    /// ```
    /// use dbus_wire::proto::Endianness;
    /// use dbus_wire::ReadBuf;
    ///
    /// let mut buf = ReadBuf::from_slice(b"\x03\x00\x00\x00foo\x00", Endianness::LITTLE);
    /// assert_eq!(buf.read::<str>()?, "foo");
    /// assert_eq!(buf.pos(), 8);
    /// # Ok::<_, dbus_wire::Error>(())
    /// ```
    pub fn read<T>(&mut self) -> Result<&'a T>
    where
        T: ?Sized + Read,
    {
        T::read_from(self)
    }

    /// Advance the read position by `n` bytes.
    pub fn advance(&mut self, n: usize) -> Result<()> {
        if self.read + n > self.data.len() {
            return Err(Error::new(ErrorKind::EndOfStream));
        }

        self.read += n;
        Ok(())
    }

    /// Advance the read position to the next multiple of `align`, which must
    /// be a power of two.
    pub fn align_to(&mut self, align: usize) -> Result<()> {
        let padding = padding_to(align, self.read);

        if self.read + padding > self.data.len() {
            return Err(Error::new(ErrorKind::InvalidAlignment));
        }

        self.check_padding(padding)?;
        self.read += padding;
        Ok(())
    }

    /// Load a raw slice of `len` bytes.
    pub fn load_slice(&mut self, len: usize) -> Result<&'a [u8]> {
        if self.read + len > self.data.len() {
            return Err(Error::new(ErrorKind::InvalidLength(len as u32)));
        }

        let slice = &self.data[self.read..self.read + len];
        self.read += len;
        Ok(slice)
    }

    /// Load a slice of `len` bytes followed by a NUL byte, excluding the NUL
    /// byte from the returned slice.
    pub fn load_slice_nul(&mut self, len: usize) -> Result<&'a [u8]> {
        if self.read + len + 1 > self.data.len() {
            return Err(Error::new(ErrorKind::InvalidLength(len as u32)));
        }

        if self.data[self.read + len] != 0 {
            return Err(Error::new(ErrorKind::NotNullTerminated));
        }

        let slice = &self.data[self.read..self.read + len];
        self.read += len + 1;
        Ok(slice)
    }

    /// Split off a view over the next `len` bytes and advance past them.
    ///
    /// The returned view shares this buffer's alignment base, so aligned
    /// reads inside of it stay aligned relative to the message.
    pub fn read_buf(&mut self, len: usize) -> Result<ReadBuf<'a>> {
        if self.read + len > self.data.len() {
            return Err(Error::new(ErrorKind::InvalidLength(len as u32)));
        }

        let buf = ReadBuf {
            data: &self.data[..self.read + len],
            read: self.read,
            endianness: self.endianness,
        };

        self.read += len;
        Ok(buf)
    }

    /// Read the frame of an array whose elements have the given natural
    /// alignment.
    ///
    /// This loads the `u32` byte length of the array payload, pads to the
    /// element alignment (this padding is not part of the payload length)
    /// and returns a view over the payload.
    ///
    /// # Examples
    ///
    /// ```
    /// use dbus_wire::proto::Endianness;
    /// use dbus_wire::ReadBuf;
    ///
    /// let mut buf = ReadBuf::from_slice(b"\x08\x00\x00\x00\x01\x00\x00\x00\x02\x00\x00\x00", Endianness::LITTLE);
    ///
    /// let mut array = buf.read_array_frame(4)?;
    /// assert_eq!(array.load::<u32>()?, 1);
    /// assert_eq!(array.load::<u32>()?, 2);
    /// assert!(array.is_empty());
    /// # Ok::<_, dbus_wire::Error>(())
    /// ```
    pub fn read_array_frame(&mut self, element_alignment: usize) -> Result<ReadBuf<'a>> {
        let bytes = self.load::<u32>()?;

        if bytes > MAX_ARRAY_LENGTH {
            return Err(Error::new(ErrorKind::ArrayTooLong(bytes)));
        }

        self.align_to(element_alignment)?;
        self.read_buf(bytes as usize)
    }

    #[cfg(feature = "strict-padding")]
    fn check_padding(&self, padding: usize) -> Result<()> {
        for &byte in &self.data[self.read..self.read + padding] {
            if byte != 0 {
                return Err(Error::new(ErrorKind::NonZeroPadding));
            }
        }

        Ok(())
    }

    #[cfg(not(feature = "strict-padding"))]
    #[inline]
    fn check_padding(&self, _: usize) -> Result<()> {
        Ok(())
    }
}

impl Clone for ReadBuf<'_> {
    #[inline]
    fn clone(&self) -> Self {
        Self {
            data: self.data,
            read: self.read,
            endianness: self.endianness,
        }
    }
}

impl fmt::Debug for ReadBuf<'_> {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReadBuf")
            .field("pos", &self.read)
            .field("remaining", &self.remaining())
            .field("endianness", &self.endianness)
            .finish()
    }
}

impl<'a, 'b> PartialEq<ReadBuf<'a>> for ReadBuf<'b> {
    #[inline]
    fn eq(&self, other: &ReadBuf<'a>) -> bool {
        self.get() == other.get() && self.endianness == other.endianness
    }
}

impl Eq for ReadBuf<'_> {}
