use std::fmt;
use std::marker::PhantomData;
use std::mem::{align_of, size_of};
use std::slice::from_raw_parts;

use crate::frame::Frame;
use crate::proto::Endianness;
use crate::write::Write;
use crate::ReadBuf;

use super::padding_to;

/// An allocated location in the buffer that can be written to later.
///
/// Used to backfill length prefixes which are only known once the data they
/// describe has been written.
pub struct Alloc<T>(usize, PhantomData<T>);

impl<T> Clone for Alloc<T> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Alloc<T> {}

/// An owned, growable buffer which writes values at their natural alignment.
///
/// This is the write-side dual of [`ReadBuf`]: values are stored in the
/// buffer's endianness and padding is always written as zero bytes.
///
/// # Examples
///
/// ```
/// use dbus_wire::proto::Endianness;
/// use dbus_wire::OwnedBuf;
///
/// let mut buf = OwnedBuf::with_endianness(Endianness::LITTLE);
///
/// buf.store(0x12u8);
/// buf.store(0x5634i16);
/// buf.store(0x78u8);
///
/// assert_eq!(buf.get(), &[0x12, 0x00, 0x34, 0x56, 0x78]);
/// ```
pub struct OwnedBuf {
    data: Vec<u8>,
    endianness: Endianness,
}

impl OwnedBuf {
    /// Construct a new empty buffer in the native endianness.
    pub fn new() -> Self {
        Self::with_endianness(Endianness::NATIVE)
    }

    /// Construct a new empty buffer with the specified endianness.
    pub fn with_endianness(endianness: Endianness) -> Self {
        Self {
            data: Vec::new(),
            endianness,
        }
    }

    /// Get the endianness of the buffer.
    pub fn endianness(&self) -> Endianness {
        self.endianness
    }

    /// Set the endianness of the buffer.
    ///
    /// This does not re-encode already written values, so it should be done
    /// before anything is stored.
    pub fn set_endianness(&mut self, endianness: Endianness) {
        self.endianness = endianness;
    }

    /// The number of bytes written.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Test if the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Get the written bytes.
    pub fn get(&self) -> &[u8] {
        &self.data
    }

    /// Take the written bytes out of the buffer.
    pub fn into_vec(self) -> Vec<u8> {
        self.data
    }

    /// Get a read buffer over the written contents.
    ///
    /// # Examples
    ///
    /// ```
    /// use dbus_wire::OwnedBuf;
    ///
    /// let mut buf = OwnedBuf::new();
    /// buf.store(42u32);
    ///
    /// let mut read = buf.read_buf();
    /// assert_eq!(read.load::<u32>()?, 42);
    /// # Ok::<_, dbus_wire::Error>(())
    /// ```
    pub fn read_buf(&self) -> ReadBuf<'_> {
        ReadBuf::from_slice(&self.data, self.endianness)
    }

    /// Store a fixed-size value at its natural alignment.
    ///
    /// The value is adjusted to the buffer's endianness and any padding
    /// written to reach alignment is zero.
    pub fn store<T>(&mut self, frame: T)
    where
        T: Frame,
    {
        self.align_mut(align_of::<T>());
        self.push_frame(frame);
    }

    /// Allocate a zeroed slot for a fixed-size value, to be filled in later
    /// with [`OwnedBuf::store_at`].
    pub fn alloc<T>(&mut self) -> Alloc<T>
    where
        T: Frame,
    {
        self.align_mut(align_of::<T>());
        let at = self.data.len();
        self.data.resize(at + size_of::<T>(), 0);
        Alloc(at, PhantomData)
    }

    /// Fill in a previously allocated slot.
    pub fn store_at<T>(&mut self, at: Alloc<T>, frame: T)
    where
        T: Frame,
    {
        let Alloc(at, ..) = at;

        let mut frame = frame;
        frame.adjust(self.endianness);

        // SAFETY: Frame types inhabit all bit patterns and carry no padding.
        let bytes = unsafe {
            from_raw_parts((&frame as *const T).cast::<u8>(), size_of::<T>())
        };

        self.data[at..at + size_of::<T>()].copy_from_slice(bytes);
    }

    /// Pad the buffer with zero bytes up to the next multiple of `align`,
    /// which must be a power of two.
    pub fn align_mut(&mut self, align: usize) {
        let padding = padding_to(align, self.data.len());
        self.data.resize(self.data.len() + padding, 0);
    }

    /// Extend the buffer from a slice.
    pub fn extend_from_slice(&mut self, bytes: &[u8]) {
        self.data.extend_from_slice(bytes);
    }

    /// Extend the buffer from a slice, ending with a NUL byte.
    pub fn extend_from_slice_nul(&mut self, bytes: &[u8]) {
        self.data.extend_from_slice(bytes);
        self.data.push(0);
    }

    /// Write a length-prefixed value.
    ///
    /// # Examples
    ///
    /// ```
    /// use dbus_wire::proto::Endianness;
    /// use dbus_wire::OwnedBuf;
    ///
    /// let mut buf = OwnedBuf::with_endianness(Endianness::LITTLE);
    /// buf.write("foo");
    ///
    /// assert_eq!(buf.get(), b"\x03\x00\x00\x00foo\x00");
    /// ```
    pub fn write<T>(&mut self, value: &T)
    where
        T: ?Sized + Write,
    {
        value.write_to(self);
    }

    fn push_frame<T>(&mut self, frame: T)
    where
        T: Frame,
    {
        let mut frame = frame;
        frame.adjust(self.endianness);

        // SAFETY: Frame types inhabit all bit patterns and carry no padding.
        let bytes = unsafe {
            from_raw_parts((&frame as *const T).cast::<u8>(), size_of::<T>())
        };

        self.data.extend_from_slice(bytes);
    }
}

impl Default for OwnedBuf {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for OwnedBuf {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OwnedBuf")
            .field("len", &self.data.len())
            .field("endianness", &self.endianness)
            .finish()
    }
}
