use std::str::from_utf8;

use crate::error::Result;
use crate::ReadBuf;

mod sealed {
    use crate::{ObjectPath, Signature};

    pub trait Sealed {}
    impl Sealed for [u8] {}
    impl Sealed for str {}
    impl Sealed for Signature {}
    impl Sealed for ObjectPath {}
}

/// A length-prefixed element that can be deserialized from a buffer.
pub trait Read: self::sealed::Sealed {
    /// Read the type from the given buffer.
    fn read_from<'de>(buf: &mut ReadBuf<'de>) -> Result<&'de Self>;
}

impl Read for [u8] {
    #[inline]
    fn read_from<'de>(buf: &mut ReadBuf<'de>) -> Result<&'de Self> {
        let len = buf.load::<u32>()? as usize;
        buf.load_slice(len)
    }
}

impl Read for str {
    #[inline]
    fn read_from<'de>(buf: &mut ReadBuf<'de>) -> Result<&'de Self> {
        let len = buf.load::<u32>()? as usize;
        let bytes = buf.load_slice_nul(len)?;
        Ok(from_utf8(bytes)?)
    }
}
