use std::fmt;
use std::str::from_utf8_unchecked;

use crate::error::Result;
use crate::read::Read;
use crate::write::Write;
use crate::{OwnedBuf, ReadBuf};

use super::{validate, ObjectPathError};

/// A validated D-Bus object path.
///
/// # Examples
///
/// ```
/// use dbus_wire::ObjectPath;
///
/// const PATH: &ObjectPath = ObjectPath::new_const(b"/org/freedesktop/DBus");
///
/// assert!(ObjectPath::new(b"/com/example/MusicPlayer1").is_ok());
/// assert!(ObjectPath::new(b"com/example").is_err());
/// ```
#[derive(Hash, PartialEq, Eq)]
#[repr(transparent)]
pub struct ObjectPath([u8]);

impl ObjectPath {
    /// The special `/` path.
    pub const ROOT: &'static ObjectPath = ObjectPath::new_const(b"/");

    /// Test if a byte sequence is a valid object path.
    ///
    /// # Examples
    ///
    /// ```
    /// use dbus_wire::ObjectPath;
    ///
    /// assert!(ObjectPath::is_valid(b"/"));
    /// assert!(ObjectPath::is_valid(b"/a/b"));
    /// assert!(!ObjectPath::is_valid(b""));
    /// assert!(!ObjectPath::is_valid(b"/a//b"));
    /// assert!(!ObjectPath::is_valid(b"/a/b/"));
    /// ```
    pub const fn is_valid(bytes: &[u8]) -> bool {
        validate(bytes)
    }

    /// Construct a new object path with validation inside of a constant
    /// context.
    ///
    /// This will panic in case the path is invalid.
    ///
    /// ```compile_fail
    /// use dbus_wire::ObjectPath;
    ///
    /// const BAD: &ObjectPath = ObjectPath::new_const(b"//");
    /// ```
    #[inline]
    #[track_caller]
    pub const fn new_const(path: &[u8]) -> &ObjectPath {
        if !validate(path) {
            panic!("Invalid D-Bus object path")
        };

        // SAFETY: The path was just validated.
        unsafe { Self::new_unchecked(path) }
    }

    /// Try to construct a new object path with validation.
    #[inline]
    pub const fn new(path: &[u8]) -> Result<&ObjectPath, ObjectPathError> {
        if !validate(path) {
            return Err(ObjectPathError);
        }

        // SAFETY: The path was just validated.
        unsafe { Ok(Self::new_unchecked(path)) }
    }

    /// Construct a new object path without validation. The caller is
    /// responsible for ensuring that the path is valid.
    ///
    /// # Safety
    ///
    /// The caller must ensure that the path is a valid object path.
    pub(crate) const unsafe fn new_unchecked(path: &[u8]) -> &Self {
        &*(path as *const _ as *const ObjectPath)
    }

    /// Get the object path as a string.
    pub fn as_str(&self) -> &str {
        // SAFETY: Validation ensures that the path is ASCII.
        unsafe { from_utf8_unchecked(&self.0) }
    }

    /// Get the object path as a byte slice.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for ObjectPath {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ObjectPath").field(&self.as_str()).finish()
    }
}

impl fmt::Display for ObjectPath {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Read for ObjectPath {
    #[inline]
    fn read_from<'de>(buf: &mut ReadBuf<'de>) -> Result<&'de Self> {
        let len = buf.load::<u32>()? as usize;
        let bytes = buf.load_slice_nul(len)?;
        Ok(ObjectPath::new(bytes)?)
    }
}

impl Write for ObjectPath {
    #[inline]
    fn write_to(&self, buf: &mut OwnedBuf) {
        buf.store(self.0.len() as u32);
        buf.extend_from_slice_nul(&self.0);
    }
}

impl AsRef<ObjectPath> for ObjectPath {
    #[inline]
    fn as_ref(&self) -> &ObjectPath {
        self
    }
}

impl PartialEq<str> for ObjectPath {
    #[inline]
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<ObjectPath> for str {
    #[inline]
    fn eq(&self, other: &ObjectPath) -> bool {
        self == other.as_str()
    }
}
