use std::fmt;
use std::str::from_utf8_unchecked;

use crate::buf::{OwnedBuf, ReadBuf, MAX_ARRAY_LENGTH};
use crate::error::{ErrorKind, Result};
use crate::read::Read;
use crate::ty::code_alignment;
use crate::write::Write;
use crate::OwnedSignature;
use crate::ParsedSignature;

use super::{validate, SignatureError};

/// A D-Bus signature.
///
/// This is the borrowed, text form of a signature, validated on
/// construction. Use [`Signature::parse`] to obtain the vectorized
/// [`ParsedSignature`] used to drive typed reads.
///
/// # Examples
///
/// ```
/// use dbus_wire::Signature;
///
/// const SIG: &Signature = Signature::new_const(b"aaaai");
///
/// assert!(Signature::new(b"aai").is_ok());
/// assert!(Signature::new(b"aa").is_err());
/// ```
#[derive(Hash, PartialEq, Eq)]
#[repr(transparent)]
pub struct Signature(pub(crate) [u8]);

impl Signature {
    /// The empty signature.
    pub const EMPTY: &'static Signature = Signature::new_const(b"");

    /// A single byte.
    pub const BYTE: &'static Signature = Signature::new_const(b"y");

    /// A boolean.
    pub const BOOLEAN: &'static Signature = Signature::new_const(b"b");

    /// Signed (two's complement) 16-bit integer.
    pub const INT16: &'static Signature = Signature::new_const(b"n");

    /// Unsigned 16-bit integer.
    pub const UINT16: &'static Signature = Signature::new_const(b"q");

    /// Signed (two's complement) 32-bit integer.
    pub const INT32: &'static Signature = Signature::new_const(b"i");

    /// Unsigned 32-bit integer.
    pub const UINT32: &'static Signature = Signature::new_const(b"u");

    /// Signed (two's complement) 64-bit integer.
    pub const INT64: &'static Signature = Signature::new_const(b"x");

    /// Unsigned 64-bit integer.
    pub const UINT64: &'static Signature = Signature::new_const(b"t");

    /// IEEE 754 double-precision floating point.
    pub const DOUBLE: &'static Signature = Signature::new_const(b"d");

    /// Unsigned 32-bit integer representing an index into an out-of-band
    /// array of file descriptors.
    pub const UNIX_FD: &'static Signature = Signature::new_const(b"h");

    /// A string.
    pub const STRING: &'static Signature = Signature::new_const(b"s");

    /// An object path.
    pub const OBJECT_PATH: &'static Signature = Signature::new_const(b"o");

    /// A signature.
    pub const SIGNATURE: &'static Signature = Signature::new_const(b"g");

    /// A variant.
    pub const VARIANT: &'static Signature = Signature::new_const(b"v");

    /// Construct a new empty signature.
    pub const fn empty() -> &'static Self {
        // SAFETY: The empty signature is trivially valid.
        unsafe { Self::new_unchecked(&[]) }
    }

    /// Test if the signature is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use dbus_wire::Signature;
    ///
    /// assert!(Signature::EMPTY.is_empty());
    /// assert!(!Signature::STRING.is_empty());
    /// ```
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The length of the signature in bytes.
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Construct a new signature with validation inside of a constant
    /// context.
    ///
    /// This will panic in case the signature is invalid.
    ///
    /// ```compile_fail
    /// use dbus_wire::Signature;
    ///
    /// const BAD: &Signature = Signature::new_const(b"(a)");
    /// ```
    ///
    /// # Examples
    ///
    /// ```
    /// use dbus_wire::Signature;
    ///
    /// const SIG: &Signature = Signature::new_const(b"i(ai)");
    /// ```
    #[inline]
    #[track_caller]
    pub const fn new_const(signature: &[u8]) -> &Signature {
        if validate(signature).is_err() {
            panic!("Invalid D-Bus signature")
        };

        // SAFETY: The signature was just validated.
        unsafe { Self::new_unchecked(signature) }
    }

    /// Try to construct a new signature with validation.
    ///
    /// The empty signature is valid and stands for zero complete types.
    ///
    /// # Examples
    ///
    /// ```
    /// use dbus_wire::Signature;
    ///
    /// assert!(Signature::new(b"").is_ok());
    /// assert!(Signature::new(b"a{ys}").is_ok());
    /// assert!(Signature::new(b"a{vs}").is_err());
    /// ```
    #[inline]
    pub const fn new(signature: &[u8]) -> Result<&Signature, SignatureError> {
        if let Err(error) = validate(signature) {
            return Err(error);
        };

        // SAFETY: The signature was just validated.
        unsafe { Ok(Self::new_unchecked(signature)) }
    }

    /// Construct a new signature without validation. The caller is
    /// responsible for ensuring that the signature is valid.
    ///
    /// # Safety
    ///
    /// The caller must ensure that the signature is a valid signature.
    #[inline]
    pub(crate) const unsafe fn new_unchecked(signature: &[u8]) -> &Self {
        &*(signature as *const _ as *const Signature)
    }

    /// Get the signature as a string.
    pub fn as_str(&self) -> &str {
        // SAFETY: Validation ensures that the signature is ASCII.
        unsafe { from_utf8_unchecked(&self.0) }
    }

    /// Get the signature as a byte slice.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Parse the signature into its vectorized form.
    ///
    /// # Examples
    ///
    /// ```
    /// use dbus_wire::{DBusType, Signature};
    ///
    /// let sig = Signature::new(b"a{ys}")?;
    /// let parsed = sig.parse()?;
    ///
    /// assert_eq!(parsed.types(), [
    ///     DBusType::Array,
    ///     DBusType::DictEntry,
    ///     DBusType::DictEntryLength(2),
    ///     DBusType::Byte,
    ///     DBusType::String,
    /// ]);
    /// # Ok::<_, dbus_wire::SignatureError>(())
    /// ```
    pub fn parse(&self) -> Result<ParsedSignature, SignatureError> {
        ParsedSignature::parse(&self.0)
    }

    /// Advance `read` past one encoded value for every complete type in this
    /// signature.
    ///
    /// Used to discard values whose signature is only known at runtime, such
    /// as unrecognized header fields.
    pub(crate) fn skip(&self, read: &mut ReadBuf<'_>) -> Result<()> {
        let mut i = 0;

        while i < self.0.len() {
            i = skip_value(&self.0, i, read)?;
        }

        Ok(())
    }
}

/// Skip the encoded value of the complete type starting at `sig[i]`,
/// returning the index one past that type.
fn skip_value(sig: &[u8], i: usize, read: &mut ReadBuf<'_>) -> Result<usize> {
    match sig[i] {
        b'y' => {
            read.load::<u8>()?;
            Ok(i + 1)
        }
        b'n' | b'q' => {
            read.load::<u16>()?;
            Ok(i + 1)
        }
        b'b' | b'i' | b'u' | b'h' => {
            read.load::<u32>()?;
            Ok(i + 1)
        }
        b'x' | b't' | b'd' => {
            read.load::<u64>()?;
            Ok(i + 1)
        }
        b's' | b'o' => {
            let len = read.load::<u32>()?;
            read.advance((len as usize).saturating_add(1))?;
            Ok(i + 1)
        }
        b'g' => {
            let len = read.load::<u8>()?;
            read.advance((len as usize).saturating_add(1))?;
            Ok(i + 1)
        }
        b'v' => {
            let sig = read.read::<Signature>()?;
            sig.skip(read)?;
            Ok(i + 1)
        }
        b'a' => {
            let bytes = read.load::<u32>()?;

            if bytes > MAX_ARRAY_LENGTH {
                return Err(ErrorKind::ArrayTooLong(bytes).into());
            }

            read.align_to(code_alignment(sig[i + 1]))?;
            read.advance(bytes as usize)?;
            Ok(skip_type(sig, i + 1))
        }
        b'(' => {
            read.align_to(8)?;

            let mut j = i + 1;

            while sig[j] != b')' {
                j = skip_value(sig, j, read)?;
            }

            Ok(j + 1)
        }
        b'{' => {
            read.align_to(8)?;

            let mut j = i + 1;

            while sig[j] != b'}' {
                j = skip_value(sig, j, read)?;
            }

            Ok(j + 1)
        }
        code => Err(SignatureError::new(
            super::SignatureErrorKind::UnknownTypeCode(code),
        )
        .into()),
    }
}

/// The index one past the complete type starting at `sig[i]`, consuming no
/// encoded bytes.
fn skip_type(sig: &[u8], i: usize) -> usize {
    match sig[i] {
        b'a' => skip_type(sig, i + 1),
        b'(' => {
            let mut j = i + 1;

            while sig[j] != b')' {
                j = skip_type(sig, j);
            }

            j + 1
        }
        b'{' => {
            let mut j = i + 1;

            while sig[j] != b'}' {
                j = skip_type(sig, j);
            }

            j + 1
        }
        _ => i + 1,
    }
}

impl fmt::Debug for Signature {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Signature").field(&self.as_str()).finish()
    }
}

impl fmt::Display for Signature {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Write for Signature {
    #[inline]
    fn write_to(&self, buf: &mut OwnedBuf) {
        buf.store(self.0.len() as u8);
        buf.extend_from_slice_nul(&self.0);
    }
}

impl Read for Signature {
    #[inline]
    fn read_from<'de>(buf: &mut ReadBuf<'de>) -> Result<&'de Self> {
        let len = buf.load::<u8>()? as usize;
        let bytes = buf.load_slice_nul(len)?;
        Ok(Signature::new(bytes)?)
    }
}

impl AsRef<Signature> for Signature {
    #[inline]
    fn as_ref(&self) -> &Signature {
        self
    }
}

impl ToOwned for Signature {
    type Owned = OwnedSignature;

    #[inline]
    fn to_owned(&self) -> Self::Owned {
        // SAFETY: A borrowed signature is always valid.
        unsafe { OwnedSignature::from_slice_unchecked(&self.0) }
    }
}

/// Equality check between [`OwnedSignature`] and [`Signature`].
///
/// # Examples
///
/// ```
/// use dbus_wire::{OwnedSignature, Signature};
///
/// assert_eq!(*Signature::EMPTY, OwnedSignature::new());
/// assert_eq!(*Signature::STRING, Signature::STRING.to_owned());
/// ```
impl PartialEq<OwnedSignature> for Signature {
    #[inline]
    fn eq(&self, other: &OwnedSignature) -> bool {
        self.0 == *other.as_bytes()
    }
}

/// Equality check between [`OwnedSignature`] and a borrowed [`Signature`].
impl PartialEq<OwnedSignature> for &Signature {
    #[inline]
    fn eq(&self, other: &OwnedSignature) -> bool {
        self.0 == *other.as_bytes()
    }
}

/// Equality check between [`[u8]`][slice] and a [`Signature`].
///
/// # Examples
///
/// ```
/// use dbus_wire::Signature;
///
/// assert_eq!(*Signature::EMPTY, b""[..]);
/// assert_eq!(*Signature::STRING, b"s"[..]);
/// ```
impl PartialEq<[u8]> for Signature {
    #[inline]
    fn eq(&self, other: &[u8]) -> bool {
        self.0 == *other
    }
}

impl PartialEq<[u8]> for &Signature {
    #[inline]
    fn eq(&self, other: &[u8]) -> bool {
        self.0 == *other
    }
}

impl<const N: usize> PartialEq<[u8; N]> for Signature {
    #[inline]
    fn eq(&self, other: &[u8; N]) -> bool {
        self.0 == other[..]
    }
}

impl<const N: usize> PartialEq<[u8; N]> for &Signature {
    #[inline]
    fn eq(&self, other: &[u8; N]) -> bool {
        self.0 == other[..]
    }
}
