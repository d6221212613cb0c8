use std::borrow::Borrow;
use std::fmt;
use std::ops::Deref;

use crate::Signature;

use super::SignatureError;

/// A D-Bus signature.
///
/// This is the owned variant which dereferences to [`Signature`].
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct OwnedSignature(Vec<u8>);

impl OwnedSignature {
    /// Construct a new empty signature.
    ///
    /// # Examples
    ///
    /// ```
    /// use dbus_wire::OwnedSignature;
    ///
    /// let sig = OwnedSignature::new();
    /// assert!(sig.is_empty());
    /// ```
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Construct an owned signature from bytes, with validation.
    ///
    /// # Examples
    ///
    /// ```
    /// use dbus_wire::OwnedSignature;
    ///
    /// let sig = OwnedSignature::from_slice(b"a(ss)")?;
    /// assert_eq!(sig.as_str(), "a(ss)");
    /// # Ok::<_, dbus_wire::SignatureError>(())
    /// ```
    pub fn from_slice(signature: &[u8]) -> Result<Self, SignatureError> {
        Ok(Signature::new(signature)?.to_owned())
    }

    /// Construct directly from a vector.
    ///
    /// # Safety
    ///
    /// Caller must ensure that this is a valid signature.
    pub(crate) unsafe fn from_vec(signature: Vec<u8>) -> Self {
        Self(signature)
    }

    /// Construct directly from a slice.
    ///
    /// # Safety
    ///
    /// Caller must ensure that this is a valid signature.
    pub(crate) unsafe fn from_slice_unchecked(signature: &[u8]) -> Self {
        Self(signature.to_vec())
    }
}

impl fmt::Debug for OwnedSignature {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("OwnedSignature")
            .field(&self.as_str())
            .finish()
    }
}

impl Default for OwnedSignature {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl Deref for OwnedSignature {
    type Target = Signature;

    fn deref(&self) -> &Self::Target {
        // SAFETY: Construction of OwnedSignature ensures that the signature
        // is valid.
        unsafe { Signature::new_unchecked(&self.0) }
    }
}

impl Borrow<Signature> for OwnedSignature {
    #[inline]
    fn borrow(&self) -> &Signature {
        self
    }
}

impl AsRef<Signature> for OwnedSignature {
    #[inline]
    fn as_ref(&self) -> &Signature {
        self
    }
}

/// Equality check between [`Signature`] and [`OwnedSignature`].
///
/// # Examples
///
/// ```
/// use dbus_wire::{OwnedSignature, Signature};
///
/// assert_eq!(OwnedSignature::new(), *Signature::EMPTY);
/// assert_eq!(Signature::STRING.to_owned(), *Signature::STRING);
/// ```
impl PartialEq<Signature> for OwnedSignature {
    #[inline]
    fn eq(&self, other: &Signature) -> bool {
        self.0 == other.as_bytes()
    }
}

/// Equality check between a borrowed [`Signature`] and [`OwnedSignature`].
impl PartialEq<&Signature> for OwnedSignature {
    #[inline]
    fn eq(&self, other: &&Signature) -> bool {
        self.0 == other.as_bytes()
    }
}
