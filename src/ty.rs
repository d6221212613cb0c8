//! The closed set of D-Bus type tags and their wire-level properties.

/// A single tag in the vectorized form of a [`Signature`].
///
/// Parsing a signature produces an ordered sequence of these. Container
/// types are flattened: a struct is emitted as [`DBusType::Struct`],
/// followed by [`DBusType::StructLength`] carrying the number of immediate
/// children, followed by the children themselves. Dict entries follow the
/// same scheme with a fixed child count of two, and an array is followed by
/// exactly one complete element type.
///
/// [`Signature`]: crate::Signature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum DBusType {
    /// 8-bit unsigned integer, type code `y`.
    Byte,
    /// Boolean value, type code `b`. Marshalled as a `u32` where only `0`
    /// and `1` are valid.
    Boolean,
    /// 16-bit signed integer, type code `n`.
    Int16,
    /// 16-bit unsigned integer, type code `q`.
    Uint16,
    /// 32-bit signed integer, type code `i`.
    Int32,
    /// 32-bit unsigned integer, type code `u`.
    Uint32,
    /// 64-bit signed integer, type code `x`.
    Int64,
    /// 64-bit unsigned integer, type code `t`.
    Uint64,
    /// IEEE 754 double-precision floating point, type code `d`.
    Double,
    /// Index into an out-of-band array of file descriptors, type code `h`.
    UnixFd,
    /// UTF-8 string, type code `s`.
    String,
    /// Name of an object instance, type code `o`.
    ObjectPath,
    /// A type signature, type code `g`.
    Signature,
    /// Variant type, type code `v`. The type of the value is part of the
    /// value itself.
    Variant,
    /// Start of a struct, type code `(`...`)` in signature text.
    Struct,
    /// Number of immediate children of the preceding [`DBusType::Struct`].
    StructLength(u8),
    /// Array, type code `a`. Followed by one complete element type.
    Array,
    /// Start of a dict entry, type code `{`...`}` in signature text. Only
    /// valid as the immediate element of an array.
    DictEntry,
    /// Number of children of the preceding [`DBusType::DictEntry`], always
    /// two.
    DictEntryLength(u8),
}

impl DBusType {
    /// The natural alignment of a value of this type, in bytes.
    ///
    /// The length markers never correspond to encoded bytes and report an
    /// alignment of `1`.
    ///
    /// # Examples
    ///
    /// ```
    /// use dbus_wire::DBusType;
    ///
    /// assert_eq!(DBusType::Byte.alignment(), 1);
    /// assert_eq!(DBusType::Uint32.alignment(), 4);
    /// assert_eq!(DBusType::Struct.alignment(), 8);
    /// assert_eq!(DBusType::Variant.alignment(), 1);
    /// ```
    pub fn alignment(&self) -> usize {
        match self {
            DBusType::Byte | DBusType::Signature | DBusType::Variant => 1,
            DBusType::Int16 | DBusType::Uint16 => 2,
            DBusType::Boolean
            | DBusType::Int32
            | DBusType::Uint32
            | DBusType::UnixFd
            | DBusType::String
            | DBusType::ObjectPath
            | DBusType::Array => 4,
            DBusType::Int64 | DBusType::Uint64 | DBusType::Double => 8,
            DBusType::Struct | DBusType::DictEntry => 8,
            DBusType::StructLength(..) | DBusType::DictEntryLength(..) => 1,
        }
    }

    /// The encoded size of this type if it is fixed, in bytes.
    ///
    /// Strings, signatures and containers are length-prefixed or variable
    /// and return `None`.
    pub fn fixed_size(&self) -> Option<usize> {
        match self {
            DBusType::Byte => Some(1),
            DBusType::Int16 | DBusType::Uint16 => Some(2),
            DBusType::Boolean | DBusType::Int32 | DBusType::Uint32 | DBusType::UnixFd => Some(4),
            DBusType::Int64 | DBusType::Uint64 | DBusType::Double => Some(8),
            _ => None,
        }
    }

    /// Test if this is a basic type.
    ///
    /// Basic types are the only ones permitted as dict entry keys.
    pub fn is_basic(&self) -> bool {
        matches!(
            self,
            DBusType::Byte
                | DBusType::Boolean
                | DBusType::Int16
                | DBusType::Uint16
                | DBusType::Int32
                | DBusType::Uint32
                | DBusType::Int64
                | DBusType::Uint64
                | DBusType::Double
                | DBusType::UnixFd
                | DBusType::String
                | DBusType::ObjectPath
                | DBusType::Signature
        )
    }

    /// Map a signature type code to a scalar or string-like tag.
    ///
    /// Container codes (`a`, `(`, `{`, and their closers) are not mapped
    /// here since they do not stand for a tag on their own.
    pub(crate) fn from_code(code: u8) -> Option<DBusType> {
        let ty = match code {
            b'y' => DBusType::Byte,
            b'b' => DBusType::Boolean,
            b'n' => DBusType::Int16,
            b'q' => DBusType::Uint16,
            b'i' => DBusType::Int32,
            b'u' => DBusType::Uint32,
            b'x' => DBusType::Int64,
            b't' => DBusType::Uint64,
            b'd' => DBusType::Double,
            b'h' => DBusType::UnixFd,
            b's' => DBusType::String,
            b'o' => DBusType::ObjectPath,
            b'g' => DBusType::Signature,
            b'v' => DBusType::Variant,
            _ => return None,
        };

        Some(ty)
    }

    /// The signature type code for a tag which has one.
    pub(crate) fn code(&self) -> Option<u8> {
        let code = match self {
            DBusType::Byte => b'y',
            DBusType::Boolean => b'b',
            DBusType::Int16 => b'n',
            DBusType::Uint16 => b'q',
            DBusType::Int32 => b'i',
            DBusType::Uint32 => b'u',
            DBusType::Int64 => b'x',
            DBusType::Uint64 => b't',
            DBusType::Double => b'd',
            DBusType::UnixFd => b'h',
            DBusType::String => b's',
            DBusType::ObjectPath => b'o',
            DBusType::Signature => b'g',
            DBusType::Variant => b'v',
            _ => return None,
        };

        Some(code)
    }
}

/// The natural alignment of the value a signature type code introduces.
///
/// Used when skipping over encoded values by their signature text, where
/// the opening byte of a container stands in for the whole container.
pub(crate) fn code_alignment(code: u8) -> usize {
    match code {
        b'y' | b'g' | b'v' => 1,
        b'n' | b'q' => 2,
        b'b' | b'i' | b'u' | b'h' | b's' | b'o' | b'a' => 4,
        b'x' | b't' | b'd' | b'(' | b'{' => 8,
        _ => 1,
    }
}
