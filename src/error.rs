use std::error;
use std::fmt;
use std::str::Utf8Error;

use crate::object_path::ObjectPathError;
use crate::proto::FieldCode;
use crate::signature::SignatureError;

/// Result alias using an [`Error`] as the error type by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// An error raised by this crate.
#[derive(Debug)]
pub struct Error {
    pub(crate) kind: ErrorKind,
}

impl Error {
    #[inline]
    pub(crate) fn new(kind: ErrorKind) -> Error {
        Self { kind }
    }
}

impl From<SignatureError> for Error {
    #[inline]
    fn from(error: SignatureError) -> Self {
        Self::new(ErrorKind::Signature(error))
    }
}

impl From<ObjectPathError> for Error {
    #[inline]
    fn from(error: ObjectPathError) -> Self {
        Self::new(ErrorKind::ObjectPath(error))
    }
}

impl From<Utf8Error> for Error {
    #[inline]
    fn from(error: Utf8Error) -> Self {
        Self::new(ErrorKind::Utf8Error(error))
    }
}

impl From<ErrorKind> for Error {
    #[inline]
    fn from(kind: ErrorKind) -> Self {
        Self::new(kind)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.kind {
            ErrorKind::Signature(error) => error.fmt(f),
            ErrorKind::ObjectPath(error) => error.fmt(f),
            ErrorKind::Utf8Error(error) => error.fmt(f),
            ErrorKind::EndOfStream => write!(f, "End of stream"),
            ErrorKind::InvalidAlignment => {
                write!(f, "Aligned read out of bounds")
            }
            ErrorKind::InvalidLength(length) => {
                write!(f, "Length prefix {length} exceeds remaining buffer")
            }
            ErrorKind::NotNullTerminated => {
                write!(f, "String is not null terminated")
            }
            #[cfg(feature = "strict-padding")]
            ErrorKind::NonZeroPadding => write!(f, "Padding byte is not zero"),
            ErrorKind::InvalidBoolean(value) => {
                write!(f, "Boolean value {value} is neither 0 nor 1")
            }
            ErrorKind::ArrayTooLong(length) => {
                write!(f, "Array of length {length} is too long (max is 67108864)")
            }
            ErrorKind::BodyTooLong(length) => {
                write!(f, "Body of length {length} is too long (max is 134217728)")
            }
            ErrorKind::MessageTooLong(length) => {
                write!(
                    f,
                    "Message of length {length} is too long (max is 134217728)"
                )
            }
            ErrorKind::InvalidEndianness(byte) => {
                write!(f, "Invalid endianness marker {byte:#04x}")
            }
            ErrorKind::InvalidMessageType(byte) => {
                write!(f, "Invalid message type {byte}")
            }
            ErrorKind::InvalidFlags(byte) => {
                write!(f, "Unknown bits in message flags {byte:#04x}")
            }
            ErrorKind::InvalidVersion(version) => {
                write!(f, "Unsupported protocol version {version}")
            }
            ErrorKind::InvalidHeaderField(code) => {
                write!(f, "Header field {code:?} has an unexpected signature")
            }
            ErrorKind::DuplicateHeaderField(code) => {
                write!(f, "Duplicate header field {code:?}")
            }
            ErrorKind::MissingPath => write!(f, "Missing required PATH header"),
            ErrorKind::MissingInterface => {
                write!(f, "Missing required INTERFACE header")
            }
            ErrorKind::MissingMember => write!(f, "Missing required MEMBER header"),
            ErrorKind::MissingErrorName => {
                write!(f, "Missing required ERROR_NAME header")
            }
            ErrorKind::MissingReplySerial => {
                write!(f, "Missing required REPLY_SERIAL header")
            }
            ErrorKind::SignatureMismatch => {
                write!(f, "Value does not match its signature")
            }
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match &self.kind {
            ErrorKind::Signature(error) => Some(error),
            ErrorKind::ObjectPath(error) => Some(error),
            ErrorKind::Utf8Error(error) => Some(error),
            _ => None,
        }
    }
}

#[derive(Debug)]
pub(crate) enum ErrorKind {
    Signature(SignatureError),
    ObjectPath(ObjectPathError),
    Utf8Error(Utf8Error),
    EndOfStream,
    InvalidAlignment,
    InvalidLength(u32),
    NotNullTerminated,
    #[cfg(feature = "strict-padding")]
    NonZeroPadding,
    InvalidBoolean(u32),
    ArrayTooLong(u32),
    BodyTooLong(u32),
    MessageTooLong(usize),
    InvalidEndianness(u8),
    InvalidMessageType(u8),
    InvalidFlags(u8),
    InvalidVersion(u8),
    InvalidHeaderField(FieldCode),
    DuplicateHeaderField(FieldCode),
    MissingPath,
    MissingInterface,
    MissingMember,
    MissingErrorName,
    MissingReplySerial,
    SignatureMismatch,
}
