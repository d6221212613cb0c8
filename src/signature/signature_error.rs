use std::error;
use std::fmt;

/// Detailed errors raised when validation of a [`Signature`] fails.
///
/// [`Signature`]: crate::Signature
#[derive(Debug, PartialEq, Eq)]
pub struct SignatureError {
    pub(crate) kind: SignatureErrorKind,
}

impl SignatureError {
    #[inline]
    pub(crate) const fn new(kind: SignatureErrorKind) -> Self {
        Self { kind }
    }
}

impl fmt::Display for SignatureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            SignatureErrorKind::UnknownTypeCode(code) => {
                if code.is_ascii_graphic() {
                    write!(f, "Unknown type code `{}`", code as char)
                } else {
                    write!(f, "Unknown type code {code:#04x}")
                }
            }
            SignatureErrorKind::SignatureTooLong => {
                write!(f, "Signature is longer than 255 bytes")
            }
            SignatureErrorKind::MissingArrayElementType => {
                write!(f, "Array is missing an element type")
            }
            SignatureErrorKind::StructEndedButNotStarted => {
                write!(f, "Struct ended but was not started")
            }
            SignatureErrorKind::StructStartedButNotEnded => {
                write!(f, "Struct started but was not ended")
            }
            SignatureErrorKind::StructHasNoFields => {
                write!(f, "Struct has no fields")
            }
            SignatureErrorKind::DictEndedButNotStarted => {
                write!(f, "Dict entry ended but was not started")
            }
            SignatureErrorKind::DictStartedButNotEnded => {
                write!(f, "Dict entry started but was not ended")
            }
            SignatureErrorKind::DictEntryHasNoFields => {
                write!(f, "Dict entry has no fields")
            }
            SignatureErrorKind::DictEntryHasOnlyOneField => {
                write!(f, "Dict entry has only one field")
            }
            SignatureErrorKind::DictEntryHasTooManyFields => {
                write!(f, "Dict entry has more than two fields")
            }
            SignatureErrorKind::DictKeyMustBeBasicType => {
                write!(f, "Dict entry key must be a basic type")
            }
            SignatureErrorKind::DictEntryNotInsideArray => {
                write!(f, "Dict entry must be the element type of an array")
            }
            SignatureErrorKind::ExceededMaximumArrayRecursion => {
                write!(f, "Exceeded maximum array recursion")
            }
            SignatureErrorKind::ExceededMaximumStructRecursion => {
                write!(f, "Exceeded maximum struct recursion")
            }
            SignatureErrorKind::ExceededMaximumContainerDepth => {
                write!(f, "Exceeded maximum combined container depth")
            }
        }
    }
}

impl error::Error for SignatureError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SignatureErrorKind {
    UnknownTypeCode(u8),
    SignatureTooLong,
    MissingArrayElementType,
    StructEndedButNotStarted,
    StructStartedButNotEnded,
    StructHasNoFields,
    DictEndedButNotStarted,
    DictStartedButNotEnded,
    DictEntryHasNoFields,
    DictEntryHasOnlyOneField,
    DictEntryHasTooManyFields,
    DictKeyMustBeBasicType,
    DictEntryNotInsideArray,
    ExceededMaximumArrayRecursion,
    ExceededMaximumStructRecursion,
    ExceededMaximumContainerDepth,
}
