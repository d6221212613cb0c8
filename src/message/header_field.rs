use crate::proto::FieldCode;
use crate::{ObjectPath, Signature};

/// A single decoded field from the `a(yv)` header field array.
///
/// Unknown field codes are parsed and discarded during decoding and never
/// appear here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum HeaderField<'a> {
    /// The object to send a call to, or the object a signal is emitted
    /// from.
    Path(&'a ObjectPath),
    /// The interface to invoke a method call on, or that a signal is
    /// emitted from.
    Interface(&'a str),
    /// The member, either the method name or signal name.
    Member(&'a str),
    /// The name of the error that occurred, for errors.
    ErrorName(&'a str),
    /// The serial number of the message this message is a reply to.
    ReplySerial(u32),
    /// The name of the connection this message is intended for.
    Destination(&'a str),
    /// Unique name of the sending connection.
    Sender(&'a str),
    /// The signature of the message body.
    Signature(&'a Signature),
    /// The number of Unix file descriptors that accompany the message.
    UnixFds(u32),
}

impl HeaderField<'_> {
    /// The field code identifying this field on the wire.
    pub fn code(&self) -> FieldCode {
        match self {
            HeaderField::Path(..) => FieldCode::PATH,
            HeaderField::Interface(..) => FieldCode::INTERFACE,
            HeaderField::Member(..) => FieldCode::MEMBER,
            HeaderField::ErrorName(..) => FieldCode::ERROR_NAME,
            HeaderField::ReplySerial(..) => FieldCode::REPLY_SERIAL,
            HeaderField::Destination(..) => FieldCode::DESTINATION,
            HeaderField::Sender(..) => FieldCode::SENDER,
            HeaderField::Signature(..) => FieldCode::SIGNATURE,
            HeaderField::UnixFds(..) => FieldCode::UNIX_FDS,
        }
    }
}
