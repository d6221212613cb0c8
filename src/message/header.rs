use crate::proto::{Endianness, Flags, MessageType, PROTOCOL_VERSION};
use crate::{HeaderField, ObjectPath, ReadBuf, Signature};

/// A decoded message header together with the view over the message body.
///
/// Produced by [`MessageHeader::from_slice`], which borrows the message
/// buffer. The body is exposed as a [`ReadBuf`] positioned at the 8-aligned
/// boundary after the header field array, and should be interpreted under
/// [`MessageHeader::signature`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageHeader<'a> {
    /// The endianness every multi-byte value in the message was encoded
    /// with.
    pub(crate) endianness: Endianness,
    /// The type of the message.
    pub(crate) message_type: MessageType,
    /// The message flags.
    pub(crate) flags: Flags,
    /// The major protocol version, always 1.
    pub(crate) version: u8,
    /// Serial of the message.
    pub(crate) serial: u32,
    /// The decoded header fields, in wire order.
    pub(crate) fields: Vec<HeaderField<'a>>,
    /// The message body.
    pub(crate) body: ReadBuf<'a>,
}

impl<'a> MessageHeader<'a> {
    /// Construct a header for an outbound message.
    ///
    /// # Examples
    ///
    /// ```
    /// use dbus_wire::proto::{Endianness, MessageType};
    /// use dbus_wire::{HeaderField, MessageHeader, ObjectPath};
    ///
    /// const PATH: &ObjectPath = ObjectPath::new_const(b"/org/freedesktop/DBus");
    ///
    /// let header = MessageHeader::new(Endianness::LITTLE, MessageType::METHOD_CALL, 1)
    ///     .with_field(HeaderField::Path(PATH))
    ///     .with_field(HeaderField::Member("Hello"));
    ///
    /// assert_eq!(header.path(), Some(PATH));
    /// assert_eq!(header.member(), Some("Hello"));
    /// ```
    pub fn new(endianness: Endianness, message_type: MessageType, serial: u32) -> Self {
        Self {
            endianness,
            message_type,
            flags: Flags::EMPTY,
            version: PROTOCOL_VERSION,
            serial,
            fields: Vec::new(),
            body: ReadBuf::empty(),
        }
    }

    /// The endianness of the message.
    pub fn endianness(&self) -> Endianness {
        self.endianness
    }

    /// The type of the message.
    pub fn message_type(&self) -> MessageType {
        self.message_type
    }

    /// The flags of the message.
    pub fn flags(&self) -> Flags {
        self.flags
    }

    /// Modify the flags of the message.
    pub fn with_flags(self, flags: Flags) -> Self {
        Self { flags, ..self }
    }

    /// The major protocol version of the message.
    pub fn version(&self) -> u8 {
        self.version
    }

    /// The serial of the message.
    ///
    /// Zero is accepted by the decoder but never sent by conforming peers.
    pub fn serial(&self) -> u32 {
        self.serial
    }

    /// The length of the message body in bytes.
    pub fn body_length(&self) -> u32 {
        self.body.remaining() as u32
    }

    /// The decoded header fields, in wire order.
    pub fn fields(&self) -> &[HeaderField<'a>] {
        &self.fields
    }

    /// Append a header field.
    pub fn with_field(mut self, field: HeaderField<'a>) -> Self {
        self.fields.push(field);
        self
    }

    /// Use the given view as the message body.
    ///
    /// The body signature should be provided through a
    /// [`HeaderField::Signature`] field.
    pub fn with_body(self, body: ReadBuf<'a>) -> Self {
        Self { body, ..self }
    }

    /// A view over the message body.
    pub fn body(&self) -> ReadBuf<'a> {
        self.body.clone()
    }

    /// The path field, if present.
    pub fn path(&self) -> Option<&'a ObjectPath> {
        self.fields.iter().find_map(|f| match f {
            HeaderField::Path(path) => Some(*path),
            _ => None,
        })
    }

    /// The interface field, if present.
    pub fn interface(&self) -> Option<&'a str> {
        self.fields.iter().find_map(|f| match f {
            HeaderField::Interface(interface) => Some(*interface),
            _ => None,
        })
    }

    /// The member field, if present.
    pub fn member(&self) -> Option<&'a str> {
        self.fields.iter().find_map(|f| match f {
            HeaderField::Member(member) => Some(*member),
            _ => None,
        })
    }

    /// The error name field, if present.
    pub fn error_name(&self) -> Option<&'a str> {
        self.fields.iter().find_map(|f| match f {
            HeaderField::ErrorName(error_name) => Some(*error_name),
            _ => None,
        })
    }

    /// The reply serial field, if present.
    pub fn reply_serial(&self) -> Option<u32> {
        self.fields.iter().find_map(|f| match f {
            HeaderField::ReplySerial(serial) => Some(*serial),
            _ => None,
        })
    }

    /// The destination field, if present.
    pub fn destination(&self) -> Option<&'a str> {
        self.fields.iter().find_map(|f| match f {
            HeaderField::Destination(destination) => Some(*destination),
            _ => None,
        })
    }

    /// The sender field, if present.
    pub fn sender(&self) -> Option<&'a str> {
        self.fields.iter().find_map(|f| match f {
            HeaderField::Sender(sender) => Some(*sender),
            _ => None,
        })
    }

    /// The signature of the message body.
    ///
    /// An absent signature field stands for an empty body.
    pub fn signature(&self) -> &'a Signature {
        self.fields
            .iter()
            .find_map(|f| match f {
                HeaderField::Signature(signature) => Some(*signature),
                _ => None,
            })
            .unwrap_or(Signature::EMPTY)
    }

    /// The number of Unix file descriptors accompanying the message, if the
    /// field is present.
    pub fn unix_fds(&self) -> Option<u32> {
        self.fields.iter().find_map(|f| match f {
            HeaderField::UnixFds(fds) => Some(*fds),
            _ => None,
        })
    }
}
