use log::{debug, warn};

use crate::buf::{padding_to, MAX_BODY_LENGTH, MAX_MESSAGE_LENGTH};
use crate::error::{Error, ErrorKind, Result};
use crate::proto::{Endianness, FieldCode, Flags, MessageType, PROTOCOL_VERSION};
use crate::{HeaderField, MessageHeader, ObjectPath, ReadBuf, Signature};

impl<'a> MessageHeader<'a> {
    /// Decode the header of a complete message.
    ///
    /// `buf` must hold exactly one message, starting at its endianness byte.
    /// The required length of the buffer can be computed up front from the
    /// fixed 16-byte prefix with [`MessageHeader::wire_length`].
    ///
    /// On success the returned header borrows from `buf` and its body view
    /// covers the trailing `body_length` bytes of the message. No partial
    /// header is ever returned: any malformed or truncated input fails with
    /// a typed [`Error`].
    ///
    /// # Examples
    ///
    /// ```
    /// use dbus_wire::proto::MessageType;
    /// use dbus_wire::MessageHeader;
    ///
    /// let buf = [
    ///     b'l', 0x01, 0x00, 0x01,
    ///     0x00, 0x00, 0x00, 0x00,
    ///     0x2a, 0x00, 0x00, 0x00,
    ///     0x00, 0x00, 0x00, 0x00,
    /// ];
    ///
    /// let header = MessageHeader::from_slice(&buf)?;
    /// assert_eq!(header.message_type(), MessageType::METHOD_CALL);
    /// assert_eq!(header.serial(), 42);
    /// # Ok::<_, dbus_wire::Error>(())
    /// ```
    ///
    /// Decoding checks the wire format only. Whether the fields required by
    /// the message type are present is checked separately with
    /// [`MessageHeader::validate_required`], so that well-formed but
    /// incomplete messages can still be inspected.
    pub fn from_slice(buf: &'a [u8]) -> Result<MessageHeader<'a>> {
        if buf.len() > MAX_MESSAGE_LENGTH {
            return Err(Error::new(ErrorKind::MessageTooLong(buf.len())));
        }

        let mut read = ReadBuf::from_slice(buf, Endianness::LITTLE);

        let endianness = match read.load::<u8>()? {
            b'l' => Endianness::LITTLE,
            b'B' => Endianness::BIG,
            byte => return Err(Error::new(ErrorKind::InvalidEndianness(byte))),
        };

        read.set_endianness(endianness);

        let message_type = match read.load::<u8>()? {
            1 => MessageType::METHOD_CALL,
            2 => MessageType::METHOD_RETURN,
            3 => MessageType::ERROR,
            4 => MessageType::SIGNAL,
            byte => return Err(Error::new(ErrorKind::InvalidMessageType(byte))),
        };

        let flags = match read.load::<u8>()? {
            byte if byte & !Flags::KNOWN != 0 => {
                return Err(Error::new(ErrorKind::InvalidFlags(byte)))
            }
            byte => Flags(byte),
        };

        let version = match read.load::<u8>()? {
            PROTOCOL_VERSION => PROTOCOL_VERSION,
            byte => return Err(Error::new(ErrorKind::InvalidVersion(byte))),
        };

        let body_length = read.load::<u32>()?;

        if body_length > MAX_BODY_LENGTH {
            return Err(Error::new(ErrorKind::BodyTooLong(body_length)));
        }

        let serial = read.load::<u32>()?;

        if serial == 0 {
            warn!("accepting message with zero serial");
        }

        // Header field structs are aligned to 8.
        let mut st = read.read_array_frame(8)?;

        let mut fields = Vec::new();
        let mut seen = 0u16;

        while !st.is_empty() {
            st.align_to(8)?;
            let code = st.load::<FieldCode>()?;
            let signature = st.read::<Signature>()?;

            let field = match (code, signature.as_bytes()) {
                (FieldCode::PATH, b"o") => HeaderField::Path(st.read::<ObjectPath>()?),
                (FieldCode::INTERFACE, b"s") => HeaderField::Interface(st.read::<str>()?),
                (FieldCode::MEMBER, b"s") => HeaderField::Member(st.read::<str>()?),
                (FieldCode::ERROR_NAME, b"s") => HeaderField::ErrorName(st.read::<str>()?),
                (FieldCode::REPLY_SERIAL, b"u") => HeaderField::ReplySerial(st.load::<u32>()?),
                (FieldCode::DESTINATION, b"s") => HeaderField::Destination(st.read::<str>()?),
                (FieldCode::SENDER, b"s") => HeaderField::Sender(st.read::<str>()?),
                (FieldCode::SIGNATURE, b"g") => HeaderField::Signature(st.read::<Signature>()?),
                (FieldCode::UNIX_FDS, b"u") => HeaderField::UnixFds(st.load::<u32>()?),
                (
                    FieldCode::PATH
                    | FieldCode::INTERFACE
                    | FieldCode::MEMBER
                    | FieldCode::ERROR_NAME
                    | FieldCode::REPLY_SERIAL
                    | FieldCode::DESTINATION
                    | FieldCode::SENDER
                    | FieldCode::SIGNATURE
                    | FieldCode::UNIX_FDS,
                    ..,
                ) => return Err(Error::new(ErrorKind::InvalidHeaderField(code))),
                (code, ..) => {
                    // Unknown field codes are tolerated for forward
                    // compatibility. The inline signature still describes
                    // the value, so it can be skipped precisely.
                    debug!("skipping unknown header field {:?}", code.0);
                    signature.skip(&mut st)?;
                    continue;
                }
            };

            let bit = 1u16 << field.code().0;

            if seen & bit != 0 {
                return Err(Error::new(ErrorKind::DuplicateHeaderField(field.code())));
            }

            seen |= bit;
            fields.push(field);
        }

        read.align_to(8)?;

        if read.remaining() != body_length as usize {
            return Err(Error::new(ErrorKind::InvalidLength(body_length)));
        }

        let header = MessageHeader {
            endianness,
            message_type,
            flags,
            version,
            serial,
            fields,
            body: read.read_buf(body_length as usize)?,
        };

        if header.signature().is_empty() && body_length != 0 {
            return Err(Error::new(ErrorKind::SignatureMismatch));
        }

        Ok(header)
    }

    /// Check that the fields required by the message type are present.
    ///
    /// Method calls and signals require a path and a member, signals
    /// additionally an interface, errors an error name and a reply serial,
    /// and method returns a reply serial.
    ///
    /// # Examples
    ///
    /// ```
    /// use dbus_wire::MessageHeader;
    ///
    /// let buf = [
    ///     b'l', 0x01, 0x00, 0x01,
    ///     0x00, 0x00, 0x00, 0x00,
    ///     0x2a, 0x00, 0x00, 0x00,
    ///     0x00, 0x00, 0x00, 0x00,
    /// ];
    ///
    /// let header = MessageHeader::from_slice(&buf)?;
    /// // A method call with no path field.
    /// assert!(header.validate_required().is_err());
    /// # Ok::<_, dbus_wire::Error>(())
    /// ```
    pub fn validate_required(&self) -> Result<()> {
        match self.message_type {
            MessageType::METHOD_CALL => {
                if self.path().is_none() {
                    return Err(Error::new(ErrorKind::MissingPath));
                }

                if self.member().is_none() {
                    return Err(Error::new(ErrorKind::MissingMember));
                }
            }
            MessageType::METHOD_RETURN => {
                if self.reply_serial().is_none() {
                    return Err(Error::new(ErrorKind::MissingReplySerial));
                }
            }
            MessageType::ERROR => {
                if self.error_name().is_none() {
                    return Err(Error::new(ErrorKind::MissingErrorName));
                }

                if self.reply_serial().is_none() {
                    return Err(Error::new(ErrorKind::MissingReplySerial));
                }
            }
            MessageType::SIGNAL => {
                if self.path().is_none() {
                    return Err(Error::new(ErrorKind::MissingPath));
                }

                if self.interface().is_none() {
                    return Err(Error::new(ErrorKind::MissingInterface));
                }

                if self.member().is_none() {
                    return Err(Error::new(ErrorKind::MissingMember));
                }
            }
            _ => {}
        }

        Ok(())
    }

    /// Compute the total length of a message from its fixed 16-byte prefix.
    ///
    /// Transports use this to learn how many bytes make up the message
    /// currently at the head of their stream: the header field array is
    /// padded to 8 and followed by `body_length` bytes of body.
    ///
    /// # Examples
    ///
    /// ```
    /// use dbus_wire::MessageHeader;
    ///
    /// let prefix = [
    ///     b'l', 0x01, 0x00, 0x01,
    ///     0x04, 0x00, 0x00, 0x00,
    ///     0x01, 0x00, 0x00, 0x00,
    ///     0x03, 0x00, 0x00, 0x00,
    /// ];
    ///
    /// // 16 + 3 padded to 8, plus 4 bytes of body.
    /// assert_eq!(MessageHeader::wire_length(&prefix)?, 28);
    /// # Ok::<_, dbus_wire::Error>(())
    /// ```
    pub fn wire_length(prefix: &[u8; 16]) -> Result<usize> {
        let endianness = match prefix[0] {
            b'l' => Endianness::LITTLE,
            b'B' => Endianness::BIG,
            byte => return Err(Error::new(ErrorKind::InvalidEndianness(byte))),
        };

        let mut read = ReadBuf::from_slice(prefix, endianness);
        read.advance(4)?;

        let body_length = read.load::<u32>()?;

        if body_length > MAX_BODY_LENGTH {
            return Err(Error::new(ErrorKind::BodyTooLong(body_length)));
        }

        let _serial = read.load::<u32>()?;
        let fields_length = read.load::<u32>()? as usize;

        let headers = 16 + fields_length;
        let total = headers + padding_to(8, headers) + body_length as usize;

        if total > MAX_MESSAGE_LENGTH {
            return Err(Error::new(ErrorKind::MessageTooLong(total)));
        }

        Ok(total)
    }
}
