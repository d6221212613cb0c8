use crate::buf::{ArrayWriter, MAX_BODY_LENGTH};
use crate::error::{Error, ErrorKind, Result};
use crate::{HeaderField, MessageHeader, OwnedBuf, Signature};

impl MessageHeader<'_> {
    /// Encode the message onto an empty buffer.
    ///
    /// The buffer's endianness is set to the header's endianness, the
    /// header field array is written in field order, the header is padded
    /// to 8 and the body bytes are appended. This is the exact inverse of
    /// [`MessageHeader::from_slice`].
    ///
    /// # Examples
    ///
    /// ```
    /// use dbus_wire::proto::{Endianness, MessageType};
    /// use dbus_wire::{MessageHeader, OwnedBuf};
    ///
    /// let header = MessageHeader::new(Endianness::LITTLE, MessageType::METHOD_CALL, 42);
    ///
    /// let mut buf = OwnedBuf::new();
    /// header.write_to(&mut buf)?;
    ///
    /// assert_eq!(buf.get(), &[
    ///     b'l', 0x01, 0x00, 0x01,
    ///     0x00, 0x00, 0x00, 0x00,
    ///     0x2a, 0x00, 0x00, 0x00,
    ///     0x00, 0x00, 0x00, 0x00,
    /// ]);
    /// # Ok::<_, dbus_wire::Error>(())
    /// ```
    pub fn write_to(&self, buf: &mut OwnedBuf) -> Result<()> {
        buf.set_endianness(self.endianness);

        let body = self.body.get();

        let Ok(body_length) = u32::try_from(body.len()) else {
            return Err(Error::new(ErrorKind::BodyTooLong(u32::MAX)));
        };

        if body_length > MAX_BODY_LENGTH {
            return Err(Error::new(ErrorKind::BodyTooLong(body_length)));
        }

        buf.store(self.endianness);
        buf.store(self.message_type);
        buf.store(self.flags);
        buf.store(self.version);
        buf.store(body_length);
        buf.store(self.serial);

        let mut array = ArrayWriter::new(buf, 8);

        for field in &self.fields {
            array.align_mut(8);
            array.store(field.code());

            match field {
                HeaderField::Path(path) => {
                    array.write(Signature::OBJECT_PATH);
                    array.write(*path);
                }
                HeaderField::Interface(interface) => {
                    array.write(Signature::STRING);
                    array.write(*interface);
                }
                HeaderField::Member(member) => {
                    array.write(Signature::STRING);
                    array.write(*member);
                }
                HeaderField::ErrorName(error_name) => {
                    array.write(Signature::STRING);
                    array.write(*error_name);
                }
                HeaderField::ReplySerial(serial) => {
                    array.write(Signature::UINT32);
                    array.store(*serial);
                }
                HeaderField::Destination(destination) => {
                    array.write(Signature::STRING);
                    array.write(*destination);
                }
                HeaderField::Sender(sender) => {
                    array.write(Signature::STRING);
                    array.write(*sender);
                }
                HeaderField::Signature(signature) => {
                    array.write(Signature::SIGNATURE);
                    array.write(*signature);
                }
                HeaderField::UnixFds(fds) => {
                    array.write(Signature::UINT32);
                    array.store(*fds);
                }
            }
        }

        array.finish()?;

        buf.align_mut(8);
        buf.extend_from_slice(body);
        Ok(())
    }
}
