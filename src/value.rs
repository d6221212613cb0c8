//! The self-describing value model produced by signature-driven reads.

use crate::buf::{ArrayWriter, OwnedBuf, ReadBuf};
use crate::error::{Error, ErrorKind, Result};
use crate::signature::{complete_end, render_span};
use crate::ty::{code_alignment, DBusType};
use crate::{ObjectPath, OwnedSignature, ParsedSignature, Signature};

/// A single decoded D-Bus value.
///
/// Borrowed string-like values reference the buffer they were decoded from.
/// A variant owns its payload through a box, and an array carries the
/// signature of its element type so that empty arrays stay encodable.
///
/// # Examples
///
/// ```
/// use dbus_wire::proto::Endianness;
/// use dbus_wire::{ReadBuf, Signature, Value};
///
/// let sig = Signature::new(b"yu")?.parse()?;
/// let mut read = ReadBuf::from_slice(&[7, 0, 0, 0, 42, 0, 0, 0], Endianness::LITTLE);
///
/// let values = Value::decode(&mut read, &sig)?;
/// assert_eq!(values, [Value::Byte(7), Value::Uint32(42)]);
/// # Ok::<_, dbus_wire::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum Value<'de> {
    /// A `y` value.
    Byte(u8),
    /// A `b` value.
    Boolean(bool),
    /// An `n` value.
    Int16(i16),
    /// A `q` value.
    Uint16(u16),
    /// An `i` value.
    Int32(i32),
    /// A `u` value.
    Uint32(u32),
    /// An `x` value.
    Int64(i64),
    /// A `t` value.
    Uint64(u64),
    /// A `d` value.
    Double(f64),
    /// An `h` value.
    UnixFd(u32),
    /// An `s` value.
    String(&'de str),
    /// An `o` value.
    ObjectPath(&'de ObjectPath),
    /// A `g` value.
    Signature(&'de Signature),
    /// A `v` value carrying its own payload.
    Variant(Box<Value<'de>>),
    /// An `a` value.
    Array {
        /// The signature of the element type.
        element: OwnedSignature,
        /// The elements in order.
        values: Vec<Value<'de>>,
    },
    /// A `(`...`)` value.
    Struct(Vec<Value<'de>>),
    /// A `{`...`}` value, only ever found as an array element.
    DictEntry(Box<Value<'de>>, Box<Value<'de>>),
}

impl<'de> Value<'de> {
    /// Decode one value for every complete type in `signature`.
    ///
    /// # Examples
    ///
    /// ```
    /// use dbus_wire::proto::Endianness;
    /// use dbus_wire::{ReadBuf, Signature, Value};
    ///
    /// let sig = Signature::new(b"s")?.parse()?;
    /// let mut read = ReadBuf::from_slice(b"\x03\x00\x00\x00foo\x00", Endianness::LITTLE);
    ///
    /// let values = Value::decode(&mut read, &sig)?;
    /// assert_eq!(values, [Value::String("foo")]);
    /// # Ok::<_, dbus_wire::Error>(())
    /// ```
    pub fn decode(read: &mut ReadBuf<'de>, signature: &ParsedSignature) -> Result<Vec<Value<'de>>> {
        let types = signature.types();
        let mut values = Vec::new();
        let mut i = 0;

        while i < types.len() {
            let (value, next) = decode_one(read, types, i)?;
            values.push(value);
            i = next;
        }

        Ok(values)
    }

    /// Encode `values` onto `buf`, checking them against `signature`.
    ///
    /// Together with [`Value::decode`] this round-trips: decoding what was
    /// encoded under the same signature and endianness yields the original
    /// values.
    pub fn encode(
        buf: &mut OwnedBuf,
        signature: &ParsedSignature,
        values: &[Value<'_>],
    ) -> Result<()> {
        let mut text = Vec::new();

        for value in values {
            value.push_signature(&mut text);
        }

        if signature.render().as_bytes() != text {
            return Err(Error::new(ErrorKind::SignatureMismatch));
        }

        for value in values {
            encode_one(buf, value)?;
        }

        Ok(())
    }

    /// The signature describing this value.
    ///
    /// Fails for values which do not form a complete type on their own,
    /// such as a bare dict entry.
    pub fn signature(&self) -> Result<OwnedSignature> {
        let mut text = Vec::new();
        self.push_signature(&mut text);
        Ok(Signature::new(&text)?.to_owned())
    }

    fn push_signature(&self, out: &mut Vec<u8>) {
        match self {
            Value::Byte(..) => out.push(b'y'),
            Value::Boolean(..) => out.push(b'b'),
            Value::Int16(..) => out.push(b'n'),
            Value::Uint16(..) => out.push(b'q'),
            Value::Int32(..) => out.push(b'i'),
            Value::Uint32(..) => out.push(b'u'),
            Value::Int64(..) => out.push(b'x'),
            Value::Uint64(..) => out.push(b't'),
            Value::Double(..) => out.push(b'd'),
            Value::UnixFd(..) => out.push(b'h'),
            Value::String(..) => out.push(b's'),
            Value::ObjectPath(..) => out.push(b'o'),
            Value::Signature(..) => out.push(b'g'),
            Value::Variant(..) => out.push(b'v'),
            Value::Array { element, .. } => {
                out.push(b'a');
                out.extend_from_slice(element.as_bytes());
            }
            Value::Struct(fields) => {
                out.push(b'(');

                for field in fields {
                    field.push_signature(out);
                }

                out.push(b')');
            }
            Value::DictEntry(key, value) => {
                out.push(b'{');
                key.push_signature(out);
                value.push_signature(out);
                out.push(b'}');
            }
        }
    }
}

/// Decode the value of the complete type starting at `types[i]`, returning
/// it together with the index one past that type.
fn decode_one<'de>(
    read: &mut ReadBuf<'de>,
    types: &[DBusType],
    i: usize,
) -> Result<(Value<'de>, usize)> {
    let Some(&ty) = types.get(i) else {
        return Err(Error::new(ErrorKind::SignatureMismatch));
    };

    let value = match ty {
        DBusType::Byte => Value::Byte(read.load()?),
        DBusType::Boolean => Value::Boolean(read.load_bool()?),
        DBusType::Int16 => Value::Int16(read.load()?),
        DBusType::Uint16 => Value::Uint16(read.load()?),
        DBusType::Int32 => Value::Int32(read.load()?),
        DBusType::Uint32 => Value::Uint32(read.load()?),
        DBusType::Int64 => Value::Int64(read.load()?),
        DBusType::Uint64 => Value::Uint64(read.load()?),
        DBusType::Double => Value::Double(read.load()?),
        DBusType::UnixFd => Value::UnixFd(read.load()?),
        DBusType::String => Value::String(read.read::<str>()?),
        DBusType::ObjectPath => Value::ObjectPath(read.read::<ObjectPath>()?),
        DBusType::Signature => Value::Signature(read.read::<Signature>()?),
        DBusType::Variant => {
            let signature = read.read::<Signature>()?;
            let parsed = signature.parse()?;
            let types = parsed.types();

            if types.is_empty() {
                return Err(Error::new(ErrorKind::SignatureMismatch));
            }

            let (value, end) = decode_one(read, types, 0)?;

            // A variant carries exactly one complete type.
            if end != types.len() {
                return Err(Error::new(ErrorKind::SignatureMismatch));
            }

            Value::Variant(Box::new(value))
        }
        DBusType::Array => {
            let end = complete_end(types, i + 1);
            let element = &types[i + 1..end];

            let Some(first) = element.first() else {
                return Err(Error::new(ErrorKind::SignatureMismatch));
            };

            let mut frame = read.read_array_frame(first.alignment())?;
            let mut values = Vec::new();

            while !frame.is_empty() {
                let (value, ..) = decode_one(&mut frame, types, i + 1)?;
                values.push(value);
            }

            return Ok((
                Value::Array {
                    element: render_span(element),
                    values,
                },
                end,
            ));
        }
        DBusType::Struct => {
            read.align_to(8)?;

            let Some(&DBusType::StructLength(count)) = types.get(i + 1) else {
                return Err(Error::new(ErrorKind::SignatureMismatch));
            };

            let mut j = i + 2;
            let mut fields = Vec::with_capacity(count as usize);

            for _ in 0..count {
                let (value, next) = decode_one(read, types, j)?;
                fields.push(value);
                j = next;
            }

            return Ok((Value::Struct(fields), j));
        }
        DBusType::DictEntry => {
            read.align_to(8)?;

            let Some(&DBusType::DictEntryLength(..)) = types.get(i + 1) else {
                return Err(Error::new(ErrorKind::SignatureMismatch));
            };

            let (key, next) = decode_one(read, types, i + 2)?;
            let (value, next) = decode_one(read, types, next)?;

            return Ok((Value::DictEntry(Box::new(key), Box::new(value)), next));
        }
        DBusType::StructLength(..) | DBusType::DictEntryLength(..) => {
            return Err(Error::new(ErrorKind::SignatureMismatch));
        }
    };

    Ok((value, i + 1))
}

fn encode_one(buf: &mut OwnedBuf, value: &Value<'_>) -> Result<()> {
    match value {
        Value::Byte(value) => buf.store(*value),
        Value::Boolean(value) => buf.store(*value as u32),
        Value::Int16(value) => buf.store(*value),
        Value::Uint16(value) => buf.store(*value),
        Value::Int32(value) => buf.store(*value),
        Value::Uint32(value) => buf.store(*value),
        Value::Int64(value) => buf.store(*value),
        Value::Uint64(value) => buf.store(*value),
        Value::Double(value) => buf.store(*value),
        Value::UnixFd(value) => buf.store(*value),
        Value::String(value) => buf.write(*value),
        Value::ObjectPath(value) => buf.write(*value),
        Value::Signature(value) => buf.write(*value),
        Value::Variant(value) => {
            let signature = value.signature()?;
            buf.write(&*signature);
            encode_one(buf, value)?;
        }
        Value::Array { element, values } => {
            let Some(&first) = element.as_bytes().first() else {
                return Err(Error::new(ErrorKind::SignatureMismatch));
            };

            let mut array = ArrayWriter::new(buf, code_alignment(first));

            for value in values {
                let mut text = Vec::new();
                value.push_signature(&mut text);

                if text != *element.as_bytes() {
                    return Err(Error::new(ErrorKind::SignatureMismatch));
                }

                encode_one(array.buf(), value)?;
            }

            array.finish()?;
        }
        Value::Struct(fields) => {
            buf.align_mut(8);

            for field in fields {
                encode_one(buf, field)?;
            }
        }
        Value::DictEntry(key, value) => {
            buf.align_mut(8);
            encode_one(buf, key)?;
            encode_one(buf, value)?;
        }
    }

    Ok(())
}
