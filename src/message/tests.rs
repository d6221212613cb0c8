use crate::error::ErrorKind;
use crate::proto::{Endianness, Flags, MessageType};
use crate::{HeaderField, MessageHeader, ObjectPath, OwnedBuf, Signature, Value};

#[rustfmt::skip]
const LE_BLOB: [u8; 36] = [
    // byte 0
    // yyyyuu fixed headers
    b'l',
    // reply (which is the simplest message)
    b'\x02',
    // no auto-starting
    b'\x02',
    // D-Bus version = 1
    b'\x01',
    // byte 4
    // bytes in body = 4
    b'\x04', b'\x00', b'\x00', b'\x00',
    // byte 8
    // serial number = 0x12345678
    b'\x78', b'\x56', b'\x34', b'\x12',
    // byte 12
    // a(yv) variable headers start here
    // bytes in array of variable headers = 15
    // pad to 8-byte boundary = nothing
    b'\x0f', b'\0', b'\0', b'\0',
    // byte 16
    // in reply to:
    b'\x05',
    // variant signature = u
    // pad to 4-byte boundary = nothing
    b'\x01', b'u', b'\0',
    // 0xabcdef12
    // pad to 8-byte boundary = nothing
    b'\x12', b'\xef', b'\xcd', b'\xab',
    // byte 24
    // signature:
    b'\x08',
    // variant signature = g
    b'\x01', b'g', b'\0',
    // 1 byte, u, NUL (no alignment needed)
    b'\x01', b'u', b'\0',
    // pad to 8-byte boundary for body
    b'\0',
    // body; byte 32
    // 0xdeadbeef
    b'\xef', b'\xbe', b'\xad', b'\xde',
];

#[rustfmt::skip]
const BE_BLOB: [u8; 36] = [
    // byte 0
    // yyyyuu fixed headers
    b'B',
    // reply (which is the simplest message)
    b'\x02',
    // no auto-starting
    b'\x02',
    // D-Bus version = 1
    b'\x01',
    // byte 4
    // bytes in body = 4
    b'\x00', b'\x00', b'\x00', b'\x04',
    // byte 8
    // serial number = 0x12345678
    b'\x12', b'\x34', b'\x56', b'\x78',
    // byte 12
    // bytes in array of variable headers = 15
    b'\0', b'\0', b'\0', b'\x0f',
    // byte 16
    // in reply to:
    b'\x05',
    // variant signature = u
    b'\x01', b'u', b'\0',
    // 0xabcdef12
    b'\xab', b'\xcd', b'\xef', b'\x12',
    // byte 24
    // signature:
    b'\x08',
    // variant signature = g
    b'\x01', b'g', b'\0',
    // 1 byte, u, NUL (no alignment needed)
    b'\x01', b'u', b'\0',
    // pad to 8-byte boundary for body
    b'\0',
    // body; byte 32
    // 0xdeadbeef
    b'\xde', b'\xad', b'\xbe', b'\xef',
];

#[test]
fn decode_blobs() -> crate::Result<()> {
    for (blob, endianness) in [(&LE_BLOB, Endianness::LITTLE), (&BE_BLOB, Endianness::BIG)] {
        let header = MessageHeader::from_slice(blob)?;

        assert_eq!(header.endianness(), endianness);
        assert_eq!(header.message_type(), MessageType::METHOD_RETURN);
        assert_eq!(header.flags(), Flags::NO_AUTO_START);
        assert_eq!(header.version(), 1);
        assert_eq!(header.serial(), 0x12345678);
        assert_eq!(header.reply_serial(), Some(0xabcdef12));
        assert_eq!(header.signature(), Signature::UINT32);
        assert_eq!(header.body_length(), 4);

        header.validate_required()?;

        let mut body = header.body();
        assert_eq!(body.load::<u32>()?, 0xdeadbeef);
        assert!(body.is_empty());
    }

    Ok(())
}

#[test]
fn encode_inverts_decode() -> crate::Result<()> {
    for blob in [&LE_BLOB, &BE_BLOB] {
        let header = MessageHeader::from_slice(blob)?;

        let mut buf = OwnedBuf::new();
        header.write_to(&mut buf)?;

        assert_eq!(buf.get(), blob);
    }

    Ok(())
}

#[test]
fn wire_length_from_prefix() -> crate::Result<()> {
    let mut prefix = [0u8; 16];
    prefix.copy_from_slice(&LE_BLOB[..16]);
    assert_eq!(MessageHeader::wire_length(&prefix)?, 36);

    prefix.copy_from_slice(&BE_BLOB[..16]);
    assert_eq!(MessageHeader::wire_length(&prefix)?, 36);
    Ok(())
}

#[test]
fn minimal_method_call_with_zero_serial() -> crate::Result<()> {
    let blob = [
        0x6c, 0x01, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        0x00,
    ];

    let header = MessageHeader::from_slice(&blob)?;

    assert_eq!(header.endianness(), Endianness::LITTLE);
    assert_eq!(header.message_type(), MessageType::METHOD_CALL);
    assert_eq!(header.flags(), Flags::EMPTY);
    assert_eq!(header.version(), 1);
    assert_eq!(header.body_length(), 0);
    assert_eq!(header.serial(), 0);
    assert!(header.fields().is_empty());

    // A method call still requires path and member.
    let err = header.validate_required().unwrap_err();
    assert!(matches!(err.kind, ErrorKind::MissingPath));
    Ok(())
}

#[test]
fn unknown_field_is_skipped() -> crate::Result<()> {
    #[rustfmt::skip]
    let blob: [u8; 32] = [
        b'l', 0x02, 0x00, 0x01,
        0x00, 0x00, 0x00, 0x00,
        0x01, 0x00, 0x00, 0x00,
        0x10, 0x00, 0x00, 0x00,
        // unknown field code 0xaa carrying a u
        0xaa, 0x01, b'u', 0x00,
        0x07, 0x00, 0x00, 0x00,
        // in reply to: 42
        0x05, 0x01, b'u', 0x00,
        0x2a, 0x00, 0x00, 0x00,
    ];

    let header = MessageHeader::from_slice(&blob)?;

    assert_eq!(header.fields(), [HeaderField::ReplySerial(42)]);
    header.validate_required()?;
    Ok(())
}

#[test]
fn duplicate_field_is_rejected() {
    #[rustfmt::skip]
    let blob: [u8; 32] = [
        b'l', 0x02, 0x00, 0x01,
        0x00, 0x00, 0x00, 0x00,
        0x01, 0x00, 0x00, 0x00,
        0x10, 0x00, 0x00, 0x00,
        0x05, 0x01, b'u', 0x00,
        0x07, 0x00, 0x00, 0x00,
        0x05, 0x01, b'u', 0x00,
        0x2a, 0x00, 0x00, 0x00,
    ];

    let err = MessageHeader::from_slice(&blob).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::DuplicateHeaderField(..)));
}

#[test]
fn rejects_bad_fixed_header() {
    let ok = [
        0x6c, 0x01, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        0x00,
    ];

    let mut bad_endian = ok;
    bad_endian[0] = b'x';
    let err = MessageHeader::from_slice(&bad_endian).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::InvalidEndianness(b'x')));

    let mut invalid_type = ok;
    invalid_type[1] = 0x00;
    let err = MessageHeader::from_slice(&invalid_type).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::InvalidMessageType(0)));

    let mut unknown_type = ok;
    unknown_type[1] = 0x05;
    let err = MessageHeader::from_slice(&unknown_type).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::InvalidMessageType(5)));

    let mut unknown_flags = ok;
    unknown_flags[2] = 0x08;
    let err = MessageHeader::from_slice(&unknown_flags).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::InvalidFlags(0x08)));

    let mut bad_version = ok;
    bad_version[3] = 0x02;
    let err = MessageHeader::from_slice(&bad_version).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::InvalidVersion(2)));
}

#[test]
fn rejects_trailing_bytes() {
    let blob = [
        0x6c, 0x01, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        0x00, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
    ];

    let err = MessageHeader::from_slice(&blob).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::InvalidLength(..)));
}

#[test]
fn rejects_truncated_fields() {
    // Field array claims more bytes than the buffer holds.
    let blob = [
        0x6c, 0x01, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x20, 0x00, 0x00,
        0x00,
    ];

    assert!(MessageHeader::from_slice(&blob).is_err());
}

#[test]
fn rejects_body_without_signature() {
    // body_length = 4 but no signature field and no body bytes follow the
    // (empty) field array.
    let blob = [
        0x6c, 0x01, 0x00, 0x01, 0x04, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        0x00, 0xde, 0xad, 0xbe, 0xef,
    ];

    let err = MessageHeader::from_slice(&blob).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::SignatureMismatch));
}

#[test]
fn round_trip_all_fields() -> crate::Result<()> {
    const PATH: &ObjectPath = ObjectPath::new_const(b"/org/freedesktop/DBus");

    let mut body = OwnedBuf::with_endianness(Endianness::LITTLE);
    let signature = Signature::new_const(b"su").parse()?;
    Value::encode(
        &mut body,
        &signature,
        &[Value::String("hello"), Value::Uint32(7)],
    )?;

    let header = MessageHeader::new(Endianness::LITTLE, MessageType::METHOD_CALL, 99)
        .with_flags(Flags::NO_REPLY_EXPECTED)
        .with_field(HeaderField::Path(PATH))
        .with_field(HeaderField::Member("Hello"))
        .with_field(HeaderField::Destination("org.freedesktop.DBus"))
        .with_field(HeaderField::Sender(":1.131"))
        .with_field(HeaderField::Signature(Signature::new_const(b"su")))
        .with_field(HeaderField::UnixFds(0))
        .with_body(body.read_buf());

    let mut buf = OwnedBuf::new();
    header.write_to(&mut buf)?;

    let decoded = MessageHeader::from_slice(buf.get())?;
    decoded.validate_required()?;

    assert_eq!(decoded.endianness(), Endianness::LITTLE);
    assert_eq!(decoded.message_type(), MessageType::METHOD_CALL);
    assert_eq!(decoded.flags(), Flags::NO_REPLY_EXPECTED);
    assert_eq!(decoded.serial(), 99);
    assert_eq!(decoded.path(), Some(PATH));
    assert_eq!(decoded.member(), Some("Hello"));
    assert_eq!(decoded.destination(), Some("org.freedesktop.DBus"));
    assert_eq!(decoded.sender(), Some(":1.131"));
    assert_eq!(decoded.signature(), Signature::new_const(b"su"));
    assert_eq!(decoded.unix_fds(), Some(0));
    assert_eq!(decoded.interface(), None);
    assert_eq!(decoded.error_name(), None);
    assert_eq!(decoded.reply_serial(), None);
    assert_eq!(decoded.fields(), header.fields());

    let mut decoded_body = decoded.body();
    let values = Value::decode(&mut decoded_body, &signature)?;
    assert_eq!(values, [Value::String("hello"), Value::Uint32(7)]);
    assert!(decoded_body.is_empty());

    // Re-encoding the decoded header reproduces the buffer bit for bit.
    let mut again = OwnedBuf::new();
    decoded.write_to(&mut again)?;
    assert_eq!(again.get(), buf.get());

    Ok(())
}

#[test]
fn round_trip_big_endian_message() -> crate::Result<()> {
    let mut body = OwnedBuf::with_endianness(Endianness::BIG);
    let signature = Signature::new_const(b"ai").parse()?;

    Value::encode(
        &mut body,
        &signature,
        &[Value::Array {
            element: Signature::new_const(b"i").to_owned(),
            values: vec![Value::Int32(-1), Value::Int32(2)],
        }],
    )?;

    let header = MessageHeader::new(Endianness::BIG, MessageType::SIGNAL, 3)
        .with_field(HeaderField::Path(ObjectPath::new_const(b"/a")))
        .with_field(HeaderField::Interface("com.example.Iface"))
        .with_field(HeaderField::Member("Changed"))
        .with_field(HeaderField::Signature(Signature::new_const(b"ai")))
        .with_body(body.read_buf());

    let mut buf = OwnedBuf::new();
    header.write_to(&mut buf)?;

    let decoded = MessageHeader::from_slice(buf.get())?;
    decoded.validate_required()?;

    assert_eq!(decoded.endianness(), Endianness::BIG);
    assert_eq!(decoded.interface(), Some("com.example.Iface"));

    let mut decoded_body = decoded.body();
    let values = Value::decode(&mut decoded_body, &signature)?;

    assert_eq!(
        values,
        [Value::Array {
            element: Signature::new_const(b"i").to_owned(),
            values: vec![Value::Int32(-1), Value::Int32(2)],
        }]
    );

    Ok(())
}
