//! A synchronous implementation of the D-Bus wire format.
//!
//! This crate is the codec half of a D-Bus implementation: it parses type
//! signatures, reads and writes aligned values, and decodes message
//! headers. It performs no I/O — transports hand it complete message
//! buffers and take the encoded bytes it produces.
//!
//! # Examples
//!
//! Decoding a message buffer down to its body:
//!
//! ```
//! use dbus_wire::proto::MessageType;
//! use dbus_wire::{MessageHeader, Value};
//!
//! fn handle(buf: &[u8]) -> dbus_wire::Result<()> {
//!     let header = MessageHeader::from_slice(buf)?;
//!     header.validate_required()?;
//!
//!     let signature = header.signature().parse()?;
//!     let mut body = header.body();
//!     let arguments = Value::decode(&mut body, &signature)?;
//!
//!     if header.message_type() == MessageType::METHOD_CALL {
//!         // dispatch on header.path() / header.member() ...
//!     }
//!
//!     let _ = arguments;
//!     Ok(())
//! }
//! # handle(&[b'l', 4, 0, 1, 0, 0, 0, 0, 1, 0, 0, 0, 44, 0, 0, 0,
//! #     1, 1, b'o', 0, 1, 0, 0, 0, b'/', 0, 0, 0, 0, 0, 0, 0,
//! #     2, 1, b's', 0, 4, 0, 0, 0, b'i', b'f', b'a', b'c', 0, 0, 0, 0,
//! #     3, 1, b's', 0, 3, 0, 0, 0, b'm', b'b', b'r', 0, 0, 0, 0, 0,
//! # ]).unwrap();
//! ```

pub use self::error::{Error, Result};
mod error;

pub use self::frame::Frame;
mod frame;

pub mod proto;

pub use self::ty::DBusType;
mod ty;

#[doc(inline)]
pub use self::read::Read;
mod read;

#[doc(inline)]
pub use self::write::Write;
mod write;

pub use self::buf::{ArrayWriter, OwnedBuf, ReadBuf};
pub mod buf;

#[doc(inline)]
pub use self::signature::{
    CompleteTypes, OwnedSignature, ParsedSignature, Signature, SignatureError,
};
mod signature;

#[doc(inline)]
pub use self::object_path::{ObjectPath, ObjectPathError};
mod object_path;

#[doc(inline)]
pub use self::value::Value;
mod value;

pub use self::message::{HeaderField, MessageHeader};
mod message;
