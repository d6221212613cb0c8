pub(crate) use self::validate::validate;
mod validate;

pub use self::signature::Signature;
mod signature;

pub use self::parsed::{CompleteTypes, ParsedSignature};
pub(crate) use self::parsed::{complete_end, render_span};
mod parsed;

pub use self::signature_error::SignatureError;
pub(crate) use self::signature_error::SignatureErrorKind;
mod signature_error;

pub use self::owned_signature::OwnedSignature;
mod owned_signature;

#[cfg(test)]
mod tests;

/// The maximum length of a signature in bytes.
pub(crate) const MAX_SIGNATURE: usize = 255;

/// The maximum nesting of arrays and of structs, each counted on its own.
pub(crate) const MAX_CONTAINER_DEPTH: usize = 32;

/// The maximum combined container nesting in a single signature.
pub(crate) const MAX_DEPTH: usize = MAX_CONTAINER_DEPTH * 2;
