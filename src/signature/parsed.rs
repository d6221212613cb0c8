use std::fmt;

use crate::ty::DBusType;
use crate::OwnedSignature;

use super::{SignatureError, SignatureErrorKind, MAX_CONTAINER_DEPTH, MAX_DEPTH, MAX_SIGNATURE};

/// The vectorized form of a [`Signature`].
///
/// Containers are flattened into a single ordered buffer of [`DBusType`]
/// tags: a struct is a [`DBusType::Struct`] followed by a
/// [`DBusType::StructLength`] carrying its child count and then its
/// children, a dict entry follows the same scheme with two children, and an
/// array is followed by exactly one complete element type. This keeps the
/// representation to one allocation and lets readers walk it with plain
/// index cursors.
///
/// [`Signature`]: crate::Signature
///
/// # Examples
///
/// ```
/// use dbus_wire::{DBusType, ParsedSignature};
///
/// let parsed = ParsedSignature::parse(b"ya{ys}")?;
///
/// let mut it = parsed.iter();
/// assert_eq!(it.next(), Some(&[DBusType::Byte][..]));
/// assert!(it.next().is_some());
/// assert!(it.next().is_none());
/// # Ok::<_, dbus_wire::SignatureError>(())
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct ParsedSignature {
    types: Vec<DBusType>,
}

impl ParsedSignature {
    /// Parse a signature string into its vectorized form.
    ///
    /// The empty signature parses to an empty sequence.
    ///
    /// # Examples
    ///
    /// ```
    /// use dbus_wire::{DBusType, ParsedSignature};
    ///
    /// let parsed = ParsedSignature::parse(b"(yu)")?;
    ///
    /// assert_eq!(parsed.types(), [
    ///     DBusType::Struct,
    ///     DBusType::StructLength(2),
    ///     DBusType::Byte,
    ///     DBusType::Uint32,
    /// ]);
    /// # Ok::<_, dbus_wire::SignatureError>(())
    /// ```
    pub fn parse(signature: &[u8]) -> Result<Self, SignatureError> {
        if signature.len() > MAX_SIGNATURE {
            return Err(SignatureError::new(SignatureErrorKind::SignatureTooLong));
        }

        let mut types = Vec::with_capacity(signature.len());
        let mut i = 0;

        while i < signature.len() {
            i = parse_complete(signature, i, 0, 0, &mut types)?;
        }

        Ok(Self { types })
    }

    /// The sequence of type tags.
    pub fn types(&self) -> &[DBusType] {
        &self.types
    }

    /// Test if the sequence is empty.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Iterate over the complete types of the sequence.
    ///
    /// Each item is the span of tags making up one complete type.
    pub fn iter(&self) -> CompleteTypes<'_> {
        CompleteTypes {
            types: &self.types,
            i: 0,
        }
    }

    /// Render the sequence back into signature text.
    ///
    /// Rendering inverts [`ParsedSignature::parse`]: for any valid
    /// signature `s`, `parse(s).render() == s`.
    ///
    /// # Examples
    ///
    /// ```
    /// use dbus_wire::ParsedSignature;
    ///
    /// let parsed = ParsedSignature::parse(b"a{ys}ai")?;
    /// assert_eq!(parsed.render().as_str(), "a{ys}ai");
    /// # Ok::<_, dbus_wire::SignatureError>(())
    /// ```
    pub fn render(&self) -> OwnedSignature {
        render_span(&self.types)
    }
}

impl fmt::Debug for ParsedSignature {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.types.iter()).finish()
    }
}

impl<'a> IntoIterator for &'a ParsedSignature {
    type Item = &'a [DBusType];
    type IntoIter = CompleteTypes<'a>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the complete types in a [`ParsedSignature`].
pub struct CompleteTypes<'a> {
    types: &'a [DBusType],
    i: usize,
}

impl<'a> Iterator for CompleteTypes<'a> {
    type Item = &'a [DBusType];

    fn next(&mut self) -> Option<Self::Item> {
        if self.i >= self.types.len() {
            return None;
        }

        let end = complete_end(self.types, self.i);
        let span = &self.types[self.i..end];
        self.i = end;
        Some(span)
    }
}

/// The index one past the complete type starting at `types[i]`.
pub(crate) fn complete_end(types: &[DBusType], i: usize) -> usize {
    match types.get(i) {
        None => i,
        Some(DBusType::Array) => complete_end(types, i + 1),
        Some(DBusType::Struct) => {
            let (mut j, count) = length_marker(types, i + 1);

            for _ in 0..count {
                j = complete_end(types, j);
            }

            j
        }
        Some(DBusType::DictEntry) => {
            let (mut j, count) = length_marker(types, i + 1);

            for _ in 0..count {
                j = complete_end(types, j);
            }

            j
        }
        Some(..) => i + 1,
    }
}

/// Decompose the length marker expected at `types[i]`.
fn length_marker(types: &[DBusType], i: usize) -> (usize, u8) {
    match types.get(i) {
        Some(DBusType::StructLength(count)) | Some(DBusType::DictEntryLength(count)) => {
            (i + 1, *count)
        }
        _ => (i, 0),
    }
}

/// Render a span of tags back into signature text.
pub(crate) fn render_span(types: &[DBusType]) -> OwnedSignature {
    let mut out = Vec::with_capacity(types.len());
    let mut i = 0;

    while i < types.len() {
        i = render_complete(types, i, &mut out);
    }

    // SAFETY: The tags were produced by a well-formed parse, so rendering
    // them yields the text they were parsed from.
    unsafe { OwnedSignature::from_vec(out) }
}

fn render_complete(types: &[DBusType], i: usize, out: &mut Vec<u8>) -> usize {
    let Some(ty) = types.get(i) else {
        return i;
    };

    match ty {
        DBusType::Array => {
            out.push(b'a');
            render_complete(types, i + 1, out)
        }
        DBusType::Struct => {
            out.push(b'(');

            let (mut j, count) = length_marker(types, i + 1);

            for _ in 0..count {
                j = render_complete(types, j, out);
            }

            out.push(b')');
            j
        }
        DBusType::DictEntry => {
            out.push(b'{');

            let (mut j, count) = length_marker(types, i + 1);

            for _ in 0..count {
                j = render_complete(types, j, out);
            }

            out.push(b'}');
            j
        }
        ty => {
            if let Some(code) = ty.code() {
                out.push(code);
            }

            i + 1
        }
    }
}

/// Parse one complete type starting at `i`, which must be in bounds,
/// appending its tags to `types`. Returns the index one past it.
fn parse_complete(
    sig: &[u8],
    i: usize,
    structs: usize,
    arrays: usize,
    types: &mut Vec<DBusType>,
) -> Result<usize, SignatureError> {
    match sig[i] {
        b'a' => {
            if arrays == MAX_CONTAINER_DEPTH {
                return Err(SignatureError::new(
                    SignatureErrorKind::ExceededMaximumArrayRecursion,
                ));
            }

            if structs + arrays == MAX_DEPTH {
                return Err(SignatureError::new(
                    SignatureErrorKind::ExceededMaximumContainerDepth,
                ));
            }

            if i + 1 == sig.len() || matches!(sig[i + 1], b')' | b'}') {
                return Err(SignatureError::new(
                    SignatureErrorKind::MissingArrayElementType,
                ));
            }

            types.push(DBusType::Array);

            if sig[i + 1] == b'{' {
                parse_dict_entry(sig, i + 1, structs, arrays + 1, types)
            } else {
                parse_complete(sig, i + 1, structs, arrays + 1, types)
            }
        }
        b'(' => {
            if structs == MAX_CONTAINER_DEPTH {
                return Err(SignatureError::new(
                    SignatureErrorKind::ExceededMaximumStructRecursion,
                ));
            }

            if structs + arrays == MAX_DEPTH {
                return Err(SignatureError::new(
                    SignatureErrorKind::ExceededMaximumContainerDepth,
                ));
            }

            types.push(DBusType::Struct);

            // Reserve the length marker and backfill it once the children
            // have been counted.
            let marker = types.len();
            types.push(DBusType::StructLength(0));

            let mut j = i + 1;
            let mut fields = 0u8;

            loop {
                if j == sig.len() {
                    return Err(SignatureError::new(
                        SignatureErrorKind::StructStartedButNotEnded,
                    ));
                }

                if sig[j] == b')' {
                    if fields == 0 {
                        return Err(SignatureError::new(SignatureErrorKind::StructHasNoFields));
                    }

                    types[marker] = DBusType::StructLength(fields);
                    return Ok(j + 1);
                }

                j = parse_complete(sig, j, structs + 1, arrays, types)?;
                fields += 1;
            }
        }
        b'{' => Err(SignatureError::new(
            SignatureErrorKind::DictEntryNotInsideArray,
        )),
        b')' => Err(SignatureError::new(
            SignatureErrorKind::StructEndedButNotStarted,
        )),
        b'}' => Err(SignatureError::new(
            SignatureErrorKind::DictEndedButNotStarted,
        )),
        code => match DBusType::from_code(code) {
            Some(ty) => {
                types.push(ty);
                Ok(i + 1)
            }
            None => Err(SignatureError::new(SignatureErrorKind::UnknownTypeCode(
                code,
            ))),
        },
    }
}

/// Parse a dict entry starting at the opening brace at `i`.
fn parse_dict_entry(
    sig: &[u8],
    i: usize,
    structs: usize,
    arrays: usize,
    types: &mut Vec<DBusType>,
) -> Result<usize, SignatureError> {
    if structs + arrays == MAX_DEPTH {
        return Err(SignatureError::new(
            SignatureErrorKind::ExceededMaximumContainerDepth,
        ));
    }

    types.push(DBusType::DictEntry);
    types.push(DBusType::DictEntryLength(2));

    let mut j = i + 1;

    if j == sig.len() {
        return Err(SignatureError::new(
            SignatureErrorKind::DictStartedButNotEnded,
        ));
    }

    if sig[j] == b'}' {
        return Err(SignatureError::new(
            SignatureErrorKind::DictEntryHasNoFields,
        ));
    }

    match DBusType::from_code(sig[j]) {
        Some(key) if key.is_basic() => types.push(key),
        _ => {
            return Err(SignatureError::new(
                SignatureErrorKind::DictKeyMustBeBasicType,
            ))
        }
    }

    j += 1;

    if j == sig.len() {
        return Err(SignatureError::new(
            SignatureErrorKind::DictStartedButNotEnded,
        ));
    }

    if sig[j] == b'}' {
        return Err(SignatureError::new(
            SignatureErrorKind::DictEntryHasOnlyOneField,
        ));
    }

    j = parse_complete(sig, j, structs + 1, arrays, types)?;

    if j == sig.len() {
        return Err(SignatureError::new(
            SignatureErrorKind::DictStartedButNotEnded,
        ));
    }

    if sig[j] != b'}' {
        return Err(SignatureError::new(
            SignatureErrorKind::DictEntryHasTooManyFields,
        ));
    }

    Ok(j + 1)
}
