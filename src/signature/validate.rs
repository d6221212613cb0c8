use super::{SignatureError, SignatureErrorKind, MAX_CONTAINER_DEPTH, MAX_DEPTH, MAX_SIGNATURE};

/// Validate a signature, usable in a constant context.
///
/// The grammar here is the same one [`ParsedSignature::parse`] implements,
/// without producing the vectorized form.
///
/// [`ParsedSignature::parse`]: crate::ParsedSignature::parse
pub(crate) const fn validate(signature: &[u8]) -> Result<(), SignatureError> {
    if signature.len() > MAX_SIGNATURE {
        return Err(SignatureError::new(SignatureErrorKind::SignatureTooLong));
    }

    let mut i = 0;

    while i < signature.len() {
        i = match complete_type(signature, i, 0, 0) {
            Ok(i) => i,
            Err(error) => return Err(error),
        };
    }

    Ok(())
}

/// Test if a type code names a basic type.
pub(crate) const fn is_basic_code(code: u8) -> bool {
    matches!(
        code,
        b'y' | b'b'
            | b'n'
            | b'q'
            | b'i'
            | b'u'
            | b'x'
            | b't'
            | b'd'
            | b'h'
            | b's'
            | b'o'
            | b'g'
    )
}

/// Validate one complete type starting at `i`, which must be in bounds.
/// Returns the index one past it.
const fn complete_type(
    sig: &[u8],
    i: usize,
    structs: usize,
    arrays: usize,
) -> Result<usize, SignatureError> {
    match sig[i] {
        b'v' => Ok(i + 1),
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

            if sig[i + 1] == b'{' {
                dict_entry(sig, i + 1, structs, arrays + 1)
            } else {
                complete_type(sig, i + 1, structs, arrays + 1)
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

            let mut j = i + 1;
            let mut fields = 0;

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

                    return Ok(j + 1);
                }

                j = match complete_type(sig, j, structs + 1, arrays) {
                    Ok(j) => j,
                    Err(error) => return Err(error),
                };

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
        code => {
            if is_basic_code(code) {
                Ok(i + 1)
            } else {
                Err(SignatureError::new(SignatureErrorKind::UnknownTypeCode(
                    code,
                )))
            }
        }
    }
}

/// Validate a dict entry starting at the opening brace at `i`.
const fn dict_entry(
    sig: &[u8],
    i: usize,
    structs: usize,
    arrays: usize,
) -> Result<usize, SignatureError> {
    if structs + arrays == MAX_DEPTH {
        return Err(SignatureError::new(
            SignatureErrorKind::ExceededMaximumContainerDepth,
        ));
    }

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

    if !is_basic_code(sig[j]) {
        return Err(SignatureError::new(
            SignatureErrorKind::DictKeyMustBeBasicType,
        ));
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

    j = match complete_type(sig, j, structs + 1, arrays) {
        Ok(j) => j,
        Err(error) => return Err(error),
    };

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
