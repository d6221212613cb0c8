/// Validate an object path.
///
/// A valid path is non-empty, begins with `/`, has elements made up of
/// `[A-Za-z0-9_]`, contains no empty elements, and does not end with `/`
/// unless the whole path is `/`.
pub(super) const fn validate(bytes: &[u8]) -> bool {
    let [b'/', rest @ ..] = bytes else {
        return false;
    };

    // Special case: "/" is a valid path.
    if rest.is_empty() {
        return true;
    }

    let mut bytes = rest;
    let mut component = false;

    while let [b, rest @ ..] = bytes {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'_' => {
                component = true;
            }
            b'/' => {
                if !component {
                    return false;
                }

                component = false;
            }
            _ => {
                return false;
            }
        }

        bytes = rest;
    }

    component
}
