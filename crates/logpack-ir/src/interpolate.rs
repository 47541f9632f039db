//! Logtype interpolation.

use crate::constants::placeholder;
use crate::encoded_var::EncodedVariable;
use crate::error::IrError;

/// Reconstructs a message from a logtype and its variables.
///
/// Walks the logtype left to right, copying static runs verbatim and
/// substituting each placeholder with the rendering of the next unconsumed
/// variable of its kind. An escape byte drops out of the output and makes
/// the byte after it static, even if that byte is a placeholder or another
/// escape. Variables left over after the walk are ignored.
pub(crate) fn interpolate<V: EncodedVariable>(
    logtype: &[u8],
    encoded_vars: &[V],
    dict_vars: &[Vec<u8>],
) -> Result<Vec<u8>, IrError> {
    let mut message = Vec::with_capacity(logtype.len());
    let mut encoded_vars_ix = 0;
    let mut dict_vars_ix = 0;
    let mut segment_start = 0;

    let mut pos = 0;
    while pos < logtype.len() {
        match logtype[pos] {
            placeholder::FLOAT => {
                message.extend_from_slice(&logtype[segment_start..pos]);
                segment_start = pos + 1;
                let var = encoded_vars
                    .get(encoded_vars_ix)
                    .copied()
                    .ok_or(IrError::TooFewEncodedVars)?;
                message.extend_from_slice(var.decode_float_var()?.as_bytes());
                encoded_vars_ix += 1;
            }
            placeholder::INTEGER => {
                message.extend_from_slice(&logtype[segment_start..pos]);
                segment_start = pos + 1;
                let var = encoded_vars
                    .get(encoded_vars_ix)
                    .copied()
                    .ok_or(IrError::TooFewEncodedVars)?;
                message.extend_from_slice(var.decode_integer_var().as_bytes());
                encoded_vars_ix += 1;
            }
            placeholder::DICTIONARY => {
                message.extend_from_slice(&logtype[segment_start..pos]);
                segment_start = pos + 1;
                let var = dict_vars
                    .get(dict_vars_ix)
                    .ok_or(IrError::TooFewDictVars)?;
                message.extend_from_slice(var);
                dict_vars_ix += 1;
            }
            placeholder::ESCAPE => {
                if pos == logtype.len() - 1 {
                    return Err(IrError::TrailingEscape);
                }
                message.extend_from_slice(&logtype[segment_start..pos]);
                // The escaped byte opens the next static run untouched, so
                // none of the placeholder arms above will see it.
                segment_start = pos + 1;
                pos += 1;
            }
            _ => {}
        }
        pos += 1;
    }
    message.extend_from_slice(&logtype[segment_start..]);

    Ok(message)
}

#[cfg(test)]
mod tests {
    use super::*;

    const F: u8 = placeholder::FLOAT;
    const I: u8 = placeholder::INTEGER;
    const D: u8 = placeholder::DICTIONARY;
    const E: u8 = placeholder::ESCAPE;

    fn dict(vars: &[&[u8]]) -> Vec<Vec<u8>> {
        vars.iter().map(|v| v.to_vec()).collect()
    }

    #[test]
    fn static_only_logtype_is_copied() {
        let out = interpolate::<i64>(b"nothing to see", &[], &[]).unwrap();
        assert_eq!(out, b"nothing to see");
    }

    #[test]
    fn empty_logtype() {
        let out = interpolate::<i32>(b"", &[], &[]).unwrap();
        assert_eq!(out, b"");
    }

    #[test]
    fn integer_placeholder_consumes_in_order() {
        let logtype = [b'a', b'=', I, b' ', b'b', b'=', I];
        let out = interpolate::<i32>(&logtype, &[7, -8], &[]).unwrap();
        assert_eq!(out, b"a=7 b=-8");
    }

    #[test]
    fn dictionary_placeholder() {
        let logtype = [b'u', b'=', D];
        let out = interpolate::<i64>(&logtype, &[], &dict(&[b"bob"])).unwrap();
        assert_eq!(out, b"u=bob");
    }

    #[test]
    fn mixed_placeholders_track_separate_indices() {
        // Dictionary and encoded variables come from independent streams.
        let logtype = [D, b' ', I, b' ', D, b' ', I];
        let out = interpolate::<i32>(&logtype, &[1, 2], &dict(&[b"x", b"y"])).unwrap();
        assert_eq!(out, b"x 1 y 2");
    }

    #[test]
    fn escaped_placeholder_is_literal() {
        let logtype = [E, I, b'=', b'0'];
        let out = interpolate::<i64>(&logtype, &[], &[]).unwrap();
        assert_eq!(out, [I, b'=', b'0']);
    }

    #[test]
    fn escaped_escape_is_literal() {
        let logtype = [E, E, I];
        let out = interpolate::<i32>(&logtype, &[5], &[]).unwrap();
        assert_eq!(out, [E, b'5']);
    }

    #[test]
    fn escape_before_ordinary_byte_is_dropped() {
        let logtype = [b'a', E, b'b', b'c'];
        let out = interpolate::<i32>(&logtype, &[], &[]).unwrap();
        assert_eq!(out, b"abc");
    }

    #[test]
    fn trailing_escape_is_an_error() {
        let logtype = [b'a', E];
        assert_eq!(
            interpolate::<i32>(&logtype, &[], &[]),
            Err(IrError::TrailingEscape)
        );
    }

    #[test]
    fn too_few_encoded_vars() {
        let logtype = [I, b' ', I];
        assert_eq!(
            interpolate::<i32>(&logtype, &[1], &[]),
            Err(IrError::TooFewEncodedVars)
        );
    }

    #[test]
    fn too_few_dict_vars() {
        let logtype = [D];
        assert_eq!(
            interpolate::<i64>(&logtype, &[], &[]),
            Err(IrError::TooFewDictVars)
        );
    }

    #[test]
    fn float_placeholder_renders_word() {
        // 3.14 packed into a four-byte word: digits 314, 3 digits, point 2
        // from the right.
        let word = (314 << 6) | (2 << 3) | 1;
        let logtype = [b'v', b'=', F];
        let out = interpolate::<i32>(&logtype, &[word], &[]).unwrap();
        assert_eq!(out, b"v=3.14");
    }

    #[test]
    fn leftover_variables_are_ignored() {
        let logtype = [I];
        let out = interpolate::<i32>(&logtype, &[1, 2, 3], &dict(&[b"unused"])).unwrap();
        assert_eq!(out, b"1");
    }
}
