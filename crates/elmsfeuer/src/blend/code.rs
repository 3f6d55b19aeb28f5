//! Compact textual form of a layer stack's blends, as carried in the page hash
//! (`#blends=021010:010010:_`).
//!
//! Each WebGL layer is six lowercase hex digits, `fn f0 f1` for color then alpha.
//! Layers without a WebGL blend are `_`. The explicit blend color is not encoded.

use crate::error::{ToolkitError, ToolkitResult};

use super::codec::{BlendDescriptor, decode};
use super::vocab::{BlendKind, code_count};

const EMPTY_SLOT: &str = "_";

/// Fails when a descriptor holds a code outside the vocabulary.
pub fn encode_blend_code(blends: &[Option<BlendDescriptor>]) -> ToolkitResult<String> {
    let slots = blends
        .iter()
        .map(|slot| match slot {
            Some(d) => {
                decode(d)?;
                Ok(d.color_eq
                    .iter()
                    .chain(d.alpha_eq.iter())
                    .filter_map(|code| char::from_digit(u32::from(*code), 16))
                    .collect())
            }
            None => Ok(EMPTY_SLOT.to_string()),
        })
        .collect::<ToolkitResult<Vec<String>>>()?;
    Ok(slots.join(":"))
}

/// Parse a code produced by [`encode_blend_code`]. Decoded descriptors carry no color.
pub fn decode_blend_code(code: &str) -> ToolkitResult<Vec<Option<BlendDescriptor>>> {
    let code = code.strip_prefix("#blends=").unwrap_or(code);
    if code.is_empty() {
        return Ok(Vec::new());
    }
    code.split(':').map(decode_slot).collect()
}

fn decode_slot(slot: &str) -> ToolkitResult<Option<BlendDescriptor>> {
    if slot == EMPTY_SLOT {
        return Ok(None);
    }
    let digits: Vec<char> = slot.chars().collect();
    if digits.len() != 6 {
        return Err(ToolkitError::lookup("blend code slot", slot));
    }
    let mut codes = [0u8; 6];
    for (i, ch) in digits.iter().enumerate() {
        let kind = if i % 3 == 0 {
            BlendKind::Equation
        } else {
            BlendKind::Factor
        };
        let value = ch
            .to_digit(16)
            .filter(|v| (*v as usize) < code_count(kind))
            .ok_or_else(|| ToolkitError::lookup(kind.label(), ch))?;
        codes[i] = value as u8;
    }
    Ok(Some(BlendDescriptor {
        color: None,
        color_eq: [codes[0], codes[1], codes[2]],
        alpha_eq: [codes[3], codes[4], codes[5]],
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blend::codec::encode_preset;

    #[test]
    fn encodes_hex_digits_per_slot() {
        let d = BlendDescriptor {
            color: None,
            color_eq: [2, 14, 10],
            alpha_eq: [0, 1, 0],
        };
        assert_eq!(encode_blend_code(&[Some(d), None]).unwrap(), "2ea010:_");
    }

    #[test]
    fn decode_accepts_hash_prefix() {
        let decoded = decode_blend_code("#blends=021010:_").unwrap();
        assert_eq!(decoded.len(), 2);
        let caustic = encode_preset("caustic", None).unwrap();
        let first = decoded[0].unwrap();
        assert_eq!(first.color_eq, caustic.color_eq);
        assert_eq!(first.alpha_eq, caustic.alpha_eq);
        assert!(first.color.is_none());
        assert!(decoded[1].is_none());
    }

    #[test]
    fn roundtrip_without_color() {
        let blends = vec![
            Some(BlendDescriptor {
                color: None,
                color_eq: [1, 3, 12],
                alpha_eq: [2, 8, 13],
            }),
            None,
            Some(BlendDescriptor::default()),
        ];
        let code = encode_blend_code(&blends).unwrap();
        assert_eq!(decode_blend_code(&code).unwrap(), blends);
    }

    #[test]
    fn encode_rejects_invalid_descriptor() {
        let bad = BlendDescriptor {
            color: None,
            color_eq: [0, 15, 0],
            alpha_eq: [0, 1, 0],
        };
        assert!(encode_blend_code(&[Some(bad)]).unwrap_err().is_lookup());
    }

    #[test]
    fn empty_code_is_empty_stack() {
        assert!(decode_blend_code("").unwrap().is_empty());
    }

    #[test]
    fn rejects_out_of_vocabulary_digits() {
        // equation slot only accepts 0..=2
        assert!(decode_blend_code("310010").unwrap_err().is_lookup());
        // factor slot only accepts 0..=e
        assert!(decode_blend_code("0f1010").unwrap_err().is_lookup());
        assert!(decode_blend_code("01001").unwrap_err().is_lookup());
        assert!(decode_blend_code("0x1010").unwrap_err().is_lookup());
    }
}
