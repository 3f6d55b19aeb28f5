use crate::error::{ToolkitError, ToolkitResult};

use super::vocab::{BlendFactor, BlendFunc};

/// `[fn, factor0, factor1]` in symbolic tokens.
pub type TokenTriple = [&'static str; 3];

/// Named blend preset used by production mode.
/// The second triple is the alpha equation; all shipped sets except `soft` pass alpha through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlendSet {
    pub name: &'static str,
    pub color: TokenTriple,
    pub alpha: TokenTriple,
}

const PASS: TokenTriple = ["+", "1", "0"];

const BLEND_SETS: &[BlendSet] = &[
    BlendSet { name: "normal", color: ["+", "1", "0"], alpha: PASS },
    BlendSet { name: "soft", color: ["+", "sC", "1-sC"], alpha: ["+", "sC", "1-sC"] },
    BlendSet { name: "caustic", color: ["+", "sC", "1"], alpha: PASS },
    BlendSet { name: "kobold", color: ["+", "sC", "0"], alpha: PASS },
    BlendSet { name: "crystal", color: ["+", "sC", "sC"], alpha: PASS },
    BlendSet { name: "dark swan", color: ["+", "0", "sC"], alpha: PASS },
    BlendSet { name: "chromatic", color: ["+", "1", "1-CC"], alpha: PASS },
    BlendSet { name: "opalescent", color: ["+", "sC", "1-CC"], alpha: PASS },
    BlendSet { name: "plastic", color: ["+", "sC", "AS"], alpha: PASS },
    BlendSet { name: "oz", color: ["-", "1", "1"], alpha: PASS },
    BlendSet { name: "smokey", color: ["-", "1", "sC"], alpha: PASS },
    BlendSet { name: "shining", color: ["-", "1", "CC"], alpha: PASS },
    BlendSet { name: "mist", color: ["-", "1-sC", "1-dA"], alpha: PASS },
    BlendSet { name: "elmo", color: ["R-", "sC", "sA"], alpha: PASS },
];

impl BlendSet {
    /// Library names in display order.
    pub const NAMES: [&'static str; 14] = [
        "normal",
        "soft",
        "caustic",
        "kobold",
        "crystal",
        "dark swan",
        "chromatic",
        "opalescent",
        "plastic",
        "oz",
        "smokey",
        "shining",
        "mist",
        "elmo",
    ];

    pub fn all() -> &'static [BlendSet] {
        BLEND_SETS
    }

    pub fn tokens(&self) -> [TokenTriple; 2] {
        [self.color, self.alpha]
    }

    pub fn color_codes(&self) -> ToolkitResult<[u8; 3]> {
        triple_codes(self.color)
    }

    pub fn alpha_codes(&self) -> ToolkitResult<[u8; 3]> {
        triple_codes(self.alpha)
    }
}

/// Look up a preset by its library name.
pub fn resolve_blend_set(name: &str) -> ToolkitResult<&'static BlendSet> {
    BLEND_SETS
        .iter()
        .find(|set| set.name == name)
        .ok_or_else(|| ToolkitError::lookup("blend set", name))
}

fn triple_codes(triple: TokenTriple) -> ToolkitResult<[u8; 3]> {
    Ok([
        BlendFunc::from_token(triple[0])?.code(),
        BlendFactor::from_token(triple[1])?.code(),
        BlendFactor::from_token(triple[2])?.code(),
    ])
}
