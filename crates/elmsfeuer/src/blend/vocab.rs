use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ToolkitError, ToolkitResult};

/// Which half of the blend vocabulary a lookup targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlendKind {
    Equation,
    Factor,
}

impl BlendKind {
    pub(crate) fn label(self) -> &'static str {
        match self {
            BlendKind::Equation => "blend equation",
            BlendKind::Factor => "blend factor",
        }
    }
}

/// Blend equation function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum BlendFunc {
    #[default]
    CustomAdd = 0,
    CustomSubtract = 1,
    ReverseSubtract = 2,
}

impl BlendFunc {
    pub const ALL: [BlendFunc; 3] = [
        BlendFunc::CustomAdd,
        BlendFunc::CustomSubtract,
        BlendFunc::ReverseSubtract,
    ];

    pub fn token(self) -> &'static str {
        match self {
            BlendFunc::CustomAdd => "+",
            BlendFunc::CustomSubtract => "-",
            BlendFunc::ReverseSubtract => "R-",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            BlendFunc::CustomAdd => "customAdd",
            BlendFunc::CustomSubtract => "customSubtract",
            BlendFunc::ReverseSubtract => "reverseSubtract",
        }
    }

    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn from_token(token: &str) -> ToolkitResult<Self> {
        Self::ALL
            .into_iter()
            .find(|f| f.token() == token)
            .ok_or_else(|| ToolkitError::lookup("blend equation token", token))
    }

    pub fn from_name(name: &str) -> ToolkitResult<Self> {
        Self::ALL
            .into_iter()
            .find(|f| f.name() == name)
            .ok_or_else(|| ToolkitError::lookup("blend equation name", name))
    }

    pub fn from_code(code: u8) -> ToolkitResult<Self> {
        Self::ALL
            .get(code as usize)
            .copied()
            .ok_or_else(|| ToolkitError::lookup("blend equation code", code))
    }
}

impl fmt::Display for BlendFunc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Blend factor, in the fixed order that defines its integer code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum BlendFactor {
    Zero = 0,
    #[default]
    One = 1,
    SrcColor = 2,
    OneMinusSrcColor = 3,
    DstColor = 4,
    OneMinusDstColor = 5,
    SrcAlpha = 6,
    OneMinusSrcAlpha = 7,
    DstAlpha = 8,
    OneMinusDstAlpha = 9,
    SrcAlphaSaturate = 10,
    ConstantColor = 11,
    OneMinusConstantColor = 12,
    ConstantAlpha = 13,
    OneMinusConstantAlpha = 14,
}

impl BlendFactor {
    pub const ALL: [BlendFactor; 15] = [
        BlendFactor::Zero,
        BlendFactor::One,
        BlendFactor::SrcColor,
        BlendFactor::OneMinusSrcColor,
        BlendFactor::DstColor,
        BlendFactor::OneMinusDstColor,
        BlendFactor::SrcAlpha,
        BlendFactor::OneMinusSrcAlpha,
        BlendFactor::DstAlpha,
        BlendFactor::OneMinusDstAlpha,
        BlendFactor::SrcAlphaSaturate,
        BlendFactor::ConstantColor,
        BlendFactor::OneMinusConstantColor,
        BlendFactor::ConstantAlpha,
        BlendFactor::OneMinusConstantAlpha,
    ];

    pub fn token(self) -> &'static str {
        match self {
            BlendFactor::Zero => "0",
            BlendFactor::One => "1",
            BlendFactor::SrcColor => "sC",
            BlendFactor::OneMinusSrcColor => "1-sC",
            BlendFactor::DstColor => "dC",
            BlendFactor::OneMinusDstColor => "1-dC",
            BlendFactor::SrcAlpha => "sA",
            BlendFactor::OneMinusSrcAlpha => "1-sA",
            BlendFactor::DstAlpha => "dA",
            BlendFactor::OneMinusDstAlpha => "1-dA",
            BlendFactor::SrcAlphaSaturate => "AS",
            BlendFactor::ConstantColor => "CC",
            BlendFactor::OneMinusConstantColor => "1-CC",
            BlendFactor::ConstantAlpha => "CA",
            BlendFactor::OneMinusConstantAlpha => "1-CA",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            BlendFactor::Zero => "zero",
            BlendFactor::One => "one",
            BlendFactor::SrcColor => "srcColor",
            BlendFactor::OneMinusSrcColor => "oneMinusSrcColor",
            BlendFactor::DstColor => "dstColor",
            BlendFactor::OneMinusDstColor => "oneMinusDstColor",
            BlendFactor::SrcAlpha => "srcAlpha",
            BlendFactor::OneMinusSrcAlpha => "oneMinusSrcAlpha",
            BlendFactor::DstAlpha => "dstAlpha",
            BlendFactor::OneMinusDstAlpha => "oneMinusDstAlpha",
            BlendFactor::SrcAlphaSaturate => "srcAlphaSaturate",
            BlendFactor::ConstantColor => "constantColor",
            BlendFactor::OneMinusConstantColor => "oneMinusConstantColor",
            BlendFactor::ConstantAlpha => "constantAlpha",
            BlendFactor::OneMinusConstantAlpha => "oneMinusConstantAlpha",
        }
    }

    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn from_token(token: &str) -> ToolkitResult<Self> {
        Self::ALL
            .into_iter()
            .find(|f| f.token() == token)
            .ok_or_else(|| ToolkitError::lookup("blend factor token", token))
    }

    pub fn from_name(name: &str) -> ToolkitResult<Self> {
        Self::ALL
            .into_iter()
            .find(|f| f.name() == name)
            .ok_or_else(|| ToolkitError::lookup("blend factor name", name))
    }

    pub fn from_code(code: u8) -> ToolkitResult<Self> {
        Self::ALL
            .get(code as usize)
            .copied()
            .ok_or_else(|| ToolkitError::lookup("blend factor code", code))
    }
}

impl fmt::Display for BlendFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// String-level lookups used by the panel, which only ever sees tokens and names.

pub fn token_to_name(kind: BlendKind, token: &str) -> ToolkitResult<&'static str> {
    match kind {
        BlendKind::Equation => BlendFunc::from_token(token).map(BlendFunc::name),
        BlendKind::Factor => BlendFactor::from_token(token).map(BlendFactor::name),
    }
}

pub fn name_to_token(kind: BlendKind, name: &str) -> ToolkitResult<&'static str> {
    match kind {
        BlendKind::Equation => BlendFunc::from_name(name).map(BlendFunc::token),
        BlendKind::Factor => BlendFactor::from_name(name).map(BlendFactor::token),
    }
}

pub fn name_to_code(kind: BlendKind, name: &str) -> ToolkitResult<u8> {
    match kind {
        BlendKind::Equation => BlendFunc::from_name(name).map(BlendFunc::code),
        BlendKind::Factor => BlendFactor::from_name(name).map(BlendFactor::code),
    }
}

pub fn code_to_name(kind: BlendKind, code: u8) -> ToolkitResult<&'static str> {
    match kind {
        BlendKind::Equation => BlendFunc::from_code(code).map(BlendFunc::name),
        BlendKind::Factor => BlendFactor::from_code(code).map(BlendFactor::name),
    }
}

pub fn token_to_code(kind: BlendKind, token: &str) -> ToolkitResult<u8> {
    name_to_code(kind, token_to_name(kind, token)?)
}

/// Number of codes in each closed enumeration.
pub fn code_count(kind: BlendKind) -> usize {
    match kind {
        BlendKind::Equation => BlendFunc::ALL.len(),
        BlendKind::Factor => BlendFactor::ALL.len(),
    }
}
