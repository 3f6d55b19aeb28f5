use serde::{Deserialize, Serialize};

use crate::color::Rgba;
use crate::error::ToolkitResult;
use crate::model::LayerBlend;

use super::sets::{BlendSet, resolve_blend_set};
use super::vocab::{BlendFactor, BlendFunc, BlendKind, name_to_code};

/// Blend state exchanged with the renderer: one equation for color, one for alpha.
/// Each equation is `[fn, factor0, factor1]` in integer codes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlendDescriptor {
    pub color: Option<Rgba>,
    pub color_eq: [u8; 3],
    pub alpha_eq: [u8; 3],
}

impl Default for BlendDescriptor {
    fn default() -> Self {
        Self {
            color: None,
            color_eq: [0, 1, 0],
            alpha_eq: [0, 1, 0],
        }
    }
}

/// One editable slot of an advanced-mode descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BlendField {
    ColorEqFn,
    ColorEqFactor0,
    ColorEqFactor1,
    AlphaEqFn,
    AlphaEqFactor0,
    AlphaEqFactor1,
}

impl BlendField {
    pub const ALL: [BlendField; 6] = [
        BlendField::ColorEqFn,
        BlendField::ColorEqFactor0,
        BlendField::ColorEqFactor1,
        BlendField::AlphaEqFn,
        BlendField::AlphaEqFactor0,
        BlendField::AlphaEqFactor1,
    ];

    pub fn kind(self) -> BlendKind {
        match self {
            BlendField::ColorEqFn | BlendField::AlphaEqFn => BlendKind::Equation,
            _ => BlendKind::Factor,
        }
    }

    fn slot(self) -> (bool, usize) {
        match self {
            BlendField::ColorEqFn => (true, 0),
            BlendField::ColorEqFactor0 => (true, 1),
            BlendField::ColorEqFactor1 => (true, 2),
            BlendField::AlphaEqFn => (false, 0),
            BlendField::AlphaEqFactor0 => (false, 1),
            BlendField::AlphaEqFactor1 => (false, 2),
        }
    }
}

/// Flat advanced-mode fields as the control panel shows them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlendFields {
    pub color: Option<Rgba>,
    pub color_eq_fn: BlendFunc,
    pub color_eq_factor0: BlendFactor,
    pub color_eq_factor1: BlendFactor,
    pub alpha_eq_fn: BlendFunc,
    pub alpha_eq_factor0: BlendFactor,
    pub alpha_eq_factor1: BlendFactor,
}

impl BlendFields {
    /// Canonical name currently held by `field`.
    pub fn name_of(&self, field: BlendField) -> &'static str {
        match field {
            BlendField::ColorEqFn => self.color_eq_fn.name(),
            BlendField::ColorEqFactor0 => self.color_eq_factor0.name(),
            BlendField::ColorEqFactor1 => self.color_eq_factor1.name(),
            BlendField::AlphaEqFn => self.alpha_eq_fn.name(),
            BlendField::AlphaEqFactor0 => self.alpha_eq_factor0.name(),
            BlendField::AlphaEqFactor1 => self.alpha_eq_factor1.name(),
        }
    }
}

/// A single change coming from the panel.
#[derive(Debug, Clone, PartialEq)]
pub enum BlendEdit {
    /// A blend slot set to a canonical name (`"srcColor"`, `"customAdd"`, ...).
    Field(BlendField, String),
    Color(Option<Rgba>),
}

/// Descriptor to flat fields. Fails on codes outside the vocabulary.
pub fn decode(descriptor: &BlendDescriptor) -> ToolkitResult<BlendFields> {
    let [cf, c0, c1] = descriptor.color_eq;
    let [af, a0, a1] = descriptor.alpha_eq;
    Ok(BlendFields {
        color: descriptor.color,
        color_eq_fn: BlendFunc::from_code(cf)?,
        color_eq_factor0: BlendFactor::from_code(c0)?,
        color_eq_factor1: BlendFactor::from_code(c1)?,
        alpha_eq_fn: BlendFunc::from_code(af)?,
        alpha_eq_factor0: BlendFactor::from_code(a0)?,
        alpha_eq_factor1: BlendFactor::from_code(a1)?,
    })
}

/// Full descriptor from flat fields.
pub fn encode_fields(fields: &BlendFields) -> BlendDescriptor {
    BlendDescriptor {
        color: fields.color,
        color_eq: [
            fields.color_eq_fn.code(),
            fields.color_eq_factor0.code(),
            fields.color_eq_factor1.code(),
        ],
        alpha_eq: [
            fields.alpha_eq_fn.code(),
            fields.alpha_eq_factor0.code(),
            fields.alpha_eq_factor1.code(),
        ],
    }
}

/// Merge one edited field into `prior`, leaving every other slot untouched.
pub fn encode(edit: &BlendEdit, prior: &BlendDescriptor) -> ToolkitResult<BlendDescriptor> {
    let mut next = *prior;
    match edit {
        BlendEdit::Color(color) => next.color = *color,
        BlendEdit::Field(field, name) => {
            let code = name_to_code(field.kind(), name)?;
            let (is_color, slot) = field.slot();
            if is_color {
                next.color_eq[slot] = code;
            } else {
                next.alpha_eq[slot] = code;
            }
        }
    }
    Ok(next)
}

/// Expand a production-mode preset. Missing color falls back to opaque red.
pub fn encode_preset(name: &str, current_color: Option<Rgba>) -> ToolkitResult<BlendDescriptor> {
    let set = resolve_blend_set(name)?;
    Ok(BlendDescriptor {
        color: Some(current_color.unwrap_or(Rgba::OPAQUE_RED)),
        color_eq: set.color_codes()?,
        alpha_eq: set.alpha_codes()?,
    })
}

/// Name of the first library set whose expansion equals these equations.
pub fn match_preset(descriptor: &BlendDescriptor) -> Option<&'static str> {
    BlendSet::all()
        .iter()
        .find(|set| {
            set.color_codes().ok() == Some(descriptor.color_eq)
                && set.alpha_codes().ok() == Some(descriptor.alpha_eq)
        })
        .map(|set| set.name)
}

/// Selected set name of a layer blend: the stored preset, or the set a
/// free-form descriptor happens to match.
pub fn decode_preset(blend: &LayerBlend) -> Option<&str> {
    match blend {
        LayerBlend::Preset { set, .. } => Some(set.as_str()),
        LayerBlend::WebGl(d) => match_preset(d),
        LayerBlend::Html { .. } => None,
    }
}
