use serde::{Deserialize, Serialize};

use crate::blend::{BlendEdit, encode, resolve_blend_set};
use crate::error::{ToolkitError, ToolkitResult};
use crate::model::{
    EditMode, FssConfig, HtmlBlend, LayerBlend, LayerDef, Model, RenderMode, product_by_id,
};

/// Numeric control of a layer, bounded by a [`FieldDomain`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    FacesX,
    FacesY,
    LightSpeed,
    Iris,
    Vignette,
    AmplitudeX,
    AmplitudeY,
    AmplitudeZ,
    Opacity,
    Hue,
    Saturation,
    Brightness,
}

impl Field {
    pub const ALL: &[Field] = &[
        Field::FacesX,
        Field::FacesY,
        Field::LightSpeed,
        Field::Iris,
        Field::Vignette,
        Field::AmplitudeX,
        Field::AmplitudeY,
        Field::AmplitudeZ,
        Field::Opacity,
        Field::Hue,
        Field::Saturation,
        Field::Brightness,
    ];

    /// Panel label, without the layer index suffix.
    pub fn name(self) -> &'static str {
        match self {
            Field::FacesX => "facesX",
            Field::FacesY => "facesY",
            Field::LightSpeed => "lightSpeed",
            Field::Iris => "iris",
            Field::Vignette => "vignette",
            Field::AmplitudeX => "amplitudeX",
            Field::AmplitudeY => "amplitudeY",
            Field::AmplitudeZ => "amplitudeZ",
            Field::Opacity => "opacity",
            Field::Hue => "hue",
            Field::Saturation => "saturation",
            Field::Brightness => "brightness",
        }
    }

    pub fn domain(self, mode: EditMode) -> FieldDomain {
        match self {
            Field::FacesX | Field::FacesY => FieldDomain::new(1.0, mode.max_faces() as f32, 1.0),
            Field::LightSpeed => FieldDomain::new(100.0, 1140.0, 1.0),
            Field::Iris
            | Field::Vignette
            | Field::AmplitudeX
            | Field::AmplitudeY
            | Field::AmplitudeZ
            | Field::Opacity => FieldDomain::UNIT,
            Field::Hue | Field::Saturation | Field::Brightness => FieldDomain::SIGNED,
        }
    }

    /// Current slider value of this field in `fss`.
    pub fn value_of(self, fss: &FssConfig) -> f32 {
        match self {
            Field::FacesX => fss.faces[0] as f32,
            Field::FacesY => fss.faces[1] as f32,
            Field::LightSpeed => fss.light_speed as f32,
            Field::Iris => fss.iris,
            Field::Vignette => fss.vignette,
            Field::AmplitudeX => fss.amplitude[0],
            Field::AmplitudeY => fss.amplitude[1],
            Field::AmplitudeZ => fss.amplitude[2],
            Field::Opacity => fss.opacity,
            Field::Hue => fss.color_shift[0],
            Field::Saturation => fss.color_shift[1],
            Field::Brightness => fss.color_shift[2],
        }
    }
}

/// Inclusive bounds and step of a slider.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldDomain {
    pub min: f32,
    pub max: f32,
    pub step: f32,
}

impl FieldDomain {
    pub const UNIT: FieldDomain = FieldDomain::new(0.0, 1.0, 0.01);
    pub const SIGNED: FieldDomain = FieldDomain::new(-1.0, 1.0, 0.01);

    pub const fn new(min: f32, max: f32, step: f32) -> Self {
        Self { min, max, step }
    }

    /// Snap to the step grid anchored at `min`, then clamp into range.
    pub fn normalize(&self, value: f32) -> ToolkitResult<f32> {
        if !value.is_finite() {
            return Err(ToolkitError::config_range(format!(
                "value {value} is not a finite number"
            )));
        }
        let snapped = if self.step > 0.0 {
            self.min + ((value - self.min) / self.step).round() * self.step
        } else {
            value
        };
        Ok(snapped.clamp(self.min, self.max))
    }
}

/// One change made through the panel to a single layer.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldEdit {
    Number(Field, f32),
    Visible(bool),
    Mirror(bool),
    AmbientLight(bool),
    RenderMode(RenderMode),
    Palette(Option<Vec<String>>),
    /// Advanced mode blend slot or color.
    Blend(BlendEdit),
    /// Production mode blend set selection.
    BlendSet(String),
    HtmlBlend(HtmlBlend),
}

/// Global controls shared by every layer.
#[derive(Debug, Clone, PartialEq)]
pub enum GlobalEdit {
    Omega(f32),
    Product(String),
}

/// Omega slider bounds.
pub const OMEGA_DOMAIN: FieldDomain = FieldDomain::SIGNED;

/// Apply one panel edit to a copy of `layer`.
///
/// Numbers are snapped and clamped into their domain. Blend edits must fit
/// the layer's blend flavor: slot edits need a WebGL descriptor, set
/// selection needs a WebGL layer, HTML modes need an HTML layer.
pub fn apply_edit(layer: &LayerDef, mode: EditMode, edit: FieldEdit) -> ToolkitResult<LayerDef> {
    let mut next = layer.clone();
    match edit {
        FieldEdit::Visible(v) => next.visible = v,
        FieldEdit::Blend(edit) => {
            let LayerBlend::WebGl(prior) = &layer.blend else {
                return Err(mismatch(layer, "blend slot edits"));
            };
            next.blend = LayerBlend::WebGl(encode(&edit, prior)?);
        }
        FieldEdit::BlendSet(name) => {
            if !layer.kind.is_webgl() {
                return Err(mismatch(layer, "blend sets"));
            }
            let set = resolve_blend_set(&name)?;
            next.blend = LayerBlend::Preset {
                set: set.name.to_string(),
                color: layer.blend.color(),
            };
        }
        FieldEdit::HtmlBlend(html) => {
            if layer.kind.is_webgl() {
                return Err(mismatch(layer, "HTML blend modes"));
            }
            next.blend = LayerBlend::Html { mode: html };
        }
        FieldEdit::Number(field, value) => {
            let v = field.domain(mode).normalize(value)?;
            let fss = mesh_mut(&mut next)?;
            match field {
                Field::FacesX => fss.faces[0] = v as u32,
                Field::FacesY => fss.faces[1] = v as u32,
                Field::LightSpeed => fss.light_speed = v as u32,
                Field::Iris => fss.iris = v,
                Field::Vignette => fss.vignette = v,
                Field::AmplitudeX => fss.amplitude[0] = v,
                Field::AmplitudeY => fss.amplitude[1] = v,
                Field::AmplitudeZ => fss.amplitude[2] = v,
                Field::Opacity => fss.opacity = v,
                Field::Hue => fss.color_shift[0] = v,
                Field::Saturation => fss.color_shift[1] = v,
                Field::Brightness => fss.color_shift[2] = v,
            }
        }
        FieldEdit::Mirror(v) => mesh_mut(&mut next)?.mirror = v,
        FieldEdit::AmbientLight(v) => mesh_mut(&mut next)?.ambient_light = v,
        FieldEdit::RenderMode(r) => mesh_mut(&mut next)?.render_mode = r,
        FieldEdit::Palette(p) => mesh_mut(&mut next)?.palette = p,
    }
    Ok(next)
}

/// Apply a global edit to a copy of `model`.
pub fn apply_global_edit(model: &Model, edit: GlobalEdit) -> ToolkitResult<Model> {
    let mut next = model.clone();
    match edit {
        GlobalEdit::Omega(v) => next.omega = OMEGA_DOMAIN.normalize(v)?,
        GlobalEdit::Product(id) => next.product = product_by_id(&id)?.id.to_string(),
    }
    Ok(next)
}

fn mesh_mut(layer: &mut LayerDef) -> ToolkitResult<&mut FssConfig> {
    let kind = layer.kind;
    layer
        .model
        .as_mut()
        .ok_or_else(|| ToolkitError::config_range(format!("{kind} layers have no mesh fields")))
}

fn mismatch(layer: &LayerDef, what: &str) -> ToolkitError {
    ToolkitError::config_range(format!("{} layers do not take {what}", layer.kind))
}
