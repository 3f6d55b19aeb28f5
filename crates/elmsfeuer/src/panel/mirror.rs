use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::blend::{BlendFields, decode};
use crate::color::Rgba;
use crate::error::{ToolkitError, ToolkitResult};
use crate::model::{FssConfig, HtmlBlend, LayerBlend, LayerDef, LayerKind, Model};

/// Blend controls of one layer as the panel shows them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum BlendPanel {
    Advanced(BlendFields),
    Production { set: String, color: Option<Rgba> },
    Html { mode: HtmlBlend },
}

impl BlendPanel {
    pub fn from_blend(blend: &LayerBlend) -> ToolkitResult<Self> {
        Ok(match blend {
            LayerBlend::WebGl(d) => BlendPanel::Advanced(decode(d)?),
            LayerBlend::Preset { set, color } => BlendPanel::Production {
                set: set.clone(),
                color: *color,
            },
            LayerBlend::Html { mode } => BlendPanel::Html { mode: *mode },
        })
    }
}

/// Every editable control of one layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerFields {
    pub kind: LayerKind,
    pub visible: bool,
    pub fss: Option<FssConfig>,
    pub blend: BlendPanel,
}

impl LayerFields {
    pub fn from_layer(layer: &LayerDef) -> ToolkitResult<Self> {
        Ok(Self {
            kind: layer.kind,
            visible: layer.visible,
            fss: layer.model.clone(),
            blend: BlendPanel::from_blend(&layer.blend)?,
        })
    }
}

/// Typed copy of the control panel state, keyed by layer index.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PanelMirror {
    pub product: String,
    pub omega: f32,
    pub layers: BTreeMap<usize, LayerFields>,
}

impl PanelMirror {
    pub fn from_model(model: &Model) -> ToolkitResult<Self> {
        let mut mirror = Self {
            product: model.product.clone(),
            omega: model.omega,
            layers: BTreeMap::new(),
        };
        for (index, layer) in model.layers.iter().enumerate() {
            mirror.set_layer(index, layer)?;
        }
        Ok(mirror)
    }

    pub fn set_layer(&mut self, index: usize, layer: &LayerDef) -> ToolkitResult<()> {
        self.layers.insert(index, LayerFields::from_layer(layer)?);
        Ok(())
    }

    pub fn layer(&self, index: usize) -> ToolkitResult<&LayerFields> {
        self.layers
            .get(&index)
            .ok_or_else(|| ToolkitError::lookup("layer", index))
    }

    /// Whether the mirror shows exactly what `model` holds.
    pub fn matches(&self, model: &Model) -> bool {
        PanelMirror::from_model(model).is_ok_and(|m| &m == self)
    }
}
