//! Export and import of the whole model, with each FSS layer's animation
//! state ("scene fuzz") so an imported scene continues where it left off.

use std::collections::BTreeMap;

use rand::Rng;
use serde::{Deserialize, Deserializer, Serialize};

use crate::blend::{BlendDescriptor, decode_blend_code, encode_blend_code};
use crate::error::{ToolkitError, ToolkitResult};
use crate::fss::{FuzzRanges, Scene, VertexFuzz, build_scene};
use crate::model::{EditMode, FssConfig, LayerBlend, LayerDef, LayerKind, Model};

/// Current export document version.
pub const EXPORT_VERSION: u32 = 1;

/// Per-layer scene fuzz keyed by layer index.
pub type LayerFuzz = BTreeMap<usize, Vec<VertexFuzz>>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub mode: EditMode,
    pub product: String,
    #[serde(default)]
    pub omega: f32,
    #[serde(default)]
    pub theta: f32,
    pub size: [f32; 2],
    /// Playback state of the exporting player, kept on [`Model`].
    #[serde(default)]
    pub origin: [f32; 2],
    #[serde(default)]
    pub mouse: [f32; 2],
    #[serde(default)]
    pub now: f64,
    /// Compact blend code of the WebGL layers, as put in `#blends=`.
    #[serde(default)]
    pub blend_code: String,
    pub layers: Vec<ExportLayer>,
}

fn default_version() -> u32 {
    EXPORT_VERSION
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportLayer {
    pub kind: LayerKind,
    pub blend: LayerBlend,
    #[serde(default = "default_visible", alias = "isOn")]
    pub visible: bool,
    /// Older exports carry the model as an encoded JSON string.
    #[serde(default, deserialize_with = "nested_or_encoded")]
    pub model: Option<FssConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scene_fuzz: Option<Vec<VertexFuzz>>,
}

fn default_visible() -> bool {
    true
}

fn nested_or_encoded<'de, D>(deserializer: D) -> Result<Option<FssConfig>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Null => Ok(None),
        serde_json::Value::String(s) => serde_json::from_str(&s).map(Some).map_err(D::Error::custom),
        v => serde_json::from_value(v).map(Some).map_err(D::Error::custom),
    }
}

impl ExportDocument {
    pub fn to_json(&self) -> ToolkitResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> ToolkitResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Build the export document for `model`, taking scene fuzz from `scenes`
/// (keyed by layer index) for every FSS layer that has a built scene.
pub fn export_model(model: &Model, scenes: &BTreeMap<usize, Scene>) -> ToolkitResult<ExportDocument> {
    let layers = model
        .layers
        .iter()
        .enumerate()
        .map(|(index, layer)| ExportLayer {
            kind: layer.kind,
            blend: layer.blend.clone(),
            visible: layer.visible,
            model: layer.model.clone(),
            scene_fuzz: layer
                .kind
                .is_fss()
                .then(|| scenes.get(&index).map(Scene::fuzz))
                .flatten(),
        })
        .collect();

    Ok(ExportDocument {
        version: EXPORT_VERSION,
        mode: model.mode,
        product: model.product.clone(),
        omega: model.omega,
        theta: model.theta,
        size: model.size,
        origin: model.origin,
        mouse: model.mouse,
        now: model.now,
        blend_code: blend_code(model)?,
        layers,
    })
}

/// Code for the WebGL layers of `model`, one slot per layer, `_` for HTML.
pub fn blend_code(model: &Model) -> ToolkitResult<String> {
    let descriptors = model
        .layers
        .iter()
        .map(|l| l.blend.descriptor())
        .collect::<ToolkitResult<Vec<_>>>()?;
    encode_blend_code(&descriptors)
}

/// Parse an export document back into a model and its per-layer fuzz.
///
/// Layer blends are authoritative; a blend code that disagrees with them is
/// reported and ignored.
pub fn import_document(json: &str) -> ToolkitResult<(Model, LayerFuzz)> {
    let doc = ExportDocument::from_json(json)?;
    if doc.version > EXPORT_VERSION {
        log::warn!(
            "Export version {} is newer than supported {}, reading what is known",
            doc.version,
            EXPORT_VERSION
        );
    }

    let mut fuzz = LayerFuzz::new();
    let mut layers = Vec::with_capacity(doc.layers.len());
    for (index, layer) in doc.layers.into_iter().enumerate() {
        if layer.kind.is_fss() && layer.model.is_none() {
            return Err(ToolkitError::config_range(format!(
                "layer {index} is {} but has no model",
                layer.kind
            )));
        }
        if let Some(f) = layer.scene_fuzz {
            fuzz.insert(index, f);
        }
        layers.push(LayerDef {
            kind: layer.kind,
            visible: layer.visible,
            blend: layer.blend,
            model: layer.model,
        });
    }

    let model = Model {
        mode: doc.mode,
        product: doc.product,
        omega: doc.omega,
        theta: doc.theta,
        size: doc.size,
        origin: doc.origin,
        mouse: doc.mouse,
        now: doc.now,
        layers,
    };

    if !doc.blend_code.is_empty() {
        let expected = model
            .layers
            .iter()
            .map(|l| {
                l.blend
                    .descriptor()
                    .map(|d| d.map(|d| BlendDescriptor { color: None, ..d }))
            })
            .collect::<ToolkitResult<Vec<_>>>()?;
        match decode_blend_code(&doc.blend_code) {
            Ok(found) if found == expected => {}
            Ok(_) => log::warn!("Blend code '{}' disagrees with layer blends", doc.blend_code),
            Err(e) => log::warn!("Ignoring unreadable blend code: {e}"),
        }
    }

    log::info!(
        "Imported {} layers ({} with scene fuzz)",
        model.layers.len(),
        fuzz.len()
    );
    Ok((model, fuzz))
}

/// Rebuild the scene of every FSS layer, reusing imported fuzz where present.
pub fn rebuild_scenes<R: Rng + ?Sized>(
    model: &Model,
    fuzz: &LayerFuzz,
    ranges: &FuzzRanges,
    rng: &mut R,
) -> ToolkitResult<BTreeMap<usize, Scene>> {
    let mut scenes = BTreeMap::new();
    for index in model.fss_layers() {
        let Some(fss) = model.layers[index].model.as_ref() else {
            continue;
        };
        let carry = fuzz.get(&index).map(Vec::as_slice);
        let scene = build_scene(model, fss, carry, ranges, rng)?;
        if let Err(e) = scene.carry_over.check() {
            log::warn!("Layer {index}: {e}");
        }
        scenes.insert(index, scene);
    }
    Ok(scenes)
}
