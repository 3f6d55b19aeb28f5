//! Random walks over the whole configuration space.
//!
//! Every randomized value is written twice: into the returned model and into
//! the panel mirror, so the panel never shows a stale value.

use rand::Rng;

use crate::blend::{BlendFactor, BlendFields, BlendFunc, BlendSet, encode_fields};
use crate::error::{ToolkitError, ToolkitResult};
use crate::model::{EditMode, FssConfig, LayerBlend, LayerDef, Model, Product, RenderMode};
use crate::panel::{BlendPanel, LayerFields, PanelMirror};

/// Randomize the global controls and every layer of a copy of `model`.
///
/// Layers are visited in ascending index order. `refresh` runs once, after
/// both the copy and `mirror` hold the new values.
pub fn randomize_all<R: Rng + ?Sized>(
    model: &Model,
    mirror: &mut PanelMirror,
    rng: &mut R,
    refresh: impl FnOnce(),
) -> Model {
    let mut next = model.clone();

    next.omega = rng.random_range(-1.0..1.0);
    let products = Product::all();
    next.product = products[rng.random_range(0..products.len())].id.to_string();
    mirror.omega = next.omega;
    mirror.product.clone_from(&next.product);

    let mode = next.mode;
    for (index, layer) in next.layers.iter_mut().enumerate() {
        let fields = randomize_layer_def(layer, mode, rng);
        mirror.layers.insert(index, fields);
    }
    // Entries beyond the layer stack belong to removed layers.
    mirror.layers.retain(|i, _| *i < next.layers.len());

    log::debug!(
        "Randomized {} layers, product '{}', omega {:.3}",
        next.layers.len(),
        next.product,
        next.omega
    );
    refresh();
    next
}

/// Randomize a single layer of a copy of `model`, leaving globals alone.
pub fn randomize_layer<R: Rng + ?Sized>(
    model: &Model,
    index: usize,
    mirror: &mut PanelMirror,
    rng: &mut R,
    refresh: impl FnOnce(),
) -> ToolkitResult<Model> {
    let mut next = model.clone();
    let mode = next.mode;
    let layer = next
        .layers
        .get_mut(index)
        .ok_or_else(|| ToolkitError::lookup("layer", index))?;
    let fields = randomize_layer_def(layer, mode, rng);
    mirror.layers.insert(index, fields);
    refresh();
    Ok(next)
}

fn randomize_layer_def<R: Rng + ?Sized>(
    layer: &mut LayerDef,
    mode: EditMode,
    rng: &mut R,
) -> LayerFields {
    if let Some(fss) = layer.model.as_mut() {
        randomize_fss(fss, mode, rng);
    }

    let blend = if layer.kind.is_webgl() {
        match mode {
            EditMode::Advanced => {
                let fields = random_blend_fields(rng);
                layer.blend = LayerBlend::WebGl(encode_fields(&fields));
                BlendPanel::Advanced(fields)
            }
            EditMode::Production => {
                let set = BlendSet::NAMES[rng.random_range(0..BlendSet::NAMES.len())];
                let color = layer.blend.color();
                layer.blend = LayerBlend::Preset {
                    set: set.to_string(),
                    color,
                };
                BlendPanel::Production {
                    set: set.to_string(),
                    color,
                }
            }
        }
    } else {
        match &layer.blend {
            LayerBlend::Html { mode } => BlendPanel::Html { mode: *mode },
            _ => {
                layer.blend = LayerBlend::initial(layer.kind, mode);
                BlendPanel::Html {
                    mode: Default::default(),
                }
            }
        }
    };

    LayerFields {
        kind: layer.kind,
        visible: layer.visible,
        fss: layer.model.clone(),
        blend,
    }
}

fn randomize_fss<R: Rng + ?Sized>(fss: &mut FssConfig, mode: EditMode, rng: &mut R) {
    let production = mode == EditMode::Production;
    fss.mirror = rng.random_bool(0.5);
    fss.light_speed = rng.random_range(100..1140);
    fss.render_mode = RenderMode::ALL[rng.random_range(0..RenderMode::ALL.len())];
    let max_faces = mode.max_faces();
    fss.faces = [rng.random_range(1..=max_faces), rng.random_range(1..=max_faces)];
    fss.iris = rng.random();
    fss.vignette = rng.random();
    fss.amplitude = [rng.random(), rng.random(), rng.random()];
    fss.opacity = if production { 1.0 } else { rng.random() };
    let hue = if production {
        0.0
    } else {
        rng.random_range(-1.0..1.0)
    };
    fss.color_shift = [hue, rng.random_range(-1.0..1.0), rng.random_range(-1.0..1.0)];
}

/// Independent uniform draws for all six slots; no blend color.
fn random_blend_fields<R: Rng + ?Sized>(rng: &mut R) -> BlendFields {
    let mut func = || BlendFunc::ALL[rng.random_range(0..BlendFunc::ALL.len())];
    let (color_eq_fn, alpha_eq_fn) = (func(), func());
    let mut factor = || BlendFactor::ALL[rng.random_range(0..BlendFactor::ALL.len())];
    BlendFields {
        color: None,
        color_eq_fn,
        color_eq_factor0: factor(),
        color_eq_factor1: factor(),
        alpha_eq_fn,
        alpha_eq_factor0: factor(),
        alpha_eq_factor1: factor(),
    }
}
