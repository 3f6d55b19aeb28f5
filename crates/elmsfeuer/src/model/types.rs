use std::fmt;

use serde::{Deserialize, Serialize};

use crate::blend::{BlendDescriptor, BlendSet, encode_preset};
use crate::color::Rgba;
use crate::error::{ToolkitError, ToolkitResult};

use super::product::Product;

/// Free-form editing of every blend slot, or the constrained preset-only mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditMode {
    #[default]
    Advanced,
    #[serde(alias = "prod")]
    Production,
}

impl EditMode {
    /// Exclusive upper bound of the face count per axis.
    pub fn max_faces(self) -> u32 {
        match self {
            EditMode::Advanced => 100,
            EditMode::Production => 50,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LayerKind {
    #[serde(rename = "fss")]
    Fss,
    #[serde(rename = "fss-mirror")]
    FssMirror,
    #[serde(rename = "html")]
    Html,
}

impl LayerKind {
    pub const ALL: &[LayerKind] = &[LayerKind::Fss, LayerKind::FssMirror, LayerKind::Html];

    /// Carries an FSS mesh configuration.
    pub fn is_fss(self) -> bool {
        matches!(self, LayerKind::Fss | LayerKind::FssMirror)
    }

    /// Composited by WebGL, hence blended through a `BlendDescriptor`.
    pub fn is_webgl(self) -> bool {
        self.is_fss()
    }

    pub fn display_name(self) -> &'static str {
        match self {
            LayerKind::Fss => "FSS",
            LayerKind::FssMirror => "FSS Mirror",
            LayerKind::Html => "HTML",
        }
    }
}

impl fmt::Display for LayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    #[default]
    Triangles,
    Lines,
}

impl RenderMode {
    pub const ALL: &[RenderMode] = &[RenderMode::Triangles, RenderMode::Lines];

    pub fn name(self) -> &'static str {
        match self {
            RenderMode::Triangles => "triangles",
            RenderMode::Lines => "lines",
        }
    }
}

/// CSS `mix-blend-mode` for HTML overlay layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HtmlBlend {
    #[default]
    Normal,
    Overlay,
}

impl HtmlBlend {
    pub const ALL: &[HtmlBlend] = &[HtmlBlend::Normal, HtmlBlend::Overlay];

    pub fn name(self) -> &'static str {
        match self {
            HtmlBlend::Normal => "normal",
            HtmlBlend::Overlay => "overlay",
        }
    }
}

/// How a layer is blended onto the ones below it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum LayerBlend {
    /// Advanced mode: explicit equations.
    #[serde(rename = "webgl")]
    WebGl(BlendDescriptor),
    /// Production mode: a named blend set plus the explicit blend color.
    #[serde(rename = "preset")]
    Preset {
        set: String,
        #[serde(default)]
        color: Option<Rgba>,
    },
    #[serde(rename = "html")]
    Html { mode: HtmlBlend },
}

impl LayerBlend {
    /// Initial blend of a freshly created layer.
    pub fn initial(kind: LayerKind, mode: EditMode) -> Self {
        match (kind.is_webgl(), mode) {
            (false, _) => LayerBlend::Html {
                mode: HtmlBlend::Normal,
            },
            (true, EditMode::Advanced) => LayerBlend::WebGl(BlendDescriptor::default()),
            (true, EditMode::Production) => LayerBlend::Preset {
                set: BlendSet::NAMES[0].to_string(),
                color: None,
            },
        }
    }

    /// Descriptor sent to the renderer; `None` for HTML layers.
    pub fn descriptor(&self) -> ToolkitResult<Option<BlendDescriptor>> {
        match self {
            LayerBlend::WebGl(d) => Ok(Some(*d)),
            LayerBlend::Preset { set, color } => encode_preset(set, *color).map(Some),
            LayerBlend::Html { .. } => Ok(None),
        }
    }

    /// Explicit blend color, if the layer carries one.
    pub fn color(&self) -> Option<Rgba> {
        match self {
            LayerBlend::WebGl(d) => d.color,
            LayerBlend::Preset { color, .. } => *color,
            LayerBlend::Html { .. } => None,
        }
    }
}

/// Everything that shapes one FSS layer's mesh and its on-screen treatment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FssConfig {
    #[serde(default = "default_size")]
    pub size: [f32; 2],
    #[serde(default = "default_faces")]
    pub faces: [u32; 2],
    /// `None` uses the model's product palette.
    #[serde(default)]
    pub palette: Option<Vec<String>>,
    #[serde(default = "default_light_speed")]
    pub light_speed: u32,
    #[serde(default)]
    pub render_mode: RenderMode,
    #[serde(default)]
    pub mirror: bool,
    #[serde(default)]
    pub iris: f32,
    #[serde(default = "default_vignette")]
    pub vignette: f32,
    #[serde(default = "default_amplitude")]
    pub amplitude: [f32; 3],
    #[serde(default = "default_opacity")]
    pub opacity: f32,
    /// Hue, saturation, brightness shifts in `[-1, 1]`.
    #[serde(default)]
    pub color_shift: [f32; 3],
    /// Adds a third light.
    #[serde(default)]
    pub ambient_light: bool,
}

fn default_size() -> [f32; 2] {
    [1550.0, 800.0]
}

fn default_faces() -> [u32; 2] {
    [12, 15]
}

fn default_light_speed() -> u32 {
    540
}

fn default_vignette() -> f32 {
    1.0
}

fn default_amplitude() -> [f32; 3] {
    [0.3, 0.3, 0.3]
}

fn default_opacity() -> f32 {
    1.0
}

fn default_true() -> bool {
    true
}

impl Default for FssConfig {
    fn default() -> Self {
        Self {
            size: default_size(),
            faces: default_faces(),
            palette: None,
            light_speed: default_light_speed(),
            render_mode: RenderMode::default(),
            mirror: false,
            iris: 0.0,
            vignette: default_vignette(),
            amplitude: default_amplitude(),
            opacity: default_opacity(),
            color_shift: [0.0; 3],
            ambient_light: false,
        }
    }
}

/// One entry of the layer stack.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerDef {
    pub kind: LayerKind,
    #[serde(default = "default_true", alias = "isOn")]
    pub visible: bool,
    pub blend: LayerBlend,
    #[serde(default)]
    pub model: Option<FssConfig>,
}

impl LayerDef {
    pub fn new(kind: LayerKind, mode: EditMode) -> Self {
        let model = kind.is_fss().then(|| FssConfig {
            mirror: kind == LayerKind::FssMirror,
            ..FssConfig::default()
        });
        Self {
            kind,
            visible: true,
            blend: LayerBlend::initial(kind, mode),
            model,
        }
    }
}

/// The whole application state the core works on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Model {
    #[serde(default)]
    pub mode: EditMode,
    #[serde(default = "default_product")]
    pub product: String,
    /// Global rotation in `[-1, 1]`.
    #[serde(default)]
    pub omega: f32,
    #[serde(default)]
    pub theta: f32,
    /// Canvas size in pixels; see [`Model::resize`].
    #[serde(default = "default_size")]
    pub size: [f32; 2],
    /// Playback state of the player that produced the model.
    #[serde(default)]
    pub origin: [f32; 2],
    #[serde(default)]
    pub mouse: [f32; 2],
    /// Player clock in milliseconds.
    #[serde(default)]
    pub now: f64,
    #[serde(default)]
    pub layers: Vec<LayerDef>,
}

fn default_product() -> String {
    Product::default_id().to_string()
}

impl Default for Model {
    fn default() -> Self {
        Self::default_layers(EditMode::Advanced, 2)
    }
}

impl Model {
    pub fn with_layers(mode: EditMode, kinds: &[LayerKind]) -> Self {
        Self {
            mode,
            product: default_product(),
            omega: 0.0,
            theta: 0.0,
            size: default_size(),
            origin: [0.0; 2],
            mouse: [0.0; 2],
            now: 0.0,
            layers: kinds.iter().map(|k| LayerDef::new(*k, mode)).collect(),
        }
    }

    /// Start-up stack of `count` layers: FSS layers alternating mirrored and
    /// plain, topped by one HTML overlay once there are at least two layers.
    pub fn default_layers(mode: EditMode, count: usize) -> Self {
        let mut kinds: Vec<LayerKind> = (0..count)
            .map(|i| {
                if i % 2 == 0 {
                    LayerKind::FssMirror
                } else {
                    LayerKind::Fss
                }
            })
            .collect();
        if let Some(last) = kinds.last_mut().filter(|_| count > 1) {
            *last = LayerKind::Html;
        }
        Self::with_layers(mode, &kinds)
    }

    /// Set the canvas size and stretch every FSS plane to cover it.
    pub fn resize(&mut self, size: [f32; 2]) -> ToolkitResult<()> {
        let [width, height] = size;
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(ToolkitError::config_range(format!(
                "canvas size must be positive, got {width}x{height}"
            )));
        }
        self.size = size;
        for fss in self.layers.iter_mut().filter_map(|l| l.model.as_mut()) {
            fss.size = size;
        }
        Ok(())
    }

    /// Indices of layers that carry an FSS mesh, ascending.
    pub fn fss_layers(&self) -> impl Iterator<Item = usize> + '_ {
        self.layers
            .iter()
            .enumerate()
            .filter(|(_, l)| l.kind.is_fss() && l.model.is_some())
            .map(|(i, _)| i)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn max_faces_by_mode() {
        assert_eq!(EditMode::Advanced.max_faces(), 100);
        assert_eq!(EditMode::Production.max_faces(), 50);
    }

    #[test]
    fn edit_mode_accepts_prod_alias() {
        let m: EditMode = serde_json::from_str("\"prod\"").unwrap();
        assert_eq!(m, EditMode::Production);
        assert_eq!(serde_json::to_string(&m).unwrap(), "\"production\"");
    }

    #[test]
    fn layer_kind_serde_names() {
        assert_eq!(serde_json::to_string(&LayerKind::FssMirror).unwrap(), "\"fss-mirror\"");
        for k in LayerKind::ALL {
            let json = serde_json::to_string(k).unwrap();
            let k2: LayerKind = serde_json::from_str(&json).unwrap();
            assert_eq!(*k, k2);
        }
    }

    #[test]
    fn html_blend_serde_names() {
        for mode in HtmlBlend::ALL {
            let json = serde_json::to_string(mode).unwrap();
            assert_eq!(json, format!("\"{}\"", mode.name()));
        }
    }

    #[test]
    fn resize_moves_every_plane() {
        let mut m = Model::default_layers(EditMode::Advanced, 3);
        m.resize([1920.0, 1080.0]).unwrap();
        assert_eq!(m.size, [1920.0, 1080.0]);
        for fss in m.layers.iter().filter_map(|l| l.model.as_ref()) {
            assert_eq!(fss.size, [1920.0, 1080.0]);
        }
        let err = m.resize([0.0, 1080.0]).unwrap_err();
        assert!(matches!(err, ToolkitError::ConfigRange(_)));
        assert_eq!(m.size, [1920.0, 1080.0]);
    }

    #[test]
    fn html_layers_are_not_webgl() {
        assert!(!LayerKind::Html.is_webgl());
        assert!(LayerKind::FssMirror.is_fss());
        assert_eq!(LayerKind::FssMirror.to_string(), "FSS Mirror");
    }

    #[test]
    fn new_layer_follows_kind_and_mode() {
        let l = LayerDef::new(LayerKind::FssMirror, EditMode::Production);
        assert!(l.model.as_ref().unwrap().mirror);
        assert_eq!(
            l.blend,
            LayerBlend::Preset {
                set: "normal".into(),
                color: None
            }
        );
        let h = LayerDef::new(LayerKind::Html, EditMode::Advanced);
        assert!(h.model.is_none());
        assert_eq!(h.blend.descriptor().unwrap(), None);
    }

    #[test]
    fn preset_blend_descriptor_uses_set() {
        let b = LayerBlend::Preset {
            set: "caustic".into(),
            color: None,
        };
        let d = b.descriptor().unwrap().unwrap();
        assert_eq!(d.color_eq, [0, 2, 1]);
        assert_eq!(b.color(), None);
        let bad = LayerBlend::Preset {
            set: "nope".into(),
            color: None,
        };
        assert!(bad.descriptor().unwrap_err().is_lookup());
    }

    #[test]
    fn layer_blend_json_tags() {
        let b = LayerBlend::Html {
            mode: HtmlBlend::Overlay,
        };
        assert_eq!(
            serde_json::to_value(&b).unwrap(),
            serde_json::json!({ "type": "html", "mode": "overlay" })
        );
        let w = LayerBlend::WebGl(BlendDescriptor::default());
        let json = serde_json::to_value(&w).unwrap();
        assert_eq!(json["type"], "webgl");
        assert_eq!(json["colorEq"], serde_json::json!([0, 1, 0]));
        let back: LayerBlend = serde_json::from_value(json).unwrap();
        assert_eq!(back, w);
    }

    #[test]
    fn fss_config_minimal_json_defaults() {
        let cfg: FssConfig = serde_json::from_str(r#"{"faces": [10, 10]}"#).unwrap();
        assert_eq!(cfg.faces, [10, 10]);
        assert_eq!(cfg.light_speed, 540);
        assert_eq!(cfg.render_mode, RenderMode::Triangles);
        assert!((cfg.opacity - 1.0).abs() < 1e-6);
        assert!(cfg.palette.is_none());
    }

    #[test]
    fn layer_def_accepts_is_on_alias() {
        let json = r#"{"kind": "html", "isOn": false, "blend": {"type": "html", "mode": "normal"}}"#;
        let l: LayerDef = serde_json::from_str(json).unwrap();
        assert!(!l.visible);
        assert!(l.model.is_none());
    }

    #[test]
    fn default_model_layers() {
        let m = Model::default();
        assert_eq!(m.layers.len(), 2);
        assert_eq!(m.fss_layers().collect::<Vec<_>>(), vec![0]);
        assert_eq!(m.product, "jetbrains");
    }

    #[test]
    fn default_layer_stacks() {
        let kinds = |n| {
            Model::default_layers(EditMode::Production, n)
                .layers
                .iter()
                .map(|l| l.kind)
                .collect::<Vec<_>>()
        };
        assert!(kinds(0).is_empty());
        assert_eq!(kinds(1), vec![LayerKind::FssMirror]);
        assert_eq!(
            kinds(4),
            vec![
                LayerKind::FssMirror,
                LayerKind::Fss,
                LayerKind::FssMirror,
                LayerKind::Html
            ]
        );
        let m = Model::default_layers(EditMode::Production, 3);
        assert_eq!(m.mode, EditMode::Production);
        assert!(matches!(m.layers[0].blend, LayerBlend::Preset { .. }));
    }
}
