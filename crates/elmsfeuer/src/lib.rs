//! Core of the elmsfeuer generative-art toolkit: FSS plane scenes, the blend
//! vocabulary and codec, the configuration randomizer, and model export.

pub mod blend;
pub mod color;
pub mod error;
pub mod export;
pub mod fss;
pub mod model;
pub mod panel;
pub mod randomize;
pub mod settings;

pub use color::Rgba;
pub use error::{ToolkitError, ToolkitResult};
pub use export::{ExportDocument, export_model, import_document, rebuild_scenes};
pub use fss::{Scene, build_scene, build_scene_with_thread_rng};
pub use model::{EditMode, FssConfig, LayerDef, LayerKind, Model};
pub use panel::{PanelMirror, apply_edit};
pub use randomize::{randomize_all, randomize_layer};
pub use settings::SettingsConfig;
