pub mod product;
pub mod sizes;
pub mod types;

pub use product::{Product, product_by_id, product_by_label};
pub use sizes::{SizeGroup, SizePreset, size_preset};
pub use types::{
    EditMode, FssConfig, HtmlBlend, LayerBlend, LayerDef, LayerKind, Model, RenderMode,
};
