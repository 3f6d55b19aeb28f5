pub mod field;
pub mod mirror;

pub use field::{
    Field, FieldDomain, FieldEdit, GlobalEdit, OMEGA_DOMAIN, apply_edit, apply_global_edit,
};
pub use mirror::{BlendPanel, LayerFields, PanelMirror};
