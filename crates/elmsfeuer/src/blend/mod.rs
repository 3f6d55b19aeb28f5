pub mod code;
pub mod codec;
pub mod sets;
pub mod vocab;

pub use code::{decode_blend_code, encode_blend_code};
pub use codec::{
    BlendDescriptor, BlendEdit, BlendField, BlendFields, decode, decode_preset, encode,
    encode_fields, encode_preset, match_preset,
};
pub use sets::{BlendSet, TokenTriple, resolve_blend_set};
pub use vocab::{
    BlendFactor, BlendFunc, BlendKind, code_to_name, name_to_code, name_to_token,
    token_to_code, token_to_name,
};
