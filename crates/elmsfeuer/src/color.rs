use serde::{Deserialize, Serialize};

use crate::error::{ToolkitError, ToolkitResult};

/// RGBA color with channels in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const OPAQUE_RED: Rgba = Rgba::new(1.0, 0.0, 0.0, 1.0);
    pub const WHITE: Rgba = Rgba::new(1.0, 1.0, 1.0, 1.0);
    pub const TRANSPARENT: Rgba = Rgba::new(0.0, 0.0, 0.0, 0.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Parse `#rgb`, `#rrggbb`, `#rrggbbaa`, `rgb(r,g,b)` or `rgba(r,g,b,a)`.
    pub fn parse(s: &str) -> ToolkitResult<Self> {
        let s = s.trim();
        let parsed = if let Some(hex) = s.strip_prefix('#') {
            parse_hex(hex)
        } else if let Some(body) = s
            .strip_prefix("rgba(")
            .or_else(|| s.strip_prefix("rgb("))
            .and_then(|rest| rest.strip_suffix(')'))
        {
            parse_functional(body)
        } else {
            None
        };
        parsed.ok_or_else(|| ToolkitError::config_range(format!("unparseable color '{s}'")))
    }

    /// `#rrggbb`, or `#rrggbbaa` when not fully opaque.
    pub fn to_hex(self) -> String {
        let byte = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        if self.a >= 1.0 {
            format!("#{:02x}{:02x}{:02x}", byte(self.r), byte(self.g), byte(self.b))
        } else {
            format!(
                "#{:02x}{:02x}{:02x}{:02x}",
                byte(self.r),
                byte(self.g),
                byte(self.b),
                byte(self.a)
            )
        }
    }
}

impl Default for Rgba {
    fn default() -> Self {
        Rgba::OPAQUE_RED
    }
}

fn parse_hex(hex: &str) -> Option<Rgba> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |i: usize, width: usize| -> Option<f32> {
        let raw = u8::from_str_radix(hex.get(i..i + width)?, 16).ok()?;
        // #rgb shorthand doubles each nibble
        let full = if width == 1 { raw * 17 } else { raw };
        Some(full as f32 / 255.0)
    };
    match hex.len() {
        3 => Some(Rgba::new(channel(0, 1)?, channel(1, 1)?, channel(2, 1)?, 1.0)),
        6 => Some(Rgba::new(channel(0, 2)?, channel(2, 2)?, channel(4, 2)?, 1.0)),
        8 => Some(Rgba::new(
            channel(0, 2)?,
            channel(2, 2)?,
            channel(4, 2)?,
            channel(6, 2)?,
        )),
        _ => None,
    }
}

fn parse_functional(body: &str) -> Option<Rgba> {
    let parts: Vec<&str> = body.split(',').map(str::trim).collect();
    let byte = |p: &str| -> Option<f32> {
        let v: f32 = p.parse().ok()?;
        (0.0..=255.0).contains(&v).then_some(v / 255.0)
    };
    match parts.as_slice() {
        [r, g, b] => Some(Rgba::new(byte(r)?, byte(g)?, byte(b)?, 1.0)),
        [r, g, b, a] => {
            let a: f32 = a.parse().ok()?;
            if !(0.0..=1.0).contains(&a) {
                return None;
            }
            Some(Rgba::new(byte(r)?, byte(g)?, byte(b)?, a))
        }
        _ => None,
    }
}
