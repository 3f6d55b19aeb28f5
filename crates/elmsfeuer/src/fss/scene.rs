use std::f32::consts::TAU;

use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::color::Rgba;
use crate::error::{ToolkitError, ToolkitResult};
use crate::model::{FssConfig, Model, product_by_id};

use super::fuzz::{CarryOver, FuzzRanges, VertexFuzz};
use super::geometry::{MAX_VERTICES, PlaneGeometry, Vertex};

const LIGHT_POSITION: Vec3 = Vec3::new(120.0, 120.0, 50.0);
const HIGHLIGHT_POSITION: Vec3 = Vec3::new(30.0, 100.0, 30.0);
const AMBIENT_POSITION: Vec3 = Vec3::new(0.0, 0.0, 200.0);

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub ambient: Rgba,
    pub diffuse: Rgba,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LightRole {
    Light,
    Highlight,
    Ambient,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Light {
    pub role: LightRole,
    pub position: Vec3,
    pub ambient: Rgba,
    pub diffuse: Rgba,
    pub speed: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mesh {
    pub geometry: PlaneGeometry,
    pub material: Material,
}

impl Mesh {
    pub fn vertex_count(&self) -> usize {
        self.geometry.vertices.len()
    }
}

/// Builder output: one plane mesh lit by 2–3 lights.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub mesh: Mesh,
    pub lights: Vec<Light>,
    #[serde(default)]
    pub carry_over: CarryOver,
}

impl Scene {
    pub fn vertices(&self) -> &[Vertex] {
        &self.mesh.geometry.vertices
    }

    /// Per-vertex animation state in index order, for export and rebuilds.
    pub fn fuzz(&self) -> Vec<VertexFuzz> {
        self.vertices()
            .iter()
            .map(|v| VertexFuzz {
                v0: v.v0,
                time: v.time,
                anchor: v.anchor,
                gradient: v.gradient,
            })
            .collect()
    }

    /// Advance every vertex phase by `dt` radians, wrapping into `[0, 2π)`.
    pub fn advance(&mut self, dt: f32) {
        for v in &mut self.mesh.geometry.vertices {
            v.time = wrap_phase(v.time + dt);
        }
    }

    /// Build a replacement scene for `fss`, offering this scene's animation
    /// state as carry-over.
    pub fn rebuild<R: Rng + ?Sized>(
        &self,
        model: &Model,
        fss: &FssConfig,
        ranges: &FuzzRanges,
        rng: &mut R,
    ) -> ToolkitResult<Scene> {
        let fuzz = self.fuzz();
        build_scene(model, fss, Some(&fuzz), ranges, rng)
    }
}

/// Build the FSS scene for one layer.
///
/// `carry_over` is matched to the new vertices by index; entries beyond the
/// new grid are ignored and vertices beyond the source are randomized. The
/// resulting [`Scene::carry_over`] reports which of these happened.
pub fn build_scene<R: Rng + ?Sized>(
    model: &Model,
    fss: &FssConfig,
    carry_over: Option<&[VertexFuzz]>,
    ranges: &FuzzRanges,
    rng: &mut R,
) -> ToolkitResult<Scene> {
    ranges.validate()?;
    let [width, height] = fss.size;
    if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
        return Err(ToolkitError::config_range(format!(
            "mesh size must be positive, got {width}x{height}"
        )));
    }
    let [segments, slices] = clamp_faces(fss.faces);
    let required = PlaneGeometry::vertex_count(segments, slices)
        .filter(|n| *n <= MAX_VERTICES)
        .ok_or_else(|| {
            ToolkitError::config_range(format!(
                "{segments}x{slices} faces exceed the {MAX_VERTICES} vertex limit"
            ))
        })?;
    let triangles = PlaneGeometry::grid_triangles(segments, slices).ok_or_else(|| {
        ToolkitError::config_range(format!("{segments}x{slices} faces overflow the index type"))
    })?;
    let palette = resolve_palette(model, fss)?;

    let status = CarryOver::classify(carry_over.map(<[VertexFuzz]>::len), required);
    if let Err(e) = status.check() {
        log::warn!("{e}; matching by index, unmatched vertices are randomized");
    }

    let vertices = PlaneGeometry::grid_positions(width, height, segments, slices)
        .into_iter()
        .enumerate()
        .map(|(i, position)| match carry_over.and_then(|src| src.get(i)) {
            Some(src) => Vertex {
                position,
                anchor: position,
                v0: src.v0,
                time: src.time,
                gradient: src.gradient,
            },
            None => Vertex {
                position,
                anchor: position,
                v0: ranges.sample_seed(rng),
                time: ranges.sample_phase(rng),
                gradient: ranges.sample_gradient(rng),
            },
        })
        .collect();

    let mesh = Mesh {
        geometry: PlaneGeometry {
            width,
            height,
            segments,
            slices,
            vertices,
            triangles,
        },
        material: Material {
            ambient: palette[0],
            diffuse: palette[1],
        },
    };

    let mut lights = vec![
        Light {
            role: LightRole::Light,
            position: LIGHT_POSITION,
            ambient: palette[0],
            diffuse: palette[1],
            speed: fss.light_speed,
        },
        Light {
            role: LightRole::Highlight,
            position: HIGHLIGHT_POSITION,
            ambient: palette[1],
            diffuse: palette.get(2).copied().unwrap_or(palette[0]),
            speed: fss.light_speed,
        },
    ];
    if fss.ambient_light {
        lights.push(Light {
            role: LightRole::Ambient,
            position: AMBIENT_POSITION,
            ambient: palette[palette.len() - 1],
            diffuse: palette[0],
            speed: fss.light_speed,
        });
    }

    log::debug!(
        "Built FSS scene {}x{} faces, {} vertices, {} lights ({:?})",
        segments,
        slices,
        required,
        lights.len(),
        status
    );

    Ok(Scene {
        mesh,
        lights,
        carry_over: status,
    })
}

/// [`build_scene`] drawing from the thread-local generator.
pub fn build_scene_with_thread_rng(
    model: &Model,
    fss: &FssConfig,
    carry_over: Option<&[VertexFuzz]>,
    ranges: &FuzzRanges,
) -> ToolkitResult<Scene> {
    build_scene(model, fss, carry_over, ranges, &mut rand::rng())
}

/// `rem_euclid` rounds tiny negative phases up to exactly `2π`.
fn wrap_phase(t: f32) -> f32 {
    let wrapped = t.rem_euclid(TAU);
    if wrapped >= TAU { 0.0 } else { wrapped }
}

fn clamp_faces(faces: [u32; 2]) -> [u32; 2] {
    let clamped = faces.map(|f| f.max(1));
    if clamped != faces {
        log::warn!(
            "Face counts {:?} clamped to {:?}, each axis needs at least one face",
            faces,
            clamped
        );
    }
    clamped
}

fn resolve_palette(model: &Model, fss: &FssConfig) -> ToolkitResult<Vec<Rgba>> {
    let colors: Vec<Rgba> = match &fss.palette {
        Some(palette) => palette
            .iter()
            .map(|c| Rgba::parse(c))
            .collect::<ToolkitResult<_>>()?,
        None => {
            let product = product_by_id(&model.product)?;
            log::info!(
                "Layer has no palette, using the '{}' product palette",
                product.id
            );
            product
                .palette
                .iter()
                .map(|c| Rgba::parse(c))
                .collect::<ToolkitResult<_>>()?
        }
    };
    if colors.len() < 2 {
        return Err(ToolkitError::config_range(format!(
            "palette needs at least 2 colors, got {}",
            colors.len()
        )));
    }
    Ok(colors)
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_pcg::Pcg64;

    use super::*;

    fn cfg(faces: [u32; 2], palette: &[&str]) -> FssConfig {
        FssConfig {
            size: [1550.0, 800.0],
            faces,
            palette: Some(palette.iter().map(|c| (*c).to_string()).collect()),
            ..FssConfig::default()
        }
    }

    fn build(fss: &FssConfig, carry: Option<&[VertexFuzz]>, seed: u64) -> ToolkitResult<Scene> {
        let mut rng = Pcg64::seed_from_u64(seed);
        build_scene(&Model::default(), fss, carry, &FuzzRanges::default(), &mut rng)
    }

    #[test]
    fn end_to_end_two_color_palette() {
        let scene = build(&cfg([10, 10], &["#f45b69", "#e4fde1"]), None, 42).unwrap();
        assert_eq!(scene.mesh.vertex_count(), 121);
        assert_eq!(scene.lights.len(), 2);
        assert_eq!(scene.carry_over, CarryOver::Fresh);
        for v in scene.vertices() {
            assert!((0.0..TAU).contains(&v.time));
            for c in v.v0.to_array() {
                assert!((0.2..=1.0).contains(&c));
            }
            assert_eq!(v.anchor, v.position);
        }
        assert_eq!(scene.mesh.geometry.triangles.len(), 200);
    }

    #[test]
    fn vertex_count_formula() {
        for (c, r) in [(1, 1), (3, 7), (12, 15), (50, 2)] {
            let scene = build(&cfg([c, r], &["#000", "#fff"]), None, 1).unwrap();
            assert_eq!(scene.mesh.vertex_count(), (c as usize + 1) * (r as usize + 1));
        }
    }

    #[test]
    fn zero_faces_clamped_to_one() {
        let scene = build(&cfg([0, 4], &["#000", "#fff"]), None, 1).unwrap();
        assert_eq!(scene.mesh.geometry.segments, 1);
        assert_eq!(scene.mesh.vertex_count(), 2 * 5);
    }

    #[test]
    fn light_colors_follow_palette() {
        let scene = build(&cfg([2, 2], &["#ff0000", "#00ff00", "#0000ff"]), None, 3).unwrap();
        let red = Rgba::new(1.0, 0.0, 0.0, 1.0);
        let green = Rgba::new(0.0, 1.0, 0.0, 1.0);
        let blue = Rgba::new(0.0, 0.0, 1.0, 1.0);
        assert_eq!(scene.mesh.material, Material { ambient: red, diffuse: green });
        assert_eq!(scene.lights[0].ambient, red);
        assert_eq!(scene.lights[0].diffuse, green);
        assert_eq!(scene.lights[1].ambient, green);
        assert_eq!(scene.lights[1].diffuse, blue);
        assert_eq!(scene.lights[0].position, LIGHT_POSITION);
        assert!(scene.lights.iter().all(|l| l.speed == 540));
    }

    #[test]
    fn ambient_light_adds_third() {
        let mut fss = cfg([2, 2], &["#ff0000", "#00ff00", "#0000ff"]);
        fss.ambient_light = true;
        let scene = build(&fss, None, 3).unwrap();
        assert_eq!(scene.lights.len(), 3);
        assert_eq!(scene.lights[2].role, LightRole::Ambient);
        assert_eq!(scene.lights[2].ambient, Rgba::new(0.0, 0.0, 1.0, 1.0));
    }

    #[test]
    fn full_carry_over_is_lossless() {
        let fss = cfg([6, 4], &["#f45b69", "#e4fde1"]);
        let first = build(&fss, None, 11).unwrap();
        let fuzz = first.fuzz();
        let second = build(&fss, Some(&fuzz), 999).unwrap();
        assert_eq!(second.carry_over, CarryOver::Full);
        for (v, f) in second.vertices().iter().zip(&fuzz) {
            assert_eq!(v.v0, f.v0);
            assert_eq!(v.time, f.time);
            assert_eq!(v.gradient, f.gradient);
        }
        assert_eq!(second.mesh, first.mesh);
    }

    #[test]
    fn rebuild_keeps_animation_state() {
        let model = Model::default();
        let fss = cfg([3, 3], &["#f45b69", "#e4fde1"]);
        let mut rng = Pcg64::seed_from_u64(5);
        let scene = build_scene(&model, &fss, None, &FuzzRanges::default(), &mut rng).unwrap();
        let again = scene
            .rebuild(&model, &fss, &FuzzRanges::default(), &mut rng)
            .unwrap();
        assert_eq!(again.fuzz(), scene.fuzz());
    }

    #[test]
    fn deterministic_for_fixed_seed() {
        let fss = cfg([5, 5], &["#f45b69", "#e4fde1"]);
        assert_eq!(build(&fss, None, 8).unwrap(), build(&fss, None, 8).unwrap());
        assert_ne!(build(&fss, None, 8).unwrap(), build(&fss, None, 9).unwrap());
    }

    #[test]
    fn short_carry_over_randomizes_rest() {
        let small = build(&cfg([1, 1], &["#000", "#fff"]), None, 2).unwrap();
        let fuzz = small.fuzz();
        let big = build(&cfg([2, 2], &["#000", "#fff"]), Some(&fuzz), 3).unwrap();
        assert_eq!(
            big.carry_over,
            CarryOver::Partial {
                supplied: 4,
                required: 9
            }
        );
        assert!(big.carry_over.check().is_err());
        for (v, f) in big.vertices().iter().zip(&fuzz) {
            assert_eq!(v.v0, f.v0);
        }
        // anchors always come from the new grid
        assert_eq!(big.vertices()[0].anchor, big.vertices()[0].position);
    }

    #[test]
    fn short_palette_is_error() {
        let err = build(&cfg([2, 2], &["#000"]), None, 1).unwrap_err();
        assert!(matches!(err, ToolkitError::ConfigRange(_)));
        let err = build(&cfg([2, 2], &["#000", "teal"]), None, 1).unwrap_err();
        assert!(matches!(err, ToolkitError::ConfigRange(_)));
    }

    #[test]
    fn missing_palette_uses_product() {
        let fss = FssConfig {
            palette: None,
            faces: [1, 1],
            ..FssConfig::default()
        };
        let mut model = Model::default();
        model.product = "kotlin".into();
        let mut rng = Pcg64::seed_from_u64(1);
        let scene = build_scene(&model, &fss, None, &FuzzRanges::default(), &mut rng).unwrap();
        assert_eq!(scene.mesh.material.ambient, Rgba::parse("#1b84f2").unwrap());

        model.product = "unknown".into();
        let err = build_scene(&model, &fss, None, &FuzzRanges::default(), &mut rng).unwrap_err();
        assert!(err.is_lookup());
    }

    #[test]
    fn invalid_size_is_error() {
        let mut fss = cfg([2, 2], &["#000", "#fff"]);
        fss.size = [0.0, 100.0];
        assert!(matches!(build(&fss, None, 1).unwrap_err(), ToolkitError::ConfigRange(_)));
        fss.size = [f32::INFINITY, 100.0];
        assert!(build(&fss, None, 1).is_err());
    }

    #[test]
    fn advance_wraps_phase() {
        let mut scene = build(&cfg([1, 1], &["#000", "#fff"]), None, 4).unwrap();
        let before = scene.fuzz();
        scene.advance(TAU + 0.5);
        for (v, f) in scene.vertices().iter().zip(&before) {
            assert!((0.0..TAU).contains(&v.time));
            let expected = (f.time + 0.5).rem_euclid(TAU);
            assert!((v.time - expected).abs() < 1e-4);
            assert_eq!(v.anchor, f.anchor);
        }
    }

    #[test]
    fn advance_by_tiny_negative_step_stays_below_tau() {
        let mut scene = build(&cfg([1, 1], &["#000", "#fff"]), None, 4).unwrap();
        for v in &mut scene.mesh.geometry.vertices {
            v.time = 0.0;
        }
        scene.advance(-1e-9);
        for v in scene.vertices() {
            assert!((0.0..TAU).contains(&v.time), "phase {} escaped", v.time);
        }
        assert_eq!(wrap_phase(-1e-9), 0.0);
        assert!((wrap_phase(-0.5) - (TAU - 0.5)).abs() < 1e-6);
    }

    #[test]
    fn oversized_faces_rejected_before_allocation() {
        for faces in [[200_000, 200_000], [u32::MAX, u32::MAX], [u32::MAX, 1]] {
            let err = build(&cfg(faces, &["#000", "#fff"]), None, 1).unwrap_err();
            assert!(matches!(err, ToolkitError::ConfigRange(_)), "{faces:?}: {err}");
        }
        // the largest grid under the limit still builds
        let scene = build(&cfg([1023, 1023], &["#000", "#fff"]), None, 1).unwrap();
        assert_eq!(scene.mesh.vertex_count(), MAX_VERTICES);
    }

    #[test]
    fn scene_json_shape() {
        let scene = build(&cfg([1, 1], &["#000", "#fff"]), None, 4).unwrap();
        let json = serde_json::to_value(&scene).unwrap();
        assert_eq!(json["mesh"]["geometry"]["vertices"].as_array().unwrap().len(), 4);
        assert!(json["mesh"]["material"]["ambient"]["r"].is_number());
        assert_eq!(json["lights"].as_array().unwrap().len(), 2);
        assert_eq!(json["carry_over"]["status"], "fresh");
    }
}
