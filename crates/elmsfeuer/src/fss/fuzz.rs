use std::f32::consts::TAU;

use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{ToolkitError, ToolkitResult};

/// Sampling ranges for fresh per-vertex animation state, each `[min, max)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FuzzRanges {
    pub seed: [f32; 2],
    pub phase: [f32; 2],
    pub gradient: [f32; 2],
}

impl Default for FuzzRanges {
    fn default() -> Self {
        Self {
            seed: [0.2, 1.0],
            phase: [0.0, TAU],
            gradient: [0.3, 1.0],
        }
    }
}

impl FuzzRanges {
    pub fn validate(&self) -> ToolkitResult<()> {
        for (name, [lo, hi]) in [
            ("seed", self.seed),
            ("phase", self.phase),
            ("gradient", self.gradient),
        ] {
            if !lo.is_finite() || !hi.is_finite() || lo > hi {
                return Err(ToolkitError::config_range(format!(
                    "{name} range [{lo}, {hi}) is not a valid interval"
                )));
            }
        }
        Ok(())
    }

    pub(crate) fn sample_seed<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec3 {
        Vec3::new(
            sample(rng, self.seed),
            sample(rng, self.seed),
            sample(rng, self.seed),
        )
    }

    pub(crate) fn sample_phase<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        sample(rng, self.phase)
    }

    pub(crate) fn sample_gradient<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        sample(rng, self.gradient)
    }
}

fn sample<R: Rng + ?Sized>(rng: &mut R, [lo, hi]: [f32; 2]) -> f32 {
    if lo >= hi {
        return lo;
    }
    rng.random_range(lo..hi)
}

/// Exported animation state of one vertex ("scene fuzz"), matched by index on import.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VertexFuzz {
    pub v0: Vec3,
    pub time: f32,
    pub anchor: Vec3,
    pub gradient: f32,
}

/// How a build used the carry-over it was offered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum CarryOver {
    /// No source; everything freshly randomized.
    #[default]
    Fresh,
    /// Every vertex carried over.
    Full,
    /// Source length differed from the vertex count; vertices past the
    /// source were randomized.
    Partial { supplied: usize, required: usize },
}

impl CarryOver {
    pub(crate) fn classify(supplied: Option<usize>, required: usize) -> Self {
        match supplied {
            None => CarryOver::Fresh,
            Some(n) if n == required => CarryOver::Full,
            Some(n) => CarryOver::Partial {
                supplied: n,
                required,
            },
        }
    }

    /// Escalate a partial carry-over into an error for callers that need an
    /// exact rebuild.
    pub fn check(self) -> ToolkitResult<()> {
        match self {
            CarryOver::Partial { supplied, required } => {
                Err(ToolkitError::CarryOverMismatch { supplied, required })
            }
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_pcg::Pcg64;

    use super::*;

    #[test]
    fn default_ranges_valid() {
        assert!(FuzzRanges::default().validate().is_ok());
    }

    #[test]
    fn inverted_range_rejected() {
        let r = FuzzRanges {
            gradient: [1.0, 0.3],
            ..FuzzRanges::default()
        };
        let err = r.validate().unwrap_err();
        assert!(err.to_string().contains("gradient"));
        let r = FuzzRanges {
            seed: [f32::NAN, 1.0],
            ..FuzzRanges::default()
        };
        assert!(r.validate().is_err());
    }

    #[test]
    fn samples_stay_in_range() {
        let mut rng = Pcg64::seed_from_u64(7);
        let r = FuzzRanges::default();
        for _ in 0..1000 {
            let s = r.sample_seed(&mut rng);
            for c in s.to_array() {
                assert!((0.2..1.0).contains(&c));
            }
            let p = r.sample_phase(&mut rng);
            assert!((0.0..TAU).contains(&p));
            let g = r.sample_gradient(&mut rng);
            assert!((0.3..1.0).contains(&g));
        }
    }

    #[test]
    fn degenerate_range_returns_min() {
        let mut rng = Pcg64::seed_from_u64(1);
        assert_eq!(sample(&mut rng, [0.5, 0.5]), 0.5);
    }

    #[test]
    fn classify_carry_over() {
        assert_eq!(CarryOver::classify(None, 4), CarryOver::Fresh);
        assert_eq!(CarryOver::classify(Some(4), 4), CarryOver::Full);
        assert_eq!(
            CarryOver::classify(Some(9), 4),
            CarryOver::Partial {
                supplied: 9,
                required: 4
            }
        );
    }

    #[test]
    fn check_escalates_partial() {
        assert!(CarryOver::Full.check().is_ok());
        assert!(CarryOver::Fresh.check().is_ok());
        let err = CarryOver::Partial {
            supplied: 1,
            required: 4,
        }
        .check()
        .unwrap_err();
        assert!(matches!(
            err,
            ToolkitError::CarryOverMismatch {
                supplied: 1,
                required: 4
            }
        ));
    }

    #[test]
    fn vertex_fuzz_json_shape() {
        let f = VertexFuzz {
            v0: Vec3::new(0.5, 0.25, 1.0),
            time: 1.5,
            anchor: Vec3::new(-10.0, 20.0, 0.0),
            gradient: 0.75,
        };
        let json = serde_json::to_value(f).unwrap();
        assert_eq!(json["v0"], serde_json::json!([0.5, 0.25, 1.0]));
        assert_eq!(json["time"], serde_json::json!(1.5));
        let back: VertexFuzz = serde_json::from_value(json).unwrap();
        assert_eq!(back, f);
    }
}
