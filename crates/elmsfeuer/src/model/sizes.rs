use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ToolkitError, ToolkitResult};

/// Which table of canvas presets to pick from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeGroup {
    Release,
    Ads,
    Wallpaper,
}

impl SizeGroup {
    pub const ALL: &[SizeGroup] = &[SizeGroup::Release, SizeGroup::Ads, SizeGroup::Wallpaper];

    pub fn name(self) -> &'static str {
        match self {
            SizeGroup::Release => "release",
            SizeGroup::Ads => "ads",
            SizeGroup::Wallpaper => "wallpaper",
        }
    }

    fn lookup_label(self) -> &'static str {
        match self {
            SizeGroup::Release => "release size",
            SizeGroup::Ads => "ads size",
            SizeGroup::Wallpaper => "wallpaper size",
        }
    }

    pub fn presets(self) -> &'static [SizePreset] {
        match self {
            SizeGroup::Release => RELEASE_SIZES,
            SizeGroup::Ads => ADS_SIZES,
            SizeGroup::Wallpaper => WALLPAPER_SIZES,
        }
    }
}

impl fmt::Display for SizeGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A named canvas size. `[0, 0]` is the `browser` entry: follow the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizePreset {
    pub label: &'static str,
    pub size: [u32; 2],
}

impl SizePreset {
    pub fn follows_viewport(&self) -> bool {
        self.size == [0, 0]
    }

    /// Canvas size in pixels; `viewport` is used by the `browser` entry.
    pub fn resolve(&self, viewport: [f32; 2]) -> [f32; 2] {
        if self.follows_viewport() {
            viewport
        } else {
            self.size.map(|v| v as f32)
        }
    }
}

const fn preset(label: &'static str, w: u32, h: u32) -> SizePreset {
    SizePreset { label, size: [w, h] }
}

const BROWSER: SizePreset = preset("browser", 0, 0);

const RELEASE_SIZES: &[SizePreset] = &[
    preset("480x297 prodcard", 480, 297),
    preset("960x594 prodcard@2x", 960, 594),
    preset("640x400 spl", 640, 400),
    preset("1280x800 spl@2x", 1280, 800),
    preset("650x170 nwlt", 650, 170),
    preset("1300x340 nwlt@2x", 1300, 340),
    preset("800x418 tw", 800, 418),
    preset("1200x628 fb", 1200, 628),
    preset("1280x800 wprev", 1280, 800),
    preset("800x400 blog", 800, 400),
    preset("1600x800 blog@2x", 1600, 800),
    preset("800x155 bfoot", 800, 155),
    preset("1600x310 bfoot", 1600, 310),
    preset("2850x1200 landg", 2850, 1200),
    BROWSER,
];

const ADS_SIZES: &[SizePreset] = &[
    preset("120x600", 120, 600),
    preset("125x125", 125, 125),
    preset("130x100", 130, 100),
    preset("180x150", 180, 150),
    preset("200x125", 200, 125),
    preset("200x200", 200, 200),
    preset("220x250", 220, 250),
    preset("250x250", 250, 250),
    preset("260x200", 260, 200),
    preset("300x250", 300, 250),
    preset("320x100", 320, 100),
    preset("320x50", 320, 50),
    preset("336x280", 336, 280),
    preset("468x60", 468, 60),
    preset("160x600", 160, 600),
    preset("300x600", 300, 600),
    preset("728x90", 728, 90),
    preset("800x320", 800, 320),
    preset("970x250", 970, 250),
    preset("970x90", 970, 90),
    preset("960x90 baidu", 960, 90),
    preset("728x90 baidu", 728, 90),
    preset("468x60 baidu", 468, 60),
    preset("200x200 baidu", 200, 200),
    preset("960x60 baidu", 960, 60),
    preset("640x60 baidu", 640, 60),
    preset("580x90 baidu", 580, 90),
    preset("460x60 baidu", 460, 60),
    preset("300x250 baidu", 300, 250),
    preset("336x280 baidu", 336, 280),
    preset("1200x628 fb", 1200, 628),
    preset("800x418 tw", 800, 418),
    preset("1080x1080 in", 1080, 1080),
    preset("1200x627 ln", 1200, 627),
    BROWSER,
];

const WALLPAPER_SIZES: &[SizePreset] = &[
    preset("2560x1440", 2560, 1440),
    preset("1920x1200", 1920, 1200),
    preset("1920x1080", 1920, 1080),
    preset("1680x1050", 1680, 1050),
    preset("1536x864", 1536, 864),
    preset("1440x900", 1440, 900),
    preset("1366x768", 1366, 768),
    BROWSER,
];

pub fn size_preset(group: SizeGroup, label: &str) -> ToolkitResult<&'static SizePreset> {
    group
        .presets()
        .iter()
        .find(|p| p.label == label)
        .ok_or_else(|| ToolkitError::lookup(group.lookup_label(), label))
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn labels_unique_per_group() {
        for group in SizeGroup::ALL {
            let labels: HashSet<&str> = group.presets().iter().map(|p| p.label).collect();
            assert_eq!(labels.len(), group.presets().len(), "{group}");
            assert_eq!(group.presets().last(), Some(&BROWSER));
        }
        assert_eq!(RELEASE_SIZES.len(), 15);
        assert_eq!(ADS_SIZES.len(), 35);
        assert_eq!(WALLPAPER_SIZES.len(), 8);
    }

    #[test]
    fn labels_lead_with_their_size() {
        for group in SizeGroup::ALL {
            for p in group.presets().iter().filter(|p| !p.follows_viewport()) {
                let dims = p.label.split(' ').next().unwrap_or_default();
                assert_eq!(dims, format!("{}x{}", p.size[0], p.size[1]), "{}", p.label);
            }
        }
    }

    #[test]
    fn lookup_and_resolve() {
        let fb = size_preset(SizeGroup::Ads, "1200x628 fb").unwrap();
        assert_eq!(fb.resolve([10.0, 10.0]), [1200.0, 628.0]);
        let browser = size_preset(SizeGroup::Wallpaper, "browser").unwrap();
        assert!(browser.follows_viewport());
        assert_eq!(browser.resolve([1024.0, 768.0]), [1024.0, 768.0]);
    }

    #[test]
    fn unknown_label_is_lookup_error() {
        let err = size_preset(SizeGroup::Wallpaper, "480x297 prodcard").unwrap_err();
        assert!(err.is_lookup());
        assert!(err.to_string().contains("wallpaper size"));
    }

    #[test]
    fn group_serde_names() {
        for group in SizeGroup::ALL {
            let json = serde_json::to_string(group).unwrap();
            assert_eq!(json, format!("\"{}\"", group.name()));
        }
    }
}
