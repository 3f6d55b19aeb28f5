use std::path::{Path, PathBuf};

use anyhow::{Context as _, bail};
use clap::{Parser, Subcommand};
use rand::SeedableRng;
use rand_pcg::Pcg64;
use serde::Serialize;

use elmsfeuer::blend::{
    BlendFactor, BlendFunc, BlendSet, decode, decode_blend_code, encode_preset,
};
use elmsfeuer::export::{LayerFuzz, export_model, import_document, rebuild_scenes};
use elmsfeuer::fss::build_scene;
use elmsfeuer::model::{EditMode, HtmlBlend, Model, Product, SizeGroup, size_preset};
use elmsfeuer::panel::PanelMirror;
use elmsfeuer::randomize::randomize_all;
use elmsfeuer::settings::SettingsConfig;

#[derive(Parser, Debug)]
#[command(name = "elmsfeuer", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build one FSS layer's scene and print it as JSON.
    Scene(SceneArgs),
    /// Randomize a model and print the resulting export document.
    Randomize(RandomizeArgs),
    /// Print the blend vocabulary, or decode a blend code.
    Blends(BlendsArgs),
    /// Print the named blend sets with their codes.
    Sets,
    /// Print the product table with palettes.
    Products,
    /// Print the canvas size presets of every group.
    Sizes,
}

#[derive(Parser, Debug)]
struct SceneArgs {
    /// Export document to build from; defaults to a fresh model.
    #[arg(long = "in")]
    in_path: Option<PathBuf>,

    /// Layer index to build.
    #[arg(long, default_value_t = 0)]
    layer: usize,

    /// Override face counts, columns then rows.
    #[arg(long, num_args = 2, value_names = ["COLS", "ROWS"])]
    faces: Option<Vec<u32>>,

    /// Override the palette with comma-separated colors.
    #[arg(long, value_delimiter = ',')]
    palette: Option<Vec<String>>,

    /// Resize the canvas to a preset, as `GROUP/LABEL` (e.g. `wallpaper/1920x1080`).
    /// `browser` keeps the current size.
    #[arg(long)]
    size: Option<String>,

    /// Add the third, ambient light.
    #[arg(long, default_value_t = false)]
    ambient_light: bool,

    /// Seed for vertex fuzz.
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Parser, Debug)]
struct RandomizeArgs {
    /// Export document to randomize; defaults to a fresh model.
    #[arg(long = "in")]
    in_path: Option<PathBuf>,

    /// Edit mode of a fresh model.
    #[arg(long, value_parser = parse_mode)]
    mode: Option<EditMode>,

    /// Layer count of a fresh model.
    #[arg(long)]
    layers: Option<usize>,

    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Parser, Debug)]
struct BlendsArgs {
    /// Blend code to decode, with or without the `#blends=` prefix.
    #[arg(long)]
    code: Option<String>,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Scene(args) => cmd_scene(args),
        Command::Randomize(args) => cmd_randomize(args),
        Command::Blends(args) => cmd_blends(args),
        Command::Sets => cmd_sets(),
        Command::Products => cmd_products(),
        Command::Sizes => cmd_sizes(),
    }
}

fn parse_mode(s: &str) -> Result<EditMode, String> {
    serde_json::from_value(serde_json::Value::String(s.to_string()))
        .map_err(|_| format!("unknown mode '{s}', expected advanced or production"))
}

fn parse_size_preset(spec: &str, current: [f32; 2]) -> anyhow::Result<[f32; 2]> {
    let Some((group, label)) = spec.split_once('/') else {
        bail!("size '{spec}' is not GROUP/LABEL");
    };
    let group: SizeGroup = serde_json::from_value(serde_json::Value::String(group.to_string()))
        .with_context(|| format!("unknown size group '{group}'"))?;
    Ok(size_preset(group, label)?.resolve(current))
}

fn rng_for(seed: Option<u64>) -> Pcg64 {
    let seed = seed.unwrap_or_else(rand::random);
    log::debug!("Using seed {seed}");
    Pcg64::seed_from_u64(seed)
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn read_document(path: &Path) -> anyhow::Result<(Model, LayerFuzz)> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("read export document '{}'", path.display()))?;
    import_document(&json).with_context(|| format!("import '{}'", path.display()))
}

fn cmd_scene(args: SceneArgs) -> anyhow::Result<()> {
    let settings = SettingsConfig::load();
    let (mut model, fuzz) = match &args.in_path {
        Some(path) => read_document(path)?,
        None => (settings.initial_model(), LayerFuzz::new()),
    };
    if let Some(spec) = &args.size {
        let size = parse_size_preset(spec, model.size)?;
        model.resize(size)?;
    }

    let Some(layer) = model.layers.get(args.layer) else {
        bail!("model has {} layers, no layer {}", model.layers.len(), args.layer);
    };
    let Some(base) = layer.model.as_ref() else {
        bail!("layer {} is {}, not an FSS layer", args.layer, layer.kind);
    };

    let mut fss = base.clone();
    if let Some(&[cols, rows]) = args.faces.as_deref() {
        fss.faces = [cols, rows];
    }
    if let Some(palette) = args.palette {
        fss.palette = Some(palette);
    }
    fss.ambient_light |= args.ambient_light;

    // Imported fuzz only fits the grid it was exported with.
    let carry = (fss == *base)
        .then(|| fuzz.get(&args.layer).map(Vec::as_slice))
        .flatten();
    let mut rng = rng_for(args.seed);
    let scene = build_scene(&model, &fss, carry, &settings.fuzz, &mut rng)?;
    print_json(&scene)
}

fn cmd_randomize(args: RandomizeArgs) -> anyhow::Result<()> {
    let settings = SettingsConfig::load();
    let model = match &args.in_path {
        Some(path) => read_document(path)?.0,
        None => Model::default_layers(
            args.mode.unwrap_or(settings.mode),
            args.layers.unwrap_or(settings.default_layers),
        ),
    };

    let mut rng = rng_for(args.seed);
    let mut mirror = PanelMirror::from_model(&model)?;
    let next = randomize_all(&model, &mut mirror, &mut rng, || {
        log::info!("Panel refreshed");
    });
    let scenes = rebuild_scenes(&next, &LayerFuzz::new(), &settings.fuzz, &mut rng)?;
    print_json(&export_model(&next, &scenes)?)
}

fn cmd_blends(args: BlendsArgs) -> anyhow::Result<()> {
    if let Some(code) = args.code {
        let layers = decode_blend_code(&code)?
            .into_iter()
            .map(|slot| slot.map(|d| decode(&d)).transpose())
            .collect::<Result<Vec<_>, _>>()?;
        return print_json(&layers);
    }

    let equations: Vec<_> = BlendFunc::ALL
        .iter()
        .map(|f| serde_json::json!({ "token": f.token(), "name": f.name(), "code": f.code() }))
        .collect();
    let factors: Vec<_> = BlendFactor::ALL
        .iter()
        .map(|f| serde_json::json!({ "token": f.token(), "name": f.name(), "code": f.code() }))
        .collect();
    let html: Vec<_> = HtmlBlend::ALL.iter().map(|m| m.name()).collect();
    print_json(&serde_json::json!({ "equations": equations, "factors": factors, "html": html }))
}

fn cmd_sets() -> anyhow::Result<()> {
    let sets = BlendSet::all()
        .iter()
        .map(|set| {
            let d = encode_preset(set.name, None)?;
            Ok(serde_json::json!({
                "name": set.name,
                "tokens": set.tokens(),
                "colorEq": d.color_eq,
                "alphaEq": d.alpha_eq,
            }))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;
    print_json(&sets)
}

fn cmd_products() -> anyhow::Result<()> {
    let products: Vec<_> = Product::all()
        .iter()
        .map(|p| serde_json::json!({ "id": p.id, "label": p.label, "palette": p.palette }))
        .collect();
    print_json(&products)
}

fn cmd_sizes() -> anyhow::Result<()> {
    let groups: serde_json::Map<_, _> = SizeGroup::ALL
        .iter()
        .map(|g| {
            let presets: Vec<_> = g
                .presets()
                .iter()
                .map(|p| serde_json::json!({ "label": p.label, "size": p.size }))
                .collect();
            (g.name().to_string(), serde_json::Value::Array(presets))
        })
        .collect();
    print_json(&groups)
}
