use std::path::{Path, PathBuf};

use anyhow::{Context as _, bail};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "scrollfx", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load and validate a scene JSON.
    Validate(ValidateArgs),
    /// Scroll a scene through a range of offsets and print every node per position.
    Sample(SampleArgs),
    /// Evaluate a mapping at one progress value.
    Eval(EvalArgs),
    /// Print a card stack layout.
    Stack(StackArgs),
}

#[derive(Parser, Debug)]
struct ValidateArgs {
    /// Input scene JSON.
    #[arg(long)]
    scene: PathBuf,
}

#[derive(Parser, Debug)]
struct SampleArgs {
    /// Input scene JSON.
    #[arg(long)]
    scene: PathBuf,

    /// First scroll offset in px.
    #[arg(long, default_value_t = 0.0)]
    from: f64,

    /// Last scroll offset in px (inclusive).
    #[arg(long)]
    to: f64,

    /// Scroll increment in px.
    #[arg(long, default_value_t = 100.0)]
    step: f64,

    /// Seconds per frame fed to springs.
    #[arg(long, default_value_t = 1.0 / 60.0)]
    dt: f64,

    /// Only print this node.
    #[arg(long)]
    node: Option<String>,
}

#[derive(Parser, Debug)]
struct EvalArgs {
    /// Breakpoints as `progress:value` pairs, e.g. `0:1,0.2:0.8,0.4:0.5`.
    #[arg(long)]
    mapping: String,

    /// Progress to evaluate at (clamped to [0, 1]).
    #[arg(long)]
    progress: f64,

    /// Easing applied inside every segment.
    #[arg(long, default_value = "linear")]
    ease: String,
}

#[derive(Parser, Debug)]
struct StackArgs {
    /// Number of items.
    #[arg(long)]
    items: usize,

    /// Shared progress.
    #[arg(long)]
    progress: f64,

    /// Pin position of the first item in px.
    #[arg(long, default_value_t = 0.0)]
    stack_position: f64,

    /// Extra pin offset per item in px.
    #[arg(long, default_value_t = 40.0)]
    stack_distance: f64,

    /// Spacing of upcoming items in px.
    #[arg(long, default_value_t = 100.0)]
    item_distance: f64,

    /// Scale of upcoming items.
    #[arg(long, default_value_t = 0.8)]
    base_scale: f64,

    /// Scale lost per level of depth.
    #[arg(long, default_value_t = 0.05)]
    item_scale: f64,

    /// Handoff ramp width as a fraction of one item window.
    #[arg(long, default_value_t = 0.25)]
    handoff: f64,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Validate(args) => cmd_validate(args),
        Command::Sample(args) => cmd_sample(args),
        Command::Eval(args) => cmd_eval(args),
        Command::Stack(args) => cmd_stack(args),
    }
}

fn load_scene(path: &Path) -> anyhow::Result<scrollfx::Scene> {
    scrollfx::Scene::from_path(path).with_context(|| format!("load scene '{}'", path.display()))
}

fn cmd_validate(args: ValidateArgs) -> anyhow::Result<()> {
    let scene = load_scene(&args.scene)?;
    let bindings: usize = scene.tracks.iter().map(|t| t.bindings.len()).sum();
    println!(
        "{}",
        serde_json::json!({
            "ok": true,
            "elements": scene.elements.len(),
            "tracks": scene.tracks.len(),
            "bindings": bindings,
            "reveals": scene.reveals.len(),
        })
    );
    Ok(())
}

fn cmd_sample(args: SampleArgs) -> anyhow::Result<()> {
    if !(args.step.is_finite() && args.step > 0.0) {
        bail!("--step must be > 0");
    }
    if !(args.from.is_finite() && args.to.is_finite()) || args.to < args.from {
        bail!("--from/--to must be finite with from <= to");
    }

    let scene = load_scene(&args.scene)?;
    let mut session = scrollfx::SceneSession::new(scene, scrollfx::TrackerOpts::default())?;
    let mut target = scrollfx::RecordingTarget::new();

    let positions = ((args.to - args.from) / args.step).floor() as u64;
    for i in 0..=positions {
        let scroll = args.from + i as f64 * args.step;
        session.scroll_to(scroll);
        let report = session
            .step(args.dt, &mut target)
            .with_context(|| format!("step at scroll {scroll}"))?;

        let mut progress = serde_json::Map::new();
        let names: Vec<String> = session.track_names().map(str::to_string).collect();
        for name in names {
            let p = session.progress(&name)?;
            progress.insert(name, serde_json::json!(p));
        }

        let nodes: serde_json::Map<String, serde_json::Value> = target
            .nodes()
            .iter()
            .filter(|(id, _)| args.node.as_deref().is_none_or(|n| n == id.as_str()))
            .map(|(id, p)| serde_json::to_value(p).map(|v| (id.to_string(), v)))
            .collect::<Result<_, _>>()?;

        let reveals: Vec<serde_json::Value> = report
            .reveals
            .iter()
            .filter_map(|(w, e)| {
                session
                    .watched_element(*w)
                    .map(|el| serde_json::json!({ "element": el, "event": e }))
            })
            .collect();

        println!(
            "{}",
            serde_json::json!({
                "scroll": scroll,
                "progress": progress,
                "nodes": nodes,
                "reveals": reveals,
            })
        );
    }
    Ok(())
}

fn parse_mapping(text: &str) -> anyhow::Result<scrollfx::Mapping> {
    let breakpoints = text
        .split(',')
        .map(|pair| {
            let (p, v) = pair
                .split_once(':')
                .with_context(|| format!("breakpoint '{pair}' must be progress:value"))?;
            let p: f64 = p.trim().parse().with_context(|| format!("progress in '{pair}'"))?;
            let v: f64 = v.trim().parse().with_context(|| format!("value in '{pair}'"))?;
            Ok(scrollfx::Breakpoint::new(p, v))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;
    Ok(scrollfx::Mapping::new(breakpoints)?)
}

fn cmd_eval(args: EvalArgs) -> anyhow::Result<()> {
    let ease: scrollfx::Ease = args.ease.parse()?;
    let mapping = parse_mapping(&args.mapping)?.with_ease(ease);
    let progress = scrollfx::Progress::new(args.progress);
    println!(
        "{}",
        serde_json::json!({
            "progress": progress,
            "value": scrollfx::evaluate(&mapping, progress),
        })
    );
    Ok(())
}

fn cmd_stack(args: StackArgs) -> anyhow::Result<()> {
    let config = scrollfx::StackConfig {
        stack_position: args.stack_position,
        stack_distance: args.stack_distance,
        item_distance: args.item_distance,
        base_scale: args.base_scale,
        item_scale: args.item_scale,
        handoff: args.handoff,
        ..scrollfx::StackConfig::default()
    };
    config.validate()?;
    let placements =
        scrollfx::layout_count(args.items, scrollfx::Progress::new(args.progress), &config);
    println!("{}", serde_json::to_string(&placements)?);
    Ok(())
}
