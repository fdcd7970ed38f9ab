use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "badgeforge", version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a badge PNG.
    Render(RenderArgs),
    /// Print how the sentence wraps for a name.
    Layout(LayoutArgs),
}

#[derive(Args, Debug)]
struct ConfigArgs {
    /// Badge config JSON. Defaults are used when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the background template image.
    #[arg(long)]
    background: Option<PathBuf>,

    /// Override the primary font file.
    #[arg(long)]
    primary_font: Option<PathBuf>,

    /// Override the fallback font file.
    #[arg(long)]
    fallback_font: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct RenderArgs {
    #[command(flatten)]
    config: ConfigArgs,

    /// Name written into the sentence.
    #[arg(long, default_value = "")]
    name: String,

    /// Photo to place in the circular insert.
    #[arg(long)]
    photo: Option<PathBuf>,

    /// Send the photo to the removal service (reads REMOVE_BG_API_KEY).
    #[arg(long, default_value_t = false)]
    remove_bg: bool,

    /// Removal service endpoint.
    #[arg(long)]
    endpoint: Option<String>,

    /// Foreground scale.
    #[arg(long, default_value_t = 1.0)]
    scale: f64,

    /// Drag the foreground by DX,DY background pixels.
    #[arg(long, value_parser = parse_pair, allow_hyphen_values = true)]
    drag: Option<(f64, f64)>,

    /// Output directory; the file name comes from the config.
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,
}

#[derive(Args, Debug)]
struct LayoutArgs {
    #[command(flatten)]
    config: ConfigArgs,

    /// Name written into the sentence.
    #[arg(long)]
    name: String,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Layout(args) => cmd_layout(args),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(args: &ConfigArgs) -> anyhow::Result<badgeforge::BadgeConfig> {
    let mut cfg = match &args.config {
        Some(path) => badgeforge::BadgeConfig::from_path(path)?,
        None => badgeforge::BadgeConfig::default(),
    };
    if let Some(p) = &args.background {
        cfg.background = p.clone();
    }
    if let Some(p) = &args.primary_font {
        cfg.fonts.primary = p.clone();
    }
    if let Some(p) = &args.fallback_font {
        cfg.fonts.fallback = p.clone();
    }
    cfg.validate()?;
    Ok(cfg)
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let cfg = load_config(&args.config)?;
    let mut studio = badgeforge::Studio::open(cfg)?;
    studio.set_name(&args.name)?;

    if let Some(photo_path) = &args.photo {
        let photo = std::fs::read(photo_path)
            .with_context(|| format!("read photo '{}'", photo_path.display()))?;
        let outcome = if args.remove_bg {
            let mut client = badgeforge::RemoveBgClient::from_env()?;
            if let Some(endpoint) = &args.endpoint {
                client = client.with_endpoint(endpoint.clone());
            }
            studio.upload(&client, &photo)?
        } else {
            studio.upload(&badgeforge::Passthrough, &photo)?
        };
        tracing::info!(?outcome, "photo placed");

        studio.set_scale(args.scale)?;
        if let Some((dx, dy)) = args.drag {
            drag_by(&mut studio, dx, dy)?;
        }
    }

    let outcome = studio.download(&badgeforge::DownloadDir::new(&args.out_dir))?;
    match outcome {
        badgeforge::ExportOutcome::Saved(path) => eprintln!("wrote {}", path.display()),
        other => anyhow::bail!("nothing was rendered ({other:?})"),
    }
    Ok(())
}

/// Replay a drag as pointer input on a surface displayed at native size.
fn drag_by(studio: &mut badgeforge::Studio, dx: f64, dy: f64) -> anyhow::Result<()> {
    let Some(canvas) = studio.scene().canvas() else {
        return Ok(());
    };
    let display = badgeforge::DisplayRect {
        left: 0.0,
        top: 0.0,
        width: canvas.w(),
        height: canvas.h(),
    };
    let start = studio.scene().offset();
    studio.pointer_down(start.x, start.y, display)?;
    studio.pointer_move(start.x + dx, start.y + dy, display)?;
    studio.pointer_up();
    Ok(())
}

fn cmd_layout(args: LayoutArgs) -> anyhow::Result<()> {
    let cfg = load_config(&args.config)?;
    let mut studio = badgeforge::Studio::open(cfg)?;
    studio.set_name(&args.name)?;

    let Some(block) = studio.layout_text()? else {
        anyhow::bail!("name is blank; nothing to lay out");
    };
    for line in &block.lines {
        println!(
            "x={:>8.1} baseline={:>8.1} width={:>8.1}  {}",
            line.start_x(),
            block.baseline(line),
            line.width,
            line.text
        );
    }
    Ok(())
}

fn parse_pair(s: &str) -> Result<(f64, f64), String> {
    let (a, b) = s
        .split_once(',')
        .ok_or_else(|| format!("expected DX,DY, got '{s}'"))?;
    let parse = |v: &str| {
        v.trim()
            .parse::<f64>()
            .map_err(|e| format!("invalid number '{v}': {e}"))
    };
    Ok((parse(a)?, parse(b)?))
}
