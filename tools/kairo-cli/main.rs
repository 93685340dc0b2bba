use clap::{Parser, ValueEnum};
use kairo::prelude::*;
use std::fs;
use std::time::Instant;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Output format for the final scene.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Svg,
    Json,
}

/// Replays editor sessions against the flow canvas engine and renders the result
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to a JSON array of editor events to replay
    #[arg(short, long)]
    script: Option<String>,

    /// Path to an editor config JSON file
    #[arg(short, long)]
    config: Option<String>,

    /// Path to a graph JSON file to start from instead of the demonstration flow
    #[arg(short, long)]
    graph: Option<String>,

    /// Where to write the rendered scene. Prints to stdout when omitted
    #[arg(short, long)]
    output: Option<String>,

    /// Output format of the rendered scene
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Svg)]
    format: OutputFormat,

    /// Width of the rendered canvas in pixels
    #[arg(long, default_value_t = 1280.0)]
    width: f64,

    /// Height of the rendered canvas in pixels
    #[arg(long, default_value_t = 800.0)]
    height: f64,

    /// Fit the whole graph into the canvas before rendering
    #[arg(long)]
    fit: bool,

    /// List the palette catalog and exit
    #[arg(long)]
    palette: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("kairo=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if cli.palette {
        print_palette();
        return;
    }
    if let Err(e) = run(cli) {
        exit_with_error(&e.to_string());
    }
}

fn run(cli: Cli) -> Result<()> {
    let total_start = Instant::now();

    // --- 1. Editor Setup ---
    let config = match &cli.config {
        Some(path) => {
            info!(path = %path, "loading editor config");
            EditorConfig::from_file(path)?
        }
        None => EditorConfig::default(),
    };
    let mut builder = FlowEditor::builder()
        .with_config(config)
        .with_listener(RecordingListener::default());
    if let Some(path) = &cli.graph {
        info!(path = %path, "loading graph");
        let json = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read graph file '{}': {}", path, e))?;
        let graph: FlowGraph = serde_json::from_str(&json)
            .map_err(|e| format!("Failed to parse graph JSON: {}", e))?;
        builder = builder.with_graph(graph);
    }
    let mut editor = builder.build()?;

    // --- 2. Replay ---
    let events = match &cli.script {
        Some(path) => {
            let json = fs::read_to_string(path)
                .map_err(|e| format!("Failed to read script file '{}': {}", path, e))?;
            EditorEvent::parse_script(&json)
                .map_err(|e| format!("Failed to parse script JSON: {}", e))?
        }
        None => Vec::new(),
    };
    let replay_start = Instant::now();
    editor.replay(&events);
    let replay_duration = replay_start.elapsed();
    info!(events = events.len(), ?replay_duration, "replay finished");

    if cli.fit {
        editor.fit_view(cli.width, cli.height);
    }

    // --- 3. Render ---
    let scene = editor.scene();
    let rendered = match cli.format {
        OutputFormat::Svg => scene.to_svg(&SvgOptions {
            width: cli.width,
            height: cli.height,
            show_handles: true,
        }),
        OutputFormat::Json => serde_json::to_string_pretty(&scene)?,
    };
    match &cli.output {
        Some(path) => {
            fs::write(path, rendered)
                .map_err(|e| format!("Could not write to file '{}': {}", path, e))?;
            info!(path = %path, "scene written");
        }
        None => println!("{}", rendered),
    }

    // --- 4. Summary ---
    eprintln!("\n--- Session Summary ---");
    eprintln!("Events Replayed:   {}", events.len());
    eprintln!("Nodes:             {}", editor.graph().node_count());
    eprintln!("Edges:             {}", editor.graph().edge_count());
    eprintln!("Zoom:              {:.2}", editor.viewport().zoom());
    eprintln!("Selection:         {:?}", editor.selection());
    eprintln!("Animating Edges:   {}", scene.animating_edges().count());
    eprintln!("Notifications:");
    for event in editor.listener().events() {
        eprintln!("  -> {:?}", event);
    }
    eprintln!("-----------------------------");
    eprintln!("Replay:            {:?}", replay_duration);
    eprintln!("Total Execution:   {:?}", total_start.elapsed());
    Ok(())
}

fn print_palette() {
    let palette = Palette::default();
    for category in &palette.categories {
        println!("{}", category.title);
        for item in &category.items {
            let payload = item.to_json().unwrap_or_default();
            println!("  {:<18} {:<20} {}", item.id, item.name, payload);
        }
    }
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
