//! Tiny Glade mesh buffer CLI
//!
//! Inspect, validate and convert Tiny Glade JSON mesh buffers.

use clap::{Parser, Subcommand};
use std::fs;
use std::path::PathBuf;
use tiny_glade_mesh::{encode, encode_pretty, export_obj, load_buffer, AttributeName, MeshBuffer};

#[derive(Parser)]
#[command(name = "tg-mesh")]
#[command(author, version, about = "Inspect and convert Tiny Glade JSON mesh buffers", long_about = None)]
struct Cli {
    /// Print debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the attributes and counts of a buffer
    Info {
        /// Input JSON buffer
        input: PathBuf,
    },

    /// Decode and validate a buffer, exiting non-zero on failure
    Check {
        /// Input JSON buffer
        input: PathBuf,
    },

    /// Decode then re-encode a buffer
    Reformat {
        /// Input JSON buffer
        input: PathBuf,

        /// Output file path
        #[arg(short, long)]
        output: PathBuf,

        /// Indent with four spaces instead of writing compact JSON
        #[arg(long)]
        pretty: bool,
    },

    /// Write a Wavefront OBJ preview of a buffer
    Obj {
        /// Input JSON buffer
        input: PathBuf,

        /// Output file path (without extension)
        #[arg(short, long)]
        output: PathBuf,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match cli.command {
        Commands::Info { input } => show_info(&input)?,
        Commands::Check { input } => {
            let buffer = load_buffer(&input)?;
            println!(
                "{:?}: OK ({} vertices, {} triangles)",
                input,
                buffer.vertex_count(),
                buffer.triangle_count()
            );
        }
        Commands::Reformat {
            input,
            output,
            pretty,
        } => {
            let buffer = load_buffer(&input)?;
            let bytes = if pretty {
                encode_pretty(&buffer)?
            } else {
                encode(&buffer)?
            };
            fs::write(&output, &bytes)?;
            println!("Wrote {} bytes to {:?}", bytes.len(), output);
        }
        Commands::Obj { input, output } => {
            let buffer = load_buffer(&input)?;
            let name = input
                .file_stem()
                .and_then(|stem| stem.to_str())
                .unwrap_or("mesh");
            let obj_path = if output.extension().is_some() {
                output.clone()
            } else {
                output.with_extension("obj")
            };
            fs::write(&obj_path, export_obj(&buffer, name)?)?;
            println!("Exported OBJ to {:?}", obj_path);
        }
    }

    Ok(())
}

fn show_info(input: &PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    println!("Loading mesh buffer from {:?}...", input);
    let buffer = load_buffer(input)?;

    println!("\nMesh Buffer Info:");
    println!("  Vertices: {}", buffer.vertex_count());
    println!("  Triangles: {}", buffer.triangle_count());
    if !buffer.has_indices() {
        println!("  Indices: none");
    }

    println!("  Attributes:");
    for &name in buffer.attribute_names() {
        println!(
            "    - {} {} x {}",
            name,
            name.attribute_type(),
            buffer.attribute_len(name)
        );
    }

    if let Some(bounds) = buffer.bounds() {
        let [w, h, d] = bounds.dimensions();
        println!("  Bounds: {:?} to {:?}", bounds.min, bounds.max);
        println!("  Size: {} x {} x {}", w, h, d);
    }

    print_flag_summary(&buffer, AttributeName::IsMetal, buffer.is_metal());
    print_flag_summary(&buffer, AttributeName::IsGlass, buffer.is_glass());

    Ok(())
}

fn print_flag_summary(buffer: &MeshBuffer, name: AttributeName, values: &[i32]) {
    if buffer.has(name) {
        let set = values.iter().filter(|&&v| v == 1).count();
        println!("  {}: {} of {} vertices", name, set, values.len());
    }
}
