use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "vlm-bake")]
#[command(about = "Bake static vertex lighting for JSON scene descriptions", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Suppress progress output (only show errors)
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Bake a scene and write per-vertex colors as JSON
    Bake {
        /// Scene description (JSON)
        scene: PathBuf,

        /// Output file for baked colors
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Apply baked colors and write vertex-colored OBJ meshes
    Apply {
        /// Scene description (JSON)
        scene: PathBuf,

        /// Baked colors produced by `bake`
        baked: PathBuf,

        /// Output directory for .obj files
        #[arg(short, long)]
        output: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging (suppressed if --quiet)
    if !cli.quiet {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .init();
    }

    let result = match cli.command {
        Commands::Bake { scene, output } => {
            vlm_bake::bake_scene_file(&scene, &output).map(|report| {
                if !cli.quiet {
                    eprintln!(
                        "Success: baked {} meshes ({} skipped) -> {}",
                        report.baked.len(),
                        report.skipped.len(),
                        output.display()
                    );
                }
            })
        }
        Commands::Apply {
            scene,
            baked,
            output,
        } => vlm_bake::apply_baked_file(&scene, &baked, &output).map(|written| {
            if !cli.quiet {
                eprintln!(
                    "Success: wrote {} meshes to {}",
                    written.len(),
                    output.display()
                );
            }
        }),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
