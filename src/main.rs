//! faceform - Deterministic facial exercise program generator
//!
//! Thin CLI around the generator; the library does all the work.

use anyhow::Result;
use clap::{Parser, Subcommand};

use faceform::exercises::all_exercises;
use faceform::{ScoreVector, generate_program};

#[derive(Parser)]
#[command(name = "faceform")]
#[command(author, version, about = "Deterministic 70-day facial exercise program generator")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a program from the seven facial metric scores (0-100)
    Generate {
        #[arg(long)]
        jawline: f64,

        #[arg(long)]
        cheekbones: f64,

        #[arg(long)]
        eyes_symmetry: f64,

        #[arg(long)]
        nose_harmony: f64,

        #[arg(long)]
        facial_symmetry: f64,

        #[arg(long)]
        skin_quality: f64,

        #[arg(long)]
        sexual_dimorphism: f64,

        /// Print the full program as JSON instead of a summary
        #[arg(long)]
        json: bool,

        /// Show the full exercise list for one day only
        #[arg(short, long)]
        day: Option<u32>,
    },

    /// List the compiled-in exercise catalog
    Catalog,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            jawline,
            cheekbones,
            eyes_symmetry,
            nose_harmony,
            facial_symmetry,
            skin_quality,
            sexual_dimorphism,
            json,
            day,
        } => {
            let scores = ScoreVector {
                jawline,
                cheekbones,
                eyes_symmetry,
                nose_harmony,
                facial_symmetry,
                skin_quality,
                sexual_dimorphism,
            };
            let program = generate_program(&scores)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&program)?);
                return Ok(());
            }

            println!(
                "Program {} (version {}, {} days)",
                program.program_id, program.version, program.day_count
            );
            println!("{:-<60}", "");

            match day {
                Some(n) => {
                    let Some(d) = program.days.iter().find(|d| d.day_number == n) else {
                        anyhow::bail!("day {n} is outside the program (1-{})", program.day_count);
                    };
                    let focus: Vec<&str> = d.focus_areas.iter().map(|a| a.label()).collect();
                    println!(
                        "Day {} | week {} | {} | focus: {}{}",
                        d.day_number,
                        d.week_number,
                        d.phase.label(),
                        focus.join(", "),
                        if d.is_recovery_day { " | recovery" } else { "" }
                    );
                    for p in &d.exercises {
                        println!(
                            "  {}. {} [{}]",
                            p.order,
                            p.exercise.name,
                            p.exercise.intensity.label()
                        );
                        println!("     {}", p.exercise.protocol);
                    }
                }
                None => {
                    for d in &program.days {
                        let focus: Vec<&str> = d.focus_areas.iter().map(|a| a.label()).collect();
                        let names: Vec<&str> =
                            d.exercises.iter().map(|p| p.exercise.name).collect();
                        println!(
                            "Day {:2} | week {:2} | {:11} | {:24} | {}{}",
                            d.day_number,
                            d.week_number,
                            d.phase.label(),
                            focus.join(", "),
                            names.join("; "),
                            if d.is_recovery_day { " (recovery)" } else { "" }
                        );
                    }
                }
            }
        }

        Commands::Catalog => {
            println!("Exercise catalog ({} entries)", all_exercises().len());
            println!("{:-<60}", "");
            for e in all_exercises() {
                println!(
                    "{:24} | {:9} | {:6} | {}",
                    e.id,
                    e.role.label(),
                    e.intensity.label(),
                    e.name
                );
            }
        }
    }

    Ok(())
}
