//! `cg`: render the commit graph of a git repository from the command line.

#[cfg(feature = "git")]
mod git;
mod render;

use std::fs::File;
use std::io::Write as _;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde::Serialize;

use commit_graph::{calculate_layout, edge_paths, render_svg, Commit, GraphEdge, GraphLayout};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the commit graph as text
    Log {
        /// Path to (or inside) the repository
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Walk all local branches instead of just HEAD
        #[arg(long)]
        all: bool,

        /// Stop after this many commits
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },

    /// Write the commit graph as an SVG file
    Svg {
        /// Path to (or inside) the repository
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Output file
        #[arg(short, long, default_value = "graph.svg")]
        output: PathBuf,

        #[arg(long)]
        all: bool,

        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },

    /// Dump commits, layout and edges as JSON for an external renderer
    Export {
        /// Path to (or inside) the repository
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Output file; stdout if not given
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[arg(long)]
        all: bool,

        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },
}

#[derive(Serialize)]
struct ExportedGraph<'a> {
    commits: &'a [Commit],
    layout: &'a GraphLayout,
    edges: &'a [GraphEdge],
}

#[cfg(feature = "git")]
fn load(path: &PathBuf, all: bool, limit: Option<usize>) -> anyhow::Result<Vec<Commit>> {
    git::load_commits(path, all, limit)
}

#[cfg(not(feature = "git"))]
fn load(_path: &PathBuf, _all: bool, _limit: Option<usize>) -> anyhow::Result<Vec<Commit>> {
    anyhow::bail!("cg was built without the 'git' feature");
}

fn main() -> anyhow::Result<()> {
    let cli: Cli = Cli::parse();

    match cli.command {
        Commands::Log { path, all, limit } => {
            let commits = load(&path, all, limit)?;
            let layout = calculate_layout(&commits);
            print!("{}", render::ascii_graph(&commits, &layout));
        }

        Commands::Svg {
            path,
            output,
            all,
            limit,
        } => {
            let commits = load(&path, all, limit)?;
            let layout = calculate_layout(&commits);
            let svg = render_svg(&commits, &layout);
            std::fs::write(&output, svg)?;
            println!(
                "Wrote {} commits ({} lanes) to {}",
                commits.len(),
                layout.max_lane + 1,
                output.display()
            );
        }

        Commands::Export {
            path,
            output,
            all,
            limit,
        } => {
            let commits = load(&path, all, limit)?;
            let layout = calculate_layout(&commits);
            let edges = edge_paths(&commits, &layout);
            let exported = ExportedGraph {
                commits: &commits,
                layout: &layout,
                edges: &edges,
            };

            match output {
                Some(out_path) => {
                    let mut f = File::create(&out_path)?;
                    serde_json::to_writer_pretty(&mut f, &exported)?;
                    f.write_all(b"\n")?;
                }
                None => println!("{}", serde_json::to_string_pretty(&exported)?),
            }
        }
    }

    Ok(())
}
