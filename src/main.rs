use std::io::{self, Read};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use lintree::{notation, ArrayTree, EditConfig, Placement, Preference};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "lintree", about = "Edit trees written as a(b(d,e),c)")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print a tree with its size, height and leaf count.
    Show {
        /// Tree in text notation, or `-` to read stdin.
        tree: String,
    },
    /// Print every root-to-leaf branch, one per line.
    Branches {
        /// Tree in text notation, or `-` to read stdin.
        tree: String,
        /// Separator between values of a branch.
        #[arg(long, default_value = "/")]
        separator: String,
    },
    /// Add a branch, reusing its longest existing prefix.
    Insert {
        /// Tree in text notation, or `-` to read stdin.
        tree: String,
        /// Branch from the root, values separated by `/`.
        #[arg(value_delimiter = '/')]
        branch: Vec<String>,
        #[command(flatten)]
        edit: EditArgs,
    },
    /// Remove the value at a path, promoting its children.
    Remove {
        /// Tree in text notation, or `-` to read stdin.
        tree: String,
        /// Path from the root, values separated by `/`.
        #[arg(value_delimiter = '/')]
        path: Vec<String>,
        #[command(flatten)]
        edit: EditArgs,
    },
    /// Merge equal siblings at every depth.
    Distinct {
        /// Tree in text notation, or `-` to read stdin.
        tree: String,
        /// Keep the later of two equal siblings.
        #[arg(long)]
        rightmost: bool,
    },
    /// Merge the node at one path into the node at another.
    Merge {
        /// Tree in text notation, or `-` to read stdin.
        tree: String,
        /// Path of the node that receives the children.
        #[arg(long, value_delimiter = '/')]
        recipient: Vec<String>,
        /// Path of the node that is merged away.
        #[arg(long, value_delimiter = '/')]
        donor: Vec<String>,
    },
}

#[derive(Args, Debug)]
struct EditArgs {
    /// Allow equal siblings instead of merging them.
    #[arg(long)]
    lax: bool,
    /// Place new children before existing ones.
    #[arg(long)]
    prepend: bool,
    /// Prefer the later of two equal siblings.
    #[arg(long)]
    rightmost: bool,
}

impl EditArgs {
    fn config(&self) -> EditConfig {
        let config = if self.lax {
            EditConfig::lax()
        } else {
            EditConfig::distinct()
        };
        config
            .with_placement(if self.prepend {
                Placement::Prepend
            } else {
                Placement::Append
            })
            .with_preference(preference(self.rightmost))
    }
}

fn preference(rightmost: bool) -> Preference {
    if rightmost {
        Preference::Rightmost
    } else {
        Preference::Leftmost
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("lintree=warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Show { tree } => {
            let tree = load_tree(&tree)?;
            println!("{tree}");
            println!(
                "size={} height={} leaves={}",
                tree.size(),
                tree.height(),
                tree.leaves_count()
            );
        }
        Commands::Branches { tree, separator } => {
            let tree = load_tree(&tree)?;
            for branch in tree.branch_strings(&separator) {
                println!("{branch}");
            }
        }
        Commands::Insert { tree, branch, edit } => {
            let tree = load_tree(&tree)?;
            println!("{}", tree.insert_branch(&branch, edit.config()));
        }
        Commands::Remove { tree, path, edit } => {
            let tree = load_tree(&tree)?;
            let result = tree
                .remove_value_at(&path, edit.config())
                .with_context(|| format!("failed to remove {}", path.join("/")))?;
            println!("{result}");
        }
        Commands::Distinct { tree, rightmost } => {
            let tree = load_tree(&tree)?;
            println!("{}", tree.make_distinct(preference(rightmost)));
        }
        Commands::Merge {
            tree,
            recipient,
            donor,
        } => {
            let tree = load_tree(&tree)?;
            println!(
                "{}",
                tree.merge_deeply(&recipient, &donor, Preference::Leftmost)
            );
        }
    }

    Ok(())
}

fn load_tree(source: &str) -> Result<ArrayTree<String>> {
    let text = if source == "-" {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .context("failed to read tree from stdin")?;
        text
    } else {
        source.to_string()
    };
    notation::parse(&text).with_context(|| format!("failed to parse tree `{}`", text.trim()))
}
