use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// postbuild: post-build packaging and version helper
#[derive(Parser, Debug)]
#[command(
    name = "postbuild",
    version,
    about = "Post-build packaging and version helper",
    long_about = "postbuild moves a fresh build into its final folder, removes temporary\n\
                   build directories, copies extra assets, and launches the result.",
    after_help = "EXAMPLES:\n  \
        postbuild run                          Package the app in the current project\n  \
        postbuild run --root ../Stopwatch      Package another project\n  \
        postbuild run --no-launch --strict     CI mode: no launch, fail on errors\n  \
        postbuild run --format json            Machine-readable report\n  \
        postbuild version                      Print the resolved app version\n  \
        postbuild version --frozen             Print the packaged-build version\n  \
        postbuild config init                  Write a default postbuild.toml\n  \
        postbuild config show                  Show the effective configuration"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Project root directory
    #[arg(long, short, global = true, default_value = ".", value_name = "DIR")]
    pub root: PathBuf,

    /// Config file (defaults to <root>/postbuild.toml)
    #[arg(long, short, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, default_value = "human")]
    pub format: OutputFormat,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Verbose output
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Quiet mode, minimal output
    #[arg(long, short, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Relocate the build, purge temporaries, copy assets, launch
    Run {
        /// Do not launch the executable afterwards
        #[arg(long)]
        no_launch: bool,

        /// Exit with an error if the run aborted or any step failed
        #[arg(long)]
        strict: bool,
    },

    /// Print the application version
    Version {
        /// Treat this as a packaged (frozen) run
        #[arg(long, env = "POSTBUILD_FROZEN")]
        frozen: bool,

        /// Version file to read (defaults to <root>/VERSION)
        #[arg(long, value_name = "FILE")]
        file: Option<PathBuf>,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: CompletionShell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show the effective configuration
    Show,

    /// Write a default config file
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}

#[derive(ValueEnum, Clone, Debug, PartialEq)]
pub enum OutputFormat {
    Human,
    Json,
    Quiet,
}

#[derive(ValueEnum, Clone, Debug)]
pub enum CompletionShell {
    Bash,
    Zsh,
    Fish,
}
