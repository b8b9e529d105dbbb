use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use std::path::Path;

use postbuild::cli::args::{Cli, Commands, CompletionShell, ConfigAction, OutputFormat};
use postbuild::cli::output::{self, StepPrinter};
use postbuild::common::config::PackConfig;
use postbuild::packager::{self, Launcher, NoopLauncher, SystemLauncher};
use postbuild::version::{RunMode, VersionResolver, VERSION_FILE_NAME};

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }

    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter("postbuild=debug")
            .with_writer(std::io::stderr)
            .init();
    }

    match cli.command {
        Commands::Run { no_launch, strict } => cmd_run(&cli, no_launch, strict),

        Commands::Version { frozen, ref file } => cmd_version(&cli, frozen, file.as_deref()),

        Commands::Config { ref action } => cmd_config(&cli, action),

        Commands::Completions { ref shell } => {
            use clap::CommandFactory;
            let mut cmd = Cli::command();
            let shell = match shell {
                CompletionShell::Bash => clap_complete::Shell::Bash,
                CompletionShell::Zsh => clap_complete::Shell::Zsh,
                CompletionShell::Fish => clap_complete::Shell::Fish,
            };
            clap_complete::generate(shell, &mut cmd, "postbuild", &mut std::io::stdout());
            Ok(())
        }
    }
}

fn load_config(cli: &Cli) -> Result<PackConfig> {
    let path = cli
        .config
        .clone()
        .unwrap_or_else(|| PackConfig::config_path(&cli.root));
    PackConfig::load(&path)
}

// ─── Run ──────────────────────────────────────────────────────────────────────

fn cmd_run(cli: &Cli, no_launch: bool, strict: bool) -> Result<()> {
    let mut config = load_config(cli)?;
    if no_launch {
        config.launch = false;
    }

    let launcher: &dyn Launcher = if config.launch {
        &SystemLauncher
    } else {
        &NoopLauncher
    };

    let human = matches!(cli.format, OutputFormat::Human) && !cli.quiet;
    if human {
        output::print_run_header(&config.app_name);
    }

    let mut printer = StepPrinter::new(config.layout(&cli.root).final_app_dir);
    let report = packager::run(&config, &cli.root, launcher, |record| {
        if human {
            printer.print(record);
        }
    });

    match cli.format {
        OutputFormat::Json => output::print_report_json(&report),
        OutputFormat::Human if human => output::print_run_footer(&report),
        OutputFormat::Human | OutputFormat::Quiet => output::print_report_quiet(&report),
    }

    if strict {
        if report.is_aborted() {
            anyhow::bail!("Packaging aborted: build output missing or relocation failed");
        }
        let failed = report.failed_count();
        if failed > 0 {
            anyhow::bail!("{} packaging step(s) failed", failed);
        }
    }

    Ok(())
}

// ─── Version ──────────────────────────────────────────────────────────────────

fn cmd_version(cli: &Cli, frozen: bool, file: Option<&Path>) -> Result<()> {
    let config = load_config(cli)?;
    let version_file = file
        .map(Path::to_path_buf)
        .unwrap_or_else(|| cli.root.join(VERSION_FILE_NAME));
    let mode = if frozen { RunMode::Frozen } else { RunMode::Source };

    let resolver = VersionResolver::new(config.frozen_version.clone(), version_file);
    let version = resolver.resolve(mode);

    match cli.format {
        OutputFormat::Json => {
            let value = serde_json::json!({
                "version": version,
                "mode": mode,
                "version_file": resolver.version_file,
            });
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        OutputFormat::Human | OutputFormat::Quiet => println!("{}", version),
    }

    Ok(())
}

// ─── Config ───────────────────────────────────────────────────────────────────

fn cmd_config(cli: &Cli, action: &ConfigAction) -> Result<()> {
    let path = cli
        .config
        .clone()
        .unwrap_or_else(|| PackConfig::config_path(&cli.root));

    match action {
        ConfigAction::Show => {
            let config = PackConfig::load(&path)?;
            println!("{}", toml::to_string_pretty(&config)?);
            if !cli.quiet {
                output::print_layout(&config.layout(&cli.root));
            }
            Ok(())
        }
        ConfigAction::Init { force } => {
            if path.exists() && !force {
                anyhow::bail!(
                    "Config already exists: {} (use --force to overwrite)",
                    path.display()
                );
            }
            PackConfig::default().save(&path)?;
            println!("  {} Wrote {}", "✓".green(), path.display());
            Ok(())
        }
    }
}
