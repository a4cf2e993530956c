use anyhow::Result;
use clap::{Parser, Subcommand};
use flagfilter::areas::flags::FlagSet;
use flagfilter::areas::pipeline::Pipeline;
use flagfilter::areas::reporter::{Reporter, SilentReporter, WriterReporter};
use flagfilter::artifacts::core::CommandOutput;
use flagfilter::commands::filter::FilterOptions;
use is_terminal::IsTerminal;
use std::rc::Rc;

#[derive(Parser)]
#[command(
    name = "flagfilter",
    version = "0.1.0",
    author = "Sami Barbut-Dica",
    about = "Filter release commits by feature flag",
    long_about = "Drops commits marked with `Feature-Flag: <NAME>` unless \
    FEATURE_<NAME>=true is set in the environment. \
    Unmarked commits are always kept.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
",
)]
struct Cli {
    #[arg(
        short = 'C',
        long = "repo",
        global = true,
        help = "Path to the git repository (defaults to the current directory)"
    )]
    repo: Option<String>,
    #[arg(
        short,
        long,
        global = true,
        help = "Print filter diagnostics to stderr"
    )]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(
        name = "filter",
        about = "Print the commits that survive the feature flag filter",
        long_about = "This command reads the commits of each path with git log, \
        drops the ones whose feature flag is not enabled and prints the rest."
    )]
    Filter {
        #[arg(
            short,
            long = "path",
            help = "Path to filter independently (repeatable, defaults to the whole repository)"
        )]
        paths: Vec<String>,
        #[arg(short, long, help = "Revision range to read, e.g. v1.2.0..HEAD")]
        range: Option<String>,
        #[arg(
            long,
            help = "Pull in older commits of enabled flags from the full history"
        )]
        backfill: bool,
        #[arg(long, help = "Show one commit per line")]
        oneline: bool,
    },
    #[command(
        name = "flags",
        about = "List the feature flags set in the environment"
    )]
    Flags,
    #[command(
        name = "check",
        about = "Explain whether a commit message would be kept",
        long_about = "This command evaluates a single commit message, and optionally \
        the change-request body holding its override block, against the environment."
    )]
    Check {
        #[arg(short, long, help = "The commit message")]
        message: String,
        #[arg(short = 'o', long = "override", help = "The change-request body")]
        override_text: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if !std::io::stdout().is_terminal() {
        colored::control::set_override(false);
    }

    let repo = match cli.repo {
        Some(repo) => repo,
        None => std::env::current_dir()?.to_string_lossy().to_string(),
    };
    let reporter: Rc<dyn Reporter> = if cli.verbose {
        Rc::new(WriterReporter::stderr())
    } else {
        Rc::new(SilentReporter)
    };

    match &cli.command {
        Commands::Filter {
            paths,
            range,
            backfill,
            oneline,
        } => {
            let output = CommandOutput::detect();
            let pipeline = Pipeline::new(&repo, output.writer(), FlagSet::from_env(), reporter)?;

            pipeline
                .filter(&FilterOptions {
                    paths: paths.clone(),
                    range: range.clone(),
                    backfill: *backfill,
                    oneline: *oneline,
                })
                .await?;

            drop(pipeline);
            output.finish()?
        }
        Commands::Flags => {
            let pipeline = Pipeline::new(
                &repo,
                Box::new(std::io::stdout()),
                FlagSet::from_env(),
                reporter,
            )?;

            pipeline.flags()?
        }
        Commands::Check {
            message,
            override_text,
        } => {
            let pipeline = Pipeline::new(
                &repo,
                Box::new(std::io::stdout()),
                FlagSet::from_env(),
                reporter,
            )?;

            pipeline.check(message, override_text.as_deref())?
        }
    }

    Ok(())
}
