use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use tolmut::codegen::stack::stack_delta;
use tolmut::parser::{parse_listing_file, print_listing};
use tolmut::{mutate_method, ClassInfo, Config, MethodInfo, MutatorKind};

#[derive(Parser)]
#[command(name = "tolmut")]
#[command(about = "Call-removal mutation for JVM method bodies")]
#[command(version)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the call sites a mutator may remove
    List {
        #[command(flatten)]
        method: MethodArgs,
    },

    /// Remove one call site and print the mutated listing
    Mutate {
        #[command(flatten)]
        method: MethodArgs,

        /// Index of the occurrence to remove, as shown by `list`
        #[arg(short, long)]
        target: Option<usize>,

        /// Write the mutated listing here instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Show the operand stack effect of each instruction
    Effect {
        /// Input listing
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },
}

/// The method a listing belongs to
#[derive(Args)]
struct MethodArgs {
    /// Input listing
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Internal name of the enclosing class
    #[arg(long, value_name = "NAME")]
    class: String,

    /// Internal name of its superclass
    #[arg(long = "super", value_name = "NAME", default_value = "java/lang/Object")]
    super_name: String,

    /// Method name
    #[arg(long, default_value = "run")]
    method: String,

    /// Method descriptor
    #[arg(long, default_value = "()V")]
    descriptor: String,

    /// Mutator: METHOD_CALLS, VOID_METHOD_CALLS, NON_VOID_METHOD_CALLS or CONSTRUCTOR_CALLS
    #[arg(short, long)]
    mutator: Option<MutatorKind>,
}

impl MethodArgs {
    fn method_info(&self) -> MethodInfo {
        MethodInfo::new(
            ClassInfo::new(&self.class, &self.super_name),
            &self.method,
            &self.descriptor,
        )
    }

    fn config(&self, verbose: bool) -> Result<Config> {
        let mut config = Config::from_env()?.with_verbose(verbose);
        if let Some(mutator) = self.mutator {
            config = config.with_mutator(mutator);
        }
        Ok(config)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    match &cli.command {
        Commands::List { method } => {
            list_mutations(method, cli.verbose)?;
        }
        Commands::Mutate { method, target, output } => {
            mutate_file(method, *target, output.as_deref(), cli.verbose)?;
        }
        Commands::Effect { input } => {
            show_effects(input)?;
        }
    }

    Ok(())
}

fn init_logger(verbose: bool) {
    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn list_mutations(args: &MethodArgs, verbose: bool) -> Result<()> {
    let config = args.config(verbose)?;
    let body = parse_listing_file(&args.input)?;
    let run = mutate_method(body, &args.method_info(), &config);

    for details in &run.mutations {
        println!("{}\t{}", details.id.index, details.description);
        if config.verbose {
            println!("\t{}", details.id);
        }
    }
    Ok(())
}

fn mutate_file(
    args: &MethodArgs,
    target: Option<usize>,
    output: Option<&Path>,
    verbose: bool,
) -> Result<()> {
    let mut config = args.config(verbose)?;
    if let Some(index) = target {
        config = config.with_target(index);
    }
    if config.target.is_none() {
        anyhow::bail!("no occurrence selected: pass --target or set TOLMUT_TARGET");
    }

    let body = parse_listing_file(&args.input)?;
    let run = mutate_method(body, &args.method_info(), &config);
    let activated = run
        .activated
        .as_ref()
        .with_context(|| format!("{} has no such occurrence", args.input.display()))?;
    log::info!("removed {}", activated);

    let listing = print_listing(&run.instructions);
    match output {
        Some(path) => {
            fs::write(path, listing)
                .with_context(|| format!("writing {}", path.display()))?;
            if config.verbose {
                println!("Mutant written to {}", path.display());
            }
        }
        None => print!("{}", listing),
    }
    Ok(())
}

fn show_effects(input: &Path) -> Result<()> {
    let body = parse_listing_file(input)?;
    let mut depth = Some(0i32);

    for insn in &body {
        let delta = stack_delta(insn);
        depth = depth.zip(delta).map(|(d, delta)| d + delta);
        println!(
            "{:>4} {:>4}  {}",
            delta.map_or_else(|| "?".to_string(), |d| format!("{:+}", d)),
            depth.map_or_else(|| "?".to_string(), |d| d.to_string()),
            insn
        );
    }
    Ok(())
}
