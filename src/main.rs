use clap::Parser;
use directive_macros::{Constant, Context, Entry, MacroError, Options, PRODUCTION};
use serde_json::Value;
use tracing::Level;

/// Expand macro directives against a build-mode context.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Directive calls, e.g. 'SANITY("x > 0")'. Each expansion prints on its own line.
    directives: Vec<String>,
    /// Options bundle (JSON: constants, flags, flagList, data)
    #[arg(long)]
    options: Option<std::path::PathBuf>,
    /// Shorthand for `--flag PRODUCTION`
    #[arg(long)]
    production: bool,
    /// Turn a flag on (repeatable)
    #[arg(long = "flag", value_name = "NAME")]
    flags: Vec<String>,
    /// Add a constant; VALUE is a literal if it parses as JSON, code otherwise
    #[arg(long = "constant", value_name = "NAME=VALUE", value_parser = parse_assignment)]
    constants: Vec<(String, String)>,
    /// Add a data field; VALUE is JSON if it parses, a string otherwise
    #[arg(long = "data", value_name = "NAME=VALUE", value_parser = parse_assignment)]
    data: Vec<(String, String)>,
    /// Print the context's fields instead of expanding
    #[arg(long)]
    list: bool,
    /// Log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn parse_assignment(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(name, value)| (name.trim().to_string(), value.to_string()))
        .filter(|(name, _)| !name.is_empty())
        .ok_or_else(|| format!("expected NAME=VALUE, got `{raw}`"))
}

fn build_options(args: &Args) -> Result<Options, MacroError> {
    let mut opts = match args.options.as_ref() {
        Some(path) => Options::from_path(path)?,
        None => Options::default(),
    };
    if args.production {
        opts = opts.with_flag(PRODUCTION);
    }
    for flag in &args.flags {
        opts = opts.with_flag(flag.clone());
    }
    for (name, raw) in &args.constants {
        let constant = match serde_json::from_str::<Value>(raw) {
            Ok(v) => Constant::Literal(v),
            Err(_) => Constant::Code(raw.clone()),
        };
        opts = opts.with_constant(name.clone(), constant);
    }
    for (name, raw) in &args.data {
        let value = serde_json::from_str::<Value>(raw).unwrap_or_else(|_| Value::String(raw.clone()));
        opts = opts.with_data(name.clone(), value);
    }
    Ok(opts)
}

fn run(args: &Args) -> Result<(), MacroError> {
    let ctx = Context::new(&build_options(args)?);

    if args.list {
        for name in ctx.names() {
            match ctx.get(name) {
                Some(Entry::Macro(_)) => println!("{name}\tmacro"),
                Some(Entry::Value(v)) => println!("{name}\t{v}"),
                None => {}
            }
        }
        return Ok(());
    }

    for directive in &args.directives {
        println!("{}", ctx.expand(directive)?);
    }
    Ok(())
}

fn main() {
    // Parse CLI arguments.
    let args = Args::parse();

    let level = match args.verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(&args) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
