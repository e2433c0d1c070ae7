use std::path::PathBuf;

use anyhow::bail;
use lazy_format::lazy_format;
use switchyard::{Arguments, LoadedArguments, Settings, Value};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, Default, Value)]
enum Direction {
    #[default]
    Up,
    Down,
    Left,
    Right,
}

#[derive(Arguments, Debug, Default)]
struct Args {
    /// The file to work on
    #[argument(name = "path", short = "p", required)]
    path: PathBuf,

    #[argument(name = "verbose", short = "v", help = "Print more about what's happening")]
    verbose: bool,

    #[argument(name = "direction", short = "d")]
    direction: Direction,

    second_path: Option<Vec<PathBuf>>,
    numbers: Vec<i32>,
}

/// One line for each switch a user can see, hidden ones left out
fn describe(settings: &Settings) -> Result<Vec<String>, switchyard::ParseError> {
    let descriptors = Args::descriptors(settings)?;

    Ok(descriptors
        .iter()
        .filter(|descriptor| !descriptor.hidden())
        .map(|descriptor| {
            let short = lazy_format!(match (descriptor.short()) {
                Some(short) => " ({short})",
                None => "",
            });

            let required = lazy_format!(match (descriptor.required()) {
                true => " [required]",
                false => "",
            });

            format!(
                "{name}{short}: {member_type}{required}  {help}",
                name = descriptor.name(),
                member_type = descriptor.member_type(),
                help = descriptor.help(),
            )
        })
        .collect())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let settings = Settings::default();
    let loaded = LoadedArguments::from_env();

    if loaded.arguments().iter().any(|arg| arg == "describe") {
        for line in describe(&settings)? {
            println!("{line}");
        }

        return Ok(());
    }

    let parsed = match loaded.parse::<Args>(&settings) {
        Ok(parsed) => parsed,
        Err(errors) => {
            for error in &errors {
                eprintln!("{error}");
            }

            bail!("{} problems with the command line", errors.len());
        }
    };

    tracing::info!(positional = parsed.positional.len(), "parsed arguments");

    println!("{:#?}", parsed.arguments);
    println!("positional: {:?}", parsed.positional);

    Ok(())
}
