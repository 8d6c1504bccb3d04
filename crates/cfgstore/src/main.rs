//! cfgstore: command-line inspector for plugin config files.
//!
//! Opens a config exactly the way a plugin would (seeding it from the bundle
//! on first use) and prints what the typed getters return.  Handy for
//! checking what a server will actually see after an admin edits a file.
//!
//! # Usage
//!
//! ```text
//! cfgstore [OPTIONS] <NAME> <COMMAND>
//!
//! Commands:
//!   get <PATH> [--kind <KIND>]  Print the value at PATH [default kind: string]
//!   keys [--deep]               List keys
//!   sync                        Add missing defaults from the bundle and save
//!   defaults                    Print the bundled default document
//!
//! Options:
//!   --plugin    <NAME>  Plugin name for log lines  [default: cfgstore]
//!   --data-dir  <DIR>   Plugin data directory      [default: .]
//!   --resources <DIR>   Bundled resources root     [default: resources]
//!   --sub-dir   <DIR>   Sub directory of the file  [default: ""]
//!   --plain             Do not translate colour codes
//! ```
//!
//! # Environment variable overrides
//!
//! | Variable              | Description                  |
//! |-----------------------|------------------------------|
//! | `CFGSTORE_PLUGIN`     | Plugin name for log lines    |
//! | `CFGSTORE_DATA_DIR`   | Plugin data directory        |
//! | `CFGSTORE_RESOURCES`  | Bundled resources root       |
//! | `CFGSTORE_SUB_DIR`    | Sub directory of the file    |
//! | `RUST_LOG`            | Log filter (default `info`)  |

use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use cfgstore::{ConfigStore, ConfigValue, DataDirHost, DirectoryResources};
use cfgstore_core::{to_yaml_string, PlainText};

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Inspect plugin YAML config files through a cfgstore `ConfigStore`.
#[derive(Debug, Parser)]
#[command(name = "cfgstore", about = "Inspect plugin YAML config files", version)]
struct Cli {
    /// Name of the plugin that owns the data directory.
    #[arg(long, default_value = "cfgstore", env = "CFGSTORE_PLUGIN")]
    plugin: String,

    /// Plugin data directory holding the on-disk config files.
    #[arg(long, default_value = ".", env = "CFGSTORE_DATA_DIR")]
    data_dir: PathBuf,

    /// Root directory of the bundled default resources.
    #[arg(long, default_value = "resources", env = "CFGSTORE_RESOURCES")]
    resources: PathBuf,

    /// Sub directory (relative to both roots) containing the file.
    #[arg(long, default_value = "", env = "CFGSTORE_SUB_DIR")]
    sub_dir: String,

    /// Print strings exactly as written instead of translating `&` codes.
    #[arg(long)]
    plain: bool,

    /// Config name without the `.yml` extension.
    name: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the value at a dotted path.
    Get {
        path: String,
        #[arg(long, value_enum, default_value_t = Kind::String)]
        kind: Kind,
    },
    /// List keys of the document.
    Keys {
        /// Include every nested path.
        #[arg(long)]
        deep: bool,
    },
    /// Add keys present in the bundled default but missing on disk, then save.
    Sync,
    /// Print the bundled default document.
    Defaults,
}

/// Which typed getter `get` uses.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum Kind {
    Int,
    Bool,
    Double,
    String,
    Ints,
    Bools,
    Doubles,
    Strings,
    Section,
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so stdout stays clean for values.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let host = DataDirHost::new(&cli.plugin, &cli.data_dir);
    let mut builder = ConfigStore::builder(&cli.name).sub_directory(&cli.sub_dir);
    if cli.plain {
        builder = builder.formatter(PlainText);
    }
    let mut store = builder
        .open(&host, DirectoryResources::new(&cli.resources))
        .with_context(|| format!("failed to open config '{}'", cli.name))?;

    match cli.command {
        Command::Get { path, kind } => print_value(&store, &path, kind)?,
        Command::Keys { deep } => {
            for key in store.keys(deep) {
                println!("{key}");
            }
        }
        Command::Sync => {
            let added = store.merge_missing_defaults()?;
            if added.is_empty() {
                info!("{} is up to date", store.file_path().display());
            } else {
                store.save()?;
                for path in added {
                    println!("{path}");
                }
            }
        }
        Command::Defaults => {
            let defaults = store.bundled_defaults()?;
            print!("{}", to_yaml_string(&defaults)?);
        }
    }

    Ok(())
}

fn print_value(store: &ConfigStore, path: &str, kind: Kind) -> anyhow::Result<()> {
    if !store.has(path) {
        bail!("no value at '{path}' in {}", store.file_path().display());
    }
    if let Some(value) = store.document().get(path) {
        check_kind(path, value, kind)?;
    }

    match kind {
        Kind::Int => println!("{}", store.get_int(path)),
        Kind::Bool => println!("{}", store.get_bool(path)),
        Kind::Double => println!("{}", store.get_double(path)),
        Kind::String => println!("{}", store.get_string(path)),
        Kind::Ints => print_lines(store.get_ints(path)),
        Kind::Bools => print_lines(store.get_bools(path)),
        Kind::Doubles => print_lines(store.get_doubles(path)),
        Kind::Strings => print_lines(store.get_strings(path)),
        Kind::Section => {
            let section = store.section(path)?;
            print!("{}", to_yaml_string(&section)?);
        }
    }
    Ok(())
}

/// Rejects a `--kind` that cannot describe `value`, instead of printing the
/// getter's fallback.
fn check_kind(path: &str, value: &ConfigValue, kind: Kind) -> anyhow::Result<()> {
    let fits = match kind {
        Kind::Int | Kind::Bool | Kind::Double | Kind::String => value.is_scalar(),
        Kind::Ints | Kind::Bools | Kind::Doubles | Kind::Strings => {
            matches!(value, ConfigValue::List(_))
        }
        Kind::Section => matches!(value, ConfigValue::Section(_)),
    };
    if !fits {
        bail!("'{path}' holds a {}, which --kind {kind:?} cannot read", value.kind_name());
    }
    Ok(())
}

fn print_lines<T: std::fmt::Display>(items: Vec<T>) {
    for item in items {
        println!("{item}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plugin_name_is_separate_from_config_name() {
        let cli = Cli::try_parse_from(["cfgstore", "--plugin", "shop", "lang", "keys"]).unwrap();

        assert_eq!(cli.plugin, "shop");
        assert_eq!(cli.name, "lang");
    }

    #[test]
    fn test_check_kind_accepts_matching_shapes() {
        assert!(check_kind("volume", &ConfigValue::Float(0.5), Kind::Double).is_ok());
        assert!(check_kind("volume", &ConfigValue::Float(0.5), Kind::String).is_ok());
        assert!(check_kind("tags", &ConfigValue::from(vec!["a"]), Kind::Strings).is_ok());
    }

    #[test]
    fn test_check_kind_names_the_stored_kind_on_mismatch() {
        let err = check_kind("tags", &ConfigValue::from(vec!["a"]), Kind::Int).unwrap_err();

        assert!(err.to_string().contains("holds a list"), "{err}");
    }
}
