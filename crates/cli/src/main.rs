#![deny(unsafe_code)]
//! CLI binary for the moon texture generator.
//!
//! Running `moon-texture` with no arguments writes a fresh 1024x1024 texture
//! to `public/moon-texture.svg`. Flags only override that default.

mod error;

use clap::Parser;
use error::CliError;
use moon_texture_core::TextureConfig;
use moon_texture_document::DEFAULT_OUTPUT;
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "moon-texture", about = "Generate a cratered moon surface SVG")]
struct Cli {
    /// Output file path. The parent directory must already exist.
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// PRNG seed for reproducible output. Overrides `seed` in --params.
    #[arg(long)]
    seed: Option<u64>,

    /// Texture config overrides as a JSON object (e.g. '{"size": 512}').
    #[arg(long, default_value = "{}")]
    params: String,

    /// Output as JSON instead of human-readable text.
    #[arg(long)]
    json: bool,
}

fn run(cli: &Cli) -> Result<(), CliError> {
    let params: serde_json::Value = serde_json::from_str(&cli.params)
        .map_err(|e| CliError::Input(format!("invalid --params JSON: {e}")))?;

    let mut config = TextureConfig::from_json(&params)?;
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }

    let summary = moon_texture_document::generate(&config, &cli.output)?;

    if cli.json {
        let info = serde_json::json!({
            "seed": summary.seed,
            "size": summary.size,
            "craters": summary.craters,
            "bytes": summary.bytes,
            "output": summary.output.display().to_string(),
        });
        println!("{}", serde_json::to_string_pretty(&info)?);
    } else {
        eprintln!(
            "rendered moon texture ({0}x{0}, {1} craters, seed {2}) -> {3}",
            summary.size,
            summary.craters,
            summary.seed,
            summary.output.display()
        );
    }

    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        if cli.json {
            let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_arguments_uses_stock_defaults() {
        let cli = Cli::try_parse_from(["moon-texture"]).unwrap();
        assert_eq!(cli.output, PathBuf::from("public/moon-texture.svg"));
        assert!(cli.seed.is_none());
        assert_eq!(cli.params, "{}");
        assert!(!cli.json);
    }

    #[test]
    fn run_writes_file_and_seed_flag_wins_over_params() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("moon.svg");
        let cli = Cli::try_parse_from([
            "moon-texture".into(),
            "--seed".into(),
            "5".into(),
            "--params".into(),
            r#"{"seed": 9, "size": 128}"#.into(),
            "-o".into(),
            output.clone().into_os_string(),
        ])
        .unwrap();
        run(&cli).unwrap();
        let svg = std::fs::read_to_string(&output).unwrap();
        assert!(svg.contains(r#"width="128" height="128""#));

        let replay = moon_texture_document::Document::build(
            &TextureConfig::from_json(&serde_json::json!({"size": 128})).unwrap(),
            &mut moon_texture_core::Xorshift64::new(5),
        )
        .unwrap();
        assert_eq!(svg, replay.render());
    }

    #[test]
    fn bad_params_is_input_error() {
        let cli = Cli::try_parse_from(["moon-texture", "--params", "{nope"]).unwrap();
        let err = run(&cli).unwrap_err();
        assert_eq!(err.exit_code(), 12);
    }

    #[test]
    fn invalid_config_is_texture_error() {
        let cli = Cli::try_parse_from(["moon-texture", "--params", r#"{"size": 0}"#]).unwrap();
        let err = run(&cli).unwrap_err();
        assert_eq!(err.exit_code(), 10);
    }

    #[test]
    fn missing_output_directory_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("public").join("moon-texture.svg");
        let cli = Cli::try_parse_from([
            "moon-texture".into(),
            "--seed".into(),
            "1".into(),
            "--output".into(),
            output.into_os_string(),
        ])
        .unwrap();
        let err = run(&cli).unwrap_err();
        assert_eq!(err.exit_code(), 11);
    }
}
