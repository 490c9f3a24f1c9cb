use std::convert::Infallible;
use std::path::PathBuf;

use ag_core::config::{ConvertConfig, RenderOptions, Scaling};
use anyhow::Result;
use clap::{ArgAction, Parser};

/// ascii-generator : convertit une image en art ASCII.
#[derive(Parser, Debug)]
#[command(
    name = "ascii-generator",
    version = "v2.8",
    about,
    long_about = None,
    disable_help_flag = true,
    disable_version_flag = true
)]
pub struct Cli {
    /// Chemin de l'image à convertir (PNG, JPEG, BMP, GIF).
    pub input: Option<PathBuf>,

    /// Invert color so that the brightest pixels use the densest characters.
    #[arg(short, long, default_value_t = false)]
    pub invert: bool,

    /// Remove the border that sometimes appears on non-inverted images.
    #[arg(short = 'b', long, default_value_t = false)]
    pub remove_border: bool,

    /// Output to file instead of stdout. A blank VAL keeps stdout.
    #[arg(short = 'f', long, value_name = "VAL", value_parser = output_path)]
    pub to_file: Option<PathBuf>,

    /// Scale the image height and width evenly by VAL. Défaut : 1.0.
    #[arg(short, long, value_name = "VAL", allow_negative_numbers = true)]
    pub scaling: Option<f64>,

    /// Scale the width separately from the height. Requires --height.
    #[arg(short, long, value_name = "VAL", allow_negative_numbers = true)]
    pub width: Option<f64>,

    /// Scale the height separately from the width. Requires --width.
    #[arg(short = 'h', long, value_name = "VAL", allow_negative_numbers = true)]
    pub height: Option<f64>,

    /// Fichier de configuration TOML (sections [render] et [scaling]).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Ask for every option on stdin instead of reading flags.
    #[arg(long, default_value_t = false)]
    pub interactive: bool,

    /// Convert every image found in this folder.
    #[arg(long, value_name = "DIR")]
    pub batch: Option<PathBuf>,

    /// Batch output directory. Défaut : <DIR>/ascii.
    #[arg(long, value_name = "DIR", requires = "batch")]
    pub batch_out: Option<PathBuf>,

    /// Niveau de log : error, warn, info, debug, trace.
    #[arg(long, default_value = "warn")]
    pub log_level: String,

    /// Print version number.
    #[arg(short = 'v', long, action = ArgAction::Version)]
    #[allow(dead_code)]
    version: Option<bool>,

    /// Print help menu.
    #[arg(short = 'H', long, action = ArgAction::Help)]
    #[allow(dead_code)]
    help: Option<bool>,
}

/// Accepts any value, blank included; [`Cli::request`] maps blank to stdout.
#[allow(clippy::unnecessary_wraps)]
fn output_path(raw: &str) -> Result<PathBuf, Infallible> {
    Ok(PathBuf::from(raw))
}

/// Une conversion entièrement validée, prête pour le pipeline.
#[derive(Clone, Debug, PartialEq)]
pub struct Request {
    /// Image to read.
    pub input: PathBuf,
    /// Renderer options.
    pub options: RenderOptions,
    /// Validated scaling.
    pub scaling: Scaling,
    /// File to write, stdout when `None`.
    pub output: Option<PathBuf>,
}

impl Cli {
    /// Apply CLI flags over a base configuration.
    ///
    /// Boolean flags can only switch options on. If any of `-s`, `-w`, `-h`
    /// is given, the three scaling values all come from the command line.
    #[must_use]
    pub fn merge(&self, mut base: ConvertConfig) -> ConvertConfig {
        base.render.invert |= self.invert;
        base.render.remove_border |= self.remove_border;
        if self.scaling.is_some() || self.width.is_some() || self.height.is_some() {
            base.scaling_uniform = self.scaling;
            base.scaling_width = self.width;
            base.scaling_height = self.height;
        }
        base
    }

    /// Build the request for the flag-driven front end.
    ///
    /// # Errors
    /// Returns an error if no input path was given or the scaling is invalid.
    pub fn request(&self, config: &ConvertConfig) -> Result<Request> {
        let Some(input) = self.input.clone() else {
            anyhow::bail!("No input file given");
        };
        Ok(Request {
            input,
            options: config.render,
            scaling: config.scaling()?,
            output: self
                .to_file
                .clone()
                .filter(|p| !p.as_os_str().to_string_lossy().trim().is_empty()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        let mut argv = vec!["ascii-generator"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    #[test]
    fn short_flags_parse() {
        let cli = parse(&["-i", "-b", "-f", "out/a.txt", "-w", "0.5", "-h", "2", "in.png"]);
        assert!(cli.invert);
        assert!(cli.remove_border);
        assert_eq!(cli.to_file, Some(PathBuf::from("out/a.txt")));
        assert_eq!(cli.width, Some(0.5));
        assert_eq!(cli.height, Some(2.0));
        assert_eq!(cli.input, Some(PathBuf::from("in.png")));
    }

    #[test]
    fn help_and_version_use_capital_h_and_v() {
        let err = Cli::try_parse_from(["ascii-generator", "-H"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
        let err = Cli::try_parse_from(["ascii-generator", "-v"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn negative_factor_parses_then_fails_validation() {
        let cli = parse(&["-s", "-1", "in.png"]);
        let config = cli.merge(ConvertConfig::default());
        assert!(cli.request(&config).is_err());
    }

    #[test]
    fn lone_width_is_rejected() {
        let cli = parse(&["-w", "0.5", "in.png"]);
        let config = cli.merge(ConvertConfig::default());
        let err = cli.request(&config).unwrap_err();
        assert!(err.to_string().contains("Invalid scaling"));
    }

    #[test]
    fn missing_input_is_rejected() {
        let cli = parse(&[]);
        let err = cli.request(&ConvertConfig::default()).unwrap_err();
        assert_eq!(err.to_string(), "No input file given");
    }

    #[test]
    fn cli_scaling_replaces_config_scaling() {
        let base = ConvertConfig {
            scaling_width: Some(0.5),
            scaling_height: Some(0.5),
            ..ConvertConfig::default()
        };
        let cli = parse(&["-s", "2", "in.png"]);
        let request = cli.request(&cli.merge(base.clone())).unwrap();
        assert_eq!(request.scaling, Scaling::Uniform(2.0));

        let cli = parse(&["in.png"]);
        let request = cli.request(&cli.merge(base)).unwrap();
        assert_eq!(
            request.scaling,
            Scaling::Independent {
                width: 0.5,
                height: 0.5
            }
        );
    }

    #[test]
    fn flags_switch_config_options_on() {
        let mut base = ConvertConfig::default();
        base.render.remove_border = true;
        let cli = parse(&["-i", "in.png"]);
        let request = cli.request(&cli.merge(base)).unwrap();
        assert!(request.options.invert);
        assert!(request.options.remove_border);
        assert_eq!(request.output, None);
    }

    #[test]
    fn blank_to_file_means_stdout() {
        let config = ConvertConfig::default();
        for blank in ["", "  "] {
            let req = parse(&["-f", blank, "in.png"]).request(&config).unwrap();
            assert_eq!(req.output, None, "{blank:?}");
        }
        let req = parse(&["-f", "a.txt", "in.png"]).request(&config).unwrap();
        assert_eq!(req.output, Some(PathBuf::from("a.txt")));
    }

    #[test]
    fn version_string_is_short_form() {
        let err = Cli::try_parse_from(["ascii-generator", "-v"]).unwrap_err();
        assert_eq!(err.to_string().trim(), "ascii-generator v2.8");
    }
}
