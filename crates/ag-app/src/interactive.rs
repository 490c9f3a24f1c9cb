use std::io::{BufRead, Write};
use std::path::PathBuf;

use ag_core::config::ConvertConfig;
use anyhow::{Context, Result};

use crate::cli::Request;

/// Collect a conversion request by asking questions on `out` and reading
/// answers line by line from `input`.
///
/// Blank answers keep the value from `defaults`. Invalid answers are asked
/// again. End of input is only an error while the image path is unknown.
///
/// # Errors
/// Returns an error on I/O failure, if input ends before an image path is
/// given, or if the collected scaling is invalid.
pub fn prompt_request<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    defaults: &ConvertConfig,
) -> Result<Request> {
    let mut prompter = Prompter { input, out };

    let image = loop {
        match prompter.ask("Image path: ")? {
            None => anyhow::bail!("No input file given"),
            Some(answer) if answer.is_empty() => {}
            Some(answer) => break PathBuf::from(answer),
        }
    };

    let mut config = defaults.clone();
    config.render.invert = prompter.ask_yes_no("Invert colors?", config.render.invert)?;
    config.render.remove_border =
        prompter.ask_yes_no("Remove border?", config.render.remove_border)?;
    config.scaling_uniform = prompter.ask_factor(
        "Scaling factor (blank for 1.0): ",
        config.scaling_uniform,
    )?;
    config.scaling_width =
        prompter.ask_factor("Width factor (blank to skip): ", config.scaling_width)?;
    config.scaling_height =
        prompter.ask_factor("Height factor (blank to skip): ", config.scaling_height)?;
    let output = prompter
        .ask("Output file (blank for stdout): ")?
        .filter(|s| !s.is_empty())
        .map(PathBuf::from);

    Ok(Request {
        input: image,
        options: config.render,
        scaling: config.scaling()?,
        output,
    })
}

/// Parse a yes/no answer. `None` for anything unrecognised.
///
/// Blank answers are handled by the caller.
#[must_use]
pub fn parse_yes_no(answer: &str) -> Option<bool> {
    match answer.to_ascii_lowercase().as_str() {
        "y" | "yes" | "true" | "1" => Some(true),
        "n" | "no" | "false" | "0" => Some(false),
        _ => None,
    }
}

struct Prompter<'a, R, W> {
    input: &'a mut R,
    out: &'a mut W,
}

impl<R: BufRead, W: Write> Prompter<'_, R, W> {
    /// Ask once. `None` at end of input, otherwise the trimmed answer.
    fn ask(&mut self, question: &str) -> Result<Option<String>> {
        write!(self.out, "{question}").context("Unable to write prompt")?;
        self.out.flush().context("Unable to write prompt")?;
        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("Unable to read answer")?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn ask_yes_no(&mut self, question: &str, default: bool) -> Result<bool> {
        let hint = if default { "[Y/n]" } else { "[y/N]" };
        let prompt = format!("{question} {hint}: ");
        loop {
            let Some(answer) = self.ask(&prompt)? else {
                return Ok(default);
            };
            if answer.is_empty() {
                return Ok(default);
            }
            match parse_yes_no(&answer) {
                Some(v) => return Ok(v),
                None => writeln!(self.out, "Please answer y or n.")?,
            }
        }
    }

    fn ask_factor(&mut self, question: &str, default: Option<f64>) -> Result<Option<f64>> {
        loop {
            let Some(answer) = self.ask(question)? else {
                return Ok(default);
            };
            if answer.is_empty() {
                return Ok(default);
            }
            match answer.parse::<f64>() {
                Ok(v) => return Ok(Some(v)),
                Err(_) => writeln!(self.out, "'{answer}' is not a number.")?,
            }
        }
    }
}
