use std::collections::HashMap;
use std::path::{Path, PathBuf};

use ag_ascii::pipeline::Converter;
use ag_core::config::{RenderOptions, Scaling};
use ag_source::folder::scan_images;
use ag_source::{ImageFileDecoder, Resizer};
use anyhow::{Context, Result};
use rayon::prelude::*;

use crate::sink::write_text_file;

/// Nom du sous-dossier de sortie par défaut.
pub const DEFAULT_OUT_DIR: &str = "ascii";

/// Bilan d'un traitement par lots.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Files converted and written.
    pub converted: Vec<PathBuf>,
    /// Files that failed, with the reason.
    pub failed: Vec<(PathBuf, String)>,
}

/// Convert every image under `folder` with the same options.
///
/// Each image gets its own decoder/rescaler and is converted on the rayon
/// pool. `a/b.png` lands in `<out_dir>/a/b.txt`.
///
/// # Errors
/// Returns an error only if `folder` cannot be scanned; per-file failures
/// are collected in the report.
pub fn run_batch(
    folder: &Path,
    out_dir: Option<&Path>,
    scaling: Scaling,
    options: RenderOptions,
) -> Result<BatchReport> {
    let out_dir = out_dir.map_or_else(|| folder.join(DEFAULT_OUT_DIR), Path::to_path_buf);
    let files = scan_images(folder, Some(&out_dir))
        .with_context(|| format!("Impossible de parcourir {}", folder.display()))?;
    log::info!(
        "Batch: {} image(s) in {} → {}",
        files.len(),
        folder.display(),
        out_dir.display()
    );

    let outputs = plan_outputs(folder, &out_dir, &files);
    let results: Vec<(PathBuf, Result<PathBuf>)> = files
        .par_iter()
        .zip(outputs)
        .map(|(src, dst)| {
            let result = convert_one(src, &dst, scaling, options).map(|()| dst);
            (src.clone(), result)
        })
        .collect();

    let mut report = BatchReport::default();
    for (src, result) in results {
        match result {
            Ok(dst) => {
                log::debug!("{} → {}", src.display(), dst.display());
                report.converted.push(dst);
            }
            Err(e) => {
                log::warn!("Échec de conversion {} : {e:#}", src.display());
                report.failed.push((src, format!("{e:#}")));
            }
        }
    }
    Ok(report)
}

fn convert_one(src: &Path, dst: &Path, scaling: Scaling, options: RenderOptions) -> Result<()> {
    let mut converter = Converter::new(ImageFileDecoder, Resizer::new());
    let text = converter.convert(src, scaling, options)?;
    write_text_file(dst, &text)?;
    Ok(())
}

/// Mirror `src` (relative to `folder`) into `out_dir` with a `.txt` extension.
fn output_path(folder: &Path, out_dir: &Path, src: &Path) -> PathBuf {
    let relative = src.strip_prefix(folder).unwrap_or(src);
    out_dir.join(relative).with_extension("txt")
}

/// One destination per source. Sources that would share a destination
/// (`a.png`, `a.jpg`) keep their extension instead: `a.png.txt`. Repeated
/// until no two sources share a destination (`a.png.jpg` would otherwise
/// land on `a.png.txt` too).
fn plan_outputs(folder: &Path, out_dir: &Path, files: &[PathBuf]) -> Vec<PathBuf> {
    let full_name = |src: &Path| {
        let relative = src.strip_prefix(folder).unwrap_or(src);
        let mut name = out_dir.join(relative).into_os_string();
        name.push(".txt");
        PathBuf::from(name)
    };

    let mut keep_ext = vec![false; files.len()];
    loop {
        let outputs: Vec<PathBuf> = files
            .iter()
            .zip(&keep_ext)
            .map(|(src, &keep)| {
                if keep {
                    full_name(src)
                } else {
                    output_path(folder, out_dir, src)
                }
            })
            .collect();

        let mut counts: HashMap<&Path, usize> = HashMap::new();
        for dst in &outputs {
            *counts.entry(dst.as_path()).or_default() += 1;
        }
        // Full names are distinct, so every pass either settles or switches one more source.
        let mut changed = false;
        for (dst, keep) in outputs.iter().zip(keep_ext.iter_mut()) {
            if !*keep && counts.get(dst.as_path()).copied().unwrap_or(0) > 1 {
                *keep = true;
                changed = true;
            }
        }
        if !changed {
            return outputs;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use image::{Rgb, RgbImage};

    use super::*;

    fn write_png(path: &Path, width: u32, height: u32, value: u8) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        RgbImage::from_pixel(width, height, Rgb([value, value, value]))
            .save(path)
            .unwrap();
    }

    #[test]
    fn converts_every_image_into_default_out_dir() {
        let dir = tempfile::tempdir().unwrap();
        write_png(&dir.path().join("black.png"), 2, 1, 0);
        write_png(&dir.path().join("sub/white.png"), 1, 2, 255);

        let report = run_batch(dir.path(), None, Scaling::default(), RenderOptions::default())
            .unwrap();
        assert_eq!(report.converted.len(), 2);
        assert!(report.failed.is_empty());

        let out = dir.path().join("ascii");
        assert_eq!(fs::read_to_string(out.join("black.txt")).unwrap(), "@@\n");
        assert_eq!(
            fs::read_to_string(out.join("sub/white.txt")).unwrap(),
            " \n \n"
        );
    }

    #[test]
    fn second_run_ignores_previous_output() {
        let dir = tempfile::tempdir().unwrap();
        write_png(&dir.path().join("a.png"), 1, 1, 0);
        let first = run_batch(dir.path(), None, Scaling::default(), RenderOptions::default())
            .unwrap();
        let second = run_batch(dir.path(), None, Scaling::default(), RenderOptions::default())
            .unwrap();
        assert_eq!(first.converted, second.converted);
    }

    #[test]
    fn failures_are_collected_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        write_png(&dir.path().join("good.png"), 4, 4, 255);
        fs::write(dir.path().join("bad.png"), b"not an image").unwrap();

        let opts = RenderOptions {
            invert: true,
            remove_border: false,
        };
        let report = run_batch(dir.path(), Some(out.path()), Scaling::Uniform(0.5), opts)
            .unwrap();
        assert_eq!(report.converted, vec![out.path().join("good.txt")]);
        assert_eq!(report.failed.len(), 1);
        assert!(report.failed[0].0.ends_with("bad.png"));
        assert_eq!(
            fs::read_to_string(out.path().join("good.txt")).unwrap(),
            "@@\n@@\n"
        );
    }

    #[test]
    fn missing_folder_is_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(
            run_batch(
                &dir.path().join("absent"),
                None,
                Scaling::default(),
                RenderOptions::default()
            )
            .is_err()
        );
    }

    #[test]
    fn colliding_names_keep_extension() {
        let files = vec![
            PathBuf::from("/in/a.jpg"),
            PathBuf::from("/in/a.png"),
            PathBuf::from("/in/b.png"),
        ];
        let outputs = plan_outputs(Path::new("/in"), Path::new("/out"), &files);
        assert_eq!(
            outputs,
            vec![
                PathBuf::from("/out/a.jpg.txt"),
                PathBuf::from("/out/a.png.txt"),
                PathBuf::from("/out/b.txt"),
            ]
        );
    }

    #[test]
    fn fallback_names_do_not_collide_either() {
        let files = vec![
            PathBuf::from("/in/a.jpg"),
            PathBuf::from("/in/a.png"),
            PathBuf::from("/in/a.png.jpg"),
        ];
        let outputs = plan_outputs(Path::new("/in"), Path::new("/out"), &files);
        assert_eq!(
            outputs,
            vec![
                PathBuf::from("/out/a.jpg.txt"),
                PathBuf::from("/out/a.png.txt"),
                PathBuf::from("/out/a.png.jpg.txt"),
            ]
        );
        let unique: std::collections::HashSet<_> = outputs.iter().collect();
        assert_eq!(unique.len(), files.len());
    }

    #[test]
    fn output_path_mirrors_tree() {
        let p = output_path(
            Path::new("/in"),
            Path::new("/out"),
            Path::new("/in/x/y.jpeg"),
        );
        assert_eq!(p, PathBuf::from("/out/x/y.txt"));
    }
}
