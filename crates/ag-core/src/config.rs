use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Corrective hint attached to every scaling rejection.
const SCALING_HINT: &str = "if not using equivalent scaling for the height and width (s), \
both height (h) and width (w) parameters must be supplied and be greater than 0";

/// Options consommées par le renderer uniquement.
///
/// # Example
/// ```
/// use ag_core::config::RenderOptions;
/// let opts = RenderOptions::default();
/// assert!(!opts.invert && !opts.remove_border);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct RenderOptions {
    /// Utiliser la rampe inversée (pixels clairs → caractères denses).
    pub invert: bool,
    /// Supprimer les caractères non-`@` sur la dernière ligne/colonne.
    pub remove_border: bool,
}

/// Validated rescale request.
///
/// Only built through [`Scaling::resolve`] or [`Scaling::default`], so both
/// factors are always finite and strictly positive.
///
/// # Example
/// ```
/// use ag_core::config::Scaling;
/// let s = Scaling::resolve(None, Some(0.5), Some(2.0)).unwrap();
/// assert_eq!(s.target_dimensions(10, 10), (5, 20));
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Scaling {
    /// Same factor on both axes.
    Uniform(f64),
    /// Independent width/height factors.
    Independent {
        /// Width factor.
        width: f64,
        /// Height factor.
        height: f64,
    },
}

impl Default for Scaling {
    fn default() -> Self {
        Self::Uniform(1.0)
    }
}

impl Scaling {
    /// Apply the scaling validity rule.
    ///
    /// Either the uniform factor is used alone (default 1.0), or both width
    /// and height factors are supplied and strictly positive. When width and
    /// height are both valid, they take precedence over `uniform`.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidScaling`] for a lone width/height factor,
    /// or any factor that is not a strictly positive finite number.
    ///
    /// # Example
    /// ```
    /// use ag_core::config::Scaling;
    /// assert!(Scaling::resolve(Some(2.0), None, None).is_ok());
    /// assert!(Scaling::resolve(None, Some(2.0), None).is_err());
    /// assert!(Scaling::resolve(None, Some(2.0), Some(0.0)).is_err());
    /// ```
    pub fn resolve(
        uniform: Option<f64>,
        width: Option<f64>,
        height: Option<f64>,
    ) -> Result<Self, CoreError> {
        match (width, height) {
            (None, None) => {
                let factor = uniform.unwrap_or(1.0);
                if is_valid_factor(factor) {
                    Ok(Self::Uniform(factor))
                } else {
                    Err(CoreError::InvalidScaling(format!(
                        "scaling factor must be greater than 0 (got {factor})"
                    )))
                }
            }
            (Some(w), Some(h)) if is_valid_factor(w) && is_valid_factor(h) => {
                if let Some(s) = uniform {
                    log::warn!("Width/height factors given, uniform scaling {s} ignored");
                }
                Ok(Self::Independent {
                    width: w,
                    height: h,
                })
            }
            _ => Err(CoreError::InvalidScaling(SCALING_HINT.to_string())),
        }
    }

    /// `(width_factor, height_factor)`.
    #[must_use]
    pub fn factors(self) -> (f64, f64) {
        match self {
            Self::Uniform(f) => (f, f),
            Self::Independent { width, height } => (width, height),
        }
    }

    /// True when rescaling would be a no-op.
    #[allow(clippy::float_cmp)]
    #[must_use]
    pub fn is_identity(self) -> bool {
        self.factors() == (1.0, 1.0)
    }

    /// Output dimensions: `floor(width · fw) × floor(height · fh)`.
    ///
    /// # Example
    /// ```
    /// use ag_core::config::Scaling;
    /// assert_eq!(Scaling::Uniform(0.3).target_dimensions(10, 3), (3, 0));
    /// ```
    #[must_use]
    pub fn target_dimensions(self, width: u32, height: u32) -> (u32, u32) {
        let (fw, fh) = self.factors();
        (scale_axis(width, fw), scale_axis(height, fh))
    }
}

fn is_valid_factor(f: f64) -> bool {
    f.is_finite() && f > 0.0
}

fn scale_axis(len: u32, factor: f64) -> u32 {
    // `as` saturates at u32::MAX on overflow.
    (f64::from(len) * factor).floor() as u32
}

/// Configuration complète d'une conversion.
///
/// # Example
/// ```
/// use ag_core::config::{ConvertConfig, Scaling};
/// let config = ConvertConfig::default();
/// assert_eq!(config.scaling().unwrap(), Scaling::Uniform(1.0));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct ConvertConfig {
    /// Renderer options.
    pub render: RenderOptions,
    /// Uniform scaling factor. `None` = 1.0.
    pub scaling_uniform: Option<f64>,
    /// Width factor (requires `scaling_height`).
    pub scaling_width: Option<f64>,
    /// Height factor (requires `scaling_width`).
    pub scaling_height: Option<f64>,
}

impl ConvertConfig {
    /// Validate the scaling fields.
    ///
    /// # Errors
    /// See [`Scaling::resolve`].
    pub fn scaling(&self) -> Result<Scaling, CoreError> {
        Scaling::resolve(
            self.scaling_uniform,
            self.scaling_width,
            self.scaling_height,
        )
    }
}

/// Structure TOML intermédiaire pour désérialisation avec valeurs optionnelles.
#[derive(Deserialize)]
struct ConfigFile {
    render: Option<RenderSection>,
    scaling: Option<ScalingSection>,
}

#[derive(Deserialize)]
struct RenderSection {
    invert: Option<bool>,
    remove_border: Option<bool>,
}

#[derive(Deserialize)]
struct ScalingSection {
    uniform: Option<f64>,
    width: Option<f64>,
    height: Option<f64>,
}

/// Parse TOML text and merge it over the defaults.
///
/// # Errors
/// Returns [`CoreError::Config`] if the text is not valid TOML for this schema.
///
/// # Example
/// ```
/// use ag_core::config::parse_config;
/// let config = parse_config("[render]\ninvert = true\n").unwrap();
/// assert!(config.render.invert);
/// assert!(!config.render.remove_border);
/// ```
pub fn parse_config(content: &str) -> Result<ConvertConfig, CoreError> {
    let file: ConfigFile =
        toml::from_str(content).map_err(|e| CoreError::Config(e.to_string()))?;

    let mut config = ConvertConfig::default();

    if let Some(r) = file.render {
        if let Some(v) = r.invert {
            config.render.invert = v;
        }
        if let Some(v) = r.remove_border {
            config.render.remove_border = v;
        }
    }

    if let Some(s) = file.scaling {
        config.scaling_uniform = s.uniform;
        config.scaling_width = s.width;
        config.scaling_height = s.height;
    }

    Ok(config)
}

/// Charge un fichier TOML et fusionne avec les valeurs par défaut.
///
/// # Errors
/// Returns [`CoreError::Config`] if the file cannot be read or parsed.
///
/// # Example
/// ```no_run
/// use ag_core::config::load_config;
/// use std::path::Path;
/// let config = load_config(Path::new("ascii-generator.toml")).unwrap();
/// ```
pub fn load_config(path: &Path) -> Result<ConvertConfig, CoreError> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| CoreError::Config(format!("cannot read {}: {e}", path.display())))?;
    let config = parse_config(&content)
        .map_err(|e| CoreError::Config(format!("{}: {e}", path.display())))?;
    log::debug!("Config loaded from {}", path.display());
    Ok(config)
}
