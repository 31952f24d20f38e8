//! Logo lookup. Strategies are tried in order; the synthesized block always
//! succeeds, so a label never goes without a logo and a missing or broken
//! asset never fails a batch.

use crate::colour::{colours, Colour};
use crate::document::Document;
use crate::image::{AssetError, Image};
use id_arena::Id;
use std::path::Path;

/// A logo ready to be added to a document
pub enum LogoAsset {
    /// A raster or vector image loaded from the assets directory
    Image(Image),
    /// A solid block with centred text, drawn with the label's own fonts
    Synthesized {
        text: String,
        fill: Colour,
        text_colour: Colour,
    },
}

impl LogoAsset {
    /// Store the logo in `doc` once so that every label can refer to it
    pub fn install(self, doc: &mut Document) -> ResolvedLogo {
        match self {
            LogoAsset::Image(image) => {
                let aspect_ratio = image.aspect_ratio();
                ResolvedLogo::Image {
                    id: doc.add_image(image),
                    aspect_ratio,
                }
            }
            LogoAsset::Synthesized {
                text,
                fill,
                text_colour,
            } => ResolvedLogo::Synthesized {
                text,
                fill,
                text_colour,
            },
        }
    }
}

/// A logo that lives in a [Document]
#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedLogo {
    Image {
        id: Id<Image>,
        aspect_ratio: f32,
    },
    Synthesized {
        text: String,
        fill: Colour,
        text_colour: Colour,
    },
}

/// One way of finding a logo
pub trait LogoStrategy {
    /// Short name used in log messages
    fn name(&self) -> &'static str;

    /// Whether this strategy reads from the assets directory at all
    fn needs_assets(&self) -> bool {
        true
    }

    /// Try to produce a logo. Returning [None] moves on to the next strategy.
    fn try_load(&self, assets_dir: &Path) -> Option<LogoAsset>;
}

/// Try each candidate file in turn, logging why unusable ones were skipped
fn load_first(strategy: &str, assets_dir: &Path, file_names: &[&str]) -> Option<LogoAsset> {
    for file_name in file_names {
        let path = assets_dir.join(file_name);
        if !path.is_file() {
            log::debug!("{strategy}: {} not found", path.display());
            continue;
        }
        match Image::new_from_disk(&path) {
            Ok(image) => {
                log::debug!("{strategy}: using {}", path.display());
                return Some(LogoAsset::Image(image));
            }
            Err(err) => warn_unusable(strategy, &path, &err),
        }
    }
    None
}

fn warn_unusable(strategy: &str, path: &Path, err: &AssetError) {
    log::warn!("{strategy}: ignoring {}: {err}", path.display());
}

/// `logo.png`, `logo.jpg` or `logo.jpeg`
#[derive(Debug, Clone)]
pub struct RasterLogo {
    pub file_names: Vec<&'static str>,
}

impl Default for RasterLogo {
    fn default() -> Self {
        RasterLogo {
            file_names: vec!["logo.png", "logo.jpg", "logo.jpeg"],
        }
    }
}

impl LogoStrategy for RasterLogo {
    fn name(&self) -> &'static str {
        "raster logo"
    }

    fn try_load(&self, assets_dir: &Path) -> Option<LogoAsset> {
        load_first(self.name(), assets_dir, &self.file_names)
    }
}

/// `logo.svg`
#[derive(Debug, Clone)]
pub struct VectorLogo {
    pub file_name: &'static str,
}

impl Default for VectorLogo {
    fn default() -> Self {
        VectorLogo {
            file_name: "logo.svg",
        }
    }
}

impl LogoStrategy for VectorLogo {
    fn name(&self) -> &'static str {
        "vector logo"
    }

    fn try_load(&self, assets_dir: &Path) -> Option<LogoAsset> {
        load_first(self.name(), assets_dir, &[self.file_name])
    }
}

/// Solid block with centred text
#[derive(Debug, Clone)]
pub struct SynthesizedLogo {
    pub text: String,
    pub fill: Colour,
    pub text_colour: Colour,
}

impl Default for SynthesizedLogo {
    fn default() -> Self {
        SynthesizedLogo {
            text: "LOGO".into(),
            fill: colours::LOGO_BLUE,
            text_colour: colours::WHITE,
        }
    }
}

impl SynthesizedLogo {
    pub fn with_text<S: Into<String>>(text: S) -> SynthesizedLogo {
        SynthesizedLogo {
            text: text.into(),
            ..SynthesizedLogo::default()
        }
    }

    pub fn synthesize(&self) -> LogoAsset {
        LogoAsset::Synthesized {
            text: self.text.clone(),
            fill: self.fill,
            text_colour: self.text_colour,
        }
    }
}

impl LogoStrategy for SynthesizedLogo {
    fn name(&self) -> &'static str {
        "synthesized logo"
    }

    fn needs_assets(&self) -> bool {
        false
    }

    fn try_load(&self, _assets_dir: &Path) -> Option<LogoAsset> {
        Some(self.synthesize())
    }
}

/// An ordered list of [LogoStrategy]s
pub struct LogoChain {
    strategies: Vec<Box<dyn LogoStrategy + Send + Sync>>,
}

impl Default for LogoChain {
    /// Raster, then vector, then the synthesized block
    fn default() -> Self {
        LogoChain {
            strategies: vec![
                Box::new(RasterLogo::default()),
                Box::new(VectorLogo::default()),
                Box::new(SynthesizedLogo::default()),
            ],
        }
    }
}

impl LogoChain {
    /// An empty chain. [LogoChain::resolve] still falls back to the default
    /// synthesized logo when nothing in it succeeds.
    pub fn new() -> LogoChain {
        LogoChain {
            strategies: Vec::new(),
        }
    }

    /// Append a strategy to the end of the chain
    pub fn with_strategy<S: LogoStrategy + Send + Sync + 'static>(mut self, strategy: S) -> Self {
        self.strategies.push(Box::new(strategy));
        self
    }

    /// Names of the strategies, in the order they are tried
    pub fn names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    /// The first logo any strategy produces. Without an assets directory only
    /// strategies that need no files are consulted.
    pub fn resolve(&self, assets_dir: Option<&Path>) -> LogoAsset {
        for strategy in self.strategies.iter() {
            let found = match assets_dir {
                Some(dir) => strategy.try_load(dir),
                None if !strategy.needs_assets() => strategy.try_load(Path::new("")),
                None => None,
            };
            if let Some(asset) = found {
                log::debug!("logo resolved by {}", strategy.name());
                return asset;
            }
        }
        log::debug!("no logo strategy succeeded, synthesizing one");
        SynthesizedLogo::default().synthesize()
    }
}
