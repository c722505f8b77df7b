mod noise;
mod rewrite;
mod shim;

pub use noise::NoiseStripper;
pub use rewrite::AssetRewriter;
pub use shim::ShimInjector;

use crate::error::{PipelineError, Result};
use regex::Regex;

pub(crate) fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|e| PipelineError::Pattern(e.to_string()).into())
}

/// The per-page transformation chain: strip plugin noise, drop any upstream
/// `<base>` tag so navigation stays local, absolutize asset URLs against the
/// origin, then inject the behavior shim.
pub struct Pipeline {
    stripper: NoiseStripper,
    rewriter: AssetRewriter,
    injector: ShimInjector,
    base_tag: Regex,
}

impl Pipeline {
    pub fn new(origin: &str) -> Result<Self> {
        Ok(Self {
            stripper: NoiseStripper::new()?,
            rewriter: AssetRewriter::new(origin)?,
            injector: ShimInjector::new()?,
            base_tag: compile(r"(?i)<base\b[^>]*>")?,
        })
    }

    pub fn process(&self, html: &str) -> String {
        let html = self.stripper.strip(html);
        let html = self.base_tag.replace_all(&html, "");
        let html = self.rewriter.rewrite(&html);
        self.injector.inject(&html)
    }
}
