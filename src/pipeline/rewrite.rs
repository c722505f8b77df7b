use super::compile;
use crate::error::Result;
use regex::Regex;

/// Root-relative directories that must keep resolving against the live
/// origin, since the mirror carries no local copies of theme/plugin assets.
const ASSET_PREFIX: &str = r"wp-(?:content|includes)/";

/// Static files referenced from the document head by filename.
const ICON_FILES: &str = r#"apple-touch-icon\.png|favicon-[^"]+\.png|site\.webmanifest"#;

pub struct AssetRewriter {
    css_url: Regex,
    css_replacement: String,
    attr_rules: Vec<Regex>,
    attr_replacement: String,
}

impl AssetRewriter {
    pub fn new(origin: &str) -> Result<Self> {
        let origin = origin.trim_end_matches('/');

        let mut attr_rules = Vec::new();
        for attr in ["href", "src"] {
            attr_rules.push(compile(&format!(r#"(?i)({attr}=")/({ASSET_PREFIX})"#))?);
            attr_rules.push(compile(&format!(r#"(?i)({attr}=")/({ICON_FILES})"#))?);
        }
        for attr in ["data-lazy-src", "data-rocket-src", "srcset", "data-lazy-srcset"] {
            attr_rules.push(compile(&format!(r#"(?i)({attr}=")/({ASSET_PREFIX})"#))?);
        }

        Ok(Self {
            css_url: compile(r#"url\((['"]?)/"#)?,
            css_replacement: format!("url(${{1}}{}/", origin),
            attr_rules,
            attr_replacement: format!("${{1}}{}/${{2}}", origin),
        })
    }

    /// Only leading-`/` (root-relative) values match, so output that already
    /// carries the absolute origin is never prefixed a second time.
    pub fn rewrite(&self, html: &str) -> String {
        let mut html = self
            .css_url
            .replace_all(html, self.css_replacement.as_str())
            .into_owned();

        for re in &self.attr_rules {
            html = re
                .replace_all(&html, self.attr_replacement.as_str())
                .into_owned();
        }

        html
    }
}
