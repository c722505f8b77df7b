use super::compile;
use crate::error::Result;
use regex::Regex;

/// Removal patterns for the known third-party plugin stack. Matching is
/// case-insensitive and spans newlines; paired markers are matched
/// non-greedily so duplicate blocks are removed one by one. This is a fixed
/// allow-list of removals, not a general sanitizer: unknown noise stays.
const NOISE_PATTERNS: &[&str] = &[
    // WP Rocket / IE helper scripts
    r"(?is)<script>if\(navigator\.userAgent\.match\(/MSIE.*?</script>",
    r"(?is)<script>\(\(\)=>\{class RocketLazyLoadScripts.*?</script>",
    // Analytics blocks
    r"(?is)<!-- Google Tag Manager -->.*?<!-- End Google Tag Manager -->",
    r"(?is)<!-- Google Tag Manager \(noscript\) -->.*?<!-- End Google Tag Manager \(noscript\) -->",
    r"(?is)<!-- Meta Pixel Code -->.*?<!-- End Meta Pixel Code -->",
    // UserWay accessibility widget
    r"(?is)<script[^>]+cdn\.userway\.org/widget\.js[^>]*></script>",
    // CleanTalk anti-spam (external bundles + inline config)
    r"(?is)<script[^>]+cleantalk[^>]*></script>",
    r"(?is)<script[^>]+apbct-public-bundle_full-protection[^>]*></script>",
    r"(?is)<script[^>]*>\s*var\s+ctPublicFunctions\b.*?</script>",
    r"(?is)<script[^>]*>\s*var\s+ctPublic\s*=\s*\{.*?</script>",
];

pub struct NoiseStripper {
    removals: Vec<Regex>,
    rocket_type: Regex,
    rocket_src: Regex,
    rocket_attr: Regex,
    minify_attr: Regex,
    wp_strategy_attr: Regex,
}

impl NoiseStripper {
    pub fn new() -> Result<Self> {
        let removals = NOISE_PATTERNS
            .iter()
            .map(|p| compile(p))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            removals,
            rocket_type: compile(r#"(?i)\s+type="rocketlazyloadscript""#)?,
            rocket_src: compile(r"(?i)\sdata-rocket-src=")?,
            rocket_attr: compile(r#"\sdata-rocket-[a-zA-Z0-9_-]+="[^"]*""#)?,
            minify_attr: compile(r#"\sdata-minify="[^"]*""#)?,
            wp_strategy_attr: compile(r#"\sdata-wp-strategy="[^"]*""#)?,
        })
    }

    pub fn strip(&self, html: &str) -> String {
        let mut html = html.to_string();

        for re in &self.removals {
            html = re.replace_all(&html, "").into_owned();
        }

        // Turn rocket-deferred script tags back into normal script tags.
        // The src promotion must run before the generic attribute strip.
        html = self.rocket_type.replace_all(&html, "").into_owned();
        html = self.rocket_src.replace_all(&html, " src=").into_owned();
        html = self.rocket_attr.replace_all(&html, "").into_owned();
        html = self.minify_attr.replace_all(&html, "").into_owned();
        html = self.wp_strategy_attr.replace_all(&html, "").into_owned();

        html
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stripper() -> NoiseStripper {
        NoiseStripper::new().unwrap()
    }

    #[test]
    fn removes_msie_helper_script() {
        let html = "<script>if(navigator.userAgent.match(/MSIE|Trident/)){\n  document.write('<link rel=\"stylesheet\" href=\"/legacy.css\">');\n}</script><p>body</p>";
        assert_eq!(stripper().strip(html), "<p>body</p>");
    }

    #[test]
    fn removes_rocket_lazyload_polyfill_script() {
        let html = "<script>(()=>{class RocketLazyLoadScripts{\n  constructor(){this.triggerEvents=[\"keydown\",\"mousemove\"];}\n}\nnew RocketLazyLoadScripts();})()</script>rest";
        assert_eq!(stripper().strip(html), "rest");
    }

    #[test]
    fn removes_gtm_block_across_newlines() {
        let html = "<head>\n<!-- Google Tag Manager -->\n<script>\nvar x = 1;\n</script>\n<!-- End Google Tag Manager -->\n</head>";
        let out = stripper().strip(html);
        assert!(!out.contains("Google Tag Manager"));
        assert!(out.contains("<head>"));
        assert!(out.contains("</head>"));
    }

    #[test]
    fn removes_gtm_block_case_insensitively() {
        let html = "<!-- GOOGLE TAG MANAGER -->gtag();<!-- end google tag manager -->";
        assert!(!stripper().strip(html).to_lowercase().contains("tag manager"));
    }

    #[test]
    fn removes_duplicate_marker_pairs_independently() {
        let html = "keep1\
            <!-- Meta Pixel Code -->a<!-- End Meta Pixel Code -->\
            keep2\
            <!-- Meta Pixel Code -->b<!-- End Meta Pixel Code -->\
            keep3";
        let out = stripper().strip(html);
        assert_eq!(out, "keep1keep2keep3");
    }

    #[test]
    fn gtm_noscript_variant_is_removed_separately() {
        let html = "<!-- Google Tag Manager (noscript) --><noscript></noscript><!-- End Google Tag Manager (noscript) -->body";
        assert_eq!(stripper().strip(html), "body");
    }

    #[test]
    fn removes_userway_and_cleantalk_tags() {
        let html = concat!(
            r#"<script src="https://cdn.userway.org/widget.js" data-account="x"></script>"#,
            r#"<script src="https://example.org/cleantalk-antispam.js"></script>"#,
            r#"<script src="/wp-content/plugins/x/apbct-public-bundle_full-protection.min.js"></script>"#,
            "<p>content</p>",
        );
        assert_eq!(stripper().strip(html), "<p>content</p>");
    }

    #[test]
    fn removes_inline_cleantalk_config_blocks() {
        let html = "<script>\n  var ctPublicFunctions = {a:1};\n</script>\
                    <script>var ctPublic = {\n b: 2 };</script>rest";
        assert_eq!(stripper().strip(html), "rest");
    }

    #[test]
    fn normalizes_rocket_deferred_script() {
        let html = r#"<script data-rocket-src="/wp-content/x.js" type="rocketlazyloadscript" data-rocket-defer="1" data-minify="1"></script>"#;
        let out = stripper().strip(html);
        assert_eq!(out, r#"<script src="/wp-content/x.js"></script>"#);
    }

    #[test]
    fn strips_wp_strategy_attribute() {
        let html = r#"<script src="/a.js" data-wp-strategy="defer"></script>"#;
        assert_eq!(
            stripper().strip(html),
            r#"<script src="/a.js"></script>"#
        );
    }

    #[test]
    fn leaves_unknown_scripts_alone() {
        let html = r#"<script src="/wp-includes/js/jquery.js"></script>"#;
        assert_eq!(stripper().strip(html), html);
    }
}
