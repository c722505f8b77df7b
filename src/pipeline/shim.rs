use super::compile;
use crate::error::Result;
use regex::{NoExpand, Regex};

/// Replacement for the plugin JavaScript the stripping stage removes: images
/// still carry `data-lazy-src`/`data-lazy-srcset` and the theme's mobile nav
/// expects a click handler, so a minimal inline script restores both.
pub const SHIM: &str = r#"<script>
(function(){
  function delazify(){
    document.querySelectorAll('img[data-lazy-src]').forEach(function(img){
      var lazy = img.getAttribute('data-lazy-src');
      if(!lazy) return;
      var cur = img.getAttribute('src') || '';
      if(!cur || cur.indexOf('data:image') === 0) img.setAttribute('src', lazy);
      img.removeAttribute('data-lazy-src');
    });
    document.querySelectorAll('source[data-lazy-srcset]').forEach(function(source){
      var lazy = source.getAttribute('data-lazy-srcset');
      if(!lazy) return;
      source.setAttribute('srcset', lazy);
      source.removeAttribute('data-lazy-srcset');
    });
  }

  function setupNav(){
    var opener = document.querySelector('.menu-opener');
    if(opener){
      opener.addEventListener('click', function(e){
        e.preventDefault();
        document.body.classList.toggle('nav-open');
      });
    }
    document.querySelectorAll('#nav .opener').forEach(function(span){
      span.addEventListener('click', function(e){
        e.preventDefault();
        e.stopPropagation();
        var li = span.closest('li');
        if(li) li.classList.toggle('open');
      });
    });
  }

  document.addEventListener('DOMContentLoaded', function(){
    delazify();
    setupNav();
  });
})();
</script>"#;

pub struct ShimInjector {
    body_close: Regex,
}

impl ShimInjector {
    pub fn new() -> Result<Self> {
        Ok(Self {
            body_close: compile(r"(?i)</body\s*>")?,
        })
    }

    /// Places the shim immediately before the first closing body tag, or at
    /// the very end of the document when there is none.
    pub fn inject(&self, html: &str) -> String {
        if self.body_close.is_match(html) {
            let with_shim = format!("{}\n</body>", SHIM);
            self.body_close
                .replacen(html, 1, NoExpand(&with_shim))
                .into_owned()
        } else {
            format!("{}\n{}", html, SHIM)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn injector() -> ShimInjector {
        ShimInjector::new().unwrap()
    }

    fn shim_count(html: &str) -> usize {
        html.matches("function delazify()").count()
    }

    #[test]
    fn injects_before_closing_body_tag() {
        let out = injector().inject("<html><body><p>hi</p></body></html>");
        assert_eq!(shim_count(&out), 1);
        let shim_at = out.find(SHIM).unwrap();
        let body_at = out.find("</body>").unwrap();
        assert!(shim_at < body_at);
        assert!(out.ends_with("</body></html>"));
    }

    #[test]
    fn matches_body_tag_case_and_whitespace_variants() {
        let out = injector().inject("<body>x</BODY >");
        assert_eq!(shim_count(&out), 1);
        assert!(out.ends_with("</body>"));
    }

    #[test]
    fn appends_at_end_when_no_body_tag() {
        let out = injector().inject("<p>fragment</p>");
        assert_eq!(shim_count(&out), 1);
        assert!(out.starts_with("<p>fragment</p>\n"));
        assert!(out.ends_with("</script>"));
    }

    #[test]
    fn only_first_closing_body_tag_gets_the_shim() {
        let out = injector().inject("<body>a</body><body>b</body>");
        assert_eq!(shim_count(&out), 1);
        let shim_at = out.find(SHIM).unwrap();
        let first_close = out.find("</body>").unwrap();
        assert!(shim_at < first_close);
    }
}
