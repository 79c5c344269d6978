//! Relative link and image resolution.

use std::path::Path;

use crate::node::ImageFormat;

/// Resolve `url` against `base`.
///
/// `http://` and `https://` URLs are absolute and returned unchanged. Anything
/// else is joined to `base` with exactly one slash between them (one trailing
/// slash trimmed from the base, one leading slash from the URL). Without a
/// base the URL stays a bare relative path.
pub fn resolve(url: &str, base: Option<&str>) -> String {
    if url.starts_with("http://") || url.starts_with("https://") {
        return url.to_string();
    }
    match base {
        Some(base) => {
            let base = base.strip_suffix('/').unwrap_or(base);
            let path = url.strip_prefix('/').unwrap_or(url);
            format!("{base}/{path}")
        }
        None => url.to_string(),
    }
}

/// Vector for `.svg` images, raster for everything else.
pub fn image_format(url: &str) -> ImageFormat {
    // Query strings and fragments are not part of the file name
    let path = url.split(['?', '#']).next().unwrap_or(url);
    let is_svg = Path::new(path)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"));
    if is_svg {
        ImageFormat::Vector
    } else {
        ImageFormat::Raster
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_url_joins_base() {
        assert_eq!(
            resolve("img/x.png", Some("https://host/docs/")),
            "https://host/docs/img/x.png"
        );
        assert_eq!(
            resolve("/img/x.png", Some("https://host/docs")),
            "https://host/docs/img/x.png"
        );
    }

    #[test]
    fn only_one_slash_is_trimmed_each_side() {
        assert_eq!(resolve("//x", Some("https://h//")), "https://h///x");
    }

    #[test]
    fn absolute_url_is_unchanged() {
        assert_eq!(
            resolve("https://other/y.png", Some("https://host/docs/")),
            "https://other/y.png"
        );
        assert_eq!(resolve("http://other/y.png", None), "http://other/y.png");
    }

    #[test]
    fn no_base_leaves_relative_path() {
        assert_eq!(resolve("img/x.png", None), "img/x.png");
    }

    #[test]
    fn svg_is_vector() {
        assert_eq!(image_format("pic.svg"), ImageFormat::Vector);
        assert_eq!(image_format("https://h/a/pic.SVG?v=2"), ImageFormat::Vector);
        assert_eq!(image_format("pic.png"), ImageFormat::Raster);
        assert_eq!(image_format("svg"), ImageFormat::Raster);
    }
}
