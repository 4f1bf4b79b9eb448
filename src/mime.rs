//! Content types for files served from the site root.

use std::path::Path;

/// Content type for `path`, chosen by its extension (case-insensitive).
///
/// ```
/// use contact_relay::mime::content_type;
///
/// assert_eq!(content_type("contact.html".as_ref()), "text/html; charset=utf-8");
/// assert_eq!(content_type("img/logo.SVG".as_ref()), "image/svg+xml");
/// assert_eq!(content_type("LICENSE".as_ref()), "application/octet-stream");
/// ```
pub fn content_type(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    match ext.as_deref() {
        // Text
        Some("html" | "htm") => "text/html; charset=utf-8",
        Some("css") => "text/css; charset=utf-8",
        Some("txt") => "text/plain; charset=utf-8",
        Some("xml") => "application/xml",

        // Scripts and data
        Some("js" | "mjs") => "text/javascript; charset=utf-8",
        Some("json" | "map") => "application/json",
        Some("webmanifest") => "application/manifest+json",

        // Images
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        Some("ico") => "image/x-icon",
        Some("webp") => "image/webp",
        Some("avif") => "image/avif",

        // Fonts
        Some("woff") => "font/woff",
        Some("woff2") => "font/woff2",
        Some("ttf") => "font/ttf",
        Some("otf") => "font/otf",

        Some("pdf") => "application/pdf",

        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn common_site_assets() {
        assert_eq!(content_type(Path::new("index.html")), "text/html; charset=utf-8");
        assert_eq!(content_type(Path::new("css/site.css")), "text/css; charset=utf-8");
        assert_eq!(content_type(Path::new("js/app.js")), "text/javascript; charset=utf-8");
        assert_eq!(content_type(Path::new("img/hero.JPG")), "image/jpeg");
        assert_eq!(content_type(Path::new("fonts/inter.woff2")), "font/woff2");
    }

    #[test]
    fn unknown_or_missing_extension() {
        assert_eq!(content_type(Path::new("archive.xyz")), "application/octet-stream");
        assert_eq!(content_type(Path::new("CNAME")), "application/octet-stream");
    }
}
