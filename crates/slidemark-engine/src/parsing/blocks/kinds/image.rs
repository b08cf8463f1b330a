use std::sync::OnceLock;

use regex::Regex;

use super::regex;
use crate::models::Image;

/// `![alt](url "title")/w_slide//w_plain/`
pub struct ImageLine;

impl ImageLine {
    pub fn parse(line: &str) -> Option<Image> {
        static RE: OnceLock<Regex> = OnceLock::new();
        let caps = regex(
            &RE,
            r#"^!\[([^\]]*)\]\(\s*([^\s)"]+)(?:\s+"([^"]*)")?\s*\)(?:/([^/]*)/(?:/([^/]*)/)?)?\s*$"#,
        )
        .captures(line)?;
        let text = |i| caps.get(i).map(|m| m.as_str().to_string());
        let width = |i| text(i).filter(|w: &String| !w.trim().is_empty());
        Some(Image {
            alt: text(1).unwrap_or_default(),
            location: text(2)?,
            title: text(3),
            width_slide: width(4),
            width_plain: width(5),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_with_title_and_widths() {
        let image = ImageLine::parse(r#"![Logo](img/logo.png "The logo")/50%//30%/"#).unwrap();
        assert_eq!(image.alt, "Logo");
        assert_eq!(image.location, "img/logo.png");
        assert_eq!(image.title.as_deref(), Some("The logo"));
        assert_eq!(image.width_slide.as_deref(), Some("50%"));
        assert_eq!(image.width_plain.as_deref(), Some("30%"));
    }

    #[test]
    fn plain_image() {
        let image = ImageLine::parse("![](a.png)").unwrap();
        assert_eq!(image.alt, "");
        assert_eq!(image.location, "a.png");
        assert_eq!(image.title, None);
        assert_eq!(image.width_slide, None);
    }

    #[test]
    fn slide_width_only() {
        let image = ImageLine::parse("![x](a.png)/80%/").unwrap();
        assert_eq!(image.width_slide.as_deref(), Some("80%"));
        assert_eq!(image.width_plain, None);
    }

    #[test]
    fn inline_image_in_text_is_not_an_image_line() {
        assert!(ImageLine::parse("see ![x](a.png)").is_none());
    }
}
