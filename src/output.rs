//! Text templates for reporting palettes.
//!
//! A template is plain text with placeholders in braces:
//! `{filename}`, `{background}`, `{primary}`, `{secondary}`, and `{detail}`.
//! Colors are substituted as six lowercase hex digits.
//! Use `{{` and `}}` for literal braces.
//!
//! # Examples
//! ```
//! # use colorart::{output::Template, Palette, Rgb};
//! let template: Template = "<div style=\"background: #{background}\">{filename}</div>\n".parse()?;
//! let palette = Palette {
//!     background: Rgb::new(0x1a, 0x2b, 0x3c),
//!     primary: Rgb::WHITE,
//!     secondary: Rgb::WHITE,
//!     detail: Rgb::WHITE,
//! };
//! assert_eq!(
//!     template.render("cover.jpg", &palette),
//!     "<div style=\"background: #1a2b3c\">cover.jpg</div>\n",
//! );
//! # Ok::<(), colorart::Error>(())
//! ```

use crate::{Error, Palette};
use std::{
    fmt::{self, Write},
    str::FromStr,
};

/// A value that can be substituted into a [`Template`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    /// `{filename}`
    Filename,
    /// `{background}`
    Background,
    /// `{primary}`
    Primary,
    /// `{secondary}`
    Secondary,
    /// `{detail}`
    Detail,
}

impl Field {
    /// Looks up a placeholder by the name between its braces.
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "filename" => Some(Self::Filename),
            "background" => Some(Self::Background),
            "primary" => Some(Self::Primary),
            "secondary" => Some(Self::Secondary),
            "detail" => Some(Self::Detail),
            _ => None,
        }
    }
}

/// A parsed piece of a [`Template`].
#[derive(Debug, Clone, PartialEq, Eq)]
enum Piece {
    /// Literal text, with escaped braces already resolved.
    Text(String),
    /// A placeholder.
    Field(Field),
}

/// A parsed output template, rendered once per analyzed image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    /// The literal text and placeholders, in order.
    pieces: Vec<Piece>,
}

impl Template {
    /// Parses a template.
    ///
    /// # Errors
    /// Returns [`Error::Template`] for unknown placeholders, unclosed `{`, or unmatched `}`.
    pub fn parse(text: &str) -> Result<Self, Error> {
        let error = |offset, reason: &str| Error::Template { offset, reason: reason.to_owned() };

        let mut pieces = Vec::new();
        let mut literal = String::new();
        let mut chars = text.char_indices().peekable();

        while let Some((i, c)) = chars.next() {
            match c {
                '{' if chars.next_if(|&(_, c)| c == '{').is_some() => literal.push('{'),
                '}' if chars.next_if(|&(_, c)| c == '}').is_some() => literal.push('}'),
                '{' => {
                    let start = i + 1;
                    let end = loop {
                        match chars.next() {
                            Some((j, '}')) => break j,
                            Some(_) => {}
                            None => return Err(error(i, "unclosed `{`")),
                        }
                    };

                    let name = text.get(start..end).unwrap_or_default().trim();
                    let field = Field::from_name(name)
                        .ok_or_else(|| error(i, &format!("unknown placeholder `{name}`")))?;

                    if !literal.is_empty() {
                        pieces.push(Piece::Text(std::mem::take(&mut literal)));
                    }
                    pieces.push(Piece::Field(field));
                }
                '}' => return Err(error(i, "unmatched `}`")),
                c => literal.push(c),
            }
        }

        if !literal.is_empty() {
            pieces.push(Piece::Text(literal));
        }

        Ok(Self { pieces })
    }

    /// Writes the template for one image into `out`.
    ///
    /// # Errors
    /// Returns an error if writing to `out` fails.
    pub fn render_to(&self, out: &mut impl Write, filename: &str, palette: &Palette) -> fmt::Result {
        for piece in &self.pieces {
            match piece {
                Piece::Text(text) => out.write_str(text)?,
                Piece::Field(Field::Filename) => out.write_str(filename)?,
                Piece::Field(Field::Background) => write!(out, "{}", palette.background)?,
                Piece::Field(Field::Primary) => write!(out, "{}", palette.primary)?,
                Piece::Field(Field::Secondary) => write!(out, "{}", palette.secondary)?,
                Piece::Field(Field::Detail) => write!(out, "{}", palette.detail)?,
            }
        }
        Ok(())
    }

    /// Returns a [`Display`](fmt::Display) view of the template filled in for one image.
    #[must_use]
    pub fn rendered<'a>(&'a self, filename: &'a str, palette: &'a Palette) -> Rendered<'a> {
        Rendered { template: self, filename, palette }
    }

    /// Renders the template for one image.
    #[must_use]
    pub fn render(&self, filename: &str, palette: &Palette) -> String {
        self.rendered(filename, palette).to_string()
    }
}

/// A [`Template`] filled in for one image, returned by [`Template::rendered`].
#[derive(Debug, Clone, Copy)]
pub struct Rendered<'a> {
    /// The template to fill in.
    template: &'a Template,
    /// The value of `{filename}`.
    filename: &'a str,
    /// The colors to substitute.
    palette: &'a Palette,
}

impl fmt::Display for Rendered<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.template.render_to(f, self.filename, self.palette)
    }
}

impl FromStr for Template {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Rgb;

    fn palette() -> Palette {
        Palette {
            background: Rgb::new(1, 2, 3),
            primary: Rgb::new(0xaa, 0xbb, 0xcc),
            secondary: Rgb::WHITE,
            detail: Rgb::BLACK,
        }
    }

    fn error_offset(text: &str) -> usize {
        match Template::parse(text) {
            Err(Error::Template { offset, .. }) => offset,
            other => panic!("expected a template error, got {other:?}"),
        }
    }

    #[test]
    fn renders_every_field() {
        let template =
            Template::parse("{filename}: {background} {primary} {secondary} { detail }").unwrap();
        assert_eq!(
            template.render("a.png", &palette()),
            "a.png: 010203 aabbcc ffffff 000000"
        );
    }

    #[test]
    fn escaped_braces() {
        let template = Template::parse(".c {{ color: #{primary}; }}").unwrap();
        assert_eq!(template.render("", &palette()), ".c { color: #aabbcc; }");
    }

    #[test]
    fn plain_text() {
        let template = Template::parse("no placeholders, ünïcode\n").unwrap();
        assert_eq!(template.render("x", &palette()), "no placeholders, ünïcode\n");
        assert_eq!(Template::parse("").unwrap().render("x", &palette()), "");
    }

    #[test]
    fn rendered_view_matches_render() {
        let template = Template::parse("{filename} {detail}\n").unwrap();
        let palette = palette();
        let mut out = String::new();
        for filename in ["a.png", "b.gif"] {
            out.push_str(&template.rendered(filename, &palette).to_string());
        }
        assert_eq!(out, "a.png 000000\nb.gif 000000\n");
        assert_eq!(template.render("a.png", &palette), "a.png 000000\n");
    }

    #[test]
    fn invalid_templates() {
        assert_eq!(error_offset("abc {color}"), 4);
        assert_eq!(error_offset("abc {primary"), 4);
        assert_eq!(error_offset("{primary} }"), 10);
    }
}
