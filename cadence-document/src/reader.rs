//! Reader for the descriptor dialect.
//!
//! Supports what descriptor documents use and nothing more: a declaration,
//! a doctype (skipped), comments, elements with quoted attributes, character
//! data, CDATA sections, the predefined entities and numeric character
//! references. Namespaces, external entities and DTD validation are not
//! interpreted.

use crate::element::Element;
use crate::error::{DocumentError, DocumentResult};

/// Deepest element nesting accepted before the reader gives up.
pub const MAX_NESTING: usize = 256;

/// Reads a complete document and returns its root element.
pub fn parse_document(input: &str) -> DocumentResult<Element> {
    let mut reader = Reader::new(input);
    reader.skip_misc()?;
    if reader.at_end() {
        return Err(DocumentError::Empty);
    }
    let root = reader.element()?;
    reader.skip_misc()?;
    if !reader.at_end() {
        return Err(reader.syntax("content after the root element"));
    }
    Ok(root)
}

/// Reads a sequence of sibling elements with no enclosing root.
pub fn parse_fragment(input: &str) -> DocumentResult<Vec<Element>> {
    let mut reader = Reader::new(input);
    let mut elements = Vec::new();
    loop {
        reader.skip_misc()?;
        if reader.at_end() {
            return Ok(elements);
        }
        elements.push(reader.element()?);
    }
}

struct Reader<'a> {
    src: &'a str,
    pos: usize,
    depth: usize,
}

impl<'a> Reader<'a> {
    fn new(src: &'a str) -> Self {
        Self { src, pos: 0, depth: 0 }
    }

    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    fn at_end(&self) -> bool {
        self.pos >= self.src.len()
    }

    fn starts_with(&self, token: &str) -> bool {
        self.rest().starts_with(token)
    }

    fn bump(&mut self, bytes: usize) {
        self.pos += bytes;
    }

    fn syntax(&self, message: impl Into<String>) -> DocumentError {
        DocumentError::Syntax {
            offset: self.pos,
            message: message.into(),
        }
    }

    fn skip_whitespace(&mut self) {
        let trimmed = self.rest().trim_start();
        self.pos = self.src.len() - trimmed.len();
    }

    fn expect(&mut self, token: &str, what: &'static str) -> DocumentResult<()> {
        if self.starts_with(token) {
            self.bump(token.len());
            Ok(())
        } else if self.at_end() {
            Err(DocumentError::UnexpectedEof(what))
        } else {
            Err(self.syntax(format!("expected '{token}' in {what}")))
        }
    }

    /// Consumes input up to and including `terminator`, returning what came before it.
    fn take_until(&mut self, terminator: &str, what: &'static str) -> DocumentResult<&'a str> {
        let rest = self.rest();
        match rest.find(terminator) {
            Some(end) => {
                self.bump(end + terminator.len());
                Ok(&rest[..end])
            }
            None => Err(DocumentError::UnexpectedEof(what)),
        }
    }

    /// Skips whitespace, declarations, comments and doctypes between elements.
    fn skip_misc(&mut self) -> DocumentResult<()> {
        loop {
            self.skip_whitespace();
            if self.starts_with("<?") {
                self.take_until("?>", "processing instruction")?;
            } else if self.starts_with("<!--") {
                self.bump(4);
                self.take_until("-->", "comment")?;
            } else if self.starts_with("<!DOCTYPE") || self.starts_with("<!doctype") {
                self.skip_doctype()?;
            } else {
                return Ok(());
            }
        }
    }

    fn skip_doctype(&mut self) -> DocumentResult<()> {
        let mut brackets = 0usize;
        for (offset, c) in self.rest().char_indices() {
            match c {
                '[' => brackets += 1,
                ']' => brackets = brackets.saturating_sub(1),
                '>' if brackets == 0 => {
                    self.bump(offset + 1);
                    return Ok(());
                }
                _ => {}
            }
        }
        Err(DocumentError::UnexpectedEof("doctype"))
    }

    fn name(&mut self) -> DocumentResult<String> {
        let rest = self.rest();
        let end = rest
            .find(|c: char| c.is_whitespace() || matches!(c, '/' | '>' | '=' | '<' | '"' | '\''))
            .unwrap_or(rest.len());
        if end == 0 {
            return Err(if self.at_end() {
                DocumentError::UnexpectedEof("name")
            } else {
                self.syntax("expected a name")
            });
        }
        self.bump(end);
        Ok(rest[..end].to_string())
    }

    fn quoted(&mut self) -> DocumentResult<String> {
        let quote = match self.rest().chars().next() {
            Some(q @ ('"' | '\'')) => q,
            Some(_) => return Err(self.syntax("attribute value must be quoted")),
            None => return Err(DocumentError::UnexpectedEof("attribute value")),
        };
        self.bump(1);
        let offset = self.pos;
        let rest = self.rest();
        let end = rest
            .find(quote)
            .ok_or(DocumentError::UnexpectedEof("attribute value"))?;
        self.bump(end + 1);
        unescape(&rest[..end], offset)
    }

    fn element(&mut self) -> DocumentResult<Element> {
        if self.depth >= MAX_NESTING {
            return Err(self.syntax(format!("elements nested deeper than {MAX_NESTING}")));
        }
        self.expect("<", "start tag")?;
        let mut element = Element::new(self.name()?);

        loop {
            self.skip_whitespace();
            if self.starts_with("/>") {
                self.bump(2);
                return Ok(element);
            }
            if self.starts_with(">") {
                self.bump(1);
                break;
            }
            if self.at_end() {
                return Err(DocumentError::UnexpectedEof("start tag"));
            }
            let key = self.name()?;
            self.skip_whitespace();
            self.expect("=", "attribute")?;
            self.skip_whitespace();
            let value = self.quoted()?;
            if element.attr(&key).is_some() {
                return Err(self.syntax(format!("duplicate attribute '{key}'")));
            }
            element.attributes.push((key, value));
        }

        self.depth += 1;
        let result = self.content(&mut element);
        self.depth -= 1;
        result.map(|()| element)
    }

    fn content(&mut self, element: &mut Element) -> DocumentResult<()> {
        loop {
            if self.at_end() {
                return Err(DocumentError::UnexpectedEof("element content"));
            }
            if self.starts_with("</") {
                self.bump(2);
                let found = self.name()?;
                self.skip_whitespace();
                self.expect(">", "end tag")?;
                if found != element.tag {
                    return Err(DocumentError::MismatchedTag {
                        expected: element.tag.clone(),
                        found,
                    });
                }
                return Ok(());
            } else if self.starts_with("<!--") {
                self.bump(4);
                self.take_until("-->", "comment")?;
            } else if self.starts_with("<![CDATA[") {
                self.bump(9);
                let body = self.take_until("]]>", "CDATA section")?;
                push_trimmed(element, body.to_string());
            } else if self.starts_with("<?") {
                self.take_until("?>", "processing instruction")?;
            } else if self.starts_with("<") {
                let child = self.element()?;
                element.push(child);
            } else {
                let rest = self.rest();
                let end = rest.find('<').unwrap_or(rest.len());
                let offset = self.pos;
                self.bump(end);
                push_trimmed(element, unescape(&rest[..end], offset)?);
            }
        }
    }
}

fn push_trimmed(element: &mut Element, text: String) {
    let trimmed = text.trim();
    if !trimmed.is_empty() {
        element.push_text(trimmed);
    }
}

/// Resolves entity and character references in `raw`.
///
/// `offset` is the byte position of `raw` in the document, used for errors.
fn unescape(raw: &str, offset: usize) -> DocumentResult<String> {
    if !raw.contains('&') {
        return Ok(raw.to_string());
    }

    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let at = offset + (raw.len() - rest.len()) + amp;
        let after = &rest[amp + 1..];
        let semi = after.find(';').ok_or_else(|| DocumentError::Syntax {
            offset: at,
            message: "unterminated entity reference".into(),
        })?;
        let entity = &after[..semi];
        let resolved = match entity {
            "lt" => Some('<'),
            "gt" => Some('>'),
            "amp" => Some('&'),
            "quot" => Some('"'),
            "apos" => Some('\''),
            _ => entity
                .strip_prefix("#x")
                .or_else(|| entity.strip_prefix("#X"))
                .map(|hex| u32::from_str_radix(hex, 16).ok())
                .unwrap_or_else(|| {
                    entity
                        .strip_prefix('#')
                        .and_then(|dec| dec.parse::<u32>().ok())
                })
                .and_then(char::from_u32),
        };
        match resolved {
            Some(c) => out.push(c),
            None => {
                return Err(DocumentError::Syntax {
                    offset: at,
                    message: format!("unknown entity reference '&{entity};'"),
                });
            }
        }
        rest = &after[semi + 1..];
    }
    out.push_str(rest);
    Ok(out)
}
