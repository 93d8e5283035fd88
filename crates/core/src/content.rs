use std::fmt;
use std::str::FromStr;

use quick_xml::Reader;
use quick_xml::escape::resolve_predefined_entity;
use quick_xml::events::{BytesRef, BytesStart, Event};

use crate::error::NotificationError;

/// Declared format of a notification body.
///
/// The content type decides both how the body is validated before sending
/// and which `Content-Type` header goes on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentType {
    Json,
    Text,
    Xml,
}

impl ContentType {
    /// Every supported content type, in the order they are reported to
    /// callers.
    pub const ALL: [Self; 3] = [Self::Json, Self::Text, Self::Xml];

    /// Canonical MIME string sent in the `Content-Type` header.
    pub fn mime(self) -> &'static str {
        match self {
            Self::Json => "application/json",
            Self::Text => "text/plain",
            Self::Xml => "text/xml",
        }
    }

    /// Comma-separated list of supported MIME strings.
    pub fn supported_list() -> String {
        Self::ALL
            .into_iter()
            .map(Self::mime)
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Check that `body` is acceptable for this content type.
    ///
    /// Empty bodies are rejected for every type. JSON bodies must parse, XML
    /// bodies must be a well-formed document, text bodies are accepted as is.
    pub fn validate_body(self, body: &str) -> Result<(), NotificationError> {
        if body.is_empty() {
            return Err(NotificationError::MissingBody);
        }
        match self {
            Self::Json => check_json(body).map_err(NotificationError::InvalidJson),
            Self::Xml => check_xml(body).map_err(NotificationError::InvalidXml),
            Self::Text => Ok(()),
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mime())
    }
}

impl FromStr for ContentType {
    type Err = NotificationError;

    /// Accepts exactly the MIME strings in [`ContentType::ALL`], ignoring
    /// ASCII case.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        if raw.is_empty() {
            return Err(NotificationError::MissingContentType);
        }
        Self::ALL
            .into_iter()
            .find(|c| c.mime().eq_ignore_ascii_case(raw))
            .ok_or_else(|| NotificationError::UnsupportedContentType(raw.to_owned()))
    }
}

/// Returns `true` if `body` is syntactically valid JSON.
///
/// Arrays and objects nested more than 128 levels deep are rejected; that
/// is `serde_json`'s recursion limit.
pub fn is_valid_json(body: &str) -> bool {
    check_json(body).is_ok()
}

/// Returns `true` if `body` is a well-formed XML document.
pub fn is_valid_xml(body: &str) -> bool {
    check_xml(body).is_ok()
}

fn check_json(body: &str) -> Result<(), String> {
    serde_json::from_str::<serde::de::IgnoredAny>(body)
        .map(|_| ())
        .map_err(|e| e.to_string())
}

/// Walks the document once, requiring exactly one root element, matched
/// end tags, well-formed attributes and comments, known entity references,
/// an XML declaration only at the very start, and no character data
/// outside the root.
fn check_xml(body: &str) -> Result<(), String> {
    let mut reader = Reader::from_str(body);
    reader.config_mut().check_comments = true;

    let mut depth: usize = 0;
    let mut roots: usize = 0;
    let mut first_event = true;
    let mut has_doctype = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(start)) => {
                check_attributes(&start)?;
                if depth == 0 {
                    roots += 1;
                }
                depth += 1;
            }
            Ok(Event::Empty(empty)) => {
                check_attributes(&empty)?;
                if depth == 0 {
                    roots += 1;
                }
            }
            Ok(Event::End(end)) => {
                depth = depth.checked_sub(1).ok_or_else(|| {
                    format!(
                        "unexpected end tag `{}`",
                        String::from_utf8_lossy(end.name().as_ref())
                    )
                })?;
            }
            Ok(Event::Text(text)) => {
                if depth == 0 && !text.iter().all(u8::is_ascii_whitespace) {
                    return Err("character data outside the root element".to_owned());
                }
            }
            Ok(Event::CData(_)) => {
                if depth == 0 {
                    return Err("CDATA outside the root element".to_owned());
                }
            }
            Ok(Event::GeneralRef(reference)) => {
                if depth == 0 {
                    return Err("entity reference outside the root element".to_owned());
                }
                check_reference(&reference, has_doctype)?;
            }
            Ok(Event::Decl(_)) => {
                if !first_event {
                    return Err("XML declaration is not at the start of the document".to_owned());
                }
            }
            Ok(Event::DocType(_)) => {
                if roots > 0 || has_doctype {
                    return Err("misplaced document type declaration".to_owned());
                }
                has_doctype = true;
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                return Err(format!(
                    "{e} at position {}",
                    reader.error_position()
                ));
            }
        }
        first_event = false;
        if roots > 1 {
            return Err("document has more than one root element".to_owned());
        }
    }

    if depth > 0 {
        return Err(format!("{depth} element(s) left unclosed"));
    }
    if roots == 0 {
        return Err("document has no root element".to_owned());
    }
    Ok(())
}

/// Attributes are parsed lazily by the reader, so walk them to surface
/// missing values, unquoted values, and duplicates.
fn check_attributes(element: &BytesStart<'_>) -> Result<(), String> {
    for attribute in element.attributes() {
        attribute.map_err(|e| e.to_string())?;
    }
    Ok(())
}

/// Character references must resolve. Named references must be one of the
/// five predefined entities unless a DOCTYPE could have declared them.
fn check_reference(reference: &BytesRef<'_>, has_doctype: bool) -> Result<(), String> {
    if reference.is_char_ref() {
        return match reference.resolve_char_ref() {
            Ok(Some(_)) => Ok(()),
            Ok(None) => Err("malformed character reference".to_owned()),
            Err(e) => Err(e.to_string()),
        };
    }

    let name = reference.decode().map_err(|e| e.to_string())?;
    if has_doctype || resolve_predefined_entity(&name).is_some() {
        Ok(())
    } else {
        Err(format!("undefined entity `&{name};`"))
    }
}
