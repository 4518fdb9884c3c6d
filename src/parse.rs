//! The parse module converts downloaded content into plain visible text.

use encoding_rs::{Encoding, UTF_8};
use log::warn;
use lopdf::Document;
use scraper::{Html, Node};

use crate::ContentKind;
use crate::constants::HIDDEN_ELEMENTS;
use crate::error::ConversionError;

/// Converts a response body to plain text, choosing the converter from the
/// `Content-Type` header value.
///
/// # Arguments
///
/// * `content_type` - The raw `Content-Type` header value, if the response had one
/// * `body` - The response body
///
/// # Errors
///
/// Returns an error if the body is declared as PDF but cannot be read as one.
pub fn convert_to_text(content_type: Option<&str>, body: &[u8]) -> Result<String, ConversionError> {
    match ContentKind::from_content_type(content_type) {
        ContentKind::Pdf => pdf_to_text(body),
        ContentKind::Html { assumed } => {
            if assumed {
                warn!(
                    "Treating unrecognized content type {} as HTML.",
                    content_type.unwrap_or_default()
                );
            }
            Ok(html_to_text(&decode_text(content_type, body)))
        }
        ContentKind::PlainText => Ok(decode_text(content_type, body)),
    }
}

/// Decodes a text body using the `charset` parameter of the content type.
///
/// Missing or unknown charsets fall back to UTF-8. A byte order mark wins
/// over the declared charset.
pub fn decode_text(content_type: Option<&str>, body: &[u8]) -> String {
    let encoding = content_type
        .and_then(charset_label)
        .and_then(|label| Encoding::for_label(label.as_bytes()))
        .unwrap_or(UTF_8);
    let (text, _, _) = encoding.decode(body);
    text.into_owned()
}

fn charset_label(content_type: &str) -> Option<&str> {
    content_type.split(';').skip(1).find_map(|parameter| {
        let (name, value) = parameter.split_once('=')?;
        name.trim()
            .eq_ignore_ascii_case("charset")
            .then(|| value.trim().trim_matches('"'))
    })
}

/// Strips markup from an HTML document, keeping the text a reader would see.
///
/// Text directly inside `style`, `script`, `head`, `title` or `meta`, text
/// hanging off the document root, and comments are dropped. The rest is
/// concatenated in document order.
pub fn html_to_text(html: &str) -> String {
    let document = Html::parse_document(html);

    let mut text = String::new();
    for node in document.tree.root().descendants() {
        let Some(fragment) = node.value().as_text() else {
            continue;
        };

        let parent_name = node.parent().map(|parent| match parent.value() {
            Node::Element(element) => element.name(),
            _ => "document",
        });

        if parent_name.is_some_and(|name| HIDDEN_ELEMENTS.iter().any(|hidden| *hidden == name)) {
            continue;
        }

        text.push_str(fragment);
    }

    text
}

/// Extracts the text of every page of a PDF document, in page order.
///
/// # Errors
///
/// Returns an error if the document cannot be loaded or a page cannot be read.
pub fn pdf_to_text(content: &[u8]) -> Result<String, ConversionError> {
    let document = Document::load_mem(content)?;

    let mut text = String::new();
    for page_number in document.get_pages().keys() {
        text.push_str(&document.extract_text(&[*page_number])?);
    }

    Ok(text)
}
