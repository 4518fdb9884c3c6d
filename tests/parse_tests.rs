use log::Level;
use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, dictionary};
use spectral::prelude::*;
use trainset::parse::{convert_to_text, decode_text, html_to_text, pdf_to_text};
use trainset::{ContentKind, ConversionError};

const PAGE: &str = "<!DOCTYPE html>\
<html><head><title>Page title</title><meta charset=\"utf-8\">\
<style>body { color: red; }</style><script>var hidden = 1;</script></head>\
<body><h1>Heading</h1><p>Hello <b>world</b>!</p><!-- not for readers -->\
<script>console.log('also hidden');</script></body></html>";

#[test]
fn pdf_content_type() {
    assert_that(&ContentKind::from_content_type(Some("application/pdf"))).is_equal_to(ContentKind::Pdf);
}

#[test]
fn html_content_type_ignores_case_and_parameters() {
    assert_that(&ContentKind::from_content_type(Some("Text/HTML; charset=UTF-8")))
        .is_equal_to(ContentKind::Html { assumed: false });
}

#[test]
fn xhtml_content_type() {
    assert_that(&ContentKind::from_content_type(Some("application/xhtml+xml")))
        .is_equal_to(ContentKind::Html { assumed: false });
}

#[test]
fn plain_text_content_type() {
    assert_that(&ContentKind::from_content_type(Some("text/plain"))).is_equal_to(ContentKind::PlainText);
}

#[test]
fn unknown_content_type_is_assumed_html() {
    assert_that(&ContentKind::from_content_type(Some("application/octet-stream")))
        .is_equal_to(ContentKind::Html { assumed: true });
}

#[test]
fn missing_content_type_is_html() {
    assert_that(&ContentKind::from_content_type(None)).is_equal_to(ContentKind::Html { assumed: false });
}

#[test]
fn pdf_wins_over_text() {
    assert_that(&ContentKind::from_content_type(Some("text/x-pdf"))).is_equal_to(ContentKind::Pdf);
}

#[test]
fn html_keeps_only_visible_text() {
    assert_that(&html_to_text(PAGE)).is_equal_to("HeadingHello world!".to_string());
}

#[test]
fn html_fragment_text() {
    assert_that(&html_to_text("<p>one</p><p>two</p>")).is_equal_to("onetwo".to_string());
}

#[test]
fn plain_text_is_returned_verbatim() {
    let body = "<p>not markup here</p>\n  spacing kept ";

    let text = convert_to_text(Some("text/plain; charset=utf-8"), body.as_bytes())
        .expect("Expected plain text to convert.");

    assert_that(&text).is_equal_to(body.to_string());
}

#[test]
fn html_body_is_stripped() {
    let text = convert_to_text(Some("text/html"), PAGE.as_bytes()).expect("Expected HTML to convert.");

    assert_that(&text).is_equal_to("HeadingHello world!".to_string());
}

#[test]
fn unknown_body_is_stripped_as_html() {
    let text = convert_to_text(Some("application/octet-stream"), PAGE.as_bytes())
        .expect("Expected unknown content to convert.");

    assert_that(&text).is_equal_to("HeadingHello world!".to_string());
}

#[test]
fn corrupt_pdf_is_a_conversion_error() {
    let result = convert_to_text(Some("application/pdf"), b"<html>definitely not a pdf</html>");

    assert_that(&matches!(result, Err(ConversionError::Pdf(_)))).is_true();
}

#[test]
fn empty_pdf_is_a_conversion_error() {
    assert_that(&pdf_to_text(&[])).is_err();
}

/// Builds a PDF with one page per entry, each showing its text with a single `Tj`.
fn pdf_with_pages(texts: &[&str]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let mut kids: Vec<Object> = Vec::new();
    for text in texts {
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 24.into()]),
                Operation::new("Td", vec![100.into(), 600.into()]),
                Operation::new("Tj", vec![Object::string_literal(*text)]),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(
            dictionary! {},
            content.encode().expect("Expected content to encode."),
        ));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => texts.len() as i64,
        "Resources" => resources_id,
        "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer).expect("Expected PDF to be saved.");
    buffer
}

#[test]
fn pdf_pages_are_extracted_in_order() {
    let text = pdf_to_text(&pdf_with_pages(&["First", "Second"])).expect("Expected PDF text.");

    assert_that(&text.lines().collect::<Vec<_>>()).is_equal_to(vec!["First", "Second"]);
}

#[test]
fn pdf_body_is_routed_to_pdf_extraction() {
    let text = convert_to_text(Some("application/pdf"), &pdf_with_pages(&["Only page"]))
        .expect("Expected PDF to convert.");

    assert_that(&text.trim()).is_equal_to("Only page");
}

#[test]
fn declared_latin1_charset_is_honored() {
    let text = decode_text(Some("text/plain; charset=ISO-8859-1"), b"caf\xe9");

    assert_that(&text).is_equal_to("caf\u{e9}".to_string());
}

#[test]
fn quoted_charset_is_honored() {
    let text = decode_text(Some("text/html; charset=\"windows-1252\""), b"\x93quoted\x94");

    assert_that(&text).is_equal_to("\u{201c}quoted\u{201d}".to_string());
}

#[test]
fn missing_charset_defaults_to_utf8() {
    assert_that(&decode_text(Some("text/plain"), "caf\u{e9}".as_bytes())).is_equal_to("caf\u{e9}".to_string());
}

#[test]
fn unknown_charset_defaults_to_utf8() {
    assert_that(&decode_text(Some("text/plain; charset=no-such-thing"), b"plain")).is_equal_to("plain".to_string());
}

#[test]
fn html_in_latin1_is_decoded_before_stripping() {
    let text = convert_to_text(Some("text/html; charset=iso-8859-1"), b"<p>na\xefve</p>")
        .expect("Expected HTML to convert.");

    assert_that(&text).is_equal_to("na\u{ef}ve".to_string());
}

#[test]
fn unknown_content_type_warns() {
    testing_logger::setup();

    convert_to_text(Some("application/octet-stream"), b"<p>guess</p>").expect("Expected HTML to convert.");

    testing_logger::validate(|captured_logs| {
        let warnings: Vec<&str> = captured_logs
            .iter()
            .filter(|log| log.level == Level::Warn)
            .map(|log| log.body.as_str())
            .collect();
        assert_that(&warnings)
            .is_equal_to(vec!["Treating unrecognized content type application/octet-stream as HTML."]);
    });
}

#[test]
fn recognized_content_type_does_not_warn() {
    testing_logger::setup();

    convert_to_text(Some("text/html"), b"<p>known</p>").expect("Expected HTML to convert.");

    testing_logger::validate(|captured_logs| {
        assert_that(&captured_logs.iter().any(|log| log.level == Level::Warn)).is_false();
    });
}
