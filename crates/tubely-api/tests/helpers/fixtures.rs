//! Test fixtures: image blobs and multipart bodies.

use axum_test::multipart::{MultipartForm, Part};
use bytes::Bytes;

pub const BOUNDARY: &str = "tubely-test-boundary";

/// Minimal valid 1x1 PNG bytes.
pub fn create_minimal_png() -> Vec<u8> {
    vec![
        0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
        0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x02, 0x00, 0x00, 0x00, 0x90,
        0x77, 0x53, 0xDE, 0x00, 0x00, 0x00, 0x0C, 0x49, 0x44, 0x41, 0x54, 0x08, 0xD7, 0x63, 0xF8,
        0x00, 0x00, 0x00, 0x00, 0x01, 0x00, 0x01, 0x00, 0x18, 0xDD, 0x8D, 0x89, 0x00, 0x00, 0x00,
        0x00, 0x49, 0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
    ]
}

/// PNG signature followed by `len` bytes of padding; content is never decoded.
pub fn create_png_of_size(len: usize) -> Vec<u8> {
    let mut png = create_minimal_png();
    png.resize(len.max(png.len()), 0xA5);
    png
}

/// JPEG SOI/APP0 header with a little payload and EOI.
pub fn create_minimal_jpeg() -> Vec<u8> {
    let mut jpeg = vec![
        0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, 0x4A, 0x46, 0x49, 0x46, 0x00, 0x01, 0x01, 0x00, 0x00,
        0x01, 0x00, 0x01, 0x00, 0x00,
    ];
    jpeg.extend_from_slice(&[0x42; 64]);
    jpeg.extend_from_slice(&[0xFF, 0xD9]);
    jpeg
}

/// Form with one `thumbnail` part.
pub fn thumbnail_form(data: Vec<u8>, mime_type: &str) -> MultipartForm {
    let part = Part::bytes(Bytes::from(data))
        .file_name("thumbnail")
        .mime_type(mime_type);
    MultipartForm::new().add_part("thumbnail", part)
}

/// One hand-built multipart part; `content_type: None` omits the header.
pub struct RawPart<'a> {
    pub name: &'a str,
    pub content_type: Option<&'a str>,
    pub data: &'a [u8],
}

/// Encode `parts` as a `multipart/form-data` body using [`BOUNDARY`].
pub fn raw_multipart(parts: &[RawPart<'_>]) -> Bytes {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{}\"; filename=\"upload\"\r\n",
                part.name
            )
            .as_bytes(),
        );
        if let Some(content_type) = part.content_type {
            body.extend_from_slice(format!("Content-Type: {}\r\n", content_type).as_bytes());
        }
        body.extend_from_slice(b"\r\n");
        body.extend_from_slice(part.data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    Bytes::from(body)
}

pub fn raw_multipart_content_type() -> String {
    format!("multipart/form-data; boundary={}", BOUNDARY)
}
