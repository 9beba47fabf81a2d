use bytes::{BufMut, Bytes, BytesMut};
use rand::distributions::Alphanumeric;
use rand::{thread_rng, Rng};
use tiktokshop_core::{Error, Result};

/// A `multipart/form-data` body holding file parts.
#[derive(Debug, Clone)]
pub struct MultipartForm {
    boundary: String,
    parts: Vec<FilePart>,
}

#[derive(Debug, Clone)]
struct FilePart {
    name: String,
    filename: String,
    content_type: String,
    content: Bytes,
}

impl Default for MultipartForm {
    fn default() -> Self {
        Self::new()
    }
}

/// Header values are written between quotes on their own line.
fn check_header_value(field: &str, value: &str) -> Result<()> {
    if value.contains(['"', '\r', '\n']) {
        return Err(Error::request_invalid(format!(
            "multipart {field} must not contain quotes or line breaks: {value:?}"
        )));
    }
    Ok(())
}

impl MultipartForm {
    /// Create an empty form with a random boundary.
    pub fn new() -> Self {
        let suffix: String = thread_rng()
            .sample_iter(&Alphanumeric)
            .take(24)
            .map(char::from)
            .collect();

        Self::with_boundary(format!("tiktokshop-{suffix}"))
    }

    /// Create an empty form with the given boundary.
    pub fn with_boundary(boundary: impl Into<String>) -> Self {
        Self {
            boundary: boundary.into(),
            parts: Vec::new(),
        }
    }

    /// Append a file part.
    ///
    /// Fails if `name`, `filename` or `content_type` contain `"`, `\r` or `\n`.
    pub fn file(
        mut self,
        name: impl Into<String>,
        filename: impl Into<String>,
        content_type: impl Into<String>,
        content: impl Into<Bytes>,
    ) -> Result<Self> {
        let part = FilePart {
            name: name.into(),
            filename: filename.into(),
            content_type: content_type.into(),
            content: content.into(),
        };
        check_header_value("name", &part.name)?;
        check_header_value("filename", &part.filename)?;
        check_header_value("content type", &part.content_type)?;

        self.parts.push(part);
        Ok(self)
    }

    pub fn boundary(&self) -> &str {
        &self.boundary
    }

    /// Value of the `content-type` header for this form.
    pub fn content_type(&self) -> String {
        format!("multipart/form-data; boundary={}", self.boundary)
    }

    /// Encode the form into a request body.
    ///
    /// Fails if the boundary is unusable or shows up inside a part.
    pub fn into_bytes(self) -> Result<Bytes> {
        if self.boundary.is_empty() {
            return Err(Error::request_invalid("multipart boundary is empty"));
        }
        check_header_value("boundary", &self.boundary)?;

        let delimiter = self.boundary.as_bytes();
        let mut buf = BytesMut::new();
        for part in self.parts {
            if part
                .content
                .windows(delimiter.len())
                .any(|w| w == delimiter)
            {
                return Err(Error::request_invalid(format!(
                    "content of {} contains the multipart boundary",
                    part.filename
                )));
            }

            buf.put_slice(format!("--{}\r\n", self.boundary).as_bytes());
            buf.put_slice(
                format!(
                    "content-disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
                    part.name, part.filename
                )
                .as_bytes(),
            );
            buf.put_slice(format!("content-type: {}\r\n\r\n", part.content_type).as_bytes());
            buf.put_slice(&part.content);
            buf.put_slice(b"\r\n");
        }
        buf.put_slice(format!("--{}--\r\n", self.boundary).as_bytes());
        Ok(buf.freeze())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_case::test_case;
    use tiktokshop_core::ErrorKind;

    #[test]
    fn test_encode_single_file() {
        let body = MultipartForm::with_boundary("xyz")
            .file("data", "a.png", "image/png", Bytes::from_static(b"\x89PNG"))
            .unwrap()
            .into_bytes()
            .unwrap();

        let expected = b"--xyz\r\n\
content-disposition: form-data; name=\"data\"; filename=\"a.png\"\r\n\
content-type: image/png\r\n\r\n\
\x89PNG\r\n\
--xyz--\r\n";
        assert_eq!(body.as_ref(), expected.as_slice());
    }

    #[test]
    fn test_random_boundary() {
        let a = MultipartForm::new();
        let b = MultipartForm::new();
        assert!(a.boundary().starts_with("tiktokshop-"));
        assert_ne!(a.boundary(), b.boundary());
        assert_eq!(
            a.content_type(),
            format!("multipart/form-data; boundary={}", a.boundary())
        );
    }

    #[test_case("da\"ta", "a.png", "image/png"; "quote in name")]
    #[test_case("data", "a.png\"\r\ncontent-type: text/html\r\nx: \"", "image/png"; "header injection in filename")]
    #[test_case("data", "a.png", "image/png\nx-extra: 1"; "line break in content type")]
    fn test_reject_unsafe_header_values(name: &str, filename: &str, content_type: &str) {
        let err = MultipartForm::with_boundary("xyz")
            .file(name, filename, content_type, Bytes::from_static(b"img"))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::RequestInvalid);
    }

    #[test]
    fn test_reject_content_containing_boundary() {
        let err = MultipartForm::with_boundary("xyz")
            .file(
                "data",
                "a.png",
                "image/png",
                Bytes::from_static(b"head\r\n--xyz\r\ntail"),
            )
            .unwrap()
            .into_bytes()
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::RequestInvalid);
    }

    #[test]
    fn test_reject_unsafe_boundary() {
        let form = MultipartForm::with_boundary("a\r\nb")
            .file("data", "a.png", "image/png", Bytes::from_static(b"img"))
            .unwrap();
        assert_eq!(
            form.into_bytes().unwrap_err().kind(),
            ErrorKind::RequestInvalid
        );
        assert!(MultipartForm::with_boundary("").into_bytes().is_err());
    }
}
