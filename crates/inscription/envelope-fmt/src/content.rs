use bitcoin::constants::MAX_SCRIPT_ELEMENT_SIZE;

use crate::errors::{EnvelopeBuildError, EnvelopeBuildResult};

/// Content to be inscribed: a MIME type and the raw body bytes.
///
/// The content type is checked on construction. The body length is only
/// checked against a limit when encoding, since the limit is configurable.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct InscriptionContent {
    content_type: String,
    body: Vec<u8>,
}

impl InscriptionContent {
    /// Constructs new content, checking that the content type is non-empty and
    /// fits in a single script push.
    pub fn new(content_type: impl Into<String>, body: impl Into<Vec<u8>>) -> EnvelopeBuildResult<Self> {
        let content_type = content_type.into();
        if content_type.is_empty() {
            return Err(EnvelopeBuildError::InvalidContentType);
        }
        if content_type.len() > MAX_SCRIPT_ELEMENT_SIZE {
            return Err(EnvelopeBuildError::ContentTypeTooLong(content_type.len()));
        }

        Ok(Self {
            content_type,
            body: body.into(),
        })
    }

    /// Convenience constructor for UTF-8 text.
    pub fn text(content_type: impl Into<String>, text: &str) -> EnvelopeBuildResult<Self> {
        Self::new(content_type, text.as_bytes())
    }

    /// Gets the MIME type.
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    /// Gets the body bytes.
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Length of the body in bytes.
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Returns if the body is empty.
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Splits into `(content_type, body)`.
    pub fn into_parts(self) -> (String, Vec<u8>) {
        (self.content_type, self.body)
    }
}
