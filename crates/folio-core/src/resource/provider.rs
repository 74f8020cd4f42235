//! Collaborator seams for URI resolution and byte-stream acquisition.
//!
//! The loader depends on these capability traits rather than any concrete
//! transport, so tests (and embedders with their own fetch layers) can
//! substitute both.

use std::fs::File;
use std::io::Read;
use std::path::PathBuf;

use url::Url;

/// Resolves a possibly document-relative reference to its absolute form.
/// Pure, no I/O.
pub trait UriResolver: Send + Sync {
    fn resolve(&self, reference: &str) -> String;
}

/// Opens a byte stream for an absolute reference.
///
/// Returns `None` for unreachable or unsupported references. Streams are
/// closed by dropping them; the loader guarantees the drop happens on every
/// exit path.
pub trait StreamProvider: Send + Sync {
    fn open(&self, absolute: &str) -> Option<Box<dyn Read>>;
}

/// Resolves references against an optional base document URI.
///
/// Absolute references pass through unchanged; relative ones are joined
/// against the base. A reference that parses as neither is returned verbatim
/// and left for the stream provider to reject.
#[derive(Debug, Default)]
pub struct DocumentUriResolver {
    base: Option<Url>,
}

impl DocumentUriResolver {
    pub fn new() -> Self {
        Self { base: None }
    }

    /// Resolve relative references against the given base document URI.
    pub fn with_base(base: Url) -> Self {
        Self { base: Some(base) }
    }
}

impl UriResolver for DocumentUriResolver {
    fn resolve(&self, reference: &str) -> String {
        if let Ok(url) = Url::parse(reference) {
            return url.into();
        }
        if let Some(base) = &self.base {
            if let Ok(joined) = base.join(reference) {
                return joined.into();
            }
        }
        reference.to_string()
    }
}

/// Serves `file:` URLs and plain filesystem paths from local disk.
#[derive(Debug, Default)]
pub struct FileStreamProvider;

impl FileStreamProvider {
    pub fn new() -> Self {
        Self
    }
}

impl StreamProvider for FileStreamProvider {
    fn open(&self, absolute: &str) -> Option<Box<dyn Read>> {
        let path = match Url::parse(absolute) {
            Ok(url) if url.scheme() == "file" => url.to_file_path().ok()?,
            // Other schemes belong to a different provider
            Ok(_) => return None,
            Err(_) => PathBuf::from(absolute),
        };
        match File::open(&path) {
            Ok(file) => Some(Box::new(file)),
            Err(err) => {
                tracing::debug!("cannot open image file {path:?}: {err}");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_absolute_reference_passes_through() {
        let resolver = DocumentUriResolver::new();
        assert_eq!(
            resolver.resolve("https://example.com/a.png"),
            "https://example.com/a.png"
        );
    }

    #[test]
    fn test_relative_reference_joins_base() {
        let base = Url::parse("https://example.com/docs/report.html").unwrap();
        let resolver = DocumentUriResolver::with_base(base);
        assert_eq!(
            resolver.resolve("images/figure.png"),
            "https://example.com/docs/images/figure.png"
        );
        assert_eq!(
            resolver.resolve("../logo.png"),
            "https://example.com/logo.png"
        );
    }

    #[test]
    fn test_relative_reference_without_base_is_verbatim() {
        let resolver = DocumentUriResolver::new();
        assert_eq!(resolver.resolve("images/figure.png"), "images/figure.png");
    }

    #[test]
    fn test_file_provider_opens_plain_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"bytes").unwrap();
        let provider = FileStreamProvider::new();
        let mut stream = provider
            .open(file.path().to_str().unwrap())
            .expect("plain path should open");
        let mut buf = Vec::new();
        stream.read_to_end(&mut buf).unwrap();
        assert_eq!(buf, b"bytes");
    }

    #[test]
    fn test_file_provider_opens_file_url() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"bytes").unwrap();
        let url = Url::from_file_path(file.path()).unwrap();
        let provider = FileStreamProvider::new();
        assert!(provider.open(url.as_str()).is_some());
    }

    #[test]
    fn test_file_provider_rejects_missing_file() {
        let provider = FileStreamProvider::new();
        assert!(provider.open("/no/such/folio/image.png").is_none());
    }

    #[test]
    fn test_file_provider_rejects_network_scheme() {
        let provider = FileStreamProvider::new();
        assert!(provider.open("https://example.com/a.png").is_none());
    }
}
