/// Turning image sources into bytes.
///
/// Image elements carry whatever the editor rendered: a `data:` URI, a local
/// path or a remote URL. A resolver decides which of those can be embedded.
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use std::path::Path;
use tracing::debug;

/// Resolves an image source to its raw bytes.
///
/// Returning `None` makes the exporter link the picture to the source
/// instead of storing it in the package.
pub trait ImageResolver: Send + Sync {
    fn resolve(&self, src: &str) -> Option<Vec<u8>>;
}

/// Resolver for base64 `data:` URIs and local file paths.
///
/// Remote URLs are never fetched.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultImageResolver;

impl DefaultImageResolver {
    fn decode_data_uri(src: &str) -> Option<Vec<u8>> {
        let rest = src.strip_prefix("data:")?;
        let (meta, payload) = rest.split_once(',')?;
        if !meta.ends_with(";base64") {
            debug!(meta, "data URI is not base64 encoded");
            return None;
        }
        // Editors sometimes wrap long URIs
        let payload: String = payload.chars().filter(|c| !c.is_ascii_whitespace()).collect();
        STANDARD.decode(payload).ok()
    }
}

impl ImageResolver for DefaultImageResolver {
    fn resolve(&self, src: &str) -> Option<Vec<u8>> {
        if src.starts_with("data:") {
            return Self::decode_data_uri(src);
        }
        if src.contains("://") {
            return None;
        }

        let path = src.strip_prefix("file:").unwrap_or(src);
        match std::fs::read(Path::new(path)) {
            Ok(bytes) => Some(bytes),
            Err(err) => {
                debug!(path, %err, "image source is not readable");
                None
            },
        }
    }
}

/// Resolver that never yields bytes; every picture is linked.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinkOnlyResolver;

impl ImageResolver for LinkOnlyResolver {
    fn resolve(&self, _src: &str) -> Option<Vec<u8>> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_data_uri() {
        let src = "data:image/png;base64,iVBORw0KGgo=";
        let bytes = DefaultImageResolver.resolve(src).unwrap();
        assert_eq!(&bytes[..4], &[0x89, b'P', b'N', b'G']);
    }

    #[test]
    fn test_data_uri_without_base64() {
        assert!(DefaultImageResolver.resolve("data:image/svg+xml,<svg/>").is_none());
        assert!(DefaultImageResolver.resolve("data:image/png;base64,@@@").is_none());
    }

    #[test]
    fn test_local_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"GIF89a....").unwrap();
        let path = file.path().to_str().unwrap().to_string();

        assert_eq!(DefaultImageResolver.resolve(&path).unwrap(), b"GIF89a....");
        assert!(DefaultImageResolver.resolve("/no/such/image.png").is_none());
    }

    #[test]
    fn test_remote_urls_are_not_fetched() {
        assert!(DefaultImageResolver.resolve("https://example.com/a.png").is_none());
        assert!(LinkOnlyResolver.resolve("data:image/png;base64,iVBORw0KGgo=").is_none());
    }
}
