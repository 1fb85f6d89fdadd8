//! Part names inside an OPC package.

/// The package pseudo-partname, representing the package itself
pub const PACKAGE_URI: &str = "/";

/// The URI for the [Content_Types].xml part
pub const CONTENT_TYPES_URI: &str = "/[Content_Types].xml";

/// An absolute part name such as `/ppt/slides/slide1.xml`.
///
/// Part names always start with a slash and use `/` as separator.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PackURI {
    uri: String,
}

impl PackURI {
    /// Create a part name, rejecting anything without a leading slash.
    pub fn new<S: Into<String>>(uri: S) -> Result<Self, String> {
        let uri = uri.into();
        if !uri.starts_with('/') {
            return Err(format!("PackURI must begin with slash, got '{}'", uri));
        }
        Ok(PackURI { uri })
    }

    /// Resolve a relationship target such as `../media/image1.png` against
    /// the directory of the source part.
    pub fn from_rel_ref(base_uri: &str, relative_ref: &str) -> Result<Self, String> {
        let mut segments: Vec<&str> = Vec::new();
        for segment in base_uri.split('/').chain(relative_ref.split('/')) {
            match segment {
                "" | "." => {},
                ".." => {
                    segments.pop();
                },
                s => segments.push(s),
            }
        }
        Self::new(format!("/{}", segments.join("/")))
    }

    /// Directory portion: `/ppt/slides` for `/ppt/slides/slide1.xml`.
    pub fn base_uri(&self) -> &str {
        match self.uri.rfind('/') {
            Some(0) | None => "/",
            Some(pos) => &self.uri[..pos],
        }
    }

    /// File name portion; empty for the package pseudo-partname.
    pub fn filename(&self) -> &str {
        self.uri.rsplit('/').next().unwrap_or("")
    }

    /// Extension without the leading period.
    pub fn ext(&self) -> &str {
        let filename = self.filename();
        filename.rfind('.').map_or("", |pos| &filename[pos + 1..])
    }

    /// The ZIP member name (no leading slash).
    pub fn membername(&self) -> &str {
        &self.uri[1..]
    }

    /// Relative reference from `base_uri` to this part, as written in a
    /// relationship `Target`.
    pub fn relative_ref(&self, base_uri: &str) -> String {
        if base_uri == "/" {
            return self.membername().to_string();
        }

        let from: Vec<&str> = base_uri.split('/').filter(|s| !s.is_empty()).collect();
        let to: Vec<&str> = self.uri.split('/').filter(|s| !s.is_empty()).collect();
        let common = from.iter().zip(&to).take_while(|(a, b)| a == b).count();

        let mut parts: Vec<&str> = vec![".."; from.len() - common];
        parts.extend_from_slice(&to[common..]);
        parts.join("/")
    }

    /// The `.rels` part holding this part's relationships.
    pub fn rels_uri(&self) -> Result<PackURI, String> {
        let base = self.base_uri().trim_end_matches('/');
        Self::new(format!("{}/_rels/{}.rels", base, self.filename()))
    }

    /// Get the full URI string.
    pub fn as_str(&self) -> &str {
        &self.uri
    }
}

impl std::fmt::Display for PackURI {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.uri)
    }
}

impl AsRef<str> for PackURI {
    fn as_ref(&self) -> &str {
        &self.uri
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requires_leading_slash() {
        assert!(PackURI::new("/ppt/presentation.xml").is_ok());
        assert!(PackURI::new("ppt/presentation.xml").is_err());
    }

    #[test]
    fn test_components() {
        let uri = PackURI::new("/ppt/slides/slide3.xml").unwrap();
        assert_eq!(uri.base_uri(), "/ppt/slides");
        assert_eq!(uri.filename(), "slide3.xml");
        assert_eq!(uri.ext(), "xml");
        assert_eq!(uri.membername(), "ppt/slides/slide3.xml");

        let root = PackURI::new(PACKAGE_URI).unwrap();
        assert_eq!(root.base_uri(), "/");
        assert_eq!(root.filename(), "");
        assert_eq!(root.membername(), "");
    }

    #[test]
    fn test_rels_uri() {
        let slide = PackURI::new("/ppt/slides/slide1.xml").unwrap();
        assert_eq!(slide.rels_uri().unwrap().as_str(), "/ppt/slides/_rels/slide1.xml.rels");

        let root = PackURI::new(PACKAGE_URI).unwrap();
        assert_eq!(root.rels_uri().unwrap().as_str(), "/_rels/.rels");
    }

    #[test]
    fn test_relative_ref() {
        let layout = PackURI::new("/ppt/slideLayouts/slideLayout1.xml").unwrap();
        assert_eq!(layout.relative_ref("/ppt/slides"), "../slideLayouts/slideLayout1.xml");
        assert_eq!(layout.relative_ref("/ppt"), "slideLayouts/slideLayout1.xml");
        assert_eq!(layout.relative_ref("/"), "ppt/slideLayouts/slideLayout1.xml");
    }

    #[test]
    fn test_from_rel_ref() {
        let uri = PackURI::from_rel_ref("/ppt/slides", "../media/image1.png").unwrap();
        assert_eq!(uri.as_str(), "/ppt/media/image1.png");
        let uri = PackURI::from_rel_ref("/ppt/charts", "../embeddings/Microsoft_Excel_Worksheet1.xlsx").unwrap();
        assert_eq!(uri.as_str(), "/ppt/embeddings/Microsoft_Excel_Worksheet1.xlsx");
    }
}
