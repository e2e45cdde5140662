use std::io;
use std::path::PathBuf;

/// The default catalog shipped with the application.
#[derive(Debug, Clone)]
pub enum BundledCatalog {
    /// Compiled into the binary.
    Embedded(&'static [u8]),
    /// A resource file next to the application.
    File(PathBuf),
    None,
}

impl BundledCatalog {
    /// Bundled document bytes, `Ok(None)` when no bundle is present.
    pub fn read(&self) -> io::Result<Option<Vec<u8>>> {
        match self {
            BundledCatalog::Embedded(bytes) => Ok(Some(bytes.to_vec())),
            BundledCatalog::File(path) => match std::fs::read(path) {
                Ok(bytes) => Ok(Some(bytes)),
                Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
                Err(e) => Err(e),
            },
            BundledCatalog::None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_absent() {
        let bundle = BundledCatalog::File(PathBuf::from("/nonexistent/souschef/Recipes.json"));
        assert!(bundle.read().unwrap().is_none());
        assert!(BundledCatalog::None.read().unwrap().is_none());
    }

    #[test]
    fn test_embedded_bytes() {
        let bundle = BundledCatalog::Embedded(b"[]");
        assert_eq!(bundle.read().unwrap(), Some(b"[]".to_vec()));
    }
}
