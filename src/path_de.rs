use serde::de::DeserializeOwned;
use std::path::Path;

use crate::error::ConfigError;

/// Deserialize with JSON-path context in error messages.
pub fn from_str_with_path<T: DeserializeOwned>(src: &str) -> Result<T, ConfigError> {
    let de = &mut serde_json::Deserializer::from_str(src);
    serde_path_to_error::deserialize::<_, T>(de).map_err(|err| ConfigError::Parse {
        file: None,
        path: err.path().to_string(),
        message: err.into_inner().to_string(),
    })
}

/// Read and deserialize a JSON file, naming both the file and the JSON path on failure.
pub fn from_file_with_path<T: DeserializeOwned>(file: &Path) -> Result<T, ConfigError> {
    let src = std::fs::read_to_string(file).map_err(|source| ConfigError::Io {
        file: file.to_path_buf(),
        source,
    })?;
    from_str_with_path(&src).map_err(|e| e.in_file(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    #[allow(dead_code)]
    struct Outer {
        inner: Vec<Inner>,
    }

    #[derive(Debug, Deserialize)]
    #[allow(dead_code)]
    struct Inner {
        flag: bool,
    }

    #[test]
    fn error_names_the_json_path() {
        let err = from_str_with_path::<Outer>(r#"{"inner": [{"flag": true}, {"flag": "x"}]}"#)
            .unwrap_err();
        match err {
            ConfigError::Parse { path, .. } => assert_eq!(path, "inner[1].flag"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = from_file_with_path::<Outer>(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("here.json"));
    }
}
