use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::document::DocumentError;

/// Deserialize JSON text with JSON-path context in error messages.
pub fn from_json_str_with_path<T: DeserializeOwned>(src: &str) -> Result<T, DocumentError> {
    let de = &mut serde_json::Deserializer::from_str(src);
    serde_path_to_error::deserialize::<_, T>(de).map_err(|err| DocumentError::Decode {
        path: err.path().to_string(),
        message: err.into_inner().to_string(),
    })
}

/// Deserialize YAML text with JSON-path context in error messages.
pub fn from_yaml_str_with_path<T: DeserializeOwned>(src: &str) -> Result<T, DocumentError> {
    let de = serde_yaml::Deserializer::from_str(src);
    serde_path_to_error::deserialize::<_, T>(de).map_err(|err| DocumentError::Decode {
        path: err.path().to_string(),
        message: err.into_inner().to_string(),
    })
}

/// Deserialize an already-parsed document node; `origin` is the JSON Pointer
/// the node was selected with and prefixes the reported path.
pub fn from_value_with_path<T: DeserializeOwned>(value: &Value, origin: &str) -> Result<T, DocumentError> {
    serde_path_to_error::deserialize::<_, T>(value).map_err(|err| DocumentError::Decode {
        path: format!("{origin} → {}", err.path()),
        message: err.into_inner().to_string(),
    })
}
