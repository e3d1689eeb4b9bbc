//! Loading parameter sets and custom palettes from the command line.

use std::path::Path;

use procart_core::{ArtParameters, CustomPalettes};
use serde_json::Value;

use crate::error::CliError;

fn read(path: &Path) -> Result<String, CliError> {
    std::fs::read_to_string(path)
        .map_err(|e| CliError::Io(format!("cannot read {}: {e}", path.display())))
}

/// Builds parameters from an inline JSON string or a JSON file.
///
/// Missing keys take their defaults. The result must pass
/// [`ArtParameters::validate`].
pub fn load_params(inline: Option<&str>, file: Option<&Path>) -> Result<ArtParameters, CliError> {
    let text = match (inline, file) {
        (Some(_), Some(_)) => {
            return Err(CliError::Input(
                "--params and --params-file are mutually exclusive".into(),
            ))
        }
        (Some(json), None) => json.to_string(),
        (None, Some(path)) => read(path)?,
        (None, None) => "{}".to_string(),
    };
    let value: Value = serde_json::from_str(&text)
        .map_err(|e| CliError::Input(format!("invalid params JSON: {e}")))?;
    if !value.is_object() {
        return Err(CliError::Input("params must be a JSON object".into()));
    }
    let params = ArtParameters::from_json(&value);
    params.validate()?;
    Ok(params)
}

/// Reads a JSON object mapping palette names to hex color lists.
pub fn load_custom_palettes(file: Option<&Path>) -> Result<CustomPalettes, CliError> {
    let Some(path) = file else {
        return Ok(CustomPalettes::new());
    };
    serde_json::from_str(&read(path)?)
        .map_err(|e| CliError::Input(format!("invalid palettes file: {e}")))
}
