use serde::de::DeserializeOwned;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Encodings accepted for `--input` files, chosen by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InputEncoding {
    Json,
    Yaml,
}

impl InputEncoding {
    fn of(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => InputEncoding::Yaml,
            _ => InputEncoding::Json,
        }
    }
}

/// Load a financing, quote or proposal input from `--input <path>`.
pub fn read_input<T: DeserializeOwned>(path: &str) -> Result<T, Box<dyn std::error::Error>> {
    let path = Path::new(path);
    match fs::metadata(path) {
        Ok(meta) if meta.is_file() => {}
        Ok(_) => return Err(format!("--input {} is a directory, not an input file", path.display()).into()),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(format!("--input {} does not exist", path.display()).into())
        }
        Err(e) => return Err(format!("--input {}: {e}", path.display()).into()),
    }

    let contents = fs::read_to_string(path)?;
    let encoding = InputEncoding::of(path);
    let value = match encoding {
        InputEncoding::Yaml => serde_yaml::from_str(&contents)
            .map_err(|e| format!("{} is not a valid YAML input: {e}", path.display()))?,
        InputEncoding::Json => serde_json::from_str(&contents)
            .map_err(|e| format!("{} is not a valid JSON input: {e}", path.display()))?,
    };
    log::debug!("loaded {encoding:?} input from {}", path.display());
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use amortization_core::schedules::FinancingInput;

    fn write_temp(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("amort-{}-{name}", std::process::id()));
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_yaml_and_json_inputs_load_the_same_financing() {
        let yaml = write_temp(
            "financing.yaml",
            "property_value: \"300000\"\ndown_payment: \"60000\"\nterm: 360\nperiodic_rate: \"0.008\"\n",
        );
        let json = write_temp(
            "financing.json",
            r#"{"property_value":"300000","down_payment":"60000","term":360,"periodic_rate":"0.008"}"#,
        );

        let from_yaml: FinancingInput = read_input(yaml.to_str().unwrap()).unwrap();
        let from_json: FinancingInput = read_input(json.to_str().unwrap()).unwrap();
        assert_eq!(from_yaml, from_json);
        assert_eq!(from_json.term, 360);

        fs::remove_file(yaml).ok();
        fs::remove_file(json).ok();
    }

    #[test]
    fn test_missing_file_names_the_flag() {
        let err = read_input::<FinancingInput>("/nonexistent/financing.json").unwrap_err();
        assert!(err.to_string().starts_with("--input"), "{err}");
    }

    #[test]
    fn test_directory_is_rejected() {
        let dir = std::env::temp_dir();
        let err = read_input::<FinancingInput>(dir.to_str().unwrap()).unwrap_err();
        assert!(err.to_string().contains("directory"), "{err}");
    }
}
