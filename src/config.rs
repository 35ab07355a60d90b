//! JSON runtime configuration for the `segment_rgbd` tool.
use crate::SegmenterParams;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, Deserialize)]
pub struct InputConfig {
    /// 8-bit color image.
    pub rgb: PathBuf,
    /// 16-bit depth PNG registered to `rgb`.
    pub depth: PathBuf,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct OutputConfig {
    /// False-color region image.
    pub regions_png: Option<PathBuf>,
    /// False-color superpixel image.
    pub superpixels_png: Option<PathBuf>,
    /// Diagnostics report.
    pub report_json: Option<PathBuf>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct RuntimeConfig {
    pub input: InputConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub params: SegmenterParams,
}

pub fn load_config(path: &Path) -> Result<RuntimeConfig, String> {
    let contents = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    parse_config(&contents).map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
}

fn parse_config(contents: &str) -> Result<RuntimeConfig, serde_json::Error> {
    serde_json::from_str(contents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SegmentationError;

    #[test]
    fn minimal_config_uses_default_params() {
        let cfg = parse_config(r#"{ "input": { "rgb": "a.png", "depth": "b.png" } }"#).unwrap();
        assert_eq!(cfg.input.depth, PathBuf::from("b.png"));
        assert!(cfg.output.report_json.is_none());
        assert_eq!(cfg.params.num_superpixels, 0);
    }

    #[test]
    fn missing_file_becomes_io_error() {
        let err: SegmentationError = load_config(Path::new("does/not/exist.json"))
            .unwrap_err()
            .into();
        match err {
            SegmentationError::Io(message) => assert!(message.contains("exist.json")),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn params_section_overrides_defaults() {
        let cfg = parse_config(
            r#"{
                "input": { "rgb": "a.png", "depth": "b.png" },
                "output": { "regions_png": "out/regions.png" },
                "params": { "num_superpixels": 500, "grouping": { "max_merge_weight": 0.3 } }
            }"#,
        )
        .unwrap();
        assert_eq!(cfg.params.num_superpixels, 500);
        assert_eq!(cfg.params.grouping.max_merge_weight, Some(0.3));
        assert_eq!(
            cfg.output.regions_png,
            Some(PathBuf::from("out/regions.png"))
        );
    }
}
