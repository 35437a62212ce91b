use serde::Deserialize;

#[derive(Deserialize)]
pub struct PincerConfig {
    pub input: InputConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub extract: ExtractConfig,
}

#[derive(Deserialize)]
pub struct InputConfig {
    pub events: String,
}

#[derive(Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_results_dir")]
    pub results_dir: String,
    #[serde(default)]
    pub pretty: bool,
}

#[derive(Deserialize)]
pub struct ExtractConfig {
    #[serde(default = "default_strip_punctuation")]
    pub strip_punctuation: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            results_dir: default_results_dir(),
            pretty: false,
        }
    }
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            strip_punctuation: default_strip_punctuation(),
        }
    }
}

fn default_results_dir() -> String {
    "./pincer-data".to_string()
}

fn default_strip_punctuation() -> bool {
    true
}

impl PincerConfig {
    pub fn from_file(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }
}
