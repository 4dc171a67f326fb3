use crate::cli::Cli;
use crate::fs::FileSystem;
use crate::model::InvocationRequest;
use crate::output::{Discovery, DumpOptions, ListingOptions, MAX_DEPTH};
use crate::style::{ColorMode, DEFAULT_TAB_WIDTH, Renderer};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const CONFIG_FILE: &str = ".inspector.toml";
pub const DEFAULT_COMPONENT: &str = "example.dll";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Config file not found: {0}")]
    NotFound(PathBuf),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub default_component: PathBuf,
    pub output: OutputConfig,
    pub dump: DumpConfig,
    pub listing: ListingConfig,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OutputConfig {
    pub color: ColorMode,
    pub tab_width: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DumpConfig {
    pub max_depth: usize,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ListingConfig {
    pub declared_only: bool,
}

#[derive(Debug, Deserialize)]
struct RawConfig {
    default_component: Option<PathBuf>,
    output: Option<RawOutput>,
    dump: Option<RawDump>,
    listing: Option<RawListing>,
}

#[derive(Debug, Deserialize)]
struct RawOutput {
    color: Option<ColorMode>,
    tab_width: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct RawDump {
    max_depth: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct RawListing {
    declared_only: Option<bool>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_component: PathBuf::from(DEFAULT_COMPONENT),
            output: OutputConfig::default(),
            dump: DumpConfig::default(),
            listing: ListingConfig::default(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            color: ColorMode::Auto,
            tab_width: DEFAULT_TAB_WIDTH,
        }
    }
}

impl Default for DumpConfig {
    fn default() -> Self {
        Self {
            max_depth: MAX_DEPTH,
        }
    }
}

impl Config {
    /// Load `.inspector.toml` from `dir`, falling back to defaults when absent.
    pub fn load(dir: &Path, fs: &dyn FileSystem) -> Result<Self, ConfigError> {
        let config_path = dir.join(CONFIG_FILE);
        if !fs.exists(&config_path) {
            return Ok(Self::default());
        }
        Self::load_file(&config_path, fs)
    }

    /// Load an explicitly named config file, which must exist.
    pub fn load_file(path: &Path, fs: &dyn FileSystem) -> Result<Self, ConfigError> {
        if !fs.exists(path) {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        let content = fs.read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = toml::from_str(content)?;
        let defaults = Self::default();

        let output = match raw.output {
            Some(o) => OutputConfig {
                color: o.color.unwrap_or(defaults.output.color),
                tab_width: o.tab_width.unwrap_or(defaults.output.tab_width),
            },
            None => defaults.output,
        };
        let dump = match raw.dump {
            Some(d) => DumpConfig {
                max_depth: d.max_depth.unwrap_or(MAX_DEPTH),
            },
            None => defaults.dump,
        };
        let listing = ListingConfig {
            declared_only: raw
                .listing
                .and_then(|l| l.declared_only)
                .unwrap_or_default(),
        };

        Ok(Self {
            default_component: raw.default_component.unwrap_or(defaults.default_component),
            output,
            dump,
            listing,
        })
    }
}

/// Everything one run of the inspector should do, after merging the
/// command line over the config file.
#[derive(Debug, Clone, PartialEq)]
pub struct InspectionRequest {
    pub component: PathBuf,
    pub verbose: bool,
    pub list_types: bool,
    pub list_fields: bool,
    pub list_properties: bool,
    pub list_methods: bool,
    pub invocations: Vec<InvocationRequest>,
    pub discovery: Discovery,
    pub color: ColorMode,
    pub tab_width: usize,
    pub max_depth: usize,
}

impl InspectionRequest {
    pub fn from_cli(cli: &Cli, config: &Config) -> Self {
        let declared_only = cli.declared_only || config.listing.declared_only;
        Self {
            component: cli
                .component
                .clone()
                .unwrap_or_else(|| config.default_component.clone()),
            verbose: cli.verbose,
            list_types: cli.types || cli.all,
            list_fields: cli.fields || cli.all,
            list_properties: cli.properties || cli.all,
            list_methods: cli.methods || cli.all,
            invocations: cli
                .invocations
                .iter()
                .filter_map(|tokens| {
                    let (method, arguments) = tokens.split_first()?;
                    Some(InvocationRequest::new(method, arguments.iter().cloned()))
                })
                .collect(),
            discovery: if declared_only {
                Discovery::DeclaredOnly
            } else {
                Discovery::All
            },
            color: cli.color.unwrap_or(config.output.color),
            tab_width: config.output.tab_width,
            max_depth: config.dump.max_depth,
        }
    }

    /// All four listings at once become a single dump.
    pub fn is_full_dump(&self) -> bool {
        self.list_types && self.list_fields && self.list_properties && self.list_methods
    }

    pub fn listing_options(&self) -> ListingOptions {
        ListingOptions {
            discovery: self.discovery,
            grouping: None,
        }
    }

    pub fn dump_options(&self) -> DumpOptions {
        DumpOptions {
            max_depth: self.max_depth,
            discovery: self.discovery,
        }
    }

    pub fn renderer(&self) -> Renderer {
        Renderer::new(self.color.enabled(), self.verbose, self.tab_width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::mock::MockFs;

    #[test]
    fn test_missing_file_uses_defaults() {
        let fs = MockFs::default();
        let config = Config::load(Path::new("."), &fs).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.default_component, PathBuf::from("example.dll"));
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let config = Config::parse(
            r#"
            default_component = "shapes.json"

            [output]
            color = "never"

            [listing]
            declared_only = true
            "#,
        )
        .unwrap();
        assert_eq!(config.default_component, PathBuf::from("shapes.json"));
        assert_eq!(config.output.color, ColorMode::Never);
        assert_eq!(config.output.tab_width, 4);
        assert_eq!(config.dump.max_depth, 5);
        assert!(config.listing.declared_only);
    }

    #[test]
    fn test_invalid_toml() {
        assert!(matches!(
            Config::parse("[output\ncolor = 1"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_explicit_file_must_exist() {
        let fs = MockFs::default();
        assert!(matches!(
            Config::load_file(Path::new("custom.toml"), &fs),
            Err(ConfigError::NotFound(_))
        ));
    }

    #[test]
    fn test_request_merges_cli_over_config() {
        let cli = Cli::from_args([
            "component-inspector",
            "-a",
            "--color",
            "always",
            "-i",
            "Math.Max",
            "3",
            "-7",
            "-i",
            "Console.WriteLine",
        ])
        .unwrap();
        let mut config = Config::default();
        config.listing.declared_only = true;
        let request = InspectionRequest::from_cli(&cli, &config);

        assert!(request.is_full_dump());
        assert_eq!(request.component, PathBuf::from("example.dll"));
        assert_eq!(request.color, ColorMode::Always);
        assert_eq!(request.discovery, Discovery::DeclaredOnly);
        assert_eq!(
            request.invocations,
            vec![
                InvocationRequest::new("Math.Max", ["3", "-7"]),
                InvocationRequest::new("Console.WriteLine", Vec::<String>::new()),
            ]
        );
    }
}
