mod inspect;

pub use inspect::cmd_inspect;

use crate::cli::Cli;
use crate::config::{Config, InspectionRequest};
use crate::fs::default_fs;
use crate::style::{DEFAULT_TAB_WIDTH, Renderer};
use std::error::Error;

/// Shared context for command execution: the merged request and the
/// renderer configured for it.
pub struct CommandContext {
    pub request: InspectionRequest,
    pub renderer: Renderer,
}

impl CommandContext {
    /// Load config and merge the command line over it.
    /// Returns Err(exit_code) if setup fails.
    pub fn new(cli: &Cli) -> Result<Self, i32> {
        let early = Renderer::new(
            cli.color.unwrap_or_default().enabled(),
            cli.verbose,
            DEFAULT_TAB_WIDTH,
        );

        let config = match &cli.config {
            Some(path) => match Config::load_file(path, default_fs()) {
                Ok(config) => config,
                Err(e) => {
                    early.error(&e.to_string());
                    return Err(1);
                }
            },
            None => {
                let cwd = std::env::current_dir().unwrap_or_default();
                Config::load(&cwd, default_fs()).unwrap_or_else(|e| {
                    early.warning(&format!("Failed to load config: {}. Using defaults.", e));
                    Config::default()
                })
            }
        };

        let request = InspectionRequest::from_cli(cli, &config);
        let renderer = request.renderer();
        colored::control::set_override(renderer.color);
        Ok(Self { request, renderer })
    }
}

/// Print an error, and with `--verbose` the chain of causes behind it.
pub fn report_error(renderer: &Renderer, err: &dyn Error) {
    renderer.error(&err.to_string());
    for cause in hidden_causes(err) {
        renderer.eprint(&format!("[verbose][tab]caused by: {}[br][/]", cause));
    }
}

/// Causes in the `source()` chain whose text the messages above them do not
/// already include.
fn hidden_causes(err: &dyn Error) -> Vec<String> {
    let mut shown = err.to_string();
    let mut causes = Vec::new();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !shown.contains(&text) {
            causes.push(text.clone());
        }
        shown = text;
        source = cause.source();
    }
    causes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inspect::InspectError;
    use crate::provider::RuntimeError;
    use std::fmt;

    #[derive(Debug)]
    struct Wrapped(RuntimeError);

    impl fmt::Display for Wrapped {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("call went wrong")
        }
    }

    impl Error for Wrapped {
        fn source(&self) -> Option<&(dyn Error + 'static)> {
            Some(&self.0)
        }
    }

    #[test]
    fn test_causes_already_in_the_message_are_not_repeated() {
        let err = InspectError::InvocationFailed {
            method: "Geo.Circle.Area".to_string(),
            source: RuntimeError::MissingBody("Geo.Circle.Area()".to_string()),
        };
        assert!(err.to_string().contains("No executable body"));
        assert!(hidden_causes(&err).is_empty());
    }

    #[test]
    fn test_causes_missing_from_the_message_are_listed() {
        let err = Wrapped(RuntimeError::Raised("disk on fire".to_string()));
        assert_eq!(hidden_causes(&err), vec!["disk on fire".to_string()]);
    }
}
