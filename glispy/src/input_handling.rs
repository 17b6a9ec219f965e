// Input sources for the glispy-repl binary: interactive, string, file or pipe

use clap::ValueEnum;
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputSource {
    /// Interactive line-editing session
    Interactive,
    /// Evaluate a string given on the command line
    String,
    /// Evaluate a source file
    File,
    /// Evaluate everything read from stdin
    Pipe,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InputConfig {
    pub source: InputSource,
    pub file_path: Option<PathBuf>,
    pub string_content: Option<String>,
    pub verbose: bool,
}

impl InputConfig {
    pub fn from_file(file_path: PathBuf, verbose: bool) -> Self {
        Self {
            source: InputSource::File,
            file_path: Some(file_path),
            string_content: None,
            verbose,
        }
    }

    pub fn from_string(content: String, verbose: bool) -> Self {
        Self {
            source: InputSource::String,
            file_path: None,
            string_content: Some(content),
            verbose,
        }
    }

    pub fn from_pipe(verbose: bool) -> Self {
        Self {
            source: InputSource::Pipe,
            file_path: None,
            string_content: None,
            verbose,
        }
    }

    /// Build a config from command-line arguments, checking that the
    /// argument the source needs is present.
    pub fn from_args(
        source: InputSource,
        file_path: Option<PathBuf>,
        string_content: Option<String>,
        verbose: bool,
    ) -> Result<Self, InputError> {
        validate_input_args(source, &file_path, &string_content)?;
        match source {
            InputSource::File => Ok(Self {
                source,
                file_path,
                string_content: None,
                verbose,
            }),
            InputSource::String => Ok(Self {
                source,
                file_path: None,
                string_content,
                verbose,
            }),
            InputSource::Pipe => Ok(Self::from_pipe(verbose)),
            InputSource::Interactive => Err(InputError::InteractiveNotSupported),
        }
    }
}

/// Program text plus a name for diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub struct InputContent {
    pub content: String,
    pub source_name: String,
}

pub fn read_input_content(config: &InputConfig) -> Result<InputContent, InputError> {
    match config.source {
        InputSource::File => {
            let file_path = config
                .file_path
                .as_ref()
                .ok_or(InputError::MissingFileArgument)?;
            let content = fs::read_to_string(file_path).map_err(|error| InputError::FileRead {
                path: file_path.clone(),
                error,
            })?;
            if config.verbose {
                eprintln!("Read {} bytes from {}", content.len(), file_path.display());
            }
            Ok(InputContent {
                content,
                source_name: file_path.to_string_lossy().to_string(),
            })
        }

        InputSource::String => {
            let content = config
                .string_content
                .clone()
                .ok_or(InputError::MissingStringArgument)?;
            if config.verbose {
                eprintln!("Evaluating string input ({} bytes)", content.len());
            }
            Ok(InputContent {
                content,
                source_name: "<string>".to_string(),
            })
        }

        InputSource::Pipe => {
            let mut content = String::new();
            io::stdin()
                .read_to_string(&mut content)
                .map_err(InputError::StdinRead)?;
            if config.verbose {
                eprintln!("Read {} bytes from stdin", content.len());
            }
            Ok(InputContent {
                content,
                source_name: "<stdin>".to_string(),
            })
        }

        InputSource::Interactive => Err(InputError::InteractiveNotSupported),
    }
}

pub fn validate_input_args(
    source: InputSource,
    file_path: &Option<PathBuf>,
    string_content: &Option<String>,
) -> Result<(), InputError> {
    match source {
        InputSource::File if file_path.is_none() => Err(InputError::MissingFileArgument),
        InputSource::String if string_content.is_none() => Err(InputError::MissingStringArgument),
        _ => Ok(()),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("--file argument required when using --input file")]
    MissingFileArgument,

    #[error("--string argument required when using --input string")]
    MissingStringArgument,

    #[error("Error reading file '{}': {error}", .path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        error: io::Error,
    },

    #[error("Error reading from stdin: {0}")]
    StdinRead(#[source] io::Error),

    #[error("Interactive mode not supported in this context")]
    InteractiveNotSupported,
}
