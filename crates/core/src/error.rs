use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Unknown command: `{}`", .0)]
    UnknownCommand(String),

    #[error("{} is required", .0)]
    RequiredArgumentMissing(String),

    #[error("Cancelled by user.")]
    Cancelled,

    #[error("The sub process exiting with non-success code.")]
    SubProcessExit,

    #[error("Terminal or sub process I/O error: {}", _0)]
    Stdio(#[from] std::io::Error),

    #[error("Error {} {} file at `{}`: {}", .action, .file_description, .path, .original)]
    Yaml {
        action: String,
        file_description: String,
        path: String,
        original: serde_yaml::Error,
    },

    #[error("IO error with {} file at path `{}`: {}", .file_description, .path, .original)]
    Io {
        file_description: String,
        path: String,
        original: std::io::Error,
    },

    #[error("No commands were found in the command registry YAML. Is `{}` empty?", .path)]
    EmptyRegistry { path: String },

    #[error("Found a non-unique command name under `{}`: `{}`", .0, .1)]
    NonUniqueCommandName(String, String),

    #[error("Found a non-unique option key on command `{}`: `{}`", .0, .1)]
    NonUniqueOptionKey(String, String),

    #[error("Option key `{}` on command `{}` is reserved for the option menu", .1, .0)]
    ReservedOptionKey(String, String),

    #[error("Option on command `{}` has neither a long nor a short form", .0)]
    UnnamedOption(String),

    #[error("Required argument `{}` on command `{}` follows an optional one", .1, .0)]
    RequiredAfterOptional(String, String),

    #[error("Invalid name: name may not be empty")]
    EmptyName,

    #[error("Invalid name `{}`: name may not contain spaces", .0)]
    NameWithSpace(String),

    #[error("Misc error: {}", .0)]
    Misc(String),
}

impl Error {
    pub fn unknown_command(path: &[String]) -> Self {
        Self::UnknownCommand(path.join(" "))
    }

    pub fn empty_registry(path: String) -> Self {
        Self::EmptyRegistry { path }
    }

    pub fn yaml_error(
        action: String,
        file_description: String,
        path: String,
        original: serde_yaml::Error,
    ) -> Self {
        Self::Yaml {
            action,
            file_description,
            path,
            original,
        }
    }

    pub fn io_error(file_description: String, path: String, original: std::io::Error) -> Self {
        Self::Io {
            file_description,
            path,
            original,
        }
    }
}
