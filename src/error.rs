//! Errors with process exit codes.
//!
//! Exit code scheme:
//! - 0: success
//! - 1: asset error (shader compile/link failure, missing or undecodable file)
//! - 2: configuration error (bad JSON config)
//! - 3: platform error (SDL, window, GL context or GL object creation)

use std::{fmt, path::PathBuf};

use crate::abs::ShaderStage;

/// Everything that can stop the demo before or during setup.
#[derive(Debug)]
pub enum DemoError {
    /// A shader stage failed to compile. Carries the compiler's info log.
    ShaderCompile { stage: ShaderStage, log: String },
    /// The shader program failed to link. Carries the linker's info log.
    ShaderLink(String),
    /// A required input file could not be read.
    MissingFile {
        what: &'static str,
        path: PathBuf,
        source: std::io::Error,
    },
    /// The texture file exists but could not be decoded.
    Image {
        path: PathBuf,
        source: image::ImageError,
    },
    /// The configuration file is unreadable or malformed.
    Config(String),
    /// SDL or OpenGL refused to give us something.
    Platform(String),
}

impl DemoError {
    /// Returns the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            DemoError::ShaderCompile { .. }
            | DemoError::ShaderLink(_)
            | DemoError::MissingFile { .. }
            | DemoError::Image { .. } => 1,
            DemoError::Config(_) => 2,
            DemoError::Platform(_) => 3,
        }
    }
}

impl fmt::Display for DemoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DemoError::ShaderCompile { stage, log } => {
                write!(f, "{} shader error: {}", stage, log.trim_end())
            }
            DemoError::ShaderLink(log) => write!(f, "shader link error: {}", log.trim_end()),
            DemoError::MissingFile { what, path, source } => {
                write!(f, "could not load {what} {}: {source}", path.display())
            }
            DemoError::Image { path, source } => {
                write!(f, "could not decode image {}: {source}", path.display())
            }
            DemoError::Config(msg) => write!(f, "config error: {msg}"),
            DemoError::Platform(msg) => write!(f, "platform error: {msg}"),
        }
    }
}

impl std::error::Error for DemoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DemoError::MissingFile { source, .. } => Some(source),
            DemoError::Image { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<sdl2::video::WindowBuildError> for DemoError {
    fn from(e: sdl2::video::WindowBuildError) -> Self {
        DemoError::Platform(e.to_string())
    }
}

impl From<serde_json::Error> for DemoError {
    fn from(e: serde_json::Error) -> Self {
        DemoError::Config(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shader_compile_error_exits_with_1() {
        let err = DemoError::ShaderCompile {
            stage: ShaderStage::Fragment,
            log: "0:1(1): error: syntax error\n".into(),
        };
        assert_eq!(err.exit_code(), 1);
        assert_eq!(
            err.to_string(),
            "fragment shader error: 0:1(1): error: syntax error"
        );
    }

    #[test]
    fn link_error_exits_with_1() {
        assert_eq!(DemoError::ShaderLink("no main".into()).exit_code(), 1);
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = DemoError::MissingFile {
            what: "vertex shader",
            path: PathBuf::from("nowhere/vertex.glsl"),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        assert_eq!(err.exit_code(), 1);
        assert!(err.to_string().contains("nowhere/vertex.glsl"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn config_and_platform_exit_codes_differ() {
        assert_eq!(DemoError::Config("bad".into()).exit_code(), 2);
        assert_eq!(DemoError::Platform("no display".into()).exit_code(), 3);
    }

    #[test]
    fn from_serde_json_error_routes_to_config() {
        let bad = serde_json::from_str::<serde_json::Value>("{invalid").unwrap_err();
        let err = DemoError::from(bad);
        assert_eq!(err.exit_code(), 2);
    }
}
