//! Application error types using thiserror
//!
//! Error hierarchy:
//! - ManifestError: Issues with manifest file reading and XML parsing
//! - RegistryError: Issues with package registry communication
//! - ConfigError: Issues with CLI or config file configuration
//! - IoError: File system operation failures
//! - VersionError: Unparsable version strings

use std::path::PathBuf;
use thiserror::Error;

/// Fatal errors that stop a scan
///
/// Manifest problems never surface here: they are recorded on the project.
#[derive(Error, Debug)]
pub enum AppError {
    /// Package registry related errors
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// Configuration related errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// IO related errors
    #[error(transparent)]
    Io(#[from] IoError),
}

/// Errors related to manifest file operations
#[derive(Error, Debug)]
pub enum ManifestError {
    /// Failed to read manifest file
    #[error("failed to read manifest file {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed XML
    #[error("failed to parse XML in {path}: {message}")]
    XmlParseError { path: PathBuf, message: String },

    /// Well-formed XML that does not match the expected schema
    #[error("{path} is not a {schema}: {message}")]
    SchemaMismatch {
        path: PathBuf,
        schema: &'static str,
        message: String,
    },
}

/// Errors related to package registry communication
#[derive(Error, Debug)]
pub enum RegistryError {
    /// Network request failed
    #[error("failed to fetch package '{package}' from {registry}: {message}")]
    NetworkError {
        package: String,
        registry: String,
        message: String,
    },

    /// Rate limit exceeded
    #[error("rate limit exceeded for {registry} registry")]
    RateLimitExceeded { registry: String },

    /// Invalid response from registry
    #[error("invalid response from {registry} for '{package}': {message}")]
    InvalidResponse {
        package: String,
        registry: String,
        message: String,
    },

    /// Timeout
    #[error("timeout while fetching '{package}' from {registry}")]
    Timeout { package: String, registry: String },

    /// Authentication error
    #[error("authentication failed for {registry}: {message}")]
    AuthenticationError { registry: String, message: String },
}

/// Errors related to configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file could not be read or parsed
    #[error("invalid config file {path}: {message}")]
    ConfigFile { path: PathBuf, message: String },

    /// A credential environment variable required by a package source is missing
    #[error("environment variable '{variable}' required by package source '{source_name}' is not set")]
    MissingEnvironment {
        variable: String,
        source_name: String,
    },

    /// Invalid package source URL
    #[error("invalid package source URL '{url}'")]
    InvalidSource { url: String },
}

/// Errors related to IO operations
#[derive(Error, Debug)]
pub enum IoError {
    /// Directory not found
    #[error("directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// Generic IO error
    #[error("IO error at {path}: {source}")]
    Generic {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors parsing a version string
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VersionError {
    #[error("empty version string")]
    Empty,

    #[error("invalid numeric component in version '{input}'")]
    InvalidComponent { input: String },

    #[error("too many components in version '{input}'")]
    TooManyComponents { input: String },

    #[error("invalid label in version '{input}': {message}")]
    InvalidLabel { input: String, message: String },
}

impl ManifestError {
    /// Creates a new ReadError
    pub fn read_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ManifestError::ReadError {
            path: path.into(),
            source,
        }
    }

    /// Creates a new XmlParseError
    pub fn xml_parse_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        ManifestError::XmlParseError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates a new SchemaMismatch error
    pub fn schema_mismatch(
        path: impl Into<PathBuf>,
        schema: &'static str,
        message: impl Into<String>,
    ) -> Self {
        ManifestError::SchemaMismatch {
            path: path.into(),
            schema,
            message: message.into(),
        }
    }
}

impl RegistryError {
    /// Creates a new NetworkError
    pub fn network_error(
        package: impl Into<String>,
        registry: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        RegistryError::NetworkError {
            package: package.into(),
            registry: registry.into(),
            message: message.into(),
        }
    }

    /// Creates a new InvalidResponse error
    pub fn invalid_response(
        package: impl Into<String>,
        registry: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        RegistryError::InvalidResponse {
            package: package.into(),
            registry: registry.into(),
            message: message.into(),
        }
    }

    /// Creates a new RateLimitExceeded error
    pub fn rate_limit_exceeded(registry: impl Into<String>) -> Self {
        RegistryError::RateLimitExceeded {
            registry: registry.into(),
        }
    }

    /// Creates a new Timeout error
    pub fn timeout(package: impl Into<String>, registry: impl Into<String>) -> Self {
        RegistryError::Timeout {
            package: package.into(),
            registry: registry.into(),
        }
    }
}

impl IoError {
    /// Creates a new DirectoryNotFound error
    pub fn directory_not_found(path: impl Into<PathBuf>) -> Self {
        IoError::DirectoryNotFound { path: path.into() }
    }

    /// Creates a new Generic IO error
    pub fn generic(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        IoError::Generic {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manifest_error_xml_parse() {
        let err = ManifestError::xml_parse_error("/src/App.csproj", "unexpected end of file");
        let msg = format!("{}", err);
        assert!(msg.contains("failed to parse XML"));
        assert!(msg.contains("App.csproj"));
        assert!(msg.contains("unexpected end of file"));
    }

    #[test]
    fn test_manifest_error_schema_mismatch() {
        let err = ManifestError::schema_mismatch("/src/App.csproj", "UWP project", "no references");
        let msg = format!("{}", err);
        assert!(msg.contains("is not a UWP project"));
        assert!(msg.contains("no references"));
    }

    #[test]
    fn test_registry_error_network() {
        let err = RegistryError::network_error("Serilog", "nuget.org", "connection refused");
        let msg = format!("{}", err);
        assert!(msg.contains("failed to fetch"));
        assert!(msg.contains("connection refused"));
    }

    #[test]
    fn test_registry_error_rate_limit() {
        let err = RegistryError::rate_limit_exceeded("nuget.org");
        let msg = format!("{}", err);
        assert!(msg.contains("rate limit exceeded"));
        assert!(msg.contains("nuget.org"));
    }

    #[test]
    fn test_registry_error_timeout() {
        let err = RegistryError::timeout("xunit", "nuget.org");
        let msg = format!("{}", err);
        assert!(msg.contains("timeout"));
        assert!(msg.contains("xunit"));
    }

    #[test]
    fn test_config_error_missing_environment() {
        let err = ConfigError::MissingEnvironment {
            variable: "FEED_TOKEN".to_string(),
            source_name: "internal".to_string(),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("FEED_TOKEN"));
        assert!(msg.contains("internal"));
    }

    #[test]
    fn test_io_error_directory_not_found() {
        let err = IoError::directory_not_found("/path/to/missing");
        let msg = format!("{}", err);
        assert!(msg.contains("directory not found"));
    }

    #[test]
    fn test_version_error_display() {
        let err = VersionError::InvalidComponent {
            input: "bogus".to_string(),
        };
        assert!(err.to_string().contains("bogus"));
    }

    #[test]
    fn test_app_error_from_config_error() {
        let config_err = ConfigError::InvalidSource {
            url: "ftp://nope".to_string(),
        };
        let app_err: AppError = config_err.into();
        let msg = format!("{}", app_err);
        assert!(msg.contains("invalid package source URL"));
    }

    #[test]
    fn test_app_error_from_registry_error() {
        let registry_err = RegistryError::timeout("pkg", "nuget.org");
        let app_err: AppError = registry_err.into();
        assert!(format!("{}", app_err).contains("timeout"));
    }

    #[test]
    fn test_error_debug_trait() {
        let err = IoError::directory_not_found("/test");
        let debug = format!("{:?}", err);
        assert!(debug.contains("DirectoryNotFound"));
    }
}
