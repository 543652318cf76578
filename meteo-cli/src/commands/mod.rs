pub mod formats;
pub mod grid;
pub mod timeseries;

use anyhow::{Context, Result};
use meteo::{MeteoService, MeteoServiceBuilder, Payload};
use std::fs;
use std::io::Write;
use std::path::Path;

/// Provider connection settings gathered from flags and environment.
pub struct Connection {
    pub user: Option<String>,
    pub password: Option<String>,
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Connection {
    /// Build the service, failing if either credential is missing.
    pub fn service(&self) -> Result<MeteoService> {
        let user = self
            .user
            .as_deref()
            .filter(|u| !u.is_empty())
            .context("No username given. Use --user or set MM_USER")?;
        let password = self
            .password
            .as_deref()
            .filter(|p| !p.is_empty())
            .context("No password given. Use --password or set MM_PASS")?;

        MeteoServiceBuilder::new(user, password)
            .base_url(self.base_url.as_str())
            .timeout_secs(self.timeout_secs)
            .build()
            .context("Failed to create meteo service")
    }
}

/// Write a payload to `output`, or to stdout when no file is given.
///
/// A one-line summary goes to stderr so stdout carries only the payload.
pub fn write_payload(payload: &Payload, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            fs::write(path, &payload.body)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!(
                "Wrote {} bytes ({}) to {}",
                payload.body.len(),
                payload.content_type,
                path.display()
            );
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(&payload.body)
                .context("Failed to write payload to stdout")?;
            stdout.flush()?;
            eprintln!("{} bytes ({})", payload.body.len(), payload.content_type);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn payload(body: &'static [u8], content_type: &str) -> Payload {
        Payload {
            body: body.into(),
            content_type: content_type.to_string(),
        }
    }

    fn connection(user: Option<&str>, password: Option<&str>) -> Connection {
        Connection {
            user: user.map(String::from),
            password: password.map(String::from),
            base_url: "http://localhost:1".to_string(),
            timeout_secs: 1,
        }
    }

    #[test]
    fn test_service_requires_user() {
        let err = connection(None, Some("p")).service().unwrap_err();
        assert!(err.to_string().contains("MM_USER"));
    }

    #[test]
    fn test_service_requires_password() {
        let err = connection(Some("u"), Some("")).service().unwrap_err();
        assert!(err.to_string().contains("MM_PASS"));
    }

    #[test]
    fn test_service_builds_with_credentials() {
        assert!(connection(Some("u"), Some("p")).service().is_ok());
    }

    #[test]
    fn test_write_payload_to_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("grid.png");

        write_payload(&payload(b"\x89PNG", "image/png"), Some(&path)).unwrap();

        assert_eq!(fs::read(&path).unwrap(), b"\x89PNG");
    }
}
