//! core::config::schema
//!
//! Configuration schema types.
//!
//! Both scopes share one shape; every field is optional so a repo file can
//! override a single key from the global file.
//!
//! # Example
//!
//! ```toml
//! remote_name = "origin"
//! primary_branch = "master"
//! message_signature = "gitcover"
//!
//! [author]
//! name = "Build Bot"
//! email = "bot@example.com"
//! ```

use serde::{Deserialize, Serialize};

use super::ConfigError;
use crate::core::types::BranchName;

/// Settings read from one config file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    /// Remote name registered by `init` when a url is supplied
    pub remote_name: Option<String>,

    /// Branch whose first commit is the repository's initial commit
    pub primary_branch: Option<String>,

    /// Text embedded in generated commit messages
    pub message_signature: Option<String>,

    /// Commit signature override
    pub author: Option<AuthorConfig>,
}

impl FileConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(remote) = &self.remote_name {
            if remote.is_empty() || remote.contains('/') {
                return Err(ConfigError::InvalidValue(format!(
                    "invalid remote_name '{remote}': must be non-empty and contain no '/'"
                )));
            }
        }

        if let Some(branch) = &self.primary_branch {
            BranchName::new(branch.as_str()).map_err(|e| {
                ConfigError::InvalidValue(format!("invalid primary_branch: {e}"))
            })?;
        }

        if let Some(author) = &self.author {
            author.validate()?;
        }

        Ok(())
    }

    /// Overlay `other` on top of `self`, field by field.
    pub fn merged_with(&self, other: &FileConfig) -> FileConfig {
        FileConfig {
            remote_name: other.remote_name.clone().or_else(|| self.remote_name.clone()),
            primary_branch: other
                .primary_branch
                .clone()
                .or_else(|| self.primary_branch.clone()),
            message_signature: other
                .message_signature
                .clone()
                .or_else(|| self.message_signature.clone()),
            author: other.author.clone().or_else(|| self.author.clone()),
        }
    }
}

/// Identity used for commits created by the session.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct AuthorConfig {
    pub name: String,
    pub email: String,
}

impl AuthorConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.name.trim().is_empty() || self.email.trim().is_empty() {
            return Err(ConfigError::InvalidValue(
                "author name and email must both be set".into(),
            ));
        }
        Ok(())
    }
}
