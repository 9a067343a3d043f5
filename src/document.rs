//! Typed views of validated documents.
//!
//! These structs mirror the two schemas field for field. Obtain them through
//! [`crate::schema::Schema::parse`], which only deserializes documents that
//! passed validation.

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::DocumentError;
use crate::schema::deployment::CLOUD_V2;
use crate::schema::patterns::SLOT_KEY;

/// A deployment configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct DeploymentConfig {
    /// Feature flags.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub features: Option<BTreeMap<String, FeatureValue>>,
    /// Routing slot key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slot: Option<String>,
    /// Runtime limits.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limits: Option<Limits>,
    /// Runtime environment variables.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub env: Option<EnvSpec>,
    /// Build settings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build: Option<BuildConfig>,
    /// Static file serving rules.
    #[serde(default, rename = "static", skip_serializing_if = "Option::is_none")]
    pub static_files: Option<StaticConfig>,
    /// GitHub integration toggles.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github: Option<GithubConfig>,
}

impl DeploymentConfig {
    /// Returns a feature flag by name.
    #[must_use]
    pub fn feature(&self, name: &str) -> Option<&FeatureValue> {
        self.features.as_ref()?.get(name)
    }

    /// Returns true if `features.cloud` is `"v2"`.
    #[must_use]
    pub fn is_cloud_v2(&self) -> bool {
        matches!(self.feature("cloud"), Some(FeatureValue::String(cloud)) if cloud == CLOUD_V2)
    }

    /// Parses the slot key, if one is set.
    ///
    /// # Errors
    ///
    /// Returns an error if the slot does not follow the slot key grammar.
    pub fn slot_key(&self) -> Result<Option<SlotKey>, DocumentError> {
        self.slot.as_deref().map(str::parse::<SlotKey>).transpose()
    }
}

/// A scalar feature flag value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FeatureValue {
    /// A boolean flag.
    Bool(bool),
    /// A numeric flag.
    Number(f64),
    /// A string flag, e.g. `cloud: "v2"`.
    String(String),
}

/// Runtime limits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Limits {
    /// Maximum execution duration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    /// Maximum concurrent requests per instance.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_concurrent_reqs: Option<f64>,
    /// Request timeout.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<f64>,
}

/// Environment variables, in either accepted shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EnvSpec {
    /// Explicit name to value mapping.
    Values(BTreeMap<String, String>),
    /// Names passed through from the deploying environment.
    PassThrough(Vec<String>),
}

impl EnvSpec {
    /// Returns the variable names, sorted for mappings and in input order for lists.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        match self {
            Self::Values(values) => values.keys().map(String::as_str).collect(),
            Self::PassThrough(names) => names.iter().map(String::as_str).collect(),
        }
    }
}

/// Build settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BuildConfig {
    /// Build-time environment variables.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub env: Option<EnvSpec>,
}

/// Either an on/off switch or the list of paths a behaviour applies to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathToggle {
    /// Applies everywhere or nowhere.
    Enabled(bool),
    /// Applies to the listed path globs.
    Paths(Vec<String>),
}

/// Static file serving rules.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct StaticConfig {
    /// Directory to serve.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public: Option<String>,
    /// Strip `.html` extensions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clean_urls: Option<PathToggle>,
    /// Internal rewrites.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rewrites: Option<Vec<Rewrite>>,
    /// External redirects.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirects: Option<Vec<Redirect>>,
    /// Custom response headers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<Vec<HeaderRule>>,
    /// Directory listings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directory_listing: Option<PathToggle>,
    /// Paths hidden from directory listings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unlisted: Option<Vec<String>>,
    /// Force or remove trailing slashes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trailing_slash: Option<bool>,
    /// Serve the single file of a directory directly.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub render_single: Option<bool>,
    /// Follow symbolic links.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symlinks: Option<bool>,
}

/// An internal rewrite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Rewrite {
    /// Matched request path glob.
    pub source: String,
    /// Path served instead.
    pub destination: String,
}

/// An external redirect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Redirect {
    /// Matched request path glob.
    pub source: String,
    /// Redirect target.
    pub destination: String,
    /// 3xx status code.
    #[serde(
        default,
        rename = "type",
        deserialize_with = "whole_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub status: Option<u16>,
}

/// Headers applied to responses whose path matches `source`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HeaderRule {
    /// Matched request path glob.
    pub source: String,
    /// Headers to set.
    pub headers: Vec<Header>,
}

/// A single response header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Header {
    /// Header name.
    pub key: String,
    /// Header value.
    pub value: String,
}

/// GitHub integration toggles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GithubConfig {
    /// Deploy on push.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    /// Alias successful deployments.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aliasing: Option<bool>,
}

/// A parsed slot key such as `staging-c.5-t1-w-m1024`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotKey {
    /// Targets the staging fleet.
    pub staging: bool,
    /// Compute class.
    pub compute_class: u32,
    /// Worker threads, for threaded slots.
    pub worker_threads: Option<u32>,
    /// Memory in megabytes.
    pub memory_mb: u32,
}

impl FromStr for SlotKey {
    type Err = DocumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || DocumentError::parse(format!("invalid slot key '{s}'"), None);
        let captures = SLOT_KEY.captures(s).ok_or_else(invalid)?;

        let number = |group: usize| -> Result<Option<u32>, DocumentError> {
            captures
                .get(group)
                .map(|m| m.as_str().parse::<u32>().map_err(|_| invalid()))
                .transpose()
        };

        Ok(Self {
            staging: captures.get(1).is_some(),
            compute_class: number(2)?.ok_or_else(invalid)?,
            worker_threads: number(3)?,
            memory_mb: number(4)?.ok_or_else(invalid)?,
        })
    }
}

impl fmt::Display for SlotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.staging {
            f.write_str("staging-")?;
        }
        write!(f, "c.{}-", self.compute_class)?;
        if let Some(threads) = self.worker_threads {
            write!(f, "t{threads}-w-")?;
        }
        write!(f, "m{}", self.memory_mb)
    }
}

/// A user profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UserProfile {
    /// Unique handle.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Billing details have been confirmed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub billing_checked: Option<bool>,
    /// SHA-1 of the avatar image, hex encoded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    /// Contact address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Pinned platform version; `None` when unset or null.
    #[serde(
        default,
        deserialize_with = "whole_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub platform_version: Option<u8>,
}

/// Reads an optional integer field, accepting whole floats such as `2.0`.
///
/// JSON Schema counts those as integers, so validated documents may carry them.
fn whole_number<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: TryFrom<u64>,
{
    let Some(number) = Option::<f64>::deserialize(deserializer)? else {
        return Ok(None);
    };
    if number.fract() != 0.0 || number < 0.0 {
        return Err(<D::Error as DeError>::custom(format!("expected a whole number, got {number}")));
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let whole = number as u64;
    T::try_from(whole)
        .map(Some)
        .map_err(|_| <D::Error as DeError>::custom(format!("{whole} is out of range")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_slot_key_parse() {
        let key: SlotKey = "staging-c.5-t1-w-m1024".parse().unwrap();
        assert!(key.staging);
        assert_eq!(key.compute_class, 5);
        assert_eq!(key.worker_threads, Some(1));
        assert_eq!(key.memory_mb, 1024);
        assert_eq!(key.to_string(), "staging-c.5-t1-w-m1024");

        let plain: SlotKey = "c.125-m512".parse().unwrap();
        assert!(!plain.staging);
        assert_eq!(plain.worker_threads, None);
        assert_eq!(plain.to_string(), "c.125-m512");
    }

    #[test]
    fn test_slot_key_rejects_invalid() {
        assert!("invalid-key".parse::<SlotKey>().is_err());
        assert!("c.99999999999-m1".parse::<SlotKey>().is_err());
    }

    #[test]
    fn test_deployment_config_shapes() {
        let config: DeploymentConfig = serde_json::from_value(json!({
            "features": { "cloud": "v2", "ratio": 0.5, "beta": true },
            "slot": "c.1-m128",
            "env": { "B": "2", "A": "1" },
            "build": { "env": ["NPM_TOKEN"] },
            "static": { "cleanUrls": true, "directoryListing": ["/assets/**"] }
        }))
        .unwrap();

        assert!(config.is_cloud_v2());
        assert_eq!(config.feature("ratio"), Some(&FeatureValue::Number(0.5)));
        assert_eq!(config.feature("beta"), Some(&FeatureValue::Bool(true)));
        assert_eq!(config.env.as_ref().unwrap().names(), vec!["A", "B"]);
        assert_eq!(
            config.build.as_ref().and_then(|b| b.env.as_ref()).unwrap().names(),
            vec!["NPM_TOKEN"]
        );
        let static_files = config.static_files.as_ref().unwrap();
        assert_eq!(static_files.clean_urls, Some(PathToggle::Enabled(true)));
        assert_eq!(
            static_files.directory_listing,
            Some(PathToggle::Paths(vec![String::from("/assets/**")]))
        );
        assert_eq!(config.slot_key().unwrap().unwrap().memory_mb, 128);
    }

    #[test]
    fn test_cloud_v2_requires_exact_string() {
        let config: DeploymentConfig =
            serde_json::from_value(json!({ "features": { "cloud": "v1" } })).unwrap();
        assert!(!config.is_cloud_v2());
        assert!(!DeploymentConfig::default().is_cloud_v2());
    }

    #[test]
    fn test_user_profile_serializes_camel_case() {
        let profile = UserProfile {
            username: Some(String::from("n8")),
            billing_checked: Some(true),
            platform_version: Some(2),
            ..UserProfile::default()
        };
        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(
            json,
            json!({ "username": "n8", "billingChecked": true, "platformVersion": 2 })
        );
    }

    #[test]
    fn test_whole_float_integers() {
        let profile: UserProfile =
            serde_json::from_value(json!({ "platformVersion": 2.0 })).unwrap();
        assert_eq!(profile.platform_version, Some(2));

        let redirect: Redirect = serde_json::from_value(json!({
            "source": "/old",
            "destination": "/new",
            "type": 302.0
        }))
        .unwrap();
        assert_eq!(redirect.status, Some(302));

        let null: UserProfile = serde_json::from_value(json!({ "platformVersion": null })).unwrap();
        assert_eq!(null.platform_version, None);

        assert!(serde_json::from_value::<UserProfile>(json!({ "platformVersion": 1.5 })).is_err());
        assert!(serde_json::from_value::<UserProfile>(json!({ "platformVersion": 300 })).is_err());
    }
}
