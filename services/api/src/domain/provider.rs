//! OAuth2 provider registry and profile-attribute normalization.

use std::fmt;
use std::str::FromStr;

use serde_json::Value;

/// Supported OAuth2 identity providers. Adding one means adding a variant
/// here plus its arms in [`OAuthProfile::from_attributes`] and the endpoint
/// table in `infra::oauth`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthProvider {
    Google,
    Github,
    Microsoft,
    Facebook,
}

impl AuthProvider {
    /// Canonical storage form, e.g. `GOOGLE`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Google => "GOOGLE",
            Self::Github => "GITHUB",
            Self::Microsoft => "MICROSOFT",
            Self::Facebook => "FACEBOOK",
        }
    }

    /// URL path form, e.g. `google` in `/oauth2/callback/google`.
    pub fn slug(&self) -> &'static str {
        match self {
            Self::Google => "google",
            Self::Github => "github",
            Self::Microsoft => "microsoft",
            Self::Facebook => "facebook",
        }
    }
}

impl fmt::Display for AuthProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for provider names outside the known set.
#[derive(Debug, thiserror::Error)]
#[error("unsupported provider: {0}")]
pub struct UnsupportedProvider(pub String);

impl FromStr for AuthProvider {
    type Err = UnsupportedProvider;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "google" => Ok(Self::Google),
            "github" => Ok(Self::Github),
            "microsoft" => Ok(Self::Microsoft),
            "facebook" => Ok(Self::Facebook),
            _ => Err(UnsupportedProvider(s.to_owned())),
        }
    }
}

/// Provider-returned profile, normalized from the provider-specific
/// attribute schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OAuthProfile {
    pub provider_id: String,
    pub email: String,
    pub name: String,
    pub avatar_url: Option<String>,
}

/// Error raised when a provider profile lacks a required attribute.
#[derive(Debug, thiserror::Error)]
#[error("provider profile missing `{0}` attribute")]
pub struct MissingAttribute(pub &'static str);

/// Read an attribute that may arrive as a JSON string or number
/// (GitHub's `id` is numeric) and render it as a string.
fn stringified(attrs: &Value, key: &'static str) -> Option<String> {
    match attrs.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn string_attr(attrs: &Value, key: &'static str) -> Option<String> {
    attrs.get(key).and_then(Value::as_str).map(str::to_owned)
}

impl OAuthProfile {
    /// Normalize the raw userinfo attributes of one provider.
    ///
    /// Each provider has a distinct schema: Google keys the external id as
    /// `sub`, everyone else as `id`; GitHub may leave `name` null and then
    /// `login` stands in; Facebook nests the avatar under `picture.data.url`.
    pub fn from_attributes(
        provider: AuthProvider,
        attrs: &Value,
    ) -> Result<Self, MissingAttribute> {
        let provider_id = match provider {
            AuthProvider::Google => string_attr(attrs, "sub"),
            AuthProvider::Github | AuthProvider::Microsoft | AuthProvider::Facebook => {
                stringified(attrs, "id")
            }
        }
        .ok_or(MissingAttribute("id"))?;

        let email = string_attr(attrs, "email").ok_or(MissingAttribute("email"))?;

        let name = match provider {
            AuthProvider::Github => {
                string_attr(attrs, "name").or_else(|| string_attr(attrs, "login"))
            }
            _ => string_attr(attrs, "name"),
        }
        .ok_or(MissingAttribute("name"))?;

        let avatar_url = match provider {
            AuthProvider::Google => string_attr(attrs, "picture"),
            AuthProvider::Github => string_attr(attrs, "avatar_url"),
            AuthProvider::Facebook => attrs
                .pointer("/picture/data/url")
                .and_then(Value::as_str)
                .map(str::to_owned),
            AuthProvider::Microsoft => None,
        };

        Ok(Self {
            provider_id,
            email,
            name,
            avatar_url,
        })
    }
}
