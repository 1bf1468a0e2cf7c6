// ── Host normalization ──
//
// The configured host is the only connection setting. It is normalized
// once, at validation time, to carry an explicit scheme.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A backend address with a guaranteed `http://` or `https://` prefix.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Host(String);

impl Host {
    /// Normalize a user-supplied host.
    ///
    /// Surrounding whitespace is dropped. A host already starting with
    /// `http://` or `https://` (any case) is kept as is; anything else
    /// gets exactly one `http://` prefix.
    pub fn normalize(raw: &str) -> Self {
        let trimmed = raw.trim();
        if scheme_len(trimmed).is_some() {
            Self(trimmed.to_owned())
        } else {
            Self(format!("http://{trimmed}"))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Identifier-safe form: scheme stripped, `:` and `/` replaced by `_`.
    ///
    /// `http://10.0.0.5:7180` becomes `10.0.0.5_7180`.
    pub fn slug(&self) -> String {
        let rest = scheme_len(&self.0).map_or(self.0.as_str(), |n| &self.0[n..]);
        rest.replace([':', '/'], "_")
    }
}

fn scheme_len(s: &str) -> Option<usize> {
    ["http://", "https://"].into_iter().find_map(|scheme| {
        s.get(..scheme.len())
            .filter(|prefix| prefix.eq_ignore_ascii_case(scheme))
            .map(|_| scheme.len())
    })
}

impl fmt::Display for Host {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for Host {
    fn from(s: String) -> Self {
        Self::normalize(&s)
    }
}

impl From<&str> for Host {
    fn from(s: &str) -> Self {
        Self::normalize(s)
    }
}

impl From<Host> for String {
    fn from(h: Host) -> Self {
        h.0
    }
}
