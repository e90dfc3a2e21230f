//! Trusted domain registry. Classifies URLs as trusted/untrusted.
//!
//! Matching is exact-or-subdomain on a dot boundary: `nih.gov` trusts
//! `pubmed.ncbi.nlm.nih.gov` but not `evilnih.gov`. Anything without a host
//! is untrusted.
//!
//! Hosts are compared as `url` reports them. For `http`/`https` that is the
//! IDNA (punycode) form, so a Unicode lookalike never equals an ASCII entry,
//! but no homograph detection is attempted beyond that.

use super::errors::LinkError;
use serde::Deserialize;
use std::collections::BTreeSet;
use std::path::Path;
use url::Url;

/// Shown in prompts when a URL has no host.
pub const UNKNOWN_DOMAIN: &str = "Unknown";

/// Built-in allowlist: public health agencies and medical literature.
pub const DEFAULT_TRUSTED_DOMAINS: &[&str] = &[
    "nih.gov",
    "cdc.gov",
    "fda.gov",
    "who.int",
    "nhs.uk",
    "mayoclinic.org",
    "clevelandclinic.org",
    "hopkinsmedicine.org",
    "harvard.edu",
    "stanford.edu",
    "nature.com",
    "science.org",
    "sciencedirect.com",
    "springer.com",
    "wiley.com",
    "thelancet.com",
    "bmj.com",
    "nejm.org",
    "jamanetwork.com",
    "cochranelibrary.com",
    "plos.org",
    "frontiersin.org",
    "mdpi.com",
    "examine.com",
];

/// Immutable set of lowercase domain suffixes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrustedDomainSet {
    domains: BTreeSet<String>,
}

impl TrustedDomainSet {
    /// Build from raw entries. Entries are trimmed, lowercased and stripped of
    /// leading dots. Entries that could never equal a host (schemes, paths,
    /// ports, wildcards, userinfo, empty labels) are rejected.
    pub fn new<I, S>(entries: I) -> Result<Self, LinkError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let domains = entries
            .into_iter()
            .map(|e| normalize_domain(e.as_ref()))
            .collect::<Result<BTreeSet<_>, _>>()?;
        Ok(Self { domains })
    }

    pub fn contains(&self, domain: &str) -> bool {
        self.domains.contains(domain)
    }

    pub fn len(&self) -> usize {
        self.domains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.domains.iter().map(String::as_str)
    }

    /// True if `host` is a registered domain or a proper subdomain of one.
    fn matches_host(&self, host: &str) -> bool {
        let mut candidate = host;
        loop {
            if self.domains.contains(candidate) {
                return true;
            }
            match candidate.split_once('.') {
                Some((_, rest)) if !rest.is_empty() => candidate = rest,
                _ => return false,
            }
        }
    }
}

fn normalize_domain(raw: &str) -> Result<String, LinkError> {
    let domain = raw.trim().trim_start_matches('.').to_ascii_lowercase();
    let invalid = domain.is_empty()
        || domain
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '/' | ':' | '*' | '@'))
        || domain.split('.').any(str::is_empty);
    if invalid {
        return Err(LinkError::InvalidDomain(raw.to_string()));
    }
    Ok(domain)
}

/// On-disk form of an extra allowlist: `{"domains": ["example.org"]}`.
#[derive(Debug, Deserialize)]
struct DomainListFile {
    domains: Vec<String>,
}

/// Answers "is this URL trusted?" and "what should the prompt call it?".
#[derive(Debug, Clone)]
pub struct DomainTrustRegistry {
    trusted: TrustedDomainSet,
}

impl Default for DomainTrustRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_TRUSTED_DOMAINS).expect("built-in trusted domains are valid")
    }
}

impl DomainTrustRegistry {
    pub fn new<I, S>(entries: I) -> Result<Self, LinkError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Ok(Self {
            trusted: TrustedDomainSet::new(entries)?,
        })
    }

    /// Built-in list plus `extra`.
    pub fn with_extra<I, S>(extra: I) -> Result<Self, LinkError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let defaults = DEFAULT_TRUSTED_DOMAINS.iter().map(|d| d.to_string());
        let extra = extra.into_iter().map(|d| d.as_ref().to_string());
        Self::new(defaults.chain(extra))
    }

    /// Read a JSON domain list. Used to extend the built-in list from config.
    pub fn read_domain_file(path: &Path) -> Result<Vec<String>, LinkError> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| LinkError::Config(format!("read {}: {}", path.display(), e)))?;
        let file: DomainListFile = serde_json::from_str(&raw)
            .map_err(|e| LinkError::Config(format!("parse {}: {}", path.display(), e)))?;
        Ok(file.domains)
    }

    /// Registry holding only the domains listed in `path`.
    pub fn from_json_file(path: &Path) -> Result<Self, LinkError> {
        Self::new(Self::read_domain_file(path)?)
    }

    pub fn domains(&self) -> &TrustedDomainSet {
        &self.trusted
    }

    pub fn is_trusted(&self, url: &Url) -> bool {
        match Self::host(url) {
            Ok(host) => self.trusted.matches_host(&host.to_ascii_lowercase()),
            Err(_) => false,
        }
    }

    /// Parse then classify. Parse failure is untrusted.
    pub fn is_trusted_str(&self, url: &str) -> bool {
        Url::parse(url).is_ok_and(|u| self.is_trusted(&u))
    }

    pub fn display_domain(&self, url: &Url) -> String {
        Self::host(url).unwrap_or(UNKNOWN_DOMAIN).to_string()
    }

    pub fn display_domain_str(&self, url: &str) -> String {
        Url::parse(url)
            .map(|u| self.display_domain(&u))
            .unwrap_or_else(|_| UNKNOWN_DOMAIN.to_string())
    }

    /// Host component, treating an empty host as absent.
    pub fn host(url: &Url) -> Result<&str, LinkError> {
        url.host_str()
            .filter(|h| !h.is_empty())
            .ok_or_else(|| LinkError::NoHost(url.to_string()))
    }
}
