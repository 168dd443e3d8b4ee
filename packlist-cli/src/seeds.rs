use anyhow::{Context, Result, bail};
use packlist_core::{code_from_entropy, decode_list_code, encode_list_code};
use regex::Regex;

/// Seed metadata for one generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedInfo {
    pub seed: u64,
    pub code: Option<String>,
}

impl SeedInfo {
    #[must_use]
    pub const fn from_numeric(seed: u64) -> Self {
        Self { seed, code: None }
    }

    #[must_use]
    pub const fn from_list_code(seed: u64, code: String) -> Self {
        Self {
            seed,
            code: Some(code),
        }
    }

    /// The code the user supplied, or the nearest code for a numeric seed.
    #[must_use]
    pub fn list_code(&self) -> String {
        self.code
            .clone()
            .unwrap_or_else(|| encode_list_code(self.seed))
    }
}

/// Resolve the `--seed` argument.
///
/// Accepts a literal integer or a list code such as `MONSOON42`. Without a
/// token a fresh code is drawn so the list can still be shared.
pub fn resolve_seed_input(token: Option<&str>) -> Result<SeedInfo> {
    let Some(token) = token.map(str::trim).filter(|t| !t.is_empty()) else {
        let code = code_from_entropy(rand::random());
        let seed = decode_list_code(&code).context("fresh list code failed to decode")?;
        return Ok(SeedInfo::from_list_code(seed, code));
    };

    if let Ok(value) = token.parse::<u64>() {
        return Ok(SeedInfo::from_numeric(value));
    }

    if let Ok(value) = token.parse::<i64>() {
        return Ok(SeedInfo::from_numeric(value.unsigned_abs()));
    }

    let list_code_regex =
        Regex::new(r"^[A-Za-z][A-Za-z\-]*\d{2}$").context("compiling list code pattern")?;
    if !list_code_regex.is_match(token) {
        bail!("seed must be a number or a list code like MONSOON42, got {token:?}");
    }
    let Some(seed) = decode_list_code(token) else {
        bail!("unknown list code {token:?}");
    };
    Ok(SeedInfo::from_list_code(seed, encode_list_code(seed)))
}
