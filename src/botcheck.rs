use alloy::primitives::keccak256;

/// Characters used in challenge codes; no 0/O or 1/I lookalikes.
const CODE_ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";
const CODE_LEN: usize = 6;

/// Opaque proof that the human-interaction challenge was passed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotCheckToken(String);

impl BotCheckToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Challenge {
    pub code: String,
    issued_at: u64,
}

/// Typed-code human check keyed by the configured site key.
///
/// Without a site key the check is unavailable and never issues a token.
#[derive(Debug, Clone)]
pub struct BotCheck {
    site_key: Option<String>,
}

impl BotCheck {
    pub fn new(site_key: Option<String>) -> Self {
        let site_key = site_key.filter(|k| !k.trim().is_empty());
        if site_key.is_none() {
            tracing::warn!("no bot-check site key configured; seat submission is disabled");
        }
        Self { site_key }
    }

    pub fn is_available(&self) -> bool {
        self.site_key.is_some()
    }

    /// Issue a fresh challenge. `issued_at` is any monotonically varying value
    /// (the caller passes Unix nanoseconds).
    pub fn challenge(&self, issued_at: u64) -> Option<Challenge> {
        let site_key = self.site_key.as_ref()?;
        let digest = keccak256([site_key.as_bytes(), &issued_at.to_be_bytes()].concat());
        let code = digest
            .iter()
            .take(CODE_LEN)
            .map(|b| CODE_ALPHABET[*b as usize % CODE_ALPHABET.len()] as char)
            .collect();
        Some(Challenge { code, issued_at })
    }

    pub fn verify(&self, challenge: &Challenge, answer: &str) -> Option<BotCheckToken> {
        let site_key = self.site_key.as_ref()?;
        if !answer.trim().eq_ignore_ascii_case(&challenge.code) {
            return None;
        }
        let digest = keccak256(
            [
                site_key.as_bytes(),
                challenge.code.as_bytes(),
                &challenge.issued_at.to_be_bytes(),
            ]
            .concat(),
        );
        Some(BotCheckToken(format!("{digest}")))
    }
}
