use alloy::primitives::{B256, U256};
use serde::{Deserialize, Deserializer};
use serde_json::value::RawValue;

#[derive(Debug, Clone)]
pub struct ChainConfig {
    pub name: String,
    pub chain_id: u64,
    pub rpc_url: String,
    pub symbol: String,
}

/// One `{trait_type, value}` pair from the token metadata.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Attribute {
    pub trait_type: String,
    #[serde(deserialize_with = "string_or_number")]
    pub value: String,
}

/// Display projection of a ticket NFT as the contract serializes it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Ticket {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub attributes: Vec<Attribute>,
    #[serde(default, deserialize_with = "wei_amount")]
    pub price: U256,
}

impl Ticket {
    /// The seat this ticket admits to.
    ///
    /// The contract stores the seat as an attribute, conventionally the first one.
    pub fn seat_id(&self) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.trait_type.to_ascii_lowercase().contains("seat"))
            .or_else(|| self.attributes.first())
            .map(|a| a.value.as_str())
    }
}

/// A fetched record: either a well-formed ticket or the raw payload that failed to decode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Record {
    Valid(Ticket),
    Malformed { raw: String, reason: String },
}

impl Record {
    pub fn ticket(&self) -> Option<&Ticket> {
        match self {
            Record::Valid(ticket) => Some(ticket),
            Record::Malformed { .. } => None,
        }
    }
}

/// A ticket currently offered on the marketplace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing {
    pub seat_id: String,
    pub price: U256,
}

impl Listing {
    pub fn from_ticket(ticket: &Ticket) -> Option<Listing> {
        let seat_id = ticket.seat_id()?.to_string();
        Some(Listing {
            seat_id,
            price: ticket.price,
        })
    }
}

/// Confirmation that a write was included and did not revert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Receipt {
    pub tx_hash: B256,
    pub block_number: Option<u64>,
}

/// Write operations the client can submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxAction {
    Claim,
    Buy,
    List,
}

impl std::fmt::Display for TxAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TxAction::Claim => write!(f, "claim"),
            TxAction::Buy => write!(f, "buySeat"),
            TxAction::List => write!(f, "listSeatForSale"),
        }
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number, got {other}"
        ))),
    }
}

/// Prices arrive either as JSON numbers or as decimal / 0x-hex strings.
///
/// Numbers are read from their literal text so amounts above `u64::MAX` and
/// exponent forms such as `6e15` keep full precision.
fn wei_amount<'de, D>(deserializer: D) -> Result<U256, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Box::<RawValue>::deserialize(deserializer)?;
    let text = raw.get().trim();
    match text.as_bytes().first() {
        None => Err(serde::de::Error::custom("empty wei amount")),
        Some(b'"') => {
            let s: String = serde_json::from_str(text).map_err(serde::de::Error::custom)?;
            let s = s.trim();
            let parsed = match s.strip_prefix("0x") {
                Some(hex) => U256::from_str_radix(hex, 16),
                None => U256::from_str_radix(s, 10),
            };
            parsed.map_err(|e| serde::de::Error::custom(format!("invalid wei amount {s:?}: {e}")))
        }
        Some(b'-' | b'0'..=b'9') => integer_literal(text)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid wei amount {text}"))),
        _ if text == "null" => Ok(U256::ZERO),
        _ => Err(serde::de::Error::custom(format!("expected wei amount, got {text}"))),
    }
}

/// Exact integer value of a JSON number literal; `None` if it is negative,
/// has a non-zero fractional part or does not fit in 256 bits.
fn integer_literal(text: &str) -> Option<U256> {
    if text.starts_with('-') {
        return None;
    }
    let (mantissa, exponent) = match text.split_once(['e', 'E']) {
        Some((m, e)) => (m, e.strip_prefix('+').unwrap_or(e).parse::<i64>().ok()?),
        None => (text, 0),
    };
    let (whole, frac) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    let mut digits = format!("{whole}{frac}");
    if digits.bytes().all(|b| b == b'0') {
        return Some(U256::ZERO);
    }
    let shift = exponent.checked_sub(i64::try_from(frac.len()).ok()?)?;
    if shift < 0 {
        let cut = digits.len().checked_sub(usize::try_from(shift.unsigned_abs()).ok()?)?;
        if !digits[cut..].bytes().all(|b| b == b'0') {
            return None;
        }
        digits.truncate(cut);
    } else {
        // U256::MAX has 78 digits
        if shift > 78 {
            return None;
        }
        digits.push_str(&"0".repeat(shift as usize));
    }
    U256::from_str_radix(&digits, 10).ok()
}
