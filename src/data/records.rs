use crate::data::types::{Listing, Record, Ticket};

/// Decode one serialized record returned by the contract.
pub fn decode(raw: &str) -> Record {
    match serde_json::from_str::<Ticket>(raw) {
        Ok(ticket) => Record::Valid(ticket),
        Err(e) => Record::Malformed {
            raw: raw.to_string(),
            reason: e.to_string(),
        },
    }
}

/// Decode every record independently; a bad record does not hide the good ones.
pub fn decode_all(raw: Vec<String>) -> Vec<Record> {
    let records: Vec<Record> = raw.iter().map(|r| decode(r)).collect();
    let malformed = records
        .iter()
        .filter(|r| matches!(r, Record::Malformed { .. }))
        .count();
    if malformed > 0 {
        tracing::warn!(malformed, total = records.len(), "contract returned malformed records");
    }
    records
}

/// Marketplace projection of the valid records that carry a seat id.
pub fn listings(records: &[Record]) -> Vec<Listing> {
    records
        .iter()
        .filter_map(Record::ticket)
        .filter_map(Listing::from_ticket)
        .collect()
}
