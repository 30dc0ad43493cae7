use std::collections::HashSet;

use crate::model;

/// Reads a JSON array of host query objects. Each object becomes one query:
/// its `refId` is the reference id and the whole object is the payload.
/// Queries without a `refId` get the first positional id no other query uses.
pub fn parse_queries(
    input: &str,
) -> Result<model::query::QueryDataRequest, model::error::QueryInputError> {
    let values: Vec<serde_json::Value> = serde_json::from_str(input)?;

    let explicit: Vec<Option<String>> = values
        .iter()
        .map(|value| {
            value
                .get("refId")
                .and_then(|ref_id| ref_id.as_str())
                .map(|ref_id| ref_id.to_string())
        })
        .collect();

    let mut taken = HashSet::new();
    for ref_id in explicit.iter().flatten() {
        if !taken.insert(ref_id.clone()) {
            return Err(model::error::QueryInputError::DuplicateRefId(ref_id.clone()));
        }
    }

    let mut next_idx = 0;
    let mut queries = Vec::with_capacity(values.len());
    for (value, ref_id) in values.iter().zip(explicit) {
        let ref_id = match ref_id {
            Some(ref_id) => ref_id,
            None => loop {
                let candidate = default_ref_id(next_idx);
                next_idx += 1;
                if taken.insert(candidate.clone()) {
                    break candidate;
                }
            },
        };

        queries.push(model::query::DataQuery {
            ref_id,
            json: value.to_string().into_bytes(),
        });
    }

    Ok(model::query::QueryDataRequest { queries })
}

/// `A`, `B`, ... `Z`, then `A26`, `A27`, ...
pub fn default_ref_id(idx: usize) -> String {
    match u8::try_from(idx) {
        Ok(n) if n < 26 => char::from(b'A' + n).to_string(),
        _ => format!("A{}", idx),
    }
}
