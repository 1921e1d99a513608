//! Line-oriented serving-request parser.
//!
//! A request list is a sequence of three-line groups: an FDC identifier, a
//! serving size in grams, and a free-form serving description. Blank lines
//! and `#` comments are ignored anywhere. A malformed or truncated group
//! aborts the whole read; order/count integrity cannot be guaranteed past a
//! bad entry, so no partial result is ever returned.

use crate::foundation::error::{NutrigraphError, NutrigraphResult};

/// One parsed request triple, in input order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServingRequest {
    /// FDC identifier of the food item.
    pub identifier: i64,
    /// Serving size in grams.
    pub serving_grams: i64,
    /// Verbatim serving description, e.g. "2 slices (56g)".
    pub description: String,
}

/// Parse a whole request source into ordered triples.
pub fn parse_requests(source: &str) -> NutrigraphResult<Vec<ServingRequest>> {
    let lines: Vec<&str> = source.lines().collect();
    let mut requests = Vec::new();
    let mut cursor = 0usize;

    while let Some((request, next)) = parse_triple(&lines, cursor)? {
        requests.push(request);
        cursor = next;
    }

    Ok(requests)
}

/// Parse one triple starting at `cursor`, returning the triple and the new
/// cursor, or `None` when the input is cleanly exhausted.
///
/// The line slice is never mutated; the cursor is the only state.
fn parse_triple(
    lines: &[&str],
    cursor: usize,
) -> NutrigraphResult<Option<(ServingRequest, usize)>> {
    let Some(id_at) = next_content_line(lines, cursor) else {
        return Ok(None);
    };
    let identifier = parse_int(lines, id_at, "an FDC ID")?;

    let grams_at = next_content_line(lines, id_at + 1).ok_or_else(|| {
        NutrigraphError::unexpected_eof("request list ended before the serving size")
    })?;
    let serving_grams = parse_int(lines, grams_at, "a serving size")?;

    let desc_at = next_content_line(lines, grams_at + 1).ok_or_else(|| {
        NutrigraphError::unexpected_eof("request list ended before the serving description")
    })?;
    let description = lines[desc_at].to_owned();

    Ok(Some((
        ServingRequest {
            identifier,
            serving_grams,
            description,
        },
        desc_at + 1,
    )))
}

/// Index of the next line that is not blank, whitespace-only, or a comment.
fn next_content_line(lines: &[&str], from: usize) -> Option<usize> {
    lines[from.min(lines.len())..]
        .iter()
        .position(|line| {
            let trimmed = line.trim();
            !trimmed.is_empty() && !trimmed.starts_with('#')
        })
        .map(|offset| from + offset)
}

fn parse_int(lines: &[&str], at: usize, expected: &str) -> NutrigraphResult<i64> {
    lines[at].trim().parse::<i64>().map_err(|_| {
        NutrigraphError::request_parse(format!(
            "line {}: expected {expected} (integer), got \"{}\"",
            at + 1,
            lines[at]
        ))
    })
}
