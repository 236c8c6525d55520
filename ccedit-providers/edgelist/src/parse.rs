//! Line-level parsing of edge-list records.

use crate::errors::EdgeListError;

/// One `source,target,weight` record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct EdgeRecord {
    pub(crate) source: u64,
    pub(crate) target: u64,
    pub(crate) weight: f64,
}

/// Parses line `line` (1-based) of the input.
///
/// Returns `Ok(None)` for comments and blank lines.
pub(crate) fn parse_line(line: usize, raw: &str) -> Result<Option<EdgeRecord>, EdgeListError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }

    let fields: Vec<&str> = if trimmed.contains(',') {
        trimmed.split(',').map(str::trim).collect()
    } else {
        trimmed.split_whitespace().collect()
    };
    let [source, target, weight] = fields.as_slice() else {
        return Err(EdgeListError::MalformedLine {
            line,
            content: raw.to_owned(),
        });
    };

    Ok(Some(EdgeRecord {
        source: parse_vertex(line, source)?,
        target: parse_vertex(line, target)?,
        weight: weight
            .parse()
            .map_err(|_| EdgeListError::InvalidWeight {
                line,
                field: (*weight).to_owned(),
            })?,
    }))
}

fn parse_vertex(line: usize, field: &str) -> Result<u64, EdgeListError> {
    field.parse().map_err(|_| EdgeListError::InvalidVertex {
        line,
        field: field.to_owned(),
    })
}
