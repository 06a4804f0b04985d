//! Header normalization
//!
//! Exports arrive with padded headers, headers broken over several lines and
//! an ambiguous pair of `Delta` columns. Headers are rewritten in place here;
//! they are never dropped or reordered.

use tracing::debug;

use super::schema::{DELTA, DELTA_CR, DELTA_CTR};

/// Clean a single header: trim and collapse newlines and whitespace runs into one space.
///
/// An absent header becomes the empty string ("unnamed column").
pub fn clean_header(header: Option<&str>) -> String {
    match header {
        None => String::new(),
        Some(h) => h.split_whitespace().collect::<Vec<_>>().join(" "),
    }
}

/// Clean every header, keeping order and length
pub fn clean_headers<S: AsRef<str>>(headers: &[Option<S>]) -> Vec<String> {
    headers
        .iter()
        .map(|h| clean_header(h.as_ref().map(|s| s.as_ref())))
        .collect()
}

/// Rename literal `Delta` headers by position.
///
/// Two occurrences become `Delta (CR)` then `Delta (CTR)`; a single one is
/// taken to be the conversion-rate delta. Any other count is left alone.
pub fn disambiguate_delta(headers: &mut [String]) {
    let positions: Vec<usize> = headers
        .iter()
        .enumerate()
        .filter(|(_, h)| h.as_str() == DELTA)
        .map(|(i, _)| i)
        .collect();

    match positions.as_slice() {
        [cr, ctr] => {
            headers[*cr] = DELTA_CR.to_string();
            headers[*ctr] = DELTA_CTR.to_string();
        }
        [cr] => {
            headers[*cr] = DELTA_CR.to_string();
        }
        _ => {
            if !positions.is_empty() {
                debug!(count = positions.len(), "leaving Delta headers unchanged");
            }
        }
    }
}

/// Make names unique so they can live in one DataFrame.
///
/// The first occurrence keeps its name; repeats get `_duplicated_<k>` with k
/// counting from zero, the same suffix polars' CSV reader uses.
pub fn unique_frame_names(headers: &[String]) -> Vec<String> {
    let mut seen: Vec<&str> = Vec::with_capacity(headers.len());
    let mut out = Vec::with_capacity(headers.len());

    for header in headers {
        let repeats = seen.iter().filter(|s| **s == header.as_str()).count();
        seen.push(header.as_str());
        if repeats == 0 {
            out.push(header.clone());
            continue;
        }

        // a suffixed name may itself collide with a real header
        let mut k = repeats - 1;
        let mut candidate = format!("{}_duplicated_{}", header, k);
        while headers.contains(&candidate) || out.contains(&candidate) {
            k += 1;
            candidate = format!("{}_duplicated_{}", header, k);
        }
        out.push(candidate);
    }

    out
}
