use crate::error::{NameGenError, Result};

/// Parses a weight specification such as `"cv:2, cvc, vc:2"`.
///
/// - Entries are separated by `,` and have the form `key` or `key:weight`
/// - A missing weight counts as `1`
/// - Repeated keys accumulate their weights
/// - Surrounding whitespace is ignored everywhere
///
/// The result keeps the order in which keys first appear. Negative weights are
/// returned as-is; clamping happens when they are added to a `WeightedSet`.
///
/// # Errors
/// Returns `NameGenError::Parse` for an empty key, more than one colon in an
/// entry, or a weight that is not a finite number.
pub fn parse_weights(spec: &str) -> Result<Vec<(String, f64)>> {
	let mut weights: Vec<(String, f64)> = Vec::new();

	for entry in spec.trim().split(',') {
		let entry = entry.trim();
		let mut parts = entry.split(':');
		// split always yields at least one item
		let key = parts.next().unwrap_or_default().trim();
		let weight = match (parts.next(), parts.next()) {
			(None, _) => 1.0,
			(Some(raw), None) => parse_weight(raw.trim())?,
			(Some(_), Some(_)) => {
				return Err(NameGenError::Parse(format!("too many colons in {entry:?}")));
			}
		};

		if key.is_empty() {
			return Err(NameGenError::Parse(format!("empty key in {spec:?}")));
		}

		match weights.iter_mut().find(|(k, _)| k == key) {
			Some((_, w)) => *w += weight,
			None => weights.push((key.to_owned(), weight)),
		}
	}

	Ok(weights)
}

fn parse_weight(raw: &str) -> Result<f64> {
	let weight: f64 = raw
		.parse()
		.map_err(|e| NameGenError::Parse(format!("error parsing {raw:?}: {e}")))?;
	if !weight.is_finite() {
		return Err(NameGenError::Parse(format!("weight {raw:?} is not finite")));
	}
	Ok(weight)
}

/// Upper-cases the first character of every whitespace-separated word.
///
/// Whitespace is preserved as-is.
pub fn title_case(s: &str) -> String {
	let mut out = String::with_capacity(s.len());
	let mut at_word_start = true;
	for c in s.chars() {
		if c.is_whitespace() {
			at_word_start = true;
			out.push(c);
		} else if at_word_start {
			at_word_start = false;
			out.extend(c.to_uppercase());
		} else {
			out.push(c);
		}
	}
	out
}
