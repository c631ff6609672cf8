use super::record::{EncodedLine, Pair, Record};
use thiserror::Error;

/// Why a record was refused before encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Measurement is required")]
    MissingMeasurement,
    #[error("At least one field is required")]
    NoFields,
}

impl ValidationError {
    /// Name of the form input the message belongs under.
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::MissingMeasurement => "measurement",
            ValidationError::NoFields => "fields",
        }
    }
}

/// Validates `record` and renders it as
/// `measurement[,k=v...] k=v[,k=v...]`.
///
/// Incomplete pairs are dropped. Keys, values and the measurement are
/// written verbatim: reserved characters are not escaped and no timestamp
/// is appended.
pub fn encode(record: &Record) -> Result<EncodedLine, ValidationError> {
    if record.measurement.trim().is_empty() {
        return Err(ValidationError::MissingMeasurement);
    }

    let fields = join_pairs(&record.fields);
    if fields.is_empty() {
        return Err(ValidationError::NoFields);
    }
    let tags = join_pairs(&record.tags);

    let mut line = String::with_capacity(record.measurement.len() + tags.len() + fields.len() + 2);
    line.push_str(&record.measurement);
    if !tags.is_empty() {
        line.push(',');
        line.push_str(&tags);
    }
    line.push(' ');
    line.push_str(&fields);

    Ok(EncodedLine::new(line))
}

fn join_pairs(pairs: &[Pair]) -> String {
    pairs
        .iter()
        .filter(|p| p.is_complete())
        .map(|p| format!("{}={}", p.key, p.value))
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_skips_incomplete() {
        let pairs = vec![Pair::new("a", "1"), Pair::new("", "2"), Pair::new("c", "3")];
        assert_eq!(join_pairs(&pairs), "a=1,c=3");
        assert_eq!(join_pairs(&[]), "");
    }
}
