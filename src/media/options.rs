//! Transport options: `key=value` pairs handed to the media backend.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use super::MediaError;

/// Transport parameters such as `rtsp_transport=tcp`.
///
/// Parsed from pairs separated by `:` or whitespace. Keys are kept sorted so
/// the textual form is stable; a repeated key keeps its last value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransportOptions {
    entries: BTreeMap<String, String>,
}

impl TransportOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse an option string. The empty string yields no options.
    pub fn parse(input: &str) -> Result<Self, MediaError> {
        let mut options = Self::new();
        for pair in input
            .split(|c: char| c == ':' || c.is_whitespace())
            .filter(|p| !p.is_empty())
        {
            let (key, value) = pair
                .split_once('=')
                .filter(|(key, _)| !key.is_empty())
                .ok_or_else(|| MediaError::InvalidOption(pair.to_owned()))?;
            options.insert(key, value);
        }
        Ok(options)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.entries.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromStr for TransportOptions {
    type Err = MediaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for TransportOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (key, value)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(":")?;
            }
            write!(f, "{key}={value}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_single_pair() {
        let opts = TransportOptions::parse("rtsp_transport=tcp").unwrap();
        assert_eq!(opts.get("rtsp_transport"), Some("tcp"));
        assert_eq!(opts.len(), 1);
    }

    #[test]
    fn accepts_colon_and_whitespace_separators() {
        let opts = TransportOptions::parse("a=1:b=2  c=3\td=").unwrap();
        let pairs: Vec<(&str, &str)> = opts.iter().collect();
        assert_eq!(pairs, vec![("a", "1"), ("b", "2"), ("c", "3"), ("d", "")]);
    }

    #[test]
    fn empty_input_is_empty() {
        assert!(TransportOptions::parse("").unwrap().is_empty());
        assert!(TransportOptions::parse(" : ").unwrap().is_empty());
    }

    #[test]
    fn last_value_wins() {
        let opts: TransportOptions = "k=1 k=2".parse().unwrap();
        assert_eq!(opts.get("k"), Some("2"));
    }

    #[test]
    fn rejects_pairs_without_key() {
        assert_eq!(
            TransportOptions::parse("novalue"),
            Err(MediaError::InvalidOption("novalue".into()))
        );
        assert_eq!(
            TransportOptions::parse("=x"),
            Err(MediaError::InvalidOption("=x".into()))
        );
    }

    #[test]
    fn displays_sorted_pairs() {
        let opts = TransportOptions::parse("z=1 a=2").unwrap();
        assert_eq!(opts.to_string(), "a=2:z=1");
    }
}
