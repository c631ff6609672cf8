/// Fixed options offered next to an input. The input still accepts any text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestions {
    options: Vec<String>,
}

impl Suggestions {
    pub fn new<I, S>(options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { options: options.into_iter().map(Into::into).collect() }
    }

    pub fn measurements() -> Self {
        Self::new(["temp", "humidity", "pressure"])
    }

    pub fn tag_keys() -> Self {
        Self::new(["loc", "room"])
    }

    pub fn field_keys() -> Self {
        Self::new(["value", "count"])
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// `#N` picks the N-th option (1-based); anything else is free text.
    /// An out-of-range `#N` is also taken as free text.
    pub fn resolve(&self, input: &str) -> String {
        input
            .strip_prefix('#')
            .and_then(|n| n.parse::<usize>().ok())
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| self.options.get(i))
            .cloned()
            .unwrap_or_else(|| input.to_string())
    }

    pub fn matching<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.options
            .iter()
            .map(String::as_str)
            .filter(move |o| o.starts_with(prefix))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_picks_or_passes_through() {
        let s = Suggestions::measurements();
        assert_eq!(s.resolve("#1"), "temp");
        assert_eq!(s.resolve("#3"), "pressure");
        assert_eq!(s.resolve("#0"), "#0");
        assert_eq!(s.resolve("#9"), "#9");
        assert_eq!(s.resolve("wind"), "wind");
    }

    #[test]
    fn matching_filters_by_prefix() {
        let s = Suggestions::new(["temp", "tide", "humidity"]);
        assert_eq!(s.matching("t").collect::<Vec<_>>(), vec!["temp", "tide"]);
        assert_eq!(s.matching("").count(), 3);
    }
}
