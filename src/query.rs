use std::fmt;

/// Query parameter the picker publishes the stay duration under.
pub(crate) const DURATION_PARAM: &str = "Duration";

/// Wire format of the published duration, e.g. `3Day`.
pub(crate) fn duration_value(nights: i64) -> String {
    format!("{nights}Day")
}

/// The page URL's query string as an ordered list of key/value pairs.
///
/// Parameters the picker does not own (variant options, tracking noise) are
/// passed through untouched and keep their positions; `set` replaces a value
/// in place.  No percent-decoding is performed: the only value owned by this
/// component matches `[0-9]+Day`.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct SearchParams(Vec<(String, String)>);

impl SearchParams {
    pub(crate) fn new() -> SearchParams {
        SearchParams::default()
    }

    pub(crate) fn parse(s: &str) -> SearchParams {
        let s = s.strip_prefix('?').unwrap_or(s);
        SearchParams(
            s.split('&')
                .filter(|pair| !pair.is_empty())
                .map(|pair| match pair.split_once('=') {
                    Some((k, v)) => (k.to_owned(), v.to_owned()),
                    None => (pair.to_owned(), String::new()),
                })
                .collect(),
        )
    }

    pub(crate) fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub(crate) fn set(&mut self, key: &str, value: String) {
        match self.0.iter_mut().find(|(k, _)| k == key) {
            Some((_, v)) => *v = value,
            None => self.0.push((key.to_owned(), value)),
        }
    }
}

impl fmt::Display for SearchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (k, v) in &self.0 {
            if !std::mem::replace(&mut first, false) {
                write!(f, "&")?;
            }
            write!(f, "{k}={v}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration_value() {
        assert_eq!(duration_value(1), "1Day");
        assert_eq!(duration_value(3), "3Day");
    }

    #[test]
    fn test_parse_and_display_round_trip() {
        let params = SearchParams::parse("Size=Large&Duration=1Day");
        assert_eq!(params.get("Size"), Some("Large"));
        assert_eq!(params.get("Duration"), Some("1Day"));
        assert_eq!(params.to_string(), "Size=Large&Duration=1Day");
    }

    #[test]
    fn test_parse_strips_leading_question_mark() {
        let params = SearchParams::parse("?Size=Large");
        assert_eq!(params.get("Size"), Some("Large"));
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(SearchParams::parse(""), SearchParams::new());
        assert_eq!(SearchParams::parse("?"), SearchParams::new());
    }

    #[test]
    fn test_set_replaces_in_place() {
        let mut params = SearchParams::parse("Size=Large&Duration=1Day&fbclid=xyz");
        params.set(DURATION_PARAM, duration_value(3));
        assert_eq!(params.to_string(), "Size=Large&Duration=3Day&fbclid=xyz");
    }

    #[test]
    fn test_set_appends_when_missing() {
        let mut params = SearchParams::parse("Size=Large");
        params.set(DURATION_PARAM, duration_value(1));
        assert_eq!(params.to_string(), "Size=Large&Duration=1Day");
    }

    #[test]
    fn test_valueless_parameter() {
        let params = SearchParams::parse("flag&Size=Large");
        assert_eq!(params.get("flag"), Some(""));
        assert_eq!(params.to_string(), "flag=&Size=Large");
    }
}
