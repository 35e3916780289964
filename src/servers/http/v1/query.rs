//! The `Query` struct used to split and store the URL query parameters.
//!
//! ```text
//! URI = scheme ":" ["//" authority] path ["?" query] ["#" fragment]
//! ```
//!
//! Splitting never fails. Segments that are not a well formed `name=value`
//! pair are dropped:
//!
//! - segments without `=`, like `bad` in `a=1&bad`,
//! - segments with an empty name or an empty value (`=1`, `a=`),
//! - segments whose name is not valid percent encoded UTF-8.
//!
//! Names are percent decoded. Values are kept as they came in the URL, because
//! some of them (`info_hash`) are binary and have to be decoded with
//! [`percent_decode`](crate::servers::http::percent_encoding::percent_decode).
use multimap::MultiMap;
use percent_encoding::percent_decode_str;

type ParamName = String;
type ParamValue = String;

/// It represents a URL query component.
#[derive(Debug, Default)]
pub struct Query {
    params: MultiMap<ParamName, ParamValue>,
}

impl Query {
    /// It returns `Some(value)` for a URL query param if the param with the
    /// input `name` exists. For example:
    ///
    /// ```rust
    /// use swarm_tracker::servers::http::v1::query::Query;
    ///
    /// let query = Query::from("param1=value1&param2=value2");
    ///
    /// assert_eq!(query.get_param("param1").unwrap(), "value1");
    /// assert_eq!(query.get_param("param2").unwrap(), "value2");
    /// ```
    ///
    /// When the param is repeated the last value wins:
    ///
    /// ```rust
    /// use swarm_tracker::servers::http::v1::query::Query;
    ///
    /// let query = Query::from("param1=value1&param1=value2");
    ///
    /// assert_eq!(query.get_param("param1").unwrap(), "value2");
    /// ```
    #[must_use]
    pub fn get_param(&self, name: &str) -> Option<&str> {
        self.params.get_vec(name).and_then(|values| values.last()).map(String::as_str)
    }

    /// Returns all the param values in the order they were received.
    #[must_use]
    pub fn get_param_vec(&self, name: &str) -> Option<Vec<String>> {
        self.params.get_vec(name).cloned()
    }

    /// Number of distinct param names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.params.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}

impl From<&str> for Query {
    fn from(raw_query: &str) -> Self {
        let mut params: MultiMap<ParamName, ParamValue> = MultiMap::new();

        for raw_param in raw_query.trim().trim_start_matches('?').split('&') {
            let Some((raw_name, value)) = raw_param.split_once('=') else {
                continue;
            };

            if raw_name.is_empty() || value.is_empty() {
                continue;
            }

            let Ok(name) = percent_decode_str(raw_name).decode_utf8() else {
                continue;
            };

            params.insert(name.into_owned(), value.to_owned());
        }

        Self { params }
    }
}

impl From<Vec<(&str, &str)>> for Query {
    fn from(raw_params: Vec<(&str, &str)>) -> Self {
        let mut params: MultiMap<ParamName, ParamValue> = MultiMap::new();

        for (name, value) in raw_params {
            params.insert(name.to_owned(), value.to_owned());
        }

        Self { params }
    }
}
