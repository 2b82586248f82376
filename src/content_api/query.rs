//! GraphQL document construction for the `site` lookup.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

/// A GraphQL document, sent verbatim to the content API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct GraphqlDocument(String);

impl GraphqlDocument {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Document text with line breaks and indentation runs removed.
    pub fn normalized(&self) -> String {
        normalize(&self.0)
    }
}

impl fmt::Display for GraphqlDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for GraphqlDocument {
    fn from(text: String) -> Self {
        Self(text)
    }
}

const DATA_CONTENT_FRAGMENT: &str = r#"
            data {
                node {
                    id
                }
                content {
                    __typename
                    ...on Story {
                        id,
                        title
                    }
                    ...on SiteNode {
                        id,
                        slug,
                        category {
                          id
                        }
                    }
                    ...on Topic {
                        id,
                        name
                    }
                    ...on Source{
                        id,
                        name
                    }
                    ...on Author{
                        id,
                        name
                    }
                    ...on CustomAction{
                        id,
                        action
                    }
                }
            }"#;

/// Default `data` selection: node id plus the polymorphic `content` union.
///
/// Callers compare the normalized text of this fragment; keep it stable.
pub fn default_data_content_fragment() -> &'static str {
    DATA_CONTENT_FRAGMENT
}

/// Build the `site` lookup for `url` and `variant_id`, selecting status code,
/// redirect location and `data_content`. Values are interpolated literally.
pub fn build_default_query(url: &str, variant_id: &str, data_content: &str) -> GraphqlDocument {
    GraphqlDocument(format!(
        r#"
            query {{
                site (url: "{url}", variantId: "{variant_id}") {{
                    statusCode,
                    headers {{
                        location
                    }}
                    {data_content}
                }}
            }}
        "#
    ))
}

static LINE_BREAKS_AND_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\r\n|\n|\r|\s{2,}").expect("LINE_BREAKS_AND_RUNS regex pattern is valid"));

/// Strip line breaks and runs of two or more whitespace characters. Single
/// spaces between tokens survive.
pub fn normalize(text: &str) -> String {
    LINE_BREAKS_AND_RUNS.replace_all(text, "").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXPECTED_FRAGMENT: &str = "
data {
    node {
        id
    }
    content {
        __typename
        ...on Story {
            id,
            title
        }
        ...on SiteNode {
            id,
            slug,
            category {
              id
            }
        }
        ...on Topic {
            id,
            name
        }
        ...on Source{
            id,
            name
        }
        ...on Author{
            id,
            name
        }
        ...on CustomAction{
            id,
            action
        }
    }
}";

    #[test]
    fn test_fragment_is_stable() {
        assert_eq!(
            normalize(default_data_content_fragment()),
            normalize(EXPECTED_FRAGMENT)
        );
    }

    #[test]
    fn test_build_default_query() {
        let doc = build_default_query(
            "https://demo-ring.com/galeries/id-esse-ex-2XX/3j25nh5",
            "ALL_FEATURES_BACKUP",
            default_data_content_fragment(),
        );
        let text = doc.normalized();

        assert!(text.starts_with("query {site (url: \"https://demo-ring.com/galeries/id-esse-ex-2XX/3j25nh5\", variantId: \"ALL_FEATURES_BACKUP\") {"));
        assert!(text.contains("statusCode,headers {location}"));
        assert!(text.contains(&normalize(default_data_content_fragment())));
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("  a {\n    b c\n}  "), "a {b c}");
        assert_eq!(normalize("a \n b\r\nc\td"), "abc\td");
        assert_eq!(normalize("id,\r\n\t\ttitle"), "id,title");
    }
}
