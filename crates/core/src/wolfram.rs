use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Title of the pod carrying the service's concise computed answer.
pub const RESULT_POD_TITLE: &str = "Result";

/// Wolfram|Alpha `queryresult` document from the v2 query API.
///
/// Only the fields the pipeline consumes are modeled; unknown attributes
/// and elements in the payload are ignored.
#[derive(Debug, Deserialize, Clone)]
pub struct QueryResult {
    #[serde(rename = "@success", default)]
    pub success: bool,
    #[serde(rename = "pod", default)]
    pub pods: Vec<Pod>,
}

/// A `pod` element: one named group of answers.
#[derive(Debug, Deserialize, Clone)]
pub struct Pod {
    #[serde(rename = "@title", default)]
    pub title: String,
    #[serde(rename = "subpod", default)]
    pub subpods: Vec<SubPod>,
}

/// A `subpod` element with its `plaintext` payload.
#[derive(Debug, Deserialize, Clone)]
pub struct SubPod {
    #[serde(rename = "plaintext", default)]
    pub plaintext: Option<String>,
}

/// Decoded query result: the success flag plus the sections in document
/// order. Order is load-bearing: fallback answer selection scans it.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct QueryOutput {
    pub success: bool,
    pub sections: Vec<Section>,
}

/// A named group of plain-text answer fragments. A section may have zero
/// fragments, and a fragment may be empty.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct Section {
    pub title: String,
    pub fragments: Vec<String>,
}

/// Build the query endpoint URL with the user input and credential as
/// percent-encoded query parameters.
///
/// An empty input still produces a syntactically valid URL; rejecting
/// empty queries is the caller's concern.
pub fn query_url(base_url: &str, input: &str, app_id: &str) -> String {
    format!(
        "{}?input={}&appid={}",
        base_url,
        urlencoding::encode(input),
        urlencoding::encode(app_id)
    )
}

/// Decode a raw API payload into a [`QueryOutput`].
///
/// Tolerates a missing `success` attribute (treated as `false`), pods
/// without subpods, and a document with no pods at all. Any
/// well-formedness violation is an [`Error::Decode`]; malformed input
/// never comes back as a successful result.
pub fn decode_response(raw: &str) -> Result<QueryOutput, Error> {
    let result: QueryResult =
        quick_xml::de::from_str(raw).map_err(|e| Error::Decode(e.to_string()))?;

    Ok(transform_query_result(result))
}

/// Flatten the wire structs into sections, preserving document order.
///
/// A subpod with no `plaintext` element still counts as a fragment (an
/// empty one), matching how the service represents image-only subpods.
pub fn transform_query_result(result: QueryResult) -> QueryOutput {
    let sections = result
        .pods
        .into_iter()
        .map(|pod| Section {
            title: pod.title,
            fragments: pod
                .subpods
                .into_iter()
                .map(|subpod| subpod.plaintext.unwrap_or_default())
                .collect(),
        })
        .collect();

    QueryOutput {
        success: result.success,
        sections,
    }
}

/// Pick the single best-fit answer from a decoded result.
///
/// Two passes over the sections in document order: first the section
/// titled [`RESULT_POD_TITLE`] with at least one fragment, then any
/// section whose first fragment is non-empty. `None` means the service
/// had no answer for the query.
pub fn select_answer(output: &QueryOutput) -> Option<String> {
    if !output.success {
        return None;
    }

    for section in &output.sections {
        if section.title == RESULT_POD_TITLE {
            if let Some(fragment) = section.fragments.first() {
                return Some(fragment.clone());
            }
        }
    }

    for section in &output.sections {
        match section.fragments.first() {
            Some(fragment) if !fragment.is_empty() => return Some(fragment.clone()),
            _ => {}
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE_URL: &str = "https://api.wolframalpha.com/v2/query";

    fn section(title: &str, fragments: &[&str]) -> Section {
        Section {
            title: title.to_string(),
            fragments: fragments.iter().map(|f| f.to_string()).collect(),
        }
    }

    #[test]
    fn test_query_url_percent_encodes_input() {
        let url = query_url(BASE_URL, "2 + 2", "DEMO-KEY");
        assert_eq!(
            url,
            "https://api.wolframalpha.com/v2/query?input=2%20%2B%202&appid=DEMO-KEY"
        );
    }

    #[test]
    fn test_query_url_round_trips_input() {
        let input = "speed of light in mph?";
        let url = query_url(BASE_URL, input, "DEMO-KEY");
        let encoded = url
            .split("input=")
            .nth(1)
            .and_then(|rest| rest.split('&').next())
            .unwrap();
        assert_eq!(urlencoding::decode(encoded).unwrap(), input);
    }

    #[test]
    fn test_query_url_empty_input() {
        let url = query_url(BASE_URL, "", "DEMO-KEY");
        assert_eq!(
            url,
            "https://api.wolframalpha.com/v2/query?input=&appid=DEMO-KEY"
        );
    }

    #[test]
    fn test_decode_result_pod() {
        let raw = r#"<?xml version="1.0"?>
<queryresult success="true">
  <pod title="Result">
    <subpod>
      <plaintext>42</plaintext>
    </subpod>
  </pod>
</queryresult>"#;

        let output = decode_response(raw).unwrap();
        assert!(output.success);
        assert_eq!(output.sections, vec![section("Result", &["42"])]);
        assert_eq!(select_answer(&output), Some("42".to_string()));
    }

    #[test]
    fn test_decode_preserves_section_order() {
        let raw = r#"<queryresult success="true">
  <pod title="Input interpretation">
    <subpod>
      <plaintext>2 + 2</plaintext>
    </subpod>
  </pod>
  <pod title="Result">
    <subpod>
      <plaintext>4</plaintext>
    </subpod>
  </pod>
</queryresult>"#;

        let output = decode_response(raw).unwrap();
        assert_eq!(output.sections.len(), 2);
        assert_eq!(output.sections[0].title, "Input interpretation");
        assert_eq!(output.sections[1].title, "Result");
    }

    #[test]
    fn test_decode_missing_success_defaults_to_false() {
        let raw = r#"<queryresult><pod title="Result"><subpod><plaintext>4</plaintext></subpod></pod></queryresult>"#;

        let output = decode_response(raw).unwrap();
        assert!(!output.success);
    }

    #[test]
    fn test_decode_empty_document() {
        let output = decode_response(r#"<queryresult success="true"></queryresult>"#).unwrap();
        assert!(output.success);
        assert!(output.sections.is_empty());
    }

    #[test]
    fn test_decode_pod_without_subpods() {
        let raw = r#"<queryresult success="true"><pod title="Result"></pod></queryresult>"#;

        let output = decode_response(raw).unwrap();
        assert_eq!(output.sections, vec![section("Result", &[])]);
    }

    #[test]
    fn test_decode_unterminated_markup() {
        let raw = r#"<queryresult success="true"><pod title="Result">"#;

        let err = decode_response(raw).unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
    }

    #[test]
    fn test_decode_garbage_input() {
        assert!(matches!(
            decode_response("not xml at all"),
            Err(Error::Decode(_))
        ));
    }

    #[test]
    fn test_select_prefers_result_section() {
        let output = QueryOutput {
            success: true,
            sections: vec![
                section("Input interpretation", &["2 + 2"]),
                section("Result", &["4"]),
            ],
        };

        assert_eq!(select_answer(&output), Some("4".to_string()));
    }

    #[test]
    fn test_select_falls_back_in_document_order() {
        let output = QueryOutput {
            success: true,
            sections: vec![
                section("Input", &["x is 5"]),
                section("Plot", &["y = x^2"]),
            ],
        };

        assert_eq!(select_answer(&output), Some("x is 5".to_string()));
    }

    #[test]
    fn test_select_fallback_skips_empty_first_fragment() {
        let output = QueryOutput {
            success: true,
            sections: vec![
                section("Plot", &[""]),
                section("Input interpretation", &["x = 3"]),
            ],
        };

        assert_eq!(select_answer(&output), Some("x = 3".to_string()));
    }

    #[test]
    fn test_select_unsuccessful_result() {
        let output = QueryOutput {
            success: false,
            sections: vec![section("Result", &["4"])],
        };

        assert_eq!(select_answer(&output), None);
    }

    #[test]
    fn test_select_no_fragments_anywhere() {
        let output = QueryOutput {
            success: true,
            sections: vec![section("Result", &[]), section("Plot", &[])],
        };

        assert_eq!(select_answer(&output), None);
    }

    #[test]
    fn test_select_is_idempotent() {
        let output = QueryOutput {
            success: true,
            sections: vec![section("Result", &["42"])],
        };

        let first = select_answer(&output);
        let second = select_answer(&output);
        assert_eq!(first, second);
    }

    #[test]
    fn test_decode_then_select_fallback_path() {
        let raw = r#"<queryresult success="true">
  <pod title="Input">
    <subpod>
      <plaintext>x is 5</plaintext>
    </subpod>
  </pod>
</queryresult>"#;

        let output = decode_response(raw).unwrap();
        assert_eq!(select_answer(&output), Some("x is 5".to_string()));
    }

    #[test]
    fn test_decode_then_select_unsuccessful() {
        let raw = r#"<queryresult success="false">
  <pod title="Result">
    <subpod>
      <plaintext>ignored</plaintext>
    </subpod>
  </pod>
</queryresult>"#;

        let output = decode_response(raw).unwrap();
        assert_eq!(select_answer(&output), None);
    }
}
