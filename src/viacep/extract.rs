use std::sync::LazyLock;
use regex::Regex;
use crate::viacep::model::{Field, LookupOutcome, LookupResult};

/// marker ViaCEP puts in the body when the code does not exist
const NOT_FOUND_MARKER: &str = r#""erro": true"#;

/// one pattern per field: `"key":` then optional whitespace then a quoted value.
///
/// The value stops at the first `"`, escaped quotes are not understood.
static FIELD_REGS: LazyLock<Vec<(Field, Regex)>> = LazyLock::new(|| {
    Field::ALL.iter()
        .map(|field| {
            let pattern = format!(r#""{}":\s*"(.*?)""#, regex::escape(field.key()));
            (*field, Regex::new(&pattern).unwrap())
        })
        .collect()
});

pub fn is_not_found(body: &str) -> bool {
    body.contains(NOT_FOUND_MARKER)
}

/// value of the first `"key": "value"` occurrence, or an empty string
pub fn extract_field(body: &str, field: Field) -> String {
    FIELD_REGS.iter()
        .find(|(f, _)| *f == field)
        .and_then(|(_, reg)| reg.captures(body))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

impl LookupResult {
    pub fn from_body(body: &str) -> Self {
        Field::ALL.iter()
            .map(|field| (*field, extract_field(body, *field)))
            .collect()
    }
}

/// decide the outcome of a response body that was read successfully
pub fn classify(body: &str) -> LookupOutcome {
    if is_not_found(body) {
        LookupOutcome::NotFound
    } else {
        LookupOutcome::Found(LookupResult::from_body(body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SE_BODY: &str = r#"{"cep": "01001-000", "logradouro": "Praça da Sé", "bairro": "Sé", "localidade": "São Paulo", "uf": "SP"}"#;

    fn found(body: &str) -> LookupResult {
        match classify(body) {
            LookupOutcome::Found(result) => result,
            other => panic!("expected Found, got {:?}", other),
        }
    }

    #[test]
    fn extracts_present_fields_and_blanks_the_rest() {
        let result = found(SE_BODY);
        assert_eq!(result.get(Field::Cep), "01001-000");
        assert_eq!(result.get(Field::Logradouro), "Praça da Sé");
        assert_eq!(result.get(Field::Bairro), "Sé");
        assert_eq!(result.get(Field::Localidade), "São Paulo");
        assert_eq!(result.get(Field::Uf), "SP");

        let populated = [Field::Cep, Field::Logradouro, Field::Bairro, Field::Localidade, Field::Uf];
        assert_eq!(Field::ALL.iter().filter(|f| !populated.contains(f)).count(), 8);
        for field in Field::ALL.iter().filter(|f| !populated.contains(f)) {
            assert_eq!(result.get(*field), "", "field {:?}", field);
        }
    }

    #[test]
    fn erro_marker_means_not_found() {
        assert!(matches!(classify(r#"{"erro": true}"#), LookupOutcome::NotFound));
        assert!(matches!(classify("{\n  \"erro\": true\n}"), LookupOutcome::NotFound));
        // the marker wins even if fields are present
        assert!(matches!(classify(r#"{"cep": "x", "erro": true}"#), LookupOutcome::NotFound));
    }

    #[test]
    fn only_the_exact_marker_counts() {
        assert!(!is_not_found(r#"{"erro":true}"#));
        assert!(!is_not_found(r#"{"erro": "true"}"#));
        assert!(!is_not_found(r#"{"erro": false}"#));
    }

    #[test]
    fn key_order_does_not_matter() {
        let reordered = r#"{"uf": "SP", "localidade": "São Paulo", "bairro": "Sé", "logradouro": "Praça da Sé", "cep": "01001-000"}"#;
        assert_eq!(found(SE_BODY), found(reordered));
    }

    #[test]
    fn whitespace_after_colon_is_optional() {
        assert_eq!(extract_field(r#"{"ddd":"11"}"#, Field::Ddd), "11");
        assert_eq!(extract_field("{\"ddd\":   \t\"11\"}", Field::Ddd), "11");
        assert_eq!(extract_field(r#"{"ddd" : "11"}"#, Field::Ddd), "");
    }

    #[test]
    fn first_occurrence_wins() {
        assert_eq!(extract_field(r#"{"gia": "1004", "gia": "9999"}"#, Field::Gia), "1004");
    }

    #[test]
    fn non_string_values_are_absent() {
        let body = r#"{"ibge": 3550308, "siafi": null, "complemento": ""}"#;
        let result = found(body);
        assert_eq!(result.get(Field::Ibge), "");
        assert_eq!(result.get(Field::Siafi), "");
        assert_eq!(result.get(Field::Complemento), "");
    }

    #[test]
    fn key_must_match_exactly() {
        // "uf" must not be read out of a longer key ending in uf
        assert_eq!(extract_field(r#"{"xuf": "RJ"}"#, Field::Uf), "");
        assert_eq!(extract_field(r#"{"ufs": "RJ"}"#, Field::Uf), "");
    }

    #[test]
    fn escaped_quote_truncates_value() {
        let body = r#"{"complemento": "lado \"A\""}"#;
        assert_eq!(extract_field(body, Field::Complemento), r"lado \");
    }

    #[test]
    fn empty_object_is_found_with_blank_fields() {
        let result = found("{}");
        assert!(result.iter().all(|(_, value)| value.is_empty()));
    }

    #[test]
    fn extraction_is_repeatable() {
        assert_eq!(found(SE_BODY), found(SE_BODY));
    }
}
