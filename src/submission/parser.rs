use crate::models::LeadPayload;

/// Parse a lead from the raw request body.
///
/// The body is read as JSON whatever the Content-Type says: browsers
/// sending opaque (`no-cors`) requests downgrade `application/json` to
/// `text/plain`.
pub fn parse_body(body: &[u8]) -> Result<LeadPayload, String> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err("リクエストが空です".to_string());
    }
    serde_json::from_slice(body).map_err(|e| format!("JSONの解析に失敗しました ({e})"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_partial_payload() {
        let payload = parse_body(br#"{"name":"Taro","email":"t@example.com"}"#).unwrap();
        assert_eq!(payload.name.as_deref(), Some("Taro"));
        assert!(payload.content.is_none());
    }

    #[test]
    fn ignores_unknown_fields() {
        let payload = parse_body(br#"{"name":"a","utm":"x"}"#).unwrap();
        assert_eq!(payload.name.as_deref(), Some("a"));
    }

    #[test]
    fn rejects_empty_and_malformed_bodies() {
        assert!(parse_body(b"").is_err());
        assert!(parse_body(b"  \n").is_err());
        assert!(parse_body(b"name=Taro").is_err());
        assert!(parse_body(br#"{"name": 3}"#).is_err());
    }
}
