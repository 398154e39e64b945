//! Request shapes for a Supabase table reached through PostgREST.

use serde::Deserialize;

/// `Prefer` header asking the insert to answer without a body.
pub const PREFER_MINIMAL: (&str, &str) = ("Prefer", "return=minimal");

/// `{url}/rest/v1/{table}`, tolerating a trailing slash on `url`.
pub fn endpoint(url: &str, table: &str) -> String {
    format!("{}/rest/v1/{}", url.trim().trim_end_matches('/'), table)
}

/// Headers authenticating every call with the anonymous key.
pub fn auth_headers(anon_key: &str) -> [(&'static str, String); 2] {
    [
        ("apikey", anon_key.to_string()),
        ("Authorization", format!("Bearer {anon_key}")),
    ]
}

/// Query string of the duplicate check: `?select=cin&cin=eq.{cin}`.
pub fn lookup_query(cin: &str) -> [(&'static str, String); 2] {
    [("select", "cin".to_string()), ("cin", format!("eq.{cin}"))]
}

#[derive(Deserialize)]
struct CinRow {
    cin: String,
}

/// Reads the `cin` column out of a lookup answer.
pub fn parse_cins(body: &str) -> Result<Vec<String>, String> {
    let rows: Vec<CinRow> = serde_json::from_str(body).map_err(|e| e.to_string())?;
    Ok(rows.into_iter().map(|row| row.cin).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_url_and_table() {
        assert_eq!(
            endpoint("https://abc.supabase.co", "correction"),
            "https://abc.supabase.co/rest/v1/correction"
        );
        assert_eq!(
            endpoint("https://abc.supabase.co//", "correction"),
            "https://abc.supabase.co/rest/v1/correction"
        );
    }

    #[test]
    fn lookup_filters_on_cin_equality() {
        assert_eq!(
            lookup_query("101 202"),
            [("select", "cin".to_string()), ("cin", "eq.101 202".to_string())]
        );
    }

    #[test]
    fn anon_key_goes_in_both_headers() {
        assert_eq!(
            auth_headers("k3y"),
            [("apikey", "k3y".to_string()), ("Authorization", "Bearer k3y".to_string())]
        );
    }

    #[test]
    fn lookup_answer_lists_every_row() {
        assert_eq!(
            parse_cins(r#"[{"cin":"101"},{"cin":"101","nom":"x"}]"#).unwrap(),
            ["101", "101"]
        );
        assert!(parse_cins("[]").unwrap().is_empty());
        assert!(parse_cins(r#"{"message":"JWT expired"}"#).is_err());
    }
}
