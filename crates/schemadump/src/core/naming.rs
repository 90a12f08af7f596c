//! Generator-facing names derived from database identifiers.

/// Words rendered fully upper-case when they form a whole name segment.
const COMMON_INITIALISMS: &[&str] = &[
    "ACL", "API", "ASCII", "CPU", "CSS", "DNS", "EOF", "GUID", "HTML", "HTTP", "HTTPS", "ID",
    "IP", "JSON", "LHS", "QPS", "RAM", "RHS", "RPC", "SLA", "SMTP", "SQL", "SSH", "TCP", "TLS",
    "TTL", "UDP", "UI", "UID", "UUID", "URI", "URL", "UTF8", "VM", "XML", "XMPP", "XSRF", "XSS",
];

/// Convert a snake_case identifier to UpperCamel case.
///
/// Segments that are common initialisms are upper-cased as a whole, so
/// `user_id` becomes `UserID` and `api_url` becomes `APIURL`. Empty
/// segments produced by repeated underscores are dropped.
pub fn snake_to_camel(name: &str) -> String {
    let mut out = String::with_capacity(name.len());

    for segment in name.split('_').filter(|s| !s.is_empty()) {
        let upper = segment.to_ascii_uppercase();
        if COMMON_INITIALISMS.contains(&upper.as_str()) {
            out.push_str(&upper);
            continue;
        }

        let mut chars = segment.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.push_str(chars.as_str());
        }
    }

    out
}
