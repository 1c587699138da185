//! Identifier parsing and normalization
//!
//! OpenAlex accepts and emits identifiers in several spellings: full URLs
//! (`https://openalex.org/W123`, `https://doi.org/10.1/x`), short forms
//! (`W123`, `10.1/x`), and prefixed forms (`doi:10.1/x`, `pmid:123`).

use crate::kind::EntityKind;

const DOI_URL: &str = "https://doi.org/";
const DOI_PREFIXES: &[&str] = &[
    "https://doi.org/",
    "http://doi.org/",
    "https://dx.doi.org/",
    "http://dx.doi.org/",
    "doi.org/",
    "doi:",
];
const OPENALEX_PREFIXES: &[&str] = &[
    "https://openalex.org/",
    "http://openalex.org/",
    "openalex.org/",
];

/// Kind of identifier detected by [`determine_id_type`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdType {
    OpenAlex(EntityKind),
    Doi,
    Orcid,
    Ror,
    Issn,
    Pmid,
    Pmcid,
    Wikidata,
    Mag,
    Unknown,
}

/// Extract short ID from full URL (e.g., "https://openalex.org/W123" -> "W123")
pub fn short_id(url: &str) -> &str {
    url.trim_end_matches('/')
        .rsplit('/')
        .next()
        .filter(|s| !s.is_empty())
        .unwrap_or(url)
}

/// Normalize a DOI to `https://doi.org/10.xxxx/xxxxx`, all lowercase.
///
/// Returns `None` when the input is not a DOI.
pub fn normalize_doi(doi: &str) -> Option<String> {
    short_doi(doi).map(|s| format!("{DOI_URL}{s}"))
}

/// Convert any DOI spelling to the short `10.xxxx/xxxxx` form, all lowercase.
pub fn short_doi(doi: &str) -> Option<String> {
    let lower = doi.trim().to_lowercase();
    let bare = DOI_PREFIXES
        .iter()
        .find_map(|p| lower.strip_prefix(p))
        .unwrap_or(&lower)
        .trim();
    let (registrant, suffix) = bare.split_once('/')?;
    let registrant_ok = registrant
        .strip_prefix("10.")
        .is_some_and(|r| !r.is_empty() && r.chars().all(|c| c.is_ascii_digit() || c == '.'));
    if !registrant_ok || suffix.is_empty() {
        return None;
    }
    Some(bare.to_string())
}

/// Determine the type of an identifier string.
///
/// Bare digit strings are ambiguous between PubMed and MAG ids: up to
/// 8 digits is read as a PMID, longer as a MAG id.
pub fn determine_id_type(id: &str) -> IdType {
    let id = id.trim();
    let lower = id.to_lowercase();

    if let Some(rest) = OPENALEX_PREFIXES.iter().find_map(|p| lower.strip_prefix(p)) {
        if rest.starts_with("keywords/") {
            return IdType::OpenAlex(EntityKind::Keyword);
        }
        return openalex_short(rest).map_or(IdType::Unknown, IdType::OpenAlex);
    }
    if lower.contains("orcid.org/") || is_orcid(&lower) {
        return IdType::Orcid;
    }
    if lower.contains("ror.org/") || is_ror(&lower) {
        return IdType::Ror;
    }
    if short_doi(id).is_some() {
        return IdType::Doi;
    }
    if lower.contains("wikidata.org/") || is_prefixed_digits(&lower, "q") {
        return IdType::Wikidata;
    }
    if is_prefixed_digits(&lower, "pmc") || lower.contains("ncbi.nlm.nih.gov/pmc/") {
        return IdType::Pmcid;
    }
    if lower.starts_with("pmid:") || lower.contains("pubmed.ncbi.nlm.nih.gov/") {
        return IdType::Pmid;
    }
    if lower.starts_with("mag:") {
        return IdType::Mag;
    }
    if is_issn(&lower) {
        return IdType::Issn;
    }
    if let Some(kind) = openalex_short(&lower) {
        return IdType::OpenAlex(kind);
    }
    if !lower.is_empty() && lower.chars().all(|c| c.is_ascii_digit()) {
        return if lower.len() <= 8 {
            IdType::Pmid
        } else {
            IdType::Mag
        };
    }
    IdType::Unknown
}

/// `W123` style short id
fn openalex_short(s: &str) -> Option<EntityKind> {
    let mut chars = s.chars();
    let prefix = chars.next()?;
    let digits = chars.as_str();
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    EntityKind::from_id_prefix(prefix)
}

fn is_prefixed_digits(s: &str, prefix: &str) -> bool {
    s.strip_prefix(prefix)
        .is_some_and(|d| !d.is_empty() && d.chars().all(|c| c.is_ascii_digit()))
}

/// `0000-0002-1825-0097`
fn is_orcid(s: &str) -> bool {
    let groups: Vec<&str> = s.split('-').collect();
    groups.len() == 4
        && groups.iter().all(|g| g.len() == 4)
        && groups[..3]
            .iter()
            .all(|g| g.chars().all(|c| c.is_ascii_digit()))
        && check_digit_group(groups[3])
}

/// `0317-8471`
fn is_issn(s: &str) -> bool {
    match s.split_once('-') {
        Some((a, b)) => {
            a.len() == 4
                && a.chars().all(|c| c.is_ascii_digit())
                && b.len() == 4
                && check_digit_group(b)
        }
        None => false,
    }
}

/// Four characters: three digits and a trailing digit or `x`.
fn check_digit_group(g: &str) -> bool {
    g.len() == 4
        && g.char_indices()
            .all(|(i, c)| c.is_ascii_digit() || (i == 3 && c == 'x'))
}

/// `03vek6s52`: leading zero, six base32 characters, two check digits
fn is_ror(s: &str) -> bool {
    s.len() == 9
        && s.is_ascii()
        && s.starts_with('0')
        && s[1..7].chars().all(|c| c.is_ascii_alphanumeric())
        && s[7..].chars().all(|c| c.is_ascii_digit())
        && s[1..7].chars().any(|c| c.is_ascii_alphabetic())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_id_from_url() {
        assert_eq!(short_id("https://openalex.org/W2741809807"), "W2741809807");
        assert_eq!(short_id("W2741809807"), "W2741809807");
        assert_eq!(short_id("https://openalex.org/keywords/deep-learning"), "deep-learning");
        assert_eq!(short_id("https://openalex.org/A1/"), "A1");
        assert_eq!(short_id(""), "");
    }

    #[test]
    fn normalize_doi_forms() {
        let canonical = Some("https://doi.org/10.1038/s41586-018-0102-6".to_string());
        assert_eq!(normalize_doi("10.1038/S41586-018-0102-6"), canonical);
        assert_eq!(normalize_doi("doi:10.1038/s41586-018-0102-6"), canonical);
        assert_eq!(
            normalize_doi("https://dx.doi.org/10.1038/s41586-018-0102-6"),
            canonical
        );
        assert_eq!(
            normalize_doi("  HTTPS://DOI.ORG/10.1038/s41586-018-0102-6 "),
            canonical
        );
    }

    #[test]
    fn normalize_doi_rejects_non_doi() {
        assert_eq!(normalize_doi("W2741809807"), None);
        assert_eq!(normalize_doi("11.1000/xyz"), None);
        assert_eq!(normalize_doi("10.1038/"), None);
        assert_eq!(normalize_doi(""), None);
    }

    #[test]
    fn short_doi_form() {
        assert_eq!(
            short_doi("https://doi.org/10.7717/PEERJ.4375"),
            Some("10.7717/peerj.4375".to_string())
        );
    }

    #[test]
    fn detect_openalex() {
        assert_eq!(
            determine_id_type("https://openalex.org/W2741809807"),
            IdType::OpenAlex(EntityKind::Work)
        );
        assert_eq!(
            determine_id_type("A5023888391"),
            IdType::OpenAlex(EntityKind::Author)
        );
        assert_eq!(
            determine_id_type("https://openalex.org/T10978"),
            IdType::OpenAlex(EntityKind::Topic)
        );
        assert_eq!(
            determine_id_type("https://openalex.org/keywords/deep-learning"),
            IdType::OpenAlex(EntityKind::Keyword)
        );
        assert_eq!(determine_id_type("https://openalex.org/X1"), IdType::Unknown);
    }

    #[test]
    fn detect_external() {
        assert_eq!(determine_id_type("10.7717/peerj.4375"), IdType::Doi);
        assert_eq!(
            determine_id_type("https://orcid.org/0000-0002-1825-0097"),
            IdType::Orcid
        );
        assert_eq!(determine_id_type("0000-0002-1825-009X"), IdType::Orcid);
        assert_eq!(determine_id_type("https://ror.org/03vek6s52"), IdType::Ror);
        assert_eq!(determine_id_type("03vek6s52"), IdType::Ror);
        assert_eq!(determine_id_type("0028-0836"), IdType::Issn);
        assert_eq!(determine_id_type("1234-567X"), IdType::Issn);
        assert_eq!(determine_id_type("Q2013"), IdType::Wikidata);
        assert_eq!(
            determine_id_type("https://www.wikidata.org/wiki/Q2013"),
            IdType::Wikidata
        );
        assert_eq!(determine_id_type("PMC1234567"), IdType::Pmcid);
        assert_eq!(determine_id_type("pmid:29456894"), IdType::Pmid);
        assert_eq!(
            determine_id_type("https://pubmed.ncbi.nlm.nih.gov/29456894"),
            IdType::Pmid
        );
        assert_eq!(determine_id_type("29456894"), IdType::Pmid);
        assert_eq!(determine_id_type("2741809807"), IdType::Mag);
        assert_eq!(determine_id_type("not an id"), IdType::Unknown);
    }
}
