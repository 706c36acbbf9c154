//! Text canonicalization shared by every comparison in the engine.

/// Canonicalize text for comparison.
///
/// Every maximal run of characters that are not alphanumeric becomes a single
/// space (underscores count as separators too), the result is trimmed and
/// lower-cased. Raw titles and filenames are never compared directly; both
/// sides always go through this function first.
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_space = false;

    for c in text.chars() {
        if !c.is_alphanumeric() {
            pending_space = true;
            continue;
        }
        if pending_space && !out.is_empty() {
            out.push(' ');
        }
        pending_space = false;
        // Lower-casing can expand into combining marks (e.g. 'İ'); keep only
        // alphanumerics so a second pass is a no-op.
        out.extend(c.to_lowercase().filter(|l| l.is_alphanumeric()));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_separators() {
        assert_eq!(normalize("Breaking.Bad.S01E01"), "breaking bad s01e01");
        assert_eq!(normalize("silo-s01e01_2160p"), "silo s01e01 2160p");
        assert_eq!(normalize("  --Silo--  "), "silo");
    }

    #[test]
    fn test_normalize_underscore_is_separator() {
        assert_eq!(normalize("the_office__us"), "the office us");
    }

    #[test]
    fn test_normalize_case_insensitive() {
        assert_eq!(normalize("S01E01"), normalize("s01e01"));
        assert_eq!(normalize("S01 E01"), normalize("s01.e01"));
        assert_eq!(normalize("SILO"), normalize("silo"));
    }

    #[test]
    fn test_normalize_idempotent() {
        let samples = [
            "Simpsonovi s01e01 - Vánoce u Simpsonových.mkv",
            "Silo.S01E01.720p.WEB-DL.x264",
            "İstanbul_2023",
            "",
            "...",
        ];
        for sample in samples {
            let once = normalize(sample);
            assert_eq!(normalize(&once), once, "not idempotent for {:?}", sample);
        }
    }

    #[test]
    fn test_normalize_keeps_unicode_letters() {
        assert_eq!(normalize("Čeština.Dabing"), "čeština dabing");
    }

    #[test]
    fn test_normalize_empty() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("._-"), "");
    }
}
