//! ZIP prefix to state resolution
//! Maps the first two digits of a ZIP code to a U.S. state code

use std::collections::HashMap;
use std::sync::LazyLock;

/// ZIP prefix (2 digits) to state code.
///
/// Several real prefixes are shared between states (99 WA/AK, 96 CA/HI,
/// 71 LA/AR, 02 MA/RI, 03/05 MA/NH/VT, 19 PA/DE, 20 MD/DC). Each prefix
/// resolves to exactly one state here, so AK, HI, RI, NH, VT, DE and DC have
/// providers but no prefix that reaches them.
pub static ZIP_PREFIX_STATES: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    let mut m = HashMap::new();

    // California
    for p in ["90", "91", "92", "93", "94", "95", "96"] {
        m.insert(p, "CA");
    }
    // Texas (88 is El Paso)
    for p in ["75", "76", "77", "78", "79", "88"] {
        m.insert(p, "TX");
    }
    for p in ["32", "33", "34"] {
        m.insert(p, "FL");
    }
    for p in ["10", "11", "12", "13", "14"] {
        m.insert(p, "NY");
    }
    for p in ["15", "16", "17", "18", "19"] {
        m.insert(p, "PA");
    }
    for p in ["60", "61", "62"] {
        m.insert(p, "IL");
    }
    for p in ["43", "44", "45"] {
        m.insert(p, "OH");
    }
    m.insert("30", "GA");
    m.insert("31", "GA");
    m.insert("27", "NC");
    m.insert("28", "NC");
    m.insert("07", "NJ");
    m.insert("08", "NJ");
    for p in ["01", "02", "05"] {
        m.insert(p, "MA");
    }
    m.insert("85", "AZ");
    m.insert("86", "AZ");
    m.insert("89", "NV");
    m.insert("80", "CO");
    m.insert("81", "CO");
    m.insert("98", "WA");
    m.insert("99", "WA");
    m.insert("97", "OR");
    m.insert("48", "MI");
    m.insert("49", "MI");
    m.insert("46", "IN");
    m.insert("47", "IN");
    m.insert("53", "WI");
    m.insert("54", "WI");
    m.insert("55", "MN");
    m.insert("56", "MN");
    for p in ["63", "64", "65"] {
        m.insert(p, "MO");
    }
    m.insert("20", "MD");
    m.insert("21", "MD");
    for p in ["22", "23", "24"] {
        m.insert(p, "VA");
    }
    m.insert("29", "SC");
    m.insert("37", "TN");
    m.insert("38", "TN");
    m.insert("35", "AL");
    m.insert("36", "AL");
    m.insert("70", "LA");
    m.insert("71", "LA");
    m.insert("73", "OK");
    m.insert("74", "OK");
    m.insert("66", "KS");
    m.insert("67", "KS");
    m.insert("68", "NE");
    m.insert("69", "NE");
    for p in ["50", "51", "52"] {
        m.insert(p, "IA");
    }
    m.insert("72", "AR");
    m.insert("39", "MS");
    for p in ["40", "41", "42"] {
        m.insert(p, "KY");
    }
    m.insert("25", "WV");
    m.insert("26", "WV");
    m.insert("06", "CT");
    m.insert("04", "ME");
    m.insert("87", "NM");
    m.insert("84", "UT");
    m.insert("83", "ID");
    m.insert("59", "MT");
    m.insert("82", "WY");
    m.insert("58", "ND");
    m.insert("57", "SD");

    m
});

/// State code to full state name
pub static STATE_NAMES: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        ("CA", "California"),
        ("TX", "Texas"),
        ("FL", "Florida"),
        ("NY", "New York"),
        ("PA", "Pennsylvania"),
        ("IL", "Illinois"),
        ("OH", "Ohio"),
        ("GA", "Georgia"),
        ("NC", "North Carolina"),
        ("NJ", "New Jersey"),
        ("MA", "Massachusetts"),
        ("AZ", "Arizona"),
        ("NV", "Nevada"),
        ("CO", "Colorado"),
        ("WA", "Washington"),
        ("OR", "Oregon"),
        ("MI", "Michigan"),
        ("IN", "Indiana"),
        ("WI", "Wisconsin"),
        ("MN", "Minnesota"),
        ("MO", "Missouri"),
        ("MD", "Maryland"),
        ("VA", "Virginia"),
        ("SC", "South Carolina"),
        ("TN", "Tennessee"),
        ("AL", "Alabama"),
        ("LA", "Louisiana"),
        ("OK", "Oklahoma"),
        ("KS", "Kansas"),
        ("NE", "Nebraska"),
        ("IA", "Iowa"),
        ("AR", "Arkansas"),
        ("MS", "Mississippi"),
        ("KY", "Kentucky"),
        ("WV", "West Virginia"),
        ("CT", "Connecticut"),
        ("RI", "Rhode Island"),
        ("NH", "New Hampshire"),
        ("ME", "Maine"),
        ("VT", "Vermont"),
        ("DE", "Delaware"),
        ("DC", "District of Columbia"),
        ("NM", "New Mexico"),
        ("UT", "Utah"),
        ("ID", "Idaho"),
        ("MT", "Montana"),
        ("WY", "Wyoming"),
        ("ND", "North Dakota"),
        ("SD", "South Dakota"),
        ("AK", "Alaska"),
        ("HI", "Hawaii"),
    ])
});

/// Two-character prefix of a 5-character ZIP, or None for any other length
pub fn zip_prefix(zip: &str) -> Option<&str> {
    if zip.chars().count() != 5 {
        return None;
    }
    zip.get(..2)
}

/// Get the state code for a ZIP code (e.g. "90210" -> "CA")
pub fn state_for_zip(zip: &str) -> Option<&'static str> {
    zip_prefix(zip).and_then(|prefix| ZIP_PREFIX_STATES.get(prefix).copied())
}

/// Get the full state name, passing unknown codes through unchanged
pub fn full_state_name(state_code: &str) -> String {
    STATE_NAMES
        .get(state_code)
        .map(|name| name.to_string())
        .unwrap_or_else(|| state_code.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_for_zip() {
        assert_eq!(state_for_zip("90210"), Some("CA"));
        assert_eq!(state_for_zip("10001"), Some("NY"));
        assert_eq!(state_for_zip("75201"), Some("TX"));
        assert_eq!(state_for_zip("06103"), Some("CT"));
    }

    #[test]
    fn test_overlapping_prefixes() {
        assert_eq!(state_for_zip("99999"), Some("WA"));
        assert_eq!(state_for_zip("96813"), Some("CA"));
        assert_eq!(state_for_zip("71360"), Some("LA"));
        assert_eq!(state_for_zip("72201"), Some("AR"));
    }

    #[test]
    fn test_wrong_length() {
        assert_eq!(state_for_zip(""), None);
        assert_eq!(state_for_zip("9021"), None);
        assert_eq!(state_for_zip("902101"), None);
        assert_eq!(state_for_zip("90210-1234"), None);
    }

    #[test]
    fn test_unmapped_prefix() {
        assert_eq!(state_for_zip("00501"), None);
        assert_eq!(state_for_zip("03101"), None);
        assert_eq!(state_for_zip("09001"), None);
    }

    #[test]
    fn test_prefix_is_not_digit_checked() {
        assert_eq!(state_for_zip("90abc"), Some("CA"));
        assert_eq!(zip_prefix("ab123"), Some("ab"));
    }

    #[test]
    fn test_full_state_name() {
        assert_eq!(full_state_name("CA"), "California");
        assert_eq!(full_state_name("DC"), "District of Columbia");
        assert_eq!(full_state_name("ZZ"), "ZZ");
        assert_eq!(full_state_name(""), "");
    }

    #[test]
    fn test_full_state_name_identity_on_unmapped() {
        for input in ["XX", "Narnia", "ca", "California"] {
            let once = full_state_name(input);
            assert_eq!(once, input);
            assert_eq!(full_state_name(&once), once);
        }
    }

    #[test]
    fn test_every_prefix_state_has_a_name() {
        for state in ZIP_PREFIX_STATES.values() {
            assert!(STATE_NAMES.contains_key(state), "missing name for {}", state);
        }
    }
}
