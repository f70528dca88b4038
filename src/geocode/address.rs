use std::sync::LazyLock;

use regex::Regex;

static SEPARATORS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\r?\n|;").expect("separator pattern is valid")
});

/// Flatten multi-line or `;`-separated addresses into a single comma-separated line.
pub fn normalize_address(address: &str) -> String {
    SEPARATORS.replace_all(address, ", ").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newlines_and_semicolons_become_commas() {
        assert_eq!(normalize_address("深圳市福田区\n莲花路1120号"), "深圳市福田区, 莲花路1120号");
        assert_eq!(normalize_address("Block A;Floor 3"), "Block A, Floor 3");
        assert_eq!(normalize_address("line one\r\nline two"), "line one, line two");
    }

    #[test]
    fn surrounding_whitespace_is_trimmed() {
        assert_eq!(normalize_address("  罗湖区东门北路1017号  "), "罗湖区东门北路1017号");
    }

    #[test]
    fn trailing_separator_keeps_comma() {
        // The separator is replaced before trimming, so only whitespace is dropped.
        assert_eq!(normalize_address("南山区;\n"), "南山区, ,");
    }
}
