//! Path normalisation and splitting for CASC-style `\`-separated names.

/// Separator used by normalised paths.
pub const SEPARATOR: char = '\\';

/// Canonical hashing form: trimmed, backslash-separated, upper-case.
pub fn normalise(path: &str) -> String {
    path.trim().replace('/', "\\").to_uppercase()
}

/// Presentation form used for output: forward slashes, lower-case.
pub fn display_form(path: &str) -> String {
    path.replace('\\', "/").to_lowercase()
}

/// Everything before the last separator, or `""` for a bare file name.
pub fn directory(path: &str) -> &str {
    path.rfind(SEPARATOR).map_or("", |i| &path[..i])
}

/// Everything after the last separator.
pub fn file_name(path: &str) -> &str {
    path.rfind(SEPARATOR).map_or(path, |i| &path[i + 1..])
}

/// File name with its extension removed.
pub fn file_stem(path: &str) -> &str {
    let name = file_name(path);
    name.rfind('.').map_or(name, |i| &name[..i])
}

/// Extension of the file name including its dot, or `""` when there is none.
pub fn extension(path: &str) -> &str {
    let name = file_name(path);
    match name.rfind('.') {
        Some(i) if i + 1 < name.len() => &name[i..],
        _ => "",
    }
}

/// Number of underscores anywhere in the path.
#[inline]
pub fn underscore_count(path: &str) -> usize {
    path.bytes().filter(|&b| b == b'_').count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalise() {
        assert_eq!(normalise("  world/maps/foo_bar.blp \r"), "WORLD\\MAPS\\FOO_BAR.BLP");
        assert_eq!(normalise("FOO\\BAR"), "FOO\\BAR");
        assert_eq!(normalise(""), "");
    }

    #[test]
    fn test_display_form() {
        assert_eq!(display_form("WORLD\\MAPS\\FOO_BAR.BLP"), "world/maps/foo_bar.blp");
        assert_eq!(display_form(&display_form("A\\B")), "a/b");
    }

    #[test]
    fn test_split_helpers() {
        let path = "A\\B\\C_D.BLP";
        assert_eq!(directory(path), "A\\B");
        assert_eq!(file_name(path), "C_D.BLP");
        assert_eq!(file_stem(path), "C_D");
        assert_eq!(extension(path), ".BLP");
    }

    #[test]
    fn test_split_helpers_bare_names() {
        assert_eq!(directory("UI_MAINMENU"), "");
        assert_eq!(file_name("UI_MAINMENU"), "UI_MAINMENU");
        assert_eq!(file_stem("UI_MAINMENU"), "UI_MAINMENU");
        assert_eq!(extension("UI_MAINMENU"), "");
        assert_eq!(extension("DIR.D\\NAME"), "");
        assert_eq!(extension("NAME."), "");
    }

    #[test]
    fn test_underscore_count() {
        assert_eq!(underscore_count("A_B\\C_D_E.BLP"), 3);
        assert_eq!(underscore_count("ABC"), 0);
    }
}
