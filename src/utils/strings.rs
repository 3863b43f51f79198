/// Case-insensitive substring check, used for matching search queries against game titles
pub fn contains_ignore_case(haystack: impl AsRef<str>, needle: impl AsRef<str>) -> bool {
    haystack
        .as_ref()
        .to_lowercase()
        .contains(&needle.as_ref().to_lowercase())
}
