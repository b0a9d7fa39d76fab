/// Project id of a URL path: the first non-empty segment after `prefix`.
///
/// ```
/// assert_eq!(spa::project_id("/md/handbook/setup", "/md/"), Some("handbook"));
/// assert_eq!(spa::project_id("/about", "/md/"), None);
/// ```
pub fn project_id<'a>(path: &'a str, prefix: &str) -> Option<&'a str> {
    let rest = path.strip_prefix(prefix)?;
    let id = rest.split('/').next()?;
    (!id.is_empty()).then_some(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_first_segment_after_prefix() {
        assert_eq!(project_id("/md/docs", "/md/"), Some("docs"));
        assert_eq!(project_id("/md/docs/", "/md/"), Some("docs"));
        assert_eq!(project_id("/md/docs/guide/intro", "/md/"), Some("docs"));
    }

    #[test]
    fn no_project_outside_prefix() {
        assert_eq!(project_id("/", "/md/"), None);
        assert_eq!(project_id("/md/", "/md/"), None);
        assert_eq!(project_id("/md", "/md/"), None);
        assert_eq!(project_id("/mdx/docs", "/md/"), None);
        assert_eq!(project_id("/other/md/docs", "/md/"), None);
    }
}
