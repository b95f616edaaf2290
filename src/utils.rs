/// Reduce a target given as a full URL to its host; anything else is only trimmed.
/// Returns `None` for a blank target.
pub fn normalize_domain(target: &str) -> Option<String> {
    let target = target.trim();
    if target.is_empty() {
        return None;
    }
    if target.starts_with("http://") || target.starts_with("https://") {
        if let Ok(u) = url::Url::parse(target) {
            if let Some(host) = u.host_str() {
                return Some(host.to_string());
            }
        }
    }
    Some(target.to_string())
}
