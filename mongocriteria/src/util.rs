#[macro_export]
macro_rules! map {
	($($key:expr => $val:expr),* $(,)?) => {
		std::iter::Iterator::collect(std::iter::IntoIterator::into_iter([
			$({
				($key, $val)
			},)*
		]))
	};
}

const REGEX_METACHARACTERS: &[char] = &[
    '-', '[', ']', '{', '}', '(', ')', '+', '?', '*', '.', '/', ',', '\\', '^', '$', '|', '#',
];

/// Backslash-escapes every regex metacharacter in `raw` so it can be
/// embedded literally in a larger pattern. `%` is left alone.
pub fn escape_regex(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        if REGEX_METACHARACTERS.contains(&c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
