//! Pure path text operations on canonical strings.
//!
//! The host keeps repository paths `/`-separated internally on every
//! platform; these helpers operate on that form. Only [`normcase`] knows
//! about the other separator.

const SEP: char = '/';

/// Join two canonical paths. An absolute `tail` replaces `head`.
pub fn join(head: &str, tail: &str) -> String {
    if head.is_empty() || tail.starts_with(SEP) {
        return tail.to_owned();
    }
    if head.ends_with(SEP) {
        format!("{head}{tail}")
    } else {
        format!("{head}{SEP}{tail}")
    }
}

/// Split into (directory, base name). The separator stays with neither half,
/// except for a root directory.
pub fn split(path: &str) -> (&str, &str) {
    match path.rfind(SEP) {
        Some(0) => (&path[..1], &path[1..]),
        Some(idx) => (&path[..idx], &path[idx + 1..]),
        None => ("", path),
    }
}

/// Split off the extension, dot included. A leading dot starts a hidden
/// name, not an extension.
pub fn split_ext(path: &str) -> (&str, &str) {
    let (_, name) = split(path);
    match name.rfind('.') {
        Some(idx) if idx > 0 => {
            let cut = path.len() - (name.len() - idx);
            (&path[..cut], &path[cut..])
        }
        _ => (path, ""),
    }
}

/// The directory part of `path`.
pub fn dirname(path: &str) -> &str {
    split(path).0
}

/// Given an input path, "normalize" it:
/// 1. Collapse multiple `/`s into a single `/`, except maybe at the beginning.
/// 2. `..` goes up a level.
/// 3. Remove `/./` in the middle.
pub fn normalize(path: &str, allow_leading_double_slashes: bool) -> String {
    let leading_slashes = path.chars().take_while(|&c| c == SEP).count();

    let mut comps: Vec<&str> = Vec::new();
    for comp in path.split(SEP) {
        if comp.is_empty() || comp == "." {
            continue;
        } else if comp != ".." {
            comps.push(comp);
        } else if comps.last().is_some_and(|last| *last != "..") {
            // '..' with a real path component, drop that path component.
            comps.pop();
        } else if leading_slashes == 0 {
            // We underflowed the .. and are a relative (not absolute) path.
            comps.push("..");
        }
    }

    let mut result = comps.join("/");
    // If we don't allow leading double slashes, collapse them to 1 if there
    // are any. If we do, keep exactly two; three or more still collapse.
    let mut numslashes = usize::from(leading_slashes > 0);
    if allow_leading_double_slashes && leading_slashes == 2 {
        numslashes = 2;
    }
    for _ in 0..numslashes {
        result.insert(0, SEP);
    }
    // Ensure ./ normalizes to . and not empty.
    if result.is_empty() {
        result.push('.');
    }
    result
}

/// Case-fold a path for comparison: identity where the filesystem is case
/// sensitive, lowercased with backslashes folded where it is not.
pub fn normcase(path: &str) -> String {
    #[cfg(windows)]
    {
        path.replace('\\', "/").to_lowercase()
    }
    #[cfg(not(windows))]
    {
        path.to_owned()
    }
}
