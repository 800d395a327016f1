use std::collections::HashSet;

/// Sort names lexicographically and drop duplicates
pub fn dedup_and_sort(mut names: Vec<String>) -> Vec<String> {
    names.sort();
    names.dedup();
    names
}

/// Candidates whose name is absent from the used set
///
/// Only set membership matters; duplicate references and duplicate
/// candidates collapse. The result is sorted ascending for deterministic,
/// diff-friendly output.
pub fn difference(used: &[String], candidates: &[String]) -> Vec<String> {
    let used: HashSet<&str> = used.iter().map(String::as_str).collect();

    dedup_and_sort(
        candidates
            .iter()
            .filter(|name| !used.contains(name.as_str()))
            .cloned()
            .collect(),
    )
}
