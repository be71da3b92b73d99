/// A run of consecutive items sharing the same key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Run<K> {
    pub key: K,
    /// Index of the first item in the run.
    pub start: usize,
    pub len: usize,
}

/// Group consecutive items with equal keys.
///
/// Equal keys that are not adjacent start a new run.
pub fn group_runs<T, K, F>(items: &[T], mut key: F) -> Vec<Run<K>>
where
    K: PartialEq,
    F: FnMut(&T) -> K,
{
    let mut runs: Vec<Run<K>> = Vec::new();
    for (index, item) in items.iter().enumerate() {
        let k = key(item);
        if let Some(run) = runs.last_mut() {
            if run.key == k {
                run.len += 1;
                continue;
            }
        }
        runs.push(Run {
            key: k,
            start: index,
            len: 1,
        });
    }
    runs
}
