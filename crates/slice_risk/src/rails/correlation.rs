//! Correlated-asset clustering.
//!
//! Assets are nodes of an undirected graph with an edge wherever
//! `|corr| >= threshold`. Each connected component with at least two members
//! is reported as one cluster.

use slice_core::types::DateTable;

/// A group of assets connected by high pairwise correlation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CorrelationClusterFlag {
    /// Members of the cluster, sorted
    pub cluster_assets: Vec<String>,
    /// Human-readable summary
    pub comment: String,
}

/// Connected components of the thresholded correlation graph.
///
/// `matrix` is square in the order of `assets`. Undefined correlations never
/// form an edge. Components are returned in order of their first asset, each
/// sorted; singletons are dropped.
pub fn find_correlation_clusters(
    assets: &[String],
    matrix: &[Vec<Option<f64>>],
    threshold: f64,
) -> Vec<Vec<String>> {
    let n = assets.len();
    let mut adjacency: Vec<Vec<usize>> = vec![Vec::new(); n];
    for i in 0..n {
        for j in (i + 1)..n {
            if matches!(matrix[i][j], Some(c) if c.abs() >= threshold) {
                adjacency[i].push(j);
                adjacency[j].push(i);
            }
        }
    }

    let mut visited = vec![false; n];
    let mut clusters = Vec::new();
    for root in 0..n {
        if visited[root] {
            continue;
        }

        let mut members = Vec::new();
        let mut stack = vec![root];
        visited[root] = true;
        while let Some(node) = stack.pop() {
            members.push(assets[node].clone());
            for &next in &adjacency[node] {
                if !visited[next] {
                    visited[next] = true;
                    stack.push(next);
                }
            }
        }

        if members.len() >= 2 {
            members.sort();
            clusters.push(members);
        }
    }
    clusters
}

/// Cluster the columns of an asset-return table by correlation.
///
/// An empty table yields no flags.
pub fn compute_correlation_cluster_flags(
    asset_returns: &DateTable,
    threshold: f64,
) -> Vec<CorrelationClusterFlag> {
    if asset_returns.is_empty() {
        return Vec::new();
    }

    let matrix = asset_returns.correlation_matrix();
    find_correlation_clusters(asset_returns.column_names(), &matrix, threshold)
        .into_iter()
        .map(|cluster_assets| CorrelationClusterFlag {
            comment: format!(
                "Cluster of {} assets with |corr|>={:.2} based on historical returns.",
                cluster_assets.len(),
                threshold
            ),
            cluster_assets,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use slice_core::types::Date;

    fn names(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    fn symmetric(n: usize, entries: &[(usize, usize, f64)]) -> Vec<Vec<Option<f64>>> {
        let mut m = vec![vec![None; n]; n];
        for i in 0..n {
            m[i][i] = Some(1.0);
        }
        for &(i, j, c) in entries {
            m[i][j] = Some(c);
            m[j][i] = Some(c);
        }
        m
    }

    #[test]
    fn test_single_pair_cluster() {
        let matrix = symmetric(3, &[(0, 1, 0.95), (0, 2, 0.1), (1, 2, 0.1)]);
        let clusters = find_correlation_clusters(&names(&["A", "B", "C"]), &matrix, 0.8);
        assert_eq!(clusters, vec![names(&["A", "B"])]);
    }

    #[test]
    fn test_transitive_component() {
        // A-B and B-C linked, A-C weak: one component of three.
        let matrix = symmetric(4, &[(0, 1, 0.9), (1, 2, -0.85), (0, 2, 0.3)]);
        let clusters = find_correlation_clusters(&names(&["C", "B", "A", "D"]), &matrix, 0.8);
        assert_eq!(clusters, vec![names(&["A", "B", "C"])]);
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let matrix = symmetric(2, &[(0, 1, 0.8)]);
        assert_eq!(
            find_correlation_clusters(&names(&["X", "Y"]), &matrix, 0.8).len(),
            1
        );
    }

    #[test]
    fn test_undefined_correlation_is_not_an_edge() {
        let matrix = symmetric(2, &[]);
        assert!(find_correlation_clusters(&names(&["X", "Y"]), &matrix, 0.0).is_empty());
    }

    #[test]
    fn test_flags_from_table() {
        let start = Date::from_ymd(2024, 3, 1).unwrap();
        let a = [0.01, -0.02, 0.015, 0.0, -0.01, 0.02];
        let rows = (0..a.len())
            .map(|i| {
                let c = if i % 2 == 0 { 0.01 } else { -0.005 };
                (
                    start.add_days(i as i64),
                    vec![Some(a[i]), Some(2.0 * a[i] + 0.001), Some(c)],
                )
            })
            .collect();
        let table = DateTable::new(names(&["SPY", "QQQ", "GLD"]), rows).unwrap();

        let flags = compute_correlation_cluster_flags(&table, 0.8);
        assert_eq!(flags.len(), 1);
        assert_eq!(flags[0].cluster_assets, names(&["QQQ", "SPY"]));
        assert_eq!(
            flags[0].comment,
            "Cluster of 2 assets with |corr|>=0.80 based on historical returns."
        );
    }

    #[test]
    fn test_empty_table_has_no_flags() {
        assert!(compute_correlation_cluster_flags(&DateTable::default(), 0.8).is_empty());
    }
}
