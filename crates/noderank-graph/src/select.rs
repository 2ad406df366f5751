use noderank_core::RankedIdentity;

/// Highest-scoring `n` identities, best first.
///
/// The sort is stable, so identities with equal scores keep their input
/// order. Passing [`RankScores::entries`](crate::RankScores) directly makes
/// that the order in which identities first appeared in the edge stream.
/// `n` larger than the input returns everything; `n == 0` returns nothing.
pub fn select_top(results: &[RankedIdentity], n: usize) -> Vec<RankedIdentity> {
    let mut ordered = results.to_vec();
    ordered.sort_by(|a, b| b.score.total_cmp(&a.score));
    ordered.truncate(n);
    ordered
}
