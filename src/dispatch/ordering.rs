//! Candidate ordering for a single dispatch.

use crate::registry::Endpoint;

/// Order `endpoints` for one dispatch.
///
/// 1. start from configured order;
/// 2. move the active endpoint (if any) to the front, keeping the rest in place;
/// 3. stable-partition healthy endpoints ahead of unhealthy ones.
///
/// `is_healthy` is called exactly once per endpoint.
///
/// ```
/// use notedeck::dispatch::order_candidates;
/// use notedeck::registry::Endpoint;
///
/// let endpoints: Vec<Endpoint> = ["http://a", "http://b", "http://c"]
///     .into_iter()
///     .map(Endpoint::new)
///     .collect();
///
/// let ordered = order_candidates(&endpoints, Some(2), |e| e.url() != "http://a");
/// let urls: Vec<&str> = ordered.iter().map(|e| e.url()).collect();
/// assert_eq!(urls, vec!["http://c", "http://b", "http://a"]);
/// ```
pub fn order_candidates<F>(endpoints: &[Endpoint], active: Option<usize>, is_healthy: F) -> Vec<Endpoint>
where
    F: Fn(&Endpoint) -> bool,
{
    let mut ordered: Vec<Endpoint> = endpoints.to_vec();

    if let Some(index) = active {
        if index > 0 && index < ordered.len() {
            let endpoint = ordered.remove(index);
            ordered.insert(0, endpoint);
        }
    }

    let mut scored: Vec<(bool, Endpoint)> = ordered
        .into_iter()
        .map(|endpoint| (is_healthy(&endpoint), endpoint))
        .collect();
    // sort_by_key is stable, equal verdicts keep their relative order
    scored.sort_by_key(|(healthy, _)| !*healthy);

    scored.into_iter().map(|(_, endpoint)| endpoint).collect()
}
