use indexed_pq::IndexedPriorityQueue;
use log::info;

/// Total Manhattan length of a minimum spanning tree over `points` (Prim's algorithm)
///
/// The frontier holds at most one entry per unvisited point, keyed by point
/// index and weighted by its cheapest known connection.
fn min_cost_connect(points: &[(i64, i64)]) -> indexed_pq::Result<i64> {
    let distance = |a: (i64, i64), b: (i64, i64)| (a.0 - b.0).abs() + (a.1 - b.1).abs();

    let mut frontier = IndexedPriorityQueue::new().with_capacity(points.len());
    let mut visited = vec![false; points.len()];
    let mut total = 0;

    if !points.is_empty() {
        frontier.insert(0usize, 0i64, 0usize)?;
    }

    while let Some(entry) = frontier.remove_top() {
        let (node, cost, from) = entry.into_parts();
        visited[node] = true;
        total += cost;
        info!("connect {} -> {} for {}", from, node, cost);

        for next in 0..points.len() {
            if visited[next] {
                continue;
            }
            let candidate = distance(points[node], points[next]);
            let improves = frontier
                .get(&next)
                .map_or(true, |known| candidate < *known.weight());
            if improves {
                frontier.remove_by_key(&next);
                frontier.insert(next, candidate, node)?;
            }
        }
    }

    Ok(total)
}

fn main() -> indexed_pq::Result<()> {
    env_logger::init();

    let points = [(0, 0), (2, 2), (3, 10), (5, 2), (7, 0)];
    println!("Points: {:?}", points);
    println!("Minimum cost to connect all points: {}", min_cost_connect(&points)?);
    Ok(())
}
