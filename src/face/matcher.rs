use super::descriptor::Descriptor;

/// Default maximum descriptor distance for a match (exclusive).
pub const DEFAULT_MATCH_THRESHOLD: f64 = 0.45;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Nearest<Id> {
    pub id: Id,
    pub distance: f64,
}

/// Linear scan for the candidate closest to `query`.
///
/// Returns it only when its distance is strictly below `threshold`. On equal
/// distances the earliest candidate wins.
pub fn find_nearest<Id: Clone>(
    query: &Descriptor,
    candidates: &[(Id, Descriptor)],
    threshold: f64,
) -> Option<Nearest<Id>> {
    let mut best: Option<(usize, f64)> = None;

    for (i, (_, descriptor)) in candidates.iter().enumerate() {
        let distance = query.distance(descriptor);
        match best {
            Some((_, best_distance)) if distance >= best_distance => {}
            _ => best = Some((i, distance)),
        }
    }

    match best {
        Some((idx, distance)) if distance < threshold => Some(Nearest {
            id: candidates[idx].0.clone(),
            distance,
        }),
        _ => None,
    }
}
