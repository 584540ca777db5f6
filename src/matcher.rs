//! Nearest-brightness lookup over a normalized glyph table.

/// Index of the entry closest to `value`, or `None` for an empty table.
///
/// On equal distance the earliest index wins.
pub fn closest_index(table: &[f32], value: f32) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (i, &b) in table.iter().enumerate() {
        let dist = (b - value).abs();
        match best {
            Some((_, best_dist)) if dist >= best_dist => {}
            _ => best = Some((i, dist)),
        }
    }
    best.map(|(i, _)| i)
}
