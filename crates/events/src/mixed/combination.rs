/// Advances `bits` to the next subset in size-then-lexicographic order.
///
/// `bits` is read as the set of chosen positions. Subsets are produced by
/// ascending size, and within one size by advancing the rightmost position
/// that can still move right, so for three bits the order is
/// `000, 100, 010, 001, 110, 101, 011, 111`.
///
/// Returns false once the all-true subset has been reached, leaving `bits`
/// unchanged.
pub fn next_combination(bits: &mut [bool]) -> bool {
    let n = bits.len();
    let chosen: Vec<usize> = (0..n).filter(|&i| bits[i]).collect();
    let k = chosen.len();

    if k == n {
        return false;
    }

    let movable = (0..k).rev().find(|&j| chosen[j] < n - k + j);

    bits.fill(false);
    match movable {
        Some(j) => {
            bits[chosen[j] + 1..chosen[j] + 1 + (k - j)].fill(true);
            for &position in &chosen[..j] {
                bits[position] = true;
            }
        }
        None => bits[..=k].fill(true),
    }
    true
}
