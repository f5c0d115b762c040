//! Runs the load and store halves of an iteration side by side.
//!
//! With the `parallel` feature this is `rayon::join`; otherwise both closures run in order on the
//! calling thread. Either way both halves have returned before `join` does, which is what keeps a
//! buffer from being refilled while it is still being drained.

#[cfg(feature = "parallel")]
pub(crate) use rayon::join;

#[cfg(not(feature = "parallel"))]
#[inline]
pub(crate) fn join<A, B, RA, RB>(oper_a: A, oper_b: B) -> (RA, RB)
where
    A: FnOnce() -> RA + Send,
    B: FnOnce() -> RB + Send,
    RA: Send,
    RB: Send,
{
    let result_a = oper_a();
    let result_b = oper_b();
    (result_a, result_b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_halves_complete() {
        let mut left = 0;
        let mut right = 0;
        let (a, b) = join(
            || {
                left += 1;
                "load"
            },
            || {
                right += 2;
                "store"
            },
        );
        assert_eq!((a, b), ("load", "store"));
        assert_eq!((left, right), (1, 2));
    }
}
