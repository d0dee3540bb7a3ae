use std::collections::HashSet;

use crate::nfa::{
    fragment::NFA,
    state::{StateID, Symbol},
};

/// The largest number of (state, offset) pairs that is tracked with a
/// bitset. Beyond this, visited pairs go into a hash set instead.
const DENSE_LIMIT: usize = 1 << 24;

impl NFA {
    /// Returns true if and only if this NFA matches all of `haystack`.
    ///
    /// This works directly on the state graph by backtracking: it looks for
    /// any path from the entry that consumes the whole haystack, one
    /// character per literal transition, and ends in an accepting state.
    /// Epsilon transitions may be taken at any point, including after the
    /// last character.
    ///
    /// The search is a depth first walk over (state, offset) pairs using an
    /// explicit stack, so the length of the haystack is not limited by the
    /// call stack. Each pair is explored at most once. That both stops
    /// epsilon cycles from looping and keeps the work proportional to the
    /// number of states times the length of the haystack.
    ///
    /// This never fails. A missing transition just means that path does not
    /// match.
    ///
    /// # Example
    ///
    /// ```
    /// use pattern_automata::NFA;
    ///
    /// let nfa = NFA::literal('a').one_or_more();
    /// assert!(nfa.is_match("aaa"));
    /// assert!(!nfa.is_match(""));
    /// ```
    pub fn is_match(&self, haystack: &str) -> bool {
        let mut visited = Visited::new(self.len(), haystack.len());
        let mut stack = vec![(self.entry(), 0)];
        while let Some((id, at)) = stack.pop() {
            if !visited.insert(id, at) {
                continue;
            }
            let state = self.state(id);
            // Epsilons go on the stack first so that the literal transition
            // for the next char is tried first.
            for &next in state.epsilons().iter().rev() {
                stack.push((next, at));
            }
            match haystack[at..].chars().next() {
                None => {
                    if state.is_accepting() {
                        return true;
                    }
                }
                Some(ch) => {
                    let next_at = at + ch.len_utf8();
                    let targets = state.transitions(Symbol::Char(ch));
                    for &next in targets.iter().rev() {
                        stack.push((next, next_at));
                    }
                }
            }
        }
        false
    }
}

/// The (state, byte offset) pairs already explored by one search.
enum Visited {
    /// One bit per pair, at `id * stride + at`.
    Dense { bits: Vec<u64>, stride: usize },
    Sparse(HashSet<(StateID, usize)>),
}

impl Visited {
    fn new(state_len: usize, haystack_len: usize) -> Visited {
        let stride = haystack_len + 1;
        match state_len.checked_mul(stride) {
            Some(pairs) if pairs <= DENSE_LIMIT => {
                Visited::Dense { bits: vec![0; (pairs + 63) / 64], stride }
            }
            _ => Visited::Sparse(HashSet::new()),
        }
    }

    /// Record a pair as visited. Returns false if it already was.
    fn insert(&mut self, id: StateID, at: usize) -> bool {
        match *self {
            Visited::Dense { ref mut bits, stride } => {
                let i = id * stride + at;
                let (word, bit) = (i / 64, 1u64 << (i % 64));
                if bits[word] & bit != 0 {
                    return false;
                }
                bits[word] |= bit;
                true
            }
            Visited::Sparse(ref mut set) => set.insert((id, at)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(nfa: &NFA, yes: &[&str], no: &[&str]) {
        for &s in yes {
            assert!(nfa.is_match(s), "expected match for {:?}\n{:?}", s, nfa);
        }
        for &s in no {
            assert!(!nfa.is_match(s), "expected no match for {:?}\n{:?}", s, nfa);
        }
    }

    #[test]
    fn literal() {
        check(&NFA::literal('a'), &["a"], &["", "b", "aa"]);
    }

    #[test]
    fn epsilon() {
        check(&NFA::epsilon(), &[""], &["a", " "]);
    }

    #[test]
    fn concat() {
        let nfa = NFA::literal('a').concat(NFA::literal('b'));
        check(&nfa, &["ab"], &["a", "aab", "ac", ""]);
        let nfa = NFA::literal('a')
            .concat_all(vec![NFA::literal('b'), NFA::literal('c')]);
        check(&nfa, &["abc"], &["aba", "ab"]);
    }

    #[test]
    fn choice() {
        let nfa = NFA::literal('a').choice(NFA::literal('b'));
        check(&nfa, &["a", "b"], &["c", "ab", ""]);
        let nfa = NFA::literal('a')
            .choice_all(vec![NFA::literal('b'), NFA::literal('c')]);
        check(&nfa, &["a", "b", "c"], &["d", "ab"]);
    }

    #[test]
    fn zero_or_more_both_forms() {
        let yes = &["", "a", "aa", "aaa"];
        let no = &["b", "ab", "aab"];
        check(&NFA::literal('a').zero_or_more(), yes, no);
        check(&NFA::literal('a').zero_or_more_explicit(), yes, no);
    }

    #[test]
    fn one_or_more_both_forms() {
        let yes = &["a", "aa", "aaa"];
        let no = &["", "b", "ab", "aab"];
        check(&NFA::literal('a').one_or_more(), yes, no);
        check(&NFA::literal('a').one_or_more_explicit(), yes, no);
    }

    #[test]
    fn optional_both_forms() {
        let yes = &["", "a"];
        let no = &["b", "aa"];
        check(&NFA::literal('a').optional(), yes, no);
        check(&NFA::literal('a').optional_explicit(), yes, no);
    }

    #[test]
    fn mixed_composition() {
        // xy*|z
        let nfa = NFA::literal('x')
            .concat(NFA::literal('y').zero_or_more_explicit())
            .choice(NFA::literal('z'));
        check(&nfa, &["x", "xy", "xyy", "z"], &["xyz", "a", ""]);
    }

    #[test]
    fn explicit_forms_nest() {
        // (a*b)*
        let nfa = NFA::literal('a')
            .zero_or_more_explicit()
            .concat(NFA::literal('b'))
            .zero_or_more_explicit();
        check(&nfa, &["", "b", "ab", "aabab", "bb"], &["a", "aba", "ba"]);
    }

    #[test]
    fn epsilon_loops_terminate() {
        // (a?)* builds an epsilon cycle through the whole fragment.
        let nfa = NFA::literal('a').optional_explicit().zero_or_more_explicit();
        check(&nfa, &["", "a", "aaaa"], &["b", "ab"]);
        let nfa = NFA::epsilon().zero_or_more().one_or_more();
        check(&nfa, &[""], &["a"]);
    }

    #[test]
    fn classes() {
        check(&NFA::digit(), &["0", "5", "9"], &["a", "", "10"]);
        check(&NFA::word(), &["a", "j", "Z", "_", "7"], &["-", " ", ""]);
        check(&NFA::space(), &[" ", "\t", "\n", "\r", "\x0C"], &["a", ""]);
    }

    #[test]
    fn consumes_chars_not_bytes() {
        let nfa = NFA::literal('☃').concat(NFA::literal('x'));
        check(&nfa, &["☃x"], &["☃", "x", "☃☃x"]);
    }

    #[test]
    fn long_haystacks() {
        let many = "a".repeat(200_000);
        let nfa = NFA::new("a*").unwrap();
        assert!(nfa.is_match(&many));
        assert!(!nfa.is_match(&format!("{}b", many)));
        let nfa = NFA::literal('a').zero_or_more();
        assert!(nfa.is_match(&many));
        assert!(!nfa.is_match(&format!("{}b", many)));
        let nfa = NFA::new("(a|b)*b").unwrap();
        assert!(nfa.is_match(&format!("{}b", many)));
        assert!(!nfa.is_match(&many));
    }

    #[test]
    fn long_haystack_with_epsilon_cycles() {
        // Every offset can be reached along many paths here, but each
        // (state, offset) pair is explored once.
        let nfa = NFA::new("(a?)*(a*)*c").unwrap();
        let haystack = "a".repeat(5_000);
        assert!(!nfa.is_match(&haystack));
        assert!(nfa.is_match(&format!("{}c", haystack)));
    }

    #[test]
    fn sparse_visited_set() {
        // Enough states and chars that the pairs don't fit in a bitset.
        let pattern = "a".repeat(5_000);
        let nfa = NFA::new(&pattern).unwrap();
        assert!(nfa.len() * (pattern.len() + 1) > DENSE_LIMIT);
        assert!(nfa.is_match(&pattern));
        assert!(!nfa.is_match(&format!("{}a", pattern)));
    }

    #[test]
    fn visited_pairs() {
        for (states, len) in [(4, 10), (10_000, 10_000)] {
            let mut visited = Visited::new(states, len);
            assert!(visited.insert(3, 10));
            assert!(!visited.insert(3, 10));
            assert!(visited.insert(3, 9));
            assert!(visited.insert(0, 0));
        }
    }
}
