use quickcheck::{Arbitrary, Gen};

/// The characters that generated patterns and haystacks are drawn from.
/// Haystacks also get a digit so that `\d` has something to match.
const PATTERN_CHARS: &[&str] = &["a", "b", "c", r"\d"];
const HAYSTACK_CHARS: &[char] = &['a', 'b', 'c', '1'];
const QUANTIFIERS: &[&str] = &["", "", "*", "+", "?"];

/// A randomly generated, always valid, pattern.
#[derive(Clone, Debug)]
pub struct Pattern(pub String);

impl Arbitrary for Pattern {
    fn arbitrary(g: &mut Gen) -> Pattern {
        let depth = usize::arbitrary(g) % 3;
        let mut pattern = String::new();
        expr(g, depth, &mut pattern);
        Pattern(pattern)
    }
}

/// A short haystack over the same small alphabet as generated patterns.
#[derive(Clone, Debug)]
pub struct Haystack(pub String);

impl Arbitrary for Haystack {
    fn arbitrary(g: &mut Gen) -> Haystack {
        let len = usize::arbitrary(g) % 8;
        let haystack = (0..len)
            .map(|_| *g.choose(HAYSTACK_CHARS).unwrap())
            .collect();
        Haystack(haystack)
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Haystack>> {
        Box::new(
            self.0
                .chars()
                .collect::<Vec<char>>()
                .shrink()
                .map(|chars| Haystack(chars.into_iter().collect())),
        )
    }
}

fn expr(g: &mut Gen, depth: usize, out: &mut String) {
    term(g, depth, out);
    if depth > 0 && u8::arbitrary(g) % 3 == 0 {
        out.push('|');
        expr(g, depth - 1, out);
    }
}

fn term(g: &mut Gen, depth: usize, out: &mut String) {
    let factors = 1 + usize::arbitrary(g) % 3;
    for _ in 0..factors {
        atom(g, depth, out);
        out.push_str(g.choose(QUANTIFIERS).unwrap());
    }
}

fn atom(g: &mut Gen, depth: usize, out: &mut String) {
    if depth > 0 && u8::arbitrary(g) % 4 == 0 {
        out.push('(');
        expr(g, depth - 1, out);
        out.push(')');
    } else {
        out.push_str(g.choose(PATTERN_CHARS).unwrap());
    }
}
