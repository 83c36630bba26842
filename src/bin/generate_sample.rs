use std::path::PathBuf;

use anyhow::{Context, Result};
use log::info;

const DEFAULT_DIR: &str = "sample_corpus";
const DEFAULT_COUNT: usize = 20;
/// Roughly one in six Ling-Spam messages is spam.
const SPAM_RATIO: f64 = 1.0 / 6.0;

const HAM_WORDS: &[&str] = &[
    "linguistics", "conference", "syntax", "semantics", "paper", "deadline",
    "university", "workshop", "phonology", "corpus", "lexicon", "grammar",
    "submission", "abstract", "research", "department", "language", "program",
];

const SPAM_WORDS: &[&str] = &[
    "free", "money", "offer", "click", "order", "guarantee", "income",
    "business", "opportunity", "cash", "credit", "remove", "mailing", "list",
    "save", "profit", "limited", "time",
];

/// Short tokens and symbols the normalizer is expected to drop.
const NOISE: &[&str] = &["a", "of", "to", "-", "!", "s", "'", ":", "in"];

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn below(&mut self, n: usize) -> usize {
        (self.next_u64() % n as u64) as usize
    }

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[self.below(items.len())]
    }
}

/// One body line mixing vocabulary, noise tokens and numbers.
fn generate_body(vocab: &[&str], rng: &mut SimpleRng) -> String {
    let len = 8 + rng.below(24);
    let mut words = Vec::with_capacity(len);
    for _ in 0..len {
        let roll = rng.next_f64();
        if roll < 0.2 {
            words.push(rng.pick(NOISE).to_string());
        } else if roll < 0.3 {
            words.push(rng.below(10_000).to_string());
        } else {
            words.push(rng.pick(vocab).to_string());
        }
    }
    words.join(" ")
}

fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let dir = PathBuf::from(args.next().unwrap_or_else(|| DEFAULT_DIR.to_string()));
    let count = match args.next() {
        Some(n) => n.parse::<usize>().with_context(|| format!("invalid count '{n}'"))?,
        None => DEFAULT_COUNT,
    };

    std::fs::create_dir_all(&dir).with_context(|| format!("creating {}", dir.display()))?;

    let mut rng = SimpleRng::new(42);
    let mut spam = 0usize;

    for i in 1..=count {
        let is_spam = rng.next_f64() < SPAM_RATIO;
        let (name, vocab) = if is_spam {
            spam += 1;
            (format!("spmsga{i}.txt"), SPAM_WORDS)
        } else {
            (format!("{}-{i}msg1.txt", 1 + i % 10), HAM_WORDS)
        };

        let subject = format!("{} {}", rng.pick(vocab), rng.pick(vocab));
        let content = format!("Subject: {subject}\n\n{}\n", generate_body(vocab, &mut rng));

        let path = dir.join(&name);
        std::fs::write(&path, content).with_context(|| format!("writing {}", path.display()))?;
        info!("wrote {}", path.display());
    }

    println!(
        "Wrote {count} messages ({spam} spam, {} ham) to {}",
        count - spam,
        dir.display()
    );
    Ok(())
}
