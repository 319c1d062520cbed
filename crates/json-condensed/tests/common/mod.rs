//! Shared helpers for integration tests.

use json_condensed::{Number, Value};

/// Deterministic linear congruential generator so randomized tests are
/// reproducible across platforms and runs.
pub struct Lcg {
    state: u64,
}

impl Lcg {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    pub fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.state
    }

    pub fn below(&mut self, bound: u64) -> u64 {
        (self.next_u64() >> 11) % bound.max(1)
    }

    pub fn chance(&mut self, one_in: u64) -> bool {
        self.below(one_in) == 0
    }
}

const KEY_POOL: &[&str] = &[
    "id", "name", "count", "enabled", "ratio", "tags", "nested", "x", "y", "note",
];

/// Options for [`random_value`].
#[derive(Clone, Copy)]
pub struct GenOptions {
    /// Skip numbers entirely (text round-trips are then exact).
    pub numbers: bool,
    /// Occasionally emit keys the shape framing cannot carry.
    pub odd_keys: bool,
}

impl Default for GenOptions {
    fn default() -> Self {
        Self {
            numbers: true,
            odd_keys: true,
        }
    }
}

pub fn random_value(rng: &mut Lcg, depth: usize, options: GenOptions) -> Value {
    let roll = if depth >= 3 {
        rng.below(5)
    } else {
        rng.below(7)
    };
    match roll {
        0 => Value::Null,
        1 => Value::Bool(rng.below(2) == 0),
        2 if options.numbers => random_number(rng),
        2 => Value::from("stand-in"),
        3 => random_string(rng),
        4 if options.numbers => random_number(rng),
        4 => Value::Bool(true),
        5 => {
            let len = rng.below(18) as usize;
            Value::Array(
                (0..len)
                    .map(|_| random_value(rng, depth + 1, options))
                    .collect(),
            )
        }
        _ => random_object(rng, depth, options),
    }
}

fn random_number(rng: &mut Lcg) -> Value {
    match rng.below(6) {
        0 => Value::from(rng.below(32) as i64 - 16),
        1 => Value::from(rng.below(4096) as i64 - 2048),
        2 => Value::from(rng.next_u64() as i64 >> (rng.below(40) + 8)),
        3 => Value::from((rng.below(2_000_000) as f64) / 1024.0),
        4 => Value::from(rng.below(1 << 20) as f64 * 0.5),
        _ => Value::Number(Number::new(
            f64::from_bits(0x3fe0_0000_0000_0000 | (rng.next_u64() & 0x000f_ffff_ffff_ffff)),
        )),
    }
}

fn random_string(rng: &mut Lcg) -> Value {
    let len = rng.below(45) as usize;
    let mut s = String::with_capacity(len);
    for _ in 0..len {
        let c = (b'a' + rng.below(26) as u8) as char;
        s.push(c);
    }
    Value::String(s)
}

fn random_object(rng: &mut Lcg, depth: usize, options: GenOptions) -> Value {
    let mut object = Value::Object(Vec::new());
    let fields = rng.below(8) as usize;
    for _ in 0..fields {
        let key = if options.odd_keys && rng.chance(17) {
            // Exercise the empty-key marker and the hashtable fallback.
            match rng.below(3) {
                0 => String::new(),
                1 => "caf\u{e9}".to_owned(),
                _ => "\u{3053}".to_owned(),
            }
        } else {
            KEY_POOL[rng.below(KEY_POOL.len() as u64) as usize].to_owned()
        };
        let value = random_value(rng, depth + 1, options);
        object.insert(key, value).unwrap();
    }
    object
}

/// Recursive equality with a relative tolerance for numbers, for payloads
/// that crossed a lossy float form.
pub fn assert_close(actual: &Value, expected: &Value, epsilon: f64) {
    match (actual, expected) {
        (Value::Number(a), Value::Number(b)) => {
            let scale = b.value.abs().max(1.0);
            assert!(
                (a.value - b.value).abs() / scale <= epsilon,
                "number {} too far from {}",
                a.value,
                b.value
            );
        }
        (Value::Array(a), Value::Array(b)) => {
            assert_eq!(a.len(), b.len(), "array length mismatch");
            for (left, right) in a.iter().zip(b.iter()) {
                assert_close(left, right, epsilon);
            }
        }
        (Value::Object(a), Value::Object(b)) => {
            assert_eq!(a.len(), b.len(), "object field count mismatch");
            for (key, left) in a {
                let right = expected.member(key).unwrap_or_else(|_| {
                    panic!("missing key `{key}`");
                });
                assert_close(left, right, epsilon);
            }
        }
        _ => assert_eq!(actual, expected),
    }
}
