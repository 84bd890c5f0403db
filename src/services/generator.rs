//! The generation engine: one pure function per mode, dispatched through
//! an exhaustive match on `GeneratorMode`. Generators assume their params
//! already passed the validation layer; malformed-but-type-valid input is
//! absorbed here by clamping and warnings, never by panicking.

use chrono::Utc;
use serde_json::json;

use crate::models::{
    AdvantageMode, CharsetKind, GenerationResult, GeneratorMode, GeneratorParams, PoolSpec,
    ResultValue, SortDir,
};
use crate::services::rng;
use crate::services::validation::{MAX_FORMATTED_CHARS, MAX_WARNINGS};
use crate::utils::{format_values, range_size, round_to_precision, truncate_chars};

/// Hard ceiling on values produced by a single call.
pub const MAX_COUNT: i64 = 10_000;

const LOWER: &str = "abcdefghijklmnopqrstuvwxyz";
const UPPER: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const DIGITS: &str = "0123456789";
const HEX_DIGITS: &str = "0123456789ABCDEF";
const SYMBOLS: &str = "!@#$%^&*()-_=+[]{};:,.<>?";
const AMBIGUOUS: &str = "Il1O0o5S8B|`'\"";

/// Run one generation. The only entry point the handlers use.
pub fn generate(mode: GeneratorMode, params: &GeneratorParams) -> GenerationResult {
    let mut result = match mode {
        GeneratorMode::Range => generate_range(params),
        GeneratorMode::Lottery => generate_lottery(params),
        GeneratorMode::List => generate_list(params),
        GeneratorMode::Shuffle => generate_shuffle(params),
        GeneratorMode::Ticket => generate_ticket(params),
        GeneratorMode::Password => generate_password(params),
        GeneratorMode::Dice => generate_dice(params),
        GeneratorMode::Coin => generate_coin(params),
        GeneratorMode::Prime => generate_prime(params),
        GeneratorMode::Fraction => generate_fraction(params),
        GeneratorMode::Roman => generate_roman(params),
    };
    result.formatted = truncate_chars(&result.formatted, MAX_FORMATTED_CHARS);
    result.warnings.truncate(MAX_WARNINGS);
    result
}

fn build_result(
    values: Vec<ResultValue>,
    bonus_values: Vec<ResultValue>,
    formatted: String,
    warnings: Vec<String>,
    meta: Option<serde_json::Value>,
) -> GenerationResult {
    GenerationResult {
        values,
        bonus_values,
        formatted,
        timestamp: Utc::now().timestamp_millis(),
        warnings,
        meta,
    }
}

fn clamped_count(params: &GeneratorParams, default: i64) -> usize {
    params.count.unwrap_or(default).clamp(0, MAX_COUNT) as usize
}

// ---------------------------------------------------------------------------
// Range

fn generate_range(p: &GeneratorParams) -> GenerationResult {
    let mut warnings = Vec::new();
    let mut min = p.min.unwrap_or(1.0);
    let mut max = p.max.unwrap_or(100.0);
    if min > max {
        std::mem::swap(&mut min, &mut max);
    }
    let mut step = p.step.unwrap_or(1.0);
    if step <= 0.0 {
        warnings.push("step must be positive; using 1".to_string());
        step = 1.0;
    }
    let precision = p.precision.unwrap_or({
        if min.fract() == 0.0 && max.fract() == 0.0 && step.fract() == 0.0 {
            0
        } else {
            2
        }
    });
    let count = clamped_count(p, 1);
    let domain = range_size(min, max, step).min(i64::MAX as u64) as i64;
    if domain == 0 || count == 0 {
        if domain == 0 {
            warnings.push("range is empty".to_string());
        }
        return build_result(vec![], vec![], String::new(), warnings, None);
    }

    // Draw indices into the arithmetic progression, then map to values.
    // Unique mode draws without replacement until the domain is exhausted,
    // then fills the remainder with repeats.
    let indices: Vec<i64> = if p.unique.unwrap_or(false) {
        if count as i64 <= domain {
            rng::sample_unique_ints(0, domain - 1, count)
        } else {
            warnings.push(format!(
                "only {domain} unique values in range; remainder drawn with repeats"
            ));
            let mut idx = rng::sample_unique_ints(0, domain - 1, domain as usize);
            while idx.len() < count {
                idx.push(rng::random_int_inclusive(0, domain - 1));
            }
            idx
        }
    } else {
        (0..count)
            .map(|_| rng::random_int_inclusive(0, domain - 1))
            .collect()
    };

    let mut numbers: Vec<f64> = indices
        .iter()
        .map(|&i| round_to_precision(min + i as f64 * step, precision))
        .collect();
    match p.sort {
        Some(SortDir::Asc) => {
            numbers.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
        }
        Some(SortDir::Desc) => {
            numbers.sort_by(|a, b| b.partial_cmp(a).unwrap_or(std::cmp::Ordering::Equal))
        }
        _ => {}
    }

    let values: Vec<ResultValue> = numbers
        .into_iter()
        .map(|v| {
            if precision <= 0 && v.fract() == 0.0 {
                ResultValue::Int(v as i64)
            } else {
                ResultValue::Float(v)
            }
        })
        .collect();
    let formatted = format_values(&values, ", ");
    build_result(values, vec![], formatted, warnings, None)
}

// ---------------------------------------------------------------------------
// Lottery

fn draw_pool(pool: &PoolSpec, warnings: &mut Vec<String>) -> Vec<i64> {
    let (min, max) = if pool.min <= pool.max {
        (pool.min, pool.max)
    } else {
        (pool.max, pool.min)
    };
    let pick = pool.pick.clamp(0, 1000) as usize;
    if pick == 0 {
        return vec![];
    }
    let domain = (max as i128 - min as i128 + 1) as u128;
    let mut values = rng::sample_unique_ints(min, max, pick);
    if (pick as u128) > domain {
        // Unique domain exhausted: fill the remainder with repeats
        warnings.push(format!(
            "pool {min}-{max} holds only {domain} unique values; remainder drawn with repeats"
        ));
        while values.len() < pick {
            values.push(rng::random_int_inclusive(min, max));
        }
    }
    values.sort_unstable();
    values
}

fn generate_lottery(p: &GeneratorParams) -> GenerationResult {
    let mut warnings = Vec::new();
    let values: Vec<ResultValue> = p
        .pool_a
        .as_ref()
        .map(|pool| draw_pool(pool, &mut warnings))
        .unwrap_or_default()
        .into_iter()
        .map(ResultValue::Int)
        .collect();
    let bonus_values: Vec<ResultValue> = p
        .pool_b
        .as_ref()
        .map(|pool| draw_pool(pool, &mut warnings))
        .unwrap_or_default()
        .into_iter()
        .map(ResultValue::Int)
        .collect();
    if p.pool_a.is_none() && p.pool_b.is_none() {
        warnings.push("no pools configured".to_string());
    }

    let mut formatted = format_values(&values, ", ");
    if !bonus_values.is_empty() {
        formatted.push_str(" | Bonus: ");
        formatted.push_str(&format_values(&bonus_values, ", "));
    }
    build_result(values, bonus_values, formatted, warnings, None)
}

// ---------------------------------------------------------------------------
// List pick

fn generate_list(p: &GeneratorParams) -> GenerationResult {
    let mut warnings = Vec::new();
    let items = p.items.clone().unwrap_or_default();
    if items.is_empty() {
        warnings.push("no items provided".to_string());
        return build_result(vec![], vec![], String::new(), warnings, None);
    }
    let mut count = clamped_count(p, 1);
    let unique = p.unique.unwrap_or(false);
    if unique && count > items.len() {
        warnings.push(format!(
            "only {} items available for a unique draw",
            items.len()
        ));
        count = items.len();
    }

    let picked: Vec<String> = if unique {
        match p.weights.clone() {
            Some(mut weights) => {
                // Weighted without replacement: remove the drawn item and
                // its weight mass each step
                let mut pool = items;
                let mut out = Vec::with_capacity(count);
                for _ in 0..count {
                    match rng::weighted_index(&weights) {
                        Some(i) => {
                            out.push(pool.remove(i));
                            weights.remove(i);
                        }
                        None => break,
                    }
                }
                out
            }
            None => {
                let mut pool = items;
                rng::shuffle_in_place(&mut pool);
                pool.truncate(count);
                pool
            }
        }
    } else {
        (0..count)
            .filter_map(|_| {
                let idx = match &p.weights {
                    Some(weights) => rng::weighted_index(weights),
                    None => rng::random_index(items.len()),
                };
                idx.map(|i| items[i].clone())
            })
            .collect()
    };

    let values: Vec<ResultValue> = picked.into_iter().map(ResultValue::Text).collect();
    let formatted = format_values(&values, ", ");
    build_result(values, vec![], formatted, warnings, None)
}

// ---------------------------------------------------------------------------
// Shuffle

fn generate_shuffle(p: &GeneratorParams) -> GenerationResult {
    let mut warnings = Vec::new();
    let mut items = p.items.clone().unwrap_or_default();
    if items.is_empty() {
        warnings.push("no items provided".to_string());
        return build_result(vec![], vec![], String::new(), warnings, None);
    }
    rng::shuffle_in_place(&mut items);

    let group_size = p.group_size.unwrap_or(0);
    let (formatted, meta) = if group_size > 0 {
        let groups: Vec<Vec<String>> = items
            .chunks(group_size as usize)
            .map(|chunk| chunk.to_vec())
            .collect();
        let lines: Vec<String> = groups
            .iter()
            .enumerate()
            .map(|(i, group)| format!("Group {}: {}", i + 1, group.join(", ")))
            .collect();
        (lines.join("\n"), Some(json!({ "groups": groups })))
    } else {
        (items.join(", "), None)
    };

    let values: Vec<ResultValue> = items.into_iter().map(ResultValue::Text).collect();
    build_result(values, vec![], formatted, warnings, meta)
}

// ---------------------------------------------------------------------------
// Ticket draw

fn generate_ticket(p: &GeneratorParams) -> GenerationResult {
    let mut warnings = Vec::new();
    let pool = p.ticket_remaining.clone().unwrap_or_default();
    if pool.is_empty() {
        warnings.push("ticket pool is empty".to_string());
        return build_result(
            vec![],
            vec![],
            String::new(),
            warnings,
            Some(json!({ "remaining": [] })),
        );
    }
    let count = clamped_count(p, 1);
    if count > pool.len() {
        warnings.push(format!("only {} tickets remaining", pool.len()));
    }
    let take = count.min(pool.len());

    let mut order: Vec<usize> = (0..pool.len()).collect();
    rng::shuffle_in_place(&mut order);
    let drawn_idx: std::collections::HashSet<usize> = order[..take].iter().copied().collect();

    let values: Vec<ResultValue> = order[..take].iter().map(|&i| pool[i].clone()).collect();
    // Remaining pool keeps its original order, minus what was drawn
    let remaining: Vec<ResultValue> = pool
        .iter()
        .enumerate()
        .filter(|(i, _)| !drawn_idx.contains(i))
        .map(|(_, v)| v.clone())
        .collect();

    let formatted = format_values(&values, ", ");
    build_result(
        values,
        vec![],
        formatted,
        warnings,
        Some(json!({ "remaining": remaining })),
    )
}

// ---------------------------------------------------------------------------
// Password

fn charset_classes(p: &GeneratorParams, warnings: &mut Vec<String>) -> Vec<Vec<char>> {
    let kind = p.charset.unwrap_or(CharsetKind::Strong);
    let base: Vec<String> = match kind {
        CharsetKind::Numeric => vec![DIGITS.to_string()],
        CharsetKind::Hex => vec![HEX_DIGITS.to_string()],
        CharsetKind::Alphanumeric => {
            vec![LOWER.to_string(), UPPER.to_string(), DIGITS.to_string()]
        }
        CharsetKind::Strong => vec![
            LOWER.to_string(),
            UPPER.to_string(),
            DIGITS.to_string(),
            SYMBOLS.to_string(),
        ],
        CharsetKind::Custom => match &p.custom_chars {
            Some(chars) => vec![chars.clone()],
            None => {
                warnings.push("custom charset is empty; using alphanumeric".to_string());
                vec![LOWER.to_string(), UPPER.to_string(), DIGITS.to_string()]
            }
        },
    };

    let mut excluded: Vec<char> = p.exclude_chars.as_deref().unwrap_or("").chars().collect();
    if p.exclude_ambiguous.unwrap_or(false) {
        excluded.extend(AMBIGUOUS.chars());
    }

    let filtered: Vec<Vec<char>> = base
        .iter()
        .map(|class| {
            class
                .chars()
                .filter(|c| !excluded.contains(c))
                .collect::<Vec<char>>()
        })
        .filter(|class| !class.is_empty())
        .collect();

    if filtered.is_empty() {
        warnings.push("exclusions removed every character; ignoring them".to_string());
        return base.iter().map(|class| class.chars().collect()).collect();
    }
    filtered
}

fn generate_password(p: &GeneratorParams) -> GenerationResult {
    let mut warnings = Vec::new();
    let classes = charset_classes(p, &mut warnings);
    let allowed: Vec<char> = classes.iter().flatten().copied().collect();
    let length = p.length.unwrap_or(12).clamp(1, 256) as usize;
    let count = p.count.unwrap_or(1).clamp(1, 100) as usize;
    let ensure_each =
        p.ensure_each.unwrap_or(false) && classes.len() > 1 && length >= classes.len();

    let mut passwords = Vec::with_capacity(count);
    for _ in 0..count {
        let mut chars: Vec<char> = (0..length)
            .filter_map(|_| rng::random_index(allowed.len()).map(|i| allowed[i]))
            .collect();
        if ensure_each {
            // Reserve one distinct position per class up front, so a later
            // class can never overwrite the only representative of an
            // earlier one
            let mut positions: Vec<usize> = (0..chars.len()).collect();
            rng::shuffle_in_place(&mut positions);
            for (slot, class) in positions.iter().zip(classes.iter()) {
                if let Some(idx) = rng::random_index(class.len()) {
                    chars[*slot] = class[idx];
                }
            }
        }
        passwords.push(chars.into_iter().collect::<String>());
    }

    let values: Vec<ResultValue> = passwords.into_iter().map(ResultValue::Text).collect();
    let formatted = format_values(&values, "\n");
    build_result(values, vec![], formatted, warnings, None)
}

// ---------------------------------------------------------------------------
// Dice

fn generate_dice(p: &GeneratorParams) -> GenerationResult {
    let mut warnings = Vec::new();
    let dice_count = p.dice_count.unwrap_or(1).clamp(1, 200) as usize;

    if let Some(faces) = &p.dice_custom_faces {
        if matches!(
            p.advantage,
            Some(AdvantageMode::Advantage) | Some(AdvantageMode::Disadvantage)
        ) {
            warnings.push("advantage is ignored for custom faces".to_string());
        }
        let values: Vec<ResultValue> = (0..dice_count)
            .filter_map(|_| rng::random_index(faces.len()).map(|i| faces[i].clone()))
            .map(ResultValue::Text)
            .collect();
        let formatted = format_values(&values, ", ");
        return build_result(values, vec![], formatted, warnings, None);
    }

    let sides = p.dice_sides.unwrap_or(6).clamp(2, 1000);
    let roll_set = || -> Vec<i64> {
        (0..dice_count)
            .map(|_| rng::random_int_inclusive(1, sides))
            .collect()
    };
    let rolls = match p.advantage.unwrap_or(AdvantageMode::Normal) {
        AdvantageMode::Normal => roll_set(),
        AdvantageMode::Advantage => {
            let (a, b) = (roll_set(), roll_set());
            if a.iter().sum::<i64>() >= b.iter().sum::<i64>() {
                a
            } else {
                b
            }
        }
        AdvantageMode::Disadvantage => {
            let (a, b) = (roll_set(), roll_set());
            if a.iter().sum::<i64>() <= b.iter().sum::<i64>() {
                a
            } else {
                b
            }
        }
    };
    let total: i64 = rolls.iter().sum();

    let values: Vec<ResultValue> = rolls.into_iter().map(ResultValue::Int).collect();
    let formatted = if values.len() > 1 {
        format!("{} = {}", format_values(&values, " + "), total)
    } else {
        format_values(&values, "")
    };
    build_result(
        values,
        vec![],
        formatted,
        warnings,
        Some(json!({ "total": total })),
    )
}

// ---------------------------------------------------------------------------
// Coin flip

fn generate_coin(p: &GeneratorParams) -> GenerationResult {
    let (heads, tails) = p
        .coin_labels
        .clone()
        .unwrap_or_else(|| ("Heads".to_string(), "Tails".to_string()));
    let count = clamped_count(p, 1);

    let mut heads_n = 0u64;
    let mut tails_n = 0u64;
    let values: Vec<ResultValue> = (0..count)
        .map(|_| {
            if rng::random_int_inclusive(0, 1) == 0 {
                heads_n += 1;
                ResultValue::Text(heads.clone())
            } else {
                tails_n += 1;
                ResultValue::Text(tails.clone())
            }
        })
        .collect();

    let formatted = format_values(&values, ", ");
    let mut tally = serde_json::Map::new();
    tally.insert(heads, json!(heads_n));
    tally.insert(tails, json!(tails_n));
    let meta = json!({ "tally": tally });
    build_result(values, vec![], formatted, vec![], Some(meta))
}

// ---------------------------------------------------------------------------
// Primes

fn sieve_of_eratosthenes(limit: usize) -> Vec<i64> {
    if limit < 2 {
        return vec![];
    }
    let mut composite = vec![false; limit + 1];
    let mut primes = Vec::new();
    for n in 2..=limit {
        if !composite[n] {
            primes.push(n as i64);
            let mut multiple = n * n;
            while multiple <= limit {
                composite[multiple] = true;
                multiple += n;
            }
        }
    }
    primes
}

fn generate_prime(p: &GeneratorParams) -> GenerationResult {
    let mut warnings = Vec::new();
    let prime_max = p.prime_max.unwrap_or(100).clamp(2, 1_000_000) as usize;
    let primes = sieve_of_eratosthenes(prime_max);
    let count = clamped_count(p, 1);
    if primes.is_empty() || count == 0 {
        if primes.is_empty() {
            warnings.push("no primes in range".to_string());
        }
        return build_result(vec![], vec![], String::new(), warnings, None);
    }

    // Uniform draws with replacement across the sieve output
    let values: Vec<ResultValue> = (0..count)
        .filter_map(|_| rng::random_index(primes.len()).map(|i| ResultValue::Int(primes[i])))
        .collect();
    let formatted = format_values(&values, ", ");
    build_result(
        values,
        vec![],
        formatted,
        warnings,
        Some(json!({ "pool_size": primes.len() })),
    )
}

// ---------------------------------------------------------------------------
// Fractions

fn gcd(a: i64, b: i64) -> i64 {
    if b == 0 {
        a
    } else {
        gcd(b, a % b)
    }
}

fn generate_fraction(p: &GeneratorParams) -> GenerationResult {
    let max = p.fraction_max.unwrap_or(10).clamp(1, 1_000_000);
    let count = clamped_count(p, 1);
    let simplify = p.simplify.unwrap_or(false);

    let values: Vec<ResultValue> = (0..count)
        .map(|_| {
            let mut numerator = rng::random_int_inclusive(1, max);
            let mut denominator = rng::random_int_inclusive(1, max);
            if simplify {
                let divisor = gcd(numerator, denominator);
                numerator /= divisor;
                denominator /= divisor;
            }
            ResultValue::Text(format!("{numerator}/{denominator}"))
        })
        .collect();
    let formatted = format_values(&values, ", ");
    build_result(values, vec![], formatted, vec![], None)
}

// ---------------------------------------------------------------------------
// Roman numerals

fn to_roman(mut n: i64) -> String {
    const TABLE: [(i64, &str); 13] = [
        (1000, "M"),
        (900, "CM"),
        (500, "D"),
        (400, "CD"),
        (100, "C"),
        (90, "XC"),
        (50, "L"),
        (40, "XL"),
        (10, "X"),
        (9, "IX"),
        (5, "V"),
        (4, "IV"),
        (1, "I"),
    ];
    let mut out = String::new();
    for (value, glyphs) in TABLE {
        while n >= value {
            out.push_str(glyphs);
            n -= value;
        }
    }
    out
}

fn generate_roman(p: &GeneratorParams) -> GenerationResult {
    let max = p.roman_max.unwrap_or(3999).clamp(1, 3999);
    let count = clamped_count(p, 1);

    let numbers: Vec<i64> = (0..count)
        .map(|_| rng::random_int_inclusive(1, max))
        .collect();
    let values: Vec<ResultValue> = numbers
        .iter()
        .map(|&n| ResultValue::Text(to_roman(n)))
        .collect();
    let formatted = format_values(&values, ", ");
    build_result(
        values,
        vec![],
        formatted,
        vec![],
        Some(json!({ "numbers": numbers })),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn int_values(result: &GenerationResult) -> Vec<i64> {
        result
            .values
            .iter()
            .map(|v| match v {
                ResultValue::Int(n) => *n,
                other => panic!("expected integer value, got {other:?}"),
            })
            .collect()
    }

    #[test]
    fn test_lottery_powerball_shape() {
        let params = GeneratorParams {
            pool_a: Some(PoolSpec {
                min: 1,
                max: 69,
                pick: 5,
            }),
            pool_b: Some(PoolSpec {
                min: 1,
                max: 26,
                pick: 1,
            }),
            ..Default::default()
        };
        let result = generate(GeneratorMode::Lottery, &params);
        let main = int_values(&result);
        assert_eq!(main.len(), 5);
        let distinct: HashSet<_> = main.iter().collect();
        assert_eq!(distinct.len(), 5);
        let mut sorted = main.clone();
        sorted.sort();
        assert_eq!(main, sorted, "main pool must be ascending");
        assert!(main.iter().all(|v| (1..=69).contains(v)));
        assert_eq!(result.bonus_values.len(), 1);
    }

    #[test]
    fn test_lottery_degenerate_pool() {
        let params = GeneratorParams {
            pool_a: Some(PoolSpec {
                min: 7,
                max: 7,
                pick: 1,
            }),
            ..Default::default()
        };
        let result = generate(GeneratorMode::Lottery, &params);
        assert_eq!(int_values(&result), vec![7]);
        assert!(result.bonus_values.is_empty());
    }

    #[test]
    fn test_lottery_inverted_range() {
        let params = GeneratorParams {
            pool_a: Some(PoolSpec {
                min: 49,
                max: 1,
                pick: 6,
            }),
            ..Default::default()
        };
        let result = generate(GeneratorMode::Lottery, &params);
        let main = int_values(&result);
        assert_eq!(main.len(), 6);
        let distinct: HashSet<_> = main.iter().collect();
        assert_eq!(distinct.len(), 6);
        assert!(main.iter().all(|v| (1..=49).contains(v)));
    }

    #[test]
    fn test_lottery_pick_exceeds_domain() {
        let params = GeneratorParams {
            pool_a: Some(PoolSpec {
                min: 1,
                max: 5,
                pick: 100,
            }),
            ..Default::default()
        };
        let result = generate(GeneratorMode::Lottery, &params);
        let main = int_values(&result);
        // Documented policy: full unique domain first, repeats for the rest
        assert_eq!(main.len(), 100);
        let distinct: HashSet<_> = main.iter().collect();
        assert_eq!(distinct.len(), 5);
        assert!(!result.warnings.is_empty());
    }

    #[test]
    fn test_range_honors_step() {
        let params = GeneratorParams {
            min: Some(1.0),
            max: Some(10.0),
            step: Some(3.0),
            count: Some(50),
            ..Default::default()
        };
        let result = generate(GeneratorMode::Range, &params);
        let allowed: HashSet<i64> = [1, 4, 7, 10].into_iter().collect();
        for v in int_values(&result) {
            assert!(allowed.contains(&v), "{v} not on the step grid");
        }
    }

    #[test]
    fn test_range_unique_exhaustion() {
        let params = GeneratorParams {
            min: Some(1.0),
            max: Some(5.0),
            count: Some(10),
            unique: Some(true),
            ..Default::default()
        };
        let result = generate(GeneratorMode::Range, &params);
        let drawn = int_values(&result);
        assert_eq!(drawn.len(), 10);
        let distinct: HashSet<_> = drawn.iter().copied().collect();
        assert_eq!(distinct, (1..=5).collect::<HashSet<i64>>());
        assert!(!result.warnings.is_empty());
    }

    #[test]
    fn test_range_swapped_and_degenerate() {
        let params = GeneratorParams {
            min: Some(10.0),
            max: Some(1.0),
            count: Some(20),
            ..Default::default()
        };
        let result = generate(GeneratorMode::Range, &params);
        assert!(int_values(&result).iter().all(|v| (1..=10).contains(v)));

        let params = GeneratorParams {
            min: Some(3.0),
            max: Some(3.0),
            ..Default::default()
        };
        let result = generate(GeneratorMode::Range, &params);
        assert_eq!(int_values(&result), vec![3]);
    }

    #[test]
    fn test_range_precision() {
        let params = GeneratorParams {
            min: Some(0.0),
            max: Some(1.0),
            step: Some(0.25),
            precision: Some(2),
            count: Some(40),
            ..Default::default()
        };
        let result = generate(GeneratorMode::Range, &params);
        for v in &result.values {
            match v {
                ResultValue::Float(f) => assert!((0.0..=1.0).contains(f)),
                ResultValue::Int(_) => {}
                other => panic!("unexpected value {other:?}"),
            }
        }
    }

    #[test]
    fn test_range_zero_count() {
        let params = GeneratorParams {
            count: Some(-5),
            ..Default::default()
        };
        let result = generate(GeneratorMode::Range, &params);
        assert!(result.values.is_empty());
    }

    #[test]
    fn test_range_sorted_output() {
        let params = GeneratorParams {
            min: Some(1.0),
            max: Some(100.0),
            count: Some(25),
            sort: Some(SortDir::Asc),
            ..Default::default()
        };
        let result = generate(GeneratorMode::Range, &params);
        let drawn = int_values(&result);
        let mut sorted = drawn.clone();
        sorted.sort();
        assert_eq!(drawn, sorted);
    }

    #[test]
    fn test_list_unique_caps_at_item_count() {
        let params = GeneratorParams {
            items: Some(vec!["a".into(), "b".into(), "c".into()]),
            count: Some(10),
            unique: Some(true),
            ..Default::default()
        };
        let result = generate(GeneratorMode::List, &params);
        assert_eq!(result.values.len(), 3);
        let texts: HashSet<String> = result.values.iter().map(|v| v.as_text()).collect();
        assert_eq!(texts.len(), 3);
        assert!(!result.warnings.is_empty());
    }

    #[test]
    fn test_list_weighted_without_replacement() {
        let params = GeneratorParams {
            items: Some(vec!["never".into(), "always".into()]),
            weights: Some(vec![0.0, 5.0]),
            count: Some(1),
            unique: Some(true),
            ..Default::default()
        };
        for _ in 0..25 {
            let result = generate(GeneratorMode::List, &params);
            assert_eq!(result.values[0].as_text(), "always");
        }
    }

    #[test]
    fn test_list_empty_items() {
        let result = generate(GeneratorMode::List, &GeneratorParams::default());
        assert!(result.values.is_empty());
        assert!(!result.warnings.is_empty());
    }

    #[test]
    fn test_shuffle_multiset_and_groups() {
        let params = GeneratorParams {
            items: Some(vec![
                "a".into(),
                "b".into(),
                "c".into(),
                "d".into(),
                "e".into(),
            ]),
            group_size: Some(2),
            ..Default::default()
        };
        let result = generate(GeneratorMode::Shuffle, &params);
        let mut texts: Vec<String> = result.values.iter().map(|v| v.as_text()).collect();
        texts.sort();
        assert_eq!(texts, vec!["a", "b", "c", "d", "e"]);

        let meta = result.meta.unwrap();
        let groups = meta["groups"].as_array().unwrap();
        assert_eq!(groups.len(), 3); // 2 + 2 + 1, trailing short chunk kept
        assert_eq!(groups[2].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_ticket_draw_shrinks_pool() {
        let params = GeneratorParams {
            ticket_remaining: Some(vec![
                ResultValue::Text("A".into()),
                ResultValue::Text("B".into()),
                ResultValue::Text("C".into()),
                ResultValue::Text("D".into()),
            ]),
            count: Some(2),
            ..Default::default()
        };
        let result = generate(GeneratorMode::Ticket, &params);
        assert_eq!(result.values.len(), 2);
        let meta = result.meta.unwrap();
        let remaining = meta["remaining"].as_array().unwrap();
        assert_eq!(remaining.len(), 2);
        // Drawn and remaining partition the original pool
        let drawn: HashSet<String> = result.values.iter().map(|v| v.as_text()).collect();
        for leftover in remaining {
            assert!(!drawn.contains(leftover.as_str().unwrap()));
        }
    }

    #[test]
    fn test_ticket_empty_pool() {
        let result = generate(GeneratorMode::Ticket, &GeneratorParams::default());
        assert!(result.values.is_empty());
        assert!(!result.warnings.is_empty());
    }

    #[test]
    fn test_password_numeric_charset() {
        let params = GeneratorParams {
            charset: Some(CharsetKind::Numeric),
            length: Some(6),
            ..Default::default()
        };
        let result = generate(GeneratorMode::Password, &params);
        let pin = result.values[0].as_text();
        assert_eq!(pin.len(), 6);
        assert!(pin.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_password_ensure_each_class() {
        let params = GeneratorParams {
            charset: Some(CharsetKind::Strong),
            length: Some(8),
            ensure_each: Some(true),
            ..Default::default()
        };
        for _ in 0..25 {
            let result = generate(GeneratorMode::Password, &params);
            let pw = result.values[0].as_text();
            assert!(pw.chars().any(|c| LOWER.contains(c)), "no lower in {pw}");
            assert!(pw.chars().any(|c| UPPER.contains(c)), "no upper in {pw}");
            assert!(pw.chars().any(|c| DIGITS.contains(c)), "no digit in {pw}");
            assert!(pw.chars().any(|c| SYMBOLS.contains(c)), "no symbol in {pw}");
        }
    }

    #[test]
    fn test_password_ensure_each_at_minimal_length() {
        // Length equal to the class count leaves no slack: every position
        // must end up holding a different class's representative
        let params = GeneratorParams {
            charset: Some(CharsetKind::Strong),
            length: Some(4),
            count: Some(100),
            ensure_each: Some(true),
            ..Default::default()
        };
        for _ in 0..20 {
            let result = generate(GeneratorMode::Password, &params);
            for v in &result.values {
                let pw = v.as_text();
                for class in [LOWER, UPPER, DIGITS, SYMBOLS] {
                    assert!(
                        pw.chars().any(|c| class.contains(c)),
                        "{pw} is missing a required character class"
                    );
                }
            }
        }
    }

    #[test]
    fn test_password_exclusions() {
        let params = GeneratorParams {
            charset: Some(CharsetKind::Hex),
            length: Some(64),
            exclude_chars: Some("ABCDEF".into()),
            ..Default::default()
        };
        let result = generate(GeneratorMode::Password, &params);
        let out = result.values[0].as_text();
        assert!(out.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_dice_bounds_and_total() {
        let params = GeneratorParams {
            dice_count: Some(3),
            dice_sides: Some(6),
            ..Default::default()
        };
        let result = generate(GeneratorMode::Dice, &params);
        let rolls = int_values(&result);
        assert_eq!(rolls.len(), 3);
        assert!(rolls.iter().all(|r| (1..=6).contains(r)));
        let total = result.meta.unwrap()["total"].as_i64().unwrap();
        assert_eq!(total, rolls.iter().sum::<i64>());
    }

    #[test]
    fn test_dice_custom_faces() {
        let params = GeneratorParams {
            dice_count: Some(4),
            dice_custom_faces: Some(vec!["rock".into(), "paper".into(), "scissors".into()]),
            advantage: Some(AdvantageMode::Advantage),
            ..Default::default()
        };
        let result = generate(GeneratorMode::Dice, &params);
        assert_eq!(result.values.len(), 4);
        let faces: HashSet<&str> = ["rock", "paper", "scissors"].into_iter().collect();
        for v in &result.values {
            assert!(faces.contains(v.as_text().as_str()));
        }
        assert!(!result.warnings.is_empty()); // advantage ignored
    }

    #[test]
    fn test_coin_tally() {
        let params = GeneratorParams {
            count: Some(20),
            coin_labels: Some(("Yes".into(), "No".into())),
            ..Default::default()
        };
        let result = generate(GeneratorMode::Coin, &params);
        assert_eq!(result.values.len(), 20);
        let meta = result.meta.unwrap();
        let yes = meta["tally"]["Yes"].as_u64().unwrap();
        let no = meta["tally"]["No"].as_u64().unwrap();
        assert_eq!(yes + no, 20);
    }

    #[test]
    fn test_coin_zero_count() {
        let params = GeneratorParams {
            count: Some(0),
            ..Default::default()
        };
        let result = generate(GeneratorMode::Coin, &params);
        assert!(result.values.is_empty());
        assert_eq!(result.formatted, "");

        let params = GeneratorParams {
            count: Some(-3),
            ..Default::default()
        };
        let result = generate(GeneratorMode::Coin, &params);
        assert!(result.values.is_empty());
    }

    #[test]
    fn test_prime_sieve_and_draws() {
        assert_eq!(
            sieve_of_eratosthenes(30),
            vec![2, 3, 5, 7, 11, 13, 17, 19, 23, 29]
        );
        let params = GeneratorParams {
            prime_max: Some(50),
            count: Some(10),
            ..Default::default()
        };
        let result = generate(GeneratorMode::Prime, &params);
        let primes: HashSet<i64> = sieve_of_eratosthenes(50).into_iter().collect();
        for v in int_values(&result) {
            assert!(primes.contains(&v), "{v} is not prime <= 50");
        }
    }

    #[test]
    fn test_fraction_simplify() {
        let params = GeneratorParams {
            fraction_max: Some(12),
            count: Some(30),
            simplify: Some(true),
            ..Default::default()
        };
        let result = generate(GeneratorMode::Fraction, &params);
        for v in &result.values {
            let text = v.as_text();
            let (n, d) = text.split_once('/').unwrap();
            let n: i64 = n.parse().unwrap();
            let d: i64 = d.parse().unwrap();
            assert_eq!(gcd(n, d), 1, "{text} not fully reduced");
        }
    }

    #[test]
    fn test_to_roman() {
        assert_eq!(to_roman(1), "I");
        assert_eq!(to_roman(4), "IV");
        assert_eq!(to_roman(9), "IX");
        assert_eq!(to_roman(14), "XIV");
        assert_eq!(to_roman(40), "XL");
        assert_eq!(to_roman(90), "XC");
        assert_eq!(to_roman(1987), "MCMLXXXVII");
        assert_eq!(to_roman(3999), "MMMCMXCIX");
    }

    #[test]
    fn test_roman_range() {
        let params = GeneratorParams {
            roman_max: Some(50),
            count: Some(10),
            ..Default::default()
        };
        let result = generate(GeneratorMode::Roman, &params);
        let meta = result.meta.unwrap();
        for n in meta["numbers"].as_array().unwrap() {
            let n = n.as_i64().unwrap();
            assert!((1..=50).contains(&n));
        }
    }
}
