use bulls_cows_bot::{
    parse_codes, score, Code, Distribution, GameParams, ScoreError, SELF_MEMBERSHIP_BONUS,
};
use test_case::test_case;

fn codes(items: &[&str]) -> Vec<Code> {
    parse_codes(items.iter().copied(), &GameParams::CLASSIC).unwrap()
}

fn code(s: &str) -> Code {
    codes(&[s])[0]
}

#[test]
fn test_four_distinct_signatures_with_bonus() {
    let memory = codes(&["1234", "2345", "3456", "4567"]);
    let entropy = score(&code("1234"), &memory, 10).unwrap();
    assert!((entropy - 2.0001).abs() < 1e-12, "got {}", entropy);
}

#[test]
fn test_identical_candidates_give_only_bonus() {
    let memory = codes(&["1234", "1234", "1234"]);
    let entropy = score(&code("1234"), &memory, 10).unwrap();
    assert_eq!(entropy, 0.0 + SELF_MEMBERSHIP_BONUS);
}

#[test]
fn test_distinct_signatures_without_membership() {
    // 5678 against each candidate: 0A0B, 0A1B, 0A2B, 0A3B, 0A4B
    let memory = codes(&["0123", "0125", "0165", "0765", "8765"]);
    let entropy = score(&code("5678"), &memory, 10).unwrap();
    assert!((entropy - (5f64).log2()).abs() < 1e-12, "got {}", entropy);
}

#[test_case("1234", 0.0 + SELF_MEMBERSHIP_BONUS ; "sole candidate is the guess")]
#[test_case("9876", 0.0 ; "sole candidate differs")]
fn test_single_candidate(guess: &str, expected: f64) {
    let memory = codes(&["1234"]);
    assert_eq!(score(&code(guess), &memory, 10).unwrap(), expected);
}

#[test]
fn test_score_is_reproducible() {
    let memory = codes(&["0123", "4567", "8901", "2345", "6789", "1357", "2468"]);
    let guess = code("1234");
    let first = score(&guess, &memory, 10).unwrap();
    let second = score(&guess, &memory, 10).unwrap();
    assert_eq!(first.to_bits(), second.to_bits());
}

#[test]
fn test_split_distribution() {
    // two candidates share 0A0B, two share 4A0B style buckets
    let memory = codes(&["5678", "5679", "1234", "1234"]);
    let entropy = score(&code("1234"), &memory, 10).unwrap();
    assert!((entropy - (1.0 + SELF_MEMBERSHIP_BONUS)).abs() < 1e-12);
}

#[test]
fn test_empty_candidate_set() {
    assert_eq!(
        score(&code("1234"), &[], 10),
        Err(ScoreError::EmptyCandidateSet)
    );
}

#[test]
fn test_candidate_length_mismatch() {
    let mut memory = codes(&["1234", "5678"]);
    memory.push(Code::new(&[1, 2, 3]).unwrap());
    assert_eq!(
        score(&code("1234"), &memory, 10),
        Err(ScoreError::LengthMismatch {
            expected: 4,
            found: 3
        })
    );
}

#[test]
fn test_digit_outside_alphabet() {
    let memory = codes(&["1234", "5678"]);
    assert_eq!(
        score(&code("1234"), &memory, 6),
        Err(ScoreError::InvalidDigit {
            digit: 6,
            alphabet_size: 6
        })
    );
}

#[test]
fn test_alphabet_too_small_for_length() {
    let memory = vec![Code::new(&[0, 1, 0, 1]).unwrap()];
    assert!(matches!(
        score(&memory[0], &memory, 4),
        Err(ScoreError::InvalidParams(_))
    ));
}

#[test]
fn test_distribution_matches_score() {
    let memory = codes(&["0123", "1023", "0132", "4567", "3210"]);
    let guess = code("0123");
    let dist = Distribution::build(&guess, &memory, 10).unwrap();
    assert_eq!(dist.total(), 5);
    assert!(dist.contains_guess());
    assert_eq!(dist.score(), score(&guess, &memory, 10).unwrap());
    assert_eq!(dist.partitions().map(|(_, n)| n).sum::<u32>(), 5);
}
