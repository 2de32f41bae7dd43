use bulls_cows_bot::{compare, Code, Feedback, Game, GameParams, GuessPool, ScoreError, Solver};

fn small_params() -> GameParams {
    GameParams::new(6, 3).unwrap()
}

fn code(s: &str, params: &GameParams) -> Code {
    Code::parse(s, params).unwrap()
}

#[test]
fn test_solver_creation() {
    let params = small_params();
    let solver = Solver::new(params).unwrap();
    assert_eq!(solver.remaining_count(), 216);
    assert_eq!(solver.action_space().len(), 216);
}

#[test]
fn test_apply_feedback() {
    let params = small_params();
    let mut solver = Solver::new(params).unwrap();

    let guess = code("012", &params);
    let secret = code("210", &params);
    let feedback = compare(&secret, &guess).unwrap();
    solver.apply_feedback(&guess, feedback).unwrap();

    assert!(solver.remaining_count() < 216);
    assert!(solver.possible_answers().contains(&secret));
    for candidate in solver.possible_answers() {
        assert_eq!(compare(candidate, &guess).unwrap(), feedback);
    }
}

#[test]
fn test_find_best_guess() {
    let solver = Solver::new(small_params()).unwrap();
    let analysis = solver.find_best_guess().unwrap().unwrap();

    assert_eq!(analysis.code.len(), 3);
    assert!(analysis.entropy > 0.0);
    assert!(analysis.is_possible_answer);
}

#[test]
fn test_best_guess_matches_top_guess() {
    let solver = Solver::new(small_params()).unwrap();
    let best = solver.find_best_guess().unwrap().unwrap();
    let top = solver.find_best_guesses(1).unwrap();
    assert_eq!(top, vec![best]);
}

#[test]
fn test_find_best_guess_single_answer() {
    let params = small_params();
    let mut solver = Solver::new(params).unwrap();
    let secret = code("345", &params);
    solver.apply_feedback(&secret, Feedback::win(3)).unwrap();
    assert_eq!(solver.remaining_count(), 1);

    let analysis = solver.find_best_guess().unwrap().unwrap();
    assert_eq!(analysis.code, secret);
    assert_eq!(analysis.entropy, 0.0);
    assert!(analysis.is_possible_answer);
}

#[test]
fn test_solve_for_secret() {
    let params = small_params();
    let mut solver = Solver::new(params).unwrap();
    let secret = code("154", &params);

    let guesses = solver.solve_for_secret(&secret).unwrap();

    assert!(!guesses.is_empty());
    let (final_guess, final_feedback) = guesses.last().unwrap();
    assert!(final_feedback.is_win(3));
    assert_eq!(*final_guess, secret);
}

#[test]
fn test_solve_various_secrets() {
    let params = GameParams::new(5, 2).unwrap();
    let solver = Solver::new(params).unwrap();

    for secret in solver.action_space() {
        let mut solver = solver.clone();
        let guesses = solver.solve_for_secret(secret).unwrap();

        assert!(guesses.len() <= 6, "Too many guesses for secret: {}", secret);
        let (final_guess, final_feedback) = guesses.last().unwrap();
        assert!(final_feedback.is_win(2), "Didn't win for secret: {}", secret);
        assert_eq!(final_guess, secret);
    }
}

#[test]
fn test_play_game() {
    let params = small_params();
    let mut game = Game::new(params, code("505", &params)).unwrap();
    let mut solver = Solver::new(params).unwrap();

    let guesses = solver.play(&mut game).unwrap();

    assert!(game.is_finished());
    assert_eq!(game.steps(), guesses.len());
    assert_eq!(guesses.last().unwrap().0, *game.peek_secret());
}

#[test]
fn test_analyze_counts_partitions() {
    let params = GameParams::CLASSIC;
    let mut solver = Solver::new(params).unwrap();
    solver
        .apply_feedback(&code("0123", &params), Feedback::new(0, 0))
        .unwrap();
    // only digits 4-9 remain: 6^4 candidates
    assert_eq!(solver.remaining_count(), 1296);

    let analysis = solver.analyze(&code("0123", &params)).unwrap();
    assert_eq!(analysis.entropy, 0.0);
    assert_eq!(analysis.largest_partition, 1296);
    assert!(!analysis.is_possible_answer);
    assert_eq!(analysis.expected_remaining, 1296.0);
}

#[test]
fn test_reset() {
    let params = small_params();
    let mut solver = Solver::new(params).unwrap();

    solver
        .apply_feedback(&code("012", &params), Feedback::new(1, 1))
        .unwrap();
    assert!(solver.remaining_count() < 216);

    solver.reset();
    assert_eq!(solver.remaining_count(), 216);
}

#[test]
fn test_get_top_guesses() {
    let solver = Solver::new(small_params()).unwrap();

    let top_5 = solver.find_best_guesses(5).unwrap();
    assert_eq!(top_5.len(), 5);

    for i in 1..top_5.len() {
        assert!(top_5[i - 1].score >= top_5[i].score);
    }
}

#[test]
fn test_candidates_pool() {
    let params = small_params();
    let mut solver = Solver::new(params).unwrap();
    solver.set_guess_pool(GuessPool::Candidates);

    solver
        .apply_feedback(&code("012", &params), Feedback::new(1, 0))
        .unwrap();

    let guesses = solver.find_best_guesses(10).unwrap();
    assert!(!guesses.is_empty());
    for g in &guesses {
        assert!(g.is_possible_answer, "Not a candidate: {}", g.code);
        assert!(solver.possible_answers().contains(&g.code));
    }
}

#[test]
fn test_empty_possible_answers() {
    let params = small_params();
    let mut solver = Solver::new(params).unwrap();

    // two bulls leave no displaced digit to earn a cow
    solver
        .apply_feedback(&code("012", &params), Feedback::new(2, 1))
        .unwrap();

    assert_eq!(solver.remaining_count(), 0);
    assert!(solver.find_best_guess().unwrap().is_none());
    assert!(solver.find_best_guesses(5).unwrap().is_empty());
}

#[test]
fn test_apply_feedback_rejects_foreign_code() {
    let params = small_params();
    let mut solver = Solver::new(params).unwrap();
    let classic = Code::parse("0123", &GameParams::CLASSIC).unwrap();

    assert!(solver.apply_feedback(&classic, Feedback::new(0, 0)).is_err());
    assert_eq!(solver.remaining_count(), 216);
}

#[test]
fn test_two_remaining_codes_prefers_candidate() {
    let params = GameParams::new(5, 2).unwrap();
    let base = Solver::new(params).unwrap();

    for secret in base.action_space() {
        let mut solver = base.clone();
        while solver.remaining_count() > 1 {
            let best = solver.find_best_guess().unwrap().unwrap();
            if solver.remaining_count() == 2 {
                assert!(best.is_possible_answer, "{} with two left", best.code);
                assert_eq!(best.entropy, 1.0);
            }
            let feedback = compare(secret, &best.code).unwrap();
            if feedback.is_win(2) {
                break;
            }
            solver.apply_feedback(&best.code, feedback).unwrap();
        }
    }
}

#[test]
fn test_benchmark() {
    let params = GameParams::new(5, 2).unwrap();
    let solver = Solver::new(params).unwrap();
    let secrets: Vec<Code> = solver.action_space().iter().copied().collect();

    let distribution = solver.benchmark_guess_distribution(&secrets).unwrap();
    let total: usize = distribution.iter().map(|(_, c)| c).sum();
    assert_eq!(total, 25);

    let average = solver.benchmark_average_guesses(&secrets).unwrap();
    assert!(average >= 1.0);
    assert!(average <= 6.0);
}

#[test]
fn test_rejects_unenumerable_space() {
    for (digits, length) in [(16, 8), (10, 8), (10, 7)] {
        let params = GameParams::new(digits, length).unwrap();
        assert!(
            matches!(Solver::new(params), Err(ScoreError::InvalidParams(_))),
            "{}x{} should be rejected",
            digits,
            length
        );
    }
    assert!(Solver::new(GameParams::new(10, 6).unwrap()).is_ok());
}
