//! Model-based tests: the manager must agree with a reference state machine
//! for every sequence of loss/restore signals.

use super::recorder::{new_log, recreates, suspends, Recorder};
use crate::lifecycle::{ContextLifecycleManager, ContextState, LifecycleError, SignalOutcome};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Lose,
    Restore,
    /// Restore with the flaky dependent failing its recreate
    RestoreFailing,
}

const STEPS: [Step; 3] = [Step::Lose, Step::Restore, Step::RestoreFailing];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Expected {
    Applied,
    Absorbed,
    Restored,
    Degraded,
    Protocol,
}

#[derive(Debug, Clone, Copy)]
struct Model {
    state: ContextState,
    generation: u64,
    /// False between a loss and the next restore, including after a degraded one
    valid: bool,
    suspend_passes: usize,
    recreate_passes: usize,
}

impl Model {
    const fn new() -> Self {
        Self {
            state: ContextState::Active,
            generation: 0,
            valid: true,
            suspend_passes: 0,
            recreate_passes: 0,
        }
    }

    fn apply(&mut self, step: Step) -> Expected {
        match (step, self.state) {
            (Step::Lose, ContextState::Active) => {
                self.state = ContextState::Lost;
                self.valid = false;
                self.suspend_passes += 1;
                Expected::Applied
            }
            (Step::Lose, ContextState::Degraded) if self.valid => {
                self.valid = false;
                self.suspend_passes += 1;
                Expected::Applied
            }
            (Step::Lose, _) => Expected::Absorbed,
            (Step::Restore | Step::RestoreFailing, ContextState::Lost) => {
                self.generation += 1;
                self.valid = true;
                self.recreate_passes += 1;
                if step == Step::RestoreFailing {
                    self.state = ContextState::Degraded;
                    Expected::Degraded
                } else {
                    self.state = ContextState::Active;
                    Expected::Restored
                }
            }
            (Step::Restore | Step::RestoreFailing, _) => Expected::Protocol,
        }
    }
}

fn run(steps: &[Step]) {
    let log = new_log();
    let mut manager = ContextLifecycleManager::default();
    let steady = Recorder::shared("steady", &log);
    let flaky = Recorder::shared("flaky", &log);
    let _ = manager.register(&steady);
    let flaky_handle = manager.register(&flaky);
    let mut model = Model::new();

    for (index, step) in steps.iter().copied().enumerate() {
        flaky.borrow_mut().fail_recreate = step == Step::RestoreFailing;
        let state_before = manager.state();
        let generation_before = manager.current_generation();

        let expected = model.apply(step);
        let actual = match step {
            Step::Lose => match manager.on_context_lost() {
                SignalOutcome::Applied => Expected::Applied,
                SignalOutcome::Absorbed => Expected::Absorbed,
            },
            Step::Restore | Step::RestoreFailing => match manager.on_context_restored() {
                Ok(generation) => {
                    assert_eq!(generation, manager.current_generation());
                    Expected::Restored
                }
                Err(LifecycleError::Degraded(degraded)) => {
                    assert_eq!(degraded.failed_ids(), vec![flaky_handle.id()]);
                    Expected::Degraded
                }
                Err(LifecycleError::Protocol { state, .. }) => {
                    assert_eq!(state, state_before);
                    Expected::Protocol
                }
            },
        };

        assert_eq!(actual, expected, "step {index} ({step:?}) of {steps:?}");
        assert_eq!(manager.state(), model.state, "step {index} of {steps:?}");
        assert_eq!(
            manager.current_generation().value(),
            model.generation,
            "step {index} of {steps:?}"
        );
        if matches!(expected, Expected::Absorbed | Expected::Protocol) {
            assert_eq!(manager.state(), state_before);
            assert_eq!(manager.current_generation(), generation_before);
        }
    }

    // Every notification pass reaches both dependents exactly once.
    assert_eq!(suspends(&log).len(), model.suspend_passes * 2, "{steps:?}");
    assert_eq!(recreates(&log).len(), model.recreate_passes * 2, "{steps:?}");
}

#[test]
fn test_all_sequences_up_to_length_five() {
    let mut sequences: Vec<Vec<Step>> = vec![Vec::new()];
    for _ in 0..5 {
        let mut longer = Vec::new();
        for seq in &sequences {
            for step in STEPS {
                let mut next = seq.clone();
                next.push(step);
                longer.push(next);
            }
        }
        for seq in &longer {
            run(seq);
        }
        sequences = longer;
    }
}

#[test]
fn test_random_long_sequences() {
    let mut rng = StdRng::seed_from_u64(0x5eed_c0de);
    for _ in 0..200 {
        let len = rng.gen_range(1..40);
        let steps: Vec<Step> = (0..len)
            .map(|_| {
                // Keep failures rare so long runs spend time in the Active/Lost loop.
                match rng.gen_range(0..10) {
                    0 => Step::RestoreFailing,
                    1..=4 => Step::Restore,
                    _ => Step::Lose,
                }
            })
            .collect();
        run(&steps);
    }
}
