use command_safety::planner::{STEP_COUNT, estimate_divergence};
use command_safety::{Config, IntentClassifier, Orchestrator, SafetyVerdict};
use proptest::prelude::*;
use proptest::test_runner::Config as ProptestConfig;

fn orchestrator(strict: bool) -> Orchestrator {
    let mut config = Config::default();
    config.gating.strict_mode = strict;
    Orchestrator::new(&config).unwrap()
}

fn arb_unsafe_command() -> impl Strategy<Value = String> {
    let core = prop_oneof![
        Just("rm -rf /"),
        Just("rm -fr /*"),
        Just("DROP DATABASE production"),
        Just("truncate table users"),
        Just("mkfs.ext4 /dev/sdb1"),
        Just("dd if=/dev/zero of=/dev/sda bs=1M"),
        Just(":(){ :|:& };:"),
        Just("rm --no-preserve-root -r /"),
        Just("rm -r -f /"),
        Just("rm --recursive --force /"),
        Just("rm -rf /;"),
        Just("rm -rf //"),
        Just(r#"rm -rf "/""#),
        Just("sudo rm -R -f /*"),
    ];
    (
        proptest::option::of("[a-z]{1,8}"),
        core,
        proptest::option::of("[a-z]{1,8}"),
    )
        .prop_map(|(before, core, after)| {
            let mut command = String::new();
            if let Some(before) = before {
                command.push_str(&before);
                command.push_str("; ");
            }
            command.push_str(core);
            if let Some(after) = after {
                command.push_str(" && ");
                command.push_str(&after);
            }
            command
        })
}

fn arb_known_command() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        Just("git status"),
        Just("ls -la"),
        Just("npm install"),
        Just("docker build ."),
        Just("kubectl get pods"),
        Just("rm -rf /"),
        Just("terraform apply"),
        Just("echo hello"),
        Just(""),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn classification_is_pure(command in "\\PC{0,48}", strict in any::<bool>()) {
        let classifier = IntentClassifier::builtin(strict).unwrap();
        let first = classifier.classify(&command);
        let second = classifier.classify(&command);
        prop_assert_eq!(&first, &second);
        prop_assert!((0.0..=1.0).contains(&first.confidence));
        prop_assert!(!first.raw_intent_label.is_empty());
    }

    #[test]
    fn unsafe_commands_are_always_blocked(command in arb_unsafe_command(), strict in any::<bool>()) {
        let orch = orchestrator(strict);
        let outcome = orch.submit(&command);
        prop_assert!(!outcome.is_approved(), "{command} was approved");
        let last = orch.history().pop().unwrap();
        prop_assert_eq!(last.safety_verdict, SafetyVerdict::Fail);
    }

    #[test]
    fn checkpoint_ids_strictly_increase(commands in prop::collection::vec(arb_known_command(), 1..20)) {
        let orch = orchestrator(true);
        let mut previous = 0_u64;
        for command in commands {
            if let Some(plan) = orch.submit(command).approved_plan() {
                prop_assert_eq!(plan.checkpoints.len(), 3);
                for checkpoint in &plan.checkpoints {
                    let sequence = checkpoint.sequence().unwrap();
                    prop_assert!(sequence > previous);
                    previous = sequence;
                }
            }
        }
    }

    #[test]
    fn block_rate_matches_counts(
        commands in prop::collection::vec(arb_known_command(), 0..20),
        cap in 0.0_f64..=0.2,
    ) {
        let mut config = Config::default();
        config.gating.divergence_cap = cap;
        let orch = Orchestrator::new(&config).unwrap();
        for command in &commands {
            orch.submit(command);
        }

        let metrics = orch.metrics();
        prop_assert_eq!(metrics.total_commands, commands.len() as u64);
        if metrics.total_commands == 0 {
            prop_assert!(metrics.block_rate.abs() < f64::EPSILON);
        } else {
            let expected = metrics.blocked_commands as f64 / metrics.total_commands as f64;
            prop_assert!((metrics.block_rate - expected).abs() < 1e-12);
        }
        prop_assert!(metrics.blocked_commands <= metrics.total_commands);
    }

    #[test]
    fn added_risk_keyword_never_lowers_divergence(
        base in "[a-z]{1,12}",
        keyword in prop_oneof![Just("management"), Just("modification"), Just("execute_")],
    ) {
        let keywords: Vec<String> = Config::default().patterns.high_risk_keywords;
        let plain = estimate_divergence(&base, STEP_COUNT, &keywords);
        let risky = estimate_divergence(&format!("{base}_{keyword}"), STEP_COUNT, &keywords);
        prop_assert!(risky >= plain);
    }
}
