use command_safety::{
    BlockReason, Config, Orchestrator, SafetyVerdict, SubmitOutcome,
};

fn orchestrator() -> Orchestrator {
    Orchestrator::new(&Config::default()).unwrap()
}

#[test]
fn git_status_yields_low_risk_plan() {
    let orch = orchestrator();
    let SubmitOutcome::Approved(plan) = orch.submit("git status") else {
        panic!("git status should be approved");
    };

    assert_eq!(plan.intent_label, "version_control");
    assert_eq!(plan.checkpoints.len(), 3);
    assert!((plan.divergence_estimate - 0.07).abs() < 1e-9);
    assert!((plan.recovery_rate_estimate - 0.955).abs() < 1e-9);

    let intent = orch.classifier().classify("git status");
    assert!(intent.confidence >= 0.9);
}

#[test]
fn root_delete_is_blocked_and_logged_as_fail() {
    let orch = orchestrator();
    let outcome = orch.submit("rm -rf /");
    let blocked = outcome.blocked().expect("rm -rf / must be blocked");
    assert!(matches!(blocked.reason, BlockReason::UnsafeCommand { .. }));

    let last = orch.history().pop().unwrap();
    assert_eq!(last.safety_verdict, SafetyVerdict::Fail);
}

#[test]
fn mixed_batch_approves_four_and_blocks_one() {
    let orch = orchestrator();
    let commands = [
        "git status",
        "npm install",
        "docker build .",
        "rm -rf /",
        "kubectl get pods",
    ];
    let outcomes: Vec<SubmitOutcome> = commands.iter().map(|c| orch.submit(c)).collect();

    let approved = outcomes.iter().filter(|o| o.is_approved()).count();
    assert_eq!(approved, 4);
    assert_eq!(outcomes.len() - approved, 1);
    assert!(!outcomes[3].is_approved());

    let metrics = orch.metrics();
    assert_eq!(metrics.total_commands, 5);
    assert_eq!(metrics.blocked_commands, 1);
}

#[test]
fn tight_cap_blocks_management_commands() {
    let mut config = Config::default();
    config.gating.divergence_cap = 0.01;
    let orch = Orchestrator::new(&config).unwrap();

    for command in ["npm install lodash", "docker compose up", "kubectl get pods -A"] {
        let outcome = orch.submit(command);
        let blocked = outcome.blocked().expect("cap of 1% blocks everything");
        let plan = blocked.plan.as_ref().expect("plan kept for audit");
        assert!(plan.blocked);
        let reason = plan.block_reason.as_deref().unwrap_or_default();
        assert!(!reason.is_empty());
        assert!(reason.contains("9.00%"), "{reason}");
        assert!(reason.contains("1.00%"), "{reason}");
    }
}

#[test]
fn lenient_mode_passes_warnings_silently() {
    let mut config = Config::default();
    config.gating.strict_mode = false;
    let orch = Orchestrator::new(&config).unwrap();

    assert!(orch.submit("kubectl apply -f deploy.yaml").is_approved());
    assert_eq!(orch.history()[0].safety_verdict, SafetyVerdict::Pass);
}

#[test]
fn privileged_and_env_prefixed_commands_keep_their_label() {
    let orch = orchestrator();
    let plan = orch
        .submit("FOO=1 sudo git status")
        .approved_plan()
        .cloned()
        .unwrap();
    assert_eq!(plan.intent_label, "version_control");
}

#[test]
fn out_of_range_thresholds_are_rejected_at_construction() {
    for (cap, threshold) in [(-0.01, 0.95), (1.01, 0.95), (0.1, -1.0), (0.1, f64::INFINITY)] {
        let mut config = Config::default();
        config.gating.divergence_cap = cap;
        config.gating.recovery_threshold = threshold;
        assert!(
            Orchestrator::new(&config).is_err(),
            "cap={cap} threshold={threshold}"
        );
    }
}

#[test]
fn root_delete_spellings_are_all_blocked() {
    let orch = orchestrator();
    for command in [
        "rm -r -f /",
        "rm --recursive --force /",
        "rm -rf /; echo done",
        "rm -rf //",
        r#"rm -rf "/""#,
        "sudo rm -R -f /*",
    ] {
        let outcome = orch.submit(command);
        let blocked = outcome.blocked().unwrap_or_else(|| panic!("{command} was approved"));
        assert!(
            matches!(
                &blocked.reason,
                BlockReason::UnsafeCommand { pattern_id: Some(id), .. } if id == "root_recursive_delete"
            ),
            "{command}: {}",
            blocked.reason
        );
    }
    assert!(orch.history().iter().all(|entry| entry.safety_verdict == SafetyVerdict::Fail));
}
