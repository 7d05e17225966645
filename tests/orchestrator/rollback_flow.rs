use command_safety::{
    Checkpoint, Config, HistoryRecord, Orchestrator, Phase, RollbackOutcome,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

fn orchestrator() -> Orchestrator {
    Orchestrator::new(&Config::default()).unwrap()
}

#[test]
fn handler_sees_checkpoint_snapshot() {
    let orch = orchestrator();
    let seen: Arc<Mutex<Vec<(String, Phase)>>> = Arc::default();
    let sink = Arc::clone(&seen);
    orch.register_rollback_handler("version_control", move |cp: &Checkpoint| {
        let context = cp
            .state_snapshot
            .get("context")
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string();
        sink.lock().unwrap().push((context, cp.phase));
        Ok(true)
    });

    let plan = orch.submit("git pull --rebase").approved_plan().cloned().unwrap();
    for checkpoint in plan.checkpoints.iter().rev() {
        assert!(orch.rollback(checkpoint));
    }

    let seen = seen.lock().unwrap();
    assert_eq!(
        *seen,
        vec![
            ("git pull --rebase".to_string(), Phase::Post),
            ("git pull --rebase".to_string(), Phase::Mid),
            ("git pull --rebase".to_string(), Phase::Pre),
        ]
    );
}

#[test]
fn handlers_are_keyed_by_intent() {
    let orch = orchestrator();
    let vcs = Arc::new(AtomicUsize::new(0));
    let containers = Arc::new(AtomicUsize::new(0));
    {
        let vcs = Arc::clone(&vcs);
        orch.register_rollback_handler("version_control", move |_: &Checkpoint| {
            vcs.fetch_add(1, Ordering::SeqCst);
            Ok(true)
        });
    }
    {
        let containers = Arc::clone(&containers);
        orch.register_rollback_handler("container_management", move |_: &Checkpoint| {
            containers.fetch_add(1, Ordering::SeqCst);
            Ok(true)
        });
    }

    orch.submit("git status");
    orch.submit("docker ps");
    assert!(orch.rollback_to("ckpt-0001"));
    assert!(orch.rollback_to("ckpt-0004"));
    assert!(orch.rollback_to("ckpt-0005"));

    assert_eq!(vcs.load(Ordering::SeqCst), 1);
    assert_eq!(containers.load(Ordering::SeqCst), 2);
}

#[test]
fn error_from_handler_is_a_failed_rollback() {
    let orch = orchestrator();
    orch.register_rollback_handler("list_files", |_: &Checkpoint| {
        Err(anyhow::anyhow!("snapshot missing"))
    });
    orch.submit("ls");
    assert!(!orch.rollback_to("ckpt-0002"));

    let Some(HistoryRecord::Rollback { outcome, .. }) = orch.audit_trail().pop() else {
        panic!("rollback not recorded");
    };
    assert_eq!(
        outcome,
        RollbackOutcome::Handled {
            intent: "list_files".into(),
            success: false
        }
    );
}

#[test]
fn legacy_checkpoint_without_intent_uses_fallback() {
    let orch = orchestrator();
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    orch.register_rollback_handler("deploy", move |_: &Checkpoint| {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok(true)
    });

    let legacy: Checkpoint = serde_json::from_value(serde_json::json!({
        "id": "ckpt-0100",
        "created_at": "2024-03-01T12:00:00Z",
        "phase": "mid",
        "state_snapshot": {"context": "deploy.sh"},
        "reversible": true,
        "legacy_command": "deploy_web"
    }))
    .unwrap();

    assert!(orch.rollback(&legacy));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn untracked_rollbacks_leave_a_trace() {
    let orch = orchestrator();
    orch.submit("echo hi");
    assert!(orch.rollback_to("ckpt-0003"));

    let trail = orch.audit_trail();
    assert!(trail.iter().any(|record| matches!(
        record,
        HistoryRecord::Rollback {
            outcome: RollbackOutcome::Untracked { .. },
            ..
        }
    )));
}
