use command_safety::orchestrator::read_audit_log;
use command_safety::{Config, HistoryRecord, Orchestrator, SafetyVerdict};
use tempfile::TempDir;

fn with_audit(tmp: &TempDir) -> (Orchestrator, std::path::PathBuf) {
    let path = tmp.path().join("logs").join("audit.jsonl");
    let mut config = Config::default();
    config.audit.log_path = Some(path.display().to_string());
    (Orchestrator::new(&config).unwrap(), path)
}

#[test]
fn every_record_lands_on_disk_in_order() {
    let tmp = TempDir::new().unwrap();
    let (orch, path) = with_audit(&tmp);

    orch.submit("git status");
    orch.submit("rm -rf /");
    orch.rollback_to("ckpt-0001");

    let records = read_audit_log(&path).unwrap();
    assert_eq!(records.len(), 3);
    let kinds: Vec<&str> = records
        .iter()
        .map(|record| match record {
            HistoryRecord::Submission(_) => "submission",
            HistoryRecord::GateBlocked { .. } => "gate_blocked",
            HistoryRecord::Rollback { .. } => "rollback",
        })
        .collect();
    assert_eq!(kinds, vec!["submission", "submission", "rollback"]);

    let HistoryRecord::Submission(entry) = &records[1] else {
        panic!("expected submission");
    };
    assert_eq!(entry.safety_verdict, SafetyVerdict::Fail);
}

#[test]
fn records_are_single_json_lines_with_kind_tags() {
    let tmp = TempDir::new().unwrap();
    let (orch, path) = with_audit(&tmp);
    orch.submit("kubectl get pods");

    let raw = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = raw.lines().collect();
    assert_eq!(lines.len(), 1);
    let value: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
    assert_eq!(value["kind"], "submission");
    assert_eq!(value["intent_label"], "cluster_management");
}

#[test]
fn two_orchestrators_append_to_the_same_file() {
    let tmp = TempDir::new().unwrap();
    let (first, path) = with_audit(&tmp);
    first.submit("ls");
    drop(first);

    let (second, _) = with_audit(&tmp);
    second.submit("pwd");

    assert_eq!(read_audit_log(&path).unwrap().len(), 2);
}
